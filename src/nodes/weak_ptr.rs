//! WeakPtrNode: a doubly-indirected pointer with a one-pointer back offset.
//!
//! The node's own slot holds the address of a pointer in the inspected
//! process. That second pointer, minus one pointer width, is where the target
//! object starts. On every draw pass while expanded the chain is resolved
//! again, the target window is copied into a private mirror buffer, and the
//! inner node is drawn against the mirror instead of the live process.
//!
//! Resolution never fails outward: a null hop or a failed read ends the chain
//! and the node draws as pointing to nothing.

use std::any::Any;
use tracing::{debug, trace};

use super::{ClassNode, Node, NodeCapabilities, NodeHeader};
use crate::config::MemoryConfig;
use crate::core::address::{Address, PointerWidth};
use crate::error::{Hop, ResolveFault};
use crate::memory::{MemoryBuffer, MemoryError};
use crate::view::{HotSpotKind, Icon, Size, Surface, ViewInfo};

/// Outcome of one resolution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Pointer read from this node's slot in the parent window
    pub first_hop: Address,
    /// Pointer read at `first_hop` in the remote process, if the read happened
    pub second_hop: Option<Address>,
    /// Start of the target object, if the chain resolved
    pub target: Option<Address>,
    /// Why the chain stopped early
    pub fault: Option<ResolveFault>,
}

impl Resolution {
    fn stopped(first_hop: Address, second_hop: Option<Address>, fault: ResolveFault) -> Self {
        Self {
            first_hop,
            second_hop,
            target: None,
            fault: Some(fault),
        }
    }

    /// Target address, or null when the chain did not resolve.
    pub fn final_address(&self) -> Address {
        self.target.unwrap_or(Address::NULL)
    }

    pub fn is_resolved(&self) -> bool {
        self.target.is_some()
    }
}

#[derive(Debug)]
pub struct WeakPtrNode {
    header: NodeHeader,
    width: PointerWidth,
    inner: Box<dyn Node>,
    memory: MemoryBuffer,
    last_resolution: Option<Resolution>,
}

impl WeakPtrNode {
    /// A weak pointer whose target is a fresh structure padded to the
    /// configured default size.
    pub fn new(name: impl Into<String>, offset: usize, memory: &MemoryConfig) -> Self {
        let mut class = ClassNode::create();
        class.add_bytes(memory.default_inner_size);
        Self::with_inner(name, offset, memory.pointer_width, Box::new(class))
    }

    pub fn with_inner(
        name: impl Into<String>,
        offset: usize,
        width: PointerWidth,
        inner: Box<dyn Node>,
    ) -> Self {
        Self {
            header: NodeHeader::new(name, offset),
            width,
            inner,
            memory: MemoryBuffer::new(),
            last_resolution: None,
        }
    }

    pub fn inner(&self) -> &dyn Node {
        self.inner.as_ref()
    }

    /// The inner node may be edited freely; the mirror follows its size on the next pass.
    pub fn inner_mut(&mut self) -> &mut dyn Node {
        self.inner.as_mut()
    }

    /// Replace the inner node, returning the previous one.
    pub fn set_inner(&mut self, inner: Box<dyn Node>) -> Box<dyn Node> {
        std::mem::replace(&mut self.inner, inner)
    }

    /// Mirror of the target window from the most recent pass.
    pub fn mirror(&self) -> &MemoryBuffer {
        &self.memory
    }

    pub fn last_resolution(&self) -> Option<&Resolution> {
        self.last_resolution.as_ref()
    }

    /// Follow the pointer chain for this node in `view`.
    ///
    /// The first hop is read from the view's local window; only the second hop
    /// reads the remote process. Nothing is cached.
    pub fn resolve(&self, view: &ViewInfo<'_>) -> Resolution {
        let width = self.width;

        let first_hop = view.memory.read_pointer(self.header.offset, width);
        if first_hop.is_null() {
            return Resolution::stopped(
                first_hop,
                None,
                ResolveFault::NullPointer { hop: Hop::First },
            );
        }

        let second_hop = match view.process.read_pointer(first_hop, width) {
            Ok(ptr) => ptr,
            Err(source) => {
                return Resolution::stopped(
                    first_hop,
                    None,
                    ResolveFault::RemoteReadFailure {
                        hop: Hop::Second,
                        address: first_hop,
                        source,
                    },
                );
            }
        };
        if second_hop.is_null() {
            return Resolution::stopped(
                first_hop,
                Some(second_hop),
                ResolveFault::NullPointer { hop: Hop::Second },
            );
        }

        match second_hop.checked_sub(width.bytes() as u64) {
            Some(target) => Resolution {
                first_hop,
                second_hop: Some(second_hop),
                target: Some(target),
                fault: None,
            },
            None => Resolution::stopped(
                first_hop,
                Some(second_hop),
                ResolveFault::RemoteReadFailure {
                    hop: Hop::Second,
                    address: first_hop,
                    source: MemoryError::InvalidAddress(second_hop),
                },
            ),
        }
    }

    /// Resolve, resize the mirror to the inner node's size and refill it.
    fn refresh(&mut self, view: &ViewInfo<'_>) -> Resolution {
        let mut resolution = self.resolve(view);
        trace!(
            node = %self.header.name,
            first_hop = %resolution.first_hop,
            target = %resolution.final_address(),
            "weak pointer resolved"
        );

        let declared = self.inner.memory_size();
        if self.memory.size() != declared {
            let fault = ResolveFault::SizeMismatch {
                expected: declared,
                actual: self.memory.size(),
            };
            debug!(node = %self.header.name, %fault, "resizing mirror");
            self.memory.set_size(declared);
        }

        let target = resolution.final_address();
        if let Err(source) = self.memory.update(view.process, target) {
            resolution.target = None;
            resolution.fault = Some(ResolveFault::RemoteReadFailure {
                hop: Hop::Mirror,
                address: target,
                source,
            });
        }

        if let Some(fault) = &resolution.fault {
            debug!(node = %self.header.name, error = %fault, "weak pointer has no target");
        }
        resolution
    }
}

impl Node for WeakPtrNode {
    fn header(&self) -> &NodeHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut NodeHeader {
        &mut self.header
    }

    /// One pointer slot. The target's size belongs to the inner node.
    fn memory_size(&self) -> usize {
        self.width.bytes()
    }

    fn draw(&mut self, view: &ViewInfo<'_>, surface: &mut Surface, x: i32, y: i32) -> Size {
        if self.header.hidden {
            return self.header.draw_hidden(view, surface, x, y);
        }

        let font = view.font();
        let colors = &view.settings.colors;
        let orig_x = x;
        let orig_y = y;

        self.header.add_selection(view, surface, y, font.height);
        self.header.add_delete(view, surface, y);
        self.header.add_type_drop(view, surface, y);

        let mut x = self.header.add_open_close(view, surface, x, y);
        x = self.header.add_icon(view, surface, x, y, Icon::Pointer, None);

        let tx = x;
        x = self.header.add_address_offset(view, surface, x, y);

        x = self.header.add_text(view, surface, x, y, colors.type_name, None, "WeakPtr") + font.width;
        x = self.header.add_text(
            view,
            surface,
            x,
            y,
            colors.name,
            Some(HotSpotKind::EditName),
            &self.header.name,
        ) + font.width;
        let value = format!("<{}>", self.inner.name());
        x = self.header.add_text(view, surface, x, y, colors.value, None, &value);
        x = self.header.add_icon(view, surface, x, y, Icon::Change, Some(HotSpotKind::ChangeType));

        x += font.width;
        x = self.header.add_comment(view, surface, x, y);

        let y = y + font.height;
        let mut size = Size::new(x - orig_x, y - orig_y);

        if self.header.is_expanded(view) {
            let resolution = self.refresh(view);
            if let Some(target) = resolution.target {
                let inner_view = view.with_memory(target, &self.memory);
                let inner_size = self.inner.draw(&inner_view, surface, tx, y);

                size.width = size.width.max(inner_size.width + tx - orig_x);
                size.height += inner_size.height;
            }
            self.last_resolution = Some(resolution);
        }

        size
    }

    fn calculate_drawn_height(&self, view: &ViewInfo<'_>) -> i32 {
        if self.header.hidden {
            return self.header.hidden_height(view);
        }

        let line = view.font().height;
        if !self.header.is_expanded(view) {
            return line;
        }

        // Only local state is consulted: the slot in the view's window and
        // what the previous pass left in the mirror.
        let first_hop = view.memory.read_pointer(self.header.offset, self.width);
        if first_hop.is_null() {
            return line;
        }
        if let Some(last) = &self.last_resolution {
            if last.first_hop == first_hop && !last.is_resolved() {
                return line;
            }
        }

        let inner_view = view.with_memory(self.memory.base(), &self.memory);
        line + self.inner.calculate_drawn_height(&inner_view)
    }

    /// The inner node is reached through remote memory, never embedded, so a
    /// structural cycle check does not apply.
    fn capabilities(&self) -> NodeCapabilities {
        NodeCapabilities::REFERENCE
    }

    fn children(&self) -> Vec<&dyn Node> {
        vec![self.inner.as_ref()]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
