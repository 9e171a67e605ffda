//! View context handed to nodes during draw and measure passes.
//!
//! A `ViewInfo` binds a node tree to one window of memory: the address the
//! window starts at, the local bytes of that window, the live process handle
//! for any further reads, and the layout settings. Nodes that follow a pointer
//! derive a new view bound to their own mirror buffer.

pub mod geometry;
pub mod surface;

pub use geometry::{FontMetrics, Rect, Size};
pub use surface::{Color, DrawCommand, HotSpot, HotSpotKind, Icon, Surface};

use crate::config::InspectorConfig;
use crate::core::address::{Address, PointerWidth};
use crate::memory::{MemoryBuffer, RemoteMemory};

#[derive(Clone, Copy)]
pub struct ViewInfo<'a> {
    /// Address of the first byte of `memory` in the inspected process
    pub address: Address,
    /// Local window the current nodes read their fields from
    pub memory: &'a MemoryBuffer,
    /// Live process handle
    pub process: &'a dyn RemoteMemory,
    pub settings: &'a InspectorConfig,
    /// Nesting depth; structures draw their members one level deeper
    pub level: usize,
}

impl<'a> ViewInfo<'a> {
    /// A level-0 view over `memory`, which mirrors `address` in `process`.
    pub fn new(
        settings: &'a InspectorConfig,
        process: &'a dyn RemoteMemory,
        memory: &'a MemoryBuffer,
        address: Address,
    ) -> Self {
        Self {
            address,
            memory,
            process,
            settings,
            level: 0,
        }
    }

    pub fn font(&self) -> FontMetrics {
        self.settings.layout.font
    }

    pub fn pointer_width(&self) -> PointerWidth {
        self.settings.memory.pointer_width
    }

    /// The same window one nesting level deeper.
    pub fn nested(&self) -> Self {
        Self {
            level: self.level + 1,
            ..*self
        }
    }

    /// A view at the same level bound to another window.
    pub fn with_memory<'b>(&self, address: Address, memory: &'b MemoryBuffer) -> ViewInfo<'b>
    where
        'a: 'b,
    {
        ViewInfo {
            address,
            memory,
            process: self.process,
            settings: self.settings,
            level: self.level,
        }
    }

    /// Whether nodes may expand at this level.
    pub fn can_expand(&self) -> bool {
        self.level < self.settings.layout.max_level
    }
}

impl std::fmt::Debug for ViewInfo<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewInfo")
            .field("address", &self.address)
            .field("memory_size", &self.memory.size())
            .field("memory_valid", &self.memory.is_valid())
            .field("level", &self.level)
            .finish()
    }
}
