//! Node tree overlaid on inspected memory.
//!
//! Every node occupies `memory_size()` bytes at `offset()` inside its parent's
//! memory window. Drawing appends to a `Surface` and returns the pixel
//! footprint; `calculate_drawn_height` is the draw-free layout pass and never
//! touches remote memory.

pub mod base;
pub mod class;
pub mod hex;
pub mod levels;
pub mod weak_ptr;

pub use base::NodeHeader;
pub use class::ClassNode;
pub use hex::HexNode;
pub use levels::LevelsOpen;
pub use weak_ptr::{Resolution, WeakPtrNode};

use std::any::Any;
use std::fmt;
use uuid::Uuid;

use crate::view::{Size, Surface, ViewInfo};

/// Identity of a node instance, carried by its hot spots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(Uuid);

impl NodeId {
    pub fn new() -> Self {
        NodeId(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node:{}", self.0)
    }
}

bitflags::bitflags! {
    /// Capabilities generic traversals consult instead of matching on node types.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NodeCapabilities: u8 {
        /// Children are embedded in this node's memory and take part in
        /// structural cycle detection
        const CYCLE_CHECK = 1 << 0;
        /// Owns an inner node describing memory reached through a pointer
        const REFERENCE = 1 << 1;
        /// Holds an ordered list of member nodes
        const CONTAINER = 1 << 2;
    }
}

pub trait Node: fmt::Debug {
    fn header(&self) -> &NodeHeader;

    fn header_mut(&mut self) -> &mut NodeHeader;

    /// Bytes this node occupies in its parent's memory window.
    fn memory_size(&self) -> usize;

    /// Draw at `(x, y)` and return the pixel size the node occupies.
    fn draw(&mut self, view: &ViewInfo<'_>, surface: &mut Surface, x: i32, y: i32) -> Size;

    /// Height `draw` would occupy, computed from local windows without any
    /// remote read.
    fn calculate_drawn_height(&self, view: &ViewInfo<'_>) -> i32;

    fn capabilities(&self) -> NodeCapabilities {
        NodeCapabilities::CYCLE_CHECK
    }

    /// Directly owned nodes, embedded or referenced.
    fn children(&self) -> Vec<&dyn Node> {
        Vec::new()
    }

    /// Name of the structure this node defines, if it defines one.
    fn class_name(&self) -> Option<&str> {
        None
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn id(&self) -> NodeId {
        self.header().id
    }

    fn name(&self) -> &str {
        &self.header().name
    }

    fn offset(&self) -> usize {
        self.header().offset
    }

    fn is_expanded_at(&self, level: usize) -> bool {
        self.header().levels_open.is_open(level)
    }

    /// Flip expansion at `level`; returns the new state.
    fn toggle_level(&mut self, level: usize) -> bool {
        self.header_mut().levels_open.toggle(level)
    }
}

impl<'a> dyn Node + 'a {
    pub fn downcast_ref<T: Node + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    pub fn downcast_mut<T: Node + 'static>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut()
    }
}
