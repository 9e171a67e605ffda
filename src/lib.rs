//! # memscope
//!
//! Core of an interactive structure inspector: a typed, expandable node tree
//! drawn over the memory of a live external process.
//!
//! The centerpiece is [`nodes::WeakPtrNode`], which follows a two-hop pointer
//! chain through the inspected process on every refresh, mirrors the target
//! window into a local [`memory::MemoryBuffer`], and draws its inner structure
//! against that mirror.

/// Core data types module
pub mod core;

pub mod config;
pub mod error;
pub mod logging;
pub mod memory;
pub mod nodes;
pub mod render;
pub mod traversal;
pub mod view;

pub use crate::config::InspectorConfig;
pub use crate::core::address::{Address, PointerWidth};
pub use crate::error::{InspectError, ResolveFault, Result};
pub use crate::memory::{MemoryBuffer, MemoryError, ProcessSnapshot, RemoteMemory};
pub use crate::nodes::{ClassNode, HexNode, Node, WeakPtrNode};
pub use crate::render::Renderer;
pub use crate::view::{Size, Surface, ViewInfo};
