//! Renderer: one refresh of a node tree against a live process.
//!
//! Each frame re-reads the root window, then draws the tree into a fresh
//! surface. Weak pointers inside the tree resolve their own targets during the
//! same pass, so a frame always reflects the process as it is now.

use tracing::warn;

use crate::config::InspectorConfig;
use crate::core::address::Address;
use crate::draw_span;
use crate::memory::{Detached, MemoryBuffer, RemoteMemory};
use crate::nodes::Node;
use crate::view::{Size, Surface, ViewInfo};

#[derive(Debug)]
pub struct Renderer {
    config: InspectorConfig,
    root_memory: MemoryBuffer,
    surface: Surface,
}

impl Renderer {
    pub fn new(config: InspectorConfig) -> Self {
        Self {
            config,
            root_memory: MemoryBuffer::new(),
            surface: Surface::new(),
        }
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    /// Output of the most recent frame.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Root window of the most recent frame.
    pub fn root_memory(&self) -> &MemoryBuffer {
        &self.root_memory
    }

    /// Draw `root` as the structure at `address` in `process`.
    ///
    /// An unreadable root draws against a zeroed window.
    pub fn render(&mut self, root: &mut dyn Node, process: &dyn RemoteMemory, address: Address) -> Size {
        let span = draw_span!(root.name(), address = %address);
        let _guard = span.enter();

        self.surface.clear();
        self.root_memory.set_size(root.memory_size());
        if let Err(e) = self.root_memory.update(process, address) {
            warn!(error = %e, %address, "root window unreadable");
        }

        let view = ViewInfo::new(&self.config, process, &self.root_memory, address);
        root.draw(&view, &mut self.surface, 0, 0)
    }

    /// Height of `root` over the most recent frame's root window, without
    /// reading any remote memory.
    pub fn measure(&self, root: &dyn Node) -> i32 {
        let view = ViewInfo::new(
            &self.config,
            &Detached,
            &self.root_memory,
            self.root_memory.base(),
        );
        root.calculate_drawn_height(&view)
    }
}
