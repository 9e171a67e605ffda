//! ClassNode: a generic structure made of member nodes laid out by offset.
//!
//! Members read their fields from the class's own memory window and are drawn
//! one nesting level deeper than the class header.

use std::any::Any;
use std::sync::atomic::{AtomicU32, Ordering};

use super::{HexNode, Node, NodeCapabilities, NodeHeader};
use crate::view::{HotSpotKind, Icon, Size, Surface, ViewInfo};

static NEXT_CLASS: AtomicU32 = AtomicU32::new(1);

#[derive(Debug)]
pub struct ClassNode {
    header: NodeHeader,
    members: Vec<Box<dyn Node>>,
}

impl ClassNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            header: NodeHeader::open(name, 0),
            members: Vec::new(),
        }
    }

    /// A class with a generated unique name.
    pub fn create() -> Self {
        let n = NEXT_CLASS.fetch_add(1, Ordering::Relaxed);
        Self::new(format!("N{:08X}", n))
    }

    pub fn members(&self) -> &[Box<dyn Node>] {
        &self.members
    }

    pub fn members_mut(&mut self) -> &mut [Box<dyn Node>] {
        &mut self.members
    }

    /// Append `node` at the current end of the structure.
    pub fn add_node(&mut self, mut node: Box<dyn Node>) {
        node.header_mut().offset = self.memory_size();
        self.members.push(node);
    }

    /// Insert `node` at the offset it already carries.
    pub fn insert_node(&mut self, node: Box<dyn Node>) {
        let at = self
            .members
            .iter()
            .position(|m| m.offset() > node.offset())
            .unwrap_or(self.members.len());
        self.members.insert(at, node);
    }

    /// Pad the end of the structure with `count` bytes of hex fields, widest first.
    pub fn add_bytes(&mut self, count: usize) {
        let mut remaining = count;
        while remaining > 0 {
            let offset = self.memory_size();
            let name = format!("pad_{:04X}", offset);
            let node = match remaining {
                8.. => HexNode::hex64(name, offset),
                4..=7 => HexNode::hex32(name, offset),
                2..=3 => HexNode::hex16(name, offset),
                _ => HexNode::hex8(name, offset),
            };
            remaining -= node.memory_size();
            self.members.push(Box::new(node));
        }
    }

    pub fn remove(&mut self, index: usize) -> Option<Box<dyn Node>> {
        (index < self.members.len()).then(|| self.members.remove(index))
    }
}

impl Node for ClassNode {
    fn header(&self) -> &NodeHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut NodeHeader {
        &mut self.header
    }

    fn memory_size(&self) -> usize {
        self.members
            .iter()
            .map(|m| m.offset() + m.memory_size())
            .max()
            .unwrap_or(0)
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

        let mut x = self.header.add_open_close(view, surface, x, y);
        x = self.header.add_icon(view, surface, x, y, Icon::Class, None);
        let tx = x;

        let address = format!("{}", view.address);
        x = self.header.add_text(view, surface, x, y, colors.address, None, &address) + font.width;
        x = self.header.add_text(view, surface, x, y, colors.type_name, None, "Class") + font.width;
        x = self.header.add_text(
            view,
            surface,
            x,
            y,
            colors.name,
            Some(HotSpotKind::EditName),
            &self.header.name,
        ) + font.width;
        let size_label = format!("[{}]", self.memory_size());
        x = self.header.add_text(view, surface, x, y, colors.value, None, &size_label) + font.width;
        x = self.header.add_comment(view, surface, x, y);

        let mut y = y + font.height;
        let mut size = Size::new(x - orig_x, y - orig_y);

        if self.header.is_expanded(view) {
            let members_view = view.nested();
            for member in &mut self.members {
                let member_size = member.draw(&members_view, surface, tx, y);
                size.width = size.width.max(member_size.width + tx - orig_x);
                y += member_size.height;
            }
            size.height = y - orig_y;
        }

        size
    }

    fn calculate_drawn_height(&self, view: &ViewInfo<'_>) -> i32 {
        if self.header.hidden {
            return self.header.hidden_height(view);
        }

        let mut height = view.font().height;
        if self.header.is_expanded(view) {
            let members_view = view.nested();
            height += self
                .members
                .iter()
                .map(|m| m.calculate_drawn_height(&members_view))
                .sum::<i32>();
        }
        height
    }

    fn capabilities(&self) -> NodeCapabilities {
        NodeCapabilities::CYCLE_CHECK | NodeCapabilities::CONTAINER
    }

    fn children(&self) -> Vec<&dyn Node> {
        self.members.iter().map(|m| m.as_ref()).collect()
    }

    fn class_name(&self) -> Option<&str> {
        Some(&self.header.name)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
