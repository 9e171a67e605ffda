//! HexNode: raw bytes shown as hex, used to pad undefined structure space.

use std::any::Any;

use super::{Node, NodeHeader};
use crate::view::{Size, Surface, ViewInfo};

#[derive(Debug, Clone)]
pub struct HexNode {
    header: NodeHeader,
    size: usize,
}

impl HexNode {
    fn with_size(name: impl Into<String>, offset: usize, size: usize) -> Self {
        Self {
            header: NodeHeader::new(name, offset),
            size,
        }
    }

    pub fn hex8(name: impl Into<String>, offset: usize) -> Self {
        Self::with_size(name, offset, 1)
    }

    pub fn hex16(name: impl Into<String>, offset: usize) -> Self {
        Self::with_size(name, offset, 2)
    }

    pub fn hex32(name: impl Into<String>, offset: usize) -> Self {
        Self::with_size(name, offset, 4)
    }

    pub fn hex64(name: impl Into<String>, offset: usize) -> Self {
        Self::with_size(name, offset, 8)
    }

    /// Bytes of this field in the view's window, space separated.
    pub fn format_bytes(&self, view: &ViewInfo<'_>) -> String {
        view.memory
            .read_bytes_or_zero(self.header.offset, self.size)
            .iter()
            .map(|b| hex::encode_upper([*b]))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Node for HexNode {
    fn header(&self) -> &NodeHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut NodeHeader {
        &mut self.header
    }

    fn memory_size(&self) -> usize {
        self.size
    }

    fn draw(&mut self, view: &ViewInfo<'_>, surface: &mut Surface, x: i32, y: i32) -> Size {
        if self.header.hidden {
            return self.header.draw_hidden(view, surface, x, y);
        }

        let font = view.font();
        let orig_x = x;

        self.header.add_selection(view, surface, y, font.height);
        self.header.add_delete(view, surface, y);
        self.header.add_type_drop(view, surface, y);

        let mut x = x + view.settings.layout.icon_width * 2;
        x = self.header.add_address_offset(view, surface, x, y);
        let bytes = self.format_bytes(view);
        x = self
            .header
            .add_text(view, surface, x, y, view.settings.colors.hex, None, &bytes)
            + font.width;
        x = self.header.add_comment(view, surface, x, y);

        Size::new(x - orig_x, font.height)
    }

    fn calculate_drawn_height(&self, view: &ViewInfo<'_>) -> i32 {
        if self.header.hidden {
            self.header.hidden_height(view)
        } else {
            view.font().height
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
