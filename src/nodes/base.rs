//! State and label-row helpers shared by all node kinds.
//!
//! The `add_*` helpers draw one element of a label row at the cursor and
//! return the advanced cursor, registering hot spots as they go.

use crate::core::address::Address;
use crate::nodes::{LevelsOpen, NodeId};
use crate::view::{Color, DrawCommand, HotSpot, HotSpotKind, Icon, Rect, Size, Surface, ViewInfo};

#[derive(Debug, Clone)]
pub struct NodeHeader {
    pub id: NodeId,
    pub name: String,
    pub comment: String,
    /// Byte offset inside the parent's memory window
    pub offset: usize,
    pub hidden: bool,
    pub selected: bool,
    pub levels_open: LevelsOpen,
}

impl NodeHeader {
    pub fn new(name: impl Into<String>, offset: usize) -> Self {
        Self {
            id: NodeId::new(),
            name: name.into(),
            comment: String::new(),
            offset,
            hidden: false,
            selected: false,
            levels_open: LevelsOpen::new(false),
        }
    }

    /// Header whose levels start expanded.
    pub fn open(name: impl Into<String>, offset: usize) -> Self {
        Self {
            levels_open: LevelsOpen::new(true),
            ..Self::new(name, offset)
        }
    }

    /// Absolute address of this node for the given view.
    pub fn address(&self, view: &ViewInfo<'_>) -> Address {
        view.address
            .checked_add(self.offset as u64)
            .unwrap_or(Address::NULL)
    }

    /// Whether children are shown at the view's level.
    pub fn is_expanded(&self, view: &ViewInfo<'_>) -> bool {
        view.can_expand() && self.levels_open.is_open(view.level)
    }

    fn hot_spot(&self, view: &ViewInfo<'_>, surface: &mut Surface, rect: Rect, kind: HotSpotKind) {
        surface.add_hot_spot(HotSpot {
            rect,
            kind,
            node: self.id,
            address: self.address(view),
            level: view.level,
        });
    }

    /// Hot spot spanning the whole row; highlights the row when selected.
    pub fn add_selection(&self, view: &ViewInfo<'_>, surface: &mut Surface, y: i32, height: i32) {
        let rect = Rect::new(0, y, view.settings.layout.client_width, height);
        if self.selected {
            surface.push(DrawCommand::Fill {
                rect,
                color: view.settings.colors.selected,
            });
        }
        self.hot_spot(view, surface, rect, HotSpotKind::Select);
    }

    /// Delete icon at the right edge of the row.
    pub fn add_delete(&self, view: &ViewInfo<'_>, surface: &mut Surface, y: i32) {
        let icon_width = view.settings.layout.icon_width;
        let x = view.settings.layout.client_width - icon_width;
        surface.push(DrawCommand::Icon {
            x,
            y,
            icon: Icon::Delete,
        });
        self.hot_spot(
            view,
            surface,
            Rect::new(x, y, icon_width, view.font().height),
            HotSpotKind::Delete,
        );
    }

    /// Type replacement drop-down in the left margin.
    pub fn add_type_drop(&self, view: &ViewInfo<'_>, surface: &mut Surface, y: i32) {
        let icon_width = view.settings.layout.icon_width;
        surface.push(DrawCommand::Icon {
            x: 0,
            y,
            icon: Icon::DropArrow,
        });
        self.hot_spot(
            view,
            surface,
            Rect::new(0, y, icon_width, view.font().height),
            HotSpotKind::TypeDrop,
        );
    }

    /// Open/closed icon reflecting the view's level.
    pub fn add_open_close(&self, view: &ViewInfo<'_>, surface: &mut Surface, x: i32, y: i32) -> i32 {
        let icon = if self.is_expanded(view) {
            Icon::Open
        } else {
            Icon::Closed
        };
        self.add_icon(view, surface, x, y, icon, Some(HotSpotKind::OpenClose))
    }

    pub fn add_icon(
        &self,
        view: &ViewInfo<'_>,
        surface: &mut Surface,
        x: i32,
        y: i32,
        icon: Icon,
        kind: Option<HotSpotKind>,
    ) -> i32 {
        let icon_width = view.settings.layout.icon_width;
        surface.push(DrawCommand::Icon { x, y, icon });
        if let Some(kind) = kind {
            self.hot_spot(
                view,
                surface,
                Rect::new(x, y, icon_width, view.font().height),
                kind,
            );
        }
        x + icon_width
    }

    /// Offset within the parent and absolute address columns.
    pub fn add_address_offset(&self, view: &ViewInfo<'_>, surface: &mut Surface, x: i32, y: i32) -> i32 {
        let layout = &view.settings.layout;
        let colors = &view.settings.colors;
        let mut x = x;
        if layout.show_offset {
            let text = format!("{:04X}", self.offset);
            x = self.add_text(view, surface, x, y, colors.offset, None, &text) + view.font().width;
        }
        if layout.show_address {
            let digits = view.pointer_width().bytes() * 2;
            let text = format!("{:0width$X}", self.address(view), width = digits);
            x = self.add_text(view, surface, x, y, colors.address, None, &text) + view.font().width;
        }
        x
    }

    /// Draw `text` and return the cursor after it.
    #[allow(clippy::too_many_arguments)]
    pub fn add_text(
        &self,
        view: &ViewInfo<'_>,
        surface: &mut Surface,
        x: i32,
        y: i32,
        color: Color,
        kind: Option<HotSpotKind>,
        text: &str,
    ) -> i32 {
        let width = view.font().text_width(text);
        surface.push(DrawCommand::Text {
            x,
            y,
            color,
            text: text.to_string(),
        });
        if let Some(kind) = kind {
            self.hot_spot(view, surface, Rect::new(x, y, width, view.font().height), kind);
        }
        x + width
    }

    pub fn add_comment(&self, view: &ViewInfo<'_>, surface: &mut Surface, x: i32, y: i32) -> i32 {
        if !view.settings.layout.show_comments {
            return x;
        }
        let text = format!("// {}", self.comment);
        self.add_text(
            view,
            surface,
            x,
            y,
            view.settings.colors.comment,
            Some(HotSpotKind::EditComment),
            &text,
        )
    }

    /// Thin bar drawn in place of a hidden node.
    pub fn draw_hidden(&self, view: &ViewInfo<'_>, surface: &mut Surface, x: i32, y: i32) -> Size {
        let height = view.settings.layout.hidden_height;
        surface.push(DrawCommand::Fill {
            rect: Rect::new(x, y, view.settings.layout.client_width - x, height),
            color: view.settings.colors.hidden,
        });
        Size::new(0, height)
    }

    pub fn hidden_height(&self, view: &ViewInfo<'_>) -> i32 {
        view.settings.layout.hidden_height
    }
}
