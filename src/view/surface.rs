//! Surface: the recorded output of a draw pass.
//!
//! Nodes do not paint. They append draw commands and hot spots to a
//! `Surface`, and the host replays the commands onto its own canvas and routes
//! input through the hot spots.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::geometry::Rect;
use crate::core::address::Address;
use crate::nodes::NodeId;

/// 24-bit RGB color, serialized as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `RRGGBB`.
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        let bytes = hex::decode(digits).map_err(|e| format!("invalid color '{}': {}", s, e))?;
        match bytes.as_slice() {
            [r, g, b] => Ok(Self::rgb(*r, *g, *b)),
            _ => Err(format!("invalid color '{}': expected 3 bytes", s)),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{}", hex::encode_upper([self.r, self.g, self.b]))
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Icons a node can place on its label row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Open,
    Closed,
    Pointer,
    Class,
    Change,
    Delete,
    DropArrow,
}

/// What interacting with a hot spot does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HotSpotKind {
    /// Select the node (spans the label row)
    Select,
    /// Remove the node from its parent
    Delete,
    /// Open the type replacement drop-down
    TypeDrop,
    /// Toggle expansion at the hot spot's level
    OpenClose,
    /// Change the inner node's type
    ChangeType,
    /// Edit the node name
    EditName,
    /// Edit the node comment
    EditComment,
}

/// An interactive region produced during a draw pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotSpot {
    pub rect: Rect,
    pub kind: HotSpotKind,
    pub node: NodeId,
    /// Address of the node's memory at draw time
    pub address: Address,
    /// Nesting level the node was drawn at
    pub level: usize,
}

/// One recorded drawing primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    Text {
        x: i32,
        y: i32,
        color: Color,
        text: String,
    },
    Icon {
        x: i32,
        y: i32,
        icon: Icon,
    },
    Fill {
        rect: Rect,
        color: Color,
    },
}

/// Draw commands and hot spots accumulated over one pass.
#[derive(Debug, Default)]
pub struct Surface {
    commands: Vec<DrawCommand>,
    hot_spots: Vec<HotSpot>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.hot_spots.clear();
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn add_hot_spot(&mut self, hot_spot: HotSpot) {
        self.hot_spots.push(hot_spot);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn hot_spots(&self) -> &[HotSpot] {
        &self.hot_spots
    }

    /// Topmost hot spot under the point. Later hot spots win over the row-wide selection.
    pub fn hot_spot_at(&self, x: i32, y: i32) -> Option<&HotSpot> {
        self.hot_spots.iter().rev().find(|h| h.rect.contains(x, y))
    }

    /// All recorded text, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_hex_round_trip() {
        let c = Color::from_hex("#FF8000").unwrap();
        assert_eq!(c, Color::rgb(255, 128, 0));
        assert_eq!(c.to_hex(), "#FF8000");
        assert_eq!(Color::from_hex("00ff00").unwrap(), Color::rgb(0, 255, 0));
        assert!(Color::from_hex("#FFF").is_err());
        assert!(Color::from_hex("#GG0000").is_err());
    }

    #[test]
    fn color_serializes_as_string() {
        let json = serde_json::to_string(&Color::rgb(1, 2, 3)).unwrap();
        assert_eq!(json, "\"#010203\"");
    }

    #[test]
    fn hot_spot_lookup_prefers_latest() {
        let node = NodeId::new();
        let mut surface = Surface::new();
        surface.add_hot_spot(HotSpot {
            rect: Rect::new(0, 0, 100, 16),
            kind: HotSpotKind::Select,
            node,
            address: Address::NULL,
            level: 0,
        });
        surface.add_hot_spot(HotSpot {
            rect: Rect::new(0, 0, 16, 16),
            kind: HotSpotKind::OpenClose,
            node,
            address: Address::NULL,
            level: 0,
        });
        assert_eq!(surface.hot_spot_at(4, 4).unwrap().kind, HotSpotKind::OpenClose);
        assert_eq!(surface.hot_spot_at(50, 4).unwrap().kind, HotSpotKind::Select);
        assert!(surface.hot_spot_at(50, 20).is_none());
    }
}
