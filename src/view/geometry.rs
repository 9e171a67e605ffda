//! Pixel geometry used by layout and hit testing.

use serde::{Deserialize, Serialize};

/// Pixel footprint of a drawn node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle in surface coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Monospace font cell dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontMetrics {
    pub width: i32,
    pub height: i32,
}

impl FontMetrics {
    /// Width of `text` in pixels.
    pub fn text_width(&self, text: &str) -> i32 {
        text.chars().count() as i32 * self.width
    }
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            width: 7,
            height: 16,
        }
    }
}
