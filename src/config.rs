//! Configuration for the inspector core.
//!
//! Provides centralized configuration for layout, colors and memory
//! conventions with sensible defaults. Configuration round-trips through JSON.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::address::PointerWidth;
use crate::error::{InspectError, Result};
use crate::view::{Color, FontMetrics};

/// Size of the structure created as the target of a new weak pointer.
pub const DEFAULT_INNER_SIZE: usize = 64;

/// Master configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    /// Layout metrics and visibility toggles.
    pub layout: LayoutConfig,
    /// Colors used for each kind of label.
    pub colors: ColorConfig,
    /// Memory layout conventions of the inspected process.
    pub memory: MemoryConfig,
}

impl InspectorConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would make layout degenerate.
    pub fn validate(&self) -> Result<()> {
        let layout = &self.layout;
        if layout.font.width <= 0 || layout.font.height <= 0 {
            return Err(InspectError::InvalidConfig(format!(
                "font metrics must be positive, got {}x{}",
                layout.font.width, layout.font.height
            )));
        }
        if layout.icon_width < 0 || layout.hidden_height < 0 {
            return Err(InspectError::InvalidConfig(
                "icon width and hidden height must not be negative".to_string(),
            ));
        }
        if layout.max_level == 0 {
            return Err(InspectError::InvalidConfig(
                "max_level must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Layout metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Monospace cell size
    pub font: FontMetrics,
    /// Width of an icon cell in pixels
    pub icon_width: i32,
    /// Width of the drawing area; selection rows span it
    pub client_width: i32,
    /// Height of the bar drawn in place of a hidden node
    pub hidden_height: i32,
    /// Nodes never expand at or beyond this nesting level
    pub max_level: usize,
    /// Show the offset of each node within its parent
    pub show_offset: bool,
    /// Show the absolute address of each node
    pub show_address: bool,
    /// Show node comments
    pub show_comments: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            font: FontMetrics::default(),
            icon_width: 16,
            client_width: 1024,
            hidden_height: 1,
            max_level: 32,
            show_offset: true,
            show_address: true,
            show_comments: true,
        }
    }
}

/// Colors for each kind of label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub selected: Color,
    pub hidden: Color,
    pub offset: Color,
    pub address: Color,
    pub hex: Color,
    #[serde(rename = "type")]
    pub type_name: Color,
    pub name: Color,
    pub value: Color,
    pub comment: Color,
    pub text: Color,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            selected: Color::rgb(0xF0, 0xF0, 0xF0),
            hidden: Color::rgb(0xF0, 0xF0, 0xF0),
            offset: Color::rgb(0xFF, 0x00, 0x00),
            address: Color::rgb(0x00, 0x80, 0x00),
            hex: Color::rgb(0x00, 0x00, 0x00),
            type_name: Color::rgb(0x00, 0x00, 0xFF),
            name: Color::rgb(0x80, 0x00, 0x80),
            value: Color::rgb(0xFF, 0x80, 0x00),
            comment: Color::rgb(0x00, 0x80, 0x00),
            text: Color::rgb(0x00, 0x00, 0x8B),
        }
    }
}

/// Memory layout conventions of the inspected process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Pointer width of the inspected process
    pub pointer_width: PointerWidth,
    /// Bytes of padding given to the structure a new weak pointer targets
    pub default_inner_size: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            pointer_width: PointerWidth::native(),
            default_inner_size: DEFAULT_INNER_SIZE,
        }
    }
}
