//! Visual theme for charts.

use serde::{Deserialize, Serialize};

use crate::render::Color;

/// Colors and label sizing shared by all chart primitives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Background color, also used to hollow out selection markers.
    pub background: Color,
    /// Grid line and selection line color.
    pub grid: Color,
    /// Grid label color.
    pub label: Color,
    /// Grid label font size in pixels.
    pub label_size: f32,
}

impl Theme {
    /// Light theme.
    pub fn light() -> Self {
        Self {
            background: Color::WHITE,
            grid: Color::new(0.9, 0.9, 0.9, 1.0),
            label: Color::from_rgb8(0x96, 0xa2, 0xaa),
            label_size: 12.0,
        }
    }

    /// Dark theme.
    pub fn dark() -> Self {
        Self {
            background: Color::from_rgb8(0x24, 0x2f, 0x3e),
            grid: Color::from_rgb8(0x31, 0x3d, 0x4d),
            label: Color::from_rgb8(0x54, 0x67, 0x78),
            label_size: 12.0,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
