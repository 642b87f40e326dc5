//! Geometric primitives in device space.
//!
//! Device coordinates have their origin at the top-left corner with Y growing
//! downward. Data-space samples live in [`crate::series`].

use serde::{Deserialize, Serialize};

/// A point in device space (logical pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    /// X value in pixels.
    pub x: f32,
    /// Y value in pixels.
    pub y: f32,
}

impl ScreenPoint {
    /// Create a new screen point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A rectangle in device space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    /// Top-left corner.
    pub min: ScreenPoint,
    /// Bottom-right corner.
    pub max: ScreenPoint,
}

impl ScreenRect {
    /// Create a new screen rectangle from corners.
    pub const fn new(min: ScreenPoint, max: ScreenPoint) -> Self {
        Self { min, max }
    }

    /// Create a rectangle from an origin and a size.
    pub fn from_origin_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(ScreenPoint::new(x, y), ScreenPoint::new(x + width, y + height))
    }

    /// Rectangle width in pixels.
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Rectangle height in pixels.
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Check whether the rectangle has positive area.
    pub fn is_valid(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }

    /// Check whether the point lies inside (edges included).
    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Shrink the rectangle by the given insets.
    pub fn inset_by(&self, insets: Insets) -> Self {
        Self::new(
            ScreenPoint::new(self.min.x + insets.left, self.min.y + insets.top),
            ScreenPoint::new(self.max.x - insets.right, self.max.y - insets.bottom),
        )
    }

    /// Grow the rectangle horizontally by the given amounts.
    pub fn expand_x(&self, left: f32, right: f32) -> Self {
        Self::new(
            ScreenPoint::new(self.min.x - left, self.min.y),
            ScreenPoint::new(self.max.x + right, self.max.y),
        )
    }
}

/// Chart margins inside the host bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Insets {
    /// Top margin.
    pub top: f32,
    /// Left margin.
    pub left: f32,
    /// Bottom margin.
    pub bottom: f32,
    /// Right margin.
    pub right: f32,
}

impl Insets {
    /// Create insets from the four margins.
    pub const fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inset_shrinks_each_side() {
        let rect = ScreenRect::from_origin_size(0.0, 0.0, 100.0, 50.0);
        let inner = rect.inset_by(Insets::new(5.0, 40.0, 10.0, 30.0));
        assert_eq!(inner.min, ScreenPoint::new(40.0, 5.0));
        assert_eq!(inner.max, ScreenPoint::new(70.0, 40.0));
        assert!(inner.is_valid());
    }

    #[test]
    fn oversized_insets_invalidate_rect() {
        let rect = ScreenRect::from_origin_size(0.0, 0.0, 20.0, 20.0);
        assert!(!rect.inset_by(Insets::new(0.0, 15.0, 0.0, 15.0)).is_valid());
    }
}
