//! Coordinate transforms between data and device space.

use crate::error::{ChartError, ChartResult, RangeAxis};
use crate::geom::{Insets, ScreenPoint, ScreenRect};
use crate::view::{TimeRange, ValueRange, offset_time, time_delta};

/// 2D affine transform: `x' = a·x + c·y + tx`, `y' = b·x + d·y + ty`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    /// X scale.
    pub a: f64,
    /// Y shear contribution of X.
    pub b: f64,
    /// X shear contribution of Y.
    pub c: f64,
    /// Y scale.
    pub d: f64,
    /// X translation.
    pub tx: f64,
    /// Y translation.
    pub ty: f64,
}

impl AffineTransform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// Map a data-space `(time, value)` pair into device space.
    pub fn apply(&self, time: i64, value: f64) -> ScreenPoint {
        let (x, y) = self.apply_f64(time as f64, value);
        ScreenPoint::new(x as f32, y as f32)
    }

    /// Map a raw coordinate pair without narrowing.
    pub fn apply_f64(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.tx,
            self.b * x + self.d * y + self.ty,
        )
    }

    /// Invert the transform, if it is not singular.
    pub fn invert(&self) -> Option<Self> {
        let det = self.a * self.d - self.b * self.c;
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let a = self.d / det;
        let b = -self.b / det;
        let c = -self.c / det;
        let d = self.a / det;
        Some(Self {
            a,
            b,
            c,
            d,
            tx: -(a * self.tx + c * self.ty),
            ty: -(b * self.tx + d * self.ty),
        })
    }

    /// Column-major 3x3 matrix for GPU uniforms.
    pub fn to_matrix(&self) -> [[f32; 3]; 3] {
        [
            [self.a as f32, self.b as f32, 0.0],
            [self.c as f32, self.d as f32, 0.0],
            [self.tx as f32, self.ty as f32, 1.0],
        ]
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Compute the transform mapping `time_range × value_range` onto `rect`.
///
/// `from` lands on the left edge, `max` on the top edge.
pub fn compute(
    time_range: TimeRange,
    value_range: ValueRange,
    rect: ScreenRect,
) -> ChartResult<AffineTransform> {
    if !time_range.is_valid() {
        return Err(ChartError::DegenerateRange {
            axis: RangeAxis::Time,
        });
    }
    if !value_range.is_valid() {
        return Err(ChartError::DegenerateRange {
            axis: RangeAxis::Value,
        });
    }
    if !rect.is_valid() {
        return Err(ChartError::DegenerateRange {
            axis: RangeAxis::Rect,
        });
    }
    let a = rect.width() as f64 / time_range.span() as f64;
    let d = -(rect.height() as f64) / value_range.span();
    Ok(AffineTransform {
        a,
        b: 0.0,
        c: 0.0,
        d,
        tx: rect.min.x as f64 - a * time_range.from as f64,
        ty: rect.max.y as f64 - d * value_range.min,
    })
}

/// Rect and time window actually used for drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawBounds {
    /// Device rectangle.
    pub rect: ScreenRect,
    /// Time window mapped onto `rect`.
    pub time: TimeRange,
}

/// Widen the draw rect and time window into the chart margins.
///
/// Each side grows by the smaller of its inset fraction and the fraction of
/// data lying beyond that side of the visible window.
pub fn expand_draw_bounds(
    rect: ScreenRect,
    insets: Insets,
    time_range: TimeRange,
    data_extent: TimeRange,
) -> DrawBounds {
    let width = rect.width() as f64;
    if width <= 0.0 || !time_range.is_valid() {
        return DrawBounds {
            rect,
            time: time_range,
        };
    }
    let span = time_range.span() as f64;
    let left_rect = insets.left as f64 / width;
    let left_data = time_delta(data_extent.from, time_range.from) / span;
    let left = left_rect.min(left_data).max(0.0);

    let right_rect = insets.right as f64 / width;
    let right_data = time_delta(time_range.to, data_extent.to) / span;
    let right = right_rect.min(right_data).max(0.0);

    let from = offset_time(time_range.from, -(span * left));
    let to = offset_time(time_range.to, span * right);
    DrawBounds {
        rect: rect.expand_x((left * width) as f32, (right * width) as f32),
        time: TimeRange { from, to },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> ScreenRect {
        ScreenRect::new(ScreenPoint::new(40.0, 0.0), ScreenPoint::new(240.0, 100.0))
    }

    #[test]
    fn corners_map_to_rect_corners() {
        let time = TimeRange::new(1_000, 2_000).unwrap();
        let value = ValueRange::new(10.0, 60.0).unwrap();
        let t = compute(time, value, rect()).unwrap();
        let bottom_left = t.apply(1_000, 10.0);
        let top_right = t.apply(2_000, 60.0);
        assert!((bottom_left.x - 40.0).abs() < 1e-4);
        assert!((bottom_left.y - 100.0).abs() < 1e-4);
        assert!((top_right.x - 240.0).abs() < 1e-4);
        assert!(top_right.y.abs() < 1e-4);
    }

    #[test]
    fn large_timestamps_stay_precise() {
        let time = TimeRange::new(1_552_000_000_000, 1_552_086_400_000).unwrap();
        let value = ValueRange::new(0.0, 1.0).unwrap();
        let t = compute(time, value, rect()).unwrap();
        let mid = t.apply(1_552_043_200_000, 0.5);
        assert!((mid.x - 140.0).abs() < 1e-3);
        assert!((mid.y - 50.0).abs() < 1e-3);
    }

    #[test]
    fn degenerate_ranges_are_rejected() {
        let time = TimeRange { from: 5, to: 5 };
        let value = ValueRange::new(0.0, 1.0).unwrap();
        assert_eq!(
            compute(time, value, rect()),
            Err(ChartError::DegenerateRange {
                axis: RangeAxis::Time
            })
        );
        let time = TimeRange::new(0, 5).unwrap();
        let flat = ValueRange { min: 2.0, max: 2.0 };
        assert_eq!(
            compute(time, flat, rect()),
            Err(ChartError::DegenerateRange {
                axis: RangeAxis::Value
            })
        );
    }

    #[test]
    fn invert_roundtrip() {
        let time = TimeRange::new(0, 100).unwrap();
        let value = ValueRange::new(0.0, 10.0).unwrap();
        let t = compute(time, value, rect()).unwrap();
        let inverse = t.invert().unwrap();
        let (x, y) = t.apply_f64(25.0, 7.5);
        let (time, value) = inverse.apply_f64(x, y);
        assert!((time - 25.0).abs() < 1e-9);
        assert!((value - 7.5).abs() < 1e-9);
    }

    #[test]
    fn expansion_is_limited_by_available_data() {
        let insets = Insets::new(0.0, 40.0, 0.0, 20.0);
        let visible = TimeRange::new(100, 200).unwrap();
        // 5% of data left of the window, nothing to the right.
        let data = TimeRange::new(95, 200).unwrap();
        let bounds = expand_draw_bounds(rect(), insets, visible, data);
        assert_eq!(bounds.time.from, 95);
        assert_eq!(bounds.time.to, 200);
        assert!((bounds.rect.min.x - 30.0).abs() < 1e-4);
        assert_eq!(bounds.rect.max.x, 240.0);
    }

    #[test]
    fn expansion_is_limited_by_insets() {
        let insets = Insets::new(0.0, 40.0, 0.0, 20.0);
        let visible = TimeRange::new(100, 200).unwrap();
        let data = TimeRange::new(0, 1_000).unwrap();
        let bounds = expand_draw_bounds(rect(), insets, visible, data);
        // 40px of 200px is 20% of the span, 20px is 10%.
        assert_eq!(bounds.time.from, 80);
        assert_eq!(bounds.time.to, 210);
        assert!(bounds.rect.min.x.abs() < 1e-4);
        assert!((bounds.rect.max.x - 260.0).abs() < 1e-4);
    }

    #[test]
    fn expansion_saturates_at_the_time_domain_edges() {
        let insets = Insets::new(0.0, 40.0, 0.0, 20.0);
        let visible = TimeRange::new(i64::MIN + 10, i64::MAX - 10).unwrap();
        let data = TimeRange::new(i64::MIN, i64::MAX).unwrap();
        let bounds = expand_draw_bounds(rect(), insets, visible, data);
        assert_eq!(bounds.time.from, i64::MIN);
        assert_eq!(bounds.time.to, i64::MAX);
        assert!(compute(bounds.time, ValueRange::new(0.0, 1.0).unwrap(), bounds.rect).is_ok());
    }
}
