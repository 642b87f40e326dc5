//! Automatic value-range and grid-level computation.

use crate::series::SeriesGroup;
use crate::view::{TimeRange, ValueRange};

const NICE_STEPS: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];
const FALLBACK_GRID_INTERVALS: usize = 5;
const FLAT_RANGE_SPAN: f64 = 1.0;

/// How the visible value range should move towards a new target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleChange {
    /// The range already is, or is heading to, the target.
    Keep,
    /// Assign the target immediately.
    Snap(ValueRange),
    /// Animate from the current range to the target.
    Animate(ValueRange),
}

/// Computes target value ranges and grid levels for the visible data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoscaleEngine {
    /// Keep zero inside the range for non-negative data.
    pub show_zero: bool,
    /// Preferred distance between grid levels in pixels.
    pub grid_spacing_px: f32,
}

impl Default for AutoscaleEngine {
    fn default() -> Self {
        Self {
            show_zero: true,
            grid_spacing_px: 50.0,
        }
    }
}

impl AutoscaleEngine {
    /// Create an engine with the given policy.
    pub fn new(show_zero: bool, grid_spacing_px: f32) -> Self {
        Self {
            show_zero,
            grid_spacing_px,
        }
    }

    /// Range fitting every visible sample inside the time window.
    ///
    /// `visible` is indexed like the group's series; missing entries count as
    /// hidden. Returns `None` when no visible series has samples near the
    /// window.
    pub fn target_range(
        &self,
        group: &SeriesGroup,
        visible: &[bool],
        time_range: TimeRange,
    ) -> Option<ValueRange> {
        let mut bounds: Option<ValueRange> = None;
        for (series, _) in group
            .series()
            .iter()
            .zip(visible)
            .filter(|(_, visible)| **visible)
        {
            let Some(series_bounds) = series.value_bounds(time_range) else {
                continue;
            };
            bounds = Some(match bounds {
                None => series_bounds,
                Some(mut existing) => {
                    existing.expand_to_include(series_bounds.min);
                    existing.expand_to_include(series_bounds.max);
                    existing
                }
            });
        }
        let mut bounds = bounds?;
        if self.show_zero {
            bounds.expand_to_include(0.0);
        }
        Some(bounds.with_min_span(FLAT_RANGE_SPAN))
    }

    /// Decide how to reach `target` given the current and in-flight ranges.
    pub fn plan(
        &self,
        current: ValueRange,
        in_flight: Option<ValueRange>,
        target: ValueRange,
        snap: bool,
    ) -> ScaleChange {
        match in_flight {
            Some(heading) if heading.approx_eq(&target) => return ScaleChange::Keep,
            None if current.approx_eq(&target) => return ScaleChange::Keep,
            _ => {}
        }
        if snap {
            ScaleChange::Snap(target)
        } else {
            ScaleChange::Animate(target)
        }
    }

    /// Evenly spaced grid values covering the range.
    ///
    /// The number of intervals adapts to the available height.
    pub fn grid_values(&self, range: ValueRange, height_px: f32) -> Vec<f64> {
        if !range.is_valid() {
            return Vec::new();
        }
        let intervals = if height_px > 0.0 && self.grid_spacing_px > 0.0 {
            ((height_px / self.grid_spacing_px).floor() as usize).max(2)
        } else {
            FALLBACK_GRID_INTERVALS
        };
        let step = nice_step(range.span() / intervals as f64);
        let first = (range.min / step).ceil() as i64;
        let last = (range.max / step + 1e-9).floor() as i64;
        (first..=last).map(|k| k as f64 * step).collect()
    }
}

/// Smallest "nice" step (1, 2, 2.5 or 5 times a power of ten) not below `raw`.
pub fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let magnitude = 10_f64.powf(raw.log10().floor());
    let fraction = raw / magnitude;
    let nice = NICE_STEPS
        .iter()
        .copied()
        .find(|step| *step >= fraction - 1e-9)
        .unwrap_or(10.0);
    nice * magnitude
}
