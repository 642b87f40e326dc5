//! Visible time and value windows.

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult, RangeAxis};

/// Visible time window with `from < to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    /// Start timestamp.
    pub from: i64,
    /// End timestamp.
    pub to: i64,
}

impl TimeRange {
    /// Create a time range, rejecting empty or reversed spans.
    pub fn new(from: i64, to: i64) -> ChartResult<Self> {
        if from >= to {
            return Err(ChartError::DegenerateRange {
                axis: RangeAxis::Time,
            });
        }
        Ok(Self { from, to })
    }

    /// Span of the range in timestamp units.
    ///
    /// Unsigned so that ranges covering the whole `i64` domain still fit.
    pub fn span(&self) -> u64 {
        self.to.abs_diff(self.from)
    }

    /// Check whether the range has a positive span.
    pub fn is_valid(&self) -> bool {
        self.to > self.from
    }

    /// Check whether a timestamp lies within the range (inclusive).
    pub fn contains(&self, time: i64) -> bool {
        time >= self.from && time <= self.to
    }

    /// Normalized position of a timestamp, 0 at `from` and 1 at `to`.
    pub fn fraction_of(&self, time: i64) -> f64 {
        (i128::from(time) - i128::from(self.from)) as f64 / self.span() as f64
    }

    /// Timestamp at a normalized position, saturating at the `i64` bounds.
    pub fn time_at(&self, fraction: f64) -> i64 {
        offset_time(self.from, self.span() as f64 * fraction)
    }
}

/// Shift a timestamp by a real-valued offset, rounding and saturating at the
/// `i64` bounds.
pub(crate) fn offset_time(base: i64, offset: f64) -> i64 {
    let shifted = i128::from(base) + offset.round() as i128;
    shifted.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

/// Signed distance `to - from` as a float.
pub(crate) fn time_delta(from: i64, to: i64) -> f64 {
    (i128::from(to) - i128::from(from)) as f64
}

/// Visible value window with `min < max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
}

impl ValueRange {
    /// Create a value range, rejecting empty, reversed or non-finite spans.
    pub fn new(min: f64, max: f64) -> ChartResult<Self> {
        let range = Self { min, max };
        if !range.is_valid() {
            return Err(ChartError::DegenerateRange {
                axis: RangeAxis::Value,
            });
        }
        Ok(range)
    }

    /// Span of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Check whether both bounds are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Check whether the range has positive span and finite bounds.
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.span() > 0.0
    }

    /// Expand the range to include a value.
    pub fn expand_to_include(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    /// Ensure the range has at least the given span.
    pub fn with_min_span(&self, min_span: f64) -> Self {
        if self.span() >= min_span {
            return *self;
        }
        if self.min == 0.0 && self.max == 0.0 {
            return Self {
                min: 0.0,
                max: min_span,
            };
        }
        Self {
            min: self.min,
            max: self.min + min_span,
        }
    }

    /// Check whether two ranges match within a relative tolerance.
    pub fn approx_eq(&self, other: &Self) -> bool {
        let tolerance = self.span().abs().max(other.span().abs()) * 1e-9;
        (self.min - other.min).abs() <= tolerance && (self.max - other.max).abs() <= tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_range_rejects_empty_span() {
        assert!(TimeRange::new(5, 5).is_err());
        assert!(TimeRange::new(6, 5).is_err());
        assert_eq!(TimeRange::new(0, 10).unwrap().span(), 10);
    }

    #[test]
    fn time_range_fraction_roundtrip() {
        let range = TimeRange::new(1_000, 2_000).unwrap();
        assert_eq!(range.fraction_of(1_250), 0.25);
        assert_eq!(range.time_at(0.25), 1_250);
    }

    #[test]
    fn full_domain_range_maps_without_overflow() {
        let range = TimeRange::new(i64::MIN, i64::MAX).unwrap();
        assert_eq!(range.span(), u64::MAX);
        assert_eq!(range.fraction_of(i64::MIN), 0.0);
        assert_eq!(range.fraction_of(i64::MAX), 1.0);
        assert_eq!(range.time_at(0.0), i64::MIN);
        assert_eq!(range.time_at(2.0), i64::MAX);
        assert_eq!(offset_time(i64::MAX, 10.0), i64::MAX);
        assert_eq!(time_delta(i64::MIN, i64::MAX), u64::MAX as f64);
    }

    #[test]
    fn value_range_rejects_degenerate_and_nan() {
        assert!(ValueRange::new(1.0, 1.0).is_err());
        assert!(ValueRange::new(0.0, f64::NAN).is_err());
        assert!(ValueRange::new(0.0, 1.0).is_ok());
    }

    #[test]
    fn value_range_with_min_span_expands_upward() {
        let range = ValueRange { min: 2.0, max: 2.0 };
        let expanded = range.with_min_span(1.0);
        assert_eq!(expanded.min, 2.0);
        assert_eq!(expanded.max, 3.0);
        let zero = ValueRange { min: 0.0, max: 0.0 }.with_min_span(1.0);
        assert_eq!((zero.min, zero.max), (0.0, 1.0));
    }
}
