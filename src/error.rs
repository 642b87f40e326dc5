//! Error types shared by the chart engine.

use std::time::Duration;

use thiserror::Error;

/// Axis on which a range became degenerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeAxis {
    /// Horizontal time axis.
    Time,
    /// Vertical value axis.
    Value,
    /// The target rectangle has no positive area.
    Rect,
}

impl std::fmt::Display for RangeAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Time => write!(f, "time"),
            Self::Value => write!(f, "value"),
            Self::Rect => write!(f, "rect"),
        }
    }
}

/// Errors reported by chart operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    /// A range or rectangle with zero span was used where a mapping is needed.
    #[error("degenerate {axis} range")]
    DegenerateRange {
        /// Axis that collapsed.
        axis: RangeAxis,
    },
    /// An animation was requested with a non-positive duration.
    ///
    /// Use the immediate assignment path instead.
    #[error("invalid animation duration: {duration:?}")]
    InvalidAnimation {
        /// Requested duration.
        duration: Duration,
    },
    /// Series data violates an input invariant.
    #[error("invalid series data: {0}")]
    InvalidData(String),
    /// A series index does not exist in the bound group.
    #[error("series index {index} out of range (len {len})")]
    SeriesIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of series in the group.
        len: usize,
    },
}

/// Result alias for chart operations.
pub type ChartResult<T> = Result<T, ChartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_axis() {
        let err = ChartError::DegenerateRange {
            axis: RangeAxis::Value,
        };
        assert_eq!(err.to_string(), "degenerate value range");
    }
}
