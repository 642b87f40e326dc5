//! Series data and series groups.

use crate::error::{ChartError, ChartResult};
use crate::render::Color;
use crate::view::{TimeRange, ValueRange};

/// A single `(time, value)` sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Timestamp.
    pub time: i64,
    /// Value at the timestamp.
    pub value: f64,
}

impl Sample {
    /// Create a new sample.
    pub const fn new(time: i64, value: f64) -> Self {
        Self { time, value }
    }
}

/// How series inside a group are combined.
///
/// `Stacked` and `Percentage` are accepted for data compatibility but are
/// currently drawn exactly like `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Grouping {
    /// Series are overlaid independently.
    #[default]
    None,
    /// Series values stack on top of each other.
    Stacked,
    /// Series values are shown as shares of the per-timestamp total.
    Percentage,
}

/// One named line of samples sorted by time.
#[derive(Debug, Clone)]
pub struct Series {
    name: String,
    color: Color,
    samples: Vec<Sample>,
}

impl Series {
    /// Create a series, validating that samples are non-empty, finite and
    /// sorted ascending by time.
    pub fn new(name: impl Into<String>, color: Color, samples: Vec<Sample>) -> ChartResult<Self> {
        let name = name.into();
        if samples.is_empty() {
            return Err(ChartError::InvalidData(format!("series `{name}` has no samples")));
        }
        if let Some(sample) = samples.iter().find(|sample| !sample.value.is_finite()) {
            return Err(ChartError::InvalidData(format!(
                "series `{name}` has a non-finite value at {}",
                sample.time
            )));
        }
        if samples.windows(2).any(|pair| pair[1].time < pair[0].time) {
            return Err(ChartError::InvalidData(format!(
                "series `{name}` is not sorted by time"
            )));
        }
        Ok(Self {
            name,
            color,
            samples,
        })
    }

    /// Build a series from `(time, value)` pairs.
    pub fn from_pairs<I>(name: impl Into<String>, color: Color, iter: I) -> ChartResult<Self>
    where
        I: IntoIterator<Item = (i64, f64)>,
    {
        let samples = iter
            .into_iter()
            .map(|(time, value)| Sample::new(time, value))
            .collect();
        Self::new(name, color, samples)
    }

    /// Access the series name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Access the display color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Access all samples.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Timestamp of the first sample.
    pub fn first_time(&self) -> i64 {
        self.samples[0].time
    }

    /// Timestamp of the last sample.
    pub fn last_time(&self) -> i64 {
        self.samples[self.samples.len() - 1].time
    }

    /// Index range of samples with `from <= time <= to`.
    pub fn range_by_time(&self, range: TimeRange) -> std::ops::Range<usize> {
        let start = lower_bound(&self.samples, range.from);
        let end = upper_bound(&self.samples, range.to);
        start..end.max(start)
    }

    /// Samples inside the range plus the nearest neighbour beyond each edge,
    /// so that segments crossing the edges are kept.
    pub fn window(&self, range: TimeRange) -> &[Sample] {
        let inner = self.range_by_time(range);
        let start = inner.start.saturating_sub(1);
        let end = (inner.end + 1).min(self.samples.len());
        &self.samples[start..end]
    }

    /// Find the index of the sample with the nearest timestamp.
    ///
    /// Ties resolve to the earlier sample.
    pub fn nearest_index(&self, time: i64) -> usize {
        let lower = lower_bound(&self.samples, time);
        if lower == 0 {
            return 0;
        }
        if lower >= self.samples.len() {
            return self.samples.len() - 1;
        }
        let left = lower - 1;
        let left_dist = time.abs_diff(self.samples[left].time);
        let right_dist = self.samples[lower].time.abs_diff(time);
        if left_dist <= right_dist { left } else { lower }
    }

    /// Value bounds of the samples in a time window, edge neighbours included.
    pub fn value_bounds(&self, range: TimeRange) -> Option<ValueRange> {
        let window = self.window(range);
        let first = window.first()?;
        let mut bounds = ValueRange {
            min: first.value,
            max: first.value,
        };
        for sample in &window[1..] {
            bounds.expand_to_include(sample.value);
        }
        Some(bounds)
    }
}

/// The set of series loaded together on one time axis.
#[derive(Debug, Clone)]
pub struct SeriesGroup {
    series: Vec<Series>,
    grouping: Grouping,
    min_time: i64,
    max_time: i64,
}

impl SeriesGroup {
    /// Create a group from at least one series.
    pub fn new(series: Vec<Series>) -> ChartResult<Self> {
        let Some(first) = series.first() else {
            return Err(ChartError::InvalidData("series group is empty".into()));
        };
        let mut min_time = first.first_time();
        let mut max_time = first.last_time();
        for item in &series[1..] {
            min_time = min_time.min(item.first_time());
            max_time = max_time.max(item.last_time());
        }
        Ok(Self {
            series,
            grouping: Grouping::None,
            min_time,
            max_time,
        })
    }

    /// Set the grouping mode.
    pub fn with_grouping(mut self, grouping: Grouping) -> Self {
        self.grouping = grouping;
        self
    }

    /// Access the grouping mode.
    pub fn grouping(&self) -> Grouping {
        self.grouping
    }

    /// Access all series.
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Number of series.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Always false; groups hold at least one series.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Earliest timestamp across all series.
    pub fn min_time(&self) -> i64 {
        self.min_time
    }

    /// Latest timestamp across all series.
    pub fn max_time(&self) -> i64 {
        self.max_time
    }

    /// Full time extent, if it spans more than one timestamp.
    pub fn time_extent(&self) -> Option<TimeRange> {
        TimeRange::new(self.min_time, self.max_time).ok()
    }
}

fn lower_bound(samples: &[Sample], target: i64) -> usize {
    samples.partition_point(|sample| sample.time < target)
}

fn upper_bound(samples: &[Sample], target: i64) -> usize {
    samples.partition_point(|sample| sample.time <= target)
}
