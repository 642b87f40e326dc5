//! Axis marks: value-axis grid levels and time-axis date labels, their fade
//! state and label formatting.

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};

use crate::animation::{Easing, RangeAnimator};
use crate::autoscale::nice_step;
use crate::error::ChartResult;
use crate::view::TimeRange;

/// Formatter for grid level labels.
#[derive(Clone, Default)]
pub enum ValueFormatter {
    /// Compact numeric formatter (`950`, `1.2K`, `3.4M`, `5B`).
    #[default]
    Default,
    /// Custom formatter callback.
    Custom(Arc<dyn Fn(f64) -> String + Send + Sync>),
}

impl ValueFormatter {
    /// Format a value for display.
    pub fn format(&self, value: f64) -> String {
        match self {
            Self::Default => format_compact(value),
            Self::Custom(formatter) => formatter(value),
        }
    }
}

impl std::fmt::Debug for ValueFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "ValueFormatter::Default"),
            Self::Custom(_) => write!(f, "ValueFormatter::Custom(..)"),
        }
    }
}

fn format_compact(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e9 {
        format!("{}B", trim_decimals(value / 1e9, 1))
    } else if abs >= 1e6 {
        format!("{}M", trim_decimals(value / 1e6, 1))
    } else if abs >= 1e3 {
        format!("{}K", trim_decimals(value / 1e3, 1))
    } else {
        trim_decimals(value, 2)
    }
}

fn trim_decimals(value: f64, decimals: usize) -> String {
    let text = format!("{value:.decimals$}");
    if !text.contains('.') {
        return text;
    }
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// Value types a fading level set can hold.
trait LevelValue: Copy {
    fn same_level(self, other: Self) -> bool;
    fn level_cmp(&self, other: &Self) -> Ordering;
}

impl LevelValue for f64 {
    fn same_level(self, other: Self) -> bool {
        approx_eq(self, other)
    }

    fn level_cmp(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl LevelValue for i64 {
    fn same_level(self, other: Self) -> bool {
        self == other
    }

    fn level_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

/// One axis mark with its fade state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadingLevel<V> {
    /// Value the mark sits at.
    pub value: V,
    /// Current opacity in `0..=1`.
    pub opacity: f64,
    from_opacity: f64,
    target_opacity: f64,
}

impl<V> FadingLevel<V> {
    fn appearing(value: V) -> Self {
        Self {
            value,
            opacity: 0.0,
            from_opacity: 0.0,
            target_opacity: 1.0,
        }
    }

    /// Whether the mark is fading out.
    pub fn is_leaving(&self) -> bool {
        self.target_opacity == 0.0
    }
}

/// One horizontal grid line on the value axis.
pub type GridLevel = FadingLevel<f64>;

/// One date label on the time axis, keyed by timestamp.
pub type TimeLabel = FadingLevel<i64>;

#[derive(Debug, Clone)]
struct LevelSet<V> {
    levels: Vec<FadingLevel<V>>,
    fade: RangeAnimator<f64>,
}

impl<V> Default for LevelSet<V> {
    fn default() -> Self {
        Self {
            levels: Vec::new(),
            fade: RangeAnimator::new(),
        }
    }
}

impl<V: LevelValue> LevelSet<V> {
    fn target_values(&self) -> Vec<V> {
        self.levels
            .iter()
            .filter(|level| !level.is_leaving())
            .map(|level| level.value)
            .collect()
    }

    fn clear(&mut self) {
        self.levels.clear();
        self.fade.cancel();
    }

    fn retarget(&mut self, values: &[V], duration: Option<Duration>, easing: Easing) -> ChartResult<()> {
        let current = self.target_values();
        if same_values(&current, values) && !self.levels.iter().any(FadingLevel::is_leaving) {
            return Ok(());
        }

        for level in &mut self.levels {
            level.from_opacity = level.opacity;
            level.target_opacity = if values.iter().any(|v| v.same_level(level.value)) {
                1.0
            } else {
                0.0
            };
        }
        for value in values {
            if !self.levels.iter().any(|level| level.value.same_level(*value)) {
                self.levels.push(FadingLevel::appearing(*value));
            }
        }
        self.levels.sort_by(|a, b| a.value.level_cmp(&b.value));

        match duration {
            Some(duration) => self.fade.start(0.0, 1.0, duration, easing)?,
            None => {
                self.fade.cancel();
                self.apply(1.0);
                self.finish();
            }
        }
        Ok(())
    }

    fn tick(&mut self, now: Duration) -> bool {
        let Some(frame) = self.fade.tick(now) else {
            return false;
        };
        self.apply(frame.value);
        if frame.is_finished() {
            self.finish();
        }
        true
    }

    fn apply(&mut self, t: f64) {
        for level in &mut self.levels {
            level.opacity = level.from_opacity + (level.target_opacity - level.from_opacity) * t;
        }
    }

    fn finish(&mut self) {
        self.levels.retain(|level| !level.is_leaving());
        for level in &mut self.levels {
            level.opacity = 1.0;
            level.from_opacity = 1.0;
        }
    }
}

/// The active grid levels, fading in and out as the scale changes.
#[derive(Debug, Clone, Default)]
pub struct GridLevels {
    set: LevelSet<f64>,
    formatter: ValueFormatter,
}

impl GridLevels {
    /// Create an empty set with the given label formatter.
    pub fn new(formatter: ValueFormatter) -> Self {
        Self {
            set: LevelSet::default(),
            formatter,
        }
    }

    /// Access the levels, sorted by value.
    pub fn levels(&self) -> &[GridLevel] {
        &self.set.levels
    }

    /// Access the label formatter.
    pub fn formatter(&self) -> &ValueFormatter {
        &self.formatter
    }

    /// Replace the label formatter.
    pub fn set_formatter(&mut self, formatter: ValueFormatter) {
        self.formatter = formatter;
    }

    /// Whether a fade is in flight.
    pub fn is_animating(&self) -> bool {
        self.set.fade.is_running()
    }

    /// Whether no levels are present.
    pub fn is_empty(&self) -> bool {
        self.set.levels.is_empty()
    }

    /// Values of levels that are staying or appearing.
    pub fn target_values(&self) -> Vec<f64> {
        self.set.target_values()
    }

    /// Drop all levels immediately.
    pub fn clear(&mut self) {
        self.set.clear();
    }

    /// Move to a new set of level values.
    ///
    /// New values fade in from 0, missing values fade out and are dropped
    /// once the fade finishes. `None` applies the change immediately.
    pub fn retarget(
        &mut self,
        values: &[f64],
        duration: Option<Duration>,
        easing: Easing,
    ) -> ChartResult<()> {
        self.set.retarget(values, duration, easing)
    }

    /// Advance the fade. Returns true when opacities changed.
    pub fn tick(&mut self, now: Duration) -> bool {
        self.set.tick(now)
    }
}

/// Formatter for time-axis labels.
#[derive(Clone, Default)]
pub enum TimeFormatter {
    /// UTC date or clock time, precise enough for the label step.
    #[default]
    Default,
    /// Custom formatter callback taking epoch milliseconds.
    Custom(Arc<dyn Fn(i64) -> String + Send + Sync>),
}

impl TimeFormatter {
    /// Format a timestamp placed on a grid of `step` milliseconds.
    pub fn format(&self, time: i64, step: u64) -> String {
        match self {
            Self::Default => format_time(time, step),
            Self::Custom(formatter) => formatter(time),
        }
    }
}

impl std::fmt::Debug for TimeFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "TimeFormatter::Default"),
            Self::Custom(_) => write!(f, "TimeFormatter::Custom(..)"),
        }
    }
}

fn format_time(time: i64, step: u64) -> String {
    let Some(date) = Utc.timestamp_millis_opt(time).single() else {
        return time.to_string();
    };
    let pattern = if step >= YEAR {
        "%Y"
    } else if step >= DAY {
        "%b %-d"
    } else if step >= MINUTE {
        "%H:%M"
    } else if step >= SECOND {
        "%H:%M:%S"
    } else {
        "%H:%M:%S%.3f"
    };
    date.format(pattern).to_string()
}

const SECOND: u64 = 1_000;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const YEAR: u64 = 365 * DAY;

const TIME_STEPS: [u64; 26] = [
    SECOND,
    2 * SECOND,
    5 * SECOND,
    10 * SECOND,
    15 * SECOND,
    30 * SECOND,
    MINUTE,
    2 * MINUTE,
    5 * MINUTE,
    10 * MINUTE,
    15 * MINUTE,
    30 * MINUTE,
    HOUR,
    2 * HOUR,
    3 * HOUR,
    6 * HOUR,
    12 * HOUR,
    DAY,
    2 * DAY,
    7 * DAY,
    14 * DAY,
    30 * DAY,
    60 * DAY,
    90 * DAY,
    180 * DAY,
    YEAR,
];

/// Label count used before the chart has a width.
const DEFAULT_TIME_INTERVALS: f64 = 4.0;
const MAX_TIME_LABELS: usize = 64;

/// Smallest calendar-friendly step in milliseconds not below `raw`.
///
/// Sub-second steps use the value-axis ladder, steps up to a year snap to
/// clock and calendar units, longer steps are nice multiples of a year.
pub fn nice_time_step(raw: f64) -> u64 {
    if !raw.is_finite() || raw <= 1.0 {
        return 1;
    }
    if raw < SECOND as f64 {
        return (nice_step(raw).ceil() as u64).max(1);
    }
    TIME_STEPS
        .iter()
        .copied()
        .find(|step| *step as f64 >= raw)
        .unwrap_or_else(|| (nice_step(raw / YEAR as f64) * YEAR as f64) as u64)
}

/// Label step and timestamps for a time window `width_px` wide.
///
/// Labels sit on multiples of the step, roughly `spacing_px` apart.
pub fn time_label_values(range: TimeRange, width_px: f32, spacing_px: f32) -> (u64, Vec<i64>) {
    let intervals = if width_px > 0.0 && spacing_px > 0.0 {
        (width_px / spacing_px).floor().max(1.0) as f64
    } else {
        DEFAULT_TIME_INTERVALS
    };
    let step = nice_time_step(range.span() as f64 / intervals);
    let stride = i128::from(step);
    let from = i128::from(range.from);
    let to = i128::from(range.to);
    let mut value = from.div_euclid(stride) * stride;
    if value < from {
        value += stride;
    }
    let mut values = Vec::new();
    while value <= to && values.len() < MAX_TIME_LABELS {
        values.push(value as i64);
        value += stride;
    }
    (step, values)
}

/// The active time-axis labels, fading in and out as the window moves.
#[derive(Debug, Clone, Default)]
pub struct TimeLabels {
    set: LevelSet<i64>,
    formatter: TimeFormatter,
    step: u64,
}

impl TimeLabels {
    /// Create an empty set with the given formatter.
    pub fn new(formatter: TimeFormatter) -> Self {
        Self {
            set: LevelSet::default(),
            formatter,
            step: 0,
        }
    }

    /// Access the labels, sorted by timestamp.
    pub fn labels(&self) -> &[TimeLabel] {
        &self.set.levels
    }

    /// Label step in milliseconds of the latest retarget.
    pub fn step(&self) -> u64 {
        self.step
    }

    /// Replace the formatter.
    pub fn set_formatter(&mut self, formatter: TimeFormatter) {
        self.formatter = formatter;
    }

    /// Label text for a timestamp at the current step.
    pub fn format(&self, time: i64) -> String {
        self.formatter.format(time, self.step)
    }

    pub fn is_animating(&self) -> bool {
        self.set.fade.is_running()
    }

    pub fn is_empty(&self) -> bool {
        self.set.levels.is_empty()
    }

    /// Timestamps of labels that are staying or appearing.
    pub fn target_values(&self) -> Vec<i64> {
        self.set.target_values()
    }

    pub fn clear(&mut self) {
        self.set.clear();
        self.step = 0;
    }

    /// Move to a new label grid. Fades behave as in [`GridLevels::retarget`].
    pub fn retarget(
        &mut self,
        step: u64,
        values: &[i64],
        duration: Option<Duration>,
        easing: Easing,
    ) -> ChartResult<()> {
        self.step = step;
        self.set.retarget(values, duration, easing)
    }

    /// Advance the fade. Returns true when opacities changed.
    pub fn tick(&mut self, now: Duration) -> bool {
        self.set.tick(now)
    }
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

fn same_values<V: LevelValue>(a: &[V], b: &[V]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_level(*y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn compact_formatting() {
        let formatter = ValueFormatter::default();
        assert_eq!(formatter.format(0.0), "0");
        assert_eq!(formatter.format(12.5), "12.5");
        assert_eq!(formatter.format(950.0), "950");
        assert_eq!(formatter.format(1_200.0), "1.2K");
        assert_eq!(formatter.format(3_000_000.0), "3M");
        assert_eq!(formatter.format(-2_500.0), "-2.5K");
    }

    #[test]
    fn custom_formatter_is_used() {
        let formatter = ValueFormatter::Custom(Arc::new(|v| format!("{v:.0}%")));
        assert_eq!(formatter.format(40.0), "40%");
    }

    #[test]
    fn snap_replaces_levels() {
        let mut grid = GridLevels::default();
        grid.retarget(&[0.0, 20.0, 40.0], None, Easing::Linear).unwrap();
        assert_eq!(grid.levels().len(), 3);
        assert!(grid.levels().iter().all(|level| level.opacity == 1.0));
        assert!(!grid.is_animating());
    }

    #[test]
    fn animated_retarget_fades_levels_in_and_out() {
        let mut grid = GridLevels::default();
        grid.retarget(&[0.0, 20.0, 40.0], None, Easing::Linear).unwrap();
        grid.retarget(&[0.0, 25.0, 50.0], Some(ms(100)), Easing::Linear)
            .unwrap();
        assert_eq!(grid.levels().len(), 5);

        assert!(grid.tick(ms(0)));
        assert!(grid.tick(ms(50)));
        let by_value = |value: f64| {
            grid.levels()
                .iter()
                .find(|level| level.value == value)
                .copied()
                .unwrap()
        };
        assert_eq!(by_value(0.0).opacity, 1.0);
        assert!((by_value(20.0).opacity - 0.5).abs() < 1e-9);
        assert!((by_value(25.0).opacity - 0.5).abs() < 1e-9);

        assert!(grid.tick(ms(100)));
        let values: Vec<f64> = grid.levels().iter().map(|level| level.value).collect();
        assert_eq!(values, [0.0, 25.0, 50.0]);
        assert!(grid.levels().iter().all(|level| level.opacity == 1.0));
        assert!(!grid.tick(ms(200)));
    }

    #[test]
    fn leaving_level_that_returns_fades_back_from_current_opacity() {
        let mut grid = GridLevels::default();
        grid.retarget(&[10.0], None, Easing::Linear).unwrap();
        grid.retarget(&[20.0], Some(ms(100)), Easing::Linear).unwrap();
        grid.tick(ms(0));
        grid.tick(ms(50));
        grid.retarget(&[10.0], Some(ms(100)), Easing::Linear).unwrap();
        let level = grid.levels()[0];
        assert_eq!(level.value, 10.0);
        assert!((level.opacity - 0.5).abs() < 1e-9);
        assert!(!level.is_leaving());
        grid.tick(ms(50));
        grid.tick(ms(150));
        assert_eq!(grid.levels().len(), 1);
        assert_eq!(grid.levels()[0].value, 10.0);
    }

    #[test]
    fn time_steps_snap_to_clock_units() {
        assert_eq!(nice_time_step(0.0), 1);
        assert_eq!(nice_time_step(230.0), 250);
        assert_eq!(nice_time_step(500.0), 500);
        assert_eq!(nice_time_step(1_200.0), 2_000);
        assert_eq!(nice_time_step(40_000.0), MINUTE);
        assert_eq!(nice_time_step(4.0 * HOUR as f64), 6 * HOUR);
        assert_eq!(nice_time_step(3.0 * DAY as f64), 7 * DAY);
        assert_eq!(nice_time_step(3.0 * YEAR as f64), 5 * YEAR);
    }

    #[test]
    fn time_labels_sit_on_step_multiples_inside_the_window() {
        let range = TimeRange::new(130, 1_070).unwrap();
        let (step, values) = time_label_values(range, 200.0, 80.0);
        assert_eq!(step, 500);
        assert_eq!(values, [500, 1_000]);

        let range = TimeRange::new(-1_500, 1_500).unwrap();
        let (step, values) = time_label_values(range, 0.0, 80.0);
        assert_eq!(step, 1_000);
        assert_eq!(values, [-1_000, 0, 1_000]);
    }

    #[test]
    fn time_labels_cover_the_full_time_domain() {
        let range = TimeRange::new(i64::MIN, i64::MAX).unwrap();
        let (step, values) = time_label_values(range, 200.0, 80.0);
        assert!(step > YEAR);
        assert!(!values.is_empty());
        assert!(values.len() <= MAX_TIME_LABELS);
    }

    #[test]
    fn default_time_format_follows_step() {
        let formatter = TimeFormatter::default();
        assert_eq!(formatter.format(500, 500), "00:00:00.500");
        assert_eq!(formatter.format(90 * SECOND as i64, 10 * SECOND), "00:01:30");
        assert_eq!(formatter.format(2 * HOUR as i64, HOUR), "02:00");
        assert_eq!(formatter.format(DAY as i64, DAY), "Jan 2");
        assert_eq!(formatter.format(0, 5 * YEAR), "1970");
        assert_eq!(formatter.format(i64::MIN, DAY), i64::MIN.to_string());
        let custom = TimeFormatter::Custom(Arc::new(|t| format!("t{t}")));
        assert_eq!(custom.format(7, DAY), "t7");
    }

    #[test]
    fn time_labels_fade_like_grid_levels() {
        let mut labels = TimeLabels::default();
        labels.retarget(500, &[0, 500, 1_000], None, Easing::Linear).unwrap();
        labels
            .retarget(200, &[0, 200, 400], Some(ms(200)), Easing::Linear)
            .unwrap();
        assert_eq!(labels.step(), 200);
        assert_eq!(labels.format(200), "00:00:00.200");
        let opacity = |labels: &TimeLabels, time: i64| {
            labels
                .labels()
                .iter()
                .find(|label| label.value == time)
                .map(|label| label.opacity)
        };
        assert_eq!(opacity(&labels, 200), Some(0.0));
        assert!(labels.tick(ms(0)));
        assert!(labels.tick(ms(100)));
        assert_eq!(opacity(&labels, 0), Some(1.0));
        assert!((opacity(&labels, 400).unwrap() - 0.5).abs() < 1e-9);
        assert!((opacity(&labels, 1_000).unwrap() - 0.5).abs() < 1e-9);
        assert!(labels.tick(ms(200)));
        assert_eq!(labels.target_values(), [0, 200, 400]);
        assert_eq!(labels.labels().len(), 3);
        assert!(!labels.is_animating());
    }

    #[test]
    fn identical_retarget_is_a_no_op() {
        let mut grid = GridLevels::default();
        grid.retarget(&[0.0, 10.0], None, Easing::Linear).unwrap();
        grid.retarget(&[0.0, 10.0], Some(ms(100)), Easing::Linear)
            .unwrap();
        assert!(!grid.is_animating());
    }
}
