//! Chart renderer entry points and builders.
//!
//! [`ChartRenderer`] owns the loaded series, the visible ranges, per-series
//! opacity and every in-flight animation. Hosts forward layout, input and
//! frame-clock events to it and replay the [`RenderList`] it produces.

use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::animation::{Easing, RangeAnimator};
use crate::autoscale::{AutoscaleEngine, ScaleChange};
use crate::axis::{
    GridLevel, GridLevels, TimeFormatter, TimeLabel, TimeLabels, ValueFormatter, time_label_values,
};
use crate::config::ChartConfig;
use crate::error::{ChartError, ChartResult, RangeAxis};
use crate::geom::{Insets, ScreenPoint, ScreenRect};
use crate::interaction::{date_for_position, nearest_samples, x_position_for_date};
use crate::render::{LineStyle, MarkerStyle, RenderCommand, RenderList, TextStyle};
use crate::series::{Series, SeriesGroup};
use crate::style::Theme;
use crate::transform::{self, AffineTransform, expand_draw_bounds};
use crate::view::{TimeRange, ValueRange};
use crate::visibility::SeriesVisibilityModel;

const GRID_LINE_WIDTH: f32 = 1.0;
const GRID_LABEL_GAP: f32 = 4.0;
/// Approximate glyph advance as a fraction of the label size.
const LABEL_CHAR_WIDTH: f32 = 0.55;

/// Observable lifecycle phase of a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartPhase {
    /// No data bound.
    Empty,
    /// Data bound, nothing in flight.
    Ready,
    /// At least one range, opacity or grid transition is in flight.
    Animating,
}

#[derive(Debug, Clone)]
struct BoundChart {
    group: SeriesGroup,
    visibility: SeriesVisibilityModel,
    opacity: Vec<f64>,
    fades: Vec<RangeAnimator<f64>>,
    time_range: TimeRange,
    time_animation: RangeAnimator<TimeRange>,
    value_range: ValueRange,
    value_animation: RangeAnimator<ValueRange>,
}

impl BoundChart {
    fn new(group: SeriesGroup) -> Self {
        let count = group.len();
        let time_range = group.time_extent().unwrap_or_else(|| {
            let from = group.min_time().min(i64::MAX - 1);
            TimeRange { from, to: from + 1 }
        });
        Self {
            group,
            visibility: SeriesVisibilityModel::all_visible(count),
            opacity: vec![1.0; count],
            fades: vec![RangeAnimator::new(); count],
            time_range,
            time_animation: RangeAnimator::new(),
            value_range: ValueRange { min: 0.0, max: 1.0 },
            value_animation: RangeAnimator::new(),
        }
    }

    fn is_animating(&self) -> bool {
        self.time_animation.is_running()
            || self.value_animation.is_running()
            || self.fades.iter().any(RangeAnimator::is_running)
    }
}

#[derive(Debug, Clone)]
enum Binding {
    Empty,
    Bound(Box<BoundChart>),
}

/// Stateful chart engine, independent of any view type.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    config: ChartConfig,
    theme: Theme,
    autoscale: AutoscaleEngine,
    grid: GridLevels,
    time_labels: TimeLabels,
    binding: Binding,
    bounds: Option<ScreenRect>,
    selected_time: Option<i64>,
    redraw_generation: u64,
    needs_redraw: bool,
}

impl ChartRenderer {
    /// Create an empty renderer with the given configuration.
    pub fn new(config: ChartConfig) -> Self {
        Self::builder().config(config).build()
    }

    /// Start building a renderer with custom configuration.
    pub fn builder() -> ChartBuilder {
        ChartBuilder::default()
    }

    /// Access the configuration.
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Access the theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Replace the theme.
    pub fn set_theme(&mut self, theme: Theme) {
        if self.theme != theme {
            self.theme = theme;
            self.request_redraw();
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> ChartPhase {
        match &self.binding {
            Binding::Empty => ChartPhase::Empty,
            Binding::Bound(chart)
                if chart.is_animating()
                    || self.grid.is_animating()
                    || self.time_labels.is_animating() =>
            {
                ChartPhase::Animating
            }
            Binding::Bound(_) => ChartPhase::Ready,
        }
    }

    /// Whether any transition is in flight.
    pub fn is_animating(&self) -> bool {
        self.phase() == ChartPhase::Animating
    }

    /// Access the bound series group.
    pub fn group(&self) -> Option<&SeriesGroup> {
        self.bound().map(|chart| &chart.group)
    }

    /// Access one bound series.
    pub fn series(&self, index: usize) -> ChartResult<&Series> {
        let series = self.group().map_or(&[][..], SeriesGroup::series);
        series.get(index).ok_or(ChartError::SeriesIndexOutOfRange {
            index,
            len: series.len(),
        })
    }

    /// Currently displayed time window.
    pub fn time_range(&self) -> Option<TimeRange> {
        self.bound().map(|chart| chart.time_range)
    }

    /// Currently displayed value window.
    pub fn value_range(&self) -> Option<ValueRange> {
        self.bound().map(|chart| chart.value_range)
    }

    /// Value range the chart is heading to: the in-flight target, or the
    /// displayed range when nothing is animating.
    pub fn target_value_range(&self) -> Option<ValueRange> {
        self.bound()
            .map(|chart| chart.value_animation.target().unwrap_or(chart.value_range))
    }

    /// Current opacity of a series.
    pub fn opacity(&self, index: usize) -> Option<f64> {
        self.bound()?.opacity.get(index).copied()
    }

    /// Target visibility of every series.
    pub fn visibility(&self) -> Option<&SeriesVisibilityModel> {
        self.bound().map(|chart| &chart.visibility)
    }

    /// Active grid levels.
    pub fn grid_levels(&self) -> &[GridLevel] {
        self.grid.levels()
    }

    /// Replace the grid label formatter.
    pub fn set_value_formatter(&mut self, formatter: ValueFormatter) {
        self.grid.set_formatter(formatter);
        self.request_redraw();
    }

    /// Active time-axis labels.
    pub fn time_labels(&self) -> &[TimeLabel] {
        self.time_labels.labels()
    }

    /// Replace the time-axis label formatter.
    pub fn set_time_formatter(&mut self, formatter: TimeFormatter) {
        self.time_labels.set_formatter(formatter);
        self.request_redraw();
    }

    /// Selected timestamp, if any.
    pub fn selected_time(&self) -> Option<i64> {
        self.selected_time
    }

    /// Number of redraws requested so far.
    pub fn redraw_generation(&self) -> u64 {
        self.redraw_generation
    }

    /// Whether a redraw was requested since the last render pass.
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Chart rect: host bounds minus the configured insets.
    pub fn chart_rect(&self) -> Option<ScreenRect> {
        let rect = self.bounds?.inset_by(self.config.insets);
        rect.is_valid().then_some(rect)
    }

    /// Bind a new series group, replacing any previous one.
    ///
    /// Shows the full data extent with every series visible and snaps the
    /// value range to fit.
    pub fn set_data(&mut self, group: SeriesGroup) {
        debug!(
            series = group.len(),
            min_time = group.min_time(),
            max_time = group.max_time(),
            "binding series group"
        );
        self.binding = Binding::Bound(Box::new(BoundChart::new(group)));
        self.grid.clear();
        self.time_labels.clear();
        self.autoscale(true);
        self.refresh_time_labels(None);
        self.request_redraw();
    }

    /// Drop the bound data and every in-flight animation.
    pub fn clear(&mut self) {
        if matches!(self.binding, Binding::Empty) {
            return;
        }
        debug!("clearing chart data");
        self.binding = Binding::Empty;
        self.grid.clear();
        self.time_labels.clear();
        self.selected_time = None;
        self.request_redraw();
    }

    /// Update the host bounds and chart margins.
    ///
    /// The chart rect is `bounds` shrunk by `insets`. Grid levels are
    /// re-placed immediately when the chart height changes, time labels when
    /// its width changes.
    pub fn set_layout(&mut self, bounds: ScreenRect, insets: Insets) {
        if self.bounds == Some(bounds) && self.config.insets == insets {
            return;
        }
        let previous = self.chart_rect().map(|rect| (rect.width(), rect.height()));
        self.bounds = Some(bounds);
        self.config.insets = insets;
        let current = self.chart_rect().map(|rect| (rect.width(), rect.height()));
        if current.map(|(_, height)| height) != previous.map(|(_, height)| height) {
            self.refresh_grid(None);
        }
        if current.map(|(width, _)| width) != previous.map(|(width, _)| width) {
            self.refresh_time_labels(None);
        }
        self.request_redraw();
    }

    /// Change one series' visibility, fading it in or out.
    ///
    /// Returns false, leaving state unchanged, when the request would hide
    /// every series, the index is unknown or no data is bound.
    pub fn set_visible(&mut self, index: usize, visible: bool) -> bool {
        let fade = self.config.fade_animation;
        let easing = self.config.easing;
        let Some(chart) = self.bound_mut() else {
            warn!(index, "visibility change without data");
            return false;
        };
        let before = chart.visibility.is_visible(index);
        if !chart.visibility.set_visible(index, visible) {
            debug!(index, visible, "visibility change refused");
            return false;
        }
        if before != visible {
            fade_series(chart, index, visible, fade, easing);
            self.autoscale(false);
            self.request_redraw();
        }
        true
    }

    /// Make exactly one series visible.
    ///
    /// Returns false when the index is unknown or no data is bound.
    pub fn show_only(&mut self, index: usize) -> bool {
        let fade = self.config.fade_animation;
        let easing = self.config.easing;
        let Some(chart) = self.bound_mut() else {
            warn!(index, "show-only without data");
            return false;
        };
        let before = chart.visibility.flags().to_vec();
        if !chart.visibility.show_only(index) {
            return false;
        }
        let mut changed = false;
        for (i, was_visible) in before.into_iter().enumerate() {
            let visible = i == index;
            if was_visible != visible {
                fade_series(chart, i, visible, fade, easing);
                changed = true;
            }
        }
        if changed {
            self.autoscale(false);
            self.request_redraw();
        }
        true
    }

    /// Set the visible value range.
    ///
    /// `None` assigns immediately; `Some(duration)` animates from the range
    /// currently on screen. A zero duration is rejected.
    pub fn set_value_range(
        &mut self,
        range: ValueRange,
        duration: Option<Duration>,
    ) -> ChartResult<()> {
        if !range.is_valid() {
            return Err(ChartError::DegenerateRange {
                axis: RangeAxis::Value,
            });
        }
        if let Some(duration) = duration
            && duration.is_zero()
        {
            return Err(ChartError::InvalidAnimation { duration });
        }
        let easing = self.config.easing;
        let Some(chart) = self.bound_mut() else {
            debug!("value range change without data ignored");
            return Ok(());
        };
        match duration {
            Some(duration) => {
                if chart
                    .value_animation
                    .target()
                    .is_some_and(|target| target.approx_eq(&range))
                {
                    return Ok(());
                }
                debug!(min = range.min, max = range.max, ?duration, "animating value range");
                chart
                    .value_animation
                    .start(chart.value_range, range, duration, easing)?;
            }
            None => {
                debug!(min = range.min, max = range.max, "snapping value range");
                chart.value_animation.cancel();
                chart.value_range = range;
            }
        }
        self.retarget_grid(range, duration);
        self.request_redraw();
        Ok(())
    }

    /// Set the visible time window, optionally animated.
    ///
    /// The value range is re-fitted once the window settles. Time labels fade
    /// to the new window over the time animation, or over the shorter label
    /// fade when the change is immediate.
    pub fn set_time_range(&mut self, range: TimeRange, animated: bool) -> ChartResult<()> {
        if !range.is_valid() {
            return Err(ChartError::DegenerateRange {
                axis: RangeAxis::Time,
            });
        }
        let duration = self.config.time_animation;
        let easing = self.config.easing;
        let Some(chart) = self.bound_mut() else {
            debug!("time range change without data ignored");
            return Ok(());
        };
        let label_fade = if animated && !duration.is_zero() {
            debug!(from = range.from, to = range.to, "animating time range");
            chart
                .time_animation
                .start(chart.time_range, range, duration, easing)?;
            Some(duration)
        } else {
            chart.time_animation.cancel();
            chart.time_range = range;
            self.autoscale(false);
            let fade = self.config.time_label_fade;
            (!fade.is_zero()).then_some(fade)
        };
        self.refresh_time_labels(label_fade);
        self.request_redraw();
        Ok(())
    }

    /// Select a timestamp for the marker overlay.
    ///
    /// Returns true when the selection changed and a redraw was requested.
    pub fn set_selected_time(&mut self, time: Option<i64>) -> bool {
        if self.selected_time == time {
            return false;
        }
        self.selected_time = time;
        self.request_redraw();
        true
    }

    /// Timestamp under a device position.
    pub fn date_for_position(&self, point: ScreenPoint) -> Option<i64> {
        let chart = self.bound()?;
        date_for_position(point, self.chart_rect()?, chart.time_range)
    }

    /// Device X coordinate of a timestamp.
    pub fn x_position_for_date(&self, time: i64) -> Option<f32> {
        let chart = self.bound()?;
        x_position_for_date(time, self.chart_rect()?, chart.time_range)
    }

    /// Timestamp of the sample nearest to `time` across the visible series.
    pub fn snap_to_sample(&self, time: i64) -> Option<i64> {
        let chart = self.bound()?;
        nearest_samples(&chart.group, &chart.opacity, time)
            .map(|(_, sample)| sample.time)
            .min_by_key(|sample_time| sample_time.abs_diff(time))
    }

    /// Advance every animation to `now`.
    ///
    /// `now` is measured from any fixed epoch chosen by the host. Returns true
    /// when something visible changed.
    pub fn tick(&mut self, now: Duration) -> bool {
        let mut changed = false;
        let mut time_settled = false;
        if let Some(chart) = self.bound_mut() {
            if let Some(frame) = chart.value_animation.tick(now) {
                chart.value_range = frame.value;
                changed = true;
            }
            if let Some(frame) = chart.time_animation.tick(now) {
                chart.time_range = frame.value;
                time_settled = frame.is_finished();
                changed = true;
            }
            for (opacity, fade) in chart.opacity.iter_mut().zip(&mut chart.fades) {
                if let Some(frame) = fade.tick(now) {
                    *opacity = frame.value;
                    changed = true;
                }
            }
        }
        changed |= self.grid.tick(now);
        changed |= self.time_labels.tick(now);
        if time_settled {
            self.autoscale(false);
            self.refresh_time_labels(None);
        }
        if changed {
            trace!(?now, "animation frame");
            self.request_redraw();
        }
        changed
    }

    /// Build the draw commands for the current state.
    ///
    /// Returns an empty list when nothing is bound, the layout is missing or
    /// a range collapsed to zero width.
    pub fn render(&mut self) -> RenderList {
        self.needs_redraw = false;
        if self.config.draw_grid && self.grid.is_empty() {
            self.refresh_grid(None);
        }
        if self.config.draw_grid && self.time_labels.is_empty() {
            self.refresh_time_labels(None);
        }
        let Binding::Bound(chart) = &self.binding else {
            return RenderList::new();
        };
        let Some(rect) = self.chart_rect() else {
            return RenderList::new();
        };

        let (draw_rect, draw_time) = if self.config.draw_outside {
            let extent = TimeRange {
                from: chart.group.min_time(),
                to: chart.group.max_time(),
            };
            let bounds = expand_draw_bounds(rect, self.config.insets, chart.time_range, extent);
            (bounds.rect, bounds.time)
        } else {
            (rect, chart.time_range)
        };

        let transform = match transform::compute(draw_time, chart.value_range, draw_rect) {
            Ok(transform) => transform,
            Err(err) => {
                debug!(%err, "skipping frame");
                return RenderList::new();
            }
        };

        let mut list = RenderList::with_transform(transform);
        if self.config.draw_grid {
            self.push_grid(&mut list, rect, &transform);
            self.push_time_labels(&mut list, rect, &transform);
        }
        if !self.config.draw_outside {
            list.push(RenderCommand::ClipRect(rect));
        }
        if let Some(selected) = self.selected_time {
            self.push_selection_line(&mut list, rect, &transform, selected);
        }
        for (series, opacity) in chart.group.series().iter().zip(&chart.opacity) {
            if *opacity <= 0.0 {
                continue;
            }
            let window = series.window(draw_time);
            if window.is_empty() {
                continue;
            }
            list.push(RenderCommand::Polyline {
                points: window.to_vec(),
                style: LineStyle {
                    color: series.color().faded(*opacity),
                    width: self.config.line_width,
                },
            });
        }
        if let Some(selected) = self.selected_time {
            self.push_markers(&mut list, chart, &transform, selected);
        }
        if !self.config.draw_outside {
            list.push(RenderCommand::ClipEnd);
        }
        list
    }

    fn push_grid(&self, list: &mut RenderList, rect: ScreenRect, transform: &AffineTransform) {
        let formatter = self.grid.formatter();
        for level in self.grid.levels() {
            if level.opacity <= 0.0 {
                continue;
            }
            let (_, y) = transform.apply_f64(0.0, level.value);
            let y = y as f32;
            if y < rect.min.y - GRID_LINE_WIDTH || y > rect.max.y + GRID_LINE_WIDTH {
                continue;
            }
            list.push(RenderCommand::Line {
                from: ScreenPoint::new(rect.min.x, y),
                to: ScreenPoint::new(rect.max.x, y),
                style: LineStyle {
                    color: self.theme.grid.faded(level.opacity),
                    width: GRID_LINE_WIDTH,
                },
            });
            list.push(RenderCommand::Text {
                position: ScreenPoint::new(
                    rect.min.x,
                    y - self.theme.label_size - GRID_LABEL_GAP,
                ),
                text: formatter.format(level.value),
                style: TextStyle {
                    color: self.theme.label.faded(level.opacity),
                    size: self.theme.label_size,
                },
            });
        }
    }

    fn push_time_labels(&self, list: &mut RenderList, rect: ScreenRect, transform: &AffineTransform) {
        for label in self.time_labels.labels() {
            if label.opacity <= 0.0 {
                continue;
            }
            let (x, _) = transform.apply_f64(label.value as f64, 0.0);
            let x = x as f32;
            if x < rect.min.x || x > rect.max.x {
                continue;
            }
            let text = self.time_labels.format(label.value);
            let half_width =
                text.chars().count() as f32 * self.theme.label_size * LABEL_CHAR_WIDTH * 0.5;
            list.push(RenderCommand::Text {
                position: ScreenPoint::new(x - half_width, rect.max.y + GRID_LABEL_GAP),
                text,
                style: TextStyle {
                    color: self.theme.label.faded(label.opacity),
                    size: self.theme.label_size,
                },
            });
        }
    }

    fn push_selection_line(
        &self,
        list: &mut RenderList,
        rect: ScreenRect,
        transform: &AffineTransform,
        selected: i64,
    ) {
        let (x, _) = transform.apply_f64(selected as f64, 0.0);
        let x = x as f32;
        list.push(RenderCommand::Line {
            from: ScreenPoint::new(x, rect.min.y),
            to: ScreenPoint::new(x, rect.max.y),
            style: LineStyle {
                color: self.theme.grid,
                width: GRID_LINE_WIDTH,
            },
        });
    }

    fn push_markers(
        &self,
        list: &mut RenderList,
        chart: &BoundChart,
        transform: &AffineTransform,
        selected: i64,
    ) {
        let outer = self.config.marker_radius();
        let inner = (outer - self.config.line_width).max(0.0);
        for (index, sample) in nearest_samples(&chart.group, &chart.opacity, selected) {
            let opacity = chart.opacity[index];
            let center = transform.apply(sample.time, sample.value);
            list.push(RenderCommand::Point {
                center,
                style: MarkerStyle {
                    color: chart.group.series()[index].color().faded(opacity),
                    radius: outer,
                },
            });
            if inner > 0.0 {
                list.push(RenderCommand::Point {
                    center,
                    style: MarkerStyle {
                        color: self.theme.background.faded(opacity),
                        radius: inner,
                    },
                });
            }
        }
    }

    fn bound(&self) -> Option<&BoundChart> {
        match &self.binding {
            Binding::Bound(chart) => Some(&**chart),
            Binding::Empty => None,
        }
    }

    fn bound_mut(&mut self) -> Option<&mut BoundChart> {
        match &mut self.binding {
            Binding::Bound(chart) => Some(&mut **chart),
            Binding::Empty => None,
        }
    }

    fn request_redraw(&mut self) {
        self.redraw_generation = self.redraw_generation.wrapping_add(1);
        self.needs_redraw = true;
    }

    /// Re-fit the value range to the visible data.
    fn autoscale(&mut self, snap: bool) {
        let Some(chart) = self.bound() else {
            return;
        };
        let time_range = chart.time_animation.target().unwrap_or(chart.time_range);
        let Some(target) =
            self.autoscale
                .target_range(&chart.group, chart.visibility.flags(), time_range)
        else {
            return;
        };
        let change = self.autoscale.plan(
            chart.value_range,
            chart.value_animation.target(),
            target,
            snap,
        );
        let duration = self.config.value_animation;
        let result = match change {
            ScaleChange::Keep => Ok(()),
            ScaleChange::Snap(range) => self.set_value_range(range, None),
            ScaleChange::Animate(range) if duration.is_zero() => self.set_value_range(range, None),
            ScaleChange::Animate(range) => self.set_value_range(range, Some(duration)),
        };
        if let Err(err) = result {
            warn!(%err, "autoscale failed");
        }
    }

    fn refresh_grid(&mut self, duration: Option<Duration>) {
        let Some(range) = self.bound().map(|chart| {
            chart
                .value_animation
                .target()
                .unwrap_or(chart.value_range)
        }) else {
            return;
        };
        self.retarget_grid(range, duration);
    }

    /// Re-place time labels for the window the chart is heading to.
    fn refresh_time_labels(&mut self, duration: Option<Duration>) {
        if !self.config.draw_grid {
            return;
        }
        let Some(range) = self.bound().map(|chart| {
            chart
                .time_animation
                .target()
                .unwrap_or(chart.time_range)
        }) else {
            return;
        };
        let width = self.chart_rect().map_or(0.0, |rect| rect.width());
        let (step, values) = time_label_values(range, width, self.config.time_label_spacing_px);
        if let Err(err) = self
            .time_labels
            .retarget(step, &values, duration, self.config.easing)
        {
            warn!(%err, "time label retarget failed");
        }
    }

    fn retarget_grid(&mut self, range: ValueRange, duration: Option<Duration>) {
        if !self.config.draw_grid {
            return;
        }
        let height = self.chart_rect().map_or(0.0, |rect| rect.height());
        let values = self.autoscale.grid_values(range, height);
        if let Err(err) = self.grid.retarget(&values, duration, self.config.easing) {
            warn!(%err, "grid retarget failed");
        }
    }
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new(ChartConfig::default())
    }
}

fn fade_series(
    chart: &mut BoundChart,
    index: usize,
    visible: bool,
    duration: Duration,
    easing: Easing,
) {
    let target = if visible { 1.0 } else { 0.0 };
    let current = chart.opacity[index];
    let fade = &mut chart.fades[index];
    if duration.is_zero() || fade.start(current, target, duration, easing).is_err() {
        fade.cancel();
        chart.opacity[index] = target;
    }
}

/// Builder for configuring a renderer before construction.
#[derive(Debug, Default)]
pub struct ChartBuilder {
    config: ChartConfig,
    theme: Theme,
    formatter: ValueFormatter,
    time_formatter: TimeFormatter,
    bounds: Option<ScreenRect>,
}

impl ChartBuilder {
    /// Set the behavior configuration.
    pub fn config(mut self, config: ChartConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the theme.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the grid label formatter.
    pub fn value_formatter(mut self, formatter: ValueFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Set the time-axis label formatter.
    pub fn time_formatter(mut self, formatter: TimeFormatter) -> Self {
        self.time_formatter = formatter;
        self
    }

    /// Set the initial host bounds.
    pub fn bounds(mut self, bounds: ScreenRect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Build the renderer in the empty state.
    pub fn build(self) -> ChartRenderer {
        let autoscale = AutoscaleEngine::new(self.config.show_zero, self.config.grid_spacing_px);
        ChartRenderer {
            config: self.config,
            theme: self.theme,
            autoscale,
            grid: GridLevels::new(self.formatter),
            time_labels: TimeLabels::new(self.time_formatter),
            binding: Binding::Empty,
            bounds: self.bounds,
            selected_time: None,
            redraw_generation: 0,
            needs_redraw: false,
        }
    }
}
