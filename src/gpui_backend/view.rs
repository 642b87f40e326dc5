use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

use gpui::prelude::*;
use gpui::{
    Bounds, MouseButton, MouseDownEvent, MouseMoveEvent, Pixels, Point, Window, canvas, div,
};
use tracing::trace;

use crate::chart::ChartRenderer;
use crate::geom::{ScreenPoint, ScreenRect};

use super::config::ChartViewConfig;
use super::paint::{paint_list, to_hsla};

/// A GPUI view that renders a [`ChartRenderer`].
///
/// The view feeds its bounds and the window frame clock into the renderer,
/// keeps requesting frames while transitions run, and maps pointer input to
/// the selected time.
#[derive(Clone)]
pub struct GpuiChartView {
    chart: Arc<RwLock<ChartRenderer>>,
    config: ChartViewConfig,
    epoch: Instant,
}

impl GpuiChartView {
    /// Create a new GPUI chart view for the given renderer.
    ///
    /// Uses the default [`ChartViewConfig`].
    pub fn new(chart: ChartRenderer) -> Self {
        Self::with_config(chart, ChartViewConfig::default())
    }

    /// Create a new GPUI chart view with a custom configuration.
    pub fn with_config(chart: ChartRenderer, config: ChartViewConfig) -> Self {
        Self {
            chart: Arc::new(RwLock::new(chart)),
            config,
            epoch: Instant::now(),
        }
    }

    /// Get a handle for mutating the underlying renderer.
    ///
    /// Notify the view entity after mutating so the change is painted.
    pub fn chart_handle(&self) -> ChartHandle {
        ChartHandle {
            chart: Arc::clone(&self.chart),
        }
    }

    fn on_mouse_down(&mut self, ev: &MouseDownEvent, cx: &mut Context<Self>) {
        if self.select_at(screen_point(ev.position)) {
            cx.notify();
        }
    }

    fn on_mouse_move(&mut self, ev: &MouseMoveEvent, cx: &mut Context<Self>) {
        let pressed = ev.pressed_button == Some(MouseButton::Left);
        if !pressed && !self.config.select_on_hover {
            return;
        }
        if self.select_at(screen_point(ev.position)) {
            cx.notify();
        }
    }

    fn select_at(&self, pos: ScreenPoint) -> bool {
        let mut chart = write_chart(&self.chart);
        let inside = chart.chart_rect().is_some_and(|rect| rect.contains(pos));
        let time = if inside {
            let time = chart.date_for_position(pos);
            if self.config.snap_to_samples {
                time.and_then(|time| chart.snap_to_sample(time))
            } else {
                time
            }
        } else if self.config.clear_selection_on_exit {
            None
        } else {
            return false;
        };
        chart.set_selected_time(time)
    }
}

impl Render for GpuiChartView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let chart = Arc::clone(&self.chart);
        let epoch = self.epoch;
        let background = read_chart(&self.chart).theme().background;

        div()
            .size_full()
            .bg(to_hsla(background))
            .child(
                canvas(
                    move |bounds, window, _| {
                        let mut chart = write_chart(&chart);
                        let insets = chart.config().insets;
                        chart.set_layout(screen_rect(bounds), insets);
                        chart.tick(epoch.elapsed());
                        let list = chart.render();
                        if chart.is_animating() {
                            trace!("requesting animation frame");
                            window.request_animation_frame();
                        }
                        list
                    },
                    move |_, list, window, cx| {
                        paint_list(&list, window, cx);
                    },
                )
                .size_full(),
            )
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_down(ev, cx);
                }),
            )
            .on_mouse_move(cx.listener(|this, ev, _, cx| {
                this.on_mouse_move(ev, cx);
            }))
    }
}

/// A handle for mutating a [`ChartRenderer`] held inside a `GpuiChartView`.
///
/// The handle clones cheaply and can be moved into async tasks.
#[derive(Clone)]
pub struct ChartHandle {
    chart: Arc<RwLock<ChartRenderer>>,
}

impl ChartHandle {
    /// Read the renderer state.
    ///
    /// The renderer is locked for the duration of the callback.
    pub fn read<R>(&self, f: impl FnOnce(&ChartRenderer) -> R) -> R {
        f(&read_chart(&self.chart))
    }

    /// Mutate the renderer state.
    ///
    /// The renderer is locked for the duration of the callback.
    pub fn write<R>(&self, f: impl FnOnce(&mut ChartRenderer) -> R) -> R {
        f(&mut write_chart(&self.chart))
    }
}

fn read_chart(chart: &RwLock<ChartRenderer>) -> RwLockReadGuard<'_, ChartRenderer> {
    chart.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_chart(chart: &RwLock<ChartRenderer>) -> RwLockWriteGuard<'_, ChartRenderer> {
    chart.write().unwrap_or_else(PoisonError::into_inner)
}

fn screen_point(point: Point<Pixels>) -> ScreenPoint {
    ScreenPoint::new(f32::from(point.x), f32::from(point.y))
}

fn screen_rect(bounds: Bounds<Pixels>) -> ScreenRect {
    ScreenRect::new(
        screen_point(bounds.origin),
        screen_point(bounds.bottom_right()),
    )
}
