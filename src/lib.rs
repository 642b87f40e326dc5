//! gpui_timechart is an animated time-series chart engine with a GPUI host view.
//! The core is view-independent: it owns ranges, animations and visibility,
//! and emits backend-agnostic draw commands each frame.

#![forbid(unsafe_code)]

pub mod animation;
pub mod autoscale;
pub mod axis;
pub mod chart;
pub mod config;
pub mod error;
pub mod geom;
#[cfg(feature = "gpui")]
pub mod gpui_backend;
mod interaction;
pub mod render;
pub mod series;
pub mod style;
pub mod transform;
pub mod view;
pub mod visibility;

pub use animation::{AnimationFrame, Easing, Lerp, RangeAnimator};
pub use autoscale::{AutoscaleEngine, ScaleChange, nice_step};
pub use axis::{
    FadingLevel, GridLevel, GridLevels, TimeFormatter, TimeLabel, TimeLabels, ValueFormatter,
    nice_time_step, time_label_values,
};
pub use chart::{ChartBuilder, ChartPhase, ChartRenderer};
pub use config::ChartConfig;
pub use error::{ChartError, ChartResult, RangeAxis};
pub use geom::{Insets, ScreenPoint, ScreenRect};
pub use render::{
    Color, LineStyle, MarkerStyle, RenderBackend, RenderCommand, RenderList, TextStyle,
    project_polyline,
};
pub use series::{Grouping, Sample, Series, SeriesGroup};
pub use style::Theme;
pub use transform::{AffineTransform, DrawBounds, expand_draw_bounds};
pub use view::{TimeRange, ValueRange};
pub use visibility::SeriesVisibilityModel;
