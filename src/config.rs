//! Behavior configuration for a chart.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::animation::Easing;
use crate::geom::Insets;

/// Chart behavior settings.
///
/// Hosts usually keep this alongside their own settings and deserialize it
/// from a file; every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Draw horizontal grid levels with labels.
    pub draw_grid: bool,
    /// Keep zero inside the autoscaled range for non-negative data.
    pub show_zero: bool,
    /// Let series extend into the chart margins where data exists.
    pub draw_outside: bool,
    /// Series stroke width in pixels.
    pub line_width: f32,
    /// Chart margins inside the host bounds.
    pub insets: Insets,
    /// Duration of autoscale value-range transitions.
    pub value_animation: Duration,
    /// Duration of animated time-range changes.
    pub time_animation: Duration,
    /// Duration of series fade in/out on visibility changes.
    pub fade_animation: Duration,
    /// Easing used by every transition.
    pub easing: Easing,
    /// Preferred pixel distance between grid levels.
    pub grid_spacing_px: f32,
    /// Preferred pixel distance between time-axis labels.
    pub time_label_spacing_px: f32,
    /// Label fade used when the time window changes without animation.
    pub time_label_fade: Duration,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            draw_grid: true,
            show_zero: true,
            draw_outside: false,
            line_width: 2.0,
            insets: Insets::new(0.0, 40.0, 30.0, 30.0),
            value_animation: Duration::from_millis(300),
            time_animation: Duration::from_millis(500),
            fade_animation: Duration::from_millis(250),
            easing: Easing::EaseInOut,
            grid_spacing_px: 50.0,
            time_label_spacing_px: 80.0,
            time_label_fade: Duration::from_millis(200),
        }
    }
}

impl ChartConfig {
    /// Selection marker outer radius.
    pub fn marker_radius(&self) -> f32 {
        self.line_width * 2.0
    }
}
