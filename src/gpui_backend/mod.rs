//! GPUI integration for gpui_timechart.
//!
//! This module provides a GPUI view that owns a
//! [`ChartRenderer`](crate::chart::ChartRenderer), drives its animations from
//! the window's frame clock, and maps pointer input to the selected time.

mod config;
mod paint;
mod view;

pub use config::ChartViewConfig;
pub use view::{ChartHandle, GpuiChartView};
