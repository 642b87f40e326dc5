/// Pointer behavior of the GPUI chart view.
#[derive(Debug, Clone)]
pub struct ChartViewConfig {
    /// Follow the pointer without a pressed button.
    pub select_on_hover: bool,
    /// Clear the selection when the pointer leaves the chart rect.
    pub clear_selection_on_exit: bool,
    /// Snap the selection to the nearest visible sample.
    pub snap_to_samples: bool,
}

impl Default for ChartViewConfig {
    fn default() -> Self {
        Self {
            select_on_hover: true,
            clear_selection_on_exit: true,
            snap_to_samples: true,
        }
    }
}
