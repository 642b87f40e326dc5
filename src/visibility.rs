//! Per-series visibility targets.

use tracing::warn;

/// Target visibility of every series in a group.
///
/// At least one series is always visible. Opacity transitions are driven by
/// the renderer from these targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesVisibilityModel {
    visible: Vec<bool>,
}

impl SeriesVisibilityModel {
    /// Create a model with every series visible.
    pub fn all_visible(count: usize) -> Self {
        Self {
            visible: vec![true; count],
        }
    }

    /// Number of series tracked.
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    /// Whether no series are tracked.
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Target flags indexed by series.
    pub fn flags(&self) -> &[bool] {
        &self.visible
    }

    /// Whether a series is targeted visible.
    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }

    /// Number of visible series.
    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|visible| **visible).count()
    }

    /// Change one series' visibility.
    ///
    /// Returns false without mutating when the index does not exist or the
    /// change would hide every series.
    pub fn set_visible(&mut self, index: usize, visible: bool) -> bool {
        let Some(current) = self.visible.get(index).copied() else {
            warn!(index, len = self.visible.len(), "visibility change for unknown series");
            return false;
        };
        if !visible && current && self.visible_count() == 1 {
            return false;
        }
        self.visible[index] = visible;
        true
    }

    /// Make exactly one series visible.
    ///
    /// Returns false when the index does not exist.
    pub fn show_only(&mut self, index: usize) -> bool {
        if index >= self.visible.len() {
            warn!(index, len = self.visible.len(), "show-only for unknown series");
            return false;
        }
        for (i, visible) in self.visible.iter_mut().enumerate() {
            *visible = i == index;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hiding_the_last_visible_series_is_rejected() {
        let mut model = SeriesVisibilityModel::all_visible(2);
        assert!(model.set_visible(1, false));
        let before = model.clone();
        assert!(!model.set_visible(0, false));
        assert_eq!(model, before);
    }

    #[test]
    fn hiding_an_already_hidden_series_is_accepted() {
        let mut model = SeriesVisibilityModel::all_visible(2);
        assert!(model.set_visible(1, false));
        assert!(model.set_visible(1, false));
        assert_eq!(model.visible_count(), 1);
    }

    #[test]
    fn show_only_leaves_exactly_one() {
        let mut model = SeriesVisibilityModel::all_visible(4);
        assert!(model.show_only(2));
        assert_eq!(model.flags(), [false, false, true, false]);
        assert!(model.show_only(0));
        assert_eq!(model.visible_count(), 1);
        assert!(model.is_visible(0));
    }

    #[test]
    fn unknown_index_is_rejected() {
        let mut model = SeriesVisibilityModel::all_visible(1);
        assert!(!model.set_visible(3, true));
        assert!(!model.show_only(3));
        assert!(model.is_visible(0));
    }

    #[test]
    fn random_toggles_never_hide_everything() {
        let mut model = SeriesVisibilityModel::all_visible(3);
        let mut seed = 7_u32;
        for _ in 0..200 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let index = (seed >> 16) as usize % 3;
            let visible = (seed >> 8) & 1 == 1;
            model.set_visible(index, visible);
            assert!(model.visible_count() >= 1);
        }
    }
}
