//! Pointer helpers mapping between device positions and timestamps.
//!
//! Hosts use these through [`crate::ChartRenderer`] to implement touch
//! selection with consistent semantics across backends.

use crate::geom::{ScreenPoint, ScreenRect};
use crate::series::{Sample, SeriesGroup};
use crate::view::TimeRange;

/// Timestamp under a device position inside the chart rect.
///
/// Positions outside the rect extrapolate linearly.
pub(crate) fn date_for_position(
    point: ScreenPoint,
    rect: ScreenRect,
    range: TimeRange,
) -> Option<i64> {
    if !rect.is_valid() || !range.is_valid() {
        return None;
    }
    let fraction = (point.x - rect.min.x) as f64 / rect.width() as f64;
    Some(range.time_at(fraction))
}

/// Device X coordinate of a timestamp inside the chart rect.
pub(crate) fn x_position_for_date(time: i64, rect: ScreenRect, range: TimeRange) -> Option<f32> {
    if !rect.is_valid() || !range.is_valid() {
        return None;
    }
    Some(rect.min.x + (range.fraction_of(time) * rect.width() as f64) as f32)
}

/// Nearest sample to `time` for each series whose opacity is above zero.
pub(crate) fn nearest_samples<'a>(
    group: &'a SeriesGroup,
    opacity: &'a [f64],
    time: i64,
) -> impl Iterator<Item = (usize, Sample)> + 'a {
    group
        .series()
        .iter()
        .enumerate()
        .filter(move |(index, _)| opacity.get(*index).is_some_and(|value| *value > 0.0))
        .map(move |(index, series)| (index, series.samples()[series.nearest_index(time)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Color;
    use crate::series::Series;

    #[test]
    fn position_and_date_roundtrip() {
        let rect = ScreenRect::from_origin_size(40.0, 0.0, 200.0, 100.0);
        let range = TimeRange::new(1_000, 3_000).unwrap();
        assert_eq!(
            date_for_position(ScreenPoint::new(140.0, 50.0), rect, range),
            Some(2_000)
        );
        assert_eq!(x_position_for_date(2_000, rect, range), Some(140.0));
        assert_eq!(x_position_for_date(1_000, rect, range), Some(40.0));
    }

    #[test]
    fn invalid_rect_has_no_mapping() {
        let rect = ScreenRect::from_origin_size(0.0, 0.0, 0.0, 100.0);
        let range = TimeRange::new(0, 10).unwrap();
        assert!(date_for_position(ScreenPoint::new(0.0, 0.0), rect, range).is_none());
        assert!(x_position_for_date(5, rect, range).is_none());
    }

    #[test]
    fn nearest_samples_skip_transparent_series() {
        let group = SeriesGroup::new(vec![
            Series::from_pairs("a", Color::BLACK, [(0, 1.0), (10, 2.0)]).unwrap(),
            Series::from_pairs("b", Color::BLACK, [(0, 3.0), (10, 4.0)]).unwrap(),
        ])
        .unwrap();
        let hits: Vec<_> = nearest_samples(&group, &[0.0, 0.4], 8).collect();
        assert_eq!(hits, [(1, Sample::new(10, 4.0))]);
    }
}
