//! Pointwise and windowed transforms that keep the series' timestamps.

use super::{millis_between, offset_time};
use chartexpr_ast::chart::TimeSeries;
use chartexpr_ast::{Point, Timestamp};

/// Trailing moving average.
///
/// Each output point averages the input points in `(t - window, t]`. The
/// window start only moves forward, so the whole pass is linear.
pub fn moving_avg(series: &TimeSeries, window_ms: i64) -> TimeSeries {
    let points = &series.points;
    let mut averaged = Vec::with_capacity(points.len());
    let mut start = 0;
    let mut sum = 0.0;

    for (i, point) in points.iter().enumerate() {
        sum += point.y;
        while start < i && millis_between(points[start].x, point.x) >= window_ms {
            sum -= points[start].y;
            start += 1;
        }
        averaged.push(Point::new(point.x, sum / (i - start + 1) as f64));
    }

    series.with_points(averaged)
}

/// Move every point by `offset_ms`; values are unchanged.
///
/// Returns `None` if a shifted timestamp falls outside the representable range.
pub fn shift(series: &TimeSeries, offset_ms: i64) -> Option<TimeSeries> {
    let shifted = series
        .points
        .iter()
        .map(|p| offset_time(p.x, offset_ms).map(|x| Point::new(x, p.y)))
        .collect::<Option<Vec<_>>>()?;
    Some(series.with_points(shifted))
}

/// Rescale values linearly onto `[0, 1]`.
///
/// A constant series maps every value to 0.
pub fn normalize(series: &TimeSeries) -> TimeSeries {
    let (min, max) = series
        .values()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
            (lo.min(y), hi.max(y))
        });
    let range = max - min;

    let points = series
        .points
        .iter()
        .map(|p| {
            let y = if range == 0.0 { 0.0 } else { (p.y - min) / range };
            Point::new(p.x, y)
        })
        .collect();

    series.with_points(points)
}

/// Keep the points `keep` accepts, in their original order.
pub fn filter<F>(series: &TimeSeries, mut keep: F) -> TimeSeries
where
    F: FnMut(&Point<Timestamp>) -> bool,
{
    let points = series.points.iter().filter(|p| keep(p)).cloned().collect();
    series.with_points(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::fixtures::{minutes, per_minute, xs, ys};

    const MINUTE: i64 = 60_000;

    #[test]
    fn test_moving_avg_two_minutes() {
        let result = moving_avg(&per_minute(&[1.0, 2.0, 3.0, 4.0]), 2 * MINUTE);
        assert_eq!(ys(&result), vec![1.0, 1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_moving_avg_keeps_timestamps() {
        let input = per_minute(&[5.0, 1.0, 9.0, 2.0, 7.0]);
        let result = moving_avg(&input, 3 * MINUTE);
        assert_eq!(xs(&result), xs(&input));
        assert_eq!(result.time_zone, input.time_zone);
    }

    #[test]
    fn test_moving_avg_window_shorter_than_spacing() {
        let input = per_minute(&[3.0, 6.0, 9.0]);
        assert_eq!(ys(&moving_avg(&input, 1000)), vec![3.0, 6.0, 9.0]);
    }

    #[test]
    fn test_moving_avg_wide_window_is_running_mean() {
        let input = per_minute(&[2.0, 4.0, 6.0]);
        assert_eq!(ys(&moving_avg(&input, 60 * MINUTE)), vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_moving_avg_empty() {
        assert!(moving_avg(&per_minute(&[]), MINUTE).is_empty());
    }

    #[test]
    fn test_shift() {
        let input = per_minute(&[1.0, 2.0]);
        let result = shift(&input, 90 * MINUTE).unwrap();
        assert_eq!(xs(&result), vec![minutes(90), minutes(91)]);
        assert_eq!(ys(&result), vec![1.0, 2.0]);

        let back = shift(&input, -MINUTE).unwrap();
        assert_eq!(back.points[0].x, minutes(-1));
    }

    #[test]
    fn test_shift_out_of_range() {
        assert!(shift(&per_minute(&[1.0]), i64::MAX).is_none());
    }

    #[test]
    fn test_normalize() {
        let result = normalize(&per_minute(&[10.0, 20.0, 15.0, 30.0]));
        assert_eq!(ys(&result), vec![0.0, 0.5, 0.25, 1.0]);
    }

    #[test]
    fn test_normalize_constant_series() {
        let result = normalize(&per_minute(&[4.0, 4.0, 4.0]));
        assert_eq!(ys(&result), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_filter_preserves_order() {
        let input = per_minute(&[5.0, 1.0, 7.0, 3.0, 9.0]);
        let result = filter(&input, |p| p.y > 2.0);
        assert_eq!(ys(&result), vec![5.0, 7.0, 3.0, 9.0]);
        assert_eq!(
            xs(&result),
            vec![minutes(0), minutes(2), minutes(3), minutes(4)]
        );
    }
}
