//! Re-sampling one series onto another series' timestamps.

use super::millis_between;
use chartexpr_ast::ast::function::AlignMethod;
use chartexpr_ast::chart::TimeSeries;
use chartexpr_ast::{Point, Timestamp};
use std::collections::HashMap;

/// Produce one point per `target` timestamp with values taken from `source`.
///
/// The result keeps `source`'s time zone. If either series is empty the
/// result is empty.
pub fn align(source: &TimeSeries, target: &TimeSeries, method: AlignMethod) -> TimeSeries {
    if source.is_empty() || target.is_empty() {
        return source.with_points(Vec::new());
    }

    let points = match method {
        AlignMethod::Exact => align_exact(source, target),
        AlignMethod::Step | AlignMethod::Linear => align_continuous(source, target, method),
    };
    source.with_points(points)
}

/// Targets with no source point at the same millisecond are dropped.
fn align_exact(source: &TimeSeries, target: &TimeSeries) -> Vec<Point<Timestamp>> {
    let by_millis: HashMap<i64, f64> = source
        .points
        .iter()
        .map(|p| (p.x.timestamp_millis(), p.y))
        .collect();

    target
        .points
        .iter()
        .filter_map(|t| {
            by_millis
                .get(&t.x.timestamp_millis())
                .map(|y| Point::new(t.x, *y))
        })
        .collect()
}

/// Forward-only merge over both series.
///
/// `next` is the first source point strictly after the current target; its
/// predecessor is the left neighbor. Outside the source range both
/// neighbors collapse onto the nearest end point.
fn align_continuous(
    source: &TimeSeries,
    target: &TimeSeries,
    method: AlignMethod,
) -> Vec<Point<Timestamp>> {
    let src = &source.points;
    let last = src.len() - 1;
    let mut next = 0;

    target
        .points
        .iter()
        .map(|t| {
            while next < src.len() && millis_between(t.x, src[next].x) <= 0 {
                next += 1;
            }

            let (left, right) = match next {
                0 => (0, 0),
                n if n > last => (last, last),
                n => (n - 1, n),
            };

            let y = match method {
                AlignMethod::Linear => interpolate(src, left, right, t.x),
                _ => src[left].y,
            };
            Point::new(t.x, y)
        })
        .collect()
}

fn interpolate(
    src: &[Point<Timestamp>],
    left: usize,
    right: usize,
    at: Timestamp,
) -> f64 {
    let (l, r) = (&src[left], &src[right]);
    let span = millis_between(l.x, r.x);
    if left == right || span == 0 {
        return l.y;
    }
    let ratio = millis_between(l.x, at) as f64 / span as f64;
    l.y + ratio * (r.y - l.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::fixtures::{at, per_minute, xs, ys};

    fn every_five_minutes(count: i64) -> TimeSeries {
        at(&(0..count).map(|i| (i * 5, 0.0)).collect::<Vec<_>>())
    }

    #[test]
    fn test_linear_interpolates_and_clamps() {
        let source = at(&[(0, 0.0), (10, 10.0)]);
        let result = align(&source, &every_five_minutes(4), AlignMethod::Linear);
        assert_eq!(ys(&result), vec![0.0, 5.0, 10.0, 10.0]);
    }

    #[test]
    fn test_linear_before_first_point() {
        let source = at(&[(10, 4.0), (20, 8.0)]);
        let target = at(&[(0, 0.0), (15, 0.0)]);
        assert_eq!(ys(&align(&source, &target, AlignMethod::Linear)), vec![4.0, 6.0]);
    }

    #[test]
    fn test_step_holds_previous_value() {
        let source = at(&[(0, 1.0), (10, 2.0), (20, 3.0)]);
        let target = at(&[(0, 0.0), (5, 0.0), (10, 0.0), (19, 0.0), (30, 0.0)]);
        let result = align(&source, &target, AlignMethod::Step);
        assert_eq!(ys(&result), vec![1.0, 1.0, 2.0, 2.0, 3.0]);
        assert_eq!(xs(&result), xs(&target));
    }

    #[test]
    fn test_step_ignores_sub_millisecond_offsets() {
        let mut source = at(&[(0, 1.0), (10, 2.0)]);
        source.points[1].x += chrono::TimeDelta::microseconds(600);
        let mut target = at(&[(10, 0.0)]);
        target.points[0].x += chrono::TimeDelta::microseconds(400);
        assert_eq!(ys(&align(&source, &target, AlignMethod::Step)), vec![2.0]);
    }

    #[test]
    fn test_step_before_source_clamps_to_first() {
        let source = at(&[(10, 7.0)]);
        let target = at(&[(0, 0.0), (20, 0.0)]);
        assert_eq!(ys(&align(&source, &target, AlignMethod::Step)), vec![7.0, 7.0]);
    }

    #[test]
    fn test_exact_drops_unmatched_targets() {
        let source = at(&[(0, 1.0), (10, 2.0), (20, 3.0)]);
        let target = every_five_minutes(5);
        let result = align(&source, &target, AlignMethod::Exact);
        assert_eq!(ys(&result), vec![1.0, 2.0, 3.0]);
        assert_eq!(xs(&result), xs(&source));
    }

    #[test]
    fn test_exact_onto_itself_is_identity() {
        let series = per_minute(&[3.0, 1.0, 4.0, 1.0, 5.0]);
        assert_eq!(align(&series, &series, AlignMethod::Exact), series);
    }

    #[test]
    fn test_empty_inputs() {
        let source = TimeSeries::with_time_zone("Europe/Stockholm", Vec::new());
        let result = align(&source, &per_minute(&[1.0]), AlignMethod::Linear);
        assert!(result.is_empty());
        assert_eq!(result.time_zone, "Europe/Stockholm");

        let result = align(&per_minute(&[1.0]), &per_minute(&[]), AlignMethod::Step);
        assert!(result.is_empty());
    }
}
