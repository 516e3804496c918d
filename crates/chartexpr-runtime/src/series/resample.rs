//! Fixed-width bucket aggregation.

use super::{millis_between, offset_time};
use chartexpr_ast::ast::function::ResampleMethod;
use chartexpr_ast::chart::TimeSeries;
use chartexpr_ast::{Point, Timestamp};

/// Running state of the bucket being filled.
struct Bucket {
    index: i64,
    sum: f64,
    count: usize,
    last: f64,
}

impl Bucket {
    fn start(index: i64, y: f64) -> Self {
        Self {
            index,
            sum: y,
            count: 1,
            last: y,
        }
    }

    fn push(&mut self, y: f64) {
        self.sum += y;
        self.count += 1;
        self.last = y;
    }

    fn value(&self, method: ResampleMethod) -> f64 {
        match method {
            ResampleMethod::Mean => self.sum / self.count as f64,
            ResampleMethod::Sum => self.sum,
            ResampleMethod::Last => self.last,
        }
    }
}

/// Aggregate points into non-overlapping buckets of `window_ms`.
///
/// Buckets are anchored at the first point's timestamp; each non-empty
/// bucket yields one point at its start time. Empty buckets produce nothing.
/// A non-positive window returns the series unchanged.
pub fn resample(series: &TimeSeries, window_ms: i64, method: ResampleMethod) -> TimeSeries {
    let Some(first) = series.points.first() else {
        return series.clone();
    };
    if window_ms <= 0 {
        return series.clone();
    }

    let base = first.x;
    let mut points = Vec::new();
    let mut current: Option<Bucket> = None;

    for point in &series.points {
        let index = millis_between(base, point.x).div_euclid(window_ms);
        match current.as_mut() {
            Some(bucket) if bucket.index == index => bucket.push(point.y),
            _ => {
                if let Some(done) = current.take() {
                    points.push(flush(&done, base, window_ms, method));
                }
                current = Some(Bucket::start(index, point.y));
            }
        }
    }
    if let Some(done) = current {
        points.push(flush(&done, base, window_ms, method));
    }

    series.with_points(points)
}

fn flush(bucket: &Bucket, base: Timestamp, window_ms: i64, method: ResampleMethod) -> Point<Timestamp> {
    // index * window never exceeds the offset of a point inside the series
    let start = offset_time(base, bucket.index.saturating_mul(window_ms)).unwrap_or(base);
    Point::new(start, bucket.value(method))
}
