//! Time-series algorithms.
//!
//! Every function takes a [`TimeSeries`] whose points are sorted ascending by
//! time and returns a new series in the same time zone. Durations are whole
//! milliseconds.

mod align;
mod resample;
mod transform;

pub use align::align;
pub use resample::resample;
pub use transform::{filter, moving_avg, normalize, shift};

use chartexpr_ast::Timestamp;
use chrono::TimeDelta;

/// Milliseconds elapsed from `from` to `to`.
///
/// Instants are truncated to whole epoch milliseconds first, so two
/// timestamps inside the same millisecond are zero apart.
pub(crate) fn millis_between(from: Timestamp, to: Timestamp) -> i64 {
    to.timestamp_millis() - from.timestamp_millis()
}

/// `time` moved by `millis`, `None` outside the representable range.
pub fn offset_time(time: Timestamp, millis: i64) -> Option<Timestamp> {
    TimeDelta::try_milliseconds(millis).and_then(|delta| time.checked_add_signed(delta))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chartexpr_ast::chart::TimeSeries;
    use chartexpr_ast::{Point, Timestamp};
    use chrono::{TimeZone, Utc};

    pub fn t0() -> Timestamp {
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
    }

    pub fn minutes(n: i64) -> Timestamp {
        t0() + chrono::TimeDelta::minutes(n)
    }

    /// Values at 1-minute spacing from `t0`.
    pub fn per_minute(values: &[f64]) -> TimeSeries {
        TimeSeries::new(
            values
                .iter()
                .enumerate()
                .map(|(i, y)| Point::new(minutes(i as i64), *y))
                .collect(),
        )
    }

    pub fn at(points: &[(i64, f64)]) -> TimeSeries {
        TimeSeries::new(points.iter().map(|(m, y)| Point::new(minutes(*m), *y)).collect())
    }

    pub fn xs(series: &TimeSeries) -> Vec<Timestamp> {
        series.points.iter().map(|p| p.x).collect()
    }

    pub fn ys(series: &TimeSeries) -> Vec<f64> {
        series.values().collect()
    }
}
