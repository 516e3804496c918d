//! Chart domain model.
//!
//! A chart is a domain plus an ordered sequence of `{x, y}` points. The
//! domain fixes the type of `x`: an instant for time charts, a number for
//! numeric charts and a label for category charts. Encoding the domain as the
//! enum variant makes a point with the wrong x type unrepresentable.
//!
//! Time-series algorithms assume points are sorted ascending by `x`. This is
//! a precondition of those algorithms and is not enforced here.
//!
//! # Serialization
//!
//! ```json
//! {"domain": "time", "timeZone": "UTC", "points": [{"x": "2020-01-01T00:00:00Z", "y": 1.0}]}
//! {"domain": "numeric", "unit": "ms", "points": [{"x": 0.5, "y": 2.0}]}
//! {"domain": "category", "points": [{"x": "eu-west", "y": 3.0}]}
//! ```

use crate::foundation::DomainType;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Instant on a time axis.
pub type Timestamp = DateTime<Utc>;

/// Named input charts supplied to a program run.
pub type ChartMap = IndexMap<String, Rc<Chart>>;

/// Time zone used when a time chart does not name one.
pub const DEFAULT_TIME_ZONE: &str = "UTC";

fn default_time_zone() -> String {
    DEFAULT_TIME_ZONE.to_string()
}

/// Single chart sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point<X> {
    pub x: X,
    pub y: f64,
}

impl<X> Point<X> {
    pub fn new(x: X, y: f64) -> Self {
        Self { x, y }
    }
}

/// Chart whose x-axis is time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeries {
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    pub points: Vec<Point<Timestamp>>,
}

impl TimeSeries {
    /// Time series in the default time zone.
    pub fn new(points: Vec<Point<Timestamp>>) -> Self {
        Self::with_time_zone(DEFAULT_TIME_ZONE, points)
    }

    pub fn with_time_zone(time_zone: impl Into<String>, points: Vec<Point<Timestamp>>) -> Self {
        Self {
            time_zone: time_zone.into(),
            points,
        }
    }

    /// Build from unordered `(time, value)` rows.
    ///
    /// Rows with a NaN value are dropped and the rest sorted ascending by time.
    pub fn from_rows(rows: impl IntoIterator<Item = (Timestamp, f64)>) -> Self {
        let mut points: Vec<_> = rows
            .into_iter()
            .filter(|(_, y)| !y.is_nan())
            .map(|(x, y)| Point::new(x, y))
            .collect();
        points.sort_by_key(|p| p.x);
        Self::new(points)
    }

    /// New series in the same domain with different points.
    pub fn with_points(&self, points: Vec<Point<Timestamp>>) -> Self {
        Self::with_time_zone(self.time_zone.clone(), points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.y)
    }
}

/// Chart whose x-axis is a plain number, optionally carrying a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSeries {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub points: Vec<Point<f64>>,
}

/// Chart whose x-axis is a set of labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySeries {
    pub points: Vec<Point<String>>,
}

/// A chart in one of the three domains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "domain", rename_all = "lowercase")]
pub enum Chart {
    Time(TimeSeries),
    Numeric(NumericSeries),
    Category(CategorySeries),
}

/// Domain of a chart: its tag plus domain-specific metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Domain {
    Time {
        #[serde(rename = "timeZone")]
        time_zone: String,
    },
    Numeric {
        unit: Option<String>,
    },
    Category,
}

impl Domain {
    pub fn domain_type(&self) -> DomainType {
        match self {
            Domain::Time { .. } => DomainType::Time,
            Domain::Numeric { .. } => DomainType::Numeric,
            Domain::Category => DomainType::Category,
        }
    }
}

impl Chart {
    /// Time-series chart in the default time zone.
    pub fn time_series(points: Vec<Point<Timestamp>>) -> Self {
        Chart::Time(TimeSeries::new(points))
    }

    pub fn time_series_in(time_zone: impl Into<String>, points: Vec<Point<Timestamp>>) -> Self {
        Chart::Time(TimeSeries::with_time_zone(time_zone, points))
    }

    pub fn numeric(unit: Option<String>, points: Vec<Point<f64>>) -> Self {
        Chart::Numeric(NumericSeries { unit, points })
    }

    pub fn category(points: Vec<Point<String>>) -> Self {
        Chart::Category(CategorySeries { points })
    }

    pub fn domain(&self) -> Domain {
        match self {
            Chart::Time(series) => Domain::Time {
                time_zone: series.time_zone.clone(),
            },
            Chart::Numeric(series) => Domain::Numeric {
                unit: series.unit.clone(),
            },
            Chart::Category(_) => Domain::Category,
        }
    }

    pub fn domain_type(&self) -> DomainType {
        match self {
            Chart::Time(_) => DomainType::Time,
            Chart::Numeric(_) => DomainType::Numeric,
            Chart::Category(_) => DomainType::Category,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Chart::Time(series) => series.points.len(),
            Chart::Numeric(series) => series.points.len(),
            Chart::Category(series) => series.points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_time_series(&self) -> Option<&TimeSeries> {
        match self {
            Chart::Time(series) => Some(series),
            _ => None,
        }
    }

    /// The y-values in point order.
    pub fn values(&self) -> Vec<f64> {
        match self {
            Chart::Time(series) => series.points.iter().map(|p| p.y).collect(),
            Chart::Numeric(series) => series.points.iter().map(|p| p.y).collect(),
            Chart::Category(series) => series.points.iter().map(|p| p.y).collect(),
        }
    }
}

impl From<TimeSeries> for Chart {
    fn from(series: TimeSeries) -> Self {
        Chart::Time(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(minute: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2020, 1, 1, 0, minute, 0).unwrap()
    }

    #[test]
    fn test_domain_metadata() {
        let chart = Chart::time_series(vec![Point::new(at(0), 1.0)]);
        assert_eq!(
            chart.domain(),
            Domain::Time {
                time_zone: "UTC".to_string()
            }
        );
        assert_eq!(chart.domain_type(), DomainType::Time);

        let chart = Chart::numeric(Some("ms".into()), vec![]);
        assert_eq!(chart.domain_type(), DomainType::Numeric);
        assert!(chart.is_empty());
        assert!(chart.as_time_series().is_none());
    }

    #[test]
    fn test_from_rows_sorts_and_drops_nan() {
        let series = TimeSeries::from_rows([(at(2), 3.0), (at(0), 1.0), (at(1), f64::NAN)]);
        assert_eq!(series.len(), 2);
        assert_eq!(series.points[0].x, at(0));
        assert_eq!(series.values().collect::<Vec<_>>(), vec![1.0, 3.0]);
    }

    #[test]
    fn test_deserialize_time_chart() {
        let json = r#"{
            "domain": "time",
            "points": [
                {"x": "2020-01-01T00:00:00Z", "y": 1.5},
                {"x": "2020-01-01T00:01:00Z", "y": 2.5}
            ]
        }"#;
        let chart: Chart = serde_json::from_str(json).unwrap();
        let series = chart.as_time_series().unwrap();
        assert_eq!(series.time_zone, "UTC");
        assert_eq!(series.points[1].x, at(1));
        assert_eq!(chart.values(), vec![1.5, 2.5]);
    }

    #[test]
    fn test_deserialize_category_chart() {
        let json = r#"{"domain": "category", "points": [{"x": "eu", "y": 3}]}"#;
        let chart: Chart = serde_json::from_str(json).unwrap();
        assert_eq!(chart.domain(), Domain::Category);
        assert_eq!(chart.len(), 1);
    }
}
