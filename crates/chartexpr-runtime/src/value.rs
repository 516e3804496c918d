//! Runtime values.

use chartexpr_ast::{Chart, Timestamp, ValueType};
use serde::Serialize;
use std::fmt;
use std::rc::Rc;

/// Concrete value produced by evaluating an expression.
///
/// Charts are shared: binding a chart to a variable or passing it through an
/// identifier does not copy its points.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum RuntimeValue {
    Number(f64),
    Boolean(bool),
    String(String),
    /// Milliseconds
    Duration(i64),
    Time(Timestamp),
    Chart(Rc<Chart>),
}

impl RuntimeValue {
    /// Static type this value inhabits.
    pub fn value_type(&self) -> ValueType {
        match self {
            RuntimeValue::Number(_) => ValueType::Number,
            RuntimeValue::Boolean(_) => ValueType::Boolean,
            RuntimeValue::String(_) => ValueType::String,
            RuntimeValue::Duration(_) => ValueType::Duration,
            RuntimeValue::Time(_) => ValueType::Time,
            RuntimeValue::Chart(chart) => ValueType::Chart(chart.domain_type()),
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            RuntimeValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            RuntimeValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_duration(&self) -> Option<i64> {
        match self {
            RuntimeValue::Duration(ms) => Some(*ms),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<Timestamp> {
        match self {
            RuntimeValue::Time(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_chart(&self) -> Option<&Rc<Chart>> {
        match self {
            RuntimeValue::Chart(chart) => Some(chart),
            _ => None,
        }
    }
}

impl From<Chart> for RuntimeValue {
    fn from(chart: Chart) -> Self {
        RuntimeValue::Chart(Rc::new(chart))
    }
}

impl fmt::Display for RuntimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeValue::Number(n) => write!(f, "{}", n),
            RuntimeValue::Boolean(b) => write!(f, "{}", b),
            RuntimeValue::String(s) => write!(f, "{:?}", s),
            RuntimeValue::Duration(ms) => write!(f, "{}ms", ms),
            RuntimeValue::Time(t) => write!(f, "{}", t.to_rfc3339()),
            RuntimeValue::Chart(chart) => {
                write!(f, "chart<{}> ({} points)", chart.domain_type(), chart.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartexpr_ast::{DomainType, Point};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_value_type() {
        assert_eq!(RuntimeValue::Number(1.0).value_type(), ValueType::Number);
        assert_eq!(RuntimeValue::Duration(60_000).value_type(), ValueType::Duration);
        let chart = RuntimeValue::from(Chart::category(vec![Point::new("a".to_string(), 1.0)]));
        assert_eq!(chart.value_type(), ValueType::Chart(DomainType::Category));
    }

    #[test]
    fn test_display() {
        assert_eq!(RuntimeValue::Number(7.0).to_string(), "7");
        assert_eq!(RuntimeValue::Number(2.5).to_string(), "2.5");
        assert_eq!(RuntimeValue::Duration(1500).to_string(), "1500ms");
        assert_eq!(RuntimeValue::String("a\"b".into()).to_string(), "\"a\\\"b\"");
        let t = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(RuntimeValue::Time(t).to_string(), "2020-01-01T00:00:00+00:00");
        let chart = RuntimeValue::from(Chart::time_series(vec![Point::new(t, 1.0)]));
        assert_eq!(chart.to_string(), "chart<time> (1 points)");
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_value(RuntimeValue::Duration(60_000)).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "duration", "value": 60000}));

        let t = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let json = serde_json::to_value(RuntimeValue::Time(t)).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "time", "value": "2020-01-01T00:00:00Z"}));
    }
}
