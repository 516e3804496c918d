//! Static type lattice of the expression language.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a chart's x-axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainType {
    Time,
    Numeric,
    Category,
}

impl DomainType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainType::Time => "time",
            DomainType::Numeric => "numeric",
            DomainType::Category => "category",
        }
    }
}

impl fmt::Display for DomainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value kind without chart domain refinement.
///
/// Function parameters are declared by kind; chart parameters narrow the
/// accepted domains separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Number,
    Boolean,
    String,
    Duration,
    Time,
    Chart,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
            ValueKind::String => "string",
            ValueKind::Duration => "duration",
            ValueKind::Time => "time",
            ValueKind::Chart => "chart",
        };
        f.write_str(name)
    }
}

/// Inferred type of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "domain", rename_all = "lowercase")]
pub enum ValueType {
    Number,
    Boolean,
    String,
    Duration,
    Time,
    Chart(DomainType),
    Unknown,
}

impl ValueType {
    /// Kind of this type, `None` for `unknown`.
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            ValueType::Number => Some(ValueKind::Number),
            ValueType::Boolean => Some(ValueKind::Boolean),
            ValueType::String => Some(ValueKind::String),
            ValueType::Duration => Some(ValueKind::Duration),
            ValueType::Time => Some(ValueKind::Time),
            ValueType::Chart(_) => Some(ValueKind::Chart),
            ValueType::Unknown => None,
        }
    }

    pub fn chart_domain(&self) -> Option<DomainType> {
        match self {
            ValueType::Chart(domain) => Some(*domain),
            _ => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Chart(domain) => write!(f, "chart<{}>", domain),
            ValueType::Unknown => f.write_str("unknown"),
            other => match other.kind() {
                Some(kind) => write!(f, "{}", kind),
                None => f.write_str("unknown"),
            },
        }
    }
}

/// What a diagnostic expected to find: an exact type or any type of a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expected {
    Type(ValueType),
    Kind(ValueKind),
}

impl From<ValueType> for Expected {
    fn from(ty: ValueType) -> Self {
        Expected::Type(ty)
    }
}

impl From<ValueKind> for Expected {
    fn from(kind: ValueKind) -> Self {
        Expected::Kind(kind)
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Type(ty) => write!(f, "{}", ty),
            Expected::Kind(kind) => write!(f, "{}", kind),
        }
    }
}
