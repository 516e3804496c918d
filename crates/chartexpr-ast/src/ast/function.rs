//! Built-in function signatures.
//!
//! Declarative parameter and return-type contracts for every function the
//! language knows about. The type checker resolves call arguments against
//! these tables; the constraint checker and the runtime share the method
//! enumerations defined here.
//!
//! # Examples
//!
//! ```
//! # use chartexpr_ast::ast::function;
//! let sig = function::lookup("resample").unwrap();
//! assert_eq!(sig.params.len(), 3);
//! assert_eq!(sig.params[1].name, Some("window"));
//! assert!(!function::is_known("median"));
//! ```

use crate::foundation::{DomainType, Expected, ValueKind, ValueType};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One declared parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub kind: ValueKind,
    /// Name-only parameters must be passed as `name = value`.
    pub name: Option<&'static str>,
    pub optional: bool,
    /// Accepted chart domains; `None` accepts any.
    pub allowed_domains: Option<&'static [DomainType]>,
}

impl ParamSpec {
    pub const fn positional(kind: ValueKind) -> Self {
        Self {
            kind,
            name: None,
            optional: false,
            allowed_domains: None,
        }
    }

    pub const fn named(name: &'static str, kind: ValueKind) -> Self {
        Self {
            kind,
            name: Some(name),
            optional: false,
            allowed_domains: None,
        }
    }

    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub const fn domains(mut self, domains: &'static [DomainType]) -> Self {
        self.allowed_domains = Some(domains);
        self
    }

    /// Whether a chart of `domain` satisfies this parameter.
    pub fn accepts_domain(&self, domain: DomainType) -> bool {
        self.allowed_domains
            .map_or(true, |allowed| allowed.contains(&domain))
    }

    /// Type reported when an argument for this parameter is wrong or missing.
    pub fn expected(&self) -> Expected {
        match (self.kind, self.allowed_domains.and_then(|d| d.first())) {
            (ValueKind::Chart, Some(domain)) => Expected::Type(ValueType::Chart(*domain)),
            (kind, _) => Expected::Kind(kind),
        }
    }
}

/// How a function's result type follows from its argument types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnType {
    /// Same type as the argument at this parameter index.
    SameAs(usize),
    /// Always this type.
    Fixed(ValueType),
}

impl ReturnType {
    pub fn resolve(&self, arg_types: &[ValueType]) -> ValueType {
        match self {
            ReturnType::SameAs(index) => arg_types.get(*index).copied().unwrap_or(ValueType::Unknown),
            ReturnType::Fixed(ty) => *ty,
        }
    }
}

/// Extra bindings visible only while checking one argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgScope {
    pub param: usize,
    pub bindings: &'static [(&'static str, ValueType)],
}

/// Type signature of a built-in function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionSignature {
    pub name: &'static str,
    pub params: &'static [ParamSpec],
    pub arg_scopes: &'static [ArgScope],
    pub returns: ReturnType,
}

impl FunctionSignature {
    /// Position and spec of the parameter called `name`.
    pub fn param_named(&self, name: &str) -> Option<(usize, &'static ParamSpec)> {
        self.params
            .iter()
            .enumerate()
            .find(|(_, p)| p.name == Some(name))
    }

    /// Extra bindings for the argument at `param`, if any.
    pub fn arg_scope(&self, param: usize) -> Option<&'static [(&'static str, ValueType)]> {
        self.arg_scopes
            .iter()
            .find(|scope| scope.param == param)
            .map(|scope| scope.bindings)
    }

    pub fn return_type(&self, arg_types: &[ValueType]) -> ValueType {
        self.returns.resolve(arg_types)
    }
}

const TIME_ONLY: &[DomainType] = &[DomainType::Time];
const TIME_CHART: ParamSpec = ParamSpec::positional(ValueKind::Chart).domains(TIME_ONLY);

/// Every built-in function.
pub static SIGNATURES: &[FunctionSignature] = &[
    FunctionSignature {
        name: "moving_avg",
        params: &[TIME_CHART, ParamSpec::positional(ValueKind::Duration)],
        arg_scopes: &[],
        returns: ReturnType::SameAs(0),
    },
    FunctionSignature {
        name: "shift",
        params: &[TIME_CHART, ParamSpec::positional(ValueKind::Duration)],
        arg_scopes: &[],
        returns: ReturnType::SameAs(0),
    },
    FunctionSignature {
        name: "normalize",
        params: &[TIME_CHART],
        arg_scopes: &[],
        returns: ReturnType::SameAs(0),
    },
    FunctionSignature {
        name: "align",
        params: &[
            TIME_CHART,
            ParamSpec::named("to", ValueKind::Chart).domains(TIME_ONLY),
            ParamSpec::named("method", ValueKind::String).optional(),
        ],
        arg_scopes: &[],
        returns: ReturnType::SameAs(0),
    },
    FunctionSignature {
        name: "resample",
        params: &[
            TIME_CHART,
            ParamSpec::named("window", ValueKind::Duration),
            ParamSpec::named("method", ValueKind::String).optional(),
        ],
        arg_scopes: &[],
        returns: ReturnType::SameAs(0),
    },
    FunctionSignature {
        name: "filter",
        params: &[TIME_CHART, ParamSpec::positional(ValueKind::Boolean)],
        arg_scopes: &[ArgScope {
            param: 1,
            bindings: &[("time", ValueType::Time), ("value", ValueType::Number)],
        }],
        returns: ReturnType::SameAs(0),
    },
    FunctionSignature {
        name: "now",
        params: &[],
        arg_scopes: &[],
        returns: ReturnType::Fixed(ValueType::Time),
    },
];

/// Look up a built-in by name.
pub fn lookup(name: &str) -> Option<&'static FunctionSignature> {
    SIGNATURES.iter().find(|sig| sig.name == name)
}

pub fn is_known(name: &str) -> bool {
    lookup(name).is_some()
}

pub fn all_names() -> impl Iterator<Item = &'static str> {
    SIGNATURES.iter().map(|sig| sig.name)
}

/// A method string outside a function's allowed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown method '{0}'")]
pub struct UnknownMethod(pub String);

/// Neighbor strategy used by `align`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlignMethod {
    Exact,
    Step,
    #[default]
    Linear,
}

impl AlignMethod {
    pub const ALL: &'static [AlignMethod] = &[AlignMethod::Exact, AlignMethod::Step, AlignMethod::Linear];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlignMethod::Exact => "exact",
            AlignMethod::Step => "step",
            AlignMethod::Linear => "linear",
        }
    }
}

impl FromStr for AlignMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|m| m.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

impl fmt::Display for AlignMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bucket aggregation used by `resample`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResampleMethod {
    #[default]
    Mean,
    Sum,
    Last,
}

impl ResampleMethod {
    pub const ALL: &'static [ResampleMethod] = &[ResampleMethod::Mean, ResampleMethod::Sum, ResampleMethod::Last];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResampleMethod::Mean => "mean",
            ResampleMethod::Sum => "sum",
            ResampleMethod::Last => "last",
        }
    }
}

impl FromStr for ResampleMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|m| m.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

impl fmt::Display for ResampleMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
