//! Core data model for the chart expression language.
//!
//! This crate is the leaf of the workspace. It holds everything the lexer,
//! parser, type checker and evaluator share:
//!
//! - [`foundation`]: source spans, the static type lattice, scopes, diagnostics
//! - [`chart`]: chart / point / domain values supplied by the caller
//! - [`ast`]: expression and program nodes plus the built-in function table

pub mod ast;
pub mod chart;
pub mod foundation;

pub use ast::{
    BinaryOp, DurationLiteral, DurationUnit, Expr, ExprKind, Literal, Program, Statement,
    StatementKind, UnaryOp,
};
pub use chart::{Chart, ChartMap, Domain, Point, Timestamp};
pub use foundation::{DomainType, Span, ValueKind, ValueType};
