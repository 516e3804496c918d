//! Abstract syntax tree.
//!
//! The node set is closed: expressions are [`ExprKind`] variants and
//! statements are [`StatementKind`] variants, so every consumer matches
//! exhaustively. Every node carries the [`Span`](crate::foundation::Span) of
//! the tokens it was built from; composite nodes cover their children.

mod expr;
pub mod function;
mod program;

pub use expr::{BinaryOp, DurationLiteral, DurationUnit, Expr, ExprKind, Literal, UnaryOp};
pub use program::{Program, Statement, StatementKind};
