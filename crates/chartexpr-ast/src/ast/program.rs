use super::expr::Expr;
use crate::foundation::Span;
use serde::{Deserialize, Serialize};

/// A whole program: statements in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub statements: Vec<Statement>,
    pub span: Span,
}

impl Program {
    /// Program covering all of its statements, or a zero-length span when empty.
    pub fn new(statements: Vec<Statement>) -> Self {
        let span = statements
            .iter()
            .map(|s| s.span)
            .reduce(|acc, span| acc.merge(&span))
            .unwrap_or_else(Span::zero);
        Self { statements, span }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub kind: StatementKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StatementKind {
    /// `Name = expr`
    Assignment { name: String, expr: Expr },
    /// A bare expression.
    Expression(Expr),
}

impl Statement {
    pub fn assignment(name: impl Into<String>, expr: Expr, span: Span) -> Self {
        Self {
            kind: StatementKind::Assignment {
                name: name.into(),
                expr,
            },
            span,
        }
    }

    pub fn expression(expr: Expr) -> Self {
        let span = expr.span;
        Self {
            kind: StatementKind::Expression(expr),
            span,
        }
    }

    pub fn expr(&self) -> &Expr {
        match &self.kind {
            StatementKind::Assignment { expr, .. } => expr,
            StatementKind::Expression(expr) => expr,
        }
    }

    /// Name bound by this statement, if it is an assignment.
    pub fn target(&self) -> Option<&str> {
        match &self.kind {
            StatementKind::Assignment { name, .. } => Some(name),
            StatementKind::Expression(_) => None,
        }
    }
}
