// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Chart Expression Engine
//!
//! Unified entry point for running a chart expression program against a set
//! of input charts. A run goes through four phases in a fixed order and
//! never enters a phase after an earlier one failed:
//!
//! 1. **Parse**: source text to AST; every lex/parse error is reported.
//! 2. **Type check**: every type error is reported.
//! 3. **Function constraints**: the first violation is reported.
//! 4. **Evaluate**: the first evaluation error is reported.
//!
//! # Example
//!
//! ```
//! use chartexpr::{run, ChartMap, RuntimeValue};
//! use chrono::Utc;
//!
//! let result = run("A = 1 + 2 * 3;", &ChartMap::new(), &Utc::now).unwrap();
//! assert_eq!(result.variables["A"], RuntimeValue::Number(7.0));
//! ```

mod engine;
mod failure;

pub use engine::{run, RunSuccess};
pub use failure::{DiagnosticReport, RunFailure};

pub use chartexpr_ast::chart::{CategorySeries, NumericSeries, TimeSeries};
pub use chartexpr_ast::foundation::{Diagnostic, ErrorCode, Location, Span};
pub use chartexpr_ast::{Chart, ChartMap, Domain, DomainType, Point, Program, Timestamp, ValueType};
pub use chartexpr_parser::ParseError;
pub use chartexpr_resolve::{FunctionError, TypeCheckError};
pub use chartexpr_runtime::{EvaluationError, RuntimeValue};
