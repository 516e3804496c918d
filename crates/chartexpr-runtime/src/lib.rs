// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Chart Expression Runtime
//!
//! Evaluates type-checked programs against a snapshot of input charts.
//!
//! - [`value`]: concrete runtime values mirroring the static type lattice
//! - [`series`]: time-series algorithms (moving average, shift, normalize,
//!   align, resample, filter)
//! - [`chart_ops`]: pointwise chart arithmetic and the alignment rule
//! - [`registry`]: runtime implementation of every built-in function
//! - [`eval`]: the tree-walking evaluator and its context
//!
//! The evaluator trusts the type checker. An operand combination the type
//! checker would have rejected is an engine defect and panics with a `BUG:`
//! message; only unknown functions and misaligned chart arithmetic are
//! reported as [`EvaluationError`]s.

/// Report an engine defect and abort the run.
macro_rules! bug {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        tracing::error!(%message, "engine invariant violated");
        panic!("BUG: {}", message)
    }};
}

pub mod chart_ops;
pub mod error;
pub mod eval;
pub mod registry;
pub mod series;
pub mod value;

pub use error::{EvaluationError, MisalignmentReason};
pub use eval::{evaluate, execute_program, EvalContext, Execution};
pub use value::RuntimeValue;
