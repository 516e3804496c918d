// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Static validation of parsed programs.
//!
//! Two independent passes run over a parsed [`Program`](chartexpr_ast::Program):
//!
//! - [`typing`] infers a [`ValueType`](chartexpr_ast::ValueType) for every
//!   statement and accumulates every type error it finds
//! - [`constraints`] enforces rules a type cannot express (literal windows,
//!   method enumerations) and stops at the first violation

pub mod constraints;
pub mod error;
pub mod typing;

pub use constraints::check_function_constraints;
pub use error::{FunctionError, TypeCheckError};
pub use typing::{input_types, type_check_program, InputTypes, TypeEnvironment, TypingContext};
