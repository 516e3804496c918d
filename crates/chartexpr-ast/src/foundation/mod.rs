//! Foundation types shared by every compiler and runtime stage.

pub mod diagnostic;
pub mod scope;
pub mod span;
pub mod types;

pub use diagnostic::{Diagnostic, ErrorCode};
pub use scope::Scope;
pub use span::{LineIndex, Location, Span};
pub use types::{DomainType, Expected, ValueKind, ValueType};
