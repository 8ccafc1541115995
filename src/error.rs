//! Errors for field-value construction and operation dispatch.

use crate::kind::FieldKind;

/// Errors surfaced by value construction and by the checked operation facade.
///
/// Construction errors leave the container in its defined-empty state, never
/// partially initialized. Dispatch errors (`UnsupportedOperation`,
/// `TypeMismatch`) are what the filter compiler is expected to rule out ahead
/// of time; when they surface at evaluation time anyway, callers should treat
/// the predicate as not matching rather than abort the session.
#[derive(Debug, thiserror::Error)]
pub enum FieldTypeError {
    /// A literal or char constant exceeds the type's representable domain.
    #[error("size violation: {0}")]
    SizeViolation(String),
    /// Literal text cannot be interpreted under the type's grammar.
    #[error("parse failure: {0}")]
    ParseFailure(String),
    /// The requested operation is not defined for this type.
    #[error("operation \"{op}\" is not supported for {kind}")]
    UnsupportedOperation { op: &'static str, kind: FieldKind },
    /// A binary operation was invoked across incompatible type identifiers.
    #[error("type mismatch: {left} is not comparable with {right}")]
    TypeMismatch { left: FieldKind, right: FieldKind },
    /// A byte-range extraction fell outside the value's raw representation.
    #[error("slice out of range: offset {offset} + length {length} exceeds {available} available bytes")]
    SliceOutOfRange {
        offset: usize,
        length: usize,
        available: usize,
    },
}
