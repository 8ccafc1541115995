//! # fieldtypes — field-value type system for a protocol analyzer
//!
//! A runtime type system that lets protocol decoders describe arbitrary
//! binary fields (integers of varying width and signedness, strings, byte
//! blobs, addresses) through one uniform value representation, so that a
//! protocol-agnostic filter evaluator can compare, match and slice those
//! values without knowing the concrete wire type in advance.
//!
//! ## Pieces
//!
//! - [`FieldKind`]: the closed set of type identifiers
//! - [`FieldValue`]: a tagged container owning one decoded payload
//! - [`TypeDescriptor`]: the per-kind behavior table (function pointers)
//! - [`Registry`]: process-wide kind → descriptor mapping, built once at
//!   startup and immutable afterwards
//! - [`literal`]: filter-literal token parsing (quoted strings with C-style
//!   escapes, character constants, numbers)
//!
//! ## Boundaries
//!
//! Decoders produce values (`from_string`, the `set_*` family, the
//! `*_from_wire` constructors) and attach them to their field records. The
//! filter evaluator consumes them through the checked facade
//! ([`FieldValue::order`], [`FieldValue::contains`],
//! [`FieldValue::matches_regex`], [`FieldValue::bitwise_and`],
//! [`FieldValue::length`], [`FieldValue::slice`]) after verifying type
//! compatibility, and renders them back to filter text with
//! [`FieldValue::to_filter_literal_text`].
//!
//! ## Example
//!
//! ```
//! use fieldtypes::{FieldKind, FieldValue};
//!
//! let haystack = FieldValue::from_string(FieldKind::String, "He said \"hi\"").unwrap();
//! let literal = haystack.to_filter_literal_text().unwrap();
//! assert_eq!(literal, r#""He said \"hi\"""#);
//!
//! let reparsed = FieldValue::from_literal(FieldKind::String, &literal, false).unwrap();
//! assert_eq!(haystack.order(&reparsed).unwrap(), std::cmp::Ordering::Equal);
//! ```

pub mod descriptor;
pub mod error;
pub mod kind;
pub mod literal;
pub mod registry;
mod types;
pub mod value;

pub use descriptor::TypeDescriptor;
pub use error::FieldTypeError;
pub use kind::FieldKind;
pub use registry::{Registry, RegistryBuilder};
pub use value::{Endianness, FieldValue, Payload};
