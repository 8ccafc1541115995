//! Type descriptors: the per-kind behavior table.
//!
//! One immutable [`TypeDescriptor`] exists per [`FieldKind`], built as a
//! `static` in its family module and handed to the registry at startup.
//! Every operation is a plain function pointer over [`FieldValue`]; an absent
//! entry means the operation is unsupported for the kind and the filter
//! compiler must reject expressions requesting it.

use std::cmp::Ordering;

use regex::Regex;

use crate::error::FieldTypeError;
use crate::kind::FieldKind;
use crate::value::{FieldValue, Payload};

/// Produces the kind's defined-empty payload.
pub type NewFn = fn() -> Payload;
/// Parse a filter-literal token into the container. The flag allows partial
/// values for fixed-width byte kinds (needle position of `contains`).
pub type FromLiteralFn = fn(&mut FieldValue, &str, bool) -> Result<(), FieldTypeError>;
/// Install a value from decoder-produced text.
pub type FromStringFn = fn(&mut FieldValue, &str) -> Result<(), FieldTypeError>;
/// Install a value from a character-constant code point.
pub type FromCharConstFn = fn(&mut FieldValue, u32) -> Result<(), FieldTypeError>;
/// Render to text (display or filter-literal form).
pub type ToTextFn = fn(&FieldValue) -> String;
/// Total order over two values of compatible kinds.
pub type OrderFn = fn(&FieldValue, &FieldValue) -> Ordering;
/// Binary predicate over two values of compatible kinds.
pub type PredicateFn = fn(&FieldValue, &FieldValue) -> bool;
/// Regex match; an absent pattern never matches.
pub type MatchesFn = fn(&FieldValue, Option<&Regex>) -> bool;
/// Element count of a variable-length value.
pub type LengthFn = fn(&FieldValue) -> usize;
/// Append `length` raw bytes starting at `offset` into `out`; bounds-checked.
pub type SliceFn = fn(&FieldValue, usize, usize, &mut Vec<u8>) -> Result<(), FieldTypeError>;

/// The behavior table governing one concrete field-value type.
///
/// Created once during registry initialization and never mutated; all other
/// components hold `&'static` references. Payload release needs no entry
/// here: dropping the container releases whatever the payload owns.
#[derive(Debug)]
pub struct TypeDescriptor {
    pub kind: FieldKind,
    pub name: &'static str,
    pub pretty_name: &'static str,
    /// Fixed size on the wire in bytes; 0 for variable-length types.
    pub wire_size: usize,

    pub new_value: NewFn,
    pub from_literal: Option<FromLiteralFn>,
    pub from_string: Option<FromStringFn>,
    pub from_char_constant: Option<FromCharConstFn>,
    pub to_display: Option<ToTextFn>,
    pub to_literal: Option<ToTextFn>,

    pub order: Option<OrderFn>,
    pub bitwise_and: Option<PredicateFn>,
    pub contains: Option<PredicateFn>,
    pub matches: Option<MatchesFn>,

    pub length: Option<LengthFn>,
    pub slice: Option<SliceFn>,
}

impl TypeDescriptor {
    pub fn can_order(&self) -> bool {
        self.order.is_some()
    }

    pub fn can_contains(&self) -> bool {
        self.contains.is_some()
    }

    pub fn can_matches(&self) -> bool {
        self.matches.is_some()
    }

    pub fn can_bitwise_and(&self) -> bool {
        self.bitwise_and.is_some()
    }

    pub fn can_slice(&self) -> bool {
        self.slice.is_some()
    }
}
