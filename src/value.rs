//! The tagged field-value container and its operations.
//!
//! A [`FieldValue`] is one decoded field: a [`FieldKind`] tag plus the payload
//! that tag governs. Decoders create values (from wire bytes or decoded text)
//! and attach them to their output field records; the filter evaluator runs
//! predicates over them through the checked facade here. Payloads are owned
//! buffers released when the container is dropped; nothing is shared between
//! containers or across threads.

use std::cmp::Ordering;

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use regex::Regex;

use crate::descriptor::TypeDescriptor;
use crate::error::FieldTypeError;
use crate::kind::FieldKind;
use crate::registry::Registry;

/// Byte order of multi-byte wire fields. The decoder has already resolved
/// which one applies; this layer never guesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    Big,
    Little,
}

/// Payload storage for one field value.
///
/// Which variant is in use is governed by the container's [`FieldKind`];
/// operations reach the payload only through the descriptor registered for
/// that kind, and return their safe default when the variant is not the one
/// they expect.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    String(String),
    Bytes(Vec<u8>),
    Unsigned(u64),
    Signed(i64),
    Boolean(bool),
    Ipv4 { addr: u32, mask: u32 },
}

/// One decoded field value.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
    kind: FieldKind,
    payload: Payload,
}

impl FieldValue {
    /// Empty container for `kind`, holding the kind's defined-empty payload.
    pub fn new(kind: FieldKind) -> FieldValue {
        let desc = Registry::global().lookup(kind);
        FieldValue {
            kind,
            payload: (desc.new_value)(),
        }
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// The behavior table governing this value.
    pub fn descriptor(&self) -> &'static TypeDescriptor {
        Registry::global().lookup(self.kind)
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Replace the payload. The previous payload is dropped first.
    pub(crate) fn set_payload(&mut self, payload: Payload) {
        self.payload = payload;
    }

    /// Reset to the kind's defined-empty payload. Used by construction ops so
    /// a failed parse never leaves a partially constructed value behind.
    pub(crate) fn reset(&mut self) {
        self.payload = (self.descriptor().new_value)();
    }

    // ---- construction ----------------------------------------------------

    /// Build a value from decoder-produced text.
    pub fn from_string(kind: FieldKind, text: &str) -> Result<FieldValue, FieldTypeError> {
        let mut value = FieldValue::new(kind);
        value.set_from_string(text)?;
        Ok(value)
    }

    /// Build a value from a filter-literal token.
    pub fn from_literal(
        kind: FieldKind,
        token: &str,
        allow_partial: bool,
    ) -> Result<FieldValue, FieldTypeError> {
        let mut value = FieldValue::new(kind);
        let desc = value.descriptor();
        match desc.from_literal {
            Some(op) => op(&mut value, token, allow_partial).map(|_| value),
            None => Err(FieldTypeError::UnsupportedOperation {
                op: "from_literal",
                kind,
            }),
        }
    }

    /// Build a value from a character-constant code point.
    pub fn from_char_constant(
        kind: FieldKind,
        code_point: u32,
    ) -> Result<FieldValue, FieldTypeError> {
        let mut value = FieldValue::new(kind);
        let desc = value.descriptor();
        match desc.from_char_constant {
            Some(op) => op(&mut value, code_point).map(|_| value),
            None => Err(FieldTypeError::UnsupportedOperation {
                op: "from_char_constant",
                kind,
            }),
        }
    }

    /// Re-parse decoder text into an existing container, replacing (and
    /// dropping) whatever payload it held.
    pub fn set_from_string(&mut self, text: &str) -> Result<(), FieldTypeError> {
        match self.descriptor().from_string {
            Some(op) => op(self, text),
            None => Err(FieldTypeError::UnsupportedOperation {
                op: "from_string",
                kind: self.kind,
            }),
        }
    }

    // ---- direct set (producer side) --------------------------------------

    /// Install decoded string content. Valid for string kinds only.
    pub fn set_string(&mut self, text: impl Into<String>) -> Result<(), FieldTypeError> {
        if !self.kind.is_string_like() {
            return Err(self.mismatch(FieldKind::String));
        }
        self.payload = Payload::String(text.into());
        Ok(())
    }

    /// Install a decoded byte blob. Valid for the bytes kind only.
    pub fn set_bytes(&mut self, bytes: Vec<u8>) -> Result<(), FieldTypeError> {
        if self.kind != FieldKind::Bytes {
            return Err(self.mismatch(FieldKind::Bytes));
        }
        self.payload = Payload::Bytes(bytes);
        Ok(())
    }

    /// Install an unsigned integer, checked against the kind's width.
    pub fn set_unsigned(&mut self, value: u64) -> Result<(), FieldTypeError> {
        let max = self
            .kind
            .unsigned_max()
            .ok_or_else(|| self.mismatch(FieldKind::Uint64))?;
        if value > max {
            return Err(FieldTypeError::SizeViolation(format!(
                "{value} too big for {}, maximum {max}",
                self.kind
            )));
        }
        self.payload = Payload::Unsigned(value);
        Ok(())
    }

    /// Install a signed integer, checked against the kind's width.
    pub fn set_signed(&mut self, value: i64) -> Result<(), FieldTypeError> {
        let (min, max) = self
            .kind
            .signed_bounds()
            .ok_or_else(|| self.mismatch(FieldKind::Int64))?;
        if value < min || value > max {
            return Err(FieldTypeError::SizeViolation(format!(
                "{value} out of range for {}, {min}..={max}",
                self.kind
            )));
        }
        self.payload = Payload::Signed(value);
        Ok(())
    }

    pub fn set_bool(&mut self, value: bool) -> Result<(), FieldTypeError> {
        if self.kind != FieldKind::Boolean {
            return Err(self.mismatch(FieldKind::Boolean));
        }
        self.payload = Payload::Boolean(value);
        Ok(())
    }

    /// Install an IPv4 address (host order) with a prefix mask.
    pub fn set_ipv4(&mut self, addr: u32, mask: u32) -> Result<(), FieldTypeError> {
        if self.kind != FieldKind::Ipv4 {
            return Err(self.mismatch(FieldKind::Ipv4));
        }
        self.payload = Payload::Ipv4 { addr, mask };
        Ok(())
    }

    fn mismatch(&self, wanted: FieldKind) -> FieldTypeError {
        FieldTypeError::TypeMismatch {
            left: self.kind,
            right: wanted,
        }
    }

    // ---- wire constructors (producer side) -------------------------------

    /// Build an unsigned integer value from wire bytes. The slice length must
    /// equal the kind's wire size.
    pub fn uint_from_wire(
        kind: FieldKind,
        bytes: &[u8],
        endianness: Endianness,
    ) -> Result<FieldValue, FieldTypeError> {
        if !kind.is_unsigned() {
            return Err(FieldTypeError::UnsupportedOperation {
                op: "uint_from_wire",
                kind,
            });
        }
        let size = Registry::global().lookup(kind).wire_size;
        check_wire_len(kind, size, bytes)?;
        let raw = match endianness {
            Endianness::Big => BigEndian::read_uint(bytes, size),
            Endianness::Little => LittleEndian::read_uint(bytes, size),
        };
        let mut value = FieldValue::new(kind);
        value.set_unsigned(raw)?;
        Ok(value)
    }

    /// Build a signed integer value from wire bytes, sign-extending.
    pub fn int_from_wire(
        kind: FieldKind,
        bytes: &[u8],
        endianness: Endianness,
    ) -> Result<FieldValue, FieldTypeError> {
        if !kind.is_signed() {
            return Err(FieldTypeError::UnsupportedOperation {
                op: "int_from_wire",
                kind,
            });
        }
        let size = Registry::global().lookup(kind).wire_size;
        check_wire_len(kind, size, bytes)?;
        let raw = match endianness {
            Endianness::Big => BigEndian::read_int(bytes, size),
            Endianness::Little => LittleEndian::read_int(bytes, size),
        };
        let mut value = FieldValue::new(kind);
        value.set_signed(raw)?;
        Ok(value)
    }

    /// Build a byte-blob value from wire bytes.
    pub fn bytes_from_wire(bytes: &[u8]) -> FieldValue {
        FieldValue {
            kind: FieldKind::Bytes,
            payload: Payload::Bytes(bytes.to_vec()),
        }
    }

    /// Build an IPv4 value from the 4 network-order bytes of the header.
    pub fn ipv4_from_wire(bytes: &[u8]) -> Result<FieldValue, FieldTypeError> {
        check_wire_len(FieldKind::Ipv4, 4, bytes)?;
        let mut value = FieldValue::new(FieldKind::Ipv4);
        value.set_ipv4(BigEndian::read_u32(bytes), u32::MAX)?;
        Ok(value)
    }

    // ---- textual representation ------------------------------------------

    /// Human-readable rendering.
    pub fn to_display_text(&self) -> Result<String, FieldTypeError> {
        match self.descriptor().to_display {
            Some(op) => Ok(op(self)),
            None => Err(self.unsupported("to_display")),
        }
    }

    /// Round-trippable filter-literal rendering: parsing the result with
    /// [`FieldValue::from_literal`] yields an `order`-equal value.
    pub fn to_filter_literal_text(&self) -> Result<String, FieldTypeError> {
        match self.descriptor().to_literal {
            Some(op) => Ok(op(self)),
            None => Err(self.unsupported("to_literal")),
        }
    }

    // ---- checked predicate facade (evaluator side) -----------------------

    /// Total order against a value of a compatible kind.
    pub fn order(&self, other: &FieldValue) -> Result<Ordering, FieldTypeError> {
        self.check_compatible(other)?;
        match self.descriptor().order {
            Some(op) => Ok(op(self, other)),
            None => Err(self.unsupported("order")),
        }
    }

    /// Substring / sub-sequence test. An empty needle never matches.
    pub fn contains(&self, needle: &FieldValue) -> Result<bool, FieldTypeError> {
        self.check_compatible(needle)?;
        match self.descriptor().contains {
            Some(op) => Ok(op(self, needle)),
            None => Err(self.unsupported("contains")),
        }
    }

    /// Regex match over the value's textual form. An absent pattern yields
    /// `false` rather than an error.
    pub fn matches_regex(&self, pattern: Option<&Regex>) -> Result<bool, FieldTypeError> {
        match self.descriptor().matches {
            Some(op) => Ok(op(self, pattern)),
            None => Err(self.unsupported("matches")),
        }
    }

    /// Bitwise-AND test against a value of a compatible kind.
    pub fn bitwise_and(&self, other: &FieldValue) -> Result<bool, FieldTypeError> {
        self.check_compatible(other)?;
        match self.descriptor().bitwise_and {
            Some(op) => Ok(op(self, other)),
            None => Err(self.unsupported("bitwise_and")),
        }
    }

    // ---- byte-level accessors --------------------------------------------

    /// Element count under the kind's own length semantics.
    pub fn length(&self) -> Result<usize, FieldTypeError> {
        match self.descriptor().length {
            Some(op) => Ok(op(self)),
            None => Err(self.unsupported("length")),
        }
    }

    /// Append `length` raw bytes starting at `offset` into `out`. Out-of-range
    /// requests fail with [`FieldTypeError::SliceOutOfRange`].
    pub fn slice_into(
        &self,
        offset: usize,
        length: usize,
        out: &mut Vec<u8>,
    ) -> Result<(), FieldTypeError> {
        match self.descriptor().slice {
            Some(op) => op(self, offset, length, out),
            None => Err(self.unsupported("slice")),
        }
    }

    /// Convenience wrapper over [`FieldValue::slice_into`].
    pub fn slice(&self, offset: usize, length: usize) -> Result<Vec<u8>, FieldTypeError> {
        let mut out = Vec::with_capacity(length);
        self.slice_into(offset, length, &mut out)?;
        Ok(out)
    }

    fn check_compatible(&self, other: &FieldValue) -> Result<(), FieldTypeError> {
        if self.kind.comparable_with(other.kind) {
            Ok(())
        } else {
            Err(FieldTypeError::TypeMismatch {
                left: self.kind,
                right: other.kind,
            })
        }
    }

    fn unsupported(&self, op: &'static str) -> FieldTypeError {
        FieldTypeError::UnsupportedOperation {
            op,
            kind: self.kind,
        }
    }

    // ---- payload accessors -----------------------------------------------

    pub fn as_str(&self) -> Option<&str> {
        match &self.payload {
            Payload::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match &self.payload {
            Payload::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_unsigned(&self) -> Option<u64> {
        match self.payload {
            Payload::Unsigned(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_signed(&self) -> Option<i64> {
        match self.payload {
            Payload::Signed(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.payload {
            Payload::Boolean(v) => Some(v),
            _ => None,
        }
    }

    /// Address and mask, both host order.
    pub fn as_ipv4(&self) -> Option<(u32, u32)> {
        match self.payload {
            Payload::Ipv4 { addr, mask } => Some((addr, mask)),
            _ => None,
        }
    }
}

fn check_wire_len(kind: FieldKind, size: usize, bytes: &[u8]) -> Result<(), FieldTypeError> {
    if size == 0 || bytes.len() != size {
        return Err(FieldTypeError::ParseFailure(format!(
            "expected {size} wire bytes for {kind}, got {}",
            bytes.len()
        )));
    }
    Ok(())
}
