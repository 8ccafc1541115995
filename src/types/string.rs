//! The character-string type family.
//!
//! Five kinds share one operation set: STRING, STRINGZ, UINT_STRING,
//! STRINGZ_PAD and STRINGZ_TRUNC differ only in how a decoder frames them on
//! the wire. Once decoded, a value is a plain owned string; ordering and
//! containment are byte-wise, never locale-aware.

use std::cmp::Ordering;

use regex::Regex;

use crate::descriptor::TypeDescriptor;
use crate::error::FieldTypeError;
use crate::kind::FieldKind;
use crate::literal;
use crate::registry::RegistryBuilder;
use crate::value::{FieldValue, Payload};

fn new_value() -> Payload {
    Payload::String(String::new())
}

fn val_from_string(fv: &mut FieldValue, text: &str) -> Result<(), FieldTypeError> {
    fv.set_payload(Payload::String(text.to_string()));
    Ok(())
}

fn val_from_literal(
    fv: &mut FieldValue,
    token: &str,
    _allow_partial: bool,
) -> Result<(), FieldTypeError> {
    if token.starts_with('"') {
        match literal::parse_quoted(token) {
            Ok(decoded) => {
                fv.set_payload(Payload::String(decoded));
                Ok(())
            }
            Err(err) => {
                fv.reset();
                Err(err)
            }
        }
    } else {
        // An unquoted token is taken verbatim as the string value.
        fv.set_payload(Payload::String(token.to_string()));
        Ok(())
    }
}

fn val_from_char_constant(fv: &mut FieldValue, code_point: u32) -> Result<(), FieldTypeError> {
    fv.reset();
    if code_point > u8::MAX as u32 {
        return Err(FieldTypeError::SizeViolation(format!(
            "{code_point} is too large for a byte value"
        )));
    }
    fv.set_payload(Payload::String((code_point as u8 as char).to_string()));
    Ok(())
}

fn to_display(fv: &FieldValue) -> String {
    fv.as_str().unwrap_or_default().to_string()
}

fn to_literal(fv: &FieldValue) -> String {
    literal::escape(fv.as_str().unwrap_or_default())
}

fn cmp_order(a: &FieldValue, b: &FieldValue) -> Ordering {
    match (a.as_str(), b.as_str()) {
        (Some(x), Some(y)) => x.as_bytes().cmp(y.as_bytes()),
        _ => Ordering::Equal,
    }
}

fn cmp_contains(haystack: &FieldValue, needle: &FieldValue) -> bool {
    let (Some(h), Some(n)) = (haystack.as_str(), needle.as_str()) else {
        return false;
    };
    // An empty needle never matches: containment means the needle is actually
    // present, not trivially present everywhere.
    if n.is_empty() {
        return false;
    }
    h.contains(n)
}

fn cmp_matches(fv: &FieldValue, pattern: Option<&Regex>) -> bool {
    let Some(regex) = pattern else {
        return false;
    };
    fv.as_str().map(|s| regex.is_match(s)).unwrap_or(false)
}

fn len(fv: &FieldValue) -> usize {
    fv.as_str().map(str::len).unwrap_or(0)
}

fn slice(
    fv: &FieldValue,
    offset: usize,
    length: usize,
    out: &mut Vec<u8>,
) -> Result<(), FieldTypeError> {
    slice_bytes(fv.as_str().map(str::as_bytes).unwrap_or(&[]), offset, length, out)
}

/// Shared bounds-checked extraction over a value's raw byte representation.
pub(crate) fn slice_bytes(
    bytes: &[u8],
    offset: usize,
    length: usize,
    out: &mut Vec<u8>,
) -> Result<(), FieldTypeError> {
    let end = offset
        .checked_add(length)
        .filter(|&end| end <= bytes.len())
        .ok_or(FieldTypeError::SliceOutOfRange {
            offset,
            length,
            available: bytes.len(),
        })?;
    out.extend_from_slice(&bytes[offset..end]);
    Ok(())
}

const fn descriptor(kind: FieldKind, name: &'static str) -> TypeDescriptor {
    TypeDescriptor {
        kind,
        name,
        pretty_name: "Character string",
        wire_size: 0,
        new_value,
        from_literal: Some(val_from_literal),
        from_string: Some(val_from_string),
        from_char_constant: Some(val_from_char_constant),
        to_display: Some(to_display),
        to_literal: Some(to_literal),
        order: Some(cmp_order),
        bitwise_and: None,
        contains: Some(cmp_contains),
        matches: Some(cmp_matches),
        length: Some(len),
        slice: Some(slice),
    }
}

static STRING: TypeDescriptor = descriptor(FieldKind::String, "string");
static STRINGZ: TypeDescriptor = descriptor(FieldKind::Stringz, "stringz");
static UINT_STRING: TypeDescriptor = descriptor(FieldKind::UintString, "uint_string");
static STRINGZ_PAD: TypeDescriptor = descriptor(FieldKind::StringzPad, "stringz_pad");
static STRINGZ_TRUNC: TypeDescriptor = descriptor(FieldKind::StringzTrunc, "stringz_trunc");

pub(crate) fn register(builder: &mut RegistryBuilder) {
    builder.register(&STRING);
    builder.register(&STRINGZ);
    builder.register(&UINT_STRING);
    builder.register(&STRINGZ_PAD);
    builder.register(&STRINGZ_TRUNC);
}
