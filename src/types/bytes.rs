//! The byte-blob type family.
//!
//! Literals are hex octets, either separated (`aa:bb:cc`, `aa-bb`, `aa.bb`)
//! or one contiguous even-length run (`aabbcc`). Display uses the colon form.

use std::cmp::Ordering;

use crate::descriptor::TypeDescriptor;
use crate::error::FieldTypeError;
use crate::kind::FieldKind;
use crate::registry::RegistryBuilder;
use crate::types::string::slice_bytes;
use crate::value::{FieldValue, Payload};

fn new_value() -> Payload {
    Payload::Bytes(Vec::new())
}

fn parse_hex_bytes(text: &str) -> Result<Vec<u8>, FieldTypeError> {
    let bad = || FieldTypeError::ParseFailure(format!("\"{text}\" is not a valid byte string"));
    if text.is_empty() {
        return Err(bad());
    }
    if text.contains([':', '-', '.']) {
        let mut out = Vec::new();
        for group in text.split([':', '-', '.']) {
            if group.is_empty() || group.len() > 2 {
                return Err(bad());
            }
            out.push(u8::from_str_radix(group, 16).map_err(|_| bad())?);
        }
        Ok(out)
    } else {
        if text.len() % 2 != 0 {
            return Err(bad());
        }
        text.as_bytes()
            .chunks(2)
            .map(|pair| {
                let pair = std::str::from_utf8(pair).map_err(|_| bad())?;
                u8::from_str_radix(pair, 16).map_err(|_| bad())
            })
            .collect()
    }
}

fn val_from_text(fv: &mut FieldValue, text: &str) -> Result<(), FieldTypeError> {
    match parse_hex_bytes(text) {
        Ok(bytes) => {
            fv.set_payload(Payload::Bytes(bytes));
            Ok(())
        }
        Err(err) => {
            fv.reset();
            Err(err)
        }
    }
}

fn val_from_literal(
    fv: &mut FieldValue,
    token: &str,
    _allow_partial: bool,
) -> Result<(), FieldTypeError> {
    val_from_text(fv, token)
}

fn val_from_string(fv: &mut FieldValue, text: &str) -> Result<(), FieldTypeError> {
    val_from_text(fv, text)
}

fn val_from_char_constant(fv: &mut FieldValue, code_point: u32) -> Result<(), FieldTypeError> {
    fv.reset();
    if code_point > u8::MAX as u32 {
        return Err(FieldTypeError::SizeViolation(format!(
            "{code_point} is too large for a byte value"
        )));
    }
    fv.set_payload(Payload::Bytes(vec![code_point as u8]));
    Ok(())
}

fn to_display(fv: &FieldValue) -> String {
    let bytes = fv.as_bytes().unwrap_or(&[]);
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(":")
}

fn cmp_order(a: &FieldValue, b: &FieldValue) -> Ordering {
    match (a.as_bytes(), b.as_bytes()) {
        (Some(x), Some(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

fn cmp_contains(haystack: &FieldValue, needle: &FieldValue) -> bool {
    let (Some(h), Some(n)) = (haystack.as_bytes(), needle.as_bytes()) else {
        return false;
    };
    // Same empty-needle rule as the string family.
    if n.is_empty() {
        return false;
    }
    h.windows(n.len()).any(|window| window == n)
}

fn len(fv: &FieldValue) -> usize {
    fv.as_bytes().map(<[u8]>::len).unwrap_or(0)
}

fn slice(
    fv: &FieldValue,
    offset: usize,
    length: usize,
    out: &mut Vec<u8>,
) -> Result<(), FieldTypeError> {
    slice_bytes(fv.as_bytes().unwrap_or(&[]), offset, length, out)
}

static BYTES: TypeDescriptor = TypeDescriptor {
    kind: FieldKind::Bytes,
    name: "bytes",
    pretty_name: "Byte sequence",
    wire_size: 0,
    new_value,
    from_literal: Some(val_from_literal),
    from_string: Some(val_from_string),
    from_char_constant: Some(val_from_char_constant),
    to_display: Some(to_display),
    to_literal: Some(to_display),
    order: Some(cmp_order),
    bitwise_and: None,
    contains: Some(cmp_contains),
    matches: None,
    length: Some(len),
    slice: Some(slice),
};

pub(crate) fn register(builder: &mut RegistryBuilder) {
    builder.register(&BYTES);
}
