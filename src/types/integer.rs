//! The integer type families: unsigned, signed, and the character kind.
//!
//! All widths share the parsing and comparison logic; each kind contributes
//! thin wrappers that pin its bounds, the same way the decoders pin wire
//! sizes. The character kind is an unsigned octet with character-constant
//! rendering.

use std::cmp::Ordering;

use crate::descriptor::TypeDescriptor;
use crate::error::FieldTypeError;
use crate::kind::FieldKind;
use crate::literal::{self, Token};
use crate::registry::RegistryBuilder;
use crate::value::{FieldValue, Payload};

fn new_unsigned() -> Payload {
    Payload::Unsigned(0)
}

fn new_signed() -> Payload {
    Payload::Signed(0)
}

// ---- unsigned ------------------------------------------------------------

fn uint_from_text(fv: &mut FieldValue, text: &str, max: u64) -> Result<(), FieldTypeError> {
    let parsed = match literal::classify(text) {
        Ok(Token::Number(number)) => literal::parse_unsigned(&number),
        Ok(Token::CharConst(code_point)) => Ok(code_point as u64),
        Ok(_) => Err(FieldTypeError::ParseFailure(format!(
            "\"{text}\" is not a valid number"
        ))),
        Err(err) => Err(err),
    };
    match parsed {
        Ok(value) if value > max => {
            fv.reset();
            Err(FieldTypeError::SizeViolation(format!(
                "\"{text}\" too big for {}, maximum {max}",
                fv.kind()
            )))
        }
        Ok(value) => {
            fv.set_payload(Payload::Unsigned(value));
            Ok(())
        }
        Err(err) => {
            fv.reset();
            Err(err)
        }
    }
}

fn uint_from_char_constant(fv: &mut FieldValue, code_point: u32, max: u64) -> Result<(), FieldTypeError> {
    fv.reset();
    if code_point as u64 > max {
        return Err(char_constant_overflow(code_point, max, fv.kind()));
    }
    fv.set_payload(Payload::Unsigned(code_point as u64));
    Ok(())
}

fn char_constant_overflow(code_point: u32, max: u64, kind: FieldKind) -> FieldTypeError {
    if max == u8::MAX as u64 {
        FieldTypeError::SizeViolation(format!("{code_point} is too large for a byte value"))
    } else {
        FieldTypeError::SizeViolation(format!(
            "{code_point} is too large for {kind}, maximum {max}"
        ))
    }
}

fn uint_to_display(fv: &FieldValue) -> String {
    fv.as_unsigned().unwrap_or(0).to_string()
}

fn uint_cmp_order(a: &FieldValue, b: &FieldValue) -> Ordering {
    match (a.as_unsigned(), b.as_unsigned()) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => Ordering::Equal,
    }
}

fn uint_bitwise_and(a: &FieldValue, b: &FieldValue) -> bool {
    match (a.as_unsigned(), b.as_unsigned()) {
        (Some(x), Some(y)) => (x & y) != 0,
        _ => false,
    }
}

// ---- signed --------------------------------------------------------------

fn int_from_text(fv: &mut FieldValue, text: &str, min: i64, max: i64) -> Result<(), FieldTypeError> {
    let parsed = match literal::classify(text) {
        Ok(Token::Number(number)) => literal::parse_signed(&number),
        Ok(Token::CharConst(code_point)) => Ok(code_point as i64),
        Ok(_) => Err(FieldTypeError::ParseFailure(format!(
            "\"{text}\" is not a valid number"
        ))),
        Err(err) => Err(err),
    };
    match parsed {
        Ok(value) if value > max => {
            fv.reset();
            Err(FieldTypeError::SizeViolation(format!(
                "\"{text}\" too big for {}, maximum {max}",
                fv.kind()
            )))
        }
        Ok(value) if value < min => {
            fv.reset();
            Err(FieldTypeError::SizeViolation(format!(
                "\"{text}\" too small for {}, minimum {min}",
                fv.kind()
            )))
        }
        Ok(value) => {
            fv.set_payload(Payload::Signed(value));
            Ok(())
        }
        Err(err) => {
            fv.reset();
            Err(err)
        }
    }
}

fn int_from_char_constant(fv: &mut FieldValue, code_point: u32, max: i64) -> Result<(), FieldTypeError> {
    fv.reset();
    if code_point as i64 > max {
        return Err(FieldTypeError::SizeViolation(format!(
            "{code_point} is too large for {}, maximum {max}",
            fv.kind()
        )));
    }
    fv.set_payload(Payload::Signed(code_point as i64));
    Ok(())
}

fn int_to_display(fv: &FieldValue) -> String {
    fv.as_signed().unwrap_or(0).to_string()
}

fn int_cmp_order(a: &FieldValue, b: &FieldValue) -> Ordering {
    match (a.as_signed(), b.as_signed()) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => Ordering::Equal,
    }
}

fn int_bitwise_and(a: &FieldValue, b: &FieldValue) -> bool {
    match (a.as_signed(), b.as_signed()) {
        (Some(x), Some(y)) => (x & y) != 0,
        _ => false,
    }
}

// ---- character kind ------------------------------------------------------

fn char_to_display(fv: &FieldValue) -> String {
    let octet = fv.as_unsigned().unwrap_or(0) as u8;
    match octet {
        b'\'' => "'\\''".to_string(),
        b'\\' => "'\\\\'".to_string(),
        _ if octet.is_ascii_graphic() || octet == b' ' => format!("'{}'", octet as char),
        _ => format!("'\\x{octet:02x}'"),
    }
}

// ---- per-width wrappers --------------------------------------------------

macro_rules! unsigned_ops {
    ($from_literal:ident, $from_string:ident, $from_charconst:ident, $max:expr) => {
        fn $from_literal(
            fv: &mut FieldValue,
            token: &str,
            _allow_partial: bool,
        ) -> Result<(), FieldTypeError> {
            uint_from_text(fv, token, $max)
        }

        fn $from_string(fv: &mut FieldValue, text: &str) -> Result<(), FieldTypeError> {
            uint_from_text(fv, text, $max)
        }

        fn $from_charconst(fv: &mut FieldValue, code_point: u32) -> Result<(), FieldTypeError> {
            uint_from_char_constant(fv, code_point, $max)
        }
    };
}

macro_rules! signed_ops {
    ($from_literal:ident, $from_string:ident, $from_charconst:ident, $min:expr, $max:expr) => {
        fn $from_literal(
            fv: &mut FieldValue,
            token: &str,
            _allow_partial: bool,
        ) -> Result<(), FieldTypeError> {
            int_from_text(fv, token, $min, $max)
        }

        fn $from_string(fv: &mut FieldValue, text: &str) -> Result<(), FieldTypeError> {
            int_from_text(fv, text, $min, $max)
        }

        fn $from_charconst(fv: &mut FieldValue, code_point: u32) -> Result<(), FieldTypeError> {
            int_from_char_constant(fv, code_point, $max)
        }
    };
}

unsigned_ops!(u8_from_literal, u8_from_string, u8_from_charconst, u8::MAX as u64);
unsigned_ops!(u16_from_literal, u16_from_string, u16_from_charconst, u16::MAX as u64);
unsigned_ops!(u32_from_literal, u32_from_string, u32_from_charconst, u32::MAX as u64);
unsigned_ops!(u64_from_literal, u64_from_string, u64_from_charconst, u64::MAX);

signed_ops!(i8_from_literal, i8_from_string, i8_from_charconst, i8::MIN as i64, i8::MAX as i64);
signed_ops!(i16_from_literal, i16_from_string, i16_from_charconst, i16::MIN as i64, i16::MAX as i64);
signed_ops!(i32_from_literal, i32_from_string, i32_from_charconst, i32::MIN as i64, i32::MAX as i64);
signed_ops!(i64_from_literal, i64_from_string, i64_from_charconst, i64::MIN, i64::MAX);

const fn unsigned_descriptor(
    kind: FieldKind,
    name: &'static str,
    pretty_name: &'static str,
    wire_size: usize,
    from_literal: crate::descriptor::FromLiteralFn,
    from_string: crate::descriptor::FromStringFn,
    from_char_constant: crate::descriptor::FromCharConstFn,
    to_display: crate::descriptor::ToTextFn,
) -> TypeDescriptor {
    TypeDescriptor {
        kind,
        name,
        pretty_name,
        wire_size,
        new_value: new_unsigned,
        from_literal: Some(from_literal),
        from_string: Some(from_string),
        from_char_constant: Some(from_char_constant),
        to_display: Some(to_display),
        to_literal: Some(uint_to_display),
        order: Some(uint_cmp_order),
        bitwise_and: Some(uint_bitwise_and),
        contains: None,
        matches: None,
        length: None,
        slice: None,
    }
}

const fn signed_descriptor(
    kind: FieldKind,
    name: &'static str,
    pretty_name: &'static str,
    wire_size: usize,
    from_literal: crate::descriptor::FromLiteralFn,
    from_string: crate::descriptor::FromStringFn,
    from_char_constant: crate::descriptor::FromCharConstFn,
) -> TypeDescriptor {
    TypeDescriptor {
        kind,
        name,
        pretty_name,
        wire_size,
        new_value: new_signed,
        from_literal: Some(from_literal),
        from_string: Some(from_string),
        from_char_constant: Some(from_char_constant),
        to_display: Some(int_to_display),
        to_literal: Some(int_to_display),
        order: Some(int_cmp_order),
        bitwise_and: Some(int_bitwise_and),
        contains: None,
        matches: None,
        length: None,
        slice: None,
    }
}

static CHAR: TypeDescriptor = {
    let mut descriptor = unsigned_descriptor(
        FieldKind::Char,
        "char",
        "Character, 1 byte",
        1,
        u8_from_literal,
        u8_from_string,
        u8_from_charconst,
        char_to_display,
    );
    descriptor.to_literal = Some(char_to_display);
    descriptor
};

static UINT8: TypeDescriptor = unsigned_descriptor(
    FieldKind::Uint8,
    "uint8",
    "Unsigned integer, 1 byte",
    1,
    u8_from_literal,
    u8_from_string,
    u8_from_charconst,
    uint_to_display,
);
static UINT16: TypeDescriptor = unsigned_descriptor(
    FieldKind::Uint16,
    "uint16",
    "Unsigned integer, 2 bytes",
    2,
    u16_from_literal,
    u16_from_string,
    u16_from_charconst,
    uint_to_display,
);
static UINT32: TypeDescriptor = unsigned_descriptor(
    FieldKind::Uint32,
    "uint32",
    "Unsigned integer, 4 bytes",
    4,
    u32_from_literal,
    u32_from_string,
    u32_from_charconst,
    uint_to_display,
);
static UINT64: TypeDescriptor = unsigned_descriptor(
    FieldKind::Uint64,
    "uint64",
    "Unsigned integer, 8 bytes",
    8,
    u64_from_literal,
    u64_from_string,
    u64_from_charconst,
    uint_to_display,
);

static INT8: TypeDescriptor = signed_descriptor(
    FieldKind::Int8,
    "int8",
    "Signed integer, 1 byte",
    1,
    i8_from_literal,
    i8_from_string,
    i8_from_charconst,
);
static INT16: TypeDescriptor = signed_descriptor(
    FieldKind::Int16,
    "int16",
    "Signed integer, 2 bytes",
    2,
    i16_from_literal,
    i16_from_string,
    i16_from_charconst,
);
static INT32: TypeDescriptor = signed_descriptor(
    FieldKind::Int32,
    "int32",
    "Signed integer, 4 bytes",
    4,
    i32_from_literal,
    i32_from_string,
    i32_from_charconst,
);
static INT64: TypeDescriptor = signed_descriptor(
    FieldKind::Int64,
    "int64",
    "Signed integer, 8 bytes",
    8,
    i64_from_literal,
    i64_from_string,
    i64_from_charconst,
);

pub(crate) fn register(builder: &mut RegistryBuilder) {
    builder.register(&CHAR);
    builder.register(&UINT8);
    builder.register(&UINT16);
    builder.register(&UINT32);
    builder.register(&UINT64);
    builder.register(&INT8);
    builder.register(&INT16);
    builder.register(&INT32);
    builder.register(&INT64);
}
