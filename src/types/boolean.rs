//! The boolean type family.
//!
//! Literals are `true`/`false` (any case) or a number, where non-zero is
//! true. Values order as `false < true` regardless of which numeric form
//! produced them.

use std::cmp::Ordering;

use crate::descriptor::TypeDescriptor;
use crate::error::FieldTypeError;
use crate::kind::FieldKind;
use crate::literal::{self, Token};
use crate::registry::RegistryBuilder;
use crate::value::{FieldValue, Payload};

fn new_value() -> Payload {
    Payload::Boolean(false)
}

fn val_from_text(fv: &mut FieldValue, text: &str) -> Result<(), FieldTypeError> {
    if text.eq_ignore_ascii_case("true") {
        fv.set_payload(Payload::Boolean(true));
        return Ok(());
    }
    if text.eq_ignore_ascii_case("false") {
        fv.set_payload(Payload::Boolean(false));
        return Ok(());
    }
    let parsed = match literal::classify(text) {
        Ok(Token::Number(number)) => literal::parse_signed(&number),
        Ok(_) => Err(FieldTypeError::ParseFailure(format!(
            "\"{text}\" is not a valid boolean"
        ))),
        Err(err) => Err(err),
    };
    match parsed {
        Ok(value) => {
            fv.set_payload(Payload::Boolean(value != 0));
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

fn to_display(fv: &FieldValue) -> String {
    if fv.as_bool().unwrap_or(false) {
        "true".to_string()
    } else {
        "false".to_string()
    }
}

fn to_literal(fv: &FieldValue) -> String {
    if fv.as_bool().unwrap_or(false) {
        "1".to_string()
    } else {
        "0".to_string()
    }
}

fn cmp_order(a: &FieldValue, b: &FieldValue) -> Ordering {
    match (a.as_bool(), b.as_bool()) {
        (Some(x), Some(y)) => (x as u8).cmp(&(y as u8)),
        _ => Ordering::Equal,
    }
}

static BOOLEAN: TypeDescriptor = TypeDescriptor {
    kind: FieldKind::Boolean,
    name: "boolean",
    pretty_name: "Boolean",
    wire_size: 0,
    new_value,
    from_literal: Some(val_from_literal),
    from_string: Some(val_from_string),
    from_char_constant: None,
    to_display: Some(to_display),
    to_literal: Some(to_literal),
    order: Some(cmp_order),
    bitwise_and: None,
    contains: None,
    matches: None,
    length: None,
    slice: None,
};

pub(crate) fn register(builder: &mut RegistryBuilder) {
    builder.register(&BOOLEAN);
}
