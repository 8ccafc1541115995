//! The IPv4 address type.
//!
//! Literals are dotted quads with an optional `/prefix` mask. Ordering and
//! the bitwise-AND test apply both operands' masks, so `10.0.0.0/8` compares
//! equal to any address inside the block.

use std::cmp::Ordering;

use crate::descriptor::TypeDescriptor;
use crate::error::FieldTypeError;
use crate::kind::FieldKind;
use crate::registry::RegistryBuilder;
use crate::value::{FieldValue, Payload};

fn new_value() -> Payload {
    Payload::Ipv4 {
        addr: 0,
        mask: u32::MAX,
    }
}

fn parse_dotted(text: &str) -> Result<(u32, u32), FieldTypeError> {
    let bad = || FieldTypeError::ParseFailure(format!("\"{text}\" is not a valid IPv4 address"));
    let (host, prefix) = match text.split_once('/') {
        Some((host, prefix)) => (host, Some(prefix)),
        None => (text, None),
    };
    let mut addr: u32 = 0;
    let mut octets = 0;
    for part in host.split('.') {
        if part.is_empty() || part.len() > 3 || octets == 4 {
            return Err(bad());
        }
        let octet: u8 = part.parse().map_err(|_| bad())?;
        addr = (addr << 8) | octet as u32;
        octets += 1;
    }
    if octets != 4 {
        return Err(bad());
    }
    let mask = match prefix {
        None => u32::MAX,
        Some(prefix) => {
            let bits: u32 = prefix.parse().map_err(|_| bad())?;
            if bits > 32 {
                return Err(FieldTypeError::ParseFailure(format!(
                    "prefix length {bits} out of range for an IPv4 address"
                )));
            }
            if bits == 0 {
                0
            } else {
                u32::MAX << (32 - bits)
            }
        }
    };
    Ok((addr, mask))
}

fn val_from_text(fv: &mut FieldValue, text: &str) -> Result<(), FieldTypeError> {
    match parse_dotted(text) {
        Ok((addr, mask)) => {
            fv.set_payload(Payload::Ipv4 { addr, mask });
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
    let (addr, mask) = fv.as_ipv4().unwrap_or((0, u32::MAX));
    let dotted = format!(
        "{}.{}.{}.{}",
        (addr >> 24) & 0xff,
        (addr >> 16) & 0xff,
        (addr >> 8) & 0xff,
        addr & 0xff
    );
    if mask == u32::MAX {
        dotted
    } else {
        format!("{dotted}/{}", mask.leading_ones())
    }
}

fn cmp_order(a: &FieldValue, b: &FieldValue) -> Ordering {
    match (a.as_ipv4(), b.as_ipv4()) {
        (Some((addr_a, mask_a)), Some((addr_b, mask_b))) => {
            let mask = mask_a & mask_b;
            (addr_a & mask).cmp(&(addr_b & mask))
        }
        _ => Ordering::Equal,
    }
}

fn cmp_bitwise_and(a: &FieldValue, b: &FieldValue) -> bool {
    match (a.as_ipv4(), b.as_ipv4()) {
        (Some((addr_a, mask_a)), Some((addr_b, mask_b))) => {
            ((addr_a & mask_a) & (addr_b & mask_b)) != 0
        }
        _ => false,
    }
}

static IPV4: TypeDescriptor = TypeDescriptor {
    kind: FieldKind::Ipv4,
    name: "ipv4",
    pretty_name: "IPv4 address",
    wire_size: 4,
    new_value,
    from_literal: Some(val_from_literal),
    from_string: Some(val_from_string),
    from_char_constant: None,
    to_display: Some(to_display),
    to_literal: Some(to_display),
    order: Some(cmp_order),
    bitwise_and: Some(cmp_bitwise_and),
    contains: None,
    matches: None,
    length: None,
    slice: None,
};

pub(crate) fn register(builder: &mut RegistryBuilder) {
    builder.register(&IPV4);
}
