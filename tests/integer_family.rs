//! Integer, character and boolean family tests: bounded literal parsing,
//! ordering across widths, bitwise-and, char constants, wire constructors.

use std::cmp::Ordering;

use fieldtypes::{Endianness, FieldKind, FieldTypeError, FieldValue};

// ==================== Unsigned literals ====================

#[test]
fn parse_decimal_hex_and_octal() {
    let dec = FieldValue::from_literal(FieldKind::Uint32, "4660", false).expect("decimal");
    let hex = FieldValue::from_literal(FieldKind::Uint32, "0x1234", false).expect("hex");
    let oct = FieldValue::from_literal(FieldKind::Uint32, "011064", false).expect("octal");
    assert_eq!(dec.as_unsigned(), Some(4660));
    assert_eq!(dec.order(&hex).expect("order"), Ordering::Equal);
    assert_eq!(dec.order(&oct).expect("order"), Ordering::Equal);
}

#[test]
fn unsigned_rejects_garbage() {
    let err = FieldValue::from_literal(FieldKind::Uint16, "12ab", false).expect_err("garbage");
    assert!(matches!(err, FieldTypeError::ParseFailure(_)));
    assert!(err.to_string().contains("not a valid number"), "{err}");
}

#[test]
fn unsigned_rejects_value_above_width() {
    let err = FieldValue::from_literal(FieldKind::Uint8, "256", false).expect_err("overflow");
    assert!(matches!(err, FieldTypeError::SizeViolation(_)));
    assert!(err.to_string().contains("maximum 255"), "{err}");
}

#[test]
fn unsigned_rejects_negative() {
    let err = FieldValue::from_literal(FieldKind::Uint16, "-5", false).expect_err("negative");
    assert!(matches!(err, FieldTypeError::SizeViolation(_)));
}

#[test]
fn uint64_accepts_full_range() {
    let v = FieldValue::from_literal(FieldKind::Uint64, "18446744073709551615", false)
        .expect("u64 max");
    assert_eq!(v.as_unsigned(), Some(u64::MAX));
}

// ==================== Signed literals ====================

#[test]
fn signed_parses_negative_values() {
    let v = FieldValue::from_literal(FieldKind::Int16, "-32768", false).expect("i16 min");
    assert_eq!(v.as_signed(), Some(-32768));
}

#[test]
fn signed_rejects_out_of_range() {
    let err = FieldValue::from_literal(FieldKind::Int8, "128", false).expect_err("too big");
    assert!(err.to_string().contains("maximum 127"), "{err}");
    let err = FieldValue::from_literal(FieldKind::Int8, "-129", false).expect_err("too small");
    assert!(err.to_string().contains("minimum -128"), "{err}");
}

#[test]
fn signed_order_respects_sign() {
    let neg = FieldValue::from_literal(FieldKind::Int32, "-1", false).expect("neg");
    let pos = FieldValue::from_literal(FieldKind::Int32, "1", false).expect("pos");
    assert_eq!(neg.order(&pos).expect("order"), Ordering::Less);
}

// ==================== Cross-width comparisons ====================

#[test]
fn unsigned_widths_compare_with_each_other() {
    let narrow = FieldValue::from_literal(FieldKind::Uint8, "200", false).expect("u8");
    let wide = FieldValue::from_literal(FieldKind::Uint32, "1000", false).expect("u32");
    assert_eq!(narrow.order(&wide).expect("order"), Ordering::Less);
    assert_eq!(wide.order(&narrow).expect("order"), Ordering::Greater);
}

#[test]
fn signed_and_unsigned_do_not_compare() {
    let s = FieldValue::from_literal(FieldKind::Int32, "1", false).expect("i32");
    let u = FieldValue::from_literal(FieldKind::Uint32, "1", false).expect("u32");
    let err = s.order(&u).expect_err("mismatched families");
    assert!(matches!(err, FieldTypeError::TypeMismatch { .. }));
}

// ==================== Bitwise and ====================

#[test]
fn bitwise_and_tests_for_common_bits() {
    let flags = FieldValue::from_literal(FieldKind::Uint16, "0x0101", false).expect("flags");
    let probe = FieldValue::from_literal(FieldKind::Uint16, "0x0100", false).expect("probe");
    let other = FieldValue::from_literal(FieldKind::Uint16, "0x0022", false).expect("other");
    assert!(flags.bitwise_and(&probe).expect("bitwise_and"));
    assert!(!flags.bitwise_and(&other).expect("bitwise_and"));
}

// ==================== Char constants ====================

#[test]
fn integer_kinds_accept_char_constants() {
    let v = FieldValue::from_char_constant(FieldKind::Uint8, b'A' as u32).expect("charconst");
    assert_eq!(v.as_unsigned(), Some(65));
    let v = FieldValue::from_char_constant(FieldKind::Uint32, 200).expect("charconst");
    assert_eq!(v.as_unsigned(), Some(200));
}

#[test]
fn uint8_char_constant_above_255_fails() {
    let err = FieldValue::from_char_constant(FieldKind::Uint8, 256).expect_err("overflow");
    assert!(err.to_string().contains("too large for a byte value"), "{err}");
}

#[test]
fn int8_char_constant_above_max_fails() {
    let err = FieldValue::from_char_constant(FieldKind::Int8, 200).expect_err("overflow");
    assert!(matches!(err, FieldTypeError::SizeViolation(_)));
}

#[test]
fn char_literal_tokens_parse_into_integers() {
    let v = FieldValue::from_literal(FieldKind::Uint8, "'A'", false).expect("char token");
    assert_eq!(v.as_unsigned(), Some(65));
    let v = FieldValue::from_literal(FieldKind::Uint8, r"'\n'", false).expect("escape token");
    assert_eq!(v.as_unsigned(), Some(10));
    let v = FieldValue::from_literal(FieldKind::Uint8, r"'\x41'", false).expect("hex token");
    assert_eq!(v.as_unsigned(), Some(65));
}

// ==================== Character kind ====================

#[test]
fn char_kind_displays_as_character_constant() {
    let v = FieldValue::from_char_constant(FieldKind::Char, b'A' as u32).expect("charconst");
    assert_eq!(v.to_display_text().expect("display"), "'A'");
    let v = FieldValue::from_char_constant(FieldKind::Char, 9).expect("charconst");
    assert_eq!(v.to_display_text().expect("display"), "'\\x09'");
}

#[test]
fn char_kind_literal_round_trips() {
    let v = FieldValue::from_char_constant(FieldKind::Char, b'Q' as u32).expect("charconst");
    let text = v.to_filter_literal_text().expect("literal text");
    let back = FieldValue::from_literal(FieldKind::Char, &text, false).expect("reparse");
    assert_eq!(v.order(&back).expect("order"), Ordering::Equal);
}

#[test]
fn char_kind_orders_with_unsigned_kinds() {
    let c = FieldValue::from_char_constant(FieldKind::Char, b'a' as u32).expect("char");
    let u = FieldValue::from_literal(FieldKind::Uint8, "97", false).expect("u8");
    assert_eq!(c.order(&u).expect("order"), Ordering::Equal);
}

// ==================== Boolean ====================

#[test]
fn boolean_parses_words_and_numbers() {
    for token in ["true", "TRUE", "1", "42"] {
        let v = FieldValue::from_literal(FieldKind::Boolean, token, false).expect("true form");
        assert_eq!(v.as_bool(), Some(true), "{token}");
    }
    for token in ["false", "False", "0"] {
        let v = FieldValue::from_literal(FieldKind::Boolean, token, false).expect("false form");
        assert_eq!(v.as_bool(), Some(false), "{token}");
    }
}

#[test]
fn boolean_rejects_garbage() {
    let err = FieldValue::from_literal(FieldKind::Boolean, "maybe", false).expect_err("garbage");
    assert!(matches!(err, FieldTypeError::ParseFailure(_)));
}

#[test]
fn boolean_orders_false_before_true() {
    let f = FieldValue::from_literal(FieldKind::Boolean, "0", false).expect("false");
    let t = FieldValue::from_literal(FieldKind::Boolean, "5", false).expect("true");
    assert_eq!(f.order(&t).expect("order"), Ordering::Less);
    assert_eq!(t.order(&t).expect("order"), Ordering::Equal);
}

#[test]
fn boolean_literal_round_trips() {
    let t = FieldValue::from_literal(FieldKind::Boolean, "true", false).expect("true");
    let text = t.to_filter_literal_text().expect("literal text");
    assert_eq!(text, "1");
    let back = FieldValue::from_literal(FieldKind::Boolean, &text, false).expect("reparse");
    assert_eq!(t.order(&back).expect("order"), Ordering::Equal);
}

#[test]
fn boolean_has_no_char_constant_construction() {
    let err = FieldValue::from_char_constant(FieldKind::Boolean, 1).expect_err("unsupported");
    assert!(matches!(err, FieldTypeError::UnsupportedOperation { .. }));
}

// ==================== Direct set ====================

#[test]
fn set_unsigned_checks_width() {
    let mut v = FieldValue::new(FieldKind::Uint8);
    v.set_unsigned(255).expect("fits");
    let err = v.set_unsigned(256).expect_err("overflow");
    assert!(matches!(err, FieldTypeError::SizeViolation(_)));
    // The failed set left the previous payload in place.
    assert_eq!(v.as_unsigned(), Some(255));
}

#[test]
fn set_signed_checks_range() {
    let mut v = FieldValue::new(FieldKind::Int16);
    v.set_signed(-32768).expect("fits");
    assert!(v.set_signed(40000).is_err());
}

// ==================== Wire constructors ====================

#[test]
fn uint_from_wire_respects_endianness() {
    let be = FieldValue::uint_from_wire(FieldKind::Uint16, &[0x12, 0x34], Endianness::Big)
        .expect("big endian");
    let le = FieldValue::uint_from_wire(FieldKind::Uint16, &[0x34, 0x12], Endianness::Little)
        .expect("little endian");
    assert_eq!(be.as_unsigned(), Some(0x1234));
    assert_eq!(be.order(&le).expect("order"), Ordering::Equal);
}

#[test]
fn int_from_wire_sign_extends() {
    let v = FieldValue::int_from_wire(FieldKind::Int16, &[0xff, 0xfe], Endianness::Big)
        .expect("negative");
    assert_eq!(v.as_signed(), Some(-2));
}

#[test]
fn wire_length_must_match_kind() {
    let err = FieldValue::uint_from_wire(FieldKind::Uint32, &[0x01, 0x02], Endianness::Big)
        .expect_err("short read");
    assert!(matches!(err, FieldTypeError::ParseFailure(_)));
}

// ==================== Unsupported operations ====================

#[test]
fn integers_have_no_length_or_slice() {
    let v = FieldValue::from_literal(FieldKind::Uint32, "7", false).expect("value");
    assert!(matches!(
        v.length(),
        Err(FieldTypeError::UnsupportedOperation { .. })
    ));
    assert!(matches!(
        v.slice(0, 1),
        Err(FieldTypeError::UnsupportedOperation { .. })
    ));
}

#[test]
fn integers_have_no_contains() {
    let a = FieldValue::from_literal(FieldKind::Uint32, "7", false).expect("a");
    let b = FieldValue::from_literal(FieldKind::Uint32, "7", false).expect("b");
    assert!(matches!(
        a.contains(&b),
        Err(FieldTypeError::UnsupportedOperation { .. })
    ));
}
