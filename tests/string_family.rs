//! String-family tests: literal round-trips, containment, ordering, char
//! constants, length/slice, and reparse cycles.

use std::cmp::Ordering;

use fieldtypes::{FieldKind, FieldTypeError, FieldValue};
use regex::Regex;

const STRING_KINDS: [FieldKind; 5] = [
    FieldKind::String,
    FieldKind::Stringz,
    FieldKind::UintString,
    FieldKind::StringzPad,
    FieldKind::StringzTrunc,
];

// ==================== Construction ====================

#[test]
fn from_string_takes_text_verbatim() {
    let v = FieldValue::from_string(FieldKind::String, "hello").expect("from_string");
    assert_eq!(v.to_display_text().expect("display"), "hello");
}

#[test]
fn from_literal_unquoted_token_is_verbatim() {
    // An unparsed bare token becomes the string value, including characters
    // that would be special in a quoted literal.
    let v = FieldValue::from_literal(FieldKind::String, "GET", false).expect("from_literal");
    assert_eq!(v.to_display_text().expect("display"), "GET");
}

#[test]
fn from_literal_quoted_token_is_unescaped() {
    let v = FieldValue::from_literal(FieldKind::String, r#""a\tb""#, false).expect("from_literal");
    assert_eq!(v.to_display_text().expect("display"), "a\tb");
}

#[test]
fn from_literal_rejects_malformed_escape() {
    let err = FieldValue::from_literal(FieldKind::String, r#""a\qb""#, false)
        .expect_err("invalid escape must fail");
    assert!(matches!(err, FieldTypeError::ParseFailure(_)));
    assert!(err.to_string().contains("\\q"), "message names the escape: {err}");
}

#[test]
fn from_literal_rejects_unterminated_quote() {
    let err = FieldValue::from_literal(FieldKind::String, "\"abc", false)
        .expect_err("unterminated literal must fail");
    assert!(matches!(err, FieldTypeError::ParseFailure(_)));
}

#[test]
fn all_string_kinds_share_the_operation_set() {
    for kind in STRING_KINDS {
        let v = FieldValue::from_string(kind, "abc").expect("from_string");
        assert_eq!(v.length().expect("length"), 3, "{kind}");
        assert_eq!(v.to_display_text().expect("display"), "abc", "{kind}");
    }
}

// ==================== Char constants ====================

#[test]
fn char_constant_in_byte_range_builds_single_char_string() {
    let v = FieldValue::from_char_constant(FieldKind::String, b'A' as u32).expect("charconst");
    assert_eq!(v.to_display_text().expect("display"), "A");
    assert_eq!(v.length().expect("length"), 1);
}

#[test]
fn char_constant_zero_is_valid() {
    let v = FieldValue::from_char_constant(FieldKind::String, 0).expect("charconst");
    assert_eq!(v.length().expect("length"), 1);
}

#[test]
fn char_constant_above_byte_range_is_a_size_violation() {
    let err = FieldValue::from_char_constant(FieldKind::String, 256)
        .expect_err("256 does not fit a byte");
    assert!(matches!(err, FieldTypeError::SizeViolation(_)));
    assert!(
        err.to_string().contains("too large for a byte value"),
        "unexpected message: {err}"
    );
}

// ==================== Round trips ====================

#[test]
fn literal_text_round_trips_plain_string() {
    let v = FieldValue::from_string(FieldKind::String, "hello world").expect("from_string");
    let text = v.to_filter_literal_text().expect("literal text");
    let back = FieldValue::from_literal(FieldKind::String, &text, false).expect("reparse");
    assert_eq!(v.order(&back).expect("order"), Ordering::Equal);
}

#[test]
fn literal_text_escapes_quotes_and_round_trips() {
    let v = FieldValue::from_string(FieldKind::String, "He said \"hi\"").expect("from_string");
    let text = v.to_filter_literal_text().expect("literal text");
    assert_eq!(text, r#""He said \"hi\"""#);
    let back = FieldValue::from_literal(FieldKind::String, &text, false).expect("reparse");
    assert_eq!(v.order(&back).expect("order"), Ordering::Equal);
}

#[test]
fn literal_text_round_trips_backslashes_and_controls() {
    for original in ["a\\b", "tab\there", "nl\nthere", "quote\"back\\slash", "\x01\x02"] {
        let v = FieldValue::from_string(FieldKind::String, original).expect("from_string");
        let text = v.to_filter_literal_text().expect("literal text");
        let back = FieldValue::from_literal(FieldKind::String, &text, false).expect("reparse");
        assert_eq!(
            v.order(&back).expect("order"),
            Ordering::Equal,
            "round trip failed for {original:?} via {text:?}"
        );
    }
}

// ==================== Containment ====================

#[test]
fn contains_finds_substring() {
    let h = FieldValue::from_string(FieldKind::String, "GET /index.html").expect("haystack");
    let n = FieldValue::from_string(FieldKind::String, "index").expect("needle");
    assert!(h.contains(&n).expect("contains"));
}

#[test]
fn contains_is_false_for_missing_substring() {
    let h = FieldValue::from_string(FieldKind::String, "GET /index.html").expect("haystack");
    let n = FieldValue::from_string(FieldKind::String, "POST").expect("needle");
    assert!(!h.contains(&n).expect("contains"));
}

#[test]
fn contains_empty_needle_is_always_false() {
    // Deliberate divergence from naive substring semantics: an empty needle
    // would otherwise match every haystack.
    for haystack in ["", "a", "hello world"] {
        let h = FieldValue::from_string(FieldKind::String, haystack).expect("haystack");
        let n = FieldValue::from_string(FieldKind::String, "").expect("needle");
        assert!(
            !h.contains(&n).expect("contains"),
            "empty needle matched {haystack:?}"
        );
    }
}

#[test]
fn contains_works_across_string_kinds() {
    let h = FieldValue::from_string(FieldKind::Stringz, "abcdef").expect("haystack");
    let n = FieldValue::from_string(FieldKind::String, "cde").expect("needle");
    assert!(h.contains(&n).expect("contains"));
}

// ==================== Regex matching ====================

#[test]
fn matches_with_pattern() {
    let v = FieldValue::from_string(FieldKind::String, "user=admin").expect("value");
    let re = Regex::new(r"^user=\w+$").expect("regex");
    assert!(v.matches_regex(Some(&re)).expect("matches"));
    let re = Regex::new(r"^host=").expect("regex");
    assert!(!v.matches_regex(Some(&re)).expect("matches"));
}

#[test]
fn matches_without_pattern_is_false() {
    let v = FieldValue::from_string(FieldKind::String, "anything").expect("value");
    assert!(!v.matches_regex(None).expect("matches"));
}

// ==================== Ordering ====================

#[test]
fn order_is_bytewise() {
    let a = FieldValue::from_string(FieldKind::String, "abc").expect("a");
    let b = FieldValue::from_string(FieldKind::String, "abd").expect("b");
    assert_eq!(a.order(&b).expect("order"), Ordering::Less);
    assert_eq!(b.order(&a).expect("order"), Ordering::Greater);
    assert_eq!(a.order(&a).expect("order"), Ordering::Equal);
}

#[test]
fn order_is_total_and_transitive_on_samples() {
    let samples = ["", "A", "Z", "a", "ab", "abc", "b", "\x7f"];
    let values: Vec<FieldValue> = samples
        .iter()
        .map(|s| FieldValue::from_string(FieldKind::String, s).expect("value"))
        .collect();
    for x in &values {
        for y in &values {
            let xy = x.order(y).expect("order");
            let yx = y.order(x).expect("order");
            assert_eq!(xy, yx.reverse(), "antisymmetry");
            for z in &values {
                let yz = y.order(z).expect("order");
                let xz = x.order(z).expect("order");
                if xy != Ordering::Greater && yz != Ordering::Greater {
                    assert_ne!(xz, Ordering::Greater, "transitivity");
                }
            }
        }
    }
}

// ==================== Length and slice ====================

#[test]
fn length_counts_bytes() {
    let v = FieldValue::from_string(FieldKind::String, "abc").expect("value");
    assert_eq!(v.length().expect("length"), 3);
}

#[test]
fn slice_extracts_byte_range() {
    let v = FieldValue::from_string(FieldKind::String, "abcdef").expect("value");
    assert_eq!(v.slice(2, 3).expect("slice"), b"cde".to_vec());
}

#[test]
fn slice_appends_to_existing_output() {
    let v = FieldValue::from_string(FieldKind::String, "abcdef").expect("value");
    let mut out = vec![0xff];
    v.slice_into(0, 2, &mut out).expect("slice");
    assert_eq!(out, vec![0xff, b'a', b'b']);
}

#[test]
fn slice_out_of_range_is_an_error() {
    let v = FieldValue::from_string(FieldKind::String, "abcdef").expect("value");
    let err = v.slice(4, 3).expect_err("out of range");
    assert!(matches!(
        err,
        FieldTypeError::SliceOutOfRange {
            offset: 4,
            length: 3,
            available: 6,
        }
    ));
}

// ==================== Reparse cycles ====================

#[test]
fn repeated_reparse_grow_and_shrink() {
    // The container must replace its payload cleanly on every reparse, with
    // no dependence on the previous payload's size.
    let mut v = FieldValue::new(FieldKind::String);
    for round in 0..200usize {
        let text = "x".repeat(round % 17 * 16);
        v.set_from_string(&text).expect("reparse");
        assert_eq!(v.length().expect("length"), text.len(), "round {round}");
        assert_eq!(v.to_display_text().expect("display"), text, "round {round}");
    }
    v.set_from_string("").expect("reparse to empty");
    assert_eq!(v.length().expect("length"), 0);
}

#[test]
fn failed_reparse_leaves_defined_empty_value() {
    let mut v = FieldValue::new(FieldKind::String);
    v.set_from_string("still here").expect("reparse");
    // Drive the descriptor op directly so the failing container is
    // observable: a failed parse must leave the defined-empty payload, never
    // the previous value or a partial one.
    let from_literal = v.descriptor().from_literal.expect("string supports from_literal");
    let err = from_literal(&mut v, "\"bad\\q\"", false).expect_err("malformed literal");
    assert!(matches!(err, FieldTypeError::ParseFailure(_)));
    assert_eq!(v.to_display_text().expect("display"), "");
    assert_eq!(v.length().expect("length"), 0);
}
