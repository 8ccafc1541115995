//! Registry tests: one-time initialization, duplicate rejection, and
//! concurrent first use.

use std::cmp::Ordering;
use std::thread;

use fieldtypes::{FieldKind, FieldValue, Payload, Registry, RegistryBuilder, TypeDescriptor};

fn test_new() -> Payload {
    Payload::Boolean(false)
}

static TEST_DESCRIPTOR: TypeDescriptor = TypeDescriptor {
    kind: FieldKind::Boolean,
    name: "boolean",
    pretty_name: "Boolean",
    wire_size: 0,
    new_value: test_new,
    from_literal: None,
    from_string: None,
    from_char_constant: None,
    to_display: None,
    to_literal: None,
    order: None,
    bitwise_and: None,
    contains: None,
    matches: None,
    length: None,
    slice: None,
};

// ==================== Lookup ====================

#[test]
fn every_kind_has_a_descriptor() {
    let registry = Registry::global();
    for kind in FieldKind::ALL {
        assert!(registry.is_registered(kind), "{kind}");
        let descriptor = registry.lookup(kind);
        assert_eq!(descriptor.kind, kind);
        assert_eq!(descriptor.name, kind.name());
    }
}

#[test]
fn wire_sizes_match_the_kinds() {
    let registry = Registry::global();
    assert_eq!(registry.lookup(FieldKind::Uint8).wire_size, 1);
    assert_eq!(registry.lookup(FieldKind::Uint16).wire_size, 2);
    assert_eq!(registry.lookup(FieldKind::Uint32).wire_size, 4);
    assert_eq!(registry.lookup(FieldKind::Uint64).wire_size, 8);
    assert_eq!(registry.lookup(FieldKind::Int32).wire_size, 4);
    assert_eq!(registry.lookup(FieldKind::Ipv4).wire_size, 4);
    // Variable-length kinds advertise no fixed size.
    assert_eq!(registry.lookup(FieldKind::String).wire_size, 0);
    assert_eq!(registry.lookup(FieldKind::Bytes).wire_size, 0);
}

#[test]
fn capability_flags_follow_the_operation_set() {
    let registry = Registry::global();
    let string = registry.lookup(FieldKind::String);
    assert!(string.can_order() && string.can_contains() && string.can_matches());
    assert!(!string.can_bitwise_and());
    let uint = registry.lookup(FieldKind::Uint32);
    assert!(uint.can_order() && uint.can_bitwise_and());
    assert!(!uint.can_contains() && !uint.can_matches() && !uint.can_slice());
    let bytes = registry.lookup(FieldKind::Bytes);
    assert!(bytes.can_contains() && bytes.can_slice());
}

// ==================== Registration ====================

#[test]
fn duplicate_registration_is_rejected() {
    let mut builder = RegistryBuilder::new();
    builder
        .try_register(&TEST_DESCRIPTOR)
        .expect("first registration");
    let err = builder
        .try_register(&TEST_DESCRIPTOR)
        .expect_err("second registration of the same kind");
    assert!(err.to_string().contains("registered twice"), "{err}");
}

// ==================== Initialization barrier ====================

#[test]
fn concurrent_first_use_sees_a_complete_registry() {
    // Race many threads through the one-time build: every thread, including
    // whichever one triggers initialization, must observe every descriptor
    // and get coherent values out of them.
    thread::scope(|scope| {
        for worker in 0..8 {
            scope.spawn(move || {
                for round in 0..100 {
                    for kind in FieldKind::ALL {
                        let descriptor = Registry::global().lookup(kind);
                        assert_eq!(descriptor.kind, kind);
                    }
                    let text = format!("w{worker}r{round}");
                    let a = FieldValue::from_string(FieldKind::String, &text)
                        .expect("from_string");
                    let b = FieldValue::from_string(FieldKind::String, &text)
                        .expect("from_string");
                    assert_eq!(a.order(&b).expect("order"), Ordering::Equal);
                }
            });
        }
    });
}
