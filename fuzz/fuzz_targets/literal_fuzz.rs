//! Literal fuzz target: feed arbitrary text to token classification and to
//! every kind's from_literal. Parsing must not panic; it returns Ok or a
//! FieldTypeError. Build with: cargo fuzz run literal_fuzz (requires nightly
//! and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let s = match std::str::from_utf8(data) {
        Ok(x) => x,
        Err(_) => return,
    };
    let _ = fieldtypes::literal::classify(s);
    for kind in fieldtypes::FieldKind::ALL {
        if let Ok(value) = fieldtypes::FieldValue::from_literal(kind, s, false) {
            let _ = value.to_filter_literal_text();
        }
    }
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run literal_fuzz");
}
