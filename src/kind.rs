//! Field type identifiers.

use std::fmt;

/// Identifies the concrete type of a field value.
///
/// The set is closed and known at compile time: a kind is assigned to a field
/// when a protocol is registered and never changes. The kind is the registry
/// lookup key and is stored in every [`FieldValue`](crate::FieldValue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Character string with explicit length.
    String,
    /// Null-terminated character string; the terminator is not part of the value.
    Stringz,
    /// Counted string (length prefix on the wire).
    UintString,
    /// Null-padded character string.
    StringzPad,
    /// Null-truncated character string.
    StringzTrunc,
    /// Single octet displayed as a character constant.
    Char,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Int8,
    Int16,
    Int32,
    Int64,
    Boolean,
    /// Variable-length byte blob.
    Bytes,
    /// IPv4 address, optionally with a prefix mask.
    Ipv4,
}

impl FieldKind {
    /// Number of kinds; sizes the registry table.
    pub const COUNT: usize = 17;

    /// Every kind, in registration order.
    pub const ALL: [FieldKind; Self::COUNT] = [
        FieldKind::String,
        FieldKind::Stringz,
        FieldKind::UintString,
        FieldKind::StringzPad,
        FieldKind::StringzTrunc,
        FieldKind::Char,
        FieldKind::Uint8,
        FieldKind::Uint16,
        FieldKind::Uint32,
        FieldKind::Uint64,
        FieldKind::Int8,
        FieldKind::Int16,
        FieldKind::Int32,
        FieldKind::Int64,
        FieldKind::Boolean,
        FieldKind::Bytes,
        FieldKind::Ipv4,
    ];

    /// Short name used in error messages and field tables.
    pub fn name(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Stringz => "stringz",
            FieldKind::UintString => "uint_string",
            FieldKind::StringzPad => "stringz_pad",
            FieldKind::StringzTrunc => "stringz_trunc",
            FieldKind::Char => "char",
            FieldKind::Uint8 => "uint8",
            FieldKind::Uint16 => "uint16",
            FieldKind::Uint32 => "uint32",
            FieldKind::Uint64 => "uint64",
            FieldKind::Int8 => "int8",
            FieldKind::Int16 => "int16",
            FieldKind::Int32 => "int32",
            FieldKind::Int64 => "int64",
            FieldKind::Boolean => "boolean",
            FieldKind::Bytes => "bytes",
            FieldKind::Ipv4 => "ipv4",
        }
    }

    /// All five string kinds share one operation set; they differ only in how
    /// a decoder frames them on the wire.
    pub fn is_string_like(self) -> bool {
        matches!(
            self,
            FieldKind::String
                | FieldKind::Stringz
                | FieldKind::UintString
                | FieldKind::StringzPad
                | FieldKind::StringzTrunc
        )
    }

    /// Unsigned integer kinds, including the character kind (a single octet).
    pub fn is_unsigned(self) -> bool {
        matches!(
            self,
            FieldKind::Char
                | FieldKind::Uint8
                | FieldKind::Uint16
                | FieldKind::Uint32
                | FieldKind::Uint64
        )
    }

    pub fn is_signed(self) -> bool {
        matches!(
            self,
            FieldKind::Int8 | FieldKind::Int16 | FieldKind::Int32 | FieldKind::Int64
        )
    }

    /// Maximum representable value for unsigned kinds.
    pub fn unsigned_max(self) -> Option<u64> {
        match self {
            FieldKind::Char | FieldKind::Uint8 => Some(u8::MAX as u64),
            FieldKind::Uint16 => Some(u16::MAX as u64),
            FieldKind::Uint32 => Some(u32::MAX as u64),
            FieldKind::Uint64 => Some(u64::MAX),
            _ => None,
        }
    }

    /// Representable range for signed kinds.
    pub fn signed_bounds(self) -> Option<(i64, i64)> {
        match self {
            FieldKind::Int8 => Some((i8::MIN as i64, i8::MAX as i64)),
            FieldKind::Int16 => Some((i16::MIN as i64, i16::MAX as i64)),
            FieldKind::Int32 => Some((i32::MIN as i64, i32::MAX as i64)),
            FieldKind::Int64 => Some((i64::MIN, i64::MAX)),
            _ => None,
        }
    }

    /// Whether binary operations between the two kinds are allowed.
    ///
    /// The filter compiler must check this before emitting a comparison; the
    /// checked facade on [`FieldValue`](crate::FieldValue) re-checks it and
    /// reports [`TypeMismatch`](crate::FieldTypeError::TypeMismatch).
    pub fn comparable_with(self, other: FieldKind) -> bool {
        if self == other {
            return true;
        }
        (self.is_string_like() && other.is_string_like())
            || (self.is_unsigned() && other.is_unsigned())
            || (self.is_signed() && other.is_signed())
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
