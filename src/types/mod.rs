//! Concrete type families.
//!
//! Each family module defines its descriptors as statics and exposes a
//! `register` hook; [`register_all`] wires every family into the registry
//! during the one-time initialization phase.

use crate::registry::RegistryBuilder;

pub(crate) mod boolean;
pub(crate) mod bytes;
pub(crate) mod integer;
pub(crate) mod ipv4;
pub(crate) mod string;

pub(crate) fn register_all(builder: &mut RegistryBuilder) {
    string::register(builder);
    integer::register(builder);
    bytes::register(builder);
    boolean::register(builder);
    ipv4::register(builder);
}
