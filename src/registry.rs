//! Process-wide registry of type descriptors.
//!
//! The registry maps each [`FieldKind`] to its [`TypeDescriptor`]. It is
//! built exactly once, inside a `LazyLock`, which is the initialization
//! barrier: whichever thread first touches [`Registry::global`] runs the
//! build, every other thread blocks until it finishes, and from then on all
//! reads are unsynchronized and immutable.

use std::sync::LazyLock;

use log::debug;

use crate::descriptor::TypeDescriptor;
use crate::kind::FieldKind;
use crate::types;

static REGISTRY: LazyLock<Registry> = LazyLock::new(|| {
    let mut builder = RegistryBuilder::new();
    types::register_all(&mut builder);
    builder.build()
});

/// Immutable mapping from [`FieldKind`] to its [`TypeDescriptor`].
pub struct Registry {
    table: [Option<&'static TypeDescriptor>; FieldKind::COUNT],
}

impl Registry {
    /// The process-wide registry.
    pub fn global() -> &'static Registry {
        &REGISTRY
    }

    /// Descriptor for `kind`.
    ///
    /// The kind set is closed and every kind is registered at startup, so a
    /// missing descriptor is a programming error and panics.
    pub fn lookup(&self, kind: FieldKind) -> &'static TypeDescriptor {
        match self.table[kind as usize] {
            Some(descriptor) => descriptor,
            None => panic!("field kind {kind} has no registered descriptor"),
        }
    }

    /// Whether `kind` has a descriptor. Startup-time sanity checks only;
    /// regular dispatch goes straight through [`Registry::lookup`].
    pub fn is_registered(&self, kind: FieldKind) -> bool {
        self.table[kind as usize].is_some()
    }
}

/// Two descriptors claimed the same kind. Registration runs once at startup,
/// so this is fatal for the process.
#[derive(Debug, thiserror::Error)]
#[error("descriptor for {0} registered twice")]
pub struct DuplicateRegistration(pub FieldKind);

/// Accumulates descriptors during the one-time initialization phase. Consumed
/// by [`RegistryBuilder::build`]; no registration API survives it.
pub struct RegistryBuilder {
    table: [Option<&'static TypeDescriptor>; FieldKind::COUNT],
}

impl RegistryBuilder {
    pub fn new() -> RegistryBuilder {
        RegistryBuilder {
            table: [None; FieldKind::COUNT],
        }
    }

    /// Register one descriptor under its declared kind.
    pub fn try_register(
        &mut self,
        descriptor: &'static TypeDescriptor,
    ) -> Result<(), DuplicateRegistration> {
        let slot = &mut self.table[descriptor.kind as usize];
        if slot.is_some() {
            return Err(DuplicateRegistration(descriptor.kind));
        }
        *slot = Some(descriptor);
        Ok(())
    }

    /// Register one descriptor, panicking on a duplicate kind.
    pub fn register(&mut self, descriptor: &'static TypeDescriptor) {
        if let Err(err) = self.try_register(descriptor) {
            panic!("{err}");
        }
    }

    pub fn build(self) -> Registry {
        let registered = self.table.iter().filter(|slot| slot.is_some()).count();
        debug!("field-type registry built: {registered} descriptors");
        Registry { table: self.table }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        RegistryBuilder::new()
    }
}
