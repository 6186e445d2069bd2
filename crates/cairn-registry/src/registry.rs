//! In-memory type registry.
//!
//! [`TypeRegistry`] stores one [`TypeDescriptor`] per type name in a
//! `HashMap` behind a single `RwLock`. Registration happens at start-up;
//! afterwards the registry is read-only in practice and lookups only take
//! the read lock for the duration of the map access.

use std::any::{type_name, TypeId};
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{OnceLock, PoisonError, RwLock};

use cairn_labels::LabelRegistry;
use tracing::{debug, error};

use crate::error::{RegistryError, Result};
use crate::model::{Entity, Model};

/// Constructor for the zero value of a registered type.
pub type Factory = fn() -> Box<dyn Model>;

fn zero_value<T: Entity>() -> Box<dyn Model> {
    Box::new(T::default())
}

// ---------------------------------------------------------------------------
// TypeDescriptor
// ---------------------------------------------------------------------------

/// Everything the registry knows about one type.
#[derive(Clone, Copy)]
pub struct TypeDescriptor {
    name: &'static str,
    rust_type: &'static str,
    type_id: TypeId,
    labels: &'static [&'static str],
    factory: Factory,
}

impl TypeDescriptor {
    /// Describe a concrete entity type.
    pub fn of<T: Entity>() -> Self {
        Self {
            name: T::TYPE_NAME,
            rust_type: type_name::<T>(),
            type_id: TypeId::of::<T>(),
            labels: T::LABELS,
            factory: zero_value::<T>,
        }
    }

    /// Registered name (lowercase).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Fully-qualified Rust type name, for diagnostics.
    pub fn rust_type(&self) -> &'static str {
        self.rust_type
    }

    /// Every label the type may report.
    pub fn labels(&self) -> &'static [&'static str] {
        self.labels
    }

    /// Construct a fresh zero value.
    pub fn make(&self) -> Box<dyn Model> {
        (self.factory)()
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("rust_type", &self.rust_type)
            .field("labels", &self.labels)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// TypeRegistry
// ---------------------------------------------------------------------------

/// Catalogue of constructible entity types, keyed by lowercase name.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: RwLock<HashMap<String, TypeDescriptor>>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `descriptor` under its name.
    ///
    /// Registering the same concrete type again is a no-op. A different
    /// concrete type under an existing name returns
    /// [`RegistryError::Conflict`] and leaves the registry unchanged.
    pub fn try_register(&self, descriptor: TypeDescriptor) -> Result<()> {
        let mut types = self.types.write().unwrap_or_else(PoisonError::into_inner);
        match types.entry(descriptor.name.to_lowercase()) {
            Entry::Vacant(slot) => {
                debug!(name = descriptor.name, rust_type = descriptor.rust_type, "registered type");
                slot.insert(descriptor);
                Ok(())
            }
            Entry::Occupied(slot) if slot.get().type_id == descriptor.type_id => Ok(()),
            Entry::Occupied(slot) => Err(RegistryError::Conflict {
                name: descriptor.name.to_string(),
                existing: slot.get().rust_type,
                attempted: descriptor.rust_type,
            }),
        }
    }

    /// Record `descriptor` under its name.
    ///
    /// # Panics
    ///
    /// Panics if a different concrete type already owns the name. Duplicate
    /// names are a build defect and must stop the process at start-up.
    pub fn register(&self, descriptor: TypeDescriptor) {
        if let Err(err) = self.try_register(descriptor) {
            error!(error = %err, "type registration conflict");
            panic!("{err}");
        }
    }

    /// Register the entity type `T`. See [`Self::register`].
    pub fn register_model<T: Entity>(&self) {
        self.register(TypeDescriptor::of::<T>());
    }

    /// A fresh zero value of the type registered under `name`.
    ///
    /// Lookup is case-insensitive. Unknown names return `None`.
    pub fn make_type(&self, name: &str) -> Option<Box<dyn Model>> {
        self.descriptor(name).map(|descriptor| descriptor.make())
    }

    /// The descriptor registered under `name`.
    pub fn descriptor(&self, name: &str) -> Option<TypeDescriptor> {
        let types = self.types.read().unwrap_or_else(PoisonError::into_inner);
        types.get(&name.to_lowercase()).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.descriptor(name).is_some()
    }

    /// Snapshot of every registered type.
    pub fn all_types(&self) -> BTreeMap<String, TypeDescriptor> {
        let types = self.types.read().unwrap_or_else(PoisonError::into_inner);
        types.iter().map(|(k, v)| (k.clone(), *v)).collect()
    }

    /// Every registered name, sorted.
    pub fn names(&self) -> Vec<String> {
        self.all_types().into_keys().collect()
    }

    pub fn len(&self) -> usize {
        self.types.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget every type. Intended for tests.
    pub fn reset(&self) {
        self.types
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Check that every label each registered type may report is present in
    /// `labels`.
    ///
    /// Types are checked in name order and the first missing label is
    /// reported.
    pub fn validate_labels(&self, labels: &LabelRegistry) -> Result<()> {
        for (name, descriptor) in self.all_types() {
            for label in descriptor.labels() {
                if !labels.contains(label) {
                    return Err(RegistryError::UnregisteredLabel {
                        type_name: name,
                        label: (*label).to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

static GLOBAL: OnceLock<TypeRegistry> = OnceLock::new();

/// The process-wide registry. Populate it once at start-up.
pub fn global() -> &'static TypeRegistry {
    GLOBAL.get_or_init(TypeRegistry::new)
}
