//! Type registry for Cairn.
//!
//! Generic paths such as decoding a polymorphic payload only know a type
//! name at runtime. The [`TypeRegistry`] maps each name to a constructor for
//! the zero value of its concrete type, so those paths can build an instance
//! and hand it to the hook pipeline or the reconciliation protocol through
//! the object-safe [`Model`] trait.
//!
//! Concrete entity types implement [`Entity`]; a blanket impl turns every
//! `Entity` into a `Model`, so no type hand-writes the dynamic plumbing.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! let types = TypeRegistry::new();
//! types.register_model::<Asset>();
//! let blank = types.make_type("asset").unwrap();
//! assert_eq!(blank.type_name(), "asset");
//! ```

pub mod envelope;
pub mod error;
pub mod model;
pub mod registry;

#[cfg(test)]
mod test_entities;

pub use envelope::Envelope;
pub use error::{RegistryError, Result};
pub use model::{Entity, Model};
pub use registry::{global, TypeDescriptor, TypeRegistry};
