//! Reconciliation engine for Cairn.
//!
//! Two observations of the same logical entity are combined under one of
//! two trust models:
//!
//! - [`Merge`] applies an explicit, caller-driven update. A zero or absent
//!   field in the update means "no opinion"; a present set replaces the
//!   existing one; status transitions and comments are written to the
//!   history log.
//! - [`Visit`] applies an automatic re-discovery. Soft fields advance, set
//!   fields grow by union, a placeholder status never downgrades a concrete
//!   one, and provenance keeps its first writer.
//!
//! Both refresh the TTL from the update only when the update carries one.
//! Neither touches identity fields: the key computed by the hook pipeline is
//! never recomputed here.
//!
//! The functions in this crate are the per-field-group primitives; entity
//! types compose them in their own `Merge`/`Visit` impls.

pub mod error;
pub mod lifecycle;
pub mod locks;
pub mod properties;
pub mod scalar;
pub mod sets;
pub mod ttl;

pub use error::{ReconcileError, Result};
pub use lifecycle::{merge_lifecycle, visit_lifecycle, LifecyclePolicy};
pub use locks::KeyedLocks;
pub use properties::merge_properties;
pub use scalar::{adopt_if_empty, merge_option, merge_string, visit_string};
pub use sets::{merge_set, visit_set};
pub use ttl::refresh_ttl;

/// Explicit, caller-driven reconciliation.
pub trait Merge {
    /// Fold `update` into `self`. Fields the update leaves at their zero
    /// value are untouched.
    fn merge(&mut self, update: &Self);
}

/// Automatic reconciliation on re-discovery.
pub trait Visit {
    /// Fold a fresh observation into `self`.
    fn visit(&mut self, update: &Self);
}
