//! Reference entity catalogue for Cairn.
//!
//! Every type here implements [`cairn_registry::Entity`], so it can be
//! constructed by name, run through its hooks, and reconciled with Merge
//! and Visit:
//!
//! | Type | Key |
//! |---|---|
//! | [`Asset`] | `#asset#<dns>#<name>` |
//! | [`AwsResource`] | `#awsresource#<account>#<arn>` |
//! | [`Risk`] | `#risk#<dns>#<name>` |
//! | [`Preseed`] | `#preseed#<type>#<title>#<value>` |
//! | [`Account`] | `#account#<name>#<member>#<value>` |
//! | [`Relationship`] | `#<label>` + source key + target key |
//!
//! Call [`register_all`] (or [`init`] for the process-wide registries) once
//! at start-up, before any job constructs an entity.

pub mod account;
pub mod asset;
pub mod cloud;
pub mod common;
pub mod preseed;
pub mod relationship;
pub mod risk;

pub use account::Account;
pub use asset::{Asset, AssetMetadata};
pub use cloud::{Arn, AwsResource, CloudResource};
pub use common::{DEFAULT_TTL, TTL_LABEL};
pub use preseed::Preseed;
pub use relationship::{Relationship, RELATIONSHIP_LABELS};
pub use risk::{Risk, Severity};

use cairn_labels::LabelRegistry;
use cairn_registry::{RegistryError, TypeDescriptor, TypeRegistry};
use tracing::info;

/// Descriptors for every type in the catalogue.
pub fn descriptors() -> [TypeDescriptor; 6] {
    [
        TypeDescriptor::of::<Asset>(),
        TypeDescriptor::of::<AwsResource>(),
        TypeDescriptor::of::<Risk>(),
        TypeDescriptor::of::<Preseed>(),
        TypeDescriptor::of::<Account>(),
        TypeDescriptor::of::<Relationship>(),
    ]
}

/// Register every catalogue type in `types` and every label those types may
/// report in `labels`, then check the two agree.
///
/// # Panics
///
/// Panics on a type or label conflict, as [`TypeRegistry::register`] and
/// [`LabelRegistry::register`] do.
pub fn register_all(types: &TypeRegistry, labels: &LabelRegistry) -> Result<(), RegistryError> {
    for descriptor in descriptors() {
        labels.register_all(descriptor.labels().iter().copied());
        types.register(descriptor);
    }
    types.validate_labels(labels)?;
    info!(types = types.len(), labels = labels.len(), "entity catalogue registered");
    Ok(())
}

/// [`register_all`] against the process-wide registries.
pub fn init() -> Result<(), RegistryError> {
    register_all(cairn_registry::global(), cairn_labels::global())
}
