//! Helpers shared by the entity types.

use std::time::Duration;

use cairn_types::time::now_rfc3339;
use cairn_types::{Lifecycle, Status, Ttl};

/// Expiry window given to a freshly observed entity.
pub const DEFAULT_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Label carried by every entity that currently has an expiry.
pub const TTL_LABEL: &str = "TTL";

/// `base` labels, plus [`TTL_LABEL`] when `ttl` is set.
///
/// Reconciliation can set or clear the TTL, so every type that derives its
/// labels from it re-derives them at the end of `merge` and `visit` too.
pub(crate) fn derive_labels(base: &[&str], ttl: Ttl) -> Vec<String> {
    let mut labels: Vec<String> = base.iter().map(|l| (*l).to_string()).collect();
    if !ttl.is_unset() {
        labels.push(TTL_LABEL.to_string());
    }
    labels
}

/// Fill an empty timestamp with the current time.
pub(crate) fn stamp_if_empty(field: &mut String) {
    if field.is_empty() {
        *field = now_rfc3339();
    }
}

/// Baseline lifecycle: `status` when none was given, and a fresh expiry
/// window when none was set.
pub(crate) fn default_lifecycle(lifecycle: &mut Lifecycle, status: &str) {
    if lifecycle.status.is_empty() {
        lifecycle.status = Status::new(status);
    }
    if lifecycle.ttl.is_unset() {
        lifecycle.ttl = Ttl::after(DEFAULT_TTL);
    }
}
