//! Scalar field rules.

/// Merge rule for text: a non-empty update wins, an empty one is "no opinion".
pub fn merge_string(existing: &mut String, update: &str) {
    if !update.is_empty() && existing.as_str() != update {
        existing.clear();
        existing.push_str(update);
    }
}

/// Visit rule for soft text fields (visited stamps, service names): the
/// fresh observation wins whenever it carries a value.
pub fn visit_string(existing: &mut String, update: &str) {
    merge_string(existing, update);
}

/// Merge rule for optional values: `Some` wins, `None` is "no opinion".
///
/// This is also the rule for tri-state flags, where `Some(false)` is an
/// explicit opinion distinct from `None`.
pub fn merge_option<T: Clone>(existing: &mut Option<T>, update: &Option<T>) {
    if let Some(value) = update {
        *existing = Some(value.clone());
    }
}

/// Provenance rule: the first writer is authoritative. `existing` adopts
/// `update` only while it is still empty.
pub fn adopt_if_empty(existing: &mut String, update: &str) {
    if existing.is_empty() {
        existing.push_str(update);
    }
}
