//! TTL refresh rule.

use cairn_types::Ttl;

/// The reconciled TTL is the update's when it carries one, otherwise the
/// existing one. Only the incoming value is inspected, so an entity whose TTL
/// was never initialised can still acquire one.
pub fn refresh_ttl(existing: &mut Ttl, update: Ttl) {
    if !update.is_unset() {
        *existing = update;
    }
}
