//! Status, TTL, and history reconciliation.
//!
//! Any status may move to any other status. What differs per entity family
//! is which status is the low-priority placeholder a re-discovery reports
//! (`Pending` for assets, `Triage` for risks) and which statuses are
//! terminal (`Deleted`, and for risks `Remediated`). Those are captured in a
//! [`LifecyclePolicy`].

use cairn_types::status::codes;
use cairn_types::time::now_rfc3339;
use cairn_types::{HistoryRecord, Lifecycle, Status, Ttl};
use tracing::{debug, warn};

use crate::scalar::merge_string;
use crate::ttl::refresh_ttl;

/// Per-family lifecycle rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LifecyclePolicy {
    /// Status a re-discovery reports when it has nothing new to say.
    pub placeholder: &'static str,
    /// Statuses in which an entity no longer expires.
    pub terminal: &'static [&'static str],
}

impl LifecyclePolicy {
    /// Assets and most discovered records.
    pub const ASSET: Self = Self {
        placeholder: codes::PENDING,
        terminal: &[codes::DELETED],
    };

    /// Findings: a triage re-report never downgrades an open risk, and a
    /// remediated risk is as final as a deleted one.
    pub const RISK: Self = Self {
        placeholder: codes::TRIAGE,
        terminal: &[codes::DELETED, codes::REMEDIATED],
    };

    pub const fn new(placeholder: &'static str, terminal: &'static [&'static str]) -> Self {
        Self {
            placeholder,
            terminal,
        }
    }

    pub fn is_terminal(&self, status: &Status) -> bool {
        status.is_any(self.terminal)
    }

    pub fn is_placeholder(&self, status: &Status) -> bool {
        status.is(self.placeholder)
    }
}

/// Explicit update of status, TTL, and history.
///
/// - A non-empty update status that differs from the existing one is
///   applied. When the lifecycle code changes, a `{from, to, by, comment}`
///   record is appended; a refinement-only change (`AH` to `AL`) is applied
///   without one.
/// - A comment without a transition appends a record with empty
///   `from`/`to`.
/// - Moving into a terminal status clears the TTL whatever the update
///   carried. Otherwise a non-zero update TTL replaces the existing one.
/// - `update.history.remove` deletes that record before anything is
///   appended. Out-of-range indexes are ignored.
pub fn merge_lifecycle(existing: &mut Lifecycle, update: &Lifecycle, policy: &LifecyclePolicy) {
    if let Some(index) = update.history.remove {
        match existing.history.remove_at(index) {
            Some(removed) => {
                debug!(index, comment = %removed.comment, "removed history record");
            }
            None => {
                warn!(index, len = existing.history.len(), "history removal index out of range");
            }
        }
    }

    let previous = existing.status.clone();
    let changed = !update.status.is_empty() && update.status != previous;
    if changed {
        existing.status = update.status.clone();
    }

    if changed && previous.is_transition_to(&existing.status) {
        debug!(from = %previous, to = %existing.status, by = %update.by, "status transition");
        existing.history.push(HistoryRecord {
            from: previous.as_str().to_string(),
            to: existing.status.as_str().to_string(),
            by: update.by.clone(),
            comment: update.comment.clone(),
            updated: now_rfc3339(),
        });
    } else if !update.comment.is_empty() {
        existing.history.push(HistoryRecord {
            by: update.by.clone(),
            comment: update.comment.clone(),
            updated: now_rfc3339(),
            ..HistoryRecord::default()
        });
    }

    merge_string(&mut existing.by, &update.by);
    merge_string(&mut existing.comment, &update.comment);

    if policy.is_terminal(&existing.status) {
        if changed {
            existing.ttl = Ttl::UNSET;
        }
    } else {
        refresh_ttl(&mut existing.ttl, update.ttl);
    }
}

/// Re-discovery update of status and TTL.
///
/// A non-empty update status wins, except that a placeholder status never
/// replaces a concrete one: a scan that only confirms existence cannot
/// downgrade `OH` to `TH`. While the entity itself is still a placeholder
/// (or has no status), a placeholder update is applied, so a rescan can
/// refine `TI` to `TH`. A non-zero update TTL refreshes the expiry window.
/// History is not written on re-discovery.
pub fn visit_lifecycle(existing: &mut Lifecycle, update: &Lifecycle, policy: &LifecyclePolicy) {
    let concrete = !existing.status.is_empty() && !policy.is_placeholder(&existing.status);
    if !update.status.is_empty() && !(concrete && policy.is_placeholder(&update.status)) {
        existing.status = update.status.clone();
    }
    refresh_ttl(&mut existing.ttl, update.ttl);
}
