use serde::{Deserialize, Serialize};

/// One audit entry: a status transition, a comment, or both.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryRecord {
    /// Status before the change; empty for comment-only entries.
    pub from: String,
    /// Status after the change; empty for comment-only entries.
    pub to: String,
    /// Who made the change.
    pub by: String,
    pub comment: String,
    /// RFC 3339 time the record was written.
    pub updated: String,
}

impl HistoryRecord {
    /// Returns `true` if this record captures a status transition.
    pub fn is_transition(&self) -> bool {
        !self.from.is_empty() || !self.to.is_empty()
    }
}

/// Append-only audit log of an entity.
///
/// The only structural edit allowed is the explicit removal request carried
/// by an update in [`History::remove`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct History {
    pub records: Vec<HistoryRecord>,
    /// Index of a record to delete, set only on updates.
    pub remove: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: HistoryRecord) {
        self.records.push(record);
    }

    /// Remove the record at `index`, returning it if it existed.
    pub fn remove_at(&mut self, index: usize) -> Option<HistoryRecord> {
        (index < self.records.len()).then(|| self.records.remove(index))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&HistoryRecord> {
        self.records.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryRecord> {
        self.records.iter()
    }
}
