use serde::{Deserialize, Serialize};

use crate::history::History;
use crate::status::Status;
use crate::ttl::Ttl;

/// The reconciled state every tracked entity carries: status, expiry, audit
/// log, and the attribution of the most recent change.
///
/// On an update, `by` and `comment` describe who is asking and why; on a
/// stored record they hold the last accepted values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lifecycle {
    pub status: Status,
    pub ttl: Ttl,
    pub history: History,
    pub by: String,
    pub comment: String,
}

impl Lifecycle {
    pub fn with_status(status: impl Into<Status>) -> Self {
        Self {
            status: status.into(),
            ..Self::default()
        }
    }

    /// Prefix membership test on the current status.
    pub fn is(&self, state: &str) -> bool {
        self.status.is(state)
    }
}
