use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::time::now_epoch_secs;

/// Absolute expiry timestamp in seconds since the UNIX epoch.
///
/// Zero is the "no opinion" sentinel: an entity whose expiry policy has not
/// been set yet, or an update that does not want to change the expiry. It
/// never means "expire now".
#[derive(
    Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Ttl(i64);

impl Ttl {
    pub const UNSET: Self = Self(0);

    pub const fn from_epoch_secs(secs: i64) -> Self {
        Self(secs)
    }

    /// An expiry `window` from the current wall-clock time.
    pub fn after(window: Duration) -> Self {
        let window = i64::try_from(window.as_secs()).unwrap_or(i64::MAX);
        Self(now_epoch_secs().saturating_add(window))
    }

    pub const fn epoch_secs(self) -> i64 {
        self.0
    }

    pub const fn is_unset(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the expiry is set and not after `now`.
    pub const fn is_expired_at(self, now: i64) -> bool {
        !self.is_unset() && self.0 <= now
    }
}

impl fmt::Debug for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ttl({})", self.0)
    }
}
