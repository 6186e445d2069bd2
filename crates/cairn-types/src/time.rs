//! Wall-clock helpers used for history and visit stamps.

use chrono::{SecondsFormat, Utc};

/// Current time as an RFC 3339 string with second precision (`2024-01-02T03:04:05Z`).
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Current time in seconds since the UNIX epoch.
pub fn now_epoch_secs() -> i64 {
    Utc::now().timestamp()
}
