use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle codes shared by entity families.
///
/// A status is a lifecycle letter optionally followed by a refinement, such
/// as a severity. `"AH"` (active, high) and `"AL"` (active, low) are both
/// members of [`ACTIVE`].
pub mod codes {
    pub const ACTIVE: &str = "A";
    pub const ACTIVE_HIGH: &str = "AH";
    pub const ACTIVE_LOW: &str = "AL";
    pub const PENDING: &str = "P";
    pub const FROZEN: &str = "F";
    pub const FROZEN_REJECTED: &str = "FR";
    pub const DELETED: &str = "D";

    pub const TRIAGE: &str = "T";
    pub const OPEN: &str = "O";
    pub const REMEDIATED: &str = "R";
}

/// Short status code of an entity.
///
/// Membership checks use prefix matching, never equality, so refined
/// sub-states are recognised as members of their parent state.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Status(String);

impl Status {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Compose a lifecycle code with a refinement (`"O"` + `"H"` = `"OH"`).
    pub fn compose(state: &str, refinement: &str) -> Self {
        Self(format!("{state}{refinement}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when no status has been expressed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Prefix membership test. The empty prefix matches nothing.
    pub fn is(&self, state: &str) -> bool {
        !state.is_empty() && self.0.starts_with(state)
    }

    /// Returns `true` if this status is a member of any of `states`.
    pub fn is_any(&self, states: &[&str]) -> bool {
        states.iter().any(|state| self.is(state))
    }

    /// The lifecycle code: the first character, or empty.
    pub fn state(&self) -> &str {
        match self.0.chars().next() {
            Some(c) => &self.0[..c.len_utf8()],
            None => "",
        }
    }

    /// Everything after the lifecycle code.
    pub fn refinement(&self) -> &str {
        &self.0[self.state().len()..]
    }

    /// Returns `true` if moving from `self` to `next` changes the lifecycle
    /// code, as opposed to only relabelling the refinement.
    pub fn is_transition_to(&self, next: &Status) -> bool {
        self.state() != next.state()
    }
}

impl fmt::Debug for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Status({})", self.0)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Status {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}
