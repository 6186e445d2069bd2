use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Set-valued field. Ordered storage keeps serialization deterministic;
/// callers must not rely on the order for meaning.
pub type StringSet = BTreeSet<String>;

/// Free-form key/value bag attached to an entity.
pub type Properties = BTreeMap<String, String>;

/// Build a [`StringSet`] from anything string-like.
pub fn string_set<I, S>(items: I) -> StringSet
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

/// Where an entity came from.
///
/// Each member distinguishes `None` ("no opinion") from an empty set ("now
/// empty"), which matters when an explicit update replaces the sets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OriginationData {
    /// Capabilities that discovered the entity.
    pub capability: Option<StringSet>,
    /// Attack-surface classification tags.
    pub attack_surface: Option<StringSet>,
    /// Origin classes (e.g. `"cloud"`, `"whois"`).
    pub origins: Option<StringSet>,
}

impl OriginationData {
    /// Origination recorded by a single capability.
    pub fn from_capability(capability: impl Into<String>) -> Self {
        Self {
            capability: Some(string_set([capability.into()])),
            ..Self::default()
        }
    }

    /// Returns `true` if no member carries an opinion.
    pub fn is_unset(&self) -> bool {
        self.capability.is_none() && self.attack_surface.is_none() && self.origins.is_none()
    }
}
