//! Directed, labelled edges between two keyed entities.
//!
//! A relationship's key is its label followed by every part of the source
//! key and then every part of the target key, so the same pair can carry
//! several relationships as long as their labels differ.

use cairn_hooks::{run_hooks, Hook, HookError, Hooked};
use cairn_merge::{merge_properties, merge_string, visit_string, Merge, Visit};
use cairn_registry::Entity;
use cairn_types::{Key, KeyBuilder, OriginationData, Properties};
use serde::{Deserialize, Serialize};

use crate::common::stamp_if_empty;

pub const DISCOVERED: &str = "DISCOVERED";
pub const HAS_VULNERABILITY: &str = "HAS_VULNERABILITY";
pub const HAS_ATTRIBUTE: &str = "HAS_ATTRIBUTE";
pub const HAS_ACCOUNT: &str = "HAS_ACCOUNT";

/// Every relationship label.
pub const RELATIONSHIP_LABELS: &[&str] =
    &[DISCOVERED, HAS_VULNERABILITY, HAS_ATTRIBUTE, HAS_ACCOUNT];

/// The declared spelling of `label`, matched case-insensitively.
pub fn canonical_label(label: &str) -> Option<&'static str> {
    RELATIONSHIP_LABELS
        .iter()
        .copied()
        .find(|known| known.eq_ignore_ascii_case(label))
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Relationship {
    pub key: Key,
    pub labels: Vec<String>,
    pub label: String,
    pub source: Key,
    pub target: Key,
    pub created: String,
    pub visited: String,
    pub origination: OriginationData,
    pub properties: Option<Properties>,
}

impl Relationship {
    /// An edge `source -[label]-> target` with defaults applied and hooks run.
    pub fn new(label: &str, source: &Key, target: &Key) -> Result<Self, HookError> {
        let mut relationship = Self {
            label: label.to_string(),
            source: source.clone(),
            target: target.clone(),
            ..Self::default()
        };
        relationship.defaulted();
        run_hooks(&mut relationship)?;
        Ok(relationship)
    }
}

impl Hooked for Relationship {
    fn hooks(&self) -> Vec<Hook<Self>> {
        vec![Hook::new("key", |r: &mut Relationship| {
            let label = canonical_label(&r.label).ok_or_else(|| {
                HookError::invalid("label", format!("unknown relationship {:?}", r.label))
            })?;
            if r.source.is_empty() {
                return Err(HookError::missing("source"));
            }
            if r.target.is_empty() {
                return Err(HookError::missing("target"));
            }
            r.label = label.to_string();
            r.labels = vec![label.to_string()];
            r.key = KeyBuilder::new(label).key(&r.source).key(&r.target).build();
            Ok(())
        })]
    }
}

impl Merge for Relationship {
    fn merge(&mut self, update: &Self) {
        merge_string(&mut self.visited, &update.visited);
        self.origination.merge(&update.origination);
        merge_properties(&mut self.properties, &update.properties);
    }
}

impl Visit for Relationship {
    fn visit(&mut self, update: &Self) {
        visit_string(&mut self.visited, &update.visited);
        self.origination.visit(&update.origination);
        merge_properties(&mut self.properties, &update.properties);
    }
}

impl Entity for Relationship {
    const TYPE_NAME: &'static str = "relationship";
    const LABELS: &'static [&'static str] = RELATIONSHIP_LABELS;

    fn key(&self) -> &Key {
        &self.key
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn valid(&self) -> bool {
        canonical_label(&self.label).is_some()
            && self.key.kind() == Some(self.label.to_lowercase().as_str())
            && !self.source.is_empty()
            && !self.target.is_empty()
    }

    fn defaulted(&mut self) {
        stamp_if_empty(&mut self.created);
        stamp_if_empty(&mut self.visited);
    }
}
