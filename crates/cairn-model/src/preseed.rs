//! Preseeds: raw registration facts (WHOIS contacts, TLS subjects, and the
//! like) that may later be promoted to assets.

use cairn_hooks::{run_hooks, Hook, HookError, Hooked};
use cairn_merge::{
    merge_lifecycle, merge_properties, merge_string, visit_lifecycle, visit_string,
    LifecyclePolicy, Merge, Visit,
};
use cairn_registry::Entity;
use cairn_types::status::codes;
use cairn_types::{Key, KeyBuilder, Lifecycle, OriginationData, Properties, Status};
use serde::{Deserialize, Serialize};

use crate::common::{default_lifecycle, derive_labels, stamp_if_empty, TTL_LABEL};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preseed {
    pub key: Key,
    pub labels: Vec<String>,
    /// Fact family, e.g. `whois` or `tlscert`.
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    /// The fact itself. Arbitrarily long; shortened in the key when needed.
    pub value: String,
    pub display: String,
    pub lifecycle: Lifecycle,
    pub created: String,
    pub visited: String,
    pub origination: OriginationData,
    pub metadata: Option<Properties>,
}

impl Preseed {
    const POLICY: LifecyclePolicy = LifecyclePolicy::ASSET;

    pub fn new(
        kind: impl Into<String>,
        title: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, HookError> {
        let mut preseed = Self {
            kind: kind.into(),
            title: title.into(),
            value: value.into(),
            ..Self::default()
        };
        preseed.defaulted();
        run_hooks(&mut preseed)?;
        Ok(preseed)
    }

    pub fn with_status(&self, status: impl Into<Status>) -> Self {
        let mut copy = self.clone();
        copy.lifecycle.status = status.into();
        copy
    }

    pub fn is(&self, state: &str) -> bool {
        self.lifecycle.is(state)
    }

    fn relabel(&mut self) {
        self.labels = derive_labels(&["Preseed"], self.lifecycle.ttl);
    }
}

impl Hooked for Preseed {
    fn hooks(&self) -> Vec<Hook<Self>> {
        vec![
            Hook::new("key", |p: &mut Preseed| {
                if p.kind.is_empty() {
                    return Err(HookError::missing("type"));
                }
                if p.value.is_empty() {
                    return Err(HookError::missing("value"));
                }
                p.kind = p.kind.to_lowercase();
                p.key = KeyBuilder::new(Preseed::TYPE_NAME)
                    .segment(&p.kind)
                    .segment(&p.title)
                    .truncatable(&p.value)
                    .build();
                Ok(())
            }),
            Hook::new("labels", |p: &mut Preseed| {
                p.relabel();
                Ok(())
            }),
        ]
    }
}

impl Merge for Preseed {
    fn merge(&mut self, update: &Self) {
        merge_lifecycle(&mut self.lifecycle, &update.lifecycle, &Self::POLICY);
        merge_string(&mut self.display, &update.display);
        merge_string(&mut self.visited, &update.visited);
        self.origination.merge(&update.origination);
        merge_properties(&mut self.metadata, &update.metadata);
        self.relabel();
    }
}

impl Visit for Preseed {
    fn visit(&mut self, update: &Self) {
        visit_lifecycle(&mut self.lifecycle, &update.lifecycle, &Self::POLICY);
        visit_string(&mut self.display, &update.display);
        visit_string(&mut self.visited, &update.visited);
        self.origination.visit(&update.origination);
        merge_properties(&mut self.metadata, &update.metadata);
        self.relabel();
    }
}

impl Entity for Preseed {
    const TYPE_NAME: &'static str = "preseed";
    const LABELS: &'static [&'static str] = &["Preseed", TTL_LABEL];

    fn key(&self) -> &Key {
        &self.key
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn valid(&self) -> bool {
        self.key.kind() == Some(Self::TYPE_NAME)
            && self.key.segments().len() == 3
            && !self.kind.is_empty()
            && !self.value.is_empty()
    }

    fn defaulted(&mut self) {
        default_lifecycle(&mut self.lifecycle, codes::PENDING);
        stamp_if_empty(&mut self.created);
        stamp_if_empty(&mut self.visited);
    }
}
