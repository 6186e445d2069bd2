//! Risks: findings attached to an asset.
//!
//! A risk's status is a lifecycle letter (`T`riage, `O`pen, `R`emediated,
//! `D`eleted) followed by a severity letter, e.g. `TH` is a high-severity
//! finding awaiting triage.

use std::fmt;

use cairn_hooks::{run_hooks, Hook, HookError, Hooked};
use cairn_merge::{
    adopt_if_empty, merge_lifecycle, merge_properties, merge_set, merge_string, visit_lifecycle,
    visit_set, visit_string, LifecyclePolicy, Merge, Visit,
};
use cairn_registry::Entity;
use cairn_types::status::codes;
use cairn_types::{Key, KeyBuilder, Lifecycle, OriginationData, Properties, Status, StringSet};
use serde::{Deserialize, Serialize};

use crate::asset::Asset;
use crate::common::{default_lifecycle, derive_labels, stamp_if_empty, TTL_LABEL};

/// Severity refinement of a risk status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Info => "I",
            Self::Low => "L",
            Self::Medium => "M",
            Self::High => "H",
            Self::Critical => "C",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "I" => Some(Self::Info),
            "L" => Some(Self::Low),
            "M" => Some(Self::Medium),
            "H" => Some(Self::High),
            "C" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Info => "info",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Risk {
    pub key: Key,
    pub labels: Vec<String>,
    /// DNS name of the affected asset.
    pub dns: String,
    /// Finding name, e.g. a CVE or check identifier.
    pub name: String,
    /// Key of the affected asset, when known.
    pub target: Option<Key>,
    pub lifecycle: Lifecycle,
    pub source: String,
    pub created: String,
    pub visited: String,
    pub tags: Option<StringSet>,
    pub origination: OriginationData,
    pub properties: Option<Properties>,
}

impl Risk {
    const POLICY: LifecyclePolicy = LifecyclePolicy::RISK;

    /// A finding named `name` against `target`, with the given status.
    pub fn new(
        target: &Asset,
        name: impl Into<String>,
        status: impl Into<Status>,
    ) -> Result<Self, HookError> {
        let mut risk = Self {
            dns: target.dns.clone(),
            name: name.into(),
            target: Some(target.key.clone()),
            lifecycle: Lifecycle::with_status(status),
            ..Self::default()
        };
        risk.defaulted();
        run_hooks(&mut risk)?;
        Ok(risk)
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
        self.labels = derive_labels(&["Risk"], self.lifecycle.ttl);
    }

    /// Severity encoded in the status refinement.
    pub fn severity(&self) -> Option<Severity> {
        Severity::from_code(self.lifecycle.status.refinement())
    }
}

impl Hooked for Risk {
    fn hooks(&self) -> Vec<Hook<Self>> {
        vec![
            Hook::new("key", |r: &mut Risk| {
                if r.dns.is_empty() {
                    return Err(HookError::missing("dns"));
                }
                if r.name.is_empty() {
                    return Err(HookError::missing("name"));
                }
                r.key = KeyBuilder::new(Risk::TYPE_NAME)
                    .segment(&r.dns)
                    .truncatable(&r.name)
                    .build();
                Ok(())
            }),
            Hook::new("labels", |r: &mut Risk| {
                r.relabel();
                Ok(())
            }),
        ]
    }
}

impl Merge for Risk {
    fn merge(&mut self, update: &Self) {
        merge_lifecycle(&mut self.lifecycle, &update.lifecycle, &Self::POLICY);
        merge_string(&mut self.source, &update.source);
        merge_string(&mut self.visited, &update.visited);
        merge_set(&mut self.tags, &update.tags);
        self.origination.merge(&update.origination);
        merge_properties(&mut self.properties, &update.properties);
        self.relabel();
    }
}

impl Visit for Risk {
    fn visit(&mut self, update: &Self) {
        visit_lifecycle(&mut self.lifecycle, &update.lifecycle, &Self::POLICY);
        adopt_if_empty(&mut self.source, &update.source);
        visit_string(&mut self.visited, &update.visited);
        visit_set(&mut self.tags, &update.tags);
        self.origination.visit(&update.origination);
        merge_properties(&mut self.properties, &update.properties);
        if self.target.is_none() {
            self.target.clone_from(&update.target);
        }
        self.relabel();
    }
}

impl Entity for Risk {
    const TYPE_NAME: &'static str = "risk";
    const LABELS: &'static [&'static str] = &["Risk", TTL_LABEL];

    fn key(&self) -> &Key {
        &self.key
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn valid(&self) -> bool {
        self.key.kind() == Some(Self::TYPE_NAME)
            && self.key.segments().len() == 2
            && self.lifecycle.status.is_any(&[
                codes::TRIAGE,
                codes::OPEN,
                codes::REMEDIATED,
                codes::DELETED,
            ])
    }

    fn defaulted(&mut self) {
        let triage_info = format!("{}{}", codes::TRIAGE, Severity::Info.code());
        default_lifecycle(&mut self.lifecycle, &triage_info);
        stamp_if_empty(&mut self.created);
        stamp_if_empty(&mut self.visited);
    }
}
