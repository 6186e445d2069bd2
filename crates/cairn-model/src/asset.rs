//! Assets: the hosts, domains, and addresses discovery jobs find.

use cairn_hooks::{run_hooks, Hook, HookError, Hooked};
use cairn_merge::{
    adopt_if_empty, merge_lifecycle, merge_properties, merge_set, merge_string, visit_lifecycle,
    visit_set, visit_string, LifecyclePolicy, Merge, Visit,
};
use cairn_registry::Entity;
use cairn_types::status::codes;
use cairn_types::{Key, KeyBuilder, Lifecycle, OriginationData, Properties, Status, StringSet};
use serde::{Deserialize, Serialize};

use crate::common::{default_lifecycle, derive_labels, stamp_if_empty};

/// Registration facts gathered about an asset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetMetadata {
    pub asname: String,
    pub asnumber: String,
    pub country: String,
    pub registrar: String,
}

impl Merge for AssetMetadata {
    fn merge(&mut self, update: &Self) {
        merge_string(&mut self.asname, &update.asname);
        merge_string(&mut self.asnumber, &update.asnumber);
        merge_string(&mut self.country, &update.country);
        merge_string(&mut self.registrar, &update.registrar);
    }
}

impl Visit for AssetMetadata {
    fn visit(&mut self, update: &Self) {
        visit_string(&mut self.asname, &update.asname);
        visit_string(&mut self.asnumber, &update.asnumber);
        visit_string(&mut self.country, &update.country);
        visit_string(&mut self.registrar, &update.registrar);
    }
}

/// A discovered asset, identified by its DNS name and a second name
/// (usually an address).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Asset {
    pub key: Key,
    pub labels: Vec<String>,
    pub dns: String,
    pub name: String,
    /// Grouping name, derived from `dns`.
    pub group: String,
    /// Identifier within the group, derived from `name`.
    pub identifier: String,
    pub lifecycle: Lifecycle,
    /// Capability that first reported the asset.
    pub source: String,
    /// Most recently observed service banner.
    pub service: String,
    pub created: String,
    pub visited: String,
    pub tags: Option<StringSet>,
    pub origination: OriginationData,
    pub metadata: AssetMetadata,
    pub properties: Option<Properties>,
}

impl Asset {
    const POLICY: LifecyclePolicy = LifecyclePolicy::ASSET;

    /// A freshly observed asset with defaults applied and hooks run.
    pub fn new(dns: impl Into<String>, name: impl Into<String>) -> Result<Self, HookError> {
        let mut asset = Self {
            dns: dns.into(),
            name: name.into(),
            ..Self::default()
        };
        asset.defaulted();
        run_hooks(&mut asset)?;
        Ok(asset)
    }

    /// A copy carrying `status`, typically used as an explicit update.
    pub fn with_status(&self, status: impl Into<Status>) -> Self {
        let mut copy = self.clone();
        copy.lifecycle.status = status.into();
        copy
    }

    pub fn is(&self, state: &str) -> bool {
        self.lifecycle.is(state)
    }

    fn relabel(&mut self) {
        self.labels = derive_labels(&["Asset"], self.lifecycle.ttl);
    }
}

impl Hooked for Asset {
    fn hooks(&self) -> Vec<Hook<Self>> {
        vec![
            Hook::new("group/identifier", |a: &mut Asset| {
                if a.dns.is_empty() && a.name.is_empty() {
                    return Err(HookError::missing("dns"));
                }
                a.group = if a.dns.is_empty() { a.name.clone() } else { a.dns.clone() };
                a.identifier = if a.name.is_empty() { a.dns.clone() } else { a.name.clone() };
                Ok(())
            }),
            Hook::new("key", |a: &mut Asset| {
                a.key = KeyBuilder::new(Asset::TYPE_NAME)
                    .segment(&a.group)
                    .truncatable(&a.identifier)
                    .build();
                Ok(())
            }),
            Hook::new("labels", |a: &mut Asset| {
                a.relabel();
                Ok(())
            }),
        ]
    }
}

impl Merge for Asset {
    fn merge(&mut self, update: &Self) {
        merge_lifecycle(&mut self.lifecycle, &update.lifecycle, &Self::POLICY);
        merge_string(&mut self.source, &update.source);
        merge_string(&mut self.service, &update.service);
        merge_string(&mut self.visited, &update.visited);
        merge_set(&mut self.tags, &update.tags);
        self.origination.merge(&update.origination);
        self.metadata.merge(&update.metadata);
        merge_properties(&mut self.properties, &update.properties);
        self.relabel();
    }
}

impl Visit for Asset {
    fn visit(&mut self, update: &Self) {
        visit_lifecycle(&mut self.lifecycle, &update.lifecycle, &Self::POLICY);
        adopt_if_empty(&mut self.source, &update.source);
        visit_string(&mut self.service, &update.service);
        visit_string(&mut self.visited, &update.visited);
        visit_set(&mut self.tags, &update.tags);
        self.origination.visit(&update.origination);
        self.metadata.visit(&update.metadata);
        merge_properties(&mut self.properties, &update.properties);
        self.relabel();
    }
}

impl Entity for Asset {
    const TYPE_NAME: &'static str = "asset";
    const LABELS: &'static [&'static str] = &["Asset", crate::common::TTL_LABEL];

    fn key(&self) -> &Key {
        &self.key
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn valid(&self) -> bool {
        self.key.kind() == Some(Self::TYPE_NAME)
            && self.key.segments().len() == 2
            && !self.group.is_empty()
            && !self.identifier.is_empty()
    }

    fn defaulted(&mut self) {
        default_lifecycle(&mut self.lifecycle, codes::ACTIVE);
        stamp_if_empty(&mut self.created);
        stamp_if_empty(&mut self.visited);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cairn_types::{string_set, Ttl};

    #[test]
    fn new_asset_derives_identity() {
        let asset = Asset::new("example.com", "10.0.0.1").unwrap();
        assert_eq!(asset.key.as_str(), "#asset#example.com#10.0.0.1");
        assert_eq!(asset.group, "example.com");
        assert_eq!(asset.identifier, "10.0.0.1");
        assert_eq!(asset.labels, vec!["Asset", "TTL"]);
        assert!(asset.is(codes::ACTIVE));
        assert!(asset.valid());
    }

    #[test]
    fn dns_alone_fills_both_halves() {
        let asset = Asset::new("example.com", "").unwrap();
        assert_eq!(asset.key.as_str(), "#asset#example.com#example.com");
    }

    #[test]
    fn nameless_asset_is_rejected() {
        let err = Asset::new("", "").unwrap_err();
        assert_eq!(err, HookError::missing("dns"));
    }

    #[test]
    fn unset_ttl_drops_ttl_label() {
        let mut asset = Asset {
            dns: "example.com".into(),
            ..Asset::default()
        };
        asset.lifecycle.ttl = Ttl::UNSET;
        run_hooks(&mut asset).unwrap();
        assert_eq!(asset.labels, vec!["Asset"]);
    }

    #[test]
    fn with_status_copies_everything_else() {
        let asset = Asset::new("example.com", "10.0.0.1").unwrap();
        let frozen = asset.with_status(codes::FROZEN);
        assert!(frozen.is(codes::FROZEN));
        assert_eq!(frozen.key, asset.key);
        assert!(asset.is(codes::ACTIVE));
    }

    #[test]
    fn merge_never_touches_identity() {
        let mut existing = Asset::new("example.com", "10.0.0.1").unwrap();
        let update = Asset::new("other.com", "10.9.9.9").unwrap();
        existing.merge(&update);
        assert_eq!(existing.key.as_str(), "#asset#example.com#10.0.0.1");
        assert_eq!(existing.dns, "example.com");
    }

    #[test]
    fn visit_keeps_first_source() {
        let mut existing = Asset::new("example.com", "10.0.0.1").unwrap();
        existing.source = "seed".into();
        let mut update = existing.clone();
        update.source = "portscan".into();
        update.service = "ssh".into();
        existing.visit(&update);
        assert_eq!(existing.source, "seed");
        assert_eq!(existing.service, "ssh");

        existing.merge(&update);
        assert_eq!(existing.source, "portscan");
    }

    #[test]
    fn metadata_merges_per_field() {
        let mut existing = Asset::default();
        existing.metadata.country = "NZ".into();
        let mut update = Asset::default();
        update.metadata.registrar = "registrar.example".into();
        existing.merge(&update);
        assert_eq!(existing.metadata.country, "NZ");
        assert_eq!(existing.metadata.registrar, "registrar.example");
    }

    #[test]
    fn delete_clears_ttl_and_records_history() {
        let mut existing = Asset::new("example.com", "10.0.0.1").unwrap();
        let mut update = existing.with_status(codes::DELETED);
        update.lifecycle.by = "analyst".into();
        existing.merge(&update);
        assert!(existing.is(codes::DELETED));
        assert!(existing.lifecycle.ttl.is_unset());
        let record = existing.lifecycle.history.last().unwrap();
        assert_eq!(record.from, codes::ACTIVE);
        assert_eq!(record.to, codes::DELETED);
        assert_eq!(record.by, "analyst");
        assert_eq!(existing.labels, vec!["Asset"]);
    }

    #[test]
    fn visit_that_sets_a_ttl_restores_the_label() {
        let mut existing = Asset::new("example.com", "10.0.0.1").unwrap();
        existing.lifecycle.ttl = Ttl::UNSET;
        run_hooks(&mut existing).unwrap();
        assert_eq!(existing.labels, vec!["Asset"]);

        let update = Asset {
            lifecycle: Lifecycle {
                ttl: Ttl::from_epoch_secs(500),
                ..Lifecycle::default()
            },
            ..Asset::default()
        };
        existing.visit(&update);
        assert_eq!(existing.lifecycle.ttl, Ttl::from_epoch_secs(500));
        assert_eq!(existing.labels, vec!["Asset", "TTL"]);
    }

    #[test]
    fn tags_follow_set_rules() {
        let mut existing = Asset {
            tags: Some(string_set(["prod"])),
            ..Asset::default()
        };
        let update = Asset {
            tags: Some(string_set(["edge"])),
            ..Asset::default()
        };
        let mut visited = existing.clone();
        visited.visit(&update);
        assert_eq!(visited.tags, Some(string_set(["edge", "prod"])));

        existing.merge(&update);
        assert_eq!(existing.tags, Some(string_set(["edge"])));
    }
}
