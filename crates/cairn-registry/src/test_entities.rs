//! Minimal entities for exercising the registry.

use cairn_hooks::{Hook, HookError, Hooked};
use cairn_merge::{merge_string, visit_set, Merge, Visit};
use cairn_types::{Key, KeyBuilder, StringSet};
use serde::{Deserialize, Serialize};

use crate::model::Entity;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Gauge {
    pub key: Key,
    pub labels: Vec<String>,
    pub name: String,
    pub note: String,
    pub tags: Option<StringSet>,
}

impl Hooked for Gauge {
    fn hooks(&self) -> Vec<Hook<Self>> {
        vec![
            Hook::new("key", |p: &mut Gauge| {
                if p.name.is_empty() {
                    return Err(HookError::missing("name"));
                }
                p.key = KeyBuilder::new("gauge").segment(&p.name).build();
                Ok(())
            }),
            Hook::new("labels", |p: &mut Gauge| {
                p.labels = vec!["Gauge".into()];
                Ok(())
            }),
        ]
    }
}

impl Merge for Gauge {
    fn merge(&mut self, update: &Self) {
        merge_string(&mut self.note, &update.note);
    }
}

impl Visit for Gauge {
    fn visit(&mut self, update: &Self) {
        visit_set(&mut self.tags, &update.tags);
    }
}

impl Entity for Gauge {
    const TYPE_NAME: &'static str = "gauge";
    const LABELS: &'static [&'static str] = &["Gauge", "TTL"];

    fn key(&self) -> &Key {
        &self.key
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn valid(&self) -> bool {
        self.key.kind() == Some("gauge") && !self.name.is_empty()
    }

    fn defaulted(&mut self) {
        if self.note.is_empty() {
            self.note = "defaulted".into();
        }
    }
}

/// A different concrete type claiming the name `gauge`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GaugeImpostor {
    pub key: Key,
}

impl Hooked for GaugeImpostor {
    fn hooks(&self) -> Vec<Hook<Self>> {
        Vec::new()
    }
}

impl Merge for GaugeImpostor {
    fn merge(&mut self, _update: &Self) {}
}

impl Visit for GaugeImpostor {
    fn visit(&mut self, _update: &Self) {}
}

impl Entity for GaugeImpostor {
    const TYPE_NAME: &'static str = "gauge";
    const LABELS: &'static [&'static str] = &[];

    fn key(&self) -> &Key {
        &self.key
    }

    fn labels(&self) -> &[String] {
        &[]
    }

    fn valid(&self) -> bool {
        false
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Beacon {
    pub key: Key,
}

impl Hooked for Beacon {
    fn hooks(&self) -> Vec<Hook<Self>> {
        vec![Hook::new("key", |b: &mut Beacon| {
            b.key = KeyBuilder::new("beacon").segment("fixed").build();
            Ok(())
        })]
    }
}

impl Merge for Beacon {
    fn merge(&mut self, _update: &Self) {}
}

impl Visit for Beacon {
    fn visit(&mut self, _update: &Self) {}
}

impl Entity for Beacon {
    const TYPE_NAME: &'static str = "beacon";
    const LABELS: &'static [&'static str] = &["Beacon"];

    fn key(&self) -> &Key {
        &self.key
    }

    fn labels(&self) -> &[String] {
        &[]
    }

    fn valid(&self) -> bool {
        !self.key.is_empty()
    }
}
