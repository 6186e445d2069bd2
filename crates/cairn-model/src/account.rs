//! Accounts linking a tenant to an integration credential.

use cairn_hooks::{run_hooks, Hook, HookError, Hooked};
use cairn_merge::{
    merge_lifecycle, merge_option, merge_properties, merge_string, visit_lifecycle, visit_string,
    LifecyclePolicy, Merge, Visit,
};
use cairn_registry::Entity;
use cairn_types::status::codes;
use cairn_types::{Key, KeyBuilder, Lifecycle, Properties, Status};
use serde::{Deserialize, Serialize};

use crate::common::stamp_if_empty;

/// An account never expires and has no terminal status.
const POLICY: LifecyclePolicy = LifecyclePolicy::new(codes::PENDING, &[]);

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    pub key: Key,
    pub labels: Vec<String>,
    /// Owning tenant.
    pub name: String,
    /// Linked party: a user, or an integration name.
    pub member: String,
    /// Integration-specific identifier, e.g. a cloud account id.
    pub value: String,
    pub lifecycle: Lifecycle,
    pub created: String,
    pub updated: String,
    pub settings: Option<Properties>,
    /// Credential material. Only ever replaced wholesale.
    pub secret: Option<Properties>,
}

impl Account {
    pub fn new(
        name: impl Into<String>,
        member: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, HookError> {
        let mut account = Self {
            name: name.into(),
            member: member.into(),
            value: value.into(),
            ..Self::default()
        };
        account.defaulted();
        run_hooks(&mut account)?;
        Ok(account)
    }

    pub fn with_status(&self, status: impl Into<Status>) -> Self {
        let mut copy = self.clone();
        copy.lifecycle.status = status.into();
        copy
    }

    pub fn is(&self, state: &str) -> bool {
        self.lifecycle.is(state)
    }
}

impl Hooked for Account {
    fn hooks(&self) -> Vec<Hook<Self>> {
        vec![
            Hook::new("key", |a: &mut Account| {
                if a.name.is_empty() {
                    return Err(HookError::missing("name"));
                }
                if a.member.is_empty() {
                    return Err(HookError::missing("member"));
                }
                a.key = KeyBuilder::new(Account::TYPE_NAME)
                    .segment(&a.name)
                    .segment(&a.member)
                    .truncatable(&a.value)
                    .build();
                Ok(())
            }),
            Hook::new("labels", |a: &mut Account| {
                a.labels = vec!["Account".to_string()];
                Ok(())
            }),
        ]
    }
}

impl Merge for Account {
    fn merge(&mut self, update: &Self) {
        merge_lifecycle(&mut self.lifecycle, &update.lifecycle, &POLICY);
        merge_string(&mut self.updated, &update.updated);
        merge_properties(&mut self.settings, &update.settings);
        merge_option(&mut self.secret, &update.secret);
    }
}

impl Visit for Account {
    fn visit(&mut self, update: &Self) {
        visit_lifecycle(&mut self.lifecycle, &update.lifecycle, &POLICY);
        visit_string(&mut self.updated, &update.updated);
        merge_properties(&mut self.settings, &update.settings);
        merge_option(&mut self.secret, &update.secret);
    }
}

impl Entity for Account {
    const TYPE_NAME: &'static str = "account";
    const LABELS: &'static [&'static str] = &["Account"];

    fn key(&self) -> &Key {
        &self.key
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn valid(&self) -> bool {
        self.key.kind() == Some(Self::TYPE_NAME)
            && self.key.segments().len() == 3
            && !self.name.is_empty()
            && !self.member.is_empty()
    }

    fn defaulted(&mut self) {
        if self.lifecycle.status.is_empty() {
            self.lifecycle.status = Status::new(codes::ACTIVE);
        }
        stamp_if_empty(&mut self.created);
        stamp_if_empty(&mut self.updated);
    }
}
