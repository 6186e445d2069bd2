//! Cloud resources.
//!
//! [`CloudResource`] holds the fields and reconciliation rules every
//! provider shares. Provider types wrap it and delegate to it, adding their
//! own identity parsing and key shape. [`AwsResource`] is the AWS flavour,
//! keyed by account and ARN.

use std::fmt;

use cairn_hooks::{run_hooks, Hook, HookError, Hooked};
use cairn_merge::{
    adopt_if_empty, merge_lifecycle, merge_option, merge_properties, merge_set, merge_string,
    visit_lifecycle, visit_set, visit_string, LifecyclePolicy, Merge, Visit,
};
use cairn_registry::Entity;
use cairn_types::status::codes;
use cairn_types::{Key, KeyBuilder, Lifecycle, OriginationData, Properties, Status, StringSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::common::{default_lifecycle, derive_labels, stamp_if_empty, TTL_LABEL};

// ---------------------------------------------------------------------------
// CloudResource
// ---------------------------------------------------------------------------

/// Provider-independent part of a cloud resource.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudResource {
    pub key: Key,
    pub labels: Vec<String>,
    /// Provider-native identifier (an ARN for AWS).
    pub name: String,
    pub provider: String,
    /// Owning account, derived from `name`.
    pub account_ref: String,
    pub region: String,
    pub resource_type: String,
    pub lifecycle: Lifecycle,
    pub source: String,
    pub created: String,
    pub visited: String,
    pub tags: Option<StringSet>,
    pub origination: OriginationData,
    pub properties: Option<Properties>,
    /// Whether a guardrail policy is enforced on the resource. `None` means
    /// the provider did not say.
    pub enforced: Option<bool>,
}

impl CloudResource {
    const POLICY: LifecyclePolicy = LifecyclePolicy::ASSET;

    pub fn is(&self, state: &str) -> bool {
        self.lifecycle.is(state)
    }

    fn defaulted(&mut self) {
        default_lifecycle(&mut self.lifecycle, codes::ACTIVE);
        stamp_if_empty(&mut self.created);
        stamp_if_empty(&mut self.visited);
    }
}

impl Merge for CloudResource {
    fn merge(&mut self, update: &Self) {
        merge_lifecycle(&mut self.lifecycle, &update.lifecycle, &Self::POLICY);
        merge_string(&mut self.source, &update.source);
        merge_string(&mut self.visited, &update.visited);
        merge_set(&mut self.tags, &update.tags);
        merge_option(&mut self.enforced, &update.enforced);
        self.origination.merge(&update.origination);
        merge_properties(&mut self.properties, &update.properties);
    }
}

impl Visit for CloudResource {
    fn visit(&mut self, update: &Self) {
        visit_lifecycle(&mut self.lifecycle, &update.lifecycle, &Self::POLICY);
        adopt_if_empty(&mut self.source, &update.source);
        visit_string(&mut self.visited, &update.visited);
        visit_set(&mut self.tags, &update.tags);
        merge_option(&mut self.enforced, &update.enforced);
        self.origination.visit(&update.origination);
        merge_properties(&mut self.properties, &update.properties);
    }
}

// ---------------------------------------------------------------------------
// Arn
// ---------------------------------------------------------------------------

/// The parts of an Amazon Resource Name:
/// `arn:<partition>:<service>:<region>:<account>:<resource>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Arn<'a> {
    pub partition: &'a str,
    pub service: &'a str,
    pub region: &'a str,
    pub account: &'a str,
    pub resource: &'a str,
}

impl<'a> Arn<'a> {
    /// Split `raw` into its parts. Region may be empty (global services),
    /// and so may the account (S3 buckets); a present account must be a run
    /// of digits.
    pub fn parse(raw: &'a str) -> Result<Self, HookError> {
        let parts: Vec<&str> = raw.splitn(6, ':').collect();
        let [prefix, partition, service, region, account, resource] = parts[..] else {
            return Err(HookError::invalid("arn", format!("expected 6 fields in {raw:?}")));
        };
        if prefix != "arn" {
            return Err(HookError::invalid("arn", format!("{raw:?} does not start with \"arn\"")));
        }
        if partition.is_empty() || service.is_empty() || resource.is_empty() {
            return Err(HookError::invalid("arn", format!("empty field in {raw:?}")));
        }
        if !account.is_empty() && !is_account_id(account) {
            return Err(HookError::invalid("arn", format!("bad account id in {raw:?}")));
        }
        Ok(Self {
            partition,
            service,
            region,
            account,
            resource,
        })
    }

    /// CloudFormation-style type, e.g. `AWS::EC2::Instance` for
    /// `instance/i-0abc`. Resources without a type prefix map to the
    /// service alone.
    pub fn resource_type(&self) -> String {
        let service = self.service.to_uppercase();
        match self.resource.split_once(['/', ':']) {
            Some((kind, _)) if !kind.is_empty() => format!("AWS::{service}::{}", pascal_case(kind)),
            _ => format!("AWS::{service}"),
        }
    }
}

impl fmt::Display for Arn<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arn:{}:{}:{}:{}:{}",
            self.partition, self.service, self.region, self.account, self.resource
        )
    }
}

fn is_account_id(account: &str) -> bool {
    !account.is_empty() && account.bytes().all(|b| b.is_ascii_digit())
}

fn pascal_case(word: &str) -> String {
    word.split(['-', '_'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// AwsResource
// ---------------------------------------------------------------------------

/// An AWS resource, identified by its ARN.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AwsResource {
    pub base: CloudResource,
}

impl AwsResource {
    pub const PROVIDER: &'static str = "amazon";

    /// A freshly observed resource with defaults applied and hooks run.
    pub fn new(arn: impl Into<String>) -> Result<Self, HookError> {
        let mut resource = Self {
            base: CloudResource {
                name: arn.into(),
                ..CloudResource::default()
            },
        };
        resource.defaulted();
        run_hooks(&mut resource)?;
        Ok(resource)
    }

    /// Like [`AwsResource::new`], for ARNs that do not name their account
    /// (`arn:aws:s3:::bucket`). An account in the ARN itself still wins.
    pub fn with_account(
        account: impl Into<String>,
        arn: impl Into<String>,
    ) -> Result<Self, HookError> {
        let mut resource = Self {
            base: CloudResource {
                name: arn.into(),
                account_ref: account.into(),
                ..CloudResource::default()
            },
        };
        resource.defaulted();
        run_hooks(&mut resource)?;
        Ok(resource)
    }

    pub fn with_status(&self, status: impl Into<Status>) -> Self {
        let mut copy = self.clone();
        copy.base.lifecycle.status = status.into();
        copy
    }

    pub fn arn(&self) -> &str {
        &self.base.name
    }

    pub fn is(&self, state: &str) -> bool {
        self.base.is(state)
    }

    fn relabel(&mut self) {
        let ttl = self.base.lifecycle.ttl;
        self.base.labels = derive_labels(&["AWSResource", "CloudResource"], ttl);
    }
}

impl Hooked for AwsResource {
    fn hooks(&self) -> Vec<Hook<Self>> {
        vec![
            Hook::new("parse arn", |r: &mut AwsResource| {
                let arn = Arn::parse(&r.base.name)?;
                let account = if arn.account.is_empty() {
                    r.base.account_ref.clone()
                } else {
                    arn.account.to_string()
                };
                if account.is_empty() {
                    return Err(HookError::failed(
                        "parse arn",
                        format!("{arn} names no account and none was supplied"),
                    ));
                }
                if !is_account_id(&account) {
                    let reason = format!("{account:?} is not numeric");
                    return Err(HookError::invalid("account_ref", reason));
                }
                let region = arn.region.to_string();
                let resource_type = arn.resource_type();
                debug!(%arn, %account, %resource_type, "parsed arn");
                r.base.provider = AwsResource::PROVIDER.to_string();
                r.base.account_ref = account;
                r.base.region = region;
                r.base.resource_type = resource_type;
                Ok(())
            }),
            Hook::new("key", |r: &mut AwsResource| {
                r.base.key = KeyBuilder::new(AwsResource::TYPE_NAME)
                    .segment(&r.base.account_ref)
                    .truncatable(&r.base.name)
                    .build();
                Ok(())
            }),
            Hook::new("labels", |r: &mut AwsResource| {
                r.relabel();
                Ok(())
            }),
        ]
    }
}

impl Merge for AwsResource {
    fn merge(&mut self, update: &Self) {
        self.base.merge(&update.base);
        self.relabel();
    }
}

impl Visit for AwsResource {
    fn visit(&mut self, update: &Self) {
        self.base.visit(&update.base);
        self.relabel();
    }
}

impl Entity for AwsResource {
    const TYPE_NAME: &'static str = "awsresource";
    const LABELS: &'static [&'static str] = &["AWSResource", "CloudResource", TTL_LABEL];

    fn key(&self) -> &Key {
        &self.base.key
    }

    fn labels(&self) -> &[String] {
        &self.base.labels
    }

    fn valid(&self) -> bool {
        self.base.key.kind() == Some(Self::TYPE_NAME)
            && !self.base.account_ref.is_empty()
            && Arn::parse(&self.base.name).is_ok()
    }

    fn defaulted(&mut self) {
        self.base.defaulted();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INSTANCE: &str = "arn:aws:ec2:us-east-1:123456789012:instance/i-0abc";

    #[test]
    fn arn_parts_are_split() {
        let arn = Arn::parse(INSTANCE).unwrap();
        assert_eq!(arn.partition, "aws");
        assert_eq!(arn.service, "ec2");
        assert_eq!(arn.region, "us-east-1");
        assert_eq!(arn.account, "123456789012");
        assert_eq!(arn.resource, "instance/i-0abc");
        assert_eq!(arn.to_string(), INSTANCE);
    }

    #[test]
    fn resource_types_follow_cloudformation_names() {
        let cases = [
            (INSTANCE, "AWS::EC2::Instance"),
            ("arn:aws:iam::123456789012:role/admin", "AWS::IAM::Role"),
            ("arn:aws:lambda:eu-west-1:123456789012:function:handler", "AWS::LAMBDA::Function"),
            ("arn:aws:ec2:us-east-1:123456789012:security-group/sg-1", "AWS::EC2::SecurityGroup"),
            ("arn:aws:sqs:us-east-1:123456789012:queue-name", "AWS::SQS"),
        ];
        for (raw, expected) in cases {
            assert_eq!(Arn::parse(raw).unwrap().resource_type(), expected, "{raw}");
        }
    }

    #[test]
    fn malformed_arns_are_rejected() {
        for raw in [
            "",
            "not-an-arn",
            "arx:aws:ec2:us-east-1:123456789012:instance/i-1",
            "arn:aws:ec2:us-east-1:123456789012:",
            "arn::s3:::bucket",
            "arn:aws:ec2:us-east-1:acct:instance/i-1",
        ] {
            assert!(Arn::parse(raw).is_err(), "{raw:?} should not parse");
        }
    }

    #[test]
    fn resource_identity_comes_from_arn() {
        let resource = AwsResource::new(INSTANCE).unwrap();
        assert_eq!(
            resource.key().as_str(),
            format!("#awsresource#123456789012#{INSTANCE}")
        );
        assert_eq!(resource.base.provider, "amazon");
        assert_eq!(resource.base.region, "us-east-1");
        assert_eq!(resource.base.resource_type, "AWS::EC2::Instance");
        assert_eq!(resource.labels(), ["AWSResource", "CloudResource", "TTL"]);
        assert!(resource.valid());
    }

    #[test]
    fn bucket_takes_a_supplied_account() {
        let bucket = "arn:aws:s3:::bucket";
        let arn = Arn::parse(bucket).unwrap();
        assert_eq!(arn.account, "");
        assert_eq!(arn.resource_type(), "AWS::S3");

        let resource = AwsResource::with_account("123456789012", bucket).unwrap();
        assert_eq!(resource.key().as_str(), format!("#awsresource#123456789012#{bucket}"));
        assert_eq!(resource.base.region, "");
        assert!(resource.valid());

        let mut reopened = resource.clone();
        run_hooks(&mut reopened).unwrap();
        assert_eq!(reopened, resource);
    }

    #[test]
    fn bucket_without_an_account_is_rejected() {
        let err = AwsResource::new("arn:aws:s3:::bucket").unwrap_err();
        assert!(matches!(err, HookError::Failed { ref hook, .. } if hook == "parse arn"));

        let err = AwsResource::with_account("acme", "arn:aws:s3:::bucket").unwrap_err();
        assert!(matches!(err, HookError::InvalidInput { ref field, .. } if field == "account_ref"));
    }

    #[test]
    fn arn_account_overrides_a_supplied_one() {
        let resource = AwsResource::with_account("999999999999", INSTANCE).unwrap();
        assert_eq!(resource.base.account_ref, "123456789012");
    }

    #[test]
    fn deletion_drops_the_ttl_label() {
        let mut existing = AwsResource::new(INSTANCE).unwrap();
        let deleted = existing.with_status(codes::DELETED);
        existing.merge(&deleted);
        assert!(existing.base.lifecycle.ttl.is_unset());
        assert_eq!(existing.labels(), ["AWSResource", "CloudResource"]);
    }

    #[test]
    fn malformed_arn_stops_pipeline() {
        let mut resource = AwsResource::default();
        resource.base.name = "garbage".into();
        let err = run_hooks(&mut resource).unwrap_err();
        assert!(matches!(err, HookError::InvalidInput { ref field, .. } if field == "arn"));
        assert!(resource.key().is_empty());
    }

    #[test]
    fn enforced_is_tri_state() {
        let mut existing = AwsResource::new(INSTANCE).unwrap();
        existing.base.enforced = Some(true);

        let mut silent = existing.clone();
        silent.base.enforced = None;
        existing.visit(&silent);
        assert_eq!(existing.base.enforced, Some(true));

        let mut explicit = existing.clone();
        explicit.base.enforced = Some(false);
        existing.merge(&explicit);
        assert_eq!(existing.base.enforced, Some(false));
    }

    #[test]
    fn with_status_returns_concrete_type() {
        let resource = AwsResource::new(INSTANCE).unwrap();
        let deleted: AwsResource = resource.with_status(codes::DELETED);
        assert!(deleted.is(codes::DELETED));
        assert_eq!(deleted.arn(), INSTANCE);
    }
}
