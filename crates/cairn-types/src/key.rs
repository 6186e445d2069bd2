use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{min_key_len, CoreConfig};
use crate::error::TypeError;

/// Separator between key segments.
pub const KEY_DELIMITER: char = '#';

/// Largest key, in bytes, a persistence layer is guaranteed to accept.
pub const MAX_KEY_LEN: usize = 1024;

/// Marks a segment that was shortened to fit the key budget.
const TRUNCATION_MARKER: char = '~';

/// Durable identity of an entity.
///
/// A key is a `#`-delimited string whose first segment names the entity kind
/// in lowercase, e.g. `#asset#example.com#10.0.0.1`. Keys are assembled by
/// [`KeyBuilder`] inside an entity's hook pipeline; nothing else should
/// construct one from parts.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(String);

impl Key {
    /// Parse an existing key, checking only its outer shape.
    pub fn parse(raw: &str) -> Result<Self, TypeError> {
        let invalid = |reason: &str| TypeError::InvalidKey {
            key: raw.to_string(),
            reason: reason.to_string(),
        };
        let rest = raw
            .strip_prefix(KEY_DELIMITER)
            .ok_or_else(|| invalid("must start with '#'"))?;
        let kind = rest.split(KEY_DELIMITER).next().unwrap_or_default();
        if kind.is_empty() {
            return Err(invalid("kind segment is empty"));
        }
        if kind.chars().any(char::is_uppercase) {
            return Err(invalid("kind segment must be lowercase"));
        }
        if raw.len() > MAX_KEY_LEN {
            return Err(invalid("exceeds maximum key length"));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for the unset key of a fresh zero value.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The kind segment (`"asset"` for `#asset#a#b`).
    pub fn kind(&self) -> Option<&str> {
        self.parts().next()
    }

    /// Every segment after the kind.
    pub fn segments(&self) -> Vec<&str> {
        self.parts().skip(1).collect()
    }

    /// Kind followed by every segment.
    pub fn parts(&self) -> impl Iterator<Item = &str> {
        self.0
            .strip_prefix(KEY_DELIMITER)
            .into_iter()
            .flat_map(|rest| rest.split(KEY_DELIMITER))
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({})", self.0)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug)]
struct Segment {
    value: String,
    truncatable: bool,
}

/// Assembles a [`Key`] that never exceeds the configured length budget.
///
/// Segments added with [`KeyBuilder::truncatable`] are shortened first, last
/// one first; plain segments are only shortened if that is not enough. A
/// shortened segment keeps a prefix of its value followed by `~` and a BLAKE3
/// digest of the full value, so two long values that share a prefix still
/// produce distinct keys. The segment count never changes.
///
/// Segment values must not contain `#`; the builder does not escape them.
///
/// # Examples
///
/// ```
/// use cairn_types::KeyBuilder;
///
/// let key = KeyBuilder::new("Cache").segment("a").segment("b").segment("c").build();
/// assert_eq!(key.as_str(), "#cache#a#b#c");
/// ```
#[derive(Clone, Debug)]
pub struct KeyBuilder {
    kind: String,
    segments: Vec<Segment>,
    max_len: usize,
    digest_len: usize,
}

impl KeyBuilder {
    /// Start a key of the given kind using the default budget.
    pub fn new(kind: &str) -> Self {
        Self::with_config(kind, &CoreConfig::default())
    }

    /// Start a key of the given kind using a custom budget.
    ///
    /// Out-of-range settings are clamped: the digest to 1..=64 characters
    /// and the budget to at least one digest-suffixed segment.
    pub fn with_config(kind: &str, config: &CoreConfig) -> Self {
        let digest_len = config.digest_len.clamp(1, 64);
        Self {
            kind: kind.to_lowercase(),
            segments: Vec::new(),
            max_len: config.max_key_len.max(min_key_len(digest_len)),
            digest_len,
        }
    }

    /// Like [`KeyBuilder::with_config`], but rejects a config that fails
    /// [`CoreConfig::validate`] instead of clamping it.
    pub fn try_with_config(kind: &str, config: &CoreConfig) -> Result<Self, TypeError> {
        config.validate()?;
        Ok(Self::with_config(kind, config))
    }

    /// Append a segment that is only shortened as a last resort.
    pub fn segment(mut self, value: impl Into<String>) -> Self {
        self.segments.push(Segment {
            value: value.into(),
            truncatable: false,
        });
        self
    }

    /// Append a segment that absorbs any overflow first.
    pub fn truncatable(mut self, value: impl Into<String>) -> Self {
        self.segments.push(Segment {
            value: value.into(),
            truncatable: true,
        });
        self
    }

    /// Append every part (kind included) of another key as plain segments.
    pub fn key(mut self, key: &Key) -> Self {
        for part in key.parts() {
            self.segments.push(Segment {
                value: part.to_string(),
                truncatable: false,
            });
        }
        self
    }

    pub fn build(self) -> Key {
        let Self {
            kind,
            mut segments,
            max_len,
            digest_len,
        } = self;

        let naive = 1 + kind.len() + segments.iter().map(|s| 1 + s.value.len()).sum::<usize>();
        if naive > max_len {
            let mut overflow = naive - max_len;
            let order: Vec<usize> = (0..segments.len())
                .rev()
                .filter(|&i| segments[i].truncatable)
                .chain((0..segments.len()).rev().filter(|&i| !segments[i].truncatable))
                .collect();
            for index in order {
                if overflow == 0 {
                    break;
                }
                let segment = &mut segments[index];
                let current = segment.value.len();
                if current == 0 {
                    continue;
                }
                let target = current.saturating_sub(overflow);
                let shortened = shorten(&segment.value, target, digest_len);
                overflow = overflow.saturating_sub(current - shortened.len());
                segment.value = shortened;
            }
        }

        let mut out = String::with_capacity(naive.min(max_len));
        out.push(KEY_DELIMITER);
        out.push_str(&kind);
        for segment in segments {
            out.push(KEY_DELIMITER);
            out.push_str(&segment.value);
        }
        Key(out)
    }
}

/// Shorten `value` to at most `target` bytes, keeping a digest of the
/// original when there is room for one.
fn shorten(value: &str, target: usize, digest_len: usize) -> String {
    let digest = hex::encode(blake3::hash(value.as_bytes()).as_bytes());
    let suffix_len = digest_len + TRUNCATION_MARKER.len_utf8();
    if target > suffix_len {
        let cut = floor_char_boundary(value, target - suffix_len);
        let mut out = String::with_capacity(target);
        out.push_str(&value[..cut]);
        out.push(TRUNCATION_MARKER);
        out.push_str(&digest[..digest_len]);
        out
    } else {
        digest[..target.min(digest.len())].to_string()
    }
}

fn floor_char_boundary(value: &str, index: usize) -> usize {
    if index >= value.len() {
        return value.len();
    }
    let mut end = index;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn builds_simple_key() {
        let key = KeyBuilder::new("cache").segment("a").segment("b").segment("c").build();
        assert_eq!(key.as_str(), "#cache#a#b#c");
        assert_eq!(key.kind(), Some("cache"));
        assert_eq!(key.segments(), vec!["a", "b", "c"]);
    }

    #[test]
    fn kind_is_lowercased() {
        let key = KeyBuilder::new("AWSResource").segment("1").build();
        assert_eq!(key.kind(), Some("awsresource"));
    }

    #[test]
    fn empty_segments_are_kept() {
        let key = KeyBuilder::new("asset").segment("").segment("x").build();
        assert_eq!(key.as_str(), "#asset##x");
        assert_eq!(key.segments().len(), 2);
    }

    #[test]
    fn long_value_is_truncated_to_budget() {
        let value = "v".repeat(5000);
        let key = KeyBuilder::new("preseed")
            .segment("whois")
            .segment("registrant")
            .truncatable(value)
            .build();
        assert!(key.len() <= MAX_KEY_LEN);
        assert_eq!(key.segments().len(), 3);
        assert_eq!(key.segments()[0], "whois");
        assert!(key.segments()[2].contains('~'));
    }

    #[test]
    fn short_key_is_untouched_by_truncatable_flag() {
        let key = KeyBuilder::new("preseed").truncatable("short").build();
        assert_eq!(key.as_str(), "#preseed#short");
    }

    #[test]
    fn truncated_values_with_shared_prefix_stay_distinct() {
        let base = "p".repeat(2000);
        let a = KeyBuilder::new("preseed").truncatable(format!("{base}a")).build();
        let b = KeyBuilder::new("preseed").truncatable(format!("{base}b")).build();
        assert_ne!(a, b);
        assert!(a.len() <= MAX_KEY_LEN);
        assert!(b.len() <= MAX_KEY_LEN);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let value = "é".repeat(1000);
        let key = KeyBuilder::new("asset").truncatable(value).build();
        assert!(key.len() <= MAX_KEY_LEN);
        // Building a String already proves the boundary was respected.
        assert!(key.as_str().is_char_boundary(key.len()));
    }

    #[test]
    fn plain_segments_shrink_when_no_truncatable_segment_exists() {
        let key = KeyBuilder::new("asset")
            .segment("d".repeat(900))
            .segment("n".repeat(900))
            .build();
        assert!(key.len() <= MAX_KEY_LEN);
        assert_eq!(key.segments().len(), 2);
        // The last segment absorbs the overflow first.
        assert_eq!(key.segments()[0], "d".repeat(900));
    }

    #[test]
    fn custom_budget_is_honoured() {
        let config = CoreConfig {
            max_key_len: 64,
            ..CoreConfig::default()
        };
        let key = KeyBuilder::with_config("asset", &config)
            .segment("example.com")
            .truncatable("x".repeat(200))
            .build();
        assert!(key.len() <= 64);
        assert_eq!(key.segments()[0], "example.com");
    }

    #[test]
    fn undersized_budget_is_clamped() {
        let config = CoreConfig {
            max_key_len: 4,
            ..CoreConfig::default()
        };
        let floor = min_key_len(config.digest_len);
        let key = KeyBuilder::with_config("k", &config)
            .truncatable("x".repeat(200))
            .build();
        assert!(key.len() <= floor, "{} > {floor}", key.len());
        assert_eq!(key.segments().len(), 1);
        assert!(key.segments()[0].starts_with("x~"));

        assert!(KeyBuilder::try_with_config("k", &config).is_err());
        assert!(KeyBuilder::try_with_config("k", &CoreConfig::default()).is_ok());
    }

    #[test]
    fn appending_key_copies_all_parts() {
        let source = KeyBuilder::new("asset").segment("a").segment("b").build();
        let key = KeyBuilder::new("discovered").key(&source).build();
        assert_eq!(key.as_str(), "#discovered#asset#a#b");
    }

    #[test]
    fn parse_accepts_well_formed_key() {
        let key = Key::parse("#risk#example.com#CVE-2024-1").unwrap();
        assert_eq!(key.kind(), Some("risk"));
        assert_eq!(key.segments(), vec!["example.com", "CVE-2024-1"]);
    }

    #[test]
    fn parse_rejects_malformed_keys() {
        assert!(Key::parse("asset#a").is_err());
        assert!(Key::parse("##a").is_err());
        assert!(Key::parse("#Asset#a").is_err());
        assert!(Key::parse(&format!("#a#{}", "x".repeat(MAX_KEY_LEN))).is_err());
    }

    #[test]
    fn empty_key_has_no_parts() {
        let key = Key::default();
        assert!(key.is_empty());
        assert_eq!(key.kind(), None);
        assert!(key.segments().is_empty());
    }

    #[test]
    fn serde_is_transparent() {
        let key = KeyBuilder::new("asset").segment("a").build();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"#asset#a\"");
    }

    proptest! {
        #[test]
        fn key_never_exceeds_budget(
            fixed in "[a-z0-9.]{0,600}",
            value in "[^#]{0,1500}",
        ) {
            let key = KeyBuilder::new("preseed")
                .segment("whois")
                .segment(fixed)
                .truncatable(value)
                .build();
            prop_assert!(key.len() <= MAX_KEY_LEN);
            prop_assert_eq!(key.segments().len(), 3);
            prop_assert_eq!(key.kind(), Some("preseed"));
        }

        #[test]
        fn key_assembly_is_deterministic(value in "[^#]{0,2000}") {
            let a = KeyBuilder::new("asset").segment("d").truncatable(value.clone()).build();
            let b = KeyBuilder::new("asset").segment("d").truncatable(value).build();
            prop_assert_eq!(a, b);
        }
    }
}
