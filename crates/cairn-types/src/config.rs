use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::key::MAX_KEY_LEN;

/// Tunables shared by key assembly and label sanitization.
///
/// Every field has a default, so an empty TOML document is a valid
/// configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Upper bound on an assembled key, in bytes.
    pub max_key_len: usize,
    /// Number of hex characters of the BLAKE3 digest appended to a
    /// truncated key segment.
    pub digest_len: usize,
    /// Character substituted for anything a persistence layer rejects in a
    /// label.
    pub label_replacement: char,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            max_key_len: MAX_KEY_LEN,
            digest_len: 16,
            label_replacement: '_',
        }
    }
}

impl CoreConfig {
    /// Parse a configuration from a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, TypeError> {
        let config: Self =
            toml::from_str(source).map_err(|e| TypeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, TypeError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Check the configuration is usable for key assembly.
    pub fn validate(&self) -> Result<(), TypeError> {
        if self.digest_len == 0 || self.digest_len > 64 {
            return Err(TypeError::Config(format!(
                "digest_len must be between 1 and 64, got {}",
                self.digest_len
            )));
        }
        if self.max_key_len < min_key_len(self.digest_len) {
            return Err(TypeError::Config(format!(
                "max_key_len {} is too small for a {}-character digest",
                self.max_key_len, self.digest_len
            )));
        }
        if self.label_replacement.is_ascii_alphanumeric() {
            return Err(TypeError::Config(
                "label_replacement must not be alphanumeric".into(),
            ));
        }
        Ok(())
    }
}

/// Smallest budget with room for `#k#` plus a digest-suffixed segment.
pub(crate) const fn min_key_len(digest_len: usize) -> usize {
    digest_len + 5
}
