//! In-memory label registry.
//!
//! [`LabelRegistry`] keeps its map behind a single `RwLock`, held only for
//! the map operation itself. The process-wide instance returned by
//! [`global`] is populated at start-up and read for the rest of the process.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock};

use tracing::{debug, error};

use crate::error::{LabelError, Result};

/// Case-insensitive map from lowercase label text to its canonical spelling.
///
/// Text is stored verbatim: no trimming and no Unicode normalisation beyond
/// lowercasing the index key. The empty string is a valid label.
#[derive(Debug, Default)]
pub struct LabelRegistry {
    labels: RwLock<HashMap<String, String>>,
}

impl LabelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `text` as the canonical spelling of its lowercase form.
    ///
    /// Re-registering the exact same text is a no-op that returns it.
    /// Registering a different spelling of an existing label returns
    /// [`LabelError::Conflict`] and leaves the registry unchanged.
    pub fn try_register(&self, text: &str) -> Result<String> {
        let mut labels = self.labels.write().unwrap_or_else(PoisonError::into_inner);
        match labels.entry(text.to_lowercase()) {
            Entry::Vacant(slot) => {
                debug!(label = text, "registered label");
                Ok(slot.insert(text.to_string()).clone())
            }
            Entry::Occupied(slot) if slot.get() == text => Ok(slot.get().clone()),
            Entry::Occupied(slot) => Err(LabelError::Conflict {
                existing: slot.get().clone(),
                attempted: text.to_string(),
            }),
        }
    }

    /// Record `text`, returning its canonical spelling.
    ///
    /// # Panics
    ///
    /// Panics if a different spelling of the same label is already
    /// registered. Conflicting declarations are a build defect and must stop
    /// the process at start-up.
    pub fn register(&self, text: &str) -> String {
        match self.try_register(text) {
            Ok(canonical) => canonical,
            Err(err) => {
                error!(error = %err, "label registration conflict");
                panic!("{err}");
            }
        }
    }

    /// [`Self::register`] for call sites that do not need the result.
    pub fn must_register(&self, text: &str) {
        self.register(text);
    }

    /// Register every label in `texts`.
    pub fn register_all<'a>(&self, texts: impl IntoIterator<Item = &'a str>) {
        for text in texts {
            self.must_register(text);
        }
    }

    /// Case-insensitive lookup of the canonical spelling.
    pub fn get(&self, text: &str) -> Option<String> {
        let labels = self.labels.read().unwrap_or_else(PoisonError::into_inner);
        labels.get(&text.to_lowercase()).cloned()
    }

    /// Returns `true` if any spelling of `text` is registered.
    pub fn contains(&self, text: &str) -> bool {
        let labels = self.labels.read().unwrap_or_else(PoisonError::into_inner);
        labels.contains_key(&text.to_lowercase())
    }

    /// Snapshot of every canonical label, sorted.
    pub fn list(&self) -> Vec<String> {
        let labels = self.labels.read().unwrap_or_else(PoisonError::into_inner);
        let mut out: Vec<String> = labels.values().cloned().collect();
        out.sort();
        out
    }

    pub fn len(&self) -> usize {
        self.labels.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget every label. Intended for tests.
    pub fn reset(&self) {
        self.labels
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

static GLOBAL: OnceLock<LabelRegistry> = OnceLock::new();

/// The process-wide registry.
pub fn global() -> &'static LabelRegistry {
    GLOBAL.get_or_init(LabelRegistry::new)
}

/// Register `text` in the process-wide registry. See [`LabelRegistry::register`].
pub fn register(text: &str) -> String {
    global().register(text)
}

/// See [`LabelRegistry::must_register`].
pub fn must_register(text: &str) {
    global().must_register(text);
}

/// Look up `text` in the process-wide registry.
pub fn get(text: &str) -> Option<String> {
    global().get(text)
}

/// Every label in the process-wide registry.
pub fn list() -> Vec<String> {
    global().list()
}
