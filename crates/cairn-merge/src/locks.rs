//! Per-key serialisation for callers that reconcile in parallel.
//!
//! Merge and Visit assume no one else mutates the record during the call.
//! Reconciliations of different keys may run concurrently; two of the same
//! key must not. [`KeyedLocks`] is a fixed set of mutexes sharded by key hash
//! that a persistence layer can hold around load-reconcile-store.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::{Mutex, MutexGuard, PoisonError};

use cairn_types::Key;

const DEFAULT_SHARDS: usize = 64;

/// Sharded in-process lock keyed by entity key.
#[derive(Debug)]
pub struct KeyedLocks {
    shards: Vec<Mutex<()>>,
}

impl KeyedLocks {
    /// Create a lock set with `shards` shards (at least one).
    pub fn new(shards: usize) -> Self {
        Self {
            shards: (0..shards.max(1)).map(|_| Mutex::new(())).collect(),
        }
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Shard index for `key`. Stable for the life of the process.
    pub fn shard_of(&self, key: &Key) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() % self.shards.len() as u64) as usize
    }

    /// Block until the shard owning `key` is free and hold it.
    pub fn lock(&self, key: &Key) -> MutexGuard<'_, ()> {
        self.shards[self.shard_of(key)]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for KeyedLocks {
    fn default() -> Self {
        Self::new(DEFAULT_SHARDS)
    }
}
