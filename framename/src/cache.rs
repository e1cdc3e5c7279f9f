//! Cross-session method name cache.
//!
//! Resolving a managed method goes through several runtime queries, so the
//! rendered qualified name is cached by method identity and reused across
//! profiling sessions. Each entry remembers the epoch of the session that
//! last used it:
//!
//! ```text
//! MethodId ──► (epoch: u8, "java.lang.String.indexOf")
//! ```
//!
//! At formatter teardown entries whose age `(current - stored) mod 256`
//! reaches the configured max age are evicted; a max age of 0 clears the
//! cache. Eviction never runs on the sampling path.
//!
//! # Concurrency
//!
//! The cache is shared through an `Arc` by every formatter and thread. It is
//! backed by a sharded `DashMap`, so lookups on different methods rarely
//! contend. Rendering on a miss happens outside any shard lock; if two
//! threads miss on the same method at once, the first insert wins and both
//! callers return the stored name.
//!
//! Cached names never include a compile-tier suffix: the same method is
//! sampled in several tiers but has one qualified name.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use log::debug;

use crate::domain::{Epoch, MethodId};

#[derive(Debug, Clone)]
struct CacheEntry {
    epoch: Epoch,
    name: String,
}

/// Epoch-aged map from method identity to rendered name
#[derive(Debug, Default)]
pub struct MethodNameCache {
    entries: DashMap<MethodId, CacheEntry>,
}

impl MethodNameCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached name for `method`, rendering and storing it on a miss
    ///
    /// A hit refreshes the entry's epoch to `epoch`.
    pub fn lookup_or_insert<F>(&self, method: MethodId, epoch: Epoch, render: F) -> String
    where
        F: FnOnce() -> String,
    {
        if let Some(mut entry) = self.entries.get_mut(&method) {
            entry.epoch = epoch;
            return entry.name.clone();
        }

        let name = render();
        match self.entries.entry(method) {
            Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                entry.epoch = epoch;
                entry.name.clone()
            }
            Entry::Vacant(vacant) => {
                vacant.insert(CacheEntry { epoch, name: name.clone() });
                name
            }
        }
    }

    /// Peek at a cached name without refreshing its epoch
    #[must_use]
    pub fn get(&self, method: MethodId) -> Option<String> {
        self.entries.get(&method).map(|entry| entry.name.clone())
    }

    /// Evict entries whose age is at least `max_age`, returning how many were removed
    pub fn prune(&self, epoch: Epoch, max_age: u8) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| epoch.age_of(entry.epoch) < max_age);
        let removed = before.saturating_sub(self.entries.len());
        debug!("Pruned {removed} of {before} cached method names ({epoch}, max age {max_age})");
        removed
    }

    pub fn clear(&self) {
        debug!("Clearing {} cached method names", self.entries.len());
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
