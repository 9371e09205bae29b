//! Caller-owned TTL cache.
//!
//! Replaces process-wide memoization of fetch results with an explicit
//! component: whoever runs the evaluation cycle owns the cache and decides
//! what goes in it. The signal core itself never sees it.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Map from key to (value, expiry). Not internally synchronized; wrap it
/// in whatever lock the owning service already uses.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: HashMap<K, (V, Instant)>,
}

impl<K: Eq + Hash, V> TtlCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Returns the cached value if present and not yet expired.
    ///
    /// An expired entry is evicted on the way out, so the map does not
    /// accumulate stale values for keys that keep being asked for.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let expired = match self.entries.get(key) {
            Some((_, expiry)) => Instant::now() >= *expiry,
            None => return None,
        };

        if expired {
            self.entries.remove(key);
            return None;
        }

        self.entries.get(key).map(|(v, _)| v)
    }

    /// Insert a value, stamping it with `now + ttl`.
    pub fn insert(&mut self, key: K, value: V) {
        self.entries.insert(key, (value, Instant::now() + self.ttl));
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop everything, expired or not.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
