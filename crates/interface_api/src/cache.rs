//! Memoized view responses
//!
//! Composed views are pure functions of the snapshot and the request
//! parameters, so responses are cached by
//! `(ledger_version, panel, mode, search)`. A date-scoped request builds
//! a fresh snapshot with a new version, so scoped responses never collide
//! with unscoped ones.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use core_kernel::LedgerVersion;

/// Cache key for one composed panel response
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewKey {
    pub version: LedgerVersion,
    pub panel: &'static str,
    pub mode: &'static str,
    pub search: String,
}

/// Bounded cache of serialized panel responses
#[derive(Clone)]
pub struct ViewCache {
    capacity: usize,
    entries: Arc<RwLock<HashMap<ViewKey, Arc<serde_json::Value>>>>,
}

impl ViewCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn get(&self, key: &ViewKey) -> Option<Arc<serde_json::Value>> {
        self.entries
            .read()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    /// Stores a response, flushing everything when the cap is reached
    ///
    /// Entries are keyed by snapshot version, so the whole map goes stale
    /// together when new data arrives; a full flush is sufficient.
    pub fn insert(&self, key: ViewKey, value: Arc<serde_json::Value>) {
        if let Ok(mut entries) = self.entries.write() {
            if entries.len() >= self.capacity {
                entries.clear();
            }
            entries.insert(key, value);
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(panel: &'static str, version: LedgerVersion) -> ViewKey {
        ViewKey {
            version,
            panel,
            mode: "daily",
            search: String::new(),
        }
    }

    #[test]
    fn test_hit_and_miss() {
        let cache = ViewCache::new(8);
        let version = LedgerVersion::new_v7();
        let k = key("sales", version);

        assert!(cache.get(&k).is_none());
        cache.insert(k.clone(), Arc::new(serde_json::json!({"ok": true})));
        assert!(cache.get(&k).is_some());

        // A different version never aliases.
        assert!(cache.get(&key("sales", LedgerVersion::new_v7())).is_none());
    }

    #[test]
    fn test_capacity_flush() {
        let cache = ViewCache::new(2);
        for _ in 0..3 {
            cache.insert(
                key("dashboard", LedgerVersion::new_v7()),
                Arc::new(serde_json::Value::Null),
            );
        }
        assert!(cache.len() <= 2);
    }
}
