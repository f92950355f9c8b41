use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

use ahash::RandomState;

use super::ResolvedIdentity;

/// Memoization of remote lookups for the lifetime of one [`Resolver`](super::Resolver).
///
/// Keyed by the canonical identifier string. Holds successful resolutions and definitive
/// "no such object" answers; transient failures are never stored. Concurrent readers do not
/// block each other, and the first write for a key wins so that racing workers all end up
/// returning the same value.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: RwLock<HashMap<String, ResolvedIdentity, RandomState>>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<ResolvedIdentity> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Store `identity` under `key` unless a value is already present.
    ///
    /// Return
    /// ------
    /// * The value held by the cache after the call, which is the earlier one if another
    ///   worker got there first
    pub fn insert(&self, key: &str, identity: ResolvedIdentity) -> ResolvedIdentity {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key.to_string())
            .or_insert(identity)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod cache_test {
    use super::*;

    #[test]
    fn test_first_write_wins() {
        let cache = ResolutionCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.get("Ceres"), None);

        let ceres = ResolvedIdentity::new("Ceres", Some(1));
        assert_eq!(cache.insert("Ceres", ceres.clone()), ceres);
        assert_eq!(
            cache.insert("Ceres", ResolvedIdentity::unresolved()),
            ceres
        );
        assert_eq!(cache.get("Ceres"), Some(ceres));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_concurrent_inserts_are_consistent() {
        let cache = ResolutionCache::new();
        std::thread::scope(|scope| {
            for i in 0..8 {
                let cache = &cache;
                scope.spawn(move || {
                    cache.insert("Vesta", ResolvedIdentity::new("Vesta", Some(4 + i % 2)));
                });
            }
        });
        let stored = cache.get("Vesta").unwrap();
        assert_eq!(stored.name.as_deref(), Some("Vesta"));
        assert_eq!(cache.len(), 1);
    }
}
