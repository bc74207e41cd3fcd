//! Expiring in-memory cache primitives.
//!
//! `CacheEntry` is a passive value/expiration pair; `ExpiringMap` layers a
//! keyed store on top of it with lazy eviction on read plus an opportunistic
//! purge. There is no capacity bound or eviction policy beyond expiry.

use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// A generic value paired with the instant it stops being valid.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub value: T,
    pub expires_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    pub fn new(value: T, ttl: TimeDelta) -> Self {
        Self {
            value,
            expires_at: Utc::now() + ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// String-keyed store of expiring entries. Backs the session store.
#[derive(Default)]
pub struct ExpiringMap<V> {
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
}

impl<V: Clone> ExpiringMap<V> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub async fn insert(&self, key: impl Into<String>, value: V, ttl: TimeDelta) {
        let mut entries = self.entries.write().await;
        entries.insert(key.into(), CacheEntry::new(value, ttl));
    }

    /// Returns the live value for `key`. An expired entry is removed on the
    /// spot and reported as absent.
    pub async fn get(&self, key: &str) -> Option<V> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if !entry.is_expired() => return Some(entry.value.clone()),
                Some(_) => {}
                None => return None,
            }
        }
        // Expired: upgrade to a write lock and drop it.
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|entry| entry.is_expired()) {
            entries.remove(key);
        }
        None
    }

    pub async fn remove(&self, key: &str) -> Option<V> {
        let mut entries = self.entries.write().await;
        entries.remove(key).map(|entry| entry.value)
    }

    /// Drops every expired entry, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_entry_expiration() {
        let entry = CacheEntry::new("value", TimeDelta::zero() - TimeDelta::seconds(1));
        assert!(entry.is_expired());

        let entry = CacheEntry::new("value", TimeDelta::hours(1));
        assert!(!entry.is_expired());
    }

    #[tokio::test]
    async fn get_returns_live_entries_only() {
        let map = ExpiringMap::new();
        map.insert("live", 1u32, TimeDelta::hours(1)).await;
        map.insert("stale", 2u32, TimeDelta::seconds(-1)).await;

        assert_eq!(map.get("live").await, Some(1));
        assert_eq!(map.get("stale").await, None);
        // The expired entry was evicted by the failed read.
        assert_eq!(map.len().await, 1);
    }

    #[tokio::test]
    async fn remove_returns_the_stored_value() {
        let map = ExpiringMap::new();
        map.insert("key", "value".to_string(), TimeDelta::hours(1))
            .await;

        assert_eq!(map.remove("key").await.as_deref(), Some("value"));
        assert!(map.is_empty().await);
    }

    #[tokio::test]
    async fn purge_drops_only_expired_entries() {
        let map = ExpiringMap::new();
        map.insert("a", 1u32, TimeDelta::seconds(-1)).await;
        map.insert("b", 2u32, TimeDelta::seconds(-1)).await;
        map.insert("c", 3u32, TimeDelta::hours(1)).await;

        assert_eq!(map.purge_expired().await, 2);
        assert_eq!(map.len().await, 1);
        assert_eq!(map.get("c").await, Some(3));
    }
}
