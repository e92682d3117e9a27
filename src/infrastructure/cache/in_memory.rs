//! In-memory cache store using moka

use std::sync::Arc;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;
use serde_json::Value;

use crate::domain::cache::{CacheEntry, CacheStore};

/// Process-wide cache store backed by an unbounded moka map.
///
/// The map is built without capacity, TTL or idle limits so moka never
/// evicts anything; staleness is decided by the caller from
/// `CacheEntry::inserted_at`.
#[derive(Debug, Clone)]
pub struct InMemoryCacheStore {
    cache: MokaCache<String, CacheEntry>,
}

impl InMemoryCacheStore {
    pub fn new() -> Self {
        Self {
            cache: MokaCache::builder().build(),
        }
    }
}

impl Default for InMemoryCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, key: &str) -> Option<CacheEntry> {
        self.cache.get(key).await
    }

    async fn put(&self, key: &str, value: Arc<Value>, now: u64) {
        self.cache
            .insert(key.to_string(), CacheEntry::new(key, value, now))
            .await;
    }

    async fn len(&self) -> usize {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count() as usize
    }
}
