//! Cache store trait definition

use std::fmt::Debug;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::domain::DomainError;

/// A cached value together with the second it was written
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub key: String,
    pub value: Arc<Value>,
    /// Whole seconds since the Unix epoch
    pub inserted_at: u64,
}

impl CacheEntry {
    pub fn new(key: impl Into<String>, value: Arc<Value>, inserted_at: u64) -> Self {
        Self {
            key: key.into(),
            value,
            inserted_at,
        }
    }

    /// Fresh while `now - inserted_at` lies in `[0, ttl)`; a clock that went
    /// backwards keeps the entry fresh.
    pub fn is_fresh(&self, ttl_seconds: u64, now: u64) -> bool {
        (now as i128) - (self.inserted_at as i128) < ttl_seconds as i128
    }

    pub fn age(&self, now: u64) -> u64 {
        now.saturating_sub(self.inserted_at)
    }
}

/// Process-wide key/value store with write timestamps.
///
/// Entries are never evicted; a stale entry stays until the next successful
/// write under the same key replaces it.
#[async_trait]
pub trait CacheStore: Send + Sync + Debug {
    /// Returns the entry for `key`, fresh or not
    async fn get(&self, key: &str) -> Option<CacheEntry>;

    /// Unconditionally replaces whatever is stored under `key`
    async fn put(&self, key: &str, value: Arc<Value>, now: u64);

    /// Number of keys currently held
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Read-through helper shared by every cached route
pub trait CacheStoreExt: CacheStore {
    /// Returns the cached value when it is fresh, otherwise runs `compute`,
    /// stores its output stamped with `now` and returns it.
    ///
    /// A failing `compute` writes nothing: any previous entry stays exactly
    /// as it was. Concurrent misses on the same key each run `compute`.
    fn get_or_compute<'a, F, Fut>(
        &'a self,
        key: &'a str,
        ttl_seconds: u64,
        now: u64,
        compute: F,
    ) -> impl Future<Output = Result<Arc<Value>, DomainError>> + Send + 'a
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = Result<Value, DomainError>> + Send + 'a,
    {
        async move {
            match self.get(key).await {
                Some(entry) if entry.is_fresh(ttl_seconds, now) => {
                    debug!(key = %key, age_secs = entry.age(now), "Cache hit");
                    return Ok(entry.value);
                }
                Some(entry) => {
                    debug!(key = %key, age_secs = entry.age(now), ttl_secs = ttl_seconds, "Cache entry stale");
                }
                None => debug!(key = %key, "Cache miss"),
            }

            let value = Arc::new(compute().await?);
            self.put(key, Arc::clone(&value), now).await;

            Ok(value)
        }
    }
}

impl<T: CacheStore + ?Sized> CacheStoreExt for T {}
