//! In-memory sample caching with moka.
//!
//! Relay fetches are slow and rate-limited, so fetched samples are kept for
//! the configured TTL. Filter results are never cached; they are recomputed
//! from the cached samples on every request.
//!
//! ## Cache Keys
//!
//! | Cache | Key | Value |
//! |-------|-----|-------|
//! | samples | kind number | newest-first sample events |
//! | events | `"{kind}:{event_id}"` | one event, or `None` when absent |

use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use kindlr_core::SampleEvent;
use moka::future::Cache;

use crate::error::WebError;

/// Default cache capacity (number of entries).
pub const DEFAULT_CACHE_CAPACITY: u64 = 10_000;

/// Cached value with the time it was stored.
#[derive(Clone, Debug)]
pub struct CachedEntry<V> {
    pub value: V,
    pub cached_at: chrono::DateTime<chrono::Utc>,
}

/// Samples per kind.
pub type SampleCache = Cache<u16, CachedEntry<Arc<Vec<SampleEvent>>>>;

/// Single events by `"{kind}:{id}"`.
pub type EventCache = Cache<String, CachedEntry<Option<SampleEvent>>>;

/// Build a cache with the given TTL.
pub fn new_cache<K, V>(ttl: Duration) -> Cache<K, CachedEntry<V>>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    Cache::builder()
        .max_capacity(DEFAULT_CACHE_CAPACITY)
        .time_to_live(ttl)
        .build()
}

/// Get a cached value or compute and cache it.
///
/// Errors from `compute` are returned without caching so the next request
/// retries.
pub async fn get_or_compute<K, V, F, Fut>(
    cache: &Cache<K, CachedEntry<V>>,
    key: K,
    compute: F,
) -> Result<V, WebError>
where
    K: Hash + Eq + Send + Sync + std::fmt::Debug + 'static,
    V: Clone + Send + Sync + 'static,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<V, WebError>>,
{
    if let Some(entry) = cache.get(&key).await {
        tracing::debug!(key = ?key, cached_at = %entry.cached_at, "cache hit");
        return Ok(entry.value);
    }

    tracing::debug!(key = ?key, "cache miss, computing");
    let value = compute().await?;

    let entry = CachedEntry {
        value: value.clone(),
        cached_at: chrono::Utc::now(),
    };
    cache.insert(key, entry).await;

    Ok(value)
}
