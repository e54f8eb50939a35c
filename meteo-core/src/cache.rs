use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

/// In-memory key/value store whose entries expire after a per-entry TTL.
///
/// Cloning shares the underlying map.
pub struct TtlCache<V> {
    entries: Arc<RwLock<HashMap<String, Entry<V>>>>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the value for `key` if it has not expired yet.
    pub async fn get(&self, key: &str) -> Option<V> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|e| Instant::now() < e.expires_at)
            .map(|e| e.value.clone())
    }

    pub async fn insert(&self, key: &str, value: V, ttl: Duration) {
        let mut entries = self.entries.write().await;
        let entry = Entry {
            value,
            expires_at: Instant::now() + ttl,
        };
        entries.insert(key.to_string(), entry);
    }

    /// Returns the fresh value for `key`, or computes, stores and returns a new one.
    ///
    /// The lock is not held while `compute` runs, so concurrent misses may
    /// each compute; the last write wins. Errors are returned as-is and
    /// nothing is stored.
    pub async fn get_or_try_insert_with<F, Fut, E>(
        &self,
        key: &str,
        ttl: Duration,
        compute: F,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(key).await {
            tracing::debug!(key, "cache hit");
            return Ok(value);
        }

        let value = compute().await?;
        self.insert(key, value.clone(), ttl).await;
        Ok(value)
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for TtlCache<V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TTL: Duration = Duration::from_secs(43_200);

    async fn counting(calls: &AtomicUsize, value: u32) -> Result<u32, String> {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(value)
    }

    #[tokio::test(start_paused = true)]
    async fn second_call_within_ttl_uses_cached_value() {
        let cache = TtlCache::new();
        let calls = AtomicUsize::new(0);

        let first = cache
            .get_or_try_insert_with("k", TTL, || counting(&calls, 1))
            .await;
        tokio::time::advance(TTL - Duration::from_secs(1)).await;
        let second = cache
            .get_or_try_insert_with("k", TTL, || counting(&calls, 2))
            .await;

        assert_eq!(first, Ok(1));
        assert_eq!(second, Ok(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn expired_entry_is_recomputed() {
        let cache = TtlCache::new();
        let calls = AtomicUsize::new(0);

        cache
            .get_or_try_insert_with("k", TTL, || counting(&calls, 1))
            .await
            .unwrap();
        tokio::time::advance(TTL).await;

        assert_eq!(cache.get("k").await, None);
        let value = cache
            .get_or_try_insert_with("k", TTL, || counting(&calls, 2))
            .await;

        assert_eq!(value, Ok(2));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let cache: TtlCache<u32> = TtlCache::new();

        let err = cache
            .get_or_try_insert_with("k", TTL, || async { Err("boom".to_string()) })
            .await;
        assert_eq!(err, Err("boom".to_string()));
        assert_eq!(cache.get("k").await, None);

        let ok = cache
            .get_or_try_insert_with("k", TTL, || async { Ok::<_, String>(7) })
            .await;
        assert_eq!(ok, Ok(7));
    }

    #[tokio::test]
    async fn clones_share_entries() {
        let cache = TtlCache::new();
        let other = cache.clone();

        cache.insert("k", 3_u32, TTL).await;

        assert_eq!(other.get("k").await, Some(3));
    }
}
