use std::future::Future;
use std::time::Duration;

use moka::sync::Cache;

/// Bounded in-memory cache for upstream responses.
///
/// Owned by [`crate::AppState`] rather than living in a global; call
/// [`ResponseCache::clear`] on shutdown. Entries expire `ttl` after insertion
/// and the least useful ones are evicted once `max_entries` is reached.
#[derive(Clone)]
pub struct ResponseCache<V = serde_json::Value> {
    entries: Cache<String, V>,
    max_entries: u64,
}

impl<V> ResponseCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(max_entries: u64, ttl: Duration) -> Self {
        let entries = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();
        Self {
            entries,
            max_entries,
        }
    }

    pub fn get(&self, key: &str) -> Option<V> {
        self.entries.get(key)
    }

    pub fn insert(&self, key: impl Into<String>, value: V) {
        if self.max_entries == 0 {
            return;
        }
        self.entries.insert(key.into(), value);
    }

    /// Return the cached value, or run `fetch` and cache its result if
    /// `cacheable` accepts it. Errors are never cached.
    ///
    /// Concurrent misses for the same key both fetch; the later insert wins.
    pub async fn get_or_fetch<F, Fut, E>(
        &self,
        key: &str,
        fetch: F,
        cacheable: impl FnOnce(&V) -> bool,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(key) {
            tracing::debug!("Response cache hit: {}", key);
            return Ok(value);
        }

        let value = fetch().await?;
        if cacheable(&value) {
            self.insert(key, value.clone());
        }
        Ok(value)
    }

    pub fn invalidate(&self, key: &str) {
        self.entries.invalidate(key);
    }

    pub fn clear(&self) {
        self.entries.invalidate_all();
        self.entries.run_pending_tasks();
    }

    pub fn len(&self) -> usize {
        self.entries.run_pending_tasks();
        self.entries.entry_count() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[tokio::test]
    async fn test_get_or_fetch_memoizes_success() {
        let cache: ResponseCache<u32> = ResponseCache::new(4, Duration::from_secs(60));
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value = cache
                .get_or_fetch(
                    "k",
                    || async {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Ok::<_, ()>(7)
                    },
                    |_| true,
                )
                .await
                .unwrap();
            assert_eq!(value, 7);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let cache: ResponseCache<u32> = ResponseCache::new(4, Duration::from_secs(60));

        let err = cache
            .get_or_fetch("k", || async { Err::<u32, _>("boom") }, |_| true)
            .await
            .unwrap_err();

        assert_eq!(err, "boom");
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_rejected_values_are_refetched() {
        let cache: ResponseCache<u32> = ResponseCache::new(4, Duration::from_secs(60));
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            cache
                .get_or_fetch(
                    "k",
                    || async {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Ok::<_, ()>(0)
                    },
                    |v| *v != 0,
                )
                .await
                .unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_capacity_is_bounded() {
        let cache: ResponseCache<u32> = ResponseCache::new(2, Duration::from_secs(60));
        for i in 0..10 {
            cache.insert(format!("k{i}"), i);
        }
        assert!(cache.len() <= 2);
    }

    #[test]
    fn test_expired_entries_are_dropped() {
        let cache: ResponseCache<u32> = ResponseCache::new(2, Duration::from_millis(50));
        cache.insert("a", 1);
        assert_eq!(cache.get("a"), Some(1));

        std::thread::sleep(Duration::from_millis(120));
        assert_eq!(cache.get("a"), None);
    }

    #[test]
    fn test_invalidate_and_clear() {
        let cache: ResponseCache<u32> = ResponseCache::new(4, Duration::from_secs(60));
        cache.insert("a", 1);
        cache.insert("b", 2);

        cache.invalidate("a");
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_zero_capacity_stores_nothing() {
        let cache: ResponseCache<u32> = ResponseCache::new(0, Duration::from_secs(60));
        cache.insert("a", 1);
        assert!(cache.is_empty());
    }
}
