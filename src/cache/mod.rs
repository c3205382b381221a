//! # Read-Through Cache
//!
//! TTL-bounded memoization for derived backend reads, with per-key single
//! flight: concurrent misses for one key converge on a single in-flight
//! fetch while other keys proceed independently. An explicit value injected
//! into the orchestrator, not a process-wide singleton, so lifecycle and
//! expiry are deterministic under test.
//!
//! Stale-but-unexpired entries are always served without revalidation; a
//! failed fetch caches nothing and the error propagates unchanged.

use crate::error::GatewayResult;
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// One cached value with its absolute expiry instant
#[derive(Debug)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

#[derive(Debug, Default)]
struct Slot<V> {
    entry: Option<CacheEntry<V>>,
}

/// Read-through cache keyed by `K`, holding the last successfully fetched
/// value per key for a fixed time-to-live.
///
/// The outer map lock is held only long enough to resolve the per-key slot;
/// fetches run under the slot's own lock, so a slow fetch for one key never
/// blocks hits on another.
pub struct ReadThroughCache<K, V> {
    ttl: Duration,
    slots: Mutex<HashMap<K, Arc<Mutex<Slot<V>>>>>,
}

impl<K, V> ReadThroughCache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: Mutex::new(HashMap::new()),
        }
    }

    async fn slot(&self, key: &K) -> Arc<Mutex<Slot<V>>> {
        let mut slots = self.slots.lock().await;
        slots
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(Slot { entry: None })))
            .clone()
    }

    /// Return the cached value for `key`, or run `fetch` and cache its
    /// result for a fresh TTL.
    ///
    /// At most one fetch per key is in flight at a time; concurrent callers
    /// for the same key wait for it and then read the stored value.
    pub async fn get_or_fetch<F, Fut>(&self, key: K, fetch: F) -> GatewayResult<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = GatewayResult<V>>,
    {
        let slot = self.slot(&key).await;
        let mut slot = slot.lock().await;

        if let Some(entry) = &slot.entry {
            if Instant::now() < entry.expires_at {
                debug!(key = ?key, "📦 Cache hit");
                return Ok(entry.value.clone());
            }
        }

        debug!(key = ?key, "📭 Cache miss, fetching");
        let value = fetch().await?;
        slot.entry = Some(CacheEntry {
            value: value.clone(),
            expires_at: Instant::now() + self.ttl,
        });

        Ok(value)
    }

    /// Drop the entry for one key
    pub async fn remove(&self, key: &K) {
        self.slots.lock().await.remove(key);
    }

    /// Drop every expired entry, bounding key growth
    pub async fn purge_expired(&self) {
        let now = Instant::now();
        let mut slots = self.slots.lock().await;
        let mut expired = Vec::new();

        for (key, slot) in slots.iter() {
            // Skip keys with a fetch in flight rather than wait on them
            if let Ok(slot) = slot.try_lock() {
                match &slot.entry {
                    Some(entry) if entry.expires_at > now => {}
                    _ => expired.push(key.clone()),
                }
            }
        }

        for key in expired {
            slots.remove(&key);
        }
    }

    /// Number of keys currently held (expired or not)
    pub async fn len(&self) -> usize {
        self.slots.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.slots.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatewayError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn five_minutes() -> Duration {
        Duration::from_secs(300)
    }

    #[tokio::test(start_paused = true)]
    async fn second_call_within_ttl_serves_the_cached_value() {
        let cache: ReadThroughCache<i32, Vec<i32>> = ReadThroughCache::new(five_minutes());
        let fetches = AtomicUsize::new(0);

        for _ in 0..2 {
            let value = cache
                .get_or_fetch(11, || async {
                    fetches.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![1, 2, 3])
                })
                .await
                .unwrap();
            assert_eq!(value, vec![1, 2, 3]);
        }

        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_triggers_a_fresh_fetch() {
        let cache: ReadThroughCache<i32, i32> = ReadThroughCache::new(five_minutes());
        let fetches = AtomicUsize::new(0);

        let fetch = || {
            let n = fetches.fetch_add(1, Ordering::SeqCst);
            async move { Ok(n as i32) }
        };

        assert_eq!(cache.get_or_fetch(11, fetch).await.unwrap(), 0);
        tokio::time::advance(Duration::from_secs(301)).await;
        assert_eq!(cache.get_or_fetch(11, fetch).await.unwrap(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn entries_are_never_revalidated_early() {
        let cache: ReadThroughCache<i32, i32> = ReadThroughCache::new(five_minutes());

        cache.get_or_fetch(11, || async { Ok(1) }).await.unwrap();
        tokio::time::advance(Duration::from_secs(299)).await;

        // Still within TTL: the stale-but-unexpired value wins
        let value = cache.get_or_fetch(11, || async { Ok(2) }).await.unwrap();
        assert_eq!(value, 1);
    }

    #[tokio::test]
    async fn failed_fetch_caches_nothing() {
        let cache: ReadThroughCache<i32, i32> = ReadThroughCache::new(five_minutes());

        let result = cache
            .get_or_fetch(11, || async {
                Err::<i32, _>(GatewayError::validation("Invalid Direct Distance Dialing Id"))
            })
            .await;
        assert!(matches!(result, Err(GatewayError::Validation { .. })));

        // The next call fetches again and can succeed
        let value = cache.get_or_fetch(11, || async { Ok(42) }).await.unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn concurrent_misses_converge_on_one_fetch() {
        let cache: Arc<ReadThroughCache<i32, i32>> =
            Arc::new(ReadThroughCache::new(five_minutes()));
        let fetches = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = cache.clone();
            let fetches = fetches.clone();
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_fetch(11, || async move {
                        fetches.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(10)).await;
                        Ok(7)
                    })
                    .await
                    .unwrap()
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap(), 7);
        }
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn purge_expired_drops_only_dead_keys() {
        let cache: ReadThroughCache<i32, i32> = ReadThroughCache::new(five_minutes());

        cache.get_or_fetch(11, || async { Ok(1) }).await.unwrap();
        tokio::time::advance(Duration::from_secs(200)).await;
        cache.get_or_fetch(21, || async { Ok(2) }).await.unwrap();
        tokio::time::advance(Duration::from_secs(150)).await;

        // Key 11 is past its TTL, key 21 is not
        cache.purge_expired().await;
        assert_eq!(cache.len().await, 1);
    }
}
