//! Memoized preview details
//!
//! Hovering the same card twice must not cost a second request, and a burst
//! of hovers over one card must not cost more than one. Completed lookups
//! live in `ready`; lookups still on the wire live in `pending` as a shared
//! future that every concurrent caller awaits. Failures are handed to the
//! callers that were waiting and then forgotten, so the next hover retries.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt, Shared, join_all};
use marquee_model::{MediaDetails, MediaType};
use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::{debug, trace, warn};

use crate::providers::{CategorySource, ProviderError};

/// Outcome shared by every caller that awaited the same lookup.
pub type DetailResult = Result<Arc<MediaDetails>, Arc<ProviderError>>;

type PendingFetch = Shared<BoxFuture<'static, DetailResult>>;

/// TMDB ids are only unique within a media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DetailKey {
    pub id: u64,
    pub media_type: MediaType,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Served from a fresh entry
    pub hits: u64,
    /// Started a request
    pub misses: u64,
    /// Joined a request already in flight
    pub joined: u64,
    pub entries: usize,
    pub in_flight: usize,
}

#[derive(Debug)]
struct CachedEntry {
    details: Arc<MediaDetails>,
    fetched_at: Instant,
}

struct Pending {
    /// Epoch the request was started in; see [`Inner::epoch`].
    epoch: u64,
    fetch: PendingFetch,
}

#[derive(Default)]
struct Inner {
    ready: HashMap<DetailKey, CachedEntry>,
    pending: HashMap<DetailKey, Pending>,
    /// Bumped by `clear` so requests started before it neither publish
    /// their result nor evict a newer request for the same key.
    epoch: u64,
    stats: CacheStats,
}

#[derive(Clone)]
pub struct DetailCache {
    source: Arc<dyn CategorySource>,
    ttl: Option<Duration>,
    inner: Arc<Mutex<Inner>>,
}

impl std::fmt::Debug for DetailCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailCache")
            .field("ttl", &self.ttl)
            .field("stats", &self.stats())
            .finish()
    }
}

impl DetailCache {
    /// `ttl` of `None` keeps entries for the lifetime of the cache.
    pub fn new(source: Arc<dyn CategorySource>, ttl: Option<Duration>) -> Self {
        Self {
            source,
            ttl,
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    /// Details for `id`, fetching at most once no matter how many callers
    /// ask concurrently.
    pub async fn get(&self, id: u64, media_type: MediaType) -> DetailResult {
        let key = DetailKey { id, media_type };
        let fetch = {
            let mut inner = self.inner.lock();

            if let Some(entry) = inner.ready.get(&key) {
                if self.is_fresh(entry) {
                    let details = Arc::clone(&entry.details);
                    inner.stats.hits += 1;
                    trace!(id, %media_type, "detail cache hit");
                    return Ok(details);
                }
                inner.ready.remove(&key);
                debug!(id, %media_type, "detail cache entry expired");
            }

            if let Some(pending) = inner.pending.get(&key) {
                let fetch = pending.fetch.clone();
                inner.stats.joined += 1;
                trace!(id, %media_type, "joining in-flight detail request");
                fetch
            } else {
                inner.stats.misses += 1;
                let epoch = inner.epoch;
                let fetch = self.start_fetch(key, epoch);
                inner.pending.insert(
                    key,
                    Pending {
                        epoch,
                        fetch: fetch.clone(),
                    },
                );
                fetch
            }
        };

        fetch.await
    }

    /// Resolve every key concurrently, each through [`DetailCache::get`].
    /// Failed lookups are left out; the rest keep their input order.
    pub async fn get_many(
        &self,
        keys: &[DetailKey],
    ) -> Vec<Arc<MediaDetails>> {
        let lookups = keys.iter().map(|k| self.get(k.id, k.media_type));
        let results = join_all(lookups).await;
        results
            .into_iter()
            .zip(keys)
            .filter_map(|(result, key)| match result {
                Ok(details) => Some(details),
                Err(err) => {
                    debug!(
                        id = key.id,
                        media_type = %key.media_type,
                        "skipping failed detail lookup: {err}"
                    );
                    None
                }
            })
            .collect()
    }

    /// Fresh cached value without touching the network.
    pub fn peek(
        &self,
        id: u64,
        media_type: MediaType,
    ) -> Option<Arc<MediaDetails>> {
        let inner = self.inner.lock();
        inner
            .ready
            .get(&DetailKey { id, media_type })
            .filter(|entry| self.is_fresh(entry))
            .map(|entry| Arc::clone(&entry.details))
    }

    /// Drop the cached value for one title. A request already in flight is
    /// left alone.
    pub fn invalidate(&self, id: u64, media_type: MediaType) {
        self.inner.lock().ready.remove(&DetailKey { id, media_type });
    }

    /// Forget everything, including requests still in flight. Their callers
    /// still receive the result, but it is not stored.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.ready.clear();
        inner.pending.clear();
        inner.epoch += 1;
    }

    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        CacheStats {
            entries: inner.ready.len(),
            in_flight: inner.pending.len(),
            ..inner.stats
        }
    }

    fn is_fresh(&self, entry: &CachedEntry) -> bool {
        self.ttl.is_none_or(|ttl| entry.fetched_at.elapsed() < ttl)
    }

    fn start_fetch(&self, key: DetailKey, epoch: u64) -> PendingFetch {
        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.inner);

        async move {
            let result = source
                .fetch_details(key.id, key.media_type)
                .await
                .map(Arc::new)
                .map_err(Arc::new);

            let mut inner = state.lock();
            if inner.pending.get(&key).is_some_and(|p| p.epoch == epoch) {
                inner.pending.remove(&key);
            }
            match &result {
                Ok(details) if inner.epoch == epoch => {
                    inner.ready.insert(
                        key,
                        CachedEntry {
                            details: Arc::clone(details),
                            fetched_at: Instant::now(),
                        },
                    );
                }
                Ok(_) => trace!(id = key.id, "discarding stale detail fetch"),
                Err(err) if err.is_transient() => debug!(
                    id = key.id,
                    media_type = %key.media_type,
                    "detail lookup failed, will retry on next request: {err}"
                ),
                Err(err) => warn!(
                    id = key.id,
                    media_type = %key.media_type,
                    "detail lookup failed: {err}"
                ),
            }
            result
        }
        .boxed()
        .shared()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use marquee_model::{CategoryKey, MediaItem};

    use super::*;

    /// Source that counts detail calls, takes 50ms per call and fails the
    /// first `failures` calls.
    #[derive(Default)]
    struct SlowSource {
        calls: AtomicUsize,
        failures: usize,
    }

    #[async_trait]
    impl CategorySource for SlowSource {
        async fn fetch_category(
            &self,
            _key: CategoryKey,
        ) -> Result<Vec<MediaItem>, ProviderError> {
            Ok(Vec::new())
        }

        async fn fetch_details(
            &self,
            id: u64,
            media_type: MediaType,
        ) -> Result<MediaDetails, ProviderError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(50)).await;
            if call < self.failures {
                return Err(ProviderError::RateLimited);
            }
            Ok(MediaDetails {
                id,
                media_type,
                title: format!("Title {id}"),
                overview: String::new(),
                tagline: None,
                runtime: Some(100),
                number_of_seasons: None,
                genres: Vec::new(),
                vote_average: 7.0,
                poster_path: None,
                backdrop_path: None,
            })
        }
    }

    fn cache(
        failures: usize,
        ttl: Option<Duration>,
    ) -> (DetailCache, Arc<SlowSource>) {
        let source = Arc::new(SlowSource {
            calls: AtomicUsize::new(0),
            failures,
        });
        (DetailCache::new(source.clone(), ttl), source)
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_callers_share_one_request() {
        let (cache, source) = cache(0, None);
        let (a, b, c) = tokio::join!(
            cache.get(1, MediaType::Movie),
            cache.get(1, MediaType::Movie),
            cache.get(1, MediaType::Movie),
        );

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        let (a, b, c) = (a.expect("ok"), b.expect("ok"), c.expect("ok"));
        assert!(Arc::ptr_eq(&a, &b) && Arc::ptr_eq(&b, &c));

        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.joined, 2);
        assert_eq!(stats.in_flight, 0);
        assert_eq!(stats.entries, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn completed_lookups_are_memoized() {
        let (cache, source) = cache(0, None);
        cache.get(5, MediaType::Tv).await.expect("ok");
        cache.get(5, MediaType::Tv).await.expect("ok");
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.stats().hits, 1);
        assert!(cache.peek(5, MediaType::Tv).is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn same_id_different_media_type_is_a_different_title() {
        let (cache, source) = cache(0, None);
        cache.get(5, MediaType::Tv).await.expect("ok");
        cache.get(5, MediaType::Movie).await.expect("ok");
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_callers_see_the_same_failure_and_it_is_not_kept() {
        let (cache, source) = cache(1, None);
        let (a, b) = tokio::join!(
            cache.get(9, MediaType::Movie),
            cache.get(9, MediaType::Movie)
        );
        let (a, b) = (a.expect_err("fails"), b.expect_err("fails"));
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert!(cache.peek(9, MediaType::Movie).is_none());

        cache.get(9, MediaType::Movie).await.expect("retry succeeds");
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn expired_entries_are_refetched() {
        let (cache, source) = cache(0, Some(Duration::from_secs(60)));
        cache.get(1, MediaType::Movie).await.expect("ok");

        tokio::time::advance(Duration::from_secs(30)).await;
        cache.get(1, MediaType::Movie).await.expect("ok");
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(31)).await;
        assert!(cache.peek(1, MediaType::Movie).is_none());
        cache.get(1, MediaType::Movie).await.expect("ok");
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn invalidate_forces_a_refetch() {
        let (cache, source) = cache(0, None);
        cache.get(1, MediaType::Movie).await.expect("ok");
        cache.invalidate(1, MediaType::Movie);
        cache.get(1, MediaType::Movie).await.expect("ok");
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn clear_during_flight_does_not_store_stale_result() {
        let (cache, _source) = cache(0, None);
        let lookup = cache.get(1, MediaType::Movie);
        let clearer = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            cache.clear();
        };
        let (result, ()) = tokio::join!(lookup, clearer);
        result.expect("caller still gets the value");
        assert_eq!(cache.stats().entries, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn get_many_keeps_order_and_dedups() {
        let (cache, source) = cache(0, None);
        let keys = [
            DetailKey { id: 3, media_type: MediaType::Movie },
            DetailKey { id: 1, media_type: MediaType::Movie },
            DetailKey { id: 3, media_type: MediaType::Movie },
        ];
        let details = cache.get_many(&keys).await;
        let ids: Vec<u64> = details.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![3, 1, 3]);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn get_many_skips_failures() {
        let (cache, _source) = cache(1, None);
        let keys = [
            DetailKey { id: 1, media_type: MediaType::Movie },
            DetailKey { id: 2, media_type: MediaType::Movie },
        ];
        let details = cache.get_many(&keys).await;
        assert_eq!(details.len(), 1);
    }
}
