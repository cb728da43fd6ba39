//! In-memory TTL cache with single-flight recomputation, backed by moka

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use metrics::counter;
use moka::future::Cache as MokaCache;
use tokio::sync::watch;
use tracing::debug;

use crate::domain::cache::{CacheInfo, Clock, SystemClock};
use crate::domain::DomainError;

/// Default time-to-live for cached values (12 hours)
pub const DEFAULT_TTL: Duration = Duration::from_secs(12 * 60 * 60);

/// Configuration for in-memory cache
#[derive(Debug, Clone)]
pub struct InMemoryCacheConfig {
    /// Age at which an entry becomes stale, applied to every key
    pub ttl: Duration,
    /// Maximum number of entries
    pub max_capacity: u64,
}

impl Default for InMemoryCacheConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            max_capacity: 1_000,
        }
    }
}

impl InMemoryCacheConfig {
    /// Sets the time-to-live
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets the maximum number of entries
    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = capacity;
        self
    }
}

/// Value stored in moka, replaced wholesale on every recomputation
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    computed_at: DateTime<Utc>,
    /// Invalidation epoch of the key when the recomputation started
    epoch: u64,
}

/// `None` until the flight completes
type Outcome<V> = Option<Result<V, DomainError>>;

/// A recomputation in progress; every caller of the key subscribes to its outcome
#[derive(Clone)]
struct Flight<V> {
    id: u64,
    epoch: u64,
    outcome: watch::Receiver<Outcome<V>>,
}

struct KeyState<V> {
    epoch: u64,
    flight: Option<Flight<V>>,
}

impl<V> Default for KeyState<V> {
    fn default() -> Self {
        Self {
            epoch: 0,
            flight: None,
        }
    }
}

struct Shared<V> {
    entries: MokaCache<String, CacheEntry<V>>,
    keys: Mutex<HashMap<String, KeyState<V>>>,
    next_flight: AtomicU64,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    ttl_delta: TimeDelta,
}

impl<V> Shared<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn keys(&self) -> MutexGuard<'_, HashMap<String, KeyState<V>>> {
        self.keys.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn epoch(&self, key: &str) -> u64 {
        self.keys().get(key).map_or(0, |state| state.epoch)
    }

    fn bump_epoch(&self, key: Option<&str>) {
        let mut keys = self.keys();

        match key {
            Some(key) => {
                if let Some(state) = keys.get_mut(key) {
                    state.epoch += 1;
                }
            }
            None => keys.values_mut().for_each(|state| state.epoch += 1),
        }
    }

    /// Stored entry, unless the key was invalidated after it was computed
    async fn current(&self, key: &str) -> Option<CacheEntry<V>> {
        let entry = self.entries.get(key).await?;
        (entry.epoch == self.epoch(key)).then_some(entry)
    }

    fn is_fresh(&self, entry: &CacheEntry<V>, now: DateTime<Utc>) -> bool {
        let age = (now - entry.computed_at).to_std().unwrap_or_default();
        age < self.ttl
    }

    async fn fresh(&self, key: &str) -> Option<V> {
        let entry = self.current(key).await?;
        self.is_fresh(&entry, self.clock.now()).then_some(entry.value)
    }

    /// Joins the live flight of the current epoch, or registers a new one and
    /// hands back the sender that must publish its outcome.
    fn join_or_start(&self, key: &str) -> (Flight<V>, Option<watch::Sender<Outcome<V>>>) {
        let mut keys = self.keys();
        let state = keys.entry(key.to_string()).or_default();

        // A closed channel means the leading task died without publishing
        if let Some(flight) = &state.flight {
            if flight.epoch == state.epoch && flight.outcome.has_changed().is_ok() {
                return (flight.clone(), None);
            }
        }

        let (sender, outcome) = watch::channel(None);
        let flight = Flight {
            id: self.next_flight.fetch_add(1, Ordering::Relaxed),
            epoch: state.epoch,
            outcome,
        };
        state.flight = Some(flight.clone());

        (flight, Some(sender))
    }

    fn finish(&self, key: &str, flight_id: u64) {
        let mut keys = self.keys();

        if let Some(state) = keys.get_mut(key) {
            if state.flight.as_ref().is_some_and(|f| f.id == flight_id) {
                state.flight = None;
            }
        }
    }

    async fn recompute<F, Fut>(&self, key: &str, epoch: u64, recompute: F) -> Result<V, DomainError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, DomainError>>,
    {
        // The previous flight may have landed between the caller's check and this one
        if let Some(value) = self.fresh(key).await {
            debug!(key = %key, "Cache refreshed by concurrent caller");
            counter!("catalog_cache_hits_total", "key" => key.to_string()).increment(1);
            return Ok(value);
        }

        debug!(key = %key, "Cache miss, recomputing");
        counter!("catalog_cache_misses_total", "key" => key.to_string()).increment(1);

        let computed_at = self.clock.now();
        let value = recompute().await?;

        if self.epoch(key) == epoch {
            self.entries
                .insert(
                    key.to_string(),
                    CacheEntry {
                        value: value.clone(),
                        computed_at,
                        epoch,
                    },
                )
                .await;
        } else {
            debug!(key = %key, "Key invalidated during recomputation, result not stored");
        }

        Ok(value)
    }
}

/// Thread-safe TTL cache for computed values
///
/// Features:
/// - One TTL for every key, fixed at construction
/// - At most one recomputation in flight per key; concurrent callers of a
///   stale key wait for it and share its result, failures included
/// - Recomputation runs on its own task, so a caller that gives up does not
///   cancel it and the result still lands in the cache
/// - A failed recomputation leaves the previous entry in place
/// - Invalidation discards results of recomputations already in flight
pub struct InMemoryCache<V> {
    shared: Arc<Shared<V>>,
}

impl<V> std::fmt::Debug for InMemoryCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCache")
            .field("ttl", &self.shared.ttl)
            .field("clock", &self.shared.clock)
            .finish_non_exhaustive()
    }
}

impl<V> InMemoryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Creates a cache that reads the system clock
    pub fn new(config: InMemoryCacheConfig) -> Result<Self, DomainError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a cache with an explicit time source
    pub fn with_clock(
        config: InMemoryCacheConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, DomainError> {
        if config.ttl.is_zero() {
            return Err(DomainError::configuration("Cache TTL must be greater than zero"));
        }

        let ttl_delta = TimeDelta::from_std(config.ttl).map_err(|e| {
            DomainError::configuration(format!("Cache TTL {:?} is out of range: {}", config.ttl, e))
        })?;

        let entries = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .build();

        Ok(Self {
            shared: Arc::new(Shared {
                entries,
                keys: Mutex::new(HashMap::new()),
                next_flight: AtomicU64::new(0),
                clock,
                ttl: config.ttl,
                ttl_delta,
            }),
        })
    }

    /// Returns the fresh value for `key`, recomputing it when absent or stale.
    ///
    /// Errors from `recompute` are handed to every caller waiting on that
    /// recomputation and nothing is stored.
    pub async fn get<F, Fut>(&self, key: &str, recompute: F) -> Result<V, DomainError>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<V, DomainError>> + Send + 'static,
    {
        if let Some(value) = self.shared.fresh(key).await {
            debug!(key = %key, "Cache hit");
            counter!("catalog_cache_hits_total", "key" => key.to_string()).increment(1);
            return Ok(value);
        }

        let (flight, sender) = self.shared.join_or_start(key);

        match sender {
            Some(sender) => {
                let shared = Arc::clone(&self.shared);
                let key = key.to_string();
                let (id, epoch) = (flight.id, flight.epoch);

                tokio::spawn(async move {
                    let result = shared.recompute(&key, epoch, recompute).await;
                    shared.finish(&key, id);
                    sender.send_replace(Some(result));
                });
            }
            None => debug!(key = %key, "Waiting on in-flight recomputation"),
        }

        wait_for_outcome(flight.outcome).await
    }

    /// Removes `key`, or every entry when no key is given. Recomputations
    /// already running for the removed keys no longer populate the cache.
    pub async fn invalidate(&self, key: Option<&str>) {
        self.shared.bump_epoch(key);

        match key {
            Some(key) => {
                debug!(key = %key, "Invalidating cache entry");
                self.shared.entries.invalidate(key).await;
            }
            None => {
                debug!("Invalidating all cache entries");
                self.shared.entries.invalidate_all();
            }
        }
    }

    /// Whether a non-expired entry exists for `key`
    pub async fn is_cached(&self, key: &str) -> bool {
        self.shared.fresh(key).await.is_some()
    }

    /// Freshness descriptor for `key`; never recomputes
    pub async fn get_cache_info(&self, key: &str) -> CacheInfo {
        match self.shared.current(key).await {
            Some(entry) => CacheInfo::present(
                entry.computed_at,
                self.shared.ttl,
                self.shared.ttl_delta,
                self.shared.clock.now(),
            ),
            None => CacheInfo::absent(),
        }
    }
}

async fn wait_for_outcome<V: Clone>(
    mut outcome: watch::Receiver<Outcome<V>>,
) -> Result<V, DomainError> {
    let published = outcome
        .wait_for(Option::is_some)
        .await
        .map(|current| (*current).clone())
        .map_err(|_| DomainError::internal("Cache recomputation task ended without a result"))?;

    published.unwrap_or_else(|| {
        Err(DomainError::internal("Cache recomputation task ended without a result"))
    })
}
