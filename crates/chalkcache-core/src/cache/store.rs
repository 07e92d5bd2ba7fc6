use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::Utc;
use futures::future::BoxFuture;
use serde_json::Value;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use super::entry::{CacheEntry, EntryView, QueryStatus};
use super::key::CacheKey;
use super::subscription::{ConsumerId, SubscriptionTable};
use super::tag::{Tag, TagIndex};
use crate::api::ApiError;
use crate::config::Config;

/// Payload of one successful fetch: validated data plus the tags the
/// endpoint provides for it.
pub(crate) struct FetchOutcome {
    pub data: Value,
    pub tags: Vec<Tag>,
}

/// Type-erased refetch recipe registered per cache key. Captures the
/// transport, the address, the response schema and the tag declaration, so
/// the store can refresh any entry without knowing its endpoint types.
pub(crate) type Fetcher =
    Arc<dyn Fn() -> BoxFuture<'static, Result<FetchOutcome, ApiError>> + Send + Sync>;

/// Pushed to every listener whenever an entry changes observably.
#[derive(Debug, Clone)]
pub struct CacheEvent {
    pub key: CacheKey,
}

struct Slot {
    entry: CacheEntry,
    fetcher: Fetcher,
}

#[derive(Default)]
struct StoreState {
    slots: HashMap<CacheKey, Slot>,
    tags: TagIndex,
    subs: SubscriptionTable,
}

/// Process-wide cache of query results, keyed by `(operation, canonical
/// arguments)` and indexed by the tags each result provides.
///
/// All state transitions (write, index, invalidate, mount, unmount) are
/// synchronous steps under one lock that is never held across an `.await`;
/// suspension only happens at the transport boundary inside spawned fetch
/// tasks.
#[derive(Clone)]
pub(crate) struct CacheStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    state: Mutex<StoreState>,
    events: broadcast::Sender<CacheEvent>,
    grace_window: Duration,
}

impl CacheStore {
    pub fn new(config: &Config) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity);
        Self {
            inner: Arc::new(StoreInner {
                state: Mutex::new(StoreState::default()),
                events,
                grace_window: config.grace_window,
            }),
        }
    }

    /// Receiver for change notifications. Must be obtained before mounting
    /// so no event between mount and first read is missed.
    pub fn events(&self) -> broadcast::Receiver<CacheEvent> {
        self.inner.events.subscribe()
    }

    /// Mount a consumer on `key`. Creates the entry on first subscription
    /// and triggers a fetch when the entry is new or stale; a fresh entry is
    /// a pure cache hit with no network traffic.
    pub fn subscribe(&self, key: &CacheKey, consumer: ConsumerId, fetcher: Fetcher) {
        let mut state = self.inner.lock_state();
        let count = state.subs.mount(key, consumer);

        let needs_fetch = {
            let slot = state.slots.entry(key.clone()).or_insert_with(|| Slot {
                entry: CacheEntry::new(key.clone()),
                fetcher: Arc::clone(&fetcher),
            });
            // Keep the most recent recipe; identical endpoints build
            // identical fetchers, so this only refreshes captured state.
            slot.fetcher = fetcher;
            matches!(slot.entry.status, QueryStatus::Idle | QueryStatus::Stale)
                && !slot.entry.in_flight
        };

        debug!(key = %key, subscribers = count, "Mounted consumer");

        if needs_fetch {
            self.inner.spawn_fetch(&mut state, key);
        }
    }

    /// Unmount a consumer. The last unmount arms the grace-window eviction
    /// timer; the in-flight fetch, if any, is not aborted and its result is
    /// still cached for whoever is listening when it resolves.
    pub fn unsubscribe(&self, key: &CacheKey, consumer: ConsumerId) {
        self.inner.release(key, consumer);
    }

    /// Current view of an entry, if cached.
    pub fn read(&self, key: &CacheKey) -> Option<EntryView> {
        let state = self.inner.lock_state();
        state.slots.get(key).map(|slot| slot.entry.view())
    }

    pub fn subscriber_count(&self, key: &CacheKey) -> usize {
        self.inner.lock_state().subs.count(key)
    }

    /// Force a refetch of `key` regardless of freshness. No-op for unknown
    /// keys; coalesces with an already running fetch.
    pub fn refetch(&self, key: &CacheKey) {
        let mut state = self.inner.lock_state();
        self.inner.spawn_fetch(&mut state, key);
    }

    /// Mark every entry providing any of `tags` stale, then schedule
    /// background refetches for the ones with active subscribers.
    ///
    /// Marking is synchronous and completes before this returns, so no
    /// reader can observe a mix of pre- and post-mutation data across
    /// entries sharing a tag. The refetches themselves are asynchronous and
    /// unordered relative to each other.
    pub fn invalidate(&self, tags: &[Tag]) {
        let mut state = self.inner.lock_state();
        let keys = state.tags.lookup_all(tags);
        let mut to_refetch = Vec::new();

        for key in &keys {
            let subscribed = state.subs.count(key) > 0;
            let Some(slot) = state.slots.get_mut(key) else {
                continue;
            };
            slot.entry.generation += 1;
            slot.entry.status = QueryStatus::Stale;
            slot.entry.version += 1;
            if subscribed && !slot.entry.in_flight {
                to_refetch.push(key.clone());
            }
        }

        debug!(
            tags = %tags.iter().map(ToString::to_string).collect::<Vec<_>>().join(","),
            affected = keys.len(),
            refetching = to_refetch.len(),
            "Invalidated tags"
        );

        for key in &keys {
            self.inner.notify(key);
        }
        for key in &to_refetch {
            self.inner.spawn_fetch(&mut state, key);
        }
    }
}

impl StoreInner {
    /// A poisoned lock only means another thread panicked mid-step; the
    /// state itself is still structurally sound, so recover the guard.
    fn lock_state(&self) -> MutexGuard<'_, StoreState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn notify(&self, key: &CacheKey) {
        // Send only fails when nobody is listening, which is fine
        let _ = self.events.send(CacheEvent { key: key.clone() });
    }

    /// Dispatch a fetch task for `key` unless one is already in flight.
    /// Existing data stays visible while the fetch runs.
    fn spawn_fetch(self: &Arc<Self>, state: &mut StoreState, key: &CacheKey) {
        let Some(slot) = state.slots.get_mut(key) else {
            return;
        };
        if slot.entry.in_flight {
            return;
        }
        slot.entry.in_flight = true;
        if slot.entry.data.is_none() {
            slot.entry.status = QueryStatus::Loading;
        }
        slot.entry.version += 1;
        let generation = slot.entry.generation;
        let fetcher = Arc::clone(&slot.fetcher);

        debug!(key = %key, generation, "Dispatching fetch");
        self.notify(key);

        let inner = Arc::clone(self);
        let key = key.clone();
        tokio::spawn(async move {
            let result = fetcher().await;
            inner.complete_fetch(&key, generation, result);
        });
    }

    /// Record the outcome of a fetch dispatched at `generation`.
    ///
    /// Data and tags are replaced atomically and the tag index updated in
    /// the same step. A result that raced a newer invalidation is stored
    /// but leaves the entry stale, and re-queues a fetch if anyone is
    /// subscribed; for entries that went away meanwhile it is discarded.
    fn complete_fetch(
        self: &Arc<Self>,
        key: &CacheKey,
        generation: u64,
        result: Result<FetchOutcome, ApiError>,
    ) {
        let mut guard = self.lock_state();
        let state = &mut *guard;
        let subscribed = state.subs.count(key) > 0;
        let Some(slot) = state.slots.get_mut(key) else {
            debug!(key = %key, "Fetch completed for evicted entry, discarding");
            return;
        };
        slot.entry.in_flight = false;
        let superseded = slot.entry.generation != generation;

        let respawn = match result {
            Ok(outcome) => {
                slot.entry.data = Some(Arc::new(outcome.data));
                slot.entry.error = None;
                slot.entry.last_fetched_at = Some(Utc::now());
                slot.entry.tags = outcome.tags.clone();
                slot.entry.status = if superseded {
                    QueryStatus::Stale
                } else {
                    QueryStatus::Success
                };
                slot.entry.version += 1;
                state.tags.index(key, &outcome.tags);
                superseded && subscribed
            }
            Err(err) => {
                warn!(key = %key, error = %err, "Fetch failed");
                slot.entry.error = Some(err);
                // A failure that raced an invalidation leaves the entry
                // stale; a plain failure waits for an explicit refetch.
                slot.entry.status = if superseded {
                    QueryStatus::Stale
                } else {
                    QueryStatus::Error
                };
                slot.entry.version += 1;
                superseded && subscribed
            }
        };

        self.notify(key);
        if respawn {
            debug!(key = %key, "Fetch superseded by invalidation, refetching");
            self.spawn_fetch(state, key);
        }
    }

    /// Unmount bookkeeping; the last consumer arms the eviction timer.
    fn release(self: &Arc<Self>, key: &CacheKey, consumer: ConsumerId) {
        let mut state = self.lock_state();
        let remaining = state.subs.unmount(key, consumer);
        debug!(key = %key, subscribers = remaining, "Unmounted consumer");
        if remaining > 0 {
            return;
        }
        let Some(slot) = state.slots.get_mut(key) else {
            return;
        };
        slot.entry.idle_epoch += 1;
        let epoch = slot.entry.idle_epoch;
        drop(state);
        self.schedule_eviction(key.clone(), epoch);
    }

    /// Retain a zero-subscriber entry for the grace window, then drop it
    /// unless it was remounted (epoch moved on) in the meantime.
    fn schedule_eviction(self: &Arc<Self>, key: CacheKey, epoch: u64) {
        let inner = Arc::clone(self);
        let grace = self.grace_window;
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(grace).await;
                    inner.evict_if_idle(&key, epoch);
                });
            }
            // No runtime means the application is tearing down; skip the
            // grace period and drop the entry now.
            Err(_) => inner.evict_if_idle(&key, epoch),
        }
    }

    fn evict_if_idle(&self, key: &CacheKey, epoch: u64) {
        let mut state = self.lock_state();
        if state.subs.count(key) > 0 {
            return;
        }
        let still_idle = state
            .slots
            .get(key)
            .is_some_and(|slot| slot.entry.idle_epoch == epoch);
        if !still_idle {
            return;
        }
        state.slots.remove(key);
        state.tags.remove(key);
        state.subs.forget(key);
        debug!(key = %key, "Evicted idle entry");
    }
}
