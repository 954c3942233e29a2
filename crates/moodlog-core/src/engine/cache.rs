//! Single-slot cache holding the latest [`StatisticsState`].
//!
//! Change signals (`snapshot_changed`, `filters_changed`) only record the
//! newest input and bump a generation counter, so bursts of changes coalesce
//! into one aggregation at the next `flush`. A computed state is published
//! only while its generation is still the newest; anything superseded while
//! it was being computed is dropped unseen.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use chrono::{Local, NaiveDate, Utc};
use sha2::{Digest, Sha256};

use super::aggregate::{recompute, StatsConfig};
use super::cards::HighlightsReport;
use super::highlight::{HighlightSelector, Metric};
use super::state::StatisticsState;
use crate::events::Event;
use crate::journal::{FilterParams, Snapshot};

pub type Subscriber = Arc<dyn Fn(&Event) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Result of trying to refresh the cached state.
#[derive(Debug, Clone, PartialEq)]
pub enum FlushOutcome {
    /// A new state replaced the previous one.
    Published(Arc<StatisticsState>),
    /// Input identical to the current state's; nothing was recomputed.
    Unchanged(Arc<StatisticsState>),
    /// A newer change arrived while computing; the result was dropped.
    Discarded { generation: u64, latest: u64 },
    /// No snapshot has been provided yet.
    NoSnapshot,
}

/// Input captured for one aggregation pass.
#[derive(Debug, Clone)]
pub struct RecomputeJob {
    generation: u64,
    snapshot: Arc<Snapshot>,
    filters: FilterParams,
    today: NaiveDate,
    fingerprint: Option<String>,
}

impl RecomputeJob {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Run every calculator. Holds no cache lock.
    pub fn run(self, config: &StatsConfig) -> ComputedState {
        let state = recompute(&self.snapshot, &self.filters, self.today, config);
        ComputedState {
            generation: self.generation,
            fingerprint: self.fingerprint,
            state,
        }
    }
}

/// A state waiting to be published.
#[derive(Debug, Clone)]
pub struct ComputedState {
    generation: u64,
    fingerprint: Option<String>,
    state: StatisticsState,
}

struct Pending {
    snapshot: Option<Arc<Snapshot>>,
    filters: FilterParams,
    generation: u64,
}

struct Published {
    state: Arc<StatisticsState>,
    generation: u64,
    fingerprint: Option<String>,
}

pub struct StatisticsCache {
    config: StatsConfig,
    selector: HighlightSelector,
    published: RwLock<Published>,
    pending: Mutex<Pending>,
    subscribers: Mutex<Vec<(SubscriptionId, Subscriber)>>,
    next_subscription: AtomicU64,
}

impl StatisticsCache {
    pub fn new(config: StatsConfig) -> Self {
        Self {
            selector: HighlightSelector::new(config.thresholds),
            config,
            published: RwLock::new(Published {
                state: Arc::new(StatisticsState::unloaded()),
                generation: 0,
                fingerprint: None,
            }),
            pending: Mutex::new(Pending {
                snapshot: None,
                filters: FilterParams::default(),
                generation: 0,
            }),
            subscribers: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(1),
        }
    }

    pub fn config(&self) -> &StatsConfig {
        &self.config
    }

    pub fn selector(&self) -> &HighlightSelector {
        &self.selector
    }

    /// The latest published state. Unloaded until the first flush succeeds.
    pub fn current(&self) -> Arc<StatisticsState> {
        Arc::clone(&self.read_published().state)
    }

    /// Generation of the newest recorded change.
    pub fn generation(&self) -> u64 {
        self.lock_pending().generation
    }

    pub fn snapshot_changed(&self, snapshot: impl Into<Arc<Snapshot>>) -> u64 {
        let snapshot = snapshot.into();
        let items_count = snapshot.items.len();
        let generation = {
            let mut pending = self.lock_pending();
            pending.generation += 1;
            pending.snapshot = Some(snapshot);
            pending.generation
        };
        tracing::debug!(generation, items_count, "snapshot changed");
        self.notify(&Event::SnapshotChanged {
            generation,
            items_count,
            at: Utc::now(),
        });
        generation
    }

    pub fn filters_changed(&self, filters: FilterParams) -> u64 {
        let filters_active = filters.is_active();
        let generation = {
            let mut pending = self.lock_pending();
            pending.generation += 1;
            pending.filters = filters;
            pending.generation
        };
        tracing::debug!(generation, filters_active, "filters changed");
        self.notify(&Event::FiltersChanged {
            generation,
            filters_active,
            at: Utc::now(),
        });
        generation
    }

    /// Capture the newest input. `None` until a snapshot has been recorded.
    pub fn begin(&self, today: NaiveDate) -> Option<RecomputeJob> {
        let (generation, snapshot, filters) = {
            let pending = self.lock_pending();
            let snapshot = Arc::clone(pending.snapshot.as_ref()?);
            (pending.generation, snapshot, pending.filters.clone())
        };
        let fingerprint = fingerprint(&snapshot, &filters, today);
        Some(RecomputeJob {
            generation,
            snapshot,
            filters,
            today,
            fingerprint,
        })
    }

    /// Swap in `computed` unless a newer change superseded it.
    pub fn publish(&self, computed: ComputedState) -> FlushOutcome {
        let ComputedState {
            generation,
            fingerprint,
            state,
        } = computed;

        let published = {
            let mut published = self.write_published();
            let latest = self.lock_pending().generation;
            if generation < latest || generation < published.generation {
                tracing::debug!(generation, latest, "discarding superseded statistics");
                return FlushOutcome::Discarded {
                    generation,
                    latest: latest.max(published.generation),
                };
            }
            published.state = Arc::new(state);
            published.generation = generation;
            published.fingerprint = fingerprint;
            Arc::clone(&published.state)
        };

        tracing::info!(
            generation,
            items_count = published.items_count,
            "statistics replaced"
        );
        self.notify(&Event::StatisticsReplaced {
            generation,
            items_count: published.items_count,
            at: Utc::now(),
        });
        FlushOutcome::Published(published)
    }

    /// Aggregate the newest input and publish it.
    pub fn flush(&self, today: NaiveDate) -> FlushOutcome {
        let Some(job) = self.begin(today) else {
            return FlushOutcome::NoSnapshot;
        };

        if let Some(state) = self.reuse_if_unchanged(&job) {
            return FlushOutcome::Unchanged(state);
        }

        let computed = job.run(&self.config);
        self.publish(computed)
    }

    /// [`flush`](Self::flush) anchored on the local calendar day.
    pub fn flush_now(&self) -> FlushOutcome {
        self.flush(Local::now().date_naive())
    }

    /// Record both inputs and flush once.
    pub fn update(
        &self,
        snapshot: impl Into<Arc<Snapshot>>,
        filters: FilterParams,
        today: NaiveDate,
    ) -> FlushOutcome {
        self.snapshot_changed(snapshot);
        self.filters_changed(filters);
        self.flush(today)
    }

    pub fn is_available(&self, metric: Metric) -> bool {
        self.selector.is_available(&self.current(), metric)
    }

    pub fn is_highlighted(&self, metric: Metric) -> bool {
        self.selector.is_highlighted(&self.current(), metric)
    }

    pub fn highlights(&self) -> HighlightsReport {
        self.selector.highlight_cards(&self.current())
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.lock_subscribers().push((id, Arc::new(callback)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.lock_subscribers();
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() != before
    }

    fn reuse_if_unchanged(&self, job: &RecomputeJob) -> Option<Arc<StatisticsState>> {
        let fingerprint = job.fingerprint.as_ref()?;
        let mut published = self.write_published();
        if !published.state.loaded || published.fingerprint.as_ref() != Some(fingerprint) {
            return None;
        }
        published.generation = published.generation.max(job.generation);
        tracing::debug!(generation = job.generation, "input unchanged, keeping statistics");
        Some(Arc::clone(&published.state))
    }

    // Callbacks run outside every lock so they may read the cache.
    fn notify(&self, event: &Event) {
        let subscribers: Vec<Subscriber> = self
            .lock_subscribers()
            .iter()
            .map(|(_, s)| Arc::clone(s))
            .collect();
        for subscriber in subscribers {
            subscriber(event);
        }
    }

    fn read_published(&self) -> std::sync::RwLockReadGuard<'_, Published> {
        self.published.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_published(&self) -> std::sync::RwLockWriteGuard<'_, Published> {
        self.published.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_pending(&self) -> MutexGuard<'_, Pending> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_subscribers(&self) -> MutexGuard<'_, Vec<(SubscriptionId, Subscriber)>> {
        self.subscribers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for StatisticsCache {
    fn default() -> Self {
        Self::new(StatsConfig::default())
    }
}

/// SHA-256 over the serialized input. `None` if serialization fails, which
/// simply disables reuse for that pass.
fn fingerprint(snapshot: &Snapshot, filters: &FilterParams, today: NaiveDate) -> Option<String> {
    let mut hasher = Sha256::new();
    serde_json::to_writer(&mut hasher, &(snapshot, filters, today)).ok()?;
    Some(format!("{:x}", hasher.finalize()))
}
