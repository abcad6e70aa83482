use crate::core::fallback;
use crate::core::slot::Slot;
use crate::core::{
    ConfigProvider, DashboardSnapshot, EnvironmentalReading, NearBodyRecord, OrbitalPosition,
    SpaceDataSource,
};
use crate::utils::error::{AstroError, Result};
use chrono::{NaiveDate, Utc};
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

#[derive(Debug, Clone, PartialEq)]
pub struct RefreshSettings {
    pub interval: Duration,
    pub near_body_limit: usize,
}

impl RefreshSettings {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            interval: config.refresh_interval(),
            near_body_limit: config.near_body_limit(),
        }
    }
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            near_body_limit: 3,
        }
    }
}

struct SharedState {
    orbital: Slot<OrbitalPosition>,
    near_bodies: Slot<Vec<NearBodyRecord>>,
    environment: Slot<EnvironmentalReading>,
    loading: AtomicBool,
    started_at: AtomicI64,
    torn_down: AtomicBool,
    revision: watch::Sender<u64>,
}

impl SharedState {
    fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            orbital: Slot::new(),
            near_bodies: Slot::new(),
            environment: Slot::new(),
            loading: AtomicBool::new(false),
            started_at: AtomicI64::new(0),
            torn_down: AtomicBool::new(false),
            revision,
        }
    }

    fn commit<T: Clone>(&self, slot: &Slot<T>, seq: u64, value: T, label: &str) {
        // In-flight fetches outlive the controller; their results go nowhere.
        if self.torn_down.load(Ordering::SeqCst) {
            tracing::debug!("Discarding {} result #{} after teardown", label, seq);
            return;
        }

        if slot.commit(seq, value) {
            self.revision.send_modify(|revision| *revision += 1);
        } else {
            tracing::debug!("Discarding stale {} result #{}", label, seq);
        }
    }
}

/// Keeps the dashboard's three data slots populated.
///
/// The orbital position is refetched on every tick of the refresh timer. The
/// near-body catalog is fetched once and the environmental reading is generated
/// once, both during [`start`](Self::start). Fetch failures are never surfaced:
/// the slot receives a fixed fallback value instead.
pub struct DataRefreshController<S: SpaceDataSource + 'static> {
    source: Arc<S>,
    settings: RefreshSettings,
    shared: Arc<SharedState>,
    started: AtomicBool,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl<S: SpaceDataSource + 'static> DataRefreshController<S> {
    pub fn new(source: S, settings: RefreshSettings) -> Self {
        Self::with_shared_source(Arc::new(source), settings)
    }

    pub fn with_shared_source(source: Arc<S>, settings: RefreshSettings) -> Self {
        Self {
            source,
            settings,
            shared: Arc::new(SharedState::new()),
            started: AtomicBool::new(false),
            timer: Mutex::new(None),
        }
    }

    /// Issues the initial loads and schedules the orbital refresh timer.
    ///
    /// Only the first call has any effect, even after [`stop`](Self::stop).
    /// Must be called from within a tokio runtime.
    pub fn start(&self) -> Result<()> {
        tokio::runtime::Handle::try_current().map_err(|e| AstroError::RuntimeUnavailable {
            message: e.to_string(),
        })?;

        if self.settings.interval.is_zero() {
            return Err(AstroError::InvalidConfigValueError {
                field: "refresh.interval_seconds".to_string(),
                value: "0".to_string(),
                reason: "Refresh interval must be positive".to_string(),
            });
        }

        if self.started.swap(true, Ordering::SeqCst) {
            tracing::debug!("Refresh controller already started");
            return Ok(());
        }

        let shared = &self.shared;
        shared.loading.store(true, Ordering::SeqCst);

        let now = Utc::now();
        shared.started_at.store(now.timestamp(), Ordering::SeqCst);
        tracing::info!(
            "Starting data refresh (orbital every {:?}, catalog limit {})",
            self.settings.interval,
            self.settings.near_body_limit
        );

        spawn_orbital_refresh(Arc::clone(&self.source), Arc::clone(shared));
        spawn_near_body_load(
            Arc::clone(&self.source),
            Arc::clone(shared),
            now.date_naive(),
            self.settings.near_body_limit,
        );

        let seq = shared.environment.issue();
        shared.commit(
            &shared.environment,
            seq,
            fallback::environmental_reading(),
            "environmental reading",
        );

        shared.loading.store(false, Ordering::SeqCst);

        let period = self.settings.interval;
        let source = Arc::clone(&self.source);
        let timer_shared = Arc::clone(shared);
        let timer = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                tracing::debug!("Refresh tick");
                spawn_orbital_refresh(Arc::clone(&source), Arc::clone(&timer_shared));
            }
        });
        *self.timer_guard() = Some(timer);

        Ok(())
    }

    /// Cancels the refresh timer. Fetches already in flight still complete.
    pub fn stop(&self) {
        if let Some(timer) = self.timer_guard().take() {
            timer.abort();
            tracing::info!("Data refresh stopped");
        }
    }

    pub fn orbital_position(&self) -> Option<OrbitalPosition> {
        self.shared.orbital.get()
    }

    pub fn near_body_records(&self) -> Vec<NearBodyRecord> {
        self.shared.near_bodies.get().unwrap_or_default()
    }

    pub fn environmental_reading(&self) -> Option<EnvironmentalReading> {
        self.shared.environment.get()
    }

    pub fn is_loading(&self) -> bool {
        self.shared.loading.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            orbital_position: self.orbital_position(),
            near_bodies: self.near_body_records(),
            environment: self.environmental_reading(),
            loading: self.is_loading(),
        }
    }

    /// Revision counter bumped on every committed slot write.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.shared.revision.subscribe()
    }

    pub fn orbital_fetches_issued(&self) -> u64 {
        self.shared.orbital.issued_count()
    }

    fn timer_guard(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.timer.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<S: SpaceDataSource + 'static> Drop for DataRefreshController<S> {
    fn drop(&mut self) {
        self.shared.torn_down.store(true, Ordering::SeqCst);
        if let Some(timer) = self.timer_guard().take() {
            timer.abort();
        }
    }
}

// Upstream trouble is expected and only warned about. Anything else points at a local fault.
fn report_fetch_error(what: &str, e: &AstroError) {
    if e.is_fetch_failure() {
        tracing::warn!(category = ?e.category(), "{} failed, showing fallback: {}", what, e);
    } else {
        tracing::error!(category = ?e.category(), "{} hit a non-fetch error, showing fallback: {}", what, e);
    }
}

// Fire and forget: a slow fetch is not waited on by the next tick.
fn spawn_orbital_refresh<S: SpaceDataSource + 'static>(source: Arc<S>, shared: Arc<SharedState>) {
    let seq = shared.orbital.issue();
    tokio::spawn(async move {
        let position = match source.fetch_orbital_position().await {
            Ok(position) => position,
            Err(e) => {
                report_fetch_error(&format!("Orbital position fetch #{}", seq), &e);
                fallback::orbital_position(shared.started_at.load(Ordering::SeqCst))
            }
        };
        shared.commit(&shared.orbital, seq, position, "orbital position");
    });
}

fn spawn_near_body_load<S: SpaceDataSource + 'static>(
    source: Arc<S>,
    shared: Arc<SharedState>,
    date: NaiveDate,
    limit: usize,
) {
    let seq = shared.near_bodies.issue();
    tokio::spawn(async move {
        let records = match source.fetch_near_bodies(date).await {
            Ok(mut records) => {
                tracing::debug!("Fetched {} near-earth objects for {}", records.len(), date);
                records.truncate(limit);
                records
            }
            Err(e) => {
                report_fetch_error("Near-earth object fetch", &e);
                fallback::near_bodies()
            }
        };
        shared.commit(&shared.near_bodies, seq, records, "near-body catalog");
    });
}
