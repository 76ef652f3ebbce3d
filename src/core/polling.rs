//! Polling synchronizer.
//!
//! It keeps the torrent list and the tracker statistics in sync with the
//! tracker by fetching both on every tick of a [`Ticker`]. The two
//! collections are independent:
//!
//! - A failure in one of them does not affect the other.
//! - A failed fetch keeps the last value that was fetched successfully.
//! - A collection is never fetched twice at the same time. A tick that finds
//!   the previous fetch still in flight skips that collection.
//! - Each successful fetch replaces the whole collection. Values are never
//!   merged.
//!
//! Besides the ticker, a [`Refresh`] handle can ask for an immediate
//! refresh, for example after a successful upload. Requests that arrive
//! while the job is busy are coalesced into one.
//!
//! Once the job is stopped with [`Job::stop`] no response is applied
//! anymore, even if it arrives later.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use futures::future::BoxFuture;
use futures::{FutureExt, TryFutureExt};
use tokio::sync::{oneshot, watch, Notify};
use tokio::task::JoinHandle;
use torrust_tracker_dashboard_clock::ticker::Ticker;
use torrust_tracker_dashboard_primitives::stats::TrackerStats;
use torrust_tracker_dashboard_primitives::torrent::Torrent;

use crate::core::api::Api;
use crate::core::transport;
use crate::signals::Halted;

/// Asks the synchronizer for a refresh outside the regular cadence.
#[derive(Debug, Clone, Default)]
pub struct Refresh {
    notify: Arc<Notify>,
}

impl Refresh {
    /// Requests an immediate refresh. Requests made before the synchronizer
    /// handles the previous one are merged.
    pub fn trigger(&self) {
        self.notify.notify_one();
    }

    pub(crate) async fn notified(&self) {
        self.notify.notified().await;
    }
}

/// One of the collections kept in sync.
struct Collection<T> {
    name: &'static str,
    value: watch::Sender<T>,
    fetching: AtomicBool,
}

impl<T: Send + Sync + 'static> Collection<T> {
    fn new(name: &'static str, initial: T) -> Arc<Self> {
        let (value, _) = watch::channel(initial);

        Arc::new(Self {
            name,
            value,
            fetching: AtomicBool::new(false),
        })
    }

    /// Marks the collection as being fetched. It returns `None` if a fetch
    /// is already in flight.
    fn begin(self: &Arc<Self>) -> Option<Fetch<T>> {
        if self.fetching.swap(true, Ordering::AcqRel) {
            return None;
        }

        Some(Fetch { collection: self.clone() })
    }
}

/// An in-flight fetch. The collection can be fetched again once it's
/// dropped.
struct Fetch<T> {
    collection: Arc<Collection<T>>,
}

impl<T> Fetch<T> {
    fn apply(&self, result: Result<T, transport::Error>, halted: &AtomicBool) -> Result<(), transport::Error> {
        let name = self.collection.name;

        match result {
            Ok(value) => {
                let applied = self.collection.value.send_if_modified(|current| {
                    if halted.load(Ordering::Acquire) {
                        return false;
                    }

                    *current = value;
                    true
                });

                if applied {
                    tracing::debug!(collection = name, "refreshed");
                } else {
                    tracing::debug!(collection = name, "synchronizer halted, response discarded");
                }

                Ok(())
            }
            Err(err) => {
                tracing::warn!(collection = name, %err, "refresh failed, keeping the last known value");

                Err(err)
            }
        }
    }
}

impl<T> Drop for Fetch<T> {
    fn drop(&mut self) {
        self.collection.fetching.store(false, Ordering::Release);
    }
}

/// A fetch running in the background. It resolves once its response has
/// been applied or discarded.
pub type FetchHandle = JoinHandle<Result<(), transport::Error>>;

/// The fetches started by one tick. A collection whose previous fetch was
/// still in flight has no handle.
#[derive(Debug, Default)]
pub struct Tick {
    pub torrents: Option<FetchHandle>,
    pub stats: Option<FetchHandle>,
}

impl Tick {
    /// Waits until all the fetches started by the tick are done.
    ///
    /// # Errors
    ///
    /// Will return the first fetch error. The other collection is still
    /// applied.
    pub async fn join(self) -> Result<(), transport::Error> {
        let mut outcome = Ok(());

        for handle in [self.torrents, self.stats].into_iter().flatten() {
            match handle.await {
                Ok(result) => {
                    if outcome.is_ok() {
                        outcome = result;
                    }
                }
                Err(err) => tracing::error!(%err, "fetch task failed"),
            }
        }

        outcome
    }
}

pub struct Synchronizer<A> {
    api: Arc<A>,
    torrents: Arc<Collection<Vec<Torrent>>>,
    stats: Arc<Collection<Option<TrackerStats>>>,
    halted: Arc<AtomicBool>,
    refresh: Refresh,
}

impl<A: Api> Synchronizer<A> {
    #[must_use]
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            torrents: Collection::new("torrents", Vec::new()),
            stats: Collection::new("stats", None),
            halted: Arc::new(AtomicBool::new(false)),
            refresh: Refresh::default(),
        }
    }

    /// A handle to request immediate refreshes.
    #[must_use]
    pub fn refresh_handle(&self) -> Refresh {
        self.refresh.clone()
    }

    /// The last torrent list fetched successfully. It's empty until the first
    /// successful fetch.
    #[must_use]
    pub fn torrents(&self) -> Vec<Torrent> {
        self.torrents.value.borrow().clone()
    }

    /// The last statistics fetched successfully, if any.
    #[must_use]
    pub fn stats(&self) -> Option<TrackerStats> {
        *self.stats.value.borrow()
    }

    #[must_use]
    pub fn subscribe_torrents(&self) -> watch::Receiver<Vec<Torrent>> {
        self.torrents.value.subscribe()
    }

    #[must_use]
    pub fn subscribe_stats(&self) -> watch::Receiver<Option<TrackerStats>> {
        self.stats.value.subscribe()
    }

    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.halted.load(Ordering::Acquire)
    }

    /// Starts a fetch for every collection that is not being fetched already.
    ///
    /// It must be called from a `tokio` runtime.
    pub fn tick(&self) -> Tick {
        if self.is_halted() {
            return Tick::default();
        }

        Tick {
            torrents: self.fetch(&self.torrents, |api| api.torrents()),
            stats: self.fetch(&self.stats, |api| api.stats().map_ok(Some).boxed()),
        }
    }

    fn fetch<T, F>(&self, collection: &Arc<Collection<T>>, request: F) -> Option<FetchHandle>
    where
        T: Send + Sync + 'static,
        F: FnOnce(&A) -> BoxFuture<'static, Result<T, transport::Error>>,
    {
        let Some(fetch) = collection.begin() else {
            tracing::debug!(collection = collection.name, "previous fetch still in flight, skipped");
            return None;
        };

        let response = request(&self.api);
        let halted = self.halted.clone();

        Some(tokio::spawn(async move {
            let result = response.await;

            fetch.apply(result, &halted)
        }))
    }

    /// Starts the polling job.
    ///
    /// The job ticks on every `ticker` tick and on every refresh request. It
    /// stops when [`Job::stop`] is called, when the [`Job`] is dropped or
    /// when the synchronizer is dropped.
    #[must_use]
    pub fn start<T: Ticker>(self: &Arc<Self>, mut ticker: T) -> Job {
        let weak_synchronizer = Arc::downgrade(self);
        let refresh = self.refresh.clone();
        let halted = self.halted.clone();

        let (tx_halt, mut rx_halt) = oneshot::channel::<Halted>();

        let handle = tokio::spawn(async move {
            tracing::info!("Starting the polling job..");

            loop {
                tokio::select! {
                    signal = &mut rx_halt => {
                        match signal {
                            Ok(signal) => tracing::info!("Halt signal processed: {signal}"),
                            Err(_) => tracing::info!("Polling job handle dropped"),
                        }
                        break;
                    }
                    () = ticker.tick() => {
                        if !tick(&weak_synchronizer) {
                            break;
                        }
                    }
                    () = refresh.notified() => {
                        tracing::debug!("immediate refresh requested");
                        if !tick(&weak_synchronizer) {
                            break;
                        }
                    }
                }
            }

            halted.store(true, Ordering::Release);

            tracing::info!("Polling job stopped");
        });

        Job {
            handle,
            tx_halt,
            halted: self.halted.clone(),
        }
    }
}

fn tick<A: Api>(weak_synchronizer: &Weak<Synchronizer<A>>) -> bool {
    match weak_synchronizer.upgrade() {
        Some(synchronizer) => {
            drop(synchronizer.tick());
            true
        }
        None => false,
    }
}

/// The running polling job.
#[derive(Debug)]
pub struct Job {
    handle: JoinHandle<()>,
    tx_halt: oneshot::Sender<Halted>,
    halted: Arc<AtomicBool>,
}

impl Job {
    /// Stops the job. Responses to fetches still in flight are discarded.
    pub async fn stop(self) {
        self.halted.store(true, Ordering::Release);

        if self.tx_halt.send(Halted::Normal).is_err() {
            tracing::debug!("polling job already finished");
        }

        if let Err(err) = self.handle.await {
            tracing::error!(%err, "polling job failed");
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
