//! Selection-scoped fetcher.
//!
//! It holds the torrent selected in the dashboard and its peer list. Every
//! selection change starts a new peer fetch and bumps a generation counter.
//! A response is applied only if it belongs to the current generation, so
//! a slow response for a previous selection never overwrites the peers of
//! the current one.
//!
//! The selected torrent is a snapshot taken when it was selected. Use its
//! info-hash to find the fresh data in the torrent list.
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use torrust_tracker_dashboard_primitives::peer::Peer;
use torrust_tracker_dashboard_primitives::torrent::Torrent;

use crate::core::api::Api;
use crate::core::transport;

/// The peer list of the selected torrent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Peers {
    /// There is no selected torrent.
    #[default]
    Unselected,
    Loading,
    Loaded(Vec<Peer>),
    /// The peer list could not be fetched.
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    pub torrent: Option<Torrent>,
    pub peers: Peers,
    generation: u64,
}

impl Selection {
    /// A selection outside of any [`Selector`], at generation zero.
    #[must_use]
    pub fn new(torrent: Option<Torrent>, peers: Peers) -> Self {
        Self {
            torrent,
            peers,
            generation: 0,
        }
    }

    /// Changes every time the selected torrent changes or is refreshed.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.peers == Peers::Loading
    }
}

pub struct Selector<A> {
    api: Arc<A>,
    state: Arc<watch::Sender<Selection>>,
}

impl<A: Api> Selector<A> {
    #[must_use]
    pub fn new(api: Arc<A>) -> Self {
        let (state, _) = watch::channel(Selection::default());

        Self {
            api,
            state: Arc::new(state),
        }
    }

    #[must_use]
    pub fn current(&self) -> Selection {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Selection> {
        self.state.subscribe()
    }

    /// Selects a torrent, or clears the selection with `None`.
    ///
    /// Selecting a torrent clears the current peer list and starts fetching
    /// the new one. The returned handle resolves once the response has been
    /// applied or discarded.
    ///
    /// It must be called from a `tokio` runtime.
    pub fn select(&self, torrent: Option<Torrent>) -> Option<JoinHandle<()>> {
        let mut generation = 0;

        self.state.send_modify(|selection| {
            selection.generation += 1;
            generation = selection.generation;
            selection.peers = if torrent.is_some() { Peers::Loading } else { Peers::Unselected };
            selection.torrent.clone_from(&torrent);
        });

        let torrent = torrent?;

        tracing::debug!(info_hash = %torrent.info_hash, generation, "fetching peers");

        let response = self.api.peers(&torrent.info_hash);
        let state = self.state.clone();

        Some(tokio::spawn(async move {
            let result = response.await;

            apply(&state, generation, &torrent, result);
        }))
    }

    /// Fetches the peers of the selected torrent again.
    pub fn refresh(&self) -> Option<JoinHandle<()>> {
        let torrent = self.state.borrow().torrent.clone();

        torrent.and_then(|torrent| self.select(Some(torrent)))
    }
}

fn apply(state: &watch::Sender<Selection>, generation: u64, torrent: &Torrent, result: Result<Vec<Peer>, transport::Error>) {
    state.send_if_modified(|selection| {
        if selection.generation != generation {
            tracing::debug!(info_hash = %torrent.info_hash, generation, "stale peer list discarded");
            return false;
        }

        selection.peers = match result {
            Ok(peers) => Peers::Loaded(peers),
            Err(err) => {
                tracing::warn!(info_hash = %torrent.info_hash, %err, "failed to fetch peers");

                Peers::Failed { message: err.to_string() }
            }
        };

        true
    });
}
