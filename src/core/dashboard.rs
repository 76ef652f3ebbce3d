//! The dashboard state.
//!
//! It wires the components together and is the only entry point for user
//! actions:
//!
//! - [`Dashboard::upload`] sends a file to the tracker.
//! - [`Dashboard::select`] chooses the torrent whose peers are shown.
//! - [`Dashboard::switch_tab`] changes the active tab.
//!
//! Each component owns its own slice of the state. The dashboard only reads
//! them to build a [`Snapshot`] for the view composer.
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use torrust_tracker_dashboard_clock::ticker::Ticker;
use torrust_tracker_dashboard_primitives::info_hash::InfoHash;
use torrust_tracker_dashboard_primitives::stats::TrackerStats;
use torrust_tracker_dashboard_primitives::torrent::Torrent;
use torrust_tracker_dashboard_primitives::DurationSinceUnixEpoch;

use crate::core::api::Api;
use crate::core::download;
use crate::core::polling::{Job, Synchronizer};
use crate::core::selection::{Selection, Selector};
use crate::core::upload::{UploadFile, UploadResult, UploadStatus, Uploader};
use crate::core::view::{self, Snapshot, Tab, View};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Torrent {info_hash} is not in the torrent list")]
    UnknownTorrent { info_hash: InfoHash },
}

pub struct Dashboard<A> {
    api: Arc<A>,
    synchronizer: Arc<Synchronizer<A>>,
    uploader: Uploader<A>,
    selector: Selector<A>,
    tab: watch::Sender<Tab>,
}

impl<A: Api> Dashboard<A> {
    #[must_use]
    pub fn new(api: Arc<A>) -> Self {
        let synchronizer = Arc::new(Synchronizer::new(api.clone()));
        let uploader = Uploader::new(api.clone(), synchronizer.refresh_handle());
        let selector = Selector::new(api.clone());
        let (tab, _) = watch::channel(Tab::default());

        Self {
            api,
            synchronizer,
            uploader,
            selector,
            tab,
        }
    }

    #[must_use]
    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    #[must_use]
    pub fn synchronizer(&self) -> &Arc<Synchronizer<A>> {
        &self.synchronizer
    }

    #[must_use]
    pub fn uploader(&self) -> &Uploader<A> {
        &self.uploader
    }

    #[must_use]
    pub fn selector(&self) -> &Selector<A> {
        &self.selector
    }

    /// Starts polling the tracker.
    #[must_use]
    pub fn start_polling<T: Ticker>(&self, ticker: T) -> Job {
        self.synchronizer.start(ticker)
    }

    /// # Errors
    ///
    /// Will return an error if another upload is in progress or the tracker
    /// rejects the file.
    pub async fn upload(&self, file: UploadFile) -> UploadResult {
        self.uploader.upload(file).await
    }

    /// Selects a torrent, or clears the selection with `None`.
    pub fn select(&self, torrent: Option<Torrent>) -> Option<JoinHandle<()>> {
        self.selector.select(torrent)
    }

    /// Selects a torrent from the current torrent list by its info-hash.
    ///
    /// # Errors
    ///
    /// Will return an error if the torrent is not in the last fetched list.
    pub fn select_by_info_hash(&self, info_hash: &InfoHash) -> Result<Option<JoinHandle<()>>, Error> {
        let torrent = self
            .synchronizer
            .torrents()
            .into_iter()
            .find(|torrent| &torrent.info_hash == info_hash)
            .ok_or_else(|| Error::UnknownTorrent {
                info_hash: info_hash.clone(),
            })?;

        Ok(self.select(Some(torrent)))
    }

    pub fn switch_tab(&self, tab: Tab) {
        self.tab.send_if_modified(|current| {
            if *current == tab {
                return false;
            }

            *current = tab;
            true
        });
    }

    /// Downloads the torrent file of a torrent into `dir`.
    ///
    /// # Errors
    ///
    /// Will return an error if the file can't be downloaded or saved.
    pub async fn download(&self, torrent: &Torrent, dir: &Utf8Path) -> Result<Utf8PathBuf, download::Error> {
        download::save_torrent_file(self.api.as_ref(), torrent, dir).await
    }

    #[must_use]
    pub fn torrents(&self) -> Vec<Torrent> {
        self.synchronizer.torrents()
    }

    #[must_use]
    pub fn stats(&self) -> Option<TrackerStats> {
        self.synchronizer.stats()
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tab: *self.tab.borrow(),
            torrents: self.synchronizer.torrents(),
            stats: self.synchronizer.stats(),
            upload: self.uploader.status(),
            selection: self.selector.current(),
        }
    }

    /// The view of the active tab at `now`.
    #[must_use]
    pub fn view(&self, now: DurationSinceUnixEpoch) -> View {
        view::compose(&self.snapshot(), now)
    }

    /// Subscribes to every change of the dashboard state.
    #[must_use]
    pub fn subscribe(&self) -> Changes {
        Changes {
            tab: self.tab.subscribe(),
            torrents: self.synchronizer.subscribe_torrents(),
            stats: self.synchronizer.subscribe_stats(),
            upload: self.uploader.subscribe(),
            selection: self.selector.subscribe(),
        }
    }
}

/// Notifies changes in any slice of the dashboard state.
pub struct Changes {
    tab: watch::Receiver<Tab>,
    torrents: watch::Receiver<Vec<Torrent>>,
    stats: watch::Receiver<Option<TrackerStats>>,
    upload: watch::Receiver<UploadStatus>,
    selection: watch::Receiver<Selection>,
}

impl Changes {
    /// Waits for the next change. It returns `false` once the dashboard is
    /// gone.
    pub async fn changed(&mut self) -> bool {
        tokio::select! {
            result = self.tab.changed() => result.is_ok(),
            result = self.torrents.changed() => result.is_ok(),
            result = self.stats.changed() => result.is_ok(),
            result = self.upload.changed() => result.is_ok(),
            result = self.selection.changed() => result.is_ok(),
        }
    }
}
