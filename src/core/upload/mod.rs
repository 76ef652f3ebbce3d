//! Upload pipeline.
//!
//! It sends one local file to the tracker, which creates a torrent for it,
//! and tracks the upload in an [`UploadStatus`] anyone can subscribe to:
//!
//! ```text
//! Idle --upload--> InProgress(0%) --> ... --> InProgress(100%)
//!                        |                           |
//!                        +--> Failed { message }     +--> Succeeded(torrent)
//! ```
//!
//! Only one upload can be in flight. A new upload while another one is running
//! is rejected with [`Error::AlreadyInProgress`].
//!
//! Whatever the outcome, the in-progress state is cleared before the
//! pipeline accepts the next upload. That also holds if the upload future is
//! dropped half way: the status goes back to [`UploadStatus::Idle`].
//!
//! A successful upload asks the [`Synchronizer`](crate::core::polling::Synchronizer)
//! for an immediate refresh, so the new torrent shows up in the list without
//! waiting for the next tick.
pub mod file;
pub mod progress;

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;
use torrust_tracker_dashboard_primitives::upload::UploadedTorrent;

pub use self::file::UploadFile;
pub use self::progress::{Progress, ProgressReporter};
use crate::core::api::Api;
use crate::core::polling::Refresh;
use crate::core::transport;

/// Message shown when the tracker rejects an upload without saying why.
pub const GENERIC_FAILURE_MESSAGE: &str = "Upload failed";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadStatus {
    #[default]
    Idle,
    InProgress(Progress),
    Succeeded(UploadedTorrent),
    Failed {
        message: String,
    },
}

impl UploadStatus {
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::InProgress(_))
    }
}

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("An upload is already in progress")]
    AlreadyInProgress,

    #[error("{message}")]
    Failed { message: String, source: transport::Error },
}

pub type UploadResult = Result<UploadedTorrent, Error>;

pub struct Uploader<A> {
    api: Arc<A>,
    status: Arc<watch::Sender<UploadStatus>>,
    busy: AtomicBool,
    current_upload: Arc<AtomicU64>,
    refresh: Refresh,
}

impl<A: Api> Uploader<A> {
    #[must_use]
    pub fn new(api: Arc<A>, refresh: Refresh) -> Self {
        let (status, _) = watch::channel(UploadStatus::Idle);

        Self {
            api,
            status: Arc::new(status),
            busy: AtomicBool::new(false),
            current_upload: Arc::new(AtomicU64::new(0)),
            refresh,
        }
    }

    #[must_use]
    pub fn status(&self) -> UploadStatus {
        self.status.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<UploadStatus> {
        self.status.subscribe()
    }

    #[must_use]
    pub fn is_uploading(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Uploads a file to the tracker.
    ///
    /// # Errors
    ///
    /// Will return an error if another upload is in progress or the tracker
    /// rejects the upload. The failure message is the `detail` the tracker
    /// sent or [`GENERIC_FAILURE_MESSAGE`].
    pub async fn upload(&self, file: UploadFile) -> UploadResult {
        let guard = UploadGuard::acquire(self, file.length())?;

        tracing::info!(name = file.name(), length = ?file.length(), "uploading file");

        let result = self.api.upload(file, guard.reporter()).await;

        match result {
            Ok(uploaded) => {
                tracing::info!(name = %uploaded.name, info_hash = %uploaded.info_hash, "torrent created");

                guard.finish(UploadStatus::Succeeded(uploaded.clone()));

                self.refresh.trigger();

                Ok(uploaded)
            }
            Err(err) => {
                let message = err.detail().unwrap_or(GENERIC_FAILURE_MESSAGE).to_string();

                tracing::warn!(%err, reason = %message, "upload failed");

                guard.finish(UploadStatus::Failed { message: message.clone() });

                Err(Error::Failed { message, source: err })
            }
        }
    }
}

/// Marks the pipeline as busy while alive.
///
/// On drop it publishes the terminal status (or `Idle` if the upload was
/// abandoned) and then frees the pipeline.
struct UploadGuard<'a, A> {
    uploader: &'a Uploader<A>,
    upload: u64,
    total: Option<u64>,
    terminal: Option<UploadStatus>,
}

impl<'a, A> UploadGuard<'a, A> {
    fn acquire(uploader: &'a Uploader<A>, total: Option<u64>) -> Result<Self, Error> {
        if uploader.busy.swap(true, Ordering::AcqRel) {
            tracing::debug!("upload rejected, another one is in progress");
            return Err(Error::AlreadyInProgress);
        }

        let upload = uploader.current_upload.fetch_add(1, Ordering::AcqRel) + 1;

        uploader.status.send_replace(UploadStatus::InProgress(Progress::start(total)));

        Ok(Self {
            uploader,
            upload,
            total,
            terminal: None,
        })
    }

    fn reporter(&self) -> ProgressReporter {
        ProgressReporter::new(
            self.uploader.status.clone(),
            self.uploader.current_upload.clone(),
            self.upload,
            self.total,
        )
    }

    fn finish(mut self, status: UploadStatus) {
        self.terminal = Some(status);
    }
}

impl<A> Drop for UploadGuard<'_, A> {
    fn drop(&mut self) {
        let status = self.terminal.take().unwrap_or_default();

        self.uploader.status.send_replace(status);
        self.uploader.busy.store(false, Ordering::Release);
    }
}
