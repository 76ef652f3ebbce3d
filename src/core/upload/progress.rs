use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

use super::UploadStatus;

/// How far an upload has gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Whole percent of the request body already sent, `0..=100`.
    Percent(u8),
    /// The total size is not known.
    Indeterminate,
}

impl Progress {
    /// The starting progress of an upload of `total` bytes.
    #[must_use]
    pub fn start(total: Option<u64>) -> Self {
        match total {
            Some(total) if total > 0 => Self::Percent(0),
            _ => Self::Indeterminate,
        }
    }

    /// `floor(sent * 100 / total)`, capped to 100.
    #[must_use]
    pub fn of(sent: u64, total: u64) -> Self {
        if total == 0 {
            return Self::Indeterminate;
        }

        let percent = (u128::from(sent) * 100 / u128::from(total)).min(100);

        // Fits: it was just capped to 100.
        #[allow(clippy::cast_possible_truncation)]
        Self::Percent(percent as u8)
    }
}

/// Reports the bytes sent by one upload to the upload status.
///
/// Reports are ignored when:
///
/// - The progress would go backwards.
/// - The upload is no longer in progress.
/// - A newer upload has started.
pub struct ProgressReporter {
    status: Arc<watch::Sender<UploadStatus>>,
    current_upload: Arc<AtomicU64>,
    upload: u64,
    total: Option<u64>,
    sent: u64,
}

impl ProgressReporter {
    pub(super) fn new(status: Arc<watch::Sender<UploadStatus>>, current_upload: Arc<AtomicU64>, upload: u64, total: Option<u64>) -> Self {
        Self {
            status,
            current_upload,
            upload,
            total,
            sent: 0,
        }
    }

    /// Total bytes the upload will send, when known.
    #[must_use]
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    #[must_use]
    pub fn sent(&self) -> u64 {
        self.sent
    }

    /// Records `bytes` more bytes sent.
    pub fn advance(&mut self, bytes: u64) {
        self.sent = self.sent.saturating_add(bytes);

        let Some(total) = self.total else {
            return;
        };

        self.report(Progress::of(self.sent, total));
    }

    fn report(&self, progress: Progress) {
        let Progress::Percent(percent) = progress else {
            return;
        };

        let upload = self.upload;
        let current_upload = &self.current_upload;

        self.status.send_if_modified(|status| {
            if current_upload.load(Ordering::Acquire) != upload {
                return false;
            }

            match status {
                UploadStatus::InProgress(Progress::Percent(current)) if *current < percent => {
                    *current = percent;
                    true
                }
                _ => false,
            }
        });
    }
}

impl std::fmt::Debug for ProgressReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("upload", &self.upload)
            .field("total", &self.total)
            .field("sent", &self.sent)
            .finish_non_exhaustive()
    }
}
