//! The tracker REST API endpoints used by the dashboard.
//!
//! Endpoint               | Method | Response
//! -----------------------|--------|-------------------------
//! `/api/tracker/torrents`           | GET    | `[Torrent]`
//! `/api/tracker/stats`              | GET    | `TrackerStats`
//! `/api/tracker/peers/{info_hash}`  | GET    | `[Peer]`
//! `/api/tracker/upload`             | POST   | `UploadedTorrent`
//! `/api/tracker/torrents/{info_hash}/download` | GET | torrent file bytes
//!
//! The upload is a multipart form with a single `file` field.
//!
//! The [`Api`] trait lets the rest of the dashboard be tested without a
//! tracker.
use futures::future::BoxFuture;
use futures::FutureExt;
#[cfg(test)]
use mockall::automock;
use reqwest::multipart::Form;
use torrust_tracker_dashboard_primitives::info_hash::InfoHash;
use torrust_tracker_dashboard_primitives::peer::Peer;
use torrust_tracker_dashboard_primitives::stats::TrackerStats;
use torrust_tracker_dashboard_primitives::torrent::Torrent;
use torrust_tracker_dashboard_primitives::upload::UploadedTorrent;

use crate::core::transport::{self, Client, Options};
use crate::core::upload::{ProgressReporter, UploadFile};

/// Path prefix of all the tracker endpoints.
const PREFIX: [&str; 2] = ["api", "tracker"];

/// Name of the multipart field carrying the uploaded file.
pub const UPLOAD_FIELD: &str = "file";

#[cfg_attr(test, automock)]
pub trait Api: Send + Sync + 'static {
    fn torrents(&self) -> BoxFuture<'static, Result<Vec<Torrent>, transport::Error>>;

    fn stats(&self) -> BoxFuture<'static, Result<TrackerStats, transport::Error>>;

    fn peers(&self, info_hash: &InfoHash) -> BoxFuture<'static, Result<Vec<Peer>, transport::Error>>;

    fn upload(&self, file: UploadFile, progress: ProgressReporter) -> BoxFuture<'static, Result<UploadedTorrent, transport::Error>>;

    fn download(&self, info_hash: &InfoHash) -> BoxFuture<'static, Result<Vec<u8>, transport::Error>>;
}

fn path<'a>(segments: &[&'a str]) -> Vec<&'a str> {
    PREFIX.iter().copied().chain(segments.iter().copied()).collect()
}

impl Api for Client {
    fn torrents(&self) -> BoxFuture<'static, Result<Vec<Torrent>, transport::Error>> {
        let client = self.clone();

        async move { client.get_json(&path(&["torrents"])).await }.boxed()
    }

    fn stats(&self) -> BoxFuture<'static, Result<TrackerStats, transport::Error>> {
        let client = self.clone();

        async move { client.get_json(&path(&["stats"])).await }.boxed()
    }

    fn peers(&self, info_hash: &InfoHash) -> BoxFuture<'static, Result<Vec<Peer>, transport::Error>> {
        let client = self.clone();
        let info_hash = info_hash.clone();

        async move { client.get_json(&path(&["peers", info_hash.as_str()])).await }.boxed()
    }

    fn upload(&self, file: UploadFile, progress: ProgressReporter) -> BoxFuture<'static, Result<UploadedTorrent, transport::Error>> {
        let client = self.clone();

        async move {
            let form = Form::new().part(UPLOAD_FIELD, file.into_part(progress));

            client.post_multipart(&path(&["upload"]), form, Options::default()).await
        }
        .boxed()
    }

    fn download(&self, info_hash: &InfoHash) -> BoxFuture<'static, Result<Vec<u8>, transport::Error>> {
        let client = self.clone();
        let info_hash = info_hash.clone();

        async move { client.get_bytes(&path(&["torrents", info_hash.as_str(), "download"])).await }.boxed()
    }
}
