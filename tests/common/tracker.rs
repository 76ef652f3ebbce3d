//! A mock of the tracker REST API.
//!
//! It keeps the torrents and peers in memory and creates a torrent for every
//! uploaded file. Tests can make some endpoints fail or hang to check how the
//! dashboard reacts.
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{TimeZone, Utc};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use torrust_tracker_dashboard_primitives::info_hash::InfoHash;
use torrust_tracker_dashboard_primitives::peer::Peer;
use torrust_tracker_dashboard_primitives::stats::TrackerStats;
use torrust_tracker_dashboard_primitives::torrent::Torrent;
use torrust_tracker_dashboard_primitives::upload::UploadedTorrent;
use url::Url;

/// Piece length of the torrents created by the mock tracker.
pub const PIECE_LENGTH: u64 = 262_144;

#[derive(Default)]
pub struct Tracker {
    torrents: Mutex<Vec<Torrent>>,
    peers: Mutex<HashMap<String, Vec<Peer>>>,
    stats: Mutex<TrackerStats>,
    next_id: AtomicI64,

    /// The stats endpoint answers with a server error.
    pub fail_stats: AtomicBool,

    /// The stats endpoint waits this long before answering.
    pub stats_delay: Mutex<Option<Duration>>,

    /// Uploads are rejected with this detail.
    pub reject_uploads_with: Mutex<Option<String>>,

    /// Uploads wait for [`Tracker::release_upload`] after reading the file.
    pub hold_uploads: AtomicBool,
    upload_gate: Notify,
}

impl Tracker {
    pub fn add_torrent(&self, torrent: Torrent) {
        self.torrents.lock().unwrap().push(torrent);
    }

    pub fn add_peer(&self, info_hash: &InfoHash, peer: Peer) {
        self.peers
            .lock()
            .unwrap()
            .entry(info_hash.to_string())
            .or_default()
            .push(peer);
    }

    pub fn set_stats(&self, stats: TrackerStats) {
        *self.stats.lock().unwrap() = stats;
    }

    pub fn torrents(&self) -> Vec<Torrent> {
        self.torrents.lock().unwrap().clone()
    }

    pub fn release_upload(&self) {
        self.upload_gate.notify_one();
    }

    /// The content of the torrent file served for a torrent.
    pub fn torrent_file(info_hash: &str) -> Vec<u8> {
        format!("d4:infod4:name{}:{info_hash}ee", info_hash.len()).into_bytes()
    }

    fn create_torrent(&self, name: String, file_size: u64) -> Torrent {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;

        let torrent = Torrent {
            id,
            name,
            info_hash: InfoHash::new(&format!("{id:040x}")).unwrap(),
            file_size,
            piece_length: PIECE_LENGTH,
            num_pieces: file_size.div_ceil(PIECE_LENGTH),
            created_at: Utc.with_ymd_and_hms(2024, 1, 5, 15, 4, 0).unwrap(),
            seeders: 1,
            leechers: 0,
            completed: 0,
        };

        self.add_torrent(torrent.clone());

        torrent
    }
}

/// A mock tracker listening on a random local port.
pub struct Running {
    pub tracker: Arc<Tracker>,
    pub bind_address: SocketAddr,
    handle: JoinHandle<()>,
}

impl Running {
    pub async fn start_with(tracker: Tracker) -> Self {
        let tracker = Arc::new(tracker);

        let router = Router::new()
            .route("/api/tracker/torrents", get(torrents))
            .route("/api/tracker/torrents/:info_hash/download", get(download))
            .route("/api/tracker/stats", get(stats))
            .route("/api/tracker/peers/:info_hash", get(peers))
            .route("/api/tracker/upload", post(upload))
            .layer(DefaultBodyLimit::disable())
            .with_state(tracker.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let bind_address = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            tracker,
            bind_address,
            handle,
        }
    }

    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}/", self.bind_address)).unwrap()
    }

    pub fn stop(self) {
        self.handle.abort();
    }
}

fn detail(status: StatusCode, detail: &str) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}

async fn torrents(State(tracker): State<Arc<Tracker>>) -> Json<Vec<Torrent>> {
    Json(tracker.torrents())
}

async fn stats(State(tracker): State<Arc<Tracker>>) -> Response {
    let delay = *tracker.stats_delay.lock().unwrap();

    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    if tracker.fail_stats.load(Ordering::SeqCst) {
        return detail(StatusCode::INTERNAL_SERVER_ERROR, "stats unavailable");
    }

    let stats = *tracker.stats.lock().unwrap();

    Json(stats).into_response()
}

async fn peers(State(tracker): State<Arc<Tracker>>, Path(info_hash): Path<String>) -> Json<Vec<Peer>> {
    let peers = tracker.peers.lock().unwrap().get(&info_hash).cloned().unwrap_or_default();

    Json(peers)
}

async fn download(State(tracker): State<Arc<Tracker>>, Path(info_hash): Path<String>) -> Response {
    let known = tracker
        .torrents()
        .iter()
        .any(|torrent| torrent.info_hash.as_str() == info_hash);

    if !known {
        return detail(StatusCode::NOT_FOUND, "Torrent not found");
    }

    Tracker::torrent_file(&info_hash).into_response()
}

async fn upload(State(tracker): State<Arc<Tracker>>, mut multipart: Multipart) -> Response {
    let mut file = None;

    while let Some(field) = multipart.next_field().await.unwrap() {
        if field.name() == Some("file") {
            let name = field.file_name().unwrap_or("unnamed").to_string();
            let content = field.bytes().await.unwrap();

            file = Some((name, content.len() as u64));
        }
    }

    let Some((name, file_size)) = file else {
        return detail(StatusCode::BAD_REQUEST, "No file provided");
    };

    if tracker.hold_uploads.load(Ordering::SeqCst) {
        tracker.upload_gate.notified().await;
    }

    let rejection = tracker.reject_uploads_with.lock().unwrap().clone();

    if let Some(reason) = rejection {
        return detail(StatusCode::BAD_REQUEST, &reason);
    }

    let torrent = tracker.create_torrent(name, file_size);

    Json(UploadedTorrent {
        name: torrent.name,
        info_hash: torrent.info_hash,
        file_size: torrent.file_size,
        num_pieces: torrent.num_pieces,
    })
    .into_response()
}
