//! View state composer.
//!
//! [`compose`] derives what the active tab shows from a [`Snapshot`] of the
//! dashboard state and the current time. It's a pure function: it never
//! fetches anything and it never changes the state it reads.
//!
//! Tab        | Content
//! -----------|--------------------------------------------------------
//! `upload`   | The upload status and the tracker statistics cards.
//! `torrents` | The torrent list, with the selected torrent highlighted.
//! `peers`    | The peers of the selected torrent.
//! `stats`    | The statistics cards and the five first torrents.
pub mod format;

use std::str::FromStr;

use derive_more::Display;
use thiserror::Error;
use torrust_tracker_dashboard_clock::conv::convert_from_datetime_utc_to_timestamp;
use torrust_tracker_dashboard_primitives::peer::Peer;
use torrust_tracker_dashboard_primitives::stats::TrackerStats;
use torrust_tracker_dashboard_primitives::torrent::Torrent;
use torrust_tracker_dashboard_primitives::DurationSinceUnixEpoch;

use crate::core::selection::{Peers, Selection};
use crate::core::upload::{Progress, UploadStatus};

/// Number of torrents shown in the recent activity of the statistics tab.
pub const RECENT_ACTIVITY_SIZE: usize = 5;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    #[display("upload")]
    Upload,
    #[display("torrents")]
    Torrents,
    #[display("peers")]
    Peers,
    #[display("stats")]
    Stats,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Upload, Tab::Torrents, Tab::Peers, Tab::Stats];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Upload => "Upload File",
            Tab::Torrents => "Torrents",
            Tab::Peers => "Peers",
            Tab::Stats => "Statistics",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown tab `{0}`, expected one of: upload, torrents, peers, stats")]
pub struct ParseTabError(String);

impl FromStr for Tab {
    type Err = ParseTabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseTabError(s.to_string()))
    }
}

/// Everything the composer reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub tab: Tab,
    pub torrents: Vec<Torrent>,
    pub stats: Option<TrackerStats>,
    pub upload: UploadStatus,
    pub selection: Selection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub tab: Tab,
    pub panel: Panel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Panel {
    Upload { upload: UploadPanel, stats: Vec<StatCard> },
    Torrents(TorrentsPanel),
    Peers(PeersPanel),
    Stats { stats: Vec<StatCard>, recent: Vec<RecentActivity> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadPanel {
    Idle,
    /// `None` when the progress is indeterminate.
    InProgress { percent: Option<u8> },
    Succeeded {
        message: String,
        info_hash: String,
        file_size: String,
        pieces: String,
    },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorrentsPanel {
    pub title: String,
    pub rows: Vec<TorrentRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorrentRow {
    pub name: String,
    pub info_hash: String,
    pub size: String,
    pub swarm: String,
    pub downloads: String,
    pub created: String,
    /// `Active` when someone is seeding the torrent, `Waiting` otherwise.
    pub status: &'static str,
    pub pieces: String,
    pub piece_size: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeersPanel {
    NoSelection,
    Loading { torrent: String },
    Failed { torrent: String, message: String },
    Empty { torrent: String },
    List { title: String, rows: Vec<PeerRow> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerRow {
    pub address: String,
    pub peer_id: String,
    pub role: String,
    pub uploaded: String,
    pub downloaded: String,
    pub remaining: Option<String>,
    pub last_seen: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentActivity {
    pub name: String,
    pub created: String,
    pub seeders: String,
    pub leechers: String,
}

/// Derives the view of the active tab.
#[must_use]
pub fn compose(snapshot: &Snapshot, now: DurationSinceUnixEpoch) -> View {
    let panel = match snapshot.tab {
        Tab::Upload => Panel::Upload {
            upload: upload_panel(&snapshot.upload),
            stats: stat_cards(snapshot.stats),
        },
        Tab::Torrents => Panel::Torrents(torrents_panel(&snapshot.torrents, &snapshot.selection)),
        Tab::Peers => Panel::Peers(peers_panel(&snapshot.torrents, &snapshot.selection, now)),
        Tab::Stats => Panel::Stats {
            stats: stat_cards(snapshot.stats),
            recent: recent_activity(&snapshot.torrents),
        },
    };

    View { tab: snapshot.tab, panel }
}

/// The selected torrent as it is in the last torrent list, or the snapshot
/// taken when it was selected if it's no longer listed.
#[must_use]
pub fn selected_torrent<'a>(torrents: &'a [Torrent], selection: &'a Selection) -> Option<&'a Torrent> {
    let selected = selection.torrent.as_ref()?;

    torrents
        .iter()
        .find(|torrent| torrent.info_hash == selected.info_hash)
        .or(Some(selected))
}

fn upload_panel(status: &UploadStatus) -> UploadPanel {
    match status {
        UploadStatus::Idle => UploadPanel::Idle,
        UploadStatus::InProgress(Progress::Percent(percent)) => UploadPanel::InProgress { percent: Some(*percent) },
        UploadStatus::InProgress(Progress::Indeterminate) => UploadPanel::InProgress { percent: None },
        UploadStatus::Succeeded(uploaded) => UploadPanel::Succeeded {
            message: format!("Successfully created torrent for \"{}\"", uploaded.name),
            info_hash: uploaded.info_hash.to_string(),
            file_size: format::kilobytes(uploaded.file_size),
            pieces: uploaded.num_pieces.to_string(),
        },
        UploadStatus::Failed { message } => UploadPanel::Failed { message: message.clone() },
    }
}

fn stat_cards(stats: Option<TrackerStats>) -> Vec<StatCard> {
    let stats = stats.unwrap_or_default();

    vec![
        StatCard {
            title: "Total Torrents",
            value: format::count(stats.total_torrents),
        },
        StatCard {
            title: "Active Peers",
            value: format::count(stats.active_peers),
        },
        StatCard {
            title: "Total Peers",
            value: format::count(stats.total_peers),
        },
        StatCard {
            title: "Total Users",
            value: format::count(stats.total_users),
        },
    ]
}

fn torrents_panel(torrents: &[Torrent], selection: &Selection) -> TorrentsPanel {
    let selected = selection.torrent.as_ref().map(|torrent| &torrent.info_hash);

    TorrentsPanel {
        title: format!("Available Torrents ({})", torrents.len()),
        rows: torrents
            .iter()
            .map(|torrent| TorrentRow {
                name: torrent.name.clone(),
                info_hash: torrent.info_hash.to_string(),
                size: format::bytes(torrent.file_size),
                swarm: format!("{} seeders, {} leechers", torrent.seeders, torrent.leechers),
                downloads: format!("{} downloads", torrent.completed),
                created: format::date_time(&torrent.created_at),
                status: if torrent.seeders > 0 { "Active" } else { "Waiting" },
                pieces: format!("{} pieces", torrent.num_pieces),
                piece_size: format!("{}KB each", torrent.piece_length / 1024),
                selected: selected == Some(&torrent.info_hash),
            })
            .collect(),
    }
}

fn peers_panel(torrents: &[Torrent], selection: &Selection, now: DurationSinceUnixEpoch) -> PeersPanel {
    let Some(torrent) = selected_torrent(torrents, selection) else {
        return PeersPanel::NoSelection;
    };

    let name = torrent.name.clone();

    match &selection.peers {
        Peers::Unselected => PeersPanel::NoSelection,
        Peers::Loading => PeersPanel::Loading { torrent: name },
        Peers::Failed { message } => PeersPanel::Failed {
            torrent: name,
            message: message.clone(),
        },
        Peers::Loaded(peers) if peers.is_empty() => PeersPanel::Empty { torrent: name },
        Peers::Loaded(peers) => PeersPanel::List {
            title: format!("Peers for \"{name}\" ({})", peers.len()),
            rows: peers.iter().map(|peer| peer_row(peer, now)).collect(),
        },
    }
}

fn peer_row(peer: &Peer, now: DurationSinceUnixEpoch) -> PeerRow {
    let last_announce = convert_from_datetime_utc_to_timestamp(&peer.last_announce);

    PeerRow {
        address: peer.address(),
        peer_id: peer.peer_id.to_string(),
        role: peer.role().to_string(),
        uploaded: format::bytes(peer.uploaded),
        downloaded: format::bytes(peer.downloaded),
        remaining: peer.remaining().map(|left| format!("{} remaining", format::bytes(left))),
        last_seen: format::last_seen(now.checked_sub(last_announce)),
    }
}

fn recent_activity(torrents: &[Torrent]) -> Vec<RecentActivity> {
    torrents
        .iter()
        .take(RECENT_ACTIVITY_SIZE)
        .map(|torrent| RecentActivity {
            name: torrent.name.clone(),
            created: format::date(&torrent.created_at),
            seeders: format!("{} seeders", torrent.seeders),
            leechers: format!("{} leechers", torrent.leechers),
        })
        .collect()
}
