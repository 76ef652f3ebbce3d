//! Primitive types for the [Torrust Tracker Dashboard](https://docs.rs/torrust-tracker-dashboard).
//!
//! This module contains the data structures the dashboard exchanges with the
//! tracker REST API. The tracker is the source of truth for all of them: the
//! dashboard only deserializes what the API returns.
//!
//! - [`Torrent`](torrent::Torrent): a shareable resource and its swarm counters.
//! - [`Peer`](peer::Peer): a participant in the swarm of one torrent.
//! - [`TrackerStats`](stats::TrackerStats): aggregate tracker statistics.
//! - [`UploadedTorrent`](upload::UploadedTorrent): metadata returned after an upload.
use std::time::Duration;

pub mod info_hash;
pub mod peer;
pub mod stats;
pub mod timestamp;
pub mod torrent;
pub mod upload;

/// Duration since the Unix Epoch.
pub type DurationSinceUnixEpoch = Duration;

/// Number of bytes as reported by the tracker (sizes and transfer counters).
pub type NumberOfBytes = u64;
