//! `Torrent` resource as listed by the tracker API.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::info_hash::InfoHash;
use crate::NumberOfBytes;

/// A shareable resource registered in the tracker.
///
/// Everything but the swarm counters is immutable once the tracker creates
/// the torrent. The counters (`seeders`, `leechers` and `completed`) are
/// refreshed every time the dashboard polls the torrent list.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Torrent {
    /// The tracker's database identifier.
    pub id: i64,
    /// The file name the torrent was created from.
    pub name: String,
    /// The torrent's info hash, used as the key for the peer list and the
    /// torrent file download endpoints.
    pub info_hash: InfoHash,
    /// Total size of the shared file in bytes.
    pub file_size: NumberOfBytes,
    /// Size of every piece in bytes (the last one can be shorter).
    pub piece_length: NumberOfBytes,
    /// Number of pieces.
    pub num_pieces: u64,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    /// Active peers with a full copy of the file.
    #[serde(default)]
    pub seeders: u64,
    /// Active peers that are still downloading.
    #[serde(default)]
    pub leechers: u64,
    /// Peers that have ever completed the download.
    #[serde(default)]
    pub completed: u64,
}

impl Torrent {
    /// The name of the file the torrent artifact is saved to:
    /// the torrent name up to the first dot, plus the `.torrent` extension.
    ///
    /// It falls back to the info hash when the name has no usable stem.
    #[must_use]
    pub fn torrent_file_name(&self) -> String {
        let stem = self.name.split('.').next().unwrap_or_default();

        let stem: String = stem
            .chars()
            .map(|c| if std::path::is_separator(c) { '_' } else { c })
            .collect();

        if stem.trim().is_empty() {
            format!("{}.torrent", self.info_hash)
        } else {
            format!("{stem}.torrent")
        }
    }
}

pub mod fixture {
    use chrono::{TimeZone, Utc};

    use super::Torrent;
    use crate::info_hash::InfoHash;

    #[derive(PartialEq, Debug)]
    pub struct TorrentBuilder {
        torrent: Torrent,
    }

    impl Default for TorrentBuilder {
        fn default() -> Self {
            Self {
                torrent: Torrent {
                    id: 1,
                    name: "ubuntu.iso".to_string(),
                    info_hash: InfoHash::new("9e0217d0fa71c87332cd8bf9dbeabcb2c2cf3c4d").expect("a valid info-hash"),
                    file_size: 1_048_576,
                    piece_length: 262_144,
                    num_pieces: 4,
                    created_at: Utc.with_ymd_and_hms(2024, 1, 5, 15, 4, 0).unwrap(),
                    seeders: 1,
                    leechers: 0,
                    completed: 0,
                },
            }
        }
    }

    impl TorrentBuilder {
        #[must_use]
        pub fn with_id(mut self, id: i64) -> Self {
            self.torrent.id = id;
            self
        }

        #[must_use]
        pub fn with_name(mut self, name: &str) -> Self {
            self.torrent.name = name.to_string();
            self
        }

        /// # Panics
        ///
        /// Will panic if the info-hash is empty.
        #[must_use]
        pub fn with_info_hash(mut self, info_hash: &str) -> Self {
            self.torrent.info_hash = InfoHash::new(info_hash).expect("a valid info-hash");
            self
        }

        #[must_use]
        pub fn with_file_size(mut self, file_size: u64) -> Self {
            self.torrent.file_size = file_size;
            self
        }

        #[must_use]
        pub fn with_swarm(mut self, seeders: u64, leechers: u64, completed: u64) -> Self {
            self.torrent.seeders = seeders;
            self.torrent.leechers = leechers;
            self.torrent.completed = completed;
            self
        }

        #[must_use]
        pub fn build(self) -> Torrent {
            self.into()
        }

        #[must_use]
        pub fn into_inner(self) -> Torrent {
            self.torrent
        }
    }

    impl From<TorrentBuilder> for Torrent {
        fn from(builder: TorrentBuilder) -> Self {
            builder.torrent
        }
    }
}
