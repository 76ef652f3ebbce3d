//! Peer struct used by the dashboard to show the swarm of a torrent.
//!
//! A sample peer as returned by `GET /api/tracker/peers/{info_hash}`:
//!
//! ```json
//! {
//!     "id": 3,
//!     "torrent_id": 1,
//!     "peer_id": "-qB00000000000000001",
//!     "ip_address": "126.0.0.1",
//!     "port": 8080,
//!     "uploaded": 0,
//!     "downloaded": 0,
//!     "left": 0,
//!     "is_seeder": true,
//!     "last_announce": "2024-01-05T15:04:00"
//! }
//! ```
use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::NumberOfBytes;

/// Peer ID as reported by the tracker. It's opaque for the dashboard.
#[derive(Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Debug, Display)]
#[serde(transparent)]
pub struct Id(pub String);

/// Whether the peer has the full file or is still downloading it.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Display)]
pub enum Role {
    Seeder,
    Leecher,
}

/// A participant in the swarm of one torrent.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Peer {
    pub id: i64,
    #[serde(default)]
    pub torrent_id: Option<i64>,
    pub peer_id: Id,
    pub ip_address: String,
    pub port: u16,
    /// The total amount of bytes uploaded by this peer so far
    pub uploaded: NumberOfBytes,
    /// The total amount of bytes downloaded by this peer so far
    pub downloaded: NumberOfBytes,
    /// The number of bytes this peer still has to download
    pub left: NumberOfBytes,
    pub is_seeder: bool,
    /// The last time the peer announced itself to the tracker.
    #[serde(with = "crate::timestamp")]
    pub last_announce: DateTime<Utc>,
}

impl Peer {
    #[must_use]
    pub fn role(&self) -> Role {
        if self.is_seeder {
            Role::Seeder
        } else {
            Role::Leecher
        }
    }

    /// The peer's network address, `host:port`. IPv6 hosts are bracketed.
    #[must_use]
    pub fn address(&self) -> String {
        if self.ip_address.contains(':') {
            format!("[{}]:{}", self.ip_address, self.port)
        } else {
            format!("{}:{}", self.ip_address, self.port)
        }
    }

    /// Bytes pending to download, only for leechers that still miss some.
    #[must_use]
    pub fn remaining(&self) -> Option<NumberOfBytes> {
        match self.role() {
            Role::Leecher if self.left > 0 => Some(self.left),
            _ => None,
        }
    }
}

pub mod fixture {
    use chrono::{DateTime, TimeZone, Utc};

    use super::{Id, Peer};

    #[derive(PartialEq, Debug)]
    pub struct PeerBuilder {
        peer: Peer,
    }

    impl Default for PeerBuilder {
        fn default() -> Self {
            Self::seeder()
        }
    }

    impl PeerBuilder {
        #[must_use]
        pub fn seeder() -> Self {
            let peer = Peer {
                id: 1,
                torrent_id: Some(1),
                peer_id: Id("-qB00000000000000001".to_string()),
                ip_address: "126.0.0.1".to_string(),
                port: 8080,
                uploaded: 0,
                downloaded: 0,
                left: 0,
                is_seeder: true,
                last_announce: Utc.with_ymd_and_hms(2024, 1, 5, 15, 4, 0).unwrap(),
            };

            Self { peer }
        }

        #[must_use]
        pub fn leecher() -> Self {
            let peer = Peer {
                id: 2,
                torrent_id: Some(1),
                peer_id: Id("-qB00000000000000002".to_string()),
                ip_address: "126.0.0.2".to_string(),
                port: 8080,
                uploaded: 0,
                downloaded: 0,
                left: 10,
                is_seeder: false,
                last_announce: Utc.with_ymd_and_hms(2024, 1, 5, 15, 4, 0).unwrap(),
            };

            Self { peer }
        }

        #[must_use]
        pub fn with_id(mut self, id: i64) -> Self {
            self.peer.id = id;
            self
        }

        #[must_use]
        pub fn with_peer_id(mut self, peer_id: &str) -> Self {
            self.peer.peer_id = Id(peer_id.to_string());
            self
        }

        #[must_use]
        pub fn with_address(mut self, ip_address: &str, port: u16) -> Self {
            self.peer.ip_address = ip_address.to_string();
            self.peer.port = port;
            self
        }

        #[must_use]
        pub fn with_transfer(mut self, uploaded: u64, downloaded: u64, left: u64) -> Self {
            self.peer.uploaded = uploaded;
            self.peer.downloaded = downloaded;
            self.peer.left = left;
            self
        }

        #[must_use]
        pub fn last_announced_at(mut self, last_announce: DateTime<Utc>) -> Self {
            self.peer.last_announce = last_announce;
            self
        }

        #[must_use]
        pub fn build(self) -> Peer {
            self.into()
        }

        #[must_use]
        pub fn into_inner(self) -> Peer {
            self.peer
        }
    }

    impl From<PeerBuilder> for Peer {
        fn from(builder: PeerBuilder) -> Self {
            builder.peer
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixture::PeerBuilder;
    use super::{Peer, Role};

    #[test]
    fn it_should_be_deserialized_from_the_tracker_api_json() {
        let json = r#"{
            "id": 3,
            "torrent_id": 1,
            "peer_id": "-qB00000000000000001",
            "ip_address": "126.0.0.1",
            "port": 8080,
            "uploaded": 100,
            "downloaded": 200,
            "left": 0,
            "is_seeder": true,
            "last_announce": "2024-01-05T15:04:00"
        }"#;

        let peer: Peer = serde_json::from_str(json).unwrap();

        assert_eq!(peer.peer_id.to_string(), "-qB00000000000000001");
        assert_eq!(peer.address(), "126.0.0.1:8080");
        assert_eq!(peer.role(), Role::Seeder);
        assert_eq!((peer.uploaded, peer.downloaded), (100, 200));
    }

    #[test]
    fn ipv6_addresses_should_be_bracketed() {
        let peer = PeerBuilder::seeder().with_address("::1", 6881).build();

        assert_eq!(peer.address(), "[::1]:6881");
    }

    #[test]
    fn only_leechers_with_pending_bytes_should_have_remaining_bytes() {
        assert_eq!(PeerBuilder::leecher().with_transfer(0, 0, 10).build().remaining(), Some(10));
        assert_eq!(PeerBuilder::leecher().with_transfer(0, 0, 0).build().remaining(), None);
        assert_eq!(PeerBuilder::seeder().with_transfer(0, 0, 10).build().remaining(), None);
    }
}
