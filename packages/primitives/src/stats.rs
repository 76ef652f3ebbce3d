use derive_more::Constructor;
use serde::{Deserialize, Serialize};

/// Aggregate statistics of the tracker.
///
/// It's a snapshot: the dashboard replaces the whole value on every successful
/// fetch and never merges two of them. Missing counters are read as zero.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Default, Constructor)]
pub struct TrackerStats {
    /// Number of torrents registered in the tracker.
    #[serde(default)]
    pub total_torrents: u64,
    /// Peers that have announced recently.
    #[serde(default)]
    pub active_peers: u64,
    /// All peers the tracker knows about.
    #[serde(default)]
    pub total_peers: u64,
    /// Distinct users.
    #[serde(default)]
    pub total_users: u64,
}

impl TrackerStats {
    #[must_use]
    pub fn zeroed() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::TrackerStats;

    #[test]
    fn missing_counters_should_be_read_as_zero() {
        let stats: TrackerStats = serde_json::from_str(r#"{ "total_torrents": 3 }"#).unwrap();

        assert_eq!(stats, TrackerStats::new(3, 0, 0, 0));
    }
}
