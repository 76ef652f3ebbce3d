use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Background refresh of the torrent list and the tracker statistics.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Polling {
    /// Seconds between two refreshes.
    #[serde(default = "Polling::default_interval")]
    pub interval: u64,
}

impl Default for Polling {
    fn default() -> Self {
        Self {
            interval: Self::default_interval(),
        }
    }
}

impl Polling {
    fn default_interval() -> u64 {
        crate::DEFAULT_POLLING_INTERVAL.as_secs()
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }
}
