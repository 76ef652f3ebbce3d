use std::sync::Arc;

use torrust_tracker_dashboard::bootstrap::app::initialize_with_configuration;
use torrust_tracker_dashboard::core::dashboard::Dashboard;
use torrust_tracker_dashboard::core::transport::Client;
use torrust_tracker_dashboard_configuration::Configuration;
use torrust_tracker_dashboard_test_helpers::configuration;

use crate::common::tracker::{Running, Tracker};

pub mod console;
pub mod download;
pub mod peers;
pub mod polling;
pub mod transport;
pub mod upload;

/// A dashboard connected to a running mock tracker.
pub struct Environment {
    pub tracker: Running,
    pub config: Configuration,
    pub dashboard: Arc<Dashboard<Client>>,
}

impl Environment {
    pub async fn start() -> Self {
        Self::start_with(Tracker::default()).await
    }

    pub async fn start_with(tracker: Tracker) -> Self {
        let tracker = Running::start_with(tracker).await;

        let config = configuration::ephemeral(&tracker.base_url());

        let dashboard = initialize_with_configuration(&config).unwrap();

        Self {
            tracker,
            config,
            dashboard,
        }
    }

    pub fn mock(&self) -> &Tracker {
        &self.tracker.tracker
    }

    pub fn stop(self) {
        self.tracker.stop();
    }
}
