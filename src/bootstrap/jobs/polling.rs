//! Job that refreshes the torrent list and the tracker statistics on intervals.
//!
//! The first refresh happens as soon as the job starts. After that, the
//! dashboard refreshes both collections every `interval` seconds.
//!
//! Refer to [`torrust-tracker-dashboard-configuration documentation`](https://docs.rs/torrust-tracker-dashboard-configuration)
//! for more info about that option.
use torrust_tracker_dashboard_clock::ticker::Interval;
use torrust_tracker_dashboard_configuration::Polling;

use crate::core::api::Api;
use crate::core::dashboard::Dashboard;
use crate::core::polling::Job;

/// It starts the job that keeps the dashboard in sync with the tracker.
///
/// The job is executed on a `polling.interval`.
#[must_use]
pub fn start_job<A: Api>(config: &Polling, dashboard: &Dashboard<A>) -> Job {
    let ticker = Interval::new(config.interval());

    tracing::info!("Polling the tracker every {}s", ticker.period().as_secs());

    dashboard.start_polling(ticker)
}
