use std::time::SystemTime;

use torrust_tracker_dashboard_primitives::DurationSinceUnixEpoch;

use crate::clock;

#[allow(clippy::module_name_repetitions)]
pub struct WorkingClock;

impl clock::Time for clock::Working {
    fn now() -> DurationSinceUnixEpoch {
        // The system time is never set before 1970 on a machine running the dashboard.
        SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
    }

    fn dbg_clock_type() -> String {
        "Working".to_owned()
    }
}
