/// Marker for the clock that only moves when the test moves it.
#[allow(clippy::module_name_repetitions)]
pub struct StoppedClock {}

/// Controls for the stopped clock.
///
/// The time is kept per thread, so tests running in parallel do not see each
/// other's changes.
#[allow(clippy::module_name_repetitions)]
pub trait Stopped: clock::Time {
    /// It sets the clock to a given time.
    fn local_set(unix_time: &DurationSinceUnixEpoch);

    /// It sets the clock to the time the dashboard started.
    fn local_set_to_app_start_time();

    /// It resets the clock to the default fixed time (the Unix Epoch when
    /// testing, the dashboard start time otherwise).
    fn local_reset();
}

use super::{DurationSinceUnixEpoch, Time};
use crate::clock;

impl Time for clock::Stopped {
    fn now() -> DurationSinceUnixEpoch {
        detail::FIXED_TIME.with(|time| *time.borrow())
    }

    fn dbg_clock_type() -> String {
        "Stopped".to_owned()
    }
}

impl Stopped for clock::Stopped {
    fn local_set(unix_time: &DurationSinceUnixEpoch) {
        detail::FIXED_TIME.with(|time| {
            *time.borrow_mut() = *unix_time;
        });
    }

    fn local_set_to_app_start_time() {
        Self::local_set(&detail::get_app_start_time());
    }

    fn local_reset() {
        Self::local_set(&detail::get_default_fixed_time());
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Duration;

    use torrust_tracker_dashboard_primitives::DurationSinceUnixEpoch;

    use crate::clock::stopped::Stopped as _;
    use crate::clock::{Stopped, Time};

    #[test]
    fn it_should_default_to_zero_when_testing() {
        assert_eq!(Stopped::now(), DurationSinceUnixEpoch::ZERO);
    }

    #[test]
    fn it_should_be_possible_to_set_the_clock_and_reset_it() {
        Stopped::local_set(&Duration::from_secs(60));

        assert_eq!(Stopped::now(), Duration::from_secs(60));

        Stopped::local_reset();
        assert_eq!(Stopped::now(), Duration::ZERO);
    }

    #[test]
    fn it_should_keep_the_time_per_thread() {
        Stopped::local_set(&Duration::from_secs(5));

        thread::spawn(|| {
            assert_eq!(Stopped::now(), Duration::ZERO);
        })
        .join()
        .unwrap();

        assert_eq!(Stopped::now(), Duration::from_secs(5));

        Stopped::local_reset();
    }
}

mod detail {
    use std::cell::RefCell;
    use std::time::SystemTime;

    use torrust_tracker_dashboard_primitives::DurationSinceUnixEpoch;

    use crate::static_time;

    thread_local!(pub static FIXED_TIME: RefCell<DurationSinceUnixEpoch> = RefCell::new(get_default_fixed_time()));

    pub fn get_app_start_time() -> DurationSinceUnixEpoch {
        (*static_time::TIME_AT_APP_START)
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
    }

    #[cfg(not(test))]
    pub fn get_default_fixed_time() -> DurationSinceUnixEpoch {
        get_app_start_time()
    }

    #[cfg(test)]
    pub fn get_default_fixed_time() -> DurationSinceUnixEpoch {
        DurationSinceUnixEpoch::ZERO
    }
}
