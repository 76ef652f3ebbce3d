//! Time related functions and types for the dashboard.
//!
//! Two different notions of time are used by the dashboard:
//!
//! - The current time ([`clock::Time::now`]), to show how long ago a peer
//!   announced itself. It's a `DurationSinceUnixEpoch` so it does not depend
//!   on the time zone of the system running the dashboard.
//! - The polling cadence ([`ticker::Ticker`]), which decides when the
//!   dashboard refreshes its data from the tracker.
//!
//! Both can be replaced in tests: the [`clock::Stopped`] clock only moves when
//! told to, and the [`ticker::Manual`] ticker only ticks when triggered.
pub mod clock;
pub mod conv;
pub mod ticker;

#[macro_use]
extern crate lazy_static;

pub mod static_time {
    use std::time::SystemTime;

    lazy_static! {
        pub static ref TIME_AT_APP_START: SystemTime = SystemTime::now();
    }
}

/// Working version, for production.
#[cfg(not(test))]
#[allow(dead_code)]
pub(crate) type CurrentClock = clock::Working;

/// Stopped version, for testing.
#[cfg(test)]
#[allow(dead_code)]
pub(crate) type CurrentClock = clock::Stopped;
