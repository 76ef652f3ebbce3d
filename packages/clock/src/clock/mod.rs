use torrust_tracker_dashboard_primitives::DurationSinceUnixEpoch;

use self::stopped::StoppedClock;
use self::working::WorkingClock;

pub mod stopped;
pub mod working;

/// A clock. Either the working clock (production) or the stopped clock
/// (testing).
#[derive(Debug)]
pub struct Clock<T> {
    clock: std::marker::PhantomData<T>,
}

/// The working clock. It returns the system time.
pub type Working = Clock<WorkingClock>;
/// The stopped clock. It returns the time it was last set to.
pub type Stopped = Clock<StoppedClock>;

/// Trait for types that can be used as a timestamp clock.
pub trait Time: Sized {
    fn now() -> DurationSinceUnixEpoch;

    fn dbg_clock_type() -> String;
}

#[cfg(test)]
mod tests {
    use std::any::TypeId;
    use std::time::Duration;

    use crate::clock::{Stopped, Time, Working};
    use crate::CurrentClock;

    #[test]
    fn it_should_be_the_stopped_clock_as_default_when_testing() {
        assert_eq!(TypeId::of::<Stopped>(), TypeId::of::<CurrentClock>());
        assert_eq!(CurrentClock::dbg_clock_type(), "Stopped".to_owned());
    }

    #[test]
    fn it_should_not_move_the_stopped_clock_while_testing() {
        let time = CurrentClock::now();
        std::thread::sleep(Duration::from_millis(20));

        assert_eq!(time, CurrentClock::now());
        assert_ne!(Stopped::now(), Working::now());
    }
}
