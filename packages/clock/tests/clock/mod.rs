use std::time::Duration;

use chrono::{TimeZone, Utc};
use torrust_tracker_dashboard_clock::clock::stopped::Stopped as _;
use torrust_tracker_dashboard_clock::clock::Time;
use torrust_tracker_dashboard_clock::conv::convert_from_datetime_utc_to_timestamp;

use crate::CurrentClock;

#[test]
fn it_should_use_stopped_time_for_testing() {
    assert_eq!(CurrentClock::dbg_clock_type(), "Stopped".to_owned());

    let time = CurrentClock::now();
    std::thread::sleep(Duration::from_millis(50));
    let time_2 = CurrentClock::now();

    assert_eq!(time, time_2);
}

#[test]
fn it_should_be_set_to_a_date_for_testing() {
    let date = Utc.with_ymd_and_hms(2024, 1, 5, 15, 4, 0).unwrap();
    let timestamp = convert_from_datetime_utc_to_timestamp(&date);

    CurrentClock::local_set(&timestamp);

    assert_eq!(CurrentClock::now(), Duration::from_secs(1_704_467_040));

    CurrentClock::local_reset();
}
