use chrono::{DateTime, Utc};
use torrust_tracker_dashboard_primitives::DurationSinceUnixEpoch;

/// It converts a `DateTime::<Utc>` to a timestamp.
///
/// Date-times before the Unix Epoch are clamped to the epoch: the tracker
/// never reports them, and the dashboard only uses timestamps to compute how
/// long ago something happened.
#[must_use]
pub fn convert_from_datetime_utc_to_timestamp(datetime_utc: &DateTime<Utc>) -> DurationSinceUnixEpoch {
    match u64::try_from(datetime_utc.timestamp()) {
        Ok(secs) => DurationSinceUnixEpoch::new(secs, datetime_utc.timestamp_subsec_nanos()),
        Err(_) => DurationSinceUnixEpoch::ZERO,
    }
}

/// It converts a timestamp to a `DateTime::<Utc>`.
///
/// Returns `None` if the timestamp is out of the range `chrono` supports.
#[must_use]
pub fn convert_from_timestamp_to_datetime_utc(duration: DurationSinceUnixEpoch) -> Option<DateTime<Utc>> {
    let secs = i64::try_from(duration.as_secs()).ok()?;
    DateTime::from_timestamp(secs, duration.subsec_nanos())
}
