//! Serde helpers for the timestamps returned by the tracker API.
//!
//! The tracker serializes naive date-times without an offset, for example
//! `2024-05-01T12:30:00.123456`. Those are interpreted as UTC. Timestamps
//! carrying an explicit offset (RFC 3339) are accepted too.
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Parses a tracker timestamp.
///
/// # Errors
///
/// Will return an error if the value is neither an RFC 3339 date-time nor a
/// naive ISO 8601 date-time.
pub fn parse(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(datetime) => Ok(datetime.with_timezone(&Utc)),
        Err(_) => NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").map(|naive| naive.and_utc()),
    }
}

/// # Errors
///
/// Will return an error if the value is not a valid tracker timestamp.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse(&value).map_err(serde::de::Error::custom)
}

/// # Errors
///
/// Will return an error if the serializer fails.
pub fn serialize<S>(datetime: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&datetime.naive_utc().format("%Y-%m-%dT%H:%M:%S%.f").to_string())
}
