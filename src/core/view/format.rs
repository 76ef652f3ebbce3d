//! Human readable formats used by the dashboard views.
use std::time::Duration;

use chrono::{DateTime, Utc};
use torrust_tracker_dashboard_primitives::NumberOfBytes;

const UNITS: [&str; 7] = ["Bytes", "KB", "MB", "GB", "TB", "PB", "EB"];

const UNIT_BASE: f64 = 1024.0;

/// Formats a byte count with the largest unit that keeps the value at or over
/// one, rounded to two decimals with trailing zeros removed.
///
/// ```rust
/// use torrust_tracker_dashboard::core::view::format;
///
/// assert_eq!(format::bytes(0), "0 Bytes");
/// assert_eq!(format::bytes(1536), "1.5 KB");
/// assert_eq!(format::bytes(1_048_576), "1 MB");
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn bytes(bytes: NumberOfBytes) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;

    while value >= UNIT_BASE && unit < UNITS.len() - 1 {
        value /= UNIT_BASE;
        unit += 1;
    }

    // 1023.999 KB rounds to 1024 KB, which is 1 MB.
    if round(value) >= UNIT_BASE && unit < UNITS.len() - 1 {
        value /= UNIT_BASE;
        unit += 1;
    }

    format!("{} {}", decimals(round(value)), UNITS[unit])
}

/// Size in kilobytes with one decimal, like `1024.0 KB`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn kilobytes(bytes: NumberOfBytes) -> String {
    format!("{:.1} KB", bytes as f64 / UNIT_BASE)
}

/// A count with thousands separators, like `12,345`.
#[must_use]
pub fn count(value: u64) -> String {
    let digits = value.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);

    for (position, digit) in digits.chars().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(digit);
    }

    formatted
}

/// Date and time, like `Jan 5, 2024, 03:04 PM`.
#[must_use]
pub fn date_time(datetime: &DateTime<Utc>) -> String {
    datetime.format("%b %-d, %Y, %I:%M %p").to_string()
}

/// Date only, like `1/5/2024`.
#[must_use]
pub fn date(datetime: &DateTime<Utc>) -> String {
    datetime.format("%-m/%-d/%Y").to_string()
}

/// How long ago something happened, like `5m ago`.
///
/// `None` means it happened in the future, which is shown as `Just now`.
#[must_use]
pub fn last_seen(elapsed: Option<Duration>) -> String {
    let minutes = elapsed.unwrap_or_default().as_secs() / 60;

    match minutes {
        0 => "Just now".to_string(),
        1..=59 => format!("{minutes}m ago"),
        60..=1439 => format!("{}h ago", minutes / 60),
        _ => format!("{}d ago", minutes / 1440),
    }
}

fn round(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn decimals(value: f64) -> String {
    let formatted = format!("{value:.2}");

    formatted.trim_end_matches('0').trim_end_matches('.').to_string()
}
