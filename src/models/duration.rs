//! Duration helpers shared by the hour results.
//!
//! `chrono::Duration` has no serde representation, so results serialize
//! durations as whole seconds through [`seconds`]. [`format_duration`]
//! renders the `8h05min` format used on history and banked-hours reports.

use chrono::Duration;
use rust_decimal::Decimal;

/// Serde adapter storing a [`Duration`] as a signed number of seconds.
pub mod seconds {
    use chrono::Duration;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serializes the duration as whole seconds.
    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(duration.num_seconds())
    }

    /// Deserializes whole seconds into a duration, rejecting values chrono
    /// cannot represent.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = i64::deserialize(deserializer)?;
        Duration::try_seconds(secs)
            .ok_or_else(|| D::Error::custom(format!("duration out of range: {} seconds", secs)))
    }
}

/// Converts a duration to decimal hours.
///
/// ```
/// use ponto_engine::models::duration_to_hours;
/// use chrono::Duration;
/// use rust_decimal::Decimal;
///
/// assert_eq!(duration_to_hours(Duration::minutes(90)), Decimal::new(15, 1));
/// ```
pub fn duration_to_hours(duration: Duration) -> Decimal {
    Decimal::from(duration.num_seconds()) / Decimal::from(3600)
}

/// Formats a duration as hours and zero-padded minutes, e.g. `8h05min`.
///
/// Negative durations keep a leading minus sign; seconds are dropped.
///
/// ```
/// use ponto_engine::models::format_duration;
/// use chrono::Duration;
///
/// assert_eq!(format_duration(Duration::minutes(485)), "8h05min");
/// assert_eq!(format_duration(Duration::minutes(-90)), "-1h30min");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_minutes = duration.num_minutes();
    let sign = if total_minutes < 0 { "-" } else { "" };
    let total_minutes = total_minutes.unsigned_abs();
    format!("{}{}h{:02}min", sign, total_minutes / 60, total_minutes % 60)
}
