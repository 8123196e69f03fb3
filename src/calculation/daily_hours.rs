//! Daily worked-hours aggregation.
//!
//! This module pairs a day's punches into work intervals and measures the
//! total against the standard daily workload, splitting the difference into
//! credited overtime (up to a ceiling, CLT art. 59) and deficit.

use chrono::Duration;
use tracing::debug;

use crate::models::{DailyHoursResult, DayRecord, PunchKind};

/// Punch pairs that delimit a work interval.
pub const WORK_PAIRS: [(PunchKind, PunchKind); 3] = [
    (PunchKind::Entrada, PunchKind::SaidaAlmoco),
    (PunchKind::RetornoAlmoco, PunchKind::SaidaFinal),
    (PunchKind::ExtraInicio, PunchKind::ExtraFim),
];

/// Sums the intervals of every pair whose two ends were punched.
///
/// Pairs with a missing end contribute nothing. An interval whose end is
/// earlier than its start is summed as a negative duration.
pub fn worked_time(day: &DayRecord) -> Duration {
    WORK_PAIRS
        .iter()
        .filter_map(|&(start, end)| Some(day.time_of(end)? - day.time_of(start)?))
        .fold(Duration::zero(), |total, interval| total + interval)
}

/// Calculates worked time, overtime and deficit for one day.
///
/// # Arguments
///
/// * `day` - The day's punches
/// * `standard` - The standard workload for that day
/// * `ceiling` - The most overtime credited for a single day
///
/// # Returns
///
/// A [`DailyHoursResult`]. A day with fewer than two punches is reported as
/// incomplete with zero worked time and zero balances: missing data is not
/// treated as time not worked.
///
/// # Examples
///
/// ```
/// use ponto_engine::calculation::calculate_daily_hours;
/// use ponto_engine::models::DayRecord;
/// use chrono::{Duration, NaiveDate, NaiveTime};
/// use uuid::Uuid;
///
/// let times = ["08:00", "12:00", "13:00", "17:30"]
///     .map(|t| NaiveTime::parse_from_str(t, "%H:%M").unwrap());
/// let day = DayRecord::from_times(
///     Uuid::new_v4(),
///     NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
///     &times,
/// )
/// .unwrap();
///
/// let result = calculate_daily_hours(&day, Duration::hours(8), Duration::hours(2));
/// assert_eq!(result.total_worked, Duration::minutes(510));
/// assert_eq!(result.extras, Duration::minutes(30));
/// assert_eq!(result.deficit, Duration::zero());
/// ```
pub fn calculate_daily_hours(
    day: &DayRecord,
    standard: Duration,
    ceiling: Duration,
) -> DailyHoursResult {
    if day.len() < 2 {
        debug!(date = %day.date(), punches = day.len(), "Day incomplete, not measured");
        return DailyHoursResult {
            total_worked: Duration::zero(),
            standard,
            saldo: Duration::zero(),
            extras: Duration::zero(),
            extras_excess: Duration::zero(),
            deficit: Duration::zero(),
            extras_ceiling: ceiling,
            complete: false,
        };
    }

    let total_worked = worked_time(day);
    let saldo = total_worked - standard;

    let overtime = saldo.max(Duration::zero());
    let extras = overtime.min(ceiling);
    let extras_excess = overtime - extras;
    let deficit = (-saldo).max(Duration::zero());

    debug!(
        date = %day.date(),
        worked_secs = total_worked.num_seconds(),
        saldo_secs = saldo.num_seconds(),
        "Measured day"
    );

    DailyHoursResult {
        total_worked,
        standard,
        saldo,
        extras,
        extras_excess,
        deficit,
        extras_ceiling: ceiling,
        complete: true,
    }
}
