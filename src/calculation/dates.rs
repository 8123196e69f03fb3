//! Calendar arithmetic used by tenure-based calculations.
//!
//! This module counts calendar months the way payroll does (by month
//! number, ignoring the day of month), finds month bounds, and builds the
//! grouping keys used for weekly and monthly reports.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Calendar months from `from` to `to`, ignoring the day of month.
///
/// ```
/// use ponto_engine::calculation::months_between;
/// use chrono::NaiveDate;
///
/// let hire = NaiveDate::from_ymd_opt(2020, 1, 15).unwrap();
/// let term = NaiveDate::from_ymd_opt(2023, 1, 20).unwrap();
/// assert_eq!(months_between(hire, term), 36);
/// ```
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32)
}

/// First day of the month containing `date`.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Number of days in the month containing `date`.
pub fn days_in_month(date: NaiveDate) -> EngineResult<u32> {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    let next_first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        EngineError::InvalidPeriod {
            message: format!("month after {} is out of range", date),
        }
    })?;
    let days = (next_first - first_of_month(date)).num_days();
    u32::try_from(days).map_err(|_| EngineError::InvalidPeriod {
        message: format!("month of {} has no days", date),
    })
}

/// `YYYY-MM` key of the month containing `date`.
pub fn month_key(date: NaiveDate) -> String {
    format!("{}-{:02}", date.year(), date.month())
}

/// `YYYY-Www` key of the ISO week containing `date`.
///
/// ```
/// use ponto_engine::calculation::iso_week_key;
/// use chrono::NaiveDate;
///
/// // 2024-12-30 belongs to ISO week 1 of 2025.
/// assert_eq!(iso_week_key(NaiveDate::from_ymd_opt(2024, 12, 30).unwrap()), "2025-W01");
/// ```
pub fn iso_week_key(date: NaiveDate) -> String {
    let week = date.iso_week();
    format!("{}-W{:02}", week.year(), week.week())
}

/// An inclusive range of dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day (inclusive).
    pub start: NaiveDate,
    /// Last day (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> EngineResult<Self> {
        if end < start {
            return Err(EngineError::InvalidPeriod {
                message: format!("range ends on {} before it starts on {}", end, start),
            });
        }
        Ok(Self { start, end })
    }

    /// The calendar month `year`-`month`.
    pub fn month(year: i32, month: u32) -> EngineResult<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            EngineError::InvalidPeriod {
                message: format!("{}-{:02} is not a valid month", year, month),
            }
        })?;
        let last_day = days_in_month(start)?;
        let end = start.with_day(last_day).unwrap_or(start);
        Ok(Self { start, end })
    }

    /// Returns true when `date` falls inside the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
