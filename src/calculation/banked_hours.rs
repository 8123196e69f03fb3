//! Banked-hours (banco de horas) accumulation.
//!
//! This module folds daily results over a range of days into ISO-week,
//! calendar-month and life-to-date balances. Each day is grouped by its own
//! date, so a week that straddles two months contributes to both months.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use tracing::debug;

use crate::calculation::daily_hours::calculate_daily_hours;
use crate::calculation::dates::{iso_week_key, month_key, DateRange};
use crate::config::WorkweekConfig;
use crate::error::EngineResult;
use crate::models::{CompanyPolicy, DailyEntry, DayRecord, PeriodAccumulation};

/// Standard workload per day of the week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StandardWorkload {
    /// The same workload every day.
    Uniform(Duration),
    /// One workload per weekday, indexed from Monday.
    ByWeekday([Duration; 7]),
}

impl StandardWorkload {
    /// The policy's daily standard applied to every day.
    pub fn from_policy(policy: &CompanyPolicy, workweek: &WorkweekConfig) -> EngineResult<Self> {
        Ok(StandardWorkload::Uniform(policy.daily_standard(workweek)?))
    }

    /// The workload for `date`.
    pub fn for_date(&self, date: NaiveDate) -> Duration {
        self.for_weekday(date.weekday())
    }

    /// The workload for `weekday`.
    pub fn for_weekday(&self, weekday: Weekday) -> Duration {
        match self {
            StandardWorkload::Uniform(standard) => *standard,
            StandardWorkload::ByWeekday(by_day) => by_day[weekday.num_days_from_monday() as usize],
        }
    }
}

/// Keeps only the records dated inside `range`.
pub fn records_in_range(
    records: &[DayRecord],
    range: DateRange,
) -> impl Iterator<Item = &DayRecord> {
    records.iter().filter(move |r| range.contains(r.date()))
}

/// Accumulates banked hours over `records`.
///
/// Every record is listed in input order. Days with fewer than two punches
/// are listed and counted in `incomplete_days` but left out of every sum.
///
/// # Examples
///
/// ```
/// use ponto_engine::calculation::{accumulate_banked_hours, StandardWorkload};
/// use ponto_engine::models::DayRecord;
/// use chrono::{Duration, NaiveDate, NaiveTime};
/// use uuid::Uuid;
///
/// let employee_id = Uuid::new_v4();
/// let t = |s: &str| NaiveTime::parse_from_str(s, "%H:%M").unwrap();
/// let days = vec![
///     DayRecord::from_times(employee_id, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
///         &[t("08:00"), t("12:00"), t("13:00"), t("18:00")]).unwrap(),
///     DayRecord::from_times(employee_id, NaiveDate::from_ymd_opt(2025, 3, 11).unwrap(),
///         &[t("08:00"), t("12:00"), t("13:00"), t("16:30")]).unwrap(),
/// ];
///
/// let acc = accumulate_banked_hours(&days, &StandardWorkload::Uniform(Duration::hours(8)), Duration::hours(2));
/// assert_eq!(acc.career.balance, Duration::minutes(-30));
/// assert_eq!(acc.month("2025-03").unwrap().days, 2);
/// ```
pub fn accumulate_banked_hours<'a, I>(
    records: I,
    workload: &StandardWorkload,
    ceiling: Duration,
) -> PeriodAccumulation
where
    I: IntoIterator<Item = &'a DayRecord>,
{
    let mut accumulation = PeriodAccumulation {
        days: Vec::new(),
        weekly: Default::default(),
        monthly: Default::default(),
        career: Default::default(),
        incomplete_days: 0,
    };

    for record in records {
        let date = record.date();
        let result = calculate_daily_hours(record, workload.for_date(date), ceiling);
        accumulation.days.push(DailyEntry { date, result });

        if !result.complete {
            accumulation.incomplete_days += 1;
            continue;
        }

        accumulation
            .weekly
            .entry(iso_week_key(date))
            .or_default()
            .add(&result);
        accumulation
            .monthly
            .entry(month_key(date))
            .or_default()
            .add(&result);
        accumulation.career.add(&result);
    }

    debug!(
        days = accumulation.days.len(),
        incomplete = accumulation.incomplete_days,
        balance_secs = accumulation.career.balance.num_seconds(),
        "Accumulated banked hours"
    );

    accumulation
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(employee_id: Uuid, on: NaiveDate, times: &[&str]) -> DayRecord {
        let times: Vec<NaiveTime> = times
            .iter()
            .map(|t| NaiveTime::parse_from_str(t, "%H:%M").unwrap())
            .collect();
        DayRecord::from_times(employee_id, on, &times).unwrap()
    }

    fn uniform() -> StandardWorkload {
        StandardWorkload::Uniform(Duration::hours(8))
    }

    #[test]
    fn test_balance_is_sum_of_saldo() {
        let id = Uuid::new_v4();
        let days = vec![
            record(id, date(2025, 3, 10), &["08:00", "12:00", "13:00", "18:00"]),
            record(id, date(2025, 3, 11), &["08:00", "12:00", "13:00", "15:00"]),
            record(id, date(2025, 3, 12), &["08:00", "12:00", "13:00", "17:00", "18:00", "22:00"]),
        ];

        let acc = accumulate_banked_hours(&days, &uniform(), Duration::hours(2));
        let saldo_sum = acc
            .days
            .iter()
            .fold(Duration::zero(), |sum, d| sum + d.result.saldo);

        // +1h, -2h, +4h (saldo is not capped; only extras are)
        assert_eq!(acc.career.balance, Duration::hours(3));
        assert_eq!(acc.career.balance, saldo_sum);
        assert_eq!(acc.career.extras, Duration::hours(3));
        assert_eq!(acc.career.deficit, Duration::hours(2));
    }

    #[test]
    fn test_week_spanning_months_splits_monthly_totals() {
        let id = Uuid::new_v4();
        // Friday 2025-01-31 and Monday 2025-02-03 sit in different ISO weeks;
        // Thursday 2025-01-30 and Friday share a week.
        let days = vec![
            record(id, date(2025, 1, 30), &["08:00", "12:00", "13:00", "17:00"]),
            record(id, date(2025, 1, 31), &["08:00", "12:00", "13:00", "18:00"]),
            record(id, date(2025, 2, 3), &["08:00", "12:00", "13:00", "16:00"]),
        ];

        let acc = accumulate_banked_hours(&days, &uniform(), Duration::hours(2));

        assert_eq!(acc.month("2025-01").unwrap().balance, Duration::hours(1));
        assert_eq!(acc.month("2025-02").unwrap().balance, Duration::hours(-1));
        assert_eq!(acc.week("2025-W05").unwrap().days, 2);
        assert_eq!(acc.week("2025-W06").unwrap().days, 1);
        assert_eq!(acc.career.balance, Duration::zero());
    }

    #[test]
    fn test_iso_week_crosses_calendar_year() {
        let id = Uuid::new_v4();
        let days = vec![
            record(id, date(2024, 12, 30), &["08:00", "12:00", "13:00", "17:00"]),
            record(id, date(2025, 1, 2), &["08:00", "12:00", "13:00", "17:00"]),
        ];

        let acc = accumulate_banked_hours(&days, &uniform(), Duration::hours(2));

        assert_eq!(acc.week("2025-W01").unwrap().days, 2);
        assert_eq!(acc.month("2024-12").unwrap().days, 1);
        assert_eq!(acc.month("2025-01").unwrap().days, 1);
    }

    #[test]
    fn test_incomplete_days_listed_but_not_summed() {
        let id = Uuid::new_v4();
        let days = vec![
            record(id, date(2025, 3, 10), &["08:00", "12:00", "13:00", "17:00"]),
            record(id, date(2025, 3, 11), &["08:00"]),
        ];

        let acc = accumulate_banked_hours(&days, &uniform(), Duration::hours(2));

        assert_eq!(acc.days.len(), 2);
        assert!(!acc.days[1].result.complete);
        assert_eq!(acc.incomplete_days, 1);
        assert_eq!(acc.career.days, 1);
        assert_eq!(acc.career.deficit, Duration::zero());
    }

    #[test]
    fn test_by_weekday_workload() {
        let id = Uuid::new_v4();
        let mut by_day = [Duration::hours(8); 7];
        by_day[Weekday::Sat.num_days_from_monday() as usize] = Duration::hours(4);
        by_day[Weekday::Sun.num_days_from_monday() as usize] = Duration::zero();
        let workload = StandardWorkload::ByWeekday(by_day);

        // 2025-03-15 is a Saturday.
        let days = vec![record(id, date(2025, 3, 15), &["08:00", "12:00"])];
        let acc = accumulate_banked_hours(&days, &workload, Duration::hours(2));

        assert_eq!(acc.career.balance, Duration::zero());
        assert_eq!(workload.for_date(date(2025, 3, 15)), Duration::hours(4));
        assert_eq!(workload.for_date(date(2025, 3, 16)), Duration::zero());
        assert_eq!(workload.for_weekday(Weekday::Mon), Duration::hours(8));
    }

    #[test]
    fn test_from_policy_uses_daily_standard() {
        let policy = CompanyPolicy::new("Acme", 176).unwrap();
        let workload = StandardWorkload::from_policy(&policy, &WorkweekConfig::default()).unwrap();
        assert_eq!(workload.for_date(date(2025, 3, 10)), Duration::hours(8));
    }

    #[test]
    fn test_records_in_range() {
        let id = Uuid::new_v4();
        let days = vec![
            record(id, date(2025, 2, 28), &["08:00", "12:00"]),
            record(id, date(2025, 3, 1), &["08:00", "12:00"]),
            record(id, date(2025, 3, 31), &["08:00", "12:00"]),
            record(id, date(2025, 4, 1), &["08:00", "12:00"]),
        ];
        let march = DateRange::month(2025, 3).unwrap();

        let acc = accumulate_banked_hours(records_in_range(&days, march), &uniform(), Duration::hours(2));
        assert_eq!(acc.days.len(), 2);
        assert!(acc.month("2025-02").is_none());
    }

    #[test]
    fn test_empty_input() {
        let none: Vec<DayRecord> = Vec::new();
        let acc = accumulate_banked_hours(&none, &uniform(), Duration::hours(2));
        assert!(acc.days.is_empty());
        assert!(acc.monthly.is_empty());
        assert_eq!(acc.career.balance, Duration::zero());
    }
}
