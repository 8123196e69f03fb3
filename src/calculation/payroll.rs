//! Monthly payroll (holerite) calculation.
//!
//! This module turns a calendar month of punches into gross and net pay.
//! Unlike the daily hours aggregator, payroll measures each day from its
//! earliest to its latest punch, counts every hour above the daily standard
//! as overtime without a ceiling, and applies flat INSS and transport
//! voucher rates to the gross.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculation::dates::{month_key, DateRange};
use crate::calculation::rounding::round_money;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    duration_to_hours, AuditStep, CompanyPolicy, DayRecord, Employee, PayrollResult,
};

/// A payroll period: one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPeriod {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
}

impl PayrollPeriod {
    /// Creates the period for `year`-`month`.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        DateRange::month(year, month)?;
        Ok(Self { year, month })
    }

    /// The period containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The inclusive range of days in the period.
    pub fn range(&self) -> EngineResult<DateRange> {
        DateRange::month(self.year, self.month)
    }

    /// The `YYYY-MM` label of the period.
    pub fn key(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }
}

/// Hours a day counts for payroll: latest punch minus earliest punch.
///
/// Days with fewer than two punches do not count and yield `None`.
pub fn span_hours(day: &DayRecord) -> Option<Decimal> {
    if day.len() < 2 {
        return None;
    }
    let first = day.punches().iter().map(|p| p.time).min()?;
    let last = day.punches().iter().map(|p| p.time).max()?;
    Some(duration_to_hours(last - first))
}

/// Calculates the payroll of `employee` for `period`.
///
/// Records of other employees or outside the period are ignored.
///
/// # Errors
///
/// * [`EngineError::InvalidEmployee`] when the salary is not positive
/// * [`EngineError::InvalidPeriod`] when the policy quota or the configured
///   working days per month are zero
///
/// # Examples
///
/// ```
/// use ponto_engine::calculation::{calculate_payroll, PayrollPeriod};
/// use ponto_engine::config::EngineConfig;
/// use ponto_engine::models::{CompanyPolicy, Employee};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let policy = CompanyPolicy::new("Acme", 220).unwrap();
/// let employee = Employee::new(
///     "Maria Souza",
///     policy.id,
///     NaiveDate::from_ymd_opt(2022, 3, 1).unwrap(),
///     Decimal::from(3000),
/// )
/// .unwrap();
/// let period = PayrollPeriod::new(2025, 3).unwrap();
///
/// let payroll = calculate_payroll(&employee, &policy, period, &[], &EngineConfig::default()).unwrap();
/// assert_eq!(payroll.days_worked, 0);
/// assert_eq!(payroll.net, Decimal::ZERO);
/// ```
pub fn calculate_payroll(
    employee: &Employee,
    policy: &CompanyPolicy,
    period: PayrollPeriod,
    records: &[DayRecord],
    config: &EngineConfig,
) -> EngineResult<PayrollResult> {
    let salary = employee.monthly_salary;
    if salary <= Decimal::ZERO {
        return Err(EngineError::InvalidEmployee {
            field: "monthly_salary".to_string(),
            message: format!("must be positive, got {}", salary),
        });
    }

    let range = period.range()?;
    let daily_standard = policy.daily_standard_hours(&config.workweek)?;
    let hourly_rate = policy.hourly_rate(salary)?;
    let rates = &config.payroll;

    let mut total_hours = Decimal::ZERO;
    let mut extras_hours = Decimal::ZERO;
    let mut days_worked: u32 = 0;

    let in_period = records
        .iter()
        .filter(|r| r.employee_id() == employee.id && range.contains(r.date()));
    for record in in_period {
        let Some(hours) = span_hours(record) else {
            continue;
        };
        total_hours += hours;
        days_worked += 1;
        if hours > daily_standard {
            extras_hours += hours - daily_standard;
        }
    }

    let mut audit_steps = Vec::new();
    let mut step_number: u32 = 1;

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "payroll_hours_span".to_string(),
        rule_name: "Payroll Hours (first to last punch)".to_string(),
        legal_ref: "CLT art. 58".to_string(),
        input: serde_json::json!({
            "period": period.key(),
            "daily_standard": daily_standard.round_dp(4).normalize().to_string()
        }),
        output: serde_json::json!({
            "days_worked": days_worked,
            "total_hours": total_hours.round_dp(4).normalize().to_string(),
            "extras_hours": extras_hours.round_dp(4).normalize().to_string()
        }),
        reasoning: format!(
            "{} days with at least two punches; hours above {} per day count as overtime",
            days_worked,
            daily_standard.round_dp(2).normalize()
        ),
    });
    step_number += 1;

    let base_pay = round_money(total_hours * hourly_rate);
    let extras_pay = round_money(extras_hours * hourly_rate * rates.overtime_premium);
    let gross = base_pay + extras_pay;

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "payroll_gross".to_string(),
        rule_name: "Payroll Gross Pay".to_string(),
        legal_ref: "CLT art. 59 §1".to_string(),
        input: serde_json::json!({
            "hourly_rate": hourly_rate.round_dp(4).normalize().to_string(),
            "overtime_premium": rates.overtime_premium.normalize().to_string()
        }),
        output: serde_json::json!({
            "base_pay": base_pay.to_string(),
            "extras_pay": extras_pay.to_string(),
            "gross": gross.to_string()
        }),
        reasoning: format!(
            "{} + {} overtime at {}x = {}",
            base_pay,
            extras_pay,
            rates.overtime_premium.normalize(),
            gross
        ),
    });
    step_number += 1;

    let inss_deduction = round_money(gross * rates.inss_rate);
    let vt_deduction = round_money(gross * rates.vt_rate);
    let net = gross - inss_deduction - vt_deduction;

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "payroll_flat_deductions".to_string(),
        rule_name: "Payroll Flat Deductions".to_string(),
        legal_ref: "Lei 8.212/91; Lei 7.418/85".to_string(),
        input: serde_json::json!({
            "gross": gross.to_string(),
            "inss_rate": rates.inss_rate.normalize().to_string(),
            "vt_rate": rates.vt_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "inss": inss_deduction.to_string(),
            "vt": vt_deduction.to_string(),
            "net": net.to_string()
        }),
        reasoning: format!(
            "{} - {} INSS - {} VT = {}",
            gross, inss_deduction, vt_deduction, net
        ),
    });

    debug!(
        employee_id = %employee.id,
        period = %month_key(range.start),
        days_worked,
        gross = %gross,
        net = %net,
        "Calculated payroll"
    );

    Ok(PayrollResult {
        period: period.key(),
        base_salary: salary,
        days_worked,
        total_hours: round_money(total_hours),
        extras_hours: round_money(extras_hours),
        hourly_rate,
        base_pay,
        extras_pay,
        gross,
        inss_deduction,
        vt_deduction,
        net,
        audit_steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(employee: &Employee, on: NaiveDate, times: &[&str]) -> DayRecord {
        let times: Vec<NaiveTime> = times
            .iter()
            .map(|t| NaiveTime::parse_from_str(t, "%H:%M").unwrap())
            .collect();
        DayRecord::from_times(employee.id, on, &times).unwrap()
    }

    fn setup(salary: &str) -> (Employee, CompanyPolicy) {
        let policy = CompanyPolicy::new("Acme", 220).unwrap();
        let employee = Employee::new("Ana", policy.id, date(2022, 3, 1), dec(salary)).unwrap();
        (employee, policy)
    }

    #[test]
    fn test_full_quota_month() {
        // 22 days of 10h spans = 220h, exactly the quota.
        let (employee, policy) = setup("3000");
        let records: Vec<DayRecord> = (1..=22)
            .map(|d| record(&employee, date(2025, 3, d), &["08:00", "12:00", "13:00", "18:00"]))
            .collect();

        let result = calculate_payroll(
            &employee,
            &policy,
            PayrollPeriod::new(2025, 3).unwrap(),
            &records,
            &EngineConfig::default(),
        )
        .unwrap();

        assert_eq!(result.days_worked, 22);
        assert_eq!(result.total_hours, dec("220"));
        assert_eq!(result.extras_hours, Decimal::ZERO);
        assert_eq!(result.base_pay, dec("3000.00"));
        assert_eq!(result.gross, dec("3000.00"));
        assert_eq!(result.inss_deduction, dec("240.00"));
        assert_eq!(result.vt_deduction, dec("150.00"));
        assert_eq!(result.net, dec("2610.00"));
        assert_eq!(result.audit_steps.len(), 3);
    }

    #[test]
    fn test_span_model_ignores_lunch_break() {
        let (employee, policy) = setup("2200");
        // 08:00 to 20:00 is 12h, 2h above the 10h standard.
        let records = vec![record(
            &employee,
            date(2025, 3, 10),
            &["08:00", "12:00", "13:00", "20:00"],
        )];

        let result = calculate_payroll(
            &employee,
            &policy,
            PayrollPeriod::new(2025, 3).unwrap(),
            &records,
            &EngineConfig::default(),
        )
        .unwrap();

        // hourly 10.00: base 120.00, extras 2 * 10 * 1.5 = 30.00
        assert_eq!(result.total_hours, dec("12"));
        assert_eq!(result.extras_hours, dec("2"));
        assert_eq!(result.base_pay, dec("120.00"));
        assert_eq!(result.extras_pay, dec("30.00"));
        assert_eq!(result.gross, dec("150.00"));
        assert_eq!(result.inss_deduction, dec("12.00"));
        assert_eq!(result.vt_deduction, dec("7.50"));
        assert_eq!(result.net, dec("130.50"));
    }

    #[test]
    fn test_overtime_is_not_capped() {
        let (employee, policy) = setup("2200");
        let records = vec![record(&employee, date(2025, 3, 10), &["06:00", "22:00"])];

        let result = calculate_payroll(
            &employee,
            &policy,
            PayrollPeriod::new(2025, 3).unwrap(),
            &records,
            &EngineConfig::default(),
        )
        .unwrap();

        assert_eq!(result.extras_hours, dec("6"));
    }

    #[test]
    fn test_single_punch_days_and_other_months_ignored() {
        let (employee, policy) = setup("3000");
        let records = vec![
            record(&employee, date(2025, 3, 10), &["08:00"]),
            record(&employee, date(2025, 4, 1), &["08:00", "18:00"]),
            record(&employee, date(2025, 2, 28), &["08:00", "18:00"]),
        ];

        let result = calculate_payroll(
            &employee,
            &policy,
            PayrollPeriod::new(2025, 3).unwrap(),
            &records,
            &EngineConfig::default(),
        )
        .unwrap();

        assert_eq!(result.days_worked, 0);
        assert_eq!(result.gross, Decimal::ZERO);
        assert_eq!(result.net, Decimal::ZERO);
    }

    #[test]
    fn test_other_employees_records_ignored() {
        let (employee, policy) = setup("3000");
        let (colleague, _) = setup("3000");
        let records = vec![record(&colleague, date(2025, 3, 10), &["08:00", "18:00"])];

        let result = calculate_payroll(
            &employee,
            &policy,
            PayrollPeriod::new(2025, 3).unwrap(),
            &records,
            &EngineConfig::default(),
        )
        .unwrap();

        assert_eq!(result.days_worked, 0);
    }

    #[test]
    fn test_zero_quota_is_invalid_period() {
        let (employee, _) = setup("3000");
        let policy = CompanyPolicy {
            id: employee.policy_id,
            company_name: "Broken".to_string(),
            monthly_quota_hours: 0,
        };

        let result = calculate_payroll(
            &employee,
            &policy,
            PayrollPeriod::new(2025, 3).unwrap(),
            &[],
            &EngineConfig::default(),
        );
        assert!(matches!(result, Err(EngineError::InvalidPeriod { .. })));
    }

    #[test]
    fn test_span_uses_earliest_and_latest_times() {
        let (employee, _) = setup("3000");
        let day = record(&employee, date(2025, 3, 10), &["09:00", "08:00", "17:00"]);
        assert_eq!(span_hours(&day), Some(dec("9")));
    }

    #[test]
    fn test_period_helpers() {
        let period = PayrollPeriod::containing(date(2024, 2, 14));
        assert_eq!(period.key(), "2024-02");
        assert_eq!(period.range().unwrap().end, date(2024, 2, 29));
        assert!(PayrollPeriod::new(2024, 0).is_err());
    }
}
