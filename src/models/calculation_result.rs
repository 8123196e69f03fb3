//! Calculation result models for the Ponto Engine.
//!
//! These are the plain values handed to the caller for rendering: daily
//! hours, period accumulations, payroll, vacation entitlement and payment,
//! and termination settlements. None of them is ever persisted; they are
//! recomputed from the source records on demand.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::duration::seconds;

/// A single step in the audit trail recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
///
/// # Example
///
/// ```
/// use ponto_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "payroll_inss_flat".to_string(),
///     rule_name: "Payroll INSS".to_string(),
///     legal_ref: "Lei 8.212/91".to_string(),
///     input: serde_json::json!({"gross": "3000.00"}),
///     output: serde_json::json!({"inss": "240.00"}),
///     reasoning: "8% of 3000.00".to_string(),
/// };
/// assert_eq!(step.rule_id, "payroll_inss_flat");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Legal basis of the rule.
    pub legal_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// Worked time and balance of a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyHoursResult {
    /// Sum of all complete punch pairs.
    #[serde(with = "seconds")]
    pub total_worked: Duration,
    /// The standard workload the day is measured against.
    #[serde(with = "seconds")]
    pub standard: Duration,
    /// Signed difference `total_worked - standard`.
    #[serde(with = "seconds")]
    pub saldo: Duration,
    /// Overtime credited, capped at the ceiling.
    #[serde(with = "seconds")]
    pub extras: Duration,
    /// Overtime above the ceiling, not credited in `extras`.
    #[serde(with = "seconds")]
    pub extras_excess: Duration,
    /// Time missing to reach the standard.
    #[serde(with = "seconds")]
    pub deficit: Duration,
    /// The overtime ceiling that was applied.
    #[serde(with = "seconds")]
    pub extras_ceiling: Duration,
    /// False when the day has fewer than two punches (pending, not a deficit).
    pub complete: bool,
}

/// One listed day of an accumulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyEntry {
    /// The record's own date.
    pub date: NaiveDate,
    /// The day's result.
    pub result: DailyHoursResult,
}

/// Running sums over a group of complete days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotals {
    /// Total worked time.
    #[serde(with = "seconds")]
    pub worked: Duration,
    /// Total credited overtime.
    #[serde(with = "seconds")]
    pub extras: Duration,
    /// Total deficit.
    #[serde(with = "seconds")]
    pub deficit: Duration,
    /// Signed banked-hours balance: the sum of every day's saldo.
    #[serde(with = "seconds")]
    pub balance: Duration,
    /// Number of complete days folded in.
    pub days: u32,
}

impl Default for PeriodTotals {
    fn default() -> Self {
        Self {
            worked: Duration::zero(),
            extras: Duration::zero(),
            deficit: Duration::zero(),
            balance: Duration::zero(),
            days: 0,
        }
    }
}

impl PeriodTotals {
    /// Folds one complete day into the totals.
    pub fn add(&mut self, result: &DailyHoursResult) {
        self.worked += result.total_worked;
        self.extras += result.extras;
        self.deficit += result.deficit;
        self.balance += result.saldo;
        self.days += 1;
    }
}

/// Banked-hours accumulation over a range of days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodAccumulation {
    /// Every day in input order, complete or not.
    pub days: Vec<DailyEntry>,
    /// Totals per ISO week, keyed `YYYY-Www`.
    pub weekly: BTreeMap<String, PeriodTotals>,
    /// Totals per calendar month, keyed `YYYY-MM`.
    pub monthly: BTreeMap<String, PeriodTotals>,
    /// Life-to-date totals across every month.
    pub career: PeriodTotals,
    /// Days listed but left out of the sums for having fewer than two punches.
    pub incomplete_days: u32,
}

impl PeriodAccumulation {
    /// Totals for a `YYYY-MM` month, if any day fell in it.
    pub fn month(&self, key: &str) -> Option<&PeriodTotals> {
        self.monthly.get(key)
    }

    /// Totals for a `YYYY-Www` ISO week, if any day fell in it.
    pub fn week(&self, key: &str) -> Option<&PeriodTotals> {
        self.weekly.get(key)
    }
}

/// Monthly payroll (holerite) figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// The month paid, `YYYY-MM`.
    pub period: String,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Days with at least two punches.
    pub days_worked: u32,
    /// Hours worked (first-to-last punch), rounded for display.
    pub total_hours: Decimal,
    /// Hours above the daily standard, rounded for display.
    pub extras_hours: Decimal,
    /// `salary / quota`.
    pub hourly_rate: Decimal,
    /// Pay for worked hours (`valor_base`).
    pub base_pay: Decimal,
    /// Overtime pay with premium (`valor_extras`).
    pub extras_pay: Decimal,
    /// `base_pay + extras_pay` (`bruto`).
    pub gross: Decimal,
    /// Flat INSS deduction.
    pub inss_deduction: Decimal,
    /// Flat transport-voucher deduction.
    pub vt_deduction: Decimal,
    /// `gross - inss - vt` (`liquido`).
    pub net: Decimal,
    /// Audit trail of the rules applied.
    pub audit_steps: Vec<AuditStep>,
}

/// Vacation days accrued and still available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementResult {
    /// The date the balance was computed for.
    pub as_of: NaiveDate,
    /// Calendar months between hire and `as_of`.
    pub months_of_service: i32,
    /// Days accrued (`dias_direito`).
    pub days_due: Decimal,
    /// Days consumed by approved requests.
    pub days_consumed: Decimal,
    /// `days_due - days_consumed`, rounded to one decimal.
    pub balance: Decimal,
}

/// Vacation payment (recibo de férias) figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationPaymentResult {
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Days paid, capped at the configured maximum.
    pub days: u32,
    /// `salary / 30 * days` (`valor_ferias`).
    pub vacation_pay: Decimal,
    /// Constitutional one-third bonus (`adicional`).
    pub one_third_bonus: Decimal,
    /// `vacation_pay + one_third_bonus` (`bruto`).
    pub gross: Decimal,
    /// INSS from the bracket table.
    pub inss_deduction: Decimal,
    /// IRRF withheld on `gross - inss`.
    pub irrf_deduction: Decimal,
    /// Transport-voucher deduction.
    pub vt_deduction: Decimal,
    /// Sum of the three deductions.
    pub total_deductions: Decimal,
    /// `gross - total_deductions` (`liquido`).
    pub net: Decimal,
    /// 13th-salary advance paid alongside, not deducted from `net`.
    pub advance_13: Decimal,
    /// Audit trail of the rules applied.
    pub audit_steps: Vec<AuditStep>,
}

/// Reason recorded on a termination settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// Dismissal without just cause.
    SemJustaCausa,
}

/// Termination settlement (TRCT) figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeveranceResult {
    /// Hire date, when known.
    pub hire_date: Option<NaiveDate>,
    /// Termination date.
    pub termination_date: NaiveDate,
    /// Reason for termination.
    pub reason: TerminationReason,
    /// Calendar months between hire and termination.
    pub months_worked: i32,
    /// Days worked in the termination month.
    pub days_worked_in_month: i64,
    /// Salary for the days worked in the last month (`saldo_salario`).
    pub salary_balance: Decimal,
    /// Overdue vacation plus one third (`ferias_vencidas`).
    pub overdue_vacation: Decimal,
    /// Proportional vacation plus one third (`ferias_proporcionais`).
    pub proportional_vacation: Decimal,
    /// Proportional 13th salary (`decimo_terceiro`).
    pub thirteenth_salary: Decimal,
    /// FGTS deposited over the contract.
    pub total_fgts: Decimal,
    /// FGTS penalty (`multa_fgts`).
    pub fgts_penalty: Decimal,
    /// Flat INSS deduction.
    pub inss_deduction: Decimal,
    /// Flat transport-voucher deduction.
    pub vt_deduction: Decimal,
    /// Net settlement (`total_liquido`).
    pub net_total: Decimal,
    /// Audit trail of the rules applied.
    pub audit_steps: Vec<AuditStep>,
}

impl SeveranceResult {
    /// An all-zero settlement for inputs that cannot produce one.
    pub fn zeroed(hire_date: Option<NaiveDate>, termination_date: NaiveDate) -> Self {
        Self {
            hire_date,
            termination_date,
            reason: TerminationReason::SemJustaCausa,
            months_worked: 0,
            days_worked_in_month: 0,
            salary_balance: Decimal::ZERO,
            overdue_vacation: Decimal::ZERO,
            proportional_vacation: Decimal::ZERO,
            thirteenth_salary: Decimal::ZERO,
            total_fgts: Decimal::ZERO,
            fgts_penalty: Decimal::ZERO,
            inss_deduction: Decimal::ZERO,
            vt_deduction: Decimal::ZERO,
            net_total: Decimal::ZERO,
            audit_steps: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day_result(worked_h: i64, saldo_h: i64) -> DailyHoursResult {
        DailyHoursResult {
            total_worked: Duration::hours(worked_h),
            standard: Duration::hours(8),
            saldo: Duration::hours(saldo_h),
            extras: Duration::hours(saldo_h.max(0)),
            extras_excess: Duration::zero(),
            deficit: Duration::hours((-saldo_h).max(0)),
            extras_ceiling: Duration::hours(2),
            complete: true,
        }
    }

    #[test]
    fn test_period_totals_add() {
        let mut totals = PeriodTotals::default();
        totals.add(&day_result(10, 2));
        totals.add(&day_result(5, -3));

        assert_eq!(totals.worked, Duration::hours(15));
        assert_eq!(totals.extras, Duration::hours(2));
        assert_eq!(totals.deficit, Duration::hours(3));
        assert_eq!(totals.balance, Duration::hours(-1));
        assert_eq!(totals.days, 2);
    }

    #[test]
    fn test_daily_result_serializes_seconds() {
        let json = serde_json::to_value(day_result(9, 1)).unwrap();
        assert_eq!(json["total_worked"], 32400);
        assert_eq!(json["saldo"], 3600);
        assert_eq!(json["complete"], true);
    }

    #[test]
    fn test_zeroed_severance() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let result = SeveranceResult::zeroed(None, date);

        assert_eq!(result.net_total, Decimal::ZERO);
        assert_eq!(result.reason, TerminationReason::SemJustaCausa);
        assert!(result.audit_steps.is_empty());
    }

    #[test]
    fn test_termination_reason_serialization() {
        assert_eq!(
            serde_json::to_string(&TerminationReason::SemJustaCausa).unwrap(),
            "\"sem_justa_causa\""
        );
    }
}
