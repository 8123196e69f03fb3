//! Termination settlement (TRCT) calculation.
//!
//! Computes the amounts owed on dismissal without just cause: salary for the
//! days worked in the last month, overdue and proportional vacation with
//! their one-third bonus, proportional 13th salary and the FGTS penalty,
//! less flat INSS and transport-voucher deductions.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use tracing::debug;

use crate::calculation::dates::{days_in_month, first_of_month, months_between};
use crate::calculation::rounding::round_money;
use crate::config::SeveranceConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, SeveranceResult, TerminationReason};

/// Tenure figures a settlement is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tenure {
    hire_date: NaiveDate,
    months_worked: i32,
    days_in_month: u32,
    days_worked_in_month: i64,
    tenure_days: i64,
}

fn tenure(
    salary: Decimal,
    hire_date: Option<NaiveDate>,
    termination_date: NaiveDate,
) -> EngineResult<Tenure> {
    let hire_date = match hire_date {
        Some(hire) if salary > Decimal::ZERO => hire,
        Some(_) => {
            return Err(EngineError::DegenerateInput {
                message: format!("salary {} is not positive", salary),
            });
        }
        None => {
            return Err(EngineError::DegenerateInput {
                message: "hire date is unknown".to_string(),
            });
        }
    };

    if termination_date < hire_date {
        return Err(EngineError::InvalidPeriod {
            message: format!(
                "termination date {} is before hire date {}",
                termination_date, hire_date
            ),
        });
    }

    let months_worked = months_between(hire_date, termination_date);
    let worked_from = hire_date.max(first_of_month(termination_date));
    let days_worked_in_month = (termination_date - worked_from).num_days() + 1;

    if months_worked <= 0 && days_worked_in_month <= 0 {
        return Err(EngineError::DegenerateInput {
            message: "no months or days worked".to_string(),
        });
    }

    Ok(Tenure {
        hire_date,
        months_worked,
        days_in_month: days_in_month(termination_date)?,
        days_worked_in_month,
        tenure_days: (termination_date - hire_date).num_days(),
    })
}

/// Calculates the termination settlement.
///
/// A non-positive salary or an unknown hire date cannot produce a
/// settlement and yields an all-zero result instead of an error.
///
/// # Errors
///
/// Returns [`EngineError::InvalidPeriod`] when the termination date is
/// before the hire date.
///
/// # Examples
///
/// ```
/// use ponto_engine::calculation::calculate_severance;
/// use ponto_engine::config::SeveranceConfig;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = calculate_severance(
///     Decimal::from(5000),
///     NaiveDate::from_ymd_opt(2020, 1, 15),
///     NaiveDate::from_ymd_opt(2023, 1, 20).unwrap(),
///     &SeveranceConfig::default(),
/// )
/// .unwrap();
///
/// assert_eq!(result.months_worked, 36);
/// assert_eq!(result.net_total, Decimal::from_str("35419.15").unwrap());
/// ```
pub fn calculate_severance(
    salary: Decimal,
    hire_date: Option<NaiveDate>,
    termination_date: NaiveDate,
    config: &SeveranceConfig,
) -> EngineResult<SeveranceResult> {
    let tenure = match tenure(salary, hire_date, termination_date) {
        Ok(tenure) => tenure,
        Err(EngineError::DegenerateInput { message }) => {
            debug!(%termination_date, reason = %message, "Settlement zeroed");
            return Ok(SeveranceResult::zeroed(hire_date, termination_date));
        }
        Err(other) => return Err(other),
    };

    let months = Decimal::from(tenure.months_worked.max(0));
    let twelve = Decimal::from(12);
    let three = Decimal::from(3);
    let mut audit_steps = Vec::new();
    let mut step_number: u32 = 1;

    let salary_balance = round_money(
        salary / Decimal::from(tenure.days_in_month)
            * Decimal::from(tenure.days_worked_in_month.max(0)),
    );

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "trct_salary_balance".to_string(),
        rule_name: "Salary Balance".to_string(),
        legal_ref: "CLT art. 477".to_string(),
        input: serde_json::json!({
            "salary": salary.to_string(),
            "days_in_month": tenure.days_in_month,
            "days_worked": tenure.days_worked_in_month
        }),
        output: serde_json::json!({ "salary_balance": salary_balance.to_string() }),
        reasoning: format!(
            "{} / {} x {} days worked in the last month",
            salary, tenure.days_in_month, tenure.days_worked_in_month
        ),
    });
    step_number += 1;

    let overdue_vacation = if tenure.tenure_days >= config.overdue_vacation_tenure_days {
        round_money(salary + salary / three)
    } else {
        Decimal::ZERO
    };
    let vacation_base = salary / twelve * months;
    let proportional_vacation = round_money(vacation_base + vacation_base / three);

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "trct_vacation".to_string(),
        rule_name: "Overdue and Proportional Vacation".to_string(),
        legal_ref: "CLT arts. 146-147; CF art. 7, XVII".to_string(),
        input: serde_json::json!({
            "tenure_days": tenure.tenure_days,
            "months_worked": tenure.months_worked
        }),
        output: serde_json::json!({
            "overdue_vacation": overdue_vacation.to_string(),
            "proportional_vacation": proportional_vacation.to_string()
        }),
        reasoning: format!(
            "{} days of tenure ({} required for overdue vacation); {} months proportional",
            tenure.tenure_days, config.overdue_vacation_tenure_days, tenure.months_worked
        ),
    });
    step_number += 1;

    let thirteenth_salary =
        round_money(salary / twelve * Decimal::from(termination_date.month()));

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "trct_thirteenth".to_string(),
        rule_name: "Proportional 13th Salary".to_string(),
        legal_ref: "Lei 4.090/62".to_string(),
        input: serde_json::json!({ "termination_month": termination_date.month() }),
        output: serde_json::json!({ "thirteenth_salary": thirteenth_salary.to_string() }),
        reasoning: format!("{} / 12 x {}", salary, termination_date.month()),
    });
    step_number += 1;

    let total_fgts = round_money(salary * config.fgts_rate * months);
    let fgts_penalty = round_money(total_fgts * config.fgts_penalty_rate);

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "trct_fgts_penalty".to_string(),
        rule_name: "FGTS Penalty".to_string(),
        legal_ref: "Lei 8.036/90 art. 18 §1".to_string(),
        input: serde_json::json!({
            "fgts_rate": config.fgts_rate.normalize().to_string(),
            "penalty_rate": config.fgts_penalty_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "total_fgts": total_fgts.to_string(),
            "fgts_penalty": fgts_penalty.to_string()
        }),
        reasoning: format!(
            "{} deposited over {} months, penalty {}",
            total_fgts, tenure.months_worked, fgts_penalty
        ),
    });
    step_number += 1;

    let inss_deduction = round_money(salary * config.inss_rate);
    let vt_deduction = round_money(salary * config.vt_rate);
    let net_total = round_money(
        salary_balance + overdue_vacation + proportional_vacation + thirteenth_salary
            + fgts_penalty
            - inss_deduction
            - vt_deduction,
    );

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "trct_net".to_string(),
        rule_name: "Settlement Net Total".to_string(),
        legal_ref: "CLT art. 477".to_string(),
        input: serde_json::json!({
            "inss_rate": config.inss_rate.normalize().to_string(),
            "vt_rate": config.vt_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "inss": inss_deduction.to_string(),
            "vt": vt_deduction.to_string(),
            "net_total": net_total.to_string()
        }),
        reasoning: format!(
            "credits less {} INSS and {} VT = {}",
            inss_deduction, vt_deduction, net_total
        ),
    });

    debug!(
        hire_date = %tenure.hire_date,
        %termination_date,
        months = tenure.months_worked,
        net_total = %net_total,
        "Calculated settlement"
    );

    Ok(SeveranceResult {
        hire_date: Some(tenure.hire_date),
        termination_date,
        reason: TerminationReason::SemJustaCausa,
        months_worked: tenure.months_worked,
        days_worked_in_month: tenure.days_worked_in_month,
        salary_balance,
        overdue_vacation,
        proportional_vacation,
        thirteenth_salary,
        total_fgts,
        fgts_penalty,
        inss_deduction,
        vt_deduction,
        net_total,
        audit_steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn settle(salary: &str, hire: Option<NaiveDate>, term: NaiveDate) -> EngineResult<SeveranceResult> {
        calculate_severance(dec(salary), hire, term, &SeveranceConfig::default())
    }

    #[test]
    fn test_three_year_contract() {
        let result = settle("5000", Some(date(2020, 1, 15)), date(2023, 1, 20)).unwrap();

        assert_eq!(result.months_worked, 36);
        assert_eq!(result.days_worked_in_month, 20);
        assert_eq!(result.salary_balance, dec("3225.81"));
        assert_eq!(result.overdue_vacation, dec("6666.67"));
        assert_eq!(result.proportional_vacation, dec("20000.00"));
        assert_eq!(result.thirteenth_salary, dec("416.67"));
        assert_eq!(result.total_fgts, dec("14400.00"));
        assert_eq!(result.fgts_penalty, dec("5760.00"));
        assert_eq!(result.inss_deduction, dec("400.00"));
        assert_eq!(result.vt_deduction, dec("250.00"));
        assert_eq!(result.net_total, dec("35419.15"));
        assert_eq!(result.reason, TerminationReason::SemJustaCausa);
        assert_eq!(result.audit_steps.len(), 5);
    }

    #[test]
    fn test_hired_in_termination_month() {
        // Hired 2024-03-10, terminated 2024-03-25: 16 days, no full month.
        let result = settle("3100", Some(date(2024, 3, 10)), date(2024, 3, 25)).unwrap();

        assert_eq!(result.months_worked, 0);
        assert_eq!(result.days_worked_in_month, 16);
        assert_eq!(result.salary_balance, dec("1600.00"));
        assert_eq!(result.overdue_vacation, Decimal::ZERO);
        assert_eq!(result.proportional_vacation, Decimal::ZERO);
        assert_eq!(result.total_fgts, Decimal::ZERO);
        assert_eq!(result.fgts_penalty, Decimal::ZERO);
    }

    #[test]
    fn test_overdue_vacation_needs_a_year() {
        let short = settle("3000", Some(date(2023, 1, 20)), date(2024, 1, 19)).unwrap();
        assert_eq!(short.overdue_vacation, Decimal::ZERO);

        let long = settle("3000", Some(date(2023, 1, 20)), date(2024, 1, 20)).unwrap();
        assert_eq!(long.overdue_vacation, dec("4000.00"));
    }

    #[test]
    fn test_missing_hire_date_is_zeroed() {
        let result = settle("5000", None, date(2023, 1, 20)).unwrap();
        assert_eq!(result, SeveranceResult::zeroed(None, date(2023, 1, 20)));
    }

    #[test]
    fn test_non_positive_salary_is_zeroed() {
        let hire = Some(date(2020, 1, 15));
        let zero = settle("0", hire, date(2023, 1, 20)).unwrap();
        assert_eq!(zero.net_total, Decimal::ZERO);
        assert_eq!(zero.hire_date, hire);

        let negative = settle("-100", hire, date(2023, 1, 20)).unwrap();
        assert_eq!(negative.net_total, Decimal::ZERO);
    }

    #[test]
    fn test_degenerate_guard_precedes_date_check() {
        // Zero salary with inverted dates is still a zeroed settlement.
        let result = settle("0", Some(date(2024, 5, 1)), date(2024, 4, 1)).unwrap();
        assert_eq!(result.net_total, Decimal::ZERO);
    }

    #[test]
    fn test_termination_before_hire_is_invalid() {
        let result = settle("3000", Some(date(2024, 5, 1)), date(2024, 4, 30));
        assert!(matches!(result, Err(EngineError::InvalidPeriod { .. })));
    }

    #[test]
    fn test_same_day_contract() {
        let result = settle("3000", Some(date(2024, 2, 29)), date(2024, 2, 29)).unwrap();
        assert_eq!(result.days_worked_in_month, 1);
        // 3000 / 29 = 103.448..
        assert_eq!(result.salary_balance, dec("103.45"));
        assert_eq!(result.thirteenth_salary, dec("500.00"));
    }
}
