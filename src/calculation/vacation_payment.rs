//! Vacation payment (recibo de férias) calculation.
//!
//! Vacation pay is the daily salary times the days taken plus the
//! constitutional one-third bonus (CF art. 7, XVII). INSS is charged with a
//! single rate chosen by bracket on the whole gross, IRRF is withheld on
//! gross minus INSS, and the transport voucher is a flat rate.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculation::rounding::round_money;
use crate::config::{TaxTable, VacationConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, VacationPaymentResult};

/// INSS on `gross`: the bracket rate on the whole amount, or the flat
/// ceiling above the last bracket. Not rounded.
pub fn inss_for(gross: Decimal, table: &TaxTable) -> Decimal {
    match table.inss.bracket_index(gross) {
        Some(index) => gross * table.inss.brackets[index].rate,
        None => table.inss.ceiling,
    }
}

/// IRRF withheld on `base`, floored at zero. Not rounded.
pub fn irrf_for(base: Decimal, table: &TaxTable) -> Decimal {
    let (rate, deduction) = table.irrf.rate_for(base);
    (base * rate - deduction).max(Decimal::ZERO)
}

/// Calculates the payment for `days` of vacation.
///
/// `days` is capped at the configured maximum (30). When `advance_13` is
/// set, half of the salary is reported as a 13th-salary advance; it is
/// paid alongside and not included in `net`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidEmployee`] for a negative salary.
///
/// # Examples
///
/// ```
/// use ponto_engine::calculation::calculate_vacation_payment;
/// use ponto_engine::config::{TaxTable, VacationConfig};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = calculate_vacation_payment(
///     Decimal::from(3000),
///     30,
///     false,
///     &VacationConfig::default(),
///     &TaxTable::default(),
/// )
/// .unwrap();
///
/// assert_eq!(result.gross, Decimal::from_str("4000.00").unwrap());
/// assert_eq!(result.inss_deduction, Decimal::from_str("480.00").unwrap());
/// assert_eq!(result.irrf_deduction, Decimal::from_str("133.84").unwrap());
/// assert_eq!(result.net, Decimal::from_str("3146.16").unwrap());
/// ```
pub fn calculate_vacation_payment(
    salary: Decimal,
    days: u32,
    advance_13: bool,
    config: &VacationConfig,
    table: &TaxTable,
) -> EngineResult<VacationPaymentResult> {
    if salary < Decimal::ZERO {
        return Err(EngineError::InvalidEmployee {
            field: "monthly_salary".to_string(),
            message: format!("must not be negative, got {}", salary),
        });
    }

    let days = days.min(config.max_days_per_payment);
    let mut audit_steps = Vec::new();
    let mut step_number: u32 = 1;

    let vacation_pay = salary / Decimal::from(30) * Decimal::from(days);
    let one_third_bonus = vacation_pay / Decimal::from(3);
    let gross = vacation_pay + one_third_bonus;

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "vacation_gross".to_string(),
        rule_name: "Vacation Pay with One-Third Bonus".to_string(),
        legal_ref: "CLT art. 142; CF art. 7, XVII".to_string(),
        input: serde_json::json!({
            "salary": salary.to_string(),
            "days": days
        }),
        output: serde_json::json!({
            "vacation_pay": round_money(vacation_pay).to_string(),
            "one_third_bonus": round_money(one_third_bonus).to_string(),
            "gross": round_money(gross).to_string()
        }),
        reasoning: format!(
            "{} / 30 x {} days plus one third = {}",
            salary,
            days,
            round_money(gross)
        ),
    });
    step_number += 1;

    let inss_deduction = round_money(inss_for(gross, table));
    let inss_reasoning = match table.inss.bracket_index(gross) {
        Some(index) => format!(
            "gross {} falls in bracket up to {}, rate {}",
            round_money(gross),
            table.inss.brackets[index].up_to,
            table.inss.brackets[index].rate.normalize()
        ),
        None => format!(
            "gross {} above every bracket, flat ceiling {}",
            round_money(gross),
            table.inss.ceiling
        ),
    };

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "vacation_inss_bracket".to_string(),
        rule_name: "Vacation INSS".to_string(),
        legal_ref: "Lei 8.212/91 art. 28".to_string(),
        input: serde_json::json!({
            "gross": round_money(gross).to_string(),
            "table": table.effective_date.to_string()
        }),
        output: serde_json::json!({ "inss": inss_deduction.to_string() }),
        reasoning: inss_reasoning,
    });
    step_number += 1;

    let irrf_base = gross - inss_deduction;
    let irrf_deduction = round_money(irrf_for(irrf_base, table));
    let (irrf_rate, irrf_allowance) = table.irrf.rate_for(irrf_base);

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "vacation_irrf_bracket".to_string(),
        rule_name: "Vacation IRRF".to_string(),
        legal_ref: "Lei 7.713/88".to_string(),
        input: serde_json::json!({
            "base": round_money(irrf_base).to_string(),
            "table": table.effective_date.to_string()
        }),
        output: serde_json::json!({ "irrf": irrf_deduction.to_string() }),
        reasoning: format!(
            "{} x {} - {}, floored at zero",
            round_money(irrf_base),
            irrf_rate.normalize(),
            irrf_allowance
        ),
    });
    step_number += 1;

    let vt_deduction = round_money(gross * config.vt_rate);
    let total_deductions = inss_deduction + irrf_deduction + vt_deduction;
    let net = round_money(gross - total_deductions);
    let advance = if advance_13 {
        round_money(salary * config.advance_13_fraction)
    } else {
        Decimal::ZERO
    };

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "vacation_net".to_string(),
        rule_name: "Vacation Net Pay".to_string(),
        legal_ref: "CLT art. 145".to_string(),
        input: serde_json::json!({
            "vt_rate": config.vt_rate.normalize().to_string(),
            "advance_13": advance_13
        }),
        output: serde_json::json!({
            "vt": vt_deduction.to_string(),
            "total_deductions": total_deductions.to_string(),
            "net": net.to_string(),
            "advance_13": advance.to_string()
        }),
        reasoning: format!(
            "{} - {} deductions = {}; 13th advance {} paid separately",
            round_money(gross),
            total_deductions,
            net,
            advance
        ),
    });

    debug!(days, gross = %round_money(gross), net = %net, "Calculated vacation payment");

    Ok(VacationPaymentResult {
        base_salary: salary,
        days,
        vacation_pay: round_money(vacation_pay),
        one_third_bonus: round_money(one_third_bonus),
        gross: round_money(gross),
        inss_deduction,
        irrf_deduction,
        vt_deduction,
        total_deductions,
        net,
        advance_13: advance,
        audit_steps,
    })
}
