//! Vacation entitlement tracking.
//!
//! Vacation accrues by calendar month of service: thirty days per completed
//! year plus two and a half days per month of the current year (CLT art.
//! 130). Days of approved requests are consumed from the balance.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::calculation::dates::months_between;
use crate::calculation::rounding::round_days;
use crate::config::VacationConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{EntitlementResult, Employee, VacationRequest};

/// Days accrued after `months` calendar months of service.
///
/// ```
/// use ponto_engine::calculation::days_due;
/// use ponto_engine::config::VacationConfig;
/// use rust_decimal::Decimal;
///
/// assert_eq!(days_due(14, &VacationConfig::default()), Decimal::from(35));
/// ```
pub fn days_due(months: i32, config: &VacationConfig) -> Decimal {
    let years = months.div_euclid(12);
    let remainder = months.rem_euclid(12);
    Decimal::from(years) * Decimal::from(config.days_per_year)
        + Decimal::from(remainder) * config.accrual_per_month
}

/// Calculates the employee's vacation balance on `as_of`.
///
/// Only approved requests of this employee are consumed; pending and
/// rejected ones are ignored.
///
/// # Errors
///
/// Returns [`EngineError::InvalidPeriod`] when `as_of` is before the hire
/// date.
///
/// # Examples
///
/// ```
/// use ponto_engine::calculation::calculate_vacation_entitlement;
/// use ponto_engine::config::VacationConfig;
/// use ponto_engine::models::Employee;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let employee = Employee::new(
///     "Maria Souza",
///     Uuid::new_v4(),
///     NaiveDate::from_ymd_opt(2023, 1, 10).unwrap(),
///     Decimal::from(3000),
/// )
/// .unwrap();
/// let as_of = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
///
/// let result = calculate_vacation_entitlement(&employee, &[], as_of, &VacationConfig::default()).unwrap();
/// assert_eq!(result.months_of_service, 14);
/// assert_eq!(result.balance, Decimal::from(35));
/// ```
pub fn calculate_vacation_entitlement(
    employee: &Employee,
    history: &[VacationRequest],
    as_of: NaiveDate,
    config: &VacationConfig,
) -> EngineResult<EntitlementResult> {
    if as_of < employee.hire_date {
        return Err(EngineError::InvalidPeriod {
            message: format!(
                "entitlement date {} is before hire date {}",
                as_of, employee.hire_date
            ),
        });
    }

    let months_of_service = months_between(employee.hire_date, as_of);
    let due = days_due(months_of_service, config);
    let consumed: u32 = history
        .iter()
        .filter(|v| v.employee_id == employee.id && v.is_approved())
        .map(|v| v.days)
        .sum();
    let days_consumed = Decimal::from(consumed);
    let balance = round_days(due - days_consumed);

    debug!(
        employee_id = %employee.id,
        months = months_of_service,
        due = %due,
        consumed,
        balance = %balance,
        "Calculated vacation entitlement"
    );

    Ok(EntitlementResult {
        as_of,
        months_of_service,
        days_due: due,
        days_consumed,
        balance,
    })
}

/// Builds a pending vacation request if the balance covers it.
///
/// # Errors
///
/// * [`EngineError::EmployeeInactive`] for a terminated employee
/// * [`EngineError::InvalidPeriod`] when `end_date < start_date`
/// * [`EngineError::InsufficientBalance`] when the requested days exceed
///   `entitlement.balance`
pub fn request_vacation(
    employee: &Employee,
    entitlement: &EntitlementResult,
    start_date: NaiveDate,
    end_date: NaiveDate,
    advance_13: bool,
) -> EngineResult<VacationRequest> {
    if !employee.is_active() {
        return Err(EngineError::EmployeeInactive {
            employee_id: employee.id,
        });
    }

    let request = VacationRequest::new(employee.id, start_date, end_date, advance_13)?;
    if Decimal::from(request.days) > entitlement.balance {
        return Err(EngineError::InsufficientBalance {
            requested: request.days,
            available: entitlement.balance,
        });
    }

    debug!(
        employee_id = %employee.id,
        request_id = %request.id,
        days = request.days,
        "Vacation requested"
    );

    Ok(request)
}
