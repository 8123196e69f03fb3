//! The engine facade.
//!
//! [`PontoEngine`] owns a loaded configuration and wires the calculators
//! together the way the portal's screens use them: punching, history and
//! banked hours, payslips, vacation requests and receipts, and termination.
//! It holds no mutable state; every method takes the records it needs and
//! returns a fresh result.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use chrono::{NaiveDate, NaiveTime};
use tracing::{info, warn};

use crate::calculation::{
    accumulate_banked_hours, calculate_daily_hours, calculate_payroll, calculate_severance,
    calculate_vacation_entitlement, calculate_vacation_payment, records_in_range, register_punch,
    request_vacation, DateRange, PayrollPeriod, StandardWorkload,
};
use crate::config::{ConfigLoader, EngineConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    CompanyPolicy, DailyHoursResult, DayRecord, Employee, EntitlementResult, PayrollResult,
    PeriodAccumulation, SeveranceResult, Transition, VacationPaymentResult, VacationRequest,
};

/// Shared entry point to every calculation.
///
/// Cloning is cheap; clones share the same configuration.
///
/// # Example
///
/// ```
/// use ponto_engine::engine::PontoEngine;
/// use ponto_engine::models::{CompanyPolicy, Employee};
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let engine = PontoEngine::default();
/// let policy = CompanyPolicy::new("Acme", 220).unwrap();
/// let employee = Employee::new(
///     "Maria Souza",
///     policy.id,
///     NaiveDate::from_ymd_opt(2022, 3, 1).unwrap(),
///     Decimal::from(3000),
/// )
/// .unwrap();
///
/// let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
/// let day = engine
///     .register_punch(&employee, None, &[], today, NaiveTime::from_hms_opt(8, 0, 0).unwrap())
///     .unwrap();
/// assert_eq!(day.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PontoEngine {
    config: Arc<ConfigLoader>,
}

impl PontoEngine {
    /// Creates an engine over an already loaded configuration.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Loads the configuration directory at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        match ConfigLoader::load(path) {
            Ok(config) => {
                info!(
                    path = %path.display(),
                    tax_tables = config.config().tax_tables().len(),
                    "Configuration loaded"
                );
                Ok(Self::new(config))
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Configuration failed to load");
                Err(err)
            }
        }
    }

    /// Returns the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the rule parameters.
    pub fn rules(&self) -> &EngineConfig {
        self.config.engine()
    }

    /// Records a punch at `time` on `today`.
    ///
    /// `day` is the employee's record for `today`, if one exists. The
    /// returned record holds the new punch as its last one. The caller must
    /// serialize punches of one employee.
    pub fn register_punch(
        &self,
        employee: &Employee,
        day: Option<&DayRecord>,
        vacations: &[VacationRequest],
        today: NaiveDate,
        time: NaiveTime,
    ) -> EngineResult<DayRecord> {
        let result = register_punch(employee, day, vacations, today, time);
        match &result {
            Ok(updated) => {
                if let Some(punch) = updated.last_punch() {
                    info!(
                        employee_id = %employee.id,
                        date = %today,
                        kind = punch.kind.code(),
                        label = %punch.kind.label(),
                        time = %punch.time,
                        "Punch recorded"
                    );
                }
            }
            Err(err) => {
                warn!(employee_id = %employee.id, date = %today, error = %err, "Punch refused");
            }
        }
        result
    }

    /// Worked time and balance of one day against the policy standard.
    pub fn daily_hours(
        &self,
        policy: &CompanyPolicy,
        day: &DayRecord,
    ) -> EngineResult<DailyHoursResult> {
        let rules = self.rules();
        let standard = policy.daily_standard(&rules.workweek)?;
        Ok(calculate_daily_hours(
            day,
            standard,
            rules.overtime.daily_ceiling(),
        ))
    }

    /// Banked hours of `employee` over `records`, optionally restricted to
    /// `range`. Records of other employees are ignored.
    pub fn banked_hours(
        &self,
        employee: &Employee,
        policy: &CompanyPolicy,
        records: &[DayRecord],
        range: Option<DateRange>,
    ) -> EngineResult<PeriodAccumulation> {
        let rules = self.rules();
        let workload = StandardWorkload::from_policy(policy, &rules.workweek)?;
        let ceiling = rules.overtime.daily_ceiling();
        let own = |r: &&DayRecord| r.employee_id() == employee.id;

        let accumulation = match range {
            Some(range) => accumulate_banked_hours(
                records_in_range(records, range).filter(own),
                &workload,
                ceiling,
            ),
            None => accumulate_banked_hours(records.iter().filter(own), &workload, ceiling),
        };

        info!(
            employee_id = %employee.id,
            policy_id = %policy.id,
            days = accumulation.days.len(),
            balance_secs = accumulation.career.balance.num_seconds(),
            "Banked hours accumulated"
        );
        Ok(accumulation)
    }

    /// The payslip of `employee` for `period`.
    pub fn payroll(
        &self,
        employee: &Employee,
        policy: &CompanyPolicy,
        period: PayrollPeriod,
        records: &[DayRecord],
    ) -> EngineResult<PayrollResult> {
        let start_time = Instant::now();
        match calculate_payroll(employee, policy, period, records, self.rules()) {
            Ok(result) => {
                info!(
                    employee_id = %employee.id,
                    period = %result.period,
                    gross = %result.gross,
                    net = %result.net,
                    duration_us = start_time.elapsed().as_micros(),
                    "Payroll calculated"
                );
                Ok(result)
            }
            Err(err) => {
                warn!(employee_id = %employee.id, period = %period.key(), error = %err, "Payroll failed");
                Err(err)
            }
        }
    }

    /// Vacation balance of `employee` on `as_of`.
    pub fn vacation_entitlement(
        &self,
        employee: &Employee,
        history: &[VacationRequest],
        as_of: NaiveDate,
    ) -> EngineResult<EntitlementResult> {
        calculate_vacation_entitlement(employee, history, as_of, &self.rules().vacation)
    }

    /// Files a pending vacation request, checked against the balance on
    /// `as_of`.
    pub fn request_vacation(
        &self,
        employee: &Employee,
        history: &[VacationRequest],
        start_date: NaiveDate,
        end_date: NaiveDate,
        advance_13: bool,
        as_of: NaiveDate,
    ) -> EngineResult<VacationRequest> {
        let entitlement = self.vacation_entitlement(employee, history, as_of)?;
        match request_vacation(employee, &entitlement, start_date, end_date, advance_13) {
            Ok(request) => {
                info!(
                    employee_id = %employee.id,
                    request_id = %request.id,
                    days = request.days,
                    balance = %entitlement.balance,
                    "Vacation requested"
                );
                Ok(request)
            }
            Err(err) => {
                warn!(employee_id = %employee.id, error = %err, "Vacation request refused");
                Err(err)
            }
        }
    }

    /// Approves `request`, re-checking the balance on `as_of`.
    ///
    /// `history` is the employee's other requests. Returns
    /// [`Transition::Unchanged`] when the request was already approved, in
    /// which case no further settlement must be issued.
    pub fn approve_vacation(
        &self,
        employee: &Employee,
        request: &mut VacationRequest,
        history: &[VacationRequest],
        as_of: NaiveDate,
    ) -> EngineResult<Transition> {
        if request.employee_id != employee.id {
            return Err(EngineError::InvalidEmployee {
                field: "employee_id".to_string(),
                message: format!("request {} belongs to another employee", request.id),
            });
        }

        let others: Vec<VacationRequest> = history
            .iter()
            .filter(|v| v.id != request.id)
            .cloned()
            .collect();
        let entitlement = self.vacation_entitlement(employee, &others, as_of)?;

        let transition = request.approve(entitlement.balance);
        self.log_transition(request, &transition);
        transition
    }

    /// Rejects `request`.
    pub fn reject_vacation(&self, request: &mut VacationRequest) -> EngineResult<Transition> {
        let transition = request.reject();
        self.log_transition(request, &transition);
        transition
    }

    fn log_transition(&self, request: &VacationRequest, transition: &EngineResult<Transition>) {
        match transition {
            Ok(Transition::Applied) => {
                info!(request_id = %request.id, status = %request.status, "Vacation status changed");
            }
            Ok(Transition::Unchanged) => {
                warn!(request_id = %request.id, status = %request.status, "Vacation status already set");
            }
            Err(err) => {
                warn!(request_id = %request.id, error = %err, "Vacation status change refused");
            }
        }
    }

    /// Vacation receipt for `days` using the tax table in force on `as_of`.
    pub fn vacation_payment(
        &self,
        employee: &Employee,
        days: u32,
        advance_13: bool,
        as_of: NaiveDate,
    ) -> EngineResult<VacationPaymentResult> {
        let table = self.config.tax_table_for(as_of)?;
        let result = calculate_vacation_payment(
            employee.monthly_salary,
            days,
            advance_13,
            &self.rules().vacation,
            table,
        )?;

        info!(
            employee_id = %employee.id,
            days = result.days,
            table = %table.effective_date,
            net = %result.net,
            "Vacation payment calculated"
        );
        Ok(result)
    }

    /// Vacation receipt for an approved request, taxed as of its start date.
    pub fn vacation_payment_for(
        &self,
        employee: &Employee,
        request: &VacationRequest,
    ) -> EngineResult<VacationPaymentResult> {
        if !request.is_approved() {
            return Err(EngineError::InvalidTransition {
                from: request.status.to_string(),
                to: "pago".to_string(),
            });
        }
        self.vacation_payment(employee, request.days, request.advance_13, request.start_date)
    }

    /// Termination settlement if `employee` left on `termination_date`.
    pub fn severance(
        &self,
        employee: &Employee,
        termination_date: NaiveDate,
    ) -> EngineResult<SeveranceResult> {
        let result = calculate_severance(
            employee.monthly_salary,
            Some(employee.hire_date),
            termination_date,
            &self.rules().severance,
        )?;

        info!(
            employee_id = %employee.id,
            termination_date = %termination_date,
            net_total = %result.net_total,
            "Settlement calculated"
        );
        Ok(result)
    }

    /// Terminates `employee` on `termination_date` and returns the
    /// settlement. The employee is left untouched on error.
    pub fn terminate(
        &self,
        employee: &mut Employee,
        termination_date: NaiveDate,
    ) -> EngineResult<SeveranceResult> {
        let mut terminated = employee.clone();
        if let Err(err) = terminated.terminate(termination_date) {
            warn!(employee_id = %employee.id, error = %err, "Termination refused");
            return Err(err);
        }

        let result = self.severance(&terminated, termination_date)?;
        *employee = terminated;
        info!(employee_id = %employee.id, "Employee terminated");
        Ok(result)
    }
}
