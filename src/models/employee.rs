//! Employee and company policy models.
//!
//! This module defines the [`Employee`] record and the [`CompanyPolicy`]
//! that supplies the monthly hour quota from which daily and weekly
//! standard workloads and the hourly rate are derived.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::WorkweekConfig;
use crate::error::{EngineError, EngineResult};

/// Represents an employee whose time and pay are computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// The company policy the employee works under.
    pub policy_id: Uuid,
    /// The date the employee was hired (data de admissão).
    pub hire_date: NaiveDate,
    /// The termination date (data de demissão), once set.
    #[serde(default)]
    pub termination_date: Option<NaiveDate>,
    /// Monthly base salary.
    pub monthly_salary: Decimal,
    /// Whether the employee is still active.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Employee {
    /// Creates an active employee, rejecting a non-positive salary.
    ///
    /// # Examples
    ///
    /// ```
    /// use ponto_engine::models::Employee;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    /// use uuid::Uuid;
    ///
    /// let employee = Employee::new(
    ///     "Maria Souza",
    ///     Uuid::new_v4(),
    ///     NaiveDate::from_ymd_opt(2022, 3, 1).unwrap(),
    ///     Decimal::new(300000, 2),
    /// )
    /// .unwrap();
    /// assert!(employee.is_active());
    /// ```
    pub fn new(
        name: impl Into<String>,
        policy_id: Uuid,
        hire_date: NaiveDate,
        monthly_salary: Decimal,
    ) -> EngineResult<Self> {
        if monthly_salary <= Decimal::ZERO {
            return Err(EngineError::InvalidEmployee {
                field: "monthly_salary".to_string(),
                message: format!("must be positive, got {}", monthly_salary),
            });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            policy_id,
            hire_date,
            termination_date: None,
            monthly_salary,
            active: true,
        })
    }

    /// Returns true while the employee may still record punches.
    pub fn is_active(&self) -> bool {
        self.active && self.termination_date.is_none()
    }

    /// Terminates the contract on `date` and deactivates the record.
    ///
    /// The termination date can be set only once and never before the hire
    /// date.
    pub fn terminate(&mut self, date: NaiveDate) -> EngineResult<()> {
        if let Some(existing) = self.termination_date {
            return Err(EngineError::InvalidEmployee {
                field: "termination_date".to_string(),
                message: format!("already terminated on {}", existing),
            });
        }
        if date < self.hire_date {
            return Err(EngineError::InvalidPeriod {
                message: format!(
                    "termination date {} is before hire date {}",
                    date, self.hire_date
                ),
            });
        }

        self.termination_date = Some(date);
        self.active = false;
        Ok(())
    }
}

/// Company policy shared read-only by all of the company's employees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyPolicy {
    /// Unique identifier for the policy.
    pub id: Uuid,
    /// Company name.
    pub company_name: String,
    /// Monthly hour quota (carga mensal), typically 220.
    pub monthly_quota_hours: u32,
}

impl CompanyPolicy {
    /// Creates a policy, rejecting a zero quota.
    pub fn new(company_name: impl Into<String>, monthly_quota_hours: u32) -> EngineResult<Self> {
        let policy = Self {
            id: Uuid::new_v4(),
            company_name: company_name.into(),
            monthly_quota_hours,
        };
        policy.quota()?;
        Ok(policy)
    }

    /// Returns the quota as a decimal, failing when it is zero.
    pub fn quota(&self) -> EngineResult<Decimal> {
        if self.monthly_quota_hours == 0 {
            return Err(EngineError::InvalidPeriod {
                message: "monthly hour quota must be positive".to_string(),
            });
        }
        Ok(Decimal::from(self.monthly_quota_hours))
    }

    /// Standard daily workload in decimal hours (`quota / working days`).
    ///
    /// ```
    /// use ponto_engine::config::WorkweekConfig;
    /// use ponto_engine::models::CompanyPolicy;
    /// use rust_decimal::Decimal;
    ///
    /// let policy = CompanyPolicy::new("Acme", 220).unwrap();
    /// let daily = policy.daily_standard_hours(&WorkweekConfig::default()).unwrap();
    /// assert_eq!(daily, Decimal::from(10));
    /// ```
    pub fn daily_standard_hours(&self, workweek: &WorkweekConfig) -> EngineResult<Decimal> {
        let days = working_days(workweek.working_days_per_month)?;
        Ok(self.quota()? / Decimal::from(days))
    }

    /// Standard daily workload as a duration, truncated to whole seconds.
    pub fn daily_standard(&self, workweek: &WorkweekConfig) -> EngineResult<Duration> {
        let days = working_days(workweek.working_days_per_month)?;
        self.quota()?;
        let seconds = i64::from(self.monthly_quota_hours) * 3600 / i64::from(days);
        Ok(Duration::seconds(seconds))
    }

    /// Weekly standard: `quota / working days per month / working days per week`,
    /// truncated to whole seconds. A 220 h quota gives 2 h.
    pub fn weekly_standard(&self, workweek: &WorkweekConfig) -> EngineResult<Duration> {
        let per_month = working_days(workweek.working_days_per_month)?;
        let per_week = working_days(workweek.working_days_per_week)?;
        self.quota()?;
        let seconds = i64::from(self.monthly_quota_hours) * 3600
            / (i64::from(per_month) * i64::from(per_week));
        Ok(Duration::seconds(seconds))
    }

    /// Hourly rate for a monthly salary (`salary / quota`).
    pub fn hourly_rate(&self, monthly_salary: Decimal) -> EngineResult<Decimal> {
        Ok(monthly_salary / self.quota()?)
    }
}

fn working_days(days: u32) -> EngineResult<u32> {
    if days == 0 {
        return Err(EngineError::InvalidPeriod {
            message: "working days per period must be positive".to_string(),
        });
    }
    Ok(days)
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

    fn create_test_employee() -> Employee {
        Employee::new("Ana", Uuid::new_v4(), date(2020, 1, 15), dec("5000.00")).unwrap()
    }

    #[test]
    fn test_new_employee_is_active() {
        let employee = create_test_employee();
        assert!(employee.is_active());
        assert!(employee.termination_date.is_none());
    }

    #[test]
    fn test_new_employee_rejects_zero_salary() {
        let result = Employee::new("Ana", Uuid::new_v4(), date(2020, 1, 15), Decimal::ZERO);
        match result {
            Err(EngineError::InvalidEmployee { field, .. }) => {
                assert_eq!(field, "monthly_salary")
            }
            other => panic!("Expected InvalidEmployee, got {:?}", other),
        }
    }

    #[test]
    fn test_terminate_sets_date_and_deactivates() {
        let mut employee = create_test_employee();
        employee.terminate(date(2023, 1, 20)).unwrap();

        assert_eq!(employee.termination_date, Some(date(2023, 1, 20)));
        assert!(!employee.is_active());
    }

    #[test]
    fn test_terminate_before_hire_is_invalid_period() {
        let mut employee = create_test_employee();
        let result = employee.terminate(date(2019, 12, 31));

        assert!(matches!(result, Err(EngineError::InvalidPeriod { .. })));
        assert!(employee.is_active());
    }

    #[test]
    fn test_terminate_twice_is_rejected() {
        let mut employee = create_test_employee();
        employee.terminate(date(2023, 1, 20)).unwrap();

        let result = employee.terminate(date(2023, 2, 1));
        assert!(matches!(result, Err(EngineError::InvalidEmployee { .. })));
        assert_eq!(employee.termination_date, Some(date(2023, 1, 20)));
    }

    #[test]
    fn test_deserialize_employee_defaults_active() {
        let json = r#"{
            "id": "6f1c2a9e-8a7b-4b43-9f3e-2b1f0e6c9d11",
            "name": "Carlos",
            "policy_id": "0b5f7a3c-1d2e-4f60-8a9b-c0d1e2f3a4b5",
            "hire_date": "2021-06-01",
            "monthly_salary": "2500.00"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert!(employee.active);
        assert_eq!(employee.monthly_salary, dec("2500.00"));
    }

    #[test]
    fn test_policy_standards_for_220_hours() {
        let policy = CompanyPolicy::new("Acme", 220).unwrap();
        let workweek = WorkweekConfig::default();

        assert_eq!(policy.daily_standard(&workweek).unwrap(), Duration::hours(10));
        assert_eq!(policy.weekly_standard(&workweek).unwrap(), Duration::hours(2));
        assert_eq!(policy.daily_standard_hours(&workweek).unwrap(), dec("10"));
    }

    #[test]
    fn test_policy_weekly_standard_divides_daily_standard() {
        let policy = CompanyPolicy::new("Acme", 176).unwrap();
        let weekly = policy.weekly_standard(&WorkweekConfig::default()).unwrap();
        // 176 / 22 / 5 = 1.6 h
        assert_eq!(weekly, Duration::minutes(96));

        let no_week = WorkweekConfig {
            working_days_per_week: 0,
            ..WorkweekConfig::default()
        };
        assert!(matches!(
            policy.weekly_standard(&no_week),
            Err(EngineError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn test_policy_daily_standard_for_176_hours() {
        let policy = CompanyPolicy::new("Acme", 176).unwrap();
        let daily = policy.daily_standard(&WorkweekConfig::default()).unwrap();
        assert_eq!(daily, Duration::hours(8));
    }

    #[test]
    fn test_policy_zero_quota_is_invalid_period() {
        assert!(matches!(
            CompanyPolicy::new("Acme", 0),
            Err(EngineError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn test_policy_zero_working_days_is_invalid_period() {
        let policy = CompanyPolicy::new("Acme", 220).unwrap();
        let workweek = WorkweekConfig {
            working_days_per_month: 0,
            working_days_per_week: 5,
        };
        assert!(matches!(
            policy.daily_standard(&workweek),
            Err(EngineError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn test_hourly_rate() {
        let policy = CompanyPolicy::new("Acme", 200).unwrap();
        assert_eq!(policy.hourly_rate(dec("3000")).unwrap(), dec("15"));
    }
}
