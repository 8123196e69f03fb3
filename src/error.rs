//! Error types for the Ponto Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing hours, payroll,
//! vacation and termination figures.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// The main error type for the Ponto Engine.
///
/// Every public operation either returns a complete result or exactly one
/// of these errors; nothing is partially applied.
///
/// # Example
///
/// ```
/// use ponto_engine::error::EngineError;
/// use chrono::NaiveDate;
///
/// let error = EngineError::DaySequenceExhausted {
///     date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
/// };
/// assert_eq!(error.to_string(), "All punch slots already used on 2025-03-10");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// All six punch slots of the day are already used.
    #[error("All punch slots already used on {date}")]
    DaySequenceExhausted {
        /// The day whose sequence is full.
        date: NaiveDate,
    },

    /// A punch was attempted while the employee is on approved vacation.
    #[error("Employee is on approved vacation on {date}")]
    OnVacation {
        /// The day the punch was attempted.
        date: NaiveDate,
    },

    /// The employee has been terminated and can no longer punch.
    #[error("Employee '{employee_id}' is inactive")]
    EmployeeInactive {
        /// The inactive employee.
        employee_id: Uuid,
    },

    /// More vacation days were requested than the employee has accrued.
    #[error("Insufficient vacation balance: requested {requested} days, available {available}")]
    InsufficientBalance {
        /// Days requested.
        requested: u32,
        /// Days available at request or approval time.
        available: Decimal,
    },

    /// A date range or policy value makes the computation undefined.
    #[error("Invalid period: {message}")]
    InvalidPeriod {
        /// A description of what made the period invalid.
        message: String,
    },

    /// Salary or hire date are missing; callers resolve this to a zeroed result.
    #[error("Degenerate input: {message}")]
    DegenerateInput {
        /// What was missing.
        message: String,
    },

    /// A punch was appended out of slot order.
    #[error("Invalid punch on {date}: {message}")]
    InvalidPunch {
        /// The day the punch belongs to.
        date: NaiveDate,
        /// A description of what made the punch invalid.
        message: String,
    },

    /// A vacation request status change that is not allowed.
    #[error("Invalid vacation transition from '{from}' to '{to}'")]
    InvalidTransition {
        /// Current status.
        from: String,
        /// Requested status.
        to: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No tax table is in force on the requested date.
    #[error("No tax table in force on {date}")]
    TaxTableNotFound {
        /// The as-of date that was requested.
        date: NaiveDate,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_sequence_exhausted_displays_date() {
        let error = EngineError::DaySequenceExhausted {
            date: date(2025, 3, 10),
        };
        assert_eq!(error.to_string(), "All punch slots already used on 2025-03-10");
    }

    #[test]
    fn test_on_vacation_displays_date() {
        let error = EngineError::OnVacation {
            date: date(2025, 7, 1),
        };
        assert_eq!(
            error.to_string(),
            "Employee is on approved vacation on 2025-07-01"
        );
    }

    #[test]
    fn test_insufficient_balance_displays_requested_and_available() {
        let error = EngineError::InsufficientBalance {
            requested: 35,
            available: Decimal::new(300, 1),
        };
        assert_eq!(
            error.to_string(),
            "Insufficient vacation balance: requested 35 days, available 30.0"
        );
    }

    #[test]
    fn test_invalid_period_displays_message() {
        let error = EngineError::InvalidPeriod {
            message: "monthly quota must be positive".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid period: monthly quota must be positive"
        );
    }

    #[test]
    fn test_invalid_transition_displays_statuses() {
        let error = EngineError::InvalidTransition {
            from: "rejeitado".to_string(),
            to: "aprovado".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid vacation transition from 'rejeitado' to 'aprovado'"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_tax_table_not_found() -> EngineResult<()> {
            Err(EngineError::TaxTableNotFound {
                date: date(2020, 1, 1),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_tax_table_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
