//! Vacation request model.
//!
//! A [`VacationRequest`] is created pending by the employee and moved to
//! approved or rejected by an administrator. Both transitions are one-way
//! and idempotent: repeating one reports [`Transition::Unchanged`] so the
//! caller knows not to issue a second settlement.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// Status of a vacation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VacationStatus {
    /// Awaiting a decision.
    #[serde(rename = "pendente")]
    Pending,
    /// Approved; days count as consumed. Older records stored `concedida`.
    #[serde(rename = "aprovado", alias = "concedida")]
    Approved,
    /// Rejected; days are not consumed.
    #[serde(rename = "rejeitado")]
    Rejected,
}

impl VacationStatus {
    /// Returns the stored code of the status.
    pub fn code(self) -> &'static str {
        match self {
            VacationStatus::Pending => "pendente",
            VacationStatus::Approved => "aprovado",
            VacationStatus::Rejected => "rejeitado",
        }
    }
}

impl fmt::Display for VacationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Outcome of a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The status changed.
    Applied,
    /// The request already had the target status.
    Unchanged,
}

/// A vacation period requested by an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationRequest {
    /// Unique identifier for the request.
    pub id: Uuid,
    /// The requesting employee.
    pub employee_id: Uuid,
    /// First vacation day.
    pub start_date: NaiveDate,
    /// Last vacation day (inclusive).
    pub end_date: NaiveDate,
    /// Number of days requested.
    pub days: u32,
    /// Current status.
    pub status: VacationStatus,
    /// Whether half of the 13th salary is advanced with the vacation pay.
    #[serde(default)]
    pub advance_13: bool,
}

impl VacationRequest {
    /// Creates a pending request covering `start_date..=end_date`.
    ///
    /// ```
    /// use ponto_engine::models::{VacationRequest, VacationStatus};
    /// use chrono::NaiveDate;
    /// use uuid::Uuid;
    ///
    /// let request = VacationRequest::new(
    ///     Uuid::new_v4(),
    ///     NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2025, 7, 15).unwrap(),
    ///     false,
    /// )
    /// .unwrap();
    /// assert_eq!(request.days, 15);
    /// assert_eq!(request.status, VacationStatus::Pending);
    /// ```
    pub fn new(
        employee_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
        advance_13: bool,
    ) -> EngineResult<Self> {
        if end_date < start_date {
            return Err(EngineError::InvalidPeriod {
                message: format!(
                    "vacation ends on {} before it starts on {}",
                    end_date, start_date
                ),
            });
        }

        let days = (end_date - start_date).num_days() + 1;
        let days = u32::try_from(days).map_err(|_| EngineError::InvalidPeriod {
            message: format!("vacation of {} days is out of range", days),
        })?;

        Ok(Self {
            id: Uuid::new_v4(),
            employee_id,
            start_date,
            end_date,
            days,
            status: VacationStatus::Pending,
            advance_13,
        })
    }

    /// Returns true once approved.
    pub fn is_approved(&self) -> bool {
        self.status == VacationStatus::Approved
    }

    /// Returns true when the request is approved and spans `date`.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.is_approved() && self.start_date <= date && date <= self.end_date
    }

    /// Approves the request if `available` days still cover it.
    ///
    /// Re-approving is a no-op. A rejected request cannot be approved.
    pub fn approve(&mut self, available: Decimal) -> EngineResult<Transition> {
        match self.status {
            VacationStatus::Approved => Ok(Transition::Unchanged),
            VacationStatus::Rejected => Err(self.invalid_transition(VacationStatus::Approved)),
            VacationStatus::Pending => {
                if Decimal::from(self.days) > available {
                    return Err(EngineError::InsufficientBalance {
                        requested: self.days,
                        available,
                    });
                }
                self.status = VacationStatus::Approved;
                Ok(Transition::Applied)
            }
        }
    }

    /// Rejects the request. Re-rejecting is a no-op; an approved request
    /// cannot be rejected.
    pub fn reject(&mut self) -> EngineResult<Transition> {
        match self.status {
            VacationStatus::Rejected => Ok(Transition::Unchanged),
            VacationStatus::Approved => Err(self.invalid_transition(VacationStatus::Rejected)),
            VacationStatus::Pending => {
                self.status = VacationStatus::Rejected;
                Ok(Transition::Applied)
            }
        }
    }

    fn invalid_transition(&self, to: VacationStatus) -> EngineError {
        EngineError::InvalidTransition {
            from: self.status.to_string(),
            to: to.to_string(),
        }
    }
}
