//! Core data models for the Ponto Engine.
//!
//! This module contains the input records (employees, policies, punches,
//! vacation requests) and the computed results.

mod calculation_result;
mod duration;
mod employee;
mod punch;
mod vacation;

pub use calculation_result::{
    AuditStep, DailyEntry, DailyHoursResult, EntitlementResult, PayrollResult,
    PeriodAccumulation, PeriodTotals, SeveranceResult, TerminationReason, VacationPaymentResult,
};
pub use duration::{duration_to_hours, format_duration, seconds};
pub use employee::{CompanyPolicy, Employee};
pub use punch::{DayRecord, PunchEvent, PunchKind};
pub use vacation::{Transition, VacationRequest, VacationStatus};
