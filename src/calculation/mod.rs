//! Calculation logic for the Ponto Engine.
//!
//! This module contains the pure functions behind every figure the portal
//! shows: punch sequencing, daily hours, banked-hours accumulation, monthly
//! payroll, vacation entitlement and payment, and termination settlements.
//! Shared money rounding and calendar arithmetic live in [`rounding`] and
//! [`dates`].

mod banked_hours;
mod daily_hours;
pub mod dates;
mod payroll;
mod punch_sequence;
pub mod rounding;
mod severance;
mod vacation_entitlement;
mod vacation_payment;

pub use banked_hours::{StandardWorkload, accumulate_banked_hours, records_in_range};
pub use daily_hours::{WORK_PAIRS, calculate_daily_hours, worked_time};
pub use dates::{DateRange, days_in_month, first_of_month, iso_week_key, month_key, months_between};
pub use payroll::{PayrollPeriod, calculate_payroll, span_hours};
pub use punch_sequence::{next_punch_kind, register_punch, sequence_punch};
pub use rounding::{round_days, round_money};
pub use severance::calculate_severance;
pub use vacation_entitlement::{calculate_vacation_entitlement, days_due, request_vacation};
pub use vacation_payment::{calculate_vacation_payment, inss_for, irrf_for};
