//! Punch sequencing.
//!
//! A day holds at most six punches and each one takes the next free slot of
//! a fixed order, regardless of what the employee declared. This module
//! resolves which slot the next punch takes and runs the guards that must
//! pass before a punch is accepted.

use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{DayRecord, Employee, PunchKind, VacationRequest};

/// Returns the kind of the punch that would take slot `count`.
///
/// The slot is chosen by arrival order alone. `date` is only used to
/// report a full day.
///
/// # Examples
///
/// ```
/// use ponto_engine::calculation::next_punch_kind;
/// use ponto_engine::error::EngineError;
/// use ponto_engine::models::PunchKind;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
/// assert_eq!(next_punch_kind(0, date).unwrap(), PunchKind::Entrada);
/// assert_eq!(next_punch_kind(3, date).unwrap(), PunchKind::SaidaFinal);
/// assert!(matches!(
///     next_punch_kind(6, date),
///     Err(EngineError::DaySequenceExhausted { .. })
/// ));
/// ```
pub fn next_punch_kind(count: usize, date: NaiveDate) -> EngineResult<PunchKind> {
    PunchKind::SLOTS
        .get(count)
        .copied()
        .ok_or(EngineError::DaySequenceExhausted { date })
}

/// Decides the kind of the employee's next punch on `today`.
///
/// Guards run in order: a terminated employee cannot punch, an employee on
/// an approved vacation covering `today` cannot punch, and a full day cannot
/// take another punch. `day` is `None` when nothing was punched yet today.
/// Vacation requests of other employees are ignored.
pub fn sequence_punch(
    employee: &Employee,
    day: Option<&DayRecord>,
    vacations: &[VacationRequest],
    today: NaiveDate,
) -> EngineResult<PunchKind> {
    if !employee.is_active() {
        return Err(EngineError::EmployeeInactive {
            employee_id: employee.id,
        });
    }

    let on_vacation = vacations
        .iter()
        .filter(|v| v.employee_id == employee.id)
        .any(|v| v.covers(today));
    if on_vacation {
        return Err(EngineError::OnVacation { date: today });
    }

    let count = day.map_or(0, DayRecord::len);
    let kind = next_punch_kind(count, today)?;

    debug!(
        employee_id = %employee.id,
        date = %today,
        slot = kind.slot(),
        kind = kind.code(),
        "Sequenced punch"
    );

    Ok(kind)
}

/// Sequences and appends a punch at `time`, creating the day on first use.
///
/// The input day is left untouched on error; on success the updated day is
/// returned and the new punch is its last one.
pub fn register_punch(
    employee: &Employee,
    day: Option<&DayRecord>,
    vacations: &[VacationRequest],
    today: NaiveDate,
    time: NaiveTime,
) -> EngineResult<DayRecord> {
    if let Some(existing) = day {
        if existing.employee_id() != employee.id || existing.date() != today {
            return Err(EngineError::InvalidPunch {
                date: today,
                message: format!(
                    "day record of {} on {} does not belong to this punch",
                    existing.employee_id(),
                    existing.date()
                ),
            });
        }
    }

    let kind = sequence_punch(employee, day, vacations, today)?;

    let mut updated = match day {
        Some(existing) => existing.clone(),
        None => DayRecord::new(employee.id, today),
    };
    updated.record_punch(kind, time)?;

    Ok(updated)
}
