//! Punch and day record models.
//!
//! A [`DayRecord`] holds up to six [`PunchEvent`]s for one employee on one
//! date. The kind of each punch is fixed by its arrival position in
//! [`PunchKind::SLOTS`], never by the wall-clock time it carries.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// The kind of a clock punch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunchKind {
    /// Start of the working day.
    Entrada,
    /// Leaving for lunch.
    SaidaAlmoco,
    /// Back from lunch.
    RetornoAlmoco,
    /// End of the regular day.
    SaidaFinal,
    /// Start of an overtime block.
    ExtraInicio,
    /// End of an overtime block.
    ExtraFim,
}

impl PunchKind {
    /// The fixed slot order of a day.
    pub const SLOTS: [PunchKind; 6] = [
        PunchKind::Entrada,
        PunchKind::SaidaAlmoco,
        PunchKind::RetornoAlmoco,
        PunchKind::SaidaFinal,
        PunchKind::ExtraInicio,
        PunchKind::ExtraFim,
    ];

    /// Returns the zero-based slot position of this kind.
    pub fn slot(self) -> usize {
        self as usize
    }

    /// Returns the stored code, e.g. `saida_almoco`.
    pub fn code(self) -> &'static str {
        match self {
            PunchKind::Entrada => "entrada",
            PunchKind::SaidaAlmoco => "saida_almoco",
            PunchKind::RetornoAlmoco => "retorno_almoco",
            PunchKind::SaidaFinal => "saida_final",
            PunchKind::ExtraInicio => "extra_inicio",
            PunchKind::ExtraFim => "extra_fim",
        }
    }

    /// Returns the label shown when a punch is confirmed, e.g. `Saida Almoco`.
    ///
    /// ```
    /// use ponto_engine::models::PunchKind;
    ///
    /// assert_eq!(PunchKind::RetornoAlmoco.label(), "Retorno Almoco");
    /// ```
    pub fn label(self) -> String {
        self.code()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for PunchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One clock event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchEvent {
    /// The slot this punch occupies.
    pub kind: PunchKind,
    /// The wall-clock time of the punch.
    pub time: NaiveTime,
}

/// Raw form of a day record, validated on deserialization.
#[derive(Deserialize)]
struct RawDayRecord {
    employee_id: Uuid,
    date: NaiveDate,
    #[serde(default)]
    punches: Vec<PunchEvent>,
}

/// All punches of one employee on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDayRecord")]
pub struct DayRecord {
    employee_id: Uuid,
    date: NaiveDate,
    punches: Vec<PunchEvent>,
}

impl TryFrom<RawDayRecord> for DayRecord {
    type Error = EngineError;

    fn try_from(raw: RawDayRecord) -> Result<Self, Self::Error> {
        DayRecord::with_punches(raw.employee_id, raw.date, raw.punches)
    }
}

impl DayRecord {
    /// Creates an empty day.
    pub fn new(employee_id: Uuid, date: NaiveDate) -> Self {
        Self {
            employee_id,
            date,
            punches: Vec::new(),
        }
    }

    /// Builds a day from stored punches, checking the slot invariant.
    pub fn with_punches(
        employee_id: Uuid,
        date: NaiveDate,
        punches: Vec<PunchEvent>,
    ) -> EngineResult<Self> {
        let mut day = Self::new(employee_id, date);
        for punch in punches {
            day.record_punch(punch.kind, punch.time)?;
        }
        Ok(day)
    }

    /// Builds a day by assigning slots to `times` in arrival order.
    ///
    /// ```
    /// use ponto_engine::models::{DayRecord, PunchKind};
    /// use chrono::{NaiveDate, NaiveTime};
    /// use uuid::Uuid;
    ///
    /// let times = ["08:00", "12:00"].map(|t| NaiveTime::parse_from_str(t, "%H:%M").unwrap());
    /// let day = DayRecord::from_times(
    ///     Uuid::new_v4(),
    ///     NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
    ///     &times,
    /// )
    /// .unwrap();
    /// assert_eq!(day.punches()[1].kind, PunchKind::SaidaAlmoco);
    /// ```
    pub fn from_times(employee_id: Uuid, date: NaiveDate, times: &[NaiveTime]) -> EngineResult<Self> {
        let mut day = Self::new(employee_id, date);
        for &time in times {
            let kind = day.next_kind()?;
            day.record_punch(kind, time)?;
        }
        Ok(day)
    }

    /// The employee the day belongs to.
    pub fn employee_id(&self) -> Uuid {
        self.employee_id
    }

    /// The calendar date of the day.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Punches in slot order.
    pub fn punches(&self) -> &[PunchEvent] {
        &self.punches
    }

    /// Number of punches recorded.
    pub fn len(&self) -> usize {
        self.punches.len()
    }

    /// Returns true when no punch has been recorded.
    pub fn is_empty(&self) -> bool {
        self.punches.is_empty()
    }

    /// The kind the next punch must carry.
    pub fn next_kind(&self) -> EngineResult<PunchKind> {
        PunchKind::SLOTS
            .get(self.punches.len())
            .copied()
            .ok_or(EngineError::DaySequenceExhausted { date: self.date })
    }

    /// Appends a punch; `kind` must be the next free slot.
    pub fn record_punch(&mut self, kind: PunchKind, time: NaiveTime) -> EngineResult<&PunchEvent> {
        let expected = self.next_kind()?;
        if kind != expected {
            return Err(EngineError::InvalidPunch {
                date: self.date,
                message: format!("expected '{}' in slot {}, got '{}'", expected, expected.slot(), kind),
            });
        }

        self.punches.push(PunchEvent { kind, time });
        Ok(&self.punches[self.punches.len() - 1])
    }

    /// The time recorded for `kind`, if any.
    pub fn time_of(&self, kind: PunchKind) -> Option<NaiveTime> {
        self.punches.get(kind.slot()).map(|p| p.time)
    }

    /// The first punch of the day.
    pub fn first_punch(&self) -> Option<&PunchEvent> {
        self.punches.first()
    }

    /// The last punch of the day.
    pub fn last_punch(&self) -> Option<&PunchEvent> {
        self.punches.last()
    }
}
