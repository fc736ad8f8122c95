use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar::{add_days, add_months};
use crate::errors::ScheduleError;

const DAYS_PER_WEEK: i64 = 7;

/// How a commission charge repeats. Fixed for the lifetime of a series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceKind {
    Single,
    Weekly,
    Monthly,
}

impl RecurrenceKind {
    pub const ALL: [RecurrenceKind; 3] = [
        RecurrenceKind::Single,
        RecurrenceKind::Weekly,
        RecurrenceKind::Monthly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecurrenceKind::Single => "single",
            RecurrenceKind::Weekly => "weekly",
            RecurrenceKind::Monthly => "monthly",
        }
    }

    /// Portuguese label shown next to a series.
    pub fn label(&self) -> &'static str {
        match self {
            RecurrenceKind::Single => "Única",
            RecurrenceKind::Weekly => "Semanal",
            RecurrenceKind::Monthly => "Mensal",
        }
    }

    pub fn is_recurring(&self) -> bool {
        !matches!(self, RecurrenceKind::Single)
    }

    /// Date of the occurrence `index` steps after `start` (0 is `start` itself).
    fn occurrence(&self, start: NaiveDate, index: u32) -> Result<NaiveDate, ScheduleError> {
        let shifted = match self {
            RecurrenceKind::Single => Some(start),
            RecurrenceKind::Weekly => add_days(start, DAYS_PER_WEEK * index as i64),
            RecurrenceKind::Monthly => add_months(start, index),
        };
        shifted.ok_or_else(|| {
            ScheduleError::InvalidInput(format!(
                "installment {} after {} is outside the supported calendar",
                index + 1,
                start
            ))
        })
    }
}

impl fmt::Display for RecurrenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecurrenceKind {
    type Err = ScheduleError;

    /// Accepts the English names and the Portuguese form values.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "single" | "unica" | "única" | "once" => Ok(RecurrenceKind::Single),
            "weekly" | "semanal" => Ok(RecurrenceKind::Weekly),
            "monthly" | "mensal" => Ok(RecurrenceKind::Monthly),
            _ => Err(ScheduleError::UnsupportedRecurrence(raw.to_string())),
        }
    }
}

fn effective_count(kind: RecurrenceKind, installment_count: u32) -> Result<u32, ScheduleError> {
    if kind == RecurrenceKind::Single {
        return Ok(1);
    }
    if installment_count < 1 {
        return Err(ScheduleError::InvalidInput(
            "installment count must be at least 1".into(),
        ));
    }
    Ok(installment_count)
}

/// Expands a start date into the ordered due dates of a series.
///
/// `Single` always yields `[start]`. `Weekly` steps by seven calendar days.
/// `Monthly` offsets every installment from `start` directly, clamping the
/// day to the last valid day of short months, so a series started on the
/// 31st lands on Feb 28 and then back on Mar 31.
pub fn generate_schedule(
    start: NaiveDate,
    kind: RecurrenceKind,
    installment_count: u32,
) -> Result<Vec<NaiveDate>, ScheduleError> {
    let count = effective_count(kind, installment_count)?;
    (0..count)
        .map(|index| kind.occurrence(start, index))
        .collect()
}

/// Last due date of the series, computed without building the whole list.
pub fn final_date(
    start: NaiveDate,
    kind: RecurrenceKind,
    installment_count: u32,
) -> Result<NaiveDate, ScheduleError> {
    let count = effective_count(kind, installment_count)?;
    kind.occurrence(start, count - 1)
}
