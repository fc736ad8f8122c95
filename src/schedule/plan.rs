use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{
    local_date::parse_local_date,
    recurrence::{final_date, generate_schedule, RecurrenceKind},
};
use crate::errors::ScheduleError;

/// Upper bound on installments accepted from the recurring-charge form.
pub const DEFAULT_MAX_INSTALLMENTS: u32 = 20;

/// A validated charge request. Each variant carries only the fields its
/// recurrence needs, so a single charge never has an installment count.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChargePlan {
    Single { due: NaiveDate },
    Weekly { start: NaiveDate, installments: u32 },
    Monthly { start: NaiveDate, installments: u32 },
}

impl ChargePlan {
    pub fn new(
        start: NaiveDate,
        kind: RecurrenceKind,
        installments: u32,
    ) -> Result<Self, ScheduleError> {
        if kind.is_recurring() && installments < 1 {
            return Err(ScheduleError::InvalidInput(
                "installment count must be at least 1".into(),
            ));
        }
        Ok(match kind {
            RecurrenceKind::Single => ChargePlan::Single { due: start },
            RecurrenceKind::Weekly => ChargePlan::Weekly {
                start,
                installments,
            },
            RecurrenceKind::Monthly => ChargePlan::Monthly {
                start,
                installments,
            },
        })
    }

    pub fn kind(&self) -> RecurrenceKind {
        match self {
            ChargePlan::Single { .. } => RecurrenceKind::Single,
            ChargePlan::Weekly { .. } => RecurrenceKind::Weekly,
            ChargePlan::Monthly { .. } => RecurrenceKind::Monthly,
        }
    }

    pub fn start(&self) -> NaiveDate {
        match self {
            ChargePlan::Single { due } => *due,
            ChargePlan::Weekly { start, .. } | ChargePlan::Monthly { start, .. } => *start,
        }
    }

    pub fn installment_count(&self) -> u32 {
        match self {
            ChargePlan::Single { .. } => 1,
            ChargePlan::Weekly { installments, .. } | ChargePlan::Monthly { installments, .. } => {
                *installments
            }
        }
    }

    pub fn schedule(&self) -> Result<Vec<NaiveDate>, ScheduleError> {
        generate_schedule(self.start(), self.kind(), self.installment_count())
    }

    pub fn final_date(&self) -> Result<NaiveDate, ScheduleError> {
        final_date(self.start(), self.kind(), self.installment_count())
    }
}

/// Raw strings as typed into the charge form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanForm {
    pub start_date: String,
    pub recurrence: String,
    #[serde(default)]
    pub installments: String,
}

impl PlanForm {
    pub fn new(
        start_date: impl Into<String>,
        recurrence: impl Into<String>,
        installments: impl Into<String>,
    ) -> Self {
        Self {
            start_date: start_date.into(),
            recurrence: recurrence.into(),
            installments: installments.into(),
        }
    }

    /// Normalizes the form into a `ChargePlan`. Recurring plans must ask for
    /// between 1 and `max_installments` installments; the count is ignored for
    /// single charges.
    pub fn parse(&self, max_installments: u32) -> Result<ChargePlan, ScheduleError> {
        let start = parse_local_date(&self.start_date)?;
        let kind: RecurrenceKind = self.recurrence.parse()?;
        if !kind.is_recurring() {
            return ChargePlan::new(start, kind, 1);
        }

        let raw = self.installments.trim();
        let installments: u32 = raw.parse().map_err(|_| {
            ScheduleError::InvalidInput(format!("installment count `{raw}` is not a number"))
        })?;
        if installments < 1 || installments > max_installments {
            return Err(ScheduleError::InvalidInput(format!(
                "installment count must be between 1 and {max_installments}, got {installments}"
            )));
        }
        ChargePlan::new(start, kind, installments)
    }
}
