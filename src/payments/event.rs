use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{color::ColorTag, counterparty::Counterparty};
use crate::{
    currency::Money,
    errors::ScheduleError,
    schedule::{ChargePlan, RecurrenceKind},
};

/// Opaque owner identifier supplied by the identity provider.
pub type OwnerId = String;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStatus {
    #[default]
    Active,
    Pending,
    Paid,
    Overdue,
    Finalized,
}

impl LifecycleStatus {
    /// Open events are still expected to be paid and show up on schedules and totals.
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            LifecycleStatus::Active | LifecycleStatus::Pending | LifecycleStatus::Overdue
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            LifecycleStatus::Active => "Ativo",
            LifecycleStatus::Pending => "Pendente",
            LifecycleStatus::Paid => "Pago",
            LifecycleStatus::Overdue => "Atrasado",
            LifecycleStatus::Finalized => "Finalizado",
        }
    }
}

/// One concrete occurrence of a commission payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentEvent {
    pub id: Uuid,
    pub series_id: Uuid,
    pub owner_id: OwnerId,
    pub counterparty: Counterparty,
    pub amount: Money,
    pub recurrence_kind: RecurrenceKind,
    pub series_start_date: NaiveDate,
    pub series_end_date: NaiveDate,
    pub installment_count: u32,
    pub installment_index: u32,
    /// Always set on generated events; may be absent on records read back from a store.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub lifecycle_status: LifecycleStatus,
    pub color_tag: ColorTag,
    pub created_at: DateTime<Utc>,
}

impl PaymentEvent {
    pub fn is_open(&self) -> bool {
        self.lifecycle_status.is_open()
    }

    /// `"2/4"` style position inside the series.
    pub fn installment_label(&self) -> String {
        format!("{}/{}", self.installment_index, self.installment_count)
    }
}

/// Everything the charge form collects before the schedule is expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesDraft {
    pub owner_id: OwnerId,
    pub counterparty: Counterparty,
    pub amount: Money,
    pub plan: ChargePlan,
    #[serde(default)]
    pub color: Option<ColorTag>,
    #[serde(default)]
    pub status: LifecycleStatus,
}

impl SeriesDraft {
    pub fn new(
        owner_id: impl Into<OwnerId>,
        counterparty: Counterparty,
        amount: Money,
        plan: ChargePlan,
    ) -> Self {
        Self {
            owner_id: owner_id.into(),
            counterparty,
            amount,
            plan,
            color: None,
            status: LifecycleStatus::Active,
        }
    }

    pub fn with_color(mut self, color: ColorTag) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_status(mut self, status: LifecycleStatus) -> Self {
        self.status = status;
        self
    }

    /// Expands the draft into one event per installment, all sharing a series id.
    /// `fallback_color` is used when the draft carries no explicit color.
    pub fn expand(&self, fallback_color: ColorTag) -> Result<Vec<PaymentEvent>, ScheduleError> {
        if self.amount.is_negative() {
            return Err(ScheduleError::InvalidInput(format!(
                "amount must not be negative, got {}",
                self.amount
            )));
        }
        let dates = self.plan.schedule()?;
        let series_end_date = self.plan.final_date()?;
        let series_id = Uuid::new_v4();
        let created_at = Utc::now();
        let color_tag = self.color.unwrap_or(fallback_color);
        let installment_count = dates.len() as u32;

        Ok(dates
            .into_iter()
            .enumerate()
            .map(|(idx, due)| PaymentEvent {
                id: Uuid::new_v4(),
                series_id,
                owner_id: self.owner_id.clone(),
                counterparty: self.counterparty.clone(),
                amount: self.amount,
                recurrence_kind: self.plan.kind(),
                series_start_date: self.plan.start(),
                series_end_date,
                installment_count,
                installment_index: idx as u32 + 1,
                due_date: Some(due),
                lifecycle_status: self.status,
                color_tag,
                created_at,
            })
            .collect())
    }
}
