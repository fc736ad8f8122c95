use std::collections::HashSet;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    config::Config,
    currency::Money,
    payments::{ColorTag, Counterparty, LifecycleStatus, SeriesDraft},
    schedule::PlanForm,
    storage::EventRepository,
};

use super::ServiceResult;

/// Turns charge requests into persisted payment events.
pub struct ScheduleService;

impl ScheduleService {
    /// Dates a form would produce, without touching the store.
    pub fn preview(form: &PlanForm, config: &Config) -> ServiceResult<Vec<NaiveDate>> {
        let plan = form.parse(config.max_installments)?;
        Ok(plan.schedule()?)
    }

    /// Expands `draft` and persists one event per installment, in due-date
    /// order. When the draft has no color, the owner's next palette color is
    /// used. Returns the ids in persistence order.
    pub fn create_series(
        repo: &dyn EventRepository,
        draft: &SeriesDraft,
    ) -> ServiceResult<Vec<Uuid>> {
        let existing = repo.fetch_events_by_owner(&draft.owner_id)?;
        let series_count = existing
            .iter()
            .map(|event| event.series_id)
            .collect::<HashSet<_>>()
            .len();
        let events = draft.expand(ColorTag::round_robin(series_count))?;

        let mut ids = Vec::with_capacity(events.len());
        for event in &events {
            ids.push(repo.persist_event(event)?);
        }

        if let Some(first) = events.first() {
            tracing::info!(
                owner = %draft.owner_id,
                series = %first.series_id,
                kind = %draft.plan.kind(),
                installments = ids.len(),
                "payment series created"
            );
        }
        Ok(ids)
    }

    /// Parses the raw form and creates the series.
    pub fn create_from_form(
        repo: &dyn EventRepository,
        config: &Config,
        owner: &str,
        counterparty: Counterparty,
        amount: Money,
        form: &PlanForm,
    ) -> ServiceResult<Vec<Uuid>> {
        let plan = form.parse(config.max_installments)?;
        let draft = SeriesDraft::new(owner, counterparty, amount, plan);
        Self::create_series(repo, &draft)
    }

    pub fn set_status(
        repo: &dyn EventRepository,
        owner: &str,
        event_id: Uuid,
        status: LifecycleStatus,
    ) -> ServiceResult<()> {
        repo.update_status(owner, event_id, status)?;
        tracing::info!(owner, event = %event_id, status = status.label(), "status updated");
        Ok(())
    }
}
