use crate::{
    currency::Money,
    payments::{calendar_buckets, open_total, CalendarBucket},
    schedule::Granularity,
    storage::EventRepository,
};

use super::ServiceResult;

/// Rebuilds calendar views from the store on every call; nothing is cached.
pub struct CalendarService;

impl CalendarService {
    pub fn view(
        repo: &dyn EventRepository,
        owner: &str,
        granularity: Granularity,
    ) -> ServiceResult<Vec<CalendarBucket>> {
        let events = repo.fetch_events_by_owner(owner)?;
        Ok(calendar_buckets(&events, granularity)?)
    }

    pub fn month_view(
        repo: &dyn EventRepository,
        owner: &str,
    ) -> ServiceResult<Vec<CalendarBucket>> {
        Self::view(repo, owner, Granularity::Month)
    }

    pub fn week_view(repo: &dyn EventRepository, owner: &str) -> ServiceResult<Vec<CalendarBucket>> {
        Self::view(repo, owner, Granularity::Week)
    }

    /// Total still expected across all open events of the owner.
    pub fn upcoming_total(repo: &dyn EventRepository, owner: &str) -> ServiceResult<Money> {
        let events = repo.fetch_events_by_owner(owner)?;
        Ok(open_total(&events))
    }
}
