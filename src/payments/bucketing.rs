//! Groups payment events into calendar weeks and months.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::event::PaymentEvent;
use crate::{
    currency::Money,
    errors::ScheduleError,
    schedule::{Granularity, MonthKey, PeriodKey, WeekKey},
};

/// A displayable period with the open events due inside it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarBucket {
    pub period: PeriodKey,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub events: Vec<PaymentEvent>,
    pub total: Money,
}

impl CalendarBucket {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Open events paired with their due date. Closed events are skipped; an
/// open event without a due date is a data fault.
fn dated_open_events(
    events: &[PaymentEvent],
) -> Result<Vec<(NaiveDate, &PaymentEvent)>, ScheduleError> {
    events
        .iter()
        .filter(|event| event.is_open())
        .map(|event| {
            event
                .due_date
                .map(|due| (due, event))
                .ok_or(ScheduleError::EmptyDateOnEvent(event.id))
        })
        .collect()
}

fn bucket_by<K, F>(
    events: &[PaymentEvent],
    key_for: F,
) -> Result<BTreeMap<K, Vec<&PaymentEvent>>, ScheduleError>
where
    K: Ord,
    F: Fn(NaiveDate) -> K,
{
    let mut dated = dated_open_events(events)?;
    // Stable: events due the same day keep their input order.
    dated.sort_by_key(|(due, _)| *due);

    let mut buckets: BTreeMap<K, Vec<&PaymentEvent>> = BTreeMap::new();
    for (due, event) in dated {
        buckets.entry(key_for(due)).or_default().push(event);
    }
    Ok(buckets)
}

/// Open events grouped by calendar month, each group ordered by due date.
pub fn bucket_by_month(
    events: &[PaymentEvent],
) -> Result<BTreeMap<MonthKey, Vec<&PaymentEvent>>, ScheduleError> {
    bucket_by(events, MonthKey::containing)
}

/// Open events grouped by Monday-start week, each group ordered by due date.
pub fn bucket_by_week(
    events: &[PaymentEvent],
) -> Result<BTreeMap<WeekKey, Vec<&PaymentEvent>>, ScheduleError> {
    bucket_by(events, WeekKey::containing)
}

/// Every period from the earliest to the latest open due date inclusive,
/// including periods with no events.
pub fn spanning_periods(
    events: &[PaymentEvent],
    granularity: Granularity,
) -> Result<Vec<PeriodKey>, ScheduleError> {
    let dated = dated_open_events(events)?;
    let (Some(first), Some(last)) = (
        dated.iter().map(|(due, _)| *due).min(),
        dated.iter().map(|(due, _)| *due).max(),
    ) else {
        return Ok(Vec::new());
    };

    let mut periods = Vec::new();
    let mut current = PeriodKey::containing(first, granularity);
    while current.start() <= last {
        periods.push(current);
        match current.next() {
            Some(next) => current = next,
            None => break,
        }
    }
    Ok(periods)
}

/// Sum of the given events' amounts; zero for no events.
pub fn sum_amount<'a, I>(events: I) -> Money
where
    I: IntoIterator<Item = &'a PaymentEvent>,
{
    events.into_iter().map(|event| event.amount).sum()
}

/// Sum over open events only.
pub fn open_total(events: &[PaymentEvent]) -> Money {
    sum_amount(events.iter().filter(|event| event.is_open()))
}

/// Contiguous buckets covering the whole span of open events, empty periods included.
pub fn calendar_buckets(
    events: &[PaymentEvent],
    granularity: Granularity,
) -> Result<Vec<CalendarBucket>, ScheduleError> {
    let mut grouped: BTreeMap<PeriodKey, Vec<&PaymentEvent>> = match granularity {
        Granularity::Month => bucket_by_month(events)?
            .into_iter()
            .map(|(key, group)| (PeriodKey::Month(key), group))
            .collect(),
        Granularity::Week => bucket_by_week(events)?
            .into_iter()
            .map(|(key, group)| (PeriodKey::Week(key), group))
            .collect(),
    };

    Ok(spanning_periods(events, granularity)?
        .into_iter()
        .map(|period| {
            let group = grouped.remove(&period).unwrap_or_default();
            CalendarBucket {
                period,
                period_start: period.start(),
                period_end: period.end(),
                total: sum_amount(group.iter().copied()),
                events: group.into_iter().cloned().collect(),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        documents::Cnpj,
        payments::{ColorTag, Counterparty, LifecycleStatus},
        schedule::RecurrenceKind,
    };
    use chrono::Utc;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(due: Option<NaiveDate>, cents: i64, status: LifecycleStatus) -> PaymentEvent {
        let anchor = due.unwrap_or_else(|| date(2025, 1, 1));
        PaymentEvent {
            id: Uuid::new_v4(),
            series_id: Uuid::new_v4(),
            owner_id: "owner".into(),
            counterparty: Counterparty::organization(
                "Loja",
                Cnpj::parse("11222333000181").unwrap(),
            ),
            amount: Money::from_cents(cents),
            recurrence_kind: RecurrenceKind::Single,
            series_start_date: anchor,
            series_end_date: anchor,
            installment_count: 1,
            installment_index: 1,
            due_date: due,
            lifecycle_status: status,
            color_tag: ColorTag::Blue,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn month_buckets_skip_closed_events() {
        let events = vec![
            event(Some(date(2025, 1, 20)), 100, LifecycleStatus::Active),
            event(Some(date(2025, 1, 5)), 200, LifecycleStatus::Paid),
            event(Some(date(2025, 2, 1)), 300, LifecycleStatus::Finalized),
            event(Some(date(2025, 1, 2)), 400, LifecycleStatus::Overdue),
        ];
        let buckets = bucket_by_month(&events).unwrap();
        assert_eq!(buckets.len(), 1);
        let january = &buckets[&MonthKey::new(2025, 1).unwrap()];
        let amounts: Vec<i64> = january.iter().map(|e| e.amount.cents()).collect();
        assert_eq!(amounts, vec![400, 100]);
    }

    #[test]
    fn same_day_events_keep_input_order() {
        let events = vec![
            event(Some(date(2025, 3, 10)), 1, LifecycleStatus::Active),
            event(Some(date(2025, 3, 4)), 2, LifecycleStatus::Active),
            event(Some(date(2025, 3, 10)), 3, LifecycleStatus::Pending),
            event(Some(date(2025, 3, 10)), 4, LifecycleStatus::Active),
        ];
        for _ in 0..3 {
            let weeks = bucket_by_week(&events).unwrap();
            let ids: Vec<Uuid> = weeks[&WeekKey::containing(date(2025, 3, 10))]
                .iter()
                .map(|e| e.id)
                .collect();
            assert_eq!(ids, vec![events[0].id, events[2].id, events[3].id]);
        }
    }

    #[test]
    fn spanning_months_fills_gaps() {
        let events = vec![
            event(Some(date(2025, 3, 20)), 1, LifecycleStatus::Active),
            event(Some(date(2025, 1, 5)), 1, LifecycleStatus::Active),
        ];
        let periods = spanning_periods(&events, Granularity::Month).unwrap();
        let months: Vec<PeriodKey> = (1..=3)
            .map(|month| PeriodKey::Month(MonthKey::new(2025, month).unwrap()))
            .collect();
        assert_eq!(periods, months);
    }

    #[test]
    fn spanning_weeks_starts_on_monday() {
        let events = vec![
            event(Some(date(2025, 1, 1)), 1, LifecycleStatus::Active),
            event(Some(date(2025, 1, 20)), 1, LifecycleStatus::Active),
        ];
        let periods = spanning_periods(&events, Granularity::Week).unwrap();
        let mondays: Vec<NaiveDate> = periods.iter().map(|p| p.start()).collect();
        assert_eq!(
            mondays,
            vec![
                date(2024, 12, 30),
                date(2025, 1, 6),
                date(2025, 1, 13),
                date(2025, 1, 20)
            ]
        );
    }

    #[test]
    fn spanning_empty_input_is_empty() {
        assert!(spanning_periods(&[], Granularity::Month).unwrap().is_empty());
        let closed = vec![event(Some(date(2025, 1, 1)), 1, LifecycleStatus::Paid)];
        assert!(spanning_periods(&closed, Granularity::Week)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn missing_due_date_is_reported() {
        let broken = event(None, 1, LifecycleStatus::Active);
        let id = broken.id;
        let events = vec![
            event(Some(date(2025, 1, 1)), 1, LifecycleStatus::Active),
            broken,
        ];
        assert_eq!(
            bucket_by_month(&events).unwrap_err(),
            ScheduleError::EmptyDateOnEvent(id)
        );
        assert_eq!(
            spanning_periods(&events, Granularity::Month).unwrap_err(),
            ScheduleError::EmptyDateOnEvent(id)
        );
    }

    #[test]
    fn missing_due_date_on_closed_event_is_ignored() {
        let events = vec![event(None, 1, LifecycleStatus::Finalized)];
        assert!(bucket_by_month(&events).unwrap().is_empty());
    }

    #[test]
    fn sums_amounts() {
        assert_eq!(sum_amount(&[] as &[PaymentEvent]), Money::ZERO);
        let events = vec![
            event(Some(date(2025, 1, 1)), 10_000, LifecycleStatus::Active),
            event(Some(date(2025, 1, 2)), 25_050, LifecycleStatus::Paid),
        ];
        assert_eq!(sum_amount(&events), Money::from_cents(35_050));
        assert_eq!(open_total(&events), Money::from_cents(10_000));
    }

    #[test]
    fn calendar_buckets_include_empty_periods() {
        let events = vec![
            event(Some(date(2025, 1, 5)), 100, LifecycleStatus::Active),
            event(Some(date(2025, 1, 25)), 50, LifecycleStatus::Pending),
            event(Some(date(2025, 3, 20)), 70, LifecycleStatus::Active),
        ];
        let buckets = calendar_buckets(&events, Granularity::Month).unwrap();
        let totals: Vec<i64> = buckets.iter().map(|b| b.total.cents()).collect();
        assert_eq!(totals, vec![150, 0, 70]);
        assert!(buckets[1].is_empty());
        assert_eq!(buckets[1].period_start, date(2025, 2, 1));
        assert_eq!(buckets[1].period_end, date(2025, 2, 28));
    }
}
