use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Calendar granularity used when bucketing or spanning payment events.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Granularity {
    Week,
    Month,
}

/// A calendar month, stored as its first day so every key names a real month.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey(NaiveDate);

impl MonthKey {
    /// `None` when `month` is outside 1..=12 or the year is out of chrono's range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    pub fn last_day(&self) -> NaiveDate {
        let last = days_in_month(self.year(), self.month());
        self.0.with_day(last).unwrap_or(self.0)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        MonthKey::containing(date) == *self
    }

    /// The following month, or `None` past the end of the supported calendar.
    pub fn next(&self) -> Option<Self> {
        add_months(self.0, 1).map(Self)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// A Monday-start week, keyed by the date of its Monday.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeekKey(NaiveDate);

impl WeekKey {
    pub fn containing(date: NaiveDate) -> Self {
        Self(week_start(date))
    }

    pub fn monday(&self) -> NaiveDate {
        self.0
    }

    pub fn sunday(&self) -> NaiveDate {
        add_days(self.0, 6).unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.monday() && date <= self.sunday()
    }

    pub fn next(&self) -> Option<Self> {
        add_days(self.0, 7).map(Self)
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "week of {}", self.0)
    }
}

/// Either a week or a month, as produced by `spanning_periods`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PeriodKey {
    Week(WeekKey),
    Month(MonthKey),
}

impl PeriodKey {
    pub fn containing(date: NaiveDate, granularity: Granularity) -> Self {
        match granularity {
            Granularity::Week => PeriodKey::Week(WeekKey::containing(date)),
            Granularity::Month => PeriodKey::Month(MonthKey::containing(date)),
        }
    }

    pub fn start(&self) -> NaiveDate {
        match self {
            PeriodKey::Week(week) => week.monday(),
            PeriodKey::Month(month) => month.first_day(),
        }
    }

    pub fn end(&self) -> NaiveDate {
        match self {
            PeriodKey::Week(week) => week.sunday(),
            PeriodKey::Month(month) => month.last_day(),
        }
    }

    pub fn next(&self) -> Option<Self> {
        match self {
            PeriodKey::Week(week) => week.next().map(PeriodKey::Week),
            PeriodKey::Month(month) => month.next().map(PeriodKey::Month),
        }
    }
}

/// Returns the Monday on or before `date`. Clamps to chrono's first date.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let delta = date.weekday().num_days_from_monday() as i64;
    add_days(date, -delta).unwrap_or(NaiveDate::MIN)
}

/// Adds whole calendar months, clamping the day to the target month's last valid day.
/// Returns `None` only when the result leaves chrono's representable range.
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    let index = date.year() as i64 * 12 + date.month0() as i64 + months as i64;
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month = index.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Adds whole days, returning `None` on overflow.
pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::days(days))
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    match NaiveDate::from_ymd_opt(next_year, next_month, 1) {
        Some(first_next) => (first_next - Duration::days(1)).day(),
        None => 31,
    }
}
