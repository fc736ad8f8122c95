//! Fixed pt-BR rendering of dates and calendar periods.

use chrono::{Datelike, NaiveDate};

use crate::schedule::{MonthKey, PeriodKey};

const MONTH_NAMES: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("")
}

/// `31/01/2025`
pub fn format_date_br(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// `janeiro de 2025`
pub fn format_month_year_br(date: NaiveDate) -> String {
    format!("{} de {}", month_name(date.month()), date.year())
}

pub fn format_month_key(key: MonthKey) -> String {
    format!("{} de {}", month_name(key.month()), key.year())
}

/// Heading for a calendar bucket: month label, or `06/01/2025 – 12/01/2025` for weeks.
pub fn format_period(period: PeriodKey) -> String {
    match period {
        PeriodKey::Month(key) => format_month_key(key),
        PeriodKey::Week(_) => format!(
            "{} – {}",
            format_date_br(period.start()),
            format_date_br(period.end())
        ),
    }
}
