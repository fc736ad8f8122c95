use chrono::NaiveDate;

use crate::errors::ScheduleError;

/// Builds a calendar date from a `YYYY-MM-DD` string using its explicit
/// components. The result carries no time or offset, so it cannot drift
/// to the previous day in negative-UTC-offset zones.
pub fn parse_local_date(input: &str) -> Result<NaiveDate, ScheduleError> {
    let malformed = || ScheduleError::MalformedDateString(input.to_string());
    let trimmed = input.trim();
    let parts: Vec<&str> = trimmed.split('-').collect();
    if parts.len() != 3 {
        return Err(malformed());
    }
    if parts
        .iter()
        .any(|part| part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()))
    {
        return Err(malformed());
    }
    if parts[0].len() != 4 || parts[1].len() > 2 || parts[2].len() > 2 {
        return Err(malformed());
    }

    let year: i32 = parts[0].parse().map_err(|_| malformed())?;
    let month: u32 = parts[1].parse().map_err(|_| malformed())?;
    let day: u32 = parts[2].parse().map_err(|_| malformed())?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(malformed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn keeps_components_exactly() {
        let date = parse_local_date("2025-01-31").unwrap();
        assert_eq!(date.year(), 2025);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 31);
    }

    #[test]
    fn accepts_unpadded_month_and_day() {
        assert_eq!(
            parse_local_date(" 2025-3-7 ").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()
        );
    }

    #[test]
    fn rejects_malformed_inputs() {
        for raw in [
            "",
            "2025-01",
            "2025/01/31",
            "2025-01-31T00:00:00Z",
            "25-01-31",
            "2025-0a-01",
            "2025-02-30",
            "2025-13-01",
            "-2025-01-01",
        ] {
            assert_eq!(
                parse_local_date(raw),
                Err(ScheduleError::MalformedDateString(raw.to_string())),
                "input {raw:?} should be rejected"
            );
        }
    }
}
