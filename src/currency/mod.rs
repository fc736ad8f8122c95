//! Integer-cent money values and BRL parsing/formatting.

use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Sub},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CURRENCY_CODE: &str = "BRL";
pub const CURRENCY_SYMBOL: &str = "R$";
const DECIMAL_SEPARATOR: char = ',';
const GROUPING_SEPARATOR: char = '.';
/// The pt-BR platform formatter separates symbol and digits with a no-break space.
const SYMBOL_SPACING: char = '\u{a0}';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    #[error("Empty amount")]
    Empty,
    #[error("Invalid amount `{0}`")]
    InvalidFormat(String),
    #[error("Amount `{0}` is too large")]
    Overflow(String),
}

/// A BRL amount stored as whole centavos.
///
/// Arithmetic saturates at the `i64` bounds, so totals over any number of
/// events never panic or wrap.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);
    /// Largest amount accepted from user input: R$ 999.999.999.999,99.
    pub const MAX_INPUT: Money = Money(99_999_999_999_999);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn from_reais(reais: i64, cents: i64) -> Self {
        Self(reais * 100 + cents)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Interprets every digit typed into a masked currency input as centavos,
    /// so `"1.234,56"` and `"123456"` both become R$ 1.234,56. Non-digits are
    /// dropped; an input without digits is zero.
    pub fn from_masked_digits(input: &str) -> Result<Self, MoneyParseError> {
        let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return Ok(Money::ZERO);
        }
        digits
            .parse::<i64>()
            .ok()
            .map(Money)
            .filter(|amount| *amount <= Money::MAX_INPUT)
            .ok_or_else(|| MoneyParseError::Overflow(input.to_string()))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_currency_brl(*self))
    }
}

/// Parses a pt-BR amount such as `"1.234,56"`, `"R$ 10"` or `"-0,5"`.
///
/// `.` only groups thousands and must separate blocks of exactly three
/// digits; `,` introduces at most two decimal places. Magnitudes above
/// `Money::MAX_INPUT` are rejected with `Overflow`.
pub fn parse_brl(input: &str) -> Result<Money, MoneyParseError> {
    let invalid = || MoneyParseError::InvalidFormat(input.to_string());
    let mut body = input.trim();
    if body.is_empty() {
        return Err(MoneyParseError::Empty);
    }

    let negative = if let Some(rest) = body.strip_prefix('-') {
        body = rest.trim_start();
        true
    } else {
        false
    };
    if let Some(rest) = body.strip_prefix(CURRENCY_SYMBOL) {
        body = rest.trim_start_matches(|c: char| c.is_whitespace() || c == SYMBOL_SPACING);
    }
    if body.is_empty() {
        return Err(invalid());
    }

    let (int_part, frac_part) = match body.rsplit_once(DECIMAL_SEPARATOR) {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (body, None),
    };

    let int_digits = ungroup(int_part).ok_or_else(invalid)?;
    let frac_cents = match frac_part {
        None => 0,
        Some(frac) if frac.is_empty() || frac.len() > 2 => return Err(invalid()),
        Some(frac) if !frac.bytes().all(|b| b.is_ascii_digit()) => return Err(invalid()),
        Some(frac) => {
            let value: i64 = frac.parse().map_err(|_| invalid())?;
            if frac.len() == 1 {
                value * 10
            } else {
                value
            }
        }
    };

    let reais: i64 = int_digits
        .parse()
        .map_err(|_| MoneyParseError::Overflow(input.to_string()))?;
    let cents = reais
        .checked_mul(100)
        .and_then(|value| value.checked_add(frac_cents))
        .filter(|cents| *cents <= Money::MAX_INPUT.0)
        .ok_or_else(|| MoneyParseError::Overflow(input.to_string()))?;
    Ok(Money(if negative { -cents } else { cents }))
}

/// Strips thousands separators, rejecting malformed groups.
fn ungroup(int_part: &str) -> Option<String> {
    if int_part.is_empty() {
        return None;
    }
    let groups: Vec<&str> = int_part.split(GROUPING_SEPARATOR).collect();
    let all_digits = |group: &str| !group.is_empty() && group.bytes().all(|b| b.is_ascii_digit());
    if !groups.iter().all(|group| all_digits(group)) {
        return None;
    }
    if groups.len() > 1 && (groups[0].len() > 3 || groups[1..].iter().any(|g| g.len() != 3)) {
        return None;
    }
    Some(groups.concat())
}

/// Renders an amount as `R$ 1.234,56` (no-break space after the symbol).
pub fn format_currency_brl(amount: Money) -> String {
    let cents = amount.cents().unsigned_abs();
    let int_part = group_digits(&(cents / 100).to_string(), GROUPING_SEPARATOR);
    let sign = if amount.is_negative() { "-" } else { "" };
    format!(
        "{sign}{CURRENCY_SYMBOL}{SYMBOL_SPACING}{int_part}{DECIMAL_SEPARATOR}{:02}",
        cents % 100
    )
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_grouped_amounts() {
        assert_eq!(format_currency_brl(Money::from_cents(0)), "R$\u{a0}0,00");
        assert_eq!(format_currency_brl(Money::from_cents(5)), "R$\u{a0}0,05");
        assert_eq!(
            format_currency_brl(Money::from_cents(123_456_789)),
            "R$\u{a0}1.234.567,89"
        );
        assert_eq!(
            format_currency_brl(Money::from_cents(-100_000)),
            "-R$\u{a0}1.000,00"
        );
    }

    #[test]
    fn parses_pt_br_amounts() {
        assert_eq!(parse_brl("1.234,56"), Ok(Money::from_cents(123_456)));
        assert_eq!(parse_brl("R$ 10"), Ok(Money::from_cents(1_000)));
        assert_eq!(parse_brl("R$\u{a0}250,5"), Ok(Money::from_cents(25_050)));
        assert_eq!(parse_brl("-0,99"), Ok(Money::from_cents(-99)));
        assert_eq!(parse_brl("1000000"), Ok(Money::from_cents(100_000_000)));
    }

    #[test]
    fn rejects_malformed_amounts() {
        assert_eq!(parse_brl("   "), Err(MoneyParseError::Empty));
        for raw in ["10.50", "1,234", "12.34.567", "abc", "R$", "1.234,", ",50"] {
            assert!(
                matches!(parse_brl(raw), Err(MoneyParseError::InvalidFormat(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn masked_digits_are_centavos() {
        assert_eq!(
            Money::from_masked_digits("R$ 1.234,56"),
            Ok(Money::from_cents(123_456))
        );
        assert_eq!(Money::from_masked_digits("7"), Ok(Money::from_cents(7)));
        assert_eq!(Money::from_masked_digits(""), Ok(Money::ZERO));
    }

    #[test]
    fn input_is_capped_at_max() {
        assert_eq!(parse_brl("999.999.999.999,99"), Ok(Money::MAX_INPUT));
        assert_eq!(
            parse_brl("-999.999.999.999,99"),
            Ok(Money::from_cents(-99_999_999_999_999))
        );
        for raw in ["1.000.000.000.000,00", "90.000.000.000.000.000", "99999999999999999999"] {
            assert_eq!(
                parse_brl(raw),
                Err(MoneyParseError::Overflow(raw.to_string())),
                "{raw:?}"
            );
        }
        assert_eq!(
            Money::from_masked_digits("99999999999999"),
            Ok(Money::MAX_INPUT)
        );
        assert!(matches!(
            Money::from_masked_digits("100000000000000"),
            Err(MoneyParseError::Overflow(_))
        ));
    }

    #[test]
    fn arithmetic_saturates_instead_of_overflowing() {
        let huge = Money::from_cents(i64::MAX);
        assert_eq!(huge + huge, huge);
        assert_eq!([huge, huge, Money::from_cents(1)].iter().sum::<Money>(), huge);
        let mut total = huge;
        total += Money::from_cents(5);
        assert_eq!(total, huge);
        assert_eq!(
            Money::from_cents(i64::MIN) - Money::from_cents(1),
            Money::from_cents(i64::MIN)
        );
    }

    #[test]
    fn sums_without_drift() {
        let total: Money = std::iter::repeat(Money::from_cents(10)).take(1_000).sum();
        assert_eq!(total, Money::from_reais(100, 0));
    }
}
