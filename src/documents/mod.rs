//! Brazilian taxpayer documents: CPF for people, CNPJ for companies.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const CPF_LEN: usize = 11;
const CNPJ_LEN: usize = 14;
const CNPJ_FIRST_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const CNPJ_SECOND_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("{kind} must have {expected} digits, got {actual}")]
    WrongLength {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("{kind} `{value}` has invalid check digits")]
    InvalidCheckDigits { kind: &'static str, value: String },
}

/// Keeps only ASCII digits.
pub fn strip_document(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Applies the `000.000.000-00` mask to whatever digits have been typed so far.
pub fn format_cpf(raw: &str) -> String {
    apply_mask(&strip_document(raw), CPF_LEN, &[(3, '.'), (6, '.'), (9, '-')])
}

/// Applies the `00.000.000/0000-00` mask to whatever digits have been typed so far.
pub fn format_cnpj(raw: &str) -> String {
    apply_mask(
        &strip_document(raw),
        CNPJ_LEN,
        &[(2, '.'), (5, '.'), (8, '/'), (12, '-')],
    )
}

fn apply_mask(digits: &str, max_len: usize, separators: &[(usize, char)]) -> String {
    let mut out = String::with_capacity(max_len + separators.len());
    for (idx, ch) in digits.chars().take(max_len).enumerate() {
        if let Some((_, sep)) = separators.iter().find(|(pos, _)| *pos == idx) {
            out.push(*sep);
        }
        out.push(ch);
    }
    out
}

fn digit_values(digits: &str) -> Vec<u32> {
    digits.chars().filter_map(|c| c.to_digit(10)).collect()
}

fn all_same(values: &[u32]) -> bool {
    values.windows(2).all(|pair| pair[0] == pair[1])
}

fn cpf_check_digit(values: &[u32]) -> u32 {
    let weight_start = values.len() as u32 + 1;
    let sum: u32 = values
        .iter()
        .enumerate()
        .map(|(idx, value)| value * (weight_start - idx as u32))
        .sum();
    let rest = (sum * 10) % 11;
    if rest == 10 {
        0
    } else {
        rest
    }
}

fn cnpj_check_digit(values: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = values.iter().zip(weights).map(|(v, w)| v * w).sum();
    let rest = sum % 11;
    if rest < 2 {
        0
    } else {
        11 - rest
    }
}

/// A validated CPF, stored as its 11 digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cpf(String);

impl Cpf {
    pub fn parse(raw: &str) -> Result<Self, DocumentError> {
        let digits = strip_document(raw);
        if digits.len() != CPF_LEN {
            return Err(DocumentError::WrongLength {
                kind: "CPF",
                expected: CPF_LEN,
                actual: digits.len(),
            });
        }
        let values = digit_values(&digits);
        let first = cpf_check_digit(&values[..9]);
        let second = cpf_check_digit(&values[..10]);
        if all_same(&values) || values[9] != first || values[10] != second {
            return Err(DocumentError::InvalidCheckDigits {
                kind: "CPF",
                value: raw.to_string(),
            });
        }
        Ok(Self(digits))
    }

    pub fn digits(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_cpf(&self.0))
    }
}

impl TryFrom<String> for Cpf {
    type Error = DocumentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Cpf::parse(&value)
    }
}

impl From<Cpf> for String {
    fn from(value: Cpf) -> Self {
        value.0
    }
}

/// A validated CNPJ, stored as its 14 digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cnpj(String);

impl Cnpj {
    pub fn parse(raw: &str) -> Result<Self, DocumentError> {
        let digits = strip_document(raw);
        if digits.len() != CNPJ_LEN {
            return Err(DocumentError::WrongLength {
                kind: "CNPJ",
                expected: CNPJ_LEN,
                actual: digits.len(),
            });
        }
        let values = digit_values(&digits);
        let first = cnpj_check_digit(&values[..12], &CNPJ_FIRST_WEIGHTS);
        let second = cnpj_check_digit(&values[..13], &CNPJ_SECOND_WEIGHTS);
        if all_same(&values) || values[12] != first || values[13] != second {
            return Err(DocumentError::InvalidCheckDigits {
                kind: "CNPJ",
                value: raw.to_string(),
            });
        }
        Ok(Self(digits))
    }

    pub fn digits(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cnpj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_cnpj(&self.0))
    }
}

impl TryFrom<String> for Cnpj {
    type Error = DocumentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Cnpj::parse(&value)
    }
}

impl From<Cnpj> for String {
    fn from(value: Cnpj) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_partial_input() {
        assert_eq!(format_cpf("529"), "529");
        assert_eq!(format_cpf("5299822"), "529.982.2");
        assert_eq!(format_cpf("52998224725999"), "529.982.247-25");
        assert_eq!(format_cnpj("11222333000181"), "11.222.333/0001-81");
        assert_eq!(format_cnpj("112223"), "11.222.3");
    }

    #[test]
    fn validates_cpf_check_digits() {
        let cpf = Cpf::parse("529.982.247-25").unwrap();
        assert_eq!(cpf.digits(), "52998224725");
        assert_eq!(cpf.to_string(), "529.982.247-25");
        assert!(matches!(
            Cpf::parse("529.982.247-26"),
            Err(DocumentError::InvalidCheckDigits { .. })
        ));
        assert!(matches!(
            Cpf::parse("111.111.111-11"),
            Err(DocumentError::InvalidCheckDigits { .. })
        ));
        assert_eq!(
            Cpf::parse("123"),
            Err(DocumentError::WrongLength {
                kind: "CPF",
                expected: 11,
                actual: 3
            })
        );
    }

    #[test]
    fn validates_cnpj_check_digits() {
        let cnpj = Cnpj::parse("11.222.333/0001-81").unwrap();
        assert_eq!(cnpj.to_string(), "11.222.333/0001-81");
        assert!(Cnpj::parse("11.222.333/0001-82").is_err());
        assert!(Cnpj::parse("00000000000000").is_err());
    }

    #[test]
    fn serde_round_trips_digits_only() {
        let cpf = Cpf::parse("52998224725").unwrap();
        let json = serde_json::to_string(&cpf).unwrap();
        assert_eq!(json, "\"52998224725\"");
        let invalid: Result<Cpf, _> = serde_json::from_str("\"52998224700\"");
        assert!(invalid.is_err());
    }
}
