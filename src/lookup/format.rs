//! Offline VAT identifier format validation.

use std::fmt;

/// Error returned when a VAT identifier fails format validation.
#[derive(Debug, Clone)]
pub struct VatFormatError {
    /// The invalid input value.
    pub value: String,
    /// Why the value failed validation.
    pub reason: String,
}

impl fmt::Display for VatFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid VAT identifier '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for VatFormatError {}

fn digits(n: &str, len: usize) -> bool {
    n.len() == len && n.chars().all(|c| c.is_ascii_digit())
}

fn digits_between(n: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&n.len()) && n.chars().all(|c| c.is_ascii_digit())
}

/// Validate a VAT identifier by format only — no network call.
///
/// The input must include the 2-letter country prefix (e.g.
/// "DE123456789"). Greece is accepted under both its `EL` and `GR`
/// prefixes, and the UK under both `GB` and `XI` (Northern Ireland).
/// Returns the `(country_code, number)` split on success.
pub fn validate_vat_format(vat_id: &str) -> Result<(&str, &str), VatFormatError> {
    let vat_id = vat_id.trim();
    if vat_id.len() < 4 {
        return Err(VatFormatError {
            value: vat_id.into(),
            reason: "too short, must be at least 4 characters".into(),
        });
    }
    if !vat_id.is_ascii() {
        return Err(VatFormatError {
            value: vat_id.into(),
            reason: "must be ASCII".into(),
        });
    }

    let country = &vat_id[..2];
    let number = &vat_id[2..];

    let valid = match country.to_uppercase().as_str() {
        "AT" => {
            number.len() == 9
                && number.starts_with('U')
                && number[1..].chars().all(|c| c.is_ascii_digit())
        }
        "BE" => digits(number, 10),
        "BG" => digits_between(number, 9, 10),
        "CY" => {
            number.len() == 9
                && number[..8].chars().all(|c| c.is_ascii_digit())
                && number.as_bytes()[8].is_ascii_alphabetic()
        }
        "CZ" => digits_between(number, 8, 10),
        "DE" => digits(number, 9) && number.as_bytes()[0] != b'0',
        "DK" => digits(number, 8),
        "EE" => digits(number, 9),
        "EL" | "GR" => digits(number, 9),
        "ES" => number.len() == 9 && number.chars().all(|c| c.is_ascii_alphanumeric()),
        "FI" => digits(number, 8),
        "FR" | "MC" => {
            // Two-character check key, then nine digits. Monaco issues
            // French-format numbers.
            number.len() == 11
                && number[..2].chars().all(|c| c.is_ascii_alphanumeric())
                && number[2..].chars().all(|c| c.is_ascii_digit())
        }
        "GB" | "XI" => digits(number, 9) || digits(number, 12),
        "HR" => digits(number, 11),
        "HU" => digits(number, 8),
        "IE" => {
            (number.len() == 8 || number.len() == 9)
                && number.chars().all(|c| c.is_ascii_alphanumeric())
        }
        "IT" => digits(number, 11),
        "LT" => digits(number, 9) || digits(number, 12),
        "LU" => digits(number, 8),
        "LV" => digits(number, 11),
        "MT" => digits(number, 8),
        "NL" => {
            number.len() == 12
                && number[..9].chars().all(|c| c.is_ascii_digit())
                && number.as_bytes()[9] == b'B'
                && number[10..].chars().all(|c| c.is_ascii_digit())
        }
        "PL" => digits(number, 10),
        "PT" => digits(number, 9),
        "RO" => digits_between(number, 2, 10),
        "SE" => digits(number, 12),
        "SI" => digits(number, 8),
        "SK" => digits(number, 10),
        other => {
            return Err(VatFormatError {
                value: vat_id.into(),
                reason: format!("unknown country code '{other}'"),
            });
        }
    };

    if valid {
        Ok((country, number))
    } else {
        Err(VatFormatError {
            value: vat_id.into(),
            reason: format!("invalid format for country {}", country.to_uppercase()),
        })
    }
}
