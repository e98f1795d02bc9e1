//! Fax number normalization.
//!
//! WestFax wants bare digit strings. Input arrives with whatever punctuation
//! users type ("+1 (210) 555-1234"), so we strip every non-digit first and
//! only then length-check.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

static FAX_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{7,20}$").unwrap());

/// Strip non-digit characters and validate the remainder as a fax number.
///
/// Returns the normalized digit string, or [`Error::InvalidNumber`] carrying
/// the original input when fewer than 7 or more than 20 digits remain.
pub fn normalize_fax_number(raw: &str) -> Result<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if FAX_NUMBER.is_match(&digits) {
        Ok(digits)
    } else {
        Err(Error::InvalidNumber(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_digits() {
        assert_eq!(normalize_fax_number("2105551234").unwrap(), "2105551234");
    }

    #[test]
    fn strips_punctuation_and_country_prefix() {
        assert_eq!(
            normalize_fax_number("+1 (210) 555-1234").unwrap(),
            "12105551234"
        );
    }

    #[test]
    fn accepts_length_bounds() {
        assert_eq!(normalize_fax_number("1234567").unwrap(), "1234567");
        let twenty = "1".repeat(20);
        assert_eq!(normalize_fax_number(&twenty).unwrap(), twenty);
    }

    #[test]
    fn rejects_too_short() {
        assert!(matches!(
            normalize_fax_number("123456"),
            Err(Error::InvalidNumber(_))
        ));
    }

    #[test]
    fn rejects_too_long() {
        assert!(normalize_fax_number(&"2".repeat(21)).is_err());
    }

    #[test]
    fn rejects_alphabetic_input() {
        // Letters are stripped, leaving nothing.
        assert!(normalize_fax_number("call me maybe").is_err());
        assert!(normalize_fax_number("").is_err());
    }
}
