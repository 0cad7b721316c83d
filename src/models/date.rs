//! Calendar dates in their `YYYY-MM-DD` wire form

use chrono::NaiveDate;

use crate::error::{AppError, AppResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a strict ISO-8601 calendar date.
///
/// Only the zero-padded `YYYY-MM-DD` shape is accepted; chrono alone would
/// also take unpadded months and days.
pub fn parse_iso_date(value: &str) -> AppResult<NaiveDate> {
    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    if !well_formed {
        return Err(AppError::InvalidDate(format!(
            "'{}' is not a YYYY-MM-DD date",
            value
        )));
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| AppError::InvalidDate(format!("'{}': {}", value, e)))
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let date = parse_iso_date("2024-01-31").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        assert_eq!(format_iso_date(date), "2024-01-31");
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        for bad in ["2024-1-5", "01/05/2024", "2024-01-05T00:00:00", "", "+024-01-01"] {
            assert!(
                matches!(parse_iso_date(bad), Err(AppError::InvalidDate(_))),
                "accepted {bad}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_impossible_day() {
        assert!(matches!(
            parse_iso_date("2023-02-29"),
            Err(AppError::InvalidDate(_))
        ));
    }
}
