//! Cell-level parsing shared by the export readers.

use chrono::NaiveDate;
use csv::StringRecord;
use treasury_core::{Error, Result};

/// Resolve a required column to its index.
pub(crate) fn require_column(
    headers: &StringRecord,
    file_label: &str,
    column: &'static str,
) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| Error::missing_column(file_label, column))
}

/// Parse a numeric cell, stripping currency formatting.
///
/// Unparsable cells become `None`, never an error; the missing value is
/// propagated downstream.
pub(crate) fn parse_numeric(cell: &str) -> Option<f64> {
    let cleaned: String = cell
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// Parse the export's `DateTime (UTC)` cell down to a calendar date.
pub(crate) fn parse_date(cell: &str) -> Result<NaiveDate> {
    let cell = cell.trim();
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(cell, format) {
            return Ok(dt.date());
        }
    }
    NaiveDate::parse_from_str(cell, "%Y-%m-%d").map_err(|_| Error::InvalidDate(cell.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_strips_currency_formatting() {
        assert_eq!(parse_numeric("1,234.56"), Some(1234.56));
        assert_eq!(parse_numeric("$5,000"), Some(5000.0));
        assert_eq!(parse_numeric(" 0.25 "), Some(0.25));
        assert_eq!(parse_numeric(""), None);
        assert_eq!(parse_numeric("n/a"), None);
    }

    #[test]
    fn date_accepts_export_formats() {
        let expected = NaiveDate::from_ymd_opt(2022, 3, 31).unwrap();
        assert_eq!(parse_date("2022-03-31 14:05:09").unwrap(), expected);
        assert_eq!(parse_date("2022-03-31 14:05").unwrap(), expected);
        assert_eq!(parse_date("2022-03-31").unwrap(), expected);
        assert!(parse_date("31/03/2022").is_err());
    }
}
