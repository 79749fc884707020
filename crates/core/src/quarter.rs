//! Fiscal quarter calendar.
//!
//! Quarters follow the standard calendar months except in 2022, where the
//! Q1/Q2 boundary is shifted so that March 31 falls into Q2 and Q1 ends on
//! March 30. Quarter labels have the form `<year> Q<1-4>`.

use chrono::{Datelike, NaiveDate};

/// Map a date to its quarter label.
pub fn quarter_label(date: NaiveDate) -> String {
    let (year, month, day) = (date.year(), date.month(), date.day());
    if year == 2022 {
        if month < 3 || (month == 3 && day < 31) {
            format!("{year} Q1")
        } else if month < 7 {
            format!("{year} Q2")
        } else if month < 10 {
            format!("{year} Q3")
        } else {
            format!("{year} Q4")
        }
    } else {
        let q = (month - 1) / 3 + 1;
        format!("{year} Q{q}")
    }
}

/// Last day of the quarter the date's month falls in.
///
/// 2022 Q1 ends on March 30; a transfer dated March 31, 2022 therefore sits
/// past its own month's quarter end and is excluded from that boundary's
/// snapshot.
pub fn quarter_end(date: NaiveDate) -> NaiveDate {
    let year = date.year();
    let (month, day) = match date.month() {
        1..=3 if year == 2022 => (3, 30),
        1..=3 => (3, 31),
        4..=6 => (6, 30),
        7..=9 => (9, 30),
        _ => (12, 31),
    };
    date_of(year, month, day)
}

/// Last day of a labeled quarter under the unshifted calendar.
///
/// Used for valuing carried balances, which are priced at the standard
/// quarter end regardless of the 2022 boundary shift.
pub fn standard_quarter_end(label: &str) -> Option<NaiveDate> {
    let year: i32 = label.get(..4)?.parse().ok()?;
    let (month, day) = match label.chars().last()? {
        '1' => (3, 31),
        '2' => (6, 30),
        '3' => (9, 30),
        '4' => (12, 31),
        _ => return None,
    };
    Some(date_of(year, month, day))
}

fn date_of(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid quarter-end date")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn standard_years_bucket_by_month() {
        assert_eq!(quarter_label(date(2023, 1, 15)), "2023 Q1");
        assert_eq!(quarter_label(date(2023, 3, 31)), "2023 Q1");
        assert_eq!(quarter_label(date(2023, 4, 1)), "2023 Q2");
        assert_eq!(quarter_label(date(2023, 9, 30)), "2023 Q3");
        assert_eq!(quarter_label(date(2023, 12, 31)), "2023 Q4");
    }

    #[test]
    fn shifted_2022_boundary() {
        assert_eq!(quarter_label(date(2022, 3, 30)), "2022 Q1");
        assert_eq!(quarter_label(date(2022, 3, 31)), "2022 Q2");
        assert_eq!(quarter_label(date(2022, 6, 30)), "2022 Q2");
        assert_eq!(quarter_label(date(2022, 7, 1)), "2022 Q3");
        assert_eq!(quarter_label(date(2022, 10, 1)), "2022 Q4");
    }

    #[test]
    fn quarter_end_follows_shift() {
        assert_eq!(quarter_end(date(2022, 2, 1)), date(2022, 3, 30));
        assert_eq!(quarter_end(date(2022, 3, 31)), date(2022, 3, 30));
        assert_eq!(quarter_end(date(2023, 2, 1)), date(2023, 3, 31));
        assert_eq!(quarter_end(date(2023, 11, 5)), date(2023, 12, 31));
    }

    #[test]
    fn standard_end_ignores_shift() {
        assert_eq!(standard_quarter_end("2022 Q1"), Some(date(2022, 3, 31)));
        assert_eq!(standard_quarter_end("2023 Q4"), Some(date(2023, 12, 31)));
        assert_eq!(standard_quarter_end("garbage"), None);
    }

    #[test]
    fn labels_sort_with_unspent_between_quarters() {
        // String ordering places "<q> Unspent" after <q> and before the next
        // quarter, which the quarterly presentation relies on.
        let mut labels = vec!["2022 Q2", "2022 Q1 Unspent", "2022 Q1"];
        labels.sort_unstable();
        assert_eq!(labels, vec!["2022 Q1", "2022 Q1 Unspent", "2022 Q2"]);
    }
}
