//! Calendar-bucket helpers used by the signal detector and the forecast
//! aggregator.

use chrono::{Datelike, NaiveDate};

/// `(year, month)` pair identifying one calendar month.
pub type MonthKey = (i32, u32);

/// Month bucket of a date.
pub fn month_key(date: NaiveDate) -> MonthKey {
    (date.year(), date.month())
}

/// 1-based quarter a date falls in.
pub fn quarter_number(date: NaiveDate) -> u32 {
    (date.month() - 1) / 3 + 1
}

/// First day of the quarter containing `date`.
pub fn quarter_start(date: NaiveDate) -> NaiveDate {
    let month = (date.month() - 1) / 3 * 3 + 1;
    // The first of a quarter month is always a valid date.
    NaiveDate::from_ymd_opt(date.year(), month, 1).expect("quarter start is a valid date")
}

#[cfg(test)]
mod tests {
    use super::{month_key, quarter_number, quarter_start};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_key_splits_year_and_month() {
        assert_eq!(month_key(date(2024, 11, 30)), (2024, 11));
    }

    #[test]
    fn quarter_start_snaps_to_first_day() {
        assert_eq!(quarter_start(date(2024, 1, 15)), date(2024, 1, 1));
        assert_eq!(quarter_start(date(2024, 6, 30)), date(2024, 4, 1));
        assert_eq!(quarter_start(date(2024, 12, 31)), date(2024, 10, 1));
    }

    #[test]
    fn quarter_numbers_cover_the_year() {
        assert_eq!(quarter_number(date(2024, 3, 31)), 1);
        assert_eq!(quarter_number(date(2024, 10, 1)), 4);
    }
}
