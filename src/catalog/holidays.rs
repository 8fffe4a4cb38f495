//! South African public holidays
//!
//! Fixed-date holidays only, as (month, day) pairs. Observed-on-Monday
//! shifts and one-off proclamations are out of scope for the calendar
//! dimension.

use chrono::{Datelike, NaiveDate};

/// Fixed-date public holidays with their statutory names
pub const PUBLIC_HOLIDAYS: &[(u32, u32, &str)] = &[
    (1, 1, "New Year's Day"),
    (3, 21, "Human Rights Day"),
    (4, 27, "Freedom Day"),
    (5, 1, "Workers' Day"),
    (6, 16, "Youth Day"),
    (8, 9, "National Women's Day"),
    (9, 24, "Heritage Day"),
    (12, 16, "Day of Reconciliation"),
    (12, 25, "Christmas Day"),
    (12, 26, "Day of Goodwill"),
];

/// True if the date falls on a public holiday
pub fn is_public_holiday(date: NaiveDate) -> bool {
    PUBLIC_HOLIDAYS
        .iter()
        .any(|(month, day, _)| date.month() == *month && date.day() == *day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holiday_count() {
        assert_eq!(PUBLIC_HOLIDAYS.len(), 10);
    }

    #[test]
    fn test_freedom_day() {
        let date = NaiveDate::from_ymd_opt(2024, 4, 27).unwrap();
        assert!(is_public_holiday(date));
    }

    #[test]
    fn test_ordinary_day() {
        let date = NaiveDate::from_ymd_opt(2024, 4, 26).unwrap();
        assert!(!is_public_holiday(date));
    }

    #[test]
    fn test_dates_valid_in_any_year() {
        for (month, day, name) in PUBLIC_HOLIDAYS {
            assert!(
                NaiveDate::from_ymd_opt(2025, *month, *day).is_some(),
                "{name}"
            );
        }
    }
}
