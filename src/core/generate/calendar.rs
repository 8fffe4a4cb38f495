//! Calendar dimension generator
//!
//! Pure date arithmetic over the generation window: ISO weekday and
//! week, quarter, weekend and public-holiday flags, payday markers and
//! southern-hemisphere seasons. No randomness.

use chrono::Datelike;

use super::GenerationParams;
use crate::catalog::holidays::is_public_holiday;
use crate::domain::{CalendarRow, Result};

/// Generates one row per day of the window, in chronological order
pub fn generate(params: &GenerationParams) -> Result<Vec<CalendarRow>> {
    let rows = params
        .days()
        .into_iter()
        .map(|date| {
            let dow = date.weekday().number_from_monday() as i64;
            let month = date.month() as i64;
            let next_day = date.succ_opt();
            let is_month_end = next_day.map(|d| d.month() != date.month()).unwrap_or(true);

            CalendarRow {
                dt: date,
                dow,
                week: date.iso_week().week() as i64,
                month,
                quarter: (month - 1) / 3 + 1,
                year: date.year() as i64,
                is_weekend: dow >= 6,
                is_public_holiday: is_public_holiday(date),
                is_payday: date.day() == 15 || is_month_end,
                school_term: (month - 1) / 3 + 1,
                season: season(date.month()),
            }
        })
        .collect();

    Ok(rows)
}

/// Southern-hemisphere season for a month
fn season(month: u32) -> &'static str {
    match month {
        12 | 1 | 2 => "Summer",
        3 | 4 | 5 => "Autumn",
        6 | 7 | 8 => "Winter",
        _ => "Spring",
    }
}
