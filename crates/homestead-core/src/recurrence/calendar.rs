//! Calendar primitives over `chrono::NaiveDate`.
//!
//! Month and year arithmetic clamps to the last valid day of the target
//! month (Jan 31 + 1 month = Feb 28/29), which is chrono's `Months` behavior.

use chrono::{DateTime, Days, Months, NaiveDate, TimeZone, Weekday};

use super::rule::Period;
use crate::error::RecurrenceError;

/// Truncate a zoned timestamp to its calendar date in that zone.
pub fn start_of_day<Tz: TimeZone>(at: &DateTime<Tz>) -> NaiveDate {
    at.date_naive()
}

/// Sunday-based weekday number: Sunday = 0 ... Saturday = 6.
pub fn weekday_index(day: Weekday) -> u8 {
    day.num_days_from_sunday() as u8
}

/// Inverse of [`weekday_index`].
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

fn out_of_range(date: NaiveDate, period: Period, amount: i64) -> RecurrenceError {
    RecurrenceError::DateOutOfRange {
        date,
        period,
        amount,
    }
}

pub fn add_days(date: NaiveDate, days: i64) -> Result<NaiveDate, RecurrenceError> {
    u64::try_from(days)
        .ok()
        .and_then(|n| date.checked_add_days(Days::new(n)))
        .ok_or_else(|| out_of_range(date, Period::Day, days))
}

pub fn add_weeks(date: NaiveDate, weeks: i64) -> Result<NaiveDate, RecurrenceError> {
    weeks
        .checked_mul(7)
        .and_then(|days| add_days(date, days).ok())
        .ok_or_else(|| out_of_range(date, Period::Week, weeks))
}

pub fn add_months(date: NaiveDate, months: i64) -> Result<NaiveDate, RecurrenceError> {
    u32::try_from(months)
        .ok()
        .and_then(|n| date.checked_add_months(Months::new(n)))
        .ok_or_else(|| out_of_range(date, Period::Month, months))
}

pub fn add_years(date: NaiveDate, years: i64) -> Result<NaiveDate, RecurrenceError> {
    years
        .checked_mul(12)
        .and_then(|months| add_months(date, months).ok())
        .ok_or_else(|| out_of_range(date, Period::Year, years))
}

/// Add `amount` units of `period` to `date`.
pub fn add_period(date: NaiveDate, period: Period, amount: i64) -> Result<NaiveDate, RecurrenceError> {
    match period {
        Period::Day => add_days(date, amount),
        Period::Week => add_weeks(date, amount),
        Period::Month => add_months(date, amount),
        Period::Year => add_years(date, amount),
    }
}
