//! Date arithmetic: calendar difference and day offsets.

use crate::error::InputError;
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Inputs for the date-difference calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateDiffInput {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Calendar difference between two dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateDiff {
    /// Whole calendar years.
    pub years: u32,
    /// Whole calendar months after the years.
    pub months: u32,
    /// Remaining days after the months.
    pub days: u32,
    /// Flat day count between the two dates.
    pub total_days: u64,
}

/// Days in a Gregorian month.
fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match (first, next) {
        (Some(a), Some(b)) => (b - a).num_days() as u32,
        _ => 30,
    }
}

/// Advance a date by whole months, clamping the day into the target month
/// (Jan 31 + 1 month = Feb 28/29).
fn add_months_clamped(date: NaiveDate, months: i64) -> NaiveDate {
    let total = i64::from(date.month0()) + months;
    let year = date.year() + (total.div_euclid(12)) as i32;
    let month = total.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

/// Calendar difference from `start` to `end`.
///
/// Whole months are counted first (day-of-month clamped, so Jan 31 is one
/// month before both Feb 28 and Mar 1 minus a day); the day remainder is the
/// flat distance from that month anchor. An end date before the start date
/// is rejected immediately, mirroring the host behavior of surfacing the
/// range error rather than silently swapping the fields.
pub fn date_diff(input: &DateDiffInput) -> Result<DateDiff, InputError> {
    if input.end < input.start {
        return Err(InputError::new("end", "must not be before the start date"));
    }

    let mut whole_months = i64::from(input.end.year() - input.start.year()) * 12
        + i64::from(input.end.month()) - i64::from(input.start.month());
    if input.end.day() < input.start.day() {
        whole_months -= 1;
    }
    let whole_months = whole_months.max(0);

    let anchor = add_months_clamped(input.start, whole_months);
    let days = (input.end - anchor).num_days();

    Ok(DateDiff {
        years: (whole_months / 12) as u32,
        months: (whole_months % 12) as u32,
        days: days as u32,
        total_days: (input.end - input.start).num_days() as u64,
    })
}

/// Inputs for the day-offset calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddDaysInput {
    pub date: NaiveDate,
    /// Days to add; negative moves backwards.
    pub days: i64,
}

/// Offset a date by a signed day count.
pub fn add_days(input: &AddDaysInput) -> Result<NaiveDate, InputError> {
    let shifted = if input.days >= 0 {
        input.date.checked_add_days(Days::new(input.days as u64))
    } else {
        input
            .date
            .checked_sub_days(Days::new(input.days.unsigned_abs()))
    };
    shifted.ok_or_else(|| InputError::new("days", "offset leaves the supported date range"))
}

/// Parse a `YYYY-MM-DD` field.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, InputError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| InputError::new(field, format!("'{value}' is not a YYYY-MM-DD date")))
}
