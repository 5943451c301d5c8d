//! Month-aligned date interval resolution for reports.

use serde::Serialize;
use time::{Date, Month};

use crate::Error;

/// An inclusive date range covering exactly one calendar month.
///
/// `end` is always the last day of `start`'s month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateInterval {
    /// The first day of the interval.
    pub start: Date,
    /// The last day of the interval.
    pub end: Date,
}

/// The number of months covered by a quarterly report.
pub const MONTHS_PER_QUARTER: usize = 3;

/// Resolve a year and quarter into the three month intervals covering that quarter.
///
/// Quarter `q` covers the months `3q-2` through `3q`, so `resolve_quarter(2024, 2)` yields
/// April, May and June of 2024. The intervals are returned in chronological order.
///
/// # Errors
/// Returns [Error::InvalidQuarter] when `quarter` is outside 1-4, and [Error::InvalidYear] when
/// `year` is not a positive four-digit number.
pub fn resolve_quarter(year: i32, quarter: u8) -> Result<[DateInterval; MONTHS_PER_QUARTER], Error> {
    validate_year(year)?;

    if !(1..=4).contains(&quarter) {
        return Err(Error::InvalidQuarter(quarter));
    }

    let first_month = 3 * quarter - 2;

    Ok([
        month_interval(year, month_from_number(first_month)),
        month_interval(year, month_from_number(first_month + 1)),
        month_interval(year, month_from_number(first_month + 2)),
    ])
}

/// Resolve a year into the twelve month intervals covering that year, in chronological order.
///
/// # Errors
/// Returns [Error::InvalidYear] when `year` is not a positive four-digit number.
pub fn resolve_year(year: i32) -> Result<[DateInterval; 12], Error> {
    validate_year(year)?;

    Ok(std::array::from_fn(|index| {
        month_interval(year, month_from_number(index as u8 + 1))
    }))
}

fn validate_year(year: i32) -> Result<(), Error> {
    if (1..=9999).contains(&year) {
        Ok(())
    } else {
        Err(Error::InvalidYear(year))
    }
}

fn month_interval(year: i32, month: Month) -> DateInterval {
    let start = Date::from_calendar_date(year, month, 1).expect("invalid month start date");
    let end = Date::from_calendar_date(year, month, last_day_of_month(year, month))
        .expect("invalid month end date");

    DateInterval { start, end }
}

fn last_day_of_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

fn month_from_number(month: u8) -> Month {
    match month {
        1 => Month::January,
        2 => Month::February,
        3 => Month::March,
        4 => Month::April,
        5 => Month::May,
        6 => Month::June,
        7 => Month::July,
        8 => Month::August,
        9 => Month::September,
        10 => Month::October,
        11 => Month::November,
        12 => Month::December,
        _ => panic!("invalid month number {month}"),
    }
}
