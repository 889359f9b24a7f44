// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar rules in the legislation timezone.
//!
//! Filing deadlines and good-standing thresholds are computed against the
//! calendar date in the jurisdiction that governs the registry, not UTC.
//! Instants are stored in UTC; conversion happens at the edges.

use crate::error::DomainError;
use chrono::{Datelike, TimeZone, Utc};
use chrono_tz::Tz;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, Duration, Month, OffsetDateTime};

/// The default legislation timezone.
pub const DEFAULT_LEGISLATION_TIMEZONE: &str = "America/Vancouver";

time::serde::format_description!(pub iso_date, Date, "[year]-[month]-[day]");

/// Resolves an IANA timezone name.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimezone` if the name is unknown.
pub fn parse_timezone(name: &str) -> Result<Tz, DomainError> {
    name.parse::<Tz>()
        .map_err(|_| DomainError::InvalidTimezone(name.to_string()))
}

/// Returns the calendar date of `instant` in the legislation timezone.
///
/// # Arguments
///
/// * `instant` - The point in time to convert
/// * `timezone` - IANA name of the legislation timezone
///
/// # Errors
///
/// Returns an error if the timezone is unknown or the instant cannot be
/// represented in it.
pub fn legislation_date(instant: OffsetDateTime, timezone: &str) -> Result<Date, DomainError> {
    let tz: Tz = parse_timezone(timezone)?;
    let utc = Utc
        .timestamp_opt(instant.unix_timestamp(), 0)
        .single()
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("converting {instant} to {timezone}"),
        })?;
    let local = utc.with_timezone(&tz).date_naive();

    let month: Month = u8::try_from(local.month())
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("converting month of {local}"),
        })?;
    let day: u8 = u8::try_from(local.day()).map_err(|_| DomainError::DateArithmeticOverflow {
        operation: format!("converting day of {local}"),
    })?;

    Date::from_calendar_date(local.year(), month, day).map_err(|e| DomainError::DateParseError {
        date_string: local.to_string(),
        error: e.to_string(),
    })
}

fn last_day_of_month(year: i32, month: Month) -> u8 {
    (28..=31)
        .rev()
        .find(|day| Date::from_calendar_date(year, month, *day).is_ok())
        .unwrap_or(28)
}

/// Adds a calendar delta to a date.
///
/// Years and months are applied first with the day clamped to the end of the
/// resulting month (Jan 31 + 1 month = Feb 28/29), then days are added.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the result is out of range.
pub fn add_years_months_days(
    date: Date,
    years: i32,
    months: i32,
    days: i64,
) -> Result<Date, DomainError> {
    let overflow = || DomainError::DateArithmeticOverflow {
        operation: format!("adding {years}y {months}m {days}d to {date}"),
    };

    let total_months: i32 = date
        .year()
        .checked_mul(12)
        .and_then(|m| m.checked_add(i32::from(u8::from(date.month())) - 1))
        .and_then(|m| m.checked_add(years.checked_mul(12)?))
        .and_then(|m| m.checked_add(months))
        .ok_or_else(overflow)?;

    let year: i32 = total_months.div_euclid(12);
    let month: Month = u8::try_from(total_months.rem_euclid(12) + 1)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .ok_or_else(overflow)?;
    let day: u8 = date.day().min(last_day_of_month(year, month));

    Date::from_calendar_date(year, month, day)
        .map_err(|_| overflow())?
        .checked_add(Duration::days(days))
        .ok_or_else(overflow)
}

/// Parses an ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value, format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        }
    })
}

/// Parses an RFC 3339 timestamp, or a bare date taken as midnight UTC.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if neither form parses.
pub fn parse_datetime(value: &str) -> Result<OffsetDateTime, DomainError> {
    OffsetDateTime::parse(value, &Rfc3339)
        .or_else(|_| parse_date(value).map(|d| d.midnight().assume_utc()))
        .map_err(|e| DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        })
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| date.to_string())
}

/// Formats an instant as RFC 3339.
#[must_use]
pub fn format_datetime(instant: OffsetDateTime) -> String {
    instant
        .format(&Rfc3339)
        .unwrap_or_else(|_| instant.to_string())
}
