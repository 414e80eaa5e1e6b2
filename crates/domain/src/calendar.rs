// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar helpers.
//!
//! Tournament dates are calendar dates in the venue's local time, so "today"
//! depends on the configured timezone rather than on UTC.

use crate::error::DomainError;
use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, Month, OffsetDateTime, Time};

/// Parses an IANA timezone name such as `America/Chicago`.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimezone` if the name is not a known zone.
pub fn parse_timezone(name: &str) -> Result<Tz, DomainError> {
    name.parse::<Tz>()
        .map_err(|_| DomainError::InvalidTimezone(name.to_string()))
}

/// Returns the calendar date of `now` as observed in `tz`.
///
/// # Errors
///
/// Returns an error if the instant cannot be represented in the target zone.
pub fn local_date(now: OffsetDateTime, tz: Tz) -> Result<Date, DomainError> {
    let utc: DateTime<Utc> = DateTime::from_timestamp(now.unix_timestamp(), 0).ok_or_else(|| {
        DomainError::DateArithmeticOverflow {
            operation: format!("converting {now} to a chrono timestamp"),
        }
    })?;

    let local = utc.with_timezone(&tz).date_naive();

    let month: Month = u8::try_from(local.month())
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("reading the month of {local}"),
        })?;
    let day: u8 = u8::try_from(local.day()).map_err(|_| DomainError::DateArithmeticOverflow {
        operation: format!("reading the day of {local}"),
    })?;

    Date::from_calendar_date(local.year(), month, day).map_err(|e| DomainError::DateParseError {
        date_string: local.to_string(),
        error: e.to_string(),
    })
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` on malformed input.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value, format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        }
    })
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Parses an `HH:MM` or `HH:MM:SS` wall-clock time.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` on malformed input.
pub fn parse_time(value: &str) -> Result<Time, DomainError> {
    Time::parse(value, format_description!("[hour]:[minute]:[second]"))
        .or_else(|_| Time::parse(value, format_description!("[hour]:[minute]")))
        .map_err(|e| DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        })
}

/// Formats a wall-clock time as `HH:MM:SS`.
#[must_use]
pub fn format_time(value: Time) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        value.hour(),
        value.minute(),
        value.second()
    )
}

/// Parses an RFC 3339 timestamp.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` on malformed input.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, DomainError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Formats a timestamp as RFC 3339.
///
/// # Errors
///
/// Returns an error for timestamps RFC 3339 cannot express (years outside
/// 0..=9999).
pub fn format_timestamp(value: OffsetDateTime) -> Result<String, DomainError> {
    value
        .format(&Rfc3339)
        .map_err(|e| DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        })
}
