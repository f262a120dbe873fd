// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar engine for the fixed scheduling locale.
//!
//! All week and month windows are derived from a "today" reference that
//! comes from an injected [`Clock`], so every derivation here is pure.
//!
//! ## Invariants
//!
//! - The locale is `Asia/Jerusalem` and weeks start on Sunday
//! - A [`DateKey`] stores only its date; the weekday is re-derived
//! - Week offsets only walk backward in time
//! - Month windows subtract `30 * offset` days from the first of the
//!   month, which is not calendar-exact across irregular month lengths

use crate::error::DomainError;
use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use time::{Date, Duration, Month, OffsetDateTime, Weekday};

/// The timezone whose calendar defines "today".
pub const LOCALE_TIMEZONE: Tz = chrono_tz::Asia::Jerusalem;

/// The designated first day of the week in the locale.
pub const FIRST_DAY_OF_WEEK: Weekday = Weekday::Sunday;

/// Number of days in a scheduling week.
pub const DAYS_PER_WEEK: i64 = 7;

/// Days subtracted per month of offset when walking back through months.
pub const APPROXIMATE_MONTH_DAYS: i64 = 30;

/// A source of the current instant.
pub trait Clock: Send + Sync {
    /// Returns the current instant in UTC.
    fn now_utc(&self) -> OffsetDateTime;
}

/// Clock backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Clock frozen at a single instant, used by tests and replays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    instant: OffsetDateTime,
}

impl FixedClock {
    /// Creates a clock that always reports `instant`.
    #[must_use]
    pub const fn new(instant: OffsetDateTime) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> OffsetDateTime {
        self.instant
    }
}

/// Identifies one day's slot collection by its calendar date.
///
/// The label pairs the weekday name with a `dd/mm/yyyy` date, for example
/// `Sunday 18/10/2026`. Ordering follows the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey {
    date: Date,
}

impl DateKey {
    /// Creates a key for `date`.
    #[must_use]
    pub const fn new(date: Date) -> Self {
        Self { date }
    }

    /// Returns the calendar date.
    #[must_use]
    pub const fn date(&self) -> Date {
        self.date
    }

    /// Returns the weekday derived from the date.
    #[must_use]
    pub const fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    /// Returns the `dd/mm/yyyy` part of the label.
    #[must_use]
    pub fn date_string(&self) -> String {
        format!(
            "{:02}/{:02}/{:04}",
            self.date.day(),
            u8::from(self.date.month()),
            self.date.year()
        )
    }

    /// Returns the full label, e.g. `Sunday 18/10/2026`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", weekday_name(self.weekday()), self.date_string())
    }

    /// Parses a label produced by [`DateKey::label`].
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateKey` if the label is malformed or
    /// its weekday does not match its date.
    pub fn parse(label: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidDateKey(label.to_string());

        let (weekday_part, date_part) = label.trim().split_once(' ').ok_or_else(invalid)?;
        let weekday: Weekday = parse_weekday(weekday_part).ok_or_else(invalid)?;

        let mut parts = date_part.trim().split('/');
        let day: u8 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
        let month: u8 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
        let year: i32 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
        if parts.next().is_some() {
            return Err(invalid());
        }

        let month: Month = Month::try_from(month).map_err(|_| invalid())?;
        let date: Date = Date::from_calendar_date(year, month, day).map_err(|_| invalid())?;

        if date.weekday() != weekday {
            return Err(invalid());
        }
        Ok(Self::new(date))
    }
}

impl std::fmt::Display for DateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for DateKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label: String = String::deserialize(deserializer)?;
        Self::parse(&label).map_err(serde::de::Error::custom)
    }
}

/// Returns the English name of a weekday.
#[must_use]
pub const fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sunday => "Sunday",
        Weekday::Monday => "Monday",
        Weekday::Tuesday => "Tuesday",
        Weekday::Wednesday => "Wednesday",
        Weekday::Thursday => "Thursday",
        Weekday::Friday => "Friday",
        Weekday::Saturday => "Saturday",
    }
}

/// Parses an English weekday name, ignoring case and surrounding whitespace.
#[must_use]
pub fn parse_weekday(name: &str) -> Option<Weekday> {
    match name.trim().to_lowercase().as_str() {
        "sunday" => Some(Weekday::Sunday),
        "monday" => Some(Weekday::Monday),
        "tuesday" => Some(Weekday::Tuesday),
        "wednesday" => Some(Weekday::Wednesday),
        "thursday" => Some(Weekday::Thursday),
        "friday" => Some(Weekday::Friday),
        "saturday" => Some(Weekday::Saturday),
        _ => None,
    }
}

/// Returns today's date in the locale, as seen by `clock`.
///
/// # Errors
///
/// Returns an error if the clock reading cannot be represented in the
/// locale calendar.
pub fn current_date(clock: &dyn Clock) -> Result<Date, DomainError> {
    let conversion_error = || DomainError::DateArithmeticOverflow {
        operation: String::from("converting the clock reading to the locale calendar"),
    };

    let now: OffsetDateTime = clock.now_utc();
    let utc: DateTime<Utc> =
        DateTime::from_timestamp(now.unix_timestamp(), now.nanosecond()).ok_or_else(conversion_error)?;
    let local = utc.with_timezone(&LOCALE_TIMEZONE).date_naive();

    let month: Month = u8::try_from(local.month())
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .ok_or_else(conversion_error)?;
    let day: u8 = u8::try_from(local.day()).map_err(|_| conversion_error())?;

    Date::from_calendar_date(local.year(), month, day).map_err(|_| conversion_error())
}

/// Returns the position of `date` within its week (0 = first day of week).
#[must_use]
pub const fn weekday_index(date: Date) -> u8 {
    let days_from_sunday: u8 = date.weekday().number_days_from_sunday();
    let first: u8 = FIRST_DAY_OF_WEEK.number_days_from_sunday();
    (days_from_sunday + 7 - first) % 7
}

/// Returns the most recent first-day-of-week on or before `date`.
///
/// # Errors
///
/// Returns an error if date arithmetic overflows.
pub fn week_start(date: Date) -> Result<Date, DomainError> {
    subtract_days(date, i64::from(weekday_index(date)), "computing the week start")
}

/// Returns the seven keys of the week `week_offset` weeks before the week
/// containing `date`, earliest first.
///
/// # Errors
///
/// Returns an error if date arithmetic overflows.
pub fn week_keys(date: Date, week_offset: u32) -> Result<Vec<DateKey>, DomainError> {
    let current_start: Date = week_start(date)?;
    let start: Date = subtract_days(
        current_start,
        DAYS_PER_WEEK * i64::from(week_offset),
        "walking back by weeks",
    )?;

    (0..DAYS_PER_WEEK)
        .map(|offset| add_days(start, offset, "enumerating week days").map(DateKey::new))
        .collect()
}

/// Returns every key of the month `month_offset` months before the month
/// containing `date`, earliest first.
///
/// The target month is found by subtracting `30 * month_offset` days from
/// the first of the current month and taking the month that lands in.
///
/// # Errors
///
/// Returns an error if date arithmetic overflows.
pub fn month_keys(date: Date, month_offset: u32) -> Result<Vec<DateKey>, DomainError> {
    let first_of_month: Date = first_day_of_month(date)?;
    let anchor: Date = subtract_days(
        first_of_month,
        APPROXIMATE_MONTH_DAYS * i64::from(month_offset),
        "walking back by months",
    )?;
    let month_start: Date = first_day_of_month(anchor)?;

    let mut keys: Vec<DateKey> = Vec::with_capacity(31);
    let mut cursor: Date = month_start;
    while cursor.month() == month_start.month() {
        keys.push(DateKey::new(cursor));
        match cursor.next_day() {
            Some(next) => cursor = next,
            None => break,
        }
    }
    Ok(keys)
}

fn first_day_of_month(date: Date) -> Result<Date, DomainError> {
    date.replace_day(1)
        .map_err(|_| DomainError::DateArithmeticOverflow {
            operation: String::from("finding the first day of the month"),
        })
}

fn add_days(date: Date, days: i64, operation: &str) -> Result<Date, DomainError> {
    date.checked_add(Duration::days(days))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: operation.to_string(),
        })
}

fn subtract_days(date: Date, days: i64, operation: &str) -> Result<Date, DomainError> {
    date.checked_sub(Duration::days(days))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: operation.to_string(),
        })
}
