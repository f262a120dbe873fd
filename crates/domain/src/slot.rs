// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift slots and their `HH:MM` textual form.

use crate::error::DomainError;
use crate::types::Username;
use serde::{Deserialize, Serialize};
use time::Time;
use time::macros::time;

/// Default morning slot, 08:00-16:00.
pub const DEFAULT_MORNING: (Time, Time) = (time!(8:00), time!(16:00));

/// Default evening slot, 16:00-23:00.
pub const DEFAULT_EVENING: (Time, Time) = (time!(16:00), time!(23:00));

/// A time-of-day interval `[start, end)` with its assigned employees.
///
/// Membership is deduplicated and keeps insertion order. Only the shift
/// registry mutates membership, so the one-shift-per-day rule holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftSlot {
    start: Time,
    end: Time,
    employees: Vec<Username>,
}

impl ShiftSlot {
    /// Creates an empty slot.
    #[must_use]
    pub const fn new(start: Time, end: Time) -> Self {
        Self {
            start,
            end,
            employees: Vec::new(),
        }
    }

    /// Creates a slot with members, dropping repeated usernames.
    #[must_use]
    pub fn with_employees(start: Time, end: Time, employees: Vec<Username>) -> Self {
        let mut slot: Self = Self::new(start, end);
        for username in employees {
            slot.add_employee(username);
        }
        slot
    }

    /// Returns the start of the interval.
    #[must_use]
    pub const fn start(&self) -> Time {
        self.start
    }

    /// Returns the end of the interval.
    #[must_use]
    pub const fn end(&self) -> Time {
        self.end
    }

    /// Returns the assigned employees in assignment order.
    #[must_use]
    pub fn employees(&self) -> &[Username] {
        &self.employees
    }

    /// Checks if `username` is assigned to this slot.
    #[must_use]
    pub fn contains(&self, username: &Username) -> bool {
        self.employees.contains(username)
    }

    /// Overwrites the interval. Membership is untouched.
    pub const fn set_hours(&mut self, start: Time, end: Time) {
        self.start = start;
        self.end = end;
    }

    /// Appends `username`; returns false if already present.
    pub(crate) fn add_employee(&mut self, username: Username) -> bool {
        if self.employees.contains(&username) {
            return false;
        }
        self.employees.push(username);
        true
    }

    /// Removes `username`; returns false if absent.
    pub(crate) fn remove_employee(&mut self, username: &Username) -> bool {
        let before: usize = self.employees.len();
        self.employees.retain(|u| u != username);
        self.employees.len() != before
    }

    /// Returns the read-only projection of this slot.
    #[must_use]
    pub fn view(&self) -> SlotView {
        SlotView {
            start_time: format_shift_time(self.start),
            end_time: format_shift_time(self.end),
            employees: self.employees.clone(),
        }
    }
}

/// Read-only projection of a slot with `HH:MM` times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotView {
    /// Start time as `HH:MM`.
    pub start_time: String,
    /// End time as `HH:MM`.
    pub end_time: String,
    /// Assigned employees.
    pub employees: Vec<Username>,
}

/// Returns the two default slots seeded for every day.
#[must_use]
pub fn default_slots() -> Vec<ShiftSlot> {
    vec![
        ShiftSlot::new(DEFAULT_MORNING.0, DEFAULT_MORNING.1),
        ShiftSlot::new(DEFAULT_EVENING.0, DEFAULT_EVENING.1),
    ]
}

/// Formats a time of day as zero-padded `HH:MM`.
#[must_use]
pub fn format_shift_time(value: Time) -> String {
    format!("{:02}:{:02}", value.hour(), value.minute())
}

/// Parses `H:MM` or `HH:MM` into a time of day.
///
/// # Errors
///
/// Returns `DomainError::InvalidShiftTime` if the value is not a valid
/// 24-hour time.
pub fn parse_shift_time(value: &str) -> Result<Time, DomainError> {
    let invalid = || DomainError::InvalidShiftTime(value.to_string());

    let (hour_part, minute_part) = value.trim().split_once(':').ok_or_else(invalid)?;
    let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    if hour_part.is_empty()
        || hour_part.len() > 2
        || minute_part.len() != 2
        || !all_digits(hour_part)
        || !all_digits(minute_part)
    {
        return Err(invalid());
    }

    let hour: u8 = hour_part.parse().map_err(|_| invalid())?;
    let minute: u8 = minute_part.parse().map_err(|_| invalid())?;

    Time::from_hms(hour, minute, 0).map_err(|_| invalid())
}
