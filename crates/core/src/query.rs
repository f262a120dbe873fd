// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries over [`State`]. None of these produce audit events.

use crate::error::CoreError;
use crate::state::State;
use shift_roster_domain::{ActiveAppeal, Appeal, DateKey, DaySchedule, Username};
use time::Date;

/// The window a schedule query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulePeriod {
    /// Seven days starting on the first day of the week.
    Week,
    /// One calendar month.
    Month,
}

impl SchedulePeriod {
    /// Returns the period name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

/// One slot an employee holds, as shown in their personal schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeShift {
    /// The day.
    pub day: DateKey,
    /// The slot index on that day.
    pub slot_index: usize,
    /// Start time as `HH:MM`.
    pub start_time: String,
    /// End time as `HH:MM`.
    pub end_time: String,
}

/// Returns the schedule of `period` going back `offset` periods from `today`.
///
/// # Errors
///
/// Returns an error if date arithmetic overflows.
pub fn schedule(
    state: &State,
    today: Date,
    period: SchedulePeriod,
    offset: u32,
) -> Result<Vec<DaySchedule>, CoreError> {
    let days: Vec<DaySchedule> = match period {
        SchedulePeriod::Week => state.registry.weekly_schedule(today, offset)?,
        SchedulePeriod::Month => state.registry.monthly_schedule(today, offset)?,
    };
    Ok(days)
}

/// Returns the slots `username` holds in the requested window, earliest first.
///
/// # Errors
///
/// Returns an error if date arithmetic overflows.
pub fn employee_schedule(
    state: &State,
    username: &Username,
    today: Date,
    period: SchedulePeriod,
    offset: u32,
) -> Result<Vec<EmployeeShift>, CoreError> {
    let days: Vec<DaySchedule> = schedule(state, today, period, offset)?;

    Ok(days
        .into_iter()
        .flat_map(|day_schedule| {
            let day: DateKey = day_schedule.day;
            day_schedule
                .slots
                .into_iter()
                .enumerate()
                .filter(move |(_, slot)| slot.employees.contains(username))
                .map(move |(slot_index, slot)| EmployeeShift {
                    day,
                    slot_index,
                    start_time: slot.start_time,
                    end_time: slot.end_time,
                })
        })
        .collect())
}

/// Returns pending appeals with their indices, in filing order.
#[must_use]
pub fn pending_appeals(state: &State) -> Vec<(usize, &Appeal)> {
    state.appeals.pending()
}

/// Returns an employee's appeals with their indices, in filing order.
#[must_use]
pub fn appeals_for<'a>(state: &'a State, username: &Username) -> Vec<(usize, &'a Appeal)> {
    state.appeals.for_employee(username)
}

/// Returns the pending or rejected appeal for a triple, if any.
#[must_use]
pub fn has_active_appeal(
    state: &State,
    username: &Username,
    day: &DateKey,
    slot_index: usize,
) -> Option<ActiveAppeal> {
    state.appeals.active_appeal(username, day, slot_index)
}

/// Checks whether `username` can still take a slot on a live `day`.
#[must_use]
pub fn is_available(state: &State, day: &DateKey, username: &Username) -> bool {
    state.registry.is_available(day, username)
}
