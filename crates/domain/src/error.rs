// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calendar::DateKey;
use crate::types::Username;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Username is empty or contains whitespace.
    InvalidUsername(String),
    /// A username is already registered in the directory.
    DuplicateUsername(Username),
    /// The employee is not registered in the directory.
    EmployeeNotFound(Username),
    /// Administrators cannot be deleted through the employee directory.
    CannotRemoveAdministrator(Username),
    /// A day reference did not resolve to a live day.
    DayNotFound(String),
    /// The slot index is out of range for the day.
    SlotNotFound {
        /// The day that was addressed.
        day: DateKey,
        /// The requested slot index.
        slot_index: usize,
        /// The number of slots the day has.
        slot_count: usize,
    },
    /// The employee already works another slot that day.
    AlreadyAssigned {
        /// The employee.
        username: Username,
        /// The day.
        day: DateKey,
        /// The slot the employee already holds.
        slot_index: usize,
    },
    /// The employee is not a member of the slot.
    NotAssigned {
        /// The employee.
        username: Username,
        /// The day.
        day: DateKey,
        /// The slot index.
        slot_index: usize,
    },
    /// A time of day could not be parsed as `HH:MM`.
    InvalidShiftTime(String),
    /// A date key label could not be parsed.
    InvalidDateKey(String),
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// The appeal index does not exist.
    AppealNotFound(usize),
    /// A pending appeal already exists for the same employee, day and slot.
    DuplicateAppeal {
        /// The employee.
        username: Username,
        /// The day.
        day: DateKey,
        /// The slot index.
        slot_index: usize,
    },
    /// An appeal for the same employee, day and slot was already rejected.
    AppealPreviouslyRejected {
        /// The employee.
        username: Username,
        /// The day.
        day: DateKey,
        /// The slot index.
        slot_index: usize,
        /// The administrator's response on the rejected appeal.
        response: Option<String>,
    },
    /// The appeal status string is not recognised.
    InvalidAppealStatus(String),
    /// The appeal decision string is not recognised.
    InvalidAppealDecision(String),
    /// The appeal is not in a state that permits the transition.
    InvalidAppealTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
    },
    /// The notification category string is not recognised.
    InvalidNotificationCategory(String),
    /// Two stored day labels name the same date.
    DuplicateDay(DateKey),
    /// The appealed shift is no longer in the live week.
    AppealDayNotLive {
        /// The appealed day.
        day: DateKey,
        /// The appealed slot.
        slot_index: usize,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidUsername(msg) => write!(f, "Invalid username: {msg}"),
            Self::DuplicateUsername(username) => {
                write!(f, "Username '{username}' already exists")
            }
            Self::EmployeeNotFound(username) => write!(f, "Employee '{username}' not found"),
            Self::CannotRemoveAdministrator(username) => {
                write!(f, "Administrator '{username}' cannot be removed")
            }
            Self::DayNotFound(day) => write!(f, "Day '{day}' is not part of the live week"),
            Self::SlotNotFound {
                day,
                slot_index,
                slot_count,
            } => {
                write!(
                    f,
                    "Slot {slot_index} does not exist on {day} ({slot_count} slots)"
                )
            }
            Self::AlreadyAssigned {
                username,
                day,
                slot_index,
            } => {
                write!(
                    f,
                    "Employee '{username}' is already assigned to slot {slot_index} on {day}"
                )
            }
            Self::NotAssigned {
                username,
                day,
                slot_index,
            } => {
                write!(
                    f,
                    "Employee '{username}' is not assigned to slot {slot_index} on {day}"
                )
            }
            Self::InvalidShiftTime(value) => {
                write!(f, "Invalid shift time '{value}': expected HH:MM")
            }
            Self::InvalidDateKey(value) => {
                write!(f, "Invalid day label '{value}': expected '<Weekday> dd/mm/yyyy'")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::AppealNotFound(index) => write!(f, "Appeal {index} not found"),
            Self::DuplicateAppeal {
                username,
                day,
                slot_index,
            } => {
                write!(
                    f,
                    "A pending appeal already exists for '{username}' on {day}, slot {slot_index}"
                )
            }
            Self::AppealPreviouslyRejected {
                username,
                day,
                slot_index,
                response,
            } => {
                write!(
                    f,
                    "The appeal by '{username}' on {day}, slot {slot_index} was already rejected"
                )?;
                if let Some(response) = response {
                    write!(f, ": {response}")?;
                }
                Ok(())
            }
            Self::InvalidAppealStatus(status) => write!(f, "Invalid appeal status: {status}"),
            Self::InvalidAppealDecision(decision) => {
                write!(
                    f,
                    "Invalid appeal decision: {decision}. Must be 'approved' or 'rejected'"
                )
            }
            Self::InvalidAppealTransition { from, to } => {
                write!(f, "Cannot move appeal from '{from}' to '{to}'")
            }
            Self::InvalidNotificationCategory(category) => {
                write!(f, "Invalid notification category: {category}")
            }
            Self::DuplicateDay(day) => write!(f, "Day {day} is listed more than once"),
            Self::AppealDayNotLive { day, slot_index } => {
                write!(
                    f,
                    "Slot {slot_index} on {day} is no longer part of the live week"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
