// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use shift_roster_domain::{AppealDecision, DateKey, Employee, EmployeeProfile, Username};
use time::{Date, OffsetDateTime, Time};

/// A command represents user or system intent as data only.
///
/// Commands are the only way to request state changes. Authorization is
/// checked by the caller before a command is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the live week with the week containing `date`.
    InitializeWeek {
        /// Any date inside the target week.
        date: Date,
    },
    /// Copy the live week into the archive.
    ArchiveCurrentWeek,
    /// Archive the live week and start the week containing `today`,
    /// unless the live week already is that week.
    RollOverWeek {
        /// Today's date in the locale.
        today: Date,
    },
    /// Overwrite the interval of one live slot.
    UpdateSlotHours {
        /// The live day.
        day: DateKey,
        /// The slot on that day.
        slot_index: usize,
        /// New start time.
        start: Time,
        /// New end time.
        end: Time,
    },
    /// Put an employee on a live slot.
    AssignEmployee {
        /// The live day.
        day: DateKey,
        /// The slot on that day.
        slot_index: usize,
        /// The employee to assign.
        username: Username,
    },
    /// Take an employee off a live slot.
    UnassignEmployee {
        /// The live day.
        day: DateKey,
        /// The slot on that day.
        slot_index: usize,
        /// The employee to remove.
        username: Username,
    },
    /// Remove an employee from every live slot.
    RemoveEmployeeFromAllShifts {
        /// The employee to remove.
        username: Username,
    },
    /// Register a new employee. A blank username is derived from the names.
    AddEmployee {
        /// The employee record.
        employee: Employee,
    },
    /// Replace an employee's profile fields.
    UpdateEmployee {
        /// The employee to update.
        username: Username,
        /// The new profile.
        profile: EmployeeProfile,
    },
    /// Delete a regular employee and every live assignment they hold.
    RemoveEmployee {
        /// The employee to delete.
        username: Username,
    },
    /// File an appeal against a slot the employee holds.
    CreateAppeal {
        /// The appealing employee.
        employee: Username,
        /// The live day of the contested slot.
        day: DateKey,
        /// The contested slot.
        slot_index: usize,
        /// Free-text reason.
        reason: String,
        /// Filing time.
        created_at: OffsetDateTime,
    },
    /// Decide a pending appeal and notify the employee.
    DecideAppeal {
        /// Index of the appeal in the log.
        appeal_index: usize,
        /// The decision.
        decision: AppealDecision,
        /// The administrator's response text.
        response: String,
        /// Decision time.
        decided_at: OffsetDateTime,
    },
    /// Mark all of an employee's notifications read.
    MarkNotificationsRead {
        /// The recipient.
        username: Username,
    },
}

impl Command {
    /// Returns the action name recorded in audit events.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::InitializeWeek { .. } => "InitializeWeek",
            Self::ArchiveCurrentWeek => "ArchiveCurrentWeek",
            Self::RollOverWeek { .. } => "RollOverWeek",
            Self::UpdateSlotHours { .. } => "UpdateSlotHours",
            Self::AssignEmployee { .. } => "AssignEmployee",
            Self::UnassignEmployee { .. } => "UnassignEmployee",
            Self::RemoveEmployeeFromAllShifts { .. } => "RemoveEmployeeFromAllShifts",
            Self::AddEmployee { .. } => "AddEmployee",
            Self::UpdateEmployee { .. } => "UpdateEmployee",
            Self::RemoveEmployee { .. } => "RemoveEmployee",
            Self::CreateAppeal { .. } => "CreateAppeal",
            Self::DecideAppeal { .. } => "DecideAppeal",
            Self::MarkNotificationsRead { .. } => "MarkNotificationsRead",
        }
    }
}
