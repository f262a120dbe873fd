// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The serialized shape of the whole roster.
//!
//! Live and archived slots are keyed by day label (`Sunday 18/10/2026`)
//! and carry `HH:MM` times. Employee lists keep their order. Everything
//! except `users` and `shifts` may be absent and then reads as empty.

use serde::{Deserialize, Serialize};
use shift_roster::State;
use shift_roster_domain::{
    Appeal, AppealLog, AppealStatus, DateKey, Directory, DomainError, Employee, EmployeeProfile,
    EmployeeRole, Notification, NotificationCategory, Notifications, ShiftRegistry, ShiftSlot,
    Username, format_shift_time, parse_shift_time,
};
use std::collections::BTreeMap;
use time::{OffsetDateTime, Time};

use crate::error::PersistenceError;

/// One directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Profile fields, stored inline.
    #[serde(flatten)]
    pub profile: EmployeeProfile,
    /// Administrator flag.
    #[serde(default)]
    pub is_admin: bool,
}

/// One slot of one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRecord {
    /// Start as `HH:MM`.
    pub start: String,
    /// End as `HH:MM`.
    pub end: String,
    /// Assigned usernames in assignment order.
    #[serde(default)]
    pub employees: Vec<Username>,
}

/// One appeal, in filing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppealRecord {
    /// The appealing employee. May name someone deleted since.
    pub employee: Username,
    /// The appealed day, as a label.
    pub day: DateKey,
    /// The appealed slot on that day.
    pub slot_index: usize,
    /// The employee's reason.
    #[serde(default)]
    pub reason: String,
    /// `pending`, `approved` or `rejected`.
    pub status: AppealStatus,
    /// The administrator's response, once decided.
    #[serde(default)]
    pub response: Option<String>,
    /// When the appeal was filed.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the appeal was decided.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub decided_at: Option<OffsetDateTime>,
}

/// One notification; the recipient is the enclosing map key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    /// The text shown to the recipient.
    pub message: String,
    /// What produced the notification.
    pub category: NotificationCategory,
    /// When it was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Whether the recipient has seen it.
    #[serde(default)]
    pub read: bool,
}

/// Everything the roster needs to survive a restart.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SystemRecord {
    /// Directory, keyed by username.
    pub users: BTreeMap<Username, UserRecord>,
    /// Live week, keyed by day label.
    pub shifts: BTreeMap<String, Vec<SlotRecord>>,
    /// Archived days, keyed by day label.
    #[serde(default)]
    pub archive: BTreeMap<String, Vec<SlotRecord>>,
    /// Appeal log.
    #[serde(default)]
    pub appeals: Vec<AppealRecord>,
    /// Notifications per recipient, oldest first.
    #[serde(default)]
    pub notifications: BTreeMap<Username, Vec<NotificationRecord>>,
}

impl SystemRecord {
    /// Captures a state as a record.
    #[must_use]
    pub fn from_state(state: &State) -> Self {
        let users: BTreeMap<Username, UserRecord> = state
            .directory
            .iter()
            .map(|employee| {
                (
                    employee.username.clone(),
                    UserRecord {
                        profile: employee.profile.clone(),
                        is_admin: employee.is_admin(),
                    },
                )
            })
            .collect();

        let appeals: Vec<AppealRecord> = state
            .appeals
            .all()
            .iter()
            .map(|appeal| AppealRecord {
                employee: appeal.employee.clone(),
                day: appeal.day,
                slot_index: appeal.slot_index,
                reason: appeal.reason.clone(),
                status: appeal.status,
                response: appeal.response.clone(),
                created_at: appeal.created_at,
                decided_at: appeal.decided_at,
            })
            .collect();

        let mut notifications: BTreeMap<Username, Vec<NotificationRecord>> = BTreeMap::new();
        for notification in state.notifications.iter() {
            notifications
                .entry(notification.recipient.clone())
                .or_default()
                .push(NotificationRecord {
                    message: notification.message.clone(),
                    category: notification.category,
                    created_at: notification.created_at,
                    read: notification.read,
                });
        }

        Self {
            users,
            shifts: days_to_records(state.registry.live()),
            archive: days_to_records(state.registry.archive()),
            appeals,
            notifications,
        }
    }

    /// Rebuilds the state this record describes.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::InvalidRecord` if:
    /// - A username, day label or shift time is malformed
    /// - Two labels name the same day
    /// - A live day holds an employee twice
    /// - A live slot names an employee missing from `users`
    pub fn into_state(self) -> Result<State, PersistenceError> {
        let mut directory: Directory = Directory::new();
        for (username, user) in self.users {
            directory.add(Employee::new(
                username,
                user.profile,
                EmployeeRole::from_admin_flag(user.is_admin),
            ))?;
        }

        let live: BTreeMap<DateKey, Vec<ShiftSlot>> = records_to_days(self.shifts)?;
        // Archived days may still name employees deleted since
        for username in live.values().flatten().flat_map(ShiftSlot::employees) {
            directory.require(username)?;
        }
        let registry: ShiftRegistry = ShiftRegistry::restore(live, records_to_days(self.archive)?)?;

        let appeals: AppealLog = AppealLog::from_appeals(
            self.appeals
                .into_iter()
                .map(|record| Appeal {
                    employee: record.employee,
                    day: record.day,
                    slot_index: record.slot_index,
                    reason: record.reason,
                    status: record.status,
                    response: record.response,
                    created_at: record.created_at,
                    decided_at: record.decided_at,
                })
                .collect(),
        );

        let mut notifications: Notifications = Notifications::new();
        for (recipient, records) in self.notifications {
            for record in records {
                let mut notification: Notification = Notification::new(
                    recipient.clone(),
                    record.message,
                    record.category,
                    record.created_at,
                );
                notification.read = record.read;
                notifications.push(notification);
            }
        }

        Ok(State {
            directory,
            registry,
            appeals,
            notifications,
        })
    }
}

fn days_to_records(days: &BTreeMap<DateKey, Vec<ShiftSlot>>) -> BTreeMap<String, Vec<SlotRecord>> {
    days.iter()
        .map(|(day, slots)| {
            let records: Vec<SlotRecord> = slots
                .iter()
                .map(|slot| SlotRecord {
                    start: format_shift_time(slot.start()),
                    end: format_shift_time(slot.end()),
                    employees: slot.employees().to_vec(),
                })
                .collect();
            (day.label(), records)
        })
        .collect()
}

fn records_to_days(
    records: BTreeMap<String, Vec<SlotRecord>>,
) -> Result<BTreeMap<DateKey, Vec<ShiftSlot>>, PersistenceError> {
    let mut days: BTreeMap<DateKey, Vec<ShiftSlot>> = BTreeMap::new();
    for (label, slot_records) in records {
        let day: DateKey = DateKey::parse(&label)?;
        let mut slots: Vec<ShiftSlot> = Vec::with_capacity(slot_records.len());
        for record in slot_records {
            let start: Time = parse_shift_time(&record.start)?;
            let end: Time = parse_shift_time(&record.end)?;
            slots.push(ShiftSlot::with_employees(start, end, record.employees));
        }
        if days.insert(day, slots).is_some() {
            return Err(DomainError::DuplicateDay(day).into());
        }
    }
    Ok(days)
}
