// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Days are given as caller references (`"Sunday"` or
//! `"Sunday 18/10/2026"`) and times as `HH:MM` strings; handlers resolve
//! and parse them.

use serde::{Deserialize, Serialize};
use shift_roster_domain::{DateKey, DaySchedule, Username};
use time::OffsetDateTime;

/// API request to change the hours of one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSlotHoursRequest {
    /// Day reference in the live week.
    pub day: String,
    /// Slot index on that day.
    pub slot_index: usize,
    /// New start time (`HH:MM`).
    pub start_time: String,
    /// New end time (`HH:MM`).
    pub end_time: String,
}

/// API request to put an employee on a slot or take them off it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAssignmentRequest {
    /// Day reference in the live week.
    pub day: String,
    /// Slot index on that day.
    pub slot_index: usize,
    /// The employee.
    pub username: String,
}

/// Profile fields shared by create and update requests.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfileFields {
    /// First name.
    #[serde(default)]
    pub first_name: String,
    /// Last name.
    #[serde(default)]
    pub last_name: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Phone number.
    #[serde(default)]
    pub phone: String,
    /// National ID number.
    #[serde(default)]
    pub id_number: String,
    /// Employer-assigned number.
    #[serde(default)]
    pub employee_number: String,
}

/// API request to register an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddEmployeeRequest {
    /// Username; derived from the names when blank.
    #[serde(default)]
    pub username: String,
    /// Profile fields.
    #[serde(flatten)]
    pub profile: ProfileFields,
    /// Whether the employee is an administrator.
    #[serde(default)]
    pub is_admin: bool,
}

/// API request to replace an employee's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEmployeeRequest {
    /// The employee to update.
    pub username: String,
    /// New profile fields.
    #[serde(flatten)]
    pub profile: ProfileFields,
}

/// API request naming one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// The employee.
    pub username: String,
}

/// API request to appeal one of the caller's own slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAppealRequest {
    /// Day reference in the live week.
    pub day: String,
    /// Slot index on that day.
    pub slot_index: usize,
    /// Free-text reason.
    pub reason: String,
}

/// API request to decide an appeal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecideAppealRequest {
    /// Index of the appeal.
    pub appeal_index: usize,
    /// `approved` or `rejected`.
    pub decision: String,
    /// Response shown to the employee.
    #[serde(default)]
    pub response: String,
}

/// Outcome of a mutating command: a success flag and a readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResponse {
    /// Always true; failures are reported as errors.
    pub success: bool,
    /// A human-readable description of what happened.
    pub message: String,
}

impl CommandResponse {
    /// Creates a successful response.
    #[must_use]
    pub const fn ok(message: String) -> Self {
        Self {
            success: true,
            message,
        }
    }
}

/// API response for a week or month schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResponse {
    /// `week` or `month`.
    pub period: String,
    /// How many periods back from the current one.
    pub offset: u32,
    /// Every day in the window, earliest first.
    pub days: Vec<DaySchedule>,
}

/// One slot held by an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeShiftInfo {
    /// The day.
    pub day: DateKey,
    /// Slot index on that day.
    pub slot_index: usize,
    /// Start time (`HH:MM`).
    pub start_time: String,
    /// End time (`HH:MM`).
    pub end_time: String,
}

/// API response for one employee's schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeScheduleResponse {
    /// The employee.
    pub username: Username,
    /// `week` or `month`.
    pub period: String,
    /// How many periods back from the current one.
    pub offset: u32,
    /// The employee's slots, earliest first.
    pub shifts: Vec<EmployeeShiftInfo>,
}

/// API representation of an appeal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppealInfo {
    /// Index used to decide the appeal.
    pub appeal_index: usize,
    /// The appealing employee.
    pub employee: Username,
    /// The contested day.
    pub day: DateKey,
    /// The contested slot.
    pub slot_index: usize,
    /// The employee's reason.
    pub reason: String,
    /// `pending`, `approved` or `rejected`.
    pub status: String,
    /// The administrator's response, once decided.
    pub response: Option<String>,
    /// Filing time.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Decision time.
    #[serde(with = "time::serde::rfc3339::option")]
    pub decided_at: Option<OffsetDateTime>,
}

/// API response listing appeals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppealListResponse {
    /// The appeals.
    pub appeals: Vec<AppealInfo>,
}

/// API response for the standing appeal on one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveAppealResponse {
    /// Whether a pending or rejected appeal exists.
    pub active: bool,
    /// Its status, when active.
    pub status: Option<String>,
    /// The administrator's response, when rejected.
    pub response: Option<String>,
}

/// API response for an availability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    /// The day checked.
    pub day: DateKey,
    /// The employee checked.
    pub username: Username,
    /// Whether the employee holds no slot that day.
    pub available: bool,
}

/// API representation of an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeInfo {
    /// Username.
    pub username: Username,
    /// `first last`, or the username when both are blank.
    pub display_name: String,
    /// Profile fields.
    #[serde(flatten)]
    pub profile: ProfileFields,
    /// Whether the employee is an administrator.
    pub is_admin: bool,
}

/// API response listing employees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEmployeesResponse {
    /// The employees, in username order.
    pub employees: Vec<EmployeeInfo>,
}

/// API representation of a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationInfo {
    /// Message text.
    pub message: String,
    /// `appeal_approved` or `appeal_rejected`.
    pub category: String,
    /// When it was produced.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Whether it has been read.
    pub read: bool,
}

/// API response listing the caller's notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationsResponse {
    /// The recipient.
    pub username: Username,
    /// Number of unread notifications.
    pub unread_count: usize,
    /// All notifications, oldest first.
    pub notifications: Vec<NotificationInfo>,
}
