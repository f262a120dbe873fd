// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, Role, authenticate};
pub use error::{ApiError, AuthError, translate_core_error, translate_domain_error};
pub use handlers::{
    ApiResult, add_employee, archive_current_week, assign_employee, check_availability,
    create_appeal, decide_appeal, get_active_appeal, get_employee, get_employee_schedule,
    get_notifications, get_schedule, initialize_week, list_appeals_for, list_employees,
    list_pending_appeals, mark_notifications_read, remove_employee,
    remove_employee_from_all_shifts, roll_over_week, unassign_employee, update_employee,
    update_slot_hours,
};
pub use request_response::{
    ActiveAppealResponse, AddEmployeeRequest, AppealInfo, AppealListResponse,
    AvailabilityResponse, CommandResponse, CreateAppealRequest, DecideAppealRequest,
    EmployeeInfo, EmployeeRequest, EmployeeScheduleResponse, EmployeeShiftInfo,
    ListEmployeesResponse, NotificationInfo, NotificationsResponse, ProfileFields,
    ScheduleResponse, SlotAssignmentRequest, UpdateEmployeeRequest, UpdateSlotHoursRequest,
};
