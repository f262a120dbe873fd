// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handlers.
//!
//! Mutating handlers authorize, translate the request into a core
//! [`Command`], apply it, and return the new state with its audit event.
//! The caller decides whether to commit the state. Read handlers never
//! produce audit events.

use shift_roster::{
    Command, EmployeeShift, SchedulePeriod, State, TransitionResult, appeals_for, apply,
    employee_schedule, has_active_appeal, is_available, pending_appeals, schedule,
};
use shift_roster_audit::{Actor, AuditEvent, Cause};
use shift_roster_domain::{
    ActiveAppeal, Appeal, AppealDecision, Clock, DateKey, DaySchedule, Employee,
    EmployeeProfile, EmployeeRole, Notification, Username, current_date, parse_shift_time,
};
use std::str::FromStr;
use time::{Date, Time};
use tracing::{info, warn};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    ActiveAppealResponse, AddEmployeeRequest, AppealInfo, AppealListResponse,
    AvailabilityResponse, CommandResponse, CreateAppealRequest, DecideAppealRequest,
    EmployeeInfo, EmployeeRequest, EmployeeScheduleResponse, EmployeeShiftInfo,
    ListEmployeesResponse, NotificationInfo, NotificationsResponse, ProfileFields,
    ScheduleResponse, SlotAssignmentRequest, UpdateEmployeeRequest, UpdateSlotHoursRequest,
};

/// The result of an API operation that includes both the response and the audit event.
///
/// This ensures that successful API operations always produce an audit trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResult<T> {
    /// The API response.
    pub response: T,
    /// The audit event generated by this operation.
    pub audit_event: AuditEvent,
    /// The new state after the operation.
    pub new_state: State,
}

/// Applies a command on behalf of an authorized actor.
fn run(
    state: &State,
    command: Command,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ApiResult<CommandResponse>, ApiError> {
    let name: &'static str = command.name();
    let actor: Actor = authenticated_actor.to_audit_actor();

    let transition: TransitionResult = apply(state, command, actor, cause).map_err(|err| {
        warn!(action = name, actor = %authenticated_actor.username, error = %err, "Command rejected");
        translate_core_error(err)
    })?;

    info!(action = name, actor = %authenticated_actor.username, "Command applied");
    let message: String = transition
        .audit_event
        .action
        .details
        .clone()
        .unwrap_or_else(|| name.to_string());

    Ok(ApiResult {
        response: CommandResponse::ok(message),
        audit_event: transition.audit_event,
        new_state: transition.new_state,
    })
}

fn today(clock: &dyn Clock) -> Result<Date, ApiError> {
    current_date(clock).map_err(translate_domain_error)
}

fn resolve_live_day(state: &State, reference: &str) -> Result<DateKey, ApiError> {
    state
        .registry
        .resolve_day(reference)
        .map_err(translate_domain_error)
}

/// Resolves a day in the live week, falling back to a full label for
/// days that have since been archived.
fn resolve_any_day(state: &State, reference: &str) -> Result<DateKey, ApiError> {
    state
        .registry
        .resolve_day(reference)
        .or_else(|_| DateKey::parse(reference))
        .map_err(translate_domain_error)
}

fn parse_time_field(field: &str, value: &str) -> Result<Time, ApiError> {
    parse_shift_time(value).map_err(|err| ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    })
}

fn to_profile(fields: &ProfileFields) -> EmployeeProfile {
    EmployeeProfile {
        first_name: fields.first_name.trim().to_string(),
        last_name: fields.last_name.trim().to_string(),
        email: fields.email.trim().to_string(),
        phone: fields.phone.trim().to_string(),
        id_number: fields.id_number.trim().to_string(),
        employee_number: fields.employee_number.trim().to_string(),
    }
}

fn from_profile(profile: &EmployeeProfile) -> ProfileFields {
    ProfileFields {
        first_name: profile.first_name.clone(),
        last_name: profile.last_name.clone(),
        email: profile.email.clone(),
        phone: profile.phone.clone(),
        id_number: profile.id_number.clone(),
        employee_number: profile.employee_number.clone(),
    }
}

fn employee_info(employee: &Employee) -> EmployeeInfo {
    EmployeeInfo {
        username: employee.username.clone(),
        display_name: employee.display_name(),
        profile: from_profile(&employee.profile),
        is_admin: employee.is_admin(),
    }
}

fn appeal_info(appeal_index: usize, appeal: &Appeal) -> AppealInfo {
    AppealInfo {
        appeal_index,
        employee: appeal.employee.clone(),
        day: appeal.day,
        slot_index: appeal.slot_index,
        reason: appeal.reason.clone(),
        status: appeal.status.as_str().to_string(),
        response: appeal.response.clone(),
        created_at: appeal.created_at,
        decided_at: appeal.decided_at,
    }
}

fn notification_info(notification: &Notification) -> NotificationInfo {
    NotificationInfo {
        message: notification.message.clone(),
        category: notification.category.as_str().to_string(),
        created_at: notification.created_at,
        read: notification.read,
    }
}

// ============================================================================
// Week management
// ============================================================================

/// Starts the week containing today, discarding unarchived live data.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin or today cannot be
/// computed.
pub fn initialize_week(
    state: &State,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    clock: &dyn Clock,
) -> Result<ApiResult<CommandResponse>, ApiError> {
    AuthorizationService::authorize_manage_week(authenticated_actor)?;
    let date: Date = today(clock)?;
    run(state, Command::InitializeWeek { date }, authenticated_actor, cause)
}

/// Copies the live week into the archive.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin.
pub fn archive_current_week(
    state: &State,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ApiResult<CommandResponse>, ApiError> {
    AuthorizationService::authorize_manage_week(authenticated_actor)?;
    run(state, Command::ArchiveCurrentWeek, authenticated_actor, cause)
}

/// Archives the live week and starts the current one if the calendar has
/// moved on.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin or today cannot be
/// computed.
pub fn roll_over_week(
    state: &State,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    clock: &dyn Clock,
) -> Result<ApiResult<CommandResponse>, ApiError> {
    AuthorizationService::authorize_manage_week(authenticated_actor)?;
    let today: Date = today(clock)?;
    run(state, Command::RollOverWeek { today }, authenticated_actor, cause)
}

/// Changes the hours of one live slot.
///
/// # Arguments
///
/// * `state` - The current system state
/// * `request` - Day reference, slot index and `HH:MM` times
/// * `authenticated_actor` - The authenticated actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Admin
/// - Either time is not a valid `HH:MM`
/// - The day is not live or the slot does not exist
pub fn update_slot_hours(
    state: &State,
    request: &UpdateSlotHoursRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ApiResult<CommandResponse>, ApiError> {
    AuthorizationService::authorize_manage_week(authenticated_actor)?;

    let start: Time = parse_time_field("start_time", &request.start_time)?;
    let end: Time = parse_time_field("end_time", &request.end_time)?;
    let day: DateKey = resolve_live_day(state, &request.day)?;

    run(
        state,
        Command::UpdateSlotHours {
            day,
            slot_index: request.slot_index,
            start,
            end,
        },
        authenticated_actor,
        cause,
    )
}

// ============================================================================
// Assignments
// ============================================================================

/// Assigns an employee to a live slot.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Admin
/// - The day, slot or employee does not exist
/// - The employee already holds a slot that day
pub fn assign_employee(
    state: &State,
    request: &SlotAssignmentRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ApiResult<CommandResponse>, ApiError> {
    AuthorizationService::authorize_manage_assignments(authenticated_actor)?;
    let day: DateKey = resolve_live_day(state, &request.day)?;

    run(
        state,
        Command::AssignEmployee {
            day,
            slot_index: request.slot_index,
            username: Username::new(&request.username),
        },
        authenticated_actor,
        cause,
    )
}

/// Removes an employee from a live slot.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin, the day or slot does not
/// exist, or the employee is not on the slot.
pub fn unassign_employee(
    state: &State,
    request: &SlotAssignmentRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ApiResult<CommandResponse>, ApiError> {
    AuthorizationService::authorize_manage_assignments(authenticated_actor)?;
    let day: DateKey = resolve_live_day(state, &request.day)?;

    run(
        state,
        Command::UnassignEmployee {
            day,
            slot_index: request.slot_index,
            username: Username::new(&request.username),
        },
        authenticated_actor,
        cause,
    )
}

/// Removes an employee from every live slot.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin.
pub fn remove_employee_from_all_shifts(
    state: &State,
    request: &EmployeeRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ApiResult<CommandResponse>, ApiError> {
    AuthorizationService::authorize_manage_assignments(authenticated_actor)?;
    run(
        state,
        Command::RemoveEmployeeFromAllShifts {
            username: Username::new(&request.username),
        },
        authenticated_actor,
        cause,
    )
}

// ============================================================================
// Directory
// ============================================================================

/// Registers a new employee.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Admin
/// - The username (given or derived) is invalid or already taken
pub fn add_employee(
    state: &State,
    request: &AddEmployeeRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ApiResult<CommandResponse>, ApiError> {
    AuthorizationService::authorize_manage_employees(authenticated_actor)?;

    let employee: Employee = Employee::new(
        Username::new(&request.username),
        to_profile(&request.profile),
        EmployeeRole::from_admin_flag(request.is_admin),
    );
    run(
        state,
        Command::AddEmployee { employee },
        authenticated_actor,
        cause,
    )
}

/// Replaces an employee's profile fields.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin or the employee does not
/// exist.
pub fn update_employee(
    state: &State,
    request: &UpdateEmployeeRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ApiResult<CommandResponse>, ApiError> {
    AuthorizationService::authorize_manage_employees(authenticated_actor)?;
    run(
        state,
        Command::UpdateEmployee {
            username: Username::new(&request.username),
            profile: to_profile(&request.profile),
        },
        authenticated_actor,
        cause,
    )
}

/// Deletes a regular employee and every live assignment they hold.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Admin
/// - The employee does not exist or is an administrator
pub fn remove_employee(
    state: &State,
    request: &EmployeeRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ApiResult<CommandResponse>, ApiError> {
    AuthorizationService::authorize_manage_employees(authenticated_actor)?;
    run(
        state,
        Command::RemoveEmployee {
            username: Username::new(&request.username),
        },
        authenticated_actor,
        cause,
    )
}

/// Lists regular employees in username order.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin.
pub fn list_employees(
    state: &State,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ListEmployeesResponse, ApiError> {
    AuthorizationService::authorize_manage_employees(authenticated_actor)?;
    Ok(ListEmployeesResponse {
        employees: state
            .directory
            .regular_employees()
            .into_iter()
            .map(employee_info)
            .collect(),
    })
}

/// Returns one employee's record.
///
/// # Errors
///
/// Returns an error if a regular employee asks for someone else, or the
/// employee does not exist.
pub fn get_employee(
    state: &State,
    authenticated_actor: &AuthenticatedActor,
    username: &str,
) -> Result<EmployeeInfo, ApiError> {
    let username: Username = Username::new(username);
    AuthorizationService::authorize_view_employee(authenticated_actor, &username)?;
    let employee: &Employee = state
        .directory
        .require(&username)
        .map_err(translate_domain_error)?;
    Ok(employee_info(employee))
}

// ============================================================================
// Schedules
// ============================================================================

/// Returns the week or month schedule `offset` periods back from today.
///
/// Any authenticated actor may read the full schedule.
///
/// # Errors
///
/// Returns an error if today or the window cannot be computed.
pub fn get_schedule(
    state: &State,
    period: SchedulePeriod,
    offset: u32,
    clock: &dyn Clock,
) -> Result<ScheduleResponse, ApiError> {
    let days: Vec<DaySchedule> =
        schedule(state, today(clock)?, period, offset).map_err(translate_core_error)?;
    Ok(ScheduleResponse {
        period: period.as_str().to_string(),
        offset,
        days,
    })
}

/// Returns the slots one employee holds in the requested window.
///
/// # Errors
///
/// Returns an error if a regular employee asks for someone else's
/// schedule, the employee does not exist, or the window cannot be
/// computed.
pub fn get_employee_schedule(
    state: &State,
    authenticated_actor: &AuthenticatedActor,
    username: &str,
    period: SchedulePeriod,
    offset: u32,
    clock: &dyn Clock,
) -> Result<EmployeeScheduleResponse, ApiError> {
    let username: Username = Username::new(username);
    AuthorizationService::authorize_view_employee(authenticated_actor, &username)?;
    state
        .directory
        .require(&username)
        .map_err(translate_domain_error)?;

    let shifts: Vec<EmployeeShift> =
        employee_schedule(state, &username, today(clock)?, period, offset)
            .map_err(translate_core_error)?;

    Ok(EmployeeScheduleResponse {
        username,
        period: period.as_str().to_string(),
        offset,
        shifts: shifts
            .into_iter()
            .map(|shift| EmployeeShiftInfo {
                day: shift.day,
                slot_index: shift.slot_index,
                start_time: shift.start_time,
                end_time: shift.end_time,
            })
            .collect(),
    })
}

/// Checks whether an employee is free on a live day.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin or the day is not live.
pub fn check_availability(
    state: &State,
    authenticated_actor: &AuthenticatedActor,
    day: &str,
    username: &str,
) -> Result<AvailabilityResponse, ApiError> {
    AuthorizationService::authorize_manage_assignments(authenticated_actor)?;
    let day: DateKey = resolve_live_day(state, day)?;
    let username: Username = Username::new(username);
    let available: bool = is_available(state, &day, &username);

    Ok(AvailabilityResponse {
        day,
        username,
        available,
    })
}

// ============================================================================
// Appeals
// ============================================================================

/// Files an appeal by the calling employee against one of their slots.
///
/// # Arguments
///
/// * `state` - The current system state
/// * `request` - Day reference, slot index and reason
/// * `authenticated_actor` - The appealing employee
/// * `cause` - The cause or reason for this action
/// * `clock` - Source of the filing time
///
/// # Errors
///
/// Returns an error if:
/// - The day or slot does not exist, or the caller is not on the slot
/// - A pending appeal for the slot already exists
/// - An appeal for the slot was already rejected
pub fn create_appeal(
    state: &State,
    request: &CreateAppealRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    clock: &dyn Clock,
) -> Result<ApiResult<CommandResponse>, ApiError> {
    let day: DateKey = resolve_live_day(state, &request.day)?;

    run(
        state,
        Command::CreateAppeal {
            employee: authenticated_actor.username.clone(),
            day,
            slot_index: request.slot_index,
            reason: request.reason.trim().to_string(),
            created_at: clock.now_utc(),
        },
        authenticated_actor,
        cause,
    )
}

/// Decides a pending appeal.
///
/// Approval takes the employee off the slot. Either decision notifies the
/// employee.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Admin
/// - The decision is not `approved` or `rejected`
/// - The appeal does not exist or was already decided
pub fn decide_appeal(
    state: &State,
    request: &DecideAppealRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    clock: &dyn Clock,
) -> Result<ApiResult<CommandResponse>, ApiError> {
    AuthorizationService::authorize_review_appeals(authenticated_actor)?;
    let decision: AppealDecision =
        AppealDecision::from_str(&request.decision).map_err(translate_domain_error)?;

    run(
        state,
        Command::DecideAppeal {
            appeal_index: request.appeal_index,
            decision,
            response: request.response.trim().to_string(),
            decided_at: clock.now_utc(),
        },
        authenticated_actor,
        cause,
    )
}

/// Lists pending appeals, newest first.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin.
pub fn list_pending_appeals(
    state: &State,
    authenticated_actor: &AuthenticatedActor,
) -> Result<AppealListResponse, ApiError> {
    AuthorizationService::authorize_review_appeals(authenticated_actor)?;

    let mut appeals: Vec<AppealInfo> = pending_appeals(state)
        .into_iter()
        .map(|(index, appeal)| appeal_info(index, appeal))
        .collect();
    appeals.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.appeal_index.cmp(&a.appeal_index))
    });

    Ok(AppealListResponse { appeals })
}

/// Lists one employee's appeals in filing order.
///
/// # Errors
///
/// Returns an error if a regular employee asks for someone else's appeals.
pub fn list_appeals_for(
    state: &State,
    authenticated_actor: &AuthenticatedActor,
    username: &str,
) -> Result<AppealListResponse, ApiError> {
    let username: Username = Username::new(username);
    AuthorizationService::authorize_view_employee(authenticated_actor, &username)?;

    Ok(AppealListResponse {
        appeals: appeals_for(state, &username)
            .into_iter()
            .map(|(index, appeal)| appeal_info(index, appeal))
            .collect(),
    })
}

/// Reports the caller's standing appeal on one slot.
///
/// # Errors
///
/// Returns an error if the day reference is neither a live day nor a
/// valid day label.
pub fn get_active_appeal(
    state: &State,
    authenticated_actor: &AuthenticatedActor,
    day: &str,
    slot_index: usize,
) -> Result<ActiveAppealResponse, ApiError> {
    let day: DateKey = resolve_any_day(state, day)?;
    let active: Option<ActiveAppeal> =
        has_active_appeal(state, &authenticated_actor.username, &day, slot_index);

    Ok(active.map_or(
        ActiveAppealResponse {
            active: false,
            status: None,
            response: None,
        },
        |active| ActiveAppealResponse {
            active: true,
            status: Some(active.status.as_str().to_string()),
            response: active.response,
        },
    ))
}

// ============================================================================
// Notifications
// ============================================================================

/// Returns the caller's notifications and unread count.
#[must_use]
pub fn get_notifications(
    state: &State,
    authenticated_actor: &AuthenticatedActor,
) -> NotificationsResponse {
    let username: &Username = &authenticated_actor.username;
    NotificationsResponse {
        username: username.clone(),
        unread_count: state.notifications.unread_count(username),
        notifications: state
            .notifications
            .for_recipient(username)
            .iter()
            .map(notification_info)
            .collect(),
    }
}

/// Marks all of the caller's notifications read.
///
/// # Errors
///
/// Returns an error only if the core rejects the command.
pub fn mark_notifications_read(
    state: &State,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ApiResult<CommandResponse>, ApiError> {
    run(
        state,
        Command::MarkNotificationsRead {
            username: authenticated_actor.username.clone(),
        },
        authenticated_actor,
        cause,
    )
}
