// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! JSON routes over the api handlers.
//!
//! Every request names its caller in an `actor` field (body for writes,
//! query string for reads), which is resolved against the directory.
//! Writes run under the lock and are saved before they become visible.

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use shift_roster::{SchedulePeriod, State};
use shift_roster_api::{
    ActiveAppealResponse, AddEmployeeRequest, ApiError, ApiResult, AppealListResponse,
    AuthenticatedActor, AuthorizationService, AvailabilityResponse, CommandResponse,
    CreateAppealRequest, DecideAppealRequest, EmployeeInfo, EmployeeRequest,
    EmployeeScheduleResponse, ListEmployeesResponse, NotificationsResponse, ScheduleResponse,
    SlotAssignmentRequest, UpdateEmployeeRequest, UpdateSlotHoursRequest, add_employee,
    archive_current_week, assign_employee, authenticate, check_availability, create_appeal,
    decide_appeal, get_active_appeal, get_employee, get_employee_schedule, get_notifications,
    get_schedule, initialize_week, list_appeals_for, list_employees, list_pending_appeals,
    mark_notifications_read, remove_employee, remove_employee_from_all_shifts, roll_over_week,
    unassign_employee, update_employee, update_slot_hours,
};
use shift_roster_audit::{AuditEvent, Cause};
use shift_roster_domain::Clock;
use shift_roster_persistence::JsonStore;
use std::path::PathBuf;
use tokio::sync::MutexGuard;
use tracing::info;

use crate::app_state::{AppState, ServerState};
use crate::error::HttpError;

// ============================================================================
// Request envelopes
// ============================================================================

/// A write that only needs to know who is calling.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ActorRequest {
    /// The calling username.
    pub actor: String,
}

/// A write body: the caller plus the api request fields, side by side.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Envelope<T> {
    /// The calling username.
    pub actor: String,
    /// The api request.
    #[serde(flatten)]
    pub request: T,
}

#[derive(Debug, Deserialize)]
pub struct ActorQuery {
    pub actor: String,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    pub actor: String,
    /// `week` (default) or `month`.
    pub period: Option<String>,
    /// Periods back from the current one.
    #[serde(default)]
    pub offset: u32,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub actor: String,
    pub day: String,
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct ActiveAppealQuery {
    pub actor: String,
    pub day: String,
    pub slot_index: usize,
}

/// API response for a backup request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupResponse {
    /// The file that was written.
    pub path: String,
}

// ============================================================================
// Shared plumbing
// ============================================================================

/// Takes the writer lock with the live week rolled forward to today.
async fn lock_current(app_state: &AppState) -> Result<MutexGuard<'_, ServerState>, HttpError> {
    let mut server: MutexGuard<'_, ServerState> = app_state.inner.lock().await;
    server.roll_to_today(app_state.clock.as_ref())?;
    Ok(server)
}

/// Authenticates, runs a mutating api handler and commits its result.
async fn execute<F>(
    app_state: &AppState,
    actor: &str,
    description: &str,
    operation: F,
) -> Result<Json<CommandResponse>, HttpError>
where
    F: FnOnce(
        &State,
        &AuthenticatedActor,
        Cause,
        &dyn Clock,
    ) -> Result<ApiResult<CommandResponse>, ApiError>,
{
    let mut server: MutexGuard<'_, ServerState> = lock_current(app_state).await?;
    let authenticated: AuthenticatedActor = authenticate(&server.state.directory, actor)?;
    let cause: Cause = server.next_cause(description);

    let result: ApiResult<CommandResponse> =
        operation(&server.state, &authenticated, cause, app_state.clock.as_ref())?;
    server.commit(result.new_state, result.audit_event)?;

    Ok(Json(result.response))
}

/// Authenticates and runs a read-only api handler.
async fn read<T, F>(app_state: &AppState, actor: &str, operation: F) -> Result<Json<T>, HttpError>
where
    F: FnOnce(&State, &AuthenticatedActor, &dyn Clock) -> Result<T, ApiError>,
{
    let server: MutexGuard<'_, ServerState> = lock_current(app_state).await?;
    let authenticated: AuthenticatedActor = authenticate(&server.state.directory, actor)?;
    Ok(Json(operation(
        &server.state,
        &authenticated,
        app_state.clock.as_ref(),
    )?))
}

fn parse_period(value: Option<&str>) -> Result<SchedulePeriod, ApiError> {
    match value.unwrap_or("week") {
        "week" => Ok(SchedulePeriod::Week),
        "month" => Ok(SchedulePeriod::Month),
        other => Err(ApiError::InvalidInput {
            field: String::from("period"),
            message: format!("Unknown period '{other}', expected 'week' or 'month'"),
        }),
    }
}

// ============================================================================
// Week management
// ============================================================================

async fn handle_initialize_week(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorRequest>,
) -> Result<Json<CommandResponse>, HttpError> {
    info!(actor = %req.actor, "Handling initialize_week request");
    execute(&app_state, &req.actor, "Initialize week", initialize_week).await
}

async fn handle_archive_week(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorRequest>,
) -> Result<Json<CommandResponse>, HttpError> {
    info!(actor = %req.actor, "Handling archive_week request");
    execute(&app_state, &req.actor, "Archive week", |state, actor, cause, _| {
        archive_current_week(state, actor, cause)
    })
    .await
}

async fn handle_roll_over_week(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorRequest>,
) -> Result<Json<CommandResponse>, HttpError> {
    info!(actor = %req.actor, "Handling roll_over_week request");
    execute(&app_state, &req.actor, "Roll over week", roll_over_week).await
}

async fn handle_update_slot_hours(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<Envelope<UpdateSlotHoursRequest>>,
) -> Result<Json<CommandResponse>, HttpError> {
    info!(
        actor = %req.actor,
        day = %req.request.day,
        slot_index = req.request.slot_index,
        "Handling update_slot_hours request"
    );
    execute(&app_state, &req.actor, "Update slot hours", |state, actor, cause, _| {
        update_slot_hours(state, &req.request, actor, cause)
    })
    .await
}

// ============================================================================
// Assignments
// ============================================================================

async fn handle_assign(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<Envelope<SlotAssignmentRequest>>,
) -> Result<Json<CommandResponse>, HttpError> {
    info!(
        actor = %req.actor,
        day = %req.request.day,
        slot_index = req.request.slot_index,
        username = %req.request.username,
        "Handling assign request"
    );
    execute(&app_state, &req.actor, "Assign employee", |state, actor, cause, _| {
        assign_employee(state, &req.request, actor, cause)
    })
    .await
}

async fn handle_unassign(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<Envelope<SlotAssignmentRequest>>,
) -> Result<Json<CommandResponse>, HttpError> {
    info!(
        actor = %req.actor,
        day = %req.request.day,
        slot_index = req.request.slot_index,
        username = %req.request.username,
        "Handling unassign request"
    );
    execute(&app_state, &req.actor, "Unassign employee", |state, actor, cause, _| {
        unassign_employee(state, &req.request, actor, cause)
    })
    .await
}

async fn handle_clear_shifts(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<Envelope<EmployeeRequest>>,
) -> Result<Json<CommandResponse>, HttpError> {
    info!(actor = %req.actor, username = %req.request.username, "Handling clear_shifts request");
    execute(
        &app_state,
        &req.actor,
        "Remove employee from all shifts",
        |state, actor, cause, _| remove_employee_from_all_shifts(state, &req.request, actor, cause),
    )
    .await
}

async fn handle_availability(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, HttpError> {
    read(&app_state, &query.actor, |state, actor, _| {
        check_availability(state, actor, &query.day, &query.username)
    })
    .await
}

// ============================================================================
// Directory
// ============================================================================

async fn handle_add_employee(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<Envelope<AddEmployeeRequest>>,
) -> Result<Json<CommandResponse>, HttpError> {
    info!(actor = %req.actor, username = %req.request.username, "Handling add_employee request");
    execute(&app_state, &req.actor, "Add employee", |state, actor, cause, _| {
        add_employee(state, &req.request, actor, cause)
    })
    .await
}

async fn handle_update_employee(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<Envelope<UpdateEmployeeRequest>>,
) -> Result<Json<CommandResponse>, HttpError> {
    info!(actor = %req.actor, username = %req.request.username, "Handling update_employee request");
    execute(&app_state, &req.actor, "Update employee", |state, actor, cause, _| {
        update_employee(state, &req.request, actor, cause)
    })
    .await
}

async fn handle_remove_employee(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<Envelope<EmployeeRequest>>,
) -> Result<Json<CommandResponse>, HttpError> {
    info!(actor = %req.actor, username = %req.request.username, "Handling remove_employee request");
    execute(&app_state, &req.actor, "Remove employee", |state, actor, cause, _| {
        remove_employee(state, &req.request, actor, cause)
    })
    .await
}

async fn handle_list_employees(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<ListEmployeesResponse>, HttpError> {
    read(&app_state, &query.actor, |state, actor, _| {
        list_employees(state, actor)
    })
    .await
}

async fn handle_get_employee(
    AxumState(app_state): AxumState<AppState>,
    Path(username): Path<String>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<EmployeeInfo>, HttpError> {
    read(&app_state, &query.actor, |state, actor, _| {
        get_employee(state, actor, &username)
    })
    .await
}

// ============================================================================
// Schedules
// ============================================================================

async fn handle_schedule(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<ScheduleResponse>, HttpError> {
    let period: SchedulePeriod = parse_period(query.period.as_deref())?;
    read(&app_state, &query.actor, |state, _, clock| {
        get_schedule(state, period, query.offset, clock)
    })
    .await
}

async fn handle_employee_schedule(
    AxumState(app_state): AxumState<AppState>,
    Path(username): Path<String>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<EmployeeScheduleResponse>, HttpError> {
    let period: SchedulePeriod = parse_period(query.period.as_deref())?;
    read(&app_state, &query.actor, |state, actor, clock| {
        get_employee_schedule(state, actor, &username, period, query.offset, clock)
    })
    .await
}

// ============================================================================
// Appeals
// ============================================================================

async fn handle_create_appeal(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<Envelope<CreateAppealRequest>>,
) -> Result<Json<CommandResponse>, HttpError> {
    info!(
        actor = %req.actor,
        day = %req.request.day,
        slot_index = req.request.slot_index,
        "Handling create_appeal request"
    );
    execute(&app_state, &req.actor, "Create appeal", |state, actor, cause, clock| {
        create_appeal(state, &req.request, actor, cause, clock)
    })
    .await
}

async fn handle_decide_appeal(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<Envelope<DecideAppealRequest>>,
) -> Result<Json<CommandResponse>, HttpError> {
    info!(
        actor = %req.actor,
        appeal_index = req.request.appeal_index,
        decision = %req.request.decision,
        "Handling decide_appeal request"
    );
    execute(&app_state, &req.actor, "Decide appeal", |state, actor, cause, clock| {
        decide_appeal(state, &req.request, actor, cause, clock)
    })
    .await
}

async fn handle_pending_appeals(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<AppealListResponse>, HttpError> {
    read(&app_state, &query.actor, |state, actor, _| {
        list_pending_appeals(state, actor)
    })
    .await
}

async fn handle_employee_appeals(
    AxumState(app_state): AxumState<AppState>,
    Path(username): Path<String>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<AppealListResponse>, HttpError> {
    read(&app_state, &query.actor, |state, actor, _| {
        list_appeals_for(state, actor, &username)
    })
    .await
}

async fn handle_active_appeal(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ActiveAppealQuery>,
) -> Result<Json<ActiveAppealResponse>, HttpError> {
    read(&app_state, &query.actor, |state, actor, _| {
        get_active_appeal(state, actor, &query.day, query.slot_index)
    })
    .await
}

// ============================================================================
// Notifications
// ============================================================================

async fn handle_notifications(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<NotificationsResponse>, HttpError> {
    read(&app_state, &query.actor, |state, actor, _| {
        Ok(get_notifications(state, actor))
    })
    .await
}

async fn handle_mark_notifications_read(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorRequest>,
) -> Result<Json<CommandResponse>, HttpError> {
    execute(
        &app_state,
        &req.actor,
        "Mark notifications read",
        |state, actor, cause, _| mark_notifications_read(state, actor, cause),
    )
    .await
}

// ============================================================================
// Operations
// ============================================================================

async fn handle_audit_log(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<Vec<AuditEvent>>, HttpError> {
    let server: MutexGuard<'_, ServerState> = lock_current(&app_state).await?;
    let actor: AuthenticatedActor = authenticate(&server.state.directory, &query.actor)?;
    AuthorizationService::authorize_operate_service(&actor)?;
    Ok(Json(server.audit_log().iter().cloned().collect()))
}

async fn handle_backup(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorRequest>,
) -> Result<Json<BackupResponse>, HttpError> {
    info!(actor = %req.actor, "Handling backup request");
    let server: MutexGuard<'_, ServerState> = lock_current(&app_state).await?;
    let actor: AuthenticatedActor = authenticate(&server.state.directory, &req.actor)?;
    AuthorizationService::authorize_operate_service(&actor)?;

    let written: PathBuf = JsonStore::backup(
        &server.state,
        &app_state.backup_dir,
        app_state.clock.now_utc(),
    )?;

    Ok(Json(BackupResponse {
        path: written.display().to_string(),
    }))
}

/// Builds the application router with all endpoints.
pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/week/initialize", post(handle_initialize_week))
        .route("/api/week/archive", post(handle_archive_week))
        .route("/api/week/roll-over", post(handle_roll_over_week))
        .route("/api/slots/hours", post(handle_update_slot_hours))
        .route("/api/slots/assign", post(handle_assign))
        .route("/api/slots/unassign", post(handle_unassign))
        .route("/api/availability", get(handle_availability))
        .route(
            "/api/employees",
            get(handle_list_employees).post(handle_add_employee),
        )
        .route("/api/employees/update", post(handle_update_employee))
        .route("/api/employees/remove", post(handle_remove_employee))
        .route("/api/employees/clear-shifts", post(handle_clear_shifts))
        .route("/api/employees/{username}", get(handle_get_employee))
        .route("/api/schedule", get(handle_schedule))
        .route("/api/schedule/{username}", get(handle_employee_schedule))
        .route("/api/appeals", post(handle_create_appeal))
        .route("/api/appeals/decide", post(handle_decide_appeal))
        .route("/api/appeals/pending", get(handle_pending_appeals))
        .route("/api/appeals/active", get(handle_active_appeal))
        .route("/api/appeals/employee/{username}", get(handle_employee_appeals))
        .route("/api/notifications", get(handle_notifications))
        .route("/api/notifications/read", post(handle_mark_notifications_read))
        .route("/api/audit", get(handle_audit_log))
        .route("/api/backup", post(handle_backup))
        .with_state(app_state)
}
