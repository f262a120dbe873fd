// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{State, TransitionResult};
use shift_roster_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use shift_roster_domain::{
    Appeal, AppealDecision, DateKey, DomainError, Employee, Notification, NotificationCategory,
    ShiftSlot, Username, format_shift_time, week_start,
};
use time::{Date, OffsetDateTime};

/// What a command did, before it is wrapped in an audit event.
struct Outcome {
    details: String,
    day: Option<DateKey>,
}

impl Outcome {
    const fn global(details: String) -> Self {
        Self { details, day: None }
    }

    const fn for_day(details: String, day: DateKey) -> Self {
        Self {
            details,
            day: Some(day),
        }
    }
}

/// Applies a command to the current state, producing a new state and audit event.
///
/// The command runs against a copy of `state`; the caller commits the
/// returned state only on success, so a failed command leaves nothing
/// half-done.
///
/// # Arguments
///
/// * `state` - The current state (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state and audit event
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if the command violates a domain rule: an unknown day,
/// slot, employee or appeal, a double booking, a duplicate or previously
/// rejected appeal, or a decision on an appeal that is no longer pending.
pub fn apply(
    state: &State,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let name: &'static str = command.name();
    let before: StateSnapshot = state.to_snapshot();

    let mut new_state: State = state.clone();
    let outcome: Outcome = execute(&mut new_state, command)?;

    let after: StateSnapshot = new_state.to_snapshot();
    let action: Action = Action::new(String::from(name), Some(outcome.details));
    let audit_event: AuditEvent = match outcome.day {
        Some(day) => AuditEvent::for_day(actor, cause, action, before, after, day),
        None => AuditEvent::new(actor, cause, action, before, after),
    };

    Ok(TransitionResult {
        new_state,
        audit_event,
    })
}

fn execute(state: &mut State, command: Command) -> Result<Outcome, CoreError> {
    match command {
        Command::InitializeWeek { date } => {
            let keys: Vec<DateKey> = state.registry.initialize_week(date)?;
            Ok(Outcome::global(format!(
                "Initialized {} days starting {}",
                keys.len(),
                DateKey::new(week_start(date)?)
            )))
        }
        Command::ArchiveCurrentWeek => {
            let archived: usize = state.registry.archive_current_week();
            Ok(Outcome::global(format!("Archived {archived} live days")))
        }
        Command::RollOverWeek { today } => roll_over_week(state, today),
        Command::UpdateSlotHours {
            day,
            slot_index,
            start,
            end,
        } => {
            state
                .registry
                .update_slot_hours(&day, slot_index, start, end)?;
            Ok(Outcome::for_day(
                format!(
                    "Slot {slot_index} set to {}-{}",
                    format_shift_time(start),
                    format_shift_time(end)
                ),
                day,
            ))
        }
        Command::AssignEmployee {
            day,
            slot_index,
            username,
        } => {
            state.directory.require(&username)?;
            state.registry.assign(&day, slot_index, &username)?;
            Ok(Outcome::for_day(
                format!("Assigned '{username}' to slot {slot_index}"),
                day,
            ))
        }
        Command::UnassignEmployee {
            day,
            slot_index,
            username,
        } => {
            state.registry.unassign(&day, slot_index, &username)?;
            Ok(Outcome::for_day(
                format!("Removed '{username}' from slot {slot_index}"),
                day,
            ))
        }
        Command::RemoveEmployeeFromAllShifts { username } => {
            let removed: usize = state.registry.remove_employee_everywhere(&username);
            Ok(Outcome::global(format!(
                "Removed '{username}' from {removed} slots"
            )))
        }
        Command::AddEmployee { employee } => add_employee(state, employee),
        Command::UpdateEmployee { username, profile } => {
            state.directory.update_profile(&username, profile)?;
            Ok(Outcome::global(format!("Updated profile of '{username}'")))
        }
        Command::RemoveEmployee { username } => {
            // The directory refuses administrators before anything is touched
            state.directory.remove(&username)?;
            let removed: usize = state.registry.remove_employee_everywhere(&username);
            Ok(Outcome::global(format!(
                "Deleted '{username}' and removed them from {removed} slots"
            )))
        }
        Command::CreateAppeal {
            employee,
            day,
            slot_index,
            reason,
            created_at,
        } => create_appeal(state, employee, day, slot_index, reason, created_at),
        Command::DecideAppeal {
            appeal_index,
            decision,
            response,
            decided_at,
        } => decide_appeal(state, appeal_index, decision, response, decided_at),
        Command::MarkNotificationsRead { username } => {
            let changed: usize = state.notifications.mark_all_read(&username);
            Ok(Outcome::global(format!(
                "Marked {changed} notifications of '{username}' read"
            )))
        }
    }
}

fn roll_over_week(state: &mut State, today: Date) -> Result<Outcome, CoreError> {
    let target: Date = week_start(today)?;
    if state.registry.live_week_start() == Some(target) {
        return Ok(Outcome::global(format!(
            "Week starting {} is already live",
            DateKey::new(target)
        )));
    }

    let archived: usize = state.registry.archive_current_week();
    state.registry.initialize_week(today)?;
    Ok(Outcome::global(format!(
        "Archived {archived} days and started the week of {}",
        DateKey::new(target)
    )))
}

fn add_employee(state: &mut State, mut employee: Employee) -> Result<Outcome, CoreError> {
    let has_names: bool = !employee.profile.first_name.trim().is_empty()
        || !employee.profile.last_name.trim().is_empty();
    if employee.username.as_str().is_empty() && has_names {
        employee.username =
            Username::from_names(&employee.profile.first_name, &employee.profile.last_name);
    }

    let details: String = format!(
        "Added {} '{}'",
        employee.role.as_str(),
        employee.username
    );
    state.directory.add(employee)?;
    Ok(Outcome::global(details))
}

fn create_appeal(
    state: &mut State,
    employee: Username,
    day: DateKey,
    slot_index: usize,
    reason: String,
    created_at: OffsetDateTime,
) -> Result<Outcome, CoreError> {
    let slot: &ShiftSlot = state.registry.slot(&day, slot_index)?;
    if !slot.contains(&employee) {
        return Err(CoreError::DomainViolation(DomainError::NotAssigned {
            username: employee,
            day,
            slot_index,
        }));
    }

    let details: String = format!("'{employee}' appealed slot {slot_index}");
    let index: usize = state.appeals.submit(Appeal::new(
        employee, day, slot_index, reason, created_at,
    ))?;
    Ok(Outcome::for_day(format!("{details} (appeal {index})"), day))
}

fn decide_appeal(
    state: &mut State,
    appeal_index: usize,
    decision: AppealDecision,
    response: String,
    decided_at: OffsetDateTime,
) -> Result<Outcome, CoreError> {
    let appeal: Appeal = state
        .appeals
        .decide(appeal_index, decision, response.clone(), decided_at)?
        .clone();

    let (message, category): (String, NotificationCategory) = match decision {
        AppealDecision::Approved => {
            // A membership that is already gone does not block the decision
            match state
                .registry
                .unassign(&appeal.day, appeal.slot_index, &appeal.employee)
            {
                Ok(()) | Err(DomainError::NotAssigned { .. }) => {}
                Err(DomainError::DayNotFound(_) | DomainError::SlotNotFound { .. }) => {
                    return Err(CoreError::DomainViolation(DomainError::AppealDayNotLive {
                        day: appeal.day,
                        slot_index: appeal.slot_index,
                    }));
                }
                Err(other) => return Err(CoreError::DomainViolation(other)),
            }
            (
                format!(
                    "Your appeal for the {} shift was approved. The shift has been cancelled.",
                    appeal.day
                ),
                NotificationCategory::AppealApproved,
            )
        }
        AppealDecision::Rejected => (
            format!(
                "Your appeal for the {} shift was rejected. Reason: {response}",
                appeal.day
            ),
            NotificationCategory::AppealRejected,
        ),
    };

    state.notifications.push(Notification::new(
        appeal.employee.clone(),
        message,
        category,
        decided_at,
    ));

    Ok(Outcome::for_day(
        format!(
            "Appeal {appeal_index} by '{}' {}",
            appeal.employee,
            decision.as_str()
        ),
        appeal.day,
    ))
}
