// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    alice, apply_ok, assign, bob, create_test_actor, create_test_cause, create_test_state, sunday,
    test_instant,
};
use crate::{Command, CoreError, State, TransitionResult, apply, has_active_appeal};
use shift_roster_domain::{
    ActiveAppeal, AppealDecision, AppealStatus, DateKey, DomainError, Notification,
    NotificationCategory, Username,
};
use time::macros::date;

fn create_appeal(day: DateKey, slot_index: usize, employee: Username) -> Command {
    Command::CreateAppeal {
        employee,
        day,
        slot_index,
        reason: String::from("scheduling conflict"),
        created_at: test_instant(),
    }
}

fn decide(appeal_index: usize, decision: AppealDecision, response: &str) -> Command {
    Command::DecideAppeal {
        appeal_index,
        decision,
        response: response.to_string(),
        decided_at: test_instant(),
    }
}

/// Alice holds Sunday slot 0 and has filed appeal 0 against it.
fn state_with_pending_appeal() -> (State, DateKey) {
    let state: State = create_test_state();
    let day: DateKey = sunday(&state);
    let state: State = assign(&state, day, 0, alice());
    let state: State = apply_ok(&state, create_appeal(day, 0, alice()));
    (state, day)
}

#[test]
fn test_approved_appeal_cancels_shift_and_notifies() {
    let (state, day) = state_with_pending_appeal();

    let result: TransitionResult = apply(
        &state,
        decide(0, AppealDecision::Approved, ""),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    let state: State = result.new_state;

    assert!(!state.registry.slot(&day, 0).unwrap().contains(&alice()));
    assert_eq!(state.appeals.get(0).unwrap().status, AppealStatus::Approved);

    let notifications: &[Notification] = state.notifications.for_recipient(&alice());
    assert_eq!(notifications.len(), 1);
    assert_eq!(
        notifications[0].category,
        NotificationCategory::AppealApproved
    );
    assert_eq!(notifications[0].category.as_str(), "appeal_approved");
    assert!(!notifications[0].read);
    assert_eq!(result.audit_event.day, Some(day));
}

#[test]
fn test_rejected_appeal_keeps_shift_and_notifies_with_reason() {
    let (state, day) = state_with_pending_appeal();

    let state: State = apply_ok(&state, decide(0, AppealDecision::Rejected, "Short staffed"));

    assert!(state.registry.slot(&day, 0).unwrap().contains(&alice()));
    let notifications: &[Notification] = state.notifications.for_recipient(&alice());
    assert_eq!(notifications.len(), 1);
    assert_eq!(
        notifications[0].category,
        NotificationCategory::AppealRejected
    );
    assert!(notifications[0].message.ends_with("Reason: Short staffed"));
    assert!(notifications[0].message.contains(&day.label()));
}

#[test]
fn test_appeal_requires_assignment() {
    let state: State = create_test_state();

    let result: Result<TransitionResult, CoreError> = apply(
        &state,
        create_appeal(sunday(&state), 0, bob()),
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::NotAssigned { .. }))
    ));
}

#[test]
fn test_appeal_on_unknown_slot_fails() {
    let state: State = create_test_state();

    let result: Result<TransitionResult, CoreError> = apply(
        &state,
        create_appeal(sunday(&state), 7, alice()),
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::SlotNotFound { .. }))
    ));
}

#[test]
fn test_duplicate_pending_appeal_fails() {
    let (state, day) = state_with_pending_appeal();

    let result: Result<TransitionResult, CoreError> = apply(
        &state,
        create_appeal(day, 0, alice()),
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::DuplicateAppeal { .. }))
    ));
}

#[test]
fn test_rejected_appeal_blocks_resubmission() {
    let (state, day) = state_with_pending_appeal();
    let state: State = apply_ok(&state, decide(0, AppealDecision::Rejected, "No cover"));

    let result: Result<TransitionResult, CoreError> = apply(
        &state,
        create_appeal(day, 0, alice()),
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::AppealPreviouslyRejected { .. }
        ))
    ));
    let active: ActiveAppeal = has_active_appeal(&state, &alice(), &day, 0).unwrap();
    assert_eq!(active.status, AppealStatus::Rejected);
    assert_eq!(active.response.as_deref(), Some("No cover"));
}

#[test]
fn test_deciding_twice_is_invalid() {
    let (state, _) = state_with_pending_appeal();
    let state: State = apply_ok(&state, decide(0, AppealDecision::Approved, ""));

    let result: Result<TransitionResult, CoreError> = apply(
        &state,
        decide(0, AppealDecision::Rejected, "changed my mind"),
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidAppealTransition { .. }
        ))
    ));
    assert_eq!(state.notifications.for_recipient(&alice()).len(), 1);
}

#[test]
fn test_deciding_unknown_appeal_fails() {
    let state: State = create_test_state();

    let result: Result<TransitionResult, CoreError> = apply(
        &state,
        decide(0, AppealDecision::Approved, ""),
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::AppealNotFound(0)))
    ));
}

#[test]
fn test_approval_tolerates_missing_membership() {
    let (state, day) = state_with_pending_appeal();
    let state: State = apply_ok(
        &state,
        Command::UnassignEmployee {
            day,
            slot_index: 0,
            username: alice(),
        },
    );

    let state: State = apply_ok(&state, decide(0, AppealDecision::Approved, ""));

    assert_eq!(state.appeals.get(0).unwrap().status, AppealStatus::Approved);
    assert_eq!(state.notifications.unread_count(&alice()), 1);
}

#[test]
fn test_approval_after_week_rolled_over_fails() {
    let (state, day) = state_with_pending_appeal();
    let state: State = apply_ok(
        &state,
        Command::RollOverWeek {
            today: date!(2026 - 10 - 28),
        },
    );
    assert!(state.registry.is_archived(&day));

    let result: Result<TransitionResult, CoreError> = apply(
        &state,
        decide(0, AppealDecision::Approved, ""),
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::AppealDayNotLive {
            day: failed_day,
            slot_index: 0,
        })) if failed_day == day
    ));
    assert_eq!(state.appeals.get(0).unwrap().status, AppealStatus::Pending);
    assert_eq!(state.notifications.unread_count(&alice()), 0);
}

#[test]
fn test_rejection_after_week_rolled_over_succeeds() {
    let (state, _) = state_with_pending_appeal();
    let state: State = apply_ok(
        &state,
        Command::RollOverWeek {
            today: date!(2026 - 10 - 28),
        },
    );

    let state: State = apply_ok(&state, decide(0, AppealDecision::Rejected, "Too late"));

    assert_eq!(state.appeals.get(0).unwrap().status, AppealStatus::Rejected);
    assert_eq!(state.notifications.unread_count(&alice()), 1);
}

#[test]
fn test_mark_notifications_read() {
    let (state, _) = state_with_pending_appeal();
    let state: State = apply_ok(&state, decide(0, AppealDecision::Approved, ""));

    let result: TransitionResult = apply(
        &state,
        Command::MarkNotificationsRead { username: alice() },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(result.new_state.notifications.unread_count(&alice()), 0);
    assert_eq!(
        result.audit_event.action.details.as_deref(),
        Some("Marked 1 notifications of 'alice' read")
    );
}
