// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ActiveAppeal, Appeal, AppealDecision, AppealLog, AppealStatus, DateKey, DomainError, Username,
};
use std::str::FromStr;
use time::OffsetDateTime;
use time::macros::{date, datetime};

fn sunday() -> DateKey {
    DateKey::new(date!(2026 - 10 - 18))
}

fn filed_at() -> OffsetDateTime {
    datetime!(2026-10-17 09:00 UTC)
}

fn decided_at() -> OffsetDateTime {
    datetime!(2026-10-17 12:00 UTC)
}

fn appeal_for(username: &str, slot_index: usize) -> Appeal {
    Appeal::new(
        Username::new(username),
        sunday(),
        slot_index,
        String::from("Family event"),
        filed_at(),
    )
}

#[test]
fn test_pending_can_move_to_terminal_states() {
    assert!(
        AppealStatus::Pending
            .validate_transition(AppealStatus::Approved)
            .is_ok()
    );
    assert!(
        AppealStatus::Pending
            .validate_transition(AppealStatus::Rejected)
            .is_ok()
    );
}

#[test]
fn test_invalid_transitions_are_rejected() {
    assert!(
        AppealStatus::Pending
            .validate_transition(AppealStatus::Pending)
            .is_err()
    );
    assert!(
        AppealStatus::Approved
            .validate_transition(AppealStatus::Rejected)
            .is_err()
    );
    assert!(
        AppealStatus::Rejected
            .validate_transition(AppealStatus::Approved)
            .is_err()
    );
}

#[test]
fn test_status_and_decision_parsing() {
    assert_eq!(
        AppealStatus::from_str("rejected").unwrap(),
        AppealStatus::Rejected
    );
    assert!(AppealStatus::from_str("cancelled").is_err());

    assert_eq!(
        AppealDecision::from_str("Approved").unwrap(),
        AppealDecision::Approved
    );
    assert_eq!(
        AppealDecision::from_str(" reject ").unwrap(),
        AppealDecision::Rejected
    );
    assert!(matches!(
        AppealDecision::from_str("maybe"),
        Err(DomainError::InvalidAppealDecision(_))
    ));
}

#[test]
fn test_submit_appends_pending_appeal() {
    let mut log: AppealLog = AppealLog::new();

    let index: usize = log.submit(appeal_for("alice", 0)).unwrap();

    assert_eq!(index, 0);
    assert_eq!(log.len(), 1);
    assert_eq!(log.get(0).unwrap().status, AppealStatus::Pending);
    assert_eq!(
        log.active_appeal(&Username::new("alice"), &sunday(), 0),
        Some(ActiveAppeal {
            status: AppealStatus::Pending,
            response: None,
        })
    );
}

#[test]
fn test_duplicate_pending_appeal_fails() {
    let mut log: AppealLog = AppealLog::new();
    log.submit(appeal_for("alice", 0)).unwrap();

    let result: Result<usize, DomainError> = log.submit(appeal_for("alice", 0));

    assert!(matches!(result, Err(DomainError::DuplicateAppeal { .. })));
    assert_eq!(log.len(), 1);
}

#[test]
fn test_other_slot_or_employee_is_independent() {
    let mut log: AppealLog = AppealLog::new();
    log.submit(appeal_for("alice", 0)).unwrap();

    assert_eq!(log.submit(appeal_for("alice", 1)).unwrap(), 1);
    assert_eq!(log.submit(appeal_for("bob", 0)).unwrap(), 2);
}

#[test]
fn test_rejected_appeal_blocks_resubmission() {
    let mut log: AppealLog = AppealLog::new();
    log.submit(appeal_for("alice", 0)).unwrap();
    log.decide(
        0,
        AppealDecision::Rejected,
        String::from("Short staffed"),
        decided_at(),
    )
    .unwrap();

    let result: Result<usize, DomainError> = log.submit(appeal_for("alice", 0));

    match result {
        Err(DomainError::AppealPreviouslyRejected { response, .. }) => {
            assert_eq!(response.as_deref(), Some("Short staffed"));
        }
        other => panic!("expected AppealPreviouslyRejected, got {other:?}"),
    }
}

#[test]
fn test_approved_appeal_does_not_block_at_log_level() {
    let mut log: AppealLog = AppealLog::new();
    log.submit(appeal_for("alice", 0)).unwrap();
    log.decide(0, AppealDecision::Approved, String::new(), decided_at())
        .unwrap();

    assert!(
        log.active_appeal(&Username::new("alice"), &sunday(), 0)
            .is_none()
    );
    assert_eq!(log.submit(appeal_for("alice", 0)).unwrap(), 1);
}

#[test]
fn test_decide_records_response_and_time() {
    let mut log: AppealLog = AppealLog::new();
    log.submit(appeal_for("alice", 0)).unwrap();

    let decided: &Appeal = log
        .decide(
            0,
            AppealDecision::Approved,
            String::from("OK"),
            decided_at(),
        )
        .unwrap();

    assert_eq!(decided.status, AppealStatus::Approved);
    assert_eq!(decided.response.as_deref(), Some("OK"));
    assert_eq!(decided.decided_at, Some(decided_at()));
}

#[test]
fn test_decide_twice_fails_without_change() {
    let mut log: AppealLog = AppealLog::new();
    log.submit(appeal_for("alice", 0)).unwrap();
    log.decide(0, AppealDecision::Approved, String::new(), decided_at())
        .unwrap();
    let before: AppealLog = log.clone();

    let result = log.decide(
        0,
        AppealDecision::Rejected,
        String::from("No"),
        decided_at(),
    );

    assert!(matches!(
        result,
        Err(DomainError::InvalidAppealTransition { .. })
    ));
    assert_eq!(log, before);
}

#[test]
fn test_decide_unknown_index_fails() {
    let mut log: AppealLog = AppealLog::new();

    assert!(matches!(
        log.decide(3, AppealDecision::Approved, String::new(), decided_at()),
        Err(DomainError::AppealNotFound(3))
    ));
}

#[test]
fn test_pending_and_for_employee_keep_indices() {
    let mut log: AppealLog = AppealLog::new();
    log.submit(appeal_for("alice", 0)).unwrap();
    log.submit(appeal_for("bob", 1)).unwrap();
    log.submit(appeal_for("alice", 1)).unwrap();
    log.decide(0, AppealDecision::Rejected, String::new(), decided_at())
        .unwrap();

    let pending: Vec<usize> = log.pending().iter().map(|(index, _)| *index).collect();
    assert_eq!(pending, vec![1, 2]);

    let alice: Vec<usize> = log
        .for_employee(&Username::new("alice"))
        .iter()
        .map(|(index, _)| *index)
        .collect();
    assert_eq!(alice, vec![0, 2]);
}
