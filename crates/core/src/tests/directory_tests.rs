// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    alice, apply_ok, assign, create_test_actor, create_test_cause, create_test_state, sunday,
};
use crate::{Command, CoreError, State, TransitionResult, apply};
use shift_roster_domain::{
    DateKey, DomainError, Employee, EmployeeProfile, EmployeeRole, Username,
};

fn profile(first_name: &str, last_name: &str) -> EmployeeProfile {
    EmployeeProfile {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        ..EmployeeProfile::default()
    }
}

#[test]
fn test_add_employee_with_blank_username_derives_it() {
    let state: State = create_test_state();

    let state: State = apply_ok(
        &state,
        Command::AddEmployee {
            employee: Employee::new(
                Username::new(""),
                profile("Dana", "Cohen"),
                EmployeeRole::Regular,
            ),
        },
    );

    let dana: &Employee = state.directory.require(&Username::new("Dana_Cohen")).unwrap();
    assert_eq!(dana.display_name(), "Dana Cohen");
}

#[test]
fn test_add_employee_without_any_name_fails() {
    let state: State = create_test_state();

    let result: Result<TransitionResult, CoreError> = apply(
        &state,
        Command::AddEmployee {
            employee: Employee::new(
                Username::new(""),
                EmployeeProfile::default(),
                EmployeeRole::Regular,
            ),
        },
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidUsername(_)))
    ));
}

#[test]
fn test_add_duplicate_employee_fails() {
    let state: State = create_test_state();

    let result: Result<TransitionResult, CoreError> = apply(
        &state,
        Command::AddEmployee {
            employee: Employee::new(alice(), profile("Other", "Alice"), EmployeeRole::Regular),
        },
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::DuplicateUsername(_)))
    ));
}

#[test]
fn test_update_employee_profile() {
    let state: State = create_test_state();

    let state: State = apply_ok(
        &state,
        Command::UpdateEmployee {
            username: alice(),
            profile: profile("Alice", "Levi"),
        },
    );

    assert_eq!(
        state.directory.require(&alice()).unwrap().display_name(),
        "Alice Levi"
    );
}

#[test]
fn test_remove_employee_cascades_to_shifts() {
    let state: State = create_test_state();
    let day: DateKey = sunday(&state);
    let state: State = assign(&state, day, 1, alice());

    let result: TransitionResult = apply(
        &state,
        Command::RemoveEmployee { username: alice() },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert!(!result.new_state.directory.contains(&alice()));
    assert_eq!(result.new_state.registry.assignment_count(), 0);
    assert_eq!(result.audit_event.before.employees, 3);
    assert_eq!(result.audit_event.after.employees, 2);
}

#[test]
fn test_remove_administrator_fails_and_leaves_shifts() {
    let state: State = create_test_state();
    let day: DateKey = sunday(&state);
    let state: State = assign(&state, day, 0, Username::new("admin"));

    let result: Result<TransitionResult, CoreError> = apply(
        &state,
        Command::RemoveEmployee {
            username: Username::new("admin"),
        },
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::CannotRemoveAdministrator(_)
        ))
    ));
    assert_eq!(state.registry.assignment_count(), 1);
}
