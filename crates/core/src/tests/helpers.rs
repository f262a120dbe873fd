// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, State, TransitionResult, apply};
use shift_roster_audit::{Actor, ActorKind, Cause};
use shift_roster_domain::{DateKey, Employee, EmployeeProfile, EmployeeRole, Username};
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("admin"), ActorKind::Administrator)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Admin request"))
}

/// Wednesday 21 October 2026.
pub fn test_today() -> Date {
    date!(2026 - 10 - 21)
}

pub fn test_instant() -> OffsetDateTime {
    datetime!(2026-10-21 09:00 UTC)
}

pub fn alice() -> Username {
    Username::new("alice")
}

pub fn bob() -> Username {
    Username::new("bob")
}

fn employee(username: &str, first_name: &str, role: EmployeeRole) -> Employee {
    Employee::new(
        Username::new(username),
        EmployeeProfile {
            first_name: first_name.to_string(),
            ..EmployeeProfile::default()
        },
        role,
    )
}

/// An administrator, two regular employees and an initialized week.
pub fn create_test_state() -> State {
    let mut state: State = State::new();
    state
        .directory
        .add(employee("admin", "Admin", EmployeeRole::Administrator))
        .unwrap();
    state
        .directory
        .add(employee("alice", "Alice", EmployeeRole::Regular))
        .unwrap();
    state
        .directory
        .add(employee("bob", "Bob", EmployeeRole::Regular))
        .unwrap();
    state.registry.initialize_week(test_today()).unwrap();
    state
}

pub fn sunday(state: &State) -> DateKey {
    state.registry.resolve_day("Sunday").unwrap()
}

/// Applies a command that is expected to succeed and returns the new state.
pub fn apply_ok(state: &State, command: Command) -> State {
    let result: TransitionResult =
        apply(state, command, create_test_actor(), create_test_cause()).unwrap();
    result.new_state
}

pub fn assign(state: &State, day: DateKey, slot_index: usize, username: Username) -> State {
    apply_ok(
        state,
        Command::AssignEmployee {
            day,
            slot_index,
            username,
        },
    )
}
