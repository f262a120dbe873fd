// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use shift_roster::State;
use shift_roster_audit::Cause;
use shift_roster_domain::{Employee, EmployeeProfile, EmployeeRole, FixedClock, Username};
use time::macros::{date, datetime};

use crate::{ApiResult, AuthenticatedActor, CommandResponse, Role, SlotAssignmentRequest};

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(Username::new("admin"), Role::Admin)
}

pub fn create_test_employee(username: &str) -> AuthenticatedActor {
    AuthenticatedActor::new(Username::new(username), Role::Employee)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

/// Wednesday 21 October 2026, 12:00 in Jerusalem.
pub fn create_test_clock() -> FixedClock {
    FixedClock::new(datetime!(2026-10-21 09:00 UTC))
}

fn employee(username: &str, first_name: &str, last_name: &str, role: EmployeeRole) -> Employee {
    Employee::new(
        Username::new(username),
        EmployeeProfile {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            ..EmployeeProfile::default()
        },
        role,
    )
}

/// An administrator, alice and bob, and the week of 18 October 2026.
pub fn create_test_state() -> State {
    let mut state: State = State::new();
    for record in [
        employee("admin", "", "", EmployeeRole::Administrator),
        employee("alice", "Alice", "Levi", EmployeeRole::Regular),
        employee("bob", "Bob", "Katz", EmployeeRole::Regular),
    ] {
        state.directory.add(record).unwrap();
    }
    state.registry.initialize_week(date!(2026 - 10 - 21)).unwrap();
    state
}

pub fn slot_request(day: &str, slot_index: usize, username: &str) -> SlotAssignmentRequest {
    SlotAssignmentRequest {
        day: day.to_string(),
        slot_index,
        username: username.to_string(),
    }
}

/// Assigns `username` as the admin and returns the committed state.
pub fn assign_as_admin(state: &State, day: &str, slot_index: usize, username: &str) -> State {
    let result: ApiResult<CommandResponse> = crate::assign_employee(
        state,
        &slot_request(day, slot_index, username),
        &create_test_admin(),
        create_test_cause(),
    )
    .unwrap();
    result.new_state
}
