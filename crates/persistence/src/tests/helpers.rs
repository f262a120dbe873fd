// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use shift_roster::State;
use shift_roster_domain::{
    Appeal, AppealDecision, DateKey, Employee, EmployeeProfile, EmployeeRole, Notification,
    NotificationCategory, Username,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use time::macros::{date, datetime, time};

/// Unique suffix per call so parallel tests never share a directory.
static DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Returns a fresh, not yet created directory under the system temp dir.
pub fn unique_temp_dir() -> PathBuf {
    let id: u64 = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir().join(format!(
        "shift_roster_persistence_{}_{id}",
        std::process::id()
    ))
}

fn employee(username: &str, first_name: &str, role: EmployeeRole) -> Employee {
    Employee::new(
        Username::new(username),
        EmployeeProfile {
            first_name: first_name.to_string(),
            last_name: String::from("Cohen"),
            email: format!("{username}@example.com"),
            ..EmployeeProfile::default()
        },
        role,
    )
}

/// A roster touching every stored collection:
/// - admin, alice and bob in the directory
/// - the week of 18 October 2026 live, with alice and bob on Sunday
///   morning and custom hours on Monday evening
/// - the previous week archived
/// - one rejected appeal by bob with its notification, one pending by alice
pub fn create_populated_state() -> State {
    let mut state: State = State::new();
    state
        .directory
        .add(employee("admin", "Dana", EmployeeRole::Administrator))
        .unwrap();
    state
        .directory
        .add(employee("alice", "Alice", EmployeeRole::Regular))
        .unwrap();
    state
        .directory
        .add(employee("bob", "Bob", EmployeeRole::Regular))
        .unwrap();

    state.registry.initialize_week(date!(2026 - 10 - 14)).unwrap();
    state.registry.archive_current_week();
    let days: Vec<DateKey> = state.registry.initialize_week(date!(2026 - 10 - 21)).unwrap();

    let alice: Username = Username::new("alice");
    let bob: Username = Username::new("bob");
    state.registry.assign(&days[0], 0, &alice).unwrap();
    state.registry.assign(&days[0], 0, &bob).unwrap();
    state
        .registry
        .update_slot_hours(&days[1], 1, time!(17:30), time!(23:00))
        .unwrap();

    state
        .appeals
        .submit(Appeal::new(
            bob.clone(),
            days[0],
            0,
            String::from("exam"),
            datetime!(2026-10-19 07:00 UTC),
        ))
        .unwrap();
    state
        .appeals
        .decide(
            0,
            AppealDecision::Rejected,
            String::from("no cover"),
            datetime!(2026-10-19 08:00 UTC),
        )
        .unwrap();
    state.notifications.push(Notification::new(
        bob,
        String::from("Your appeal was rejected."),
        NotificationCategory::AppealRejected,
        datetime!(2026-10-19 08:00 UTC),
    ));
    state
        .appeals
        .submit(Appeal::new(
            alice,
            days[0],
            0,
            String::from("wedding"),
            datetime!(2026-10-20 12:00 UTC),
        ))
        .unwrap();

    state
}
