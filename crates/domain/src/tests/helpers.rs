// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DateKey, Employee, EmployeeProfile, EmployeeRole, ShiftRegistry, Username};
use time::Date;
use time::macros::date;

/// Wednesday 21 October 2026; its week runs Sunday 18 to Saturday 24.
pub fn test_today() -> Date {
    date!(2026 - 10 - 21)
}

pub fn create_test_registry() -> (ShiftRegistry, Vec<DateKey>) {
    let mut registry: ShiftRegistry = ShiftRegistry::new();
    let keys: Vec<DateKey> = registry.initialize_week(test_today()).unwrap();
    (registry, keys)
}

pub fn create_test_employee(username: &str) -> Employee {
    Employee::new(
        Username::new(username),
        EmployeeProfile {
            first_name: String::from("Test"),
            last_name: String::from("Employee"),
            ..EmployeeProfile::default()
        },
        EmployeeRole::Regular,
    )
}

pub fn create_test_admin(username: &str) -> Employee {
    Employee::new(
        Username::new(username),
        EmployeeProfile::default(),
        EmployeeRole::Administrator,
    )
}
