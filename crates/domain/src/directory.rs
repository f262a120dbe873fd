// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee directory.

use crate::error::DomainError;
use crate::types::{Employee, EmployeeProfile, Username};
use crate::validation::validate_username;
use std::collections::BTreeMap;

/// All employee records, keyed by username.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Directory {
    employees: BTreeMap<Username, Employee>,
}

impl Directory {
    /// Creates an empty directory.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            employees: BTreeMap::new(),
        }
    }

    /// Registers an employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the username is invalid or already registered.
    pub fn add(&mut self, employee: Employee) -> Result<(), DomainError> {
        validate_username(&employee.username)?;

        if self.employees.contains_key(&employee.username) {
            return Err(DomainError::DuplicateUsername(employee.username));
        }

        self.employees.insert(employee.username.clone(), employee);
        Ok(())
    }

    /// Looks up an employee.
    #[must_use]
    pub fn get(&self, username: &Username) -> Option<&Employee> {
        self.employees.get(username)
    }

    /// Looks up an employee that must exist.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmployeeNotFound` if the username is unknown.
    pub fn require(&self, username: &Username) -> Result<&Employee, DomainError> {
        self.employees
            .get(username)
            .ok_or_else(|| DomainError::EmployeeNotFound(username.clone()))
    }

    /// Checks if a username is registered.
    #[must_use]
    pub fn contains(&self, username: &Username) -> bool {
        self.employees.contains_key(username)
    }

    /// Checks if a username belongs to an administrator.
    #[must_use]
    pub fn is_admin(&self, username: &Username) -> bool {
        self.employees.get(username).is_some_and(Employee::is_admin)
    }

    /// Replaces the profile fields of an employee. The role is unchanged.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmployeeNotFound` if the username is unknown.
    pub fn update_profile(
        &mut self,
        username: &Username,
        profile: EmployeeProfile,
    ) -> Result<(), DomainError> {
        let employee: &mut Employee = self
            .employees
            .get_mut(username)
            .ok_or_else(|| DomainError::EmployeeNotFound(username.clone()))?;
        employee.profile = profile;
        Ok(())
    }

    /// Deletes a regular employee and returns the removed record.
    ///
    /// Callers are responsible for removing the username from every shift
    /// first so that no slot refers to a deleted employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the username is unknown or is an administrator.
    pub fn remove(&mut self, username: &Username) -> Result<Employee, DomainError> {
        if self.require(username)?.is_admin() {
            return Err(DomainError::CannotRemoveAdministrator(username.clone()));
        }
        self.employees
            .remove(username)
            .ok_or_else(|| DomainError::EmployeeNotFound(username.clone()))
    }

    /// Iterates all employees in username order.
    pub fn iter(&self) -> impl Iterator<Item = &Employee> {
        self.employees.values()
    }

    /// Returns the regular (non-administrator) employees in username order.
    #[must_use]
    pub fn regular_employees(&self) -> Vec<&Employee> {
        self.employees.values().filter(|e| !e.is_admin()).collect()
    }

    /// Returns the number of registered employees.
    #[must_use]
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Returns whether the directory is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}
