// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// Represents an employee's username.
///
/// The username is the sole identifier for an employee. Every other
/// component refers to employees by username and never embeds the record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Creates a new `Username`, trimming surrounding whitespace.
    ///
    /// # Arguments
    ///
    /// * `value` - The username value
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_string())
    }

    /// Derives a username from first and last name as `first_last`.
    ///
    /// Inner whitespace is replaced with underscores.
    #[must_use]
    pub fn from_names(first_name: &str, last_name: &str) -> Self {
        let joined: String = format!("{}_{}", first_name.trim(), last_name.trim());
        let normalized: String = joined
            .split_whitespace()
            .collect::<Vec<&str>>()
            .join("_");
        Self(normalized)
    }

    /// Returns the username value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An employee's role in the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeRole {
    /// A regular employee who can be scheduled and can file appeals.
    #[default]
    Regular,
    /// An administrator who edits the schedule and decides appeals.
    Administrator,
}

impl EmployeeRole {
    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Administrator => "administrator",
        }
    }

    /// Maps the persisted `is_admin` flag to a role.
    #[must_use]
    pub const fn from_admin_flag(is_admin: bool) -> Self {
        if is_admin {
            Self::Administrator
        } else {
            Self::Regular
        }
    }
}

/// Editable profile fields of an employee.
///
/// Missing fields deserialize as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeeProfile {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// National ID number.
    pub id_number: String,
    /// Internal employee number.
    pub employee_number: String,
}

/// An employee record owned by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// The employee's unique username.
    pub username: Username,
    /// Profile fields.
    pub profile: EmployeeProfile,
    /// The employee's role.
    pub role: EmployeeRole,
}

impl Employee {
    /// Creates a new employee.
    ///
    /// # Arguments
    ///
    /// * `username` - The unique username
    /// * `profile` - The profile fields
    /// * `role` - The directory role
    #[must_use]
    pub const fn new(username: Username, profile: EmployeeProfile, role: EmployeeRole) -> Self {
        Self {
            username,
            profile,
            role,
        }
    }

    /// Returns whether this employee is an administrator.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, EmployeeRole::Administrator)
    }

    /// Returns "first last", falling back to the username when both are blank.
    #[must_use]
    pub fn display_name(&self) -> String {
        let name: String = format!("{} {}", self.profile.first_name, self.profile.last_name)
            .trim()
            .to_string();
        if name.is_empty() {
            self.username.to_string()
        } else {
            name
        }
    }
}
