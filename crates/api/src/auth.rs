// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.
//!
//! Authentication is a directory lookup: the caller names itself and the
//! name must belong to a registered employee. Credentials are not checked.

use shift_roster_audit::{Actor, ActorKind};
use shift_roster_domain::{Directory, Employee, Username};

use crate::error::AuthError;

/// Actor roles for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Administrators manage the schedule and the directory and decide
    /// appeals.
    ///
    /// Admins may perform:
    /// - week initialization, archival and roll-over
    /// - slot hour changes, assignments and removals
    /// - employee creation, profile edits and deletion
    /// - appeal decisions
    Admin,
    /// Regular employees read the schedule, file appeals against their
    /// own shifts and read their own notifications.
    Employee,
}

impl Role {
    /// Returns the role name used in authorization errors.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Employee => "Employee",
        }
    }
}

/// An authenticated actor with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The directory username of this actor.
    pub username: Username,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `username` - The directory username
    /// * `role` - The role assigned to this actor
    #[must_use]
    pub const fn new(username: Username, role: Role) -> Self {
        Self { username, role }
    }

    /// Returns whether this actor is an administrator.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    /// Converts this authenticated actor into an audit Actor.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        let kind: ActorKind = match self.role {
            Role::Admin => ActorKind::Administrator,
            Role::Employee => ActorKind::Employee,
        };
        Actor::new(self.username.to_string(), kind)
    }
}

/// Resolves a caller-supplied username against the directory.
///
/// # Errors
///
/// Returns `AuthError::AuthenticationFailed` if the username is blank or
/// unknown.
pub fn authenticate(directory: &Directory, username: &str) -> Result<AuthenticatedActor, AuthError> {
    let username: Username = Username::new(username);
    let employee: &Employee =
        directory
            .get(&username)
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: format!("Unknown user '{username}'"),
            })?;

    let role: Role = if employee.is_admin() {
        Role::Admin
    } else {
        Role::Employee
    };
    Ok(AuthenticatedActor::new(employee.username.clone(), role))
}

fn require_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
    match actor.role {
        Role::Admin => Ok(()),
        Role::Employee => Err(AuthError::Unauthorized {
            action: action.to_string(),
            required_role: Role::Admin.as_str().to_string(),
        }),
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor may change the shape of the live week
    /// (initialize, archive, roll over, slot hours).
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_manage_week(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        require_admin(actor, "manage_week")
    }

    /// Checks if an actor may assign employees to slots or remove them.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_manage_assignments(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        require_admin(actor, "manage_assignments")
    }

    /// Checks if an actor may add, edit or delete employees.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_manage_employees(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        require_admin(actor, "manage_employees")
    }

    /// Checks if an actor may decide appeals and see every appeal.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_review_appeals(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        require_admin(actor, "review_appeals")
    }

    /// Checks if an actor may read the audit trail and take backups.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_operate_service(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        require_admin(actor, "operate_service")
    }

    /// Checks if an actor may read data belonging to `owner`.
    ///
    /// Employees may read their own data; administrators may read anyone's.
    ///
    /// # Errors
    ///
    /// Returns an error if a regular employee asks for someone else's data.
    pub fn authorize_view_employee(
        actor: &AuthenticatedActor,
        owner: &Username,
    ) -> Result<(), AuthError> {
        if actor.is_admin() || &actor.username == owner {
            return Ok(());
        }
        Err(AuthError::Unauthorized {
            action: format!("view_employee:{owner}"),
            required_role: Role::Admin.as_str().to_string(),
        })
    }
}
