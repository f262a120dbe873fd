// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use serde::Serialize;
use shift_roster_domain::DateKey;

#[cfg(test)]
mod tests;

/// The kind of entity behind an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    /// A signed-in administrator.
    Administrator,
    /// A signed-in regular employee.
    Employee,
    /// The service itself (bootstrap, scheduled roll-over).
    System,
}

impl ActorKind {
    /// Returns the string tag of this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Administrator => "administrator",
            Self::Employee => "employee",
            Self::System => "system",
        }
    }
}

/// Represents the entity performing an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Actor {
    /// The username, or a fixed name for system actors.
    pub id: String,
    /// What kind of entity this is.
    pub kind: ActorKind,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The username or system name
    /// * `kind` - The kind of actor
    #[must_use]
    pub const fn new(id: String, kind: ActorKind) -> Self {
        Self { id, kind }
    }

    /// Creates the actor used for work the service does on its own.
    #[must_use]
    pub fn system() -> Self {
        Self::new(String::from("system"), ActorKind::System)
    }
}

/// Represents the reason or trigger for an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cause {
    /// A request or event identifier.
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - The request or event identifier
    /// * `description` - What triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// The change that was made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    /// The name of the action (e.g., "`AssignEmployee`", "`DecideAppeal`").
    pub name: String,
    /// Optional human-readable details.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// Aggregate counts describing the roster at one moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StateSnapshot {
    /// Registered employees, administrators included.
    pub employees: usize,
    /// Days in the live week.
    pub live_days: usize,
    /// Days in the archive.
    pub archived_days: usize,
    /// (slot, employee) memberships across the live week.
    pub assignments: usize,
    /// Appeals waiting for a decision.
    pub pending_appeals: usize,
    /// Stored notifications, read or not.
    pub notifications: usize,
}

impl std::fmt::Display for StateSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "employees={} live_days={} archived_days={} assignments={} pending_appeals={} notifications={}",
            self.employees,
            self.live_days,
            self.archived_days,
            self.assignments,
            self.pending_appeals,
            self.notifications
        )
    }
}

/// An immutable record of one successful state transition.
///
/// Every successful command produces exactly one event. Failed commands
/// produce none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEvent {
    /// Who initiated the change.
    pub actor: Actor,
    /// Why it was initiated.
    pub cause: Cause,
    /// What was done.
    pub action: Action,
    /// Roster summary before the transition.
    pub before: StateSnapshot,
    /// Roster summary after the transition.
    pub after: StateSnapshot,
    /// The day the change touched, for day-scoped commands.
    pub day: Option<DateKey>,
}

impl AuditEvent {
    /// Creates an event that is not tied to a single day.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The state before the transition
    /// * `after` - The state after the transition
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            actor,
            cause,
            action,
            before,
            after,
            day: None,
        }
    }

    /// Creates an event scoped to one day.
    #[must_use]
    pub const fn for_day(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
        day: DateKey,
    ) -> Self {
        Self {
            actor,
            cause,
            action,
            before,
            after,
            day: Some(day),
        }
    }
}
