// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use shift_roster_audit::{AuditEvent, StateSnapshot};
use shift_roster_domain::{AppealLog, Directory, Notifications, ShiftRegistry};

/// The complete roster state.
///
/// One value is owned by the surrounding service and passed to every
/// operation; tests build their own.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct State {
    /// Employee records.
    pub directory: Directory,
    /// Live week and archive.
    pub registry: ShiftRegistry,
    /// Every appeal ever filed.
    pub appeals: AppealLog,
    /// Per-employee notifications.
    pub notifications: Notifications,
}

impl State {
    /// Creates an empty state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            directory: Directory::new(),
            registry: ShiftRegistry::new(),
            appeals: AppealLog::new(),
            notifications: Notifications::new(),
        }
    }

    /// Converts the state to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            employees: self.directory.len(),
            live_days: self.registry.live().len(),
            archived_days: self.registry.archive().len(),
            assignments: self.registry.assignment_count(),
            pending_appeals: self.appeals.pending().len(),
            notifications: self.notifications.total(),
        }
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: State,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}
