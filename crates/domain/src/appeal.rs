// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Appeal status tracking and transition logic.
//!
//! An appeal is an employee's request to be taken off a shift they hold.
//! Appeals move `pending -> approved` or `pending -> rejected` exactly once
//! and are never deleted; the log doubles as an audit trail.

use crate::calendar::DateKey;
use crate::error::DomainError;
use crate::types::Username;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Appeal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppealStatus {
    /// Waiting for an administrator decision
    Pending,
    /// Approved; the employee was taken off the shift
    Approved,
    /// Rejected; the assignment stands
    Rejected,
}

impl AppealStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Returns true if no further transition is possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Validates a transition from this status to `target`.
    ///
    /// # Errors
    ///
    /// Returns an error unless this status is pending and `target` is terminal.
    pub fn validate_transition(&self, target: Self) -> Result<(), DomainError> {
        if matches!(self, Self::Pending) && target.is_terminal() {
            return Ok(());
        }
        Err(DomainError::InvalidAppealTransition {
            from: self.as_str().to_string(),
            to: target.as_str().to_string(),
        })
    }
}

impl FromStr for AppealStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidAppealStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for AppealStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An administrator's decision on a pending appeal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppealDecision {
    /// Take the employee off the shift.
    Approved,
    /// Keep the assignment.
    Rejected,
}

impl AppealDecision {
    /// Returns the status an appeal ends in after this decision.
    #[must_use]
    pub const fn status(&self) -> AppealStatus {
        match self {
            Self::Approved => AppealStatus::Approved,
            Self::Rejected => AppealStatus::Rejected,
        }
    }

    /// Returns the string representation of the decision.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.status().as_str()
    }
}

impl FromStr for AppealDecision {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "approved" | "approve" => Ok(Self::Approved),
            "rejected" | "reject" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidAppealDecision(s.to_string())),
        }
    }
}

/// An employee's appeal against one slot assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appeal {
    /// The appealing employee.
    pub employee: Username,
    /// The day of the contested slot.
    pub day: DateKey,
    /// The index of the contested slot.
    pub slot_index: usize,
    /// Free-text reason given by the employee.
    pub reason: String,
    /// Current status.
    pub status: AppealStatus,
    /// The administrator's response, set on decision.
    pub response: Option<String>,
    /// When the appeal was filed.
    pub created_at: OffsetDateTime,
    /// When the appeal was decided.
    pub decided_at: Option<OffsetDateTime>,
}

impl Appeal {
    /// Creates a pending appeal.
    #[must_use]
    pub const fn new(
        employee: Username,
        day: DateKey,
        slot_index: usize,
        reason: String,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            employee,
            day,
            slot_index,
            reason,
            status: AppealStatus::Pending,
            response: None,
            created_at,
            decided_at: None,
        }
    }

    /// Checks if this appeal is about the given employee, day and slot.
    #[must_use]
    pub fn concerns(&self, employee: &Username, day: &DateKey, slot_index: usize) -> bool {
        &self.employee == employee && &self.day == day && self.slot_index == slot_index
    }
}

/// The standing appeal for an (employee, day, slot) triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveAppeal {
    /// Pending or rejected.
    pub status: AppealStatus,
    /// The administrator's response when rejected.
    pub response: Option<String>,
}

/// Every appeal ever filed, in filing order. Indices are stable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppealLog {
    appeals: Vec<Appeal>,
}

impl AppealLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            appeals: Vec::new(),
        }
    }

    /// Rebuilds a log from stored appeals, keeping their order.
    #[must_use]
    pub const fn from_appeals(appeals: Vec<Appeal>) -> Self {
        Self { appeals }
    }

    /// Returns all appeals in filing order.
    #[must_use]
    pub fn all(&self) -> &[Appeal] {
        &self.appeals
    }

    /// Returns the appeal at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Appeal> {
        self.appeals.get(index)
    }

    /// Returns the number of appeals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.appeals.len()
    }

    /// Returns whether no appeal was ever filed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.appeals.is_empty()
    }

    /// Returns the pending or rejected appeal for a triple, if any.
    ///
    /// A pending appeal takes precedence over an older rejection.
    #[must_use]
    pub fn active_appeal(
        &self,
        employee: &Username,
        day: &DateKey,
        slot_index: usize,
    ) -> Option<ActiveAppeal> {
        let with_status = |status: AppealStatus| {
            self.appeals.iter().rev().find(|appeal| {
                appeal.status == status && appeal.concerns(employee, day, slot_index)
            })
        };

        with_status(AppealStatus::Pending)
            .or_else(|| with_status(AppealStatus::Rejected))
            .map(|appeal| ActiveAppeal {
                status: appeal.status,
                response: appeal.response.clone(),
            })
    }

    /// Appends a new pending appeal and returns its index.
    ///
    /// Whether the employee holds the slot is checked by the caller, which
    /// owns the registry.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A pending appeal exists for the same triple
    /// - An appeal for the same triple was rejected
    pub fn submit(&mut self, appeal: Appeal) -> Result<usize, DomainError> {
        if let Some(active) = self.active_appeal(&appeal.employee, &appeal.day, appeal.slot_index) {
            return Err(match active.status {
                AppealStatus::Rejected => DomainError::AppealPreviouslyRejected {
                    username: appeal.employee,
                    day: appeal.day,
                    slot_index: appeal.slot_index,
                    response: active.response,
                },
                AppealStatus::Pending | AppealStatus::Approved => DomainError::DuplicateAppeal {
                    username: appeal.employee,
                    day: appeal.day,
                    slot_index: appeal.slot_index,
                },
            });
        }

        self.appeals.push(appeal);
        Ok(self.appeals.len() - 1)
    }

    /// Records a decision on a pending appeal.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is unknown or the appeal was already
    /// decided. The log is unchanged on error.
    pub fn decide(
        &mut self,
        index: usize,
        decision: AppealDecision,
        response: String,
        decided_at: OffsetDateTime,
    ) -> Result<&Appeal, DomainError> {
        let appeal: &mut Appeal = self
            .appeals
            .get_mut(index)
            .ok_or(DomainError::AppealNotFound(index))?;

        appeal.status.validate_transition(decision.status())?;

        appeal.status = decision.status();
        appeal.response = Some(response);
        appeal.decided_at = Some(decided_at);
        Ok(appeal)
    }

    /// Returns pending appeals with their indices, in filing order.
    #[must_use]
    pub fn pending(&self) -> Vec<(usize, &Appeal)> {
        self.appeals
            .iter()
            .enumerate()
            .filter(|(_, appeal)| appeal.status == AppealStatus::Pending)
            .collect()
    }

    /// Returns an employee's appeals with their indices, in filing order.
    #[must_use]
    pub fn for_employee(&self, employee: &Username) -> Vec<(usize, &Appeal)> {
        self.appeals
            .iter()
            .enumerate()
            .filter(|(_, appeal)| &appeal.employee == employee)
            .collect()
    }
}
