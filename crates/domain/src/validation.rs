// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calendar::DateKey;
use crate::error::DomainError;
use crate::slot::ShiftSlot;
use crate::types::Username;
use std::collections::HashSet;

/// Validates that a username is usable as a directory key.
///
/// # Errors
///
/// Returns an error if:
/// - The username is empty
/// - The username contains whitespace
pub fn validate_username(username: &Username) -> Result<(), DomainError> {
    // Rule: username must not be empty
    if username.as_str().is_empty() {
        return Err(DomainError::InvalidUsername(String::from(
            "Username cannot be empty",
        )));
    }

    // Rule: username must be a single token
    if username.as_str().chars().any(char::is_whitespace) {
        return Err(DomainError::InvalidUsername(format!(
            "Username '{username}' cannot contain whitespace"
        )));
    }

    Ok(())
}

/// Validates the one-shift-per-day rule over one day's slots.
///
/// This function is pure and is used when slot data enters the registry
/// from outside (for example, when restoring persisted state).
///
/// # Errors
///
/// Returns `DomainError::AlreadyAssigned` for the first employee found in
/// more than one slot of the day.
pub fn validate_one_shift_per_day(day: &DateKey, slots: &[ShiftSlot]) -> Result<(), DomainError> {
    let mut seen: HashSet<&Username> = HashSet::new();

    for slot in slots {
        // Slots deduplicate their own members, so a repeat here means a
        // second slot on the same day.
        for username in slot.employees() {
            if !seen.insert(username) {
                let first_slot: usize = slots
                    .iter()
                    .position(|s| s.contains(username))
                    .unwrap_or_default();
                return Err(DomainError::AlreadyAssigned {
                    username: username.clone(),
                    day: *day,
                    slot_index: first_slot,
                });
            }
        }
    }

    Ok(())
}
