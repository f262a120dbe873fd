// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live week and archive of shift slots.
//!
//! The registry owns every [`ShiftSlot`]. The live week is the only part
//! that may be edited; archived days are independent snapshots.
//!
//! ## Invariants
//!
//! - An employee appears at most once across the slots of a live day
//! - Archive entries never share storage with live entries
//! - Reads prefer the archive: an archived day is never shown from live

use crate::calendar::{DateKey, month_keys, parse_weekday, week_keys};
use crate::error::DomainError;
use crate::slot::{ShiftSlot, SlotView, default_slots};
use crate::types::Username;
use crate::validation::validate_one_shift_per_day;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::{Date, Time};

/// One day of a schedule projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    /// The day.
    pub day: DateKey,
    /// Slot projections in slot-index order. Empty if nothing is recorded.
    pub slots: Vec<SlotView>,
}

/// Where a schedule read may look for data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadSource {
    ArchiveOnly,
    ArchiveThenLive,
}

/// The live week's slots plus the archive of past days.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShiftRegistry {
    live: BTreeMap<DateKey, Vec<ShiftSlot>>,
    archive: BTreeMap<DateKey, Vec<ShiftSlot>>,
}

impl ShiftRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            live: BTreeMap::new(),
            archive: BTreeMap::new(),
        }
    }

    /// Rebuilds a registry from stored slot data.
    ///
    /// # Errors
    ///
    /// Returns an error if any live day breaks the one-shift-per-day rule.
    pub fn restore(
        live: BTreeMap<DateKey, Vec<ShiftSlot>>,
        archive: BTreeMap<DateKey, Vec<ShiftSlot>>,
    ) -> Result<Self, DomainError> {
        for (day, slots) in &live {
            validate_one_shift_per_day(day, slots)?;
        }
        Ok(Self { live, archive })
    }

    /// Replaces the live week with the week containing `date`, each day
    /// seeded with the default slots.
    ///
    /// Unarchived live data is discarded.
    ///
    /// # Errors
    ///
    /// Returns an error if date arithmetic overflows.
    pub fn initialize_week(&mut self, date: Date) -> Result<Vec<DateKey>, DomainError> {
        let keys: Vec<DateKey> = week_keys(date, 0)?;
        self.live = keys.iter().map(|key| (*key, default_slots())).collect();
        Ok(keys)
    }

    /// Copies every live day into the archive under the same key.
    ///
    /// The live week is left in place. Returns the number of days copied.
    pub fn archive_current_week(&mut self) -> usize {
        for (day, slots) in &self.live {
            self.archive.insert(*day, slots.clone());
        }
        self.live.len()
    }

    /// Returns the live days and their slots.
    #[must_use]
    pub const fn live(&self) -> &BTreeMap<DateKey, Vec<ShiftSlot>> {
        &self.live
    }

    /// Returns the archived days and their slots.
    #[must_use]
    pub const fn archive(&self) -> &BTreeMap<DateKey, Vec<ShiftSlot>> {
        &self.archive
    }

    /// Returns the first live day, if a week has been initialized.
    #[must_use]
    pub fn live_week_start(&self) -> Option<Date> {
        self.live.keys().next().map(DateKey::date)
    }

    /// Checks if a day has been archived.
    #[must_use]
    pub fn is_archived(&self, day: &DateKey) -> bool {
        self.archive.contains_key(day)
    }

    /// Resolves a caller's day reference to a live day.
    ///
    /// Accepts a full label (`Sunday 18/10/2026`) or a bare weekday name
    /// (`Sunday`, any case), which names that weekday of the live week.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DayNotFound` if no live day matches.
    pub fn resolve_day(&self, reference: &str) -> Result<DateKey, DomainError> {
        if let Ok(key) = DateKey::parse(reference) {
            if self.live.contains_key(&key) {
                return Ok(key);
            }
            return Err(DomainError::DayNotFound(reference.to_string()));
        }

        parse_weekday(reference)
            .and_then(|weekday| self.live.keys().find(|key| key.weekday() == weekday))
            .copied()
            .ok_or_else(|| DomainError::DayNotFound(reference.to_string()))
    }

    /// Returns the slots of a live day.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DayNotFound` if the day is not live.
    pub fn slots(&self, day: &DateKey) -> Result<&[ShiftSlot], DomainError> {
        self.live
            .get(day)
            .map(Vec::as_slice)
            .ok_or_else(|| DomainError::DayNotFound(day.label()))
    }

    /// Returns one live slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the day is not live or the index is out of range.
    pub fn slot(&self, day: &DateKey, slot_index: usize) -> Result<&ShiftSlot, DomainError> {
        let slots: &[ShiftSlot] = self.slots(day)?;
        slots.get(slot_index).ok_or(DomainError::SlotNotFound {
            day: *day,
            slot_index,
            slot_count: slots.len(),
        })
    }

    fn slot_mut(&mut self, day: &DateKey, slot_index: usize) -> Result<&mut ShiftSlot, DomainError> {
        let slots: &mut Vec<ShiftSlot> = self
            .live
            .get_mut(day)
            .ok_or_else(|| DomainError::DayNotFound(day.label()))?;
        let slot_count: usize = slots.len();
        slots.get_mut(slot_index).ok_or(DomainError::SlotNotFound {
            day: *day,
            slot_index,
            slot_count,
        })
    }

    /// Returns the index of the slot `username` holds on `day`, if any.
    #[must_use]
    pub fn assigned_slot(&self, day: &DateKey, username: &Username) -> Option<usize> {
        self.live
            .get(day)?
            .iter()
            .position(|slot| slot.contains(username))
    }

    /// Checks whether `username` is free to take a slot on `day`.
    ///
    /// A day outside the live week is never available.
    #[must_use]
    pub fn is_available(&self, day: &DateKey, username: &Username) -> bool {
        self.live.contains_key(day) && self.assigned_slot(day, username).is_none()
    }

    /// Adds `username` to a live slot.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The day is not live or the slot index is out of range
    /// - The employee already holds a slot that day (including this one)
    pub fn assign(
        &mut self,
        day: &DateKey,
        slot_index: usize,
        username: &Username,
    ) -> Result<(), DomainError> {
        // Validate the target before looking at membership
        self.slot(day, slot_index)?;

        if let Some(existing) = self.assigned_slot(day, username) {
            return Err(DomainError::AlreadyAssigned {
                username: username.clone(),
                day: *day,
                slot_index: existing,
            });
        }

        self.slot_mut(day, slot_index)?.add_employee(username.clone());
        Ok(())
    }

    /// Removes `username` from a live slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the day or slot does not exist, or the employee
    /// is not a member. State is unchanged on error.
    pub fn unassign(
        &mut self,
        day: &DateKey,
        slot_index: usize,
        username: &Username,
    ) -> Result<(), DomainError> {
        if self.slot_mut(day, slot_index)?.remove_employee(username) {
            Ok(())
        } else {
            Err(DomainError::NotAssigned {
                username: username.clone(),
                day: *day,
                slot_index,
            })
        }
    }

    /// Removes `username` from every live slot. Returns how many slots
    /// referenced the employee.
    pub fn remove_employee_everywhere(&mut self, username: &Username) -> usize {
        self.live
            .values_mut()
            .flat_map(|slots| slots.iter_mut())
            .map(|slot| slot.remove_employee(username))
            .filter(|removed| *removed)
            .count()
    }

    /// Overwrites the interval of a live slot.
    ///
    /// No overlap check against sibling slots is made.
    ///
    /// # Errors
    ///
    /// Returns an error if the day is not live or the index is out of range.
    pub fn update_slot_hours(
        &mut self,
        day: &DateKey,
        slot_index: usize,
        start: Time,
        end: Time,
    ) -> Result<(), DomainError> {
        self.slot_mut(day, slot_index)?.set_hours(start, end);
        Ok(())
    }

    /// Total number of (slot, employee) memberships in the live week.
    #[must_use]
    pub fn assignment_count(&self) -> usize {
        self.live
            .values()
            .flat_map(|slots| slots.iter())
            .map(|slot| slot.employees().len())
            .sum()
    }

    /// Projects the live week regardless of the calendar.
    #[must_use]
    pub fn live_schedule(&self) -> Vec<DaySchedule> {
        self.live
            .iter()
            .map(|(day, slots)| DaySchedule {
                day: *day,
                slots: slots.iter().map(ShiftSlot::view).collect(),
            })
            .collect()
    }

    /// Projects the week `week_offset` weeks before the week of `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if date arithmetic overflows.
    pub fn weekly_schedule(
        &self,
        today: Date,
        week_offset: u32,
    ) -> Result<Vec<DaySchedule>, DomainError> {
        let keys: Vec<DateKey> = week_keys(today, week_offset)?;
        Ok(self.project(&keys, Self::source_for_offset(week_offset)))
    }

    /// Projects the month `month_offset` months before the month of `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if date arithmetic overflows.
    pub fn monthly_schedule(
        &self,
        today: Date,
        month_offset: u32,
    ) -> Result<Vec<DaySchedule>, DomainError> {
        let keys: Vec<DateKey> = month_keys(today, month_offset)?;
        Ok(self.project(&keys, Self::source_for_offset(month_offset)))
    }

    const fn source_for_offset(offset: u32) -> ReadSource {
        if offset == 0 {
            ReadSource::ArchiveThenLive
        } else {
            ReadSource::ArchiveOnly
        }
    }

    fn project(&self, keys: &[DateKey], source: ReadSource) -> Vec<DaySchedule> {
        keys.iter()
            .map(|day| {
                let slots: Option<&Vec<ShiftSlot>> = match source {
                    ReadSource::ArchiveOnly => self.archive.get(day),
                    ReadSource::ArchiveThenLive => {
                        self.archive.get(day).or_else(|| self.live.get(day))
                    }
                };
                DaySchedule {
                    day: *day,
                    slots: slots
                        .map(|slots| slots.iter().map(ShiftSlot::view).collect())
                        .unwrap_or_default(),
                }
            })
            .collect()
    }
}
