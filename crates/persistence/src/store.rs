// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use shift_roster::State;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use tracing::{debug, info};

use crate::error::PersistenceError;
use crate::record::SystemRecord;

const BACKUP_STAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[year][month][day]_[hour][minute][second]");

/// A roster stored as one pretty-printed JSON document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Creates a store backed by `path`. Nothing is touched until the
    /// first save or load.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the data file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the state, replacing the previous file in one rename.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be encoded or the file cannot
    /// be written.
    pub fn save(&self, state: &State) -> Result<(), PersistenceError> {
        let json: String = serde_json::to_string_pretty(&SystemRecord::from_state(state))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| PersistenceError::io(parent, e))?;
        }

        let staging: PathBuf = self.path.with_extension("json.tmp");
        fs::write(&staging, json).map_err(|e| PersistenceError::io(&staging, e))?;
        fs::rename(&staging, &self.path).map_err(|e| PersistenceError::io(&self.path, e))?;

        debug!(path = %self.path.display(), "Saved roster state");
        Ok(())
    }

    /// Reads the state back.
    ///
    /// Returns `Ok(None)` when the file does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// describes an invalid roster.
    pub fn load(&self) -> Result<Option<State>, PersistenceError> {
        let json: String = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "No stored roster found");
                return Ok(None);
            }
            Err(e) => return Err(PersistenceError::io(&self.path, e)),
        };

        let record: SystemRecord = serde_json::from_str(&json)?;
        let state: State = record.into_state()?;

        info!(
            path = %self.path.display(),
            employees = state.directory.len(),
            live_days = state.registry.live().len(),
            appeals = state.appeals.len(),
            "Loaded roster state"
        );
        Ok(Some(state))
    }

    /// Writes a timestamped copy of the state into `backup_dir`.
    ///
    /// The file is named `backup_YYYYmmdd_HHMMSS.json` after `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn backup(
        state: &State,
        backup_dir: &Path,
        now: OffsetDateTime,
    ) -> Result<PathBuf, PersistenceError> {
        let stamp: String = now.format(BACKUP_STAMP)?;
        let target: PathBuf = backup_dir.join(format!("backup_{stamp}.json"));

        Self::new(target.clone()).save(state)?;

        info!(path = %target.display(), "Wrote roster backup");
        Ok(target)
    }
}
