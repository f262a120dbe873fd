// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Process-wide roster state and the startup sequence.

use shift_roster::{Command, CoreError, State, TransitionResult, apply};
use shift_roster_api::{translate_core_error, translate_domain_error};
use shift_roster_audit::{Actor, AuditEvent, Cause};
use shift_roster_domain::{
    Clock, Employee, EmployeeProfile, EmployeeRole, Username, current_date,
};
use shift_roster_persistence::{JsonStore, PersistenceError};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use time::Date;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::error::HttpError;

/// How many audit events the server keeps before dropping the oldest.
pub const AUDIT_LOG_CAPACITY: usize = 10_000;

/// Everything guarded by the single writer lock.
#[derive(Debug)]
pub struct ServerState {
    /// The committed roster.
    pub state: State,
    audit_log: VecDeque<AuditEvent>,
    store: Option<JsonStore>,
    next_request: u64,
}

impl ServerState {
    /// Wraps a prepared roster and its optional data file.
    #[must_use]
    pub const fn new(state: State, store: Option<JsonStore>) -> Self {
        Self {
            state,
            audit_log: VecDeque::new(),
            store,
            next_request: 0,
        }
    }

    /// Issues the cause for the next request.
    pub fn next_cause(&mut self, description: &str) -> Cause {
        self.next_request += 1;
        Cause::new(format!("req-{}", self.next_request), description.to_string())
    }

    /// Saves and then installs a new state.
    ///
    /// The in-memory state only changes once the store accepted the write.
    ///
    /// # Errors
    ///
    /// Returns an error if the data file cannot be written.
    pub fn commit(&mut self, new_state: State, event: AuditEvent) -> Result<(), PersistenceError> {
        if let Some(store) = &self.store {
            store.save(&new_state)?;
        }

        info!(
            action = %event.action.name,
            actor = %event.actor.id,
            after = %event.after,
            "Committed command"
        );
        self.state = new_state;
        self.record_events([event]);
        Ok(())
    }

    /// Audit events of committed commands, oldest first.
    ///
    /// The log lives in memory for the life of the process and is not part
    /// of the data file. Past `AUDIT_LOG_CAPACITY` the oldest events drop.
    #[must_use]
    pub const fn audit_log(&self) -> &VecDeque<AuditEvent> {
        &self.audit_log
    }

    /// Appends events to the audit log, dropping the oldest past capacity.
    pub fn record_events(&mut self, events: impl IntoIterator<Item = AuditEvent>) {
        for event in events {
            if self.audit_log.len() == AUDIT_LOG_CAPACITY {
                self.audit_log.pop_front();
            }
            self.audit_log.push_back(event);
        }
    }

    /// Rolls the live week over once the clock has left it.
    ///
    /// Returns whether the week changed. Nothing is saved when it did not.
    ///
    /// # Errors
    ///
    /// Returns an error if today cannot be computed or the new week
    /// cannot be saved.
    pub fn roll_to_today(&mut self, clock: &dyn Clock) -> Result<bool, HttpError> {
        let today: Date = current_date(clock).map_err(translate_domain_error)?;
        let result: TransitionResult = apply(
            &self.state,
            Command::RollOverWeek { today },
            Actor::system(),
            Cause::new(
                String::from("week-rollover"),
                String::from("Roll live week to today"),
            ),
        )
        .map_err(translate_core_error)?;

        if result.new_state.registry.live_week_start() == self.state.registry.live_week_start() {
            return Ok(false);
        }

        info!(%today, "Live week has ended, rolling over");
        self.commit(result.new_state, result.audit_event)?;
        Ok(true)
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The roster behind one lock; appeal decisions touch several parts
    /// of it at once.
    pub inner: Arc<Mutex<ServerState>>,
    /// Source of "now" for dates and timestamps.
    pub clock: Arc<dyn Clock>,
    /// Where `/api/backup` writes.
    pub backup_dir: PathBuf,
}

impl AppState {
    /// Puts `server` behind the writer lock.
    #[must_use]
    pub fn new(server: ServerState, clock: Arc<dyn Clock>, backup_dir: PathBuf) -> Self {
        Self {
            inner: Arc::new(Mutex::new(server)),
            clock,
            backup_dir,
        }
    }
}

fn startup_cause(description: &str) -> Cause {
    Cause::new(String::from("startup"), description.to_string())
}

/// Brings a loaded roster up to date before serving.
///
/// An empty directory gets an administrator named `admin_username`, and
/// the live week is rolled over to the week containing today.
///
/// # Errors
///
/// Returns an error if the administrator username is invalid or today
/// cannot be computed.
pub fn prepare_state(
    state: &State,
    admin_username: &str,
    clock: &dyn Clock,
) -> Result<(State, Vec<AuditEvent>), CoreError> {
    let mut current: State = state.clone();
    let mut events: Vec<AuditEvent> = Vec::new();

    if current.directory.is_empty() {
        let employee: Employee = Employee::new(
            Username::new(admin_username),
            EmployeeProfile::default(),
            EmployeeRole::Administrator,
        );
        let result: TransitionResult = apply(
            &current,
            Command::AddEmployee { employee },
            Actor::system(),
            startup_cause("Bootstrap administrator"),
        )?;
        warn!(username = admin_username, "Directory was empty, created administrator");
        current = result.new_state;
        events.push(result.audit_event);
    }

    let today: Date = current_date(clock)?;
    let result: TransitionResult = apply(
        &current,
        Command::RollOverWeek { today },
        Actor::system(),
        startup_cause("Roll live week to today"),
    )?;
    info!(details = ?result.audit_event.action.details, "Live week checked");
    events.push(result.audit_event);

    Ok((result.new_state, events))
}
