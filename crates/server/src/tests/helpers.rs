// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;
use shift_roster::State;
use shift_roster_domain::{
    Clock, Employee, EmployeeProfile, EmployeeRole, FixedClock, Username,
};
use shift_roster_persistence::JsonStore;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;
use time::macros::datetime;
use tower::ServiceExt;

use crate::app_state::{AppState, ServerState, prepare_state};
use crate::routes::build_router;

static DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn unique_temp_dir() -> PathBuf {
    let id: u64 = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir().join(format!("shift_roster_server_{}_{id}", std::process::id()))
}

/// Wednesday 21 October 2026 in Jerusalem.
pub fn create_test_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock::new(datetime!(2026-10-21 09:00 UTC)))
}

/// admin, alice and bob; no live week yet.
pub fn create_test_directory_state() -> State {
    let mut state: State = State::new();
    for (username, role) in [
        ("admin", EmployeeRole::Administrator),
        ("alice", EmployeeRole::Regular),
        ("bob", EmployeeRole::Regular),
    ] {
        state
            .directory
            .add(Employee::new(
                Username::new(username),
                EmployeeProfile::default(),
                role,
            ))
            .unwrap();
    }
    state
}

fn build_test_app(
    store: Option<JsonStore>,
    backup_dir: PathBuf,
    serving_clock: Arc<dyn Clock>,
) -> (Router, AppState) {
    let (state, events) = prepare_state(
        &create_test_directory_state(),
        "admin",
        create_test_clock().as_ref(),
    )
    .unwrap();
    let mut server: ServerState = ServerState::new(state, store);
    server.record_events(events);

    let app_state: AppState = AppState::new(server, serving_clock, backup_dir);
    (build_router(app_state.clone()), app_state)
}

/// Builds a started app, optionally backed by a data file.
pub fn create_test_app_with(store: Option<JsonStore>, backup_dir: PathBuf) -> (Router, AppState) {
    build_test_app(store, backup_dir, create_test_clock())
}

/// Builds an app prepared on the test clock that keeps serving until `now`.
pub fn create_test_app_served_at(now: OffsetDateTime) -> Router {
    build_test_app(None, unique_temp_dir(), Arc::new(FixedClock::new(now))).0
}

pub fn create_test_app() -> Router {
    create_test_app_with(None, unique_temp_dir()).0
}

/// Sends one request and returns the status with the decoded JSON body.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request: Request<Body> = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
