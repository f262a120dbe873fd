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
#![allow(clippy::multiple_crate_versions)]

mod app_state;
mod error;
mod routes;

#[cfg(test)]
mod tests;

use axum::Router;
use clap::Parser;
use shift_roster::State;
use shift_roster_audit::AuditEvent;
use shift_roster_domain::{Clock, SystemClock};
use shift_roster_persistence::JsonStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::app_state::{AppState, ServerState, prepare_state};
use crate::routes::build_router;

/// Shift Roster Server - HTTP server for weekly shift scheduling
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSON data file. If not provided, state lives in memory only.
    #[arg(short, long)]
    data_file: Option<PathBuf>,

    /// Directory that receives timestamped backups
    #[arg(short, long, default_value = "backups")]
    backup_dir: PathBuf,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Username of the administrator created when the directory is empty
    #[arg(short, long, default_value = "admin")]
    admin: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing shift roster server");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let store: Option<JsonStore> = args.data_file.map(JsonStore::new);

    let loaded: State = if let Some(store) = &store {
        info!(path = %store.path().display(), "Using data file");
        store.load()?.unwrap_or_default()
    } else {
        info!("No data file given, state lives in memory");
        State::new()
    };

    let (state, startup_events): (State, Vec<AuditEvent>) =
        prepare_state(&loaded, &args.admin, clock.as_ref())?;
    if let Some(store) = &store {
        store.save(&state)?;
    }

    let mut server: ServerState = ServerState::new(state, store);
    server.record_events(startup_events);

    let app: Router = build_router(AppState::new(server, clock, args.backup_dir));

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
