// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! JSON persistence for the shift roster.
//!
//! The whole state (directory, live week, archive, appeals and
//! notifications) is written as a single [`SystemRecord`] document.
//! Saving goes through a staging file and a rename, so a crash mid-write
//! leaves the previous document in place.
//!
//! The service calls [`JsonStore::save`] after every successful command;
//! nothing here is retried.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod record;
mod store;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use record::{AppealRecord, NotificationRecord, SlotRecord, SystemRecord, UserRecord};
pub use store::JsonStore;
