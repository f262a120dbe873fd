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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod appeal;
mod calendar;
mod directory;
mod error;
mod notification;
mod registry;
mod slot;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use appeal::{ActiveAppeal, Appeal, AppealDecision, AppealLog, AppealStatus};
pub use calendar::{
    APPROXIMATE_MONTH_DAYS, Clock, DAYS_PER_WEEK, DateKey, FIRST_DAY_OF_WEEK, FixedClock,
    LOCALE_TIMEZONE, SystemClock, current_date, month_keys, parse_weekday, week_keys, week_start,
    weekday_index, weekday_name,
};
pub use directory::Directory;
pub use error::DomainError;
pub use notification::{Notification, NotificationCategory, Notifications};
pub use registry::{DaySchedule, ShiftRegistry};
pub use slot::{
    DEFAULT_EVENING, DEFAULT_MORNING, ShiftSlot, SlotView, default_slots, format_shift_time,
    parse_shift_time,
};
pub use types::{Employee, EmployeeProfile, EmployeeRole, Username};
pub use validation::{validate_one_shift_per_day, validate_username};
