// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::Username;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use time::OffsetDateTime;

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    /// An appeal was approved.
    AppealApproved,
    /// An appeal was rejected.
    AppealRejected,
}

impl NotificationCategory {
    /// Returns the category tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AppealApproved => "appeal_approved",
            Self::AppealRejected => "appeal_rejected",
        }
    }
}

impl FromStr for NotificationCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "appeal_approved" => Ok(Self::AppealApproved),
            "appeal_rejected" => Ok(Self::AppealRejected),
            _ => Err(DomainError::InvalidNotificationCategory(s.to_string())),
        }
    }
}

/// A message for one employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// The employee the message is for.
    pub recipient: Username,
    /// Human-readable message.
    pub message: String,
    /// Category tag.
    pub category: NotificationCategory,
    /// When the notification was produced.
    pub created_at: OffsetDateTime,
    /// Whether the recipient has read it.
    pub read: bool,
}

impl Notification {
    /// Creates an unread notification.
    #[must_use]
    pub const fn new(
        recipient: Username,
        message: String,
        category: NotificationCategory,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            recipient,
            message,
            category,
            created_at,
            read: false,
        }
    }
}

/// Per-employee notification sequences.
///
/// Every employee implicitly has an empty sequence; nothing needs to be
/// created before reading or appending.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Notifications {
    by_recipient: BTreeMap<Username, Vec<Notification>>,
}

impl Notifications {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            by_recipient: BTreeMap::new(),
        }
    }

    /// Appends a notification to its recipient's sequence.
    pub fn push(&mut self, notification: Notification) {
        self.by_recipient
            .entry(notification.recipient.clone())
            .or_default()
            .push(notification);
    }

    /// Returns a recipient's notifications, oldest first.
    #[must_use]
    pub fn for_recipient(&self, recipient: &Username) -> &[Notification] {
        self.by_recipient
            .get(recipient)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns how many of a recipient's notifications are unread.
    #[must_use]
    pub fn unread_count(&self, recipient: &Username) -> usize {
        self.for_recipient(recipient)
            .iter()
            .filter(|n| !n.read)
            .count()
    }

    /// Marks all of a recipient's notifications read. Returns how many changed.
    pub fn mark_all_read(&mut self, recipient: &Username) -> usize {
        let Some(notifications) = self.by_recipient.get_mut(recipient) else {
            return 0;
        };

        let mut changed: usize = 0;
        for notification in notifications.iter_mut().filter(|n| !n.read) {
            notification.read = true;
            changed += 1;
        }
        changed
    }

    /// Iterates every notification grouped by recipient.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.by_recipient.values().flatten()
    }

    /// Returns the number of stored notifications.
    #[must_use]
    pub fn total(&self) -> usize {
        self.by_recipient.values().map(Vec::len).sum()
    }
}
