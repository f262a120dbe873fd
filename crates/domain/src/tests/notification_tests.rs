// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Notification, NotificationCategory, Notifications, Username};
use std::str::FromStr;
use time::macros::datetime;

fn notice(recipient: &str, message: &str) -> Notification {
    Notification::new(
        Username::new(recipient),
        message.to_string(),
        NotificationCategory::AppealApproved,
        datetime!(2026-10-17 12:00 UTC),
    )
}

#[test]
fn test_unknown_recipient_has_empty_sequence() {
    let notifications: Notifications = Notifications::new();

    assert!(notifications.for_recipient(&Username::new("alice")).is_empty());
    assert_eq!(notifications.unread_count(&Username::new("alice")), 0);
}

#[test]
fn test_push_keeps_order_per_recipient() {
    let mut notifications: Notifications = Notifications::new();
    notifications.push(notice("alice", "first"));
    notifications.push(notice("bob", "other"));
    notifications.push(notice("alice", "second"));

    let alice: &[Notification] = notifications.for_recipient(&Username::new("alice"));
    assert_eq!(alice.len(), 2);
    assert_eq!(alice[0].message, "first");
    assert_eq!(alice[1].message, "second");
    assert_eq!(notifications.total(), 3);
}

#[test]
fn test_mark_all_read() {
    let mut notifications: Notifications = Notifications::new();
    notifications.push(notice("alice", "first"));
    notifications.push(notice("alice", "second"));
    notifications.push(notice("bob", "other"));

    assert_eq!(notifications.unread_count(&Username::new("alice")), 2);
    assert_eq!(notifications.mark_all_read(&Username::new("alice")), 2);
    assert_eq!(notifications.unread_count(&Username::new("alice")), 0);
    assert_eq!(notifications.mark_all_read(&Username::new("alice")), 0);
    assert_eq!(notifications.unread_count(&Username::new("bob")), 1);
    assert_eq!(notifications.mark_all_read(&Username::new("carol")), 0);
}

#[test]
fn test_category_tags() {
    assert_eq!(
        NotificationCategory::AppealRejected.as_str(),
        "appeal_rejected"
    );
    assert_eq!(
        NotificationCategory::from_str("appeal_approved").unwrap(),
        NotificationCategory::AppealApproved
    );
    assert!(NotificationCategory::from_str("shift_changed").is_err());
}
