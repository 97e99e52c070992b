//! Notification module - feed entries produced by the notification center

use std::fmt;

/// Unique identifier for a notification based on UUIDv7
///
/// UUIDv7 gives chronological sortability and 128-bit uniqueness with
/// no coordination, which suits an append-only feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NotificationId(u128);

impl NotificationId {
    /// Generate a new UUIDv7-based NotificationId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Addressee of a notification
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Recipient {
    /// A single user, by verified user id
    User(String),

    /// Every user of the platform (announcements, maintenance notices)
    Broadcast,
}

impl Recipient {
    /// Whether this notification is visible to the given user
    pub fn visible_to(&self, user: &str) -> bool {
        match self {
            Recipient::User(u) => u == user,
            Recipient::Broadcast => true,
        }
    }
}

/// A single entry in a user's notification feed
///
/// Created by the notification center in response to a lifecycle event
/// or an explicit broadcast; only the `read` flag ever changes, and
/// notifications are never deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// Unique identifier
    pub id: NotificationId,

    /// Addressee
    pub recipient: Recipient,

    /// Short headline
    pub title: String,

    /// Body text
    pub body: String,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,

    /// Whether the notification has been read
    pub read: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_id_chronological() {
        let a = NotificationId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = NotificationId::new();
        assert!(a < b, "Earlier UUIDv7 should be less than later UUIDv7");
    }

    #[test]
    fn test_recipient_visibility() {
        let direct = Recipient::User("alice".to_string());
        assert!(direct.visible_to("alice"));
        assert!(!direct.visible_to("bob"));

        let broadcast = Recipient::Broadcast;
        assert!(broadcast.visible_to("alice"));
        assert!(broadcast.visible_to("bob"));
    }
}
