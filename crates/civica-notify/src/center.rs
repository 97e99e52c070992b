//! Notification feed state and event handling

use civica_domain::{
    ComplaintEvent, EventSink, Notification, NotificationId, Recipient,
};
use std::sync::{Arc, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Notification center error
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NotifyError {
    /// Notification not found
    #[error("Notification not found: {0}")]
    NotFound(NotificationId),
}

/// Per-user notification feed with broadcast support
///
/// Notifications are append-only; only the `read` flag ever changes
/// and nothing is deleted. Reads (`feed_for`, `unread_count_for`) take
/// the shared lock, mutations the exclusive one.
#[derive(Clone)]
pub struct NotificationCenter {
    notifications: Arc<RwLock<Vec<Notification>>>,
}

impl NotificationCenter {
    /// Create an empty center
    pub fn new() -> Self {
        Self {
            notifications: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Publish a notification visible to all users
    ///
    /// Used for announcements and maintenance notices not tied to a
    /// single complaint.
    pub fn broadcast(&self, title: impl Into<String>, body: impl Into<String>) -> Notification {
        let notification = Notification {
            id: NotificationId::new(),
            recipient: Recipient::Broadcast,
            title: title.into(),
            body: body.into(),
            created_at: now_ms(),
            read: false,
        };
        tracing::debug!(id = %notification.id, "broadcast published");
        self.notifications
            .write()
            .unwrap()
            .push(notification.clone());
        notification
    }

    /// The feed for one user: direct notifications plus all broadcasts,
    /// most recent first
    pub fn feed_for(&self, user: &str) -> Vec<Notification> {
        let notifications = self.notifications.read().unwrap();
        notifications
            .iter()
            .rev()
            .filter(|n| n.recipient.visible_to(user))
            .cloned()
            .collect()
    }

    /// Number of unread notifications visible to the given user
    pub fn unread_count_for(&self, user: &str) -> usize {
        let notifications = self.notifications.read().unwrap();
        notifications
            .iter()
            .filter(|n| !n.read && n.recipient.visible_to(user))
            .count()
    }

    /// Mark one notification read (idempotent)
    pub fn mark_read(&self, id: NotificationId) -> Result<(), NotifyError> {
        let mut notifications = self.notifications.write().unwrap();
        let notification = notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(NotifyError::NotFound(id))?;
        notification.read = true;
        Ok(())
    }

    /// Mark every notification visible to the user read (idempotent)
    pub fn mark_all_read(&self, user: &str) {
        let mut notifications = self.notifications.write().unwrap();
        for notification in notifications
            .iter_mut()
            .filter(|n| n.recipient.visible_to(user))
        {
            notification.read = true;
        }
    }

    /// Total number of notifications ever recorded
    pub fn len(&self) -> usize {
        self.notifications.read().unwrap().len()
    }

    /// Whether no notification has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.notifications.read().unwrap().is_empty()
    }

    fn record(&self, recipient: Recipient, title: String, body: String) {
        self.notifications.write().unwrap().push(Notification {
            id: NotificationId::new(),
            recipient,
            title,
            body,
            created_at: now_ms(),
            read: false,
        });
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for NotificationCenter {
    fn on_complaint_event(&self, event: &ComplaintEvent) {
        match event {
            ComplaintEvent::Created {
                id,
                submitter,
                title,
                priority,
            } => {
                tracing::debug!(complaint = %id, user = %submitter, "creation notification");
                self.record(
                    Recipient::User(submitter.clone()),
                    "Complaint Received".to_string(),
                    format!(
                        "Your complaint {} \"{}\" has been received and assigned {} priority.",
                        id, title, priority
                    ),
                );
            }
            ComplaintEvent::StatusChanged {
                id,
                submitter,
                title,
                from,
                to,
            } => {
                tracing::debug!(complaint = %id, user = %submitter, "status notification");
                self.record(
                    Recipient::User(submitter.clone()),
                    "Complaint Status Updated".to_string(),
                    format!(
                        "Your complaint {} \"{}\" moved from {} to {}.",
                        id, title, from, to
                    ),
                );
            }
        }
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}
