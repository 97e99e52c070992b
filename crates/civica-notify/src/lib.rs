//! Civica Notification Center
//!
//! Maintains the per-user read/unread notification feed.
//!
//! The center subscribes to complaint lifecycle events (one
//! notification per event, addressed to the submitter) and accepts
//! explicit broadcasts for announcements and maintenance notices.
//! Side effects are observable only through `feed_for` and
//! `unread_count_for`; delivery transport is an external collaborator.

#![warn(missing_docs)]

mod center;

pub use center::{NotificationCenter, NotifyError};
