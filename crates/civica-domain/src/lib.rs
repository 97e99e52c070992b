//! Civica Domain Layer
//!
//! This crate contains the core domain model for the Civica complaint
//! engine. It has almost no external dependencies and defines the
//! fundamental value types, lifecycle events, and trait interfaces that
//! all other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Complaint**: a citizen-filed issue report tracked through a
//!   status lifecycle (`pending → processing → resolved/rejected`)
//! - **Priority**: triage level assigned once at creation
//! - **Notification**: a read/unread feed entry addressed to one user
//!   or broadcast to all
//! - **ConversationMessage**: one turn in an assistant session
//!
//! ## Architecture
//!
//! - Pure domain logic only, no I/O
//! - Infrastructure implementations live in other crates
//! - Trait definitions for cross-crate interactions (event sinks)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod complaint;
pub mod event;
pub mod message;
pub mod notification;
pub mod priority;
pub mod role;
pub mod status;

// Re-exports for convenience
pub use complaint::{AttachmentRef, Complaint, ComplaintId, StatusEntry};
pub use event::{ComplaintEvent, EventSink};
pub use message::{ConversationMessage, MessageId, Sender, SessionId};
pub use notification::{Notification, NotificationId, Recipient};
pub use priority::Priority;
pub use role::Role;
pub use status::Status;
