//! Event module - lifecycle events emitted by the complaint store

use crate::complaint::ComplaintId;
use crate::priority::Priority;
use crate::status::Status;

/// Lifecycle event emitted by the complaint store
///
/// Events carry enough context for a subscriber to produce a
/// user-facing notification without a round-trip back into the store.
#[derive(Debug, Clone, PartialEq)]
pub enum ComplaintEvent {
    /// A complaint was created and entered the `pending` state
    Created {
        /// Identifier of the new complaint
        id: ComplaintId,
        /// Verified id of the filing user
        submitter: String,
        /// Complaint title
        title: String,
        /// Priority assigned by the classifier
        priority: Priority,
    },

    /// A complaint moved to a new status
    StatusChanged {
        /// Identifier of the complaint
        id: ComplaintId,
        /// Verified id of the filing user
        submitter: String,
        /// Complaint title
        title: String,
        /// Status before the transition
        from: Status,
        /// Status after the transition
        to: Status,
    },
}

impl ComplaintEvent {
    /// The complaint this event concerns
    pub fn complaint_id(&self) -> ComplaintId {
        match self {
            ComplaintEvent::Created { id, .. } => *id,
            ComplaintEvent::StatusChanged { id, .. } => *id,
        }
    }

    /// The submitter of the complaint this event concerns
    pub fn submitter(&self) -> &str {
        match self {
            ComplaintEvent::Created { submitter, .. } => submitter,
            ComplaintEvent::StatusChanged { submitter, .. } => submitter,
        }
    }
}

/// Subscriber to complaint lifecycle events
///
/// Sinks are invoked synchronously by the store inside `create` and
/// `transition`, so a creation and its notification are observed as one
/// indivisible unit. Implementations must not call back into the store.
pub trait EventSink: Send + Sync {
    /// Handle one lifecycle event
    fn on_complaint_event(&self, event: &ComplaintEvent);
}
