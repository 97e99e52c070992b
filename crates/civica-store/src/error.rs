//! Store error types

use civica_domain::{ComplaintId, Status};
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// One or more required text fields were missing or empty.
    /// Recoverable: the caller corrects the form and retries.
    #[error("Validation failed, missing required fields: {}", missing.join(", "))]
    Validation {
        /// Names of the empty required fields, in form order
        missing: Vec<&'static str>,
    },

    /// Unknown complaint id
    #[error("Complaint not found: {0}")]
    NotFound(ComplaintId),

    /// The requested status change is not allowed by the state machine.
    /// Carries the current status so the caller can explain the rejection.
    #[error("Invalid status transition from '{from}' to '{to}'")]
    InvalidTransition {
        /// Current status of the complaint
        from: Status,
        /// Status the caller attempted to enter
        to: Status,
    },

    /// Internal invariant violated (e.g. identifier collision).
    /// Fatal: indicates a bug, must not be caught and retried.
    #[error("Internal invariant violated: {0}")]
    InvariantViolation(String),
}
