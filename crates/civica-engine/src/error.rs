//! Engine error types

use civica_assistant::AssistantError;
use civica_notify::NotifyError;
use civica_store::StoreError;
use thiserror::Error;

/// Errors surfaced by engine operations
///
/// Store, notification, and assistant errors pass through unchanged so
/// callers can match on the underlying taxonomy (validation, not
/// found, invalid transition, invariant violation).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// Error from the complaint store
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Error from the notification center
    #[error(transparent)]
    Notify(#[from] NotifyError),

    /// Error from the assistant
    #[error(transparent)]
    Assistant(#[from] AssistantError),

    /// The engine worker is no longer running (after `shutdown`)
    #[error("Engine is shut down")]
    ChannelClosed,
}
