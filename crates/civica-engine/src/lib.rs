//! Civica Engine
//!
//! The single logical owner of all mutable complaint-platform state.
//!
//! One tokio task exclusively owns the store, the notification center,
//! and the session registry, and drains a request channel. Because
//! every operation runs to completion on that task, creation, id
//! issuance, priority assignment, and notification emission are
//! observed as one indivisible unit, and concurrent transitions on the
//! same complaint are linearized: the loser is evaluated against the
//! winner's post-state, never a stale snapshot.
//!
//! The UI consumes the engine in-process through [`EngineHandle`];
//! there is no wire format here.
//!
//! # Examples
//!
//! ```
//! use civica_engine::{Engine, EngineConfig};
//! use civica_store::NewComplaint;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let handle = Engine::start(EngineConfig::default());
//! let complaint = handle.create_complaint(NewComplaint {
//!     title: "Water Leakage".to_string(),
//!     description: "Pipeline burst flooding street".to_string(),
//!     category: "water".to_string(),
//!     location: "Block C".to_string(),
//!     attachment_refs: vec![],
//!     submitter: "user-1".to_string(),
//! }).await.unwrap();
//! assert_eq!(handle.unread_count_for("user-1").await.unwrap(), 1);
//! assert!(complaint.id.to_string().starts_with("CM"));
//! handle.shutdown().await;
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod engine;
mod error;

pub use config::{ConfigError, EngineConfig};
pub use engine::{Engine, EngineHandle};
pub use error::EngineError;
