//! Civica Assistant
//!
//! The rule-driven conversational assistant: a deterministic intent
//! router over per-role keyword tables, and the registry of open
//! conversation sessions.
//!
//! There is no natural-language understanding here. Intent selection
//! is first-match over an ordered rule table, so the same utterance
//! always yields the same response category.
//!
//! # Examples
//!
//! ```
//! use civica_assistant::{Intent, IntentRouter};
//! use civica_domain::Role;
//!
//! let router = IntentRouter::new();
//! let intent = router.route("I want to submit a new complaint", Role::User, false);
//! assert_eq!(intent, Intent::SubmitComplaint);
//! ```

#![warn(missing_docs)]

mod intent;
mod router;
mod session;

pub use intent::Intent;
pub use router::IntentRouter;
pub use session::{AssistantError, ComplaintDraft, SessionRegistry};
