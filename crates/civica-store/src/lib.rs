//! Civica Complaint Store
//!
//! Owns all complaint entities and enforces the status state machine.
//!
//! # Architecture
//!
//! - Id-keyed map plus an insertion-ordered index, so lookup is O(1)
//!   while listings preserve filing order
//! - Priority is assigned once at creation by the classifier
//! - Every successful `create`/`transition` synchronously notifies the
//!   registered event sinks, so a complaint and its notification are
//!   observed as one unit
//!
//! # Examples
//!
//! ```
//! use civica_store::{ComplaintStore, NewComplaint};
//!
//! let mut store = ComplaintStore::with_default_classifier();
//! let complaint = store.create(NewComplaint {
//!     title: "Water Leakage".to_string(),
//!     description: "Pipeline burst flooding street".to_string(),
//!     category: "water".to_string(),
//!     location: "Block C".to_string(),
//!     attachment_refs: vec![],
//!     submitter: "user-1".to_string(),
//! }).unwrap();
//! assert_eq!(complaint.status.as_str(), "pending");
//! ```

#![warn(missing_docs)]

mod error;
mod store;

pub use error::StoreError;
pub use store::{ComplaintStore, NewComplaint};
