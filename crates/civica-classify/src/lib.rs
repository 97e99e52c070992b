//! Civica Priority Classifier
//!
//! Assigns a triage priority to a complaint at creation time.
//!
//! The classifier is a deterministic heuristic over the complaint's
//! text fields and category, not a statistical model: the same input
//! always yields the same priority, and no input ever fails.
//!
//! # Examples
//!
//! ```
//! use civica_classify::PriorityClassifier;
//! use civica_domain::Priority;
//!
//! let classifier = PriorityClassifier::default_config();
//! let priority = classifier.classify(
//!     "Water Leakage",
//!     "Pipeline burst flooding street",
//!     "water",
//! );
//! assert_eq!(priority, Priority::High);
//! ```

#![warn(missing_docs)]

mod classifier;
mod config;

pub use classifier::PriorityClassifier;
pub use config::ClassifierConfig;
