//! Complaint module - the fundamental entity of the Civica engine

use crate::priority::Priority;
use crate::status::Status;
use std::fmt;

/// Unique identifier for a complaint
///
/// The public format is `CM` followed by exactly five decimal digits
/// (`CM10000` through `CM99999`). Identifiers are issued by the store
/// and are unique for the store's whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComplaintId(u32);

impl ComplaintId {
    /// Smallest number the five-digit id space covers
    pub const MIN: u32 = 10_000;

    /// Largest number the five-digit id space covers
    pub const MAX: u32 = 99_999;

    /// Create a ComplaintId from a raw number, if it fits the format
    ///
    /// # Examples
    ///
    /// ```
    /// use civica_domain::ComplaintId;
    ///
    /// let id = ComplaintId::from_number(10234).unwrap();
    /// assert_eq!(id.to_string(), "CM10234");
    /// assert!(ComplaintId::from_number(999).is_none());
    /// ```
    pub fn from_number(n: u32) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&n).then_some(Self(n))
    }

    /// Parse a ComplaintId from its display form
    ///
    /// # Examples
    ///
    /// ```
    /// use civica_domain::ComplaintId;
    ///
    /// let id = ComplaintId::from_string("CM10234").unwrap();
    /// assert_eq!(id.value(), 10234);
    /// assert!(ComplaintId::from_string("10234").is_err());
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        let digits = s
            .strip_prefix("CM")
            .ok_or_else(|| format!("Invalid complaint id '{}': missing CM prefix", s))?;
        if digits.len() != 5 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!(
                "Invalid complaint id '{}': expected five decimal digits",
                s
            ));
        }
        let n: u32 = digits
            .parse()
            .map_err(|e| format!("Invalid complaint id '{}': {}", s, e))?;
        Self::from_number(n).ok_or_else(|| format!("Invalid complaint id '{}': out of range", s))
    }

    /// Get the raw numeric value
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ComplaintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CM{:05}", self.0)
    }
}

impl std::str::FromStr for ComplaintId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

/// Opaque reference to an uploaded attachment
///
/// The engine never inspects attachment content; storage and delivery
/// belong to an external collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttachmentRef(String);

impl AttachmentRef {
    /// Wrap an already-validated attachment reference
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Get the reference string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttachmentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry in a complaint's append-only status history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusEntry {
    /// The status entered
    pub status: Status,

    /// When it was entered (Unix milliseconds)
    pub at: u64,
}

/// A citizen-filed issue report tracked through a status lifecycle
///
/// Complaints are exclusively owned by the store, which hands out
/// clones; text fields are immutable after creation and priority is
/// never recomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct Complaint {
    /// Unique identifier, assigned at creation
    pub id: ComplaintId,

    /// Short summary of the issue
    pub title: String,

    /// Detailed description
    pub description: String,

    /// Category selected at filing time (water, sanitation, ...)
    pub category: String,

    /// Where the issue was observed
    pub location: String,

    /// Opaque attachment references, in upload order
    pub attachment_refs: Vec<AttachmentRef>,

    /// Current lifecycle status; always equals the last history entry
    pub status: Status,

    /// Triage priority, assigned once at creation
    pub priority: Priority,

    /// Verified identifier of the filing user
    pub submitter: String,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,

    /// Append-only, time-ordered status history; never empty
    pub status_history: Vec<StatusEntry>,
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: display/parse round-trip preserves the id
        #[test]
        fn test_id_string_roundtrip(n in ComplaintId::MIN..=ComplaintId::MAX) {
            let id = ComplaintId::from_number(n).unwrap();
            let parsed = ComplaintId::from_string(&id.to_string());
            prop_assert_eq!(parsed, Ok(id));
        }

        /// Property: ids outside the five-digit space are rejected
        #[test]
        fn test_id_out_of_range_rejected(n in prop_oneof![0u32..ComplaintId::MIN, (ComplaintId::MAX + 1)..1_000_000]) {
            prop_assert!(ComplaintId::from_number(n).is_none());
        }
    }
}
