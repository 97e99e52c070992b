//! Status module - lifecycle states for complaints

use std::fmt;

/// Status of a complaint in its lifecycle
///
/// Complaints start as `Pending` and move through the state machine:
/// - Pending: filed, awaiting triage
/// - Processing: an authority is working on it
/// - Resolved: closed successfully (terminal)
/// - Rejected: closed without action (terminal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Filed, not yet picked up
    Pending,

    /// Under active handling by an authority
    Processing,

    /// Closed successfully (terminal)
    Resolved,

    /// Closed without action (terminal)
    Rejected,
}

impl Status {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Processing => "processing",
            Status::Resolved => "resolved",
            Status::Rejected => "rejected",
        }
    }

    /// Parse a status from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Status::Pending),
            "processing" => Some(Status::Processing),
            "resolved" => Some(Status::Resolved),
            "rejected" => Some(Status::Rejected),
            _ => None,
        }
    }

    /// Whether this status is terminal (no further transitions allowed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Resolved | Status::Rejected)
    }

    /// Whether the state machine allows moving from `self` to `to`
    ///
    /// Self-transitions are not listed here; the store treats them as
    /// idempotent no-ops before consulting this table.
    ///
    /// # Examples
    ///
    /// ```
    /// use civica_domain::Status;
    ///
    /// assert!(Status::Pending.can_transition_to(Status::Processing));
    /// assert!(Status::Processing.can_transition_to(Status::Pending)); // reopen
    /// assert!(!Status::Resolved.can_transition_to(Status::Pending));
    /// ```
    pub fn can_transition_to(&self, to: Status) -> bool {
        match (self, to) {
            (Status::Pending, Status::Processing) => true,
            (Status::Pending, Status::Rejected) => true,
            (Status::Processing, Status::Resolved) => true,
            (Status::Processing, Status::Rejected) => true,
            (Status::Processing, Status::Pending) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid status: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_transitions() {
        assert!(Status::Pending.can_transition_to(Status::Processing));
        assert!(Status::Pending.can_transition_to(Status::Rejected));
        assert!(Status::Processing.can_transition_to(Status::Resolved));
        assert!(Status::Processing.can_transition_to(Status::Rejected));
        assert!(Status::Processing.can_transition_to(Status::Pending));
    }

    #[test]
    fn test_forbidden_transitions() {
        assert!(!Status::Pending.can_transition_to(Status::Resolved));
        for to in [Status::Pending, Status::Processing, Status::Rejected] {
            assert!(!Status::Resolved.can_transition_to(to));
        }
        for to in [Status::Pending, Status::Processing, Status::Resolved] {
            assert!(!Status::Rejected.can_transition_to(to));
        }
    }

    #[test]
    fn test_terminal_states() {
        assert!(!Status::Pending.is_terminal());
        assert!(!Status::Processing.is_terminal());
        assert!(Status::Resolved.is_terminal());
        assert!(Status::Rejected.is_terminal());
    }

    #[test]
    fn test_parse_roundtrip() {
        for status in [
            Status::Pending,
            Status::Processing,
            Status::Resolved,
            Status::Rejected,
        ] {
            assert_eq!(Status::parse(status.as_str()), Some(status));
        }
        assert_eq!(Status::parse("unknown"), None);
    }
}
