//! Deterministic keyword routing over per-role rule tables

use crate::Intent;
use civica_domain::Role;

/// One keyword rule: matches when every `all_of` keyword appears and,
/// if `any_of` is non-empty, at least one of those appears too
struct Rule {
    all_of: &'static [&'static str],
    any_of: &'static [&'static str],
    intent: Intent,
}

impl Rule {
    fn matches(&self, text: &str) -> bool {
        self.all_of.iter().all(|kw| text.contains(kw))
            && (self.any_of.is_empty() || self.any_of.iter().any(|kw| text.contains(kw)))
    }
}

/// Ordered rule table for the `user` role. Rule order is part of the
/// contract: the first match wins.
const USER_RULES: &[Rule] = &[
    Rule {
        all_of: &["complaint"],
        any_of: &["submit", "file", "new"],
        intent: Intent::SubmitComplaint,
    },
    Rule {
        all_of: &[],
        any_of: &["status", "track"],
        intent: Intent::TrackStatus,
    },
    Rule {
        all_of: &[],
        any_of: &["register", "sign up"],
        intent: Intent::Register,
    },
    Rule {
        all_of: &[],
        any_of: &["login", "sign in"],
        intent: Intent::Login,
    },
    Rule {
        all_of: &[],
        any_of: &["otp", "verification"],
        intent: Intent::OtpVerification,
    },
    Rule {
        all_of: &[],
        any_of: &["priority", "urgent"],
        intent: Intent::PriorityInfo,
    },
];

/// Ordered rule table for the `admin` role
const ADMIN_RULES: &[Rule] = &[
    Rule {
        all_of: &[],
        any_of: &["analytics", "report"],
        intent: Intent::Analytics,
    },
    Rule {
        all_of: &["user"],
        any_of: &["add", "create"],
        intent: Intent::AddUser,
    },
];

/// Ordered rule table for the `authority` role
const AUTHORITY_RULES: &[Rule] = &[Rule {
    all_of: &[],
    any_of: &["assign", "complaint"],
    intent: Intent::AssignedComplaints,
}];

/// Deterministic, first-match intent router
///
/// Text is lowercased and evaluated against the role's rule table top
/// to bottom. For the `user` role an attachment acknowledgment sits
/// between the keyword rules and the generic fallback: it applies only
/// when no keyword rule matched and the message carried an attachment.
pub struct IntentRouter;

impl IntentRouter {
    /// Create a router over the built-in rule tables
    pub fn new() -> Self {
        Self
    }

    /// Select the response category for an utterance
    pub fn route(&self, text: &str, role: Role, has_attachment: bool) -> Intent {
        let text = text.to_lowercase();

        let (rules, fallback) = match role {
            Role::User => (USER_RULES, Intent::GeneralHelp),
            Role::Admin => (ADMIN_RULES, Intent::AdminHelp),
            Role::Authority => (AUTHORITY_RULES, Intent::AuthorityHelp),
        };

        for rule in rules {
            if rule.matches(&text) {
                tracing::debug!(intent = ?rule.intent, role = %role, "keyword rule matched");
                return rule.intent;
            }
        }

        if role == Role::User && has_attachment {
            return Intent::AttachmentAck;
        }

        fallback
    }
}

impl Default for IntentRouter {
    fn default() -> Self {
        Self::new()
    }
}
