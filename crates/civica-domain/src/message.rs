//! Message module - assistant session identifiers and conversation turns

use crate::complaint::AttachmentRef;
use std::fmt;

/// Unique identifier for an assistant session (UUIDv7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(u128);

impl SessionId {
    /// Generate a new UUIDv7-based SessionId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Unique identifier for a conversation message (UUIDv7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(u128);

impl MessageId {
    /// Generate a new UUIDv7-based MessageId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Who produced a conversation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sender {
    /// The human on the other end of the session
    User,

    /// The rule-driven assistant
    Assistant,
}

/// One turn in an assistant conversation
///
/// Owned exclusively by the session that created it; sessions never
/// share message lists.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationMessage {
    /// Unique identifier
    pub id: MessageId,

    /// Who wrote the message
    pub sender: Sender,

    /// Message text
    pub content: String,

    /// When the message was appended (Unix milliseconds)
    pub timestamp: u64,

    /// Opaque attachment references carried by the message
    pub attachment_refs: Vec<AttachmentRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_id_uniqueness() {
        let a = MessageId::new();
        let b = MessageId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_session_id_display_length() {
        // UUID strings are 36 characters (8-4-4-4-12 with hyphens)
        assert_eq!(SessionId::new().to_string().len(), 36);
    }
}
