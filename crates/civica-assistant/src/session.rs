//! Conversation sessions and the registry that owns them

use crate::IntentRouter;
use civica_domain::{
    AttachmentRef, ConversationMessage, MessageId, Role, Sender, SessionId,
};
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Maximum length of a draft title taken from the first user message
const DRAFT_TITLE_MAX_CHARS: usize = 80;

/// Assistant error
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AssistantError {
    /// Unknown or already-closed session
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    /// The session has no user messages to build a complaint from
    #[error("Session {0} has no user messages to draft a complaint from")]
    EmptyConversation(SessionId),
}

/// A complaint draft extracted from a conversation
///
/// Field defaults fill in what the conversation cannot supply: the
/// category is `other` and the location `unspecified` until the user
/// edits the filed complaint flow in the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplaintDraft {
    /// Title taken from the first user message, truncated
    pub title: String,
    /// All user messages joined in order
    pub description: String,
    /// Default category for conversation-filed complaints
    pub category: String,
    /// Default location for conversation-filed complaints
    pub location: String,
    /// Attachments collected from the session's user messages
    pub attachment_refs: Vec<AttachmentRef>,
}

struct Session {
    role: Role,
    user_id: String,
    messages: Vec<ConversationMessage>,
}

/// Registry of open assistant sessions
///
/// Sessions are independent and never share message lists; closing a
/// session discards its history.
pub struct SessionRegistry {
    router: IntentRouter,
    sessions: HashMap<SessionId, Session>,
}

impl SessionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            router: IntentRouter::new(),
            sessions: HashMap::new(),
        }
    }

    /// Open a session seeded with the deterministic greeting
    ///
    /// `user_id` is the verified identity the session acts for;
    /// `user_name` only personalizes the greeting.
    pub fn open(&mut self, role: Role, user_id: &str, user_name: &str) -> SessionId {
        let id = SessionId::new();
        let greeting = format!(
            "Hello {}! I'm your Civica assistant. How can I help you today?",
            user_name
        );
        self.sessions.insert(
            id,
            Session {
                role,
                user_id: user_id.to_string(),
                messages: vec![assistant_message(greeting)],
            },
        );
        tracing::debug!(session = %id, role = %role, "session opened");
        id
    }

    /// The verified user id a session acts for
    pub fn owner(&self, session_id: SessionId) -> Result<String, AssistantError> {
        self.sessions
            .get(&session_id)
            .map(|s| s.user_id.clone())
            .ok_or(AssistantError::SessionNotFound(session_id))
    }

    /// Append a user message, route it, and append the assistant reply
    ///
    /// Returns `(user_message, assistant_reply)`. Both are appended
    /// before this call returns, so a caller never observes the user
    /// message without its reply.
    pub fn post_user_message(
        &mut self,
        session_id: SessionId,
        text: &str,
        attachment_refs: Vec<AttachmentRef>,
    ) -> Result<(ConversationMessage, ConversationMessage), AssistantError> {
        let session = self
            .sessions
            .get_mut(&session_id)
            .ok_or(AssistantError::SessionNotFound(session_id))?;

        let has_attachment = !attachment_refs.is_empty();
        let user_message = ConversationMessage {
            id: MessageId::new(),
            sender: Sender::User,
            content: text.to_string(),
            timestamp: now_ms(),
            attachment_refs,
        };

        let intent = self.router.route(text, session.role, has_attachment);
        let reply = assistant_message(intent.reply().to_string());

        session.messages.push(user_message.clone());
        session.messages.push(reply.clone());
        Ok((user_message, reply))
    }

    /// Append an assistant-side message outside the routing flow
    /// (e.g. the confirmation after a conversation-filed complaint)
    pub fn post_assistant_message(
        &mut self,
        session_id: SessionId,
        content: String,
    ) -> Result<ConversationMessage, AssistantError> {
        let session = self
            .sessions
            .get_mut(&session_id)
            .ok_or(AssistantError::SessionNotFound(session_id))?;
        let message = assistant_message(content);
        session.messages.push(message.clone());
        Ok(message)
    }

    /// Full ordered history of a session
    pub fn history(&self, session_id: SessionId) -> Result<Vec<ConversationMessage>, AssistantError> {
        self.sessions
            .get(&session_id)
            .map(|s| s.messages.clone())
            .ok_or(AssistantError::SessionNotFound(session_id))
    }

    /// Close a session, discarding its history
    pub fn close(&mut self, session_id: SessionId) -> Result<(), AssistantError> {
        self.sessions
            .remove(&session_id)
            .map(|_| tracing::debug!(session = %session_id, "session closed"))
            .ok_or(AssistantError::SessionNotFound(session_id))
    }

    /// Build a complaint draft from the session's accumulated user
    /// messages
    pub fn draft_complaint(&self, session_id: SessionId) -> Result<ComplaintDraft, AssistantError> {
        let session = self
            .sessions
            .get(&session_id)
            .ok_or(AssistantError::SessionNotFound(session_id))?;

        let user_texts: Vec<&str> = session
            .messages
            .iter()
            .filter(|m| m.sender == Sender::User)
            .map(|m| m.content.trim())
            .filter(|t| !t.is_empty())
            .collect();
        if user_texts.is_empty() {
            return Err(AssistantError::EmptyConversation(session_id));
        }

        let attachment_refs = session
            .messages
            .iter()
            .filter(|m| m.sender == Sender::User)
            .flat_map(|m| m.attachment_refs.iter().cloned())
            .collect();

        Ok(ComplaintDraft {
            title: user_texts[0].chars().take(DRAFT_TITLE_MAX_CHARS).collect(),
            description: user_texts.join("\n"),
            category: "other".to_string(),
            location: "unspecified".to_string(),
            attachment_refs,
        })
    }

    /// Number of open sessions
    pub fn open_count(&self) -> usize {
        self.sessions.len()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn assistant_message(content: String) -> ConversationMessage {
    ConversationMessage {
        id: MessageId::new(),
        sender: Sender::Assistant,
        content,
        timestamp: now_ms(),
        attachment_refs: vec![],
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Intent;

    #[test]
    fn test_open_seeds_greeting() {
        let mut registry = SessionRegistry::new();
        let id = registry.open(Role::User, "user-1", "Asha");

        let history = registry.history(id).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].sender, Sender::Assistant);
        assert!(history[0].content.contains("Asha"));
    }

    #[test]
    fn test_post_appends_user_and_reply_pair() {
        let mut registry = SessionRegistry::new();
        let id = registry.open(Role::User, "user-1", "Asha");

        let (user, reply) = registry
            .post_user_message(id, "what is the status of my request", vec![])
            .unwrap();
        assert_eq!(user.sender, Sender::User);
        assert_eq!(reply.sender, Sender::Assistant);
        assert_eq!(reply.content, Intent::TrackStatus.reply());

        let history = registry.history(id).unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[1].id, user.id);
        assert_eq!(history[2].id, reply.id);
    }

    #[test]
    fn test_role_selects_rule_table() {
        let mut registry = SessionRegistry::new();
        let admin = registry.open(Role::Admin, "admin-1", "Root");
        let (_, reply) = registry
            .post_user_message(admin, "please add a user account", vec![])
            .unwrap();
        assert_eq!(reply.content, Intent::AddUser.reply());
    }

    #[test]
    fn test_attachment_only_message_acknowledged() {
        let mut registry = SessionRegistry::new();
        let id = registry.open(Role::User, "user-1", "Asha");
        let (_, reply) = registry
            .post_user_message(id, "", vec![AttachmentRef::new("blob:photo-1")])
            .unwrap();
        assert_eq!(reply.content, Intent::AttachmentAck.reply());
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut registry = SessionRegistry::new();
        let a = registry.open(Role::User, "user-1", "Asha");
        let b = registry.open(Role::User, "user-2", "Bilal");

        registry.post_user_message(a, "track my complaint", vec![]).unwrap();

        assert_eq!(registry.history(a).unwrap().len(), 3);
        assert_eq!(registry.history(b).unwrap().len(), 1);
    }

    #[test]
    fn test_close_discards_history() {
        let mut registry = SessionRegistry::new();
        let id = registry.open(Role::User, "user-1", "Asha");
        registry.close(id).unwrap();

        assert_eq!(registry.history(id), Err(AssistantError::SessionNotFound(id)));
        assert_eq!(registry.close(id), Err(AssistantError::SessionNotFound(id)));
        assert_eq!(registry.open_count(), 0);
    }

    #[test]
    fn test_unknown_session_errors() {
        let mut registry = SessionRegistry::new();
        let unknown = SessionId::new();
        assert_eq!(
            registry.post_user_message(unknown, "hi", vec![]),
            Err(AssistantError::SessionNotFound(unknown))
        );
    }

    #[test]
    fn test_draft_from_conversation() {
        let mut registry = SessionRegistry::new();
        let id = registry.open(Role::User, "user-1", "Asha");
        registry
            .post_user_message(
                id,
                "The drain outside my house is blocked",
                vec![AttachmentRef::new("blob:photo-1")],
            )
            .unwrap();
        registry
            .post_user_message(id, "It has been overflowing since Monday", vec![])
            .unwrap();

        let draft = registry.draft_complaint(id).unwrap();
        assert_eq!(draft.title, "The drain outside my house is blocked");
        assert_eq!(
            draft.description,
            "The drain outside my house is blocked\nIt has been overflowing since Monday"
        );
        assert_eq!(draft.category, "other");
        assert_eq!(draft.location, "unspecified");
        assert_eq!(draft.attachment_refs, vec![AttachmentRef::new("blob:photo-1")]);
    }

    #[test]
    fn test_draft_title_truncated() {
        let mut registry = SessionRegistry::new();
        let id = registry.open(Role::User, "user-1", "Asha");
        let long = "x".repeat(200);
        registry.post_user_message(id, &long, vec![]).unwrap();

        let draft = registry.draft_complaint(id).unwrap();
        assert_eq!(draft.title.chars().count(), DRAFT_TITLE_MAX_CHARS);
        assert_eq!(draft.description, long);
    }

    #[test]
    fn test_owner_is_the_verified_user_id() {
        let mut registry = SessionRegistry::new();
        let id = registry.open(Role::User, "user-1", "Asha");
        assert_eq!(registry.owner(id), Ok("user-1".to_string()));
    }

    #[test]
    fn test_draft_requires_user_text() {
        let mut registry = SessionRegistry::new();
        let id = registry.open(Role::User, "user-1", "Asha");
        assert_eq!(
            registry.draft_complaint(id),
            Err(AssistantError::EmptyConversation(id))
        );
    }
}
