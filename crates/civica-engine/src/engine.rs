//! Single-writer engine worker and its handle

use crate::{EngineConfig, EngineError};
use civica_assistant::SessionRegistry;
use civica_classify::PriorityClassifier;
use civica_domain::{
    AttachmentRef, Complaint, ComplaintId, ConversationMessage, Notification, NotificationId,
    Role, SessionId, Status,
};
use civica_notify::NotificationCenter;
use civica_store::{ComplaintStore, NewComplaint};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

/// One request to the engine worker, carrying its reply channel
enum EngineRequest {
    CreateComplaint {
        new: NewComplaint,
        reply: oneshot::Sender<Result<Complaint, EngineError>>,
    },
    Transition {
        id: ComplaintId,
        to: Status,
        actor: String,
        reply: oneshot::Sender<Result<Complaint, EngineError>>,
    },
    GetComplaint {
        id: ComplaintId,
        reply: oneshot::Sender<Result<Complaint, EngineError>>,
    },
    ListBySubmitter {
        submitter: String,
        reply: oneshot::Sender<Vec<Complaint>>,
    },
    ListAll {
        reply: oneshot::Sender<Vec<Complaint>>,
    },
    Broadcast {
        title: String,
        body: String,
        reply: oneshot::Sender<Notification>,
    },
    FeedFor {
        user: String,
        reply: oneshot::Sender<Vec<Notification>>,
    },
    UnreadCountFor {
        user: String,
        reply: oneshot::Sender<usize>,
    },
    MarkRead {
        id: NotificationId,
        reply: oneshot::Sender<Result<(), EngineError>>,
    },
    MarkAllRead {
        user: String,
        reply: oneshot::Sender<()>,
    },
    OpenSession {
        role: Role,
        user_id: String,
        user_name: String,
        reply: oneshot::Sender<SessionId>,
    },
    PostUserMessage {
        session: SessionId,
        text: String,
        attachment_refs: Vec<AttachmentRef>,
        reply: oneshot::Sender<Result<(ConversationMessage, ConversationMessage), EngineError>>,
    },
    SessionHistory {
        session: SessionId,
        reply: oneshot::Sender<Result<Vec<ConversationMessage>, EngineError>>,
    },
    CloseSession {
        session: SessionId,
        reply: oneshot::Sender<Result<(), EngineError>>,
    },
    ConfirmComplaint {
        session: SessionId,
        reply: oneshot::Sender<Result<Complaint, EngineError>>,
    },
    Shutdown,
}

/// State exclusively owned by the worker task
struct EngineState {
    store: ComplaintStore,
    notifications: NotificationCenter,
    sessions: SessionRegistry,
}

impl EngineState {
    fn new(config: &EngineConfig) -> Self {
        let notifications = NotificationCenter::new();
        let mut store = ComplaintStore::new(PriorityClassifier::new(config.classifier.clone()));
        store.subscribe(Arc::new(notifications.clone()));
        Self {
            store,
            notifications,
            sessions: SessionRegistry::new(),
        }
    }

    fn handle(&mut self, request: EngineRequest) -> bool {
        match request {
            EngineRequest::CreateComplaint { new, reply } => {
                let _ = reply.send(self.store.create(new).map_err(Into::into));
            }
            EngineRequest::Transition {
                id,
                to,
                actor,
                reply,
            } => {
                let _ = reply.send(self.store.transition(id, to, &actor).map_err(Into::into));
            }
            EngineRequest::GetComplaint { id, reply } => {
                let _ = reply.send(self.store.get(id).map_err(Into::into));
            }
            EngineRequest::ListBySubmitter { submitter, reply } => {
                let _ = reply.send(self.store.list_by_submitter(&submitter));
            }
            EngineRequest::ListAll { reply } => {
                let _ = reply.send(self.store.list_all());
            }
            EngineRequest::Broadcast { title, body, reply } => {
                let _ = reply.send(self.notifications.broadcast(title, body));
            }
            EngineRequest::FeedFor { user, reply } => {
                let _ = reply.send(self.notifications.feed_for(&user));
            }
            EngineRequest::UnreadCountFor { user, reply } => {
                let _ = reply.send(self.notifications.unread_count_for(&user));
            }
            EngineRequest::MarkRead { id, reply } => {
                let _ = reply.send(self.notifications.mark_read(id).map_err(Into::into));
            }
            EngineRequest::MarkAllRead { user, reply } => {
                self.notifications.mark_all_read(&user);
                let _ = reply.send(());
            }
            EngineRequest::OpenSession {
                role,
                user_id,
                user_name,
                reply,
            } => {
                let _ = reply.send(self.sessions.open(role, &user_id, &user_name));
            }
            EngineRequest::PostUserMessage {
                session,
                text,
                attachment_refs,
                reply,
            } => {
                let _ = reply.send(
                    self.sessions
                        .post_user_message(session, &text, attachment_refs)
                        .map_err(Into::into),
                );
            }
            EngineRequest::SessionHistory { session, reply } => {
                let _ = reply.send(self.sessions.history(session).map_err(Into::into));
            }
            EngineRequest::CloseSession { session, reply } => {
                let _ = reply.send(self.sessions.close(session).map_err(Into::into));
            }
            EngineRequest::ConfirmComplaint { session, reply } => {
                let _ = reply.send(self.confirm_complaint(session));
            }
            EngineRequest::Shutdown => return false,
        }
        true
    }

    /// Materialize a complaint from a session's accumulated description
    ///
    /// Explicitly UI-invoked; never triggered by routing. On success
    /// the session gains an assistant confirmation carrying the new id.
    fn confirm_complaint(&mut self, session: SessionId) -> Result<Complaint, EngineError> {
        let draft = self.sessions.draft_complaint(session)?;
        let submitter = self.sessions.owner(session)?;

        let complaint = self.store.create(NewComplaint {
            title: draft.title,
            description: draft.description,
            category: draft.category,
            location: draft.location,
            attachment_refs: draft.attachment_refs,
            submitter,
        })?;

        self.sessions.post_assistant_message(
            session,
            format!(
                "I've created a new complaint based on our conversation. The complaint ID \
                 is {}. You can track its status in the 'Track Status' section.",
                complaint.id
            ),
        )?;

        Ok(complaint)
    }
}

/// The engine entry point
pub struct Engine;

impl Engine {
    /// Start the engine worker and return a handle to it
    ///
    /// The worker runs until `shutdown` is requested or every handle
    /// has been dropped.
    pub fn start(config: EngineConfig) -> EngineHandle {
        let (tx, mut rx) = mpsc::channel::<EngineRequest>(config.channel_capacity);
        let mut state = EngineState::new(&config);

        tokio::spawn(async move {
            tracing::info!("engine worker started");
            while let Some(request) = rx.recv().await {
                if !state.handle(request) {
                    break;
                }
            }
            tracing::info!("engine worker stopped");
        });

        EngineHandle { tx }
    }
}

/// Cloneable handle to the engine worker
///
/// Every method serializes through the worker's request channel, so
/// each operation appears atomic to concurrent callers.
#[derive(Clone)]
pub struct EngineHandle {
    tx: mpsc::Sender<EngineRequest>,
}

impl EngineHandle {
    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> EngineRequest,
    ) -> Result<T, EngineError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(build(reply_tx))
            .await
            .map_err(|_| EngineError::ChannelClosed)?;
        reply_rx.await.map_err(|_| EngineError::ChannelClosed)
    }

    /// File a new complaint (submission boundary)
    pub async fn create_complaint(&self, new: NewComplaint) -> Result<Complaint, EngineError> {
        self.request(|reply| EngineRequest::CreateComplaint { new, reply })
            .await?
    }

    /// Move a complaint to a new status
    pub async fn transition(
        &self,
        id: ComplaintId,
        to: Status,
        actor: &str,
    ) -> Result<Complaint, EngineError> {
        let actor = actor.to_string();
        self.request(|reply| EngineRequest::Transition {
            id,
            to,
            actor,
            reply,
        })
        .await?
    }

    /// Look up a complaint by id (status query boundary)
    pub async fn get_complaint(&self, id: ComplaintId) -> Result<Complaint, EngineError> {
        self.request(|reply| EngineRequest::GetComplaint { id, reply })
            .await?
    }

    /// All complaints filed by a user, in filing order
    pub async fn list_by_submitter(&self, submitter: &str) -> Result<Vec<Complaint>, EngineError> {
        let submitter = submitter.to_string();
        self.request(|reply| EngineRequest::ListBySubmitter { submitter, reply })
            .await
    }

    /// All complaints, in filing order
    pub async fn list_all(&self) -> Result<Vec<Complaint>, EngineError> {
        self.request(|reply| EngineRequest::ListAll { reply }).await
    }

    /// Publish an announcement visible to all users
    pub async fn broadcast(&self, title: &str, body: &str) -> Result<Notification, EngineError> {
        let title = title.to_string();
        let body = body.to_string();
        self.request(|reply| EngineRequest::Broadcast { title, body, reply })
            .await
    }

    /// A user's notification feed, most recent first (delivery boundary)
    pub async fn feed_for(&self, user: &str) -> Result<Vec<Notification>, EngineError> {
        let user = user.to_string();
        self.request(|reply| EngineRequest::FeedFor { user, reply })
            .await
    }

    /// Number of unread notifications visible to a user
    pub async fn unread_count_for(&self, user: &str) -> Result<usize, EngineError> {
        let user = user.to_string();
        self.request(|reply| EngineRequest::UnreadCountFor { user, reply })
            .await
    }

    /// Mark one notification read (idempotent)
    pub async fn mark_read(&self, id: NotificationId) -> Result<(), EngineError> {
        self.request(|reply| EngineRequest::MarkRead { id, reply })
            .await?
    }

    /// Mark everything visible to a user read (idempotent)
    pub async fn mark_all_read(&self, user: &str) -> Result<(), EngineError> {
        let user = user.to_string();
        self.request(|reply| EngineRequest::MarkAllRead { user, reply })
            .await
    }

    /// Open an assistant session (assistant boundary)
    pub async fn open_session(
        &self,
        role: Role,
        user_id: &str,
        user_name: &str,
    ) -> Result<SessionId, EngineError> {
        let user_id = user_id.to_string();
        let user_name = user_name.to_string();
        self.request(|reply| EngineRequest::OpenSession {
            role,
            user_id,
            user_name,
            reply,
        })
        .await
    }

    /// Post a user message and receive `(user_message, assistant_reply)`
    pub async fn post_user_message(
        &self,
        session: SessionId,
        text: &str,
        attachment_refs: Vec<AttachmentRef>,
    ) -> Result<(ConversationMessage, ConversationMessage), EngineError> {
        let text = text.to_string();
        self.request(|reply| EngineRequest::PostUserMessage {
            session,
            text,
            attachment_refs,
            reply,
        })
        .await?
    }

    /// Full ordered history of a session
    pub async fn session_history(
        &self,
        session: SessionId,
    ) -> Result<Vec<ConversationMessage>, EngineError> {
        self.request(|reply| EngineRequest::SessionHistory { session, reply })
            .await?
    }

    /// Close a session, discarding its history
    pub async fn close_session(&self, session: SessionId) -> Result<(), EngineError> {
        self.request(|reply| EngineRequest::CloseSession { session, reply })
            .await?
    }

    /// Materialize a complaint from a session's conversation
    ///
    /// Invoked explicitly by the UI on user confirmation; routing never
    /// triggers it.
    pub async fn confirm_complaint_from_conversation(
        &self,
        session: SessionId,
    ) -> Result<Complaint, EngineError> {
        self.request(|reply| EngineRequest::ConfirmComplaint { session, reply })
            .await?
    }

    /// Stop the engine worker
    ///
    /// Requests already queued are still served; later calls on any
    /// handle fail with `ChannelClosed`.
    pub async fn shutdown(&self) {
        let _ = self.tx.send(EngineRequest::Shutdown).await;
    }
}
