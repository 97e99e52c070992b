//! Complaint storage and lifecycle enforcement

use crate::StoreError;
use civica_classify::PriorityClassifier;
use civica_domain::{
    AttachmentRef, Complaint, ComplaintEvent, ComplaintId, EventSink, Status, StatusEntry,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Input for filing a new complaint
///
/// Attachment references arrive already validated by the upload
/// boundary; the store never inspects them.
#[derive(Debug, Clone)]
pub struct NewComplaint {
    /// Short summary of the issue
    pub title: String,
    /// Detailed description
    pub description: String,
    /// Category selected at filing time
    pub category: String,
    /// Where the issue was observed
    pub location: String,
    /// Opaque attachment references
    pub attachment_refs: Vec<AttachmentRef>,
    /// Verified id of the filing user
    pub submitter: String,
}

/// Owner of all complaint entities
///
/// The store exclusively owns its complaints and hands out clones;
/// nothing outside it mutates an entity. Ids are issued from a counter
/// over the five-digit `CM` space and stay unique for the store's
/// whole lifetime.
pub struct ComplaintStore {
    classifier: PriorityClassifier,
    complaints: HashMap<ComplaintId, Complaint>,
    /// Insertion-ordered index over `complaints`
    order: Vec<ComplaintId>,
    next_id: u32,
    sinks: Vec<Arc<dyn EventSink>>,
}

impl ComplaintStore {
    /// Create an empty store using the given classifier
    pub fn new(classifier: PriorityClassifier) -> Self {
        Self {
            classifier,
            complaints: HashMap::new(),
            order: Vec::new(),
            next_id: ComplaintId::MIN,
            sinks: Vec::new(),
        }
    }

    /// Create an empty store with the default classifier tables
    pub fn with_default_classifier() -> Self {
        Self::new(PriorityClassifier::default_config())
    }

    /// Register an event sink
    ///
    /// Sinks are invoked synchronously, in registration order, inside
    /// every successful `create` and `transition`.
    pub fn subscribe(&mut self, sink: Arc<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// File a new complaint
    ///
    /// Validates the four required text fields (collecting all missing
    /// names), classifies priority, issues a fresh id, sets status
    /// `pending`, and emits a `Created` event.
    pub fn create(&mut self, new: NewComplaint) -> Result<Complaint, StoreError> {
        let mut missing = Vec::new();
        if new.title.trim().is_empty() {
            missing.push("title");
        }
        if new.description.trim().is_empty() {
            missing.push("description");
        }
        if new.category.trim().is_empty() {
            missing.push("category");
        }
        if new.location.trim().is_empty() {
            missing.push("location");
        }
        if !missing.is_empty() {
            return Err(StoreError::Validation { missing });
        }

        let priority = self
            .classifier
            .classify(&new.title, &new.description, &new.category);
        let id = self.issue_id()?;
        let now = now_ms();

        let complaint = Complaint {
            id,
            title: new.title,
            description: new.description,
            category: new.category,
            location: new.location,
            attachment_refs: new.attachment_refs,
            status: Status::Pending,
            priority,
            submitter: new.submitter,
            created_at: now,
            status_history: vec![StatusEntry {
                status: Status::Pending,
                at: now,
            }],
        };

        if self.complaints.contains_key(&id) {
            let violation = format!("complaint id collision on {}", id);
            tracing::error!("{}", violation);
            return Err(StoreError::InvariantViolation(violation));
        }
        self.complaints.insert(id, complaint.clone());
        self.order.push(id);

        tracing::info!(
            id = %id,
            priority = %priority,
            submitter = %complaint.submitter,
            "complaint created"
        );

        self.emit(&ComplaintEvent::Created {
            id,
            submitter: complaint.submitter.clone(),
            title: complaint.title.clone(),
            priority,
        });

        Ok(complaint)
    }

    /// Move a complaint to a new status
    ///
    /// Self-transitions are idempotent no-ops that append no history.
    /// Terminal states reject every change. On success the history
    /// grows by one entry and a `StatusChanged` event is emitted.
    pub fn transition(
        &mut self,
        id: ComplaintId,
        new_status: Status,
        actor: &str,
    ) -> Result<Complaint, StoreError> {
        let complaint = self
            .complaints
            .get_mut(&id)
            .ok_or(StoreError::NotFound(id))?;

        let current = complaint.status;
        if new_status == current {
            return Ok(complaint.clone());
        }
        if !current.can_transition_to(new_status) {
            return Err(StoreError::InvalidTransition {
                from: current,
                to: new_status,
            });
        }

        // Clamp against the last entry so history stays time-ordered
        // even if the wall clock steps backwards.
        let last_at = complaint
            .status_history
            .last()
            .map(|e| e.at)
            .unwrap_or(complaint.created_at);
        let at = now_ms().max(last_at);

        complaint.status = new_status;
        complaint.status_history.push(StatusEntry {
            status: new_status,
            at,
        });
        let snapshot = complaint.clone();

        tracing::info!(
            id = %id,
            from = %current,
            to = %new_status,
            actor = %actor,
            "complaint status changed"
        );

        self.emit(&ComplaintEvent::StatusChanged {
            id,
            submitter: snapshot.submitter.clone(),
            title: snapshot.title.clone(),
            from: current,
            to: new_status,
        });

        Ok(snapshot)
    }

    /// Look up a complaint by id
    pub fn get(&self, id: ComplaintId) -> Result<Complaint, StoreError> {
        self.complaints
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    /// All complaints filed by the given user, in filing order
    pub fn list_by_submitter(&self, submitter: &str) -> Vec<Complaint> {
        self.order
            .iter()
            .filter_map(|id| self.complaints.get(id))
            .filter(|c| c.submitter == submitter)
            .cloned()
            .collect()
    }

    /// All complaints, in filing order
    pub fn list_all(&self) -> Vec<Complaint> {
        self.order
            .iter()
            .filter_map(|id| self.complaints.get(id))
            .cloned()
            .collect()
    }

    /// Number of complaints in the store
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the store holds no complaints
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn issue_id(&mut self) -> Result<ComplaintId, StoreError> {
        let id = ComplaintId::from_number(self.next_id).ok_or_else(|| {
            let violation = "complaint id space exhausted".to_string();
            tracing::error!("{}", violation);
            StoreError::InvariantViolation(violation)
        })?;
        self.next_id += 1;
        Ok(id)
    }

    fn emit(&self, event: &ComplaintEvent) {
        for sink in &self.sinks {
            sink.on_complaint_event(event);
        }
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
    use civica_domain::Priority;
    use std::sync::Mutex;

    fn sample(submitter: &str) -> NewComplaint {
        NewComplaint {
            title: "Street light not working".to_string(),
            description: "The light at the Block A entrance has been off for a week.".to_string(),
            category: "electricity".to_string(),
            location: "Block A".to_string(),
            attachment_refs: vec![],
            submitter: submitter.to_string(),
        }
    }

    struct RecordingSink {
        events: Mutex<Vec<ComplaintEvent>>,
    }

    impl RecordingSink {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                events: Mutex::new(Vec::new()),
            })
        }

        fn count(&self) -> usize {
            self.events.lock().unwrap().len()
        }
    }

    impl EventSink for RecordingSink {
        fn on_complaint_event(&self, event: &ComplaintEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    #[test]
    fn test_create_assigns_pending_and_history() {
        let mut store = ComplaintStore::with_default_classifier();
        let complaint = store.create(sample("alice")).unwrap();

        assert_eq!(complaint.status, Status::Pending);
        assert_eq!(complaint.priority, Priority::Medium);
        assert_eq!(complaint.status_history.len(), 1);
        assert_eq!(complaint.status_history[0].status, Status::Pending);
        assert_eq!(complaint.status_history[0].at, complaint.created_at);
    }

    #[test]
    fn test_create_validates_all_fields_at_once() {
        let mut store = ComplaintStore::with_default_classifier();
        let result = store.create(NewComplaint {
            title: "  ".to_string(),
            description: String::new(),
            category: "water".to_string(),
            location: String::new(),
            attachment_refs: vec![],
            submitter: "alice".to_string(),
        });

        match result {
            Err(StoreError::Validation { missing }) => {
                assert_eq!(missing, vec!["title", "description", "location"]);
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_ids_are_unique_and_sequential_format() {
        let mut store = ComplaintStore::with_default_classifier();
        let a = store.create(sample("alice")).unwrap();
        let b = store.create(sample("bob")).unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(a.id.to_string(), "CM10000");
        assert_eq!(b.id.to_string(), "CM10001");
    }

    #[test]
    fn test_transition_happy_path() {
        let mut store = ComplaintStore::with_default_classifier();
        let id = store.create(sample("alice")).unwrap().id;

        let c = store.transition(id, Status::Processing, "authority-1").unwrap();
        assert_eq!(c.status, Status::Processing);
        assert_eq!(c.status_history.len(), 2);

        let c = store.transition(id, Status::Resolved, "authority-1").unwrap();
        assert_eq!(c.status, Status::Resolved);
        assert_eq!(c.status_history.len(), 3);
    }

    #[test]
    fn test_transition_unknown_id() {
        let mut store = ComplaintStore::with_default_classifier();
        let unknown = ComplaintId::from_number(99_999).unwrap();
        let result = store.transition(unknown, Status::Processing, "authority-1");
        assert_eq!(result, Err(StoreError::NotFound(unknown)));
    }

    #[test]
    fn test_transition_illegal_leaves_state_unchanged() {
        let mut store = ComplaintStore::with_default_classifier();
        let id = store.create(sample("alice")).unwrap().id;

        // pending -> resolved is not in the table
        let result = store.transition(id, Status::Resolved, "authority-1");
        assert_eq!(
            result,
            Err(StoreError::InvalidTransition {
                from: Status::Pending,
                to: Status::Resolved,
            })
        );

        let unchanged = store.get(id).unwrap();
        assert_eq!(unchanged.status, Status::Pending);
        assert_eq!(unchanged.status_history.len(), 1);
    }

    #[test]
    fn test_terminal_states_reject_transitions() {
        let mut store = ComplaintStore::with_default_classifier();
        let id = store.create(sample("alice")).unwrap().id;
        store.transition(id, Status::Rejected, "authority-1").unwrap();

        let result = store.transition(id, Status::Pending, "authority-1");
        assert_eq!(
            result,
            Err(StoreError::InvalidTransition {
                from: Status::Rejected,
                to: Status::Pending,
            })
        );
    }

    #[test]
    fn test_self_transition_is_idempotent() {
        let mut store = ComplaintStore::with_default_classifier();
        let sink = RecordingSink::new();
        store.subscribe(sink.clone());

        let id = store.create(sample("alice")).unwrap().id;
        let before = sink.count();

        let c = store.transition(id, Status::Pending, "authority-1").unwrap();
        assert_eq!(c.status, Status::Pending);
        assert_eq!(c.status_history.len(), 1);
        // No event for a no-op
        assert_eq!(sink.count(), before);
    }

    #[test]
    fn test_reopen_from_processing() {
        let mut store = ComplaintStore::with_default_classifier();
        let id = store.create(sample("alice")).unwrap().id;
        store.transition(id, Status::Processing, "authority-1").unwrap();
        let c = store.transition(id, Status::Pending, "authority-1").unwrap();
        assert_eq!(c.status, Status::Pending);
        assert_eq!(c.status_history.len(), 3);
    }

    #[test]
    fn test_history_timestamps_non_decreasing() {
        let mut store = ComplaintStore::with_default_classifier();
        let id = store.create(sample("alice")).unwrap().id;
        store.transition(id, Status::Processing, "authority-1").unwrap();
        store.transition(id, Status::Pending, "authority-1").unwrap();
        store.transition(id, Status::Rejected, "authority-1").unwrap();

        let history = store.get(id).unwrap().status_history;
        assert_eq!(history.len(), 4);
        for pair in history.windows(2) {
            assert!(pair[0].at <= pair[1].at);
        }
    }

    #[test]
    fn test_listing_preserves_insertion_order() {
        let mut store = ComplaintStore::with_default_classifier();
        let a = store.create(sample("alice")).unwrap().id;
        let b = store.create(sample("bob")).unwrap().id;
        let c = store.create(sample("alice")).unwrap().id;

        let all: Vec<_> = store.list_all().iter().map(|c| c.id).collect();
        assert_eq!(all, vec![a, b, c]);

        let alices: Vec<_> = store
            .list_by_submitter("alice")
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(alices, vec![a, c]);
        assert!(store.list_by_submitter("carol").is_empty());
    }

    #[test]
    fn test_every_lifecycle_event_reaches_sinks() {
        let mut store = ComplaintStore::with_default_classifier();
        let sink = RecordingSink::new();
        store.subscribe(sink.clone());

        let id = store.create(sample("alice")).unwrap().id;
        assert_eq!(sink.count(), 1);

        store.transition(id, Status::Processing, "authority-1").unwrap();
        assert_eq!(sink.count(), 2);

        let events = sink.events.lock().unwrap();
        assert!(matches!(events[0], ComplaintEvent::Created { .. }));
        assert!(matches!(
            events[1],
            ComplaintEvent::StatusChanged {
                from: Status::Pending,
                to: Status::Processing,
                ..
            }
        ));
    }
}
