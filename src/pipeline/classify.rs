// src/pipeline/classify.rs

//! Event classification.
//!
//! Maps one upstream event (or comment) onto a [`ChangeRecord`]. The
//! mapping is total: unrecognized event types become
//! [`ChangeKind::UnknownEvent`] instead of failing the pass.

use crate::models::{ChangeDetail, ChangeKind, ChangeRecord, EventPayload, RawEvent};
use crate::utils::text::snippet;

/// Classifier for explicit timeline events.
#[derive(Debug, Clone)]
pub struct EventClassifier {
    snippet_length: usize,
}

impl Default for EventClassifier {
    fn default() -> Self {
        Self::new(120)
    }
}

impl EventClassifier {
    /// Create a classifier keeping `snippet_length` characters of comment bodies.
    pub fn new(snippet_length: usize) -> Self {
        Self { snippet_length }
    }

    /// Classify one event of the item `item_id`.
    pub fn classify(&self, item_id: &str, event: &RawEvent) -> ChangeRecord {
        let (kind, detail) = match &event.payload {
            EventPayload::LabelAdded { label } => (
                ChangeKind::LabelAdded,
                ChangeDetail::Label {
                    name: label.clone(),
                },
            ),
            EventPayload::LabelRemoved { label } => (
                ChangeKind::LabelRemoved,
                ChangeDetail::Label {
                    name: label.clone(),
                },
            ),
            EventPayload::Assigned { assignee } => (
                ChangeKind::Assigned,
                ChangeDetail::Assignee {
                    login: assignee.clone(),
                },
            ),
            EventPayload::Unassigned { assignee } => (
                ChangeKind::Unassigned,
                ChangeDetail::Assignee {
                    login: assignee.clone(),
                },
            ),
            EventPayload::MilestoneAdded { milestone } => (
                ChangeKind::MilestoneAdded,
                ChangeDetail::Milestone {
                    title: milestone.clone(),
                },
            ),
            EventPayload::MilestoneRemoved { milestone } => (
                ChangeKind::MilestoneRemoved,
                ChangeDetail::Milestone {
                    title: milestone.clone(),
                },
            ),
            EventPayload::Renamed { previous, current } => (
                ChangeKind::Renamed,
                ChangeDetail::Title {
                    previous: previous.clone(),
                    current: current.clone(),
                },
            ),
            EventPayload::Closed => (ChangeKind::Closed, ChangeDetail::None),
            EventPayload::Reopened => (ChangeKind::Reopened, ChangeDetail::None),
            EventPayload::Comment { body } => (
                ChangeKind::Commented,
                ChangeDetail::Comment {
                    snippet: snippet(body, self.snippet_length),
                },
            ),
            EventPayload::Other { type_name } => (
                ChangeKind::UnknownEvent,
                ChangeDetail::Unknown {
                    type_name: type_name.clone(),
                },
            ),
        };

        ChangeRecord {
            item_id: item_id.to_string(),
            kind,
            timestamp: event.created_at,
            actor: event.actor.clone(),
            detail,
        }
    }
}
