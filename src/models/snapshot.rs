// src/models/snapshot.rs

//! Normalized view of one board item.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status shown when the item has no value for the status field.
pub const NO_STATUS: &str = "No Status";

/// Display metadata of the issue or pull request behind a board item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentInfo {
    pub repository: String,
    pub number: u64,
    pub title: String,
    pub url: String,
    /// Upstream state (OPEN, CLOSED, MERGED)
    pub state: String,
}

/// One board item as seen at fetch time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSnapshot {
    pub item_id: String,
    /// Last change of the board-level wrapper (position, field values)
    pub container_updated_at: DateTime<Utc>,
    /// Last change of the underlying issue or pull request
    pub content_updated_at: DateTime<Utc>,
    /// When the item was added to the board
    pub created_at: DateTime<Utc>,
    pub current_status: String,
    pub content: ContentInfo,
    /// Most recent events, oldest first, capped upstream
    pub recent_events: Vec<RawEvent>,
    /// Most recent comments, oldest first, capped upstream
    pub recent_comments: Vec<RawComment>,
    /// Timeline nodes returned upstream, timestamped or not
    pub fetched_event_count: usize,
    /// Comment nodes returned upstream, timestamped or not
    pub fetched_comment_count: usize,
    /// Type names of timeline nodes dropped for lack of a timestamp
    pub untimed_events: Vec<String>,
}

/// An explicit event reported by the upstream timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    pub created_at: DateTime<Utc>,
    pub actor: Option<String>,
    pub payload: EventPayload,
}

/// Upstream event type with the fields each type carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventPayload {
    LabelAdded { label: String },
    LabelRemoved { label: String },
    Assigned { assignee: Option<String> },
    Unassigned { assignee: Option<String> },
    MilestoneAdded { milestone: String },
    MilestoneRemoved { milestone: String },
    Renamed { previous: String, current: String },
    Closed,
    Reopened,
    Comment { body: String },
    /// Any type name outside the recognized set
    Other { type_name: String },
}

impl EventPayload {
    /// Upstream type name, used for noise filtering and diagnostics.
    pub fn type_name(&self) -> &str {
        match self {
            EventPayload::LabelAdded { .. } => "LabeledEvent",
            EventPayload::LabelRemoved { .. } => "UnlabeledEvent",
            EventPayload::Assigned { .. } => "AssignedEvent",
            EventPayload::Unassigned { .. } => "UnassignedEvent",
            EventPayload::MilestoneAdded { .. } => "MilestonedEvent",
            EventPayload::MilestoneRemoved { .. } => "DemilestonedEvent",
            EventPayload::Renamed { .. } => "RenamedTitleEvent",
            EventPayload::Closed => "ClosedEvent",
            EventPayload::Reopened => "ReopenedEvent",
            EventPayload::Comment { .. } => "IssueComment",
            EventPayload::Other { type_name } => type_name.as_str(),
        }
    }
}

/// A comment on the underlying content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawComment {
    pub created_at: DateTime<Utc>,
    pub author: Option<String>,
    pub body: String,
}

impl RawComment {
    /// View the comment as a timeline event so it classifies like one.
    pub fn as_event(&self) -> RawEvent {
        RawEvent {
            created_at: self.created_at,
            actor: self.author.clone(),
            payload: EventPayload::Comment {
                body: self.body.clone(),
            },
        }
    }
}

/// Non-fatal diagnostic for an item that could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotWarning {
    pub item_id: String,
    pub reason: String,
}

impl SnapshotWarning {
    pub fn new(item_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            reason: reason.into(),
        }
    }
}
