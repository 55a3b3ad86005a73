// src/models/change.rs

//! Change records produced by the detector.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Why an item shows up in the change log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ChangeKind {
    Added,
    LabelAdded,
    LabelRemoved,
    Assigned,
    Unassigned,
    MilestoneAdded,
    MilestoneRemoved,
    Renamed,
    Closed,
    Reopened,
    Commented,
    ImplicitMove,
    UnknownEvent,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Added => "added",
            ChangeKind::LabelAdded => "label-added",
            ChangeKind::LabelRemoved => "label-removed",
            ChangeKind::Assigned => "assigned",
            ChangeKind::Unassigned => "unassigned",
            ChangeKind::MilestoneAdded => "milestone-added",
            ChangeKind::MilestoneRemoved => "milestone-removed",
            ChangeKind::Renamed => "renamed",
            ChangeKind::Closed => "closed",
            ChangeKind::Reopened => "reopened",
            ChangeKind::Commented => "commented",
            ChangeKind::ImplicitMove => "implicit-move",
            ChangeKind::UnknownEvent => "unknown-event",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific payload of a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeDetail {
    None,
    Label { name: String },
    Assignee { login: Option<String> },
    Milestone { title: String },
    Title { previous: String, current: String },
    Comment { snippet: String },
    Unknown { type_name: String },
}

/// One classified change of one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeRecord {
    pub item_id: String,
    pub kind: ChangeKind,
    pub timestamp: DateTime<Utc>,
    pub actor: Option<String>,
    pub detail: ChangeDetail,
}

impl ChangeRecord {
    /// Record without actor or detail (Added, ImplicitMove).
    pub fn bare(item_id: impl Into<String>, kind: ChangeKind, timestamp: DateTime<Utc>) -> Self {
        Self {
            item_id: item_id.into(),
            kind,
            timestamp,
            actor: None,
            detail: ChangeDetail::None,
        }
    }

    /// Explicit records are the ones backed by an upstream event or comment.
    pub fn is_explicit(&self) -> bool {
        !matches!(self.kind, ChangeKind::Added | ChangeKind::ImplicitMove)
    }
}
