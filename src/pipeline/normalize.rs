// src/pipeline/normalize.rs

//! Normalization of raw API items into [`ItemSnapshot`]s.
//!
//! An item without a usable timestamp can never be judged relevant, so it is
//! excluded and reported as a [`SnapshotWarning`] instead of aborting the run.

use chrono::{DateTime, Utc};

use crate::models::{
    ContentInfo, EventPayload, ItemSnapshot, NO_STATUS, RawComment, RawCommentNode, RawContent,
    RawEvent, RawItem, RawTimelineNode, SnapshotWarning,
};

const COMMENT_TYPE: &str = "IssueComment";

/// Snapshots plus the items that had to be skipped.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub snapshots: Vec<ItemSnapshot>,
    pub warnings: Vec<SnapshotWarning>,
}

/// Normalize every raw item, reading the board column from `status_field`.
pub fn normalize(items: &[RawItem], status_field: &str) -> Normalized {
    let mut normalized = Normalized::default();

    for item in items {
        match to_snapshot(item, status_field) {
            Ok(snapshot) => normalized.snapshots.push(snapshot),
            Err(warning) => {
                log::warn!("Skipping item {}: {}", warning.item_id, warning.reason);
                normalized.warnings.push(warning);
            }
        }
    }

    normalized
}

/// Convert one raw item.
pub fn to_snapshot(
    item: &RawItem,
    status_field: &str,
) -> std::result::Result<ItemSnapshot, SnapshotWarning> {
    let content = item.content.as_ref().ok_or_else(|| {
        SnapshotWarning::new(&item.id, "draft or inaccessible item has no content")
    })?;

    let container_updated_at = required_timestamp(&item.id, "updatedAt", &item.updated_at)?;
    let created_at = required_timestamp(&item.id, "createdAt", &item.created_at)?;
    let content_updated_at =
        required_timestamp(&item.id, "content.updatedAt", &content.updated_at)?;

    let (recent_events, untimed_events) = events_of(&item.id, content);

    Ok(ItemSnapshot {
        item_id: item.id.clone(),
        container_updated_at,
        content_updated_at,
        created_at,
        current_status: status_of(item, status_field),
        content: content_info(content),
        recent_events,
        recent_comments: comments_of(&item.id, content),
        fetched_event_count: content.timeline_items.nodes.len(),
        fetched_comment_count: content.comments.nodes.len(),
        untimed_events,
    })
}

/// Parse an RFC 3339 timestamp.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn required_timestamp(
    item_id: &str,
    field: &str,
    value: &Option<String>,
) -> std::result::Result<DateTime<Utc>, SnapshotWarning> {
    let raw = value
        .as_deref()
        .ok_or_else(|| SnapshotWarning::new(item_id, format!("missing {field}")))?;
    parse_timestamp(raw)
        .ok_or_else(|| SnapshotWarning::new(item_id, format!("unparseable {field} '{raw}'")))
}

fn status_of(item: &RawItem, status_field: &str) -> String {
    item.field_values
        .nodes
        .iter()
        .filter(|value| {
            value
                .field
                .as_ref()
                .and_then(|field| field.name.as_deref())
                == Some(status_field)
        })
        .filter_map(|value| value.name.clone())
        .last()
        .unwrap_or_else(|| NO_STATUS.to_string())
}

fn content_info(content: &RawContent) -> ContentInfo {
    ContentInfo {
        repository: content
            .repository
            .as_ref()
            .map(|repo| repo.name.clone())
            .unwrap_or_default(),
        number: content.number.unwrap_or_default(),
        title: content.title.clone().unwrap_or_default(),
        url: content.url.clone().unwrap_or_default(),
        state: content.state.clone().unwrap_or_default(),
    }
}

/// Timeline events with a usable timestamp, plus the type names of those
/// without one. Comments are read from their own connection, so untimed
/// `IssueComment` nodes are not reported.
fn events_of(item_id: &str, content: &RawContent) -> (Vec<RawEvent>, Vec<String>) {
    let mut events = Vec::new();
    let mut untimed = Vec::new();

    for node in &content.timeline_items.nodes {
        match node.created_at.as_deref().and_then(parse_timestamp) {
            Some(created_at) => events.push(RawEvent {
                created_at,
                actor: node.actor.as_ref().and_then(|a| a.login.clone()),
                payload: payload_of(node),
            }),
            None if node.typename == COMMENT_TYPE => {}
            None => {
                log::debug!("Item {item_id}: {} has no timestamp", node.typename);
                untimed.push(node.typename.clone());
            }
        }
    }

    (events, untimed)
}

/// Typed payload; a recognized type missing its field degrades to `Other`.
fn payload_of(node: &RawTimelineNode) -> EventPayload {
    let label = node.label.as_ref().map(|l| l.name.clone());
    let assignee = node.assignee.as_ref().and_then(|a| a.login.clone());

    let payload = match node.typename.as_str() {
        "LabeledEvent" => label.map(|label| EventPayload::LabelAdded { label }),
        "UnlabeledEvent" => label.map(|label| EventPayload::LabelRemoved { label }),
        "AssignedEvent" => Some(EventPayload::Assigned { assignee }),
        "UnassignedEvent" => Some(EventPayload::Unassigned { assignee }),
        "MilestonedEvent" => node
            .milestone_title
            .clone()
            .map(|milestone| EventPayload::MilestoneAdded { milestone }),
        "DemilestonedEvent" => node
            .milestone_title
            .clone()
            .map(|milestone| EventPayload::MilestoneRemoved { milestone }),
        "RenamedTitleEvent" => match (&node.previous_title, &node.current_title) {
            (Some(previous), Some(current)) => Some(EventPayload::Renamed {
                previous: previous.clone(),
                current: current.clone(),
            }),
            _ => None,
        },
        "ClosedEvent" => Some(EventPayload::Closed),
        "ReopenedEvent" => Some(EventPayload::Reopened),
        COMMENT_TYPE => node
            .body_text
            .clone()
            .map(|body| EventPayload::Comment { body }),
        _ => None,
    };

    payload.unwrap_or_else(|| EventPayload::Other {
        type_name: node.typename.clone(),
    })
}

fn comments_of(item_id: &str, content: &RawContent) -> Vec<RawComment> {
    content
        .comments
        .nodes
        .iter()
        .filter_map(|node: &RawCommentNode| {
            let Some(created_at) = node.created_at.as_deref().and_then(parse_timestamp) else {
                log::debug!("Item {item_id}: dropping comment without timestamp");
                return None;
            };
            Some(RawComment {
                created_at,
                author: node.author.as_ref().and_then(|a| a.login.clone()),
                body: node.body_text.clone().unwrap_or_default(),
            })
        })
        .collect()
}
