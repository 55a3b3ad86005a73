// src/models/raw.rs

//! Raw project item records as returned by the GitHub GraphQL API.
//!
//! Field names mirror the API so the same structures serve both the live
//! response and the JSON dump that can be replayed later. Timestamps stay
//! strings here; parsing happens during normalization, where a bad value
//! only excludes one item.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything fetched from one project board.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBoard {
    pub title: String,
    pub url: String,
    pub fetched_at: DateTime<Utc>,
    pub items: Vec<RawItem>,
}

/// GraphQL connection wrapper (`{ nodes: [...] }`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

/// A `ProjectV2Item` node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawItem {
    pub id: String,
    /// Card moved or edited
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Card added to the board
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub field_values: Connection<RawFieldValue>,
    /// `None` for draft items and content the token cannot see
    #[serde(default)]
    pub content: Option<RawContent>,
}

/// Single-select field value; other field types arrive as `{}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFieldValue {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub field: Option<RawFieldRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFieldRef {
    #[serde(default)]
    pub name: Option<String>,
}

/// Issue or pull request behind an item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContent {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub number: Option<u64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    /// Commented, labeled, closed, ...
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub repository: Option<RawRepository>,
    #[serde(default)]
    pub comments: Connection<RawCommentNode>,
    #[serde(default)]
    pub timeline_items: Connection<RawTimelineNode>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRepository {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawActor {
    #[serde(default)]
    pub login: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawLabel {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCommentNode {
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub body_text: Option<String>,
    #[serde(default)]
    pub author: Option<RawActor>,
}

/// One timeline item; which fields are set depends on `__typename`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTimelineNode {
    #[serde(rename = "__typename")]
    pub typename: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub actor: Option<RawActor>,
    #[serde(default)]
    pub label: Option<RawLabel>,
    #[serde(default)]
    pub assignee: Option<RawActor>,
    #[serde(default)]
    pub milestone_title: Option<String>,
    #[serde(default)]
    pub previous_title: Option<String>,
    #[serde(default)]
    pub current_title: Option<String>,
    #[serde(default)]
    pub body_text: Option<String>,
}
