//! Change detection over a board snapshot.
//!
//! The board API keeps no change log, so "what changed in the window" is
//! reconstructed from each item's own signals:
//!
//! 1. **Relevance**: the item is inspected only if its container or content
//!    timestamp falls inside the window.
//! 2. **Added**: creation time inside the window.
//! 3. **Explicit**: timeline events and comments whose own timestamp falls
//!    inside the window.
//! 4. **Implicit move**: a relevant item with nothing else to show for it is
//!    attributed to a status/position change, which the API cannot report.
//!
//! Event and comment lists are capped upstream, so an empty explicit set
//! only means nothing *visible* changed. Items whose lists hit the cap are
//! reported as [`TruncationRisk`]s, and timeline nodes that arrived without
//! a timestamp are counted per type so they never vanish silently.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::models::{ChangeKind, ChangeRecord, DetectionConfig, ItemSnapshot, TimeWindow};

use super::classify::EventClassifier;

/// An item whose event or comment list was possibly cut off upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TruncationRisk {
    pub item_id: String,
    pub events_at_limit: bool,
    pub comments_at_limit: bool,
}

/// Result of one detection pass.
#[derive(Debug, Clone, Default)]
pub struct Detection {
    /// Records grouped per item in input order, each group sorted by time
    pub changes: Vec<ChangeRecord>,
    /// Items that passed the relevance filter
    pub relevant_items: usize,
    pub truncation_risks: Vec<TruncationRisk>,
    /// Untimed timeline nodes of relevant items, by type name
    pub untimed_events: BTreeMap<String, usize>,
}

impl Detection {
    /// Check if there are any changes.
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Get the total number of change records.
    pub fn change_count(&self) -> usize {
        self.changes.len()
    }
}

/// Detector applying the relevance, explicit and implicit rules.
#[derive(Debug, Clone)]
pub struct ChangeDetector {
    classifier: EventClassifier,
    event_limit: usize,
    comment_limit: usize,
    ignored_events: HashSet<String>,
}

impl Default for ChangeDetector {
    fn default() -> Self {
        Self::new(&DetectionConfig::default())
    }
}

impl ChangeDetector {
    /// Create a detector from the detection settings.
    pub fn new(config: &DetectionConfig) -> Self {
        Self {
            classifier: EventClassifier::new(config.snippet_length),
            event_limit: config.event_limit,
            comment_limit: config.comment_limit,
            ignored_events: config.ignored_events.iter().cloned().collect(),
        }
    }

    /// Whether either freshness timestamp falls inside the window.
    pub fn is_relevant(window: &TimeWindow, item: &ItemSnapshot) -> bool {
        window.contains(item.container_updated_at) || window.contains(item.content_updated_at)
    }

    /// Classified changes of all relevant items.
    pub fn detect(&self, window: &TimeWindow, snapshots: &[ItemSnapshot]) -> Vec<ChangeRecord> {
        self.scan(window, snapshots).changes
    }

    /// Full detection pass including truncation diagnostics.
    pub fn scan(&self, window: &TimeWindow, snapshots: &[ItemSnapshot]) -> Detection {
        let mut detection = Detection::default();

        for item in snapshots {
            if !Self::is_relevant(window, item) {
                continue;
            }
            detection.relevant_items += 1;

            if let Some(risk) = self.truncation_risk(item) {
                log::debug!(
                    "Item {} may have older signals beyond the fetched lists",
                    item.item_id
                );
                detection.truncation_risks.push(risk);
            }

            for type_name in &item.untimed_events {
                if !self.ignored_events.contains(type_name) {
                    *detection.untimed_events.entry(type_name.clone()).or_insert(0) += 1;
                }
            }

            let records = self.detect_item(window, item);
            log::debug!("Item {}: {} change(s)", item.item_id, records.len());
            detection.changes.extend(records);
        }

        detection
    }

    /// Records for one relevant item, sorted by timestamp.
    fn detect_item(&self, window: &TimeWindow, item: &ItemSnapshot) -> Vec<ChangeRecord> {
        let mut records = Vec::new();

        let added = window.contains(item.created_at);
        if added {
            records.push(ChangeRecord::bare(
                &item.item_id,
                ChangeKind::Added,
                item.created_at,
            ));
        }

        let before_explicit = records.len();
        for event in &item.recent_events {
            if window.contains(event.created_at)
                && !self.ignored_events.contains(event.payload.type_name())
            {
                records.push(self.classifier.classify(&item.item_id, event));
            }
        }
        for comment in &item.recent_comments {
            if window.contains(comment.created_at) {
                records.push(self.classifier.classify(&item.item_id, &comment.as_event()));
            }
        }

        // An in-window Added already explains the container timestamp.
        if !added && records.len() == before_explicit {
            let timestamp = if window.contains(item.container_updated_at) {
                item.container_updated_at
            } else {
                item.content_updated_at
            };
            records.push(ChangeRecord::bare(
                &item.item_id,
                ChangeKind::ImplicitMove,
                timestamp,
            ));
        }

        records.sort_by_key(|record| record.timestamp);
        records
    }

    fn truncation_risk(&self, item: &ItemSnapshot) -> Option<TruncationRisk> {
        let events_at_limit = item.fetched_event_count >= self.event_limit;
        let comments_at_limit = item.fetched_comment_count >= self.comment_limit;

        (events_at_limit || comments_at_limit).then(|| TruncationRisk {
            item_id: item.item_id.clone(),
            events_at_limit,
            comments_at_limit,
        })
    }
}

/// Convenience function to detect changes with default settings.
pub fn detect_changes(window: &TimeWindow, snapshots: &[ItemSnapshot]) -> Vec<ChangeRecord> {
    ChangeDetector::default().detect(window, snapshots)
}
