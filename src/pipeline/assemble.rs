// src/pipeline/assemble.rs

//! Report assembly.
//!
//! Reshapes detector output into per-item groups for rendering. Nothing
//! here reclassifies or filters: timestamps and kinds pass through as-is.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{
    ChangeKind, ChangeRecord, ContentInfo, ItemSnapshot, NO_STATUS, SnapshotWarning, TimeWindow,
};

use super::detect::{Detection, TruncationRisk};

/// All changes of one board item.
#[derive(Debug, Clone, Serialize)]
pub struct ItemChanges {
    pub item_id: String,
    pub status: String,
    pub content: ContentInfo,
    pub changes: Vec<ChangeRecord>,
}

impl ItemChanges {
    /// Timestamp of the first change.
    pub fn earliest(&self) -> Option<DateTime<Utc>> {
        self.changes.iter().map(|c| c.timestamp).min()
    }
}

/// Grouped, read-only view handed to renderers.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeReport {
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub items: Vec<ItemChanges>,
    pub kind_counts: BTreeMap<ChangeKind, usize>,
    pub truncation_risks: Vec<TruncationRisk>,
    /// Timeline nodes without a timestamp, by type name
    pub untimed_events: BTreeMap<String, usize>,
    pub warnings: Vec<SnapshotWarning>,
}

impl ChangeReport {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn change_count(&self) -> usize {
        self.kind_counts.values().sum()
    }

    /// Every record of `kind`, in report order.
    pub fn by_kind(&self, kind: ChangeKind) -> Vec<&ChangeRecord> {
        self.items
            .iter()
            .flat_map(|item| item.changes.iter())
            .filter(|change| change.kind == kind)
            .collect()
    }
}

/// Groups change records by item.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportAssembler;

impl ReportAssembler {
    /// Build the report for `window` from a detection pass over `snapshots`.
    ///
    /// Items are ordered by their earliest change, then by board status and
    /// item id.
    pub fn assemble(
        window: &TimeWindow,
        snapshots: &[ItemSnapshot],
        detection: Detection,
        warnings: Vec<SnapshotWarning>,
    ) -> ChangeReport {
        let lookup: HashMap<&str, &ItemSnapshot> = snapshots
            .iter()
            .map(|s| (s.item_id.as_str(), s))
            .collect();

        let mut kind_counts = BTreeMap::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut items: Vec<ItemChanges> = Vec::new();

        for record in detection.changes {
            *kind_counts.entry(record.kind).or_insert(0) += 1;

            let index = match positions.get(&record.item_id) {
                Some(&index) => index,
                None => {
                    let snapshot = lookup.get(record.item_id.as_str());
                    items.push(ItemChanges {
                        item_id: record.item_id.clone(),
                        status: snapshot
                            .map(|s| s.current_status.clone())
                            .unwrap_or_else(|| NO_STATUS.to_string()),
                        content: snapshot.map(|s| s.content.clone()).unwrap_or_default(),
                        changes: Vec::new(),
                    });
                    positions.insert(record.item_id.clone(), items.len() - 1);
                    items.len() - 1
                }
            };
            items[index].changes.push(record);
        }

        items.sort_by(|a, b| {
            a.earliest()
                .cmp(&b.earliest())
                .then_with(|| a.status.cmp(&b.status))
                .then_with(|| a.item_id.cmp(&b.item_id))
        });

        ChangeReport {
            window_start: window.start(),
            window_end: window.end(),
            items,
            kind_counts,
            truncation_risks: detection.truncation_risks,
            untimed_events: detection.untimed_events,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, h, m, 0).unwrap()
    }

    fn snapshot(id: &str, status: &str) -> ItemSnapshot {
        ItemSnapshot {
            item_id: id.to_string(),
            container_updated_at: at(10, 0),
            content_updated_at: at(10, 0),
            created_at: at(1, 0),
            current_status: status.to_string(),
            content: ContentInfo {
                title: format!("Title {id}"),
                ..ContentInfo::default()
            },
            recent_events: Vec::new(),
            recent_comments: Vec::new(),
            fetched_event_count: 0,
            fetched_comment_count: 0,
            untimed_events: Vec::new(),
        }
    }

    fn record(id: &str, kind: ChangeKind, ts: DateTime<Utc>) -> ChangeRecord {
        ChangeRecord::bare(id, kind, ts)
    }

    fn window() -> TimeWindow {
        TimeWindow::new(at(10, 0), at(11, 0)).unwrap()
    }

    #[test]
    fn test_groups_by_item_and_orders_by_earliest() {
        let snapshots = vec![snapshot("A", "Todo"), snapshot("B", "Done")];
        let detection = Detection {
            changes: vec![
                record("A", ChangeKind::Commented, at(10, 30)),
                record("A", ChangeKind::Closed, at(10, 40)),
                record("B", ChangeKind::Added, at(10, 10)),
            ],
            relevant_items: 2,
            ..Detection::default()
        };

        let report = ReportAssembler::assemble(&window(), &snapshots, detection, Vec::new());
        assert_eq!(report.item_count(), 2);
        assert_eq!(report.items[0].item_id, "B");
        assert_eq!(report.items[1].item_id, "A");
        assert_eq!(report.items[1].changes.len(), 2);
        assert_eq!(report.items[1].status, "Todo");
        assert_eq!(report.items[1].content.title, "Title A");
        assert_eq!(report.change_count(), 3);
    }

    #[test]
    fn test_ties_broken_by_status_then_id() {
        let snapshots = vec![
            snapshot("Z", "Backlog"),
            snapshot("Y", "Todo"),
            snapshot("X", "Todo"),
        ];
        let detection = Detection {
            changes: vec![
                record("Y", ChangeKind::ImplicitMove, at(10, 5)),
                record("X", ChangeKind::ImplicitMove, at(10, 5)),
                record("Z", ChangeKind::ImplicitMove, at(10, 5)),
            ],
            ..Detection::default()
        };

        let report = ReportAssembler::assemble(&window(), &snapshots, detection, Vec::new());
        let ids: Vec<&str> = report.items.iter().map(|i| i.item_id.as_str()).collect();
        assert_eq!(ids, vec!["Z", "X", "Y"]);
    }

    #[test]
    fn test_records_pass_through_unchanged() {
        let snapshots = vec![snapshot("A", "Todo")];
        let original = vec![
            record("A", ChangeKind::Added, at(10, 1)),
            record("A", ChangeKind::UnknownEvent, at(10, 2)),
        ];
        let detection = Detection {
            changes: original.clone(),
            ..Detection::default()
        };

        let report = ReportAssembler::assemble(&window(), &snapshots, detection, Vec::new());
        assert_eq!(report.items[0].changes, original);
        assert_eq!(report.kind_counts.get(&ChangeKind::Added), Some(&1));
        assert_eq!(report.by_kind(ChangeKind::UnknownEvent).len(), 1);
        assert!(report.by_kind(ChangeKind::Closed).is_empty());
    }

    #[test]
    fn test_empty_detection() {
        let report =
            ReportAssembler::assemble(&window(), &[], Detection::default(), Vec::new());
        assert!(report.is_empty());
        assert_eq!(report.change_count(), 0);
        assert_eq!(report.window_start, at(10, 0));
    }
}
