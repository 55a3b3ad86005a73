use boardlog::models::{
    ChangeKind, ContentInfo, EventPayload, ItemSnapshot, RawComment, RawEvent, TimeWindow,
};
use boardlog::pipeline::{ChangeDetector, ReportAssembler};
use chrono::{DateTime, TimeZone, Utc};

fn at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, h, m, 0).unwrap()
}

fn item(id: &str, container: DateTime<Utc>, content: DateTime<Utc>) -> ItemSnapshot {
    ItemSnapshot {
        item_id: id.to_string(),
        container_updated_at: container,
        content_updated_at: content,
        created_at: at(0, 30),
        current_status: "Todo".to_string(),
        content: ContentInfo::default(),
        recent_events: Vec::new(),
        recent_comments: Vec::new(),
        fetched_event_count: 0,
        fetched_comment_count: 0,
        untimed_events: Vec::new(),
    }
}

fn board() -> Vec<ItemSnapshot> {
    // A: container moved, nothing explicit
    let a = item("A", at(10, 15), at(9, 0));

    // B: added in the window, no other signals
    let mut b = item("B", at(10, 5), at(10, 5));
    b.created_at = at(10, 5);

    // C: relevant through content; label event after the window, comment inside
    let mut c = item("C", at(7, 0), at(10, 40));
    c.recent_events.push(RawEvent {
        created_at: at(11, 42),
        actor: Some("bob".into()),
        payload: EventPayload::LabelAdded {
            label: "needs-review".into(),
        },
    });
    c.recent_comments.push(RawComment {
        created_at: at(10, 10),
        author: Some("carol".into()),
        body: "Looks good to me".into(),
    });

    // D: untouched
    let mut d = item("D", at(8, 0), at(8, 0));
    d.recent_events.push(RawEvent {
        created_at: at(10, 30),
        actor: None,
        payload: EventPayload::Closed,
    });

    vec![a, b, c, d]
}

#[test]
fn test_hour_window_scenario() {
    let window = TimeWindow::new(at(10, 0), at(11, 0)).unwrap();
    let records = ChangeDetector::default().detect(&window, &board());

    let summary: Vec<(&str, ChangeKind, DateTime<Utc>)> = records
        .iter()
        .map(|r| (r.item_id.as_str(), r.kind, r.timestamp))
        .collect();

    assert_eq!(
        summary,
        vec![
            ("A", ChangeKind::ImplicitMove, at(10, 15)),
            ("B", ChangeKind::Added, at(10, 5)),
            ("C", ChangeKind::Commented, at(10, 10)),
        ]
    );
}

#[test]
fn test_relevance_matches_timestamps() {
    let window = TimeWindow::new(at(10, 0), at(11, 0)).unwrap();
    for snapshot in board() {
        let expected = window.contains(snapshot.container_updated_at)
            || window.contains(snapshot.content_updated_at);
        assert_eq!(ChangeDetector::is_relevant(&window, &snapshot), expected);
    }
}

#[test]
fn test_implicit_move_exclusive_with_explicit() {
    let window = TimeWindow::new(at(10, 0), at(11, 0)).unwrap();
    let snapshots = board();
    let records = ChangeDetector::default().detect(&window, &snapshots);

    for snapshot in &snapshots {
        let own: Vec<_> = records
            .iter()
            .filter(|r| r.item_id == snapshot.item_id)
            .collect();
        let explicit = own.iter().filter(|r| r.is_explicit()).count();
        let implicit = own
            .iter()
            .filter(|r| r.kind == ChangeKind::ImplicitMove)
            .count();
        if explicit > 0 {
            assert_eq!(implicit, 0, "item {}", snapshot.item_id);
        }
        assert!(implicit <= 1);
        assert!(own.iter().all(|r| window.contains(r.timestamp)));
    }
}

#[test]
fn test_assembled_report_orders_by_first_change() {
    let window = TimeWindow::new(at(10, 0), at(11, 0)).unwrap();
    let snapshots = board();
    let detection = ChangeDetector::default().scan(&window, &snapshots);
    let report = ReportAssembler::assemble(&window, &snapshots, detection, Vec::new());

    let ids: Vec<&str> = report.items.iter().map(|i| i.item_id.as_str()).collect();
    assert_eq!(ids, vec!["B", "C", "A"]);
    assert_eq!(report.change_count(), 3);
}
