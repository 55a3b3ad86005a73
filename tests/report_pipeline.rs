use boardlog::models::{Config, TimeWindow};
use boardlog::pipeline::{RenderContext, ReportRequest, run_report};
use boardlog::services::DumpSource;
use boardlog::storage::LocalStorage;
use chrono::{TimeZone, Utc};

const DUMP: &str = r#"{
  "title": "TOC Board",
  "url": "https://github.com/orgs/acme/projects/7",
  "fetchedAt": "2026-03-02T12:00:00Z",
  "items": [
    {
      "id": "PVTI_moved",
      "updatedAt": "2026-03-02T10:15:00Z",
      "createdAt": "2026-01-01T00:00:00Z",
      "fieldValues": { "nodes": [ { "name": "In Review", "field": { "name": "Status" } } ] },
      "content": {
        "title": "Graduate project",
        "number": 12,
        "url": "https://github.com/acme/toc/issues/12",
        "state": "OPEN",
        "updatedAt": "2026-03-01T09:00:00Z",
        "repository": { "name": "toc" },
        "comments": { "nodes": [] },
        "timelineItems": { "nodes": [] }
      }
    },
    {
      "id": "PVTI_labeled",
      "updatedAt": "2026-03-02T10:20:00Z",
      "createdAt": "2026-01-01T00:00:00Z",
      "fieldValues": { "nodes": [ {} ] },
      "content": {
        "title": "Fix <docs>",
        "number": 13,
        "url": "https://github.com/acme/toc/issues/13",
        "state": "CLOSED",
        "updatedAt": "2026-03-02T10:20:00Z",
        "repository": { "name": "toc" },
        "comments": { "nodes": [] },
        "timelineItems": { "nodes": [
          { "__typename": "LabeledEvent", "createdAt": "2026-03-02T10:18:00Z",
            "actor": { "login": "bob" }, "label": { "name": "docs" } },
          { "__typename": "ClosedEvent", "createdAt": "2026-03-02T10:20:00Z",
            "actor": { "login": "bob" } },
          { "__typename": "SubscribedEvent", "createdAt": "2026-03-02T10:19:00Z" }
        ] }
      }
    },
    {
      "id": "PVTI_broken",
      "updatedAt": "2026-03-02T10:20:00Z",
      "createdAt": null,
      "content": { "updatedAt": "2026-03-02T10:20:00Z" }
    },
    {
      "id": "PVTI_old",
      "updatedAt": "2026-02-01T10:00:00Z",
      "createdAt": "2026-01-01T00:00:00Z",
      "content": { "updatedAt": "2026-02-01T10:00:00Z", "number": 1 }
    }
  ]
}"#;

fn request(dump_name: Option<&str>) -> ReportRequest {
    ReportRequest {
        window: TimeWindow::new(
            Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 2, 11, 0, 0).unwrap(),
        )
        .unwrap(),
        render: RenderContext {
            date: "2026-03-02".into(),
            start_label: "10:00".into(),
            end_label: "11:00".into(),
            org: "acme".into(),
            project_number: 7,
            project_url: None,
        },
        report_name: "board_report_2026-03-02.md".into(),
        dump_name: dump_name.map(str::to_string),
    }
}

#[tokio::test]
async fn test_replay_dump_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let dump_path = dir.path().join("input.json");
    std::fs::write(&dump_path, DUMP).unwrap();

    let storage = LocalStorage::new(dir.path().join("out"));
    let source = DumpSource::new(&dump_path);
    let summary = run_report(&Config::default(), &request(None), &source, &storage)
        .await
        .unwrap();

    assert_eq!(summary.fetched_items, 4);
    assert_eq!(summary.changed_items, 2);
    assert_eq!(summary.change_count, 3);
    assert_eq!(summary.warnings, 1);
    assert!(summary.dump_path.is_none());

    let markdown = std::fs::read_to_string(&summary.report_path).unwrap();
    assert!(markdown.contains("[acme Project #7](https://github.com/orgs/acme/projects/7)"));
    assert!(markdown.contains(
        "| **Graduate project**<br>[toc#12](https://github.com/acme/toc/issues/12) \
         | **In Review** | 🔄 Board Item Updated |"
    ));
    assert!(markdown.contains("**Fix &lt;docs&gt;**"));
    assert!(
        markdown.contains("| **No Status** | 🏷 Added label `docs`<br>🔴 Closed by @bob |")
    );
    assert!(!markdown.contains("SubscribedEvent"));
    assert!(markdown.contains("**Skipped:** 1 item(s)"));
}

#[tokio::test]
async fn test_dump_written_when_requested() {
    let dir = tempfile::tempdir().unwrap();
    let dump_path = dir.path().join("input.json");
    std::fs::write(&dump_path, DUMP).unwrap();

    let storage = LocalStorage::new(dir.path());
    let source = DumpSource::new(&dump_path);
    let summary = run_report(
        &Config::default(),
        &request(Some("board_data_2026-03-02.json")),
        &source,
        &storage,
    )
    .await
    .unwrap();

    let written = summary.dump_path.unwrap();
    let replayed = DumpSource::parse(&std::fs::read(written).unwrap()).unwrap();
    assert_eq!(replayed.items.len(), 4);
    assert_eq!(replayed.title, "TOC Board");
}
