// src/services/dump.rs

//! Offline source replaying a raw JSON dump.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;

use crate::error::Result;
use crate::models::{RawBoard, RawItem};

use super::ItemSource;

/// Accepted dump layouts: a full board, or just the item list.
#[derive(Deserialize)]
#[serde(untagged)]
enum DumpFile {
    Board(RawBoard),
    Items(Vec<RawItem>),
}

/// Source reading a dump previously written by a live run.
pub struct DumpSource {
    path: PathBuf,
}

impl DumpSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse dump bytes into a board.
    pub fn parse(bytes: &[u8]) -> Result<RawBoard> {
        Ok(match serde_json::from_slice::<DumpFile>(bytes)? {
            DumpFile::Board(board) => board,
            DumpFile::Items(items) => RawBoard {
                title: String::new(),
                url: String::new(),
                fetched_at: Utc::now(),
                items,
            },
        })
    }
}

#[async_trait]
impl ItemSource for DumpSource {
    async fn fetch(&self) -> Result<RawBoard> {
        let bytes = tokio::fs::read(&self.path).await?;
        let board = Self::parse(&bytes)?;
        log::info!(
            "Loaded {} items from {}",
            board.items.len(),
            self.path.display()
        );
        Ok(board)
    }

    fn describe(&self) -> String {
        format!("dump {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_board_dump() {
        let json = r#"{ "title": "Board", "url": "https://github.com/orgs/acme/projects/1",
                        "fetchedAt": "2026-03-02T12:00:00Z",
                        "items": [ { "id": "PVTI_1" } ] }"#;
        let board = DumpSource::parse(json.as_bytes()).unwrap();
        assert_eq!(board.title, "Board");
        assert_eq!(board.items.len(), 1);
    }

    #[test]
    fn test_parse_bare_item_list() {
        let json = r#"[ { "id": "PVTI_1", "content": null }, { "id": "PVTI_2" } ]"#;
        let board = DumpSource::parse(json.as_bytes()).unwrap();
        assert!(board.title.is_empty());
        assert_eq!(board.items[1].id, "PVTI_2");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(DumpSource::parse(b"{ not json").is_err());
    }

    #[tokio::test]
    async fn test_fetch_missing_file_is_io_error() {
        let source = DumpSource::new("/nonexistent/board_data.json");
        assert!(matches!(
            source.fetch().await,
            Err(crate::error::AppError::Io(_))
        ));
    }
}
