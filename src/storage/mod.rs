//! Storage for output artifacts.
//!
//! A run produces up to two files:
//!
//! ```text
//! {report_dir}/
//! ├── board_report_YYYY-MM-DD.md   # Rendered change log
//! └── board_data_YYYY-MM-DD.json   # Raw fetched items (replayable)
//! ```

pub mod local;

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;
use crate::models::RawBoard;

// Re-export for convenience
pub use local::LocalStorage;

/// Default report file name for a date.
pub fn report_file_name(date: NaiveDate) -> String {
    format!("board_report_{}.md", date.format("%Y-%m-%d"))
}

/// Default raw dump file name for a date.
pub fn dump_file_name(date: NaiveDate) -> String {
    format!("board_data_{}.json", date.format("%Y-%m-%d"))
}

/// Trait for artifact storage backends.
#[async_trait]
pub trait ArtifactStorage: Send + Sync {
    /// Write the rendered report, returning where it landed.
    async fn write_report(&self, name: &str, markdown: &str) -> Result<PathBuf>;

    /// Write the raw board as pretty JSON, returning where it landed.
    async fn write_dump(&self, name: &str, board: &RawBoard) -> Result<PathBuf>;
}
