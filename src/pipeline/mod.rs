//! Pipeline stages for building a board change log.
//!
//! - `normalize`: raw API items → item snapshots
//! - `classify`: one event → one change record
//! - `detect`: window + snapshots → change records
//! - `assemble`: change records → per-item report
//! - `render`: report → Markdown
//! - `report`: the whole run, end to end

pub mod assemble;
pub mod classify;
pub mod detect;
pub mod normalize;
pub mod render;
pub mod report;

pub use assemble::{ChangeReport, ItemChanges, ReportAssembler};
pub use classify::EventClassifier;
pub use detect::{ChangeDetector, Detection, TruncationRisk, detect_changes};
pub use normalize::{Normalized, normalize};
pub use render::{RenderContext, describe, render_markdown};
pub use report::{ReportRequest, ReportSummary, build_report, run_report};
