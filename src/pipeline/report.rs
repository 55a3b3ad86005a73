// src/pipeline/report.rs

//! End-to-end report pipeline: fetch → dump → normalize → detect →
//! assemble → render → write.

use std::path::PathBuf;

use crate::error::Result;
use crate::models::{Config, RawBoard, TimeWindow};
use crate::services::ItemSource;
use crate::storage::ArtifactStorage;
use crate::utils::log::{header, step, sub_item, summary};

use super::assemble::{ChangeReport, ReportAssembler};
use super::detect::ChangeDetector;
use super::normalize::normalize;
use super::render::{RenderContext, render_markdown};

/// What to produce for one run.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub window: TimeWindow,
    pub render: RenderContext,
    /// Report file name (relative to the storage root, or absolute)
    pub report_name: String,
    /// Raw dump file name; `None` disables the dump
    pub dump_name: Option<String>,
}

/// Counts and paths of a finished run.
#[derive(Debug, Clone)]
pub struct ReportSummary {
    pub report_path: PathBuf,
    pub dump_path: Option<PathBuf>,
    pub fetched_items: usize,
    pub changed_items: usize,
    pub change_count: usize,
    pub warnings: usize,
    pub truncation_risks: usize,
    pub untimed_events: usize,
}

/// Normalize, detect and assemble the report for an already fetched board.
pub fn build_report(config: &Config, window: &TimeWindow, board: &RawBoard) -> ChangeReport {
    let normalized = normalize(&board.items, &config.github.status_field);
    let detection = ChangeDetector::new(&config.detection).scan(window, &normalized.snapshots);

    log::info!(
        "{} of {} items touched in {}",
        detection.relevant_items,
        normalized.snapshots.len(),
        window
    );
    if !detection.truncation_risks.is_empty() {
        log::warn!(
            "{} item(s) reached the event/comment fetch limit; \
             older in-window changes may be missing",
            detection.truncation_risks.len()
        );
    }
    for (type_name, count) in &detection.untimed_events {
        log::warn!("{count} {type_name} node(s) arrived without a timestamp; not placed");
    }

    ReportAssembler::assemble(window, &normalized.snapshots, detection, normalized.warnings)
}

/// Run the full pipeline against `source`, writing artifacts to `storage`.
pub async fn run_report(
    config: &Config,
    request: &ReportRequest,
    source: &dyn ItemSource,
    storage: &dyn ArtifactStorage,
) -> Result<ReportSummary> {
    header("Project Board Change Log");
    let total_steps = if request.dump_name.is_some() { 4 } else { 3 };
    let mut current_step = 1;

    step(
        current_step,
        total_steps,
        &format!("Fetch - {}", source.describe()),
    );
    let board = source.fetch().await?;
    current_step += 1;

    let dump_path = match &request.dump_name {
        Some(name) => {
            step(current_step, total_steps, "Dump - Saving raw data");
            current_step += 1;
            Some(storage.write_dump(name, &board).await?)
        }
        None => None,
    };

    step(current_step, total_steps, "Detect - Filtering items for changes");
    let report = build_report(config, &request.window, &board);
    current_step += 1;

    step(current_step, total_steps, "Render - Writing Markdown report");
    let mut context = request.render.clone();
    if context.project_url.is_none() && !board.url.is_empty() {
        context.project_url = Some(board.url.clone());
    }
    let markdown = render_markdown(&report, &context);
    let report_path = storage.write_report(&request.report_name, &markdown).await?;
    sub_item(&format!("Report: {}", report_path.display()));

    let result = ReportSummary {
        report_path,
        dump_path,
        fetched_items: board.items.len(),
        changed_items: report.item_count(),
        change_count: report.change_count(),
        warnings: report.warnings.len(),
        truncation_risks: report.truncation_risks.len(),
        untimed_events: report.untimed_events.values().sum(),
    };

    summary(
        "Change detection",
        &[
            ("Items fetched", result.fetched_items.to_string()),
            ("Items changed", result.changed_items.to_string()),
            ("Change records", result.change_count.to_string()),
            ("Skipped items", result.warnings.to_string()),
            ("Truncation risks", result.truncation_risks.to_string()),
            ("Untimed events", result.untimed_events.to_string()),
        ],
    );

    Ok(result)
}
