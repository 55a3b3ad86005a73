// src/pipeline/render.rs

//! Markdown rendering of a [`ChangeReport`].

use std::collections::HashMap;

use crate::models::{ChangeDetail, ChangeKind, ChangeRecord};
use crate::utils::text::escape_cell;

use super::assemble::{ChangeReport, ItemChanges};

/// Login shown when the upstream actor is unknown or deleted.
const GHOST: &str = "ghost";

/// Header values that depend on the caller's calendar and project.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Report date (`YYYY-MM-DD`)
    pub date: String,
    /// Window start as local `HH:MM`
    pub start_label: String,
    /// Window end as local `HH:MM`
    pub end_label: String,
    pub org: String,
    pub project_number: u32,
    /// Board URL; derived from org and number when absent
    pub project_url: Option<String>,
}

impl RenderContext {
    fn project_link(&self) -> String {
        self.project_url.clone().unwrap_or_else(|| {
            format!(
                "https://github.com/orgs/{}/projects/{}",
                self.org, self.project_number
            )
        })
    }
}

/// One human-readable line for a change.
pub fn describe(record: &ChangeRecord) -> String {
    let actor = record.actor.as_deref().unwrap_or(GHOST);

    match (&record.kind, &record.detail) {
        (ChangeKind::Added, _) => "🆕 **Added to Board**".to_string(),
        (ChangeKind::LabelAdded, ChangeDetail::Label { name }) => {
            format!("🏷 Added label `{name}`")
        }
        (ChangeKind::LabelRemoved, ChangeDetail::Label { name }) => {
            format!("🏷 Removed label `{name}`")
        }
        (ChangeKind::Assigned, ChangeDetail::Assignee { login }) => format!(
            "👤 Assigned @{} by @{actor}",
            login.as_deref().unwrap_or(GHOST)
        ),
        (ChangeKind::Unassigned, ChangeDetail::Assignee { login }) => format!(
            "👤 Unassigned @{} by @{actor}",
            login.as_deref().unwrap_or(GHOST)
        ),
        (ChangeKind::MilestoneAdded, ChangeDetail::Milestone { title }) => {
            format!("⛳ Added to milestone **{title}**")
        }
        (ChangeKind::MilestoneRemoved, ChangeDetail::Milestone { title }) => {
            format!("⛳ Removed from milestone **{title}**")
        }
        (ChangeKind::Renamed, ChangeDetail::Title { previous, current }) => {
            format!("✏️ Renamed from *'{previous}'* to *'{current}'*")
        }
        (ChangeKind::Closed, _) => format!("🔴 Closed by @{actor}"),
        (ChangeKind::Reopened, _) => format!("🟢 Reopened by @{actor}"),
        (ChangeKind::Commented, ChangeDetail::Comment { snippet }) => {
            format!("💬 Comment (@{actor}): \"{snippet}\"")
        }
        (ChangeKind::ImplicitMove, _) => "🔄 Board Item Updated".to_string(),
        (ChangeKind::UnknownEvent, ChangeDetail::Unknown { type_name }) => {
            format!("❓ {type_name} by @{actor}")
        }
        (kind, _) => format!("❓ {kind} by @{actor}"),
    }
}

fn issue_cell(item: &ItemChanges) -> String {
    let content = &item.content;
    format!(
        "**{}**<br>[{}#{}]({})",
        escape_cell(&content.title),
        escape_cell(&content.repository),
        content.number,
        content.url
    )
}

fn reference(item: &ItemChanges) -> String {
    format!("{}#{}", item.content.repository, item.content.number)
}

/// Render the full Markdown document.
pub fn render_markdown(report: &ChangeReport, context: &RenderContext) -> String {
    let mut lines = vec![
        "# Project Board Change Log".to_string(),
        String::new(),
        format!("**Date:** {}", context.date),
        format!(
            "**Window:** {} to {}",
            context.start_label, context.end_label
        ),
        format!(
            "**Project:** [{} Project #{}]({})",
            context.org,
            context.project_number,
            context.project_link()
        ),
        String::new(),
    ];

    if report.is_empty() {
        lines.push("*No changes detected in the specified timeframe.*".to_string());
    } else {
        lines.push("| Issue | Board Status | Actions Taken |".to_string());
        lines.push("|---|---|---|".to_string());

        for item in &report.items {
            let actions = item
                .changes
                .iter()
                .map(|change| escape_cell(&describe(change)))
                .collect::<Vec<_>>()
                .join("<br>");
            lines.push(format!(
                "| {} | **{}** | {} |",
                issue_cell(item),
                escape_cell(&item.status),
                actions
            ));
        }
    }

    if !report.truncation_risks.is_empty() {
        let by_id: HashMap<&str, &ItemChanges> = report
            .items
            .iter()
            .map(|item| (item.item_id.as_str(), item))
            .collect();
        let refs: Vec<String> = report
            .truncation_risks
            .iter()
            .map(|risk| {
                by_id
                    .get(risk.item_id.as_str())
                    .copied()
                    .map(reference)
                    .unwrap_or_else(|| risk.item_id.clone())
            })
            .collect();

        lines.push(String::new());
        lines.push(format!(
            "> **Note:** {} item(s) reached the fetched event/comment limit; \
             older changes inside the window may be missing: {}",
            refs.len(),
            refs.join(", ")
        ));
    }

    if !report.untimed_events.is_empty() {
        let total: usize = report.untimed_events.values().sum();
        let types: Vec<String> = report
            .untimed_events
            .iter()
            .map(|(type_name, count)| format!("{type_name} ×{count}"))
            .collect();
        lines.push(String::new());
        lines.push(format!(
            "> **Unplaced:** {total} timeline event(s) arrived without a timestamp: {}",
            types.join(", ")
        ));
    }

    if !report.warnings.is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "> **Skipped:** {} item(s) without usable timestamps or content.",
            report.warnings.len()
        ));
    }

    let mut document = lines.join("\n");
    document.push('\n');
    document
}
