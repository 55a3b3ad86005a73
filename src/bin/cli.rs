//! boardlog CLI
//!
//! Fetches a GitHub project board (or replays a raw dump) and writes the
//! Markdown change log for a time window.

use std::path::{Path, PathBuf};

use boardlog::{
    error::Result,
    models::Config,
    pipeline::{self, RenderContext, ReportRequest},
    services::{DumpSource, GitHubProjectSource, ItemSource, token::resolve_token},
    storage::{LocalStorage, dump_file_name, report_file_name},
    utils::log::level_filter,
    utils::time::{parse_date, resolve_window},
};
use chrono::Local;
use clap::Parser;
use log::LevelFilter;

/// boardlog - Project Board Change Log
#[derive(Parser, Debug)]
#[command(
    name = "boardlog",
    version,
    about = "Generate a project board change log for a time window"
)]
struct Cli {
    /// Date YYYY-MM-DD (defaults to today)
    #[arg(long)]
    date: Option<String>,

    /// Start time HH:MM (local)
    #[arg(long)]
    start: String,

    /// End time HH:MM (local). Defaults to now, or end of day for past dates
    #[arg(long)]
    end: Option<String>,

    /// GitHub organization (overrides config)
    #[arg(long)]
    org: Option<String>,

    /// Project V2 board number (overrides config)
    #[arg(long)]
    project_number: Option<u32>,

    /// Markdown report output path (default: board_report_YYYY-MM-DD.md)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON data output path (default: board_data_YYYY-MM-DD.json)
    #[arg(long)]
    json_file: Option<PathBuf>,

    /// Disable the raw JSON data dump
    #[arg(long)]
    no_dump_json: bool,

    /// Replay a previously dumped JSON file instead of fetching
    #[arg(long)]
    input: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long, default_value = "boardlog.toml")]
    config: PathBuf,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize logging based on verbosity flag.
///
/// Without `RUST_LOG`, the logger itself passes everything and the global
/// max level decides, so the configured level can be applied later.
fn init_logging(verbose: bool) {
    let from_env = std::env::var_os("RUST_LOG").is_some();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("trace"))
        .format_timestamp_secs()
        .init();
    if !from_env {
        log::set_max_level(if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        });
    }
}

/// Apply the configured level unless `-v` or `RUST_LOG` already chose one.
fn apply_config_level(verbose: bool, level: &str) {
    if !verbose && std::env::var_os("RUST_LOG").is_none() {
        log::set_max_level(level_filter(level));
    }
}

fn path_name(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config)?;
    apply_config_level(cli.verbose, &config.logging.level);
    if let Some(org) = &cli.org {
        config.github.org = org.clone();
    }
    if let Some(number) = cli.project_number {
        config.github.project_number = number;
    }
    if cli.no_dump_json {
        config.output.dump_json = false;
    }

    config.validate()?;

    // Resolve the window in local time
    let now = Local::now();
    let date = match &cli.date {
        Some(value) => parse_date(value)?,
        None => now.date_naive(),
    };
    let window = resolve_window(&Local, &now, date, &cli.start, cli.end.as_deref())?;
    log::info!(
        "Interpreting input time '{}' as local time ({}).",
        cli.start,
        now.format("%:z")
    );

    let render = RenderContext {
        date: date.format("%Y-%m-%d").to_string(),
        start_label: window.start().with_timezone(&Local).format("%H:%M").to_string(),
        end_label: window.end().with_timezone(&Local).format("%H:%M").to_string(),
        org: config.github.org.clone(),
        project_number: config.github.project_number,
        project_url: None,
    };

    let report_name = cli
        .output
        .as_deref()
        .map(path_name)
        .unwrap_or_else(|| report_file_name(date));

    // A replayed dump is not dumped again
    let dump_name = if config.output.dump_json && cli.input.is_none() {
        Some(
            cli.json_file
                .as_deref()
                .map(path_name)
                .unwrap_or_else(|| dump_file_name(date)),
        )
    } else {
        None
    };

    let source: Box<dyn ItemSource> = match &cli.input {
        Some(path) => Box::new(DumpSource::new(path)),
        None => {
            let token = resolve_token(&config.github).await?;
            Box::new(GitHubProjectSource::new(&config, &token)?)
        }
    };

    let storage = LocalStorage::new(&config.output.report_dir);
    let request = ReportRequest {
        window,
        render,
        report_name,
        dump_name,
    };

    let summary = pipeline::run_report(&config, &request, source.as_ref(), &storage).await?;

    println!(
        "✅ Report generated: {} ({} changes found)",
        summary.report_path.display(),
        summary.changed_items
    );

    Ok(())
}
