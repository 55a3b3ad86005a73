//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// GitHub API and project selection
    #[serde(default)]
    pub github: GitHubConfig,

    /// Change detection bounds
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Output artifacts
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration, falling back to defaults only when the file is
    /// absent. A file that exists but cannot be read or parsed is an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::warn!("Config file {:?} not found. Using defaults.", path);
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.github.api_url)?;
        if self.github.org.trim().is_empty() {
            return Err(AppError::validation("github.org is empty"));
        }
        if self.github.project_number == 0 {
            return Err(AppError::validation("github.project_number must be > 0"));
        }
        if self.github.user_agent.trim().is_empty() {
            return Err(AppError::validation("github.user_agent is empty"));
        }
        if self.github.timeout_secs == 0 {
            return Err(AppError::validation("github.timeout_secs must be > 0"));
        }
        if !(1..=100).contains(&self.github.page_size) {
            return Err(AppError::validation(
                "github.page_size must be between 1 and 100",
            ));
        }
        if !(1..=100).contains(&self.detection.event_limit) {
            return Err(AppError::validation(
                "detection.event_limit must be between 1 and 100",
            ));
        }
        if !(1..=100).contains(&self.detection.comment_limit) {
            return Err(AppError::validation(
                "detection.comment_limit must be between 1 and 100",
            ));
        }
        if self.detection.snippet_length == 0 {
            return Err(AppError::validation("detection.snippet_length must be > 0"));
        }
        Ok(())
    }
}

/// GitHub GraphQL settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// GraphQL endpoint
    #[serde(default = "defaults::api_url")]
    pub api_url: String,

    /// Organization owning the project
    #[serde(default = "defaults::org")]
    pub org: String,

    /// Project (V2) number within the organization
    #[serde(default = "defaults::project_number")]
    pub project_number: u32,

    /// Single-select field shown as the board column
    #[serde(default = "defaults::status_field")]
    pub status_field: String,

    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Items per page (API maximum is 100)
    #[serde(default = "defaults::page_size")]
    pub page_size: u32,

    /// Retries per page on transport errors and 5xx responses
    #[serde(default = "defaults::max_retries")]
    pub max_retries: u32,

    /// Base delay between retries in milliseconds
    #[serde(default = "defaults::retry_delay")]
    pub retry_delay_ms: u64,

    /// Environment variable checked for a token before asking `gh`
    #[serde(default = "defaults::token_env")]
    pub token_env: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: defaults::api_url(),
            org: defaults::org(),
            project_number: defaults::project_number(),
            status_field: defaults::status_field(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            page_size: defaults::page_size(),
            max_retries: defaults::max_retries(),
            retry_delay_ms: defaults::retry_delay(),
            token_env: defaults::token_env(),
        }
    }
}

/// Bounds of the recency-limited lists and noise filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Timeline events fetched per item (most recent)
    #[serde(default = "defaults::event_limit")]
    pub event_limit: usize,

    /// Comments fetched per item (most recent)
    #[serde(default = "defaults::comment_limit")]
    pub comment_limit: usize,

    /// Characters kept from a comment body
    #[serde(default = "defaults::snippet_length")]
    pub snippet_length: usize,

    /// Event type names dropped before classification
    #[serde(default = "defaults::ignored_events")]
    pub ignored_events: Vec<String>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            event_limit: defaults::event_limit(),
            comment_limit: defaults::comment_limit(),
            snippet_length: defaults::snippet_length(),
            ignored_events: defaults::ignored_events(),
        }
    }
}

/// Output artifact settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for the report and the raw dump
    #[serde(default = "defaults::report_dir")]
    pub report_dir: String,

    /// Write the raw fetched data as JSON next to the report
    #[serde(default = "defaults::dump_json")]
    pub dump_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_dir: defaults::report_dir(),
            dump_json: defaults::dump_json(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    // GitHub defaults
    pub fn api_url() -> String {
        "https://api.github.com/graphql".into()
    }
    pub fn org() -> String {
        "cncf".into()
    }
    pub fn project_number() -> u32 {
        88
    }
    pub fn status_field() -> String {
        "Status".into()
    }
    pub fn user_agent() -> String {
        concat!("boardlog/", env!("CARGO_PKG_VERSION")).into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn page_size() -> u32 {
        100
    }
    pub fn max_retries() -> u32 {
        3
    }
    pub fn retry_delay() -> u64 {
        500
    }
    pub fn token_env() -> String {
        "GITHUB_TOKEN".into()
    }

    // Detection defaults
    pub fn event_limit() -> usize {
        20
    }
    pub fn comment_limit() -> usize {
        10
    }
    pub fn snippet_length() -> usize {
        120
    }
    pub fn ignored_events() -> Vec<String> {
        vec!["MentionedEvent".into(), "SubscribedEvent".into()]
    }

    // Output defaults
    pub fn report_dir() -> String {
        ".".into()
    }
    pub fn dump_json() -> bool {
        true
    }

    pub fn log_level() -> String {
        "info".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn defaults_match_recency_bounds() {
        let config = Config::default();
        assert_eq!(config.detection.event_limit, 20);
        assert_eq!(config.detection.comment_limit, 10);
        assert_eq!(config.detection.snippet_length, 120);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [github]
            org = "acme"

            [detection]
            event_limit = 50
            "#,
        )
        .unwrap();
        assert_eq!(config.github.org, "acme");
        assert_eq!(config.github.project_number, 88);
        assert_eq!(config.detection.event_limit, 50);
        assert_eq!(config.detection.comment_limit, 10);
        assert!(config.output.dump_json);
    }

    #[test]
    fn validate_rejects_bad_api_url() {
        let mut config = Config::default();
        config.github.api_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_oversized_page() {
        let mut config = Config::default();
        config.github.page_size = 500;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_event_limit() {
        let mut config = Config::default();
        config.detection.event_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_or_default_missing_file() {
        let config = Config::load_or_default("/nonexistent/boardlog.toml").unwrap();
        assert_eq!(config.github.org, "cncf");
    }

    #[test]
    fn load_or_default_reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boardlog.toml");
        fs::write(&path, "[github]\norg = \"acme\"\nproject_number = 7\n").unwrap();

        let config = Config::load_or_default(&path).unwrap();
        assert_eq!(config.github.org, "acme");
        assert_eq!(config.github.project_number, 7);
    }

    #[test]
    fn load_or_default_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boardlog.toml");
        fs::write(&path, "[github]\norg = \"acme\"\nproject_number = \"seven\"\n").unwrap();

        let err = Config::load_or_default(&path).unwrap_err();
        assert!(matches!(err, AppError::Toml(_)));
    }
}
