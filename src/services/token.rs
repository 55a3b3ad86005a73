// src/services/token.rs

//! GitHub token acquisition.
//!
//! Checks the configured environment variable first, then falls back to the
//! GitHub CLI (`gh auth token`).

use tokio::process::Command;

use crate::error::{AppError, Result};
use crate::models::GitHubConfig;

/// Resolve a token for the GraphQL API.
pub async fn resolve_token(config: &GitHubConfig) -> Result<String> {
    if let Some(token) = non_empty(std::env::var(&config.token_env).ok()) {
        log::debug!("Using token from ${}", config.token_env);
        return Ok(token);
    }
    gh_auth_token(&config.token_env).await
}

/// Ask the GitHub CLI for the logged-in user's token.
async fn gh_auth_token(token_env: &str) -> Result<String> {
    let output = Command::new("gh")
        .args(["auth", "token"])
        .output()
        .await
        .map_err(|e| {
            AppError::auth(format!(
                "Could not run 'gh auth token' ({e}). Set ${token_env} or install the GitHub CLI."
            ))
        })?;

    if !output.status.success() {
        return Err(AppError::auth("Please run 'gh auth login' first."));
    }

    non_empty(Some(String::from_utf8_lossy(&output.stdout).into_owned()))
        .ok_or_else(|| AppError::auth("'gh auth token' printed no token. Run 'gh auth login'."))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_trims() {
        assert_eq!(non_empty(Some(" ghp_abc\n".into())), Some("ghp_abc".into()));
        assert_eq!(non_empty(Some("  \n".into())), None);
        assert_eq!(non_empty(None), None);
    }
}
