// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};

use crate::error::{AppError, Result};
use crate::models::GitHubConfig;

/// Create an asynchronous client that sends the bearer token on every request.
pub fn create_async_client(config: &GitHubConfig, token: &str) -> Result<reqwest::Client> {
    let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|e| AppError::auth(format!("Token is not a valid header value: {e}")))?;
    auth.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .default_headers(headers)
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_token_with_newline() {
        let config = GitHubConfig::default();
        let err = create_async_client(&config, "abc\ndef").unwrap_err();
        assert!(matches!(err, AppError::Auth(_)));
    }

    #[test]
    fn test_builds_client() {
        let config = GitHubConfig::default();
        assert!(create_async_client(&config, "ghp_example").is_ok());
    }
}
