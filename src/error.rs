// src/error.rs

//! Unified error handling for the board change log.

use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type alias for boardlog operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Time window whose start lies after its end
    #[error("Invalid time window: start {start} is after end {end}")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// User supplied value could not be parsed
    #[error("Invalid {field} '{value}': {message}")]
    InvalidInput {
        field: String,
        value: String,
        message: String,
    },

    /// Credential acquisition or scope problem
    #[error("Authentication error: {0}")]
    Auth(String),

    /// GraphQL API returned an error payload
    #[error("GraphQL error ({kind}): {message}")]
    GraphQl { kind: String, message: String },

    /// Organization or project does not exist (or is not visible)
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an input parsing error.
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        message: impl fmt::Display,
    ) -> Self {
        Self::InvalidInput {
            field: field.into(),
            value: value.into(),
            message: message.to_string(),
        }
    }

    /// Create an authentication error.
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Create a GraphQL error.
    pub fn graphql(kind: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::GraphQl {
            kind: kind.into(),
            message: message.to_string(),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}
