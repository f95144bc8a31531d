//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`StarlistError`] which covers every failure mode of star
//! acquisition, caching, configuration and report generation. It uses `thiserror`
//! for ergonomic error definitions and includes constructors for common scenarios.
//!
//! # Public API
//! - [`StarlistError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, StarlistError>`
//!
//! # Error Categories
//! - **Structural**: the upstream response has no viewer or no starred collection
//! - **Throttling**: rate limit signals and retry exhaustion
//! - **Cache operations**: read, write and parse failures on the cache slot
//! - **Configuration**: invalid values and missing credentials

use crate::core::assembler::RateLimitKind;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Domain-specific error types for starlist
#[derive(Error, Debug)]
pub enum StarlistError {
    // Structural upstream errors
    #[error("Missing current viewer for stargazing")]
    MissingViewer,

    #[error("Missing current viewer starred repositories")]
    MissingStarredRepositories,

    // Throttling errors
    #[error("{kind} rate limit hit, retry after {}s", retry_after.as_secs())]
    RateLimited {
        kind: RateLimitKind,
        retry_after: Duration,
    },

    #[error("{kind} request retries exhausted after {retries} retries")]
    RetriesExhausted { kind: RateLimitKind, retries: u32 },

    // Upstream transport errors
    #[error("GitHub API returned errors: {}", messages.join("; "))]
    Graphql { messages: Vec<String> },

    #[error("GitHub API request failed with status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Cache errors
    #[error("Failed to read cache file '{path}': {source}")]
    CacheReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write cache file '{path}': {source}")]
    CacheWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cache file does not exist at '{path}'. Run 'starlist generate' first.")]
    CacheFileNotFound { path: PathBuf },

    #[error("Failed to parse cache '{name}': {source}")]
    CacheParseFailed {
        name: String,
        source: serde_json::Error,
    },

    #[error("Cache '{name}' cannot be used: {reason}")]
    CacheRejected { name: String, reason: String },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("A GitHub token is required to load stars from the API (use --token or GITHUB_TOKEN)")]
    MissingToken,

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParseFailed {
        path: PathBuf,
        source: serde_yaml_ng::Error,
    },

    // Generic conversions
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using StarlistError
pub type Result<T> = std::result::Result<T, StarlistError>;

impl StarlistError {
    /// Create a configuration error with a specific message
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn rate_limited(kind: RateLimitKind, retry_after: Duration) -> Self {
        Self::RateLimited { kind, retry_after }
    }

    pub fn retries_exhausted(kind: RateLimitKind, retries: u32) -> Self {
        Self::RetriesExhausted { kind, retries }
    }

    pub fn unexpected_status(status: u16, message: impl Into<String>) -> Self {
        Self::UnexpectedStatus {
            status,
            message: message.into(),
        }
    }

    /// Create a cache read failed error
    pub fn cache_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CacheReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a cache write failed error
    pub fn cache_write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CacheWriteFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a cache file not found error
    pub fn cache_file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::CacheFileNotFound { path: path.into() }
    }

    /// Create a cache parse failed error
    pub fn cache_parse_failed(name: impl Into<String>, source: serde_json::Error) -> Self {
        Self::CacheParseFailed {
            name: name.into(),
            source,
        }
    }

    pub fn cache_rejected(name: impl Into<String>, reason: impl ToString) -> Self {
        Self::CacheRejected {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    pub fn config_parse_failed(path: impl Into<PathBuf>, source: serde_yaml_ng::Error) -> Self {
        Self::ConfigParseFailed {
            path: path.into(),
            source,
        }
    }
}
