// src/error.rs

//! Unified error handling for the menu parser and cache.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for menu operations.
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

    /// A configured pattern failed to compile
    #[error("Invalid pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// A required field of the provider's menu object is missing
    #[error("Malformed menu input: missing {field}")]
    MalformedInput { field: String },

    /// A stored record exists but cannot be decoded
    #[error("Corrupt cache entry at {}: {source}", .path.display())]
    CacheCorruption {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl AppError {
    /// Create a pattern compilation error.
    pub fn pattern(pattern: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a malformed input error naming the missing field.
    pub fn malformed(field: impl Into<String>) -> Self {
        Self::MalformedInput {
            field: field.into(),
        }
    }

    /// Create a cache corruption error for the given data file.
    pub fn corruption(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::CacheCorruption {
            path: path.into(),
            source,
        }
    }
}
