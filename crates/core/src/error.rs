//! Error types for promptsync.
//!
//! This module defines a unified error enum that covers every failure kind
//! the workflows report: configuration, hub calls, prompt files and validation.

use thiserror::Error;

/// Unified error type for promptsync.
///
/// All workflow functions return `Result<T, AppError>`. Every variant maps to
/// process exit code 1 at the CLI boundary.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or invalid configuration (e.g. a required environment variable)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Remote prompt hub errors
    #[error("Hub error: {0}")]
    Hub(String),

    /// Prompt file errors (missing file, missing key, unreadable YAML)
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Rubric violations, one message per violated rule
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
