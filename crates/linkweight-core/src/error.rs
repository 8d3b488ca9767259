//! Error types and exit codes for linkweight
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args, invalid configuration values)
//! - 3: Data error (missing vault, unknown node, unreadable config)

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - missing vault, unknown node (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during linkweight operations
#[derive(Error, Debug)]
pub enum LinkweightError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human, json, or records)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    #[error("invalid title pattern {pattern}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    // Data errors (exit code 3)
    #[error("vault not found: {path:?}")]
    VaultNotFound { path: PathBuf },

    #[error("node not found: {key}")]
    NodeNotFound { key: String },

    #[error("invalid frontmatter in {path}: {reason}")]
    InvalidFrontmatter { path: String, reason: String },

    #[error("invalid config {path:?}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to {operation}: {reason}")]
    FailedOperation { operation: String, reason: String },

    #[error("{0}")]
    Other(String),
}

impl LinkweightError {
    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        LinkweightError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for a failed operation
    pub fn failed(operation: &str, error: impl std::fmt::Display) -> Self {
        LinkweightError::FailedOperation {
            operation: operation.to_string(),
            reason: error.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            LinkweightError::UnknownFormat(_)
            | LinkweightError::UsageError(_)
            | LinkweightError::InvalidValue { .. }
            | LinkweightError::InvalidPattern { .. } => ExitCode::Usage,

            LinkweightError::VaultNotFound { .. }
            | LinkweightError::NodeNotFound { .. }
            | LinkweightError::InvalidFrontmatter { .. }
            | LinkweightError::InvalidConfig { .. } => ExitCode::Data,

            LinkweightError::Io(_)
            | LinkweightError::Json(_)
            | LinkweightError::FailedOperation { .. }
            | LinkweightError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            LinkweightError::UnknownFormat(_) => "unknown_format",
            LinkweightError::UsageError(_) => "usage_error",
            LinkweightError::InvalidValue { .. } => "invalid_value",
            LinkweightError::InvalidPattern { .. } => "invalid_pattern",
            LinkweightError::VaultNotFound { .. } => "vault_not_found",
            LinkweightError::NodeNotFound { .. } => "node_not_found",
            LinkweightError::InvalidFrontmatter { .. } => "invalid_frontmatter",
            LinkweightError::InvalidConfig { .. } => "invalid_config",
            LinkweightError::Io(_) => "io_error",
            LinkweightError::Json(_) => "json_error",
            LinkweightError::FailedOperation { .. } => "failed_operation",
            LinkweightError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for linkweight operations
pub type Result<T> = std::result::Result<T, LinkweightError>;
