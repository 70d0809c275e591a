use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure detail reported by a remote record service.
///
/// Carried by failed query snapshots, failed commits and toast messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct ErrorInfo {
    pub message: String,
    /// Optional status code supplied by the service (HTTP-like).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ErrorInfo {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(message: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
        }
    }
}

/// Error raised while turning raw grid draft rows into a draft batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("draft row {0} has no Id")]
    MissingId(usize),
    #[error("draft row is not an object: {0}")]
    NotAnObject(String),
    #[error("unknown column {0}")]
    UnknownColumn(String),
    #[error("column {0} is read-only")]
    ReadOnlyColumn(String),
    #[error("column {column} expects {expected}, got {actual}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        actual: String,
    },
}

/// Error raised while loading configuration or assembling a controller.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid grid configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("controller is missing its {0}")]
    MissingCollaborator(&'static str),
}
