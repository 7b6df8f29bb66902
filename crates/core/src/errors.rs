//! Core error types for Famledger.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer,
//! and HTTP failures are converted by the connect layer.

use thiserror::Error;

use crate::goals::SharingOperation;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the view-scoping and sharing core.
///
/// No variant is fatal to the process: every failure is scoped to the single
/// user action that triggered it.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The collaborator refused a scope or mutation the caller is not entitled to.
    #[error("Not authorized: {0}")]
    Authorization(String),

    #[error("Transport failure{}: {message}", .status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default())]
    Transport {
        status: Option<u16>,
        message: String,
    },

    #[error(transparent)]
    PartialApply(#[from] PartialApplyError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    pub fn transport(message: impl Into<String>) -> Self {
        Error::Transport {
            status: None,
            message: message.into(),
        }
    }

    /// Whether re-issuing the same user action could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Transport { .. } | Error::PartialApply(_))
    }
}

/// Database-agnostic error type for storage operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    #[error("Database query failed: {0}")]
    QueryFailed(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Database migration failed: {0}")]
    MigrationFailed(String),
}

/// Validation errors for user input and persisted data.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Corrupt view context record: {0}")]
    CorruptViewContext(String),

    #[error("Sharing precondition violated: {0}")]
    SharingPrecondition(String),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A reconciliation run that stopped after some of its steps already took effect.
///
/// Sharing state on the server may differ from what was requested; callers
/// should re-read the goal's users before deciding what to do next.
#[derive(Error, Debug)]
#[error(
    "Sharing for goal {goal_id} was only partially applied: {} step(s) completed, {failed} failed ({cause}), {} not attempted. Sharing state may differ from what was requested",
    .completed.len(),
    .remaining.len()
)]
pub struct PartialApplyError {
    pub goal_id: String,
    pub completed: Vec<SharingOperation>,
    pub failed: SharingOperation,
    pub remaining: Vec<SharingOperation>,
    #[source]
    pub cause: Box<Error>,
}

impl PartialApplyError {
    /// User ids whose revoke was never confirmed (the failed one plus the unattempted ones).
    pub fn unconfirmed_user_ids(&self) -> Vec<String> {
        std::iter::once(&self.failed)
            .chain(self.remaining.iter())
            .flat_map(|op| op.user_ids().iter().cloned())
            .collect()
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::Json(err))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_message_includes_status() {
        let err = Error::Transport {
            status: Some(503),
            message: "Service unavailable".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Transport failure (HTTP 503): Service unavailable"
        );
        assert_eq!(
            Error::transport("connection refused").to_string(),
            "Transport failure: connection refused"
        );
    }

    #[test]
    fn test_partial_apply_lists_unconfirmed_ids() {
        let err = PartialApplyError {
            goal_id: "goal-1".to_string(),
            completed: vec![SharingOperation::Revoke {
                user_id: "u1".to_string(),
            }],
            failed: SharingOperation::Revoke {
                user_id: "u2".to_string(),
            },
            remaining: vec![SharingOperation::Revoke {
                user_id: "u3".to_string(),
            }],
            cause: Box::new(Error::transport("timeout")),
        };
        assert_eq!(err.unconfirmed_user_ids(), vec!["u2", "u3"]);
        let message = Error::from(err).to_string();
        assert!(message.contains("goal-1"));
        assert!(message.contains("revoke u2"));
        assert!(message.contains("may differ"));
    }

    #[test]
    fn test_authorization_is_not_retryable() {
        assert!(!Error::Authorization("forbidden".to_string()).is_retryable());
        assert!(Error::transport("reset").is_retryable());
    }
}
