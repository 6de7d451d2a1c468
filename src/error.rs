//! Error types for rollcall-rs.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// No caller identity established yet. Recoverable by waiting for the
    /// identity provider.
    #[error("no caller identity established")]
    Unauthenticated,

    /// Transient store or network failure. The caller may retry the
    /// mutation or resubscribe.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Not recoverable without reconfiguration. Surfaced, never retried.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// An observed document does not match the task schema.
    #[error("document fails task schema: {0}")]
    DataIntegrity(String),

    #[error("task not found: {0}")]
    NotFound(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self {
        // SQLSTATE 42501 = insufficient_privilege. Everything else from the
        // store counts as transient.
        if let sqlx::Error::Database(db) = &e {
            if db.code().as_deref() == Some("42501") {
                return Error::PermissionDenied(db.message().to_string());
            }
        }
        Error::Unavailable(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
