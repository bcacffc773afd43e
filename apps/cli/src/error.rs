//! Application-level error type. Wraps the lower layers and adds the
//! workflow rules that only the orchestrator can check (duplicate client
//! names, unknown lookup targets).

use thiserror::Error;

use shopdesk_core::{CoreError, ValidationError};
use shopdesk_db::DbError;

use crate::command::ParseError;

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Anything the workflow can fail with.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("database error: {0}")]
    Db(#[from] DbError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("domain error: {0}")]
    Core(#[from] CoreError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("client '{0}' already exists")]
    DuplicateClient(String),

    #[error("no client named '{0}'")]
    UnknownClient(String),

    #[error("no product named '{0}'")]
    UnknownProduct(String),
}
