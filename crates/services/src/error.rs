//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::QuizResultError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by session services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Result(#[from] QuizResultError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
