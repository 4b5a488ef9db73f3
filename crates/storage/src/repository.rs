use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persistence contract for the single best-score value.
///
/// The quiz keeps exactly one scalar across sessions; whether a new score
/// qualifies as a best is the caller's decision, the repository only reads
/// and writes.
#[async_trait]
pub trait BestScoreRepository: Send + Sync {
    /// Fetch the stored best score, if any session has ever finished.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be read.
    async fn best_score(&self) -> Result<Option<u32>, StorageError>;

    /// Persist a new best score, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn record_best_score(&self, score: u32) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    best: Arc<Mutex<Option<u32>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BestScoreRepository for InMemoryRepository {
    async fn best_score(&self) -> Result<Option<u32>, StorageError> {
        let guard = self
            .best
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(*guard)
    }

    async fn record_best_score(&self, score: u32) -> Result<(), StorageError> {
        let mut guard = self
            .best
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(score);
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub best_scores: Arc<dyn BestScoreRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        Self {
            best_scores: Arc::new(repo),
        }
    }
}
