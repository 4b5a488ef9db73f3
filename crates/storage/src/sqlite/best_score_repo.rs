use async_trait::async_trait;
use sqlx::Row;

use crate::repository::{BestScoreRepository, StorageError};

use super::SqliteRepository;

#[async_trait]
impl BestScoreRepository for SqliteRepository {
    async fn best_score(&self) -> Result<Option<u32>, StorageError> {
        let row = sqlx::query("SELECT score FROM best_score WHERE id = 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let score: i64 = row
            .try_get("score")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        let score = u32::try_from(score)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        Ok(Some(score))
    }

    async fn record_best_score(&self, score: u32) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO best_score (id, score)
            VALUES (?1, ?2)
            ON CONFLICT(id) DO UPDATE SET
                score = excluded.score
            ",
        )
        .bind(1_i64)
        .bind(i64::from(score))
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
