use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::history::{HistoryStore, NewHistoryEntry, Page};
use crate::models::history::HistoryEntry;

/// History backed by the `recommendation_history` table.
#[derive(Clone)]
pub struct PgHistoryStore {
    pool: PgPool,
}

impl PgHistoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoryStore for PgHistoryStore {
    async fn append(&self, entry: NewHistoryEntry) -> Result<HistoryEntry, AppError> {
        let row = sqlx::query_as::<_, HistoryEntry>(
            r#"
            INSERT INTO recommendation_history
                (id, skills, interests, career_mode, risk_preference,
                 primary_career, backup_career, primary_score, backup_score, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&entry.skills)
        .bind(&entry.interests)
        .bind(&entry.career_mode)
        .bind(&entry.risk_preference)
        .bind(&entry.primary_career)
        .bind(&entry.backup_career)
        .bind(entry.primary_score)
        .bind(entry.backup_score)
        .bind(entry.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list(&self, page: Page) -> Result<Vec<HistoryEntry>, AppError> {
        Ok(sqlx::query_as::<_, HistoryEntry>(
            r#"
            SELECT * FROM recommendation_history
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(i64::from(page.limit))
        .bind(i64::from(page.offset))
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get(&self, id: Uuid) -> Result<Option<HistoryEntry>, AppError> {
        Ok(
            sqlx::query_as::<_, HistoryEntry>("SELECT * FROM recommendation_history WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM recommendation_history WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
