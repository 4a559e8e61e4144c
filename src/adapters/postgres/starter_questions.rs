//! PostgreSQL-backed starter question source.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::DomainError;
use crate::ports::{StarterQuestion, StarterQuestionSource};

/// Starter question source reading from the `starter_questions` table.
#[derive(Clone)]
pub struct PgStarterQuestionSource {
    pool: PgPool,
}

impl PgStarterQuestionSource {
    /// Creates a new PgStarterQuestionSource.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StarterQuestionSource for PgStarterQuestionSource {
    async fn list(&self) -> Result<Vec<StarterQuestion>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, question, category
            FROM starter_questions
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::database(format!("Failed to fetch starter questions: {}", e))
        })?;

        Ok(rows
            .iter()
            .map(|row| {
                let id: uuid::Uuid = row.get("id");
                StarterQuestion {
                    id: id.to_string(),
                    text: row.get("question"),
                    category: row.get("category"),
                }
            })
            .collect())
    }
}
