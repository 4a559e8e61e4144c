//! PostgreSQL implementation of AssessmentRepository.
//!
//! Persists the assessment aggregate across two tables: `assessments` for
//! identity, status, and outcome, and `messages` for the transcript.
//! Multi-statement writes (completion, reset) run in a transaction.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::str::FromStr;

use crate::domain::assessment::{
    Assessment, AssessmentStatus, AssessmentType, CompetencyLevel, Message, Sender,
};
use crate::domain::foundation::{AssessmentId, DomainError, MessageId, Timestamp};
use crate::ports::{AssessmentRepository, CompletionRecord};

/// PostgreSQL implementation of AssessmentRepository.
#[derive(Clone)]
pub struct PgAssessmentRepository {
    pool: PgPool,
}

impl PgAssessmentRepository {
    /// Creates a new PgAssessmentRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_messages(&self, id: AssessmentId) -> Result<Vec<Message>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, sender, content, created_at
            FROM messages
            WHERE assessment_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch messages: {}", e)))?;

        rows.iter().map(row_to_message).collect()
    }
}

#[async_trait]
impl AssessmentRepository for PgAssessmentRepository {
    async fn create(&self, assessment_type: AssessmentType) -> Result<Assessment, DomainError> {
        let assessment = Assessment::new(assessment_type);

        sqlx::query(
            r#"
            INSERT INTO assessments (id, assessment_type, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(assessment.id().as_uuid())
        .bind(assessment.assessment_type().as_str())
        .bind(assessment.status().as_str())
        .bind(assessment.created_at().as_datetime())
        .bind(assessment.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert assessment: {}", e)))?;

        Ok(assessment)
    }

    async fn find_by_id(&self, id: AssessmentId) -> Result<Option<Assessment>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, assessment_type, status, competency_level, final_summary,
                   created_at, updated_at, completed_at
            FROM assessments
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch assessment: {}", e)))?;

        let row = match row {
            Some(row) => row,
            None => return Ok(None),
        };

        let messages = self.fetch_messages(id).await?;
        let assessment = row_to_assessment(&row, messages)?;
        Ok(Some(assessment))
    }

    async fn add_message(
        &self,
        id: AssessmentId,
        sender: Sender,
        content: &str,
    ) -> Result<Message, DomainError> {
        let message = Message::new(sender, content)?;

        let result = sqlx::query(
            r#"
            INSERT INTO messages (id, assessment_id, sender, content, created_at)
            SELECT $1, $2, $3, $4, $5
            WHERE EXISTS (SELECT 1 FROM assessments WHERE id = $2)
            "#,
        )
        .bind(message.id().as_uuid())
        .bind(id.as_uuid())
        .bind(message.sender().as_str())
        .bind(message.content())
        .bind(message.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert message: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::assessment_not_found(id));
        }

        Ok(message)
    }

    async fn list_messages(&self, id: AssessmentId) -> Result<Vec<Message>, DomainError> {
        self.fetch_messages(id).await
    }

    async fn set_status(
        &self,
        id: AssessmentId,
        status: AssessmentStatus,
    ) -> Result<(), DomainError> {
        if status == AssessmentStatus::Completed {
            return Err(DomainError::invalid_state(
                "Completion must go through complete()",
            ));
        }

        let result = sqlx::query(
            r#"
            UPDATE assessments SET status = $2, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(status.as_str())
        .bind(Timestamp::now().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update status: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::assessment_not_found(id));
        }

        Ok(())
    }

    async fn complete(
        &self,
        id: AssessmentId,
        record: &CompletionRecord,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database(format!("Failed to start transaction: {}", e)))?;

        let result = sqlx::query(
            r#"
            UPDATE assessments SET
                status = 'completed',
                competency_level = $2,
                competency_label = $3,
                final_summary = $4,
                completed_at = $5,
                updated_at = $5
            WHERE id = $1 AND status = 'in_progress'
            "#,
        )
        .bind(id.as_uuid())
        .bind(record.level.rank() as i16)
        .bind(record.level.label())
        .bind(&record.summary)
        .bind(record.completed_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database(format!("Failed to complete assessment: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::invalid_state(
                "Assessment is not in progress",
            ));
        }

        // The summary is the final message of the transcript.
        let summary_message = Message::system(record.summary.clone())?;
        sqlx::query(
            r#"
            INSERT INTO messages (id, assessment_id, sender, content, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(summary_message.id().as_uuid())
        .bind(id.as_uuid())
        .bind(summary_message.sender().as_str())
        .bind(summary_message.content())
        .bind(summary_message.created_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert summary message: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database(format!("Failed to commit transaction: {}", e)))?;

        Ok(())
    }

    async fn reset(&self, id: AssessmentId) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database(format!("Failed to start transaction: {}", e)))?;

        let result = sqlx::query(
            r#"
            UPDATE assessments SET
                status = 'in_progress',
                competency_level = NULL,
                competency_label = NULL,
                final_summary = NULL,
                completed_at = NULL,
                updated_at = $2
            WHERE id = $1 AND status <> 'completed'
            "#,
        )
        .bind(id.as_uuid())
        .bind(Timestamp::now().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database(format!("Failed to reset assessment: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::invalid_state(
                "Cannot restart completed assessment",
            ));
        }

        sqlx::query("DELETE FROM messages WHERE assessment_id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database(format!("Failed to clear messages: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database(format!("Failed to commit transaction: {}", e)))?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Health check failed: {}", e)))?;
        Ok(())
    }
}

fn row_to_message(row: &sqlx::postgres::PgRow) -> Result<Message, DomainError> {
    let id: uuid::Uuid = row.get("id");
    let sender_str: &str = row.get("sender");
    let content: String = row.get("content");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");

    let sender = Sender::from_str(sender_str)
        .map_err(|e| DomainError::database(format!("Corrupt message row: {}", e)))?;

    Ok(Message::reconstitute(
        MessageId::from_uuid(id),
        sender,
        content,
        Timestamp::from_datetime(created_at),
    ))
}

fn row_to_assessment(
    row: &sqlx::postgres::PgRow,
    messages: Vec<Message>,
) -> Result<Assessment, DomainError> {
    let id: uuid::Uuid = row.get("id");
    let type_str: &str = row.get("assessment_type");
    let status_str: &str = row.get("status");
    let level: Option<i16> = row.get("competency_level");
    let final_summary: Option<String> = row.get("final_summary");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");
    let updated_at: chrono::DateTime<chrono::Utc> = row.get("updated_at");
    let completed_at: Option<chrono::DateTime<chrono::Utc>> = row.get("completed_at");

    let assessment_type = AssessmentType::from_str(type_str)
        .map_err(|e| DomainError::database(format!("Corrupt assessment row: {}", e)))?;
    let status = AssessmentStatus::from_str(status_str)
        .map_err(|e| DomainError::database(format!("Corrupt assessment row: {}", e)))?;
    let competency_level = level
        .map(|rank| {
            CompetencyLevel::from_rank(rank as u8).ok_or_else(|| {
                DomainError::database(format!("Corrupt competency level: {}", rank))
            })
        })
        .transpose()?;

    Ok(Assessment::reconstitute(
        AssessmentId::from_uuid(id),
        assessment_type,
        status,
        messages,
        competency_level,
        final_summary,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
        completed_at.map(Timestamp::from_datetime),
    ))
}
