//! Assessment repository port.
//!
//! Defines the persistence contract for the assessment aggregate and its
//! transcript. Implementations surface backing-store failures as
//! `DatabaseError`; nothing here retries.

use async_trait::async_trait;

use crate::domain::assessment::{
    Assessment, AssessmentStatus, AssessmentType, CompetencyLevel, Message, Sender,
};
use crate::domain::foundation::{AssessmentId, DomainError, Timestamp};

/// Outcome written at completion time, in one atomic step.
#[derive(Debug, Clone)]
pub struct CompletionRecord {
    pub level: CompetencyLevel,
    pub summary: String,
    pub completed_at: Timestamp,
}

impl CompletionRecord {
    /// Creates a completion record stamped with the current time.
    pub fn new(level: CompetencyLevel, summary: impl Into<String>) -> Self {
        Self {
            level,
            summary: summary.into(),
            completed_at: Timestamp::now(),
        }
    }
}

/// Repository port for assessment persistence.
#[async_trait]
pub trait AssessmentRepository: Send + Sync {
    /// Creates a new in-progress assessment with an empty transcript.
    async fn create(&self, assessment_type: AssessmentType) -> Result<Assessment, DomainError>;

    /// Finds an assessment by id, including its full transcript.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: AssessmentId) -> Result<Option<Assessment>, DomainError>;

    /// Appends a message to an assessment's transcript.
    ///
    /// # Errors
    ///
    /// - `AssessmentNotFound` if the id is unknown
    /// - `DatabaseError` on persistence failure
    async fn add_message(
        &self,
        id: AssessmentId,
        sender: Sender,
        content: &str,
    ) -> Result<Message, DomainError>;

    /// Returns the transcript in creation order.
    async fn list_messages(&self, id: AssessmentId) -> Result<Vec<Message>, DomainError>;

    /// Sets the lifecycle status.
    ///
    /// `Completed` cannot be reached this way; completion goes through
    /// [`complete`](Self::complete) so the outcome invariant holds.
    async fn set_status(
        &self,
        id: AssessmentId,
        status: AssessmentStatus,
    ) -> Result<(), DomainError>;

    /// Completes an assessment atomically: appends the summary as the final
    /// system message and sets status, level, summary, and completion
    /// timestamp together.
    async fn complete(
        &self,
        id: AssessmentId,
        record: &CompletionRecord,
    ) -> Result<(), DomainError>;

    /// Resets an assessment for restart: clears the transcript and outcome,
    /// returns the status to in-progress.
    async fn reset(&self, id: AssessmentId) -> Result<(), DomainError>;

    /// Checks connectivity to the backing store.
    async fn ping(&self) -> Result<(), DomainError>;
}
