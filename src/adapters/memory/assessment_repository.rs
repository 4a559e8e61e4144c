//! In-memory assessment repository.
//!
//! Stores assessments in a HashMap behind an async RwLock. Useful for tests
//! and development; the aggregate's own transition rules guard every
//! mutation, so the in-memory store enforces the same invariants as the
//! database-backed one.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::assessment::{
    Assessment, AssessmentStatus, AssessmentType, Message, Sender,
};
use crate::domain::foundation::{AssessmentId, DomainError};
use crate::ports::{AssessmentRepository, CompletionRecord};

/// In-memory storage for assessments.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssessmentRepository {
    assessments: Arc<RwLock<HashMap<AssessmentId, Assessment>>>,
}

impl InMemoryAssessmentRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all stored data (useful for tests).
    pub async fn clear(&self) {
        self.assessments.write().await.clear();
    }

    /// Number of stored assessments.
    pub async fn count(&self) -> usize {
        self.assessments.read().await.len()
    }

    async fn with_assessment<T>(
        &self,
        id: AssessmentId,
        f: impl FnOnce(&mut Assessment) -> Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        let mut assessments = self.assessments.write().await;
        let assessment = assessments
            .get_mut(&id)
            .ok_or_else(|| DomainError::assessment_not_found(id))?;
        f(assessment)
    }
}

#[async_trait]
impl AssessmentRepository for InMemoryAssessmentRepository {
    async fn create(&self, assessment_type: AssessmentType) -> Result<Assessment, DomainError> {
        let assessment = Assessment::new(assessment_type);
        let mut assessments = self.assessments.write().await;
        assessments.insert(assessment.id(), assessment.clone());
        Ok(assessment)
    }

    async fn find_by_id(&self, id: AssessmentId) -> Result<Option<Assessment>, DomainError> {
        let assessments = self.assessments.read().await;
        Ok(assessments.get(&id).cloned())
    }

    async fn add_message(
        &self,
        id: AssessmentId,
        sender: Sender,
        content: &str,
    ) -> Result<Message, DomainError> {
        self.with_assessment(id, |assessment| {
            assessment.record_message(sender, content).map(Clone::clone)
        })
        .await
    }

    async fn list_messages(&self, id: AssessmentId) -> Result<Vec<Message>, DomainError> {
        let assessments = self.assessments.read().await;
        let assessment = assessments
            .get(&id)
            .ok_or_else(|| DomainError::assessment_not_found(id))?;
        Ok(assessment.messages().to_vec())
    }

    async fn set_status(
        &self,
        id: AssessmentId,
        status: AssessmentStatus,
    ) -> Result<(), DomainError> {
        self.with_assessment(id, |assessment| match status {
            AssessmentStatus::Abandoned => assessment.abandon(),
            AssessmentStatus::InProgress => assessment.reset(),
            AssessmentStatus::Completed => Err(DomainError::invalid_state(
                "Completion must go through complete()",
            )),
        })
        .await
    }

    async fn complete(
        &self,
        id: AssessmentId,
        record: &CompletionRecord,
    ) -> Result<(), DomainError> {
        self.with_assessment(id, |assessment| {
            assessment.complete(record.level, record.summary.clone(), record.completed_at)
        })
        .await
    }

    async fn reset(&self, id: AssessmentId) -> Result<(), DomainError> {
        self.with_assessment(id, |assessment| assessment.reset())
            .await
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
