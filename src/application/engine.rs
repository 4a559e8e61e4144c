//! AssessmentEngine - the conversation controller.
//!
//! Orchestrates one assessment's lifecycle: start, continue, complete,
//! abandon, restart. On each turn it assembles the prompt from the
//! transcript, calls the model provider, parses the reply, updates the
//! store, and runs the competency analyzer. All collaborators arrive as
//! injected ports so the state machine is testable with substitutes.

use std::sync::Arc;

use crate::application::LockRegistry;
use crate::domain::assessment::{
    build_prompt, parse_model_reply, question_bank, system_instruction, Assessment,
    AssessmentReply, AssessmentStatus, AssessmentType, CompetencyIndicators, CompetencyLevel,
    Message, Sender,
};
use crate::domain::foundation::{AssessmentId, DomainError};
use crate::ports::{AiProvider, AssessmentRepository, CompletionRecord, StarterQuestionSource};

/// Maximum accepted length of one user message, in characters.
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Result of starting (or restarting) an assessment.
#[derive(Debug, Clone)]
pub struct StartedAssessment {
    pub assessment_id: AssessmentId,
    pub first_question: String,
}

/// Read-only projection of one conversation's current state.
#[derive(Debug, Clone)]
pub struct ConversationContext {
    pub assessment_id: AssessmentId,
    pub status: AssessmentStatus,
    pub messages: Vec<Message>,
    pub indicators: CompetencyIndicators,
    pub current_level: Option<CompetencyLevel>,
}

/// The conversation controller.
pub struct AssessmentEngine {
    repository: Arc<dyn AssessmentRepository>,
    provider: Arc<dyn AiProvider>,
    starters: Arc<dyn StarterQuestionSource>,
    locks: LockRegistry,
}

impl AssessmentEngine {
    /// Creates an engine over the given collaborators.
    pub fn new(
        repository: Arc<dyn AssessmentRepository>,
        provider: Arc<dyn AiProvider>,
        starters: Arc<dyn StarterQuestionSource>,
    ) -> Self {
        Self {
            repository,
            provider,
            starters,
            locks: LockRegistry::new(),
        }
    }

    /// Starts a new assessment: creates the record, picks an opening
    /// question, and appends it as the first system message.
    pub async fn start(
        &self,
        assessment_type: AssessmentType,
    ) -> Result<StartedAssessment, DomainError> {
        let assessment = self.repository.create(assessment_type).await?;
        let starter = self.starters.pick_random().await;

        self.repository
            .add_message(assessment.id(), Sender::System, &starter.text)
            .await?;

        tracing::info!(
            assessment_id = %assessment.id(),
            starter_question_id = %starter.id,
            "assessment started"
        );

        Ok(StartedAssessment {
            assessment_id: assessment.id(),
            first_question: starter.text,
        })
    }

    /// Processes one user turn.
    ///
    /// Appends the user message, asks the model for the next move, and
    /// either appends the returned question or completes the assessment
    /// with a competency outcome. Runs under the per-assessment lock so
    /// racing turns cannot interleave.
    ///
    /// # Errors
    ///
    /// - `AssessmentNotFound` for an unknown id
    /// - `InvalidState` if the assessment is not in progress
    /// - `ValidationFailed` for an empty or oversized message
    /// - `UpstreamError` if the provider call itself fails (an unparsable
    ///   reply is NOT an error; it becomes the fallback question)
    pub async fn continue_conversation(
        &self,
        id: AssessmentId,
        user_text: &str,
    ) -> Result<AssessmentReply, DomainError> {
        let user_text = validate_message(user_text)?;

        let _guard = self.locks.acquire(id).await;

        let assessment = self.require(id).await?;
        if assessment.status() != AssessmentStatus::InProgress {
            return Err(DomainError::invalid_state(
                "Assessment is not in progress",
            ));
        }

        // Pre-append history: the prompt and the analyzer both see the
        // transcript as it was before this turn's user message.
        let history = assessment.messages().to_vec();
        self.repository
            .add_message(id, Sender::User, user_text)
            .await?;

        let indicators = CompetencyIndicators::analyze(user_text, history.len());

        let assessment_type = assessment.assessment_type();
        let prompt = build_prompt(
            system_instruction(assessment_type),
            question_bank(assessment_type),
            &history,
            user_text,
        );

        let completion = self
            .provider
            .generate_text(&prompt)
            .await
            .map_err(|err| {
                tracing::error!(assessment_id = %id, error = %err, "model provider call failed");
                DomainError::upstream(err.to_string())
            })?;

        let reply = parse_model_reply(&completion);

        if reply.is_complete {
            if let Some(summary) = &reply.final_summary {
                let level = indicators.determine_level();
                let record = CompletionRecord::new(level, summary.clone());
                self.repository.complete(id, &record).await?;

                tracing::info!(
                    assessment_id = %id,
                    competency_level = level.rank(),
                    message_count = history.len() + 1,
                    "assessment completed"
                );
            }
        } else if let Some(question) = &reply.next_question {
            self.repository
                .add_message(id, Sender::System, question)
                .await?;
        }

        Ok(reply)
    }

    /// Marks an assessment as abandoned.
    ///
    /// # Errors
    ///
    /// - `AssessmentNotFound` for an unknown id
    /// - `InvalidState` if the assessment is already completed
    pub async fn abandon(&self, id: AssessmentId) -> Result<(), DomainError> {
        let assessment = self.require(id).await?;
        if assessment.status() == AssessmentStatus::Completed {
            return Err(DomainError::invalid_state(
                "Cannot abandon completed assessment",
            ));
        }

        self.repository
            .set_status(id, AssessmentStatus::Abandoned)
            .await?;

        tracing::info!(assessment_id = %id, "assessment abandoned");
        Ok(())
    }

    /// Restarts an assessment: clears the transcript and outcome, then runs
    /// the start semantics again with a fresh opening question.
    ///
    /// # Errors
    ///
    /// - `AssessmentNotFound` for an unknown id
    /// - `InvalidState` if the assessment is already completed
    pub async fn restart(&self, id: AssessmentId) -> Result<StartedAssessment, DomainError> {
        let _guard = self.locks.acquire(id).await;

        let assessment = self.require(id).await?;
        if assessment.status() == AssessmentStatus::Completed {
            return Err(DomainError::invalid_state(
                "Cannot restart completed assessment",
            ));
        }

        self.repository.reset(id).await?;

        let starter = self.starters.pick_random().await;
        self.repository
            .add_message(id, Sender::System, &starter.text)
            .await?;

        tracing::info!(assessment_id = %id, "assessment restarted");

        Ok(StartedAssessment {
            assessment_id: id,
            first_question: starter.text,
        })
    }

    /// Returns the public projection of an assessment's state.
    pub async fn get_assessment(&self, id: AssessmentId) -> Result<Assessment, DomainError> {
        self.require(id).await
    }

    /// Returns the conversation context: transcript, indicators recomputed
    /// from the last user message (if the transcript ends with one), and the
    /// current level if set.
    pub async fn get_context(
        &self,
        id: AssessmentId,
    ) -> Result<ConversationContext, DomainError> {
        let assessment = self.require(id).await?;

        let indicators = match assessment.last_message() {
            Some(message) if message.is_user() => {
                CompetencyIndicators::analyze(message.content(), assessment.message_count())
            }
            _ => CompetencyIndicators::default(),
        };

        Ok(ConversationContext {
            assessment_id: id,
            status: assessment.status(),
            messages: assessment.messages().to_vec(),
            indicators,
            current_level: assessment.competency_level(),
        })
    }

    async fn require(&self, id: AssessmentId) -> Result<Assessment, DomainError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::assessment_not_found(id))
    }
}

fn validate_message(text: &str) -> Result<&str, DomainError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(
            "message",
            "Message cannot be empty",
        ));
    }
    if trimmed.chars().count() > MAX_MESSAGE_CHARS {
        return Err(DomainError::validation(
            "message",
            format!("Message exceeds {} characters", MAX_MESSAGE_CHARS),
        ));
    }
    Ok(trimmed)
}
