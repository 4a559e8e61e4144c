//! Assessment aggregate - one conversation's full persisted state.

use serde::{Deserialize, Serialize};

use crate::domain::assessment::{AssessmentStatus, CompetencyLevel, Message, Sender};
use crate::domain::foundation::{AssessmentId, DomainError, Timestamp};

/// Kind of assessment being run. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentType {
    BusinessOwnerCompetency,
    BusinessAiReadiness,
}

impl AssessmentType {
    /// Returns the storage representation of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BusinessOwnerCompetency => "business_owner_competency",
            Self::BusinessAiReadiness => "business_ai_readiness",
        }
    }
}

impl std::str::FromStr for AssessmentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "business_owner_competency" => Ok(Self::BusinessOwnerCompetency),
            "business_ai_readiness" => Ok(Self::BusinessAiReadiness),
            other => Err(format!("unknown assessment type: {}", other)),
        }
    }
}

/// Assessment aggregate - identity, status, transcript, and outcome.
///
/// # Invariants
///
/// - `competency_level` and `final_summary` are set if and only if
///   `status == Completed`, and exactly once.
/// - Messages are append-only in creation order; nothing is appended once
///   the status leaves `InProgress`, except the restart reset which clears
///   the transcript entirely.
#[derive(Debug, Clone)]
pub struct Assessment {
    id: AssessmentId,
    assessment_type: AssessmentType,
    status: AssessmentStatus,
    messages: Vec<Message>,
    competency_level: Option<CompetencyLevel>,
    final_summary: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
    completed_at: Option<Timestamp>,
}

impl Assessment {
    /// Creates a new in-progress assessment with an empty transcript.
    pub fn new(assessment_type: AssessmentType) -> Self {
        let now = Timestamp::now();
        Self {
            id: AssessmentId::new(),
            assessment_type,
            status: AssessmentStatus::InProgress,
            messages: Vec::new(),
            competency_level: None,
            final_summary: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    /// Reconstitutes an assessment from persistence.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: AssessmentId,
        assessment_type: AssessmentType,
        status: AssessmentStatus,
        messages: Vec<Message>,
        competency_level: Option<CompetencyLevel>,
        final_summary: Option<String>,
        created_at: Timestamp,
        updated_at: Timestamp,
        completed_at: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            assessment_type,
            status,
            messages,
            competency_level,
            final_summary,
            created_at,
            updated_at,
            completed_at,
        }
    }

    // === Accessors ===

    pub fn id(&self) -> AssessmentId {
        self.id
    }

    pub fn assessment_type(&self) -> AssessmentType {
        self.assessment_type
    }

    pub fn status(&self) -> AssessmentStatus {
        self.status
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn competency_level(&self) -> Option<CompetencyLevel> {
        self.competency_level
    }

    /// Display label derived 1:1 from the competency level.
    pub fn competency_label(&self) -> Option<&'static str> {
        self.competency_level.map(|level| level.label())
    }

    pub fn final_summary(&self) -> Option<&str> {
        self.final_summary.as_deref()
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn completed_at(&self) -> Option<Timestamp> {
        self.completed_at
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn last_user_message(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| m.is_user())
    }

    // === Mutations ===

    /// Appends a message to the transcript.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if the assessment is not in progress
    /// - `ValidationFailed` if the content is empty
    pub fn record_message(
        &mut self,
        sender: Sender,
        content: impl Into<String>,
    ) -> Result<&Message, DomainError> {
        if !self.status.accepts_messages() {
            return Err(DomainError::invalid_state(format!(
                "Cannot add message while assessment is {}",
                self.status
            )));
        }

        let message = Message::new(sender, content)?;
        self.messages.push(message);
        self.updated_at = Timestamp::now();
        Ok(self.messages.last().unwrap())
    }

    /// Completes the assessment with its competency outcome.
    ///
    /// Appends the summary as the final system message and sets level,
    /// summary, and completion timestamp in one step.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if the assessment is not in progress
    pub fn complete(
        &mut self,
        level: CompetencyLevel,
        summary: impl Into<String>,
        completed_at: Timestamp,
    ) -> Result<(), DomainError> {
        if !self.status.can_transition_to(&AssessmentStatus::Completed) {
            return Err(DomainError::invalid_state(format!(
                "Cannot complete assessment in {} status",
                self.status
            )));
        }

        let summary = summary.into();
        let message = Message::system(summary.clone())?;
        self.messages.push(message);
        self.status = AssessmentStatus::Completed;
        self.competency_level = Some(level);
        self.final_summary = Some(summary);
        self.completed_at = Some(completed_at);
        self.updated_at = completed_at;
        Ok(())
    }

    /// Marks the assessment as abandoned.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if the assessment is already completed
    pub fn abandon(&mut self) -> Result<(), DomainError> {
        if self.status == AssessmentStatus::Completed {
            return Err(DomainError::invalid_state(
                "Cannot abandon completed assessment",
            ));
        }
        self.status = AssessmentStatus::Abandoned;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Resets the assessment for a restart: clears the transcript and any
    /// outcome, and returns the status to in-progress.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if the assessment is already completed
    pub fn reset(&mut self) -> Result<(), DomainError> {
        if self.status == AssessmentStatus::Completed {
            return Err(DomainError::invalid_state(
                "Cannot restart completed assessment",
            ));
        }
        self.messages.clear();
        self.competency_level = None;
        self.final_summary = None;
        self.completed_at = None;
        self.status = AssessmentStatus::InProgress;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_progress() -> Assessment {
        Assessment::new(AssessmentType::BusinessOwnerCompetency)
    }

    mod assessment_type {
        use super::*;

        #[test]
        fn roundtrips_through_str() {
            for t in [
                AssessmentType::BusinessOwnerCompetency,
                AssessmentType::BusinessAiReadiness,
            ] {
                let parsed: AssessmentType = t.as_str().parse().unwrap();
                assert_eq!(parsed, t);
            }
        }
    }

    mod creation {
        use super::*;

        #[test]
        fn starts_in_progress_with_empty_transcript() {
            let assessment = in_progress();
            assert_eq!(assessment.status(), AssessmentStatus::InProgress);
            assert_eq!(assessment.message_count(), 0);
            assert!(assessment.competency_level().is_none());
            assert!(assessment.final_summary().is_none());
            assert!(assessment.completed_at().is_none());
        }
    }

    mod messages {
        use super::*;

        #[test]
        fn record_message_appends_in_order() {
            let mut assessment = in_progress();
            assessment.record_message(Sender::System, "Q1").unwrap();
            assessment.record_message(Sender::User, "A1").unwrap();

            let contents: Vec<&str> =
                assessment.messages().iter().map(|m| m.content()).collect();
            assert_eq!(contents, vec!["Q1", "A1"]);
        }

        #[test]
        fn record_message_fails_after_abandon() {
            let mut assessment = in_progress();
            assessment.abandon().unwrap();

            let err = assessment.record_message(Sender::User, "hi").unwrap_err();
            assert_eq!(err.code, crate::domain::foundation::ErrorCode::InvalidState);
            assert_eq!(assessment.message_count(), 0);
        }

        #[test]
        fn last_user_message_skips_system_messages() {
            let mut assessment = in_progress();
            assessment.record_message(Sender::System, "Q1").unwrap();
            assessment.record_message(Sender::User, "A1").unwrap();
            assessment.record_message(Sender::System, "Q2").unwrap();

            assert_eq!(assessment.last_user_message().unwrap().content(), "A1");
        }
    }

    mod completion {
        use super::*;

        #[test]
        fn complete_sets_outcome_and_appends_summary() {
            let mut assessment = in_progress();
            assessment.record_message(Sender::System, "Q1").unwrap();
            assessment.record_message(Sender::User, "A1").unwrap();

            let now = Timestamp::now();
            assessment
                .complete(CompetencyLevel::Applied, "Solid practitioner.", now)
                .unwrap();

            assert_eq!(assessment.status(), AssessmentStatus::Completed);
            assert_eq!(assessment.competency_level(), Some(CompetencyLevel::Applied));
            assert_eq!(assessment.competency_label(), Some("Applied"));
            assert_eq!(assessment.final_summary(), Some("Solid practitioner."));
            assert_eq!(assessment.completed_at(), Some(now));
            assert_eq!(
                assessment.last_message().unwrap().content(),
                "Solid practitioner."
            );
        }

        #[test]
        fn level_is_set_iff_completed() {
            let mut assessment = in_progress();
            assert!(assessment.competency_level().is_none());

            assessment
                .complete(CompetencyLevel::Aware, "done", Timestamp::now())
                .unwrap();
            assert!(assessment.competency_level().is_some());
        }

        #[test]
        fn complete_fails_on_abandoned_assessment() {
            let mut assessment = in_progress();
            assessment.abandon().unwrap();

            let result =
                assessment.complete(CompetencyLevel::Aware, "done", Timestamp::now());
            assert!(result.is_err());
            assert!(assessment.competency_level().is_none());
        }

        #[test]
        fn complete_twice_fails() {
            let mut assessment = in_progress();
            assessment
                .complete(CompetencyLevel::Aware, "done", Timestamp::now())
                .unwrap();

            let result =
                assessment.complete(CompetencyLevel::Applied, "again", Timestamp::now());
            assert!(result.is_err());
            assert_eq!(assessment.competency_level(), Some(CompetencyLevel::Aware));
        }
    }

    mod abandon {
        use super::*;

        #[test]
        fn abandon_in_progress_succeeds() {
            let mut assessment = in_progress();
            assessment.abandon().unwrap();
            assert_eq!(assessment.status(), AssessmentStatus::Abandoned);
        }

        #[test]
        fn abandon_completed_fails() {
            let mut assessment = in_progress();
            assessment
                .complete(CompetencyLevel::Aware, "done", Timestamp::now())
                .unwrap();

            let err = assessment.abandon().unwrap_err();
            assert_eq!(err.code, crate::domain::foundation::ErrorCode::InvalidState);
            assert_eq!(assessment.status(), AssessmentStatus::Completed);
        }
    }

    mod reset {
        use super::*;

        #[test]
        fn reset_clears_transcript_and_outcome() {
            let mut assessment = in_progress();
            assessment.record_message(Sender::System, "Q1").unwrap();
            assessment.record_message(Sender::User, "A1").unwrap();
            assessment.abandon().unwrap();

            assessment.reset().unwrap();

            assert_eq!(assessment.status(), AssessmentStatus::InProgress);
            assert_eq!(assessment.message_count(), 0);
            assert!(assessment.competency_level().is_none());
            assert!(assessment.final_summary().is_none());
            assert!(assessment.completed_at().is_none());
        }

        #[test]
        fn reset_completed_fails() {
            let mut assessment = in_progress();
            assessment
                .complete(CompetencyLevel::Aware, "done", Timestamp::now())
                .unwrap();

            assert!(assessment.reset().is_err());
        }
    }
}
