//! HTTP DTOs for assessment endpoints.
//!
//! Every response uses the `{success, data|message}` envelope. These types
//! decouple the HTTP API from domain types.

use serde::{Deserialize, Serialize};

use crate::domain::assessment::{
    Assessment, AssessmentReply, AssessmentStatus, AssessmentType, CompetencyIndicators, Message,
};
use crate::domain::foundation::Timestamp;

// ════════════════════════════════════════════════════════════════════════════════
// Envelope
// ════════════════════════════════════════════════════════════════════════════════

/// Standard response envelope: `{success, data}` or `{success, message}`.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    /// Success envelope carrying data.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }
}

impl Envelope<()> {
    /// Success envelope carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Failure envelope carrying an error message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body for POST /api/assessments.
#[derive(Debug, Clone, Deserialize)]
pub struct StartAssessmentRequest {
    pub assessment_type: AssessmentType,
}

/// Body for POST /api/assessments/{id}/messages.
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// View returned when an assessment is started.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartedView {
    pub assessment_id: String,
    pub first_question: String,
    pub status: &'static str,
}

/// View returned for each processed message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageOutcomeView {
    /// The parsed model reply (`next_question`/`final_summary`/`is_complete`).
    pub response: AssessmentReply,
    pub is_complete: bool,
    pub timestamp: String,
}

impl MessageOutcomeView {
    pub fn from_reply(reply: AssessmentReply) -> Self {
        Self {
            is_complete: reply.is_complete,
            response: reply,
            timestamp: Timestamp::now().as_datetime().to_rfc3339(),
        }
    }
}

/// Public projection of an assessment (no transcript).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentView {
    pub id: String,
    pub status: AssessmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competency_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competency_label: Option<&'static str>,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    pub conversation_length: u32,
}

impl AssessmentView {
    pub fn from_assessment(assessment: &Assessment) -> Self {
        Self {
            id: assessment.id().to_string(),
            status: assessment.status(),
            competency_level: assessment.competency_level().map(|l| l.rank()),
            competency_label: assessment.competency_label(),
            created_at: assessment.created_at().as_datetime().to_rfc3339(),
            completed_at: assessment
                .completed_at()
                .map(|ts| ts.as_datetime().to_rfc3339()),
            conversation_length: assessment.message_count() as u32,
        }
    }
}

/// View of a single transcript message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub id: String,
    pub sender: &'static str,
    pub content: String,
    pub created_at: String,
}

impl MessageView {
    pub fn from_message(message: &Message) -> Self {
        Self {
            id: message.id().to_string(),
            sender: message.sender().as_str(),
            content: message.content().to_string(),
            created_at: message.created_at().as_datetime().to_rfc3339(),
        }
    }
}

/// View of the conversation context: transcript plus derived indicators.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextView {
    pub assessment_id: String,
    pub status: AssessmentStatus,
    pub conversation_history: Vec<MessageView>,
    pub competency_indicators: CompetencyIndicators,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_level: Option<u8>,
}

/// View returned by restart.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestartView {
    pub message: &'static str,
    pub first_question: String,
}

/// View returned by the health endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthView {
    pub service: &'static str,
    pub database: bool,
    pub timestamp: String,
}
