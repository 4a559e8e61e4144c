//! HTTP handlers for assessment endpoints.
//!
//! These handlers connect Axum routes to the assessment engine.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::AssessmentEngine;
use crate::domain::foundation::{AssessmentId, DomainError, ErrorCode};
use crate::ports::{AssessmentRepository, RateLimiter, StarterQuestionSource};

use super::dto::{
    AssessmentView, ContextView, Envelope, HealthView, MessageOutcomeView, MessageView,
    RestartView, SendMessageRequest, StartAssessmentRequest, StartedView,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state for assessment handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<AssessmentEngine>,
    pub repository: Arc<dyn AssessmentRepository>,
    pub starters: Arc<dyn StarterQuestionSource>,
    /// Optional rate limiter for throttling message turns.
    pub rate_limiter: Option<Arc<dyn RateLimiter>>,
}

impl AppState {
    /// Creates a new AppState.
    pub fn new(
        engine: Arc<AssessmentEngine>,
        repository: Arc<dyn AssessmentRepository>,
        starters: Arc<dyn StarterQuestionSource>,
    ) -> Self {
        Self {
            engine,
            repository,
            starters,
            rate_limiter: None,
        }
    }

    /// Attaches a rate limiter.
    pub fn with_rate_limiter(mut self, rate_limiter: Arc<dyn RateLimiter>) -> Self {
        self.rate_limiter = Some(rate_limiter);
        self
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/assessments - start a new assessment.
pub async fn start_assessment(
    State(state): State<AppState>,
    Json(request): Json<StartAssessmentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let started = state.engine.start(request.assessment_type).await?;

    let view = StartedView {
        assessment_id: started.assessment_id.to_string(),
        first_question: started.first_question,
        status: "started",
    };
    Ok((StatusCode::CREATED, Json(Envelope::ok(view))))
}

/// POST /api/assessments/{id}/messages - send one user message.
pub async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_assessment_id(&id)?;

    if let Some(ref rate_limiter) = state.rate_limiter {
        let key = format!("message:{}", id);
        if !rate_limiter.check(&key).await.is_allowed() {
            return Err(ApiError::RateLimited(
                "Too many messages. Please wait before trying again.".to_string(),
            ));
        }
    }

    let reply = state
        .engine
        .continue_conversation(id, &request.message)
        .await?;

    tracing::info!(
        assessment_id = %id,
        is_complete = reply.is_complete,
        "conversation message processed"
    );

    Ok((
        StatusCode::OK,
        Json(Envelope::ok(MessageOutcomeView::from_reply(reply))),
    ))
}

/// GET /api/assessments/{id} - public assessment projection.
pub async fn get_assessment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_assessment_id(&id)?;
    let assessment = state.engine.get_assessment(id).await?;

    Ok((
        StatusCode::OK,
        Json(Envelope::ok(AssessmentView::from_assessment(&assessment))),
    ))
}

/// GET /api/assessments/{id}/context - transcript and indicators.
pub async fn get_context(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_assessment_id(&id)?;
    let context = state.engine.get_context(id).await?;

    let view = ContextView {
        assessment_id: context.assessment_id.to_string(),
        status: context.status,
        conversation_history: context
            .messages
            .iter()
            .map(MessageView::from_message)
            .collect(),
        competency_indicators: context.indicators,
        current_level: context.current_level.map(|l| l.rank()),
    };
    Ok((StatusCode::OK, Json(Envelope::ok(view))))
}

/// POST /api/assessments/{id}/abandon - mark an assessment abandoned.
pub async fn abandon_assessment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_assessment_id(&id)?;
    state.engine.abandon(id).await?;

    Ok((
        StatusCode::OK,
        Json(Envelope::message("Assessment marked as abandoned")),
    ))
}

/// POST /api/assessments/{id}/restart - reset and restart an assessment.
pub async fn restart_assessment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_assessment_id(&id)?;
    let restarted = state.engine.restart(id).await?;

    let view = RestartView {
        message: "Conversation restarted",
        first_question: restarted.first_question,
    };
    Ok((StatusCode::OK, Json(Envelope::ok(view))))
}

/// GET /api/assessments/starter-questions - list the question library.
pub async fn list_starter_questions(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let questions = state
        .starters
        .list()
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::OK, Json(Envelope::ok(questions))))
}

/// GET /api/health - service health.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let database = state.repository.ping().await.is_ok();
    let view = HealthView {
        service: "assessment",
        database,
        timestamp: crate::domain::foundation::Timestamp::now()
            .as_datetime()
            .to_rfc3339(),
    };

    let status = if database {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(Envelope::ok(view)))
}

fn parse_assessment_id(raw: &str) -> Result<AssessmentId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest("Invalid assessment ID format".to_string()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    RateLimited(String),
    Internal(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::AssessmentNotFound => ApiError::NotFound(err.message),
            ErrorCode::InvalidState | ErrorCode::ValidationFailed => {
                ApiError::BadRequest(err.message)
            }
            ErrorCode::RateLimited => ApiError::RateLimited(err.message),
            ErrorCode::UpstreamError | ErrorCode::DatabaseError | ErrorCode::InternalError => {
                ApiError::Internal(err.message)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::RateLimited(msg) => (StatusCode::TOO_MANY_REQUESTS, msg),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Json(Envelope::error(message))).into_response()
    }
}
