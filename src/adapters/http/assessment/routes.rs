//! Axum routes for assessment endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    abandon_assessment, get_assessment, get_context, health, list_starter_questions,
    restart_assessment, send_message, start_assessment, AppState,
};

/// Creates routes for assessment endpoints.
///
/// Endpoints:
/// - POST /assessments - start a new assessment
/// - POST /assessments/:id/messages - send one user message
/// - GET  /assessments/:id - public assessment projection
/// - GET  /assessments/:id/context - transcript and indicators
/// - POST /assessments/:id/abandon - mark abandoned
/// - POST /assessments/:id/restart - reset and restart
/// - GET  /assessments/starter-questions - list the question library
/// - GET  /health - service health
pub fn assessment_routes() -> Router<AppState> {
    Router::new()
        .route("/assessments", post(start_assessment))
        .route(
            "/assessments/starter-questions",
            get(list_starter_questions),
        )
        .route("/assessments/:id", get(get_assessment))
        .route("/assessments/:id/messages", post(send_message))
        .route("/assessments/:id/context", get(get_context))
        .route("/assessments/:id/abandon", post(abandon_assessment))
        .route("/assessments/:id/restart", post(restart_assessment))
        .route("/health", get(health))
}

/// Combined router with all assessment routes under /api.
pub fn api_router() -> Router<AppState> {
    Router::new().nest("/api", assessment_routes())
}
