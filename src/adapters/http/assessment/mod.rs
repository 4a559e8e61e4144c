//! HTTP surface for assessments.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{ApiError, AppState};
pub use routes::{api_router, assessment_routes};
