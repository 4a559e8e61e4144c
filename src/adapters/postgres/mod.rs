//! PostgreSQL adapters.

mod assessment_repository;
mod starter_questions;

pub use assessment_repository::PgAssessmentRepository;
pub use starter_questions::PgStarterQuestionSource;
