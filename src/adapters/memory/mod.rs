//! In-memory adapters for testing and single-server development.

mod assessment_repository;
mod rate_limiter;
mod starter_questions;

pub use assessment_repository::InMemoryAssessmentRepository;
pub use rate_limiter::FixedWindowRateLimiter;
pub use starter_questions::InMemoryStarterQuestions;
