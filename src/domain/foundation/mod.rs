//! Foundation layer - shared value objects and error types.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode};
pub use ids::{AssessmentId, MessageId};
pub use timestamp::Timestamp;
