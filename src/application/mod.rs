//! Application layer - orchestration over domain and ports.

mod engine;
mod locks;

pub use engine::{
    AssessmentEngine, ConversationContext, StartedAssessment, MAX_MESSAGE_CHARS,
};
pub use locks::LockRegistry;
