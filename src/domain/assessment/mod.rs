//! Assessment domain - conversation state, competency scoring, prompt
//! assembly, and model reply parsing.

mod assessment;
mod competency;
mod instructions;
mod message;
mod prompt;
mod reply;
mod status;

pub use assessment::{Assessment, AssessmentType};
pub use competency::{CompetencyIndicators, CompetencyLevel};
pub use instructions::{question_bank, system_instruction};
pub use message::{Message, Sender};
pub use prompt::{build_prompt, MAX_TRANSCRIPT_MESSAGES};
pub use reply::{parse_model_reply, AssessmentReply, FALLBACK_QUESTION};
pub use status::AssessmentStatus;
