//! Model reply parsing.
//!
//! Model completions arrive as free text that should contain a single JSON
//! object, but may be wrapped in code fences or surrounded by prose. The
//! parser extracts and validates that object. Any decode or validation
//! failure yields a safe continuation reply instead of an error: the
//! conversation keeps going with a generic clarifying question. That
//! fallback is a resilience contract, not error swallowing to be fixed.

use serde::Serialize;

/// Generic clarifying question returned when a model reply cannot be parsed.
pub const FALLBACK_QUESTION: &str = "I'd like to understand more about your experience with AI. Can you tell me about any AI tools you've used in your work or personal life?";

/// One parsed turn of the assessment dialogue.
///
/// Exactly one of `next_question` / `final_summary` is set, matching
/// `is_complete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessmentReply {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_summary: Option<String>,
    pub is_complete: bool,
}

impl AssessmentReply {
    /// Creates a continuation reply carrying the next question.
    pub fn question(text: impl Into<String>) -> Self {
        Self {
            next_question: Some(text.into()),
            final_summary: None,
            is_complete: false,
        }
    }

    /// Creates a terminal reply carrying the final summary.
    pub fn completed(summary: impl Into<String>) -> Self {
        Self {
            next_question: None,
            final_summary: Some(summary.into()),
            is_complete: true,
        }
    }

    /// Creates the parse-failure fallback reply.
    pub fn fallback() -> Self {
        Self::question(FALLBACK_QUESTION)
    }
}

/// Parses a raw model completion into an [`AssessmentReply`].
///
/// Never fails: anything that does not validate collapses to
/// [`AssessmentReply::fallback`].
pub fn parse_model_reply(text: &str) -> AssessmentReply {
    match try_parse(text) {
        Some(reply) => reply,
        None => {
            tracing::warn!(
                response_length = text.len(),
                "model reply failed validation, using fallback question"
            );
            AssessmentReply::fallback()
        }
    }
}

fn try_parse(text: &str) -> Option<AssessmentReply> {
    let cleaned = extract_json_object(text)?;
    let parsed: serde_json::Value = serde_json::from_str(&cleaned).ok()?;

    let is_complete = parsed.get("is_complete")?.as_bool()?;

    if is_complete {
        let summary = non_empty_string(parsed.get("final_summary")?)?;
        Some(AssessmentReply::completed(summary))
    } else {
        let question = non_empty_string(parsed.get("next_question")?)?;
        Some(AssessmentReply::question(question))
    }
}

/// Strips code-fence markers and slices out the first-to-last brace span.
fn extract_json_object(text: &str) -> Option<String> {
    let cleaned = text.replace("```json", "").replace("```", "");
    let cleaned = cleaned.trim();

    let start = cleaned.find('{')?;
    let end = cleaned.rfind('}')?;
    if end < start {
        return None;
    }
    Some(cleaned[start..=end].to_string())
}

fn non_empty_string(value: &serde_json::Value) -> Option<String> {
    let s = value.as_str()?;
    if s.trim().is_empty() {
        return None;
    }
    Some(s.to_string())
}
