//! Prompt assembly for the model provider.
//!
//! Builds the single text prompt sent on every turn: system instruction,
//! question bank, transcript, the new user utterance, and a trailing
//! instruction demanding a minified JSON reply. Pure function of its inputs.

use crate::domain::assessment::{Message, Sender};

/// Upper bound on transcript lines rendered into a prompt.
///
/// The transcript grows without bound over a conversation's life; only the
/// most recent messages are rendered so the prompt stays inside the model's
/// context window. Older turns are dropped silently.
pub const MAX_TRANSCRIPT_MESSAGES: usize = 50;

/// Builds the full prompt for one conversation turn.
///
/// Output order is fixed: system instruction, serialized question bank,
/// transcript as alternating `User:`/`Assistant:` lines in chronological
/// order, the new user utterance, and the JSON-reply instruction.
pub fn build_prompt(
    system_instruction: &str,
    question_bank: &serde_json::Value,
    history: &[Message],
    user_input: &str,
) -> String {
    let mut context = String::from(system_instruction);

    if !question_bank.is_null() {
        let serialized = serde_json::to_string_pretty(question_bank)
            .unwrap_or_else(|_| question_bank.to_string());
        context.push_str("\n\nQuestion Bank:\n");
        context.push_str(&serialized);
    }

    let start = history.len().saturating_sub(MAX_TRANSCRIPT_MESSAGES);
    let window = &history[start..];

    if !window.is_empty() {
        context.push_str("\n\nConversation History:");
        for message in window {
            let role = match message.sender() {
                Sender::User => "User",
                Sender::System => "Assistant",
            };
            context.push('\n');
            context.push_str(role);
            context.push_str(": ");
            context.push_str(message.content());
        }
    }

    context.push_str("\n\nUser: ");
    context.push_str(user_input);
    context.push_str(
        "\n\nPlease respond with a single JSON object in the exact format specified in the system instructions.",
    );

    context
}
