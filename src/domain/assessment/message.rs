//! Message entity for assessment conversations.
//!
//! Messages are immutable records of the user/system exchange within an
//! assessment. Each message has a sender, content, and timestamp.

use crate::domain::foundation::{DomainError, MessageId, Timestamp};
use serde::{Deserialize, Serialize};

/// Sender of a message in an assessment conversation.
///
/// `System` covers both the opening question and every model-generated turn;
/// the prompt builder renders system messages as "Assistant:" lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// Input typed by the business owner being assessed.
    User,
    /// Questions and summaries produced by the assessment side.
    System,
}

impl Sender {
    /// Returns the storage representation of this sender.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::System => "system",
        }
    }
}

impl std::str::FromStr for Sender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "system" => Ok(Self::System),
            other => Err(format!("unknown message sender: {}", other)),
        }
    }
}

/// An immutable message within an assessment conversation.
///
/// # Invariants
///
/// - `id` is globally unique
/// - `content` is non-empty (validated at construction)
/// - `created_at` is set at construction and never changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    sender: Sender,
    content: String,
    created_at: Timestamp,
}

impl Message {
    /// Creates a new message with the given sender and content.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if content is empty
    pub fn new(sender: Sender, content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::validation(
                "content",
                "Message content cannot be empty",
            ));
        }

        Ok(Self {
            id: MessageId::new(),
            sender,
            content,
            created_at: Timestamp::now(),
        })
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(Sender::User, content)
    }

    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(Sender::System, content)
    }

    /// Reconstitutes a message from persistence (no validation).
    pub fn reconstitute(
        id: MessageId,
        sender: Sender,
        content: String,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            sender,
            content,
            created_at,
        }
    }

    /// Returns the message ID.
    pub fn id(&self) -> &MessageId {
        &self.id
    }

    /// Returns the sender.
    pub fn sender(&self) -> Sender {
        self.sender
    }

    /// Returns the content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns when the message was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns true if this message came from the user.
    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod sender {
        use super::*;

        #[test]
        fn roundtrips_through_str() {
            for sender in [Sender::User, Sender::System] {
                let parsed: Sender = sender.as_str().parse().unwrap();
                assert_eq!(parsed, sender);
            }
        }

        #[test]
        fn serializes_to_snake_case() {
            let json = serde_json::to_string(&Sender::System).unwrap();
            assert_eq!(json, "\"system\"");
        }
    }

    mod message_construction {
        use super::*;

        #[test]
        fn new_creates_message_with_sender() {
            let msg = Message::new(Sender::User, "Hello").unwrap();
            assert_eq!(msg.sender(), Sender::User);
            assert_eq!(msg.content(), "Hello");
        }

        #[test]
        fn user_creates_user_message() {
            let msg = Message::user("Hello").unwrap();
            assert!(msg.is_user());
        }

        #[test]
        fn system_creates_system_message() {
            let msg = Message::system("What brings you here?").unwrap();
            assert_eq!(msg.sender(), Sender::System);
            assert!(!msg.is_user());
        }

        #[test]
        fn rejects_empty_content() {
            assert!(Message::new(Sender::User, "").is_err());
        }

        #[test]
        fn rejects_whitespace_only_content() {
            assert!(Message::new(Sender::User, "   ").is_err());
        }
    }

    mod message_reconstitute {
        use super::*;

        #[test]
        fn reconstitute_preserves_all_fields() {
            let id = MessageId::new();
            let created_at = Timestamp::now();

            let msg =
                Message::reconstitute(id, Sender::User, "Test content".to_string(), created_at);

            assert_eq!(msg.id(), &id);
            assert_eq!(msg.sender(), Sender::User);
            assert_eq!(msg.content(), "Test content");
            assert_eq!(msg.created_at(), &created_at);
        }
    }
}
