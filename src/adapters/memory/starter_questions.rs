//! In-memory starter question source.
//!
//! Serves a fixed question list. Used in tests and as the dev-mode library
//! when no database-backed library is configured.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::ports::{StarterQuestion, StarterQuestionSource};

/// Fixed-list starter question source.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStarterQuestions {
    questions: Vec<StarterQuestion>,
}

impl InMemoryStarterQuestions {
    /// Creates an empty source (pick_random falls back).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source with the given questions.
    pub fn with_questions(questions: Vec<StarterQuestion>) -> Self {
        Self { questions }
    }

    /// Creates a source with the default opening-question set.
    pub fn with_defaults() -> Self {
        let texts = [
            "How would you describe your current understanding of artificial intelligence and its business applications?",
            "When you hear about AI in your industry, what is your first reaction?",
            "Have you or your team used any AI tools in your day-to-day work so far?",
        ];
        Self::with_questions(
            texts
                .iter()
                .enumerate()
                .map(|(index, text)| StarterQuestion {
                    id: (index + 1).to_string(),
                    text: text.to_string(),
                    category: "foundation_knowledge".to_string(),
                })
                .collect(),
        )
    }
}

#[async_trait]
impl StarterQuestionSource for InMemoryStarterQuestions {
    async fn list(&self) -> Result<Vec<StarterQuestion>, DomainError> {
        Ok(self.questions.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::fallback_question;

    #[tokio::test]
    async fn defaults_contain_questions() {
        let source = InMemoryStarterQuestions::with_defaults();
        let questions = source.list().await.unwrap();
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0].category, "foundation_knowledge");
    }

    #[tokio::test]
    async fn pick_random_draws_from_the_list() {
        let source = InMemoryStarterQuestions::with_defaults();
        let questions = source.list().await.unwrap();
        let picked = source.pick_random().await;
        assert!(questions.contains(&picked));
    }

    #[tokio::test]
    async fn empty_source_falls_back() {
        let source = InMemoryStarterQuestions::new();
        let picked = source.pick_random().await;
        assert_eq!(picked, fallback_question());
    }
}
