//! Starter question source port.
//!
//! Opening questions come from an editable library; the engine only needs
//! "give me one at random". When the library is empty or unreachable the
//! hardcoded fallback keeps new conversations starting.

use async_trait::async_trait;
use rand::seq::SliceRandom;

use crate::domain::foundation::DomainError;

/// One opening question from the library.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct StarterQuestion {
    pub id: String,
    pub text: String,
    pub category: String,
}

/// The question used when the library yields nothing.
pub fn fallback_question() -> StarterQuestion {
    StarterQuestion {
        id: "1".to_string(),
        text: "How would you describe your current understanding of artificial intelligence and its business applications?".to_string(),
        category: "foundation_knowledge".to_string(),
    }
}

/// Port for the starter question library.
#[async_trait]
pub trait StarterQuestionSource: Send + Sync {
    /// Lists all available starter questions.
    async fn list(&self) -> Result<Vec<StarterQuestion>, DomainError>;

    /// Picks one starter question uniformly at random.
    ///
    /// Infallible by design: an empty or failing library falls back to
    /// [`fallback_question`].
    async fn pick_random(&self) -> StarterQuestion {
        let questions = match self.list().await {
            Ok(questions) => questions,
            Err(err) => {
                tracing::warn!(error = %err, "starter question lookup failed, using fallback");
                return fallback_question();
            }
        };

        questions
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_else(fallback_question)
    }
}
