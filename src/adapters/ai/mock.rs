//! Mock AI provider for testing.
//!
//! Configurable to return queued completions or inject transport errors,
//! with call tracking for verification. Lets the engine and HTTP layer be
//! exercised without a real model API.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{AiError, AiProvider, ProviderInfo};

/// A configured mock outcome.
#[derive(Debug, Clone)]
enum MockOutcome {
    /// Return this completion text.
    Reply(String),
    /// Fail with a provider-unavailable error.
    Unavailable,
    /// Fail with a timeout error.
    Timeout,
}

/// Mock AI provider.
///
/// Queued outcomes are consumed in order; an exhausted queue fails with
/// `Unavailable` so a test that forgets to configure a reply fails loudly.
#[derive(Debug, Clone, Default)]
pub struct MockAiProvider {
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockAiProvider {
    /// Creates a mock with an empty outcome queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a completion text to return.
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Reply(reply.into()));
        self
    }

    /// Queues a provider-unavailable failure.
    pub fn failing_with_unavailable(self) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Unavailable);
        self
    }

    /// Queues a timeout failure.
    pub fn failing_with_timeout(self) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Timeout);
        self
    }

    /// Number of generate calls made so far.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// The most recent prompt, if any call was made.
    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate_text(&self, prompt: &str) -> Result<String, AiError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        let outcome = self.outcomes.lock().unwrap().pop_front();
        match outcome {
            Some(MockOutcome::Reply(text)) => Ok(text),
            Some(MockOutcome::Unavailable) => {
                Err(AiError::unavailable("mock provider unavailable"))
            }
            Some(MockOutcome::Timeout) => Err(AiError::Timeout { timeout_secs: 30 }),
            None => Err(AiError::unavailable("no mock responses configured")),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("mock", "mock-model-1")
    }
}
