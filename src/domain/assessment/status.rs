//! Assessment status - the conversation lifecycle state machine.
//!
//! Transitions are monotonic: `InProgress` may move to `Completed` or
//! `Abandoned`, and both of those are terminal. The one exception is the
//! restart reset, which returns an `Abandoned` (or still-running) assessment
//! to `InProgress` with a cleared transcript; that path is modeled by
//! [`crate::domain::assessment::Assessment::reset`], not by this transition
//! table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of an assessment conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    /// The conversation is running and accepts user messages.
    InProgress,
    /// The assessment finished with a competency outcome. Terminal.
    Completed,
    /// The user walked away before completion. Terminal.
    Abandoned,
}

impl AssessmentStatus {
    /// Returns true if messages may be appended in this status.
    pub fn accepts_messages(&self) -> bool {
        matches!(self, Self::InProgress)
    }

    /// Returns true if this status is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Abandoned)
    }

    /// Checks if a direct transition to the target status is valid.
    pub fn can_transition_to(&self, target: &AssessmentStatus) -> bool {
        matches!(
            (self, target),
            (Self::InProgress, Self::Completed) | (Self::InProgress, Self::Abandoned)
        )
    }

    /// Returns the storage representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Abandoned => "abandoned",
        }
    }
}

impl fmt::Display for AssessmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AssessmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "abandoned" => Ok(Self::Abandoned),
            other => Err(format!("unknown assessment status: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_progress_accepts_messages() {
        assert!(AssessmentStatus::InProgress.accepts_messages());
        assert!(!AssessmentStatus::Completed.accepts_messages());
        assert!(!AssessmentStatus::Abandoned.accepts_messages());
    }

    #[test]
    fn completed_and_abandoned_are_terminal() {
        assert!(!AssessmentStatus::InProgress.is_terminal());
        assert!(AssessmentStatus::Completed.is_terminal());
        assert!(AssessmentStatus::Abandoned.is_terminal());
    }

    #[test]
    fn valid_transitions_from_in_progress() {
        let from = AssessmentStatus::InProgress;
        assert!(from.can_transition_to(&AssessmentStatus::Completed));
        assert!(from.can_transition_to(&AssessmentStatus::Abandoned));
        assert!(!from.can_transition_to(&AssessmentStatus::InProgress));
    }

    #[test]
    fn no_transitions_out_of_terminal_states() {
        for terminal in [AssessmentStatus::Completed, AssessmentStatus::Abandoned] {
            assert!(!terminal.can_transition_to(&AssessmentStatus::InProgress));
            assert!(!terminal.can_transition_to(&AssessmentStatus::Completed));
            assert!(!terminal.can_transition_to(&AssessmentStatus::Abandoned));
        }
    }

    #[test]
    fn status_roundtrips_through_str() {
        for status in [
            AssessmentStatus::InProgress,
            AssessmentStatus::Completed,
            AssessmentStatus::Abandoned,
        ] {
            let parsed: AssessmentStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn status_serializes_to_snake_case() {
        let json = serde_json::to_string(&AssessmentStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }
}
