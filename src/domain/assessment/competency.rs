//! Competency classification - signal extraction and level determination.
//!
//! The analyzer scans a single user utterance for keyword signals across four
//! dimensions (mindset, understanding, usage, vision) and derives a 1-4
//! maturity level from the accumulated tags. Scoring is deliberately a
//! keyword heuristic; the level rules are evaluated in strict priority order
//! with level 1 as the default.

use serde::{Deserialize, Serialize};
use std::fmt;

/// AI maturity classification, 1 through 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetencyLevel {
    /// Level 1 - cautious or passively curious, no meaningful usage.
    Aware,
    /// Level 2 - open and curious, occasional task-specific usage.
    Exploratory,
    /// Level 3 - pragmatic integration of AI into the daily workflow.
    Applied,
    /// Level 4 - visionary, leads organization-wide adoption.
    Strategic,
}

impl CompetencyLevel {
    /// Returns the numeric rank (1-4) of this level.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Aware => 1,
            Self::Exploratory => 2,
            Self::Applied => 3,
            Self::Strategic => 4,
        }
    }

    /// Returns the display label for this level.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Aware => "Aware",
            Self::Exploratory => "Exploratory",
            Self::Applied => "Applied",
            Self::Strategic => "Strategic",
        }
    }

    /// Creates a level from its numeric rank.
    pub fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            1 => Some(Self::Aware),
            2 => Some(Self::Exploratory),
            3 => Some(Self::Applied),
            4 => Some(Self::Strategic),
            _ => None,
        }
    }
}

impl fmt::Display for CompetencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// Signal tags per dimension. Each tag is recorded at most once per analysis
// call.
pub const POSITIVE_OUTLOOK: &str = "positive_outlook";
pub const CAUTIOUS_APPROACH: &str = "cautious_approach";
pub const STRATEGIC_THINKING: &str = "strategic_thinking";
pub const TOOL_AWARENESS: &str = "tool_awareness";
pub const TECHNICAL_UNDERSTANDING: &str = "technical_understanding";
pub const CONCEPTUAL_CLARITY: &str = "conceptual_clarity";
pub const REGULAR_USAGE: &str = "regular_usage";
pub const NO_USAGE: &str = "no_usage";
pub const SOPHISTICATED_USAGE: &str = "sophisticated_usage";
pub const ORGANIZATIONAL_THINKING: &str = "organizational_thinking";
pub const BUSINESS_IMPACT_FOCUS: &str = "business_impact_focus";

/// Signal tags extracted from one user utterance, plus a confidence score.
///
/// This is a derived projection recomputed per turn, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompetencyIndicators {
    pub mindset_signals: Vec<&'static str>,
    pub understanding_signals: Vec<&'static str>,
    pub usage_signals: Vec<&'static str>,
    pub vision_signals: Vec<&'static str>,
    /// 0-100, scaled by conversation depth and signal density.
    pub confidence_score: u8,
}

impl CompetencyIndicators {
    /// Analyzes a user utterance for competency signals.
    ///
    /// Matching is case-insensitive substring containment, independent per
    /// dimension; one utterance may trigger any number of signals. The
    /// confidence score is `min(100, message_count*10 + total_signals*5)`,
    /// recomputed fresh on each call.
    pub fn analyze(utterance: &str, message_count: usize) -> Self {
        let input = utterance.to_lowercase();
        let mut indicators = Self::default();

        // Mindset
        if contains_any(&input, &["excited", "opportunity", "potential"]) {
            indicators.mindset_signals.push(POSITIVE_OUTLOOK);
        }
        if contains_any(&input, &["worried", "concerned", "scary"]) {
            indicators.mindset_signals.push(CAUTIOUS_APPROACH);
        }
        if contains_any(&input, &["strategic", "transform", "competitive advantage"]) {
            indicators.mindset_signals.push(STRATEGIC_THINKING);
        }

        // Understanding
        if contains_any(&input, &["chatgpt", "ai tool", "machine learning"]) {
            indicators.understanding_signals.push(TOOL_AWARENESS);
        }
        if contains_any(&input, &["prompt", "training data", "limitations"]) {
            indicators.understanding_signals.push(TECHNICAL_UNDERSTANDING);
        }
        if input.contains("automation") && input.contains("different from ai") {
            indicators.understanding_signals.push(CONCEPTUAL_CLARITY);
        }

        // Usage
        if contains_any(&input, &["use daily", "regularly", "part of workflow"]) {
            indicators.usage_signals.push(REGULAR_USAGE);
        }
        if contains_any(&input, &["never used", "haven't tried"]) {
            indicators.usage_signals.push(NO_USAGE);
        }
        if contains_any(&input, &["brainstorm", "thought partner", "critique"]) {
            indicators.usage_signals.push(SOPHISTICATED_USAGE);
        }

        // Vision
        if contains_any(&input, &["team", "organization", "company-wide"]) {
            indicators.vision_signals.push(ORGANIZATIONAL_THINKING);
        }
        if contains_any(&input, &["roi", "business impact", "competitive"]) {
            indicators.vision_signals.push(BUSINESS_IMPACT_FOCUS);
        }

        let total_signals = indicators.total_signal_count();
        indicators.confidence_score =
            (message_count * 10 + total_signals * 5).min(100) as u8;

        indicators
    }

    /// Total number of signals across all four dimensions.
    pub fn total_signal_count(&self) -> usize {
        self.mindset_signals.len()
            + self.understanding_signals.len()
            + self.usage_signals.len()
            + self.vision_signals.len()
    }

    /// Derives the competency level from these indicators.
    ///
    /// Rules are evaluated in strict priority order; the first match wins
    /// and level 1 is the default.
    pub fn determine_level(&self) -> CompetencyLevel {
        let has = |signals: &[&str], tag: &str| signals.contains(&tag);

        if has(&self.vision_signals, ORGANIZATIONAL_THINKING)
            && has(&self.mindset_signals, STRATEGIC_THINKING)
            && has(&self.usage_signals, SOPHISTICATED_USAGE)
        {
            CompetencyLevel::Strategic
        } else if has(&self.usage_signals, REGULAR_USAGE)
            && has(&self.understanding_signals, TECHNICAL_UNDERSTANDING)
        {
            CompetencyLevel::Applied
        } else if has(&self.understanding_signals, TOOL_AWARENESS)
            && !has(&self.usage_signals, NO_USAGE)
        {
            CompetencyLevel::Exploratory
        } else {
            CompetencyLevel::Aware
        }
    }
}

fn contains_any(input: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| input.contains(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    mod level {
        use super::*;

        #[test]
        fn rank_and_label_are_consistent() {
            assert_eq!(CompetencyLevel::Aware.rank(), 1);
            assert_eq!(CompetencyLevel::Aware.label(), "Aware");
            assert_eq!(CompetencyLevel::Strategic.rank(), 4);
            assert_eq!(CompetencyLevel::Strategic.label(), "Strategic");
        }

        #[test]
        fn from_rank_roundtrips() {
            for rank in 1..=4u8 {
                let level = CompetencyLevel::from_rank(rank).unwrap();
                assert_eq!(level.rank(), rank);
            }
            assert!(CompetencyLevel::from_rank(0).is_none());
            assert!(CompetencyLevel::from_rank(5).is_none());
        }
    }

    mod analysis {
        use super::*;

        #[test]
        fn extracts_mindset_signals() {
            let indicators = CompetencyIndicators::analyze("I'm excited but also worried", 1);
            assert!(indicators.mindset_signals.contains(&POSITIVE_OUTLOOK));
            assert!(indicators.mindset_signals.contains(&CAUTIOUS_APPROACH));
        }

        #[test]
        fn matching_is_case_insensitive() {
            let indicators = CompetencyIndicators::analyze("I use ChatGPT Regularly", 1);
            assert!(indicators.understanding_signals.contains(&TOOL_AWARENESS));
            assert!(indicators.usage_signals.contains(&REGULAR_USAGE));
        }

        #[test]
        fn conceptual_clarity_requires_both_phrases() {
            let only_one = CompetencyIndicators::analyze("we do automation", 1);
            assert!(!only_one.understanding_signals.contains(&CONCEPTUAL_CLARITY));

            let both = CompetencyIndicators::analyze(
                "automation is different from ai in my view",
                1,
            );
            assert!(both.understanding_signals.contains(&CONCEPTUAL_CLARITY));
        }

        #[test]
        fn each_tag_recorded_at_most_once_per_call() {
            // Multiple trigger words for the same tag still record it once.
            let indicators =
                CompetencyIndicators::analyze("excited about the opportunity and potential", 1);
            assert_eq!(indicators.mindset_signals, vec![POSITIVE_OUTLOOK]);
        }

        #[test]
        fn no_signals_for_neutral_text() {
            let indicators = CompetencyIndicators::analyze("I run a bakery", 1);
            assert_eq!(indicators.total_signal_count(), 0);
        }

        #[test]
        fn confidence_scales_with_depth_and_signals() {
            let indicators = CompetencyIndicators::analyze("I'm excited", 3);
            // 3 messages * 10 + 1 signal * 5
            assert_eq!(indicators.confidence_score, 35);
        }

        #[test]
        fn confidence_caps_at_100() {
            let indicators = CompetencyIndicators::analyze("I'm excited", 50);
            assert_eq!(indicators.confidence_score, 100);
        }
    }

    mod level_determination {
        use super::*;

        #[test]
        fn applied_sentence_resolves_to_level_3() {
            let indicators = CompetencyIndicators::analyze(
                "I use AI regularly as part of workflow and understand the training data and its limitations",
                4,
            );
            assert!(indicators.usage_signals.contains(&REGULAR_USAGE));
            assert!(indicators
                .understanding_signals
                .contains(&TECHNICAL_UNDERSTANDING));
            assert_eq!(indicators.determine_level(), CompetencyLevel::Applied);
        }

        #[test]
        fn strategic_sentence_resolves_to_level_4() {
            let indicators = CompetencyIndicators::analyze(
                "We think strategically about competitive advantage and want company-wide adoption, using AI as a thought partner for brainstorming",
                6,
            );
            assert_eq!(indicators.determine_level(), CompetencyLevel::Strategic);
        }

        #[test]
        fn tool_awareness_without_usage_denial_is_level_2() {
            let indicators = CompetencyIndicators::analyze("I've heard of ChatGPT", 2);
            assert_eq!(indicators.determine_level(), CompetencyLevel::Exploratory);
        }

        #[test]
        fn tool_awareness_with_no_usage_stays_level_1() {
            let indicators =
                CompetencyIndicators::analyze("I know ChatGPT but I've never used it", 2);
            assert_eq!(indicators.determine_level(), CompetencyLevel::Aware);
        }

        #[test]
        fn default_is_level_1() {
            let indicators = CompetencyIndicators::analyze("not sure what any of this means", 2);
            assert_eq!(indicators.determine_level(), CompetencyLevel::Aware);
        }

        #[test]
        fn level_4_takes_priority_over_level_3() {
            // Satisfies both rule sets; the level 4 rule is checked first.
            let indicators = CompetencyIndicators::analyze(
                "Our organization uses AI regularly as a thought partner; I think about strategic transformation and prompt limitations",
                8,
            );
            assert_eq!(indicators.determine_level(), CompetencyLevel::Strategic);
        }
    }
}
