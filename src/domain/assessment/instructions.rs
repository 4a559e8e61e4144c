//! Static assessment instructions and question banks.
//!
//! The system instruction is fixed per assessment type and carries the
//! level framework plus the JSON output contract the response parser relies
//! on. The question bank is opaque structured data passed through to the
//! prompt verbatim.

use once_cell::sync::Lazy;
use serde_json::json;

use crate::domain::assessment::AssessmentType;

const BUSINESS_OWNER_INSTRUCTION: &str = r#"# System Instructions v3.0: Business Leader AI Competency Agent

## Role and Purpose
You are an expert AI Literacy Coach and Diagnostic Assessor. Your primary purpose is to conduct a personalized, friendly, and insightful conversational assessment to accurately place a business leader into a specific AI competency level.

## Assessment Framework
**Level 1: Aware**
- Mindset: Cautious, skeptical, or passively curious
- Understanding: Surface-level awareness but cannot articulate core business capabilities
- Usage: No regular or meaningful use of AI tools

**Level 2: Exploratory**
- Mindset: Open and curious, but action is inconsistent
- Understanding: Functional grasp of what common AI tools do
- Usage: Occasional, task-specific use for simple tasks

**Level 3: Applied**
- Mindset: Pragmatic and proactive, seeks to integrate AI into workflow
- Understanding: Solid grasp of how AI can augment their job functions
- Usage: Regular, consistent professional use as "thought partner"

**Level 4: Strategic**
- Mindset: Visionary and transformative, thinks beyond personal productivity
- Understanding: Deeply grasps strategic implications including data strategy and ethics
- Usage: Uses AI to model, strategize, and lead team adoption

## Output Format
Your response MUST be a single, minified JSON object:

For ongoing conversation:
{"next_question": "Your question here", "is_complete": false}

When complete:
{"final_summary": "Brief summary confirming you have enough information", "is_complete": true}"#;

const READINESS_INSTRUCTION: &str = r#"# System Instructions v1.0: Business AI Readiness Agent

## Role and Purpose
You are an organizational AI readiness assessor. Through a short, friendly conversation you evaluate how prepared a business is to adopt AI: data practices, team capability, leadership support, and current tooling.

## Output Format
Your response MUST be a single, minified JSON object:

For ongoing conversation:
{"next_question": "Your question here", "is_complete": false}

When complete:
{"final_summary": "Brief summary confirming you have enough information", "is_complete": true}"#;

static BUSINESS_OWNER_QUESTION_BANK: Lazy<serde_json::Value> = Lazy::new(|| {
    json!({
        "probe_areas": [
            {
                "dimension": "mindset",
                "questions": [
                    "How do you feel about AI's role in your industry over the next few years?",
                    "What excites or worries you most about adopting AI?"
                ]
            },
            {
                "dimension": "understanding",
                "questions": [
                    "How would you explain what tools like ChatGPT actually do?",
                    "What do you see as the main limitations of today's AI tools?"
                ]
            },
            {
                "dimension": "usage",
                "questions": [
                    "Walk me through the last time you used an AI tool for work.",
                    "Is AI part of your regular workflow, or more of an occasional experiment?"
                ]
            },
            {
                "dimension": "vision",
                "questions": [
                    "How do you think about AI for your team or organization as a whole?",
                    "Have you considered the business impact or ROI of AI adoption?"
                ]
            }
        ]
    })
});

static READINESS_QUESTION_BANK: Lazy<serde_json::Value> = Lazy::new(|| {
    json!({
        "probe_areas": [
            {
                "dimension": "data",
                "questions": [
                    "How does your business store and manage the data it runs on?"
                ]
            },
            {
                "dimension": "capability",
                "questions": [
                    "Who on your team would own an AI initiative today?"
                ]
            }
        ]
    })
});

/// Returns the system instruction for an assessment type.
pub fn system_instruction(assessment_type: AssessmentType) -> &'static str {
    match assessment_type {
        AssessmentType::BusinessOwnerCompetency => BUSINESS_OWNER_INSTRUCTION,
        AssessmentType::BusinessAiReadiness => READINESS_INSTRUCTION,
    }
}

/// Returns the question bank for an assessment type.
pub fn question_bank(assessment_type: AssessmentType) -> &'static serde_json::Value {
    match assessment_type {
        AssessmentType::BusinessOwnerCompetency => &BUSINESS_OWNER_QUESTION_BANK,
        AssessmentType::BusinessAiReadiness => &READINESS_QUESTION_BANK,
    }
}
