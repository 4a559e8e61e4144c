//! End-to-end assessment flow over in-memory adapters.
//!
//! Drives the engine through full conversations with a scripted mock
//! provider and checks the lifecycle invariants hold at every step.

use std::sync::Arc;

use acumen::adapters::ai::MockAiProvider;
use acumen::adapters::memory::{InMemoryAssessmentRepository, InMemoryStarterQuestions};
use acumen::application::AssessmentEngine;
use acumen::domain::assessment::{
    AssessmentStatus, AssessmentType, CompetencyLevel, Sender, FALLBACK_QUESTION,
};
use acumen::domain::foundation::ErrorCode;
use acumen::ports::AssessmentRepository;

fn continue_reply(question: &str) -> String {
    format!(r#"{{"is_complete": false, "next_question": "{}"}}"#, question)
}

fn complete_reply(summary: &str) -> String {
    format!(r#"{{"is_complete": true, "final_summary": "{}"}}"#, summary)
}

fn build_engine(provider: MockAiProvider) -> (AssessmentEngine, Arc<InMemoryAssessmentRepository>) {
    let repository = Arc::new(InMemoryAssessmentRepository::new());
    let engine = AssessmentEngine::new(
        repository.clone(),
        Arc::new(provider),
        Arc::new(InMemoryStarterQuestions::with_defaults()),
    );
    (engine, repository)
}

#[tokio::test]
async fn full_conversation_reaches_strategic_level() {
    let provider = MockAiProvider::new()
        .with_reply(continue_reply("How do you use AI day to day?"))
        .with_reply(continue_reply("How does your organization fit in?"))
        .with_reply(complete_reply("Thanks, I have what I need."));
    let (engine, repository) = build_engine(provider);

    let started = engine
        .start(AssessmentType::BusinessOwnerCompetency)
        .await
        .unwrap();

    let r1 = engine
        .continue_conversation(started.assessment_id, "I'm excited about the potential")
        .await
        .unwrap();
    assert!(!r1.is_complete);

    let r2 = engine
        .continue_conversation(started.assessment_id, "I use it regularly for drafts")
        .await
        .unwrap();
    assert!(!r2.is_complete);

    // Final turn carries the level-4 trigger signals.
    let r3 = engine
        .continue_conversation(
            started.assessment_id,
            "We think strategically about competitive advantage and want company-wide adoption, using AI as a thought partner for brainstorming",
        )
        .await
        .unwrap();
    assert!(r3.is_complete);
    assert_eq!(r3.final_summary.as_deref(), Some("Thanks, I have what I need."));

    let assessment = repository
        .find_by_id(started.assessment_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(assessment.status(), AssessmentStatus::Completed);
    assert_eq!(
        assessment.competency_level(),
        Some(CompetencyLevel::Strategic)
    );
    assert_eq!(assessment.competency_label(), Some("Strategic"));
    assert!(assessment.completed_at().is_some());

    // Transcript: start question + 3 turns (user+system each) with the
    // summary as the final system message.
    assert_eq!(assessment.message_count(), 7);
    assert_eq!(
        assessment.last_message().unwrap().content(),
        "Thanks, I have what I need."
    );
    assert_eq!(assessment.last_message().unwrap().sender(), Sender::System);
}

#[tokio::test]
async fn competency_level_is_set_iff_completed() {
    let provider = MockAiProvider::new()
        .with_reply(continue_reply("Q2"))
        .with_reply(complete_reply("Done."));
    let (engine, repository) = build_engine(provider);

    let started = engine
        .start(AssessmentType::BusinessOwnerCompetency)
        .await
        .unwrap();

    // In progress: no level.
    engine
        .continue_conversation(started.assessment_id, "hello there")
        .await
        .unwrap();
    let mid = repository
        .find_by_id(started.assessment_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(mid.status(), AssessmentStatus::InProgress);
    assert!(mid.competency_level().is_none());

    // Completed: level present.
    engine
        .continue_conversation(started.assessment_id, "that is everything")
        .await
        .unwrap();
    let done = repository
        .find_by_id(started.assessment_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(done.status(), AssessmentStatus::Completed);
    assert!(done.competency_level().is_some());
}

#[tokio::test]
async fn abandoned_assessment_keeps_level_unset() {
    let (engine, repository) = build_engine(MockAiProvider::new());

    let started = engine
        .start(AssessmentType::BusinessOwnerCompetency)
        .await
        .unwrap();
    engine.abandon(started.assessment_id).await.unwrap();

    let assessment = repository
        .find_by_id(started.assessment_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(assessment.status(), AssessmentStatus::Abandoned);
    assert!(assessment.competency_level().is_none());
}

#[tokio::test]
async fn parse_fallback_keeps_conversation_alive_to_completion() {
    let provider = MockAiProvider::new()
        .with_reply("total nonsense, no JSON here")
        .with_reply(complete_reply("Wrapped up."));
    let (engine, repository) = build_engine(provider);

    let started = engine
        .start(AssessmentType::BusinessOwnerCompetency)
        .await
        .unwrap();

    let fallback = engine
        .continue_conversation(started.assessment_id, "first answer")
        .await
        .unwrap();
    assert_eq!(fallback.next_question.as_deref(), Some(FALLBACK_QUESTION));

    let done = engine
        .continue_conversation(started.assessment_id, "second answer")
        .await
        .unwrap();
    assert!(done.is_complete);

    let assessment = repository
        .find_by_id(started.assessment_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(assessment.status(), AssessmentStatus::Completed);
}

#[tokio::test]
async fn restart_after_abandon_produces_fresh_single_message_transcript() {
    let provider = MockAiProvider::new().with_reply(continue_reply("Q2"));
    let (engine, repository) = build_engine(provider);

    let started = engine
        .start(AssessmentType::BusinessOwnerCompetency)
        .await
        .unwrap();
    engine
        .continue_conversation(started.assessment_id, "some answer")
        .await
        .unwrap();
    engine.abandon(started.assessment_id).await.unwrap();

    let restarted = engine.restart(started.assessment_id).await.unwrap();

    let assessment = repository
        .find_by_id(started.assessment_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(assessment.status(), AssessmentStatus::InProgress);
    assert_eq!(assessment.message_count(), 1);
    assert_eq!(
        assessment.messages()[0].content(),
        restarted.first_question
    );
    assert!(assessment.competency_level().is_none());
}

#[tokio::test]
async fn terminal_states_reject_further_operations() {
    let provider = MockAiProvider::new().with_reply(complete_reply("Done."));
    let (engine, _repository) = build_engine(provider);

    let started = engine
        .start(AssessmentType::BusinessOwnerCompetency)
        .await
        .unwrap();
    engine
        .continue_conversation(started.assessment_id, "finish now")
        .await
        .unwrap();

    // Completed conversations accept nothing further.
    for err in [
        engine
            .continue_conversation(started.assessment_id, "more")
            .await
            .unwrap_err(),
        engine.abandon(started.assessment_id).await.unwrap_err(),
        engine.restart(started.assessment_id).await.unwrap_err(),
    ] {
        assert_eq!(err.code, ErrorCode::InvalidState);
    }
}

#[tokio::test]
async fn concurrent_turns_on_same_assessment_serialize() {
    let provider = MockAiProvider::new()
        .with_reply(continue_reply("Q2"))
        .with_reply(continue_reply("Q3"));
    let (engine, repository) = build_engine(provider);
    let engine = Arc::new(engine);

    let started = engine
        .start(AssessmentType::BusinessOwnerCompetency)
        .await
        .unwrap();
    let id = started.assessment_id;

    let a = {
        let engine = engine.clone();
        tokio::spawn(async move { engine.continue_conversation(id, "first racer").await })
    };
    let b = {
        let engine = engine.clone();
        tokio::spawn(async move { engine.continue_conversation(id, "second racer").await })
    };

    a.await.unwrap().unwrap();
    b.await.unwrap().unwrap();

    // Strict alternation survives the race: system, then (user, system) twice.
    let messages = repository.list_messages(id).await.unwrap();
    assert_eq!(messages.len(), 5);
    let senders: Vec<Sender> = messages.iter().map(|m| m.sender()).collect();
    assert_eq!(
        senders,
        vec![
            Sender::System,
            Sender::User,
            Sender::System,
            Sender::User,
            Sender::System
        ]
    );
}
