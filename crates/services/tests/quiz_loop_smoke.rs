use std::sync::Arc;

use quiz_core::model::{FeedbackTier, QuizSettings};
use quiz_core::time::fixed_clock;
use services::question_bank;
use services::{AudioSink, NullAudioSink, QuizAdvanceResult, QuizLoopService, SessionPhase};
use storage::repository::{BestScoreRepository, InMemoryRepository};

fn build_loop(repo: &Arc<InMemoryRepository>) -> QuizLoopService {
    QuizLoopService::new(
        fixed_clock(),
        Arc::clone(repo) as Arc<dyn BestScoreRepository>,
        Arc::new(NullAudioSink) as Arc<dyn AudioSink>,
        question_bank::default_catalog().unwrap(),
        QuizSettings::default(),
    )
}

#[tokio::test]
async fn full_run_over_the_built_in_bank_persists_the_best() {
    let repo = Arc::new(InMemoryRepository::new());
    let loop_svc = build_loop(&repo);

    let started = loop_svc.start_session().await;
    assert_eq!(started.best_score, None);

    let mut session = started.session;
    assert_eq!(session.total(), 10);

    // Answer every question with its correct index.
    let mut finished = None;
    while !session.is_finished() {
        let correct = session
            .current_question()
            .expect("active question while unfinished")
            .correct_index();
        loop_svc.select_answer(&mut session, correct);
        match loop_svc.advance(&mut session).await.unwrap() {
            QuizAdvanceResult::Finished(outcome) => finished = Some(outcome),
            QuizAdvanceResult::NextQuestion => {}
            QuizAdvanceResult::Ignored => panic!("advance ignored mid-run"),
        }
    }

    let finished = finished.expect("session finished");
    assert_eq!(finished.result.score(), 10);
    assert_eq!(finished.result.percentage(), 100);
    assert_eq!(finished.result.feedback_tier(), FeedbackTier::Outstanding);
    assert!(finished.new_best);
    assert_eq!(finished.best_score, 10);
    assert_eq!(repo.best_score().await.unwrap(), Some(10));
}

#[tokio::test]
async fn restart_reshuffles_into_a_fresh_awaiting_session() {
    let repo = Arc::new(InMemoryRepository::new());
    let loop_svc = build_loop(&repo);

    let mut session = loop_svc.start_session().await.session;
    loop_svc.select_answer(&mut session, 0);
    loop_svc.advance(&mut session).await.unwrap();

    let restarted = loop_svc.restart_session().await.session;
    assert_eq!(restarted.score(), 0);
    assert_eq!(restarted.current_index(), 0);
    assert_eq!(restarted.phase(), SessionPhase::AwaitingAnswer);
    assert_eq!(restarted.total(), 10);
}

#[tokio::test]
async fn timeout_only_run_scores_zero_and_stores_nothing() {
    let repo = Arc::new(InMemoryRepository::new());
    let loop_svc = build_loop(&repo);

    let mut session = loop_svc.start_session().await.session;
    let mut last = QuizAdvanceResult::Ignored;
    while !session.is_finished() {
        last = loop_svc.advance(&mut session).await.unwrap();
    }

    let QuizAdvanceResult::Finished(finished) = last else {
        panic!("expected finish, got {last:?}");
    };
    assert_eq!(finished.result.score(), 0);
    assert_eq!(finished.result.feedback_tier(), FeedbackTier::NeedsReview);
    assert!(!finished.new_best);
    assert_eq!(repo.best_score().await.unwrap(), None);
}
