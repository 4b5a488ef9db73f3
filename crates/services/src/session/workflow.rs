use std::sync::Arc;

use storage::repository::BestScoreRepository;

use quiz_core::Clock;
use quiz_core::model::{Catalog, QuizSettings};

use crate::audio::{AudioCue, AudioSink};
use crate::error::SessionError;
use super::service::{AdvanceOutcome, QuizSession, SelectOutcome};

//
// ─── RESULTS ───────────────────────────────────────────────────────────────────
//

/// A freshly started session plus the stored best score for display.
#[derive(Debug, Clone)]
pub struct StartedQuiz {
    pub session: QuizSession,
    pub best_score: Option<u32>,
}

/// Outcome of a finished run, with the best-score bookkeeping applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinishedQuiz {
    pub result: quiz_core::model::QuizResult,
    /// Best score on record after this session.
    pub best_score: u32,
    /// True when this session beat the previously stored value.
    pub new_best: bool,
}

/// Result of advancing past the current question through the loop service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuizAdvanceResult {
    NextQuestion,
    Finished(FinishedQuiz),
    Ignored,
}

//
// ─── QUIZ LOOP ─────────────────────────────────────────────────────────────────
//

/// Orchestrates session start, answering, and best-score persistence.
///
/// Audio cues and the best-score write are fire-and-forget collaborators:
/// their failures are logged and never interrupt a transition.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    best_scores: Arc<dyn BestScoreRepository>,
    audio: Arc<dyn AudioSink>,
    catalog: Catalog,
    settings: QuizSettings,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        best_scores: Arc<dyn BestScoreRepository>,
        audio: Arc<dyn AudioSink>,
        catalog: Catalog,
        settings: QuizSettings,
    ) -> Self {
        Self {
            clock,
            best_scores,
            audio,
            catalog,
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> QuizSettings {
        self.settings
    }

    /// The stored best score, or `None` on a fresh store.
    ///
    /// A failing read degrades to `None` so the UI can still render.
    pub async fn best_score(&self) -> Option<u32> {
        match self.best_scores.best_score().await {
            Ok(best) => best,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read best score");
                None
            }
        }
    }

    /// Start a new session over a reshuffled catalog.
    pub async fn start_session(&self) -> StartedQuiz {
        let session = QuizSession::start(&self.catalog, self.settings, self.clock.now());
        let best_score = self.best_score().await;
        StartedQuiz {
            session,
            best_score,
        }
    }

    /// Restart after a finished run; reshuffles and plays the restart cue.
    pub async fn restart_session(&self) -> StartedQuiz {
        self.audio.play(AudioCue::Next);
        self.start_session().await
    }

    /// Record the first answer for the active question, with audio feedback.
    pub fn select_answer(&self, session: &mut QuizSession, index: usize) -> SelectOutcome {
        let outcome = session.select_answer(index);
        if let SelectOutcome::Revealed { correct, .. } = outcome {
            self.audio.play(AudioCue::Flip);
            self.audio.play(if correct {
                AudioCue::Correct
            } else {
                AudioCue::Incorrect
            });
        }
        outcome
    }

    /// Advance past the current question, finishing the session at the end of
    /// the catalog and updating the stored best score when beaten.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the final result cannot be assembled.
    pub async fn advance(
        &self,
        session: &mut QuizSession,
    ) -> Result<QuizAdvanceResult, SessionError> {
        let outcome = session.advance(self.clock.now())?;
        match outcome {
            AdvanceOutcome::Ignored => Ok(QuizAdvanceResult::Ignored),
            AdvanceOutcome::NextQuestion => {
                self.audio.play(AudioCue::Next);
                Ok(QuizAdvanceResult::NextQuestion)
            }
            AdvanceOutcome::Finished(result) => {
                self.audio.play(AudioCue::Next);
                self.audio.play(AudioCue::End);
                let finished = self.apply_best_score(result).await;
                Ok(QuizAdvanceResult::Finished(finished))
            }
        }
    }

    async fn apply_best_score(&self, result: quiz_core::model::QuizResult) -> FinishedQuiz {
        let stored = self.best_score().await;
        let new_best = result.score() > stored.unwrap_or(0);
        if new_best {
            if let Err(err) = self.best_scores.record_best_score(result.score()).await {
                tracing::warn!(error = %err, "failed to persist best score");
            }
        }
        FinishedQuiz {
            result,
            best_score: stored.unwrap_or(0).max(result.score()),
            new_best,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use storage::repository::InMemoryRepository;

    use quiz_core::model::QuestionDraft;
    use quiz_core::time::fixed_clock;

    #[derive(Default)]
    struct RecordingSink {
        cues: Mutex<Vec<AudioCue>>,
    }

    impl RecordingSink {
        fn cues(&self) -> Vec<AudioCue> {
            self.cues.lock().unwrap().clone()
        }
    }

    impl AudioSink for RecordingSink {
        fn play(&self, cue: AudioCue) {
            self.cues.lock().unwrap().push(cue);
        }
    }

    fn build_catalog(count: usize) -> Catalog {
        let questions = (0..count)
            .map(|i| {
                QuestionDraft::new(format!("Q{i}"), ["a", "b", "c", "d"], 0)
                    .validate()
                    .unwrap()
            })
            .collect();
        Catalog::new(questions).unwrap()
    }

    fn build_loop(count: usize) -> (QuizLoopService, Arc<InMemoryRepository>, Arc<RecordingSink>) {
        let repo = Arc::new(InMemoryRepository::new());
        let sink = Arc::new(RecordingSink::default());
        let service = QuizLoopService::new(
            fixed_clock(),
            Arc::clone(&repo) as Arc<dyn BestScoreRepository>,
            Arc::clone(&sink) as Arc<dyn AudioSink>,
            build_catalog(count),
            QuizSettings::default(),
        );
        (service, repo, sink)
    }

    #[tokio::test]
    async fn fresh_store_persists_first_positive_score() {
        let (service, repo, _sink) = build_loop(4);
        let mut session = service.start_session().await.session;

        // 3 of 4 correct.
        for expected_correct in [true, true, true, false] {
            service.select_answer(&mut session, if expected_correct { 0 } else { 2 });
            service.advance(&mut session).await.unwrap();
        }

        assert_eq!(repo.best_score().await.unwrap(), Some(3));
    }

    #[tokio::test]
    async fn lower_score_leaves_stored_best_untouched() {
        let (service, repo, _sink) = build_loop(2);
        repo.record_best_score(2).await.unwrap();

        let mut session = service.start_session().await.session;
        service.select_answer(&mut session, 0);
        service.advance(&mut session).await.unwrap();
        let outcome = service.advance(&mut session).await.unwrap();

        let QuizAdvanceResult::Finished(finished) = outcome else {
            panic!("expected finish, got {outcome:?}");
        };
        assert_eq!(finished.result.score(), 1);
        assert!(!finished.new_best);
        assert_eq!(finished.best_score, 2);
        assert_eq!(repo.best_score().await.unwrap(), Some(2));
    }

    #[tokio::test]
    async fn equal_score_is_not_a_new_best() {
        let (service, repo, _sink) = build_loop(1);
        repo.record_best_score(1).await.unwrap();

        let mut session = service.start_session().await.session;
        service.select_answer(&mut session, 0);
        let outcome = service.advance(&mut session).await.unwrap();

        let QuizAdvanceResult::Finished(finished) = outcome else {
            panic!("expected finish, got {outcome:?}");
        };
        assert!(!finished.new_best);
        assert_eq!(repo.best_score().await.unwrap(), Some(1));
    }

    #[tokio::test]
    async fn zero_score_on_fresh_store_writes_nothing() {
        let (service, repo, _sink) = build_loop(1);
        let mut session = service.start_session().await.session;

        // Timeout without an answer.
        service.advance(&mut session).await.unwrap();

        assert_eq!(repo.best_score().await.unwrap(), None);
    }

    #[tokio::test]
    async fn cue_sequence_for_an_answered_question() {
        let (service, _repo, sink) = build_loop(2);
        let mut session = service.start_session().await.session;

        service.select_answer(&mut session, 0);
        service.advance(&mut session).await.unwrap();
        assert_eq!(
            sink.cues(),
            vec![AudioCue::Flip, AudioCue::Correct, AudioCue::Next]
        );

        service.select_answer(&mut session, 1);
        service.advance(&mut session).await.unwrap();
        assert_eq!(
            &sink.cues()[3..],
            &[AudioCue::Flip, AudioCue::Incorrect, AudioCue::Next, AudioCue::End]
        );
    }

    #[tokio::test]
    async fn repeated_selection_plays_no_extra_cues() {
        let (service, _repo, sink) = build_loop(1);
        let mut session = service.start_session().await.session;

        service.select_answer(&mut session, 0);
        let before = sink.cues().len();
        assert_eq!(
            service.select_answer(&mut session, 1),
            SelectOutcome::Ignored
        );
        assert_eq!(sink.cues().len(), before);
    }

    #[tokio::test]
    async fn start_session_reports_stored_best() {
        let (service, repo, _sink) = build_loop(1);
        repo.record_best_score(5).await.unwrap();

        let started = service.start_session().await;
        assert_eq!(started.best_score, Some(5));
        assert_eq!(started.session.total(), 1);
    }
}
