use quiz_core::countdown::{Countdown, TickOutcome};
use services::{
    FinishedQuiz, QuizAdvanceResult, QuizLoopService, QuizSession, SelectOutcome, SessionPhase,
    StartedQuiz,
};

use crate::views::ViewError;
use super::timer_fmt::{fill_percent, progress_percent};

/// User-driven and timer-driven events the quiz view can dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    SelectAnswer(usize),
    Next,
    Tick,
    Restart,
}

/// Feedback state of one option button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionMark {
    Neutral,
    Correct,
    Incorrect,
}

/// Render-ready data for one option button.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionView {
    pub index: usize,
    pub label: String,
    pub mark: OptionMark,
}

/// Render-ready countdown data; present only while an answer is awaited.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimerView {
    pub remaining_secs: u32,
    pub color: String,
    pub fill: String,
}

/// View model for a quiz run.
///
/// Owns the session and the countdown for the active question so the view
/// stays declarative; every transition funnels through here.
pub struct QuizVm {
    session: QuizSession,
    countdown: Countdown,
    finished: Option<FinishedQuiz>,
    best_at_start: Option<u32>,
}

impl QuizVm {
    #[must_use]
    pub fn new(started: StartedQuiz) -> Self {
        let budget = started.session.settings().question_time_secs();
        Self {
            session: started.session,
            countdown: Countdown::new(budget),
            finished: None,
            best_at_start: started.best_score,
        }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    #[must_use]
    pub fn is_awaiting_answer(&self) -> bool {
        self.session.phase() == SessionPhase::AwaitingAnswer
    }

    /// Key identifying the active question for ticker rebinding.
    #[must_use]
    pub fn question_key(&self) -> usize {
        self.session.current_index()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.session.score()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.session.total()
    }

    #[must_use]
    pub fn best_at_start(&self) -> Option<u32> {
        self.best_at_start
    }

    #[must_use]
    pub fn question_text(&self) -> Option<&str> {
        self.session.current_question().map(|q| q.text())
    }

    #[must_use]
    pub fn finished(&self) -> Option<&FinishedQuiz> {
        self.finished.as_ref()
    }

    /// Feedback mark for an option; everything is neutral until the reveal.
    #[must_use]
    pub fn option_mark(&self, index: usize) -> OptionMark {
        if self.session.phase() != SessionPhase::AnswerRevealed {
            return OptionMark::Neutral;
        }
        let Some(question) = self.session.current_question() else {
            return OptionMark::Neutral;
        };
        if question.is_correct(index) {
            OptionMark::Correct
        } else if self.session.selected_answer() == Some(index) {
            OptionMark::Incorrect
        } else {
            OptionMark::Neutral
        }
    }

    #[must_use]
    pub fn options_view(&self) -> Vec<OptionView> {
        let Some(question) = self.session.current_question() else {
            return Vec::new();
        };
        question
            .options()
            .iter()
            .enumerate()
            .map(|(index, label)| OptionView {
                index,
                label: label.clone(),
                mark: self.option_mark(index),
            })
            .collect()
    }

    #[must_use]
    pub fn progress_label(&self) -> String {
        let shown = (self.session.current_index() + 1).min(self.session.total());
        format!("Question {shown} / {}", self.session.total())
    }

    #[must_use]
    pub fn progress_fill(&self) -> String {
        progress_percent(self.session.current_index(), self.session.total())
    }

    #[must_use]
    pub fn timer_view(&self) -> Option<TimerView> {
        if !self.is_awaiting_answer() {
            return None;
        }
        let budget = self.countdown.budget_secs().max(1);
        Some(TimerView {
            remaining_secs: self.countdown.remaining_secs(),
            color: self.countdown.color().to_string(),
            fill: fill_percent(
                f64::from(self.countdown.remaining_secs()) / f64::from(budget),
            ),
        })
    }

    /// Record an answer for the active question.
    pub fn select_answer(&mut self, quiz_loop: &QuizLoopService, index: usize) -> SelectOutcome {
        quiz_loop.select_answer(&mut self.session, index)
    }

    /// Consume one countdown second.
    ///
    /// Returns true exactly once per question: on the tick that exhausts the
    /// budget while the answer is still awaited. The caller then dispatches
    /// the timeout advance.
    pub fn tick(&mut self) -> bool {
        if !self.is_awaiting_answer() || self.countdown.is_expired() {
            return false;
        }
        matches!(self.countdown.tick(), TickOutcome::Expired)
    }

    /// Advance past the current question, resetting the countdown for the
    /// next one or capturing the final outcome.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Unknown` for service failures.
    pub async fn advance(
        &mut self,
        quiz_loop: &QuizLoopService,
    ) -> Result<QuizAdvanceResult, ViewError> {
        let result = quiz_loop
            .advance(&mut self.session)
            .await
            .map_err(|_| ViewError::Unknown)?;

        match &result {
            QuizAdvanceResult::NextQuestion => {
                self.countdown = Countdown::new(self.session.settings().question_time_secs());
            }
            QuizAdvanceResult::Finished(finished) => {
                self.finished = Some(*finished);
            }
            QuizAdvanceResult::Ignored => {}
        }
        Ok(result)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use quiz_core::model::{Catalog, QuestionDraft, QuizSettings};
    use quiz_core::time::fixed_clock;
    use services::{AudioSink, NullAudioSink};
    use storage::repository::{BestScoreRepository, InMemoryRepository};

    fn build_loop(question_time_secs: u32) -> QuizLoopService {
        let questions = (0..2)
            .map(|i| {
                QuestionDraft::new(format!("Q{i}"), ["a", "b", "c", "d"], 0)
                    .validate()
                    .unwrap()
            })
            .collect();
        QuizLoopService::new(
            fixed_clock(),
            Arc::new(InMemoryRepository::new()) as Arc<dyn BestScoreRepository>,
            Arc::new(NullAudioSink) as Arc<dyn AudioSink>,
            Catalog::new(questions).unwrap(),
            QuizSettings::new(question_time_secs).unwrap(),
        )
    }

    async fn build_vm(question_time_secs: u32) -> (QuizLoopService, QuizVm) {
        let quiz_loop = build_loop(question_time_secs);
        let vm = QuizVm::new(quiz_loop.start_session().await);
        (quiz_loop, vm)
    }

    #[tokio::test]
    async fn timer_counts_down_while_awaiting() {
        let (_loop, mut vm) = build_vm(3).await;
        assert_eq!(vm.timer_view().unwrap().remaining_secs, 3);

        assert!(!vm.tick());
        assert_eq!(vm.timer_view().unwrap().remaining_secs, 2);
    }

    #[tokio::test]
    async fn expiry_fires_exactly_once() {
        let (_loop, mut vm) = build_vm(2).await;
        assert!(!vm.tick());
        assert!(vm.tick());
        // A stray tick before the timeout advance lands must not re-fire.
        assert!(!vm.tick());
    }

    #[tokio::test]
    async fn ticks_are_ignored_after_an_answer() {
        let (quiz_loop, mut vm) = build_vm(2).await;
        vm.select_answer(&quiz_loop, 0);
        assert!(!vm.tick());
        assert!(vm.timer_view().is_none());
    }

    #[tokio::test]
    async fn advance_resets_the_countdown_for_the_next_question() {
        let (quiz_loop, mut vm) = build_vm(3).await;
        vm.tick();
        vm.select_answer(&quiz_loop, 0);

        let result = vm.advance(&quiz_loop).await.unwrap();
        assert_eq!(result, QuizAdvanceResult::NextQuestion);
        assert_eq!(vm.timer_view().unwrap().remaining_secs, 3);
        assert_eq!(vm.question_key(), 1);
    }

    #[tokio::test]
    async fn finishing_captures_the_outcome() {
        let (quiz_loop, mut vm) = build_vm(2).await;
        vm.select_answer(&quiz_loop, 0);
        vm.advance(&quiz_loop).await.unwrap();
        vm.select_answer(&quiz_loop, 0);
        vm.advance(&quiz_loop).await.unwrap();

        let finished = vm.finished().expect("finished outcome");
        assert_eq!(finished.result.score(), 2);
        assert!(finished.new_best);
        assert_eq!(vm.phase(), SessionPhase::Finished);
        assert!(vm.timer_view().is_none());
    }

    #[tokio::test]
    async fn marks_reveal_correct_and_incorrect() {
        let (quiz_loop, mut vm) = build_vm(2).await;
        assert_eq!(vm.option_mark(0), OptionMark::Neutral);

        vm.select_answer(&quiz_loop, 2);
        assert_eq!(vm.option_mark(0), OptionMark::Correct);
        assert_eq!(vm.option_mark(2), OptionMark::Incorrect);
        assert_eq!(vm.option_mark(1), OptionMark::Neutral);
    }
}
