use chrono::{DateTime, Utc};
use rand::rng;
use rand::seq::SliceRandom;

use quiz_core::model::{Catalog, OPTION_COUNT, Question, QuizResult, QuizSettings};

use crate::error::SessionError;
use super::progress::SessionProgress;

//
// ─── PHASES & OUTCOMES ─────────────────────────────────────────────────────────
//

/// Where the session is within the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// The active question is showing, no answer chosen yet.
    AwaitingAnswer,
    /// An answer was chosen; feedback is showing and advance is permitted.
    AnswerRevealed,
    /// The catalog is exhausted.
    Finished,
}

/// What a `select_answer` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// First answer for the active question; feedback should be shown.
    Revealed {
        selected: usize,
        correct_index: usize,
        correct: bool,
    },
    /// Repeated, out-of-range, or mistimed selection. State is unchanged:
    /// the first answer wins and later clicks are benign no-ops.
    Ignored,
}

/// What an `advance` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// A new question is active and awaiting an answer.
    NextQuestion,
    /// The session just ended with this result.
    Finished(QuizResult),
    /// The session was already finished; nothing happened.
    Ignored,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One run through the question catalog.
///
/// The catalog is shuffled once at start with a uniform Fisher–Yates shuffle
/// and then consumed strictly in order. Restarting means building a fresh
/// session, which reshuffles.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    settings: QuizSettings,
    current: usize,
    score: u32,
    selected_answer: Option<usize>,
    phase: SessionPhase,
    started_at: DateTime<Utc>,
}

impl QuizSession {
    /// Start a session over a shuffled copy of the catalog.
    ///
    /// `started_at` should come from the services layer clock to keep time
    /// deterministic.
    #[must_use]
    pub fn start(catalog: &Catalog, settings: QuizSettings, started_at: DateTime<Utc>) -> Self {
        let mut questions = catalog.questions().to_vec();
        questions.shuffle(&mut rng());

        Self {
            questions,
            settings,
            current: 0,
            score: 0,
            selected_answer: None,
            phase: SessionPhase::AwaitingAnswer,
            started_at,
        }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn settings(&self) -> QuizSettings {
        self.settings
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Zero-based index of the active question; equals `total()` once finished.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn selected_answer(&self) -> Option<usize> {
        self.selected_answer
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == SessionPhase::Finished
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            current: self.current,
            total: self.total(),
            score: self.score,
            is_finished: self.is_finished(),
        }
    }

    /// Record the first answer for the active question and reveal feedback.
    ///
    /// Only acts in `AwaitingAnswer` with an in-range index; anything else is
    /// an ignored no-op, which encodes "first answer wins".
    pub fn select_answer(&mut self, index: usize) -> SelectOutcome {
        if self.phase != SessionPhase::AwaitingAnswer || index >= OPTION_COUNT {
            return SelectOutcome::Ignored;
        }
        let Some(question) = self.questions.get(self.current) else {
            return SelectOutcome::Ignored;
        };

        self.selected_answer = Some(index);
        self.phase = SessionPhase::AnswerRevealed;

        SelectOutcome::Revealed {
            selected: index,
            correct_index: question.correct_index(),
            correct: question.is_correct(index),
        }
    }

    /// Score the current question and move to the next one.
    ///
    /// Valid from `AnswerRevealed` (explicit next) and from `AwaitingAnswer`
    /// (countdown expiry; the unanswered question counts as incorrect). From
    /// `Finished` it is an ignored no-op.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the final result cannot be assembled, which
    /// would indicate a clock running backwards.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<AdvanceOutcome, SessionError> {
        if self.phase == SessionPhase::Finished {
            return Ok(AdvanceOutcome::Ignored);
        }

        let answered_correctly = self
            .current_question()
            .zip(self.selected_answer)
            .is_some_and(|(question, selected)| question.is_correct(selected));
        if answered_correctly {
            self.score += 1;
        }

        self.current += 1;
        if self.current == self.questions.len() {
            self.phase = SessionPhase::Finished;
            let total = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
            let result = QuizResult::new(self.score, total, self.started_at, now)?;
            return Ok(AdvanceOutcome::Finished(result));
        }

        self.selected_answer = None;
        self.phase = SessionPhase::AwaitingAnswer;
        Ok(AdvanceOutcome::NextQuestion)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
