use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default per-question countdown budget, in seconds.
pub const DEFAULT_QUESTION_TIME_SECS: u32 = 30;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizSettingsError {
    #[error("question time must be > 0 seconds")]
    InvalidQuestionTime,
}

/// Configuration for a quiz run.
///
/// The original hardcodes the 30-second budget; keeping it here makes the
/// budget a configuration surface without changing the default behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSettings {
    question_time_secs: u32,
}

impl QuizSettings {
    /// Creates settings with a custom per-question budget.
    ///
    /// # Errors
    ///
    /// Returns `QuizSettingsError::InvalidQuestionTime` for a zero budget.
    pub fn new(question_time_secs: u32) -> Result<Self, QuizSettingsError> {
        if question_time_secs == 0 {
            return Err(QuizSettingsError::InvalidQuestionTime);
        }
        Ok(Self { question_time_secs })
    }

    #[must_use]
    pub fn question_time_secs(&self) -> u32 {
        self.question_time_secs
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            question_time_secs: DEFAULT_QUESTION_TIME_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_budget_is_thirty_seconds() {
        assert_eq!(QuizSettings::default().question_time_secs(), 30);
    }

    #[test]
    fn zero_budget_is_rejected() {
        assert!(matches!(
            QuizSettings::new(0),
            Err(QuizSettingsError::InvalidQuestionTime)
        ));
    }

    #[test]
    fn custom_budget_round_trips() {
        assert_eq!(QuizSettings::new(10).unwrap().question_time_secs(), 10);
    }
}
