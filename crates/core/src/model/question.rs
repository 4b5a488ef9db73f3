use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every question offers exactly this many answer options.
pub const OPTION_COUNT: usize = 4;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("expected {OPTION_COUNT} options, got {got}")]
    WrongOptionCount { got: usize },

    #[error("option {index} cannot be empty")]
    EmptyOption { index: usize },

    #[error("correct index {index} is out of range")]
    CorrectIndexOutOfRange { index: usize },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Unvalidated question input, as authored or deserialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub text: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

impl QuestionDraft {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
        correct_index: usize,
    ) -> Self {
        Self {
            text: text.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct_index,
        }
    }

    /// Validate the draft into an immutable `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the text or any option is empty, the option
    /// count is not `OPTION_COUNT`, or the correct index is out of range.
    pub fn validate(self) -> Result<Question, QuestionError> {
        let text = self.text.trim().to_string();
        if text.is_empty() {
            return Err(QuestionError::EmptyText);
        }

        let got = self.options.len();
        let options: [String; OPTION_COUNT] = self
            .options
            .try_into()
            .map_err(|_| QuestionError::WrongOptionCount { got })?;

        if let Some(index) = options.iter().position(|opt| opt.trim().is_empty()) {
            return Err(QuestionError::EmptyOption { index });
        }

        if self.correct_index >= OPTION_COUNT {
            return Err(QuestionError::CorrectIndexOutOfRange {
                index: self.correct_index,
            });
        }

        Ok(Question {
            text,
            options,
            correct_index: self.correct_index,
        })
    }
}

/// A single multiple-choice question.
///
/// Option order is fixed at construction and never reshuffled; only the
/// catalog as a whole is shuffled per session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    text: String,
    options: [String; OPTION_COUNT],
    correct_index: usize,
}

impl Question {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    /// Whether the given option index is the correct answer.
    #[must_use]
    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_index
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> QuestionDraft {
        QuestionDraft::new("What is 2 + 2?", ["3", "4", "5", "22"], 1)
    }

    #[test]
    fn valid_draft_builds_question() {
        let question = draft().validate().unwrap();
        assert_eq!(question.text(), "What is 2 + 2?");
        assert_eq!(question.correct_index(), 1);
        assert!(question.is_correct(1));
        assert!(!question.is_correct(0));
    }

    #[test]
    fn empty_text_is_rejected() {
        let mut d = draft();
        d.text = "   ".into();
        assert!(matches!(d.validate(), Err(QuestionError::EmptyText)));
    }

    #[test]
    fn wrong_option_count_is_rejected() {
        let d = QuestionDraft::new("Q", ["a", "b", "c"], 0);
        assert!(matches!(
            d.validate(),
            Err(QuestionError::WrongOptionCount { got: 3 })
        ));
    }

    #[test]
    fn empty_option_is_rejected() {
        let d = QuestionDraft::new("Q", ["a", "", "c", "d"], 0);
        assert!(matches!(
            d.validate(),
            Err(QuestionError::EmptyOption { index: 1 })
        ));
    }

    #[test]
    fn out_of_range_correct_index_is_rejected() {
        let mut d = draft();
        d.correct_index = 4;
        assert!(matches!(
            d.validate(),
            Err(QuestionError::CorrectIndexOutOfRange { index: 4 })
        ));
    }
}
