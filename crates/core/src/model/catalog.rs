use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Question;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog must contain at least one question")]
    Empty,
}

/// The fixed, ordered set of questions for a session.
///
/// Non-empty by construction, so session start cannot fail on a missing
/// question. The catalog order is the authored order; shuffling happens once
/// per session in the services layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    questions: Vec<Question>,
}

impl Catalog {
    /// Build a catalog from validated questions.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Empty` when no questions are provided.
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        if questions.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { questions })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        // Always false by construction; kept for the len/is_empty pair.
        self.questions.is_empty()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn into_questions(self) -> Vec<Question> {
        self.questions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionDraft;

    #[test]
    fn empty_catalog_is_a_configuration_error() {
        assert!(matches!(Catalog::new(Vec::new()), Err(CatalogError::Empty)));
    }

    #[test]
    fn catalog_preserves_question_order() {
        let questions: Vec<Question> = (0..3)
            .map(|i| {
                QuestionDraft::new(format!("Q{i}"), ["a", "b", "c", "d"], 0)
                    .validate()
                    .unwrap()
            })
            .collect();
        let catalog = Catalog::new(questions.clone()).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.questions(), questions.as_slice());
    }
}
