use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizResultError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("score ({score}) exceeds total ({total})")]
    ScoreExceedsTotal { score: u32, total: u32 },

    #[error("a finished quiz must have at least one question")]
    ZeroTotal,
}

/// Verdict shown with the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackTier {
    Outstanding,
    WellDone,
    NeedsReview,
}

impl FeedbackTier {
    /// Tier for a final percentage rounded to the nearest whole point.
    #[must_use]
    pub fn from_percentage(percentage: u8) -> Self {
        if percentage >= 80 {
            Self::Outstanding
        } else if percentage >= 60 {
            Self::WellDone
        } else {
            Self::NeedsReview
        }
    }
}

/// Outcome of a finished quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizResult {
    score: u32,
    total: u32,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl QuizResult {
    /// Build a result for a finished session.
    ///
    /// # Errors
    ///
    /// Returns `QuizResultError` if the totals or the time range are
    /// inconsistent.
    pub fn new(
        score: u32,
        total: u32,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, QuizResultError> {
        if total == 0 {
            return Err(QuizResultError::ZeroTotal);
        }
        if score > total {
            return Err(QuizResultError::ScoreExceedsTotal { score, total });
        }
        if completed_at < started_at {
            return Err(QuizResultError::InvalidTimeRange);
        }
        Ok(Self {
            score,
            total,
            started_at,
            completed_at,
        })
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Final score as a percentage, rounded to the nearest whole point.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percentage(&self) -> u8 {
        (f64::from(self.score) * 100.0 / f64::from(self.total)).round() as u8
    }

    #[must_use]
    pub fn feedback_tier(&self) -> FeedbackTier {
        FeedbackTier::from_percentage(self.percentage())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn result(score: u32, total: u32) -> QuizResult {
        QuizResult::new(score, total, fixed_now(), fixed_now()).unwrap()
    }

    #[test]
    fn percentage_rounds_to_nearest() {
        assert_eq!(result(2, 4).percentage(), 50);
        assert_eq!(result(2, 3).percentage(), 67);
        assert_eq!(result(1, 3).percentage(), 33);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(
            FeedbackTier::from_percentage(80),
            FeedbackTier::Outstanding
        );
        assert_eq!(FeedbackTier::from_percentage(79), FeedbackTier::WellDone);
        assert_eq!(FeedbackTier::from_percentage(60), FeedbackTier::WellDone);
        assert_eq!(
            FeedbackTier::from_percentage(59),
            FeedbackTier::NeedsReview
        );
    }

    #[test]
    fn two_of_four_needs_review() {
        let outcome = result(2, 4);
        assert_eq!(outcome.percentage(), 50);
        assert_eq!(outcome.feedback_tier(), FeedbackTier::NeedsReview);
    }

    #[test]
    fn score_cannot_exceed_total() {
        let err = QuizResult::new(5, 4, fixed_now(), fixed_now()).unwrap_err();
        assert!(matches!(
            err,
            QuizResultError::ScoreExceedsTotal { score: 5, total: 4 }
        ));
    }

    #[test]
    fn completion_cannot_precede_start() {
        let later = fixed_now() + chrono::Duration::seconds(30);
        let err = QuizResult::new(1, 4, later, fixed_now()).unwrap_err();
        assert!(matches!(err, QuizResultError::InvalidTimeRange));
    }
}
