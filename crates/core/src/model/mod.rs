mod catalog;
mod outcome;
mod question;
mod settings;

pub use catalog::{Catalog, CatalogError};
pub use outcome::{FeedbackTier, QuizResult, QuizResultError};
pub use question::{OPTION_COUNT, Question, QuestionDraft, QuestionError};
pub use settings::{DEFAULT_QUESTION_TIME_SECS, QuizSettings, QuizSettingsError};
