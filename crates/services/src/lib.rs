#![forbid(unsafe_code)]

pub mod app_services;
pub mod audio;
pub mod error;
pub mod question_bank;
pub mod session;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use audio::{AudioCue, AudioSink, NullAudioSink};
pub use error::{AppServicesError, SessionError};
pub use session::{
    AdvanceOutcome, FinishedQuiz, QuizAdvanceResult, QuizLoopService, QuizSession, SelectOutcome,
    SessionPhase, SessionProgress, StartedQuiz,
};
