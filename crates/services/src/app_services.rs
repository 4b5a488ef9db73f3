use std::sync::Arc;

use storage::repository::Storage;

use quiz_core::Clock;
use quiz_core::model::{Catalog, QuizSettings};

use crate::audio::AudioSink;
use crate::error::AppServicesError;
use crate::session::QuizLoopService;

/// Assembles app-facing services over a storage backend.
#[derive(Clone)]
pub struct AppServices {
    quiz_loop: Arc<QuizLoopService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        catalog: Catalog,
        settings: QuizSettings,
        audio: Arc<dyn AudioSink>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let quiz_loop = Arc::new(QuizLoopService::new(
            clock,
            Arc::clone(&storage.best_scores),
            audio,
            catalog,
            settings,
        ));
        Ok(Self { quiz_loop })
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}
