use std::time::Duration;

use dioxus::prelude::*;

/// Once-per-second tick source for the active question.
///
/// At most one ticker runs at a time: `start` cancels any previous task
/// before spawning the next, and `cancel` is idempotent.
#[derive(Default)]
pub struct Ticker {
    task: Option<Task>,
}

impl Ticker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin ticking, invoking `on_tick` once per second until cancelled.
    pub fn start(&mut self, on_tick: Callback<()>) {
        self.cancel();
        self.task = Some(spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_secs(1)).await;
                on_tick.call(());
            }
        }));
    }

    /// Stop ticking. Safe to call when already stopped.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.cancel();
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }
}
