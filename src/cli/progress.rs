//! Terminal progress reporting with a spinner per step.

use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use pr_checkout::progress::ProgressCallback;
use std::sync::Mutex;
use std::time::Duration;

/// Spinner style shared by all steps.
fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Progress reporter that shows one spinner per step on stderr.
pub struct CliProgress {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliProgress {
    /// Create a reporter with no active spinner.
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    /// Finish and clear the current spinner, if any.
    pub fn finish(&self) {
        if let Ok(mut bar) = self.bar.lock()
            && let Some(bar) = bar.take()
        {
            bar.finish_and_clear();
        }
    }
}

impl Default for CliProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_step(&self, name: &str) {
        let Ok(mut slot) = self.bar.lock() else {
            return;
        };
        if let Some(previous) = slot.take() {
            previous.finish_and_clear();
        }
        let bar = ProgressBar::new_spinner();
        bar.set_style(spinner_style());
        bar.set_message(name.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        *slot = Some(bar);
    }

    async fn on_message(&self, message: &str) {
        let Ok(slot) = self.bar.lock() else {
            return;
        };
        if let Some(bar) = slot.as_ref() {
            bar.set_message(message.to_string());
        }
    }
}
