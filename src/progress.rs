//! Progress reporting for checkout steps.
//!
//! Logging to humans is a side effect of each step, expressed as an
//! injectable observer rather than a hardwired logger so tests can
//! assert on emitted step names without capturing process output.

use async_trait::async_trait;
use tracing::info;

/// Observer for checkout progress.
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// A named step (poll, fetch, checkout, merge) is starting.
    async fn on_step(&self, name: &str);

    /// Free-form status message, e.g. the command line about to run.
    async fn on_message(&self, message: &str);
}

/// Progress sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

#[async_trait]
impl ProgressCallback for NullProgress {
    async fn on_step(&self, _name: &str) {}
    async fn on_message(&self, _message: &str) {}
}

/// Progress sink that forwards to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

#[async_trait]
impl ProgressCallback for LogProgress {
    async fn on_step(&self, name: &str) {
        info!(step = name, "starting step");
    }

    async fn on_message(&self, message: &str) {
        info!("{message}");
    }
}
