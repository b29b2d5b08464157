//! Shared test fixtures.
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

pub mod mock_api;
pub mod mock_runner;

use async_trait::async_trait;
use pr_checkout::progress::ProgressCallback;
use pr_checkout::request::PollConfig;
use pr_checkout::types::{PrState, PullRequestSnapshot};
use std::sync::Mutex;
use std::time::Duration;

/// Build a snapshot for PR `number` with the given mergeability flag.
pub fn make_snapshot(number: u64, mergeable: Option<bool>) -> PullRequestSnapshot {
    PullRequestSnapshot {
        number,
        title: format!("Test PR {number}"),
        state: PrState::Open,
        mergeable,
        merge_commit_sha: mergeable
            .unwrap_or(false)
            .then(|| format!("merge_sha_{number}")),
        head_ref: "feature".to_string(),
        base_ref: "main".to_string(),
        html_url: format!("https://github.com/test/repo/pull/{number}"),
        updated_at: None,
    }
}

/// Polling configuration fast enough for tests: 10ms x 10 attempts.
pub fn fast_poll() -> PollConfig {
    PollConfig {
        interval: Duration::from_millis(10),
        timeout: Duration::from_millis(100),
    }
}

/// Progress sink that records step names and messages for assertions.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    steps: Mutex<Vec<String>>,
    messages: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step names observed, in order.
    pub fn steps(&self) -> Vec<String> {
        self.steps.lock().unwrap().clone()
    }

    /// Free-form messages observed, in order.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProgressCallback for RecordingProgress {
    async fn on_step(&self, name: &str) {
        self.steps.lock().unwrap().push(name.to_string());
    }

    async fn on_message(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
