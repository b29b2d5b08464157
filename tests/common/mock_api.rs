//! Mock pull request API for testing.
//!
//! Manually implements `PullRequestApi` with scripted responses, call
//! tracking, and error injection, so polling behavior can be verified
//! attempt by attempt.

use async_trait::async_trait;
use pr_checkout::api::PullRequestApi;
use pr_checkout::error::{Error, Result};
use pr_checkout::types::PullRequestSnapshot;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Scripted in-memory pull request API.
///
/// Responses are popped in order; once the queue is empty the fallback
/// (if any) is returned for every further call. Without a fallback an
/// unscripted call is an error, which keeps tests honest about how many
/// attempts they expect.
#[derive(Debug, Default)]
pub struct MockPullRequestApi {
    responses: Mutex<VecDeque<PullRequestSnapshot>>,
    fallback: Mutex<Option<PullRequestSnapshot>>,
    error_on_get: Mutex<Option<String>>,
    // Call tracking
    get_calls: Mutex<Vec<u64>>,
}

impl MockPullRequestApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one response, returned for the next unanswered call.
    pub fn push_response(&self, snapshot: PullRequestSnapshot) {
        self.responses.lock().unwrap().push_back(snapshot);
    }

    /// Response returned once the queue is drained.
    pub fn set_fallback(&self, snapshot: PullRequestSnapshot) {
        *self.fallback.lock().unwrap() = Some(snapshot);
    }

    /// Make every `get_pull_request` call fail.
    pub fn fail_get(&self, msg: &str) {
        *self.error_on_get.lock().unwrap() = Some(msg.to_string());
    }

    /// PR numbers `get_pull_request` was called with, in order.
    pub fn get_calls(&self) -> Vec<u64> {
        self.get_calls.lock().unwrap().clone()
    }

    /// Number of `get_pull_request` calls issued.
    pub fn call_count(&self) -> usize {
        self.get_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl PullRequestApi for MockPullRequestApi {
    async fn get_pull_request(&self, number: u64) -> Result<PullRequestSnapshot> {
        self.get_calls.lock().unwrap().push(number);

        // Check for injected error
        if let Some(msg) = self.error_on_get.lock().unwrap().as_ref() {
            return Err(Error::Api(msg.clone()));
        }

        if let Some(snapshot) = self.responses.lock().unwrap().pop_front() {
            return Ok(snapshot);
        }
        self.fallback.lock().unwrap().clone().ok_or_else(|| {
            Error::Api(format!(
                "get_pull_request: no response configured for PR #{number}"
            ))
        })
    }
}
