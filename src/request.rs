//! Checkout requests and their validation.
//!
//! Requests are plain data, immutable once validated. Collaborators
//! (API client, command runner, output sinks, progress) are injected
//! separately so the same request can be replayed against fakes in tests.

use crate::error::{Error, Result};
use std::time::Duration;

/// Default interval between mergeability polls.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Default total polling budget.
const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(50);

/// Fixed-interval polling configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Sleep between attempts.
    pub interval: Duration,
    /// Total budget; polling stops once `interval` no longer fits.
    pub timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_POLL_TIMEOUT,
        }
    }
}

impl PollConfig {
    /// Number of attempts the budget allows: `floor(timeout / interval)`.
    ///
    /// Zero when the interval doesn't fit into the timeout at all, in
    /// which case the poller reports a timeout without issuing a single
    /// API call.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        if self.interval.is_zero() {
            return 0;
        }
        u32::try_from(self.timeout.as_millis() / self.interval.as_millis()).unwrap_or(u32::MAX)
    }
}

/// Request to check out the synthetic merge ref of a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrCheckoutRequest {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// PR number, must be positive
    pub number: u64,
    /// Pre-declared known-mergeable: skips polling entirely.
    pub mergeable: bool,
    /// Polling configuration used when `mergeable` is false.
    pub poll: PollConfig,
}

impl PrCheckoutRequest {
    /// Create a request with default polling configuration.
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, number: u64) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            number,
            mergeable: false,
            poll: PollConfig::default(),
        }
    }

    /// Declare the PR already known mergeable, skipping the polling phase.
    #[must_use]
    pub fn known_mergeable(mut self) -> Self {
        self.mergeable = true;
        self
    }

    /// Override the polling configuration.
    #[must_use]
    pub fn with_poll(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    /// Check the request before any network or subprocess call is made.
    pub fn validate(&self) -> Result<()> {
        if self.owner.is_empty() {
            return Err(Error::Validation("owner is empty".to_string()));
        }
        if self.repo.is_empty() {
            return Err(Error::Validation("repo is empty".to_string()));
        }
        if self.number == 0 {
            return Err(Error::Validation("PR number must be positive".to_string()));
        }
        if self.poll.interval.is_zero() {
            return Err(Error::Validation("polling interval is zero".to_string()));
        }
        Ok(())
    }
}

/// Request to fetch and check out a base ref, then merge a head ref into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefCheckoutRequest {
    /// Ref to fetch and check out. Required.
    pub base_ref: String,
    /// Ref to merge into the base. When absent the merge step is skipped.
    pub head_ref: Option<String>,
}

impl RefCheckoutRequest {
    /// Create a request for the given base ref.
    pub fn new(base_ref: impl Into<String>) -> Self {
        Self {
            base_ref: base_ref.into(),
            head_ref: None,
        }
    }

    /// Set the head ref to merge after checking out the base.
    #[must_use]
    pub fn merging(mut self, head_ref: impl Into<String>) -> Self {
        self.head_ref = Some(head_ref.into());
        self
    }

    /// Check the request before any subprocess call is made.
    pub fn validate(&self) -> Result<()> {
        if self.base_ref.is_empty() {
            return Err(Error::Validation("base ref is empty".to_string()));
        }
        if let Some(head) = &self.head_ref
            && head.is_empty()
        {
            return Err(Error::Validation("head ref is empty".to_string()));
        }
        Ok(())
    }
}
