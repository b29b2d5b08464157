//! Hosting-API access for pull requests.
//!
//! One operation is needed: fetch a pull request by number and report its
//! mergeability. The trait keeps the poller independent of any concrete
//! hosting service; callers inject a fully configured client.

mod github;

pub use github::GitHubApi;

use crate::error::Result;
use crate::types::PullRequestSnapshot;
use async_trait::async_trait;

/// Read-only pull request lookup on a hosting service.
///
/// Implementations are configured with their owner/repo up front; the
/// poller only supplies the PR number.
#[async_trait]
pub trait PullRequestApi: Send + Sync {
    /// Fetch the current state of a pull request.
    async fn get_pull_request(&self, number: u64) -> Result<PullRequestSnapshot>;
}
