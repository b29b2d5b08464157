//! Mergeability polling.
//!
//! GitHub computes a PR's mergeability lazily after each push; until it
//! finishes, the API reports the flag as unknown. The poller re-queries at a
//! fixed interval inside a bounded attempt budget. API errors are fatal on
//! the spot; only the "still computing" answer is retried.

use crate::api::PullRequestApi;
use crate::cancel::CancelToken;
use crate::error::{Error, Result};
use crate::progress::ProgressCallback;
use crate::request::PollConfig;
use crate::types::{Mergeability, PullRequestSnapshot};
use tracing::debug;

/// Poll until the pull request's mergeability resolves.
///
/// Issues at most `config.max_attempts()` queries, sleeping
/// `config.interval` between them. Terminates early on:
/// - `Mergeable` — returns the snapshot,
/// - `NotMergeable` — terminal error, remaining budget is irrelevant,
/// - any API error,
/// - cancellation during the inter-attempt sleep.
///
/// A budget of zero attempts (interval >= timeout) reports a timeout
/// without touching the API.
pub async fn poll_mergeable(
    api: &dyn PullRequestApi,
    number: u64,
    config: &PollConfig,
    progress: &dyn ProgressCallback,
    cancel: &CancelToken,
) -> Result<PullRequestSnapshot> {
    let max_attempts = config.max_attempts();

    for attempt in 1..=max_attempts {
        debug!(number, attempt, max_attempts, "checking pull request mergeability");
        progress
            .on_message(&format!(
                "checking pull request #{number} is mergeable ({attempt}/{max_attempts})"
            ))
            .await;

        let snapshot = api.get_pull_request(number).await?;

        match snapshot.mergeability() {
            Mergeability::Mergeable => return Ok(snapshot),
            Mergeability::NotMergeable => return Err(Error::NotMergeable(number)),
            Mergeability::Unknown => {
                if attempt == max_attempts {
                    break;
                }
                progress
                    .on_message(&format!(
                        "mergeability not computed yet, waiting {:?} ({attempt}/{max_attempts})",
                        config.interval
                    ))
                    .await;
                tokio::select! {
                    () = tokio::time::sleep(config.interval) => {}
                    () = cancel.cancelled() => return Err(Error::Cancelled),
                }
            }
        }
    }

    Err(Error::PollTimeout {
        attempts: max_attempts,
        timeout: config.timeout,
    })
}
