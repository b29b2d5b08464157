//! GitHub implementation of the pull request API.

use crate::api::PullRequestApi;
use crate::error::{Error, Result};
use crate::types::{PrState, PullRequestSnapshot};
use async_trait::async_trait;
use octocrab::Octocrab;
use tracing::debug;

/// GitHub client using octocrab.
///
/// The octocrab instance (and therefore the credential) is supplied by
/// the caller; this type never consults the process environment.
pub struct GitHubApi {
    client: Octocrab,
    owner: String,
    repo: String,
}

impl GitHubApi {
    /// Wrap an already configured octocrab client.
    pub fn new(client: Octocrab, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            client,
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Build a client authenticated with a personal token.
    pub fn from_token(
        token: &str,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Result<Self> {
        let client = Octocrab::builder()
            .personal_token(token.to_string())
            .build()
            .map_err(|e| Error::Api(e.to_string()))?;
        Ok(Self::new(client, owner, repo))
    }

    /// Repository owner this client is bound to.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name this client is bound to.
    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }
}

/// Helper to convert an octocrab PR to our snapshot type.
fn snapshot_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> PullRequestSnapshot {
    let state = match pr.state {
        Some(octocrab::models::IssueState::Open) => PrState::Open,
        Some(octocrab::models::IssueState::Closed) if pr.merged_at.is_some() => PrState::Merged,
        // IssueState is non-exhaustive, so use wildcard for Closed and any future variants
        Some(_) | None => PrState::Closed,
    };

    PullRequestSnapshot {
        number: pr.number,
        title: pr.title.as_deref().unwrap_or_default().to_string(),
        state,
        mergeable: pr.mergeable,
        merge_commit_sha: pr.merge_commit_sha.clone(),
        head_ref: pr.head.ref_field.clone(),
        base_ref: pr.base.ref_field.clone(),
        html_url: pr
            .html_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        updated_at: pr.updated_at,
    }
}

#[async_trait]
impl PullRequestApi for GitHubApi {
    async fn get_pull_request(&self, number: u64) -> Result<PullRequestSnapshot> {
        debug!(owner = %self.owner, repo = %self.repo, number, "getting pull request");

        let pr = self
            .client
            .pulls(&self.owner, &self.repo)
            .get(number)
            .await?;

        let snapshot = snapshot_from_octocrab(&pr);
        debug!(number, mergeable = ?snapshot.mergeable, state = %snapshot.state, "got pull request");
        Ok(snapshot)
    }
}
