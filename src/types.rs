//! Core types for pr-checkout

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// PR state (open, closed, merged)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrState {
    /// PR is open
    Open,
    /// PR was closed without merging
    Closed,
    /// PR was merged
    Merged,
}

impl std::fmt::Display for PrState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
            Self::Merged => write!(f, "merged"),
        }
    }
}

/// Mergeability of a pull request as reported by the hosting API.
///
/// GitHub computes this lazily; until the computation finishes the
/// API reports `Unknown` and the poller keeps asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mergeability {
    /// The merge ref can be built without conflicts.
    Mergeable,
    /// The PR has conflicts; polling further is pointless.
    NotMergeable,
    /// The API hasn't finished computing mergeability yet.
    Unknown,
}

impl From<Option<bool>> for Mergeability {
    fn from(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => Self::Mergeable,
            Some(false) => Self::NotMergeable,
            None => Self::Unknown,
        }
    }
}

impl std::fmt::Display for Mergeability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mergeable => write!(f, "mergeable"),
            Self::NotMergeable => write!(f, "not mergeable"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// A pull request as reported by the hosting API at one poll instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestSnapshot {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// Current state of the PR
    pub state: PrState,
    /// Whether the PR can be merged (no conflicts)
    /// - `Some(true)` = mergeable
    /// - `Some(false)` = has conflicts
    /// - `None` = unknown (GitHub still computing)
    pub mergeable: Option<bool>,
    /// SHA of the synthetic merge commit, once computed
    pub merge_commit_sha: Option<String>,
    /// Head branch name
    pub head_ref: String,
    /// Base branch name
    pub base_ref: String,
    /// Web URL for the PR
    pub html_url: String,
    /// When the PR was last updated upstream
    pub updated_at: Option<DateTime<Utc>>,
}

impl PullRequestSnapshot {
    /// Mergeability at the instant this snapshot was taken.
    #[must_use]
    pub fn mergeability(&self) -> Mergeability {
        self.mergeable.into()
    }
}
