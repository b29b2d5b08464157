//! Error types for pr-checkout

use std::time::Duration;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// All failure modes of a checkout invocation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Request failed validation before any I/O was attempted.
    #[error("invalid request: {0}")]
    Validation(String),

    /// GitHub API call failed.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),

    /// Hosting API failure that is not an octocrab transport error.
    #[error("hosting API error: {0}")]
    Api(String),

    /// The pull request's mergeability resolved to false. Terminal, not retried.
    #[error("pull request #{0} isn't mergeable")]
    NotMergeable(u64),

    /// Mergeability was still unresolved when the attempt budget ran out.
    #[error("mergeability polling timed out after {attempts} attempt(s) over {timeout:?}")]
    PollTimeout {
        /// Attempts issued before giving up.
        attempts: u32,
        /// Total polling budget.
        timeout: Duration,
    },

    /// The caller's cancellation token fired.
    #[error("operation cancelled")]
    Cancelled,

    /// The subprocess could not be started.
    #[error("{command}: failed to start: {source}")]
    CommandSpawn {
        /// The command line attempted.
        command: String,
        /// The underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// The subprocess exited with a non-zero status.
    #[error("{command}: exit code: {code}")]
    CommandFailed {
        /// The command line attempted.
        command: String,
        /// Exit code (signal deaths are reported as 128 + signo).
        code: i32,
    },

    /// The subprocess outlived both timeouts and was force-killed.
    #[error("{command}: killed after exceeding {soft:?} (+{hard:?} grace)")]
    CommandKilled {
        /// The command line attempted.
        command: String,
        /// Soft timeout that triggered the termination signal.
        soft: Duration,
        /// Grace period granted before the hard kill.
        hard: Duration,
    },

    /// OS-level failure while supervising a subprocess.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
