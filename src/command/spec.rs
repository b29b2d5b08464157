//! Command descriptions: argv, timeout profiles, and output sinks.

use std::time::Duration;
use tokio::io::AsyncWrite;

/// Soft/hard timeout pair for one subprocess invocation.
///
/// The soft timeout bounds normal execution; when it expires the process
/// is asked to terminate. The hard timeout is the grace period after that
/// request before the process is killed outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutProfile {
    /// Time the process is given to finish on its own.
    pub soft: Duration,
    /// Grace period between the termination signal and the kill.
    pub hard: Duration,
}

impl TimeoutProfile {
    /// Build a profile from explicit durations.
    #[must_use]
    pub const fn new(soft: Duration, hard: Duration) -> Self {
        Self { soft, hard }
    }

    /// Profile for network-bound transfers of variable size (fetch).
    #[must_use]
    pub const fn network() -> Self {
        Self::new(Duration::from_secs(600), Duration::from_secs(10))
    }

    /// Profile for local, bounded-cost operations (checkout, merge).
    #[must_use]
    pub const fn local() -> Self {
        Self::new(Duration::from_secs(30), Duration::from_secs(10))
    }
}

/// A subprocess to run: program, arguments, and its timeout profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program to execute.
    pub program: String,
    /// Arguments, in order.
    pub args: Vec<String>,
    /// Timeouts applied while supervising the process.
    pub profile: TimeoutProfile,
}

impl CommandSpec {
    /// Build a spec from a program and its arguments.
    pub fn new<I, S>(program: impl Into<String>, args: I, profile: TimeoutProfile) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            profile,
        }
    }
}

impl std::fmt::Display for CommandSpec {
    /// The command line as a human would type it; used in logs and errors.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Destinations for a subprocess's output streams.
///
/// Defaults to the invoking process's own stdout/stderr. The same pair is
/// reused across every step of a checkout flow.
pub struct CommandSinks {
    /// Where subprocess stdout is forwarded.
    pub stdout: Box<dyn AsyncWrite + Send + Unpin>,
    /// Where subprocess stderr is forwarded.
    pub stderr: Box<dyn AsyncWrite + Send + Unpin>,
}

impl CommandSinks {
    /// Forward to the invoking process's stdout/stderr.
    #[must_use]
    pub fn inherit() -> Self {
        Self {
            stdout: Box::new(tokio::io::stdout()),
            stderr: Box::new(tokio::io::stderr()),
        }
    }

    /// Discard all subprocess output.
    #[must_use]
    pub fn null() -> Self {
        Self {
            stdout: Box::new(tokio::io::sink()),
            stderr: Box::new(tokio::io::sink()),
        }
    }
}

impl Default for CommandSinks {
    fn default() -> Self {
        Self::inherit()
    }
}

impl std::fmt::Debug for CommandSinks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSinks").finish_non_exhaustive()
    }
}
