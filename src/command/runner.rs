//! Subprocess supervision with timeout/kill escalation.

use crate::cancel::CancelToken;
use crate::command::spec::{CommandSinks, CommandSpec, TimeoutProfile};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::process::{ExitStatus, Stdio};
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};
use tracing::debug;

/// How one subprocess invocation ended.
///
/// Produced and consumed within a single [`CommandRunner::run`] call;
/// [`CommandOutcome::into_result`] maps it to the crate error model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Exit code; `None` when the process died without one (signal, on
    /// non-Unix platforms).
    pub exit_code: Option<i32>,
    /// The soft timeout expired and a termination signal was sent.
    pub soft_killed: bool,
    /// The grace period also expired and the process was killed outright.
    pub hard_killed: bool,
}

impl CommandOutcome {
    fn exited(status: ExitStatus, soft_killed: bool) -> Self {
        Self {
            exit_code: exit_code_of(status),
            soft_killed,
            hard_killed: false,
        }
    }

    const fn killed() -> Self {
        Self {
            exit_code: None,
            soft_killed: true,
            hard_killed: true,
        }
    }

    /// Map the outcome to success or a command error naming `command`.
    ///
    /// A process that exits 0 is a success even if the termination signal
    /// had been sent; only the hard kill (or a code-less death) is
    /// reported as a kill.
    pub fn into_result(self, command: &str, profile: &TimeoutProfile) -> Result<()> {
        if self.hard_killed {
            return Err(Error::CommandKilled {
                command: command.to_string(),
                soft: profile.soft,
                hard: profile.hard,
            });
        }
        match self.exit_code {
            Some(0) => Ok(()),
            Some(code) => Err(Error::CommandFailed {
                command: command.to_string(),
                code,
            }),
            None => Err(Error::CommandKilled {
                command: command.to_string(),
                soft: profile.soft,
                hard: profile.hard,
            }),
        }
    }
}

/// Exit code, mapping Unix signal deaths to the shell convention.
fn exit_code_of(status: ExitStatus) -> Option<i32> {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        status.code().or_else(|| status.signal().map(|s| 128 + s))
    }
    #[cfg(not(unix))]
    {
        status.code()
    }
}

/// Executes subprocesses on behalf of the checkout flows.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `spec` to completion, forwarding its output to `sinks`.
    ///
    /// Blocks until the process exits, is killed after exceeding its
    /// timeout profile, or `cancel` fires.
    async fn run(
        &self,
        spec: &CommandSpec,
        sinks: &mut CommandSinks,
        cancel: &CancelToken,
    ) -> Result<()>;
}

/// Production runner backed by `tokio::process`.
///
/// Inherits the invoking process's working directory unless overridden.
#[derive(Debug, Clone, Default)]
pub struct SystemCommandRunner {
    working_dir: Option<std::path::PathBuf>,
}

impl SystemCommandRunner {
    /// Runner that inherits the caller's working directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner that executes every command in `dir`.
    #[must_use]
    pub fn in_dir(dir: impl Into<std::path::PathBuf>) -> Self {
        Self {
            working_dir: Some(dir.into()),
        }
    }
}

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(
        &self,
        spec: &CommandSpec,
        sinks: &mut CommandSinks,
        cancel: &CancelToken,
    ) -> Result<()> {
        let command_line = spec.to_string();
        debug!(command = %command_line, "spawning subprocess");

        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(|source| Error::CommandSpawn {
            command: command_line.clone(),
            source,
        })?;

        let child_stdout = child.stdout.take();
        let child_stderr = child.stderr.take();
        let CommandSinks { stdout, stderr } = sinks;

        let forward = async move {
            let out = async {
                if let Some(mut pipe) = child_stdout {
                    let _ = tokio::io::copy(&mut pipe, stdout).await;
                    let _ = stdout.flush().await;
                }
            };
            let err = async {
                if let Some(mut pipe) = child_stderr {
                    let _ = tokio::io::copy(&mut pipe, stderr).await;
                    let _ = stderr.flush().await;
                }
            };
            tokio::join!(out, err);
        };
        let supervision = supervise(&mut child, &spec.profile, cancel);
        tokio::pin!(forward, supervision);

        // Normally the pipes reach EOF when the child exits and supervision
        // finishes right after. If the child was killed but grandchildren
        // still hold the pipes open, supervision wins and forwarding is
        // abandoned rather than waiting on orphans.
        let outcome = tokio::select! {
            outcome = &mut supervision => outcome,
            () = &mut forward => (&mut supervision).await,
        }?;

        debug!(
            command = %command_line,
            exit_code = ?outcome.exit_code,
            soft_killed = outcome.soft_killed,
            hard_killed = outcome.hard_killed,
            "subprocess finished"
        );
        outcome.into_result(&command_line, &spec.profile)
    }
}

/// Wait for the child, escalating at each timeout boundary.
async fn supervise(
    child: &mut Child,
    profile: &TimeoutProfile,
    cancel: &CancelToken,
) -> Result<CommandOutcome> {
    tokio::select! {
        status = child.wait() => {
            return Ok(CommandOutcome::exited(status?, false));
        }
        () = cancel.cancelled() => {
            terminate(child, profile).await?;
            return Err(Error::Cancelled);
        }
        () = tokio::time::sleep(profile.soft) => {}
    }

    debug!(soft = ?profile.soft, "soft timeout exceeded, sending termination signal");
    send_term(child);

    tokio::select! {
        status = child.wait() => Ok(CommandOutcome::exited(status?, true)),
        () = cancel.cancelled() => {
            terminate(child, profile).await?;
            Err(Error::Cancelled)
        }
        () = tokio::time::sleep(profile.hard) => {
            debug!(hard = ?profile.hard, "grace period exceeded, killing");
            child.kill().await?;
            Ok(CommandOutcome::killed())
        }
    }
}

/// Early termination on cancellation: ask first, kill after the grace period.
async fn terminate(child: &mut Child, profile: &TimeoutProfile) -> Result<()> {
    send_term(child);
    tokio::select! {
        status = child.wait() => {
            status?;
        }
        () = tokio::time::sleep(profile.hard) => {
            child.kill().await?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn send_term(child: &mut Child) {
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;

    if let Some(pid) = child.id().and_then(|id| i32::try_from(id).ok()) {
        let _ = kill(Pid::from_raw(pid), Signal::SIGTERM);
    }
}

#[cfg(not(unix))]
fn send_term(child: &mut Child) {
    let _ = child.start_kill();
}
