//! Recording command runner for testing.
//!
//! Records every command it is asked to run and succeeds unless a failure
//! was injected for that git subcommand, so orchestration tests can verify
//! exact argv sequences without spawning processes.

use async_trait::async_trait;
use pr_checkout::cancel::CancelToken;
use pr_checkout::command::{CommandRunner, CommandSinks, CommandSpec};
use pr_checkout::error::{Error, Result};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory command runner with call tracking and error injection.
#[derive(Debug, Default)]
pub struct RecordingCommandRunner {
    calls: Mutex<Vec<CommandSpec>>,
    // git subcommand (first argument) -> injected exit code
    fail_on: Mutex<HashMap<String, i32>>,
}

impl RecordingCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every command whose first argument is `subcommand` fail with
    /// `code`.
    pub fn fail_subcommand(&self, subcommand: &str, code: i32) {
        self.fail_on
            .lock()
            .unwrap()
            .insert(subcommand.to_string(), code);
    }

    /// Every command run, in order.
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of commands run.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// How many runs named this git subcommand.
    pub fn count_of(&self, subcommand: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|spec| spec.args.first().is_some_and(|arg| arg == subcommand))
            .count()
    }

    /// Assert one command's full command line, by call index.
    pub fn assert_call(&self, index: usize, command_line: &str) {
        let calls = self.calls();
        let call = calls
            .get(index)
            .unwrap_or_else(|| panic!("expected call #{index} but got: {calls:?}"));
        assert_eq!(call.to_string(), command_line);
    }
}

#[async_trait]
impl CommandRunner for RecordingCommandRunner {
    async fn run(
        &self,
        spec: &CommandSpec,
        _sinks: &mut CommandSinks,
        _cancel: &CancelToken,
    ) -> Result<()> {
        self.calls.lock().unwrap().push(spec.clone());

        let injected = spec
            .args
            .first()
            .and_then(|sub| self.fail_on.lock().unwrap().get(sub).copied());
        match injected {
            Some(code) => Err(Error::CommandFailed {
                command: spec.to_string(),
                code,
            }),
            None => Ok(()),
        }
    }
}
