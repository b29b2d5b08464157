//! External command execution.
//!
//! Two-phase pattern:
//! 1. Describe - build a [`CommandSpec`] naming argv and a timeout profile
//! 2. Run - a [`CommandRunner`] supervises the subprocess, escalating from
//!    a termination signal at the soft timeout to a hard kill

mod runner;
mod spec;

pub use runner::{CommandOutcome, CommandRunner, SystemCommandRunner};
pub use spec::{CommandSinks, CommandSpec, TimeoutProfile};
