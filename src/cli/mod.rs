//! Command-line interface for prco.
//!
//! The CLI is glue only: it parses flags, injects the real GitHub client
//! and command runner, and reports the outcome. All behavior lives in the
//! library.

mod progress;

use anstream::println;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use pr_checkout::api::GitHubApi;
use pr_checkout::cancel::CancelToken;
use pr_checkout::checkout::{CheckoutOutcome, checkout_pull_request, checkout_refs};
use pr_checkout::command::{CommandSinks, SystemCommandRunner};
use pr_checkout::error::{Error, Result};
use pr_checkout::request::{PollConfig, PrCheckoutRequest, RefCheckoutRequest};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Check out pull request merge refs for CI.
#[derive(Debug, Parser)]
#[command(name = "prco", version, about)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Wait until a pull request is mergeable, then check out its merge ref
    Pr {
        /// Repository owner (user or organization)
        #[arg(long)]
        owner: String,
        /// Repository name
        #[arg(long)]
        repo: String,
        /// Pull request number
        #[arg(long)]
        number: u64,
        /// Treat the pull request as already mergeable and skip polling
        #[arg(long)]
        mergeable: bool,
        /// Seconds between mergeability polls
        #[arg(long, default_value_t = 5)]
        interval: u64,
        /// Total polling budget in seconds
        #[arg(long, default_value_t = 50)]
        timeout: u64,
    },
    /// Fetch and check out a base ref, then merge a head ref into it
    Refs {
        /// Ref to fetch and check out
        #[arg(long)]
        base: String,
        /// Ref to merge into the base; omit to skip the merge step
        #[arg(long)]
        head: Option<String>,
    },
}

/// Install the tracing subscriber; `RUST_LOG` overrides the default level.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}

/// Dispatch the parsed command.
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Pr {
            owner,
            repo,
            number,
            mergeable,
            interval,
            timeout,
        } => {
            let mut request = PrCheckoutRequest::new(owner, repo, number).with_poll(PollConfig {
                interval: Duration::from_secs(interval),
                timeout: Duration::from_secs(timeout),
            });
            if mergeable {
                request = request.known_mergeable();
            }
            run_pr(request).await
        }
        Command::Refs { base, head } => {
            let mut request = RefCheckoutRequest::new(base);
            if let Some(head) = head {
                request = request.merging(head);
            }
            run_refs(request).await
        }
    }
}

async fn run_pr(request: PrCheckoutRequest) -> Result<()> {
    // Validate before touching the token so bad input fails the same way
    // with or without credentials configured.
    request.validate()?;

    let token = std::env::var("GITHUB_TOKEN")
        .map_err(|_| Error::Validation("GITHUB_TOKEN is not set".to_string()))?;
    let api = GitHubApi::from_token(&token, &request.owner, &request.repo)?;

    let runner = SystemCommandRunner::new();
    let mut sinks = CommandSinks::inherit();
    let reporter = progress::CliProgress::new();
    let cancel = cancel_on_ctrl_c();

    let outcome =
        checkout_pull_request(&request, &api, &runner, &mut sinks, &reporter, &cancel).await;
    reporter.finish();
    report(&outcome);
    outcome.into_result().map(|_| ())
}

async fn run_refs(request: RefCheckoutRequest) -> Result<()> {
    request.validate()?;

    let runner = SystemCommandRunner::new();
    let mut sinks = CommandSinks::inherit();
    let reporter = progress::CliProgress::new();
    let cancel = cancel_on_ctrl_c();

    let outcome = checkout_refs(&request, &runner, &mut sinks, &reporter, &cancel).await;
    reporter.finish();
    report(&outcome);
    outcome.into_result().map(|_| ())
}

/// Token that fires on the first Ctrl-C.
fn cancel_on_ctrl_c() -> CancelToken {
    let token = CancelToken::new();
    let handle = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handle.cancel();
        }
    });
    token
}

fn report(outcome: &CheckoutOutcome) {
    if let Some(snapshot) = &outcome.snapshot {
        println!(
            "{} #{} {} ({})",
            "pull request".dimmed(),
            snapshot.number,
            snapshot.title,
            snapshot.html_url.dimmed()
        );
    }
    for step in &outcome.completed {
        println!("{} {step}", "✓".green());
    }
    if let Some(step) = outcome.failed_step {
        println!("{} {step}", "✗".red());
    }
}
