//! Pull-request checkout automation for CI.
//!
//! Given a pull request, waits until the hosting API reports it mergeable,
//! fetches the synthetic `pull/<N>/merge` ref, and checks it out locally.
//! A second flow fetches and checks out a base ref, then merges a head ref
//! into it.
//!
//! Everything temporal is injectable: the hosting API is a trait
//! ([`api::PullRequestApi`]), subprocess execution is a trait
//! ([`command::CommandRunner`]), progress reporting is a trait
//! ([`progress::ProgressCallback`]), and cancellation is a shared token
//! ([`cancel::CancelToken`]), so every polling and timeout property can be
//! exercised without a network or a git repository.
//!
//! ```no_run
//! use pr_checkout::api::GitHubApi;
//! use pr_checkout::cancel::CancelToken;
//! use pr_checkout::checkout::checkout_pull_request;
//! use pr_checkout::command::{CommandSinks, SystemCommandRunner};
//! use pr_checkout::progress::NullProgress;
//! use pr_checkout::request::PrCheckoutRequest;
//!
//! # async fn run(token: &str) -> pr_checkout::error::Result<()> {
//! let request = PrCheckoutRequest::new("octocat", "hello-world", 42);
//! let api = GitHubApi::from_token(token, "octocat", "hello-world")?;
//! let runner = SystemCommandRunner::new();
//! let mut sinks = CommandSinks::inherit();
//!
//! let outcome = checkout_pull_request(
//!     &request,
//!     &api,
//!     &runner,
//!     &mut sinks,
//!     &NullProgress,
//!     &CancelToken::new(),
//! )
//! .await;
//! outcome.into_result().map(|_| ())
//! # }
//! ```

pub mod api;
pub mod cancel;
pub mod checkout;
pub mod command;
pub mod error;
pub mod poll;
pub mod progress;
pub mod request;
pub mod types;
