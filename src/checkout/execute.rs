//! Checkout execution - effectful orchestration of both flows.
//!
//! Validation runs before any I/O, polling (PR flow only) before any
//! subprocess, and the planned git steps last, stopping at the first
//! failure. No rollback of a partially switched working tree is
//! attempted.

use crate::api::PullRequestApi;
use crate::cancel::CancelToken;
use crate::checkout::plan::{CheckoutPlan, plan_pr_checkout, plan_ref_checkout};
use crate::command::{CommandRunner, CommandSinks};
use crate::error::{Error, Result};
use crate::poll::poll_mergeable;
use crate::progress::ProgressCallback;
use crate::request::{PrCheckoutRequest, RefCheckoutRequest};
use crate::types::PullRequestSnapshot;
use tracing::debug;

/// Step name recorded when request validation fails.
const STEP_VALIDATE: &str = "validate";

/// Step name recorded for the mergeability polling phase.
const STEP_POLL: &str = "poll";

/// Result of one checkout invocation.
///
/// Partial success is observable: a step failure after a successful poll
/// still carries the snapshot obtained, paired with the step's error.
#[derive(Debug, Default)]
pub struct CheckoutOutcome {
    /// Snapshot from polling; `None` when polling was skipped because the
    /// request pre-declared the PR mergeable (or in the ref flow).
    pub snapshot: Option<PullRequestSnapshot>,
    /// Steps that completed, in order.
    pub completed: Vec<&'static str>,
    /// Step that failed, if any.
    pub failed_step: Option<&'static str>,
    /// The failure itself, if any.
    pub error: Option<Error>,
}

impl CheckoutOutcome {
    fn failed(step: &'static str, error: Error) -> Self {
        Self {
            failed_step: Some(step),
            error: Some(error),
            ..Self::default()
        }
    }

    /// Whether every step completed.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Collapse into a `Result`, surfacing the failing step's error and
    /// discarding the partial-progress detail.
    pub fn into_result(self) -> Result<Option<PullRequestSnapshot>> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.snapshot),
        }
    }
}

/// Check out the synthetic merge ref of a pull request.
///
/// Waits until the hosting API reports the PR mergeable (skipped when the
/// request pre-declares it), then fetches and checks out the merge ref.
pub async fn checkout_pull_request(
    request: &PrCheckoutRequest,
    api: &dyn PullRequestApi,
    runner: &dyn CommandRunner,
    sinks: &mut CommandSinks,
    progress: &dyn ProgressCallback,
    cancel: &CancelToken,
) -> CheckoutOutcome {
    if let Err(error) = request.validate() {
        return CheckoutOutcome::failed(STEP_VALIDATE, error);
    }

    let mut outcome = CheckoutOutcome::default();

    if request.mergeable {
        debug!(
            number = request.number,
            "pull request pre-declared mergeable, skipping polling"
        );
    } else {
        progress.on_step(STEP_POLL).await;
        match poll_mergeable(api, request.number, &request.poll, progress, cancel).await {
            Ok(snapshot) => outcome.snapshot = Some(snapshot),
            Err(error) => {
                outcome.failed_step = Some(STEP_POLL);
                outcome.error = Some(error);
                return outcome;
            }
        }
    }

    let plan = plan_pr_checkout(request);
    execute_steps(&plan, runner, sinks, progress, cancel, &mut outcome).await;
    outcome
}

/// Fetch and check out a base ref, then merge a head ref into it.
pub async fn checkout_refs(
    request: &RefCheckoutRequest,
    runner: &dyn CommandRunner,
    sinks: &mut CommandSinks,
    progress: &dyn ProgressCallback,
    cancel: &CancelToken,
) -> CheckoutOutcome {
    if let Err(error) = request.validate() {
        return CheckoutOutcome::failed(STEP_VALIDATE, error);
    }

    let mut outcome = CheckoutOutcome::default();
    let plan = plan_ref_checkout(request);
    execute_steps(&plan, runner, sinks, progress, cancel, &mut outcome).await;
    outcome
}

/// Walk the plan through the runner, recording progress into `outcome`
/// and stopping at the first failure.
async fn execute_steps(
    plan: &CheckoutPlan,
    runner: &dyn CommandRunner,
    sinks: &mut CommandSinks,
    progress: &dyn ProgressCallback,
    cancel: &CancelToken,
    outcome: &mut CheckoutOutcome,
) {
    for step in &plan.steps {
        let spec = step.command();
        debug!(step = step.name(), command = %spec, "running step");
        progress.on_step(step.name()).await;
        progress.on_message(&spec.to_string()).await;

        match runner.run(&spec, sinks, cancel).await {
            Ok(()) => outcome.completed.push(step.name()),
            Err(error) => {
                outcome.failed_step = Some(step.name());
                outcome.error = Some(error);
                return;
            }
        }
    }
}
