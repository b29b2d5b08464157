//! Checkout planning - pure functions for building step sequences.
//!
//! No I/O happens here. Both flows produce the same step vocabulary so a
//! single executor (and a single timeout/error policy) serves both.

use crate::command::{CommandSpec, TimeoutProfile};
use crate::request::{PrCheckoutRequest, RefCheckoutRequest};

/// A single git invocation within a checkout flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutStep {
    /// Fetch a ref (optionally shallow) from origin.
    Fetch {
        /// Refspec passed to `git fetch origin`.
        refspec: String,
        /// `--depth` value; `None` fetches full history.
        depth: Option<u32>,
    },
    /// Switch the working tree to a ref.
    Checkout {
        /// Ref handed to `git checkout`.
        git_ref: String,
    },
    /// Merge a ref into the checked-out branch.
    Merge {
        /// Ref handed to `git merge`.
        git_ref: String,
    },
}

impl CheckoutStep {
    /// Step name used in progress reporting and outcomes.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Fetch { .. } => "fetch",
            Self::Checkout { .. } => "checkout",
            Self::Merge { .. } => "merge",
        }
    }

    /// The git command implementing this step.
    ///
    /// Fetches run under the network timeout profile; checkout and merge
    /// are local and get the short profile.
    #[must_use]
    pub fn command(&self) -> CommandSpec {
        match self {
            Self::Fetch { refspec, depth } => {
                let mut args = vec!["fetch".to_string()];
                if let Some(depth) = depth {
                    args.push("--depth".to_string());
                    args.push(depth.to_string());
                }
                args.push("origin".to_string());
                args.push(refspec.clone());
                CommandSpec::new("git", args, TimeoutProfile::network())
            }
            Self::Checkout { git_ref } => CommandSpec::new(
                "git",
                ["checkout".to_string(), git_ref.clone()],
                TimeoutProfile::local(),
            ),
            Self::Merge { git_ref } => CommandSpec::new(
                "git",
                ["merge".to_string(), git_ref.clone()],
                TimeoutProfile::local(),
            ),
        }
    }
}

impl std::fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.command())
    }
}

/// Ordered git steps for one checkout flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutPlan {
    /// Steps in execution order; the first failure aborts the rest.
    pub steps: Vec<CheckoutStep>,
}

/// Plan the PR flow: shallow-fetch the synthetic merge ref under a local
/// alias, then check the alias out.
///
/// `pull/<N>/merge` is what the hosting service publishes; it is aliased
/// locally to `pr/<N>/merge` so the checkout names a real local ref.
#[must_use]
pub fn plan_pr_checkout(request: &PrCheckoutRequest) -> CheckoutPlan {
    let number = request.number;
    CheckoutPlan {
        steps: vec![
            CheckoutStep::Fetch {
                refspec: format!("pull/{number}/merge:pr/{number}/merge"),
                depth: Some(1),
            },
            CheckoutStep::Checkout {
                git_ref: format!("pr/{number}/merge"),
            },
        ],
    }
}

/// Plan the ref flow: fetch and check out the base, then merge the head
/// into it. Without a head ref the merge step is omitted.
#[must_use]
pub fn plan_ref_checkout(request: &RefCheckoutRequest) -> CheckoutPlan {
    let mut steps = vec![
        CheckoutStep::Fetch {
            refspec: request.base_ref.clone(),
            depth: None,
        },
        CheckoutStep::Checkout {
            git_ref: request.base_ref.clone(),
        },
    ];
    if let Some(head) = &request.head_ref {
        steps.push(CheckoutStep::Merge {
            git_ref: head.clone(),
        });
    }
    CheckoutPlan { steps }
}
