//! Checkout flows for pull requests and raw refs.
//!
//! Two-phase pattern matching the rest of the crate:
//! 1. Plan - build a `CheckoutPlan` of git steps (pure, testable)
//! 2. Execute - walk the steps through a `CommandRunner` (effectful),
//!    polling mergeability first when the PR flow needs it

mod execute;
mod plan;

pub use execute::{CheckoutOutcome, checkout_pull_request, checkout_refs};
pub use plan::{CheckoutPlan, CheckoutStep, plan_pr_checkout, plan_ref_checkout};
