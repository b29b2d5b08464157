//! Unit tests for pr-checkout modules

mod common;

mod poll_test {
    use crate::common::mock_api::MockPullRequestApi;
    use crate::common::{fast_poll, make_snapshot};
    use pr_checkout::cancel::CancelToken;
    use pr_checkout::error::Error;
    use pr_checkout::poll::poll_mergeable;
    use pr_checkout::progress::NullProgress;
    use pr_checkout::request::PollConfig;
    use std::time::{Duration, Instant};

    #[tokio::test]
    async fn exhausts_attempt_budget_exactly() {
        let api = MockPullRequestApi::new();
        api.set_fallback(make_snapshot(42, None));

        let config = fast_poll();
        assert_eq!(config.max_attempts(), 10);

        let err = poll_mergeable(&api, 42, &config, &NullProgress, &CancelToken::new())
            .await
            .unwrap_err();

        match err {
            Error::PollTimeout { attempts, .. } => assert_eq!(attempts, 10),
            other => panic!("expected PollTimeout, got: {other:?}"),
        }
        assert_eq!(api.call_count(), 10);
    }

    #[tokio::test]
    async fn short_circuits_when_mergeable_resolves() {
        let api = MockPullRequestApi::new();
        api.push_response(make_snapshot(42, None));
        api.push_response(make_snapshot(42, None));
        api.push_response(make_snapshot(42, Some(true)));
        api.set_fallback(make_snapshot(42, None));

        let snapshot = poll_mergeable(&api, 42, &fast_poll(), &NullProgress, &CancelToken::new())
            .await
            .unwrap();

        assert_eq!(snapshot.mergeable, Some(true));
        // Later attempts are never issued.
        assert_eq!(api.call_count(), 3);
    }

    #[tokio::test]
    async fn not_mergeable_is_terminal() {
        let api = MockPullRequestApi::new();
        api.push_response(make_snapshot(42, None));
        api.push_response(make_snapshot(42, Some(false)));
        api.set_fallback(make_snapshot(42, None));

        let err = poll_mergeable(&api, 42, &fast_poll(), &NullProgress, &CancelToken::new())
            .await
            .unwrap_err();

        match err {
            Error::NotMergeable(number) => assert_eq!(number, 42),
            other => panic!("expected NotMergeable, got: {other:?}"),
        }
        // The remaining budget is not spent.
        assert_eq!(api.call_count(), 2);
    }

    #[tokio::test]
    async fn api_error_aborts_without_retry() {
        let api = MockPullRequestApi::new();
        api.fail_get("rate limited");

        let err = poll_mergeable(&api, 42, &fast_poll(), &NullProgress, &CancelToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Api(_)), "got: {err:?}");
        assert_eq!(api.call_count(), 1);
    }

    #[tokio::test]
    async fn zero_attempt_budget_times_out_without_api_call() {
        let api = MockPullRequestApi::new();
        // interval >= timeout: the loop never executes
        let config = PollConfig {
            interval: Duration::from_secs(60),
            timeout: Duration::from_secs(50),
        };

        let err = poll_mergeable(&api, 42, &config, &NullProgress, &CancelToken::new())
            .await
            .unwrap_err();

        match err {
            Error::PollTimeout { attempts, .. } => assert_eq!(attempts, 0),
            other => panic!("expected PollTimeout, got: {other:?}"),
        }
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn cancellation_interrupts_the_sleep() {
        let api = MockPullRequestApi::new();
        api.set_fallback(make_snapshot(42, None));
        let config = PollConfig {
            interval: Duration::from_secs(5),
            timeout: Duration::from_secs(50),
        };

        let cancel = CancelToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let start = Instant::now();
        let err = poll_mergeable(&api, 42, &config, &NullProgress, &cancel)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Cancelled), "got: {err:?}");
        assert!(start.elapsed() < Duration::from_secs(2), "cancel was not prompt");
        assert_eq!(api.call_count(), 1);
    }
}

mod plan_test {
    use pr_checkout::checkout::{CheckoutStep, plan_pr_checkout, plan_ref_checkout};
    use pr_checkout::command::TimeoutProfile;
    use pr_checkout::request::{PrCheckoutRequest, RefCheckoutRequest};

    #[test]
    fn pr_plan_fetches_merge_ref_then_checks_out_alias() {
        let plan = plan_pr_checkout(&PrCheckoutRequest::new("o", "r", 42));

        assert_eq!(plan.steps.len(), 2);
        assert_eq!(
            plan.steps[0],
            CheckoutStep::Fetch {
                refspec: "pull/42/merge:pr/42/merge".to_string(),
                depth: Some(1),
            }
        );
        assert_eq!(
            plan.steps[1],
            CheckoutStep::Checkout {
                git_ref: "pr/42/merge".to_string(),
            }
        );
    }

    #[test]
    fn pr_plan_command_lines() {
        let plan = plan_pr_checkout(&PrCheckoutRequest::new("o", "r", 42));

        assert_eq!(
            plan.steps[0].command().to_string(),
            "git fetch --depth 1 origin pull/42/merge:pr/42/merge"
        );
        assert_eq!(plan.steps[1].command().to_string(), "git checkout pr/42/merge");
    }

    #[test]
    fn fetch_gets_network_profile_and_checkout_gets_local() {
        let plan = plan_pr_checkout(&PrCheckoutRequest::new("o", "r", 7));

        assert_eq!(plan.steps[0].command().profile, TimeoutProfile::network());
        assert_eq!(plan.steps[1].command().profile, TimeoutProfile::local());
    }

    #[test]
    fn ref_plan_fetches_base_then_merges_head() {
        let request = RefCheckoutRequest::new("main").merging("feature-x");
        let plan = plan_ref_checkout(&request);

        let commands: Vec<String> = plan.steps.iter().map(|s| s.command().to_string()).collect();
        assert_eq!(
            commands,
            [
                "git fetch origin main",
                "git checkout main",
                "git merge feature-x",
            ]
        );
    }

    #[test]
    fn ref_plan_without_head_has_no_merge_step() {
        let plan = plan_ref_checkout(&RefCheckoutRequest::new("main"));

        assert_eq!(plan.steps.len(), 2);
        assert!(
            !plan
                .steps
                .iter()
                .any(|s| matches!(s, CheckoutStep::Merge { .. }))
        );
    }
}

mod request_test {
    use pr_checkout::error::Error;
    use pr_checkout::request::{PrCheckoutRequest, RefCheckoutRequest};

    #[test]
    fn rejects_empty_owner() {
        let err = PrCheckoutRequest::new("", "r", 1).validate().unwrap_err();
        match err {
            Error::Validation(msg) => assert!(msg.contains("owner"), "msg: {msg}"),
            other => panic!("expected Validation, got: {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_repo() {
        let err = PrCheckoutRequest::new("o", "", 1).validate().unwrap_err();
        match err {
            Error::Validation(msg) => assert!(msg.contains("repo"), "msg: {msg}"),
            other => panic!("expected Validation, got: {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_base_ref() {
        let err = RefCheckoutRequest::new("").validate().unwrap_err();
        assert!(matches!(err, Error::Validation(_)), "got: {err:?}");
    }

    #[test]
    fn accepts_well_formed_requests() {
        PrCheckoutRequest::new("o", "r", 1).validate().unwrap();
        RefCheckoutRequest::new("main").merging("feat").validate().unwrap();
    }
}

mod outcome_test {
    use crate::common::make_snapshot;
    use pr_checkout::checkout::CheckoutOutcome;
    use pr_checkout::error::Error;

    #[test]
    fn success_yields_snapshot() {
        let outcome = CheckoutOutcome {
            snapshot: Some(make_snapshot(42, Some(true))),
            completed: vec!["fetch", "checkout"],
            ..CheckoutOutcome::default()
        };

        assert!(outcome.is_success());
        let snapshot = outcome.into_result().unwrap();
        assert_eq!(snapshot.unwrap().number, 42);
    }

    #[test]
    fn failure_surfaces_the_step_error() {
        let outcome = CheckoutOutcome {
            snapshot: Some(make_snapshot(42, Some(true))),
            completed: vec!["fetch"],
            failed_step: Some("checkout"),
            error: Some(Error::CommandFailed {
                command: "git checkout pr/42/merge".to_string(),
                code: 128,
            }),
        };

        assert!(!outcome.is_success());
        let err = outcome.into_result().unwrap_err();
        match err {
            Error::CommandFailed { code, .. } => assert_eq!(code, 128),
            other => panic!("expected CommandFailed, got: {other:?}"),
        }
    }
}
