use crossnav::{ContainerState, NavigationError};

use super::{
    given_a_deferred_catalog, given_a_synchronous_catalog_with_stub_source,
    given_an_inline_threaded_catalog, run_queued_jobs,
};

#[test]
fn given_a_threaded_navigation_completion_should_wait_for_the_pump() {
    let mut test = given_an_inline_threaded_catalog();

    test.container.navigate(None, "fiction", None).unwrap();

    // The load already ran on the (inline) worker, but the hook fires only
    // once the UI-affine thread pumps the completion queue.
    assert_eq!(test.container.state(), ContainerState::Loading);
    assert_eq!(test.host.completion_count(), 0);

    test.container.process_completions().unwrap();

    assert_eq!(test.container.state(), ContainerState::Idle);
    assert_eq!(test.host.completion_count(), 1);
    assert_eq!(test.container.history().len(), 1);
}

#[test]
fn given_an_inflight_load_a_second_navigate_should_be_rejected_as_busy() {
    let (mut test, jobs) = given_a_deferred_catalog();

    test.container.navigate(None, "fiction", None).unwrap();
    let err = test.container.navigate(None, "history", None).unwrap_err();

    assert!(matches!(err, NavigationError::Busy));
    assert_eq!(test.host.begin_count(), 1);

    run_queued_jobs(&jobs);
    test.container.process_completions().unwrap();

    assert_eq!(test.host.completion_count(), 1);
    test.host.with_record(|record| {
        assert_eq!(record.completions[0].model_tag, "category");
    });
}

#[test]
fn given_an_inflight_cancel_aware_load_redirect_should_fire_only_the_target_hooks() {
    let (mut test, jobs) = given_a_deferred_catalog();

    // The category controller polls its token, so the superseded load bails
    // out with the cancelled early-return.
    test.container.navigate(None, "fiction", None).unwrap();
    test.container.redirect("fiction/0001").unwrap();

    run_queued_jobs(&jobs);
    test.container.process_completions().unwrap();

    assert_eq!(test.host.failure_count(), 0);
    assert_eq!(test.host.completion_count(), 1);
    assert_eq!(test.container.history().len(), 1);
    assert_eq!(test.container.state(), ContainerState::Idle);
    test.host.with_record(|record| {
        assert_eq!(record.begins, vec!["category", "book"]);
        assert_eq!(record.completions[0].model_tag, "book");
    });
}

#[test]
fn given_a_load_that_ignores_cancellation_its_completion_should_still_be_discarded() {
    let (mut test, jobs) = given_a_deferred_catalog();

    // The index controller never polls its token; its load completes
    // successfully after the redirect and is discarded by generation.
    test.container.navigate(None, "", None).unwrap();
    test.container.redirect("fiction").unwrap();

    run_queued_jobs(&jobs);
    test.container.process_completions().unwrap();

    assert_eq!(test.host.failure_count(), 0);
    assert_eq!(test.host.completion_count(), 1);
    assert_eq!(test.container.history().len(), 1);
    test.host.with_record(|record| {
        assert_eq!(record.completions[0].model_tag, "category");
    });
    let (uri, _) = test.container.history().current().unwrap();
    assert_eq!(uri, "fiction");
}

#[test]
fn given_an_idle_container_redirect_should_behave_like_navigate() {
    let mut test = given_a_synchronous_catalog_with_stub_source();

    test.container.redirect("fiction").unwrap();

    assert_eq!(test.host.completion_count(), 1);
    assert_eq!(test.container.history().len(), 1);
}

#[test]
fn given_back_to_back_redirects_only_the_last_target_should_complete() {
    let (mut test, jobs) = given_a_deferred_catalog();

    test.container.navigate(None, "", None).unwrap();
    test.container.redirect("fiction").unwrap();
    test.container.redirect("fiction/0001").unwrap();

    run_queued_jobs(&jobs);
    test.container.process_completions().unwrap();

    assert_eq!(test.host.completion_count(), 1);
    assert_eq!(test.host.failure_count(), 0);
    test.host.with_record(|record| {
        assert_eq!(record.completions[0].model_tag, "book");
    });
    assert_eq!(test.container.history().len(), 1);
}
