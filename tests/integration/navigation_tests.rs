use crossnav::{
    ContainerState, FailureKind, NavigationError, Params, Perspective,
};

use super::{
    given_a_synchronous_catalog, given_a_synchronous_catalog_with_stub_source, BookModel,
    CategoryModel, IndexModel, MockBookSource,
};

#[test]
fn given_the_empty_uri_should_activate_the_index_with_no_parameters() {
    let mut test = given_a_synchronous_catalog_with_stub_source();

    test.container.navigate(None, "", None).unwrap();

    assert_eq!(test.host.completion_count(), 1);
    test.host.with_record(|record| {
        let completion = &record.completions[0];
        assert_eq!(completion.model_tag, "index");
        assert_eq!(completion.perspective, Perspective::default());

        let model = completion.model.as_ref().unwrap();
        let index = model.downcast_ref::<IndexModel>().unwrap();
        assert!(index.params.is_empty());
    });
}

#[test]
fn given_a_category_uri_should_bind_the_category_parameter() {
    let mut test = given_a_synchronous_catalog_with_stub_source();

    test.container.navigate(None, "fiction", None).unwrap();

    test.host.with_record(|record| {
        let model = record.completions[0].model.as_ref().unwrap();
        let category = model.downcast_ref::<CategoryModel>().unwrap();
        assert_eq!(category.name, "fiction");
    });
}

#[test]
fn given_a_book_uri_should_bind_both_parameters_and_fetch_the_title() {
    let mut source = MockBookSource::new();
    source
        .expect_fetch_title()
        .withf(|category, book| category == "fiction" && book == "0001")
        .times(1)
        .returning(|_, _| Ok("A Memory Called Empire".to_string()));
    let mut test = given_a_synchronous_catalog(Box::new(source));

    test.container.navigate(None, "fiction/0001", None).unwrap();

    test.host.with_record(|record| {
        let model = record.completions[0].model.as_ref().unwrap();
        let book = model.downcast_ref::<BookModel>().unwrap();
        assert_eq!(book.category, "fiction");
        assert_eq!(book.book, "0001");
        assert_eq!(book.title, "A Memory Called Empire");
    });
}

#[test]
fn given_caller_parameters_they_should_win_key_collisions() {
    let mut test = given_a_synchronous_catalog_with_stub_source();

    let mut caller_params = Params::new();
    caller_params.insert("Category".to_string(), "override".to_string());
    test.container
        .navigate(None, "fiction", Some(caller_params))
        .unwrap();

    test.host.with_record(|record| {
        let model = record.completions[0].model.as_ref().unwrap();
        let category = model.downcast_ref::<CategoryModel>().unwrap();
        assert_eq!(category.name, "override");
    });
}

#[test]
fn given_a_perspective_parameter_the_matching_view_should_resolve() {
    let mut test = given_a_synchronous_catalog_with_stub_source();

    let mut caller_params = Params::new();
    caller_params.insert("Perspective".to_string(), "Read".to_string());
    test.container
        .navigate(None, "fiction", Some(caller_params))
        .unwrap();

    assert_eq!(test.host.completion_count(), 1);
    test.host.with_record(|record| {
        assert_eq!(record.completions[0].perspective, Perspective::new("Read"));
    });
}

#[test]
fn given_an_unknown_uri_should_report_route_not_found_without_failing_the_call() {
    let mut test = given_a_synchronous_catalog_with_stub_source();

    test.container.navigate(None, "a/b/c", None).unwrap();

    assert_eq!(test.host.completion_count(), 0);
    assert_eq!(test.host.failure_count(), 1);
    assert_eq!(test.container.history().len(), 0);
    test.host.with_record(|record| {
        assert_eq!(record.failures[0].0, FailureKind::RouteNotFound);
    });
}

#[test]
fn given_a_failing_load_should_invoke_the_failure_hook_exactly_once() {
    let mut source = MockBookSource::new();
    source
        .expect_fetch_title()
        .times(1)
        .returning(|_, _| Err("backend unavailable".to_string()));
    let mut test = given_a_synchronous_catalog(Box::new(source));

    test.container.navigate(None, "fiction/0001", None).unwrap();

    assert_eq!(test.host.failure_count(), 1);
    assert_eq!(test.host.completion_count(), 0);
    assert_eq!(test.container.history().len(), 0);
    test.host.with_record(|record| {
        let (kind, message) = &record.failures[0];
        assert_eq!(*kind, FailureKind::ControllerLoad);
        assert!(message.contains("fiction/0001"));
    });
}

#[test]
fn given_sequential_navigations_history_should_grow_only_on_success() {
    let mut source = MockBookSource::new();
    source
        .expect_fetch_title()
        .times(1)
        .returning(|_, _| Err("backend unavailable".to_string()));
    let mut test = given_a_synchronous_catalog(Box::new(source));

    test.container.navigate(None, "", None).unwrap();
    assert_eq!(test.container.history().len(), 1);

    test.container.navigate(None, "fiction", None).unwrap();
    assert_eq!(test.container.history().len(), 2);

    test.container.navigate(None, "fiction/0001", None).unwrap();
    assert_eq!(test.container.history().len(), 2);
}

#[test]
fn given_a_loaded_controller_with_no_view_the_error_should_propagate_loudly() {
    let mut test = given_a_synchronous_catalog_with_stub_source();

    let err = test.container.navigate(None, "orphan", None).unwrap_err();

    assert!(matches!(err, NavigationError::ViewNotRegistered { .. }));
    // Loud, but also delivered to the failure hook like every other failure.
    assert_eq!(test.host.failure_count(), 1);
    assert_eq!(test.container.history().len(), 0);
    test.host.with_record(|record| {
        assert_eq!(record.failures[0].0, FailureKind::ViewNotRegistered);
    });
}

#[test]
fn given_any_outcome_the_container_should_return_to_idle() {
    let mut test = given_a_synchronous_catalog_with_stub_source();

    test.container.navigate(None, "fiction", None).unwrap();
    assert_eq!(test.container.state(), ContainerState::Idle);

    test.container.navigate(None, "a/b/c", None).unwrap();
    assert_eq!(test.container.state(), ContainerState::Idle);

    let _ = test.container.navigate(None, "orphan", None);
    assert_eq!(test.container.state(), ContainerState::Idle);
}

#[test]
fn given_a_from_view_identifier_it_should_reach_the_completion_hook() {
    let mut test = given_a_synchronous_catalog_with_stub_source();

    test.container
        .navigate(Some("splash-screen"), "fiction", None)
        .unwrap();

    test.host.with_record(|record| {
        assert_eq!(
            record.completions[0].from_view.as_deref(),
            Some("splash-screen")
        );
    });
}

#[test]
fn given_two_entries_back_should_renavigate_to_the_prior_one() {
    let mut test = given_a_synchronous_catalog_with_stub_source();

    test.container.navigate(None, "fiction", None).unwrap();
    test.container.navigate(None, "fiction/0001", None).unwrap();
    assert_eq!(test.container.history().len(), 2);

    test.container.back().unwrap();

    // Both entries popped, then the prior one re-pushed by its success.
    assert_eq!(test.container.history().len(), 1);
    let (uri, _) = test.container.history().current().unwrap();
    assert_eq!(uri, "fiction");
    assert_eq!(test.host.completion_count(), 3);
    test.host.with_record(|record| {
        assert_eq!(record.completions[2].model_tag, "category");
    });
}

#[test]
fn given_fewer_than_two_entries_back_should_be_rejected() {
    let mut test = given_a_synchronous_catalog_with_stub_source();

    assert!(matches!(
        test.container.back(),
        Err(NavigationError::CannotGoBack)
    ));

    test.container.navigate(None, "fiction", None).unwrap();
    assert!(matches!(
        test.container.back(),
        Err(NavigationError::CannotGoBack)
    ));
    assert_eq!(test.container.history().len(), 1);
}

#[test]
fn given_session_entries_they_should_survive_navigations_until_abandoned() {
    use std::sync::Arc;

    let mut test = given_a_synchronous_catalog_with_stub_source();
    test.container.session().mark_safe("wiring");
    test.container
        .session()
        .insert("wiring", Arc::new("kept".to_string()));
    test.container
        .session()
        .insert("scratch", Arc::new("dropped".to_string()));

    test.container.navigate(None, "fiction", None).unwrap();
    assert_eq!(test.container.session().len(), 2);

    test.container.session().abandon();
    assert!(test.container.session().contains("wiring"));
    assert!(!test.container.session().contains("scratch"));
}

#[test]
fn given_repeated_navigations_the_controller_singleton_should_be_reused() {
    let mut source = MockBookSource::new();
    // One singleton serving both navigations: two calls on the same mock.
    source
        .expect_fetch_title()
        .times(2)
        .returning(|category, book| Ok(format!("{category}-{book}")));
    let mut test = given_a_synchronous_catalog(Box::new(source));

    test.container.navigate(None, "fiction/0001", None).unwrap();
    test.container.navigate(None, "history/0002", None).unwrap();

    test.host.with_record(|record| {
        let first = record.completions[0]
            .model
            .as_ref()
            .unwrap()
            .downcast_ref::<BookModel>()
            .unwrap()
            .clone();
        let second = record.completions[1]
            .model
            .as_ref()
            .unwrap()
            .downcast_ref::<BookModel>()
            .unwrap()
            .clone();
        assert_eq!(first.title, "fiction-0001");
        assert_eq!(second.title, "history-0002");
    });
}
