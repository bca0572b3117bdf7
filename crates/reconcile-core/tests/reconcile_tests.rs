//! Plan and reconcile flows for single resources

use pretty_assertions::assert_eq;
use reconcile_core::{
    Action, DirectoryConfig, DirectoryResource, ErrorKind, FileConfig, FileResource, Reconciler,
    Resource, ResourceState, plan,
};
use reconcile_core::logging::init_for_tests;
use reconcile_test_utils::TestTree;
use rstest::rstest;

#[test]
fn plan_create_for_undeclared_state() {
    init_for_tests();
    let config = FileConfig::new("/srv/x.txt");

    let plan = plan(&FileResource::default(), Some(&config), None).unwrap();

    assert_eq!(plan.action, Action::Create);
    assert!(plan.changes.is_empty());
}

#[test]
fn plan_treats_cleared_identity_as_absent() {
    init_for_tests();
    let config = FileConfig::new("/srv/x.txt");
    let drifted = ResourceState::file("/srv/x.txt");

    let plan = plan(&FileResource::default(), Some(&config), Some(&drifted)).unwrap();

    assert_eq!(plan.action, Action::Create);
}

#[test]
fn plan_noop_without_config_or_state() {
    init_for_tests();
    let plan = plan::<DirectoryResource>(&DirectoryResource::new(), None, None).unwrap();

    assert_eq!(plan.action, Action::NoOp);
    assert!(!plan.has_changes());
}

#[test]
fn plan_create_rejects_invalid_permissions() {
    init_for_tests();
    let config = DirectoryConfig::new("/srv/d").with_permissions("abc");

    let err = plan(&DirectoryResource::new(), Some(&config), None).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidPermissionFormat);
}

#[rstest]
#[case::content_only(FileConfig::new("x").with_content("new"), Action::Update)]
#[case::permissions_only(FileConfig::new("x").with_content("old").with_permissions("0600"), Action::Update)]
#[case::same(FileConfig::new("x").with_content("old"), Action::NoOp)]
#[case::new_path(FileConfig::new("y").with_content("old"), Action::Replace)]
fn file_plan_actions(#[case] config: FileConfig, #[case] expected: Action) {
    init_for_tests();
    let tree = TestTree::new();
    let files = FileResource::default();
    let mut state = files
        .create(&FileConfig::new(tree.path("x")).with_content("old"))
        .unwrap();
    // Compare against the relative path the cases declare
    state.path = "x".into();

    let plan = plan(&files, Some(&config), Some(&state)).unwrap();

    assert_eq!(plan.action, expected);
}

#[test]
fn reconcile_file_full_lifecycle() {
    init_for_tests();
    let tree = TestTree::new();
    let reconciler = Reconciler::default();
    let config = FileConfig::new(tree.path("x.txt")).with_content("hi");

    let created = reconciler.reconcile_file(Some(&config), None).unwrap();
    assert_eq!(created.action, Action::Create);

    let steady = reconciler
        .reconcile_file(Some(&config), created.state)
        .unwrap();
    assert_eq!(steady.action, Action::NoOp);

    let changed = config.clone().with_content("bye");
    let updated = reconciler
        .reconcile_file(Some(&changed), steady.state)
        .unwrap();
    assert_eq!(updated.action, Action::Update);
    assert_eq!(updated.changes.len(), 1);
    assert_eq!(updated.changes[0].field, "content");
    tree.assert_file_contains("x.txt", "bye");

    let deleted = reconciler.reconcile_file(None, updated.state).unwrap();
    assert_eq!(deleted.action, Action::Delete);
    assert!(!deleted.state.unwrap().exists());
    tree.assert_not_exists("x.txt");
}

#[test]
fn reconcile_recreates_file_deleted_out_of_band() {
    init_for_tests();
    let tree = TestTree::new();
    let reconciler = Reconciler::default();
    let config = FileConfig::new(tree.path("x.txt")).with_content("hi");
    let created = reconciler.reconcile_file(Some(&config), None).unwrap();
    tree.remove("x.txt");

    let outcome = reconciler
        .reconcile_file(Some(&config), created.state)
        .unwrap();

    assert_eq!(outcome.action, Action::Create);
    tree.assert_file_contains("x.txt", "hi");
}

#[test]
fn reconcile_restores_drifted_content() {
    init_for_tests();
    let tree = TestTree::new();
    let reconciler = Reconciler::default();
    let config = FileConfig::new(tree.path("x.txt")).with_content("declared");
    let created = reconciler.reconcile_file(Some(&config), None).unwrap();
    tree.write("x.txt", "tampered");

    let outcome = reconciler
        .reconcile_file(Some(&config), created.state)
        .unwrap();

    assert_eq!(outcome.action, Action::Update);
    tree.assert_file_contains("x.txt", "declared");
}

#[test]
fn reconcile_file_path_change_replaces() {
    init_for_tests();
    let tree = TestTree::new();
    let reconciler = Reconciler::default();
    let created = reconciler
        .reconcile_file(Some(&FileConfig::new(tree.path("a.txt"))), None)
        .unwrap();

    let outcome = reconciler
        .reconcile_file(Some(&FileConfig::new(tree.path("b.txt"))), created.state)
        .unwrap();

    assert_eq!(outcome.action, Action::Replace);
    tree.assert_not_exists("a.txt");
    tree.assert_exists("b.txt");
    assert_eq!(outcome.state.unwrap().path, tree.path("b.txt"));
}

#[test]
fn reconcile_delete_of_already_absent_is_noop() {
    init_for_tests();
    let tree = TestTree::new();
    let reconciler = Reconciler::default();

    let outcome = reconciler
        .reconcile_directory(None, Some(ResourceState::directory(tree.path("d"))))
        .unwrap();

    assert_eq!(outcome.action, Action::NoOp);
}

#[test]
fn reconcile_surfaces_type_mismatch() {
    init_for_tests();
    let tree = TestTree::new();
    let reconciler = Reconciler::default();
    let created = reconciler
        .reconcile_directory(Some(&DirectoryConfig::new(tree.path("d"))), None)
        .unwrap();
    tree.remove("d");
    tree.write("d", "file now");

    let err = reconciler
        .reconcile_directory(Some(&DirectoryConfig::new(tree.path("d"))), created.state)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
}

#[cfg(unix)]
#[test]
fn reconcile_directory_permission_change_replaces() {
    init_for_tests();
    let tree = TestTree::new();
    let reconciler = Reconciler::default();
    let config = DirectoryConfig::new(tree.path("d"));
    let created = reconciler.reconcile_directory(Some(&config), None).unwrap();
    tree.write("d/inner.txt", "gone after replace");

    let outcome = reconciler
        .reconcile_directory(Some(&config.with_permissions("0700")), created.state)
        .unwrap();

    assert_eq!(outcome.action, Action::Replace);
    assert!(outcome.changes[0].requires_replace);
    assert_eq!(tree.mode("d"), 0o700);
    tree.assert_not_exists("d/inner.txt");
}
