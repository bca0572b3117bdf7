//! Out-of-band changes between reconciliations

use pretty_assertions::assert_eq;
use reconcile_core::{
    Action, DirectoryConfig, FileConfig, FileResource, Reconciler, Resource, ResourceState,
};
use reconcile_core::logging::init_for_tests;
use reconcile_test_utils::TestTree;

#[test]
fn test_external_delete_clears_identity() {
    init_for_tests();
    let tree = TestTree::new();
    let files = FileResource::default();
    let created = files
        .create(&FileConfig::new(tree.path("x.txt")).with_content("hi"))
        .unwrap();
    assert!(created.exists());

    tree.remove("x.txt");
    let read = files.read(created).unwrap();

    assert!(!read.exists());
    assert_eq!(read.path, tree.path("x.txt"));
}

#[test]
fn test_reconcile_restores_externally_deleted_directory() {
    init_for_tests();
    let tree = TestTree::new();
    let reconciler = Reconciler::default();
    let config = DirectoryConfig::new(tree.path("cache"));
    let created = reconciler.reconcile_directory(Some(&config), None).unwrap();

    tree.remove("cache");
    let outcome = reconciler
        .reconcile_directory(Some(&config), created.state)
        .unwrap();

    assert_eq!(outcome.action, Action::Create);
    tree.assert_is_dir("cache");
}

#[test]
fn test_declared_absent_and_already_gone_is_noop() {
    init_for_tests();
    let tree = TestTree::new();
    let reconciler = Reconciler::default();
    let created = reconciler
        .reconcile_file(Some(&FileConfig::new(tree.path("x.txt"))), None)
        .unwrap();
    tree.remove("x.txt");

    let outcome = reconciler.reconcile_file(None, created.state).unwrap();

    assert_eq!(outcome.action, Action::NoOp);
    assert!(!outcome.state.map(|s| s.exists()).unwrap_or(false));
}

#[test]
fn test_repeated_reconcile_is_stable() {
    init_for_tests();
    let tree = TestTree::new();
    let reconciler = Reconciler::default();
    let config = FileConfig::new(tree.path("nested/deep/x.txt")).with_content(vec![0u8, 159, 146]);
    let mut state: Option<ResourceState> = None;

    let mut actions = Vec::new();
    for _ in 0..3 {
        let outcome = reconciler.reconcile_file(Some(&config), state).unwrap();
        actions.push(outcome.action);
        state = outcome.state;
    }

    assert_eq!(actions, vec![Action::Create, Action::NoOp, Action::NoOp]);
    assert_eq!(std::fs::read(tree.native("nested/deep/x.txt")).unwrap(), vec![0u8, 159, 146]);
}

#[cfg(unix)]
#[test]
fn test_external_chmod_is_reverted() {
    init_for_tests();
    let tree = TestTree::new();
    let reconciler = Reconciler::default();
    let config = FileConfig::new(tree.path("x.txt"))
        .with_content("hi")
        .with_permissions("0640");
    let created = reconciler.reconcile_file(Some(&config), None).unwrap();

    tree.chmod("x.txt", 0o666);
    let outcome = reconciler
        .reconcile_file(Some(&config), created.state)
        .unwrap();

    assert_eq!(outcome.action, Action::Update);
    assert_eq!(outcome.changes[0].field, "permissions");
    assert_eq!(outcome.changes[0].before, "0666");
    assert_eq!(tree.mode("x.txt"), 0o640);
}
