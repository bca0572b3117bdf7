//! End-to-end lifecycle of declared files and directories
//!
//! Exercises create, read, update and delete against a real temp directory,
//! then checks the recorded state survives a JSON round trip between runs.

use pretty_assertions::assert_eq;
use reconcile_core::{
    Action, DirectoryConfig, DirectoryResource, ErrorKind, FileConfig, FileResource, Reconciler,
    Resource, ResourceState, identify,
};
use reconcile_fs::parse_permissions;
use reconcile_core::logging::init_for_tests;
use reconcile_test_utils::TestTree;

#[test]
fn test_create_file_with_default_permissions() {
    init_for_tests();
    let tree = TestTree::new();
    let files = FileResource::default();

    let created = files
        .create(&FileConfig::new(tree.path("x.txt")).with_content("hi"))
        .unwrap();
    let read = files.read(created).unwrap();

    assert_eq!(read.content_str().as_deref(), Some("hi"));
    assert_eq!(read.id, Some(identify(&tree.path("x.txt"))));
    #[cfg(unix)]
    assert_eq!(read.permissions_string().as_deref(), Some("0644"));
}

#[test]
fn test_update_content_keeps_permissions() {
    init_for_tests();
    let tree = TestTree::new();
    let files = FileResource::default();
    let config = FileConfig::new(tree.path("x.txt")).with_content("hi");
    let created = files.create(&config).unwrap();
    let before = created.permissions;

    let updated = files
        .update(&config.with_content("bye"), created)
        .unwrap();
    let read = files.read(updated).unwrap();

    assert_eq!(read.content_str().as_deref(), Some("bye"));
    assert_eq!(read.permissions, before);
}

#[test]
fn test_invalid_permission_string() {
    init_for_tests();
    let err = parse_permissions("9").unwrap_err();
    assert!(matches!(
        err,
        reconcile_fs::Error::InvalidPermissionFormat { .. }
    ));

    let err = DirectoryResource::new()
        .create(&DirectoryConfig::new("/tmp/never-created").with_permissions("9"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidPermissionFormat);
}

#[test]
fn test_directory_over_existing_file_is_type_mismatch() {
    init_for_tests();
    let tree = TestTree::new();
    tree.write("d", "plain file");
    let dirs = DirectoryResource::new();

    let err = dirs
        .create(&DirectoryConfig::new(tree.path("d")))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);

    let err = dirs
        .read(ResourceState {
            id: Some(identify(&tree.path("d"))),
            ..ResourceState::directory(tree.path("d"))
        })
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    tree.assert_file_contains("d", "plain file");
}

#[test]
fn test_file_inside_managed_directory() {
    init_for_tests();
    let tree = TestTree::new();
    let reconciler = Reconciler::default();

    let dir = reconciler
        .reconcile_directory(Some(&DirectoryConfig::new(tree.path("conf"))), None)
        .unwrap();
    let file = reconciler
        .reconcile_file(
            Some(&FileConfig::new(tree.path("conf/app.toml")).with_content("debug = true\n")),
            None,
        )
        .unwrap();
    assert_eq!(dir.action, Action::Create);
    assert_eq!(file.action, Action::Create);

    // Tear down in reverse order
    let file = reconciler.reconcile_file(None, file.state).unwrap();
    let dir = reconciler.reconcile_directory(None, dir.state).unwrap();
    assert_eq!(file.action, Action::Delete);
    assert_eq!(dir.action, Action::Delete);
    tree.assert_not_exists("conf");
}

#[test]
fn test_state_survives_json_round_trip() {
    init_for_tests();
    let tree = TestTree::new();
    let reconciler = Reconciler::default();
    let config = FileConfig::new(tree.path("x.txt"))
        .with_content("hi")
        .with_permissions("0600");

    let first = reconciler.reconcile_file(Some(&config), None).unwrap();
    let saved = serde_json::to_string(&first.state).unwrap();
    let restored: Option<ResourceState> = serde_json::from_str(&saved).unwrap();

    let second = reconciler.reconcile_file(Some(&config), restored).unwrap();
    assert_eq!(second.action, Action::NoOp);
    assert_eq!(second.state, first.state);
}

#[cfg(unix)]
#[test]
fn test_directory_permissions_bypass_umask() {
    init_for_tests();
    let tree = TestTree::new();
    let dirs = DirectoryResource::new();

    let created = dirs
        .create(&DirectoryConfig::new(tree.path("d")).with_permissions("0700"))
        .unwrap();
    let read = dirs.read(created).unwrap();

    assert_eq!(read.permissions_string().as_deref(), Some("0700"));
    assert_eq!(tree.mode("d"), 0o700);

    // Group-writable survives the usual 022 umask too
    let created = dirs
        .create(&DirectoryConfig::new(tree.path("shared")).with_permissions("0775"))
        .unwrap();
    assert_eq!(created.permissions_string().as_deref(), Some("0775"));
}
