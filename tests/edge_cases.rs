//! Edge case tests for listings and walks


use std::os::unix::fs::symlink;

use harness::{TestTree, run_sortedwalk};
use sortedwalk::{
    EntryKind, Error, PathOrdering, Relation, Relatives, SortKey, SortedWalker, WalkerConfig,
};

// ============================================================================
// Symlinks
// ============================================================================

#[test]
fn test_dangling_symlink_is_not_listed() {
    let tree = TestTree::new();
    tree.add_file("real.txt", "");
    symlink(tree.path().join("missing"), tree.path().join("dangling")).unwrap();

    let mut walker = SortedWalker::new(tree.path(), PathOrdering::default()).unwrap();
    let level = walker.advance().unwrap().unwrap();
    assert!(level.dirs.is_empty());
    assert_eq!(level.files, vec![tree.path().join("real.txt")]);
}

#[test]
fn test_symlinks_classified_by_target() {
    let tree = TestTree::new();
    tree.add_file("target.rs", "");
    tree.add_dir("realdir");
    symlink(tree.path().join("target.rs"), tree.path().join("link.rs")).unwrap();
    symlink(tree.path().join("realdir"), tree.path().join("linkdir")).unwrap();

    let relatives = Relatives::new(tree.path(), PathOrdering::default()).unwrap();
    let dirs = relatives
        .siblings(&tree.path().join("realdir"), Relation::All, EntryKind::Directory)
        .unwrap();
    assert_eq!(dirs, vec![tree.path().join("linkdir")]);

    let files = relatives
        .siblings(&tree.path().join("target.rs"), Relation::Younger, EntryKind::File)
        .unwrap();
    assert_eq!(files, vec![tree.path().join("link.rs")]);
}

// ============================================================================
// Filtering
// ============================================================================

#[test]
fn test_ignored_entries_skipped_by_walk_and_queries() {
    let tree = TestTree::new();
    tree.add_dir("a");
    tree.add_dir("node_modules/pkg");
    tree.add_dir("z");
    let config = WalkerConfig {
        ignore_patterns: vec!["node_*".to_string()],
        ..Default::default()
    };

    let walker =
        SortedWalker::with_config(tree.path(), PathOrdering::default(), config.clone()).unwrap();
    let visited: Vec<_> = walker.map(|l| l.unwrap().dir).collect();
    assert_eq!(
        visited,
        vec![tree.path().to_path_buf(), tree.path().join("a"), tree.path().join("z")]
    );

    let relatives = Relatives::with_config(tree.path(), PathOrdering::default(), &config).unwrap();
    let older = relatives
        .siblings(&tree.path().join("a"), Relation::Older, EntryKind::Directory)
        .unwrap();
    assert_eq!(older, vec![tree.path().join("z")]);

    let err = relatives
        .siblings(&tree.path().join("node_modules"), Relation::All, EntryKind::Directory)
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}

#[test]
fn test_hidden_entries() {
    let tree = TestTree::new();
    tree.add_dir(".git/objects");
    tree.add_file(".env", "");
    tree.add_file("visible.txt", "");

    let (stdout, _stderr, success) = run_sortedwalk(tree.path(), &["walk", "--no-hidden"]);
    assert!(success);
    assert!(!stdout.contains(".git"), "hidden dir shown: {}", stdout);
    assert!(!stdout.contains(".env"), "hidden file shown: {}", stdout);
    assert!(stdout.contains("visible.txt"));

    let (stdout, _stderr, success) = run_sortedwalk(tree.path(), &["walk"]);
    assert!(success);
    assert!(stdout.contains(".git/"));
    assert!(stdout.contains("objects/"));
}

// ============================================================================
// Names and ordering
// ============================================================================

#[test]
fn test_names_with_spaces_and_unicode() {
    let tree = TestTree::new();
    for name in ["été", "with space", "Zeta"] {
        tree.add_dir(name);
    }
    let relatives = Relatives::new(tree.path(), PathOrdering::default()).unwrap();
    let all = relatives
        .siblings(&tree.path().join("with space"), Relation::All, EntryKind::Directory)
        .unwrap();
    assert_eq!(all, vec![tree.path().join("Zeta"), tree.path().join("été")]);
}

#[test]
fn test_backslash_in_names_is_not_a_separator() {
    let tree = TestTree::new();
    tree.add_dir("a");
    tree.add_dir("b\\c/child");
    tree.add_dir("d/cousin");
    tree.add_file("x\\y", "");
    tree.add_file("z", "");
    let relatives = Relatives::new(tree.path(), PathOrdering::default()).unwrap();

    let all = relatives
        .siblings(&tree.path().join("a"), Relation::All, EntryKind::Directory)
        .unwrap();
    assert_eq!(all, vec![tree.path().join("b\\c"), tree.path().join("d")]);

    let files = relatives
        .siblings(&tree.path().join("x\\y"), Relation::Older, EntryKind::File)
        .unwrap();
    assert_eq!(files, vec![tree.path().join("z")]);

    let cousins = relatives
        .cousins_flat(&tree.path().join("b\\c/child"), Relation::All, EntryKind::Directory)
        .unwrap();
    assert_eq!(cousins, vec![tree.path().join("d/cousin")]);
}

#[test]
fn test_dot_names_are_not_confused_with_current_dir() {
    let tree = TestTree::new();
    tree.add_dir("..hidden");
    tree.add_dir("a");
    let relatives = Relatives::new(tree.path(), PathOrdering::default()).unwrap();
    let younger = relatives
        .siblings(&tree.path().join("a"), Relation::Younger, EntryKind::Directory)
        .unwrap();
    assert_eq!(younger, vec![tree.path().join("..hidden")]);
    assert_eq!(
        relatives.parent(&tree.path().join("..hidden")).unwrap(),
        relatives.root()
    );
}

#[test]
fn test_custom_comparator() {
    let tree = TestTree::new();
    for name in ["ccc", "a", "bb"] {
        tree.add_dir(name);
    }
    let by_length = SortKey::custom(|a, b| {
        let len = |p: &std::path::Path| p.file_name().map_or(0, |n| n.len());
        len(a).cmp(&len(b))
    });
    let mut walker = SortedWalker::new(tree.path(), PathOrdering::new(by_length)).unwrap();
    let level = walker.advance().unwrap().unwrap();
    assert_eq!(
        level.dirs,
        vec![tree.path().join("a"), tree.path().join("bb"), tree.path().join("ccc")]
    );
}

#[test]
fn test_relative_path_queries() {
    let tree = TestTree::new();
    tree.add_dir("x/one");
    tree.add_dir("x/two");
    let relatives = Relatives::new(tree.path(), PathOrdering::default()).unwrap();
    let older = relatives
        .siblings(&tree.path().join("x/./one/../one"), Relation::Older, EntryKind::Directory)
        .unwrap();
    assert_eq!(older, vec![tree.path().join("x/two")]);
}
