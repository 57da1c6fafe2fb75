//! Integration tests for the walker and relationship queries


use std::collections::HashSet;
use std::path::{Path, PathBuf};

use harness::{TestTree, abcd_tree, family_tree};
use sortedwalk::{
    EntryKind, Error, Level, PathOrdering, Relation, Relatives, SortKey, SortedWalker,
    common_parent,
};

fn walk(root: &Path) -> Vec<Level> {
    SortedWalker::new(root, PathOrdering::default())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap()
}

#[test]
fn test_abcd_example() {
    let tree = abcd_tree();
    let root = tree.path();
    let b = root.join("b");
    let c = root.join("c");
    let d = root.join("d");

    let mut walker = SortedWalker::new(root, PathOrdering::default()).unwrap();
    let first = walker.next().unwrap().unwrap();
    assert_eq!(
        first.into_parts(),
        (root.to_path_buf(), vec![b.clone(), c.clone(), d.clone()], vec![])
    );

    let relatives = walker.relatives();
    let all = relatives.siblings(&c, Relation::All, EntryKind::Directory).unwrap();
    assert_eq!(all, vec![b.clone(), d.clone()]);
    let younger = relatives.siblings(&c, Relation::Younger, EntryKind::Directory).unwrap();
    assert_eq!(younger, vec![b]);
    let older = relatives.siblings(&c, Relation::Older, EntryKind::Directory).unwrap();
    assert_eq!(older, vec![d]);

    assert!(matches!(relatives.parent(root), Err(Error::Boundary { .. })));
}

#[test]
fn test_every_directory_emitted_once_in_depth_order() {
    let tree = family_tree();
    let levels = walk(tree.path());

    let mut seen = HashSet::new();
    for level in &levels {
        assert!(seen.insert(level.dir.clone()), "{} emitted twice", level.dir.display());
    }

    let expected: HashSet<PathBuf> = [
        "", "src", "src/tree", "src/output", "tests", "tests/fixtures",
        "tests/fixtures/one", "tests/fixtures/two", "docs", "docs/guide",
    ]
    .iter()
    .map(|p| if p.is_empty() { tree.path().to_path_buf() } else { tree.path().join(p) })
    .collect();
    assert_eq!(seen, expected);

    let depth = |p: &Path| p.strip_prefix(tree.path()).unwrap().components().count();
    for pair in levels.windows(2) {
        assert!(depth(&pair[0].dir) <= depth(&pair[1].dir));
        assert_eq!(pair[0].depth, depth(&pair[0].dir));
    }
}

#[test]
fn test_children_listed_in_walk_match_sibling_sets() {
    let tree = family_tree();
    let relatives = Relatives::new(tree.path(), PathOrdering::default()).unwrap();

    for level in walk(tree.path()) {
        for (kind, set) in [(EntryKind::Directory, &level.dirs), (EntryKind::File, &level.files)] {
            for (i, x) in set.iter().enumerate() {
                let mut rebuilt = relatives.siblings(x, Relation::Younger, kind).unwrap();
                rebuilt.push(x.clone());
                rebuilt.extend(relatives.siblings(x, Relation::Older, kind).unwrap());
                assert_eq!(&rebuilt, set);

                let all = relatives.siblings(x, Relation::All, kind).unwrap();
                assert_eq!(all.len(), set.len() - 1);
                assert!(!all.contains(x));
                assert_eq!(relatives.parent(x).unwrap(), level.dir, "parent of entry {}", i);
            }
        }
    }
}

#[test]
fn test_parent_matches_filesystem_parent() {
    let tree = family_tree();
    let relatives = Relatives::new(tree.path(), PathOrdering::default()).unwrap();
    for level in walk(tree.path()).into_iter().skip(1) {
        assert_eq!(
            relatives.parent(&level.dir).unwrap(),
            level.dir.parent().unwrap()
        );
    }
}

#[test]
fn test_parent_outside_root_fails() {
    let tree = family_tree();
    let relatives = Relatives::new(tree.path().join("src"), PathOrdering::default()).unwrap();
    assert!(matches!(
        relatives.parent(&tree.path().join("docs/guide")),
        Err(Error::Boundary { .. })
    ));
    assert!(matches!(
        relatives.parent(&tree.path().join("src/../docs")),
        Err(Error::Boundary { .. })
    ));
}

#[test]
fn test_cousin_files() {
    let tree = family_tree();
    let relatives = Relatives::new(tree.path(), PathOrdering::default()).unwrap();
    let target = tree.path().join("src/tree/walker.rs");

    // uncles of walker.rs are src/output (younger) and nothing older
    let cousins = relatives.cousins(&target, Relation::All, EntryKind::File).unwrap();
    assert_eq!(cousins, vec![vec![tree.path().join("src/output/json.rs")]]);

    let older = relatives.cousins_flat(&target, Relation::Older, EntryKind::File).unwrap();
    assert!(older.is_empty());
}

#[test]
fn test_reversed_ordering_flips_relations() {
    let tree = abcd_tree();
    let ordering = PathOrdering::new(SortKey::Name.reversed());
    let relatives = Relatives::new(tree.path(), ordering).unwrap();
    let c = tree.path().join("c");
    assert_eq!(
        relatives.siblings(&c, Relation::Younger, EntryKind::Directory).unwrap(),
        vec![tree.path().join("d")]
    );
    assert_eq!(
        relatives.siblings(&c, Relation::Older, EntryKind::Directory).unwrap(),
        vec![tree.path().join("b")]
    );
}

#[test]
fn test_queries_reread_the_filesystem() {
    let tree = abcd_tree();
    let relatives = Relatives::new(tree.path(), PathOrdering::default()).unwrap();
    let c = tree.path().join("c");
    tree.add_dir("e");
    let older = relatives.siblings(&c, Relation::Older, EntryKind::Directory).unwrap();
    assert_eq!(older, vec![tree.path().join("d"), tree.path().join("e")]);
}

#[test]
fn test_common_parent_of_walked_paths_is_ancestor() {
    let tree = family_tree();
    let levels = walk(tree.path());
    let files: Vec<String> = levels
        .iter()
        .flat_map(|l| l.files.iter())
        .filter(|f| f.starts_with(tree.path().join("src")))
        .map(|f| f.to_string_lossy().to_string())
        .collect();
    assert!(files.len() > 2);

    let common = common_parent(&files).unwrap();
    assert_eq!(PathBuf::from(&common), tree.path().join("src"));
    for f in &files {
        assert!(Path::new(f).starts_with(&common));
    }
}

#[test]
fn test_walk_with_empty_tree() {
    let tree = TestTree::new();
    let levels = walk(tree.path());
    assert_eq!(levels.len(), 1);
    assert!(levels[0].dirs.is_empty());
    assert!(levels[0].files.is_empty());
}
