//! Tree builder integration tests.
//!
//! Asserts completeness (every on-disk name appears exactly once),
//! structural recursion (children mirror disk at every level), and the
//! fail-fast contract (no partial tree on a read failure).

use std::fs;
use tempfile::TempDir;

use yearshelf::models::DirectoryEntry;
use yearshelf::tree::build_tree;

fn find<'a>(entries: &'a [DirectoryEntry], name: &str) -> Option<&'a DirectoryEntry> {
    entries.iter().find(|e| e.name() == name)
}

/// Flatten a tree into `(depth, name)` pairs for completeness checks.
fn collect_names(entries: &[DirectoryEntry], depth: usize, out: &mut Vec<(usize, String)>) {
    for entry in entries {
        out.push((depth, entry.name().to_string()));
        if let DirectoryEntry::Folder { children, .. } = entry {
            collect_names(children, depth + 1, out);
        }
    }
}

#[tokio::test]
async fn builds_nested_tree_completely() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("2023");
    fs::create_dir_all(root.join("EventA/Sub")).unwrap();
    fs::write(root.join("EventA/file1.jpg"), b"jpeg").unwrap();
    fs::write(root.join("EventA/Sub/file2.jpg"), b"jpeg").unwrap();
    fs::create_dir(root.join("EventB")).unwrap();
    fs::write(root.join("notes.txt"), b"notes").unwrap();

    let entries = build_tree(root).await.unwrap();

    let mut names = Vec::new();
    collect_names(&entries, 0, &mut names);
    names.sort();
    assert_eq!(
        names,
        vec![
            (0, "EventA".to_string()),
            (0, "EventB".to_string()),
            (0, "notes.txt".to_string()),
            (1, "Sub".to_string()),
            (1, "file1.jpg".to_string()),
            (2, "file2.jpg".to_string()),
        ],
        "every on-disk entry must appear exactly once at its depth"
    );
}

#[tokio::test]
async fn children_mirror_disk_at_every_level() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();
    fs::create_dir_all(root.join("a/b/c")).unwrap();
    fs::write(root.join("a/one.jpg"), b"1").unwrap();
    fs::write(root.join("a/b/two.jpg"), b"2").unwrap();

    let entries = build_tree(root).await.unwrap();

    let a = find(&entries, "a").expect("top-level folder 'a'");
    let DirectoryEntry::Folder { children: a_kids, .. } = a else {
        panic!("'a' should be a folder");
    };
    assert_eq!(a_kids.len(), 2, "'a' has exactly its two on-disk children");
    assert!(matches!(
        find(a_kids, "one.jpg"),
        Some(DirectoryEntry::File { .. })
    ));

    let b = find(a_kids, "b").expect("nested folder 'b'");
    let DirectoryEntry::Folder { children: b_kids, .. } = b else {
        panic!("'b' should be a folder");
    };
    assert_eq!(b_kids.len(), 2);
    assert!(matches!(
        find(b_kids, "c"),
        Some(DirectoryEntry::Folder { .. })
    ));
}

#[tokio::test]
async fn empty_directory_yields_empty_tree() {
    let tmp = TempDir::new().unwrap();
    let entries = build_tree(tmp.path().to_path_buf()).await.unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn deep_nesting_resolves_fully() {
    let tmp = TempDir::new().unwrap();
    let mut dir = tmp.path().to_path_buf();
    for i in 0..20 {
        dir = dir.join(format!("level{}", i));
    }
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("leaf.jpg"), b"leaf").unwrap();

    let mut entries = build_tree(tmp.path().to_path_buf()).await.unwrap();
    for i in 0..20 {
        assert_eq!(entries.len(), 1);
        let DirectoryEntry::Folder { name, children } = entries.remove(0) else {
            panic!("expected folder at level {}", i);
        };
        assert_eq!(name, format!("level{}", i));
        entries = children;
    }
    assert_eq!(entries, vec![DirectoryEntry::File { name: "leaf.jpg".to_string() }]);
}

#[tokio::test]
async fn wide_fanout_keeps_every_sibling() {
    let tmp = TempDir::new().unwrap();
    for i in 0..50 {
        let dir = tmp.path().join(format!("dir{:02}", i));
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("photo.jpg"), b"p").unwrap();
    }

    let entries = build_tree(tmp.path().to_path_buf()).await.unwrap();
    assert_eq!(entries.len(), 50, "concurrent expansion must not drop siblings");
    for entry in &entries {
        let DirectoryEntry::Folder { children, .. } = entry else {
            panic!("every top-level entry is a folder");
        };
        assert_eq!(children.len(), 1);
    }
}

#[tokio::test]
async fn fails_when_root_is_not_a_directory() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("not-a-dir.jpg");
    fs::write(&file, b"jpeg").unwrap();

    let err = build_tree(file).await.unwrap_err();
    assert!(
        err.to_string().contains("Failed to read directory"),
        "expected a read failure, got: {}",
        err
    );
}

#[tokio::test]
async fn fails_when_root_is_missing() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("gone");

    assert!(build_tree(missing).await.is_err());
}
