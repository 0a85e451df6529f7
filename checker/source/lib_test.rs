use std::cmp::Ordering;
use std::path::Path;

use checker__source::{FileRole, Span, compare_paths, path_to_key};

#[test]
fn classifies_go_files_by_suffix() {
    assert_eq!(
        FileRole::from_path(Path::new("internal/resource.go")),
        Some(FileRole::Library)
    );
    assert_eq!(
        FileRole::from_path(Path::new("internal/resource_test.go")),
        Some(FileRole::Test)
    );
    assert_eq!(FileRole::from_path(Path::new("README.md")), None);
    assert_eq!(FileRole::from_path(Path::new("go.mod")), None);
}

#[test]
fn ignores_hidden_and_underscore_files() {
    assert_eq!(FileRole::from_path(Path::new(".scratch.go")), None);
    assert_eq!(FileRole::from_path(Path::new("pkg/_generated.go")), None);
}

#[test]
fn path_keys_use_forward_slashes() {
    assert_eq!(path_to_key(Path::new("./pkg/b.go")), "pkg/b.go");
    assert_eq!(path_to_key(Path::new("pkg/./b.go")), "pkg/b.go");
    assert_eq!(path_to_key(Path::new(".")), "");
    assert_eq!(
        compare_paths(Path::new("a/b.go"), Path::new("a/c.go")),
        Ordering::Less
    );
}

#[test]
fn joined_span_keeps_start_position() {
    let start = Span {
        start: 10,
        end: 12,
        line: 2,
        column: 3,
    };
    let end = Span {
        start: 20,
        end: 25,
        line: 4,
        column: 1,
    };
    assert_eq!(
        start.to(&end),
        Span {
            start: 10,
            end: 25,
            line: 2,
            column: 3,
        }
    );
}
