use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use checker__source::{FileRole, path_to_key};
use checker__workspace::{DiscoveryOptions, Workspace, compile_exclusions, discover_workspace};

fn file_paths_by_directory(workspace: &Workspace) -> BTreeMap<String, Vec<String>> {
    workspace
        .directories()
        .iter()
        .map(|directory| {
            (
                path_to_key(&directory.directory),
                directory
                    .source_files
                    .iter()
                    .map(|file| path_to_key(&file.workspace_relative_path))
                    .collect(),
            )
        })
        .collect()
}

#[test]
fn groups_go_files_by_directory() {
    let workspace = TestWorkspace::new(&[
        "main.go",
        "provider/resource_a.go",
        "provider/resource_b.go",
        "provider/internal/helpers.go",
        "provider/README.md",
    ]);

    let discovered =
        discover_workspace(workspace.path(), &DiscoveryOptions::default()).unwrap();

    assert_eq!(
        file_paths_by_directory(&discovered),
        BTreeMap::from([
            (String::new(), vec!["main.go".to_string()]),
            (
                "provider".to_string(),
                vec![
                    "provider/resource_a.go".to_string(),
                    "provider/resource_b.go".to_string(),
                ]
            ),
            (
                "provider/internal".to_string(),
                vec!["provider/internal/helpers.go".to_string()]
            ),
        ])
    );
    assert_eq!(discovered.source_file_count(), 4);
}

#[test]
fn skips_directories_and_files_go_ignores() {
    let workspace = TestWorkspace::new(&[
        "pkg/lib.go",
        "pkg/.hidden.go",
        "pkg/_ignored.go",
        "pkg/testdata/fixture.go",
        "vendor/dep/dep.go",
        ".git/hooks.go",
        "_scratch/tmp.go",
    ]);

    let discovered =
        discover_workspace(workspace.path(), &DiscoveryOptions::default()).unwrap();

    assert_eq!(
        file_paths_by_directory(&discovered),
        BTreeMap::from([("pkg".to_string(), vec!["pkg/lib.go".to_string()])])
    );
}

#[test]
fn classifies_test_files_and_can_exclude_them() {
    let workspace = TestWorkspace::new(&["pkg/lib.go", "pkg/lib_test.go"]);

    let with_tests =
        discover_workspace(workspace.path(), &DiscoveryOptions::default()).unwrap();
    let role_by_path: BTreeMap<String, FileRole> = with_tests.directories()[0]
        .source_files
        .iter()
        .map(|file| (path_to_key(&file.workspace_relative_path), file.role))
        .collect();
    assert_eq!(role_by_path.get("pkg/lib.go"), Some(&FileRole::Library));
    assert_eq!(role_by_path.get("pkg/lib_test.go"), Some(&FileRole::Test));

    let without_tests = discover_workspace(
        workspace.path(),
        &DiscoveryOptions {
            include_tests: false,
            ..DiscoveryOptions::default()
        },
    )
    .unwrap();
    assert_eq!(
        file_paths_by_directory(&without_tests),
        BTreeMap::from([("pkg".to_string(), vec!["pkg/lib.go".to_string()])])
    );
}

#[test]
fn exclusion_globs_match_workspace_relative_paths() {
    let workspace = TestWorkspace::new(&[
        "keep/a.go",
        "generated/b.go",
        "generated/nested/c.go",
        "keep/zz_generated.go",
    ]);
    let exclusions =
        compile_exclusions(&["generated/**".to_string(), "**/zz_*.go".to_string()]).unwrap();

    let discovered = discover_workspace(
        workspace.path(),
        &DiscoveryOptions {
            include_tests: true,
            exclusions,
        },
    )
    .unwrap();

    assert_eq!(
        file_paths_by_directory(&discovered),
        BTreeMap::from([("keep".to_string(), vec!["keep/a.go".to_string()])])
    );
}

#[test]
fn rejects_invalid_exclusion_pattern() {
    assert!(compile_exclusions(&["a/[".to_string()]).is_err());
}

#[test]
fn single_file_target_is_its_own_workspace() {
    let workspace = TestWorkspace::new(&["pkg/lib.go", "pkg/other.go"]);
    let target = workspace.path().join("pkg/lib.go");

    let discovered = discover_workspace(&target, &DiscoveryOptions::default()).unwrap();

    assert_eq!(discovered.root_directory(), workspace.path().join("pkg"));
    assert_eq!(
        file_paths_by_directory(&discovered),
        BTreeMap::from([(String::new(), vec!["lib.go".to_string()])])
    );
}

#[test]
fn non_go_file_target_is_an_error() {
    let workspace = TestWorkspace::new(&["notes.txt"]);

    let errors = discover_workspace(
        &workspace.path().join("notes.txt"),
        &DiscoveryOptions::default(),
    )
    .unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "target is not a Go source file");
}

#[test]
fn missing_target_is_an_error() {
    let workspace = TestWorkspace::new(&[]);

    let errors = discover_workspace(
        &workspace.path().join("missing"),
        &DiscoveryOptions::default(),
    )
    .unwrap_err();

    assert!(errors[0].message.starts_with("failed to read target"));
}

#[test]
fn discovery_order_is_deterministic() {
    let workspace = TestWorkspace::new(&["zeta/c.go", "zeta/a.go", "alpha/b.go", "mid/x.go"]);

    let first = discover_workspace(workspace.path(), &DiscoveryOptions::default()).unwrap();
    let second = discover_workspace(workspace.path(), &DiscoveryOptions::default()).unwrap();

    let directories: Vec<String> = first
        .directories()
        .iter()
        .map(|directory| path_to_key(&directory.directory))
        .collect();
    assert_eq!(directories, vec!["alpha", "mid", "zeta"]);
    assert_eq!(first, second);
    assert!(first.directory_by_path("zeta").is_some());
    assert!(first.directory_by_path("omega").is_none());
}

static NEXT_WORKSPACE_INDEX: AtomicUsize = AtomicUsize::new(0);

struct TestWorkspace {
    root: PathBuf,
}

impl TestWorkspace {
    fn new(files: &[&str]) -> Self {
        let unique_suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after unix epoch")
            .as_nanos();
        let root = std::env::temp_dir().join(format!(
            "schemafield_workspace_test_{}_{}_{unique_suffix}",
            std::process::id(),
            NEXT_WORKSPACE_INDEX.fetch_add(1, Ordering::Relaxed)
        ));
        fs::create_dir_all(&root).expect("workspace root should be created");

        for relative_file in files {
            let path = root.join(relative_file);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("parent directory should be created");
            }
            fs::write(path, "package p\n").expect("test file should be written");
        }

        Self { root }
    }

    fn path(&self) -> &Path {
        &self.root
    }
}

impl Drop for TestWorkspace {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}
