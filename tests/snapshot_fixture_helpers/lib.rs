use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapshotFixtureRunMode {
    Check,
    /// Rewrite expectation files in the source tree instead of comparing.
    Update,
}

#[must_use]
pub fn snapshot_fixture_run_mode_from_environment() -> SnapshotFixtureRunMode {
    if env::var_os("UPDATE_SNAPSHOTS").is_some() {
        SnapshotFixtureRunMode::Update
    } else {
        SnapshotFixtureRunMode::Check
    }
}

/// Collects, relative to `fixtures_root`, every directory below
/// `search_directory` that holds an `input/` directory. Case directories are
/// not searched further. The result is sorted.
pub fn collect_snapshot_fixture_case_paths(
    search_directory: &Path,
    fixtures_root: &Path,
    case_paths: &mut Vec<PathBuf>,
) {
    let mut entries: Vec<PathBuf> = fs::read_dir(search_directory)
        .unwrap_or_else(|error| panic!("failed to read {}: {error}", search_directory.display()))
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.is_dir())
        .collect();
    entries.sort();
    for path in entries {
        if path.join("input").is_dir() {
            let case_path = path.strip_prefix(fixtures_root).unwrap();
            case_paths.push(case_path.to_path_buf());
        } else {
            collect_snapshot_fixture_case_paths(&path, fixtures_root, case_paths);
        }
    }
}

/// Reads an expectation file, dropping its single trailing newline.
#[must_use]
pub fn read_snapshot_fixture_file(path: &Path, case_path: &Path) -> String {
    let raw_contents = fs::read_to_string(path).unwrap_or_else(|error| {
        panic!(
            "failed to read {} for case {}: {error}",
            path.display(),
            case_path.display(),
        )
    });
    if raw_contents.is_empty() {
        return String::new();
    }
    let contents = raw_contents.strip_suffix('\n').unwrap_or_else(|| {
        panic!(
            "{} must end with a trailing newline for case {}",
            path.display(),
            case_path.display()
        )
    });
    assert!(
        !contents.ends_with('\n'),
        "{} must end with exactly one trailing newline for case {}",
        path.display(),
        case_path.display()
    );
    contents.to_string()
}

/// Writes `content` plus a trailing newline when it differs from what is on
/// disk.
pub fn write_snapshot_fixture_file_if_changed(path: &Path, content: &str, case_path: &Path) {
    let canonical_content = if content.is_empty() {
        String::new()
    } else {
        format!("{content}\n")
    };
    let existing_contents = fs::read_to_string(path).unwrap_or_default();
    if existing_contents != canonical_content {
        fs::write(path, canonical_content).unwrap();
        println!("updated: {}", case_path.display());
    }
}

/// Joins stdout and stderr and strips the final newline.
#[must_use]
pub fn normalize_snapshot_fixture_process_output(stdout: &[u8], stderr: &[u8]) -> String {
    let mut combined = String::from_utf8_lossy(stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(stderr));
    combined
        .strip_suffix('\n')
        .unwrap_or(&combined)
        .to_string()
}
