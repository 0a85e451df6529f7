use std::cmp::Ordering;
use std::path::{Component, Path};

/// Stable, `/`-separated rendering of a path with `.` components dropped.
#[must_use]
pub fn path_to_key(path: &Path) -> String {
    let mut segments = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::RootDir => segments.push(String::new()),
            other => segments.push(other.as_os_str().to_string_lossy().replace('\\', "/")),
        }
    }
    if segments.len() == 1 && segments[0].is_empty() {
        return "/".to_string();
    }
    segments.join("/")
}

#[must_use]
pub fn compare_paths(left: &Path, right: &Path) -> Ordering {
    path_to_key(left).cmp(&path_to_key(right))
}
