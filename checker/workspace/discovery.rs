use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use checker__source::{FileId, FileRole, SourceFile, compare_paths, path_to_key};
use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::types::{DirectoryId, DiscoveredDirectory, DiscoveryError, DiscoveryOptions, Workspace};

/// Directory names the Go tool never treats as part of a package tree.
const SKIPPED_DIRECTORY_NAMES: [&str; 2] = ["testdata", "vendor"];

pub fn compile_exclusions(patterns: &[String]) -> Result<GlobSet, globset::Error> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    builder.build()
}

/// Finds the Go files under `target`, grouped by directory.
///
/// A file target yields a workspace rooted at its parent holding just that
/// file; test and exclusion filters do not apply to an explicitly named file.
pub fn discover_workspace(
    target: &Path,
    options: &DiscoveryOptions,
) -> Result<Workspace, Vec<DiscoveryError>> {
    let metadata = fs::metadata(target).map_err(|error| {
        vec![DiscoveryError::new(
            format!("failed to read target: {error}"),
            Some(target.to_path_buf()),
        )]
    })?;
    if metadata.is_file() {
        return discover_single_file(target).map_err(|error| vec![error]);
    }

    let mut source_paths = Vec::new();
    let mut errors = Vec::new();
    collect_source_paths(
        target,
        Path::new(""),
        options,
        &mut source_paths,
        &mut errors,
    );
    if !errors.is_empty() {
        return Err(errors);
    }

    type DirectoryEntries = (PathBuf, Vec<(PathBuf, FileRole)>);
    let mut source_paths_by_directory: BTreeMap<String, DirectoryEntries> = BTreeMap::new();
    for (source_path, role) in source_paths {
        let directory = source_path.parent().unwrap_or(Path::new("")).to_path_buf();
        source_paths_by_directory
            .entry(path_to_key(&directory))
            .or_insert_with(|| (directory, Vec::new()))
            .1
            .push((source_path, role));
    }

    let mut file_id_counter = 0usize;
    let mut directories = Vec::new();
    for (directory_index, (directory, mut paths)) in
        source_paths_by_directory.into_values().enumerate()
    {
        paths.sort_by(|left, right| compare_paths(&left.0, &right.0));
        let mut source_files = Vec::new();
        for (path, role) in paths {
            source_files.push(SourceFile {
                id: FileId(file_id_counter),
                workspace_relative_path: path,
                role,
            });
            file_id_counter += 1;
        }
        directories.push(DiscoveredDirectory {
            id: DirectoryId(directory_index),
            directory,
            source_files,
        });
    }

    Ok(Workspace::new(target.to_path_buf(), directories))
}

fn discover_single_file(target: &Path) -> Result<Workspace, DiscoveryError> {
    let file_name = target.file_name().map(PathBuf::from).ok_or_else(|| {
        DiscoveryError::new("target has no file name", Some(target.to_path_buf()))
    })?;
    let Some(role) = FileRole::from_path(&file_name) else {
        return Err(DiscoveryError::new(
            "target is not a Go source file",
            Some(target.to_path_buf()),
        ));
    };
    let root_directory = target.parent().unwrap_or(Path::new("")).to_path_buf();
    Ok(Workspace::new(
        root_directory,
        vec![DiscoveredDirectory {
            id: DirectoryId(0),
            directory: PathBuf::new(),
            source_files: vec![SourceFile {
                id: FileId(0),
                workspace_relative_path: file_name,
                role,
            }],
        }],
    ))
}

/// An unreadable directory is recorded and the walk carries on with its
/// siblings, so one run reports every unreadable directory.
fn collect_source_paths(
    workspace_root: &Path,
    relative_directory: &Path,
    options: &DiscoveryOptions,
    source_paths: &mut Vec<(PathBuf, FileRole)>,
    errors: &mut Vec<DiscoveryError>,
) {
    let absolute_directory = workspace_root.join(relative_directory);
    let mut entries = match fs::read_dir(&absolute_directory)
        .and_then(|entries| entries.collect::<Result<Vec<_>, _>>())
    {
        Ok(entries) => entries,
        Err(error) => {
            errors.push(DiscoveryError::new(
                format!("failed to read directory: {error}"),
                Some(absolute_directory),
            ));
            return;
        }
    };
    entries.sort_by(|left, right| compare_paths(&left.path(), &right.path()));

    for entry in entries {
        let file_name = entry.file_name();
        let child_relative_path = relative_directory.join(&file_name);
        let file_type = match entry.file_type() {
            Ok(file_type) if file_type.is_symlink() => match fs::metadata(entry.path()) {
                Ok(metadata) => metadata.file_type(),
                // Dangling symlink.
                Err(error) if error.kind() == ErrorKind::NotFound => continue,
                Err(error) => {
                    errors.push(DiscoveryError::new(
                        format!("failed to read symlink target: {error}"),
                        Some(workspace_root.join(&child_relative_path)),
                    ));
                    continue;
                }
            },
            Ok(file_type) => file_type,
            Err(error) => {
                errors.push(DiscoveryError::new(
                    format!("failed to read file type: {error}"),
                    Some(workspace_root.join(&child_relative_path)),
                ));
                continue;
            }
        };

        if file_type.is_dir() {
            if !is_skipped_directory(&file_name.to_string_lossy()) {
                collect_source_paths(
                    workspace_root,
                    &child_relative_path,
                    options,
                    source_paths,
                    errors,
                );
            }
            continue;
        }
        if !file_type.is_file() {
            continue;
        }

        let Some(role) = FileRole::from_path(&child_relative_path) else {
            continue;
        };
        if role == FileRole::Test && !options.include_tests {
            continue;
        }
        if options
            .exclusions
            .is_match(path_to_key(&child_relative_path))
        {
            continue;
        }
        source_paths.push((child_relative_path, role));
    }
}

fn is_skipped_directory(name: &str) -> bool {
    name.starts_with('.') || name.starts_with('_') || SKIPPED_DIRECTORY_NAMES.contains(&name)
}
