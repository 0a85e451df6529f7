use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use checker__diagnostics::{Diagnostic, FileScopedDiagnostic};
use checker__field_references::{PackageFile, check_package};
use checker__go_parsing::parse_file;
use checker__reports::{
    CheckerFailure, CheckerFailureDetail, CheckerFailureKind, DiagnosticPhase, RenderedDiagnostic,
};
use checker__source::path_to_key;
use checker__workspace::{DiscoveryError, DiscoveryOptions, compile_exclusions, discover_workspace};
use tracing::{debug, info};

#[derive(Clone, Debug)]
pub struct CheckOptions {
    /// A directory to walk or a single `.go` file.
    pub target: PathBuf,
    pub include_tests: bool,
    pub exclude_patterns: Vec<String>,
}

#[derive(Debug)]
pub struct CheckedTarget {
    /// Sorted by path, line, column, then message.
    pub diagnostics: Vec<RenderedDiagnostic>,
    pub file_count: usize,
    pub analyzed_package_count: usize,
    /// Directories left out of analysis because a file in them failed to parse.
    pub skipped_directory_count: usize,
}

/// Key of one Go package: its directory and its package clause.
type PackageKey = (String, String);

pub fn check_target(options: &CheckOptions) -> Result<CheckedTarget, CheckerFailure> {
    let target = options.target.as_path();
    let metadata = fs::metadata(target).map_err(|error| {
        if error.kind() == ErrorKind::NotFound {
            failure(
                CheckerFailureKind::TargetNotFound,
                "check target not found",
                Some(target),
            )
        } else {
            failure(
                CheckerFailureKind::ReadSource,
                format!("failed to read check target: {error}"),
                Some(target),
            )
        }
    })?;
    if !metadata.is_file() && !metadata.is_dir() {
        return Err(failure(
            CheckerFailureKind::InvalidCheckTarget,
            "check target must be a directory or a .go file",
            Some(target),
        ));
    }

    let exclusions = compile_exclusions(&options.exclude_patterns).map_err(|error| {
        failure(
            CheckerFailureKind::InvalidExcludePattern,
            format!("invalid exclude pattern: {error}"),
            None,
        )
    })?;
    let discovery_options = DiscoveryOptions {
        include_tests: options.include_tests,
        exclusions,
    };
    let workspace = discover_workspace(target, &discovery_options)
        .map_err(discovery_failure)?;
    let root_directory = workspace.root_directory();
    debug!(
        directories = workspace.directories().len(),
        files = workspace.source_file_count(),
        "discovered workspace"
    );

    let mut rendered_diagnostics = Vec::new();
    let mut sources: BTreeMap<PathBuf, String> = BTreeMap::new();
    let mut files_by_package: BTreeMap<PackageKey, Vec<PackageFile>> = BTreeMap::new();
    let mut failed_directories = BTreeSet::new();
    for directory in workspace.directories() {
        let directory_key = path_to_key(&directory.directory);
        for source_file in &directory.source_files {
            let relative_path = &source_file.workspace_relative_path;
            let absolute_path = root_directory.join(relative_path);
            let source = fs::read_to_string(&absolute_path).map_err(|error| {
                failure(
                    CheckerFailureKind::ReadSource,
                    format!("failed to read source file: {error}"),
                    Some(absolute_path.as_path()),
                )
            })?;
            match parse_file(&source) {
                Ok(parsed) => {
                    debug!(path = %path_to_key(relative_path), "parsed file");
                    files_by_package
                        .entry((directory_key.clone(), parsed.package_name.name.clone()))
                        .or_default()
                        .push(PackageFile {
                            path: relative_path.clone(),
                            parsed,
                        });
                }
                Err(diagnostics) => {
                    debug!(
                        path = %path_to_key(relative_path),
                        diagnostics = diagnostics.len(),
                        "file failed to parse"
                    );
                    failed_directories.insert(directory_key.clone());
                    rendered_diagnostics.extend(diagnostics.into_iter().map(|diagnostic| {
                        render_diagnostic(
                            root_directory,
                            relative_path,
                            &source,
                            DiagnosticPhase::Parsing,
                            diagnostic,
                        )
                    }));
                }
            }
            sources.insert(relative_path.clone(), source);
        }
    }

    let mut analyzed_package_count = 0;
    for ((directory_key, package_name), files) in &files_by_package {
        if failed_directories.contains(directory_key) {
            debug!(
                directory = %directory_key,
                package = %package_name,
                "skipping package with unparsable files"
            );
            continue;
        }
        let diagnostics = check_package(files);
        debug!(
            directory = %directory_key,
            package = %package_name,
            files = files.len(),
            diagnostics = diagnostics.len(),
            "checked field references"
        );
        analyzed_package_count += 1;
        for FileScopedDiagnostic { path, diagnostic } in diagnostics {
            let source = sources.get(&path).map_or("", String::as_str);
            rendered_diagnostics.push(render_diagnostic(
                root_directory,
                &path,
                source,
                DiagnosticPhase::FieldReferences,
                diagnostic,
            ));
        }
    }

    rendered_diagnostics.sort_by(|left, right| {
        left.path
            .cmp(&right.path)
            .then(left.span.line.cmp(&right.span.line))
            .then(left.span.column.cmp(&right.span.column))
            .then(left.message.cmp(&right.message))
    });

    let checked = CheckedTarget {
        diagnostics: rendered_diagnostics,
        file_count: workspace.source_file_count(),
        analyzed_package_count,
        skipped_directory_count: failed_directories.len(),
    };
    info!(
        files = checked.file_count,
        packages = checked.analyzed_package_count,
        skipped_directories = checked.skipped_directory_count,
        diagnostics = checked.diagnostics.len(),
        "check finished"
    );
    Ok(checked)
}

fn failure(
    kind: CheckerFailureKind,
    message: impl Into<String>,
    path: Option<&Path>,
) -> CheckerFailure {
    CheckerFailure {
        kind,
        message: message.into(),
        path: path.map(display_path),
        details: Vec::new(),
    }
}

fn discovery_failure(errors: Vec<DiscoveryError>) -> CheckerFailure {
    let details = errors
        .into_iter()
        .map(|error| CheckerFailureDetail {
            message: error.message,
            path: error.path.as_deref().map(display_path),
        })
        .collect();
    CheckerFailure {
        details,
        ..failure(
            CheckerFailureKind::WorkspaceDiscoveryFailed,
            "workspace discovery failed",
            None,
        )
    }
}

fn render_diagnostic(
    display_base: &Path,
    path: &Path,
    source: &str,
    phase: DiagnosticPhase,
    diagnostic: Diagnostic,
) -> RenderedDiagnostic {
    let source_line = source
        .lines()
        .nth(diagnostic.span.line.saturating_sub(1))
        .unwrap_or("")
        .to_string();
    RenderedDiagnostic {
        phase,
        path: display_path(&display_base.join(path)),
        message: diagnostic.message,
        span: diagnostic.span,
        source_line,
    }
}

/// Relative to the current directory when the path lies beneath it.
fn display_path(path: &Path) -> String {
    let current_directory = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let absolute_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        current_directory.join(path)
    };

    if let Ok(relative_path) = absolute_path.strip_prefix(&current_directory) {
        return path_to_key(relative_path);
    }
    path_to_key(&absolute_path)
}
