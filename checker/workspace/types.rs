use std::path::{Path, PathBuf};

use checker__source::{SourceFile, path_to_key};
use globset::GlobSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DirectoryId(pub usize);

/// The Go files of one directory. A directory can hold more than one package
/// (`foo` and its external test package `foo_test`); those are told apart
/// only after parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscoveredDirectory {
    pub id: DirectoryId,
    /// Relative to the workspace root; empty for the root itself.
    pub directory: PathBuf,
    pub source_files: Vec<SourceFile>,
}

#[derive(Clone, Debug)]
pub struct DiscoveryOptions {
    pub include_tests: bool,
    /// Matched against `/`-separated workspace-relative file paths.
    pub exclusions: GlobSet,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            include_tests: true,
            exclusions: GlobSet::empty(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Workspace {
    root_directory: PathBuf,
    directories: Vec<DiscoveredDirectory>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscoveryError {
    pub message: String,
    /// The offending path as reachable from the current directory.
    pub path: Option<PathBuf>,
}

impl DiscoveryError {
    #[must_use]
    pub fn new(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self {
            message: message.into(),
            path,
        }
    }
}

impl Workspace {
    pub(crate) fn new(root_directory: PathBuf, directories: Vec<DiscoveredDirectory>) -> Self {
        Self {
            root_directory,
            directories,
        }
    }

    #[must_use]
    pub fn root_directory(&self) -> &Path {
        &self.root_directory
    }

    #[must_use]
    pub fn directories(&self) -> &[DiscoveredDirectory] {
        &self.directories
    }

    #[must_use]
    pub fn directory_by_path(&self, directory: &str) -> Option<&DiscoveredDirectory> {
        self.directories
            .iter()
            .find(|discovered| path_to_key(&discovered.directory) == directory)
    }

    #[must_use]
    pub fn source_file_count(&self) -> usize {
        self.directories
            .iter()
            .map(|directory| directory.source_files.len())
            .sum()
    }
}
