//! Cross-checks field paths passed to schema accessors against the field
//! names a package declares.
//!
//! Declarations are string keys of composite literal elements
//! (`"name": {...}`) and string indices of assignment targets
//! (`s["name"] = ...`). References are string literal arguments of calls to
//! [`ACCESSOR_NAMES`], split on `.`. Every reference component that is not a
//! list index, not `#`, and not declared anywhere in the package is reported
//! at each place it occurs.

mod declarations;
mod references;

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use checker__diagnostics::FileScopedDiagnostic;
use checker__go_syntax::{Node, ParsedFile, inspect};
use checker__source::Span;

pub use declarations::{composite_literal_key, indexed_assignment_key};
pub use references::{
    ACCESSOR_NAMES, MULTI_ARGUMENT_ACCESSOR, accessor_arguments, argument_components,
    invoked_name, is_index_or_count_marker,
};

/// A parsed file of the package under analysis.
pub struct PackageFile {
    /// Workspace-relative path, used to attribute diagnostics.
    pub path: PathBuf,
    pub parsed: ParsedFile,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceOccurrence {
    pub path: PathBuf,
    /// Span of the whole string literal, shared by all of its components.
    pub span: Span,
}

/// Declared field names and referenced path components of one package.
#[derive(Debug, Default)]
pub struct FieldIndex {
    pub declared_keys: BTreeSet<String>,
    pub references: BTreeMap<String, Vec<ReferenceOccurrence>>,
}

impl FieldIndex {
    #[must_use]
    pub fn collect(files: &[PackageFile]) -> Self {
        let mut index = Self::default();
        for file in files {
            collect_file(
                &file.path,
                &file.parsed,
                &mut index.declared_keys,
                &mut index.references,
            );
        }
        index
    }

    /// One diagnostic per occurrence of every undeclared component, grouped
    /// by component in sorted order.
    #[must_use]
    pub fn unknown_references(&self) -> Vec<FileScopedDiagnostic> {
        self.references
            .iter()
            .filter(|(component, _)| !self.declared_keys.contains(*component))
            .flat_map(|(component, occurrences)| {
                occurrences.iter().map(move |occurrence| {
                    FileScopedDiagnostic::new(
                        occurrence.path.clone(),
                        format!("schema field/component '{component}' not found in package"),
                        occurrence.span.clone(),
                    )
                })
            })
            .collect()
    }
}

#[must_use]
pub fn check_package(files: &[PackageFile]) -> Vec<FileScopedDiagnostic> {
    FieldIndex::collect(files).unknown_references()
}

fn collect_file(
    path: &Path,
    file: &ParsedFile,
    declared_keys: &mut BTreeSet<String>,
    references: &mut BTreeMap<String, Vec<ReferenceOccurrence>>,
) {
    inspect(file, &mut |node| {
        if let Some(key) = composite_literal_key(node) {
            declared_keys.insert(key.to_string());
        }
        if let Some(key) = indexed_assignment_key(node) {
            declared_keys.insert(key.to_string());
        }
        if let Node::Expression(expression) = node {
            for argument in accessor_arguments(expression) {
                let Some(components) = argument_components(argument) else {
                    continue;
                };
                for component in components {
                    if is_index_or_count_marker(component) {
                        continue;
                    }
                    references
                        .entry(component.to_string())
                        .or_default()
                        .push(ReferenceOccurrence {
                            path: path.to_path_buf(),
                            span: argument.span().clone(),
                        });
                }
            }
        }
        true
    });
}
