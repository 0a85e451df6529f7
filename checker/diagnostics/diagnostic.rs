use std::path::PathBuf;

use checker__source::Span;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// A diagnostic tied to the workspace-relative file it was found in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileScopedDiagnostic {
    pub path: PathBuf,
    pub diagnostic: Diagnostic,
}

impl FileScopedDiagnostic {
    pub fn new(path: PathBuf, message: impl Into<String>, span: Span) -> Self {
        Self {
            path,
            diagnostic: Diagnostic::new(message, span),
        }
    }
}
