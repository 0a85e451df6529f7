use serde::Serialize;
use std::fmt;
use std::fmt::Write;
use std::str::FromStr;

use checker__source::Span;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("invalid report format '{value}'")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticPhase {
    Parsing,
    FieldReferences,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderedDiagnostic {
    pub phase: DiagnosticPhase,
    pub path: String,
    pub message: String,
    pub span: Span,
    /// The line `span` starts on, without its line terminator.
    #[serde(skip)]
    pub source_line: String,
}

impl RenderedDiagnostic {
    /// `path:line:column: error: message`, then the source line and a caret
    /// under the reported column, each indented by two spaces.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut text = format!(
            "{}:{}:{}: error: {}",
            self.path, self.span.line, self.span.column, self.message
        );
        let _ = write!(text, "\n  {}", self.source_line);
        if !self.source_line.is_empty() {
            let _ = write!(text, "\n  {}^", caret_indent(&self.source_line, self.span.column));
        }
        text
    }
}

/// Whitespace covering the first `column - 1` bytes of `line`. Tabs are kept
/// so the caret lines up however the terminal renders them.
fn caret_indent(line: &str, column: usize) -> String {
    line.bytes()
        .take(column.saturating_sub(1))
        .filter(|byte| byte & 0xC0 != 0x80)
        .map(|byte| if byte == b'\t' { '\t' } else { ' ' })
        .collect()
}

#[derive(Clone, Debug, Serialize)]
pub struct CheckerFailure {
    pub kind: CheckerFailureKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<CheckerFailureDetail>,
}

impl CheckerFailure {
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut text = match &self.path {
            Some(path) => format!("error: {}: {path}", self.message),
            None => format!("error: {}", self.message),
        };
        for detail in &self.details {
            match &detail.path {
                Some(path) => {
                    let _ = write!(text, "\n  {path}: {}", detail.message);
                }
                None => {
                    let _ = write!(text, "\n  {}", detail.message);
                }
            }
        }
        text
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckerFailureKind {
    ReadSource,
    TargetNotFound,
    InvalidCheckTarget,
    InvalidExcludePattern,
    WorkspaceDiscoveryFailed,
}

#[derive(Clone, Debug, Serialize)]
pub struct CheckerFailureDetail {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// The document printed for `--format json`.
#[derive(Clone, Debug, Serialize)]
pub struct JsonReport<'a> {
    pub ok: bool,
    pub diagnostics: &'a [RenderedDiagnostic],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a CheckerFailure>,
}

impl<'a> JsonReport<'a> {
    #[must_use]
    pub fn from_diagnostics(diagnostics: &'a [RenderedDiagnostic]) -> Self {
        Self {
            ok: diagnostics.is_empty(),
            diagnostics,
            error: None,
        }
    }

    #[must_use]
    pub fn from_failure(failure: &'a CheckerFailure) -> Self {
        Self {
            ok: false,
            diagnostics: &[],
            error: Some(failure),
        }
    }
}
