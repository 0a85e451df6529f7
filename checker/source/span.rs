use serde::{Deserialize, Serialize};

/// Byte range in a source file plus the 1-based line and column of its start.
///
/// Columns count bytes, not characters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    /// Span from the start of `self` to the end of `other`, positioned at `self`.
    #[must_use]
    pub fn to(&self, other: &Span) -> Span {
        Span {
            start: self.start,
            end: other.end.max(self.start),
            line: self.line,
            column: self.column,
        }
    }
}
