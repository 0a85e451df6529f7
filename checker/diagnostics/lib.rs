mod diagnostic;

pub use diagnostic::{Diagnostic, FileScopedDiagnostic};
