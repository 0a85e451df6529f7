mod lexer;
mod parser;

use checker__diagnostics::Diagnostic;
use checker__go_syntax::ParsedFile;

/// Parses one Go source file.
///
/// Lexical and syntax errors are collected rather than stopping at the first
/// one; any error makes the whole file unusable for analysis.
pub fn parse_file(source: &str) -> Result<ParsedFile, Vec<Diagnostic>> {
    let mut lexer = lexer::Lexer::new(source);
    let tokens = lexer.lex_all_tokens();
    let mut diagnostics: Vec<Diagnostic> = lexer
        .into_errors()
        .into_iter()
        .map(|error| Diagnostic::new(error.message, error.span))
        .collect();

    let mut parser = parser::Parser::new(tokens);
    let file = parser.parse_file_tokens();
    diagnostics.extend(parser.into_diagnostics());

    if diagnostics.is_empty() {
        Ok(file)
    } else {
        diagnostics.sort_by_key(|diagnostic| diagnostic.span.start);
        Err(diagnostics)
    }
}
