use crate::lexer::{Keyword, NumberKind, Symbol, Token, TokenKind};
use checker__diagnostics::Diagnostic;
use checker__go_syntax::{Declaration, Identifier, ParsedFile};
use checker__source::Span;

mod declarations;
mod expressions;
mod recovery;
mod statements;
mod types;

#[derive(Clone, Copy, Debug)]
pub(super) enum Expected {
    Declaration,
    Expression,
    Identifier,
    Keyword(Keyword),
    Operand,
    StatementTerminator,
    StringLiteral,
    Symbol(Symbol),
    Type,
}

#[derive(Clone, Debug)]
pub(super) enum InvalidConstructKind {
    ConditionMustBeExpression,
    ElseMustBeFollowedByIfOrBlock,
    ExpectedSingleExpression { found: usize },
    MissingCondition { keyword: Keyword },
    MixedNamedAndUnnamedParameters,
}

#[derive(Clone, Debug)]
pub(super) enum ParseError {
    UnexpectedToken {
        expected: Expected,
        found: String,
        span: Span,
    },
    InvalidConstruct {
        kind: InvalidConstructKind,
        span: Span,
    },
    /// The lexer already reported this token.
    UnparsableToken,
}

pub(super) type ParseResult<T> = Result<T, ParseError>;

pub(crate) struct Parser {
    tokens: Vec<Token>,
    position: usize,
    /// Nesting of brackets inside the current control clause. Negative while
    /// parsing an `if`, `for` or `switch` header, where `T {` starts the
    /// body rather than a composite literal.
    expression_level: i32,
    diagnostics: Vec<Diagnostic>,
}

impl Parser {
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
            expression_level: 0,
            diagnostics: Vec::new(),
        }
    }

    pub(crate) fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub(crate) fn parse_file_tokens(&mut self) -> ParsedFile {
        let start_span = self.peek_span();
        let package_name = match self.parse_package_clause() {
            Ok(name) => name,
            Err(error) => {
                self.report_parse_error(&error);
                self.synchronize();
                Identifier {
                    name: String::new(),
                    span: start_span.clone(),
                }
            }
        };

        let mut declarations = Vec::new();
        loop {
            self.skip_statement_terminators();
            if self.at_eof() {
                break;
            }
            match self.parse_top_level_declaration() {
                Ok(declaration) => {
                    declarations.push(declaration);
                    if let Err(error) = self.expect_statement_terminator() {
                        self.report_parse_error(&error);
                        self.synchronize();
                    }
                }
                Err(error) => {
                    self.report_parse_error(&error);
                    self.synchronize();
                }
            }
        }

        let span = start_span.to(&self.previous_span());
        ParsedFile {
            package_name,
            declarations,
            span,
        }
    }

    fn parse_package_clause(&mut self) -> ParseResult<Identifier> {
        self.expect_keyword(Keyword::Package)?;
        let name = self.expect_identifier()?;
        self.expect_statement_terminator()?;
        Ok(name)
    }

    fn parse_top_level_declaration(&mut self) -> ParseResult<Declaration> {
        match self.peek().kind {
            TokenKind::Keyword(Keyword::Func) => {
                self.parse_function_declaration().map(Declaration::Function)
            }
            TokenKind::Keyword(
                Keyword::Import | Keyword::Const | Keyword::Type | Keyword::Var,
            ) => self.parse_generic_declaration().map(Declaration::Generic),
            _ => Err(self.unexpected(Expected::Declaration)),
        }
    }

    fn peek_is_keyword(&self, keyword: Keyword) -> bool {
        matches!(self.peek().kind, TokenKind::Keyword(found) if found == keyword)
    }

    fn peek_is_identifier(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Identifier(_))
    }

    fn peek_is_symbol(&self, symbol: Symbol) -> bool {
        matches!(self.peek().kind, TokenKind::Symbol(found) if found == symbol)
    }

    fn peek_second_is_symbol(&self, symbol: Symbol) -> bool {
        matches!(self.peek_n(1).kind, TokenKind::Symbol(found) if found == symbol)
    }

    /// Explicit `;` or a terminator inserted at a line break.
    fn peek_is_statement_terminator(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::StatementTerminator | TokenKind::Symbol(Symbol::Semicolon)
        )
    }

    fn at_eof(&self) -> bool {
        matches!(self.peek().kind, TokenKind::EndOfFile)
    }

    fn peek(&self) -> &Token {
        self.peek_n(0)
    }

    fn peek_n(&self, n: usize) -> &Token {
        let index = (self.position + n).min(self.tokens.len().saturating_sub(1));
        &self.tokens[index]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !matches!(token.kind, TokenKind::EndOfFile) {
            self.position += 1;
        }
        token
    }

    fn skip_statement_terminators(&mut self) {
        while self.peek_is_statement_terminator() {
            self.advance();
        }
    }

    fn peek_span(&self) -> Span {
        self.peek().span.clone()
    }

    fn previous_span(&self) -> Span {
        if self.position == 0 {
            return self.peek_span();
        }
        self.tokens[self.position - 1].span.clone()
    }

    /// Builds an error for the current token without consuming it.
    fn unexpected(&self, expected: Expected) -> ParseError {
        let token = self.peek();
        if matches!(token.kind, TokenKind::Error) {
            return ParseError::UnparsableToken;
        }
        ParseError::UnexpectedToken {
            expected,
            found: describe_token(&token.kind),
            span: token.span.clone(),
        }
    }

    fn error(&mut self, message: impl Into<String>, span: Span) {
        self.diagnostics.push(Diagnostic::new(message, span));
    }

    fn report_parse_error(&mut self, error: &ParseError) {
        match error {
            ParseError::UnexpectedToken {
                expected,
                found,
                span,
            } => {
                let expected = match expected {
                    Expected::Declaration => "declaration".to_string(),
                    Expected::Expression => "expression".to_string(),
                    Expected::Identifier => "identifier".to_string(),
                    Expected::Keyword(keyword) => format!("'{}'", keyword.as_str()),
                    Expected::Operand => "operand".to_string(),
                    Expected::StatementTerminator => "';'".to_string(),
                    Expected::StringLiteral => "string literal".to_string(),
                    Expected::Symbol(symbol) => format!("'{}'", symbol.as_str()),
                    Expected::Type => "type".to_string(),
                };
                self.error(format!("expected {expected}, found {found}"), span.clone());
            }
            ParseError::InvalidConstruct { kind, span } => {
                let message = match kind {
                    InvalidConstructKind::ConditionMustBeExpression => {
                        "expected condition expression, found simple statement".to_string()
                    }
                    InvalidConstructKind::ElseMustBeFollowedByIfOrBlock => {
                        "expected 'if' or '{' after 'else'".to_string()
                    }
                    InvalidConstructKind::ExpectedSingleExpression { found } => {
                        format!("expected 1 expression, found {found}")
                    }
                    InvalidConstructKind::MissingCondition { keyword } => {
                        format!("missing condition in {} statement", keyword.as_str())
                    }
                    InvalidConstructKind::MixedNamedAndUnnamedParameters => {
                        "mixed named and unnamed parameters".to_string()
                    }
                };
                self.error(message, span.clone());
            }
            ParseError::UnparsableToken => {}
        }
    }
}

fn describe_token(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Identifier(name) => format!("'{name}'"),
        TokenKind::Keyword(keyword) => format!("'{}'", keyword.as_str()),
        TokenKind::Symbol(symbol) => format!("'{}'", symbol.as_str()),
        TokenKind::Number { kind, raw } => {
            let noun = match kind {
                NumberKind::Integer => "integer literal",
                NumberKind::Float => "floating-point literal",
                NumberKind::Imaginary => "imaginary literal",
            };
            format!("{noun} {raw}")
        }
        TokenKind::RuneLiteral(raw) => format!("rune literal {raw}"),
        TokenKind::StringLiteral { raw, .. } => format!("string literal {raw}"),
        TokenKind::Newline | TokenKind::StatementTerminator => "newline".to_string(),
        TokenKind::EndOfFile => "end of file".to_string(),
        TokenKind::Error => "invalid token".to_string(),
    }
}
