use crate::lexer::{Keyword, Symbol, TokenKind};
use checker__go_syntax::Identifier;
use checker__source::Span;

use super::{Expected, ParseResult, Parser};

impl Parser {
    pub(super) fn expect_identifier(&mut self) -> ParseResult<Identifier> {
        if let TokenKind::Identifier(name) = &self.peek().kind {
            let identifier = Identifier {
                name: name.clone(),
                span: self.peek_span(),
            };
            self.advance();
            return Ok(identifier);
        }
        Err(self.unexpected(Expected::Identifier))
    }

    /// Returns the decoded value, the raw literal and its span.
    pub(super) fn expect_string_literal(&mut self) -> ParseResult<(String, String, Span)> {
        if let TokenKind::StringLiteral { raw, value } = &self.peek().kind {
            let literal = (value.clone(), raw.clone(), self.peek_span());
            self.advance();
            return Ok(literal);
        }
        Err(self.unexpected(Expected::StringLiteral))
    }

    pub(super) fn expect_keyword(&mut self, keyword: Keyword) -> ParseResult<Span> {
        if self.peek_is_keyword(keyword) {
            return Ok(self.advance().span);
        }
        Err(self.unexpected(Expected::Keyword(keyword)))
    }

    pub(super) fn expect_symbol(&mut self, symbol: Symbol) -> ParseResult<Span> {
        if self.peek_is_symbol(symbol) {
            return Ok(self.advance().span);
        }
        Err(self.unexpected(Expected::Symbol(symbol)))
    }

    /// A terminator may be omitted before a closing `)` or `}`.
    pub(super) fn expect_statement_terminator(&mut self) -> ParseResult<()> {
        if self.peek_is_statement_terminator() {
            self.advance();
            return Ok(());
        }
        if self.at_eof()
            || self.peek_is_symbol(Symbol::RightParenthesis)
            || self.peek_is_symbol(Symbol::RightBrace)
        {
            return Ok(());
        }
        Err(self.unexpected(Expected::StatementTerminator))
    }

    /// Skips to the next top-level declaration keyword.
    pub(super) fn synchronize(&mut self) {
        let mut depth = 0usize;
        while !self.at_eof() {
            match self.peek().kind {
                TokenKind::Symbol(
                    Symbol::LeftBrace | Symbol::LeftParenthesis | Symbol::LeftBracket,
                ) => depth = depth.saturating_add(1),
                TokenKind::Symbol(
                    Symbol::RightBrace | Symbol::RightParenthesis | Symbol::RightBracket,
                ) => depth = depth.saturating_sub(1),
                TokenKind::Keyword(
                    Keyword::Func | Keyword::Var | Keyword::Const | Keyword::Type | Keyword::Import,
                ) if depth == 0 => return,
                _ => {}
            }
            self.advance();
        }
    }

    /// Skips past the end of the current statement, stopping before the `}`
    /// or clause keyword that closes the enclosing block.
    pub(super) fn synchronize_statement(&mut self) {
        let mut depth = 0usize;
        while !self.at_eof() {
            match self.peek().kind {
                TokenKind::Symbol(
                    Symbol::LeftBrace | Symbol::LeftParenthesis | Symbol::LeftBracket,
                ) => depth = depth.saturating_add(1),
                TokenKind::Symbol(Symbol::RightBrace) if depth == 0 => return,
                TokenKind::Keyword(Keyword::Case | Keyword::Default) if depth == 0 => return,
                TokenKind::Symbol(
                    Symbol::RightBrace | Symbol::RightParenthesis | Symbol::RightBracket,
                ) => depth = depth.saturating_sub(1),
                TokenKind::StatementTerminator | TokenKind::Symbol(Symbol::Semicolon)
                    if depth == 0 =>
                {
                    self.advance();
                    return;
                }
                _ => {}
            }
            self.advance();
        }
    }
}
