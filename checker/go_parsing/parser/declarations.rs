use crate::lexer::{Keyword, Symbol, TokenKind};
use checker__go_syntax::{
    DeclarationKeyword, FunctionDeclaration, GenericDeclaration, Identifier,
    ImportSpecification, Specification, TypeSpecification, ValueSpecification,
};

use super::types::ParameterListKind;
use super::{Expected, ParseResult, Parser};

impl Parser {
    /// `import`, `const`, `type` or `var`, with a single specification or a
    /// parenthesized group.
    pub(super) fn parse_generic_declaration(&mut self) -> ParseResult<GenericDeclaration> {
        let keyword = match self.peek().kind {
            TokenKind::Keyword(Keyword::Import) => DeclarationKeyword::Import,
            TokenKind::Keyword(Keyword::Const) => DeclarationKeyword::Const,
            TokenKind::Keyword(Keyword::Type) => DeclarationKeyword::Type,
            TokenKind::Keyword(Keyword::Var) => DeclarationKeyword::Var,
            _ => return Err(self.unexpected(Expected::Declaration)),
        };
        let start = self.advance().span;

        let mut specifications = Vec::new();
        if self.peek_is_symbol(Symbol::LeftParenthesis) {
            self.advance();
            loop {
                self.skip_statement_terminators();
                if self.peek_is_symbol(Symbol::RightParenthesis) || self.at_eof() {
                    break;
                }
                specifications.push(self.parse_specification(keyword)?);
                self.expect_statement_terminator()?;
            }
            self.expect_symbol(Symbol::RightParenthesis)?;
        } else {
            specifications.push(self.parse_specification(keyword)?);
        }

        Ok(GenericDeclaration {
            keyword,
            specifications,
            span: start.to(&self.previous_span()),
        })
    }

    fn parse_specification(&mut self, keyword: DeclarationKeyword) -> ParseResult<Specification> {
        match keyword {
            DeclarationKeyword::Import => self.parse_import_specification().map(Specification::Import),
            DeclarationKeyword::Type => self.parse_type_specification().map(Specification::Type),
            DeclarationKeyword::Const | DeclarationKeyword::Var => {
                self.parse_value_specification().map(Specification::Value)
            }
        }
    }

    fn parse_import_specification(&mut self) -> ParseResult<ImportSpecification> {
        let start = self.peek_span();
        let alias = if self.peek_is_identifier() {
            Some(self.expect_identifier()?)
        } else if self.peek_is_symbol(Symbol::Dot) {
            let span = self.advance().span;
            Some(Identifier {
                name: ".".to_string(),
                span,
            })
        } else {
            None
        };
        let (path, _, path_span) = self.expect_string_literal()?;
        Ok(ImportSpecification {
            alias,
            path,
            span: start.to(&path_span),
            path_span,
        })
    }

    /// `a, b int = 1, 2`. Inside a `const` group both the type and the
    /// values may be omitted.
    fn parse_value_specification(&mut self) -> ParseResult<ValueSpecification> {
        let start = self.peek_span();
        let names = self.parse_identifier_list()?;
        let type_expression = if self.peek_is_symbol(Symbol::Assign)
            || self.peek_is_statement_terminator()
            || self.peek_is_symbol(Symbol::RightParenthesis)
        {
            None
        } else {
            Some(self.parse_type()?)
        };
        let values = if self.peek_is_symbol(Symbol::Assign) {
            self.advance();
            self.parse_expression_list()?
        } else {
            Vec::new()
        };
        Ok(ValueSpecification {
            names,
            type_expression,
            values,
            span: start.to(&self.previous_span()),
        })
    }

    fn parse_type_specification(&mut self) -> ParseResult<TypeSpecification> {
        let name = self.expect_identifier()?;
        let type_parameters = if self.peek_starts_type_parameters() {
            self.parse_parameter_list(ParameterListKind::TypeParameters)?
        } else {
            Vec::new()
        };
        let is_alias = self.peek_is_symbol(Symbol::Assign);
        if is_alias {
            self.advance();
        }
        let type_expression = self.parse_type()?;
        let span = name.span.to(type_expression.span());
        Ok(TypeSpecification {
            name,
            type_parameters,
            is_alias,
            type_expression,
            span,
        })
    }

    /// Distinguishes `type List[T any] ...` from `type Buffer [size]byte`.
    fn peek_starts_type_parameters(&self) -> bool {
        if !self.peek_is_symbol(Symbol::LeftBracket) {
            return false;
        }
        if !matches!(self.peek_n(1).kind, TokenKind::Identifier(_)) {
            return false;
        }
        matches!(
            self.peek_n(2).kind,
            TokenKind::Identifier(_)
                | TokenKind::Symbol(Symbol::Comma | Symbol::Tilde | Symbol::LeftBracket)
                | TokenKind::Keyword(
                    Keyword::Interface | Keyword::Func | Keyword::Map | Keyword::Chan | Keyword::Struct
                )
        )
    }

    pub(super) fn parse_function_declaration(&mut self) -> ParseResult<FunctionDeclaration> {
        let start = self.expect_keyword(Keyword::Func)?;
        let receiver = if self.peek_is_symbol(Symbol::LeftParenthesis) {
            self.parse_parameter_list(ParameterListKind::Parameters)?
                .into_iter()
                .next()
        } else {
            None
        };
        let name = self.expect_identifier()?;
        let type_parameters = if self.peek_is_symbol(Symbol::LeftBracket) {
            self.parse_parameter_list(ParameterListKind::TypeParameters)?
        } else {
            Vec::new()
        };
        let signature = self.parse_signature(type_parameters, &start)?;
        let body = if self.peek_is_symbol(Symbol::LeftBrace) {
            Some(self.parse_function_body()?)
        } else {
            None
        };
        Ok(FunctionDeclaration {
            receiver,
            name,
            signature,
            body,
            span: start.to(&self.previous_span()),
        })
    }
}
