use crate::lexer::{Keyword, Symbol, TokenKind};
use checker__go_syntax::{
    BinaryOperator, ChannelDirection, Expression, Field, FunctionType, Identifier,
    InterfaceElement, UnaryOperator,
};
use checker__source::Span;

use super::{Expected, InvalidConstructKind, ParseError, ParseResult, Parser};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum ParameterListKind {
    /// `(a, b int, c ...string)`
    Parameters,
    /// `[K comparable, V any]`
    TypeParameters,
}

impl ParameterListKind {
    fn delimiters(self) -> (Symbol, Symbol) {
        match self {
            ParameterListKind::Parameters => (Symbol::LeftParenthesis, Symbol::RightParenthesis),
            ParameterListKind::TypeParameters => (Symbol::LeftBracket, Symbol::RightBracket),
        }
    }
}

/// One comma-separated entry of a parameter list before names are grouped
/// with their types.
struct ParameterEntry {
    name: Option<Identifier>,
    type_expression: Expression,
}

struct Checkpoint {
    position: usize,
    diagnostic_count: usize,
    expression_level: i32,
}

impl Parser {
    pub(super) fn parse_type(&mut self) -> ParseResult<Expression> {
        match self.peek().kind {
            TokenKind::Identifier(_) => self.parse_type_name(),
            TokenKind::Symbol(Symbol::LeftBracket) => self.parse_array_type(),
            TokenKind::Symbol(Symbol::Star) => {
                let start = self.advance().span;
                let operand = self.parse_type()?;
                let span = start.to(operand.span());
                Ok(Expression::Star {
                    operand: Box::new(operand),
                    span,
                })
            }
            TokenKind::Symbol(Symbol::LeftParenthesis) => {
                let start = self.advance().span;
                let inner = self.parse_type()?;
                let end = self.expect_symbol(Symbol::RightParenthesis)?;
                Ok(Expression::Parenthesized {
                    inner: Box::new(inner),
                    span: start.to(&end),
                })
            }
            TokenKind::Symbol(Symbol::Arrow) => {
                let start = self.advance().span;
                self.expect_keyword(Keyword::Chan)?;
                let element = self.parse_type()?;
                let span = start.to(element.span());
                Ok(Expression::ChannelType {
                    direction: ChannelDirection::Receive,
                    element: Box::new(element),
                    span,
                })
            }
            TokenKind::Keyword(Keyword::Struct) => self.parse_struct_type(),
            TokenKind::Keyword(Keyword::Interface) => self.parse_interface_type(),
            TokenKind::Keyword(Keyword::Map) => self.parse_map_type(),
            TokenKind::Keyword(Keyword::Chan) => self.parse_channel_type(),
            TokenKind::Keyword(Keyword::Func) => {
                let start = self.advance().span;
                let signature = self.parse_signature(Vec::new(), &start)?;
                Ok(Expression::FunctionType(signature))
            }
            _ => Err(self.unexpected(Expected::Type)),
        }
    }

    pub(super) fn can_start_type(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Identifier(_)
                | TokenKind::Symbol(
                    Symbol::LeftBracket | Symbol::Star | Symbol::LeftParenthesis | Symbol::Arrow
                )
                | TokenKind::Keyword(
                    Keyword::Struct
                        | Keyword::Interface
                        | Keyword::Map
                        | Keyword::Chan
                        | Keyword::Func
                )
        )
    }

    /// `T`, `pkg.T`, optionally instantiated as `T[A, B]`.
    fn parse_type_name(&mut self) -> ParseResult<Expression> {
        let name = self.expect_identifier()?;
        let mut type_name = Expression::Identifier(name);
        if self.peek_is_symbol(Symbol::Dot) {
            self.advance();
            let member = self.expect_identifier()?;
            let span = type_name.span().to(&member.span);
            type_name = Expression::Selector {
                receiver: Box::new(type_name),
                member,
                span,
            };
        }
        if self.peek_is_symbol(Symbol::LeftBracket) {
            return self.parse_type_arguments(type_name);
        }
        Ok(type_name)
    }

    fn parse_type_arguments(&mut self, receiver: Expression) -> ParseResult<Expression> {
        self.expect_symbol(Symbol::LeftBracket)?;
        self.expression_level += 1;
        let mut indices = vec![self.parse_type()?];
        while self.peek_is_symbol(Symbol::Comma) {
            self.advance();
            if self.peek_is_symbol(Symbol::RightBracket) {
                break;
            }
            indices.push(self.parse_type()?);
        }
        self.expression_level -= 1;
        let end = self.expect_symbol(Symbol::RightBracket)?;
        let span = receiver.span().to(&end);
        Ok(Expression::Index {
            receiver: Box::new(receiver),
            indices,
            span,
        })
    }

    /// `[]T`, `[N]T` or `[...]T`.
    pub(super) fn parse_array_type(&mut self) -> ParseResult<Expression> {
        let start = self.expect_symbol(Symbol::LeftBracket)?;
        let length = if self.peek_is_symbol(Symbol::RightBracket) {
            None
        } else if self.peek_is_symbol(Symbol::Ellipsis) && self.peek_second_is_symbol(Symbol::RightBracket)
        {
            let span = self.advance().span;
            Some(Box::new(Expression::Ellipsis {
                element: None,
                span,
            }))
        } else {
            self.expression_level += 1;
            let length = self.parse_expression()?;
            self.expression_level -= 1;
            Some(Box::new(length))
        };
        self.expect_symbol(Symbol::RightBracket)?;
        let element = self.parse_type()?;
        let span = start.to(element.span());
        Ok(Expression::ArrayType {
            length,
            element: Box::new(element),
            span,
        })
    }

    fn parse_map_type(&mut self) -> ParseResult<Expression> {
        let start = self.expect_keyword(Keyword::Map)?;
        self.expect_symbol(Symbol::LeftBracket)?;
        let key = self.parse_type()?;
        self.expect_symbol(Symbol::RightBracket)?;
        let value = self.parse_type()?;
        let span = start.to(value.span());
        Ok(Expression::MapType {
            key: Box::new(key),
            value: Box::new(value),
            span,
        })
    }

    /// `chan T` or `chan<- T`. The receive-only form starts with `<-` and is
    /// handled by the caller.
    pub(super) fn parse_channel_type(&mut self) -> ParseResult<Expression> {
        let start = self.expect_keyword(Keyword::Chan)?;
        let direction = if self.peek_is_symbol(Symbol::Arrow) {
            self.advance();
            ChannelDirection::Send
        } else {
            ChannelDirection::Both
        };
        let element = self.parse_type()?;
        let span = start.to(element.span());
        Ok(Expression::ChannelType {
            direction,
            element: Box::new(element),
            span,
        })
    }

    fn parse_struct_type(&mut self) -> ParseResult<Expression> {
        let start = self.expect_keyword(Keyword::Struct)?;
        self.expect_symbol(Symbol::LeftBrace)?;
        let mut fields = Vec::new();
        loop {
            self.skip_statement_terminators();
            if self.peek_is_symbol(Symbol::RightBrace) || self.at_eof() {
                break;
            }
            fields.push(self.parse_field_declaration()?);
            self.expect_statement_terminator()?;
        }
        let end = self.expect_symbol(Symbol::RightBrace)?;
        Ok(Expression::StructType {
            fields,
            span: start.to(&end),
        })
    }

    fn parse_field_declaration(&mut self) -> ParseResult<Field> {
        let start = self.peek_span();
        let (names, type_expression) = match self.peek().kind {
            TokenKind::Identifier(_) => match self.peek_n(1).kind {
                TokenKind::Symbol(Symbol::Dot | Symbol::RightBrace | Symbol::Semicolon)
                | TokenKind::StatementTerminator
                | TokenKind::StringLiteral { .. } => (Vec::new(), self.parse_type_name()?),
                TokenKind::Symbol(Symbol::Comma) => {
                    let names = self.parse_identifier_list()?;
                    (names, self.parse_type()?)
                }
                TokenKind::Symbol(Symbol::LeftBracket) => self.parse_bracketed_field()?,
                _ => {
                    let name = self.expect_identifier()?;
                    (vec![name], self.parse_type()?)
                }
            },
            TokenKind::Symbol(Symbol::Star) => {
                let star = self.advance().span;
                let operand = self.parse_type_name()?;
                let span = star.to(operand.span());
                let embedded = Expression::Star {
                    operand: Box::new(operand),
                    span,
                };
                (Vec::new(), embedded)
            }
            _ => return Err(self.unexpected(Expected::Identifier)),
        };
        let tag = if let TokenKind::StringLiteral { .. } = self.peek().kind {
            let (value, raw, span) = self.expect_string_literal()?;
            Some(Expression::StringLiteral { value, raw, span })
        } else {
            None
        };
        let span = start.to(&self.previous_span());
        Ok(Field {
            names,
            type_expression,
            tag,
            span,
        })
    }

    /// `a [4]int` declares a field; `List[int]` embeds an instantiated type.
    fn parse_bracketed_field(&mut self) -> ParseResult<(Vec<Identifier>, Expression)> {
        let checkpoint = self.checkpoint();
        if let Ok(embedded) = self.parse_type_name()
            && matches!(
                self.peek().kind,
                TokenKind::StatementTerminator
                    | TokenKind::StringLiteral { .. }
                    | TokenKind::Symbol(Symbol::RightBrace | Symbol::Semicolon)
            )
        {
            return Ok((Vec::new(), embedded));
        }
        self.restore(checkpoint);
        let name = self.expect_identifier()?;
        Ok((vec![name], self.parse_type()?))
    }

    fn parse_interface_type(&mut self) -> ParseResult<Expression> {
        let start = self.expect_keyword(Keyword::Interface)?;
        self.expect_symbol(Symbol::LeftBrace)?;
        let mut elements = Vec::new();
        loop {
            self.skip_statement_terminators();
            if self.peek_is_symbol(Symbol::RightBrace) || self.at_eof() {
                break;
            }
            let element = if self.peek_is_identifier()
                && self.peek_second_is_symbol(Symbol::LeftParenthesis)
            {
                let name = self.expect_identifier()?;
                let signature = self.parse_signature(Vec::new(), &name.span)?;
                let span = name.span.to(&signature.span);
                InterfaceElement::Method {
                    name,
                    signature,
                    span,
                }
            } else {
                InterfaceElement::Embedded(self.parse_type_constraint()?)
            };
            elements.push(element);
            self.expect_statement_terminator()?;
        }
        let end = self.expect_symbol(Symbol::RightBrace)?;
        Ok(Expression::InterfaceType {
            elements,
            span: start.to(&end),
        })
    }

    /// Union of type terms such as `~int | ~string | fmt.Stringer`.
    pub(super) fn parse_type_constraint(&mut self) -> ParseResult<Expression> {
        let mut constraint = self.parse_type_term()?;
        while self.peek_is_symbol(Symbol::Pipe) {
            self.advance();
            let right = self.parse_type_term()?;
            let span = constraint.span().to(right.span());
            constraint = Expression::Binary {
                operator: BinaryOperator::BitwiseOr,
                left: Box::new(constraint),
                right: Box::new(right),
                span,
            };
        }
        Ok(constraint)
    }

    fn parse_type_term(&mut self) -> ParseResult<Expression> {
        if !self.peek_is_symbol(Symbol::Tilde) {
            return self.parse_type();
        }
        let start = self.advance().span;
        let operand = self.parse_type()?;
        let span = start.to(operand.span());
        Ok(Expression::Unary {
            operator: UnaryOperator::Tilde,
            operand: Box::new(operand),
            span,
        })
    }

    /// Parses parameters and results after `func` (and the name or type
    /// parameters of a declaration, if any).
    pub(super) fn parse_signature(
        &mut self,
        type_parameters: Vec<Field>,
        start: &Span,
    ) -> ParseResult<FunctionType> {
        let parameters = self.parse_parameter_list(ParameterListKind::Parameters)?;
        let results = if self.peek_is_symbol(Symbol::LeftParenthesis) {
            self.parse_parameter_list(ParameterListKind::Parameters)?
        } else if self.can_start_type() {
            let result = self.parse_type()?;
            vec![Field {
                names: Vec::new(),
                span: result.span().clone(),
                type_expression: result,
                tag: None,
            }]
        } else {
            Vec::new()
        };
        Ok(FunctionType {
            type_parameters,
            parameters,
            results,
            span: start.to(&self.previous_span()),
        })
    }

    pub(super) fn parse_parameter_list(&mut self, kind: ParameterListKind) -> ParseResult<Vec<Field>> {
        let (open, close) = kind.delimiters();
        self.expect_symbol(open)?;
        let mut entries = Vec::new();
        while !self.peek_is_symbol(close) && !self.at_eof() {
            entries.push(self.parse_parameter_entry(kind, close)?);
            if !self.peek_is_symbol(Symbol::Comma) {
                break;
            }
            self.advance();
        }
        self.expect_symbol(close)?;
        group_parameters(entries)
    }

    fn parse_parameter_entry(
        &mut self,
        kind: ParameterListKind,
        close: Symbol,
    ) -> ParseResult<ParameterEntry> {
        if !self.peek_is_identifier() {
            return Ok(ParameterEntry {
                name: None,
                type_expression: self.parse_parameter_type(kind)?,
            });
        }
        match self.peek_n(1).kind {
            TokenKind::Symbol(symbol) if symbol == close || symbol == Symbol::Comma => {
                let identifier = self.expect_identifier()?;
                Ok(ParameterEntry {
                    name: None,
                    type_expression: Expression::Identifier(identifier),
                })
            }
            TokenKind::Symbol(Symbol::Dot) => Ok(ParameterEntry {
                name: None,
                type_expression: self.parse_type_name()?,
            }),
            TokenKind::Symbol(Symbol::LeftBracket) => {
                self.parse_bracketed_parameter_entry(kind, close)
            }
            _ => {
                let name = self.expect_identifier()?;
                Ok(ParameterEntry {
                    name: Some(name),
                    type_expression: self.parse_parameter_type(kind)?,
                })
            }
        }
    }

    /// `values []int` names a parameter; `List[int]` is an unnamed
    /// parameter of an instantiated type.
    fn parse_bracketed_parameter_entry(
        &mut self,
        kind: ParameterListKind,
        close: Symbol,
    ) -> ParseResult<ParameterEntry> {
        if !matches!(self.peek_n(2).kind, TokenKind::Symbol(Symbol::RightBracket)) {
            let checkpoint = self.checkpoint();
            if let Ok(instantiated) = self.parse_type_name()
                && matches!(
                    self.peek().kind,
                    TokenKind::Symbol(symbol) if symbol == close || symbol == Symbol::Comma
                )
            {
                return Ok(ParameterEntry {
                    name: None,
                    type_expression: instantiated,
                });
            }
            self.restore(checkpoint);
        }
        let name = self.expect_identifier()?;
        Ok(ParameterEntry {
            name: Some(name),
            type_expression: self.parse_parameter_type(kind)?,
        })
    }

    fn parse_parameter_type(&mut self, kind: ParameterListKind) -> ParseResult<Expression> {
        match kind {
            ParameterListKind::TypeParameters => self.parse_type_constraint(),
            ParameterListKind::Parameters if self.peek_is_symbol(Symbol::Ellipsis) => {
                let start = self.advance().span;
                let element = self.parse_type()?;
                let span = start.to(element.span());
                Ok(Expression::Ellipsis {
                    element: Some(Box::new(element)),
                    span,
                })
            }
            ParameterListKind::Parameters => self.parse_type(),
        }
    }

    pub(super) fn parse_identifier_list(&mut self) -> ParseResult<Vec<Identifier>> {
        let mut names = vec![self.expect_identifier()?];
        while self.peek_is_symbol(Symbol::Comma) {
            self.advance();
            names.push(self.expect_identifier()?);
        }
        Ok(names)
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            position: self.position,
            diagnostic_count: self.diagnostics.len(),
            expression_level: self.expression_level,
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.position = checkpoint.position;
        self.diagnostics.truncate(checkpoint.diagnostic_count);
        self.expression_level = checkpoint.expression_level;
    }
}

/// Attaches each run of bare names to the type that follows it, so that
/// `(a, b int, c string)` yields two fields.
fn group_parameters(entries: Vec<ParameterEntry>) -> ParseResult<Vec<Field>> {
    if entries.iter().all(|entry| entry.name.is_none()) {
        return Ok(entries
            .into_iter()
            .map(|entry| Field {
                names: Vec::new(),
                span: entry.type_expression.span().clone(),
                type_expression: entry.type_expression,
                tag: None,
            })
            .collect());
    }

    let mut fields = Vec::new();
    let mut pending_names: Vec<Identifier> = Vec::new();
    for entry in entries {
        match entry.name {
            Some(name) => {
                pending_names.push(name);
                let span = pending_names[0].span.to(entry.type_expression.span());
                fields.push(Field {
                    names: std::mem::take(&mut pending_names),
                    type_expression: entry.type_expression,
                    tag: None,
                    span,
                });
            }
            None => match entry.type_expression {
                Expression::Identifier(identifier) => pending_names.push(identifier),
                other => {
                    return Err(ParseError::InvalidConstruct {
                        kind: InvalidConstructKind::MixedNamedAndUnnamedParameters,
                        span: other.span().clone(),
                    });
                }
            },
        }
    }
    if let Some(dangling) = pending_names.last() {
        return Err(ParseError::InvalidConstruct {
            kind: InvalidConstructKind::MixedNamedAndUnnamedParameters,
            span: dangling.span.clone(),
        });
    }
    Ok(fields)
}
