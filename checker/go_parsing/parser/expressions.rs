use crate::lexer::{Keyword, NumberKind, Symbol, TokenKind};
use checker__go_syntax::{
    BinaryOperator, ChannelDirection, Expression, Identifier, LiteralKind, UnaryOperator,
};
use checker__source::Span;

use super::{Expected, ParseResult, Parser};

impl Parser {
    pub(super) fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_binary_expression(1)
    }

    pub(super) fn parse_expression_list(&mut self) -> ParseResult<Vec<Expression>> {
        let mut expressions = vec![self.parse_expression()?];
        while self.peek_is_symbol(Symbol::Comma) {
            self.advance();
            expressions.push(self.parse_expression()?);
        }
        Ok(expressions)
    }

    fn parse_binary_expression(&mut self, minimum_precedence: u8) -> ParseResult<Expression> {
        let mut left = self.parse_unary_expression()?;
        while let Some(operator) = self.peek_binary_operator() {
            let precedence = operator.precedence();
            if precedence < minimum_precedence {
                break;
            }
            self.advance();
            let right = self.parse_binary_expression(precedence + 1)?;
            let span = left.span().to(right.span());
            left = Expression::Binary {
                operator,
                left: Box::new(left),
                right: Box::new(right),
                span,
            };
        }
        Ok(left)
    }

    fn peek_binary_operator(&self) -> Option<BinaryOperator> {
        let TokenKind::Symbol(symbol) = self.peek().kind else {
            return None;
        };
        let operator = match symbol {
            Symbol::PipePipe => BinaryOperator::LogicalOr,
            Symbol::AndAnd => BinaryOperator::LogicalAnd,
            Symbol::EqualEqual => BinaryOperator::Equal,
            Symbol::BangEqual => BinaryOperator::NotEqual,
            Symbol::Less => BinaryOperator::Less,
            Symbol::LessEqual => BinaryOperator::LessEqual,
            Symbol::Greater => BinaryOperator::Greater,
            Symbol::GreaterEqual => BinaryOperator::GreaterEqual,
            Symbol::Plus => BinaryOperator::Add,
            Symbol::Minus => BinaryOperator::Subtract,
            Symbol::Pipe => BinaryOperator::BitwiseOr,
            Symbol::Caret => BinaryOperator::BitwiseXor,
            Symbol::Star => BinaryOperator::Multiply,
            Symbol::Slash => BinaryOperator::Divide,
            Symbol::Percent => BinaryOperator::Remainder,
            Symbol::ShiftLeft => BinaryOperator::ShiftLeft,
            Symbol::ShiftRight => BinaryOperator::ShiftRight,
            Symbol::Ampersand => BinaryOperator::BitwiseAnd,
            Symbol::AmpersandCaret => BinaryOperator::BitClear,
            _ => return None,
        };
        Some(operator)
    }

    fn parse_unary_expression(&mut self) -> ParseResult<Expression> {
        let operator = match self.peek().kind {
            TokenKind::Symbol(Symbol::Plus) => UnaryOperator::Plus,
            TokenKind::Symbol(Symbol::Minus) => UnaryOperator::Negate,
            TokenKind::Symbol(Symbol::Exclamation) => UnaryOperator::Not,
            TokenKind::Symbol(Symbol::Caret) => UnaryOperator::BitwiseComplement,
            TokenKind::Symbol(Symbol::Ampersand) => UnaryOperator::AddressOf,
            TokenKind::Symbol(Symbol::Tilde) => UnaryOperator::Tilde,
            TokenKind::Symbol(Symbol::Arrow) => return self.parse_receive_expression(),
            TokenKind::Symbol(Symbol::Star) => {
                let start = self.advance().span;
                let operand = self.parse_unary_expression()?;
                let span = start.to(operand.span());
                return Ok(Expression::Star {
                    operand: Box::new(operand),
                    span,
                });
            }
            _ => return self.parse_primary_expression(),
        };
        let start = self.advance().span;
        let operand = self.parse_unary_expression()?;
        let span = start.to(operand.span());
        Ok(Expression::Unary {
            operator,
            operand: Box::new(operand),
            span,
        })
    }

    /// `<-ch`, or the receive-only channel type `<-chan T`.
    fn parse_receive_expression(&mut self) -> ParseResult<Expression> {
        let start = self.expect_symbol(Symbol::Arrow)?;
        if self.peek_is_keyword(Keyword::Chan) {
            let channel = match self.parse_channel_type()? {
                Expression::ChannelType {
                    direction: ChannelDirection::Both,
                    element,
                    span,
                } => Expression::ChannelType {
                    direction: ChannelDirection::Receive,
                    element,
                    span: start.to(&span),
                },
                other => {
                    let span = start.to(other.span());
                    Expression::Unary {
                        operator: UnaryOperator::Receive,
                        operand: Box::new(other),
                        span,
                    }
                }
            };
            return self.parse_primary_suffixes(channel);
        }
        let operand = self.parse_unary_expression()?;
        let span = start.to(operand.span());
        Ok(Expression::Unary {
            operator: UnaryOperator::Receive,
            operand: Box::new(operand),
            span,
        })
    }

    fn parse_primary_expression(&mut self) -> ParseResult<Expression> {
        let operand = self.parse_operand()?;
        self.parse_primary_suffixes(operand)
    }

    fn parse_operand(&mut self) -> ParseResult<Expression> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Identifier(name) => {
                self.advance();
                Ok(Expression::Identifier(Identifier {
                    name,
                    span: token.span,
                }))
            }
            TokenKind::Number { kind, raw } => {
                self.advance();
                let kind = match kind {
                    NumberKind::Integer => LiteralKind::Integer,
                    NumberKind::Float => LiteralKind::Float,
                    NumberKind::Imaginary => LiteralKind::Imaginary,
                };
                Ok(Expression::BasicLiteral {
                    kind,
                    raw,
                    span: token.span,
                })
            }
            TokenKind::RuneLiteral(raw) => {
                self.advance();
                Ok(Expression::BasicLiteral {
                    kind: LiteralKind::Rune,
                    raw,
                    span: token.span,
                })
            }
            TokenKind::StringLiteral { raw, value } => {
                self.advance();
                Ok(Expression::StringLiteral {
                    value,
                    raw,
                    span: token.span,
                })
            }
            TokenKind::Symbol(Symbol::LeftParenthesis) => {
                self.advance();
                self.expression_level += 1;
                let inner = self.parse_expression()?;
                self.expression_level -= 1;
                let end = self.expect_symbol(Symbol::RightParenthesis)?;
                Ok(Expression::Parenthesized {
                    inner: Box::new(inner),
                    span: token.span.to(&end),
                })
            }
            TokenKind::Keyword(Keyword::Func) => self.parse_function_type_or_literal(),
            TokenKind::Symbol(Symbol::LeftBracket)
            | TokenKind::Keyword(Keyword::Struct | Keyword::Map | Keyword::Chan | Keyword::Interface) => {
                self.parse_type()
            }
            _ => Err(self.unexpected(Expected::Expression)),
        }
    }

    fn parse_function_type_or_literal(&mut self) -> ParseResult<Expression> {
        let start = self.expect_keyword(Keyword::Func)?;
        let signature = self.parse_signature(Vec::new(), &start)?;
        if !self.peek_is_symbol(Symbol::LeftBrace) {
            return Ok(Expression::FunctionType(signature));
        }
        let body = self.parse_function_body()?;
        let span = start.to(&body.span);
        Ok(Expression::FunctionLiteral {
            signature,
            body,
            span,
        })
    }

    fn parse_primary_suffixes(&mut self, mut expression: Expression) -> ParseResult<Expression> {
        loop {
            expression = match self.peek().kind {
                TokenKind::Symbol(Symbol::Dot) => self.parse_selector_or_assertion(expression)?,
                TokenKind::Symbol(Symbol::LeftBracket) => self.parse_index_or_slice(expression)?,
                TokenKind::Symbol(Symbol::LeftParenthesis) => self.parse_call(expression)?,
                TokenKind::Symbol(Symbol::LeftBrace) if self.starts_composite_literal(&expression) => {
                    self.parse_composite_literal(Some(expression))?
                }
                _ => return Ok(expression),
            };
        }
    }

    /// Whether a `{` after `expression` opens a composite literal. Inside a
    /// control clause header only unambiguous literal types qualify, so that
    /// `if x == y {` keeps `{` for the body.
    fn starts_composite_literal(&self, expression: &Expression) -> bool {
        match expression.unparenthesized() {
            Expression::Identifier(_) | Expression::Selector { .. } | Expression::Index { .. } => {
                self.expression_level >= 0
            }
            Expression::ArrayType { .. } | Expression::StructType { .. } | Expression::MapType { .. } => {
                true
            }
            _ => false,
        }
    }

    fn parse_selector_or_assertion(&mut self, receiver: Expression) -> ParseResult<Expression> {
        self.expect_symbol(Symbol::Dot)?;
        if self.peek_is_identifier() {
            let member = self.expect_identifier()?;
            let span = receiver.span().to(&member.span);
            return Ok(Expression::Selector {
                receiver: Box::new(receiver),
                member,
                span,
            });
        }
        if !self.peek_is_symbol(Symbol::LeftParenthesis) {
            return Err(self.unexpected(Expected::Identifier));
        }
        self.advance();
        let asserted_type = if self.peek_is_keyword(Keyword::Type) {
            self.advance();
            None
        } else {
            Some(Box::new(self.parse_type()?))
        };
        let end = self.expect_symbol(Symbol::RightParenthesis)?;
        let span = receiver.span().to(&end);
        Ok(Expression::TypeAssertion {
            receiver: Box::new(receiver),
            asserted_type,
            span,
        })
    }

    /// `x[i]`, `x[A, B]`, `x[lo:hi]` or `x[lo:hi:max]`.
    fn parse_index_or_slice(&mut self, receiver: Expression) -> ParseResult<Expression> {
        self.expect_symbol(Symbol::LeftBracket)?;
        self.expression_level += 1;
        let first = if self.peek_is_symbol(Symbol::Colon) {
            None
        } else {
            Some(self.parse_expression()?)
        };

        if self.peek_is_symbol(Symbol::Colon) {
            self.advance();
            let high = if self.peek_is_symbol(Symbol::Colon) || self.peek_is_symbol(Symbol::RightBracket) {
                None
            } else {
                Some(Box::new(self.parse_expression()?))
            };
            let max = if self.peek_is_symbol(Symbol::Colon) {
                self.advance();
                Some(Box::new(self.parse_expression()?))
            } else {
                None
            };
            self.expression_level -= 1;
            let end = self.expect_symbol(Symbol::RightBracket)?;
            let span = receiver.span().to(&end);
            return Ok(Expression::Slice {
                receiver: Box::new(receiver),
                low: first.map(Box::new),
                high,
                max,
                span,
            });
        }

        let Some(first) = first else {
            return Err(self.unexpected(Expected::Operand));
        };
        let mut indices = vec![first];
        while self.peek_is_symbol(Symbol::Comma) {
            self.advance();
            if self.peek_is_symbol(Symbol::RightBracket) {
                break;
            }
            indices.push(self.parse_expression()?);
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

    fn parse_call(&mut self, callee: Expression) -> ParseResult<Expression> {
        self.expect_symbol(Symbol::LeftParenthesis)?;
        self.expression_level += 1;
        let mut arguments = Vec::new();
        let mut has_ellipsis = false;
        while !self.peek_is_symbol(Symbol::RightParenthesis) && !self.at_eof() {
            arguments.push(self.parse_expression()?);
            if self.peek_is_symbol(Symbol::Ellipsis) {
                self.advance();
                has_ellipsis = true;
            }
            if !self.peek_is_symbol(Symbol::Comma) {
                break;
            }
            self.advance();
        }
        self.expression_level -= 1;
        let end = self.expect_list_end(Symbol::RightParenthesis)?;
        let span = callee.span().to(&end);
        Ok(Expression::Call {
            callee: Box::new(callee),
            arguments,
            has_ellipsis,
            span,
        })
    }

    /// `T{...}`, or the `{...}` of an element whose type is elided.
    fn parse_composite_literal(
        &mut self,
        type_expression: Option<Expression>,
    ) -> ParseResult<Expression> {
        let start = match &type_expression {
            Some(type_expression) => type_expression.span().clone(),
            None => self.peek_span(),
        };
        self.expect_symbol(Symbol::LeftBrace)?;
        self.expression_level += 1;
        let mut elements = Vec::new();
        while !self.peek_is_symbol(Symbol::RightBrace) && !self.at_eof() {
            elements.push(self.parse_element()?);
            if !self.peek_is_symbol(Symbol::Comma) {
                break;
            }
            self.advance();
        }
        self.expression_level -= 1;
        let end = self.expect_list_end(Symbol::RightBrace)?;
        Ok(Expression::CompositeLiteral {
            type_expression: type_expression.map(Box::new),
            elements,
            span: start.to(&end),
        })
    }

    fn parse_element(&mut self) -> ParseResult<Expression> {
        let key = self.parse_element_value()?;
        if !self.peek_is_symbol(Symbol::Colon) {
            return Ok(key);
        }
        self.advance();
        let value = self.parse_element_value()?;
        let span = key.span().to(value.span());
        Ok(Expression::KeyValue {
            key: Box::new(key),
            value: Box::new(value),
            span,
        })
    }

    fn parse_element_value(&mut self) -> ParseResult<Expression> {
        if self.peek_is_symbol(Symbol::LeftBrace) {
            return self.parse_composite_literal(None);
        }
        self.parse_expression()
    }

    /// A line break before the closing delimiter means the trailing comma
    /// is missing.
    fn expect_list_end(&mut self, end: Symbol) -> ParseResult<Span> {
        if matches!(self.peek().kind, TokenKind::StatementTerminator) {
            return Err(self.unexpected(Expected::Symbol(Symbol::Comma)));
        }
        self.expect_symbol(end)
    }
}
