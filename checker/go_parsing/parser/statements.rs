use crate::lexer::{Keyword, Symbol, TokenKind};
use checker__go_syntax::{
    AssignOperator, BinaryOperator, Block, BranchKeyword, CaseClause, CommunicationClause,
    Expression, Statement,
};
use checker__source::Span;

use super::{Expected, InvalidConstructKind, ParseError, ParseResult, Parser};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SimpleStatementMode {
    Basic,
    LabelAllowed,
    RangeAllowed,
}

enum SimpleStatement {
    Plain(Statement),
    /// `k, v := range x` in a `for` header.
    RangeClause {
        key: Option<Expression>,
        value: Option<Expression>,
        is_define: bool,
        expression: Expression,
        span: Span,
    },
}

enum ForHeader {
    Clauses {
        init: Option<Box<Statement>>,
        condition: Option<Expression>,
        post: Option<Box<Statement>>,
    },
    Range {
        key: Option<Expression>,
        value: Option<Expression>,
        is_define: bool,
        expression: Expression,
    },
}

impl Parser {
    pub(super) fn parse_block(&mut self) -> ParseResult<Block> {
        let start = self.expect_symbol(Symbol::LeftBrace)?;
        let statements = self.parse_statement_list();
        let end = self.expect_symbol(Symbol::RightBrace)?;
        Ok(Block {
            statements,
            span: start.to(&end),
        })
    }

    /// Function bodies reset the control clause nesting, so a literal inside
    /// `if func() bool { return T{} == x }() {` is still a literal.
    pub(super) fn parse_function_body(&mut self) -> ParseResult<Block> {
        let saved_level = self.expression_level;
        self.expression_level = 0;
        let body = self.parse_block();
        self.expression_level = saved_level;
        body
    }

    fn parse_statement_list(&mut self) -> Vec<Statement> {
        let level = self.expression_level;
        let mut statements = Vec::new();
        loop {
            self.skip_statement_terminators();
            if self.at_eof()
                || self.peek_is_symbol(Symbol::RightBrace)
                || self.peek_is_keyword(Keyword::Case)
                || self.peek_is_keyword(Keyword::Default)
            {
                break;
            }
            let result = match self.parse_statement() {
                Ok(statement) => self.expect_statement_terminator().map(|()| statement),
                Err(error) => Err(error),
            };
            match result {
                Ok(statement) => statements.push(statement),
                Err(error) => {
                    self.report_parse_error(&error);
                    self.expression_level = level;
                    self.synchronize_statement();
                }
            }
        }
        statements
    }

    fn parse_statement(&mut self) -> ParseResult<Statement> {
        let start = self.peek_span();
        match self.peek().kind {
            TokenKind::Keyword(Keyword::Var | Keyword::Const | Keyword::Type) => {
                self.parse_generic_declaration().map(Statement::Declaration)
            }
            TokenKind::Keyword(Keyword::Go) => {
                self.advance();
                let call = self.parse_expression()?;
                let span = start.to(call.span());
                Ok(Statement::Go { call, span })
            }
            TokenKind::Keyword(Keyword::Defer) => {
                self.advance();
                let call = self.parse_expression()?;
                let span = start.to(call.span());
                Ok(Statement::Defer { call, span })
            }
            TokenKind::Keyword(Keyword::Return) => {
                self.advance();
                let results = if self.peek_is_statement_terminator()
                    || self.peek_is_symbol(Symbol::RightBrace)
                {
                    Vec::new()
                } else {
                    self.parse_expression_list()?
                };
                Ok(Statement::Return {
                    results,
                    span: start.to(&self.previous_span()),
                })
            }
            TokenKind::Keyword(
                keyword @ (Keyword::Break | Keyword::Continue | Keyword::Goto | Keyword::Fallthrough),
            ) => {
                self.advance();
                let keyword = match keyword {
                    Keyword::Break => BranchKeyword::Break,
                    Keyword::Continue => BranchKeyword::Continue,
                    Keyword::Goto => BranchKeyword::Goto,
                    _ => BranchKeyword::Fallthrough,
                };
                let label = if keyword != BranchKeyword::Fallthrough && self.peek_is_identifier() {
                    Some(self.expect_identifier()?)
                } else {
                    None
                };
                Ok(Statement::Branch {
                    keyword,
                    label,
                    span: start.to(&self.previous_span()),
                })
            }
            TokenKind::Keyword(Keyword::If) => self.parse_if_statement(),
            TokenKind::Keyword(Keyword::Switch) => self.parse_switch_statement(),
            TokenKind::Keyword(Keyword::Select) => self.parse_select_statement(),
            TokenKind::Keyword(Keyword::For) => self.parse_for_statement(),
            TokenKind::Symbol(Symbol::LeftBrace) => self.parse_block().map(Statement::Block),
            _ => self.parse_plain_simple_statement(SimpleStatementMode::LabelAllowed),
        }
    }

    fn parse_plain_simple_statement(&mut self, mode: SimpleStatementMode) -> ParseResult<Statement> {
        match self.parse_simple_statement(mode)? {
            SimpleStatement::Plain(statement) => Ok(statement),
            SimpleStatement::RangeClause { span, .. } => Err(ParseError::UnexpectedToken {
                expected: Expected::Expression,
                found: "'range'".to_string(),
                span,
            }),
        }
    }

    fn parse_simple_statement(&mut self, mode: SimpleStatementMode) -> ParseResult<SimpleStatement> {
        let start = self.peek_span();
        if mode == SimpleStatementMode::RangeAllowed && self.peek_is_keyword(Keyword::Range) {
            self.advance();
            let expression = self.parse_expression()?;
            let span = start.to(expression.span());
            return Ok(SimpleStatement::RangeClause {
                key: None,
                value: None,
                is_define: false,
                expression,
                span,
            });
        }

        let targets = self.parse_expression_list()?;
        if let Some(operator) = self.peek_assign_operator() {
            self.advance();
            if mode == SimpleStatementMode::RangeAllowed
                && self.peek_is_keyword(Keyword::Range)
                && matches!(operator, AssignOperator::Assign | AssignOperator::Define)
            {
                self.advance();
                let expression = self.parse_expression()?;
                let span = start.to(expression.span());
                let mut targets = targets.into_iter();
                return Ok(SimpleStatement::RangeClause {
                    key: targets.next(),
                    value: targets.next(),
                    is_define: operator == AssignOperator::Define,
                    expression,
                    span,
                });
            }
            let values = self.parse_expression_list()?;
            return Ok(SimpleStatement::Plain(Statement::Assign {
                targets,
                operator,
                values,
                span: start.to(&self.previous_span()),
            }));
        }

        let statement = match self.peek().kind {
            TokenKind::Symbol(Symbol::Colon)
                if mode == SimpleStatementMode::LabelAllowed
                    && matches!(targets.as_slice(), [Expression::Identifier(_)]) =>
            {
                let colon = self.advance().span;
                let Some(Expression::Identifier(label)) = targets.into_iter().next() else {
                    return Err(self.unexpected(Expected::Identifier));
                };
                let statement = if self.peek_is_symbol(Symbol::RightBrace) {
                    Statement::Empty { span: colon }
                } else {
                    self.parse_statement()?
                };
                Statement::Labeled {
                    label,
                    statement: Box::new(statement),
                    span: start.to(&self.previous_span()),
                }
            }
            TokenKind::Symbol(Symbol::Arrow) => {
                let channel = single_expression(targets)?;
                self.advance();
                let value = self.parse_expression()?;
                let span = start.to(value.span());
                Statement::Send {
                    channel,
                    value,
                    span,
                }
            }
            TokenKind::Symbol(symbol @ (Symbol::PlusPlus | Symbol::MinusMinus)) => {
                let target = single_expression(targets)?;
                let end = self.advance().span;
                Statement::IncrementDecrement {
                    target,
                    is_increment: symbol == Symbol::PlusPlus,
                    span: start.to(&end),
                }
            }
            _ => Statement::Expression(single_expression(targets)?),
        };
        Ok(SimpleStatement::Plain(statement))
    }

    fn peek_assign_operator(&self) -> Option<AssignOperator> {
        let TokenKind::Symbol(symbol) = self.peek().kind else {
            return None;
        };
        let operator = match symbol {
            Symbol::Assign => AssignOperator::Assign,
            Symbol::ColonAssign => AssignOperator::Define,
            Symbol::PlusAssign => AssignOperator::Compound(BinaryOperator::Add),
            Symbol::MinusAssign => AssignOperator::Compound(BinaryOperator::Subtract),
            Symbol::StarAssign => AssignOperator::Compound(BinaryOperator::Multiply),
            Symbol::SlashAssign => AssignOperator::Compound(BinaryOperator::Divide),
            Symbol::PercentAssign => AssignOperator::Compound(BinaryOperator::Remainder),
            Symbol::AmpersandAssign => AssignOperator::Compound(BinaryOperator::BitwiseAnd),
            Symbol::PipeAssign => AssignOperator::Compound(BinaryOperator::BitwiseOr),
            Symbol::CaretAssign => AssignOperator::Compound(BinaryOperator::BitwiseXor),
            Symbol::ShiftLeftAssign => AssignOperator::Compound(BinaryOperator::ShiftLeft),
            Symbol::ShiftRightAssign => AssignOperator::Compound(BinaryOperator::ShiftRight),
            Symbol::AmpersandCaretAssign => AssignOperator::Compound(BinaryOperator::BitClear),
            _ => return None,
        };
        Some(operator)
    }

    fn parse_if_statement(&mut self) -> ParseResult<Statement> {
        let start = self.expect_keyword(Keyword::If)?;
        let saved_level = self.expression_level;
        self.expression_level = -1;
        let header = self.parse_if_header();
        self.expression_level = saved_level;
        let (init, condition) = header?;

        let then_block = self.parse_block()?;
        let else_branch = if self.peek_is_keyword(Keyword::Else) {
            self.advance();
            if self.peek_is_keyword(Keyword::If) {
                Some(Box::new(self.parse_if_statement()?))
            } else if self.peek_is_symbol(Symbol::LeftBrace) {
                Some(Box::new(Statement::Block(self.parse_block()?)))
            } else {
                return Err(ParseError::InvalidConstruct {
                    kind: InvalidConstructKind::ElseMustBeFollowedByIfOrBlock,
                    span: self.peek_span(),
                });
            }
        } else {
            None
        };
        Ok(Statement::If {
            init,
            condition,
            then_block,
            else_branch,
            span: start.to(&self.previous_span()),
        })
    }

    fn parse_if_header(&mut self) -> ParseResult<(Option<Box<Statement>>, Expression)> {
        if self.peek_is_symbol(Symbol::LeftBrace) {
            return Err(self.missing_condition(Keyword::If));
        }
        let first = if self.peek_is_statement_terminator() {
            None
        } else {
            Some(self.parse_plain_simple_statement(SimpleStatementMode::Basic)?)
        };
        if !self.peek_is_statement_terminator() {
            return match first {
                Some(statement) => Ok((None, condition_expression(statement)?)),
                None => Err(self.missing_condition(Keyword::If)),
            };
        }
        self.advance();
        if self.peek_is_symbol(Symbol::LeftBrace) {
            return Err(self.missing_condition(Keyword::If));
        }
        let condition =
            condition_expression(self.parse_plain_simple_statement(SimpleStatementMode::Basic)?)?;
        Ok((first.map(Box::new), condition))
    }

    fn parse_switch_statement(&mut self) -> ParseResult<Statement> {
        let start = self.expect_keyword(Keyword::Switch)?;
        let saved_level = self.expression_level;
        self.expression_level = -1;
        let header = self.parse_switch_header();
        self.expression_level = saved_level;
        let (init, tag_or_guard) = header?;

        self.expect_symbol(Symbol::LeftBrace)?;
        let mut clauses = Vec::new();
        loop {
            self.skip_statement_terminators();
            if self.peek_is_symbol(Symbol::RightBrace) || self.at_eof() {
                break;
            }
            clauses.push(self.parse_case_clause()?);
        }
        let end = self.expect_symbol(Symbol::RightBrace)?;
        let span = start.to(&end);

        match tag_or_guard {
            Some(guard) if is_type_switch_guard(&guard) => Ok(Statement::TypeSwitch {
                init,
                guard: Box::new(guard),
                clauses,
                span,
            }),
            Some(tag) => Ok(Statement::Switch {
                init,
                tag: Some(condition_expression(tag)?),
                clauses,
                span,
            }),
            None => Ok(Statement::Switch {
                init,
                tag: None,
                clauses,
                span,
            }),
        }
    }

    fn parse_switch_header(&mut self) -> ParseResult<(Option<Box<Statement>>, Option<Statement>)> {
        if self.peek_is_symbol(Symbol::LeftBrace) {
            return Ok((None, None));
        }
        let first = if self.peek_is_statement_terminator() {
            None
        } else {
            Some(self.parse_plain_simple_statement(SimpleStatementMode::Basic)?)
        };
        if !self.peek_is_statement_terminator() {
            return Ok((None, first));
        }
        self.advance();
        let second = if self.peek_is_symbol(Symbol::LeftBrace) {
            None
        } else {
            Some(self.parse_plain_simple_statement(SimpleStatementMode::Basic)?)
        };
        Ok((first.map(Box::new), second))
    }

    fn parse_case_clause(&mut self) -> ParseResult<CaseClause> {
        let start = self.peek_span();
        let expressions = if self.peek_is_keyword(Keyword::Case) {
            self.advance();
            self.parse_expression_list()?
        } else if self.peek_is_keyword(Keyword::Default) {
            self.advance();
            Vec::new()
        } else {
            return Err(self.unexpected(Expected::Keyword(Keyword::Case)));
        };
        self.expect_symbol(Symbol::Colon)?;
        let body = self.parse_statement_list();
        Ok(CaseClause {
            expressions,
            body,
            span: start.to(&self.previous_span()),
        })
    }

    fn parse_select_statement(&mut self) -> ParseResult<Statement> {
        let start = self.expect_keyword(Keyword::Select)?;
        self.expect_symbol(Symbol::LeftBrace)?;
        let mut clauses = Vec::new();
        loop {
            self.skip_statement_terminators();
            if self.peek_is_symbol(Symbol::RightBrace) || self.at_eof() {
                break;
            }
            let clause_start = self.peek_span();
            let communication = if self.peek_is_keyword(Keyword::Case) {
                self.advance();
                Some(Box::new(
                    self.parse_plain_simple_statement(SimpleStatementMode::Basic)?,
                ))
            } else if self.peek_is_keyword(Keyword::Default) {
                self.advance();
                None
            } else {
                return Err(self.unexpected(Expected::Keyword(Keyword::Case)));
            };
            self.expect_symbol(Symbol::Colon)?;
            let body = self.parse_statement_list();
            clauses.push(CommunicationClause {
                communication,
                body,
                span: clause_start.to(&self.previous_span()),
            });
        }
        let end = self.expect_symbol(Symbol::RightBrace)?;
        Ok(Statement::Select {
            clauses,
            span: start.to(&end),
        })
    }

    fn parse_for_statement(&mut self) -> ParseResult<Statement> {
        let start = self.expect_keyword(Keyword::For)?;
        let saved_level = self.expression_level;
        self.expression_level = -1;
        let header = self.parse_for_header();
        self.expression_level = saved_level;
        let header = header?;

        let body = self.parse_block()?;
        let span = start.to(&body.span);
        Ok(match header {
            ForHeader::Clauses {
                init,
                condition,
                post,
            } => Statement::For {
                init,
                condition,
                post,
                body,
                span,
            },
            ForHeader::Range {
                key,
                value,
                is_define,
                expression,
            } => Statement::Range {
                key,
                value,
                is_define,
                expression,
                body,
                span,
            },
        })
    }

    fn parse_for_header(&mut self) -> ParseResult<ForHeader> {
        if self.peek_is_symbol(Symbol::LeftBrace) {
            return Ok(ForHeader::Clauses {
                init: None,
                condition: None,
                post: None,
            });
        }

        let mut first = None;
        if !self.peek_is_statement_terminator() {
            match self.parse_simple_statement(SimpleStatementMode::RangeAllowed)? {
                SimpleStatement::RangeClause {
                    key,
                    value,
                    is_define,
                    expression,
                    ..
                } => {
                    return Ok(ForHeader::Range {
                        key,
                        value,
                        is_define,
                        expression,
                    });
                }
                SimpleStatement::Plain(statement) => first = Some(statement),
            }
        }

        if !self.peek_is_statement_terminator() {
            let condition = first.map(condition_expression).transpose()?;
            return Ok(ForHeader::Clauses {
                init: None,
                condition,
                post: None,
            });
        }

        self.advance();
        let condition = if self.peek_is_statement_terminator() {
            None
        } else {
            Some(condition_expression(
                self.parse_plain_simple_statement(SimpleStatementMode::Basic)?,
            )?)
        };
        if !self.peek_is_statement_terminator() {
            return Err(self.unexpected(Expected::Symbol(Symbol::Semicolon)));
        }
        self.advance();
        let post = if self.peek_is_symbol(Symbol::LeftBrace) {
            None
        } else {
            Some(Box::new(
                self.parse_plain_simple_statement(SimpleStatementMode::Basic)?,
            ))
        };
        Ok(ForHeader::Clauses {
            init: first.map(Box::new),
            condition,
            post,
        })
    }

    fn missing_condition(&self, keyword: Keyword) -> ParseError {
        ParseError::InvalidConstruct {
            kind: InvalidConstructKind::MissingCondition { keyword },
            span: self.peek_span(),
        }
    }
}

fn single_expression(expressions: Vec<Expression>) -> ParseResult<Expression> {
    let found = expressions.len();
    let mut expressions = expressions.into_iter();
    match (expressions.next(), expressions.next()) {
        (Some(expression), None) => Ok(expression),
        (Some(first), Some(_)) => Err(ParseError::InvalidConstruct {
            kind: InvalidConstructKind::ExpectedSingleExpression { found },
            span: first.span().clone(),
        }),
        (None, _) => Err(ParseError::UnparsableToken),
    }
}

fn condition_expression(statement: Statement) -> ParseResult<Expression> {
    match statement {
        Statement::Expression(expression) => Ok(expression),
        other => Err(ParseError::InvalidConstruct {
            kind: InvalidConstructKind::ConditionMustBeExpression,
            span: other.span().clone(),
        }),
    }
}

/// `x.(type)` or `v := x.(type)`.
fn is_type_switch_guard(statement: &Statement) -> bool {
    let assertion = match statement {
        Statement::Expression(expression) => expression,
        Statement::Assign {
            targets,
            operator: AssignOperator::Define,
            values,
            ..
        } if targets.len() == 1 && values.len() == 1 => &values[0],
        _ => return false,
    };
    matches!(
        assertion,
        Expression::TypeAssertion {
            asserted_type: None,
            ..
        }
    )
}
