//! Pre-order traversal over a parsed file.
//!
//! [`inspect`] calls the visitor for a node before its children. Returning
//! `false` skips the children of that node; traversal of its siblings
//! continues.

use crate::ast::{
    Block, CaseClause, CommunicationClause, Declaration, Expression, Field, FunctionType,
    Identifier, InterfaceElement, ParsedFile, Specification, Statement,
};

#[derive(Clone, Copy, Debug)]
pub enum Node<'a> {
    File(&'a ParsedFile),
    Declaration(&'a Declaration),
    Specification(&'a Specification),
    Field(&'a Field),
    Block(&'a Block),
    Statement(&'a Statement),
    CaseClause(&'a CaseClause),
    CommunicationClause(&'a CommunicationClause),
    InterfaceElement(&'a InterfaceElement),
    Expression(&'a Expression),
    /// A name that is not itself an expression: declared names, labels,
    /// selector members.
    Identifier(&'a Identifier),
}

pub fn inspect<'a, F>(file: &'a ParsedFile, visitor: &mut F)
where
    F: FnMut(Node<'a>) -> bool,
{
    Walker { visitor }.file(file);
}

struct Walker<'v, F> {
    visitor: &'v mut F,
}

impl<'a, F> Walker<'_, F>
where
    F: FnMut(Node<'a>) -> bool,
{
    fn visit(&mut self, node: Node<'a>) -> bool {
        (self.visitor)(node)
    }

    fn file(&mut self, file: &'a ParsedFile) {
        if !self.visit(Node::File(file)) {
            return;
        }
        self.identifier(&file.package_name);
        for declaration in &file.declarations {
            self.declaration(declaration);
        }
    }

    fn declaration(&mut self, declaration: &'a Declaration) {
        if !self.visit(Node::Declaration(declaration)) {
            return;
        }
        match declaration {
            Declaration::Function(function) => {
                if let Some(receiver) = &function.receiver {
                    self.field(receiver);
                }
                self.identifier(&function.name);
                self.function_type(&function.signature);
                if let Some(body) = &function.body {
                    self.block(body);
                }
            }
            Declaration::Generic(generic) => {
                for specification in &generic.specifications {
                    self.specification(specification);
                }
            }
        }
    }

    fn specification(&mut self, specification: &'a Specification) {
        if !self.visit(Node::Specification(specification)) {
            return;
        }
        match specification {
            Specification::Import(import) => {
                if let Some(alias) = &import.alias {
                    self.identifier(alias);
                }
            }
            Specification::Value(value) => {
                for name in &value.names {
                    self.identifier(name);
                }
                if let Some(type_expression) = &value.type_expression {
                    self.expression(type_expression);
                }
                self.expressions(&value.values);
            }
            Specification::Type(type_specification) => {
                self.identifier(&type_specification.name);
                self.fields(&type_specification.type_parameters);
                self.expression(&type_specification.type_expression);
            }
        }
    }

    fn field(&mut self, field: &'a Field) {
        if !self.visit(Node::Field(field)) {
            return;
        }
        for name in &field.names {
            self.identifier(name);
        }
        self.expression(&field.type_expression);
        if let Some(tag) = &field.tag {
            self.expression(tag);
        }
    }

    fn fields(&mut self, fields: &'a [Field]) {
        for field in fields {
            self.field(field);
        }
    }

    fn function_type(&mut self, function_type: &'a FunctionType) {
        self.fields(&function_type.type_parameters);
        self.fields(&function_type.parameters);
        self.fields(&function_type.results);
    }

    fn identifier(&mut self, identifier: &'a Identifier) {
        self.visit(Node::Identifier(identifier));
    }

    fn block(&mut self, block: &'a Block) {
        if !self.visit(Node::Block(block)) {
            return;
        }
        self.statements(&block.statements);
    }

    fn statements(&mut self, statements: &'a [Statement]) {
        for statement in statements {
            self.statement(statement);
        }
    }

    fn optional_statement(&mut self, statement: Option<&'a Statement>) {
        if let Some(statement) = statement {
            self.statement(statement);
        }
    }

    fn statement(&mut self, statement: &'a Statement) {
        if !self.visit(Node::Statement(statement)) {
            return;
        }
        match statement {
            Statement::Declaration(generic) => {
                for specification in &generic.specifications {
                    self.specification(specification);
                }
            }
            Statement::Labeled {
                label, statement, ..
            } => {
                self.identifier(label);
                self.statement(statement);
            }
            Statement::Expression(expression) => self.expression(expression),
            Statement::Send { channel, value, .. } => {
                self.expression(channel);
                self.expression(value);
            }
            Statement::IncrementDecrement { target, .. } => self.expression(target),
            Statement::Assign {
                targets, values, ..
            } => {
                self.expressions(targets);
                self.expressions(values);
            }
            Statement::Go { call, .. } | Statement::Defer { call, .. } => self.expression(call),
            Statement::Return { results, .. } => self.expressions(results),
            Statement::Branch { label, .. } => {
                if let Some(label) = label {
                    self.identifier(label);
                }
            }
            Statement::Block(block) => self.block(block),
            Statement::If {
                init,
                condition,
                then_block,
                else_branch,
                ..
            } => {
                self.optional_statement(init.as_deref());
                self.expression(condition);
                self.block(then_block);
                self.optional_statement(else_branch.as_deref());
            }
            Statement::Switch {
                init, tag, clauses, ..
            } => {
                self.optional_statement(init.as_deref());
                if let Some(tag) = tag {
                    self.expression(tag);
                }
                for clause in clauses {
                    self.case_clause(clause);
                }
            }
            Statement::TypeSwitch {
                init,
                guard,
                clauses,
                ..
            } => {
                self.optional_statement(init.as_deref());
                self.statement(guard);
                for clause in clauses {
                    self.case_clause(clause);
                }
            }
            Statement::Select { clauses, .. } => {
                for clause in clauses {
                    if !self.visit(Node::CommunicationClause(clause)) {
                        continue;
                    }
                    self.optional_statement(clause.communication.as_deref());
                    self.statements(&clause.body);
                }
            }
            Statement::For {
                init,
                condition,
                post,
                body,
                ..
            } => {
                self.optional_statement(init.as_deref());
                if let Some(condition) = condition {
                    self.expression(condition);
                }
                self.optional_statement(post.as_deref());
                self.block(body);
            }
            Statement::Range {
                key,
                value,
                expression,
                body,
                ..
            } => {
                if let Some(key) = key {
                    self.expression(key);
                }
                if let Some(value) = value {
                    self.expression(value);
                }
                self.expression(expression);
                self.block(body);
            }
            Statement::Empty { .. } => {}
        }
    }

    fn case_clause(&mut self, clause: &'a CaseClause) {
        if !self.visit(Node::CaseClause(clause)) {
            return;
        }
        self.expressions(&clause.expressions);
        self.statements(&clause.body);
    }

    fn expressions(&mut self, expressions: &'a [Expression]) {
        for expression in expressions {
            self.expression(expression);
        }
    }

    fn optional_expression(&mut self, expression: Option<&'a Expression>) {
        if let Some(expression) = expression {
            self.expression(expression);
        }
    }

    fn expression(&mut self, expression: &'a Expression) {
        if !self.visit(Node::Expression(expression)) {
            return;
        }
        match expression {
            Expression::Identifier(_)
            | Expression::StringLiteral { .. }
            | Expression::BasicLiteral { .. } => {}
            Expression::CompositeLiteral {
                type_expression,
                elements,
                ..
            } => {
                self.optional_expression(type_expression.as_deref());
                self.expressions(elements);
            }
            Expression::KeyValue { key, value, .. } => {
                self.expression(key);
                self.expression(value);
            }
            Expression::FunctionLiteral {
                signature, body, ..
            } => {
                self.function_type(signature);
                self.block(body);
            }
            Expression::Parenthesized { inner, .. } => self.expression(inner),
            Expression::Selector {
                receiver, member, ..
            } => {
                self.expression(receiver);
                self.identifier(member);
            }
            Expression::Index {
                receiver, indices, ..
            } => {
                self.expression(receiver);
                self.expressions(indices);
            }
            Expression::Slice {
                receiver,
                low,
                high,
                max,
                ..
            } => {
                self.expression(receiver);
                self.optional_expression(low.as_deref());
                self.optional_expression(high.as_deref());
                self.optional_expression(max.as_deref());
            }
            Expression::TypeAssertion {
                receiver,
                asserted_type,
                ..
            } => {
                self.expression(receiver);
                self.optional_expression(asserted_type.as_deref());
            }
            Expression::Call {
                callee, arguments, ..
            } => {
                self.expression(callee);
                self.expressions(arguments);
            }
            Expression::Star { operand, .. } | Expression::Unary { operand, .. } => {
                self.expression(operand);
            }
            Expression::Binary { left, right, .. } => {
                self.expression(left);
                self.expression(right);
            }
            Expression::Ellipsis { element, .. } => {
                self.optional_expression(element.as_deref());
            }
            Expression::ArrayType {
                length, element, ..
            } => {
                self.optional_expression(length.as_deref());
                self.expression(element);
            }
            Expression::MapType { key, value, .. } => {
                self.expression(key);
                self.expression(value);
            }
            Expression::ChannelType { element, .. } => self.expression(element),
            Expression::FunctionType(function_type) => self.function_type(function_type),
            Expression::StructType { fields, .. } => self.fields(fields),
            Expression::InterfaceType { elements, .. } => {
                for element in elements {
                    if !self.visit(Node::InterfaceElement(element)) {
                        continue;
                    }
                    match element {
                        InterfaceElement::Method {
                            name, signature, ..
                        } => {
                            self.identifier(name);
                            self.function_type(signature);
                        }
                        InterfaceElement::Embedded(embedded) => self.expression(embedded),
                    }
                }
            }
        }
    }
}
