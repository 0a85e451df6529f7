use checker__source::Span;

#[derive(Clone, Debug, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub struct ParsedFile {
    pub package_name: Identifier,
    pub declarations: Vec<Declaration>,
    pub span: Span,
}

impl ParsedFile {
    pub fn imports(&self) -> impl Iterator<Item = &ImportSpecification> {
        self.declarations
            .iter()
            .filter_map(|declaration| match declaration {
                Declaration::Generic(generic) => Some(generic),
                Declaration::Function(_) => None,
            })
            .flat_map(|generic| generic.specifications.iter())
            .filter_map(|specification| match specification {
                Specification::Import(import) => Some(import),
                Specification::Value(_) | Specification::Type(_) => None,
            })
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionDeclaration> {
        self.declarations
            .iter()
            .filter_map(|declaration| match declaration {
                Declaration::Function(function) => Some(function),
                Declaration::Generic(_) => None,
            })
    }
}

#[derive(Clone, Debug)]
pub enum Declaration {
    Function(FunctionDeclaration),
    Generic(GenericDeclaration),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclarationKeyword {
    Import,
    Const,
    Type,
    Var,
}

/// `import`, `const`, `type` or `var`, either single or parenthesized.
#[derive(Clone, Debug)]
pub struct GenericDeclaration {
    pub keyword: DeclarationKeyword,
    pub specifications: Vec<Specification>,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub enum Specification {
    Import(ImportSpecification),
    Value(ValueSpecification),
    Type(TypeSpecification),
}

#[derive(Clone, Debug)]
pub struct ImportSpecification {
    /// Explicit package name, `.` or `_`.
    pub alias: Option<Identifier>,
    pub path: String,
    pub path_span: Span,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub struct ValueSpecification {
    pub names: Vec<Identifier>,
    pub type_expression: Option<Expression>,
    pub values: Vec<Expression>,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub struct TypeSpecification {
    pub name: Identifier,
    pub type_parameters: Vec<Field>,
    pub is_alias: bool,
    pub type_expression: Expression,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub struct FunctionDeclaration {
    pub receiver: Option<Field>,
    pub name: Identifier,
    pub signature: FunctionType,
    pub body: Option<Block>,
    pub span: Span,
}

/// A parameter, result, struct field or type parameter group.
///
/// Embedded struct fields and unnamed parameters have no names.
#[derive(Clone, Debug)]
pub struct Field {
    pub names: Vec<Identifier>,
    pub type_expression: Expression,
    pub tag: Option<Expression>,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub struct FunctionType {
    pub type_parameters: Vec<Field>,
    pub parameters: Vec<Field>,
    pub results: Vec<Field>,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub enum InterfaceElement {
    Method {
        name: Identifier,
        signature: FunctionType,
        span: Span,
    },
    /// Embedded interface or type-set term such as `~int | ~string`.
    Embedded(Expression),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelDirection {
    Both,
    Send,
    Receive,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LiteralKind {
    Integer,
    Float,
    Imaginary,
    Rune,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,
    Negate,
    Not,
    BitwiseComplement,
    AddressOf,
    Receive,
    Tilde,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOperator {
    LogicalOr,
    LogicalAnd,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Add,
    Subtract,
    BitwiseOr,
    BitwiseXor,
    Multiply,
    Divide,
    Remainder,
    ShiftLeft,
    ShiftRight,
    BitwiseAnd,
    BitClear,
}

impl BinaryOperator {
    /// Go operator precedence, from 1 (`||`) to 5 (multiplicative).
    #[must_use]
    pub fn precedence(self) -> u8 {
        match self {
            Self::LogicalOr => 1,
            Self::LogicalAnd => 2,
            Self::Equal
            | Self::NotEqual
            | Self::Less
            | Self::LessEqual
            | Self::Greater
            | Self::GreaterEqual => 3,
            Self::Add | Self::Subtract | Self::BitwiseOr | Self::BitwiseXor => 4,
            Self::Multiply
            | Self::Divide
            | Self::Remainder
            | Self::ShiftLeft
            | Self::ShiftRight
            | Self::BitwiseAnd
            | Self::BitClear => 5,
        }
    }
}

#[derive(Clone, Debug)]
pub enum Expression {
    Identifier(Identifier),
    /// Interpreted or raw string literal. `value` is the decoded contents.
    StringLiteral {
        value: String,
        raw: String,
        span: Span,
    },
    BasicLiteral {
        kind: LiteralKind,
        raw: String,
        span: Span,
    },
    /// `T{...}`, or `{...}` with an elided type inside another literal.
    CompositeLiteral {
        type_expression: Option<Box<Expression>>,
        elements: Vec<Expression>,
        span: Span,
    },
    KeyValue {
        key: Box<Expression>,
        value: Box<Expression>,
        span: Span,
    },
    FunctionLiteral {
        signature: FunctionType,
        body: Block,
        span: Span,
    },
    Parenthesized {
        inner: Box<Expression>,
        span: Span,
    },
    Selector {
        receiver: Box<Expression>,
        member: Identifier,
        span: Span,
    },
    /// `x[i]`, or `x[A, B]` for generic instantiation.
    Index {
        receiver: Box<Expression>,
        indices: Vec<Expression>,
        span: Span,
    },
    Slice {
        receiver: Box<Expression>,
        low: Option<Box<Expression>>,
        high: Option<Box<Expression>>,
        max: Option<Box<Expression>>,
        span: Span,
    },
    /// `x.(T)`; `asserted_type` is `None` for `x.(type)`.
    TypeAssertion {
        receiver: Box<Expression>,
        asserted_type: Option<Box<Expression>>,
        span: Span,
    },
    Call {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
        has_ellipsis: bool,
        span: Span,
    },
    /// Pointer dereference or pointer type.
    Star {
        operand: Box<Expression>,
        span: Span,
    },
    Unary {
        operator: UnaryOperator,
        operand: Box<Expression>,
        span: Span,
    },
    Binary {
        operator: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
        span: Span,
    },
    /// `...T` in a parameter list, or `...` as an array length.
    Ellipsis {
        element: Option<Box<Expression>>,
        span: Span,
    },
    /// `[N]T`, `[...]T`, or `[]T` when `length` is `None`.
    ArrayType {
        length: Option<Box<Expression>>,
        element: Box<Expression>,
        span: Span,
    },
    MapType {
        key: Box<Expression>,
        value: Box<Expression>,
        span: Span,
    },
    ChannelType {
        direction: ChannelDirection,
        element: Box<Expression>,
        span: Span,
    },
    FunctionType(FunctionType),
    StructType {
        fields: Vec<Field>,
        span: Span,
    },
    InterfaceType {
        elements: Vec<InterfaceElement>,
        span: Span,
    },
}

impl Expression {
    #[must_use]
    pub fn span(&self) -> &Span {
        match self {
            Expression::Identifier(identifier) => &identifier.span,
            Expression::FunctionType(function_type) => &function_type.span,
            Expression::StringLiteral { span, .. }
            | Expression::BasicLiteral { span, .. }
            | Expression::CompositeLiteral { span, .. }
            | Expression::KeyValue { span, .. }
            | Expression::FunctionLiteral { span, .. }
            | Expression::Parenthesized { span, .. }
            | Expression::Selector { span, .. }
            | Expression::Index { span, .. }
            | Expression::Slice { span, .. }
            | Expression::TypeAssertion { span, .. }
            | Expression::Call { span, .. }
            | Expression::Star { span, .. }
            | Expression::Unary { span, .. }
            | Expression::Binary { span, .. }
            | Expression::Ellipsis { span, .. }
            | Expression::ArrayType { span, .. }
            | Expression::MapType { span, .. }
            | Expression::ChannelType { span, .. }
            | Expression::StructType { span, .. }
            | Expression::InterfaceType { span, .. } => span,
        }
    }

    /// Strips any number of enclosing parentheses.
    #[must_use]
    pub fn unparenthesized(&self) -> &Expression {
        let mut expression = self;
        while let Expression::Parenthesized { inner, .. } = expression {
            expression = inner;
        }
        expression
    }
}

#[derive(Clone, Debug)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub span: Span,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignOperator {
    /// `=`
    Assign,
    /// `:=`
    Define,
    /// `+=`, `<<=`, ...
    Compound(BinaryOperator),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BranchKeyword {
    Break,
    Continue,
    Goto,
    Fallthrough,
}

/// `case` or `default` clause of an expression or type switch.
#[derive(Clone, Debug)]
pub struct CaseClause {
    /// Empty for `default`.
    pub expressions: Vec<Expression>,
    pub body: Vec<Statement>,
    pub span: Span,
}

/// `case` or `default` clause of a `select`.
#[derive(Clone, Debug)]
pub struct CommunicationClause {
    /// `None` for `default`.
    pub communication: Option<Box<Statement>>,
    pub body: Vec<Statement>,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub enum Statement {
    Declaration(GenericDeclaration),
    Labeled {
        label: Identifier,
        statement: Box<Statement>,
        span: Span,
    },
    Expression(Expression),
    Send {
        channel: Expression,
        value: Expression,
        span: Span,
    },
    IncrementDecrement {
        target: Expression,
        is_increment: bool,
        span: Span,
    },
    Assign {
        targets: Vec<Expression>,
        operator: AssignOperator,
        values: Vec<Expression>,
        span: Span,
    },
    Go {
        call: Expression,
        span: Span,
    },
    Defer {
        call: Expression,
        span: Span,
    },
    Return {
        results: Vec<Expression>,
        span: Span,
    },
    Branch {
        keyword: BranchKeyword,
        label: Option<Identifier>,
        span: Span,
    },
    Block(Block),
    If {
        init: Option<Box<Statement>>,
        condition: Expression,
        then_block: Block,
        /// Either another `If` or a `Block`.
        else_branch: Option<Box<Statement>>,
        span: Span,
    },
    Switch {
        init: Option<Box<Statement>>,
        tag: Option<Expression>,
        clauses: Vec<CaseClause>,
        span: Span,
    },
    TypeSwitch {
        init: Option<Box<Statement>>,
        /// `x := y.(type)` or `y.(type)`.
        guard: Box<Statement>,
        clauses: Vec<CaseClause>,
        span: Span,
    },
    Select {
        clauses: Vec<CommunicationClause>,
        span: Span,
    },
    For {
        init: Option<Box<Statement>>,
        condition: Option<Expression>,
        post: Option<Box<Statement>>,
        body: Block,
        span: Span,
    },
    Range {
        key: Option<Expression>,
        value: Option<Expression>,
        is_define: bool,
        expression: Expression,
        body: Block,
        span: Span,
    },
    Empty {
        span: Span,
    },
}

impl Statement {
    #[must_use]
    pub fn span(&self) -> &Span {
        match self {
            Statement::Declaration(declaration) => &declaration.span,
            Statement::Expression(expression) => expression.span(),
            Statement::Block(block) => &block.span,
            Statement::Labeled { span, .. }
            | Statement::Send { span, .. }
            | Statement::IncrementDecrement { span, .. }
            | Statement::Assign { span, .. }
            | Statement::Go { span, .. }
            | Statement::Defer { span, .. }
            | Statement::Return { span, .. }
            | Statement::Branch { span, .. }
            | Statement::If { span, .. }
            | Statement::Switch { span, .. }
            | Statement::TypeSwitch { span, .. }
            | Statement::Select { span, .. }
            | Statement::For { span, .. }
            | Statement::Range { span, .. }
            | Statement::Empty { span } => span,
        }
    }
}
