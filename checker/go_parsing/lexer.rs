use checker__source::Span;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Keyword {
    // keep-sorted start
    Break,
    Case,
    Chan,
    Const,
    Continue,
    Default,
    Defer,
    Else,
    Fallthrough,
    For,
    Func,
    Go,
    Goto,
    If,
    Import,
    Interface,
    Map,
    Package,
    Range,
    Return,
    Select,
    Struct,
    Switch,
    Type,
    Var,
    // keep-sorted end
}

impl Keyword {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            // keep-sorted start
            Keyword::Break => "break",
            Keyword::Case => "case",
            Keyword::Chan => "chan",
            Keyword::Const => "const",
            Keyword::Continue => "continue",
            Keyword::Default => "default",
            Keyword::Defer => "defer",
            Keyword::Else => "else",
            Keyword::Fallthrough => "fallthrough",
            Keyword::For => "for",
            Keyword::Func => "func",
            Keyword::Go => "go",
            Keyword::Goto => "goto",
            Keyword::If => "if",
            Keyword::Import => "import",
            Keyword::Interface => "interface",
            Keyword::Map => "map",
            Keyword::Package => "package",
            Keyword::Range => "range",
            Keyword::Return => "return",
            Keyword::Select => "select",
            Keyword::Struct => "struct",
            Keyword::Switch => "switch",
            Keyword::Type => "type",
            Keyword::Var => "var",
            // keep-sorted end
        }
    }

    fn from_identifier(text: &str) -> Option<Self> {
        let keyword = match text {
            "break" => Keyword::Break,
            "case" => Keyword::Case,
            "chan" => Keyword::Chan,
            "const" => Keyword::Const,
            "continue" => Keyword::Continue,
            "default" => Keyword::Default,
            "defer" => Keyword::Defer,
            "else" => Keyword::Else,
            "fallthrough" => Keyword::Fallthrough,
            "for" => Keyword::For,
            "func" => Keyword::Func,
            "go" => Keyword::Go,
            "goto" => Keyword::Goto,
            "if" => Keyword::If,
            "import" => Keyword::Import,
            "interface" => Keyword::Interface,
            "map" => Keyword::Map,
            "package" => Keyword::Package,
            "range" => Keyword::Range,
            "return" => Keyword::Return,
            "select" => Keyword::Select,
            "struct" => Keyword::Struct,
            "switch" => Keyword::Switch,
            "type" => Keyword::Type,
            "var" => Keyword::Var,
            _ => return None,
        };
        Some(keyword)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Symbol {
    // keep-sorted start
    Ampersand,
    AmpersandAssign,
    AmpersandCaret,
    AmpersandCaretAssign,
    AndAnd,
    Arrow,
    Assign,
    BangEqual,
    Caret,
    CaretAssign,
    Colon,
    ColonAssign,
    Comma,
    Dot,
    Ellipsis,
    EqualEqual,
    Exclamation,
    Greater,
    GreaterEqual,
    LeftBrace,
    LeftBracket,
    LeftParenthesis,
    Less,
    LessEqual,
    Minus,
    MinusAssign,
    MinusMinus,
    Percent,
    PercentAssign,
    Pipe,
    PipeAssign,
    PipePipe,
    Plus,
    PlusAssign,
    PlusPlus,
    RightBrace,
    RightBracket,
    RightParenthesis,
    Semicolon,
    ShiftLeft,
    ShiftLeftAssign,
    ShiftRight,
    ShiftRightAssign,
    Slash,
    SlashAssign,
    Star,
    StarAssign,
    Tilde,
    // keep-sorted end
}

/// Longest spelling first so that lexing is maximal munch.
const SYMBOLS: &[(&str, Symbol)] = &[
    ("&^=", Symbol::AmpersandCaretAssign),
    ("...", Symbol::Ellipsis),
    ("<<=", Symbol::ShiftLeftAssign),
    (">>=", Symbol::ShiftRightAssign),
    ("!=", Symbol::BangEqual),
    ("%=", Symbol::PercentAssign),
    ("&&", Symbol::AndAnd),
    ("&=", Symbol::AmpersandAssign),
    ("&^", Symbol::AmpersandCaret),
    ("*=", Symbol::StarAssign),
    ("++", Symbol::PlusPlus),
    ("+=", Symbol::PlusAssign),
    ("--", Symbol::MinusMinus),
    ("-=", Symbol::MinusAssign),
    ("/=", Symbol::SlashAssign),
    (":=", Symbol::ColonAssign),
    ("<-", Symbol::Arrow),
    ("<<", Symbol::ShiftLeft),
    ("<=", Symbol::LessEqual),
    ("==", Symbol::EqualEqual),
    (">=", Symbol::GreaterEqual),
    (">>", Symbol::ShiftRight),
    ("^=", Symbol::CaretAssign),
    ("|=", Symbol::PipeAssign),
    ("||", Symbol::PipePipe),
    ("!", Symbol::Exclamation),
    ("%", Symbol::Percent),
    ("&", Symbol::Ampersand),
    ("(", Symbol::LeftParenthesis),
    (")", Symbol::RightParenthesis),
    ("*", Symbol::Star),
    ("+", Symbol::Plus),
    (",", Symbol::Comma),
    ("-", Symbol::Minus),
    (".", Symbol::Dot),
    ("/", Symbol::Slash),
    (":", Symbol::Colon),
    (";", Symbol::Semicolon),
    ("<", Symbol::Less),
    ("=", Symbol::Assign),
    (">", Symbol::Greater),
    ("[", Symbol::LeftBracket),
    ("]", Symbol::RightBracket),
    ("^", Symbol::Caret),
    ("{", Symbol::LeftBrace),
    ("|", Symbol::Pipe),
    ("}", Symbol::RightBrace),
    ("~", Symbol::Tilde),
];

impl Symbol {
    pub(crate) fn as_str(self) -> &'static str {
        SYMBOLS
            .iter()
            .find(|(_, symbol)| *symbol == self)
            .map_or("?", |(spelling, _)| spelling)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NumberKind {
    Integer,
    Float,
    Imaginary,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum TokenKind {
    Identifier(String),
    Keyword(Keyword),
    Symbol(Symbol),
    Number { kind: NumberKind, raw: String },
    RuneLiteral(String),
    StringLiteral { raw: String, value: String },
    /// Raw line break from the source, or a general comment spanning lines.
    /// These are removed during semicolon insertion.
    Newline,
    /// Semicolon inserted at a line break.
    StatementTerminator,
    EndOfFile,
    Error,
}

#[derive(Clone, Debug)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

pub(crate) struct LexError {
    pub(crate) message: String,
    pub(crate) span: Span,
}

pub(crate) struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    index: usize,
    line: usize,
    column: usize,
    lex_errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        let mut lexer = Self {
            source,
            bytes: source.as_bytes(),
            index: 0,
            line: 1,
            column: 1,
            lex_errors: Vec::new(),
        };
        if source.starts_with('\u{feff}') {
            lexer.index = '\u{feff}'.len_utf8();
        }
        lexer
    }

    pub(crate) fn lex_all_tokens(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_end_of_file = token.kind == TokenKind::EndOfFile;
            tokens.push(token);
            if is_end_of_file {
                break;
            }
        }
        insert_statement_terminators(tokens)
    }

    pub(crate) fn into_errors(self) -> Vec<LexError> {
        self.lex_errors
    }

    fn next_token(&mut self) -> Token {
        if let Some(newline) = self.skip_whitespace_and_comments() {
            return newline;
        }
        let start = self.index;
        let (line, column) = (self.line, self.column);

        if self.at_end() {
            return self.token(TokenKind::EndOfFile, start, line, column);
        }

        let byte = self.peek_byte();
        match byte {
            b'\n' => {
                self.advance();
                self.token(TokenKind::Newline, start, line, column)
            }
            b'"' => self.lex_interpreted_string(start, line, column),
            b'`' => self.lex_raw_string(start, line, column),
            b'\'' => self.lex_rune(start, line, column),
            b'0'..=b'9' => self.lex_number(start, line, column),
            b'.' if self.peek_byte_at(1).is_some_and(|next| next.is_ascii_digit()) => {
                self.lex_number(start, line, column)
            }
            _ => {
                let character = self.peek_char();
                if is_letter(character) {
                    return self.lex_identifier(start, line, column);
                }
                if let Some((spelling, symbol)) = SYMBOLS
                    .iter()
                    .find(|(spelling, _)| self.match_bytes(spelling.as_bytes()))
                {
                    self.advance_by(spelling.len());
                    return self.token(TokenKind::Symbol(*symbol), start, line, column);
                }
                self.advance_by(character.len_utf8());
                self.error_token(
                    format!("invalid character {character:?}"),
                    start,
                    line,
                    column,
                )
            }
        }
    }

    fn token(&self, kind: TokenKind, start: usize, line: usize, column: usize) -> Token {
        Token {
            kind,
            span: Span {
                start,
                end: self.index,
                line,
                column,
            },
        }
    }

    fn lex_identifier(&mut self, start: usize, line: usize, column: usize) -> Token {
        while !self.at_end() {
            let character = self.peek_char();
            if is_letter(character) || character.is_numeric() {
                self.advance_by(character.len_utf8());
            } else {
                break;
            }
        }
        let text = &self.source[start..self.index];
        let kind = match Keyword::from_identifier(text) {
            Some(keyword) => TokenKind::Keyword(keyword),
            None => TokenKind::Identifier(text.to_string()),
        };
        self.token(kind, start, line, column)
    }

    fn lex_number(&mut self, start: usize, line: usize, column: usize) -> Token {
        let mut kind = NumberKind::Integer;
        let mut problem: Option<&'static str> = None;
        let mut is_decimal = true;

        if self.peek_byte() == b'0'
            && let Some(prefix) = self.peek_byte_at(1)
            && matches!(prefix.to_ascii_lowercase(), b'x' | b'b' | b'o')
        {
            self.advance_by(2);
            let radix = match prefix.to_ascii_lowercase() {
                b'x' => 16,
                b'b' => 2,
                _ => 8,
            };
            is_decimal = false;
            let digit_count = self.consume_digits(radix);
            if radix == 16 {
                let mut mantissa_digits = digit_count;
                if !self.at_end() && self.peek_byte() == b'.' {
                    self.advance();
                    kind = NumberKind::Float;
                    mantissa_digits += self.consume_digits(16);
                }
                if mantissa_digits == 0 {
                    problem = Some("hexadecimal literal has no digits");
                }
                if !self.at_end() && matches!(self.peek_byte(), b'p' | b'P') {
                    kind = NumberKind::Float;
                    if !self.consume_exponent() {
                        problem = Some("exponent has no digits");
                    }
                } else if kind == NumberKind::Float {
                    problem = Some("hexadecimal mantissa requires a 'p' exponent");
                }
            } else if digit_count == 0 {
                problem = Some(if radix == 2 {
                    "binary literal has no digits"
                } else {
                    "octal literal has no digits"
                });
            }
        } else {
            self.consume_digits(10);
        }

        if is_decimal {
            if !self.at_end() && self.peek_byte() == b'.' {
                self.advance();
                kind = NumberKind::Float;
                self.consume_digits(10);
            }
            if !self.at_end() && matches!(self.peek_byte(), b'e' | b'E') {
                kind = NumberKind::Float;
                if !self.consume_exponent() {
                    problem = Some("exponent has no digits");
                }
            }
        }

        if !self.at_end() && self.peek_byte() == b'i' {
            self.advance();
            kind = NumberKind::Imaginary;
        }

        if let Some(message) = problem {
            return self.error_token(message, start, line, column);
        }
        let raw = self.source[start..self.index].to_string();
        self.token(TokenKind::Number { kind, raw }, start, line, column)
    }

    /// Consumes digits valid in `radix` (plus `_` separators) and returns how
    /// many digits were seen.
    fn consume_digits(&mut self, radix: u32) -> usize {
        let mut count = 0;
        while !self.at_end() {
            let byte = self.peek_byte();
            if byte == b'_' {
                self.advance();
                continue;
            }
            // Decimal literals may contain 8 and 9 in legacy octal form.
            let accepted_radix = if radix == 8 || radix == 2 { 10 } else { radix };
            if (byte as char).is_digit(accepted_radix) {
                self.advance();
                count += 1;
            } else {
                break;
            }
        }
        count
    }

    fn consume_exponent(&mut self) -> bool {
        self.advance();
        if !self.at_end() && matches!(self.peek_byte(), b'+' | b'-') {
            self.advance();
        }
        self.consume_digits(10) > 0
    }

    fn lex_rune(&mut self, start: usize, line: usize, column: usize) -> Token {
        self.advance();
        let mut character_count = 0usize;
        loop {
            if self.at_end() || self.peek_byte() == b'\n' {
                return self.error_token("rune literal not terminated", start, line, column);
            }
            let character = self.peek_char();
            if character == '\'' {
                self.advance();
                break;
            }
            if character == '\\' {
                if let Err(message) = self.consume_escape(b'\'', &mut Vec::new()) {
                    self.record_error(message, self.index, self.line, self.column);
                }
            } else {
                self.advance_by(character.len_utf8());
            }
            character_count += 1;
        }
        if character_count != 1 {
            return self.error_token(
                "rune literal must contain exactly one character",
                start,
                line,
                column,
            );
        }
        let raw = self.source[start..self.index].to_string();
        self.token(TokenKind::RuneLiteral(raw), start, line, column)
    }

    fn lex_interpreted_string(&mut self, start: usize, line: usize, column: usize) -> Token {
        self.advance();
        let mut value = Vec::new();
        loop {
            if self.at_end() || self.peek_byte() == b'\n' {
                return self.error_token("string literal not terminated", start, line, column);
            }
            let byte = self.peek_byte();
            if byte == b'"' {
                self.advance();
                break;
            }
            if byte == b'\\' {
                let (escape_line, escape_column, escape_start) = (self.line, self.column, self.index);
                if let Err(message) = self.consume_escape(b'"', &mut value) {
                    self.record_error(message, escape_start, escape_line, escape_column);
                }
                continue;
            }
            let character = self.peek_char();
            let mut buffer = [0u8; 4];
            value.extend_from_slice(character.encode_utf8(&mut buffer).as_bytes());
            self.advance_by(character.len_utf8());
        }
        let raw = self.source[start..self.index].to_string();
        let value = String::from_utf8_lossy(&value).into_owned();
        self.token(TokenKind::StringLiteral { raw, value }, start, line, column)
    }

    fn lex_raw_string(&mut self, start: usize, line: usize, column: usize) -> Token {
        self.advance();
        let content_start = self.index;
        while !self.at_end() && self.peek_byte() != b'`' {
            let character = self.peek_char();
            self.advance_by(character.len_utf8());
        }
        if self.at_end() {
            return self.error_token("raw string literal not terminated", start, line, column);
        }
        let value = self.source[content_start..self.index].replace('\r', "");
        self.advance();
        let raw = self.source[start..self.index].to_string();
        self.token(TokenKind::StringLiteral { raw, value }, start, line, column)
    }

    /// Consumes one escape sequence starting at `\` and appends the bytes it
    /// denotes to `value`.
    fn consume_escape(&mut self, quote: u8, value: &mut Vec<u8>) -> Result<(), &'static str> {
        self.advance();
        if self.at_end() {
            return Err("escape sequence not terminated");
        }
        let byte = self.peek_byte();
        let simple = match byte {
            b'a' => Some(0x07),
            b'b' => Some(0x08),
            b'f' => Some(0x0c),
            b'n' => Some(b'\n'),
            b'r' => Some(b'\r'),
            b't' => Some(b'\t'),
            b'v' => Some(0x0b),
            b'\\' => Some(b'\\'),
            _ if byte == quote => Some(quote),
            _ => None,
        };
        if let Some(simple) = simple {
            self.advance();
            value.push(simple);
            return Ok(());
        }
        match byte {
            b'0'..=b'7' => {
                let code = self.consume_code_digits(3, 8)?;
                let code = u8::try_from(code).map_err(|_| "octal escape value > 255")?;
                value.push(code);
                Ok(())
            }
            b'x' => {
                self.advance();
                let code = self.consume_code_digits(2, 16)?;
                value.push(u8::try_from(code).map_err(|_| "invalid hexadecimal escape")?);
                Ok(())
            }
            b'u' | b'U' => {
                self.advance();
                let digit_count = if byte == b'u' { 4 } else { 8 };
                let code = self.consume_code_digits(digit_count, 16)?;
                let character =
                    char::from_u32(code).ok_or("escape sequence is invalid Unicode code point")?;
                let mut buffer = [0u8; 4];
                value.extend_from_slice(character.encode_utf8(&mut buffer).as_bytes());
                Ok(())
            }
            _ => {
                let character = self.peek_char();
                self.advance_by(character.len_utf8());
                Err("unknown escape sequence")
            }
        }
    }

    fn consume_code_digits(&mut self, count: usize, radix: u32) -> Result<u32, &'static str> {
        let mut code = 0u32;
        for _ in 0..count {
            if self.at_end() {
                return Err("escape sequence not terminated");
            }
            let Some(digit) = (self.peek_byte() as char).to_digit(radix) else {
                return Err("illegal character in escape sequence");
            };
            code = code * radix + digit;
            self.advance();
        }
        Ok(code)
    }

    fn error_token(
        &mut self,
        message: impl Into<String>,
        start: usize,
        line: usize,
        column: usize,
    ) -> Token {
        self.record_error(message, start, line, column);
        self.token(TokenKind::Error, start, line, column)
    }

    fn record_error(&mut self, message: impl Into<String>, start: usize, line: usize, column: usize) {
        self.lex_errors.push(LexError {
            message: message.into(),
            span: Span {
                start,
                end: self.index.max(start),
                line,
                column,
            },
        });
    }

    /// Skips blanks and comments. A general comment that spans lines acts
    /// like a line break and is returned as one.
    fn skip_whitespace_and_comments(&mut self) -> Option<Token> {
        while !self.at_end() {
            match self.peek_byte() {
                b' ' | b'\t' | b'\r' => self.advance(),
                b'/' if self.match_bytes(b"//") => {
                    while !self.at_end() && self.peek_byte() != b'\n' {
                        self.advance();
                    }
                }
                b'/' if self.match_bytes(b"/*") => {
                    let (start, line, column) = (self.index, self.line, self.column);
                    self.advance_by(2);
                    let mut spans_lines = false;
                    loop {
                        if self.at_end() {
                            self.record_error("comment not terminated", start, line, column);
                            return None;
                        }
                        if self.match_bytes(b"*/") {
                            self.advance_by(2);
                            break;
                        }
                        if self.peek_byte() == b'\n' {
                            spans_lines = true;
                        }
                        self.advance();
                    }
                    if spans_lines {
                        return Some(self.token(TokenKind::Newline, start, line, column));
                    }
                }
                _ => break,
            }
        }
        None
    }

    fn at_end(&self) -> bool {
        self.index >= self.bytes.len()
    }

    fn advance(&mut self) {
        if self.index < self.bytes.len() {
            if self.bytes[self.index] == b'\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            self.index += 1;
        }
    }

    fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    fn peek_byte(&self) -> u8 {
        self.bytes[self.index]
    }

    fn peek_byte_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.index + offset).copied()
    }

    fn peek_char(&self) -> char {
        self.source[self.index..].chars().next().unwrap_or('\0')
    }

    fn match_bytes(&self, bytes: &[u8]) -> bool {
        self.bytes.get(self.index..self.index + bytes.len()) == Some(bytes)
    }
}

fn is_letter(character: char) -> bool {
    character == '_' || character.is_alphabetic()
}

/// Replaces raw line breaks with statement terminators where Go's automatic
/// semicolon rule applies, and drops the rest.
fn insert_statement_terminators(tokens: Vec<Token>) -> Vec<Token> {
    let mut output: Vec<Token> = Vec::with_capacity(tokens.len());
    for token in tokens {
        let inserts_terminator = matches!(token.kind, TokenKind::Newline | TokenKind::EndOfFile)
            && output
                .last()
                .is_some_and(|previous| is_statement_terminator_trigger(&previous.kind));
        if inserts_terminator {
            output.push(Token {
                kind: TokenKind::StatementTerminator,
                span: Span {
                    start: token.span.start,
                    end: token.span.start,
                    line: token.span.line,
                    column: token.span.column,
                },
            });
        }
        if !matches!(token.kind, TokenKind::Newline) {
            output.push(token);
        }
    }
    output
}

fn is_statement_terminator_trigger(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Identifier(_)
            | TokenKind::Number { .. }
            | TokenKind::RuneLiteral(_)
            | TokenKind::StringLiteral { .. }
            | TokenKind::Keyword(
                Keyword::Break | Keyword::Continue | Keyword::Fallthrough | Keyword::Return
            )
            | TokenKind::Symbol(
                Symbol::PlusPlus
                    | Symbol::MinusMinus
                    | Symbol::RightParenthesis
                    | Symbol::RightBracket
                    | Symbol::RightBrace
            )
    )
}
