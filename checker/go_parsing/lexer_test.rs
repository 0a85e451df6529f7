use checker__go_parsing::parse_file;
use checker__go_syntax::{Expression, LiteralKind, Node, ParsedFile, inspect};

fn string_values(file: &ParsedFile) -> Vec<String> {
    let mut values = Vec::new();
    inspect(file, &mut |node| {
        if let Node::Expression(Expression::StringLiteral { value, .. }) = node {
            values.push(value.clone());
        }
        true
    });
    values
}

fn errors(source: &str) -> Vec<(String, usize, usize)> {
    parse_file(source)
        .unwrap_err()
        .into_iter()
        .map(|diagnostic| {
            (
                diagnostic.message,
                diagnostic.span.line,
                diagnostic.span.column,
            )
        })
        .collect()
}

#[test]
fn interpreted_string_escapes_are_decoded() {
    let file = parse_file(
        r#"package p
var s = "a\tb\x41é\101\\\""
"#,
    )
    .unwrap();
    assert_eq!(string_values(&file), vec!["a\tbAéA\\\""]);
}

#[test]
fn raw_string_keeps_backslashes_and_drops_carriage_returns() {
    let file = parse_file("package p\nvar s = `a\\n\r\nb`\n").unwrap();
    assert_eq!(string_values(&file), vec!["a\\n\nb"]);
}

#[test]
fn semicolons_are_inserted_at_line_ends() {
    let file = parse_file(
        r"package p

func f() int {
	x := 1
	x++
	return x
}
",
    )
    .unwrap();
    let function = file.functions().next().unwrap();
    assert_eq!(function.body.as_ref().unwrap().statements.len(), 3);
}

#[test]
fn multi_line_block_comment_ends_a_statement() {
    let file = parse_file(
        "package p\nvar x = 1 /* first\nsecond */ var y = 2 // trailing\n",
    )
    .unwrap();
    assert_eq!(file.declarations.len(), 2);
}

#[test]
fn numeric_and_rune_literal_forms() {
    let file = parse_file(
        r"package p
var a = []any{0x1F, 0b101, 0o17, 017, 1_000, 1.5e3, 0x1p-2, .5, 3i, 'x', '\n'}
",
    )
    .unwrap();
    let mut kinds = Vec::new();
    inspect(&file, &mut |node| {
        if let Node::Expression(Expression::BasicLiteral { kind, .. }) = node {
            kinds.push(*kind);
        }
        true
    });
    assert_eq!(
        kinds,
        vec![
            LiteralKind::Integer,
            LiteralKind::Integer,
            LiteralKind::Integer,
            LiteralKind::Integer,
            LiteralKind::Integer,
            LiteralKind::Float,
            LiteralKind::Float,
            LiteralKind::Float,
            LiteralKind::Imaginary,
            LiteralKind::Rune,
            LiteralKind::Rune,
        ]
    );
}

#[test]
fn unterminated_string_is_reported() {
    assert_eq!(
        errors("package p\nvar s = \"abc\n"),
        vec![("string literal not terminated".to_string(), 2, 9)]
    );
}

#[test]
fn unknown_escape_is_reported() {
    assert_eq!(
        errors("package p\nvar s = \"a\\qb\"\n"),
        vec![("unknown escape sequence".to_string(), 2, 11)]
    );
}

#[test]
fn invalid_character_is_reported_once() {
    assert_eq!(
        errors("package p\nvar x = 1 @ 2\n"),
        vec![("invalid character '@'".to_string(), 2, 11)]
    );
}
