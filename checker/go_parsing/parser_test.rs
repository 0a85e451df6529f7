use checker__go_parsing::parse_file;
use checker__go_syntax::{
    Expression, FunctionDeclaration, ParsedFile, Specification, Statement, TypeSpecification,
};

fn function<'a>(file: &'a ParsedFile, name: &str) -> &'a FunctionDeclaration {
    file.functions()
        .find(|function| function.name.name == name)
        .unwrap()
}

fn body(function: &FunctionDeclaration) -> &[Statement] {
    &function.body.as_ref().unwrap().statements
}

fn type_specifications(file: &ParsedFile) -> Vec<&TypeSpecification> {
    file.declarations
        .iter()
        .filter_map(|declaration| match declaration {
            checker__go_syntax::Declaration::Generic(generic) => Some(generic),
            checker__go_syntax::Declaration::Function(_) => None,
        })
        .flat_map(|generic| &generic.specifications)
        .filter_map(|specification| match specification {
            Specification::Type(type_specification) => Some(type_specification),
            _ => None,
        })
        .collect()
}

fn statement_kind(statement: &Statement) -> &'static str {
    match statement {
        Statement::If { .. } => "if",
        Statement::Range { .. } => "range",
        Statement::TypeSwitch { .. } => "type switch",
        Statement::Switch { .. } => "switch",
        Statement::For { .. } => "for",
        Statement::Labeled { .. } => "labeled",
        Statement::Assign { .. } => "assign",
        Statement::Expression(_) => "expression",
        _ => "other",
    }
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
fn parses_package_clause_and_imports() {
    let file = parse_file(
        r#"package main

import (
	"fmt"
	str "strings"
	. "math"
	_ "embed"
)

import "os"
"#,
    )
    .unwrap();
    assert_eq!(file.package_name.name, "main");
    let imports: Vec<(Option<&str>, &str)> = file
        .imports()
        .map(|import| {
            (
                import.alias.as_ref().map(|alias| alias.name.as_str()),
                import.path.as_str(),
            )
        })
        .collect();
    assert_eq!(
        imports,
        vec![
            (None, "fmt"),
            (Some("str"), "strings"),
            (Some("."), "math"),
            (Some("_"), "embed"),
            (None, "os"),
        ]
    );
}

#[test]
fn control_clause_headers_keep_the_body_brace() {
    let file = parse_file(
        r#"package p

func f(s any) {
	if s == (S{}) {
	}
	for _, v := range []string{"a"} {
		_ = v
	}
	if x := (T{"k": 1}); x != nil {
	}
	switch v := s.(type) {
	case int, []byte:
		_ = v
	default:
	}
	for i := 0; i < 3; i++ {
	}
	for {
		break
	}
	switch {
	case s == nil:
	}
}
"#,
    )
    .unwrap();
    let kinds: Vec<&str> = body(function(&file, "f"))
        .iter()
        .map(statement_kind)
        .collect();
    assert_eq!(
        kinds,
        vec!["if", "range", "if", "type switch", "for", "for", "switch"]
    );
}

#[test]
fn identifier_before_brace_in_if_header_is_not_a_literal() {
    let file = parse_file("package p\n\nfunc f(ok bool) {\n\tif ok {\n\t\treturn\n\t}\n}\n")
        .unwrap();
    let Statement::If {
        condition,
        then_block,
        ..
    } = &body(function(&file, "f"))[0]
    else {
        panic!("expected if statement");
    };
    assert!(matches!(condition, Expression::Identifier(identifier) if identifier.name == "ok"));
    assert_eq!(then_block.statements.len(), 1);
}

#[test]
fn function_literal_in_if_header_may_use_composite_literals() {
    let file = parse_file(
        "package p\n\nfunc f(x T) {\n\tif func() bool { return T{} == x }() {\n\t}\n}\n",
    )
    .unwrap();
    assert_eq!(body(function(&file, "f")).len(), 1);
}

#[test]
fn parameters_are_grouped_with_their_types() {
    let file = parse_file(
        r"package p

func f(a, b int, c ...string) (n int, err error) { return }
func g(int, string) error { return nil }
func (r *Reader) Read(p []byte) (int, error) { return 0, nil }
func Map[K comparable, V any](m map[K]V, keep func(V) bool) []V { return nil }
",
    )
    .unwrap();

    let f = function(&file, "f");
    let names: Vec<Vec<&str>> = f
        .signature
        .parameters
        .iter()
        .map(|field| field.names.iter().map(|name| name.name.as_str()).collect())
        .collect();
    assert_eq!(names, vec![vec!["a", "b"], vec!["c"]]);
    assert!(matches!(
        f.signature.parameters[1].type_expression,
        Expression::Ellipsis { .. }
    ));
    assert_eq!(f.signature.results.len(), 2);

    let g = function(&file, "g");
    assert_eq!(g.signature.parameters.len(), 2);
    assert!(g.signature.parameters.iter().all(|field| field.names.is_empty()));
    assert_eq!(g.signature.results.len(), 1);

    let read = function(&file, "Read");
    let receiver = read.receiver.as_ref().unwrap();
    assert_eq!(receiver.names[0].name, "r");
    assert!(matches!(receiver.type_expression, Expression::Star { .. }));
    assert!(matches!(
        read.signature.parameters[0].type_expression,
        Expression::ArrayType { length: None, .. }
    ));

    let map = function(&file, "Map");
    assert_eq!(map.signature.type_parameters.len(), 2);
    assert_eq!(map.signature.parameters.len(), 2);
    assert!(matches!(
        map.signature.results[0].type_expression,
        Expression::ArrayType { .. }
    ));
}

#[test]
fn struct_fields_type_parameters_and_aliases() {
    let file = parse_file(
        r#"package p

type List[T any] struct {
	items []T
	Base
	*Embedded
	pkg.Other `json:"other"`
	Pair[int, string]
	name, alias string `json:"name"`
	buffer [4]byte
}

type Buf [4]byte

type Alias = List[int]

type Number interface {
	~int | ~float64
	String() string
}
"#,
    )
    .unwrap();
    let specifications = type_specifications(&file);
    assert_eq!(specifications.len(), 4);

    let list = specifications[0];
    assert_eq!(list.type_parameters.len(), 1);
    let Expression::StructType { fields, .. } = &list.type_expression else {
        panic!("expected struct type");
    };
    let name_counts: Vec<usize> = fields.iter().map(|field| field.names.len()).collect();
    assert_eq!(name_counts, vec![1, 0, 0, 0, 0, 2, 1]);
    assert!(matches!(
        &fields[3].tag,
        Some(Expression::StringLiteral { value, .. }) if value == r#"json:"other""#
    ));
    assert!(matches!(
        fields[4].type_expression,
        Expression::Index { ref indices, .. } if indices.len() == 2
    ));

    let buffer = specifications[1];
    assert!(buffer.type_parameters.is_empty());
    assert!(matches!(
        buffer.type_expression,
        Expression::ArrayType { length: Some(_), .. }
    ));

    let alias = specifications[2];
    assert!(alias.is_alias);
    assert!(matches!(alias.type_expression, Expression::Index { .. }));

    let Expression::InterfaceType { elements, .. } = &specifications[3].type_expression else {
        panic!("expected interface type");
    };
    assert_eq!(elements.len(), 2);
}

#[test]
fn labels_select_and_goto() {
    let file = parse_file(
        r"package p

func g(ch chan int) {
outer:
	for {
		select {
		case v := <-ch:
			_ = v
			break outer
		case ch <- 1:
		default:
			goto done
		}
	}
done:
}
",
    )
    .unwrap();
    let kinds: Vec<&str> = body(function(&file, "g"))
        .iter()
        .map(statement_kind)
        .collect();
    assert_eq!(kinds, vec!["labeled", "labeled"]);
}

#[test]
fn missing_package_clause_is_reported() {
    assert_eq!(
        errors("func f() {}\n"),
        vec![("expected 'package', found 'func'".to_string(), 1, 1)]
    );
}

#[test]
fn missing_expression_is_reported_at_the_next_token() {
    assert_eq!(
        errors("package p\n\nfunc f() {\n\tx :=\n}\n"),
        vec![("expected expression, found '}'".to_string(), 5, 1)]
    );
}

#[test]
fn missing_trailing_comma_in_composite_literal() {
    assert_eq!(
        errors("package p\n\nvar x = []int{\n\t1,\n\t2\n}\n"),
        vec![("expected ',', found newline".to_string(), 5, 3)]
    );
}

#[test]
fn mixed_named_and_unnamed_parameters() {
    assert_eq!(
        errors("package p\n\nfunc f(a int, string) {}\n"),
        vec![("mixed named and unnamed parameters".to_string(), 3, 15)]
    );
}

#[test]
fn if_without_condition() {
    assert_eq!(
        errors("package p\n\nfunc f() {\n\tif {\n\t}\n}\n"),
        vec![("missing condition in if statement".to_string(), 4, 5)]
    );
}

#[test]
fn recovers_and_reports_errors_in_later_functions() {
    let diagnostics = errors(
        "package p\n\nfunc f() {\n\tx :=\n}\n\nfunc g() {\n\ty := )\n}\n",
    );
    assert_eq!(diagnostics.len(), 2);
    assert_eq!((diagnostics[1].1, diagnostics[1].2), (8, 7));
}
