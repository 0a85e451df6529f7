use checker__go_parsing::parse_file;
use checker__go_syntax::{Expression, Node, inspect};

#[test]
fn visits_expressions_in_source_order() {
    let file = parse_file("package p\n\nfunc f() {\n\tx := g(a, b.c)\n}\n").unwrap();
    let mut names = Vec::new();
    inspect(&file, &mut |node| {
        if let Node::Expression(Expression::Identifier(identifier)) = node {
            names.push(identifier.name.clone());
        }
        true
    });
    assert_eq!(names, vec!["x", "g", "a", "b"]);
}

#[test]
fn declared_names_are_visited_as_identifiers() {
    let file = parse_file("package p\n\ntype T struct{ f int }\n\nfunc (t T) M() {}\n").unwrap();
    let mut names = Vec::new();
    inspect(&file, &mut |node| {
        if let Node::Identifier(identifier) = node {
            names.push(identifier.name.clone());
        }
        true
    });
    assert_eq!(names, vec!["p", "T", "f", "t", "M"]);
}

#[test]
fn returning_false_skips_children() {
    let source = r#"package p

var top = "outer"

func f() {
	run(func() {
		_ = "inner"
	})
	_ = "after"
}
"#;
    let file = parse_file(source).unwrap();

    let mut all = Vec::new();
    inspect(&file, &mut |node| {
        if let Node::Expression(Expression::StringLiteral { value, .. }) = node {
            all.push(value.clone());
        }
        true
    });
    assert_eq!(all, vec!["outer", "inner", "after"]);

    let mut outside_literals = Vec::new();
    inspect(&file, &mut |node| match node {
        Node::Expression(Expression::FunctionLiteral { .. }) => false,
        Node::Expression(Expression::StringLiteral { value, .. }) => {
            outside_literals.push(value.clone());
            true
        }
        _ => true,
    });
    assert_eq!(outside_literals, vec!["outer", "after"]);
}
