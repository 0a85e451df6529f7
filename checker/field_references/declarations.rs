use checker__go_syntax::{Expression, Node, Statement};

/// The key of a `"name": value` element in a composite literal, such as an
/// entry of a `map[string]*Schema{...}`.
#[must_use]
pub fn composite_literal_key(node: Node<'_>) -> Option<&str> {
    let Node::Expression(Expression::KeyValue { key, .. }) = node else {
        return None;
    };
    match key.as_ref() {
        Expression::StringLiteral { value, .. } => Some(value),
        _ => None,
    }
}

/// The index of the first assignment target of the form `s["name"]`.
#[must_use]
pub fn indexed_assignment_key(node: Node<'_>) -> Option<&str> {
    let Node::Statement(Statement::Assign { targets, .. }) = node else {
        return None;
    };
    targets.iter().find_map(|target| match target {
        Expression::Index { indices, .. } => match indices.as_slice() {
            [Expression::StringLiteral { value, .. }] => Some(value.as_str()),
            _ => None,
        },
        _ => None,
    })
}
