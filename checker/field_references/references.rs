use checker__go_syntax::Expression;

/// Calls whose string arguments name schema fields.
pub const ACCESSOR_NAMES: [&str; 6] = [
    "HasChange",
    "HasChanges",
    "Get",
    "Set",
    "GetOk",
    "GetChange",
];

/// The accessor that takes any number of field paths. Every other accessor
/// only has its first argument checked.
pub const MULTI_ARGUMENT_ACCESSOR: &str = "HasChanges";

/// `Method` for `receiver.Method(...)`, `Name` for `Name(...)`. Any other
/// callee shape has no name.
#[must_use]
pub fn invoked_name(expression: &Expression) -> Option<&str> {
    let Expression::Call { callee, .. } = expression else {
        return None;
    };
    match callee.as_ref() {
        Expression::Selector { member, .. } => Some(&member.name),
        Expression::Identifier(identifier) => Some(&identifier.name),
        _ => None,
    }
}

/// The arguments of an accessor call that are checked as field paths.
/// Empty for anything that is not an accessor call.
#[must_use]
pub fn accessor_arguments(expression: &Expression) -> &[Expression] {
    let Some(name) = invoked_name(expression) else {
        return &[];
    };
    let Expression::Call { arguments, .. } = expression else {
        return &[];
    };
    if !ACCESSOR_NAMES.contains(&name) {
        return &[];
    }
    if name == MULTI_ARGUMENT_ACCESSOR {
        arguments
    } else {
        &arguments[..arguments.len().min(1)]
    }
}

/// Splits a string literal argument into its dotted path components.
/// Returns `None` for arguments that are not string literals.
#[must_use]
pub fn argument_components(argument: &Expression) -> Option<Vec<&str>> {
    match argument {
        Expression::StringLiteral { value, .. } => Some(value.split('.').collect()),
        _ => None,
    }
}

/// List indices (`0`, `-1`) and the `#` count marker never name a field.
#[must_use]
pub fn is_index_or_count_marker(component: &str) -> bool {
    component == "#" || component.parse::<i64>().is_ok()
}
