mod ast;
mod walk;

pub use ast::*;
pub use walk::{Node, inspect};
