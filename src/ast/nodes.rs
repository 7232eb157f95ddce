use crate::Span;

use super::{ast::Node, types::Value};

/// Literal Node
/// Template text, or a string/number/bool literal inside `${ }`.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralNode {
    pub value: Value,
    pub span: Span,
}

/// Variable Access Node
/// A reference to a variable in the scope, e.g. `${var.region}`.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableAccessNode {
    pub name: String,
    pub span: Span,
}

/// Call Node
/// A call to a named function in the scope, e.g. `${upper(name)}`.
#[derive(Debug, Clone, PartialEq)]
pub struct CallNode {
    pub func: String,
    pub args: Vec<Node>,
    pub span: Span,
}

/// Concat Node
/// The output of a template: every child is rendered as text and joined.
#[derive(Debug, Clone, PartialEq)]
pub struct ConcatNode {
    pub exprs: Vec<Node>,
    pub span: Span,
}
