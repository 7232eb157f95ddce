use std::fmt::Display;

use crate::Span;

use super::{
    nodes::{CallNode, ConcatNode, LiteralNode, VariableAccessNode},
    types::Value,
};

/// Node Types
///
/// The kind of a node without its payload, used for logging and assertions.
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum NodeType {
    Literal,
    VariableAccess,
    Call,
    Concat,
}

/// Expression tree node.
///
/// The set of variants is closed: the type checker, the evaluator and the
/// renderer all match on it exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Literal(LiteralNode),
    VariableAccess(VariableAccessNode),
    Call(CallNode),
    Concat(ConcatNode),
}

impl Node {
    pub fn get_node_type(&self) -> NodeType {
        match self {
            Node::Literal(_) => NodeType::Literal,
            Node::VariableAccess(_) => NodeType::VariableAccess,
            Node::Call(_) => NodeType::Call,
            Node::Concat(_) => NodeType::Concat,
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            Node::Literal(node) => &node.span,
            Node::VariableAccess(node) => &node.span,
            Node::Call(node) => &node.span,
            Node::Concat(node) => &node.span,
        }
    }

    pub fn literal(value: impl Into<Value>, span: Span) -> Self {
        Node::Literal(LiteralNode { value: value.into(), span })
    }

    pub fn variable(name: &str, span: Span) -> Self {
        Node::VariableAccess(VariableAccessNode { name: String::from(name), span })
    }

    pub fn call(func: &str, args: Vec<Node>, span: Span) -> Self {
        Node::Call(CallNode { func: String::from(func), args, span })
    }

    pub fn concat(exprs: Vec<Node>, span: Span) -> Self {
        Node::Concat(ConcatNode { exprs, span })
    }
}

/// Renders the node back to template syntax.
///
/// A concat writes its text children verbatim and wraps every other child
/// in `${ }`. Outside of a concat, string literals are quoted.
impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Literal(literal) => match &literal.value {
                Value::String(text) => write!(f, "{:?}", text),
                other => write!(f, "{}", other),
            },
            Node::VariableAccess(variable) => write!(f, "{}", variable.name),
            Node::Call(call) => {
                write!(f, "{}(", call.func)?;
                for (i, arg) in call.args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Node::Concat(concat) => {
                for expr in concat.exprs.iter() {
                    match expr {
                        Node::Literal(LiteralNode { value: Value::String(text), .. }) => write!(f, "{}", text)?,
                        other => write!(f, "${{{}}}", other)?,
                    }
                }
                Ok(())
            }
        }
    }
}
