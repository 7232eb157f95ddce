//! Parser module for building the expression tree.
//!
//! The parser turns the token stream of a template into a single root
//! [`Node`](crate::ast::ast::Node): a literal for plain text, or a concat of
//! text and interpolated expressions. Expressions are parsed with a Pratt
//! parser using NUD (null denotation) and LED (left denotation) tables.

pub mod expr;
pub mod lookups;
pub mod parser;
