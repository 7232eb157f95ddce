#![allow(clippy::module_inception)]

use std::sync::Arc;

use crate::{
    ast::ast::Node,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::tokenize,
    parser::parser::parse,
};

pub mod ast;
pub mod errors;
pub mod eval;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod scope;
pub mod type_checker;

extern crate regex;

pub const DEFAULT_TEMPLATE_NAME: &str = "template";

#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Arc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Arc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Tokenizes and parses a template into its expression tree.
///
/// `name` is only used in diagnostics and defaults to [`DEFAULT_TEMPLATE_NAME`].
pub fn parse_template(source: &str, name: Option<&str>) -> Result<Node, Error> {
    let name = Arc::new(String::from(name.unwrap_or(DEFAULT_TEMPLATE_NAME)));
    let tokens = tokenize(source, Arc::clone(&name))?;
    parse(tokens, name)
}

/// Returns the 1-based line number, the line text and the byte column of `position`.
///
/// Positions past the end of `source` are clamped to the last character.
pub fn get_line_at_position(source: &str, position: u32) -> (usize, String, usize) {
    let pos = (position as usize).min(source.len().saturating_sub(1));

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return (line_number, line.to_string(), pos - start);
        }

        start = end;
        line_number += 1;
    }

    (line_number, String::new(), 0)
}

pub fn format_error(error: &Error, source: &str) -> String {
    /*
        Error: ConcatTypeMismatch (Expected ...)
        -> template
          |
        1 | foo ${rand()}
          | ------^
    */

    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(source, position.0);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let mut out = String::new();
    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!("Error: {} ({})\n", error.get_error_name(), error.get_tip()));
    }
    out.push_str(&format!("-> {}\n", position.1));
    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let column = line_text.char_indices().take_while(|(offset, _)| *offset < line_pos).count();
    let arrows = column.saturating_sub(removed_whitespace) + 1;
    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.chars().take_while(|c| *c == ' ').count();

    (String::from(&string[start..]), start)
}
