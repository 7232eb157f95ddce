//! Lexical analysis for interpolation templates.
//!
//! The lexer runs in two modes. Outside of `${ }` everything up to the
//! next `${` is a single text token. Inside an interpolation the source is
//! matched against a table of regex patterns (identifiers, numbers, string
//! literals and call punctuation) until the closing `}`.

pub mod lexer;
pub mod tokens;
