//! Error types and error handling.
//!
//! Every phase (lexing, parsing, type checking, evaluation) reports failures
//! through the same [`errors::Error`] structure: an [`errors::ErrorImpl`]
//! kind paired with the source position it refers to, plus a human-readable
//! tip used by [`crate::format_error`].

pub mod errors;
