//! Resolution context for templates.
//!
//! A [`scope::Scope`] maps variable names to typed values and function names
//! to call signatures. Callers build it before checking; the type checker
//! and evaluator only ever read it, so one scope can be shared between
//! threads.

pub mod scope;
