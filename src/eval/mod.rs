//! Evaluation of checked templates.
//!
//! Walks a tree that has already been type checked (and therefore holds
//! explicit conversion calls) and produces a runtime value by invoking the
//! callbacks registered in the scope.

pub mod eval;
