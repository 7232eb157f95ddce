//! Type checking and elaboration.
//!
//! This module walks an expression tree bottom-up against a [`Scope`]:
//!
//! - Resolving variable and function references
//! - Checking call arity, including variadic signatures
//! - Checking argument types and that every concat child renders as text
//! - Inserting explicit calls for implicit conversions
//!
//! Rewrites happen in place, so a tree that checked successfully with an
//! implicit map checks again without one.
//!
//! [`Scope`]: crate::scope::scope::Scope

mod implicit;
pub mod type_checker;

#[cfg(test)]
mod tests;
