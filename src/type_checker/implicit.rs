//! Implicit conversion lookup and elaboration.
//!
//! When a node's type differs from what its parent needs, the implicit map
//! may name a converter function. The node is then replaced in its parent's
//! slot by a call to that converter, and the call is checked like any other.

use std::fmt::Display;

use crate::{
    ast::{ast::Node, types::Type},
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::type_checker::TypeChecker;

/// Where a node sits in its parent, used to pick the mismatch error.
#[derive(Debug, Clone, Copy)]
pub(super) enum Slot<'n> {
    Argument { function: &'n str, index: usize },
    Concat { index: usize },
}

impl Slot<'_> {
    fn index(&self) -> usize {
        match self {
            Slot::Argument { index, .. } | Slot::Concat { index } => *index,
        }
    }

    fn mismatch(&self, expected: Type, received: Type, position: Position) -> Error {
        let kind = match self {
            Slot::Argument { function, index } => ErrorImpl::ArgumentTypeMismatch {
                function: String::from(*function),
                index: *index,
                expected,
                received,
            },
            Slot::Concat { index } => ErrorImpl::ConcatTypeMismatch { index: *index, received },
        };
        Error::new(kind, position)
    }
}

/// Why no converter could be used.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ConversionMiss {
    NoImplicitMap,
    NoImplicitConversion,
    /// The same conversion is already being elaborated further up
    Recursive,
}

impl Display for ConversionMiss {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversionMiss::NoImplicitMap => write!(f, "no implicit map"),
            ConversionMiss::NoImplicitConversion => write!(f, "no implicit conversion registered"),
            ConversionMiss::Recursive => write!(f, "conversion is recursive"),
        }
    }
}

impl<'a> TypeChecker<'a> {
    fn lookup_conversion(&self, from: Type, to: Type) -> Result<&'a str, ConversionMiss> {
        let implicit = self.implicit.ok_or(ConversionMiss::NoImplicitMap)?;

        let converter = implicit
            .get(&from)
            .and_then(|targets| targets.get(&to))
            .ok_or(ConversionMiss::NoImplicitConversion)?;

        if self.active_conversions.contains(&(from, to)) {
            return Err(ConversionMiss::Recursive);
        }

        Ok(converter.as_str())
    }

    /// Makes `node` (already resolved to `actual`) satisfy `expected`.
    ///
    /// Equal types are left alone. Otherwise the node is wrapped in a call to
    /// the registered converter and the new call is checked in its place.
    pub(super) fn resolve(&mut self, node: &mut Node, actual: Type, expected: Type, slot: Slot) -> Result<(), Error> {
        if actual == expected {
            return Ok(());
        }

        let converter = match self.lookup_conversion(actual, expected) {
            Ok(converter) => converter,
            Err(miss) => {
                tracing::trace!(from = %actual, to = %expected, reason = %miss, "implicit conversion unavailable");
                return Err(slot.mismatch(expected, actual, node.get_span().start.clone()));
            }
        };

        tracing::debug!(from = %actual, to = %expected, converter, "inserting implicit conversion");
        let original = node.clone();
        elaborate(node, converter);

        self.active_conversions.push((actual, expected));
        let outcome = self.check_conversion(node, converter, expected, slot);
        self.active_conversions.pop();

        // a rejected conversion must not stay in the tree
        if outcome.is_err() {
            *node = original;
        }

        outcome
    }

    /// Checks an inserted converter call and that it yields `expected`.
    fn check_conversion(&mut self, node: &mut Node, converter: &str, expected: Type, slot: Slot) -> Result<(), Error> {
        let resolved = self.type_check_node(node)?;
        if resolved != expected {
            return Err(Error::new(
                ErrorImpl::ArgumentTypeMismatch {
                    function: String::from(converter),
                    index: slot.index(),
                    expected,
                    received: resolved,
                },
                node.get_span().start.clone(),
            ));
        }

        Ok(())
    }
}

/// Replaces `node` in place with `converter(node)`.
fn elaborate(node: &mut Node, converter: &str) {
    let span = node.get_span().clone();
    let original = std::mem::replace(node, Node::literal("", span.clone()));
    *node = Node::call(converter, vec![original], span);
}
