use crate::{
    ast::{
        ast::Node,
        nodes::{CallNode, ConcatNode},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    scope::scope::{ImplicitMap, Scope},
};

use super::implicit::Slot;

/// Checks a tree against a scope and makes implicit conversions explicit.
///
/// A checker holds no per-tree state besides the conversion stack, so the
/// same instance can check several trees one after another.
#[derive(Debug)]
pub struct TypeChecker<'a> {
    pub(super) scope: &'a Scope,
    pub(super) implicit: Option<&'a ImplicitMap>,
    /// Conversions whose converter call is currently being checked
    pub(super) active_conversions: Vec<(Type, Type)>,
}

impl<'a> TypeChecker<'a> {
    pub fn new(scope: &'a Scope, implicit: Option<&'a ImplicitMap>) -> Self {
        TypeChecker {
            scope,
            implicit,
            active_conversions: vec![],
        }
    }

    /// Checks `root`, rewriting it in place, and returns its resolved type.
    ///
    /// On failure the tree may already contain some rewrites and should be
    /// discarded.
    pub fn visit(&mut self, root: &mut Node) -> Result<Type, Error> {
        self.active_conversions.clear();

        let resolved = self.type_check_node(root)?;
        if resolved == Type::Unknown {
            return Err(Error::new(ErrorImpl::UnresolvedType, root.get_span().start.clone()));
        }

        Ok(resolved)
    }

    pub(super) fn type_check_node(&mut self, node: &mut Node) -> Result<Type, Error> {
        match node {
            Node::Literal(literal) => Ok(literal.value.get_type()),
            Node::VariableAccess(variable) => match self.scope.lookup_var(&variable.name) {
                Some(declared) => Ok(declared.var_type),
                None => Err(Error::new(
                    ErrorImpl::UndefinedVariable { variable: variable.name.clone() },
                    variable.span.start.clone(),
                )),
            },
            Node::Call(call) => self.type_check_call(call),
            Node::Concat(concat) => self.type_check_concat(concat),
        }
    }

    fn type_check_call(&mut self, call: &mut CallNode) -> Result<Type, Error> {
        let scope = self.scope;
        let Some(function) = scope.lookup_func(&call.func) else {
            return Err(Error::new(
                ErrorImpl::UndefinedFunction { function: call.func.clone() },
                call.span.start.clone(),
            ));
        };

        let fixed = function.arg_types.len();
        let received = call.args.len();
        let arity_ok = if function.variadic { received >= fixed } else { received == fixed };
        if !arity_ok {
            return Err(Error::new(
                ErrorImpl::ArityMismatch {
                    function: call.func.clone(),
                    expected: fixed,
                    received,
                    variadic: function.variadic,
                },
                call.span.start.clone(),
            ));
        }

        for (index, arg) in call.args.iter_mut().enumerate() {
            let expected = if index < fixed {
                function.arg_types[index]
            } else {
                function.variadic_type
            };

            let actual = self.type_check_node(arg)?;
            self.resolve(arg, actual, expected, Slot::Argument { function: &call.func, index })?;
        }

        Ok(function.return_type)
    }

    fn type_check_concat(&mut self, concat: &mut ConcatNode) -> Result<Type, Error> {
        for (index, expr) in concat.exprs.iter_mut().enumerate() {
            let actual = self.type_check_node(expr)?;
            self.resolve(expr, actual, Type::String, Slot::Concat { index })?;
        }

        Ok(Type::String)
    }
}

/// Type checks `root` against `scope`, inserting calls for implicit conversions.
///
/// After a successful check the tree contains no implicit conversions, so
/// checking it again without `implicit` succeeds with the same type.
#[tracing::instrument(
    skip_all,
    fields(
        vars = scope.var_map.len(),
        funcs = scope.func_map.len(),
        implicit = implicit.is_some()
    )
)]
pub fn type_check(root: &mut Node, scope: &Scope, implicit: Option<&ImplicitMap>) -> Result<Type, Error> {
    let result = TypeChecker::new(scope, implicit).visit(root);
    match &result {
        Ok(resolved) => tracing::debug!(%resolved, "type check succeeded"),
        Err(error) => tracing::debug!(error = %error, "type check failed"),
    }
    result
}
