use crate::{
    ast::{
        ast::Node,
        nodes::CallNode,
        types::{Type, Value},
    },
    errors::errors::{Error, ErrorImpl},
    scope::scope::{ImplicitMap, Scope},
    type_checker::type_checker::type_check,
};

/// Evaluates a checked tree against `scope`.
///
/// The tree is expected to have passed [`type_check`] against the same
/// scope; arity is not re-validated, but every callback result is checked
/// against the function's declared return type.
pub fn evaluate(node: &Node, scope: &Scope) -> Result<Value, Error> {
    match node {
        Node::Literal(literal) => Ok(literal.value.clone()),
        Node::VariableAccess(variable) => scope
            .lookup_var(&variable.name)
            .map(|declared| declared.value.clone())
            .ok_or_else(|| {
                Error::new(
                    ErrorImpl::UndefinedVariable { variable: variable.name.clone() },
                    variable.span.start.clone(),
                )
            }),
        Node::Call(call) => evaluate_call(call, scope),
        Node::Concat(concat) => {
            let mut output = String::new();
            for expr in concat.exprs.iter() {
                match evaluate(expr, scope)? {
                    Value::String(text) => output.push_str(&text),
                    other => {
                        return Err(Error::new(
                            ErrorImpl::ValueTypeMismatch { expected: Type::String, received: other.get_type() },
                            expr.get_span().start.clone(),
                        ));
                    }
                }
            }
            Ok(Value::String(output))
        }
    }
}

fn evaluate_call(call: &CallNode, scope: &Scope) -> Result<Value, Error> {
    let Some(function) = scope.lookup_func(&call.func) else {
        return Err(Error::new(
            ErrorImpl::UndefinedFunction { function: call.func.clone() },
            call.span.start.clone(),
        ));
    };

    let Some(callback) = function.callback.as_ref() else {
        return Err(Error::new(
            ErrorImpl::MissingCallback { function: call.func.clone() },
            call.span.start.clone(),
        ));
    };

    let args = call
        .args
        .iter()
        .map(|arg| evaluate(arg, scope))
        .collect::<Result<Vec<Value>, Error>>()?;

    tracing::trace!(function = %call.func, args = args.len(), "invoking callback");
    let result = callback(args.as_slice()).map_err(|message| {
        Error::new(
            ErrorImpl::CallbackFailed { function: call.func.clone(), message },
            call.span.start.clone(),
        )
    })?;

    if result.get_type() != function.return_type {
        return Err(Error::new(
            ErrorImpl::ValueTypeMismatch { expected: function.return_type, received: result.get_type() },
            call.span.start.clone(),
        ));
    }

    Ok(result)
}

/// Type checks `node` (applying implicit conversions) and evaluates it.
pub fn execute(node: &mut Node, scope: &Scope, implicit: Option<&ImplicitMap>) -> Result<Value, Error> {
    type_check(node, scope, implicit)?;
    evaluate(node, scope)
}
