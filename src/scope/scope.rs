use std::{collections::HashMap, fmt::Debug, sync::Arc};

use crate::ast::types::{Type, Value};

/// Evaluation-time implementation of a function.
///
/// The type checker never invokes it; only the evaluator does.
pub type Callback = Arc<dyn Fn(&[Value]) -> Result<Value, String> + Send + Sync>;

/// Implicit conversions: source type -> target type -> converter function name.
///
/// Every converter named here must also be registered in the scope's `func_map`.
pub type ImplicitMap = HashMap<Type, HashMap<Type, String>>;

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub value: Value,
    pub var_type: Type,
}

impl Variable {
    /// A variable whose declared type is the natural type of `value`.
    pub fn new(value: impl Into<Value>) -> Self {
        let value = value.into();
        Variable {
            var_type: value.get_type(),
            value,
        }
    }

    pub fn with_type(value: impl Into<Value>, var_type: Type) -> Self {
        Variable {
            value: value.into(),
            var_type,
        }
    }
}

/// A function signature plus its optional evaluation callback.
#[derive(Clone)]
pub struct Function {
    pub arg_types: Vec<Type>,
    pub return_type: Type,
    pub variadic: bool,
    /// Only meaningful when `variadic` is set
    pub variadic_type: Type,
    pub callback: Option<Callback>,
}

impl Function {
    pub fn new(arg_types: Vec<Type>, return_type: Type) -> Self {
        Function {
            arg_types,
            return_type,
            variadic: false,
            variadic_type: Type::Unknown,
            callback: None,
        }
    }

    /// Accepts any number of extra arguments of `variadic_type` after the fixed ones.
    pub fn variadic(mut self, variadic_type: Type) -> Self {
        self.variadic = true;
        self.variadic_type = variadic_type;
        self
    }

    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }
}

impl Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("arg_types", &self.arg_types)
            .field("return_type", &self.return_type)
            .field("variadic", &self.variadic)
            .field("variadic_type", &self.variadic_type)
            .field("callback", &self.callback.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

/// The read-only binding environment a template is checked and evaluated against.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    pub var_map: HashMap<String, Variable>,
    pub func_map: HashMap<String, Function>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    pub fn with_variable(mut self, name: &str, variable: Variable) -> Self {
        self.var_map.insert(String::from(name), variable);
        self
    }

    pub fn with_function(mut self, name: &str, function: Function) -> Self {
        self.func_map.insert(String::from(name), function);
        self
    }

    pub fn lookup_var(&self, name: &str) -> Option<&Variable> {
        self.var_map.get(name)
    }

    pub fn lookup_func(&self, name: &str) -> Option<&Function> {
        self.func_map.get(name)
    }
}
