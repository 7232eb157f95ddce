//! Unit tests for the type checker.
//!
//! Most cases parse a template, check it against a scope and look at the
//! resulting type, error kind and rewritten tree.

use std::collections::HashMap;

use super::type_checker::{type_check, TypeChecker};
use crate::{
    ast::{ast::Node, types::{Type, Value}},
    errors::errors::ErrorImpl,
    parse_template,
    scope::scope::{Function, ImplicitMap, Scope, Variable},
    Position, Span,
};

fn parse(source: &str) -> Node {
    parse_template(source, Some("test.tmpl")).unwrap()
}

fn span() -> Span {
    Span { start: Position::null(), end: Position::null() }
}

fn int_to_string() -> ImplicitMap {
    let mut implicit: ImplicitMap = HashMap::new();
    implicit.entry(Type::Int).or_default().insert(Type::String, "intToString".to_string());
    implicit
}

fn with_converter(scope: Scope) -> Scope {
    scope.with_function("intToString", Function::new(vec![Type::Int], Type::String))
}

fn variadic_strings(fixed: Vec<Type>) -> Function {
    Function::new(fixed, Type::String).variadic(Type::String)
}

#[test]
fn test_plain_text_checks_against_empty_scope() {
    let mut node = parse("foo");
    assert_eq!(type_check(&mut node, &Scope::new(), None), Ok(Type::String));
}

#[test]
fn test_empty_template_is_string() {
    let mut node = parse("");
    assert_eq!(type_check(&mut node, &Scope::new(), None), Ok(Type::String));

    let mut empty_concat = Node::concat(vec![], span());
    assert_eq!(type_check(&mut empty_concat, &Scope::new(), None), Ok(Type::String));
}

#[test]
fn test_concat_of_text_literals_is_string() {
    let mut node = Node::concat(vec![Node::literal("a", span()), Node::literal("b", span())], span());
    assert_eq!(type_check(&mut node, &Scope::new(), None), Ok(Type::String));
}

#[test]
fn test_string_variable() {
    let scope = Scope::new().with_variable("bar", Variable::new("baz"));
    let mut node = parse("foo ${bar}");

    assert_eq!(type_check(&mut node, &scope, None), Ok(Type::String));
}

#[test]
fn test_int_variable_in_concat_without_implicit() {
    let scope = Scope::new().with_variable("bar", Variable::new(42_i64));
    let mut node = parse("foo ${bar}");

    let error = type_check(&mut node, &scope, None).unwrap_err();
    assert_eq!(error.kind(), &ErrorImpl::ConcatTypeMismatch { index: 1, received: Type::Int });
}

#[test]
fn test_bare_variable_resolves_to_declared_type() {
    let scope = Scope::new()
        .with_variable("count", Variable::new(3_i64))
        .with_variable("names", Variable::new(Value::List(vec![])));

    let mut count = Node::variable("count", span());
    assert_eq!(type_check(&mut count, &scope, None), Ok(Type::Int));

    let mut names = Node::variable("names", span());
    assert_eq!(type_check(&mut names, &scope, None), Ok(Type::List));
}

#[test]
fn test_declared_type_is_trusted_over_value() {
    let scope = Scope::new().with_variable("bar", Variable::with_type("not a number", Type::Int));
    let mut node = Node::variable("bar", span());

    assert_eq!(type_check(&mut node, &scope, None), Ok(Type::Int));
}

#[test]
fn test_undefined_variable() {
    let scope = Scope::new()
        .with_variable("baz", Variable::new("x"))
        .with_function("bar", Function::new(vec![], Type::String));
    let mut node = parse("foo ${bar}");

    let error = type_check(&mut node, &scope, None).unwrap_err();
    assert_eq!(error.kind(), &ErrorImpl::UndefinedVariable { variable: "bar".to_string() });
    assert_eq!(error.get_position().0, 6);
}

#[test]
fn test_undefined_function() {
    let mut node = parse("foo ${rand()}");

    let error = type_check(&mut node, &Scope::new(), None).unwrap_err();
    assert_eq!(error.kind(), &ErrorImpl::UndefinedFunction { function: "rand".to_string() });
}

#[test]
fn test_call_without_arguments() {
    let scope = Scope::new().with_function("rand", Function::new(vec![], Type::String));
    let mut node = parse("foo ${rand()}");

    assert_eq!(type_check(&mut node, &scope, None), Ok(Type::String));
}

#[test]
fn test_call_with_matching_argument() {
    let scope = Scope::new().with_function("rand", Function::new(vec![Type::String], Type::String));
    let mut node = parse(r#"foo ${rand("42")}"#);

    assert_eq!(type_check(&mut node, &scope, None), Ok(Type::String));
}

#[test]
fn test_call_with_mismatched_argument() {
    let scope = Scope::new().with_function("rand", Function::new(vec![Type::String], Type::String));
    let mut node = parse("foo ${rand(42)}");

    let error = type_check(&mut node, &scope, None).unwrap_err();
    assert_eq!(
        error.kind(),
        &ErrorImpl::ArgumentTypeMismatch {
            function: "rand".to_string(),
            index: 0,
            expected: Type::String,
            received: Type::Int,
        }
    );
}

#[test]
fn test_fixed_arity() {
    let scope = Scope::new().with_function("pair", Function::new(vec![Type::String, Type::Int], Type::String));

    let mut exact = parse(r#"${pair("a", 1)}"#);
    assert_eq!(type_check(&mut exact, &scope, None), Ok(Type::String));

    for source in [r#"${pair("a")}"#, r#"${pair("a", 1, 2)}"#] {
        let mut node = parse(source);
        let error = type_check(&mut node, &scope, None).unwrap_err();
        assert_eq!(error.get_error_name(), "ArityMismatch", "{}", source);
    }
}

#[test]
fn test_arity_error_reports_counts() {
    let scope = Scope::new().with_function("pair", Function::new(vec![Type::String, Type::Int], Type::String));
    let mut node = parse(r#"${pair("a")}"#);

    let error = type_check(&mut node, &scope, None).unwrap_err();
    assert_eq!(
        error.kind(),
        &ErrorImpl::ArityMismatch { function: "pair".to_string(), expected: 2, received: 1, variadic: false }
    );
}

#[test]
fn test_variadic_without_fixed_arguments() {
    let scope = Scope::new().with_function("rand", variadic_strings(vec![]));

    for source in ["foo ${rand()}", r#"foo ${rand("42")}"#, r#"foo ${rand("4", "2")}"#] {
        let mut node = parse(source);
        assert_eq!(type_check(&mut node, &scope, None), Ok(Type::String), "{}", source);
    }
}

#[test]
fn test_variadic_argument_type_mismatch() {
    let scope = Scope::new().with_function("rand", variadic_strings(vec![]));
    let mut node = parse(r#"foo ${rand("42", 42)}"#);

    let error = type_check(&mut node, &scope, None).unwrap_err();
    assert_eq!(
        error.kind(),
        &ErrorImpl::ArgumentTypeMismatch {
            function: "rand".to_string(),
            index: 1,
            expected: Type::String,
            received: Type::Int,
        }
    );
}

#[test]
fn test_variadic_with_fixed_prefix() {
    let scope = Scope::new().with_function("join", Function::new(vec![Type::Int], Type::String).variadic(Type::String));

    for source in ["${join(1)}", r#"${join(1, "a")}"#, r#"${join(1, "a", "b")}"#] {
        let mut node = parse(source);
        assert_eq!(type_check(&mut node, &scope, None), Ok(Type::String), "{}", source);
    }

    let mut too_few = parse("${join()}");
    let error = type_check(&mut too_few, &scope, None).unwrap_err();
    assert_eq!(
        error.kind(),
        &ErrorImpl::ArityMismatch { function: "join".to_string(), expected: 1, received: 0, variadic: true }
    );

    let mut wrong_fixed = parse(r#"${join("a")}"#);
    let error = type_check(&mut wrong_fixed, &scope, None).unwrap_err();
    assert_eq!(error.get_error_name(), "ArgumentTypeMismatch");
}

#[test]
fn test_int_return_in_concat_without_implicit() {
    let scope = Scope::new().with_function("rand", Function::new(vec![], Type::Int));
    let mut node = parse("foo ${rand()}");

    let error = type_check(&mut node, &scope, None).unwrap_err();
    assert_eq!(error.kind(), &ErrorImpl::ConcatTypeMismatch { index: 1, received: Type::Int });
}

#[test]
fn test_nested_call_arguments() {
    let scope = Scope::new()
        .with_function("upper", Function::new(vec![Type::String], Type::String))
        .with_function("lookup", Function::new(vec![Type::Map, Type::String], Type::String))
        .with_variable("tags", Variable::new(Value::Map(Default::default())));
    let mut node = parse(r#"${upper(lookup(tags, "name"))}"#);

    assert_eq!(type_check(&mut node, &scope, None), Ok(Type::String));
}

#[test]
fn test_first_failure_aborts() {
    let scope = Scope::new().with_function("f", Function::new(vec![Type::String, Type::String], Type::String));
    let mut node = parse("${f(missing, 42)}");

    let error = type_check(&mut node, &scope, None).unwrap_err();
    assert_eq!(error.kind(), &ErrorImpl::UndefinedVariable { variable: "missing".to_string() });
}

#[test]
fn test_implicit_variable_conversion_rewrites_tree() {
    let implicit = int_to_string();
    let scope = with_converter(Scope::new().with_variable("bar", Variable::new(42_i64)));
    let mut node = parse("foo ${bar}");

    assert_eq!(type_check(&mut node, &scope, Some(&implicit)), Ok(Type::String));
    assert_eq!(node.to_string(), "foo ${intToString(bar)}");

    assert_eq!(type_check(&mut node, &scope, None), Ok(Type::String));
}

#[test]
fn test_implicit_return_conversion_rewrites_tree() {
    let implicit = int_to_string();
    let scope = with_converter(Scope::new().with_function("rand", Function::new(vec![], Type::Int)));
    let mut node = parse("foo ${rand()}");

    assert_eq!(type_check(&mut node, &scope, Some(&implicit)), Ok(Type::String));
    assert_eq!(node.to_string(), "foo ${intToString(rand())}");

    let Node::Concat(concat) = &node else { panic!("expected concat root") };
    let Node::Call(converter) = &concat.exprs[1] else { panic!("expected converter call") };
    let Node::Call(original) = &converter.args[0] else { panic!("expected original call") };
    assert_eq!(converter.func, "intToString");
    assert_eq!(original.func, "rand");
    assert_eq!(converter.span, original.span);
}

#[test]
fn test_implicit_argument_conversion() {
    let implicit = int_to_string();
    let scope = with_converter(Scope::new().with_function("foo", Function::new(vec![Type::String], Type::String)));
    let mut node = parse("foo ${foo(42)}");

    assert_eq!(type_check(&mut node, &scope, Some(&implicit)), Ok(Type::String));
    assert_eq!(node.to_string(), "foo ${foo(intToString(42))}");
    assert_eq!(type_check(&mut node, &scope, None), Ok(Type::String));
}

#[test]
fn test_implicit_variadic_argument_conversion() {
    let implicit = int_to_string();
    let scope = with_converter(Scope::new().with_function("foo", variadic_strings(vec![Type::String])));
    let mut node = parse(r#"foo ${foo("42", 42)}"#);

    assert_eq!(type_check(&mut node, &scope, Some(&implicit)), Ok(Type::String));
    assert_eq!(node.to_string(), r#"foo ${foo("42", intToString(42))}"#);
    assert_eq!(type_check(&mut node, &scope, None), Ok(Type::String));
}

#[test]
fn test_second_pass_does_not_rewrite_again() {
    let implicit = int_to_string();
    let scope = with_converter(Scope::new().with_variable("bar", Variable::new(42_i64)));
    let mut node = parse("${bar} and ${bar}");

    type_check(&mut node, &scope, Some(&implicit)).unwrap();
    let once = node.clone();
    type_check(&mut node, &scope, Some(&implicit)).unwrap();

    assert_eq!(node, once);
}

#[test]
fn test_missing_conversion_entry() {
    let implicit = int_to_string();
    let scope = with_converter(Scope::new().with_variable("ok", Variable::new(true)));
    let mut node = parse("${ok}");

    let error = type_check(&mut node, &scope, Some(&implicit)).unwrap_err();
    assert_eq!(error.kind(), &ErrorImpl::ConcatTypeMismatch { index: 0, received: Type::Bool });
}

#[test]
fn test_unregistered_converter_is_undefined_function() {
    let implicit = int_to_string();
    let scope = Scope::new().with_variable("bar", Variable::new(42_i64));
    let mut node = parse("foo ${bar}");

    let error = type_check(&mut node, &scope, Some(&implicit)).unwrap_err();
    assert_eq!(error.kind(), &ErrorImpl::UndefinedFunction { function: "intToString".to_string() });
    assert_eq!(node.to_string(), "foo ${bar}");
}

#[test]
fn test_converter_with_wrong_return_type() {
    let implicit = int_to_string();
    let scope = Scope::new()
        .with_variable("bar", Variable::new(42_i64))
        .with_function("intToString", Function::new(vec![Type::Int], Type::Float));
    let mut node = parse("foo ${bar}");

    let error = type_check(&mut node, &scope, Some(&implicit)).unwrap_err();
    assert_eq!(
        error.kind(),
        &ErrorImpl::ArgumentTypeMismatch {
            function: "intToString".to_string(),
            index: 1,
            expected: Type::String,
            received: Type::Float,
        }
    );
    assert_eq!(node.to_string(), "foo ${bar}");
}

#[test]
fn test_rejected_conversion_restores_chained_argument() {
    let mut implicit: ImplicitMap = HashMap::new();
    implicit.entry(Type::Bool).or_default().insert(Type::String, "boolToString".to_string());
    implicit.entry(Type::Bool).or_default().insert(Type::Int, "boolToInt".to_string());

    // the inner bool -> int conversion succeeds, the outer one returns the wrong type
    let scope = Scope::new()
        .with_variable("flag", Variable::new(true))
        .with_variable("name", Variable::new("web"))
        .with_function("boolToString", Function::new(vec![Type::Int], Type::Float))
        .with_function("boolToInt", Function::new(vec![Type::Bool], Type::Int));
    let mut node = parse("${name}-${flag}");

    let error = type_check(&mut node, &scope, Some(&implicit)).unwrap_err();
    assert_eq!(error.get_error_name(), "ArgumentTypeMismatch");
    assert_eq!(node.to_string(), "${name}-${flag}");
}

#[test]
fn test_converter_argument_is_converted_in_turn() {
    let mut implicit = int_to_string();
    implicit.entry(Type::Bool).or_default().insert(Type::String, "boolToString".to_string());
    implicit.entry(Type::Bool).or_default().insert(Type::Int, "boolToInt".to_string());

    // boolToString only accepts ints, so bool -> int is inserted first
    let scope = with_converter(Scope::new())
        .with_variable("flag", Variable::new(true))
        .with_function("boolToString", Function::new(vec![Type::Int], Type::String))
        .with_function("boolToInt", Function::new(vec![Type::Bool], Type::Int));
    let mut node = parse("${flag}");

    assert_eq!(type_check(&mut node, &scope, Some(&implicit)), Ok(Type::String));
    assert_eq!(node.to_string(), "${boolToString(boolToInt(flag))}");
}

#[test]
fn test_recursive_converter_fails() {
    let mut implicit: ImplicitMap = HashMap::new();
    implicit.entry(Type::Int).or_default().insert(Type::String, "loop".to_string());

    // `loop` wants a string, so converting its int argument would need `loop` again
    let scope = Scope::new()
        .with_variable("n", Variable::new(1_i64))
        .with_function("loop", Function::new(vec![Type::String], Type::String));
    let mut node = parse("${n}");

    let error = type_check(&mut node, &scope, Some(&implicit)).unwrap_err();
    assert_eq!(
        error.kind(),
        &ErrorImpl::ArgumentTypeMismatch {
            function: "loop".to_string(),
            index: 0,
            expected: Type::String,
            received: Type::Int,
        }
    );
}

#[test]
fn test_unknown_concat_child_needs_conversion() {
    let scope = Scope::new().with_variable("pending", Variable::with_type("", Type::Unknown));
    let mut node = parse("${pending}");

    let error = type_check(&mut node, &scope, None).unwrap_err();
    assert_eq!(error.kind(), &ErrorImpl::ConcatTypeMismatch { index: 0, received: Type::Unknown });
}

#[test]
fn test_unknown_root_is_unresolved() {
    let scope = Scope::new().with_variable("pending", Variable::with_type("", Type::Unknown));
    let mut node = Node::variable("pending", span());

    let error = type_check(&mut node, &scope, None).unwrap_err();
    assert_eq!(error.kind(), &ErrorImpl::UnresolvedType);
}

#[test]
fn test_checker_instance_is_reusable() {
    let scope = Scope::new().with_variable("bar", Variable::new("baz"));
    let mut checker = TypeChecker::new(&scope, None);

    let mut first = parse("a ${bar}");
    let mut second = parse("${missing}");
    let mut third = parse("b ${bar}");

    assert_eq!(checker.visit(&mut first), Ok(Type::String));
    assert!(checker.visit(&mut second).is_err());
    assert_eq!(checker.visit(&mut third), Ok(Type::String));
}
