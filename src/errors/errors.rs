use std::fmt::Display;

use thiserror::Error;

use crate::{ast::types::Type, Position};

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnterminatedInterpolation => "UnterminatedInterpolation",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UndefinedVariable { .. } => "UndefinedVariable",
            ErrorImpl::UndefinedFunction { .. } => "UndefinedFunction",
            ErrorImpl::ArityMismatch { .. } => "ArityMismatch",
            ErrorImpl::ArgumentTypeMismatch { .. } => "ArgumentTypeMismatch",
            ErrorImpl::ConcatTypeMismatch { .. } => "ConcatTypeMismatch",
            ErrorImpl::UnresolvedType => "UnresolvedType",
            ErrorImpl::MissingCallback { .. } => "MissingCallback",
            ErrorImpl::CallbackFailed { .. } => "CallbackFailed",
            ErrorImpl::ValueTypeMismatch { .. } => "ValueTypeMismatch",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`", token))
            }
            ErrorImpl::UnterminatedInterpolation => {
                ErrorTip::Suggestion(String::from("`${` is never closed, did you miss a `}`?"))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::UndefinedVariable { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` is not defined in the scope", variable))
            }
            ErrorImpl::UndefinedFunction { function } => {
                ErrorTip::Suggestion(format!("Function `{}` is not defined in the scope", function))
            }
            ErrorImpl::ArityMismatch { function, expected, received, variadic } => ErrorTip::Suggestion(format!(
                "`{}` expects {}{} arguments, received {}",
                function,
                at_least(variadic),
                expected,
                received
            )),
            ErrorImpl::ArgumentTypeMismatch { function, index, expected, received } => {
                ErrorTip::Suggestion(format!(
                    "Argument {} of `{}` should be `{}`, received `{}`",
                    index + 1, function, expected, received
                ))
            }
            ErrorImpl::ConcatTypeMismatch { received, .. } => ErrorTip::Suggestion(format!(
                "Interpolated values must be `string`, received `{}`; register an implicit conversion or convert explicitly",
                received
            )),
            ErrorImpl::UnresolvedType => ErrorTip::Suggestion(String::from(
                "The template does not resolve to a known type",
            )),
            ErrorImpl::MissingCallback { function } => {
                ErrorTip::Suggestion(format!("Function `{}` has no callback to evaluate", function))
            }
            ErrorImpl::CallbackFailed { function, message } => {
                ErrorTip::Suggestion(format!("`{}` failed: {}", function, message))
            }
            ErrorImpl::ValueTypeMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Expected a `{}` value, received `{}`",
                expected, received
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (at {}:{})", self.internal_error, self.position.1, self.position.0)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.internal_error)
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unterminated interpolation")]
    UnterminatedInterpolation,
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("unknown variable accessed: {variable}")]
    UndefinedVariable { variable: String },
    #[error("unknown function called: {function}")]
    UndefinedFunction { function: String },
    #[error("{function}: expected {}{expected} arguments, received {received}", at_least(.variadic))]
    ArityMismatch { function: String, expected: usize, received: usize, variadic: bool },
    #[error("{function}: argument {index} should be {expected}, got {received}")]
    ArgumentTypeMismatch { function: String, index: usize, expected: Type, received: Type },
    #[error("concat element {index} should be string, got {received}")]
    ConcatTypeMismatch { index: usize, received: Type },
    #[error("template resolves to an unknown type")]
    UnresolvedType,
    #[error("function {function:?} has no callback")]
    MissingCallback { function: String },
    #[error("function {function:?} failed: {message}")]
    CallbackFailed { function: String, message: String },
    #[error("value type mismatch: expected {expected}, received {received}")]
    ValueTypeMismatch { expected: Type, received: Type },
}

fn at_least(variadic: &bool) -> &'static str {
    if *variadic {
        "at least "
    } else {
        ""
    }
}
