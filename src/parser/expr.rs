use crate::{
    ast::{ast::Node, types::Value},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Node, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud_fn) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(parser.unexpected_token());
    };

    let mut left = nud_fn(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    while parser.current_binding_power() > bp {
        let token_kind = parser.current_token_kind();
        let Some(led_fn) = parser.get_led_lookup().get(&token_kind).copied() else {
            return Err(parser.unexpected_token());
        };

        let current_bp = parser.current_binding_power();
        left = led_fn(parser, left, current_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Node, Error> {
    let token = parser.current_token().clone();

    let value = match token.kind {
        TokenKind::Integer => match token.value.parse::<i64>() {
            Ok(value) => Value::Int(value),
            Err(_) => {
                return Err(Error::new(ErrorImpl::NumberParseError { token: token.value }, token.span.start));
            }
        },
        TokenKind::Float => match token.value.parse::<f64>() {
            Ok(value) => Value::Float(value),
            Err(_) => {
                return Err(Error::new(ErrorImpl::NumberParseError { token: token.value }, token.span.start));
            }
        },
        TokenKind::String => Value::String(token.value.clone()),
        TokenKind::True => Value::Bool(true),
        TokenKind::False => Value::Bool(false),
        TokenKind::Identifier => {
            parser.advance();
            return Ok(Node::variable(&token.value, token.span));
        }
        _ => return Err(parser.unexpected_token()),
    };

    parser.advance();
    Ok(Node::literal(value, token.span))
}

/// `name(arg, ...)` - only a bare identifier can be called.
pub fn parse_call_expr(parser: &mut Parser, left: Node, _bp: BindingPower) -> Result<Node, Error> {
    let Node::VariableAccess(callee) = left else {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken { token: String::from("(") },
            parser.get_position(),
        ));
    };

    parser.expect(TokenKind::OpenParen)?;

    let mut args = vec![];
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            args.push(parse_expr(parser, BindingPower::Default)?);

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }

    let close = parser.expect(TokenKind::CloseParen)?;

    Ok(Node::call(
        &callee.name,
        args,
        Span {
            start: callee.span.start,
            end: close.span.end,
        },
    ))
}
