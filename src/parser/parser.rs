//! Parser implementation for building the expression tree.
//!
//! This module contains the main Parser struct and the template entry
//! point. Template text becomes literal nodes; each `${ }` span is parsed
//! with a Pratt parser driven by NUD/LED lookup tables.

use std::{collections::HashMap, sync::Arc};

use crate::{
    ast::ast::Node,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span, MK_TOKEN,
};

use super::{
    expr::parse_expr,
    lookups::{create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup},
};

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// The list of tokens to parse, always terminated by EOF
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a new Parser instance.
    ///
    /// A missing trailing EOF token is added so the cursor always has a
    /// token to look at.
    pub fn new(mut tokens: Vec<Token>, file: Arc<String>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens
                .last()
                .map(|token| token.span.end.clone())
                .unwrap_or(Position(0, Arc::clone(&file)));
            tokens.push(MK_TOKEN!(
                TokenKind::EOF,
                String::from("EOF"),
                Span { start: end.clone(), end }
            ));
        }

        Parser {
            tokens,
            pos: 0,
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    pub fn current_binding_power(&self) -> BindingPower {
        *self
            .binding_power_lookup
            .get(&self.current_token_kind())
            .unwrap_or(&BindingPower::Default)
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    /// Expects a token of the specified kind and consumes it.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            Err(self.unexpected_token())
        } else {
            Ok(self.advance())
        }
    }

    /// Builds an UnexpectedToken error for the current token.
    pub fn unexpected_token(&self) -> Error {
        let token = self.current_token();
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: token.value.clone(),
            },
            token.span.start.clone(),
        )
    }

    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.binding_power_lookup.insert(kind, BindingPower::Primary);
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Returns the position of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }
}

/// Parses a stream of template tokens into an expression tree.
///
/// A template without any `${ }` yields a single literal node (an empty one
/// for empty input). Anything else yields a concat of the text and
/// expression parts in source order.
pub fn parse(tokens: Vec<Token>, file: Arc<String>) -> Result<Node, Error> {
    let mut parser = Parser::new(tokens, file);
    create_token_lookups(&mut parser);

    let start = parser.get_position();
    let mut exprs = vec![];
    let mut interpolated = false;

    while parser.current_token_kind() != TokenKind::EOF {
        match parser.current_token_kind() {
            TokenKind::Text => {
                let text = parser.advance();
                exprs.push(Node::literal(text.value, text.span));
            }
            TokenKind::OpenInterpolation => {
                parser.advance();
                exprs.push(parse_expr(&mut parser, BindingPower::Default)?);
                parser.expect(TokenKind::CloseInterpolation)?;
                interpolated = true;
            }
            _ => return Err(parser.unexpected_token()),
        }
    }

    let span = Span {
        start,
        end: parser.get_position(),
    };

    if !interpolated {
        return Ok(exprs.pop().unwrap_or_else(|| Node::literal("", span)));
    }

    tracing::trace!(parts = exprs.len(), "parsed template");
    Ok(Node::concat(exprs, span))
}
