use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{errors::errors::{Error, ErrorImpl}, Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler
}

lazy_static! {
    // Order matters: floats before integers, `}` closes the interpolation.
    static ref INTERPOLATION_PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^[a-zA-Z_][a-zA-Z0-9_\\-\\.]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("^[0-9]+\\.[0-9]+").unwrap(), handler: float_handler },
        RegexPattern { regex: Regex::new("^[0-9]+").unwrap(), handler: integer_handler },
        RegexPattern { regex: Regex::new("^\\s+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^\"(\\\\.|[^\"\\\\])*\"").unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new("^\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new("^\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new("^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new("^\\}").unwrap(), handler: close_interpolation_handler },
    ];
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum LexMode {
    Text,
    Interpolation,
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    file: Arc<String>,
    mode: LexMode,
}

impl Lexer {
    pub fn new(source: &str, file: Arc<String>) -> Lexer {
        Lexer {
            tokens: vec![],
            source: String::from(source),
            pos: 0,
            file,
            mode: LexMode::Text,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> char {
        self.remainder().chars().next().unwrap_or('\0')
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn position(&self) -> Position {
        Position(self.pos as u32, Arc::clone(&self.file))
    }

    /// Span covering the next `len` bytes of the source.
    pub fn span_of(&self, len: usize) -> Span {
        Span {
            start: self.position(),
            end: Position((self.pos + len) as u32, Arc::clone(&self.file)),
        }
    }

    fn lex_text(&mut self) {
        if self.remainder().starts_with("${") {
            let span = self.span_of(2);
            self.push(MK_TOKEN!(TokenKind::OpenInterpolation, String::from("${"), span));
            self.advance_n(2);
            self.mode = LexMode::Interpolation;
            return;
        }

        let end = self.remainder().find("${").unwrap_or(self.remainder().len());
        let text = String::from(&self.remainder()[..end]);
        let span = self.span_of(end);
        self.push(MK_TOKEN!(TokenKind::Text, text, span));
        self.advance_n(end);
    }
}

fn matched_text(lexer: &Lexer, regex: &Regex) -> Option<String> {
    regex.find(lexer.remainder()).map(|m| String::from(m.as_str()))
}

fn integer_handler(lexer: &mut Lexer, regex: &Regex) {
    let Some(matched) = matched_text(lexer, regex) else { return };

    let span = lexer.span_of(matched.len());
    lexer.advance_n(matched.len());
    lexer.push(MK_TOKEN!(TokenKind::Integer, matched, span));
}

fn float_handler(lexer: &mut Lexer, regex: &Regex) {
    let Some(matched) = matched_text(lexer, regex) else { return };

    let span = lexer.span_of(matched.len());
    lexer.advance_n(matched.len());
    lexer.push(MK_TOKEN!(TokenKind::Float, matched, span));
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    let Some(matched) = matched_text(lexer, regex) else { return };
    lexer.advance_n(matched.len());
}

fn close_interpolation_handler(lexer: &mut Lexer, _regex: &Regex) {
    let span = lexer.span_of(1);
    lexer.push(MK_TOKEN!(TokenKind::CloseInterpolation, String::from("}"), span));
    lexer.advance_n(1);
    lexer.mode = LexMode::Text;
}

fn string_handler(lexer: &mut Lexer, regex: &Regex) {
    let Some(matched) = matched_text(lexer, regex) else { return };
    let span = lexer.span_of(matched.len());
    lexer.advance_n(matched.len());

    let mut result = String::new();
    let mut chars = matched[1..matched.len() - 1].chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        match chars.peek() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some(other) => {
                // Unknown escapes keep the backslash
                result.push(ch);
                result.push(*other);
            }
            None => {
                result.push(ch);
                continue;
            }
        }
        chars.next();
    }

    lexer.push(MK_TOKEN!(TokenKind::String, result, span));
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    let Some(value) = matched_text(lexer, regex) else { return };
    let span = lexer.span_of(value.len());
    lexer.advance_n(value.len());

    if let Some(kind) = RESERVED_LOOKUP.get(value.as_str()) {
        lexer.push(MK_TOKEN!(*kind, value, span));
    } else {
        lexer.push(MK_TOKEN!(TokenKind::Identifier, value, span));
    }
}

pub fn tokenize(source: &str, file: Arc<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);
    let mut opened_at = lex.position();

    while !lex.at_eof() {
        if lex.mode == LexMode::Text {
            opened_at = lex.position();
            lex.lex_text();
            continue;
        }

        let mut matched = false;

        for pattern in INTERPOLATION_PATTERNS.iter() {
            if pattern.regex.is_match(lex.remainder()) {
                (pattern.handler)(&mut lex, &pattern.regex);
                matched = true;
                break;
            }
        }

        if !matched {
            return Err(Error::new(ErrorImpl::UnrecognisedToken { token: lex.at().to_string() }, lex.position()));
        }
    }

    if lex.mode == LexMode::Interpolation {
        return Err(Error::new(ErrorImpl::UnterminatedInterpolation, opened_at));
    }

    let span = lex.span_of(0);
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), span));
    Ok(lex.tokens)
}
