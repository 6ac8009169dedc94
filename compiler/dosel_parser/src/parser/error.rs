use std::fmt;

use dosel_lexer::{Keyword, Token, TokenType};
use nom::error::{ErrorKind, ParseError as NomParseError};

use super::TokenSlice;

/// What the parser was looking for when it gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    /// One of the six leading command keywords
    Command,
    Keyword(Keyword),
    Token(TokenType),
    /// A parameter name or a drug name
    Identifier,
    /// A parameter value
    Value,
    EndOfInput,
    /// A bare nom combinator failure
    Other(ErrorKind),
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Command => {
                f.write_str("a command (CALCULATE, CHECK, ADJUST, VALIDATE, REPORT or ALERT)")
            }
            Expectation::Keyword(k) => write!(f, "keyword '{k}'"),
            Expectation::Token(tt) => f.write_str(&tt.describe()),
            Expectation::Identifier => f.write_str("identifier"),
            Expectation::Value => f.write_str("value"),
            Expectation::EndOfInput => f.write_str("end of input"),
            Expectation::Other(kind) => f.write_str(kind.description()),
        }
    }
}

/// A grammar violation: where, what was expected, and what was there instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Expected {expected} at {position} but found {found}")]
pub struct ParseError {
    /// Byte offset of the offending token in the command text
    pub position: usize,
    pub expected: Expectation,
    /// The offending lexeme quoted, or `end of input`
    pub found: String,
}

impl ParseError {
    pub fn offset(&self) -> usize {
        self.position
    }
}

/// The nom error type threaded through the combinators.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError<'a> {
    pub input: TokenSlice<'a>,
    pub expected: Expectation,
}

impl<'a> SyntaxError<'a> {
    pub fn new(input: TokenSlice<'a>, expected: Expectation) -> Self {
        Self { input, expected }
    }

    /// Resolves the error against the full token sequence it came from.
    pub fn into_parse_error(self, tokens: &[Token]) -> ParseError {
        match self.input.first() {
            Some(token) => ParseError {
                position: token.offset(),
                expected: self.expected,
                found: describe_found(token),
            },
            None => ParseError {
                position: end_offset(tokens),
                expected: self.expected,
                found: "end of input".to_string(),
            },
        }
    }
}

impl<'a> NomParseError<TokenSlice<'a>> for SyntaxError<'a> {
    fn from_error_kind(input: TokenSlice<'a>, kind: ErrorKind) -> Self {
        Self::new(input, Expectation::Other(kind))
    }

    // the innermost expectation is the useful one
    fn append(_input: TokenSlice<'a>, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

fn describe_found(token: &Token) -> String {
    if token.is_eof() {
        "end of input".to_string()
    } else {
        format!("'{}'", token.lexeme)
    }
}

/// Offset just past the last token, used when the slice ran out without `Eof`.
pub(crate) fn end_offset(tokens: &[Token]) -> usize {
    tokens
        .last()
        .map_or(0, |t| t.offset() + t.lexeme.len())
}
