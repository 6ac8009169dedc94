// Recursive-descent parser for dosel commands, written with nom over a token slice.
// One token of lookahead; once a leading keyword matched, every later mismatch is fatal (`cut`).

pub mod commands;
pub mod diagnostics;
mod error;
pub mod params;
mod token_slice;

use dosel_ast::Command;
use dosel_lexer::{Keyword, Token, TokenType};
use log::debug;
use nom::IResult;

pub use error::{Expectation, ParseError, SyntaxError};
pub use token_slice::TokenSlice;

/// Result type of every parser in this crate.
pub type PResult<'a, O> = IResult<TokenSlice<'a>, O, SyntaxError<'a>>;

/// Parses a whole scanned command.
///
/// The tokens are normally the output of `dosel_lexer::scan`, terminated by
/// `Eof`. Anything left over after a complete sentence is an error.
pub fn parse_command(tokens: &[Token]) -> Result<Command, ParseError> {
    match commands::command(TokenSlice::new(tokens)) {
        Ok((_, command)) => {
            debug!("parsed {} command", command.kind());
            Ok(command)
        }
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            let err = e.into_parse_error(tokens);
            debug!("parse failed: {err}");
            Err(err)
        }
        Err(nom::Err::Incomplete(_)) => Err(ParseError {
            position: error::end_offset(tokens),
            expected: Expectation::EndOfInput,
            found: "end of input".to_string(),
        }),
    }
}

/// Consumes one token whose type satisfies `pred`, or fails with `expected`.
pub fn take_token_if<'a, F>(
    pred: F,
    expected: Expectation,
) -> impl Fn(TokenSlice<'a>) -> PResult<'a, &'a Token>
where
    F: Fn(&TokenType) -> bool,
{
    move |input: TokenSlice<'a>| match input.first() {
        Some(token) if pred(&token.token_type) => Ok((input.advance(), token)),
        _ => Err(nom::Err::Error(SyntaxError::new(input, expected))),
    }
}

/// Requires the given keyword under the cursor.
pub fn keyword<'a>(keyword: Keyword) -> impl Fn(TokenSlice<'a>) -> PResult<'a, &'a Token> {
    take_token_if(
        move |t| *t == TokenType::Keyword(keyword),
        Expectation::Keyword(keyword),
    )
}

/// Requires a token of exactly this type (`,`, `=`, `AND`, ...).
pub fn token<'a>(token_type: TokenType) -> impl Fn(TokenSlice<'a>) -> PResult<'a, &'a Token> {
    take_token_if(move |t| *t == token_type, Expectation::Token(token_type))
}
