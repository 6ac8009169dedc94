use dosel_ast::Params;
use dosel_lexer::TokenType;
use log::debug;
use nom::combinator::{map, opt};

use super::{take_token_if, token, Expectation, PResult, SyntaxError, TokenSlice};

/// `key=value` pairs up to end of input.
///
/// Commas between pairs are optional and a trailing comma is tolerated. Keys
/// are lower-cased; a repeated key keeps its last value.
pub fn kv_list(mut input: TokenSlice<'_>) -> PResult<'_, Params> {
    let mut params = Params::new();
    while !input.at_end() {
        let (rest, key) = name(input)?;
        let (rest, _) = token(TokenType::Equals)(rest)?;
        let (rest, value) = value(rest)?;
        if let Some(previous) = params.insert(key.clone(), value) {
            debug!("parameter '{key}' repeated, dropping earlier value '{previous}'");
        }
        let (rest, _) = opt(token(TokenType::Comma))(rest)?;
        input = rest;
    }
    Ok((input, params))
}

/// A parameter name or drug name: an identifier, or a keyword used as a word.
pub fn name(input: TokenSlice<'_>) -> PResult<'_, String> {
    map(
        take_token_if(
            |t| matches!(t, TokenType::Ident | TokenType::Keyword(_)),
            Expectation::Identifier,
        ),
        |t| t.lexeme.to_lowercase(),
    )(input)
}

/// A parameter value.
///
/// A number swallows a unit token right after it (`70` `kg` becomes
/// `"70kg"`); keywords are taken as lower-case words and a bare unit is
/// taken literally.
pub fn value(input: TokenSlice<'_>) -> PResult<'_, String> {
    let Some(first) = input.first() else {
        return Err(nom::Err::Error(SyntaxError::new(input, Expectation::Value)));
    };
    match first.token_type {
        TokenType::Number => {
            let (rest, unit) = opt(take_token_if(
                |t| matches!(t, TokenType::Unit(_)),
                Expectation::Value,
            ))(input.advance())?;
            let text = match unit {
                Some(unit) => format!("{}{}", first.lexeme, unit.lexeme),
                None => first.lexeme.clone(),
            };
            Ok((rest, text))
        }
        TokenType::Ident | TokenType::Unit(_) => Ok((input.advance(), first.lexeme.clone())),
        TokenType::Keyword(_) => Ok((input.advance(), first.lexeme.to_lowercase())),
        _ => Err(nom::Err::Error(SyntaxError::new(input, Expectation::Value))),
    }
}
