
use crate::token::{Token, TokenType};

/// Scan and keep only the kinds, dropping the trailing `Eof`.
pub(super) fn kinds(input: &str) -> Vec<TokenType> {
    let tokens: Vec<Token> = super::scan(input).expect("input should scan");
    assert_eq!(tokens.last().map(|t| t.token_type), Some(TokenType::Eof));
    tokens[..tokens.len() - 1]
        .iter()
        .map(|t| t.token_type)
        .collect()
}
