//! Scanner implementation for the dosel command language
//! Converts command text into a stream of tokens for the parser

use logos::Logos;

use crate::error::LexicalError;
use crate::token::{Keyword, Location, Token, TokenType, AND};
use crate::LogosToken;

#[cfg(feature = "logging")]
macro_rules! trace_token {
    ($($arg:tt)*) => { log::trace!($($arg)*) };
}

#[cfg(not(feature = "logging"))]
macro_rules! trace_token {
    ($($arg:tt)*) => {};
}

/// Scans a whole command.
///
/// Either every character is accounted for and the returned tokens end with a
/// single `Eof` token, or the first unrecognized character is reported.
pub fn scan(source: &str) -> Result<Vec<Token>, LexicalError> {
    Lexer::new(source).collect()
}

/// The scanner state: a cursor over the source plus the logos automaton.
pub struct Lexer<'a> {
    /// The command text being scanned
    source: &'a str,
    /// The current line number (1-based)
    line: usize,
    /// The current column number (1-based)
    column: usize,
    /// Byte offset up to which `line` and `column` are synced
    offset: usize,
    /// Set once `Eof` or an error has been produced
    finished: bool,
    /// The inner Logos lexer
    inner: logos::Lexer<'a, LogosToken>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given command text
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            line: 1,
            column: 1,
            offset: 0,
            finished: false,
            inner: LogosToken::lexer(source),
        }
    }

    /// Advance line/column tracking to `target`, counting characters rather
    /// than bytes so multi-byte input reports sensible columns.
    fn sync_position_to(&mut self, target: usize) -> Location {
        let text = &self.source[self.offset..target];
        let mut iter = text.chars().peekable();
        while let Some(c) = iter.next() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else if c == '\r' {
                if iter.peek() == Some(&'\n') {
                    iter.next();
                }
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset = target;
        Location {
            line: self.line,
            column: self.column,
            offset: target,
        }
    }

    /// Reclassify a raw logos token into the token the parser sees.
    fn convert_token(&self, raw: LogosToken, lexeme: &str, location: Location) -> Token {
        match raw {
            LogosToken::Comma => Token::new(TokenType::Comma, lexeme, location),
            LogosToken::Equals => Token::new(TokenType::Equals, lexeme, location),
            LogosToken::Number => Token::new(TokenType::Number, lexeme, location),
            LogosToken::Unit(unit) => Token::new(TokenType::Unit(unit), lexeme, location),
            LogosToken::Word => {
                let upper = lexeme.to_ascii_uppercase();
                if upper == AND {
                    Token::new(TokenType::And, upper, location)
                } else if let Some(keyword) = Keyword::lookup(&upper) {
                    Token::new(TokenType::Keyword(keyword), upper, location)
                } else {
                    Token::new(TokenType::Ident, lexeme.to_lowercase(), location)
                }
            }
        }
    }

    /// Get the next token, `Eof` once at the end, then `None`.
    pub fn next_token(&mut self) -> Option<Result<Token, LexicalError>> {
        if self.finished {
            return None;
        }

        let Some(result) = self.inner.next() else {
            self.finished = true;
            let location = self.sync_position_to(self.source.len());
            return Some(Ok(Token::new(TokenType::Eof, "", location)));
        };

        let span = self.inner.span();
        let lexeme = &self.source[span.clone()];

        match result {
            Ok(raw) => {
                let location = self.sync_position_to(span.start);
                let token = self.convert_token(raw, lexeme, location);
                trace_token!("scanned {token}");
                Some(Ok(token))
            }
            Err(()) => {
                self.finished = true;
                // logos may fold an unfinished number ("5.") into the error
                // span; the offending character is the first non-digit.
                let (skip, character) = lexeme
                    .char_indices()
                    .find(|(_, c)| !c.is_ascii_digit())
                    .or_else(|| lexeme.char_indices().next())
                    .unwrap_or((0, '\0'));
                let location = self.sync_position_to(span.start + skip);
                trace_token!("lexical error at {location}: {character:?}");
                Some(Err(LexicalError {
                    character,
                    location,
                }))
            }
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexicalError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

// Include the test module
#[cfg(test)]
mod tests;
