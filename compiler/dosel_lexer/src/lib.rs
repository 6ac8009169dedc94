//! Scanner for the dosel medical command language.
//!
//! Turns one line of command text such as
//! `CALCULATE DOSE FOR drug=metformin, weight=70kg` into a sequence of typed
//! tokens terminated by an end-of-input token.

pub mod error;
pub mod lexer;
pub mod logos_token;
pub mod token;

// Re-export the main types for convenience
pub use error::LexicalError;
pub use lexer::{scan, Lexer};
pub use logos_token::LogosToken;
pub use token::{Keyword, Location, Token, TokenType, Unit, AND};
