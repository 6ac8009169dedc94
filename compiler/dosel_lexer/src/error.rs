use crate::token::Location;

/// The scanner met a character that starts no token.
///
/// Always fatal to the command being scanned; the scanner never skips ahead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unexpected character {character:?} at {}", location.offset)]
pub struct LexicalError {
    /// The offending character
    pub character: char,
    /// Where it was found
    pub location: Location,
}

impl LexicalError {
    pub fn offset(&self) -> usize {
        self.location.offset
    }
}
