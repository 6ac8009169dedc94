use dosel_lexer::Token;
use nom::InputLength;

/// A cursor over the scanned tokens, used as the nom input type.
///
/// Copying the slice is how the parser backtracks; nothing is ever consumed
/// out of the underlying token vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenSlice<'a>(pub &'a [Token]);

impl<'a> TokenSlice<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        TokenSlice(tokens)
    }

    /// The token under the cursor
    pub fn first(&self) -> Option<&'a Token> {
        self.0.first()
    }

    /// The slice with the first token dropped
    pub fn advance(&self) -> Self {
        match self.0.split_first() {
            Some((_, rest)) => TokenSlice(rest),
            None => *self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True at `Eof` or when the tokens ran out
    pub fn at_end(&self) -> bool {
        self.first().map_or(true, Token::is_eof)
    }
}

impl InputLength for TokenSlice<'_> {
    fn input_len(&self) -> usize {
        self.0.len()
    }
}
