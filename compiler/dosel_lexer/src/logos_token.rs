use logos::Logos;

use crate::token::Unit;

/// Raw token produced by the logos automaton, before keyword reclassification.
///
/// Whitespace is skipped here. Unit literals are plain `#[token]`s so logos'
/// longest-match rule picks `mg/kg/day` over `mg`, and a unit spelling that is
/// only a prefix of a longer word (`gram`, `mgx`) lexes as a [`LogosToken::Word`].
/// On an exact tie a unit wins over a word: the one-letter `g` carries an
/// explicit priority above the word regex.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum LogosToken {
    #[token(",")]
    Comma,
    #[token("=")]
    Equals,

    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,

    // --- Units (compound spellings first) ---
    #[token("mg/kg/day", |_| Unit::MgPerKgPerDay)]
    #[token("mg/kg/dose", |_| Unit::MgPerKgPerDose)]
    #[token("mg/day", |_| Unit::MgPerDay)]
    #[token("mcg/day", |_| Unit::McgPerDay)]
    #[token("mg/dose", |_| Unit::MgPerDose)]
    #[token("kg", |_| Unit::Kg)]
    #[token("mg", |_| Unit::Mg)]
    #[token("mcg", |_| Unit::Mcg)]
    #[token("g", |_| Unit::G, priority = 3)]
    #[token("ml", |_| Unit::Ml)]
    Unit(Unit),

    /// Keywords and identifiers; the lexer decides which.
    #[regex(r"[A-Za-z_][A-Za-z0-9_\-]*")]
    Word,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(input: &str) -> Vec<Result<LogosToken, ()>> {
        LogosToken::lexer(input).collect()
    }

    #[test]
    fn test_compound_unit_is_one_token() {
        assert_eq!(raw("mg/kg/day"), vec![Ok(LogosToken::Unit(Unit::MgPerKgPerDay))]);
        assert_eq!(raw("mcg/day"), vec![Ok(LogosToken::Unit(Unit::McgPerDay))]);
    }

    #[test]
    fn test_unit_prefix_of_word_is_word() {
        assert_eq!(raw("glimepiride"), vec![Ok(LogosToken::Word)]);
        assert_eq!(raw("mgx"), vec![Ok(LogosToken::Word)]);
    }

    #[test]
    fn test_bare_g_is_unit() {
        assert_eq!(raw("g"), vec![Ok(LogosToken::Unit(Unit::G))]);
        assert_eq!(raw("glimepiride"), vec![Ok(LogosToken::Word)]);
        assert_eq!(raw("g2"), vec![Ok(LogosToken::Word)]);
    }

    #[test]
    fn test_number_then_unit() {
        assert_eq!(
            raw("0.5g"),
            vec![Ok(LogosToken::Number), Ok(LogosToken::Unit(Unit::G))]
        );
    }
}
