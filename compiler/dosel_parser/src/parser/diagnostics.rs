use std::fmt;

use dosel_lexer::{Keyword, LexicalError, TokenType};

use super::{Expectation, ParseError};

/// A user-facing description of a scan or parse failure, anchored at a byte offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub offset: usize,
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn from_lexical_error(err: &LexicalError) -> Self {
        Self {
            message: err.to_string(),
            offset: err.offset(),
            help: Some(
                "Commands use words, numbers, ',' and '=', with units such as kg, mg or mg/kg/day"
                    .to_string(),
            ),
        }
    }

    pub fn from_parse_error(err: &ParseError) -> Self {
        Self {
            message: err.to_string(),
            offset: err.position,
            help: help_for_expectation(&err.expected),
        }
    }

    /// Message, source snippet with a caret under the offset, and help line
    pub fn render(&self, source: &str) -> String {
        let mut out = format!("error: {}\n{}", self.message, render_snippet(source, self.offset));
        if let Some(help) = &self.help {
            out.push_str("\nhelp: ");
            out.push_str(help);
        }
        out
    }
}

impl From<&ParseError> for Diagnostic {
    fn from(err: &ParseError) -> Self {
        Diagnostic::from_parse_error(err)
    }
}

impl From<&LexicalError> for Diagnostic {
    fn from(err: &LexicalError) -> Self {
        Diagnostic::from_lexical_error(err)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at offset {})", self.message, self.offset)
    }
}

fn help_for_expectation(expected: &Expectation) -> Option<String> {
    let help = match expected {
        Expectation::Command => {
            "Commands start with CALCULATE, CHECK, ADJUST, VALIDATE, REPORT or ALERT"
        }
        Expectation::Keyword(Keyword::Dose | Keyword::For) => {
            "Dose commands read 'CALCULATE DOSE FOR key=value, ...' or 'ADJUST DOSE FOR ...'"
        }
        Expectation::Keyword(Keyword::Interaction | Keyword::Between)
        | Expectation::Token(TokenType::And) => {
            "Name two drugs: 'CHECK INTERACTION BETWEEN losartan AND ibuprofen'"
        }
        Expectation::Keyword(Keyword::When | Keyword::Exceeds | Keyword::SafetyLimit) => {
            "The alert rule is written 'ALERT WHEN DOSE EXCEEDS SAFETY_LIMIT'"
        }
        Expectation::Token(TokenType::Equals) => {
            "Parameters are written as key=value, e.g. weight=70kg"
        }
        Expectation::Identifier => "Parameter and drug names are plain words such as drug or metformin",
        Expectation::Value => "Values are numbers with an optional unit (70kg, 500mg) or plain words",
        Expectation::EndOfInput => "Only one command is read at a time",
        _ => return None,
    };
    Some(help.to_string())
}

/// Renders the source line containing `offset` with a caret under it.
///
/// ```text
///   |
/// 1 | VALIDATE PRESCRIPTION drug=amlodipine; dose=5mg
///   |                                      ^
/// ```
pub fn render_snippet(source: &str, offset: usize) -> String {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    let line_start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
    let line_end = source[offset..]
        .find('\n')
        .map_or(source.len(), |i| offset + i);
    let line_no = source[..line_start].matches('\n').count() + 1;
    let line = source[line_start..line_end].trim_end_matches('\r');
    let column = source[line_start..offset].chars().count();
    let gutter = " ".repeat(line_no.to_string().len());
    format!(
        "{gutter} |\n{line_no} | {line}\n{gutter} | {}^",
        " ".repeat(column)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_snippet_points_at_offset() {
        let snippet = render_snippet("CHECK INTERACTION BETWEEN a b", 28);
        assert_eq!(
            snippet,
            "  |\n1 | CHECK INTERACTION BETWEEN a b\n  |                             ^"
        );
    }

    #[test]
    fn test_snippet_on_second_line() {
        let snippet = render_snippet("CALCULATE DOSE FOR\n  weight 70kg", 28);
        assert_eq!(snippet, "  |\n2 |   weight 70kg\n  |          ^");
    }

    #[test]
    fn test_snippet_at_end_of_input() {
        let snippet = render_snippet("REPORT", 6);
        assert_eq!(snippet, "  |\n1 | REPORT\n  |       ^");
    }

    #[test]
    fn test_parse_error_diagnostic_has_help() {
        let err = ParseError {
            position: 26,
            expected: Expectation::Token(TokenType::Equals),
            found: "'70'".to_string(),
        };
        let diag = Diagnostic::from(&err);
        assert_eq!(diag.offset, 26);
        assert_eq!(diag.message, "Expected '=' at 26 but found '70'");
        assert!(diag.help.unwrap_or_default().contains("key=value"));
    }
}
