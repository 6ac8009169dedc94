use std::collections::HashMap;
use std::fmt;

use lazy_static::lazy_static;

/// Represents a token's location in the command text.
///
/// Commands are usually a single line, but the scanner accepts line breaks
/// as whitespace, so line and column are tracked alongside the byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    /// The 1-based line number
    pub line: usize,
    /// The 1-based column number, counted in characters
    pub column: usize,
    /// The 0-based byte offset from the start of the command
    pub offset: usize,
}

/// Reserved words of the command language.
///
/// A bare word whose upper-cased form is listed here is reclassified as a
/// keyword by the scanner. `AND` is reserved as well but gets its own
/// [`TokenType::And`] kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Calculate,
    Dose,
    For,
    Patient,
    Drug,
    Condition,
    Weight,
    Age,
    KidneyFunction,
    Check,
    Interaction,
    Between,
    Adjust,
    Validate,
    Prescription,
    Report,
    Regimen,
    PatientId,
    Alert,
    When,
    Exceeds,
    SafetyLimit,
}

impl Keyword {
    pub const ALL: [Keyword; 22] = [
        Keyword::Calculate,
        Keyword::Dose,
        Keyword::For,
        Keyword::Patient,
        Keyword::Drug,
        Keyword::Condition,
        Keyword::Weight,
        Keyword::Age,
        Keyword::KidneyFunction,
        Keyword::Check,
        Keyword::Interaction,
        Keyword::Between,
        Keyword::Adjust,
        Keyword::Validate,
        Keyword::Prescription,
        Keyword::Report,
        Keyword::Regimen,
        Keyword::PatientId,
        Keyword::Alert,
        Keyword::When,
        Keyword::Exceeds,
        Keyword::SafetyLimit,
    ];

    /// The canonical (upper-case) spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Calculate => "CALCULATE",
            Keyword::Dose => "DOSE",
            Keyword::For => "FOR",
            Keyword::Patient => "PATIENT",
            Keyword::Drug => "DRUG",
            Keyword::Condition => "CONDITION",
            Keyword::Weight => "WEIGHT",
            Keyword::Age => "AGE",
            Keyword::KidneyFunction => "KIDNEY_FUNCTION",
            Keyword::Check => "CHECK",
            Keyword::Interaction => "INTERACTION",
            Keyword::Between => "BETWEEN",
            Keyword::Adjust => "ADJUST",
            Keyword::Validate => "VALIDATE",
            Keyword::Prescription => "PRESCRIPTION",
            Keyword::Report => "REPORT",
            Keyword::Regimen => "REGIMEN",
            Keyword::PatientId => "PATIENT_ID",
            Keyword::Alert => "ALERT",
            Keyword::When => "WHEN",
            Keyword::Exceeds => "EXCEEDS",
            Keyword::SafetyLimit => "SAFETY_LIMIT",
        }
    }

    /// Looks up a bare word in the reserved-word set, ignoring case.
    pub fn lookup(word: &str) -> Option<Keyword> {
        KEYWORDS.get(word.to_ascii_uppercase().as_str()).copied()
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

lazy_static! {
    static ref KEYWORDS: HashMap<&'static str, Keyword> =
        Keyword::ALL.iter().map(|k| (k.as_str(), *k)).collect();
}

/// Spelling of the distinguished conjunction keyword.
pub const AND: &str = "AND";

/// The closed set of unit suffixes a value may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Kg,
    Mg,
    Mcg,
    G,
    Ml,
    MgPerKgPerDay,
    MgPerKgPerDose,
    MgPerDay,
    McgPerDay,
    MgPerDose,
}

impl Unit {
    pub const ALL: [Unit; 10] = [
        Unit::Kg,
        Unit::Mg,
        Unit::Mcg,
        Unit::G,
        Unit::Ml,
        Unit::MgPerKgPerDay,
        Unit::MgPerKgPerDose,
        Unit::MgPerDay,
        Unit::McgPerDay,
        Unit::MgPerDose,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Kg => "kg",
            Unit::Mg => "mg",
            Unit::Mcg => "mcg",
            Unit::G => "g",
            Unit::Ml => "ml",
            Unit::MgPerKgPerDay => "mg/kg/day",
            Unit::MgPerKgPerDose => "mg/kg/dose",
            Unit::MgPerDay => "mg/day",
            Unit::McgPerDay => "mcg/day",
            Unit::MgPerDose => "mg/dose",
        }
    }

    /// Exact, case-sensitive match against the unit set.
    pub fn from_lexeme(s: &str) -> Option<Unit> {
        Unit::ALL.iter().copied().find(|u| u.as_str() == s)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of a scanned token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Number,
    Unit(Unit),
    Ident,
    Keyword(Keyword),
    And,
    Comma,
    Equals,
    Eof,
}

impl TokenType {
    /// Short human name used in diagnostics ("expected X but found Y")
    pub fn describe(&self) -> String {
        match self {
            TokenType::Number => "number".to_string(),
            TokenType::Unit(_) => "unit".to_string(),
            TokenType::Ident => "identifier".to_string(),
            TokenType::Keyword(k) => format!("keyword '{k}'"),
            TokenType::And => "'AND'".to_string(),
            TokenType::Comma => "','".to_string(),
            TokenType::Equals => "'='".to_string(),
            TokenType::Eof => "end of input".to_string(),
        }
    }
}

/// A scanned token: its kind, its (normalized) lexeme and where it started.
///
/// Keyword lexemes are upper-cased and identifier lexemes lower-cased; all
/// other lexemes are the source text verbatim. The trailing `Eof` token has an
/// empty lexeme and sits at the length of the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub lexeme: String,
    pub location: Location,
}

impl Token {
    pub fn new<S: Into<String>>(token_type: TokenType, lexeme: S, location: Location) -> Self {
        Self {
            token_type,
            lexeme: lexeme.into(),
            location,
        }
    }

    pub fn offset(&self) -> usize {
        self.location.offset
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.token_type == TokenType::Keyword(keyword)
    }

    pub fn is_eof(&self) -> bool {
        self.token_type == TokenType::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}('{}')@{}", self.token_type, self.lexeme, self.location)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.line, self.column, self.offset)
    }
}
