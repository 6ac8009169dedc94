use std::fmt;

use dosel_lexer::LexicalError;
use dosel_parser::ParseError;
use dosel_type::ExecutionError;
use serde::Serialize;
use thiserror::Error;

/// Any failure while running one command.
///
/// Each stage's error converts in with `?` and keeps its concrete kind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpreterError {
    #[error(transparent)]
    Lexical(#[from] LexicalError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

/// Stable names for the error kinds a front end renders differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    LexicalError,
    ParseError,
    ExecutionError,
    UnknownDrugError,
    UnknownConditionError,
    SafetyLimitExceeded,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Serializable summary of an error for display or logging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub message: String,
    /// Byte offset into the command, for scan and parse errors
    pub position: Option<usize>,
}

impl InterpreterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InterpreterError::Lexical(_) => ErrorKind::LexicalError,
            InterpreterError::Parse(_) => ErrorKind::ParseError,
            InterpreterError::Execution(e) => match e {
                ExecutionError::UnknownDrug(_) => ErrorKind::UnknownDrugError,
                ExecutionError::UnknownCondition(_) => ErrorKind::UnknownConditionError,
                ExecutionError::SafetyLimitExceeded { .. } => ErrorKind::SafetyLimitExceeded,
                _ => ErrorKind::ExecutionError,
            },
        }
    }

    pub fn position(&self) -> Option<usize> {
        match self {
            InterpreterError::Lexical(e) => Some(e.offset()),
            InterpreterError::Parse(e) => Some(e.position),
            InterpreterError::Execution(_) => None,
        }
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            kind: self.kind(),
            message: self.to_string(),
            position: self.position(),
        }
    }
}
