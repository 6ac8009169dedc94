use thiserror::Error;

/// Semantic failures while normalizing parameters or evaluating a command.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExecutionError {
    #[error("Missing parameter: {0}")]
    MissingParameter(&'static str),

    /// A command was given without the parameters it cannot run without
    #[error("{0}")]
    RequiredParameters(&'static str),

    #[error("Invalid numeric value '{value}'")]
    InvalidNumber { value: String },

    #[error("Unsupported {parameter} unit '{unit}' (expected {expected})")]
    UnsupportedUnit {
        parameter: &'static str,
        unit: String,
        expected: &'static str,
    },

    #[error("Unknown drug: {0}")]
    UnknownDrug(String),

    /// Not raised by the built-in rules: unknown conditions fall back to a
    /// drug's default dose.
    #[error("Unknown condition: {0}")]
    UnknownCondition(String),

    #[error("{message}")]
    SafetyLimitExceeded {
        message: String,
        computed: f64,
        limit: f64,
    },

    #[error("Regimen store failure: {0}")]
    Persistence(String),
}
