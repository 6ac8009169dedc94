use dosel_ast::CommandKind;
use dosel_type::{DosageResult, RegimenEntry, ValidationResult};
use serde::{Deserialize, Serialize};

/// Name of the one alert rule the language can arm
pub const ALERT_RULE_NAME: &str = "dose_exceeds_safety_limit";

/// Status reported when the alert rule is armed
pub const ALERT_RULE_STATUS: &str = "armed (demo)";

/// Tagged result of a command, serialized as `{"type": "CALCULATE", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Response {
    Calculate {
        result: DosageResult,
    },
    Check {
        interaction: String,
    },
    Adjust {
        result: DosageResult,
    },
    Validate {
        result: ValidationResult,
    },
    Report {
        patient_id: String,
        entries: Vec<RegimenEntry>,
    },
    AlertRule {
        rule: String,
        status: String,
    },
}

impl Response {
    pub fn alert_rule() -> Self {
        Response::AlertRule {
            rule: ALERT_RULE_NAME.to_string(),
            status: ALERT_RULE_STATUS.to_string(),
        }
    }

    pub fn kind(&self) -> CommandKind {
        match self {
            Response::Calculate { .. } => CommandKind::Calculate,
            Response::Check { .. } => CommandKind::Check,
            Response::Adjust { .. } => CommandKind::Adjust,
            Response::Validate { .. } => CommandKind::Validate,
            Response::Report { .. } => CommandKind::Report,
            Response::AlertRule { .. } => CommandKind::Alert,
        }
    }

    /// The dose result of a CALCULATE or ADJUST response
    pub fn dosage(&self) -> Option<&DosageResult> {
        match self {
            Response::Calculate { result } | Response::Adjust { result } => Some(result),
            _ => None,
        }
    }
}
