// Command tree for the dosel language.
// One node per sentence; nodes are built by the parser and consumed once by the dispatcher.

use std::collections::BTreeMap;
use std::fmt;

use dosel_lexer::Keyword;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Raw key/value parameters of a command: lower-cased name -> raw value text.
///
/// Values keep their unit suffix glued on (`"70kg"`); the normalizer is the
/// only place that interprets them.
pub type Params = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum CommandKind {
    Calculate,
    Check,
    Adjust,
    Validate,
    Report,
    Alert,
}

impl CommandKind {
    /// The keyword a sentence of this kind starts with
    pub fn leading_keyword(&self) -> Keyword {
        match self {
            CommandKind::Calculate => Keyword::Calculate,
            CommandKind::Check => Keyword::Check,
            CommandKind::Adjust => Keyword::Adjust,
            CommandKind::Validate => Keyword::Validate,
            CommandKind::Report => Keyword::Report,
            CommandKind::Alert => Keyword::Alert,
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.leading_keyword().as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "command"))]
pub enum Command {
    /// `CALCULATE DOSE FOR <kv-list>`
    CalculateDose { params: Params },
    /// `ADJUST DOSE FOR <kv-list>`
    AdjustDose { params: Params },
    /// `CHECK INTERACTION BETWEEN <ident> AND <ident>`
    CheckInteraction { drug_a: String, drug_b: String },
    /// `VALIDATE PRESCRIPTION <kv-list>`
    ValidatePrescription { params: Params },
    /// `REPORT REGIMEN <kv-list>`
    ReportRegimen { params: Params },
    /// `ALERT WHEN DOSE EXCEEDS SAFETY_LIMIT`
    AlertThreshold,
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::CalculateDose { .. } => CommandKind::Calculate,
            Command::AdjustDose { .. } => CommandKind::Adjust,
            Command::CheckInteraction { .. } => CommandKind::Check,
            Command::ValidatePrescription { .. } => CommandKind::Validate,
            Command::ReportRegimen { .. } => CommandKind::Report,
            Command::AlertThreshold => CommandKind::Alert,
        }
    }

    /// The key/value parameters, for the variants that carry them
    pub fn params(&self) -> Option<&Params> {
        match self {
            Command::CalculateDose { params }
            | Command::AdjustDose { params }
            | Command::ValidatePrescription { params }
            | Command::ReportRegimen { params } => Some(params),
            Command::CheckInteraction { .. } | Command::AlertThreshold => None,
        }
    }
}

/// Re-serializes the command as canonical command text.
///
/// Parsing the output yields a command equal to `self`.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::CalculateDose { params } => {
                f.write_str("CALCULATE DOSE FOR")?;
                write_params(f, params)
            }
            Command::AdjustDose { params } => {
                f.write_str("ADJUST DOSE FOR")?;
                write_params(f, params)
            }
            Command::CheckInteraction { drug_a, drug_b } => {
                write!(f, "CHECK INTERACTION BETWEEN {drug_a} AND {drug_b}")
            }
            Command::ValidatePrescription { params } => {
                f.write_str("VALIDATE PRESCRIPTION")?;
                write_params(f, params)
            }
            Command::ReportRegimen { params } => {
                f.write_str("REPORT REGIMEN")?;
                write_params(f, params)
            }
            Command::AlertThreshold => f.write_str("ALERT WHEN DOSE EXCEEDS SAFETY_LIMIT"),
        }
    }
}

fn write_params(f: &mut fmt::Formatter<'_>, params: &Params) -> fmt::Result {
    for (i, (key, value)) in params.iter().enumerate() {
        let sep = if i == 0 { " " } else { ", " };
        write!(f, "{sep}{key}={value}")?;
    }
    Ok(())
}
