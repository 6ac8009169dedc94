//! Command tree for the dosel medical command language.
//!
//! A parsed sentence is one [`Command`](ast::Command); its key/value
//! parameters stay raw strings until the normalizer turns them into a typed
//! clinical context.

pub mod ast;

// Re-export commonly used types
pub use ast::{Command, CommandKind, Params};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A result type for serialization helpers.
#[cfg(feature = "serde")]
pub type Result<T> = std::result::Result<T, serde_json::Error>;

/// Serializes a command to a JSON string.
///
/// # Example
///
/// ```
/// use dosel_ast::{to_json, Command};
///
/// let json = to_json(&Command::AlertThreshold).unwrap();
/// assert!(json.contains(r#""command": "AlertThreshold""#));
/// ```
#[cfg(feature = "serde")]
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
}

/// Deserializes a command from a JSON string.
#[cfg(feature = "serde")]
pub fn from_json<T: for<'de> Deserialize<'de>>(json: &str) -> Result<T> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_display_is_canonical_command_text() {
        let cmd = Command::CalculateDose {
            params: params(&[("weight", "70kg"), ("drug", "metformin")]),
        };
        // keys come out sorted
        assert_eq!(
            cmd.to_string(),
            "CALCULATE DOSE FOR drug=metformin, weight=70kg"
        );
        assert_eq!(
            Command::CheckInteraction {
                drug_a: "losartan".into(),
                drug_b: "ibuprofen".into()
            }
            .to_string(),
            "CHECK INTERACTION BETWEEN losartan AND ibuprofen"
        );
        assert_eq!(
            Command::ReportRegimen { params: Params::new() }.to_string(),
            "REPORT REGIMEN"
        );
    }

    #[test]
    fn test_kind_and_params() {
        let cmd = Command::ValidatePrescription {
            params: params(&[("drug", "amlodipine")]),
        };
        assert_eq!(cmd.kind(), CommandKind::Validate);
        assert_eq!(cmd.kind().to_string(), "VALIDATE");
        assert_eq!(cmd.params().map(|p| p.len()), Some(1));
        assert_eq!(Command::AlertThreshold.params(), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialization() -> std::result::Result<(), String> {
        let cmd = Command::AdjustDose {
            params: params(&[("drug", "losartan"), ("age", "80")]),
        };
        let json = to_json(&cmd).map_err(|e| e.to_string())?;
        let back: Command = from_json(&json).map_err(|e| e.to_string())?;
        assert_eq!(cmd, back);
        Ok(())
    }
}
