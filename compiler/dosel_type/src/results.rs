use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of a dose calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DosageResult {
    pub drug: String,
    pub condition: String,
    /// Adjusted daily dose, rounded to two decimals
    pub recommended_mg_per_day: f64,
    /// Present only when the drug has a maximum single dose
    pub per_dose_mg: Option<f64>,
    pub doses_per_day: Option<u32>,
    pub rationale: String,
    /// `(low, high)` in mg/day; serialized as a two-element array
    pub safety_range_mg_day: (f64, f64),
    pub alert: Option<String>,
}

impl DosageResult {
    pub fn has_alert(&self) -> bool {
        self.alert.is_some()
    }

    /// Upper bound of the safety range
    pub fn safety_limit(&self) -> f64 {
        self.safety_range_mg_day.1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValidationStatus {
    /// Within `[low, high]`
    Ok,
    /// Above `high`
    Exceeds,
    /// Below `low`, only when `low > 0`
    Low,
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValidationStatus::Ok => "OK",
            ValidationStatus::Exceeds => "EXCEEDS",
            ValidationStatus::Low => "LOW",
        })
    }
}

/// Verdict on a prescribed daily dose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub drug: String,
    pub dose_mg_per_day: f64,
    pub status: ValidationStatus,
    pub message: String,
    /// Set only for `EXCEEDS`
    pub alert: Option<String>,
}

/// A record in a patient's regimen history.
///
/// Serialized as `{"type": "dose", ...}` with the result fields inlined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RegimenEntry {
    Dose(DosageResult),
}

impl From<DosageResult> for RegimenEntry {
    fn from(result: DosageResult) -> Self {
        RegimenEntry::Dose(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> DosageResult {
        DosageResult {
            drug: "metformin".into(),
            condition: "diabetes".into(),
            recommended_mg_per_day: 560.0,
            per_dose_mg: Some(560.0),
            doses_per_day: Some(1),
            rationale: "20.0 mg/kg/day capped at 2000.0 mg/day".into(),
            safety_range_mg_day: (500.0, 2000.0),
            alert: None,
        }
    }

    #[test]
    fn test_regimen_entry_layout() {
        let value = serde_json::to_value(RegimenEntry::from(sample())).unwrap();
        assert_eq!(value["type"], "dose");
        assert_eq!(value["drug"], "metformin");
        assert_eq!(value["safety_range_mg_day"], serde_json::json!([500.0, 2000.0]));
        assert_eq!(value["alert"], serde_json::Value::Null);
    }

    #[test]
    fn test_regimen_entry_reads_back() {
        let json = serde_json::to_string(&RegimenEntry::from(sample())).unwrap();
        let entry: RegimenEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, RegimenEntry::Dose(sample()));
    }

    #[test]
    fn test_status_spelling() {
        assert_eq!(serde_json::to_string(&ValidationStatus::Exceeds).unwrap(), "\"EXCEEDS\"");
        assert_eq!(ValidationStatus::Ok.to_string(), "OK");
        assert!(!sample().has_alert());
        assert_eq!(sample().safety_limit(), 2000.0);
    }
}
