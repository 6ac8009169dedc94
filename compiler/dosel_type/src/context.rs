use std::fmt;

use serde::{Deserialize, Serialize};

/// Reported kidney function.
///
/// Values outside the known set are kept verbatim so they can be echoed back,
/// but they never count as renal impairment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KidneyFunction {
    Normal,
    Impaired,
    Reduced,
    Ckd,
    #[serde(untagged)]
    Other(String),
}

impl KidneyFunction {
    /// Case-insensitive; unknown spellings become `Other` (lower-cased)
    pub fn from_value(value: &str) -> Self {
        let lower = value.to_lowercase();
        match lower.as_str() {
            "normal" => KidneyFunction::Normal,
            "impaired" => KidneyFunction::Impaired,
            "reduced" => KidneyFunction::Reduced,
            "ckd" => KidneyFunction::Ckd,
            _ => KidneyFunction::Other(lower),
        }
    }

    pub fn is_impaired(&self) -> bool {
        matches!(
            self,
            KidneyFunction::Impaired | KidneyFunction::Reduced | KidneyFunction::Ckd
        )
    }

    pub fn as_str(&self) -> &str {
        match self {
            KidneyFunction::Normal => "normal",
            KidneyFunction::Impaired => "impaired",
            KidneyFunction::Reduced => "reduced",
            KidneyFunction::Ckd => "ckd",
            KidneyFunction::Other(s) => s,
        }
    }
}

impl fmt::Display for KidneyFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Age at which the elderly adjustment starts to apply
pub const ELDERLY_AGE: u32 = 65;

/// Typed view of a command's parameters, as produced by the normalizer.
///
/// Every field is optional except the two derived flags, which are `false`
/// unless their source parameter was given and qualifies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClinicalContext {
    pub weight_kg: Option<f64>,
    pub age: Option<u32>,
    /// `age >= 65`
    pub elderly: bool,
    pub kidney_function: Option<KidneyFunction>,
    pub renal_impaired: bool,
    /// Lower-cased
    pub condition: Option<String>,
    /// Lower-cased
    pub drug: Option<String>,
    pub patient_id: Option<String>,
    /// Prescribed dose converted to mg
    pub dose_mg_input: Option<f64>,
}

impl ClinicalContext {
    /// Sets the age and the derived `elderly` flag together.
    pub fn set_age(&mut self, age: u32) {
        self.age = Some(age);
        self.elderly = age >= ELDERLY_AGE;
    }

    /// Sets kidney function and the derived `renal_impaired` flag together.
    pub fn set_kidney_function(&mut self, kidney_function: KidneyFunction) {
        self.renal_impaired = kidney_function.is_impaired();
        self.kidney_function = Some(kidney_function);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kidney_function_classification() {
        assert_eq!(KidneyFunction::from_value("CKD"), KidneyFunction::Ckd);
        assert!(KidneyFunction::from_value("Reduced").is_impaired());
        assert!(!KidneyFunction::Normal.is_impaired());
        let other = KidneyFunction::from_value("Borderline");
        assert_eq!(other, KidneyFunction::Other("borderline".to_string()));
        assert!(!other.is_impaired());
        assert_eq!(other.to_string(), "borderline");
    }

    #[test]
    fn test_derived_flags() {
        let mut ctx = ClinicalContext::default();
        assert!(!ctx.elderly && !ctx.renal_impaired);
        ctx.set_age(65);
        assert!(ctx.elderly);
        ctx.set_age(64);
        assert!(!ctx.elderly);
        ctx.set_kidney_function(KidneyFunction::Impaired);
        assert!(ctx.renal_impaired);
    }

    #[test]
    fn test_kidney_function_serializes_as_plain_string() {
        let json = serde_json::to_string(&KidneyFunction::Ckd).unwrap();
        assert_eq!(json, "\"ckd\"");
        let json = serde_json::to_string(&KidneyFunction::Other("mild".into())).unwrap();
        assert_eq!(json, "\"mild\"");
    }
}
