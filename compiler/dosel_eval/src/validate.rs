use dosel_rules::{format_amount, RuleRegistry};
use dosel_type::{ExecutionError, ValidationResult, ValidationStatus};
use log::debug;

/// Returned for drug pairs the interaction table does not list
pub const NO_KNOWN_INTERACTION: &str = "no known interaction in demo database";

/// Classifies a prescribed daily dose against the drug's safety range.
pub fn validate_prescription(
    drug: &str,
    dose_mg: f64,
    registry: &RuleRegistry,
) -> Result<ValidationResult, ExecutionError> {
    let rule = registry.require(drug)?;
    let range = rule.safe_range;
    let (status, message) = if range.exceeds(dose_mg) {
        (
            ValidationStatus::Exceeds,
            format!(
                "dose {} mg/day exceeds safety limit {} mg/day",
                format_amount(dose_mg),
                format_amount(range.high)
            ),
        )
    } else if range.below_minimum(dose_mg) {
        (
            ValidationStatus::Low,
            format!(
                "dose {} mg/day below typical minimum {} mg/day",
                format_amount(dose_mg),
                format_amount(range.low)
            ),
        )
    } else {
        (ValidationStatus::Ok, "within safety range".to_string())
    };
    debug!("{drug} {dose_mg} mg/day: {status}");

    let alert = (status == ValidationStatus::Exceeds).then(|| message.clone());
    Ok(ValidationResult {
        drug: drug.to_string(),
        dose_mg_per_day: dose_mg,
        status,
        message,
        alert,
    })
}

/// The note for an unordered drug pair, or the closed-world default.
pub fn check_interaction(drug_a: &str, drug_b: &str, registry: &RuleRegistry) -> String {
    registry
        .interaction(drug_a, drug_b)
        .unwrap_or(NO_KNOWN_INTERACTION)
        .to_string()
}
