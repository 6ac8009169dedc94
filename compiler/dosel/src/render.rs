//! Plain-text presentation of responses and errors for the shell.

use std::fmt::Write;

use dosel_parser::Diagnostic;
use dosel_rules::{format_amount, RuleRegistry};
use dosel_type::{DosageResult, ExecutionError, RegimenEntry, ValidationResult};
use serde::Serialize;

use crate::error::InterpreterError;
use crate::response::Response;

pub fn render_response(response: &Response) -> String {
    match response {
        Response::Calculate { result } => render_dosage("CALCULATE", result),
        Response::Adjust { result } => render_dosage("ADJUST", result),
        Response::Check { interaction } => format!("interaction: {interaction}"),
        Response::Validate { result } => render_validation(result),
        Response::Report {
            patient_id,
            entries,
        } => render_report(patient_id, entries),
        Response::AlertRule { rule, status } => format!("alert rule '{rule}': {status}"),
    }
}

fn render_dosage(label: &str, result: &DosageResult) -> String {
    let mut out = format!(
        "{label} {} for {}\n  recommended: {} mg/day",
        result.drug,
        result.condition,
        format_amount(result.recommended_mg_per_day)
    );
    if let (Some(per_dose), Some(doses)) = (result.per_dose_mg, result.doses_per_day) {
        let _ = write!(out, "\n  per dose:    {} mg x {doses}", format_amount(per_dose));
    }
    let (low, high) = result.safety_range_mg_day;
    let _ = write!(
        out,
        "\n  safe range:  {}-{} mg/day\n  rationale:   {}",
        format_amount(low),
        format_amount(high),
        result.rationale
    );
    if let Some(alert) = &result.alert {
        let _ = write!(out, "\n  ALERT: {alert}");
    }
    out
}

fn render_validation(result: &ValidationResult) -> String {
    let mut out = format!(
        "{} {} at {} mg/day: {}",
        result.status,
        result.drug,
        format_amount(result.dose_mg_per_day),
        result.message
    );
    if let Some(alert) = &result.alert {
        let _ = write!(out, "\n  ALERT: {alert}");
    }
    out
}

fn render_report(patient_id: &str, entries: &[RegimenEntry]) -> String {
    if entries.is_empty() {
        return format!("no regimen entries for patient {patient_id}");
    }
    let mut out = format!("regimen for patient {patient_id} ({} entries)", entries.len());
    for (i, entry) in entries.iter().enumerate() {
        let RegimenEntry::Dose(result) = entry;
        let _ = write!(
            out,
            "\n  {}. {} for {}: {} mg/day",
            i + 1,
            result.drug,
            result.condition,
            format_amount(result.recommended_mg_per_day)
        );
        if result.has_alert() {
            out.push_str(" [alert]");
        }
    }
    out
}

/// Renders an error with guidance for its kind: a caret snippet for scan and
/// parse errors, the supported drugs for an unknown drug.
pub fn render_error(err: &InterpreterError, source: &str, registry: &RuleRegistry) -> String {
    match err {
        InterpreterError::Lexical(e) => Diagnostic::from(e).render(source),
        InterpreterError::Parse(e) => Diagnostic::from(e).render(source),
        InterpreterError::Execution(ExecutionError::UnknownDrug(_)) => format!(
            "error: {err}\nhelp: supported drugs: {}",
            registry.drug_names().join(", ")
        ),
        InterpreterError::Execution(_) => format!("error: {err}"),
    }
}

/// One row of the `drugs` listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrugSummary<'a> {
    pub name: &'a str,
    pub safety_range_mg_day: (f64, f64),
    pub max_single_dose_mg: Option<f64>,
    pub suggested_conditions: &'a [String],
}

pub fn drug_summaries(registry: &RuleRegistry) -> Vec<DrugSummary<'_>> {
    registry
        .rules()
        .map(|(name, rule)| DrugSummary {
            name,
            safety_range_mg_day: rule.safe_range.as_tuple(),
            max_single_dose_mg: rule.max_single_dose_mg,
            suggested_conditions: registry.suggested_conditions(name),
        })
        .collect()
}

pub fn render_drug_table(registry: &RuleRegistry) -> String {
    let summaries = drug_summaries(registry);
    let width = summaries.iter().map(|s| s.name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for summary in &summaries {
        let (low, high) = summary.safety_range_mg_day;
        let range = format!("{}-{} mg/day", format_amount(low), format_amount(high));
        let conditions = if summary.suggested_conditions.is_empty() {
            "-".to_string()
        } else {
            summary.suggested_conditions.join(", ")
        };
        if !out.is_empty() {
            out.push('\n');
        }
        let _ = write!(out, "{:<width$}  {range:<22}  {conditions}", summary.name);
    }
    out
}
