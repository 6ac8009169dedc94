use dosel_ast::Command;
use dosel_env::normalize;
use dosel_eval::{check_interaction, compute_dose, enforce_alerts, validate_prescription};
use dosel_lexer::scan;
use dosel_parser::parse_command;
use dosel_rules::{RuleRegistry, BUILTIN_RULES};
use dosel_type::{ExecutionError, RegimenEntry};
use log::{debug, info};

use crate::error::InterpreterError;
use crate::response::Response;
use crate::store::RegimenStore;

/// Routes a parsed command to the normalizer and evaluator and shapes the
/// response.
///
/// CALCULATE with a `patient_id` also records the result in `store`; no other
/// command writes anything.
pub fn execute(
    command: &Command,
    registry: &RuleRegistry,
    store: &dyn RegimenStore,
) -> Result<Response, ExecutionError> {
    info!("executing {} command", command.kind());
    match command {
        Command::CalculateDose { params } => {
            let ctx = normalize(params)?;
            let result = compute_dose(&ctx, registry)?;
            if let Some(patient_id) = &ctx.patient_id {
                debug!("recording regimen entry for patient {patient_id}");
                store.append(patient_id, RegimenEntry::from(result.clone()))?;
            }
            Ok(Response::Calculate { result })
        }
        Command::CheckInteraction { drug_a, drug_b } => Ok(Response::Check {
            interaction: check_interaction(drug_a, drug_b, registry),
        }),
        Command::AdjustDose { params } => {
            let ctx = normalize(params)?;
            if ctx.drug.is_none() || ctx.condition.is_none() {
                return Err(ExecutionError::RequiredParameters(
                    "ADJUST requires at least 'drug' and 'condition' plus modifiers like age or kidney_function",
                ));
            }
            let result = compute_dose(&ctx, registry)?;
            Ok(Response::Adjust { result })
        }
        Command::ValidatePrescription { params } => {
            let ctx = normalize(params)?;
            let (Some(drug), Some(dose_mg)) = (ctx.drug.as_deref(), ctx.dose_mg_input) else {
                return Err(ExecutionError::RequiredParameters(
                    "VALIDATE requires 'drug' and 'dose'",
                ));
            };
            let result = validate_prescription(drug, dose_mg, registry)?;
            Ok(Response::Validate { result })
        }
        Command::ReportRegimen { params } => {
            let ctx = normalize(params)?;
            let Some(patient_id) = ctx.patient_id.filter(|id| !id.is_empty()) else {
                return Err(ExecutionError::RequiredParameters(
                    "REPORT requires patient_id=<id>",
                ));
            };
            let entries = store.entries(&patient_id)?;
            Ok(Response::Report {
                patient_id,
                entries,
            })
        }
        Command::AlertThreshold => Ok(Response::alert_rule()),
    }
}

/// Scans, parses and executes command text against a registry and a store.
pub struct Interpreter<'r, S> {
    registry: &'r RuleRegistry,
    store: S,
}

impl<S: RegimenStore> Interpreter<'static, S> {
    /// An interpreter over the built-in drug rules
    pub fn new(store: S) -> Self {
        Self::with_registry(&BUILTIN_RULES, store)
    }
}

impl<'r, S: RegimenStore> Interpreter<'r, S> {
    pub fn with_registry(registry: &'r RuleRegistry, store: S) -> Self {
        Self { registry, store }
    }

    pub fn registry(&self) -> &'r RuleRegistry {
        self.registry
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runs one command. Safety alerts are reported in the result, not raised.
    pub fn run(&self, source: &str) -> Result<Response, InterpreterError> {
        let tokens = scan(source)?;
        let command = parse_command(&tokens)?;
        Ok(execute(&command, self.registry, &self.store)?)
    }

    /// Like [`run`](Self::run), but a CALCULATE or ADJUST result carrying an
    /// alert fails with `SafetyLimitExceeded`.
    ///
    /// Only dose results are checked: a VALIDATE verdict of `EXCEEDS` is
    /// still returned as a response, alert included.
    pub fn run_and_raise_on_alert(&self, source: &str) -> Result<Response, InterpreterError> {
        let response = self.run(source)?;
        if let Some(result) = response.dosage() {
            enforce_alerts(result)?;
        }
        Ok(response)
    }

    /// Picks [`run`](Self::run) or the strict variant
    pub fn run_with(&self, source: &str, strict: bool) -> Result<Response, InterpreterError> {
        if strict {
            self.run_and_raise_on_alert(source)
        } else {
            self.run(source)
        }
    }
}
