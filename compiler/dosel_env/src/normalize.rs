use dosel_ast::Params;
use dosel_type::{ClinicalContext, ExecutionError, KidneyFunction};
use log::{debug, trace};

use crate::quantity::{DoseUnit, Quantity};

/// Parameter names the normalizer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKey {
    Weight,
    Age,
    KidneyFunction,
    Condition,
    PatientId,
    Drug,
    Dose,
}

impl ParamKey {
    pub const ALL: [ParamKey; 7] = [
        ParamKey::Weight,
        ParamKey::Age,
        ParamKey::KidneyFunction,
        ParamKey::Condition,
        ParamKey::PatientId,
        ParamKey::Drug,
        ParamKey::Dose,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKey::Weight => "weight",
            ParamKey::Age => "age",
            ParamKey::KidneyFunction => "kidney_function",
            ParamKey::Condition => "condition",
            ParamKey::PatientId => "patient_id",
            ParamKey::Drug => "drug",
            ParamKey::Dose => "dose",
        }
    }

    /// Case-insensitive lookup of a parameter name
    pub fn from_name(name: &str) -> Option<Self> {
        ParamKey::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(name))
    }
}

/// Builds the typed clinical context for a command's parameters.
///
/// Unknown parameter names are ignored. Fails on a malformed number, a weight
/// in anything but kg, or a dose in anything but mg, mcg or g.
pub fn normalize(params: &Params) -> Result<ClinicalContext, ExecutionError> {
    let mut ctx = ClinicalContext::default();
    for (name, value) in params {
        let Some(key) = ParamKey::from_name(name) else {
            debug!("ignoring unknown parameter '{name}'");
            continue;
        };
        apply(&mut ctx, key, value)?;
    }
    trace!(
        "normalized context: weight={:?} age={:?} renal_impaired={} drug={:?} dose_mg={:?}",
        ctx.weight_kg,
        ctx.age,
        ctx.renal_impaired,
        ctx.drug,
        ctx.dose_mg_input
    );
    Ok(ctx)
}

fn apply(ctx: &mut ClinicalContext, key: ParamKey, value: &str) -> Result<(), ExecutionError> {
    match key {
        ParamKey::Weight => {
            let q = Quantity::parse(value)?;
            if !q.unit_is("kg") {
                return Err(unsupported_unit(key, q.unit, "kg"));
            }
            ctx.weight_kg = Some(q.value);
        }
        ParamKey::Age => {
            // unit ignored, fractional years truncated
            let q = Quantity::parse(value)?;
            ctx.set_age(q.value.trunc() as u32);
        }
        ParamKey::KidneyFunction => {
            ctx.set_kidney_function(KidneyFunction::from_value(value));
        }
        ParamKey::Condition => ctx.condition = Some(value.to_lowercase()),
        ParamKey::PatientId => ctx.patient_id = Some(value.to_string()),
        ParamKey::Drug => ctx.drug = Some(value.to_lowercase()),
        ParamKey::Dose => {
            let q = Quantity::parse(value)?;
            let unit = match q.unit.as_deref() {
                None => DoseUnit::Mg,
                Some(suffix) => DoseUnit::from_suffix(suffix)
                    .ok_or_else(|| unsupported_unit(key, q.unit.clone(), "mg, mcg or g"))?,
            };
            ctx.dose_mg_input = Some(unit.to_mg(q.value));
        }
    }
    Ok(())
}

fn unsupported_unit(key: ParamKey, unit: Option<String>, expected: &'static str) -> ExecutionError {
    ExecutionError::UnsupportedUnit {
        parameter: key.as_str(),
        unit: unit.unwrap_or_default(),
        expected,
    }
}
