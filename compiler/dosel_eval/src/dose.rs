use dosel_rules::{format_amount, DrugRule, RuleRegistry, SafeRange};
use dosel_type::{ClinicalContext, DosageResult, ExecutionError};
use log::{debug, warn};

/// Rounds to two decimals, the precision of every reported mg amount
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Computes the adjusted daily dose for the drug and condition in `ctx`.
///
/// Renal and elderly factors multiply. Crossing the safety range sets the
/// result's alert; it is never an error here (see [`enforce_alerts`]).
pub fn compute_dose(
    ctx: &ClinicalContext,
    registry: &RuleRegistry,
) -> Result<DosageResult, ExecutionError> {
    let drug = ctx
        .drug
        .as_deref()
        .filter(|d| !d.is_empty())
        .ok_or(ExecutionError::MissingParameter("drug"))?;
    let condition = ctx
        .condition
        .as_deref()
        .ok_or(ExecutionError::MissingParameter("condition"))?;
    let rule = registry.require(drug)?;

    let (base, mut rationale) = rule.calculator.calculate(ctx);
    let factor = rule.adjustment_factor(ctx);
    let adjusted = base * factor;
    debug!("{drug}: base {base} mg/day x {factor} = {adjusted} mg/day");

    let alert = safety_alert(adjusted, &rule.safe_range);
    if let Some(alert) = &alert {
        warn!("{drug}: {alert}");
    }
    let (per_dose_mg, doses_per_day) = match split_doses(adjusted, rule) {
        Some((per_dose, doses)) => (Some(round2(per_dose)), Some(doses)),
        None => (None, None),
    };
    if factor != 1.0 {
        rationale.push_str(&format!("; adjustments factor={factor:.2}"));
    }

    Ok(DosageResult {
        drug: drug.to_string(),
        condition: condition.to_string(),
        recommended_mg_per_day: round2(adjusted),
        per_dose_mg,
        doses_per_day,
        rationale,
        safety_range_mg_day: rule.safe_range.as_tuple(),
        alert,
    })
}

fn safety_alert(adjusted: f64, range: &SafeRange) -> Option<String> {
    let computed = format_amount(round2(adjusted));
    let mut clauses = Vec::new();
    if range.exceeds(adjusted) {
        clauses.push(format!(
            "computed {computed} mg/day exceeds safety limit {} mg/day",
            format_amount(range.high)
        ));
    }
    if range.below_minimum(adjusted) {
        clauses.push(format!(
            "computed {computed} mg/day below typical minimum {} mg/day",
            format_amount(range.low)
        ));
    }
    if clauses.is_empty() {
        None
    } else {
        Some(clauses.join("; "))
    }
}

/// `(per_dose_mg, doses_per_day)` for rules with a single-dose cap.
///
/// Doses per day is `adjusted / max` rounded half-to-even, at least one.
fn split_doses(adjusted: f64, rule: &DrugRule) -> Option<(f64, u32)> {
    let max = rule.max_single_dose_mg.filter(|m| *m > 0.0)?;
    let doses = (adjusted / max).round_ties_even().max(1.0);
    let per_dose = max.min(adjusted / doses);
    Some((per_dose, doses as u32))
}

/// Turns an alert on a dose result into a `SafetyLimitExceeded` error
/// carrying the bound that was crossed.
pub fn enforce_alerts(result: &DosageResult) -> Result<(), ExecutionError> {
    match &result.alert {
        Some(message) => Err(ExecutionError::SafetyLimitExceeded {
            message: message.clone(),
            computed: result.recommended_mg_per_day,
            limit: breached_limit(result),
        }),
        None => Ok(()),
    }
}

/// The minimum when only the minimum was undershot, otherwise the maximum.
fn breached_limit(result: &DosageResult) -> f64 {
    let (low, high) = result.safety_range_mg_day;
    let computed = result.recommended_mg_per_day;
    if computed <= high && low > 0.0 && computed < low {
        low
    } else {
        high
    }
}
