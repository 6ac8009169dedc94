use std::collections::BTreeMap;

use dosel_type::ClinicalContext;
use serde::Serialize;

/// How a drug's base daily dose is derived from the clinical context.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum Calculator {
    /// `mg_per_kg * weight_kg`, never above `cap`
    PerKgCapped { mg_per_kg: f64, cap: f64 },
    /// Base dose looked up by condition, `default` for anything else
    ConditionBased {
        default: f64,
        by_condition: BTreeMap<String, f64>,
        cap: Option<f64>,
    },
    /// Same dose whatever the context
    Fixed { amount: f64 },
}

impl Calculator {
    pub fn condition_based(default: f64, by_condition: &[(&str, f64)], cap: Option<f64>) -> Self {
        Calculator::ConditionBased {
            default,
            by_condition: by_condition
                .iter()
                .map(|(c, mg)| (c.to_string(), *mg))
                .collect(),
            cap,
        }
    }

    /// Base mg/day and a one-line rationale.
    ///
    /// Never fails: a per-kg rule without a weight yields zero with an
    /// advisory rationale.
    pub fn calculate(&self, ctx: &ClinicalContext) -> (f64, String) {
        match self {
            Calculator::PerKgCapped { mg_per_kg, cap } => match ctx.weight_kg {
                None => (
                    0.0,
                    "No weight provided; cannot compute per-kg dose.".to_string(),
                ),
                Some(weight) => (
                    (mg_per_kg * weight).min(*cap),
                    format!(
                        "{} mg/kg/day capped at {} mg/day",
                        format_amount(*mg_per_kg),
                        format_amount(*cap)
                    ),
                ),
            },
            Calculator::ConditionBased {
                default,
                by_condition,
                cap,
            } => {
                let condition = ctx.condition.as_deref();
                let base = condition
                    .and_then(|c| by_condition.get(c))
                    .copied()
                    .unwrap_or(*default);
                match cap {
                    Some(cap) if base > *cap => (
                        *cap,
                        format!(
                            "Condition-based {} mg/day capped at {}",
                            format_amount(base),
                            format_amount(*cap)
                        ),
                    ),
                    _ => (
                        base,
                        format!(
                            "Condition-based {} mg/day for {}",
                            format_amount(base),
                            condition.unwrap_or("unspecified condition")
                        ),
                    ),
                }
            }
            Calculator::Fixed { amount } => {
                (*amount, format!("Fixed {} mg/day", format_amount(*amount)))
            }
        }
    }
}

/// Formats an amount the way the rationale texts show it: whole numbers keep
/// one decimal (`20.0`), everything else uses the shortest exact form (`0.3`).
pub fn format_amount(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ctx_with_weight(weight: f64) -> ClinicalContext {
        ClinicalContext {
            weight_kg: Some(weight),
            ..Default::default()
        }
    }

    #[test]
    fn test_per_kg_capped() {
        let calc = Calculator::PerKgCapped {
            mg_per_kg: 20.0,
            cap: 2000.0,
        };
        assert_eq!(
            calc.calculate(&ctx_with_weight(70.0)),
            (1400.0, "20.0 mg/kg/day capped at 2000.0 mg/day".to_string())
        );
        assert_eq!(calc.calculate(&ctx_with_weight(150.0)).0, 2000.0);
    }

    #[test]
    fn test_per_kg_without_weight_is_zero() {
        let calc = Calculator::PerKgCapped {
            mg_per_kg: 0.3,
            cap: 12.0,
        };
        let (mg, rationale) = calc.calculate(&ClinicalContext::default());
        assert_eq!(mg, 0.0);
        assert_eq!(rationale, "No weight provided; cannot compute per-kg dose.");
    }

    #[test]
    fn test_condition_based() {
        let calc = Calculator::condition_based(5.0, &[("hypertension", 5.0)], Some(10.0));
        let ctx = ClinicalContext {
            condition: Some("hypertension".into()),
            ..Default::default()
        };
        assert_eq!(
            calc.calculate(&ctx),
            (5.0, "Condition-based 5.0 mg/day for hypertension".to_string())
        );

        // unknown condition falls back to the default
        let ctx = ClinicalContext {
            condition: Some("angina".into()),
            ..Default::default()
        };
        assert_eq!(calc.calculate(&ctx).0, 5.0);
    }

    #[test]
    fn test_condition_based_cap() {
        let calc = Calculator::condition_based(12.0, &[], Some(10.0));
        assert_eq!(
            calc.calculate(&ClinicalContext::default()),
            (10.0, "Condition-based 12.0 mg/day capped at 10.0".to_string())
        );
    }

    #[test]
    fn test_fixed() {
        let calc = Calculator::Fixed { amount: 10.0 };
        assert_eq!(
            calc.calculate(&ctx_with_weight(3.0)),
            (10.0, "Fixed 10.0 mg/day".to_string())
        );
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(20.0), "20.0");
        assert_eq!(format_amount(0.3), "0.3");
        assert_eq!(format_amount(2.5), "2.5");
    }
}
