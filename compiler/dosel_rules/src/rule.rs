use std::fmt;

use dosel_type::ClinicalContext;
use serde::Serialize;

use crate::calculator::{format_amount, Calculator};

/// Typical daily dose window in mg/day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SafeRange {
    pub low: f64,
    pub high: f64,
}

impl SafeRange {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn as_tuple(&self) -> (f64, f64) {
        (self.low, self.high)
    }

    pub fn exceeds(&self, mg_per_day: f64) -> bool {
        mg_per_day > self.high
    }

    /// Below the minimum; never true when the minimum is zero
    pub fn below_minimum(&self, mg_per_day: f64) -> bool {
        self.low > 0.0 && mg_per_day < self.low
    }
}

impl fmt::Display for SafeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{} mg/day",
            format_amount(self.low),
            format_amount(self.high)
        )
    }
}

/// Dosing policy for one drug.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrugRule {
    pub calculator: Calculator,
    pub safe_range: SafeRange,
    pub max_single_dose_mg: Option<f64>,
    pub renal_adjust_factor: f64,
    pub elderly_adjust_factor: f64,
}

impl DrugRule {
    /// A rule with no per-dose cap and neutral adjustment factors
    pub fn new(calculator: Calculator, safe_range: SafeRange) -> Self {
        Self {
            calculator,
            safe_range,
            max_single_dose_mg: None,
            renal_adjust_factor: 1.0,
            elderly_adjust_factor: 1.0,
        }
    }

    pub fn with_max_single_dose(mut self, mg: f64) -> Self {
        self.max_single_dose_mg = Some(mg);
        self
    }

    pub fn with_renal_factor(mut self, factor: f64) -> Self {
        self.renal_adjust_factor = factor;
        self
    }

    pub fn with_elderly_factor(mut self, factor: f64) -> Self {
        self.elderly_adjust_factor = factor;
        self
    }

    /// Product of the factors that apply to this patient; 1.0 when none do
    pub fn adjustment_factor(&self, ctx: &ClinicalContext) -> f64 {
        let mut factor = 1.0;
        if ctx.renal_impaired {
            factor *= self.renal_adjust_factor;
        }
        if ctx.elderly {
            factor *= self.elderly_adjust_factor;
        }
        factor
    }
}
