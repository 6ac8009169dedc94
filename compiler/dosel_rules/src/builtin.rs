// Demo dosing tables. Amounts are mg/day unless noted.

use crate::calculator::Calculator;
use crate::interactions::InteractionTable;
use crate::registry::RuleRegistry;
use crate::rule::{DrugRule, SafeRange};

fn per_kg(mg_per_kg: f64, cap: f64) -> Calculator {
    Calculator::PerKgCapped { mg_per_kg, cap }
}

pub(crate) fn drug_rules() -> Vec<(&'static str, DrugRule)> {
    vec![
        (
            "amlodipine",
            DrugRule::new(
                Calculator::condition_based(5.0, &[("hypertension", 5.0)], Some(10.0)),
                SafeRange::new(2.5, 10.0),
            )
            .with_max_single_dose(10.0)
            .with_elderly_factor(0.8),
        ),
        (
            "losartan",
            DrugRule::new(
                Calculator::condition_based(50.0, &[("hypertension", 50.0)], Some(100.0)),
                SafeRange::new(25.0, 100.0),
            )
            .with_max_single_dose(100.0)
            .with_renal_factor(0.8)
            .with_elderly_factor(0.9),
        ),
        (
            "metformin",
            DrugRule::new(per_kg(20.0, 2000.0), SafeRange::new(500.0, 2000.0))
                .with_max_single_dose(1000.0)
                .with_renal_factor(0.5)
                .with_elderly_factor(0.8),
        ),
        (
            "glimepiride",
            DrugRule::new(
                Calculator::condition_based(2.0, &[("diabetes", 2.0)], Some(8.0)),
                SafeRange::new(1.0, 8.0),
            )
            .with_max_single_dose(4.0),
        ),
        (
            "amoxicillin",
            DrugRule::new(per_kg(30.0, 1500.0), SafeRange::new(500.0, 1500.0))
                .with_max_single_dose(1000.0)
                .with_renal_factor(0.5),
        ),
        (
            "azithromycin",
            DrugRule::new(per_kg(10.0, 500.0), SafeRange::new(250.0, 500.0))
                .with_max_single_dose(500.0),
        ),
        (
            "paracetamol",
            DrugRule::new(per_kg(60.0, 4000.0), SafeRange::new(0.0, 4000.0))
                .with_max_single_dose(1000.0),
        ),
        (
            "ibuprofen",
            DrugRule::new(per_kg(20.0, 1200.0), SafeRange::new(0.0, 1200.0))
                .with_max_single_dose(400.0),
        ),
        (
            "salbutamol",
            DrugRule::new(per_kg(0.3, 12.0), SafeRange::new(2.0, 12.0)).with_max_single_dose(4.0),
        ),
        (
            "montelukast",
            DrugRule::new(Calculator::Fixed { amount: 10.0 }, SafeRange::new(5.0, 10.0))
                .with_max_single_dose(10.0),
        ),
    ]
}

pub(crate) fn interactions() -> InteractionTable {
    let mut table = InteractionTable::new();
    table.insert(
        "losartan",
        "ibuprofen",
        "caution: NSAIDs may blunt antihypertensive effect",
    );
    table.insert(
        "azithromycin",
        "amlodipine",
        "caution: potential hypotension risk",
    );
    table.insert(
        "amlodipine",
        "losartan",
        "no significant interaction reported (commonly co-prescribed)",
    );
    table
}

/// Conditions offered for each drug when building commands interactively
pub(crate) fn suggested_conditions() -> Vec<(&'static str, &'static [&'static str])> {
    vec![
        ("amlodipine", &["hypertension"]),
        ("losartan", &["hypertension"]),
        ("metformin", &["diabetes"]),
        ("glimepiride", &["diabetes"]),
        ("amoxicillin", &["infection"]),
        ("azithromycin", &["infection"]),
        ("paracetamol", &["pain"]),
        ("ibuprofen", &["pain", "inflammation"]),
        ("salbutamol", &["asthma"]),
        ("montelukast", &["asthma"]),
    ]
}

pub(crate) fn registry() -> RuleRegistry {
    let mut registry = RuleRegistry::new();
    for (name, rule) in drug_rules() {
        registry.insert_drug(name, rule);
    }
    for (name, conditions) in suggested_conditions() {
        registry.set_suggested_conditions(name, conditions);
    }
    registry.set_interactions(interactions());
    registry
}
