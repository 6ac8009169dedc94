// End-to-end runs of complete commands through the interpreter.

use dosel::{ErrorKind, InterpreterError, Response};
use dosel_type::{ExecutionError, ValidationStatus};
use pretty_assertions::assert_eq;
use tests::{init_test_logger, interpreter, run};

fn validate(source: &str) -> ValidationStatus {
    match run(source).unwrap() {
        Response::Validate { result } => result.status,
        other => panic!("expected a VALIDATE response, got {other:?}"),
    }
}

#[test]
fn metformin_for_elderly_renal_patient() {
    init_test_logger();
    let response = run(
        "CALCULATE DOSE FOR drug=metformin, condition=diabetes, weight=70kg, age=70, kidney_function=impaired",
    )
    .unwrap();
    let Response::Calculate { result } = response else {
        panic!("expected a CALCULATE response");
    };
    assert_eq!(result.drug, "metformin");
    assert_eq!(result.recommended_mg_per_day, 560.0);
    assert_eq!(result.doses_per_day, Some(1));
    assert_eq!(result.per_dose_mg, Some(560.0));
    assert_eq!(result.safety_range_mg_day, (500.0, 2000.0));
    assert_eq!(result.alert, None);
    assert_eq!(
        result.rationale,
        "20.0 mg/kg/day capped at 2000.0 mg/day; adjustments factor=0.40"
    );
}

#[test]
fn adjust_uses_the_same_evaluation() {
    let calc = run("CALCULATE DOSE FOR drug=losartan, condition=hypertension, age=80").unwrap();
    let adjust = run("ADJUST DOSE FOR drug=losartan, condition=hypertension, age=80").unwrap();
    assert_eq!(calc.dosage(), adjust.dosage());
    assert!(matches!(adjust, Response::Adjust { .. }));
    assert_eq!(adjust.dosage().unwrap().recommended_mg_per_day, 45.0);
}

#[test]
fn interaction_lookup_ignores_order() {
    let forward = run("CHECK INTERACTION BETWEEN losartan AND ibuprofen").unwrap();
    let backward = run("check interaction between IBUPROFEN and Losartan").unwrap();
    assert_eq!(
        forward,
        Response::Check {
            interaction: "caution: NSAIDs may blunt antihypertensive effect".into()
        }
    );
    assert_eq!(forward, backward);
}

#[test]
fn unknown_drug_is_reported_by_name() {
    let err = run("VALIDATE PRESCRIPTION drug=unknownium, dose=5mg").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownDrugError);
    assert_eq!(
        err,
        InterpreterError::from(ExecutionError::UnknownDrug("unknownium".into()))
    );
}

#[test]
fn amlodipine_validation_boundaries() {
    assert_eq!(
        validate("VALIDATE PRESCRIPTION drug=amlodipine, dose=10mg"),
        ValidationStatus::Ok
    );
    assert_eq!(
        validate("VALIDATE PRESCRIPTION drug=amlodipine, dose=10.01mg"),
        ValidationStatus::Exceeds
    );
    assert_eq!(
        validate("VALIDATE PRESCRIPTION drug=amlodipine, dose=2.4mg"),
        ValidationStatus::Low
    );
}

#[test]
fn zero_minimum_never_reports_low() {
    assert_eq!(
        validate("VALIDATE PRESCRIPTION drug=paracetamol, dose=1mg"),
        ValidationStatus::Ok
    );
}

#[test]
fn dose_units_normalize_to_milligrams() {
    for dose in ["500mg", "0.5g", "500000mcg", "500"] {
        let response = run(&format!("VALIDATE PRESCRIPTION drug=metformin, dose={dose}")).unwrap();
        let Response::Validate { result } = response else {
            panic!("expected a VALIDATE response");
        };
        assert_eq!(result.dose_mg_per_day, 500.0, "dose={dose}");
    }
}

#[test]
fn alert_rule_is_armed_without_side_effects() {
    let interp = interpreter();
    let response = interp.run("ALERT WHEN DOSE EXCEEDS SAFETY_LIMIT").unwrap();
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "type": "ALERT_RULE",
            "rule": "dose_exceeds_safety_limit",
            "status": "armed (demo)",
        })
    );
    assert_eq!(interp.store().patient_count(), 0);
}

#[test]
fn unknown_condition_falls_back_to_default() {
    let response = run("CALCULATE DOSE FOR drug=amlodipine, condition=migraine").unwrap();
    let result = response.dosage().unwrap();
    assert_eq!(result.condition, "migraine");
    assert_eq!(result.recommended_mg_per_day, 5.0);
}

#[test]
fn strict_mode_raises_on_alerts_only() {
    let interp = interpreter();
    let source = "CALCULATE DOSE FOR drug=metformin, condition=diabetes, weight=10kg";
    let lenient = interp.run(source).unwrap();
    assert!(lenient.dosage().unwrap().has_alert());

    let err = interp.run_and_raise_on_alert(source).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SafetyLimitExceeded);
    assert_eq!(
        err,
        InterpreterError::from(ExecutionError::SafetyLimitExceeded {
            message: "computed 200.0 mg/day below typical minimum 500.0 mg/day".into(),
            computed: 200.0,
            limit: 500.0,
        })
    );

    assert!(interp
        .run_and_raise_on_alert("CHECK INTERACTION BETWEEN losartan AND ibuprofen")
        .is_ok());
}

#[test]
fn error_kinds_reach_the_caller_intact() {
    let cases = [
        ("CALCULATE DOSE FOR drug=x; condition=y", ErrorKind::LexicalError, Some(25)),
        ("CALCULATE DOSE drug=x", ErrorKind::ParseError, Some(15)),
        ("CALCULATE DOSE FOR weight=70mg, drug=metformin", ErrorKind::ExecutionError, None),
        ("CALCULATE DOSE FOR drug=metformin", ErrorKind::ExecutionError, None),
    ];
    for (source, kind, position) in cases {
        let report = run(source).unwrap_err().report();
        assert_eq!(report.kind, kind, "{source}");
        assert_eq!(report.position, position, "{source}");
    }
}

#[test]
fn regimen_accumulates_per_patient() {
    let interp = interpreter();
    interp
        .run("CALCULATE DOSE FOR drug=metformin, condition=diabetes, weight=70kg, patient_id=p1")
        .unwrap();
    interp
        .run("CALCULATE DOSE FOR drug=montelukast, condition=asthma, patient_id=p1")
        .unwrap();
    interp
        .run("CALCULATE DOSE FOR drug=salbutamol, condition=asthma, weight=20kg, patient_id=p2")
        .unwrap();
    // ADJUST never records
    interp
        .run("ADJUST DOSE FOR drug=losartan, condition=hypertension, patient_id=p1")
        .unwrap();

    let Response::Report { entries, .. } = interp.run("REPORT REGIMEN patient_id=p1").unwrap()
    else {
        panic!("expected a REPORT response");
    };
    let drugs: Vec<_> = entries
        .iter()
        .map(|e| {
            let dosel_type::RegimenEntry::Dose(d) = e;
            d.drug.as_str()
        })
        .collect();
    assert_eq!(drugs, vec!["metformin", "montelukast"]);
}
