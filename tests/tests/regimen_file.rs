// Regimens recorded through the JSON file store survive a new interpreter.

use dosel::{Interpreter, JsonFileStore, RegimenStore, Response};
use dosel_type::RegimenEntry;
use pretty_assertions::assert_eq;

#[test]
fn regimen_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("regimens.json");

    {
        let interp = Interpreter::new(JsonFileStore::new(&path));
        interp
            .run("CALCULATE DOSE FOR drug=metformin, condition=diabetes, weight=70kg, patient_id=p-001")
            .unwrap();
        interp
            .run("CALCULATE DOSE FOR drug=ibuprofen, condition=pain, weight=50kg, patient_id=p-001")
            .unwrap();
    }

    let interp = Interpreter::new(JsonFileStore::new(&path));
    let Response::Report { patient_id, entries } =
        interp.run("REPORT REGIMEN patient_id=p-001").unwrap()
    else {
        panic!("expected a REPORT response");
    };
    assert_eq!(patient_id, "p-001");
    assert_eq!(entries.len(), 2);
    let RegimenEntry::Dose(first) = &entries[0];
    assert_eq!(first.drug, "metformin");
    assert_eq!(first.recommended_mg_per_day, 1400.0);
    assert_eq!(first.doses_per_day, Some(1));
    assert_eq!(first.per_dose_mg, Some(1000.0));

    assert!(interp.store().entries("someone-else").unwrap().is_empty());
}

#[test]
fn stored_document_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    let interp = Interpreter::new(JsonFileStore::new(&path));
    interp
        .run("CALCULATE DOSE FOR drug=montelukast, condition=asthma, patient_id=kid")
        .unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
    let entry = &doc["patients"]["kid"][0];
    assert_eq!(entry["type"], "dose");
    assert_eq!(entry["drug"], "montelukast");
    assert_eq!(entry["recommended_mg_per_day"], 10.0);
    assert_eq!(entry["safety_range_mg_day"], serde_json::json!([5.0, 10.0]));
}
