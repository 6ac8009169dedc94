// Properties that hold across whole commands.

use dosel::Response;
use dosel_ast::{Command, Params};
use dosel_env::normalize;
use dosel_eval::round2;
use dosel_rules::BUILTIN_RULES;
use proptest::prelude::*;
use tests::{parse, run};

fn per_kg_drug() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "metformin",
        "amoxicillin",
        "azithromycin",
        "paracetamol",
        "ibuprofen",
        "salbutamol",
    ])
}

fn kidney_function() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["normal", "impaired", "reduced", "ckd", "unknown"])
}

proptest! {
    #[test]
    fn recommended_dose_is_base_times_factors(
        drug in per_kg_drug(),
        weight in 1u32..150,
        age in 18u32..100,
        kidney in kidney_function(),
    ) {
        let source = format!(
            "CALCULATE DOSE FOR drug={drug}, condition=any, weight={weight}kg, age={age}, kidney_function={kidney}"
        );
        let response = run(&source).unwrap();
        let result = response.dosage().unwrap();

        let rule = BUILTIN_RULES.get(drug).unwrap();
        let mut ctx = dosel_type::ClinicalContext {
            weight_kg: Some(f64::from(weight)),
            ..Default::default()
        };
        ctx.set_age(age);
        ctx.set_kidney_function(dosel_type::KidneyFunction::from_value(kidney));
        let (base, _) = rule.calculator.calculate(&ctx);
        let expected = base * rule.adjustment_factor(&ctx);
        prop_assert_eq!(result.recommended_mg_per_day, round2(expected));

        // the split covers the daily dose unless the single-dose cap binds
        if let (Some(per_dose), Some(doses), Some(max)) =
            (result.per_dose_mg, result.doses_per_day, rule.max_single_dose_mg)
        {
            prop_assert!(doses >= 1);
            prop_assert!(per_dose <= max + 1e-9);
            if per_dose < max {
                let total = per_dose * f64::from(doses);
                prop_assert!((total - result.recommended_mg_per_day).abs() <= 0.01 * f64::from(doses));
            }
        }
    }

    #[test]
    fn reparsed_command_normalizes_identically(
        drug in "[a-z][a-z]{2,10}",
        condition in "[a-z][a-z_]{2,10}",
        weight in 1u32..200,
        age in 0u32..110,
    ) {
        prop_assume!(dosel_lexer::Keyword::lookup(&drug).is_none());
        prop_assume!(dosel_lexer::Keyword::lookup(&condition).is_none());
        prop_assume!(dosel_lexer::Unit::from_lexeme(&drug).is_none());
        prop_assume!(dosel_lexer::Unit::from_lexeme(&condition).is_none());
        prop_assume!(drug != "and" && condition != "and");

        let params = Params::from([
            ("drug".to_string(), drug),
            ("condition".to_string(), condition),
            ("weight".to_string(), format!("{weight}kg")),
            ("age".to_string(), age.to_string()),
        ]);
        let command = Command::CalculateDose { params: params.clone() };
        let reparsed = parse(&command.to_string()).unwrap();
        prop_assert_eq!(&reparsed, &command);

        let first = normalize(&params).unwrap();
        let again = normalize(reparsed.params().unwrap()).unwrap();
        prop_assert_eq!(first, again);
    }

    #[test]
    fn interaction_text_is_symmetric(
        a in prop::sample::select(BUILTIN_RULES.drug_names()),
        b in prop::sample::select(BUILTIN_RULES.drug_names()),
    ) {
        let forward = run(&format!("CHECK INTERACTION BETWEEN {a} AND {b}")).unwrap();
        let backward = run(&format!("CHECK INTERACTION BETWEEN {b} AND {a}")).unwrap();
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn validation_matches_safe_range(
        drug in prop::sample::select(BUILTIN_RULES.drug_names()),
        centi_mg in 0u32..500_000,
    ) {
        let dose = f64::from(centi_mg) / 100.0;
        let response = run(&format!("VALIDATE PRESCRIPTION drug={drug}, dose={dose}mg")).unwrap();
        let Response::Validate { result } = response else {
            panic!("expected a VALIDATE response");
        };
        let range = BUILTIN_RULES.get(drug).unwrap().safe_range;
        let expected = if dose > range.high {
            dosel_type::ValidationStatus::Exceeds
        } else if range.low > 0.0 && dose < range.low {
            dosel_type::ValidationStatus::Low
        } else {
            dosel_type::ValidationStatus::Ok
        };
        prop_assert_eq!(result.status, expected);
        prop_assert_eq!(result.alert.is_some(), expected == dosel_type::ValidationStatus::Exceeds);
    }
}
