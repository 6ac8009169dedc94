use dosel_ast::Params;
use dosel_env::normalize;
use proptest::prelude::*;

fn single(key: &str, value: String) -> Params {
    Params::from([(key.to_string(), value)])
}

proptest! {
    #[test]
    fn elderly_iff_age_at_least_65(age in 0u32..130) {
        let ctx = normalize(&single("age", age.to_string())).unwrap();
        prop_assert_eq!(ctx.age, Some(age));
        prop_assert_eq!(ctx.elderly, age >= 65);
    }

    #[test]
    fn dose_units_agree(mg in 0u32..1_000_000) {
        let as_mg = normalize(&single("dose", format!("{mg}mg"))).unwrap().dose_mg_input.unwrap();
        let as_mcg = normalize(&single("dose", format!("{}mcg", u64::from(mg) * 1000))).unwrap().dose_mg_input.unwrap();
        prop_assert!((as_mg - as_mcg).abs() < 1e-6 * as_mg.max(1.0));
    }

    #[test]
    fn normalize_is_total_over_words(value in "[a-z][a-z0-9_-]{0,10}") {
        // free-text parameters never fail
        let mut params = single("drug", value.clone());
        params.insert("condition".into(), value.clone());
        params.insert("kidney_function".into(), value.clone());
        params.insert("patient_id".into(), value);
        prop_assert!(normalize(&params).is_ok());
    }
}
