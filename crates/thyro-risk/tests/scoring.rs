use thyro_core::features::field;
use thyro_core::models::record::FlatRecord;
use thyro_risk::scoring::{RISK_FACTORS, key_factors};
use thyro_risk::{RiskTier, assemble_input, score};

fn record(pairs: &[(&str, &str)]) -> FlatRecord {
    let mut r = FlatRecord::new();
    for (k, v) in pairs {
        r.set_raw(*k, v);
    }
    r
}

#[test]
fn empty_record_scores_zero() {
    let a = score(&FlatRecord::new());
    assert_eq!(a.value, 0);
    assert_eq!(a.tier, RiskTier::Low);
    assert_eq!(a.label, "Low Risk");
    assert_eq!(a.key_factors, vec!["None identified"]);
}

#[test]
fn every_factor_at_once_is_clamped() {
    let a = score(&record(&[
        ("age_onset", "62"),
        ("heredity", "1"),
        ("smoking_status", "2"),
        ("sex", "1"),
        ("us1_thyroid_volume", "45"),
        ("us1_nodules", "1"),
        ("tsh_1", "0.01"),
        ("ft4_1", "41"),
        ("exophthalmos", "1"),
        ("thyrotoxic_cardiomyopathy", "1"),
        ("tsh_3", "6.0"),
        ("us3_nodules", "1"),
    ]));
    assert_eq!(a.value, 100);
    assert_eq!(a.tier, RiskTier::High);
    assert_eq!(
        a.recommendation,
        "Consider additional treatment options and monitor every 3 months"
    );
}

#[test]
fn tier_boundaries() {
    assert_eq!(RiskTier::from_score(29), RiskTier::Low);
    assert_eq!(RiskTier::from_score(30), RiskTier::Medium);
    assert_eq!(RiskTier::from_score(59), RiskTier::Medium);
    assert_eq!(RiskTier::from_score(60), RiskTier::High);
}

#[test]
fn age_bands_alone() {
    for (age, expected) in [("40", 5), ("40.5", 15), ("45", 15), ("50", 15), ("51", 25)] {
        assert_eq!(score(&record(&[("age_onset", age)])).value, expected, "age {age}");
    }
}

#[test]
fn unparseable_numbers_never_contribute() {
    let a = score(&record(&[
        ("age_onset", "unknown"),
        ("tsh_1", "n/a"),
        ("tsh_3", "NaN"),
        ("us1_thyroid_volume", "big"),
    ]));
    assert_eq!(a.value, 0);
}

#[test]
fn post_treatment_tsh_range() {
    assert_eq!(score(&record(&[("tsh_3", "0.49")])).value, 15);
    assert_eq!(score(&record(&[("tsh_3", "0.5")])).value, 0);
    assert_eq!(score(&record(&[("tsh_3", "4.5")])).value, 0);
    assert_eq!(score(&record(&[("tsh_3", "4.51")])).value, 15);
}

#[test]
fn medium_tier_example() {
    // 15 (age 45) + 15 (former smoker) + 10 (male) = 40
    let a = score(&record(&[("age_onset", "45"), ("smoking_status", "3"), ("sex", "1")]));
    assert_eq!(a.value, 40);
    assert_eq!(a.tier, RiskTier::Medium);
    assert_eq!(a.recommendation, "Continue monitoring every 6 months");
    assert_eq!(a.key_factors, vec!["Smoking history"]);
}

#[test]
fn key_factor_summary() {
    let factors = key_factors(&record(&[
        ("heredity", "1"),
        ("tsh_1", "0.05"),
        ("exophthalmos", "1"),
        ("thyrotoxic_cardiomyopathy", "1"),
    ]));
    assert_eq!(
        factors,
        vec!["Family history", "Very low initial TSH", "Exophthalmos", "Cardiomyopathy"]
    );
}

#[test]
fn latest_appointment_overrides_age_and_smoking() {
    let intake = record(&[("age_onset", "38"), ("smoking_status", "0"), ("sex", "1")]);
    let latest = record(&[("age_onset", "52"), ("tsh_1", "0.01")]);

    let input = assemble_input(&intake, Some(&latest));
    assert_eq!(input.get(field::AGE_ONSET), Some("52"));
    assert_eq!(input.get(field::SMOKING_STATUS), Some("0"));
    assert!(!input.contains(field::TSH_1));

    assert_eq!(assemble_input(&intake, None), intake);
}

#[test]
fn weights_sum_to_table() {
    let total: u32 = RISK_FACTORS.iter().map(|f| u32::from(f.points)).sum();
    assert_eq!(total, 220);
}
