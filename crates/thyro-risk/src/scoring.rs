use serde::Serialize;
use ts_rs::TS;

use thyro_core::features::field;
use thyro_core::models::record::FlatRecord;

use crate::tier::RiskTier;

/// A test against one field of the record.
///
/// Numeric conditions never hold for a missing or unparseable value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition {
    /// `value > threshold`
    Above(&'static str, f64),
    /// `low < value <= high`
    Within(&'static str, f64, f64),
    /// `value <= threshold`
    AtMost(&'static str, f64),
    /// `value < threshold`
    Below(&'static str, f64),
    /// `value < low || value > high`
    Outside(&'static str, f64, f64),
    /// Categorical code match.
    Is(&'static str, &'static str),
}

impl Condition {
    pub fn key(&self) -> &'static str {
        match *self {
            Condition::Above(key, _)
            | Condition::Within(key, _, _)
            | Condition::AtMost(key, _)
            | Condition::Below(key, _)
            | Condition::Outside(key, _, _)
            | Condition::Is(key, _) => key,
        }
    }

    pub fn holds(&self, record: &FlatRecord) -> bool {
        if let Condition::Is(key, code) = *self {
            return record.is(key, code);
        }
        let Some(x) = record.number(self.key()) else {
            return false;
        };
        match *self {
            Condition::Above(_, t) => x > t,
            Condition::Within(_, low, high) => x > low && x <= high,
            Condition::AtMost(_, t) => x <= t,
            Condition::Below(_, t) => x < t,
            Condition::Outside(_, low, high) => x < low || x > high,
            Condition::Is(..) => false,
        }
    }
}

/// One weighted term of the score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskFactor {
    pub label: &'static str,
    pub condition: Condition,
    pub points: u8,
}

const fn factor(label: &'static str, condition: Condition, points: u8) -> RiskFactor {
    RiskFactor {
        label,
        condition,
        points,
    }
}

/// Every weighted condition, evaluated in order and summed.
pub static RISK_FACTORS: [RiskFactor; 15] = [
    factor("Age at onset over 50", Condition::Above(field::AGE_ONSET, 50.0), 25),
    factor("Age at onset 41 to 50", Condition::Within(field::AGE_ONSET, 40.0, 50.0), 15),
    factor("Age at onset 40 or under", Condition::AtMost(field::AGE_ONSET, 40.0), 5),
    factor("Hereditary predisposition", Condition::Is(field::HEREDITY, "1"), 20),
    factor("Current smoker", Condition::Is(field::SMOKING_STATUS, "2"), 25),
    factor("Former smoker", Condition::Is(field::SMOKING_STATUS, "3"), 15),
    factor("Male sex", Condition::Is(field::SEX, "1"), 10),
    factor("Thyroid volume over 30 cm³", Condition::Above(field::US1_THYROID_VOLUME, 30.0), 15),
    factor("Nodules at first ultrasound", Condition::Is(field::US1_NODULES, "1"), 10),
    factor("Initial TSH below 0.1", Condition::Below(field::TSH_1, 0.1), 10),
    factor("FT4 over 30", Condition::Above(field::FT4_1, 30.0), 10),
    factor("Exophthalmos", Condition::Is(field::EXOPHTHALMOS, "1"), 15),
    factor("Thyrotoxic cardiomyopathy", Condition::Is(field::THYROTOXIC_CARDIOMYOPATHY, "1"), 20),
    factor("Post-treatment TSH out of range", Condition::Outside(field::TSH_3, 0.5, 4.5), 15),
    factor("Nodules after treatment", Condition::Is(field::US3_NODULES, "1"), 10),
];

pub const MAX_SCORE: u8 = 100;

/// Result of [`score`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct RiskAssessment {
    /// Clamped to `0..=100`.
    pub value: u8,
    pub tier: RiskTier,
    pub label: String,
    pub description: String,
    pub recommendation: String,
    /// Summary of notable factors; `["None identified"]` when there are none.
    pub key_factors: Vec<String>,
}

/// Factors whose condition holds for `record`, in table order.
pub fn matched_factors(record: &FlatRecord) -> impl Iterator<Item = &'static RiskFactor> + '_ {
    RISK_FACTORS.iter().filter(|f| f.condition.holds(record))
}

/// Score a collected record.
pub fn score(record: &FlatRecord) -> RiskAssessment {
    let total: u32 = matched_factors(record).map(|f| u32::from(f.points)).sum();
    let value = u8::try_from(total.min(u32::from(MAX_SCORE))).unwrap_or(MAX_SCORE);
    let tier = RiskTier::from_score(value);
    RiskAssessment {
        value,
        tier,
        label: tier.label().to_string(),
        description: tier.description().to_string(),
        recommendation: tier.recommendation().to_string(),
        key_factors: key_factors(record),
    }
}

/// Human-readable summary of the most telling findings.
pub fn key_factors(record: &FlatRecord) -> Vec<String> {
    let mut factors = Vec::new();
    if record.is(field::HEREDITY, "1") {
        factors.push("Family history");
    }
    if record.is(field::SMOKING_STATUS, "2") || record.is(field::SMOKING_STATUS, "3") {
        factors.push("Smoking history");
    }
    if Condition::Below(field::TSH_1, 0.1).holds(record) {
        factors.push("Very low initial TSH");
    }
    if record.is(field::EXOPHTHALMOS, "1") {
        factors.push("Exophthalmos");
    }
    if record.is(field::THYROTOXIC_CARDIOMYOPATHY, "1") {
        factors.push("Cardiomyopathy");
    }
    if factors.is_empty() {
        factors.push("None identified");
    }
    factors.into_iter().map(str::to_string).collect()
}

/// Build the scorer input: intake values overlaid with the latest
/// appointment's age and smoking status when those were entered.
pub fn assemble_input(intake: &FlatRecord, latest_appointment: Option<&FlatRecord>) -> FlatRecord {
    let mut input = intake.clone();
    if let Some(latest) = latest_appointment {
        for key in [field::AGE_ONSET, field::SMOKING_STATUS] {
            if let Some(v) = latest.value(key) {
                input.set(key, Some(v.clone()));
            }
        }
    }
    input
}
