use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use ts_rs::TS;

use crate::features;

use super::patient::PatientData;
use super::record::FlatRecord;

/// Which visit data a prediction model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ModelKind {
    /// Needs only first-visit features.
    #[serde(rename = "init")]
    Initial,
    /// Needs first-visit and post-treatment features.
    #[serde(rename = "follow-up")]
    FollowUp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ModelInfo {
    #[serde(rename = "type")]
    pub kind: ModelKind,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
}

/// One entry of `GET /api/models`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ModelDescriptor {
    pub name: String,
    pub info: ModelInfo,
}

impl ModelDescriptor {
    /// Follow-up models are only offered once the patient has post-treatment data.
    pub fn is_available_for(&self, patient: &PatientData) -> bool {
        match self.info.kind {
            ModelKind::Initial => true,
            ModelKind::FollowUp => patient.has_follow_up_data(),
        }
    }

    /// Heading shown on the model picker.
    pub fn title(&self) -> String {
        let base = if self.info.display_name.is_empty() {
            &self.name
        } else {
            &self.info.display_name
        };
        base.replace('_', " ").to_uppercase()
    }
}

/// Body of `POST /api/predict_ml`: the 18 features plus the model name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    #[serde(flatten)]
    pub features: BTreeMap<String, Value>,
    pub model_name: String,
}

impl PredictionRequest {
    /// Numeric text is sent as a JSON number, other text as a string and
    /// missing features as `null`.
    pub fn from_record(record: &FlatRecord, model_name: impl Into<String>) -> Self {
        let features = features::ALL
            .iter()
            .map(|&key| {
                let value = match record.value(key) {
                    None => Value::Null,
                    Some(v) => v
                        .as_f64()
                        .and_then(Number::from_f64)
                        .map(Value::Number)
                        .unwrap_or_else(|| Value::String(v.to_string())),
                };
                (key.to_string(), value)
            })
            .collect();
        Self {
            features,
            model_name: model_name.into(),
        }
    }
}

/// Per-feature explanation returned alongside a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FeatureContribution {
    #[serde(default)]
    pub scaled_importance: Option<f64>,
    #[serde(default)]
    pub shap_effect: Option<f64>,
}

/// Response of `POST /api/predict_ml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PredictionResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub prediction: Option<f64>,
    #[serde(default)]
    pub probability: Option<f64>,
    #[serde(default, alias = "error")]
    pub message: Option<String>,
    #[serde(default)]
    pub feature_contributions: Option<BTreeMap<String, FeatureContribution>>,
}

impl PredictionResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// The positive class is recurrence.
    pub fn is_recurrence(&self) -> bool {
        self.prediction.is_some_and(|p| (p - 1.0).abs() < f64::EPSILON)
    }

    pub fn probability_percent(&self) -> Option<f64> {
        self.probability.map(|p| p * 100.0)
    }

    pub fn contribution(&self, feature: &str) -> Option<&FeatureContribution> {
        self.feature_contributions.as_ref()?.get(feature)
    }

    /// The `n` features with the largest scaled importance, largest first.
    pub fn top_contributions(&self, n: usize) -> Vec<(&str, f64)> {
        let Some(contributions) = &self.feature_contributions else {
            return Vec::new();
        };
        let mut ranked: Vec<(&str, f64)> = contributions
            .iter()
            .filter_map(|(k, c)| c.scaled_importance.map(|i| (k.as_str(), i)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}
