//! Template-facing projections of the session.

use serde::Serialize;

use thyro_core::features::{self, display_name};
use thyro_core::models::patient::Patient;
use thyro_forms::FieldSet;
use thyro_forms::intake::IntakeForm;
use thyro_risk::RiskAssessment;

use crate::session::{PredictionOutcome, Session};

/// Number of features listed in the importance summary.
pub const TOP_FEATURES: usize = 3;

#[derive(Debug, Serialize)]
pub struct PatientItem {
    pub id: String,
    pub name: String,
    pub status: &'static str,
    pub updated_at: String,
    pub is_current: bool,
}

pub fn patient_status(patient: &Patient, is_new: bool) -> &'static str {
    if is_new {
        "Initial visit (new)"
    } else if patient.patient_data.has_follow_up_data() {
        "Follow-up"
    } else {
        "Initial visit"
    }
}

pub fn patient_items(session: &Session) -> Vec<PatientItem> {
    let current = session.current_patient_id();
    session
        .patients()
        .iter()
        .map(|p| {
            let is_current = current == Some(p.id.as_str());
            PatientItem {
                id: p.id.clone(),
                name: p.display_name(),
                status: patient_status(p, is_current && session.is_new_patient()),
                updated_at: p
                    .updated_at
                    .as_deref()
                    .and_then(|t| t.get(..10))
                    .unwrap_or("")
                    .to_string(),
                is_current,
            }
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct ModelOption {
    pub name: String,
    pub title: String,
    pub description: String,
    pub selected: bool,
}

pub fn model_options(session: &Session) -> Vec<ModelOption> {
    session
        .available_models()
        .into_iter()
        .map(|m| ModelOption {
            name: m.name.clone(),
            title: m.title(),
            description: m.info.description.clone(),
            selected: session.selected_model() == Some(m.name.as_str()),
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct RiskView<'a> {
    #[serde(flatten)]
    pub assessment: &'a RiskAssessment,
    pub class: &'static str,
}

pub fn risk_view(assessment: &RiskAssessment) -> RiskView<'_> {
    RiskView {
        assessment,
        class: assessment.tier.css_class(),
    }
}

#[derive(Debug, Serialize)]
pub struct FeatureRow {
    pub name: String,
    pub value: String,
    pub provided: bool,
    /// Scaled importance as a percentage, two decimals.
    pub importance: Option<String>,
    pub importance_class: &'static str,
    pub shap: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TopFeature {
    pub name: String,
    pub importance: String,
}

#[derive(Debug, Serialize)]
pub struct PredictionView {
    pub model_title: String,
    /// Probability of recurrence in percent, one decimal.
    pub probability: String,
    pub recurrence: bool,
    pub verdict: &'static str,
    pub rows: Vec<FeatureRow>,
    pub top: Vec<TopFeature>,
}

/// Colour band of a scaled importance: above 0.05 high, above 0.01 medium.
pub fn importance_class(scaled: f64) -> &'static str {
    if scaled > 0.05 {
        "high"
    } else if scaled > 0.01 {
        "medium"
    } else {
        "low"
    }
}

/// Show a choice code by its option label, anything else verbatim.
fn display_value(intake: &IntakeForm, key: &str, raw: &str) -> String {
    intake
        .field_by_key(key)
        .and_then(|f| f.kind.options())
        .and_then(|options| options.iter().find(|o| o.code == raw))
        .map(|o| o.label.clone())
        .unwrap_or_else(|| raw.to_string())
}

pub fn prediction_view(session: &Session, outcome: &PredictionOutcome) -> PredictionView {
    let response = &outcome.response;
    let rows = features::ALL
        .iter()
        .map(|&key| {
            let value = outcome.input.get(key);
            let contribution = response.contribution(key);
            let scaled = contribution.and_then(|c| c.scaled_importance);
            FeatureRow {
                name: display_name(key).to_string(),
                value: value
                    .map(|v| display_value(session.intake(), key, v))
                    .unwrap_or_else(|| "Unknown".to_string()),
                provided: value.is_some(),
                importance: scaled.map(|s| format!("{:.2}%", s * 100.0)),
                importance_class: scaled.map_or("none", importance_class),
                shap: contribution
                    .and_then(|c| c.shap_effect)
                    .map(|s| format!("{s:.4}")),
            }
        })
        .collect();

    let top = response
        .top_contributions(TOP_FEATURES)
        .into_iter()
        .map(|(key, scaled)| TopFeature {
            name: display_name(key).to_string(),
            importance: format!("{:.2}%", scaled * 100.0),
        })
        .collect();

    let model_title = session
        .models()
        .iter()
        .find(|m| m.name == outcome.model_name)
        .map(|m| m.title())
        .unwrap_or_else(|| outcome.model_name.clone());

    let recurrence = response.is_recurrence();
    PredictionView {
        model_title,
        probability: response
            .probability_percent()
            .map(|p| format!("{p:.1}"))
            .unwrap_or_else(|| "n/a".to_string()),
        recurrence,
        verdict: if recurrence {
            "High risk of recurrence"
        } else {
            "Low risk of recurrence"
        },
        rows,
        top,
    }
}
