use serde_json::json;
use thyro_core::features;
use thyro_core::models::patient::PatientData;
use thyro_core::models::prediction::{
    ModelDescriptor, ModelKind, PredictionRequest, PredictionResponse,
};
use thyro_core::models::record::FlatRecord;
use thyro_core::models::value::ClinicalValue;

fn record(pairs: &[(&str, &str)]) -> FlatRecord {
    pairs
        .iter()
        .map(|(k, v)| (*k, ClinicalValue::from(*v)))
        .collect()
}

#[test]
fn request_carries_all_features_in_model_order() {
    let request = PredictionRequest::from_record(
        &record(&[("age_onset", "42"), ("sex", "1"), ("tsh_1", "0.05")]),
        "random_forest_model",
    );
    let body = serde_json::to_value(&request).unwrap();

    assert_eq!(body["model_name"], json!("random_forest_model"));
    assert_eq!(body["age_onset"], json!(42.0));
    assert_eq!(body["tsh_1"], json!(0.05));
    assert_eq!(body["us3_nodules_cm"], json!(null));
    assert_eq!(request.features.len(), features::ALL.len());
}

#[test]
fn non_numeric_text_is_sent_verbatim() {
    let request = PredictionRequest::from_record(&record(&[("heredity", "n/a")]), "m");
    assert_eq!(request.features["heredity"], json!("n/a"));
}

#[test]
fn follow_up_models_need_follow_up_data() {
    let model: ModelDescriptor = serde_json::from_value(json!({
        "name": "xgboost_follow",
        "info": { "type": "follow-up", "display_name": "xgboost_follow_up", "description": "d" }
    }))
    .unwrap();
    assert_eq!(model.info.kind, ModelKind::FollowUp);
    assert_eq!(model.title(), "XGBOOST FOLLOW UP");

    let mut patient = PatientData::default();
    assert!(!model.is_available_for(&patient));
    patient.treatment_type = ClinicalValue::parse("1");
    assert!(model.is_available_for(&patient));
}

#[test]
fn response_ranks_contributions() {
    let response: PredictionResponse = serde_json::from_value(json!({
        "status": "success",
        "prediction": 1,
        "probability": 0.868606,
        "feature_contributions": {
            "age_onset": { "scaled_importance": 0.02, "shap_effect": 0.1 },
            "tsh_1": { "scaled_importance": 0.31, "shap_effect": -0.2 },
            "sex": { "scaled_importance": null, "shap_effect": null },
            "ft4_1": { "scaled_importance": 0.07, "shap_effect": 0.05 },
            "heredity": { "scaled_importance": 0.001, "shap_effect": 0.0 }
        }
    }))
    .unwrap();

    assert!(response.is_success());
    assert!(response.is_recurrence());
    let top = response.top_contributions(3);
    let names: Vec<&str> = top.iter().map(|(k, _)| *k).collect();
    assert_eq!(names, vec!["tsh_1", "ft4_1", "age_onset"]);
}

#[test]
fn error_payload_is_read_as_message() {
    let response: PredictionResponse =
        serde_json::from_value(json!({ "error": "Model not loaded" })).unwrap();
    assert!(!response.is_success());
    assert_eq!(response.message.as_deref(), Some("Model not loaded"));
    assert!(response.top_contributions(3).is_empty());
}
