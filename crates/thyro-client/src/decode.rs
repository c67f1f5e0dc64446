//! Parsing of collaborator response bodies.

use serde_json::Value;

use thyro_core::models::patient::Patient;
use thyro_core::models::prediction::{ModelDescriptor, PredictionResponse};

use crate::error::ClientError;
use crate::normalize::normalize_nan;

/// `GET /api/patients`: a JSON array of patient records.
pub fn decode_patients(body: &str) -> Result<Vec<Patient>, ClientError> {
    let Value::Array(items) = serde_json::from_str::<Value>(&normalize_nan(body))? else {
        return Err(ClientError::Shape("an array of patients"));
    };
    items
        .into_iter()
        .map(|item| Patient::from_api_value(item).map_err(ClientError::from))
        .collect()
}

/// `GET /api/models`: a JSON array of model descriptors.
pub fn decode_models(body: &str) -> Result<Vec<ModelDescriptor>, ClientError> {
    Ok(serde_json::from_str(&normalize_nan(body))?)
}

/// `POST /api/patient`: the id assigned to the new record.
pub fn decode_created_id(body: &str) -> Result<String, ClientError> {
    let value: Value = serde_json::from_str(body)?;
    match value.get("patient_id") {
        Some(Value::String(id)) if !id.is_empty() => Ok(id.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(ClientError::MissingPatientId),
    }
}

/// `POST /api/predict_ml`. A body whose status is not `success` is an error
/// carrying the service's message.
pub fn decode_prediction(body: &str) -> Result<PredictionResponse, ClientError> {
    let response: PredictionResponse = serde_json::from_str(&normalize_nan(body))?;
    if !response.is_success() {
        return Err(ClientError::Prediction(
            response
                .message
                .unwrap_or_else(|| "unknown error".to_string()),
        ));
    }
    Ok(response)
}
