use std::time::Duration;

use serde::Serialize;
use serde_json::json;
use ureq::Agent;
use ureq::http::Response;

use thyro_core::models::patient::{Patient, PatientData};
use thyro_core::models::prediction::{ModelDescriptor, PredictionRequest, PredictionResponse};

use crate::api::PatientApi;
use crate::decode;
use crate::error::ClientError;

/// [`PatientApi`] over HTTP with a shared `ureq` agent.
pub struct HttpClient {
    agent: Agent,
    base_url: String,
}

impl HttpClient {
    /// `timeout` bounds each whole request.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();
        Self {
            agent: config.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn get(&self, path: &str) -> Result<String, ClientError> {
        tracing::debug!(path, "GET");
        read_body(self.agent.get(&self.url(path)).call()?)
    }

    fn delete(&self, path: &str) -> Result<String, ClientError> {
        tracing::debug!(path, "DELETE");
        read_body(self.agent.delete(&self.url(path)).call()?)
    }

    fn post_json<T: Serialize>(&self, path: &str, body: &T) -> Result<String, ClientError> {
        tracing::debug!(path, "POST");
        let payload = serde_json::to_string(body)?;
        read_body(
            self.agent
                .post(&self.url(path))
                .header("Content-Type", "application/json")
                .send(payload)?,
        )
    }

    fn put_json<T: Serialize>(&self, path: &str, body: &T) -> Result<String, ClientError> {
        tracing::debug!(path, "PUT");
        let payload = serde_json::to_string(body)?;
        read_body(
            self.agent
                .put(&self.url(path))
                .header("Content-Type", "application/json")
                .send(payload)?,
        )
    }
}

/// Read the body; non-2xx statuses become [`ClientError::Status`].
fn read_body(mut response: Response<ureq::Body>) -> Result<String, ClientError> {
    let status = response.status();
    let body = response.body_mut().read_to_string()?;
    if !status.is_success() {
        tracing::warn!(status = status.as_u16(), "collaborator returned an error status");
        return Err(ClientError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

impl PatientApi for HttpClient {
    fn check_status(&self) -> Result<(), ClientError> {
        self.get("/api/models").map(|_| ())
    }

    fn list_models(&self) -> Result<Vec<ModelDescriptor>, ClientError> {
        decode::decode_models(&self.get("/api/models")?)
    }

    fn list_patients(&self) -> Result<Vec<Patient>, ClientError> {
        decode::decode_patients(&self.get("/api/patients")?)
    }

    fn create_patient(&self, data: &PatientData) -> Result<String, ClientError> {
        let id = decode::decode_created_id(&self.post_json("/api/patient", data)?)?;
        tracing::info!(patient_id = %id, "patient created");
        Ok(id)
    }

    fn update_patient(&self, id: &str, data: &PatientData) -> Result<(), ClientError> {
        let body = json!({ "id": id, "patient_data": data });
        self.put_json(&format!("/api/patient/{id}"), &body)?;
        tracing::info!(patient_id = %id, "patient updated");
        Ok(())
    }

    fn delete_patient(&self, id: &str) -> Result<(), ClientError> {
        self.delete(&format!("/api/patient/{id}"))?;
        tracing::info!(patient_id = %id, "patient deleted");
        Ok(())
    }

    fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse, ClientError> {
        tracing::info!(model = %request.model_name, "requesting prediction");
        decode::decode_prediction(&self.post_json("/api/predict_ml", request)?)
    }
}
