#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use serde_json::json;
use thyro_client::{ClientError, PatientApi};
use thyro_core::models::patient::{Patient, PatientData};
use thyro_core::models::prediction::{ModelDescriptor, PredictionRequest, PredictionResponse};
use thyro_forms::FieldSet;
use thyro_forms::submission::Submission;
use thyro_web::session::Session;

/// In-memory stand-in for the patient API that records every call.
#[derive(Default)]
pub struct FakeApi {
    pub patients: Mutex<Vec<Patient>>,
    pub models: Vec<ModelDescriptor>,
    pub prediction: Mutex<Option<PredictionResponse>>,
    pub last_request: Mutex<Option<PredictionRequest>>,
    calls: Mutex<Vec<String>>,
    failing: AtomicBool,
    next_id: AtomicU32,
}

impl FakeApi {
    pub fn new(patients: Vec<Patient>) -> Self {
        Self {
            patients: Mutex::new(patients),
            models: models(),
            ..Self::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn called(&self, name: &str) -> bool {
        self.calls().iter().any(|c| c == name)
    }

    fn record(&self, name: &str) -> Result<(), ClientError> {
        self.calls.lock().unwrap().push(name.to_string());
        if self.failing.load(Ordering::SeqCst) {
            return Err(ClientError::Status {
                status: 503,
                body: "service unavailable".to_string(),
            });
        }
        Ok(())
    }
}

impl PatientApi for FakeApi {
    fn check_status(&self) -> Result<(), ClientError> {
        self.record("check_status")
    }

    fn list_models(&self) -> Result<Vec<ModelDescriptor>, ClientError> {
        self.record("list_models")?;
        Ok(self.models.clone())
    }

    fn list_patients(&self) -> Result<Vec<Patient>, ClientError> {
        self.record("list_patients")?;
        Ok(self.patients.lock().unwrap().clone())
    }

    fn create_patient(&self, data: &PatientData) -> Result<String, ClientError> {
        self.record("create_patient")?;
        let id = format!("new-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        self.patients.lock().unwrap().push(Patient {
            id: id.clone(),
            patient_data: data.clone(),
            created_at: None,
            updated_at: None,
        });
        Ok(id)
    }

    fn update_patient(&self, id: &str, data: &PatientData) -> Result<(), ClientError> {
        self.record("update_patient")?;
        if let Some(p) = self.patients.lock().unwrap().iter_mut().find(|p| p.id == id) {
            p.patient_data = data.clone();
        }
        Ok(())
    }

    fn delete_patient(&self, id: &str) -> Result<(), ClientError> {
        self.record("delete_patient")?;
        self.patients.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }

    fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse, ClientError> {
        self.record("predict")?;
        *self.last_request.lock().unwrap() = Some(request.clone());
        self.prediction
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ClientError::Prediction("no prediction configured".to_string()))
    }
}

pub fn patient(id: &str, name: &str) -> Patient {
    Patient::from_api_value(json!({
        "id": id,
        "patient_data": {
            "patient_name": name,
            "date_of_birth": "1990-06-15",
            "age_onset": "38",
            "sex": "0"
        },
        "updated_at": "2024-05-01T09:30:00"
    }))
    .unwrap()
}

pub fn models() -> Vec<ModelDescriptor> {
    serde_json::from_value(json!([
        {"name": "init_model", "info": {"type": "init", "display_name": "initial_visit", "description": "First visit only"}},
        {"name": "followup_model", "info": {"type": "follow-up", "display_name": "follow_up", "description": "After treatment"}}
    ]))
    .unwrap()
}

/// What the browser would submit for the page as currently rendered.
pub fn current_inputs(session: &Session) -> Submission {
    let mut submission = Submission::new();
    let intake = session.intake().fields().iter();
    let appointments = session.appointments().iter().flat_map(|s| s.fields.iter());
    for field in intake.chain(appointments) {
        if field.unknown {
            submission.insert(field.unknown_id(), "1");
        } else if let Some(value) = &field.value {
            submission.insert(field.id.clone(), value.as_str());
        }
    }
    submission
}
