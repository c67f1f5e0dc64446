//! The application controller.
//!
//! [`Session`] owns every piece of interactive state: the patient list, the
//! selected patient, the loaded models and the form view-model. Each user
//! action is one method; actions that talk to the patient API only change
//! local state after the call succeeded.

use std::sync::Arc;

use serde::Serialize;

use thyro_client::PatientApi;
use thyro_core::age::today;
use thyro_core::features::{display_name, field};
use thyro_core::models::patient::{Patient, PatientData};
use thyro_core::models::prediction::{ModelDescriptor, PredictionRequest, PredictionResponse};
use thyro_core::models::record::FlatRecord;
use thyro_forms::FieldSet;
use thyro_forms::appointment::{AppointmentList, CollectedAppointment};
use thyro_forms::error::FormError;
use thyro_forms::intake::IntakeForm;
use thyro_forms::submission::Submission;
use thyro_risk::{RiskAssessment, assemble_input, score};

use crate::action::FormAction;
use crate::error::SessionError;
use crate::notify::{Notice, NoticeLevel};

/// The last successful prediction together with what was sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionOutcome {
    pub model_name: String,
    pub input: FlatRecord,
    pub response: PredictionResponse,
}

/// JSON view of the session for `GET /api/session`.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub api_online: bool,
    pub current_patient_id: Option<String>,
    pub is_new_patient: bool,
    pub patient_count: usize,
    pub intake: FlatRecord,
    pub unknown: Vec<String>,
    pub appointments: Vec<CollectedAppointment>,
    pub selected_model: Option<String>,
    pub risk: Option<RiskAssessment>,
    pub prediction: Option<PredictionOutcome>,
}

pub struct Session {
    api: Arc<dyn PatientApi>,
    api_online: bool,
    patients: Vec<Patient>,
    current_patient_id: Option<String>,
    is_new_patient: bool,
    models: Vec<ModelDescriptor>,
    selected_model: Option<String>,
    intake: IntakeForm,
    appointments: AppointmentList,
    risk: Option<RiskAssessment>,
    prediction: Option<PredictionOutcome>,
    notices: Vec<Notice>,
}

impl Session {
    pub fn new(api: Arc<dyn PatientApi>) -> Self {
        Self {
            api,
            api_online: false,
            patients: Vec::new(),
            current_patient_id: None,
            is_new_patient: false,
            models: Vec::new(),
            selected_model: None,
            intake: IntakeForm::blank(),
            appointments: AppointmentList::new(),
            risk: None,
            prediction: None,
            notices: Vec::new(),
        }
    }

    /// Probe the API, load models and patients, and select the first patient.
    pub fn init(&mut self) {
        self.api_online = match self.api.check_status() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "patient API is not reachable");
                false
            }
        };

        match self.api.list_models() {
            Ok(models) => {
                tracing::info!(count = models.len(), "prediction models loaded");
                self.models = models;
            }
            Err(e) => self.notify(Notice::warning(format!("Could not load prediction models: {e}"))),
        }

        let loaded = self.reload_patients();
        self.settle(loaded);

        if let Some(first) = self.patients.first().map(|p| p.id.clone()) {
            let selected = self.select_patient(&first);
            self.settle(selected);
        }
        self.notify(Notice::info("Application ready"));
    }

    pub fn reload_patients(&mut self) -> Result<(), SessionError> {
        let patients = self.api.list_patients()?;
        tracing::info!(count = patients.len(), "patients loaded");
        self.patients = patients;
        Ok(())
    }

    pub fn select_patient(&mut self, id: &str) -> Result<(), SessionError> {
        let patient = self
            .patients
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| SessionError::PatientNotFound(id.to_string()))?;

        let intake = IntakeForm::from_patient(&patient.patient_data);
        let history = patient.patient_data.appointments.clone();
        let date_of_birth = match patient.patient_data.birth_date() {
            Ok(date) => date,
            Err(e) => {
                self.notify(Notice::warning(e.to_string()));
                None
            }
        };
        let mut appointments = AppointmentList::new();
        appointments.load(&history, date_of_birth, today());

        self.current_patient_id = Some(id.to_string());
        self.is_new_patient = false;
        self.intake = intake;
        self.appointments = appointments;
        self.risk = None;
        self.prediction = None;
        let still_offered = match self.selected_model.as_deref() {
            Some(model) => self.available_models().iter().any(|m| m.name == model),
            None => true,
        };
        if !still_offered {
            self.selected_model = None;
        }
        tracing::info!(patient_id = id, "patient selected");
        Ok(())
    }

    /// Create an empty record on the API and select it.
    pub fn new_patient(&mut self) -> Result<(), SessionError> {
        let data = PatientData::default();
        let id = self.api.create_patient(&data)?;

        let now = jiff::Timestamp::now().to_string();
        self.patients.insert(
            0,
            Patient {
                id: id.clone(),
                patient_data: data,
                created_at: Some(now.clone()),
                updated_at: Some(now),
            },
        );
        self.select_patient(&id)?;
        self.is_new_patient = true;
        self.notify(Notice::success(
            "New patient created. Please fill in the initial data.",
        ));
        Ok(())
    }

    /// Validate and store the intake form and every appointment.
    pub fn save_patient(&mut self) -> Result<(), SessionError> {
        let id = self.current_patient_id.clone().ok_or(SessionError::NoPatient)?;
        self.intake.validate_required()?;
        let data = self.intake.to_patient_data(self.appointments.to_entries())?;

        self.api.update_patient(&id, &data)?;

        let patient = self
            .patients
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| SessionError::PatientNotFound(id.clone()))?;
        patient.patient_data = data;
        patient.touch();
        self.is_new_patient = false;
        self.notify(Notice::success("Patient data saved."));
        Ok(())
    }

    pub fn delete_patient(&mut self, id: &str) -> Result<(), SessionError> {
        if !self.patients.iter().any(|p| p.id == id) {
            return Err(SessionError::PatientNotFound(id.to_string()));
        }
        self.api.delete_patient(id)?;

        self.patients.retain(|p| p.id != id);
        if self.current_patient_id.as_deref() == Some(id) {
            self.clear_current();
        }
        self.notify(Notice::success("Patient deleted."));
        Ok(())
    }

    fn clear_current(&mut self) {
        self.current_patient_id = None;
        self.is_new_patient = false;
        self.selected_model = None;
        self.intake = IntakeForm::blank();
        self.appointments.clear();
        self.risk = None;
        self.prediction = None;
    }

    /// Copy submitted inputs into the view-model. Rejected inputs become
    /// warnings; everything else is kept.
    pub fn apply_submission(&mut self, submission: &Submission) {
        let mut errors = self.intake.apply_submission(submission);
        errors.extend(self.appointments.apply_submission(submission));
        self.intake.update_ratio();
        for e in errors {
            self.notify(Notice::warning(e.to_string()));
        }
    }

    /// Apply a whole form submission, then run its action.
    pub fn submit(&mut self, submission: &Submission, action: FormAction) {
        self.apply_submission(submission);
        let result = match action {
            FormAction::Apply => Ok(()),
            FormAction::Save => self.save_patient(),
            FormAction::Calculate => {
                self.calculate_static_risk();
                Ok(())
            }
            FormAction::Predict => self.predict(),
            FormAction::AddAppointment => self.add_appointment(),
            FormAction::UseCurrentAge(n) => self.use_current_age(n),
            FormAction::ToggleCollapse(n) => self.toggle_collapse(n),
            FormAction::SelectModel => match submission.get("model_name") {
                Some(name) => self.select_model(name),
                None => Err(SessionError::NoModel),
            },
        };
        self.settle(result);
    }

    pub fn add_appointment(&mut self) -> Result<(), SessionError> {
        if self.current_patient_id.is_none() {
            return Err(SessionError::NoPatient);
        }
        let date_of_birth = self.intake.birth_date()?;
        let number = self.appointments.add(date_of_birth, today()).sequence_number;
        self.notify(Notice::info(format!("Appointment #{number} added.")));
        Ok(())
    }

    pub fn use_current_age(&mut self, sequence_number: u32) -> Result<(), SessionError> {
        let date_of_birth = self.intake.birth_date()?;
        self.appointments
            .get_mut(sequence_number)?
            .use_current_age(date_of_birth, today())?;
        Ok(())
    }

    pub fn toggle_collapse(&mut self, sequence_number: u32) -> Result<(), SessionError> {
        self.appointments.get_mut(sequence_number)?.toggle_collapsed();
        Ok(())
    }

    /// Models offered for the current patient; follow-up models need stored
    /// follow-up data.
    pub fn available_models(&self) -> Vec<&ModelDescriptor> {
        let Some(patient) = self.current_patient() else {
            return Vec::new();
        };
        self.models
            .iter()
            .filter(|m| m.is_available_for(&patient.patient_data))
            .collect()
    }

    pub fn select_model(&mut self, name: &str) -> Result<(), SessionError> {
        if !self.available_models().iter().any(|m| m.name == name) {
            return Err(SessionError::ModelUnavailable(name.to_string()));
        }
        self.selected_model = Some(name.to_string());
        tracing::info!(model = name, "prediction model selected");
        Ok(())
    }

    /// Intake values overlaid with the latest appointment.
    pub fn scorer_input(&self) -> FlatRecord {
        let latest = self.appointments.latest().map(|s| s.collect_values());
        assemble_input(&self.intake.collect_values(), latest.as_ref())
    }

    pub fn calculate_static_risk(&mut self) {
        let assessment = score(&self.scorer_input());
        tracing::info!(score = assessment.value, tier = ?assessment.tier, "static risk calculated");
        self.risk = Some(assessment);
    }

    /// Ask the selected model for a recurrence prediction.
    pub fn predict(&mut self) -> Result<(), SessionError> {
        let model_name = self.selected_model.clone().ok_or(SessionError::NoModel)?;
        let input = self.scorer_input();
        for key in [field::AGE_ONSET, field::SEX] {
            if !input.contains(key) {
                return Err(FormError::MissingRequired {
                    field: display_name(key).to_string(),
                }
                .into());
            }
        }

        let request = PredictionRequest::from_record(&input, model_name.as_str());
        let response = self.api.predict(&request)?;
        tracing::info!(
            model = %model_name,
            probability = ?response.probability,
            "prediction received"
        );
        self.prediction = Some(PredictionOutcome {
            model_name,
            input,
            response,
        });
        Ok(())
    }

    /// Turn an action result into a notice; failures are also logged.
    pub fn settle(&mut self, result: Result<(), SessionError>) {
        if let Err(e) = result {
            self.notify(Notice::error(e.to_string()));
        }
    }

    pub fn notify(&mut self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => tracing::error!(notice = %notice.message, "action failed"),
            NoticeLevel::Warning => tracing::warn!(notice = %notice.message, "action warning"),
            NoticeLevel::Info | NoticeLevel::Success => {
                tracing::debug!(notice = %notice.message, "notice")
            }
        }
        self.notices.push(notice);
    }

    /// Drain pending notices; each is shown once.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn api_online(&self) -> bool {
        self.api_online
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn current_patient_id(&self) -> Option<&str> {
        self.current_patient_id.as_deref()
    }

    pub fn current_patient(&self) -> Option<&Patient> {
        let id = self.current_patient_id.as_deref()?;
        self.patients.iter().find(|p| p.id == id)
    }

    pub fn is_new_patient(&self) -> bool {
        self.is_new_patient
    }

    pub fn models(&self) -> &[ModelDescriptor] {
        &self.models
    }

    pub fn selected_model(&self) -> Option<&str> {
        self.selected_model.as_deref()
    }

    pub fn intake(&self) -> &IntakeForm {
        &self.intake
    }

    pub fn intake_mut(&mut self) -> &mut IntakeForm {
        &mut self.intake
    }

    pub fn appointments(&self) -> &AppointmentList {
        &self.appointments
    }

    pub fn risk(&self) -> Option<&RiskAssessment> {
        self.risk.as_ref()
    }

    pub fn prediction(&self) -> Option<&PredictionOutcome> {
        self.prediction.as_ref()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            api_online: self.api_online,
            current_patient_id: self.current_patient_id.clone(),
            is_new_patient: self.is_new_patient,
            patient_count: self.patients.len(),
            intake: self.intake.collect_values(),
            unknown: self
                .intake
                .unknown_keys()
                .into_iter()
                .map(str::to_string)
                .collect(),
            appointments: self.appointments.collect_all(),
            selected_model: self.selected_model.clone(),
            risk: self.risk.clone(),
            prediction: self.prediction.clone(),
        }
    }
}
