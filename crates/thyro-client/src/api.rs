use thyro_core::models::patient::{Patient, PatientData};
use thyro_core::models::prediction::{ModelDescriptor, PredictionRequest, PredictionResponse};

use crate::error::ClientError;

/// The external patient/model/prediction service.
///
/// Calls block; async callers run them on a blocking thread.
pub trait PatientApi: Send + Sync {
    /// Whether the service answers at all.
    fn check_status(&self) -> Result<(), ClientError>;

    fn list_models(&self) -> Result<Vec<ModelDescriptor>, ClientError>;

    fn list_patients(&self) -> Result<Vec<Patient>, ClientError>;

    /// Create a record and return the id assigned by the service.
    fn create_patient(&self, data: &PatientData) -> Result<String, ClientError>;

    fn update_patient(&self, id: &str, data: &PatientData) -> Result<(), ClientError>;

    fn delete_patient(&self, id: &str) -> Result<(), ClientError>;

    fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse, ClientError>;
}
