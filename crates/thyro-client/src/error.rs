use thiserror::Error;

use thyro_core::error::CoreError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] ureq::Error),

    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unexpected response shape: expected {0}")]
    Shape(&'static str),

    #[error("response did not include a patient id")]
    MissingPatientId,

    #[error("prediction failed: {0}")]
    Prediction(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}
