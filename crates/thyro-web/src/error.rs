use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use thyro_client::ClientError;
use thyro_forms::error::FormError;

use crate::action::UnknownAction;

/// Failure of a session action. Reported to the user as a notice.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("select or create a patient first")]
    NoPatient,

    #[error("patient {0} is not in the list")]
    PatientNotFound(String),

    #[error("select a prediction model first")]
    NoModel,

    #[error("model '{0}' is not available for this patient")]
    ModelUnavailable(String),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Why a request could not be answered with the page.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    UnknownAction(#[from] UnknownAction),

    #[error("patient {0} is not in the list")]
    PatientNotFound(String),

    #[error("page rendering failed: {0}")]
    Render(String),

    #[error("session worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::UnknownAction(_) => StatusCode::BAD_REQUEST,
            ApiError::PatientNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Render(_) | ApiError::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "internal server error".to_string()
        } else {
            self.to_string()
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<FormError> for ApiError {
    fn from(e: FormError) -> Self {
        ApiError::Render(e.to_string())
    }
}

impl From<tera::Error> for ApiError {
    fn from(e: tera::Error) -> Self {
        ApiError::Render(e.to_string())
    }
}
