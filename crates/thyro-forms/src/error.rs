use thiserror::Error;

use thyro_core::error::CoreError;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("no field with id '{0}'")]
    UnknownField(String),

    #[error("'{field}' is marked unknown and cannot be edited")]
    FieldDisabled { field: String },

    #[error("'{code}' is not an option of '{field}'")]
    UnknownOption { field: String, code: String },

    #[error("{field} is required")]
    MissingRequired { field: String },

    #[error("please enter the date of birth first")]
    MissingDateOfBirth,

    #[error("no appointment #{0}")]
    UnknownAppointment(u32),

    #[error("markup rendering failed: {0}")]
    Render(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<tera::Error> for FormError {
    fn from(e: tera::Error) -> Self {
        FormError::Render(e.to_string())
    }
}
