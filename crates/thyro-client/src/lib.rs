//! thyro-client
//!
//! Blocking HTTP client for the patient, model and prediction API.

pub mod api;
pub mod decode;
pub mod error;
pub mod http;
pub mod normalize;

pub use api::PatientApi;
pub use error::ClientError;
pub use http::HttpClient;
