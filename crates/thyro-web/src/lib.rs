//! thyro-web library root.
//!
//! Server-rendered front end for the thyroid recurrence-risk form. The page is
//! a projection of one [`session::Session`]; every button posts the whole form
//! and redirects back to it.

pub mod action;
pub mod config;
pub mod error;
pub mod middleware;
pub mod notify;
pub mod pages;
pub mod routes;
pub mod session;
pub mod state;
pub mod views;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;

use state::AppState;

/// Upper bound on a form submission body.
pub const FORM_BODY_LIMIT: usize = 256 * 1024;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::page::index))
        .route("/health", get(routes::page::health))
        .route("/patients", post(routes::patients::create))
        .route("/patients/{id}/select", post(routes::patients::select))
        .route("/patients/{id}/delete", post(routes::patients::delete))
        .route("/form", post(routes::form::submit))
        .route("/api/session", get(routes::session::snapshot))
        .layer(
            ServiceBuilder::new()
                .layer(axum_mw::from_fn(middleware::access_log::access_log))
                .layer(RequestBodyLimitLayer::new(FORM_BODY_LIMIT)),
        )
        .with_state(state)
}
