use axum::extract::{Path, State};
use axum::response::Redirect;

use crate::error::{ApiError, SessionError};
use crate::session::Session;
use crate::state::AppState;

pub async fn create(State(state): State<AppState>) -> Result<Redirect, ApiError> {
    state
        .run(|session| {
            let result = session.new_patient();
            session.settle(result);
        })
        .await?;
    Ok(Redirect::to("/"))
}

/// An id missing from the list is a 404; other failures become notices.
fn settle_for_id(
    session: &mut Session,
    result: Result<(), SessionError>,
) -> Result<(), ApiError> {
    match result {
        Err(SessionError::PatientNotFound(id)) => Err(ApiError::PatientNotFound(id)),
        result => {
            session.settle(result);
            Ok(())
        }
    }
}

pub async fn select(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, ApiError> {
    state
        .run(move |session| {
            let result = session.select_patient(&id);
            settle_for_id(session, result)
        })
        .await??;
    Ok(Redirect::to("/"))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, ApiError> {
    state
        .run(move |session| {
            let result = session.delete_patient(&id);
            settle_for_id(session, result)
        })
        .await??;
    Ok(Redirect::to("/"))
}
