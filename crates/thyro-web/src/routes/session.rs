use axum::Json;
use axum::extract::State;

use crate::error::ApiError;
use crate::session::SessionSnapshot;
use crate::state::AppState;

pub async fn snapshot(State(state): State<AppState>) -> Result<Json<SessionSnapshot>, ApiError> {
    let session = state.session.lock().await;
    Ok(Json(session.snapshot()))
}
