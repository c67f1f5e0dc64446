use axum::extract::State;
use axum::response::Html;

use crate::error::ApiError;
use crate::pages;
use crate::state::AppState;

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let html = state.run(|session| pages::render_page(session)).await??;
    Ok(Html(html))
}

pub async fn health() -> &'static str {
    "ok"
}
