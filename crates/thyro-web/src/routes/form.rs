use axum::Form;
use axum::extract::State;
use axum::response::Redirect;

use thyro_forms::submission::Submission;

use crate::action::FormAction;
use crate::error::ApiError;
use crate::state::AppState;

/// One submission of every form input plus the `action` that triggered it.
pub async fn submit(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect, ApiError> {
    let submission: Submission = pairs.into_iter().collect();
    let action: FormAction = submission.get("action").unwrap_or("").parse()?;

    tracing::debug!(?action, fields = submission.len(), "form submitted");
    state
        .run(move |session| session.submit(&submission, action))
        .await?;
    Ok(Redirect::to("/"))
}
