use std::sync::LazyLock;

use tera::{Context, Tera};

use crate::error::ApiError;
use crate::session::Session;
use crate::views;

/// # Panics
///
/// Panics on first use if the built-in page template fails to parse.
static PAGES: LazyLock<Tera> = LazyLock::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_template("page.html", include_str!("../templates/page.html"))
        .unwrap_or_else(|e| panic!("built-in page template failed to parse: {e}"));
    tera
});

/// Render the full page and drain the pending notices.
pub fn render_page(session: &mut Session) -> Result<String, ApiError> {
    let mut context = Context::new();
    context.insert("api_online", &session.api_online());
    context.insert("patients", &views::patient_items(session));
    context.insert("notices", &session.take_notices());

    if let Some(patient) = session.current_patient() {
        context.insert("patient_id", &patient.id);
        context.insert("patient_name", &patient.display_name());
        context.insert(
            "patient_status",
            views::patient_status(patient, session.is_new_patient()),
        );
        context.insert("sections", &session.intake().render_sections()?);
        context.insert("appointments_html", &session.appointments().render()?);
        context.insert("models", &views::model_options(session));
        context.insert("selected_model", &session.selected_model());
        if let Some(risk) = session.risk() {
            context.insert("risk", &views::risk_view(risk));
        }
        if let Some(outcome) = session.prediction() {
            context.insert("prediction", &views::prediction_view(session, outcome));
        }
    }

    Ok(PAGES.render("page.html", &context)?)
}
