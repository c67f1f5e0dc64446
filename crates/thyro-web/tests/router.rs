mod common;

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use thyro_web::session::Session;
use thyro_web::state::AppState;

use common::{FakeApi, patient};

fn app() -> Router {
    let api = Arc::new(FakeApi::new(vec![patient("p1", "Maria Ivanova")]));
    let mut session = Session::new(api);
    session.init();
    thyro_web::router(AppState::new(session))
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn health_check() {
    let response = app().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn page_renders_selected_patient_and_notices_once() {
    let app = app();

    let response = app.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Maria Ivanova"));
    assert!(html.contains(r#"id="patient_name""#));
    assert!(html.contains(r#"id="sex_0" name="sex" value="0" checked>"#));
    assert!(html.contains("Application ready"));

    let html = body_text(app.oneshot(get("/")).await.unwrap()).await;
    assert!(!html.contains("Application ready"));
}

#[tokio::test]
async fn calculate_action_scores_submitted_values() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_form(
            "/form",
            "patient_name=Maria+Ivanova&age_onset=52&sex=1&heredity_unknown=1&tsh_1=0.05&action=calculate",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");

    let snapshot: Value =
        serde_json::from_str(&body_text(app.oneshot(get("/api/session")).await.unwrap()).await)
            .unwrap();
    // 25 (age) + 10 (male) + 10 (low TSH)
    assert_eq!(snapshot["risk"]["value"], 45);
    assert_eq!(snapshot["risk"]["tier"], "medium");
    assert_eq!(snapshot["unknown"], serde_json::json!(["heredity"]));
    assert_eq!(snapshot["intake"]["tsh_1"], "0.05");
}

#[tokio::test]
async fn unknown_action_is_rejected() {
    let response = app()
        .oneshot(post_form("/form", "action=launch"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn new_patient_is_selected() {
    let app = app();
    let response = app.clone().oneshot(post_form("/patients", "")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let snapshot: Value =
        serde_json::from_str(&body_text(app.oneshot(get("/api/session")).await.unwrap()).await)
            .unwrap();
    assert_eq!(snapshot["current_patient_id"], "new-0");
    assert_eq!(snapshot["is_new_patient"], true);
    assert_eq!(snapshot["patient_count"], 2);
}

#[tokio::test]
async fn unknown_patient_id_is_not_found() {
    let app = app();

    for uri in ["/patients/p9/select", "/patients/p9/delete"] {
        let response = app.clone().oneshot(post_form(uri, "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["error"], "patient p9 is not in the list");
    }

    let snapshot: Value =
        serde_json::from_str(&body_text(app.oneshot(get("/api/session")).await.unwrap()).await)
            .unwrap();
    assert_eq!(snapshot["current_patient_id"], "p1");
    assert_eq!(snapshot["patient_count"], 1);
}
