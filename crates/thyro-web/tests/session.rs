mod common;

use std::sync::Arc;

use serde_json::json;
use thyro_core::features::field;
use thyro_core::models::prediction::PredictionResponse;
use thyro_forms::FieldSet;
use thyro_forms::appointment::field_id;
use thyro_web::action::FormAction;
use thyro_web::error::SessionError;
use thyro_web::notify::NoticeLevel;
use thyro_web::session::Session;

use common::{FakeApi, current_inputs, patient};

fn started(api: &Arc<FakeApi>) -> Session {
    let mut session = Session::new(api.clone());
    session.init();
    session.take_notices();
    session
}

fn two_patients() -> Arc<FakeApi> {
    Arc::new(FakeApi::new(vec![
        patient("p1", "Maria Ivanova"),
        patient("p2", "Oleg Sokolov"),
    ]))
}

#[test]
fn init_loads_everything_and_selects_first_patient() {
    let api = two_patients();
    let session = started(&api);

    assert!(session.api_online());
    assert_eq!(api.calls(), vec!["check_status", "list_models", "list_patients"]);
    assert_eq!(session.current_patient_id(), Some("p1"));
    assert_eq!(session.intake().collect_values().get(field::PATIENT_NAME), Some("Maria Ivanova"));
    assert_eq!(session.models().len(), 2);
}

#[test]
fn init_offline_reports_and_keeps_going() {
    let api = two_patients();
    api.set_failing(true);
    let mut session = Session::new(api.clone());
    session.init();

    assert!(!session.api_online());
    assert!(session.patients().is_empty());
    let notices = session.take_notices();
    assert!(notices.iter().any(|n| n.level == NoticeLevel::Error));
    assert!(session.take_notices().is_empty());
}

#[test]
fn save_with_missing_required_field_makes_no_call() {
    let api = two_patients();
    let mut session = started(&api);

    let mut inputs = current_inputs(&session);
    inputs.insert(field::PATIENT_NAME, "");
    inputs.insert(field::TSH_1, "0.3");
    session.submit(&inputs, FormAction::Save);

    assert!(!api.called("update_patient"));
    let notices = session.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(notices[0].message, "Patient name is required");
    // entered data is kept
    assert_eq!(session.intake().collect_values().get(field::TSH_1), Some("0.3"));
}

#[test]
fn failed_save_leaves_stored_record_unchanged() {
    let api = two_patients();
    let mut session = started(&api);
    let before = session.current_patient().cloned().unwrap();

    let mut inputs = current_inputs(&session);
    inputs.insert(field::TSH_1, "0.3");
    api.set_failing(true);
    session.submit(&inputs, FormAction::Save);

    assert!(api.called("update_patient"));
    assert_eq!(session.current_patient().cloned().unwrap(), before);
    assert!(session.take_notices().iter().any(|n| n.message.contains("503")));
}

#[test]
fn save_stores_intake_and_appointments() {
    let api = two_patients();
    let mut session = started(&api);

    session.submit(&current_inputs(&session), FormAction::AddAppointment);
    let mut inputs = current_inputs(&session);
    inputs.insert(field::TSH_1, "0.3");
    inputs.insert(field_id(field::TSH_3, 1), "2.4");
    inputs.insert(format!("{}_unknown", field_id(field::US3_NODULES, 1)), "1");
    session.submit(&inputs, FormAction::Save);

    let stored = &session.current_patient().unwrap().patient_data;
    assert_eq!(stored.tsh_1.as_ref().map(|v| v.as_str()), Some("0.3"));
    assert_eq!(stored.appointments.len(), 1);
    let entry = &stored.appointments[0];
    assert_eq!(entry.values[field::TSH_3].as_ref().map(|v| v.as_str()), Some("2.4"));
    assert_eq!(entry.values.get(field::US3_NODULES), Some(&None));
    // age derived from the date of birth was stored with the appointment
    assert!(
        entry.values[field::AGE_ONSET]
            .as_ref()
            .is_some_and(|v| !v.as_str().is_empty())
    );
    // skipped fields are stored blank rather than left out
    assert_eq!(
        entry.values[field::FT4_1].as_ref().map(|v| v.as_str()),
        Some("")
    );

    let remote = api.patients.lock().unwrap()[0].clone();
    assert_eq!(&remote.patient_data, stored);
}

#[test]
fn failed_create_leaves_list_unchanged() {
    let api = two_patients();
    let mut session = started(&api);
    api.set_failing(true);

    let result = session.new_patient();
    assert!(matches!(result, Err(SessionError::Client(_))));
    assert_eq!(session.patients().len(), 2);
    assert_eq!(session.current_patient_id(), Some("p1"));
}

#[test]
fn created_patient_is_selected_and_new() {
    let api = two_patients();
    let mut session = started(&api);

    session.new_patient().unwrap();
    assert_eq!(session.patients().len(), 3);
    assert_eq!(session.current_patient_id(), Some("new-0"));
    assert!(session.is_new_patient());
    assert!(session.intake().collect_values().is_empty());
}

#[test]
fn deleting_current_patient_clears_the_form() {
    let api = two_patients();
    let mut session = started(&api);

    session.delete_patient("p1").unwrap();
    assert_eq!(session.current_patient_id(), None);
    assert_eq!(session.patients().len(), 1);
    assert!(session.intake().collect_values().is_empty());

    api.set_failing(true);
    assert!(session.delete_patient("p2").is_err());
    assert_eq!(session.patients().len(), 1);
}

#[test]
fn static_risk_uses_latest_appointment_age() {
    let api = two_patients();
    let mut session = started(&api);

    session.calculate_static_risk();
    assert_eq!(session.risk().unwrap().value, 5);

    session.add_appointment().unwrap();
    let mut inputs = current_inputs(&session);
    inputs.insert(field_id(field::AGE_ONSET, 1), "55");
    session.submit(&inputs, FormAction::Calculate);
    assert_eq!(session.risk().unwrap().value, 25);
    assert!(api.calls().iter().all(|c| c != "predict"));
}

#[test]
fn use_current_age_needs_date_of_birth() {
    let api = Arc::new(FakeApi::new(vec![patient("p1", "Maria Ivanova")]));
    let mut session = started(&api);
    session.add_appointment().unwrap();
    session.take_notices();

    let mut inputs = current_inputs(&session);
    inputs.insert(field::DATE_OF_BIRTH, "");
    inputs.insert(format!("{}_unknown", field_id(field::AGE_ONSET, 1)), "1");
    session.submit(&inputs, FormAction::UseCurrentAge(1));

    let notices = session.take_notices();
    assert_eq!(notices[0].message, "please enter the date of birth first");
    let age = session.appointments().get(1).unwrap().fields[0].clone();
    assert!(age.unknown);
}

#[test]
fn follow_up_model_needs_follow_up_data() {
    let api = two_patients();
    let mut session = started(&api);

    assert!(matches!(
        session.select_model("followup_model"),
        Err(SessionError::ModelUnavailable(_))
    ));
    session.select_model("init_model").unwrap();
    assert_eq!(session.selected_model(), Some("init_model"));
}

#[test]
fn prediction_is_kept_until_a_call_succeeds() {
    let api = two_patients();
    let mut session = started(&api);

    assert!(matches!(session.predict(), Err(SessionError::NoModel)));
    session.select_model("init_model").unwrap();

    *api.prediction.lock().unwrap() = Some(
        serde_json::from_value::<PredictionResponse>(json!({
            "status": "success", "prediction": 0, "probability": 0.184
        }))
        .unwrap(),
    );
    session.predict().unwrap();
    let first = session.prediction().cloned().unwrap();
    assert_eq!(first.model_name, "init_model");

    let request = api.last_request.lock().unwrap().clone().unwrap();
    assert_eq!(request.features[field::AGE_ONSET], json!(38.0));
    assert_eq!(request.features[field::TSH_1], serde_json::Value::Null);

    api.set_failing(true);
    assert!(session.predict().is_err());
    assert_eq!(session.prediction().cloned().unwrap(), first);
}

#[test]
fn prediction_requires_age_and_sex() {
    let api = two_patients();
    let mut session = started(&api);
    session.select_model("init_model").unwrap();
    session.intake_mut().toggle_unknown(field::SEX, true).unwrap();

    assert!(session.predict().is_err());
    assert!(!api.called("predict"));
}

#[test]
fn selecting_a_patient_derives_missing_appointment_age() {
    let mut stored = patient("p1", "Maria Ivanova");
    stored.patient_data.appointments = vec![
        serde_json::from_value(json!({ "date": "2023-11-02", "values": { "tsh_3": "2.1" } }))
            .unwrap(),
    ];
    let api = Arc::new(FakeApi::new(vec![stored]));
    let mut session = started(&api);

    let section = session.appointments().get(1).unwrap();
    let age = section.field(&field_id(field::AGE_ONSET, 1)).unwrap();
    assert!(!age.unknown);
    assert!(age.value.as_ref().and_then(|v| v.as_f64()).is_some_and(|years| years >= 34.0));
    assert!(session.take_notices().is_empty());
}
