use thyro_forms::descriptor::{FieldDescriptor, FieldKind};
use thyro_forms::error::FormError;
use thyro_forms::unknown::{self, Toggle};

fn smoking() -> FieldDescriptor {
    FieldDescriptor::new(
        "appointment_smoking_status_1",
        "smoking_status",
        "Smoking",
        FieldKind::multi(&[("0", "No"), ("2", "Yes"), ("3", "History")]),
    )
}

#[test]
fn checking_clears_and_disables() {
    let mut f = smoking();
    f.set_input("2").unwrap();

    assert_eq!(unknown::apply(&mut f, true), Toggle::Changed);
    assert!(f.unknown);
    assert_eq!(f.extract_value(), None);
}

#[test]
fn toggle_is_idempotent() {
    let mut f = smoking();
    f.set_input("3").unwrap();

    unknown::apply(&mut f, true);
    let once = f.clone();
    assert_eq!(unknown::apply(&mut f, true), Toggle::Unchanged);
    assert_eq!(f, once);

    unknown::apply(&mut f, false);
    let unchecked = f.clone();
    assert_eq!(unknown::apply(&mut f, false), Toggle::Unchanged);
    assert_eq!(f, unchecked);
}

#[test]
fn unchecking_does_not_restore_the_value() {
    let mut f = smoking();
    f.set_input("0").unwrap();
    unknown::apply(&mut f, true);

    assert_eq!(unknown::apply(&mut f, false), Toggle::Changed);
    assert!(!f.unknown);
    assert_eq!(f.extract_value(), None);
}

#[test]
fn unchecked_empty_field_is_unchanged() {
    let mut f = smoking();
    assert_eq!(unknown::apply(&mut f, false), Toggle::Unchanged);
}

#[test]
fn input_is_rejected_while_unknown() {
    let mut f = smoking();
    unknown::apply(&mut f, true);

    assert!(matches!(f.set_input("2"), Err(FormError::FieldDisabled { .. })));
    assert!(f.set_input("  ").is_ok());
    assert_eq!(f.extract_value(), None);
}

#[test]
fn choice_selection_is_exclusive() {
    let mut f = smoking();
    f.set_input("0").unwrap();
    f.set_input("3").unwrap();
    assert_eq!(f.extract_value().unwrap().as_str(), "3");

    assert!(matches!(f.set_input("1"), Err(FormError::UnknownOption { .. })));
    assert_eq!(f.extract_value().unwrap().as_str(), "3");

    f.set_input("").unwrap();
    assert_eq!(f.extract_value(), None);
}
