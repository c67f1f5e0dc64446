//! Fixed field layouts of the appointment section and the intake form.

use std::sync::LazyLock;

use thyro_core::features::{display_name, field};

use crate::descriptor::{Bounds, FieldDescriptor, FieldKind};

/// Static description of one field before it is bound to an element id.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: &'static str,
}

impl FieldSpec {
    fn new(key: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label: display_name(key),
            kind,
            required: false,
            placeholder: "",
        }
    }

    fn labelled(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Bind this field to element id `id` with no value.
    pub fn descriptor(&self, id: impl Into<String>) -> FieldDescriptor {
        FieldDescriptor::new(id, self.key, self.label, self.kind.clone())
            .required(self.required)
            .placeholder(self.placeholder)
    }
}

pub const SMOKING_OPTIONS: [(&str, &str); 3] = [("0", "No"), ("2", "Yes"), ("3", "History")];

pub const TREATMENT_OPTIONS: [(&str, &str); 3] =
    [("0", "Thyroxine"), ("1", "Mercasolil"), ("2", "Combination")];

pub const SEX_OPTIONS: ((&str, &str), (&str, &str)) = (("0", "Female"), ("1", "Male"));

pub const AGE_LABEL: &str = "Age at disease onset (years)";

/// The derived-age field that opens every appointment section.
pub fn appointment_age(sequence_number: u32) -> FieldKind {
    FieldKind::DerivedAge {
        bounds: Bounds::age(),
        sequence_number,
    }
}

fn baseline_numeric() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new(field::US1_THYROID_VOLUME, FieldKind::numeric("0.1", Some("cm³"))),
        FieldSpec::new(field::US1_NODULES_CM, FieldKind::numeric("0.1", Some("cm"))),
        FieldSpec::new(field::TSH_1, FieldKind::numeric("0.01", Some("mIU/L"))),
        FieldSpec::new(field::FT4_1, FieldKind::numeric("0.1", Some("pmol/L"))),
        FieldSpec::new(field::FT3_1, FieldKind::numeric("0.1", Some("pmol/L"))),
        FieldSpec::new(field::FT3_TO_FT4_RATIO, FieldKind::numeric("0.01", None)),
    ]
}

fn follow_up_numeric() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new(field::TSH_3, FieldKind::numeric("0.01", Some("mIU/L"))),
        FieldSpec::new(field::US3_THYROID_VOLUME, FieldKind::numeric("0.1", Some("cm³"))),
        FieldSpec::new(field::US3_NODULES_CM, FieldKind::numeric("0.1", Some("cm"))),
    ]
}

/// Appointment fields after the derived age: numeric, binary, multi choice,
/// then free text.
pub static APPOINTMENT_FIELDS: LazyLock<Vec<FieldSpec>> = LazyLock::new(|| {
    let mut specs = baseline_numeric();
    specs.extend(follow_up_numeric());
    specs.extend([
        FieldSpec::new(field::US1_NODULES, FieldKind::binary()),
        FieldSpec::new(field::EXOPHTHALMOS, FieldKind::binary()),
        FieldSpec::new(field::THYROTOXIC_CARDIOMYOPATHY, FieldKind::binary()),
        FieldSpec::new(field::US3_NODULES, FieldKind::binary()),
        FieldSpec::new(field::SMOKING_STATUS, FieldKind::multi(&SMOKING_OPTIONS)),
        FieldSpec::new(field::TREATMENT_TYPE, FieldKind::multi(&TREATMENT_OPTIONS)),
        FieldSpec::new(field::NOTES, FieldKind::FreeText { rows: 3 }).labelled("Notes"),
    ]);
    specs
});

/// A titled group of intake fields.
#[derive(Debug, Clone)]
pub struct IntakeSection {
    pub title: &'static str,
    pub fields: Vec<FieldSpec>,
}

pub static INTAKE_SECTIONS: LazyLock<Vec<IntakeSection>> = LazyLock::new(|| {
    let mut initial = vec![
        FieldSpec::new(
            field::AGE_ONSET,
            FieldKind::Numeric {
                bounds: Bounds::age(),
                unit: Some("years".to_string()),
            },
        )
        .required(),
        FieldSpec::new(field::SEX, FieldKind::binary_with(SEX_OPTIONS.0, SEX_OPTIONS.1))
            .required(),
        FieldSpec::new(field::HEREDITY, FieldKind::binary()),
        FieldSpec::new(field::SMOKING_STATUS, FieldKind::multi(&SMOKING_OPTIONS)),
    ];
    initial.extend(baseline_numeric());
    initial.extend([
        FieldSpec::new(field::US1_NODULES, FieldKind::binary()),
        FieldSpec::new(field::EXOPHTHALMOS, FieldKind::binary()),
        FieldSpec::new(field::THYROTOXIC_CARDIOMYOPATHY, FieldKind::binary()),
    ]);

    let mut follow_up = vec![FieldSpec::new(
        field::TREATMENT_TYPE,
        FieldKind::multi(&TREATMENT_OPTIONS),
    )];
    follow_up.extend(follow_up_numeric());
    follow_up.push(FieldSpec::new(field::US3_NODULES, FieldKind::binary()));

    vec![
        IntakeSection {
            title: "Patient",
            fields: vec![
                FieldSpec::new(field::PATIENT_NAME, FieldKind::FreeText { rows: 1 })
                    .labelled("Patient name")
                    .required(),
                FieldSpec::new(field::DATE_OF_BIRTH, FieldKind::FreeText { rows: 1 })
                    .labelled("Date of birth")
                    .placeholder("YYYY-MM-DD"),
            ],
        },
        IntakeSection {
            title: "Initial visit",
            fields: initial,
        },
        IntakeSection {
            title: "After treatment",
            fields: follow_up,
        },
    ]
});
