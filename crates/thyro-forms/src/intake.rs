//! Patient-level form: demographics, baseline and follow-up values.

use jiff::civil::Date;
use serde::Serialize;
use ts_rs::TS;

use thyro_core::age::parse_date;
use thyro_core::features::field;
use thyro_core::models::appointment::AppointmentEntry;
use thyro_core::models::patient::PatientData;
use thyro_core::models::value::ClinicalValue;

use crate::FieldSet;
use crate::descriptor::FieldDescriptor;
use crate::error::FormError;
use crate::schema::INTAKE_SECTIONS;

/// One titled block of rendered intake markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSection {
    pub title: &'static str,
    pub html: String,
}

/// Intake fields use their bare key as element id.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct IntakeForm {
    fields: Vec<FieldDescriptor>,
}

impl Default for IntakeForm {
    fn default() -> Self {
        Self::blank()
    }
}

impl IntakeForm {
    pub fn blank() -> Self {
        let fields = INTAKE_SECTIONS
            .iter()
            .flat_map(|section| &section.fields)
            .map(|spec| spec.descriptor(spec.key))
            .collect();
        Self { fields }
    }

    /// Populate from a stored patient; every unknown flag starts cleared.
    pub fn from_patient(patient: &PatientData) -> Self {
        let mut form = Self::blank();
        for descriptor in &mut form.fields {
            descriptor.value = patient.get(&descriptor.key).cloned();
        }
        form
    }

    /// The first required field without a value, in form order.
    pub fn validate_required(&self) -> Result<(), FormError> {
        match self
            .fields
            .iter()
            .find(|f| f.required && f.extract_value().is_none())
        {
            Some(missing) => Err(FormError::MissingRequired {
                field: missing.label.clone(),
            }),
            None => Ok(()),
        }
    }

    pub fn birth_date(&self) -> Result<Option<Date>, FormError> {
        let Some(dob) = self.field(field::DATE_OF_BIRTH) else {
            return Ok(None);
        };
        Ok(dob
            .extract_value()
            .map(|v| parse_date(v.as_str()))
            .transpose()?)
    }

    /// Empty and unknown fields are stored as null.
    pub fn to_patient_data(
        &self,
        appointments: Vec<AppointmentEntry>,
    ) -> Result<PatientData, FormError> {
        let mut data = PatientData::default();
        for f in &self.fields {
            let value = if f.unknown { None } else { f.value.clone() };
            data.set(&f.key, value)?;
        }
        data.appointments = appointments;
        Ok(data)
    }

    /// Recompute the FT3/FT4 ratio when both hormones are known and FT4 is
    /// positive. Returns whether the ratio was written.
    pub fn update_ratio(&mut self) -> bool {
        let reading = |key: &str| {
            self.field(key)
                .filter(|f| !f.unknown)
                .and_then(|f| f.extract_value())
                .and_then(ClinicalValue::as_f64)
        };
        let (Some(ft3), Some(ft4)) = (reading(field::FT3_1), reading(field::FT4_1)) else {
            return false;
        };
        if ft4 <= 0.0 {
            return false;
        }
        let ratio = format!("{:.2}", ft3 / ft4);
        let Ok(target) = self.field_mut(field::FT3_TO_FT4_RATIO) else {
            return false;
        };
        target.unknown = false;
        target.value = Some(ClinicalValue::from(ratio.as_str()));
        true
    }

    pub fn render_sections(&self) -> Result<Vec<RenderedSection>, FormError> {
        INTAKE_SECTIONS
            .iter()
            .map(|section| {
                let mut html = String::new();
                for spec in &section.fields {
                    if let Some(f) = self.field(spec.key) {
                        html.push_str(&crate::render::render_field(f)?);
                    }
                }
                Ok(RenderedSection {
                    title: section.title,
                    html,
                })
            })
            .collect()
    }
}

impl FieldSet for IntakeForm {
    fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    fn fields_mut(&mut self) -> &mut [FieldDescriptor] {
        &mut self.fields
    }
}
