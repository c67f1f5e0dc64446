//! Repeatable appointment sections.
//!
//! Each section holds the derived-age field followed by every field of
//! [`APPOINTMENT_FIELDS`], with element ids namespaced by the section's
//! sequence number so several sections coexist on one page.

use jiff::civil::Date;
use serde::Serialize;
use tera::Context;
use ts_rs::TS;

use thyro_core::age::years_between;
use thyro_core::features::field;
use thyro_core::models::appointment::{AppointmentEntry, Datum};
use thyro_core::models::record::FlatRecord;
use thyro_core::models::value::ClinicalValue;

use crate::FieldSet;
use crate::descriptor::FieldDescriptor;
use crate::error::FormError;
use crate::render;
use crate::schema::{self, APPOINTMENT_FIELDS};
use crate::submission::Submission;

pub const SCOPE: &str = "appointment";

/// Element id of field `key` in appointment `sequence_number`.
pub fn field_id(key: &str, sequence_number: u32) -> String {
    format!("{SCOPE}_{key}_{sequence_number}")
}

/// Displayed form of an appointment date, e.g. `June 14, 2024`.
pub fn display_date(date: Date) -> String {
    date.strftime("%B %-d, %Y").to_string()
}

fn age_value(birth: Date, today: Date) -> ClinicalValue {
    ClinicalValue::from(years_between(birth, today).max(0).to_string().as_str())
}

/// Values collected from one appointment section.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct CollectedAppointment {
    pub appointment_number: u32,
    /// As displayed, `Month D, YYYY`.
    pub date: String,
    pub values: FlatRecord,
}

impl CollectedAppointment {
    /// The values with `appointment_number` and `date` folded in.
    pub fn to_flat(&self) -> FlatRecord {
        let mut flat = self.values.clone();
        flat.set_raw("appointment_number", &self.appointment_number.to_string());
        flat.set_raw("date", &self.date);
        flat
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct AppointmentSection {
    pub sequence_number: u32,
    pub date: Date,
    pub collapsed: bool,
    pub fields: Vec<FieldDescriptor>,
}

impl AppointmentSection {
    /// Build section `sequence_number`.
    ///
    /// With `existing` data every field takes its stored value, stays empty
    /// when stored blank, and is marked unknown when the stored datum is
    /// absent or null. The derived age is the exception: it is only unknown
    /// when explicitly null, and an absent age is computed from
    /// `date_of_birth`. Without existing data every field starts empty and
    /// known.
    pub fn build(
        sequence_number: u32,
        existing: Option<&AppointmentEntry>,
        date_of_birth: Option<Date>,
        today: Date,
    ) -> Self {
        let computed_age = date_of_birth.map(|birth| age_value(birth, today));

        let age = FieldDescriptor::new(
            field_id(field::AGE_ONSET, sequence_number),
            field::AGE_ONSET,
            schema::AGE_LABEL,
            schema::appointment_age(sequence_number),
        );
        let age = match existing.map(|e| e.datum(field::AGE_ONSET)) {
            Some(Datum::Value(v)) => age.with_value(Some(v.clone())),
            Some(Datum::Null) => age.with_unknown(true),
            Some(Datum::Blank) => age,
            Some(Datum::Absent) | None => age.with_value(computed_age),
        };

        let mut fields = vec![age];
        fields.extend(APPOINTMENT_FIELDS.iter().map(|spec| {
            let descriptor = spec.descriptor(field_id(spec.key, sequence_number));
            match existing.map(|e| e.datum(spec.key)) {
                Some(Datum::Value(v)) => descriptor.with_value(Some(v.clone())),
                Some(Datum::Absent | Datum::Null) => descriptor.with_unknown(true),
                Some(Datum::Blank) | None => descriptor,
            }
        }));

        Self {
            sequence_number,
            date: existing.and_then(|e| e.date).unwrap_or(today),
            collapsed: false,
            fields,
        }
    }

    pub fn display_date(&self) -> String {
        display_date(self.date)
    }

    /// Collapse state is presentation only and never affects collection.
    pub fn collect(&self) -> CollectedAppointment {
        CollectedAppointment {
            appointment_number: self.sequence_number,
            date: self.display_date(),
            values: self.collect_values(),
        }
    }

    /// The stored form of this section. Every field is written: unknown ones
    /// as explicit nulls and blank ones as empty strings.
    pub fn to_entry(&self) -> AppointmentEntry {
        AppointmentEntry::from_record(
            self.date,
            &self.collect_values(),
            self.unknown_keys(),
            self.blank_keys(),
        )
    }

    /// Fill the age field from `date_of_birth`, clearing its unknown flag.
    pub fn use_current_age(
        &mut self,
        date_of_birth: Option<Date>,
        today: Date,
    ) -> Result<(), FormError> {
        let birth = date_of_birth.ok_or(FormError::MissingDateOfBirth)?;
        let id = field_id(field::AGE_ONSET, self.sequence_number);
        let age = self.field_mut(&id)?;
        age.unknown = false;
        age.value = Some(age_value(birth, today));
        tracing::debug!(appointment = self.sequence_number, "age derived from date of birth");
        Ok(())
    }

    pub fn toggle_collapsed(&mut self) {
        self.collapsed = !self.collapsed;
    }

    pub fn render(&self) -> Result<String, FormError> {
        let mut context = Context::new();
        context.insert("sequence_number", &self.sequence_number);
        context.insert("date", &self.display_date());
        context.insert("collapsed", &self.collapsed);
        context.insert("fields_html", &self.render_fields()?);
        render::render_template("appointment.html", &context)
    }
}

impl FieldSet for AppointmentSection {
    fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    fn fields_mut(&mut self) -> &mut [FieldDescriptor] {
        &mut self.fields
    }
}

/// The ordered appointment sections of the current patient.
///
/// Sequence numbers are dense and 1-based: section `n` sits at index `n - 1`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct AppointmentList {
    sections: Vec<AppointmentSection>,
}

impl AppointmentList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty section dated `today`.
    pub fn add(&mut self, date_of_birth: Option<Date>, today: Date) -> &AppointmentSection {
        let sequence_number = self.next_sequence_number();
        self.sections
            .push(AppointmentSection::build(sequence_number, None, date_of_birth, today));
        tracing::debug!(appointment = sequence_number, "appointment section added");
        &self.sections[self.sections.len() - 1]
    }

    /// Replace all sections with one per stored history entry, in order.
    pub fn load(&mut self, entries: &[AppointmentEntry], date_of_birth: Option<Date>, today: Date) {
        self.sections = entries
            .iter()
            .zip(1u32..)
            .map(|(entry, n)| AppointmentSection::build(n, Some(entry), date_of_birth, today))
            .collect();
    }

    pub fn clear(&mut self) {
        self.sections.clear();
    }

    pub fn next_sequence_number(&self) -> u32 {
        u32::try_from(self.sections.len()).map_or(u32::MAX, |n| n.saturating_add(1))
    }

    pub fn get(&self, sequence_number: u32) -> Option<&AppointmentSection> {
        self.sections
            .iter()
            .find(|s| s.sequence_number == sequence_number)
    }

    pub fn get_mut(&mut self, sequence_number: u32) -> Result<&mut AppointmentSection, FormError> {
        self.sections
            .iter_mut()
            .find(|s| s.sequence_number == sequence_number)
            .ok_or(FormError::UnknownAppointment(sequence_number))
    }

    pub fn latest(&self) -> Option<&AppointmentSection> {
        self.sections.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AppointmentSection> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn collect_all(&self) -> Vec<CollectedAppointment> {
        self.sections.iter().map(AppointmentSection::collect).collect()
    }

    pub fn to_entries(&self) -> Vec<AppointmentEntry> {
        self.sections.iter().map(AppointmentSection::to_entry).collect()
    }

    pub fn apply_submission(&mut self, submission: &Submission) -> Vec<FormError> {
        self.sections
            .iter_mut()
            .flat_map(|s| s.apply_submission(submission))
            .collect()
    }

    pub fn render(&self) -> Result<String, FormError> {
        let mut html = String::new();
        for section in &self.sections {
            html.push_str(&section.render()?);
        }
        Ok(html)
    }
}
