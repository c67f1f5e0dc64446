//! thyro-forms
//!
//! The field-rendering framework behind the intake and appointment forms.
//! Field descriptors are the single source of truth; rendering is a pure
//! projection of them and submissions mutate them through [`FieldSet`].

pub mod appointment;
pub mod descriptor;
pub mod error;
pub mod intake;
pub mod render;
pub mod schema;
pub mod submission;
pub mod unknown;

use descriptor::FieldDescriptor;
use error::FormError;
use submission::Submission;
use thyro_core::models::record::FlatRecord;
use unknown::Toggle;

/// Trait implemented by every group of fields rendered together.
pub trait FieldSet {
    fn fields(&self) -> &[FieldDescriptor];

    fn fields_mut(&mut self) -> &mut [FieldDescriptor];

    /// Look up a field by its element id.
    fn field(&self, id: &str) -> Option<&FieldDescriptor> {
        self.fields().iter().find(|f| f.id == id)
    }

    fn field_by_key(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields().iter().find(|f| f.key == key)
    }

    fn field_mut(&mut self, id: &str) -> Result<&mut FieldDescriptor, FormError> {
        self.fields_mut()
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| FormError::UnknownField(id.to_string()))
    }

    fn set_input(&mut self, id: &str, raw: &str) -> Result<(), FormError> {
        self.field_mut(id)?.set_input(raw)
    }

    fn toggle_unknown(&mut self, id: &str, checked: bool) -> Result<Toggle, FormError> {
        Ok(unknown::apply(self.field_mut(id)?, checked))
    }

    /// Apply one form submission to every field of the set.
    ///
    /// The unknown checkbox is applied before the value so a field that was
    /// just marked unknown drops whatever its (now disabled) control held.
    /// Rejected inputs are returned; the remaining fields are still applied.
    fn apply_submission(&mut self, submission: &Submission) -> Vec<FormError> {
        let mut errors = Vec::new();
        for field in self.fields_mut() {
            let checked = submission.contains(&field.unknown_id());
            unknown::apply(field, checked);
            if field.unknown {
                continue;
            }
            if let Err(e) = field.set_input(submission.get(&field.id).unwrap_or("")) {
                errors.push(e);
            }
        }
        errors
    }

    /// Every entered value keyed by field key; unknown and blank fields are
    /// left out.
    fn collect_values(&self) -> FlatRecord {
        self.fields()
            .iter()
            .filter(|f| !f.unknown)
            .filter_map(|f| f.extract_value().map(|v| (f.key.as_str(), v.clone())))
            .collect()
    }

    /// Keys of the fields currently marked unknown.
    fn unknown_keys(&self) -> Vec<&str> {
        self.fields()
            .iter()
            .filter(|f| f.unknown)
            .map(|f| f.key.as_str())
            .collect()
    }

    /// Keys of the known fields that hold no value.
    fn blank_keys(&self) -> Vec<&str> {
        self.fields()
            .iter()
            .filter(|f| !f.unknown && f.extract_value().is_none())
            .map(|f| f.key.as_str())
            .collect()
    }

    fn render_fields(&self) -> Result<String, FormError> {
        let mut html = String::new();
        for field in self.fields() {
            html.push_str(&render::render_field(field)?);
        }
        Ok(html)
    }
}
