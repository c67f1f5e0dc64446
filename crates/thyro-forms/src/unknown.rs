//! The per-field "unknown" toggle.
//!
//! Checking the box disables every editable control of the field group and
//! blanks it (for choice kinds: clears the selection). Unchecking re-enables
//! the controls but never restores the previous content. Only presentation
//! state changes here; nothing is scored or sent anywhere.

use crate::descriptor::FieldDescriptor;

/// Whether applying a toggle changed the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Changed,
    Unchanged,
}

/// Apply the checkbox state `checked` to `field`.
///
/// Idempotent: applying the same state again reports [`Toggle::Unchanged`]
/// and leaves the field as the first application left it.
pub fn apply(field: &mut FieldDescriptor, checked: bool) -> Toggle {
    let before = (field.unknown, field.value.is_some());

    field.unknown = checked;
    if checked {
        field.value = None;
    }

    if before == (field.unknown, field.value.is_some()) {
        Toggle::Unchanged
    } else {
        tracing::debug!(field = %field.id, unknown = checked, "unknown toggle applied");
        Toggle::Changed
    }
}
