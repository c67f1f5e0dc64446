//! Markup generation for field descriptors.
//!
//! One template per [`FieldKind`]; the match in [`render_field`] is exhaustive
//! so every kind has a renderer. Templates are `.html` and therefore
//! autoescaped by tera.

use std::sync::LazyLock;

use serde::Serialize;
use tera::{Context, Tera};

use crate::descriptor::{Bounds, FieldDescriptor, FieldKind};
use crate::error::FormError;

/// Built-in field templates, parsed once.
///
/// # Panics
///
/// Panics on first use if a built-in template fails to parse.
static TEMPLATES: LazyLock<Tera> = LazyLock::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("unknown.html", include_str!("../templates/unknown.html")),
        ("numeric.html", include_str!("../templates/numeric.html")),
        ("choice.html", include_str!("../templates/choice.html")),
        ("text.html", include_str!("../templates/text.html")),
        ("age.html", include_str!("../templates/age.html")),
        ("appointment.html", include_str!("../templates/appointment.html")),
    ])
    .unwrap_or_else(|e| panic!("built-in field templates failed to parse: {e}"));
    tera
});

#[derive(Debug, Serialize)]
struct OptionView<'a> {
    id: String,
    code: &'a str,
    label: &'a str,
    checked: bool,
}

/// Flattened template context for one field.
#[derive(Debug, Serialize)]
struct FieldView<'a> {
    id: &'a str,
    key: &'a str,
    label: &'a str,
    value: &'a str,
    unknown: bool,
    required: bool,
    placeholder: &'a str,
    unknown_id: String,
    min: &'a str,
    max: &'a str,
    step: &'a str,
    unit: &'a str,
    rows: u8,
    sequence_number: u32,
    options: Vec<OptionView<'a>>,
}

impl<'a> FieldView<'a> {
    fn new(field: &'a FieldDescriptor) -> Self {
        Self {
            id: &field.id,
            key: &field.key,
            label: &field.label,
            value: field.value.as_ref().map(|v| v.as_str()).unwrap_or(""),
            unknown: field.unknown,
            required: field.required,
            placeholder: &field.placeholder,
            unknown_id: field.unknown_id(),
            min: "",
            max: "",
            step: "",
            unit: "",
            rows: 1,
            sequence_number: 0,
            options: Vec::new(),
        }
    }

    fn bounded(mut self, bounds: &'a Bounds) -> Self {
        self.min = &bounds.min;
        self.max = bounds.max.as_deref().unwrap_or("");
        self.step = &bounds.step;
        self
    }
}

/// Produce the markup for one field, including its unknown checkbox.
pub fn render_field(field: &FieldDescriptor) -> Result<String, FormError> {
    let view = FieldView::new(field);
    let (template, view) = match &field.kind {
        FieldKind::Numeric { bounds, unit } => {
            let mut view = view.bounded(bounds);
            view.unit = unit.as_deref().unwrap_or("");
            ("numeric.html", view)
        }
        FieldKind::BinaryChoice { options } | FieldKind::MultiChoice { options } => {
            let selected = field.value.as_ref().map(|v| v.as_str());
            let options = options
                .iter()
                .map(|o| OptionView {
                    id: field.option_id(&o.code),
                    code: &o.code,
                    label: &o.label,
                    checked: selected == Some(o.code.as_str()),
                })
                .collect();
            ("choice.html", FieldView { options, ..view })
        }
        FieldKind::FreeText { rows } => ("text.html", FieldView { rows: *rows, ..view }),
        FieldKind::DerivedAge {
            bounds,
            sequence_number,
        } => {
            let mut view = view.bounded(bounds);
            view.sequence_number = *sequence_number;
            ("age.html", view)
        }
    };

    let mut context = Context::new();
    context.insert("field", &view);
    render_template(template, &context)
}

pub(crate) fn render_template(name: &str, context: &Context) -> Result<String, FormError> {
    Ok(TEMPLATES.render(name, context)?)
}
