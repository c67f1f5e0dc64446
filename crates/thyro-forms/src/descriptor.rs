use serde::{Deserialize, Serialize};
use ts_rs::TS;

use thyro_core::models::value::ClinicalValue;

use crate::error::FormError;

/// One selectable answer of a choice field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChoiceOption {
    pub code: String,
    pub label: String,
}

impl ChoiceOption {
    pub fn new(code: &str, label: &str) -> Self {
        Self {
            code: code.to_string(),
            label: label.to_string(),
        }
    }
}

/// Limits passed through to a number input.
///
/// Kept as text so they render exactly as configured (`"0.01"`, not `0.01`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Bounds {
    pub min: String,
    pub max: Option<String>,
    pub step: String,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: "0".to_string(),
            max: None,
            step: "0.01".to_string(),
        }
    }
}

impl Bounds {
    pub fn with_step(step: &str) -> Self {
        Self {
            step: step.to_string(),
            ..Self::default()
        }
    }

    /// Whole years, 0 to 120.
    pub fn age() -> Self {
        Self {
            min: "0".to_string(),
            max: Some("120".to_string()),
            step: "1".to_string(),
        }
    }
}

/// The closed set of input shapes a field can take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum FieldKind {
    /// A single bounded number input with an optional unit annotation.
    Numeric { bounds: Bounds, unit: Option<String> },
    /// Two mutually exclusive options, `No`/`Yes` unless overridden.
    BinaryChoice { options: Vec<ChoiceOption> },
    /// Three or more mutually exclusive options.
    MultiChoice { options: Vec<ChoiceOption> },
    /// Single-line input when `rows == 1`, otherwise a textarea.
    FreeText { rows: u8 },
    /// Age in years with a "use current age" action for appointment `sequence_number`.
    DerivedAge { bounds: Bounds, sequence_number: u32 },
}

impl FieldKind {
    pub fn numeric(step: &str, unit: Option<&str>) -> Self {
        FieldKind::Numeric {
            bounds: Bounds::with_step(step),
            unit: unit.map(str::to_string),
        }
    }

    pub fn binary() -> Self {
        FieldKind::BinaryChoice {
            options: vec![ChoiceOption::new("0", "No"), ChoiceOption::new("1", "Yes")],
        }
    }

    pub fn binary_with(no: (&str, &str), yes: (&str, &str)) -> Self {
        FieldKind::BinaryChoice {
            options: vec![ChoiceOption::new(no.0, no.1), ChoiceOption::new(yes.0, yes.1)],
        }
    }

    pub fn multi(options: &[(&str, &str)]) -> Self {
        FieldKind::MultiChoice {
            options: options
                .iter()
                .map(|(code, label)| ChoiceOption::new(code, label))
                .collect(),
        }
    }

    pub fn options(&self) -> Option<&[ChoiceOption]> {
        match self {
            FieldKind::BinaryChoice { options } | FieldKind::MultiChoice { options } => {
                Some(options)
            }
            _ => None,
        }
    }

    pub fn is_choice(&self) -> bool {
        self.options().is_some()
    }
}

/// Declarative description of one form field and its current state.
///
/// This is the view-model: input handlers mutate it directly, rendering is a
/// projection of it and collection reads it. `unknown == true` always implies
/// `value == None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldDescriptor {
    /// Element id in the rendered markup; also the submitted form name.
    pub id: String,
    /// Clinical field key used when collecting values.
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    pub value: Option<ClinicalValue>,
    pub unknown: bool,
    pub required: bool,
    pub placeholder: String,
}

impl FieldDescriptor {
    pub fn new(id: impl Into<String>, key: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            key: key.to_string(),
            label: label.to_string(),
            kind,
            value: None,
            unknown: false,
            required: false,
            placeholder: String::new(),
        }
    }

    pub fn with_value(mut self, value: Option<ClinicalValue>) -> Self {
        self.value = value;
        self
    }

    /// Start marked unknown; any value is dropped.
    pub fn with_unknown(mut self, unknown: bool) -> Self {
        self.unknown = unknown;
        if unknown {
            self.value = None;
        }
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn unknown_id(&self) -> String {
        format!("{}_unknown", self.id)
    }

    pub fn option_id(&self, code: &str) -> String {
        format!("{}_{code}", self.id)
    }

    /// The current semantic value: the selected code for choice kinds, the raw
    /// unparsed text otherwise.
    pub fn extract_value(&self) -> Option<&ClinicalValue> {
        self.value.as_ref()
    }

    /// Apply raw input from the field's control.
    ///
    /// Blank input clears the value. Choice kinds only accept one of their
    /// option codes, so at most one option is ever selected.
    pub fn set_input(&mut self, raw: &str) -> Result<(), FormError> {
        let value = ClinicalValue::parse(raw);
        if self.unknown {
            if value.is_none() {
                return Ok(());
            }
            return Err(FormError::FieldDisabled {
                field: self.id.clone(),
            });
        }
        if let (Some(options), Some(v)) = (self.kind.options(), &value)
            && !options.iter().any(|o| o.code == v.as_str())
        {
            return Err(FormError::UnknownOption {
                field: self.id.clone(),
                code: v.to_string(),
            });
        }
        self.value = value;
        Ok(())
    }
}
