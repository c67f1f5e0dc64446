use std::str::FromStr;

use thiserror::Error;

/// What a `POST /form` submission asks for, from its `action` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    /// Only keep the submitted inputs.
    Apply,
    Save,
    Calculate,
    Predict,
    AddAppointment,
    UseCurrentAge(u32),
    ToggleCollapse(u32),
    /// Select the model named by the `model_name` field.
    SelectModel,
}

#[derive(Debug, Error)]
#[error("unrecognised form action '{0}'")]
pub struct UnknownAction(pub String);

impl FromStr for FormAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let numbered = |rest: &str| {
            rest.parse::<u32>()
                .map_err(|_| UnknownAction(s.to_string()))
        };
        match s {
            "" | "apply" => Ok(FormAction::Apply),
            "save" => Ok(FormAction::Save),
            "calculate" => Ok(FormAction::Calculate),
            "predict" => Ok(FormAction::Predict),
            "add_appointment" => Ok(FormAction::AddAppointment),
            "select_model" => Ok(FormAction::SelectModel),
            other => {
                if let Some(rest) = other.strip_prefix("use_age:") {
                    numbered(rest).map(FormAction::UseCurrentAge)
                } else if let Some(rest) = other.strip_prefix("collapse:") {
                    numbered(rest).map(FormAction::ToggleCollapse)
                } else {
                    Err(UnknownAction(s.to_string()))
                }
            }
        }
    }
}
