use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

use crate::error::CoreError;
use crate::features::{self, field};

use super::appointment::AppointmentEntry;
use super::value::ClinicalValue;

/// The clinical payload stored under `patient_data` by the patient API.
///
/// Every clinical field is optional; `None` is sent as an explicit `null` so
/// the collaborator overwrites stale values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct PatientData {
    pub patient_name: Option<ClinicalValue>,
    pub date_of_birth: Option<ClinicalValue>,

    // Initial visit
    pub age_onset: Option<ClinicalValue>,
    pub heredity: Option<ClinicalValue>,
    pub smoking_status: Option<ClinicalValue>,
    pub sex: Option<ClinicalValue>,
    pub us1_thyroid_volume: Option<ClinicalValue>,
    pub us1_nodules: Option<ClinicalValue>,
    pub us1_nodules_cm: Option<ClinicalValue>,
    pub tsh_1: Option<ClinicalValue>,
    pub ft4_1: Option<ClinicalValue>,
    pub ft3_1: Option<ClinicalValue>,
    pub ft3_to_ft4_ratio: Option<ClinicalValue>,
    pub exophthalmos: Option<ClinicalValue>,
    pub thyrotoxic_cardiomyopathy: Option<ClinicalValue>,

    // After treatment
    pub treatment_type: Option<ClinicalValue>,
    pub tsh_3: Option<ClinicalValue>,
    pub us3_thyroid_volume: Option<ClinicalValue>,
    pub us3_nodules: Option<ClinicalValue>,
    pub us3_nodules_cm: Option<ClinicalValue>,

    /// Some stored records carry `null` here; it reads as no appointments.
    #[serde(deserialize_with = "null_as_empty")]
    pub appointments: Vec<AppointmentEntry>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<AppointmentEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<AppointmentEntry>>::deserialize(deserializer)?.unwrap_or_default())
}

impl PatientData {
    fn slot(&self, key: &str) -> Option<&Option<ClinicalValue>> {
        Some(match key {
            field::PATIENT_NAME => &self.patient_name,
            field::DATE_OF_BIRTH => &self.date_of_birth,
            field::AGE_ONSET => &self.age_onset,
            field::HEREDITY => &self.heredity,
            field::SMOKING_STATUS => &self.smoking_status,
            field::SEX => &self.sex,
            field::US1_THYROID_VOLUME => &self.us1_thyroid_volume,
            field::US1_NODULES => &self.us1_nodules,
            field::US1_NODULES_CM => &self.us1_nodules_cm,
            field::TSH_1 => &self.tsh_1,
            field::FT4_1 => &self.ft4_1,
            field::FT3_1 => &self.ft3_1,
            field::FT3_TO_FT4_RATIO => &self.ft3_to_ft4_ratio,
            field::EXOPHTHALMOS => &self.exophthalmos,
            field::THYROTOXIC_CARDIOMYOPATHY => &self.thyrotoxic_cardiomyopathy,
            field::TREATMENT_TYPE => &self.treatment_type,
            field::TSH_3 => &self.tsh_3,
            field::US3_THYROID_VOLUME => &self.us3_thyroid_volume,
            field::US3_NODULES => &self.us3_nodules,
            field::US3_NODULES_CM => &self.us3_nodules_cm,
            _ => return None,
        })
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut Option<ClinicalValue>> {
        Some(match key {
            field::PATIENT_NAME => &mut self.patient_name,
            field::DATE_OF_BIRTH => &mut self.date_of_birth,
            field::AGE_ONSET => &mut self.age_onset,
            field::HEREDITY => &mut self.heredity,
            field::SMOKING_STATUS => &mut self.smoking_status,
            field::SEX => &mut self.sex,
            field::US1_THYROID_VOLUME => &mut self.us1_thyroid_volume,
            field::US1_NODULES => &mut self.us1_nodules,
            field::US1_NODULES_CM => &mut self.us1_nodules_cm,
            field::TSH_1 => &mut self.tsh_1,
            field::FT4_1 => &mut self.ft4_1,
            field::FT3_1 => &mut self.ft3_1,
            field::FT3_TO_FT4_RATIO => &mut self.ft3_to_ft4_ratio,
            field::EXOPHTHALMOS => &mut self.exophthalmos,
            field::THYROTOXIC_CARDIOMYOPATHY => &mut self.thyrotoxic_cardiomyopathy,
            field::TREATMENT_TYPE => &mut self.treatment_type,
            field::TSH_3 => &mut self.tsh_3,
            field::US3_THYROID_VOLUME => &mut self.us3_thyroid_volume,
            field::US3_NODULES => &mut self.us3_nodules,
            field::US3_NODULES_CM => &mut self.us3_nodules_cm,
            _ => return None,
        })
    }

    /// Current value of a field; blank strings count as missing.
    pub fn get(&self, key: &str) -> Option<&ClinicalValue> {
        self.slot(key)
            .and_then(Option::as_ref)
            .filter(|v| !v.as_str().trim().is_empty())
    }

    pub fn set(&mut self, key: &str, value: Option<ClinicalValue>) -> Result<(), CoreError> {
        let slot = self
            .slot_mut(key)
            .ok_or_else(|| CoreError::UnknownField(key.to_string()))?;
        *slot = value;
        Ok(())
    }

    pub fn has_follow_up_data(&self) -> bool {
        features::FOLLOW_UP_MARKERS
            .iter()
            .any(|key| self.get(key).is_some())
    }

    /// Parsed date of birth, `None` when not entered.
    pub fn birth_date(&self) -> Result<Option<jiff::civil::Date>, CoreError> {
        self.get(field::DATE_OF_BIRTH)
            .map(|v| crate::age::parse_date(v.as_str()))
            .transpose()
    }
}

/// A patient as listed by the patient API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Patient {
    pub id: String,
    pub patient_data: PatientData,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

const ENVELOPE_KEYS: [&str; 4] = ["id", "patient_data", "created_at", "updated_at"];

impl Patient {
    /// Decode one entry of `GET /api/patients`.
    ///
    /// Older records carry clinical fields at the top level; newer ones nest
    /// them under `patient_data`. Both are merged, with `patient_data` taking
    /// precedence.
    pub fn from_api_value(value: Value) -> Result<Self, CoreError> {
        let Value::Object(mut obj) = value else {
            return Err(CoreError::NotAnObject("patient"));
        };

        let id = match obj.remove("id") {
            Some(Value::String(s)) => s,
            Some(Value::Number(n)) => n.to_string(),
            _ => return Err(CoreError::UnknownField("id".to_string())),
        };
        let created_at = take_string(&mut obj, "created_at");
        let updated_at = take_string(&mut obj, "updated_at");
        let nested = obj.remove("patient_data");

        let mut merged: Map<String, Value> = obj
            .into_iter()
            .filter(|(k, _)| !ENVELOPE_KEYS.contains(&k.as_str()))
            .collect();
        match nested {
            Some(Value::Object(inner)) => merged.extend(inner),
            Some(Value::Null) | None => {}
            Some(_) => return Err(CoreError::NotAnObject("patient_data")),
        }

        let patient_data: PatientData = serde_json::from_value(Value::Object(merged))?;
        Ok(Self {
            id,
            patient_data,
            created_at,
            updated_at,
        })
    }

    pub fn display_name(&self) -> String {
        self.patient_data
            .get(field::PATIENT_NAME)
            .map(|v| v.to_string())
            .unwrap_or_else(|| format!("Patient {}", self.id))
    }

    /// Stamp `updated_at` after a confirmed save.
    pub fn touch(&mut self) {
        self.updated_at = Some(jiff::Timestamp::now().to_string());
    }
}

fn take_string(obj: &mut Map<String, Value>, key: &str) -> Option<String> {
    match obj.remove(key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}
