use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::record::FlatRecord;
use super::value::ClinicalValue;

/// One stored appointment inside a patient's `patient_data.appointments`.
///
/// A key present with `null` records an explicitly unknown value and an empty
/// string records a field left blank. A missing key means the value was never
/// captured.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AppointmentEntry {
    #[serde(default)]
    pub date: Option<jiff::civil::Date>,
    #[serde(default)]
    pub values: BTreeMap<String, Option<ClinicalValue>>,
}

/// How a single field appears in a stored appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Datum<'a> {
    Absent,
    Null,
    Blank,
    Value(&'a ClinicalValue),
}

impl AppointmentEntry {
    pub fn datum(&self, key: &str) -> Datum<'_> {
        match self.values.get(key) {
            None => Datum::Absent,
            Some(None) => Datum::Null,
            Some(Some(value)) if value.as_str().trim().is_empty() => Datum::Blank,
            Some(Some(value)) => Datum::Value(value),
        }
    }

    /// Build an entry from collected values. Keys in `unknown` are stored as
    /// explicit nulls and keys in `blank` as empty strings.
    pub fn from_record<'a>(
        date: jiff::civil::Date,
        record: &FlatRecord,
        unknown: impl IntoIterator<Item = &'a str>,
        blank: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut values: BTreeMap<String, Option<ClinicalValue>> = blank
            .into_iter()
            .map(|k| (k.to_string(), Some(ClinicalValue::from(""))))
            .collect();
        values.extend(record.iter().map(|(k, v)| (k.to_string(), Some(v.clone()))));
        for key in unknown {
            values.insert(key.to_string(), None);
        }
        Self {
            date: Some(date),
            values,
        }
    }
}
