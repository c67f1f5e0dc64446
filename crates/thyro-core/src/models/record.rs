use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::value::ClinicalValue;

/// Flat mapping of field key to raw value, as produced by collecting a form.
///
/// Absence means "missing": blank input and fields marked unknown are never
/// stored, so every entry holds real content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FlatRecord(BTreeMap<String, ClinicalValue>);

impl FlatRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(ClinicalValue::as_str)
    }

    pub fn value(&self, key: &str) -> Option<&ClinicalValue> {
        self.0.get(key)
    }

    /// Numeric reading of a field; missing or unparseable values yield `None`.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(ClinicalValue::as_f64)
    }

    /// Whether a categorical field holds exactly `code`.
    pub fn is(&self, key: &str, code: &str) -> bool {
        self.get(key) == Some(code)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Store a value, or remove the key when `value` is `None`.
    pub fn set(&mut self, key: impl Into<String>, value: Option<ClinicalValue>) {
        let key = key.into();
        match value {
            Some(v) => {
                self.0.insert(key, v);
            }
            None => {
                self.0.remove(&key);
            }
        }
    }

    /// Store raw text input; blank text removes the key.
    pub fn set_raw(&mut self, key: impl Into<String>, raw: &str) {
        self.set(key, ClinicalValue::parse(raw));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClinicalValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, ClinicalValue)> for FlatRecord {
    fn from_iter<I: IntoIterator<Item = (K, ClinicalValue)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
