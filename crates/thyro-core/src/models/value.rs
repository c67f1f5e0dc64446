use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A raw clinical value as typed into a form field.
///
/// Values are kept in their unparsed string form; numeric coercion is the
/// scorer's job. On the wire the collaborator may hand back strings, numbers
/// or booleans for the same field depending on who wrote it last, so
/// deserialization accepts all three and normalises them to text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, TS)]
#[ts(export)]
pub struct ClinicalValue(String);

impl ClinicalValue {
    /// Wrap raw input, returning `None` for blank content.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric interpretation, `None` when the text is not a finite number.
    pub fn as_f64(&self) -> Option<f64> {
        self.0.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

impl fmt::Display for ClinicalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClinicalValue {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for ClinicalValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ClinicalValueVisitor)
    }
}

struct ClinicalValueVisitor;

impl Visitor<'_> for ClinicalValueVisitor {
    type Value = ClinicalValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number or boolean")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ClinicalValue, E> {
        Ok(ClinicalValue(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<ClinicalValue, E> {
        Ok(ClinicalValue(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<ClinicalValue, E> {
        Ok(ClinicalValue(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<ClinicalValue, E> {
        Ok(ClinicalValue(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<ClinicalValue, E> {
        Ok(ClinicalValue(v.to_string()))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<ClinicalValue, E> {
        Ok(ClinicalValue(if v { "1" } else { "0" }.to_string()))
    }
}
