use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Below 30 is low, below 60 medium, anything else high.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..30 => RiskTier::Low,
            30..60 => RiskTier::Medium,
            _ => RiskTier::High,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Low => "Low Risk",
            RiskTier::Medium => "Medium Risk",
            RiskTier::High => "High Risk",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            RiskTier::Low => {
                "Based on the patient data, there is a low risk of thyroid disease recurrence."
            }
            RiskTier::Medium => {
                "Based on the patient data, there is a moderate risk of thyroid disease recurrence."
            }
            RiskTier::High => {
                "Based on the patient data, there is a high risk of thyroid disease recurrence."
            }
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            RiskTier::Low => "Continue standard follow-up annually",
            RiskTier::Medium => "Continue monitoring every 6 months",
            RiskTier::High => {
                "Consider additional treatment options and monitor every 3 months"
            }
        }
    }

    /// CSS class suffix used by the result panel.
    pub fn css_class(self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        }
    }
}
