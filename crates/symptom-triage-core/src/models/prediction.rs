//! Prediction and scheduling results returned to callers.

use serde::{Deserialize, Serialize};

use super::RiskLevel;

/// Outcome of a disease prediction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub disease: String,
    /// Percentage in [0, 100], 2 decimals
    pub confidence: f64,
    pub risk_level: RiskLevel,
    pub recommendations: Vec<String>,
}

/// Suggested appointment slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSuggestion {
    /// Priority label (the normalized risk level)
    pub priority: RiskLevel,
    /// ISO date, `YYYY-MM-DD`
    pub suggested_date: String,
    /// `HH:MM`; always the first of `available_slots`
    pub suggested_time: String,
    pub available_slots: Vec<String>,
}
