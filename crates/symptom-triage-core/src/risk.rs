//! Additive risk scoring.
//!
//! Points:
//! - +3 if the predicted disease is in the high-risk set
//! - +2 if age > 60, +1 if 40 < age <= 60
//! - +1 per history entry, capped at 3
//! - −1 if confidence < 50
//!
//! Total ≥ 5 → critical, ≥ 3 → high, ≥ 2 → medium, otherwise low.

use std::collections::BTreeSet;

use crate::models::RiskLevel;

/// Diseases that carry extra risk points by default.
pub const DEFAULT_HIGH_RISK_DISEASES: [&str; 4] = ["Diabetes", "Hypertension", "Pneumonia", "Asthma"];

const HIGH_RISK_DISEASE_POINTS: i32 = 3;
const MAX_HISTORY_POINTS: usize = 3;
const LOW_CONFIDENCE_CUTOFF: f64 = 50.0;

/// Deterministic rule engine mapping a prediction to a risk level.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskScorer {
    high_risk: BTreeSet<String>,
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self::new(DEFAULT_HIGH_RISK_DISEASES)
    }
}

impl RiskScorer {
    /// Create a scorer with a custom high-risk disease set.
    pub fn new<I, S>(high_risk: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            high_risk: high_risk.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_high_risk(&self, disease: &str) -> bool {
        self.high_risk.contains(disease)
    }

    /// Raw additive score.
    pub fn score(&self, disease: &str, age: i64, history_len: usize, confidence: f64) -> i32 {
        let mut score = 0;

        if self.is_high_risk(disease) {
            score += HIGH_RISK_DISEASE_POINTS;
        }

        if age > 60 {
            score += 2;
        } else if age > 40 {
            score += 1;
        }

        score += history_len.min(MAX_HISTORY_POINTS) as i32;

        if confidence < LOW_CONFIDENCE_CUTOFF {
            score -= 1;
        }

        score
    }

    /// Risk level for a prediction.
    pub fn assess(&self, disease: &str, age: i64, history_len: usize, confidence: f64) -> RiskLevel {
        level_for_score(self.score(disease, age, history_len, confidence))
    }
}

/// Map a raw score onto the four risk levels.
pub fn level_for_score(score: i32) -> RiskLevel {
    match score {
        s if s >= 5 => RiskLevel::Critical,
        s if s >= 3 => RiskLevel::High,
        2 => RiskLevel::Medium,
        _ => RiskLevel::Low,
    }
}
