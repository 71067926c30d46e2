//! Disease classifier: synthetic training data, label encoding, random forest.

mod dataset;
mod forest;
mod labels;
mod tree;

pub use dataset::*;
pub use forest::*;
pub use labels::*;
pub use tree::*;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classifier errors.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Training set is empty")]
    EmptyTrainingSet,

    #[error("Invalid training configuration: {0}")]
    InvalidConfig(String),

    #[error("Label not in encoder: {0}")]
    UnknownLabel(String),

    #[error("Class id {0} has no label")]
    UnknownClass(usize),

    #[error("Feature vector has width {got}, expected {expected}")]
    FeatureWidth { expected: usize, got: usize },
}

/// Arg-max class of a predicted distribution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassPrediction {
    /// Disease name
    pub disease: String,
    /// Probability of `disease` as a percentage, rounded to 2 decimals
    pub confidence: f64,
}

/// Index of the largest probability; ties go to the lowest class id.
pub fn argmax(proba: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &p) in proba.iter().enumerate() {
        if best.map_or(true, |(_, bp)| p > bp) {
            best = Some((i, p));
        }
    }
    best.map(|(i, _)| i)
}

/// Probability → percentage with 2 decimals.
pub fn to_percent(probability: f64) -> f64 {
    (probability * 100.0 * 100.0).round() / 100.0
}
