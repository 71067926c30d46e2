//! End-to-end prediction pipeline.
//!
//! Reported symptoms → Normalizer → Encoder → Classifier → Risk Scorer

use thiserror::Error;

use crate::classifier::ModelError;
use crate::model::{ModelSource, TrainedModel};
use crate::models::{PatientReport, Prediction, RiskLevel};
use crate::resolver::SymptomResolver;
use crate::risk::RiskScorer;

#[derive(Error, Debug)]
pub enum PredictError {
    #[error("Symptoms list required")]
    NoSymptoms,

    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}

/// Turns a patient report into a prediction.
///
/// Request handlers depend on this rather than on [`Predictor`] so a
/// different model can be put behind them.
pub trait PredictionService: Send + Sync {
    fn predict(&self, report: &PatientReport) -> Result<Prediction, PredictError>;

    /// True once a usable model is in place.
    fn is_ready(&self) -> bool;
}

/// Immutable prediction service shared by all requests.
#[derive(Debug)]
pub struct Predictor {
    model: TrainedModel,
    scorer: RiskScorer,
    source: ModelSource,
}

impl Predictor {
    pub fn new(model: TrainedModel, scorer: RiskScorer, source: ModelSource) -> Self {
        Self {
            model,
            scorer,
            source,
        }
    }

    /// Predict a disease and risk level for a patient report.
    pub fn predict(&self, report: &PatientReport) -> Result<Prediction, PredictError> {
        if report.symptoms.is_empty() {
            return Err(PredictError::NoSymptoms);
        }

        let resolver = SymptomResolver::new(self.model.vocabulary());
        let resolved = resolver.resolve(&report.symptoms);

        if !resolved.unrecognized.is_empty() {
            tracing::debug!(unrecognized = ?resolved.unrecognized, "Dropping unrecognized symptoms");
        }
        if resolved.is_empty() {
            tracing::debug!("No symptoms recognized; predicting from an empty profile");
        }

        let class = self.model.predict(&resolved.features)?;
        let risk_level = self.scorer.assess(
            &class.disease,
            report.age,
            report.history_len(),
            class.confidence,
        );

        Ok(Prediction {
            recommendations: recommendations(&class.disease, risk_level),
            disease: class.disease,
            confidence: class.confidence,
            risk_level,
        })
    }

    pub fn model(&self) -> &TrainedModel {
        &self.model
    }

    pub fn source(&self) -> ModelSource {
        self.source
    }
}

impl PredictionService for Predictor {
    fn predict(&self, report: &PatientReport) -> Result<Prediction, PredictError> {
        Predictor::predict(self, report)
    }

    fn is_ready(&self) -> bool {
        self.model.n_trees() > 0
    }
}

/// Ordered advice for a prediction.
pub fn recommendations(disease: &str, risk: RiskLevel) -> Vec<String> {
    let mut out = vec![
        format!("Consult a doctor regarding possible {disease}."),
        "Stay hydrated and monitor symptoms.".to_string(),
        "Follow prescribed medication if any.".to_string(),
    ];
    if risk.is_urgent() {
        out.push("Immediate medical consultation recommended.".to_string());
    }
    out
}
