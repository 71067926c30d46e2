//! Symptom-Triage Core Library
//!
//! Symptom-based disease prediction with risk scoring and appointment
//! prioritization.
//!
//! # Architecture
//!
//! ```text
//! Reported symptoms → Normalization → Encoding → Classification
//!                                                      │
//!                                          (disease, confidence)
//!                                                      │
//!                                    age, history → Risk Scoring
//!                                                      │
//!                                        Prediction + Recommendations
//!
//! Risk level + preferred date → Scheduler → Suggested slot
//! ```
//!
//! # Core Principle
//!
//! **The model is built once and never mutated.** It is loaded or trained
//! before traffic is accepted and then shared read-only by every request.
//!
//! # Modules
//!
//! - [`knowledge`]: Disease → symptom dictionary
//! - [`resolver`]: Fuzzy symptom normalizer and feature encoder
//! - [`classifier`]: Synthetic training data and random forest
//! - [`model`]: Trained model, artifact store, load-or-train lifecycle
//! - [`risk`]: Additive risk scoring
//! - [`scheduler`]: Appointment slot suggestion
//! - [`predictor`]: The end-to-end prediction pipeline

pub mod classifier;
pub mod knowledge;
pub mod model;
pub mod models;
pub mod predictor;
pub mod resolver;
pub mod risk;
pub mod scheduler;

// Re-export commonly used types
pub use classifier::{ClassPrediction, ForestConfig, LabelEncoder, ModelError, RandomForest};
pub use knowledge::{DiseaseEntry, KnowledgeBase, KnowledgeBaseError};
pub use model::{
    LifecycleError, ModelLifecycle, ModelSource, ModelStore, StoreError, TrainedModel,
    TrainingConfig,
};
pub use models::{PatientReport, Prediction, RiskLevel, ScheduleSuggestion};
pub use predictor::{PredictError, PredictionService, Predictor};
pub use resolver::{SymptomNormalizer, SymptomResolver, Vocabulary};
pub use risk::RiskScorer;
pub use scheduler::ScheduleError;
