//! Trained model and its lifecycle.
//!
//! On startup the persisted artifact is loaded if present; otherwise the
//! classifier is trained from the knowledge base and persisted. A loaded
//! artifact is used as-is even if the knowledge base has since changed.

mod store;

pub use store::*;

use thiserror::Error;

use crate::classifier::{
    argmax, to_percent, ClassPrediction, ForestConfig, LabelEncoder, ModelError, RandomForest,
    TrainingSet, DEFAULT_REPLICAS,
};
use crate::knowledge::KnowledgeBase;
use crate::resolver::Vocabulary;

/// Lifecycle errors.
#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error("Training failed: {0}")]
    Training(#[from] ModelError),

    #[error("Model store error: {0}")]
    Store(#[from] StoreError),
}

/// Training parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainingConfig {
    /// Copies of each disease profile in the training set
    pub replicas: usize,
    pub forest: ForestConfig,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            replicas: DEFAULT_REPLICAS,
            forest: ForestConfig::default(),
        }
    }
}

/// Classifier plus the vocabulary and label mapping it was trained with.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainedModel {
    pub(crate) vocabulary: Vocabulary,
    pub(crate) labels: LabelEncoder,
    pub(crate) forest: RandomForest,
    /// Fingerprint of the knowledge base at training time
    pub(crate) fingerprint: String,
    /// RFC 3339 training timestamp
    pub(crate) trained_at: String,
}

impl TrainedModel {
    /// Train a fresh model from the knowledge base.
    pub fn train(kb: &KnowledgeBase, config: &TrainingConfig) -> Result<Self, ModelError> {
        let vocabulary = Vocabulary::from_knowledge_base(kb);
        let labels = LabelEncoder::fit(kb.diseases());
        let data = TrainingSet::synthetic(kb, &vocabulary, &labels, config.replicas)?;

        tracing::debug!(
            samples = data.len(),
            features = data.n_features(),
            classes = data.n_classes,
            trees = config.forest.n_trees,
            "Training disease classifier"
        );

        let forest = RandomForest::fit(&data, &config.forest)?;

        Ok(Self {
            vocabulary,
            labels,
            forest,
            fingerprint: kb.fingerprint(),
            trained_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    /// Predict the most likely disease for a feature vector.
    ///
    /// An all-zero vector still yields a prediction; there is no "unknown"
    /// class.
    pub fn predict(&self, features: &[f64]) -> Result<ClassPrediction, ModelError> {
        let proba = self.forest.predict_proba(features)?;
        let class_id = argmax(&proba).ok_or(ModelError::EmptyTrainingSet)?;
        let disease = self
            .labels
            .decode(class_id)
            .ok_or(ModelError::UnknownClass(class_id))?;

        Ok(ClassPrediction {
            disease: disease.to_string(),
            confidence: to_percent(proba[class_id]),
        })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn labels(&self) -> &LabelEncoder {
        &self.labels
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn trained_at(&self) -> &str {
        &self.trained_at
    }

    pub fn n_trees(&self) -> usize {
        self.forest.n_trees()
    }
}

/// Where the active model came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSource {
    /// Reloaded from the persisted artifact
    Loaded,
    /// Trained during this startup
    Trained,
}

/// Loads or trains the model once, before traffic is accepted.
pub struct ModelLifecycle<'a> {
    kb: &'a KnowledgeBase,
    config: &'a TrainingConfig,
    store: &'a ModelStore,
}

impl<'a> ModelLifecycle<'a> {
    pub fn new(kb: &'a KnowledgeBase, config: &'a TrainingConfig, store: &'a ModelStore) -> Self {
        Self { kb, config, store }
    }

    /// Load the persisted model, or train and persist a new one.
    ///
    /// `force_retrain` skips the load and overwrites the artifact.
    pub fn initialize(&self, force_retrain: bool) -> Result<(TrainedModel, ModelSource), LifecycleError> {
        if !force_retrain {
            if let Some(model) = self.store.load()? {
                if model.fingerprint != self.kb.fingerprint() {
                    tracing::warn!(
                        path = %self.store.path().display(),
                        "Persisted model was trained on a different knowledge base; using it anyway"
                    );
                }
                tracing::info!(
                    path = %self.store.path().display(),
                    trained_at = %model.trained_at,
                    "Model loaded from file"
                );
                return Ok((model, ModelSource::Loaded));
            }
        }

        let model = TrainedModel::train(self.kb, self.config)?;
        self.store.save(&model)?;
        tracing::info!(
            path = %self.store.path().display(),
            vocabulary = model.vocabulary.len(),
            classes = model.labels.len(),
            "Model trained and saved"
        );

        Ok((model, ModelSource::Trained))
    }
}
