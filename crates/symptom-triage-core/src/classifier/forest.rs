//! Bagged ensemble of CART trees.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::{DecisionTree, ModelError, TrainingSet, TreeConfig};

/// Forest hyperparameters.
#[derive(Clone, Debug, PartialEq)]
pub struct ForestConfig {
    pub n_trees: usize,
    pub max_depth: Option<usize>,
    /// Seed for bootstrap sampling and feature subsampling
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 200,
            max_depth: None,
            seed: 42,
        }
    }
}

/// Random forest classifier producing class probability distributions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_classes: usize,
    n_features: usize,
}

impl RandomForest {
    /// Fit the forest. Identical inputs and seed give an identical forest.
    pub fn fit(data: &TrainingSet, config: &ForestConfig) -> Result<Self, ModelError> {
        if data.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }
        if config.n_trees == 0 {
            return Err(ModelError::InvalidConfig("n_trees must be positive".into()));
        }

        let n_samples = data.len();
        let n_features = data.n_features();
        let tree_config = TreeConfig {
            max_depth: config.max_depth,
            ..TreeConfig::for_features(n_features)
        };

        let mut rng = StdRng::seed_from_u64(config.seed);
        let trees = (0..config.n_trees)
            .map(|_| {
                let bootstrap: Vec<usize> =
                    (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect();
                DecisionTree::fit(
                    &data.features,
                    &data.labels,
                    &bootstrap,
                    data.n_classes,
                    &tree_config,
                    &mut rng,
                )
            })
            .collect();

        Ok(Self {
            trees,
            n_classes: data.n_classes,
            n_features,
        })
    }

    /// Mean of the per-tree leaf distributions.
    pub fn predict_proba(&self, sample: &[f64]) -> Result<Vec<f64>, ModelError> {
        if sample.len() != self.n_features {
            return Err(ModelError::FeatureWidth {
                expected: self.n_features,
                got: sample.len(),
            });
        }

        let mut proba = vec![0.0; self.n_classes];
        for tree in &self.trees {
            for (acc, p) in proba.iter_mut().zip(tree.predict_proba(sample)) {
                *acc += p;
            }
        }

        let n = self.trees.len() as f64;
        proba.iter_mut().for_each(|p| *p /= n);
        Ok(proba)
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }
}
