//! Synthetic training data derived from the knowledge base.

use crate::knowledge::KnowledgeBase;
use crate::resolver::Vocabulary;

use super::{LabelEncoder, ModelError};

/// Number of copies of each disease profile in the default training set.
pub const DEFAULT_REPLICAS: usize = 100;

/// Feature rows with their class ids.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSet {
    pub features: Vec<Vec<f64>>,
    pub labels: Vec<usize>,
    pub n_classes: usize,
}

impl TrainingSet {
    /// Replicate every disease's full symptom profile `replicas` times.
    ///
    /// There is no noise: all samples for a disease are identical.
    pub fn synthetic(
        kb: &KnowledgeBase,
        vocabulary: &Vocabulary,
        labels: &LabelEncoder,
        replicas: usize,
    ) -> Result<Self, ModelError> {
        if replicas == 0 {
            return Err(ModelError::EmptyTrainingSet);
        }

        let mut features = Vec::with_capacity(kb.len() * replicas);
        let mut targets = Vec::with_capacity(kb.len() * replicas);

        for entry in kb.entries() {
            let class_id = labels
                .encode(&entry.name)
                .ok_or_else(|| ModelError::UnknownLabel(entry.name.clone()))?;
            let row = vocabulary.encode(&entry.symptoms);
            for _ in 0..replicas {
                features.push(row.clone());
                targets.push(class_id);
            }
        }

        Ok(Self {
            features,
            labels: targets,
            n_classes: labels.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Width of each feature row.
    pub fn n_features(&self) -> usize {
        self.features.first().map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_shape() {
        let kb = KnowledgeBase::builtin();
        let vocab = Vocabulary::from_knowledge_base(&kb);
        let labels = LabelEncoder::fit(kb.diseases());

        let set = TrainingSet::synthetic(&kb, &vocab, &labels, 50).unwrap();

        assert_eq!(set.len(), 500);
        assert_eq!(set.n_features(), vocab.len());
        assert_eq!(set.n_classes, 10);

        let cold = labels.encode("Common Cold").unwrap();
        let cold_rows: Vec<_> = set
            .features
            .iter()
            .zip(&set.labels)
            .filter(|(_, &l)| l == cold)
            .map(|(f, _)| f)
            .collect();
        assert_eq!(cold_rows.len(), 50);
        assert!(cold_rows.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(cold_rows[0].iter().sum::<f64>(), 5.0);
    }

    #[test]
    fn test_zero_replicas_rejected() {
        let kb = KnowledgeBase::builtin();
        let vocab = Vocabulary::from_knowledge_base(&kb);
        let labels = LabelEncoder::fit(kb.diseases());

        assert!(matches!(
            TrainingSet::synthetic(&kb, &vocab, &labels, 0),
            Err(ModelError::EmptyTrainingSet)
        ));
    }
}
