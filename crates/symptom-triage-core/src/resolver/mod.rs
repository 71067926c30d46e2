//! Symptom resolution: free text → canonical tokens → feature vector.
//!
//! Pipeline: Normalization (per symptom) → Encoding (vector assembly)

mod normalizer;
mod similarity;
mod vocabulary;

pub use normalizer::*;
pub use similarity::sequence_ratio;
pub use vocabulary::*;

/// Outcome of resolving a list of reported symptoms.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSymptoms {
    /// Canonical tokens that were recognized, in input order
    pub recognized: Vec<String>,
    /// Reported symptoms that matched nothing
    pub unrecognized: Vec<String>,
    /// Binary presence vector over the vocabulary
    pub features: Vec<f64>,
}

impl ResolvedSymptoms {
    /// True when no reported symptom was recognized.
    ///
    /// The classifier still predicts in this case; callers only use this for
    /// logging.
    pub fn is_empty(&self) -> bool {
        self.recognized.is_empty()
    }
}

/// Coordinates the normalizer and the encoder.
#[derive(Debug, Clone)]
pub struct SymptomResolver<'a> {
    vocabulary: &'a Vocabulary,
    normalizer: SymptomNormalizer,
}

impl<'a> SymptomResolver<'a> {
    /// Create a resolver over the given vocabulary.
    pub fn new(vocabulary: &'a Vocabulary) -> Self {
        Self {
            vocabulary,
            normalizer: SymptomNormalizer::new(vocabulary),
        }
    }

    /// Resolve reported symptoms into canonical tokens and a feature vector.
    pub fn resolve<S: AsRef<str>>(&self, reported: &[S]) -> ResolvedSymptoms {
        let mut recognized = Vec::new();
        let mut unrecognized = Vec::new();

        for raw in reported {
            match self.normalizer.normalize(raw.as_ref()) {
                Some(token) => recognized.push(token),
                None => unrecognized.push(raw.as_ref().to_string()),
            }
        }

        let features = self.vocabulary.encode(&recognized);

        ResolvedSymptoms {
            recognized,
            unrecognized,
            features,
        }
    }

    /// Get the normalizer for direct access.
    pub fn normalizer(&self) -> &SymptomNormalizer {
        &self.normalizer
    }

    /// Get the vocabulary for direct access.
    pub fn vocabulary(&self) -> &Vocabulary {
        self.vocabulary
    }
}
