//! Free-text symptom normalizer.
//!
//! Maps reported symptoms ("Feverr", " sore throat ") onto the canonical
//! vocabulary. Candidates are ranked by [`sequence_ratio`]; equal ratios
//! fall back to normalized Levenshtein similarity, then vocabulary order.

use strsim::normalized_levenshtein;

use super::similarity::sequence_ratio;
use super::Vocabulary;

/// Minimum similarity for a fuzzy match to be accepted.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.7;

/// Best vocabulary match for a reported symptom.
#[derive(Debug, Clone, PartialEq)]
pub struct SymptomMatch {
    /// Canonical vocabulary token
    pub token: String,
    /// Similarity in [0.0, 1.0]
    pub similarity: f64,
}

/// Normalizer for reported symptoms.
#[derive(Debug, Clone)]
pub struct SymptomNormalizer {
    /// Canonical tokens in vocabulary order
    tokens: Vec<String>,
    threshold: f64,
}

impl SymptomNormalizer {
    /// Create a normalizer over the given vocabulary with the default threshold.
    pub fn new(vocabulary: &Vocabulary) -> Self {
        Self {
            tokens: vocabulary.tokens().to_vec(),
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }

    /// Override the acceptance threshold (clamped to [0.0, 1.0]).
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Normalize a reported symptom to a vocabulary token.
    ///
    /// Returns `None` when nothing in the vocabulary is similar enough.
    pub fn normalize(&self, raw: &str) -> Option<String> {
        self.best_match(raw)
            .filter(|m| m.similarity >= self.threshold)
            .map(|m| m.token)
    }

    /// Closest vocabulary token regardless of threshold.
    pub fn best_match(&self, raw: &str) -> Option<SymptomMatch> {
        let query = raw.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }

        if let Some(exact) = self.tokens.iter().find(|t| **t == query) {
            return Some(SymptomMatch {
                token: exact.clone(),
                similarity: 1.0,
            });
        }

        let mut best: Option<(&String, f64, f64)> = None;
        for token in &self.tokens {
            let ratio = sequence_ratio(token, &query);
            let edit = normalized_levenshtein(token, &query);
            let better = best.map_or(true, |(_, best_ratio, best_edit)| {
                ratio > best_ratio || (ratio == best_ratio && edit > best_edit)
            });
            if better {
                best = Some((token, ratio, edit));
            }
        }

        best.map(|(token, similarity, _)| SymptomMatch {
            token: token.clone(),
            similarity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::KnowledgeBase;

    fn normalizer() -> SymptomNormalizer {
        SymptomNormalizer::new(&Vocabulary::from_knowledge_base(&KnowledgeBase::builtin()))
    }

    #[test]
    fn test_exact_tokens_normalize_to_themselves() {
        let normalizer = normalizer();
        for token in Vocabulary::from_knowledge_base(&KnowledgeBase::builtin()).tokens() {
            assert_eq!(normalizer.normalize(token).as_deref(), Some(token.as_str()));
        }
    }

    #[test]
    fn test_case_and_whitespace() {
        let normalizer = normalizer();
        assert_eq!(normalizer.normalize("  Sore Throat ").as_deref(), Some("sore throat"));
        assert_eq!(normalizer.normalize("FEVER").as_deref(), Some("fever"));
    }

    #[test]
    fn test_typos_within_threshold() {
        let normalizer = normalizer();
        assert_eq!(normalizer.normalize("feverr").as_deref(), Some("fever"));
        assert_eq!(normalizer.normalize("head ache").as_deref(), Some("headache"));
        assert_eq!(normalizer.normalize("caugh").as_deref(), Some("cough"));
        assert_eq!(
            normalizer.normalize("shortness of breth").as_deref(),
            Some("shortness of breath")
        );
        assert_eq!(normalizer.normalize("chest pains").as_deref(), Some("chest pain"));
    }

    #[test]
    fn test_dissimilar_input_is_rejected() {
        let normalizer = normalizer();
        assert_eq!(normalizer.normalize("banana"), None);
        assert_eq!(normalizer.normalize("xyz"), None);
        assert_eq!(normalizer.normalize(""), None);
        assert_eq!(normalizer.normalize("   "), None);
    }

    #[test]
    fn test_best_match_reports_similarity() {
        let normalizer = normalizer();
        let m = normalizer.best_match("feverr").unwrap();
        assert_eq!(m.token, "fever");
        assert!((m.similarity - 10.0 / 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_inflections_and_word_swaps() {
        let normalizer = normalizer();
        assert_eq!(normalizer.normalize("coughing").as_deref(), Some("cough"));
        assert_eq!(normalizer.normalize("stomach ache").as_deref(), Some("stomach pain"));
        assert_eq!(normalizer.normalize("chest ache").as_deref(), Some("chest pain"));
        assert_eq!(normalizer.normalize("joint ache").as_deref(), Some("joint pain"));
    }

    #[test]
    fn test_custom_threshold() {
        let strict = normalizer().with_threshold(0.95);
        assert_eq!(strict.normalize("feverr"), None);
        assert_eq!(strict.normalize("fever").as_deref(), Some("fever"));

        let clamped = normalizer().with_threshold(3.0);
        assert_eq!(clamped.threshold(), 1.0);
    }
}
