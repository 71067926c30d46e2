//! Disease → symptom knowledge base.
//!
//! The knowledge base is static: it is built once at process start and never
//! mutated. Everything downstream (vocabulary, label set, training data) is
//! derived from it.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Knowledge base validation errors.
#[derive(Error, Debug, PartialEq)]
pub enum KnowledgeBaseError {
    #[error("Knowledge base needs at least two diseases, got {0}")]
    TooFewDiseases(usize),

    #[error("Duplicate disease: {0}")]
    DuplicateDisease(String),

    #[error("Disease has no symptoms: {0}")]
    NoSymptoms(String),
}

/// A single disease with its canonical symptom tokens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiseaseEntry {
    /// Disease name (unique within a knowledge base)
    pub name: String,
    /// Canonical, lower-case symptom tokens
    pub symptoms: Vec<String>,
}

impl DiseaseEntry {
    pub fn new(name: impl Into<String>, symptoms: &[&str]) -> Self {
        Self {
            name: name.into(),
            symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Immutable mapping from disease name to its symptom list.
#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeBase {
    entries: Vec<DiseaseEntry>,
}

impl KnowledgeBase {
    /// Build a knowledge base from explicit entries.
    pub fn new(entries: Vec<DiseaseEntry>) -> Result<Self, KnowledgeBaseError> {
        if entries.len() < 2 {
            return Err(KnowledgeBaseError::TooFewDiseases(entries.len()));
        }

        let mut seen = BTreeSet::new();
        for entry in &entries {
            if !seen.insert(entry.name.as_str()) {
                return Err(KnowledgeBaseError::DuplicateDisease(entry.name.clone()));
            }
            if entry.symptoms.is_empty() {
                return Err(KnowledgeBaseError::NoSymptoms(entry.name.clone()));
            }
        }

        Ok(Self { entries })
    }

    /// The built-in ten-disease dictionary the service ships with.
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                DiseaseEntry::new(
                    "Common Cold",
                    &["fever", "cough", "sneezing", "runny nose", "sore throat"],
                ),
                DiseaseEntry::new("Flu", &["fever", "cough", "body ache", "fatigue", "headache"]),
                DiseaseEntry::new(
                    "Migraine",
                    &["headache", "nausea", "sensitivity to light", "dizziness"],
                ),
                DiseaseEntry::new(
                    "Diabetes",
                    &["frequent urination", "excessive thirst", "fatigue", "blurred vision"],
                ),
                DiseaseEntry::new(
                    "Hypertension",
                    &["headache", "dizziness", "chest pain", "shortness of breath"],
                ),
                DiseaseEntry::new(
                    "Asthma",
                    &["cough", "shortness of breath", "wheezing", "chest tightness"],
                ),
                DiseaseEntry::new(
                    "Pneumonia",
                    &["fever", "cough", "chest pain", "shortness of breath", "fatigue"],
                ),
                DiseaseEntry::new(
                    "Bronchitis",
                    &["cough", "mucus", "fatigue", "shortness of breath", "chest discomfort"],
                ),
                DiseaseEntry::new(
                    "Gastritis",
                    &["stomach pain", "nausea", "vomiting", "bloating", "loss of appetite"],
                ),
                DiseaseEntry::new(
                    "Arthritis",
                    &["joint pain", "stiffness", "swelling", "reduced range of motion"],
                ),
            ],
        }
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[DiseaseEntry] {
        &self.entries
    }

    /// Disease names in declaration order.
    pub fn diseases(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Symptoms for a disease, if it is known.
    pub fn symptoms_of(&self, disease: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.name == disease)
            .map(|e| e.symptoms.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// SHA-256 over the canonical (name-sorted) content, hex encoded.
    ///
    /// Declaration order does not affect the fingerprint; symptom order does
    /// not either, since neither changes the derived vocabulary or labels.
    pub fn fingerprint(&self) -> String {
        let canonical: BTreeMap<&str, BTreeSet<&str>> = self
            .entries
            .iter()
            .map(|e| {
                (
                    e.name.as_str(),
                    e.symptoms.iter().map(String::as_str).collect(),
                )
            })
            .collect();

        let mut hasher = Sha256::new();
        for (disease, symptoms) in canonical {
            hasher.update(disease.as_bytes());
            hasher.update([0u8]);
            for symptom in symptoms {
                hasher.update(symptom.as_bytes());
                hasher.update([1u8]);
            }
            hasher.update([2u8]);
        }
        hex::encode(hasher.finalize())
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_ten_diseases() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(kb.len(), 10);
        assert!(kb.diseases().any(|d| d == "Common Cold"));
        assert_eq!(
            kb.symptoms_of("Asthma").unwrap(),
            &["cough", "shortness of breath", "wheezing", "chest tightness"]
        );
        assert!(kb.symptoms_of("Scurvy").is_none());
    }

    #[test]
    fn test_rejects_duplicates_and_empty_lists() {
        let dup = KnowledgeBase::new(vec![
            DiseaseEntry::new("A", &["x"]),
            DiseaseEntry::new("A", &["y"]),
        ]);
        assert_eq!(dup, Err(KnowledgeBaseError::DuplicateDisease("A".into())));

        let empty = KnowledgeBase::new(vec![
            DiseaseEntry::new("A", &["x"]),
            DiseaseEntry::new("B", &[]),
        ]);
        assert_eq!(empty, Err(KnowledgeBaseError::NoSymptoms("B".into())));

        let single = KnowledgeBase::new(vec![DiseaseEntry::new("A", &["x"])]);
        assert_eq!(single, Err(KnowledgeBaseError::TooFewDiseases(1)));
    }

    #[test]
    fn test_fingerprint_ignores_order() {
        let a = KnowledgeBase::new(vec![
            DiseaseEntry::new("A", &["x", "y"]),
            DiseaseEntry::new("B", &["z"]),
        ])
        .unwrap();
        let b = KnowledgeBase::new(vec![
            DiseaseEntry::new("B", &["z"]),
            DiseaseEntry::new("A", &["y", "x"]),
        ])
        .unwrap();
        let c = KnowledgeBase::new(vec![
            DiseaseEntry::new("A", &["x", "y"]),
            DiseaseEntry::new("B", &["w"]),
        ])
        .unwrap();

        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }
}
