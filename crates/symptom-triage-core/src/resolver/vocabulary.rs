//! Symptom vocabulary and feature encoder.
//!
//! Index assignment follows sorted token order, so a given knowledge base
//! always produces the same feature layout.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::knowledge::KnowledgeBase;

/// Sorted set of known symptom tokens with a fixed feature index per token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vocabulary {
    tokens: Vec<String>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Build the vocabulary from every symptom in the knowledge base.
    pub fn from_knowledge_base(kb: &KnowledgeBase) -> Self {
        let tokens: BTreeSet<&str> = kb
            .entries()
            .iter()
            .flat_map(|e| e.symptoms.iter().map(String::as_str))
            .collect();

        Self::from_sorted(tokens.into_iter().map(str::to_string).collect())
    }

    fn from_sorted(tokens: Vec<String>) -> Self {
        let index = tokens
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();
        Self { tokens, index }
    }

    /// Rebuild the lookup table after deserialization.
    pub(crate) fn reindexed(self) -> Self {
        Self::from_sorted(self.tokens)
    }

    /// Feature index of a canonical token.
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    /// Tokens in index order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Binary presence vector over the vocabulary.
    ///
    /// Unrecognized tokens are dropped without error.
    pub fn encode<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<f64> {
        let mut vector = vec![0.0; self.tokens.len()];
        for token in tokens {
            if let Some(idx) = self.index_of(token.as_ref()) {
                vector[idx] = 1.0;
            }
        }
        vector
    }
}
