//! Patient-reported input for a prediction.

use serde::{Deserialize, Serialize};

/// Age used when the caller does not supply one.
pub const DEFAULT_AGE: i64 = 30;

/// Gender used when the caller does not supply one.
pub const DEFAULT_GENDER: &str = "male";

/// Symptoms plus basic demographic and history data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientReport {
    /// Free-text symptoms as reported
    pub symptoms: Vec<String>,
    /// Age in years
    #[serde(default = "default_age")]
    pub age: i64,
    /// Accepted but not used by any rule
    #[serde(default = "default_gender")]
    pub gender: String,
    /// Prior conditions; only the count matters downstream
    #[serde(default)]
    pub medical_history: Vec<String>,
}

fn default_age() -> i64 {
    DEFAULT_AGE
}

fn default_gender() -> String {
    DEFAULT_GENDER.to_string()
}

impl PatientReport {
    /// Create a report with default demographics.
    pub fn new<S: Into<String>>(symptoms: impl IntoIterator<Item = S>) -> Self {
        Self {
            symptoms: symptoms.into_iter().map(Into::into).collect(),
            age: DEFAULT_AGE,
            gender: DEFAULT_GENDER.to_string(),
            medical_history: Vec::new(),
        }
    }

    pub fn with_age(mut self, age: i64) -> Self {
        self.age = age;
        self
    }

    pub fn with_history<S: Into<String>>(mut self, history: impl IntoIterator<Item = S>) -> Self {
        self.medical_history = history.into_iter().map(Into::into).collect();
        self
    }

    pub fn history_len(&self) -> usize {
        self.medical_history.len()
    }
}
