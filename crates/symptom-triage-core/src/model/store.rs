//! Binary model artifact on disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::TrainedModel;
use crate::classifier::{LabelEncoder, RandomForest};
use crate::resolver::Vocabulary;

/// Artifact layout version; bump when `ModelArtifact` changes shape.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Model store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Artifact encoding error: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("Unsupported artifact format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Everything needed to serve predictions without retraining.
#[derive(Debug, Serialize, Deserialize)]
struct ModelArtifact {
    format_version: u32,
    fingerprint: String,
    trained_at: String,
    vocabulary: Vocabulary,
    labels: LabelEncoder,
    forest: RandomForest,
}

/// Reads and writes the model artifact at a fixed path.
#[derive(Debug, Clone)]
pub struct ModelStore {
    path: PathBuf,
}

impl ModelStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the artifact; `Ok(None)` when no file exists.
    pub fn load(&self) -> StoreResult<Option<TrainedModel>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let artifact: ModelArtifact = bincode::deserialize(&bytes)?;
        if artifact.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: artifact.format_version,
                expected: ARTIFACT_FORMAT_VERSION,
            });
        }

        Ok(Some(TrainedModel {
            vocabulary: artifact.vocabulary.reindexed(),
            labels: artifact.labels,
            forest: artifact.forest,
            fingerprint: artifact.fingerprint,
            trained_at: artifact.trained_at,
        }))
    }

    /// Persist the model, replacing any existing artifact.
    ///
    /// Writes to a sibling temp file first so a crash never leaves a
    /// truncated artifact behind.
    pub fn save(&self, model: &TrainedModel) -> StoreResult<()> {
        let artifact = ModelArtifact {
            format_version: ARTIFACT_FORMAT_VERSION,
            fingerprint: model.fingerprint.clone(),
            trained_at: model.trained_at.clone(),
            vocabulary: model.vocabulary.clone(),
            labels: model.labels.clone(),
            forest: model.forest.clone(),
        };
        let bytes = bincode::serialize(&artifact)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
