use super::smartcore_predictor::{ModelInfo, SmartCorePredictor};
use crate::config::ModelEnvConfig;
use crate::domain::errors::{ArtifactDefect, LoadError};
use crate::domain::ml::model_artifact::ModelArtifact;
use crate::infrastructure::artifact_store;
use chrono::Utc;
use std::path::Path;
use tracing::{error, info};

/// Loads a model artifact from disk into a ready predictor.
///
/// Performs the presence check, an optional SHA-256 integrity check, and the
/// envelope checks (format version, feature schema, scaler and regressor shape).
#[derive(Debug, Clone, Default)]
pub struct ModelLoader {
    expected_sha256: Option<String>,
}

impl ModelLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ModelEnvConfig) -> Self {
        match &config.model_sha256 {
            Some(digest) => Self::new().with_checksum(digest.clone()),
            None => Self::new(),
        }
    }

    /// Require the artifact bytes to hash to `digest` (hex, case-insensitive)
    pub fn with_checksum(mut self, digest: impl Into<String>) -> Self {
        self.expected_sha256 = Some(digest.into().to_lowercase());
        self
    }

    pub fn expected_checksum(&self) -> Option<&str> {
        self.expected_sha256.as_deref()
    }

    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<SmartCorePredictor, LoadError> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading model artifact");

        let result = self.load_inner(path);
        if let Err(e) = &result {
            error!(path = %path.display(), error = %e, "Failed to load model artifact");
        }
        result
    }

    fn load_inner(&self, path: &Path) -> Result<SmartCorePredictor, LoadError> {
        let raw = artifact_store::read_artifact(path)?;
        let corrupt = |source: ArtifactDefect| LoadError::ArtifactCorrupt {
            path: path.to_path_buf(),
            source,
        };

        if let Some(expected) = &self.expected_sha256 {
            if *expected != raw.sha256 {
                return Err(corrupt(ArtifactDefect::ChecksumMismatch {
                    expected: expected.clone(),
                    actual: raw.sha256,
                }));
            }
        }

        let artifact = ModelArtifact::decode(&raw.bytes).map_err(corrupt)?;

        let info = ModelInfo {
            path: path.to_path_buf(),
            kind: artifact.pipeline.regressor.kind(),
            sha256: raw.sha256,
            loaded_at: Utc::now(),
            trained_at: artifact.trained_at,
        };

        info!(
            path = %path.display(),
            kind = info.kind,
            sha256 = %info.sha256,
            scaled = artifact.pipeline.scaler.is_some(),
            "Model loaded successfully"
        );

        Ok(SmartCorePredictor::new(artifact, info))
    }
}
