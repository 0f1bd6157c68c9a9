use super::predictor::PricePredictor;
use crate::domain::errors::InferenceError;
use crate::domain::ml::feature_registry::FeatureVector;
use crate::domain::ml::model_artifact::ModelArtifact;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Where a loaded predictor came from
#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub path: PathBuf,
    pub kind: &'static str,
    pub sha256: String,
    pub loaded_at: DateTime<Utc>,
    pub trained_at: Option<DateTime<Utc>>,
}

pub struct SmartCorePredictor {
    artifact: ModelArtifact,
    info: ModelInfo,
    version: String,
}

impl SmartCorePredictor {
    pub fn new(artifact: ModelArtifact, info: ModelInfo) -> Self {
        let version = format!("v{}", artifact.format_version);
        Self {
            artifact,
            info,
            version,
        }
    }

    pub fn info(&self) -> &ModelInfo {
        &self.info
    }
}

impl PricePredictor for SmartCorePredictor {
    fn predict(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        features.ensure_finite()?;
        self.artifact
            .pipeline
            .predict_row(&features.to_f64_vector())
    }

    fn name(&self) -> &str {
        match self.info.kind {
            "random_forest" => "SmartCore Random Forest",
            _ => "SmartCore Linear Regression",
        }
    }

    fn version(&self) -> &str {
        &self.version
    }
}
