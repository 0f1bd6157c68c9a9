use crate::domain::errors::ArtifactDefect;
use crate::domain::ml::feature_registry::{FEATURE_COUNT, FEATURE_NAMES, schema_matches};
use crate::domain::ml::pipeline::ModelPipeline;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current on-disk envelope version. Bump on any incompatible layout change.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Envelope persisted by the offline training process.
///
/// Besides the pipeline it declares the feature schema it was trained on, so
/// the binding between artifact and service is checked at load time instead
/// of being trusted by convention.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub feature_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trained_at: Option<DateTime<Utc>>,
    pub pipeline: ModelPipeline,
}

impl ModelArtifact {
    /// Wraps a pipeline trained on the current feature schema.
    pub fn new(pipeline: ModelPipeline) -> Self {
        Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            trained_at: None,
            pipeline,
        }
    }

    pub fn with_trained_at(mut self, trained_at: DateTime<Utc>) -> Self {
        self.trained_at = Some(trained_at);
        self
    }

    /// Decodes and validates an artifact from its serialized bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, ArtifactDefect> {
        let artifact: ModelArtifact = serde_json::from_slice(bytes)?;
        artifact.validate()?;
        Ok(artifact)
    }

    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub fn validate(&self) -> Result<(), ArtifactDefect> {
        if self.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(ArtifactDefect::UnsupportedVersion {
                found: self.format_version,
                supported: ARTIFACT_FORMAT_VERSION,
            });
        }

        if !schema_matches(&self.feature_names) {
            return Err(ArtifactDefect::SchemaMismatch {
                expected: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
                found: self.feature_names.clone(),
            });
        }

        if let Some(scaler) = &self.pipeline.scaler {
            scaler
                .validate(FEATURE_COUNT)
                .map_err(|reason| ArtifactDefect::InvalidScaler { reason })?;
        }

        self.pipeline
            .check_input_width()
            .map_err(|reason| ArtifactDefect::RegressorShape { reason })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ml::pipeline::{Regressor, StandardScaler};
    use smartcore::linalg::basic::matrix::DenseMatrix;
    use smartcore::linear::linear_regression::{LinearRegression, LinearRegressionParameters};

    fn artifact_json(version: u32, names: &[&str]) -> Vec<u8> {
        let rows: Vec<Vec<f64>> = (0..12)
            .map(|i| {
                let i = i as f64;
                vec![i, (i * 2.0) % 5.0, (i * 7.0) % 9.0, (i * i) % 11.0]
            })
            .collect();
        let y: Vec<f64> = rows.iter().map(|r| r.iter().sum::<f64>()).collect();
        let x = DenseMatrix::from_2d_vec(&rows).unwrap();
        let model = LinearRegression::fit(&x, &y, LinearRegressionParameters::default()).unwrap();

        let mut artifact = ModelArtifact::new(ModelPipeline::new(
            Some(StandardScaler::new(vec![0.0; 4], vec![1.0; 4])),
            Regressor::Linear(model),
        ));
        artifact.format_version = version;
        artifact.feature_names = names.iter().map(|s| s.to_string()).collect();
        artifact.encode().unwrap()
    }

    #[test]
    fn test_decode_valid_artifact() {
        let bytes = artifact_json(ARTIFACT_FORMAT_VERSION, FEATURE_NAMES);
        let artifact = ModelArtifact::decode(&bytes).unwrap();
        assert_eq!(artifact.feature_names, FEATURE_NAMES);
        assert_eq!(artifact.pipeline.regressor.kind(), "linear");
        assert!(artifact.trained_at.is_none());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = ModelArtifact::decode(b"\x80\x04\x95 not json").unwrap_err();
        assert!(matches!(err, ArtifactDefect::Decode(_)));
    }

    #[test]
    fn test_decode_rejects_future_version() {
        let bytes = artifact_json(ARTIFACT_FORMAT_VERSION + 1, FEATURE_NAMES);
        let err = ModelArtifact::decode(&bytes).unwrap_err();
        assert!(matches!(err, ArtifactDefect::UnsupportedVersion { found: 2, .. }));
    }

    #[test]
    fn test_decode_rejects_reordered_schema() {
        let bytes = artifact_json(ARTIFACT_FORMAT_VERSION, &["SPX", "SLV", "USO", "GLD"]);
        match ModelArtifact::decode(&bytes).unwrap_err() {
            ArtifactDefect::SchemaMismatch { found, .. } => assert_eq!(found[1], "SLV"),
            other => panic!("unexpected defect: {}", other),
        }
    }

    #[test]
    fn test_validate_rejects_narrow_scaler() {
        let mut artifact =
            ModelArtifact::decode(&artifact_json(ARTIFACT_FORMAT_VERSION, FEATURE_NAMES)).unwrap();
        artifact.pipeline.scaler = Some(StandardScaler::new(vec![0.0; 3], vec![1.0; 3]));
        assert!(matches!(
            artifact.validate(),
            Err(ArtifactDefect::InvalidScaler { .. })
        ));
    }
}
