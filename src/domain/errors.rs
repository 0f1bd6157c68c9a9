use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while bringing the model artifact into memory.
/// Both variants are fatal to startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("model artifact not found at {}", path.display())]
    ArtifactNotFound { path: PathBuf },

    #[error("model artifact at {} is corrupt: {source}", path.display())]
    ArtifactCorrupt {
        path: PathBuf,
        #[source]
        source: ArtifactDefect,
    },
}

impl LoadError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::ArtifactNotFound { .. })
    }
}

/// Why an existing artifact could not become a usable predictor
#[derive(Debug, Error)]
pub enum ArtifactDefect {
    #[error("unreadable: {0}")]
    Unreadable(#[from] std::io::Error),

    #[error("not a valid model artifact: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unsupported artifact format version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error(
        "feature schema mismatch: expected [{}], found [{}]",
        expected.join(", "),
        found.join(", ")
    )]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("invalid scaler: {reason}")]
    InvalidScaler { reason: String },

    #[error("regressor does not fit the feature schema: {reason}")]
    RegressorShape { reason: String },

    #[error("checksum mismatch: expected {expected}, actual {actual}")]
    ChecksumMismatch { expected: String, actual: String },
}

/// Request-time failures. Never fatal; the predictor stays usable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error("feature {feature} is not a finite number ({value})")]
    NonFiniteFeature { feature: &'static str, value: f64 },

    #[error("failed to structure model input: {0}")]
    Structuring(String),

    #[error("model invocation failed: {0}")]
    Invocation(String),

    #[error("model returned no prediction")]
    EmptyOutput,

    #[error("model returned a non-finite prediction ({0})")]
    NonFiniteOutput(f64),
}

/// Rejections raised by the input-collection boundary before a request
/// reaches the inference service.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{feature} = {value} is outside the allowed range [{min}, {max}]")]
    OutOfRange {
        feature: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{feature} is not a finite number")]
    NotFinite { feature: &'static str },
}
