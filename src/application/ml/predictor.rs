use crate::domain::errors::InferenceError;
use crate::domain::ml::feature_registry::FeatureVector;

/// Interface for price models.
///
/// Implementations are read-only after construction, so one instance can be
/// shared across every request.
pub trait PricePredictor: Send + Sync {
    /// Predict the target price for one feature vector
    fn predict(&self, features: &FeatureVector) -> Result<f64, InferenceError>;

    /// Get model name/type
    fn name(&self) -> &str;

    /// Get model version/id
    fn version(&self) -> &str;
}
