use super::model_loader::ModelLoader;
use super::predictor::PricePredictor;
use super::smartcore_predictor::ModelInfo;
use crate::domain::errors::{InferenceError, LoadError};
use crate::domain::ml::feature_registry::FeatureVector;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Prediction entry point handed to every shell.
///
/// Holding a value of this type means the service is ready: the only way to
/// build one from disk is [`InferenceService::start`], which fails instead of
/// producing a service without a predictor. The predictor is never swapped
/// or unloaded afterwards.
#[derive(Clone)]
pub struct InferenceService {
    predictor: Arc<dyn PricePredictor>,
    info: Option<ModelInfo>,
}

impl InferenceService {
    /// Loads the artifact once and returns a ready service.
    pub fn start(model_path: &Path, loader: &ModelLoader) -> Result<Self, LoadError> {
        let predictor = loader.load(model_path)?;
        let info = predictor.info().clone();
        Ok(Self {
            predictor: Arc::new(predictor),
            info: Some(info),
        })
    }

    /// Wraps an already constructed predictor.
    pub fn new(predictor: Arc<dyn PricePredictor>) -> Self {
        Self {
            predictor,
            info: None,
        }
    }

    pub fn model_info(&self) -> Option<&ModelInfo> {
        self.info.as_ref()
    }

    pub fn predictor_name(&self) -> &str {
        self.predictor.name()
    }

    pub fn predictor_version(&self) -> &str {
        self.predictor.version()
    }

    /// Runs one independent prediction. Failures are returned to the caller
    /// and leave the service usable.
    pub fn predict(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        match self.predictor.predict(features) {
            Ok(value) => {
                debug!(
                    spx = features.spx,
                    gld = features.gld,
                    uso = features.uso,
                    slv = features.slv,
                    prediction = value,
                    "Prediction served"
                );
                Ok(value)
            }
            Err(e) => {
                warn!(error = %e, features = ?features, "Prediction failed");
                Err(e)
            }
        }
    }
}
