//! Scaling + regression pipeline as persisted inside a model artifact.
//!
//! The pipeline mirrors how the offline process trained the model: each input
//! row is standardized with the stored mean/scale, then handed to a smartcore
//! regressor as a single-row dense matrix.

use crate::domain::errors::InferenceError;
use crate::domain::ml::feature_registry::{FEATURE_COUNT, FeatureVector};
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::linear_regression::LinearRegression;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

pub type ForestModel = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;
pub type LinearModel = LinearRegression<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Per-column standardization: `(x - mean) / scale`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Self {
        Self { mean, scale }
    }

    pub fn width(&self) -> usize {
        self.mean.len()
    }

    /// Checks that the scaler can transform rows of `width` columns.
    pub fn validate(&self, width: usize) -> Result<(), String> {
        if self.mean.len() != width || self.scale.len() != width {
            return Err(format!(
                "expected {} columns, found mean={} scale={}",
                width,
                self.mean.len(),
                self.scale.len()
            ));
        }
        if let Some(idx) = self.mean.iter().position(|m| !m.is_finite()) {
            return Err(format!("mean[{}] is not finite", idx));
        }
        if let Some(idx) = self
            .scale
            .iter()
            .position(|s| !s.is_finite() || *s == 0.0)
        {
            return Err(format!("scale[{}] must be finite and non-zero", idx));
        }
        Ok(())
    }

    pub fn transform_row(&self, row: &[f64]) -> Result<Vec<f64>, InferenceError> {
        if row.len() != self.width() {
            return Err(InferenceError::Structuring(format!(
                "row has {} columns, scaler expects {}",
                row.len(),
                self.width()
            )));
        }
        Ok(row
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| (x - mean) / scale)
            .collect())
    }
}

/// Regressor stage. Tagged so the artifact states which model it carries.
#[derive(Serialize, Deserialize)]
#[serde(tag = "kind", content = "model", rename_all = "snake_case")]
pub enum Regressor {
    Linear(LinearModel),
    RandomForest(ForestModel),
}

impl Regressor {
    pub fn kind(&self) -> &'static str {
        match self {
            Regressor::Linear(_) => "linear",
            Regressor::RandomForest(_) => "random_forest",
        }
    }

    /// Number of input columns the regressor was fitted on, when the model
    /// exposes it. Forests don't; their width is only observable by predicting.
    fn input_width(&self) -> Result<Option<usize>, String> {
        match self {
            Regressor::Linear(model) => {
                // `coefficients()` panics on a model that was never fitted
                panic::catch_unwind(AssertUnwindSafe(|| model.coefficients().shape().0))
                    .map(Some)
                    .map_err(|payload| {
                        format!("linear model has no coefficients ({})", panic_message(&*payload))
                    })
            }
            Regressor::RandomForest(_) => Ok(None),
        }
    }

    fn predict(&self, input: &DenseMatrix<f64>) -> Result<Vec<f64>, InferenceError> {
        // smartcore panics when the fitted shape and the input shape disagree
        let result = panic::catch_unwind(AssertUnwindSafe(|| match self {
            Regressor::Linear(model) => model.predict(input),
            Regressor::RandomForest(model) => model.predict(input),
        }))
        .map_err(|payload| {
            InferenceError::Invocation(format!("model panicked: {}", panic_message(&*payload)))
        })?;
        result.map_err(|e| InferenceError::Invocation(e.to_string()))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

impl fmt::Debug for Regressor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Regressor")
            .field("kind", &self.kind())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelPipeline {
    #[serde(default)]
    pub scaler: Option<StandardScaler>,
    pub regressor: Regressor,
}

impl ModelPipeline {
    pub fn new(scaler: Option<StandardScaler>, regressor: Regressor) -> Self {
        Self { scaler, regressor }
    }

    /// Checks that the regressor accepts rows of `FEATURE_COUNT` columns.
    ///
    /// Linear models are checked through their coefficient count. Every model
    /// then gets one trial prediction on the default feature vector.
    pub fn check_input_width(&self) -> Result<(), String> {
        if let Some(width) = self.regressor.input_width()? {
            if width != FEATURE_COUNT {
                return Err(format!(
                    "{} model takes {} inputs, expected {}",
                    self.regressor.kind(),
                    width,
                    FEATURE_COUNT
                ));
            }
        }

        self.predict_row(&FeatureVector::default().to_array())
            .map(|_| ())
            .map_err(|e| format!("trial prediction failed: {}", e))
    }

    /// Runs one row through the pipeline and returns the single output value.
    pub fn predict_row(&self, row: &[f64]) -> Result<f64, InferenceError> {
        if row.len() != FEATURE_COUNT {
            return Err(InferenceError::Structuring(format!(
                "row has {} columns, model expects {}",
                row.len(),
                FEATURE_COUNT
            )));
        }

        let row = match &self.scaler {
            Some(scaler) => scaler.transform_row(row)?,
            None => row.to_vec(),
        };

        let input = DenseMatrix::from_2d_vec(&vec![row])
            .map_err(|e| InferenceError::Structuring(format!("matrix creation failed: {}", e)))?;

        let predictions = self.regressor.predict(&input)?;
        let value = *predictions.first().ok_or(InferenceError::EmptyOutput)?;

        if value.is_finite() {
            Ok(value)
        } else {
            Err(InferenceError::NonFiniteOutput(value))
        }
    }
}
