//! Shell-independent state of the prediction form.
//!
//! Both the egui window and the headless CLI go through this module: it holds
//! the four input values, enforces their ranges before a request reaches the
//! inference service, and turns outcomes into the messages shown to the user.

use crate::application::ml::inference_service::InferenceService;
use crate::application::ml::smartcore_predictor::ModelInfo;
use crate::domain::errors::{InferenceError, InputError, LoadError};
use crate::domain::ml::feature_registry::{FEATURE_BOUNDS, FeatureVector};

pub const PRICE_LABEL: &str = "USD/EUR";

const PREDICTION_HINT: &str = "Please check the input values and model compatibility.";
const MISSING_MODEL_HINT: &str = "Please run the training process first to create the model file.";
const CORRUPT_MODEL_HINT: &str =
    "Please verify the model file's integrity and ensure it was saved correctly.";

/// Result of one press of the predict trigger
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Estimated(f64),
    Rejected(InputError),
    Failed(InferenceError),
}

impl PredictionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PredictionOutcome::Estimated(_))
    }

    pub fn headline(&self) -> String {
        match self {
            PredictionOutcome::Estimated(value) => {
                format!("Estimated Price: {} {}", PRICE_LABEL, format_price(*value))
            }
            PredictionOutcome::Rejected(e) => format!("Invalid input: {}", e),
            PredictionOutcome::Failed(e) => format!("Error during prediction: {}", e),
        }
    }

    pub fn hint(&self) -> Option<&'static str> {
        match self {
            PredictionOutcome::Estimated(_) => None,
            PredictionOutcome::Rejected(_) | PredictionOutcome::Failed(_) => Some(PREDICTION_HINT),
        }
    }
}

/// Input values plus the outcome of the last submission
#[derive(Debug, Clone, Default)]
pub struct PredictionForm {
    pub values: FeatureVector,
    last_outcome: Option<PredictionOutcome>,
}

impl PredictionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(values: FeatureVector) -> Self {
        Self {
            values,
            last_outcome: None,
        }
    }

    /// Sets the value of feature `index`, snapped to its step and range.
    pub fn set_value(&mut self, index: usize, value: f64) -> bool {
        match (FEATURE_BOUNDS.get(index), self.values.value_mut(index)) {
            (Some(bounds), Some(slot)) => {
                *slot = bounds.snap(value);
                true
            }
            _ => false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn last_outcome(&self) -> Option<&PredictionOutcome> {
        self.last_outcome.as_ref()
    }

    /// Validates the current values and, if they are in range, asks the
    /// service for one prediction.
    pub fn submit(&mut self, service: &InferenceService) -> &PredictionOutcome {
        let outcome = evaluate(service, &self.values, true);
        self.last_outcome.insert(outcome)
    }
}

/// Runs one request through the input boundary and the service.
/// With `enforce_ranges` off only the service's own checks apply.
pub fn evaluate(
    service: &InferenceService,
    features: &FeatureVector,
    enforce_ranges: bool,
) -> PredictionOutcome {
    if enforce_ranges {
        if let Err(e) = features.validate_ranges() {
            return PredictionOutcome::Rejected(e);
        }
    }

    match service.predict(features) {
        Ok(value) => PredictionOutcome::Estimated(value),
        Err(e) => PredictionOutcome::Failed(e),
    }
}

/// Startup indicator shown above the form
#[derive(Debug, Clone, PartialEq)]
pub struct StartupBanner {
    pub ok: bool,
    pub headline: String,
    pub hint: Option<&'static str>,
    pub detail: Option<String>,
}

impl StartupBanner {
    pub fn ready(info: Option<&ModelInfo>) -> Self {
        Self {
            ok: true,
            headline: "Model loaded successfully! Ready for predictions.".to_string(),
            hint: None,
            detail: info.map(|info| {
                format!(
                    "{} model from {} (sha256 {})",
                    info.kind,
                    info.path.display(),
                    short_digest(&info.sha256)
                )
            }),
        }
    }

    pub fn failed(error: &LoadError) -> Self {
        match error {
            LoadError::ArtifactNotFound { path } => Self {
                ok: false,
                headline: format!("Error: Model file '{}' not found.", path.display()),
                hint: Some(MISSING_MODEL_HINT),
                detail: None,
            },
            LoadError::ArtifactCorrupt { source, .. } => Self {
                ok: false,
                headline: format!("Error loading the model: {}", source),
                hint: Some(CORRUPT_MODEL_HINT),
                detail: Some(error.to_string()),
            },
        }
    }

    pub fn from_startup(result: &Result<InferenceService, LoadError>) -> Self {
        match result {
            Ok(service) => Self::ready(service.model_info()),
            Err(e) => Self::failed(e),
        }
    }
}

fn short_digest(digest: &str) -> &str {
    digest.get(..12).unwrap_or(digest)
}

/// Formats a price with thousands separators and two decimals: `1,234.50`.
pub fn format_price(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // -0.004 rounds to 0.00 and loses its sign
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}
