use crate::domain::errors::{InferenceError, InputError};
use serde::{Deserialize, Serialize};

/// Ordered list of feature names.
/// This order MUST match exactly with the order the model artifact was trained on.
/// Any change here is a breaking change for every persisted model.
pub const FEATURE_NAMES: &[&str] = &["SPX", "GLD", "USO", "SLV"];

pub const FEATURE_COUNT: usize = 4;

/// One input row for the price model, in schema order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    #[serde(rename = "SPX")]
    pub spx: f64,
    #[serde(rename = "GLD")]
    pub gld: f64,
    #[serde(rename = "USO")]
    pub uso: f64,
    #[serde(rename = "SLV")]
    pub slv: f64,
}

impl FeatureVector {
    pub fn new(spx: f64, gld: f64, uso: f64, slv: f64) -> Self {
        Self { spx, gld, uso, slv }
    }

    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [self.spx, self.gld, self.uso, self.slv]
    }

    /// Converts features into the single model row, in `FEATURE_NAMES` order.
    pub fn to_f64_vector(&self) -> Vec<f64> {
        self.to_array().to_vec()
    }

    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> {
        FEATURE_NAMES.iter().copied().zip(self.to_array())
    }

    pub fn value_mut(&mut self, index: usize) -> Option<&mut f64> {
        match index {
            0 => Some(&mut self.spx),
            1 => Some(&mut self.gld),
            2 => Some(&mut self.uso),
            3 => Some(&mut self.slv),
            _ => None,
        }
    }

    /// Rejects NaN and infinite values, which cannot be placed in a model row.
    pub fn ensure_finite(&self) -> Result<(), InferenceError> {
        match self.named().find(|(_, value)| !value.is_finite()) {
            Some((feature, value)) => Err(InferenceError::NonFiniteFeature { feature, value }),
            None => Ok(()),
        }
    }

    /// Checks every value against `FEATURE_BOUNDS`.
    pub fn validate_ranges(&self) -> Result<(), InputError> {
        for (bounds, value) in FEATURE_BOUNDS.iter().zip(self.to_array()) {
            bounds.check(value)?;
        }
        Ok(())
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::new(
            FEATURE_BOUNDS[0].default,
            FEATURE_BOUNDS[1].default,
            FEATURE_BOUNDS[2].default,
            FEATURE_BOUNDS[3].default,
        )
    }
}

/// Input range accepted by the collection boundary for one feature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureBounds {
    pub name: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
}

impl FeatureBounds {
    pub fn check(&self, value: f64) -> Result<f64, InputError> {
        if !value.is_finite() {
            return Err(InputError::NotFinite { feature: self.name });
        }
        if value < self.min || value > self.max {
            return Err(InputError::OutOfRange {
                feature: self.name,
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(value)
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Rounds to the nearest step counted from `min`, then clamps.
    pub fn snap(&self, value: f64) -> f64 {
        let steps = ((value - self.min) / self.step).round();
        let snapped = self.min + steps * self.step;
        // Trim float noise from repeated 0.1 steps (170.00000000000003)
        let snapped = (snapped * 1e6).round() / 1e6;
        self.clamp(snapped)
    }
}

pub const FEATURE_BOUNDS: [FeatureBounds; FEATURE_COUNT] = [
    FeatureBounds {
        name: "SPX",
        label: "SPX (S&P 500 Index)",
        min: 1000.0,
        max: 6000.0,
        default: 4000.0,
        step: 1.0,
    },
    FeatureBounds {
        name: "GLD",
        label: "GLD (Gold ETF Price)",
        min: 100.0,
        max: 300.0,
        default: 170.0,
        step: 0.1,
    },
    FeatureBounds {
        name: "USO",
        label: "USO (Oil ETF Price)",
        min: 10.0,
        max: 100.0,
        default: 50.0,
        step: 0.1,
    },
    FeatureBounds {
        name: "SLV",
        label: "SLV (Silver ETF Price)",
        min: 10.0,
        max: 40.0,
        default: 22.0,
        step: 0.1,
    },
];

/// True when `names` is exactly `FEATURE_NAMES`, same order.
pub fn schema_matches<S: AsRef<str>>(names: &[S]) -> bool {
    names.len() == FEATURE_NAMES.len()
        && names
            .iter()
            .zip(FEATURE_NAMES)
            .all(|(found, expected)| found.as_ref() == *expected)
}
