#![allow(dead_code)]

use pricecast::domain::ml::model_artifact::ModelArtifact;
use pricecast::domain::ml::pipeline::{ModelPipeline, Regressor, StandardScaler};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::linear_regression::{LinearRegression, LinearRegressionParameters};
use std::fs;
use std::path::{Path, PathBuf};

/// Target used by the synthetic models:
/// `0.01*SPX + 0.5*GLD - 0.2*USO + 1.8*SLV + 3`
pub fn target(row: &[f64]) -> f64 {
    0.01 * row[0] + 0.5 * row[1] - 0.2 * row[2] + 1.8 * row[3] + 3.0
}

/// Deterministic in-range sample grid (SPX, GLD, USO, SLV)
pub fn sample_rows() -> Vec<Vec<f64>> {
    (0..40)
        .map(|i| {
            vec![
                1000.0 + ((i * 137) % 50) as f64 * 100.0,
                100.0 + ((i * 53) % 200) as f64,
                10.0 + ((i * 29) % 90) as f64,
                10.0 + ((i * 17) % 30) as f64,
            ]
        })
        .collect()
}

fn fit_scaler(rows: &[Vec<f64>]) -> StandardScaler {
    let n = rows.len() as f64;
    let width = rows[0].len();
    let mean: Vec<f64> = (0..width)
        .map(|c| rows.iter().map(|r| r[c]).sum::<f64>() / n)
        .collect();
    let scale: Vec<f64> = (0..width)
        .map(|c| {
            let var = rows.iter().map(|r| (r[c] - mean[c]).powi(2)).sum::<f64>() / n;
            if var > 0.0 { var.sqrt() } else { 1.0 }
        })
        .collect();
    StandardScaler::new(mean, scale)
}

fn scaled_training_set() -> (StandardScaler, DenseMatrix<f64>, Vec<f64>) {
    let rows = sample_rows();
    let y: Vec<f64> = rows.iter().map(|r| target(r)).collect();
    let scaler = fit_scaler(&rows);
    let scaled: Vec<Vec<f64>> = rows
        .iter()
        .map(|r| scaler.transform_row(r).unwrap())
        .collect();
    (scaler, DenseMatrix::from_2d_vec(&scaled).unwrap(), y)
}

/// Scaler + linear regression, trained on the canonical feature schema.
pub fn linear_artifact() -> ModelArtifact {
    let (scaler, x, y) = scaled_training_set();
    let model = LinearRegression::fit(&x, &y, LinearRegressionParameters::default()).unwrap();
    ModelArtifact::new(ModelPipeline::new(Some(scaler), Regressor::Linear(model)))
}

/// Scaler + small random forest, trained on the canonical feature schema.
pub fn forest_artifact() -> ModelArtifact {
    let (scaler, x, y) = scaled_training_set();
    let params = RandomForestRegressorParameters::default()
        .with_n_trees(10)
        .with_max_depth(6)
        .with_min_samples_split(2);
    let model = RandomForestRegressor::fit(&x, &y, params).unwrap();
    ModelArtifact::new(ModelPipeline::new(Some(scaler), Regressor::RandomForest(model)))
}

fn off_schema_training_set(width: usize) -> (DenseMatrix<f64>, Vec<f64>) {
    let rows: Vec<Vec<f64>> = (0..30)
        .map(|i| (0..width).map(|c| ((i * (c + 3) * 7) % 23) as f64 + c as f64).collect())
        .collect();
    let y: Vec<f64> = rows.iter().map(|r| r.iter().sum::<f64>() * 0.5 + 1.0).collect();
    (DenseMatrix::from_2d_vec(&rows).unwrap(), y)
}

/// Unscaled linear model fitted on `width` columns but declaring the canonical
/// feature names.
pub fn linear_artifact_with_width(width: usize) -> ModelArtifact {
    let (x, y) = off_schema_training_set(width);
    let model = LinearRegression::fit(&x, &y, LinearRegressionParameters::default()).unwrap();
    ModelArtifact::new(ModelPipeline::new(None, Regressor::Linear(model)))
}

/// Unscaled forest fitted on `width` columns but declaring the canonical
/// feature names. Only the columns past the fourth vary, so every split reads
/// a column a four-feature row doesn't have.
pub fn forest_artifact_with_width(width: usize) -> ModelArtifact {
    let (x, y) = off_schema_training_set(width);
    let rows: Vec<Vec<f64>> = (0..30)
        .map(|i| {
            (0..width)
                .map(|c| if c < 4 { 0.0 } else { *x.get((i, c)) })
                .collect()
        })
        .collect();
    let x = DenseMatrix::from_2d_vec(&rows).unwrap();
    let params = RandomForestRegressorParameters::default()
        .with_n_trees(5)
        .with_max_depth(8)
        .with_min_samples_split(2)
        .with_m(width);
    let model = RandomForestRegressor::fit(&x, &y, params).unwrap();
    ModelArtifact::new(ModelPipeline::new(None, Regressor::RandomForest(model)))
}

pub fn write_artifact(dir: &Path, artifact: &ModelArtifact) -> PathBuf {
    write_bytes(dir, &artifact.encode().unwrap())
}

pub fn write_bytes(dir: &Path, bytes: &[u8]) -> PathBuf {
    let path = dir.join("trained_model.sav");
    fs::write(&path, bytes).unwrap();
    path
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}
