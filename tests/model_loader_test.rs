mod common;

use pricecast::application::ml::model_loader::ModelLoader;
use pricecast::domain::errors::{ArtifactDefect, LoadError};
use pricecast::domain::ml::model_artifact::ModelArtifact;
use pricecast::infrastructure::artifact_store::sha256_hex;
use std::fs;
use tempfile::tempdir;

fn expect_corrupt(result: Result<impl Sized, LoadError>) -> ArtifactDefect {
    match result {
        Err(LoadError::ArtifactCorrupt { source, .. }) => source,
        Err(other) => panic!("expected ArtifactCorrupt, got: {}", other),
        Ok(_) => panic!("expected ArtifactCorrupt, got a predictor"),
    }
}

#[test]
fn test_missing_artifact_is_not_found() {
    common::init_tracing();
    let dir = tempdir().unwrap();
    let path = dir.path().join("trained_model.sav");

    match ModelLoader::new().load(&path) {
        Err(LoadError::ArtifactNotFound { path: reported }) => assert_eq!(reported, path),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("missing artifact produced a predictor"),
    }
}

#[test]
fn test_non_artifact_bytes_are_corrupt() {
    let dir = tempdir().unwrap();

    // Pickle protocol header, empty file, truncated JSON
    let samples: [&[u8]; 3] = [b"\x80\x04\x95\x1f\x00\x00\x00", b"", b"{\"format_version\": 1,"];
    for bytes in samples {
        let path = common::write_bytes(dir.path(), bytes);
        let defect = expect_corrupt(ModelLoader::new().load(&path));
        assert!(matches!(defect, ArtifactDefect::Decode(_)), "{}", defect);
    }
}

#[test]
fn test_valid_json_with_wrong_shape_is_corrupt() {
    let dir = tempdir().unwrap();
    let path = common::write_bytes(dir.path(), br#"{"weights": [1, 2, 3]}"#);
    let defect = expect_corrupt(ModelLoader::new().load(&path));
    assert!(matches!(defect, ArtifactDefect::Decode(_)));
}

#[test]
fn test_schema_mismatch_is_corrupt() {
    let dir = tempdir().unwrap();
    let mut artifact = common::linear_artifact();
    artifact.feature_names = ["SPX", "SLV", "USO", "GLD"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let path = common::write_artifact(dir.path(), &artifact);

    let defect = expect_corrupt(ModelLoader::new().load(&path));
    assert!(matches!(defect, ArtifactDefect::SchemaMismatch { .. }));
}

#[test]
fn test_unsupported_version_is_corrupt() {
    let dir = tempdir().unwrap();
    let mut artifact = common::linear_artifact();
    artifact.format_version = 0;
    let path = common::write_artifact(dir.path(), &artifact);

    let defect = expect_corrupt(ModelLoader::new().load(&path));
    assert!(matches!(
        defect,
        ArtifactDefect::UnsupportedVersion { found: 0, supported: 1 }
    ));
}

#[test]
fn test_checksum_gate() {
    let dir = tempdir().unwrap();
    let path = common::write_artifact(dir.path(), &common::linear_artifact());
    let digest = sha256_hex(&fs::read(&path).unwrap());

    let predictor = ModelLoader::new()
        .with_checksum(digest.to_uppercase())
        .load(&path)
        .unwrap();
    assert_eq!(predictor.info().sha256, digest);

    let defect = expect_corrupt(ModelLoader::new().with_checksum("0".repeat(64)).load(&path));
    match defect {
        ArtifactDefect::ChecksumMismatch { actual, .. } => assert_eq!(actual, digest),
        other => panic!("unexpected defect: {}", other),
    }
}

#[test]
fn test_model_info_describes_artifact() {
    let dir = tempdir().unwrap();
    let trained_at = chrono::Utc::now();
    let artifact: ModelArtifact = common::forest_artifact().with_trained_at(trained_at);
    let path = common::write_artifact(dir.path(), &artifact);

    let predictor = ModelLoader::new().load(&path).unwrap();
    let info = predictor.info();
    assert_eq!(info.path, path);
    assert_eq!(info.kind, "random_forest");
    assert_eq!(info.trained_at, Some(trained_at));
    assert!(info.loaded_at >= trained_at);
}

#[test]
fn test_linear_model_of_wrong_width_is_corrupt() {
    let dir = tempdir().unwrap();
    let path = common::write_artifact(dir.path(), &common::linear_artifact_with_width(3));

    match expect_corrupt(ModelLoader::new().load(&path)) {
        ArtifactDefect::RegressorShape { reason } => {
            assert_eq!(reason, "linear model takes 3 inputs, expected 4")
        }
        other => panic!("unexpected defect: {}", other),
    }
}

#[test]
fn test_forest_of_wrong_width_is_corrupt() {
    let dir = tempdir().unwrap();
    let path = common::write_artifact(dir.path(), &common::forest_artifact_with_width(6));

    match expect_corrupt(ModelLoader::new().load(&path)) {
        ArtifactDefect::RegressorShape { reason } => {
            assert!(reason.starts_with("trial prediction failed"), "{}", reason)
        }
        other => panic!("unexpected defect: {}", other),
    }
}
