//! Filesystem access for the persisted model artifact.

use crate::domain::errors::{ArtifactDefect, LoadError};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Raw artifact content together with its SHA-256 digest (lowercase hex)
#[derive(Debug, Clone)]
pub struct ArtifactBytes {
    pub bytes: Vec<u8>,
    pub sha256: String,
}

/// Reads the artifact at `path`.
///
/// A missing path is `ArtifactNotFound`; a path that exists but cannot be
/// read (a directory, no permission) is `ArtifactCorrupt`.
pub fn read_artifact(path: &Path) -> Result<ArtifactBytes, LoadError> {
    if !path.exists() {
        return Err(LoadError::ArtifactNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = fs::read(path).map_err(|e| LoadError::ArtifactCorrupt {
        path: path.to_path_buf(),
        source: ArtifactDefect::Unreadable(e),
    })?;

    let sha256 = sha256_hex(&bytes);
    debug!(path = %path.display(), size = bytes.len(), sha256 = %sha256, "Read model artifact");

    Ok(ArtifactBytes { bytes, sha256 })
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
