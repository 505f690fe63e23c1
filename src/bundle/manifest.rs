//! Bundle manifest and checksum file output.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One artifact in a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactEntry {
    /// File name within the bundle directory.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Lowercase hex SHA-256 digest.
    pub sha256: String,
}

/// Machine-readable description of a produced bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// The release version the bundle was built for.
    pub version: String,
    /// When the bundle was produced.
    pub created_at: DateTime<Utc>,
    /// The bundled artifacts.
    pub artifacts: Vec<ArtifactEntry>,
}

impl Manifest {
    /// Create a manifest stamped with the current time.
    pub fn new(version: &str, artifacts: Vec<ArtifactEntry>) -> Self {
        Manifest {
            version: version.to_string(),
            created_at: Utc::now(),
            artifacts,
        }
    }

    /// Write this manifest as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Write a coreutils-style `SHA256SUMS` file (`<digest>  <name>` lines).
    pub fn write_checksums(&self, path: &Path) -> Result<()> {
        let mut out = String::new();
        for artifact in &self.artifacts {
            out.push_str(&artifact.sha256);
            out.push_str("  ");
            out.push_str(&artifact.name);
            out.push('\n');
        }
        fs::write(path, out)?;
        Ok(())
    }
}
