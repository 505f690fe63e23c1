//! SHA-256 digests for bundle artifacts.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use sha2::{Digest, Sha256};

use crate::error::{Result, XiphosError};

/// Compute the SHA-256 digest of a file, as lowercase hex.
pub fn sha256_file(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    io::copy(&mut reader, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}

/// Digest several independent artifacts in parallel.
///
/// Returns (file name, digest) pairs in the input order. Any single failure
/// fails the whole batch.
pub fn sha256_all(paths: &[PathBuf]) -> Result<Vec<(String, String)>> {
    paths
        .par_iter()
        .map(|path| {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| {
                    XiphosError::bundle(format!("Bad artifact file name: {}", path.display()))
                })?
                .to_string();
            Ok((name, sha256_file(path)?))
        })
        .collect()
}
