//! Zip archive writing for release bundles.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use tracing::info;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{Result, XiphosError};

/// Write `inputs` into a deflate-compressed zip archive at `archive_path`.
///
/// Entries are stored flat under their file names, the way a binary bundle
/// is unpacked. Duplicate file names across inputs are an error.
pub fn write_zip(archive_path: &Path, inputs: &[PathBuf]) -> Result<()> {
    let file = File::create(archive_path)?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut seen: Vec<String> = Vec::new();
    for input in inputs {
        let name = input
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                XiphosError::bundle(format!("Bad artifact file name: {}", input.display()))
            })?
            .to_string();
        if seen.contains(&name) {
            return Err(XiphosError::bundle(format!(
                "Duplicate entry name in {}: {name}",
                archive_path.display()
            )));
        }

        zip.start_file(&name, options)
            .map_err(|e| anyhow::anyhow!("Failed to add {name}: {e}"))?;
        let mut reader = File::open(input)?;
        io::copy(&mut reader, &mut zip)?;
        seen.push(name);
    }

    zip.finish()
        .map_err(|e| anyhow::anyhow!("Failed to finish archive: {e}"))?;
    info!(archive = %archive_path.display(), entries = inputs.len(), "wrote archive");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Read;
    use tempfile::TempDir;

    #[test]
    fn test_write_zip_round_trip() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.bin");
        let b = dir.path().join("b.bin");
        fs::write(&a, b"first").unwrap();
        fs::write(&b, b"second").unwrap();

        let archive = dir.path().join("out.zip");
        write_zip(&archive, &[a, b]).unwrap();

        let mut zip = zip::ZipArchive::new(File::open(&archive).unwrap()).unwrap();
        assert_eq!(zip.len(), 2);

        let mut content = String::new();
        zip.by_name("a.bin")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "first");
    }

    #[test]
    fn test_write_zip_empty_input_list() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("empty.zip");
        write_zip(&archive, &[]).unwrap();

        let zip = zip::ZipArchive::new(File::open(&archive).unwrap()).unwrap();
        assert_eq!(zip.len(), 0);
    }

    #[test]
    fn test_write_zip_rejects_duplicate_names() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        let a = dir.path().join("same.bin");
        let b = sub.join("same.bin");
        fs::write(&a, b"one").unwrap();
        fs::write(&b, b"two").unwrap();

        let archive = dir.path().join("out.zip");
        let err = write_zip(&archive, &[a, b]).unwrap_err();
        assert!(err.to_string().contains("Duplicate entry name"));
    }

    #[test]
    fn test_write_zip_missing_input_fails() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("out.zip");
        let missing = dir.path().join("missing.bin");
        assert!(write_zip(&archive, &[missing]).is_err());
    }
}
