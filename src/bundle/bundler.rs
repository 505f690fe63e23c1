//! Bundle orchestration: directory layout, archives, checksums, manifest.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::bundle::archive::write_zip;
use crate::bundle::checksum::sha256_all;
use crate::bundle::glob::expand;
use crate::bundle::manifest::{ArtifactEntry, Manifest};
use crate::error::{Result, XiphosError};

/// A named group of artifacts archived into one zip file.
#[derive(Debug, Clone)]
pub struct ArchiveSpec {
    /// Group name, used in the archive file name.
    pub name: String,
    /// Path patterns (relative to the bundle base directory) selecting the
    /// group's input files. See [`crate::bundle::glob::expand`].
    pub patterns: Vec<String>,
}

impl ArchiveSpec {
    /// Create an archive spec.
    pub fn new<S: Into<String>>(name: S, patterns: Vec<String>) -> Self {
        ArchiveSpec {
            name: name.into(),
            patterns,
        }
    }
}

/// What to bundle for a release.
#[derive(Debug, Clone)]
pub struct BundleSpec {
    /// Product name used as the artifact prefix.
    pub name: String,
    /// The release version, used verbatim in file names.
    pub version: String,
    /// Directory the bundle directory is created in.
    pub output_root: PathBuf,
    /// Archive groups to build.
    pub archives: Vec<ArchiveSpec>,
    /// Standalone files copied into the bundle and checksummed as-is.
    pub files: Vec<String>,
}

impl BundleSpec {
    /// Create a spec with no archives or files.
    pub fn new<N, V>(name: N, version: V, output_root: PathBuf) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        BundleSpec {
            name: name.into(),
            version: version.into(),
            output_root,
            archives: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Add an archive group.
    pub fn archive(mut self, spec: ArchiveSpec) -> Self {
        self.archives.push(spec);
        self
    }

    /// Add a standalone file.
    pub fn file<S: Into<String>>(mut self, pattern: S) -> Self {
        self.files.push(pattern.into());
        self
    }

    /// Directory the bundle is written to.
    pub fn output_dir(&self) -> PathBuf {
        self.output_root
            .join(format!("{}-binaries-{}", self.name, self.version))
    }
}

/// The result of a successful bundle run.
#[derive(Debug, Clone)]
pub struct BundleReport {
    /// Directory the bundle was written to.
    pub output_dir: PathBuf,
    /// The produced artifacts, in production order.
    pub artifacts: Vec<ArtifactEntry>,
}

/// Builds release bundles from a [`BundleSpec`].
///
/// Unlike ad-hoc packaging scripts, every step is checked: a failed
/// archive, copy, or checksum aborts the run with an error instead of
/// producing a silently incomplete bundle.
#[derive(Debug)]
pub struct Bundler {
    spec: BundleSpec,
}

impl Bundler {
    /// Create a bundler for the given spec.
    pub fn new(spec: BundleSpec) -> Self {
        Bundler { spec }
    }

    /// Run the bundle: recreate the output directory, build the archives,
    /// copy standalone files, checksum everything, and write `SHA256SUMS`
    /// and `manifest.json`.
    ///
    /// `base` is the directory artifact patterns are resolved against.
    pub fn run(&self, base: &Path) -> Result<BundleReport> {
        let spec = &self.spec;
        if spec.version.is_empty() {
            return Err(XiphosError::invalid_argument("Bundle version is empty"));
        }

        let output_dir = spec.output_dir();
        if output_dir.exists() {
            warn!(dir = %output_dir.display(), "removing stale bundle directory");
            fs::remove_dir_all(&output_dir)?;
        }
        fs::create_dir_all(&output_dir)?;
        info!(dir = %output_dir.display(), version = %spec.version, "bundling");

        let mut produced: Vec<PathBuf> = Vec::new();

        for archive in &spec.archives {
            let mut inputs = Vec::new();
            for pattern in &archive.patterns {
                inputs.extend(expand(base, pattern)?);
            }
            let archive_path =
                output_dir.join(format!("{}-{}-{}.zip", spec.name, spec.version, archive.name));
            write_zip(&archive_path, &inputs)?;
            produced.push(archive_path);
        }

        for pattern in &spec.files {
            for source in expand(base, pattern)? {
                // expand() only returns paths with a valid final component
                let name = source.file_name().unwrap_or_default();
                let dest = output_dir.join(name);
                fs::copy(&source, &dest)?;
                info!(file = %dest.display(), "copied artifact");
                produced.push(dest);
            }
        }

        let digests = sha256_all(&produced)?;
        let mut artifacts = Vec::with_capacity(produced.len());
        for (path, (name, sha256)) in produced.iter().zip(digests) {
            let size = fs::metadata(path)?.len();
            artifacts.push(ArtifactEntry { name, size, sha256 });
        }

        let manifest = Manifest::new(&spec.version, artifacts.clone());
        manifest.write_checksums(&output_dir.join("SHA256SUMS"))?;
        manifest.write_json(&output_dir.join("manifest.json"))?;

        info!(artifacts = artifacts.len(), "bundle complete");
        Ok(BundleReport {
            output_dir,
            artifacts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path, content: &[u8]) {
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_bundle_run_produces_archives_and_manifest() {
        let base = TempDir::new().unwrap();
        touch(&base.path().join("tool-a"), b"a");
        touch(&base.path().join("tool-b"), b"b");

        let spec = BundleSpec::new("demo", "1.0.0", base.path().to_path_buf())
            .archive(ArchiveSpec::new("tools", vec!["tool-*".to_string()]));
        let report = Bundler::new(spec).run(base.path()).unwrap();

        assert!(report.output_dir.ends_with("demo-binaries-1.0.0"));
        assert_eq!(report.artifacts.len(), 1);
        assert_eq!(report.artifacts[0].name, "demo-1.0.0-tools.zip");
        assert!(report.output_dir.join("demo-1.0.0-tools.zip").is_file());
        assert!(report.output_dir.join("SHA256SUMS").is_file());
        assert!(report.output_dir.join("manifest.json").is_file());
    }

    #[test]
    fn test_bundle_copies_standalone_files() {
        let base = TempDir::new().unwrap();
        touch(&base.path().join("installer.bin"), b"payload");

        let spec =
            BundleSpec::new("demo", "2.0.0", base.path().to_path_buf()).file("installer.bin");
        let report = Bundler::new(spec).run(base.path()).unwrap();

        let copied = report.output_dir.join("installer.bin");
        assert_eq!(fs::read(&copied).unwrap(), b"payload");
        assert_eq!(report.artifacts[0].name, "installer.bin");
    }

    #[test]
    fn test_bundle_fails_on_missing_artifacts() {
        let base = TempDir::new().unwrap();

        let spec = BundleSpec::new("demo", "1.0.0", base.path().to_path_buf())
            .archive(ArchiveSpec::new("tools", vec!["tool-*".to_string()]));
        let err = Bundler::new(spec).run(base.path()).unwrap_err();

        assert!(matches!(err, XiphosError::Bundle(_)));
    }

    #[test]
    fn test_bundle_recreates_stale_output_dir() {
        let base = TempDir::new().unwrap();
        touch(&base.path().join("tool"), b"new");

        let spec = BundleSpec::new("demo", "1.0.0", base.path().to_path_buf())
            .archive(ArchiveSpec::new("tools", vec!["tool".to_string()]));
        let output_dir = spec.output_dir();
        fs::create_dir_all(&output_dir).unwrap();
        touch(&output_dir.join("stale.zip"), b"old");

        Bundler::new(spec).run(base.path()).unwrap();
        assert!(!output_dir.join("stale.zip").exists());
        assert!(output_dir.join("demo-1.0.0-tools.zip").is_file());
    }

    #[test]
    fn test_bundle_rejects_empty_version() {
        let base = TempDir::new().unwrap();
        let spec = BundleSpec::new("demo", "", base.path().to_path_buf());
        assert!(Bundler::new(spec).run(base.path()).is_err());
    }

    #[test]
    fn test_checksums_match_archive_contents() {
        let base = TempDir::new().unwrap();
        touch(&base.path().join("data.bin"), b"data");

        let spec = BundleSpec::new("demo", "1.0.0", base.path().to_path_buf()).file("data.bin");
        let report = Bundler::new(spec).run(base.path()).unwrap();

        let expected = crate::bundle::checksum::sha256_file(&base.path().join("data.bin")).unwrap();
        assert_eq!(report.artifacts[0].sha256, expected);

        let sums = fs::read_to_string(report.output_dir.join("SHA256SUMS")).unwrap();
        assert_eq!(sums.trim(), format!("{expected}  data.bin"));
    }
}
