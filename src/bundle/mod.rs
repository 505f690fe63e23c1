//! Release bundling: archive prebuilt artifacts, checksum them, and write
//! a machine-readable manifest.
//!
//! Every step propagates failure; a bundle run never continues past a
//! failed archive or checksum.

pub mod archive;
pub mod bundler;
pub mod checksum;
pub mod glob;
pub mod manifest;

pub use self::bundler::{ArchiveSpec, BundleReport, BundleSpec, Bundler};
pub use self::manifest::{ArtifactEntry, Manifest};
