//! # Xiphos
//!
//! A compact probabilistic full-text search library for Rust.
//!
//! ## Features
//!
//! - Pure Rust implementation
//! - In-memory inverted index with positional postings
//! - Flexible text analysis pipeline (tokenizers, stemmers)
//! - Composable query tree (term, boolean, XOR, phrase)
//! - BM25 scoring with ranked match sets
//! - Release bundling tools (zip, sha256, manifest)

pub mod analysis;
pub mod bundle;
pub mod cli;
pub mod document;
pub mod error;
pub mod index;
pub mod query;
pub mod search;

pub mod prelude {
    pub use crate::analysis::{Analyzer, Stem};
    pub use crate::document::Document;
    pub use crate::error::{Result, XiphosError};
    pub use crate::index::{IndexReader, MemoryIndex};
    pub use crate::query::{BooleanQuery, PhraseQuery, Query, TermQuery, XorQuery};
    pub use crate::search::{MatchSet, Searcher};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Major component of the crate version.
pub fn major_version() -> u32 {
    env!("CARGO_PKG_VERSION_MAJOR").parse().unwrap_or(0)
}

/// Minor component of the crate version.
pub fn minor_version() -> u32 {
    env!("CARGO_PKG_VERSION_MINOR").parse().unwrap_or(0)
}

/// Patch component of the crate version.
pub fn patch_version() -> u32 {
    env!("CARGO_PKG_VERSION_PATCH").parse().unwrap_or(0)
}
