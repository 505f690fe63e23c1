//! Read-side interface over an index.

use crate::error::Result;
use crate::index::posting::{Posting, TermInfo};

/// Read access to an index.
///
/// Queries and the searcher operate against this trait, not a concrete
/// index type. Deleted documents are never surfaced through any method.
pub trait IndexReader: Send + Sync {
    /// Number of live documents in the index.
    fn doc_count(&self) -> u64;

    /// One past the highest document id ever assigned.
    fn max_doc(&self) -> u64;

    /// Ascending ids of all live documents.
    fn doc_ids(&self) -> Vec<u64>;

    /// Statistics for a term, or `None` if the term is not indexed.
    fn term_info(&self, term: &str) -> Result<Option<TermInfo>>;

    /// The term's posting list in ascending document id order, or `None`
    /// if the term is not indexed.
    fn postings(&self, term: &str) -> Result<Option<Vec<Posting>>>;

    /// Length (sum of wdfs) of a live document.
    fn doc_length(&self, doc_id: u64) -> Result<Option<u64>>;

    /// Average length of live documents, 0.0 for an empty index.
    fn avg_doc_length(&self) -> f64;
}
