//! The query trait all query types implement.

use crate::error::Result;
use crate::index::reader::IndexReader;
use crate::query::matcher::Matcher;
use crate::query::scorer::{BM25Scorer, Scorer};

/// Trait for all query types.
///
/// A query produces a [`Matcher`] enumerating the documents it matches and
/// a [`Scorer`] ranking them. `description()` renders the query tree in its
/// printable operator form, e.g. `(smoke OR test OR terms)`.
pub trait Query: std::fmt::Debug + Send + Sync {
    /// Create a matcher enumerating this query's matching documents.
    fn matcher(&self, reader: &dyn IndexReader) -> Result<Box<dyn Matcher>>;

    /// Create a scorer for ranking this query's matches.
    fn scorer(&self, reader: &dyn IndexReader) -> Result<Box<dyn Scorer>>;

    /// Get the boost factor for this query.
    fn boost(&self) -> f32;

    /// Set the boost factor for this query.
    fn set_boost(&mut self, boost: f32);

    /// Printable description of this query.
    fn description(&self) -> String;

    /// Clone this query into a box.
    fn clone_box(&self) -> Box<dyn Query>;

    /// Check whether this query matches nothing against the given reader.
    fn is_empty(&self, reader: &dyn IndexReader) -> Result<bool>;

    /// Estimated number of documents this query touches.
    fn cost(&self, reader: &dyn IndexReader) -> Result<u64>;

    /// Append this query's leaf terms to `out`.
    fn query_terms(&self, out: &mut Vec<String>);
}

impl Clone for Box<dyn Query> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Build a BM25 scorer for a compound query from its leaf terms.
///
/// Uses the largest per-term document frequency as the aggregate statistic.
pub(crate) fn bm25_for_terms(
    reader: &dyn IndexReader,
    terms: &[String],
    boost: f32,
) -> Result<BM25Scorer> {
    let mut doc_freq = 0u64;
    for term in terms {
        if let Some(info) = reader.term_info(term)? {
            doc_freq = doc_freq.max(info.doc_freq);
        }
    }
    Ok(BM25Scorer::new(
        doc_freq,
        reader.doc_count(),
        reader.avg_doc_length(),
        boost,
    ))
}
