//! Term query implementation for exact term matching.

use crate::error::Result;
use crate::index::reader::IndexReader;
use crate::query::matcher::{EmptyMatcher, Matcher, PostingMatcher};
use crate::query::query::Query;
use crate::query::scorer::{BM25Scorer, Scorer};

/// A query that matches documents containing a specific term.
///
/// The term is matched exactly and is NOT analyzed; stem or normalize query
/// strings before constructing term queries.
#[derive(Debug, Clone)]
pub struct TermQuery {
    /// The term to search for.
    term: String,
    /// The boost factor for this query.
    boost: f32,
}

impl TermQuery {
    /// Create a new term query.
    pub fn new<T: Into<String>>(term: T) -> Self {
        TermQuery {
            term: term.into(),
            boost: 1.0,
        }
    }

    /// Get the term.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Set the boost factor.
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }
}

impl Query for TermQuery {
    fn matcher(&self, reader: &dyn IndexReader) -> Result<Box<dyn Matcher>> {
        match reader.postings(&self.term)? {
            Some(postings) => Ok(Box::new(PostingMatcher::new(postings))),
            None => Ok(Box::new(EmptyMatcher::new())),
        }
    }

    fn scorer(&self, reader: &dyn IndexReader) -> Result<Box<dyn Scorer>> {
        let doc_freq = match reader.term_info(&self.term)? {
            Some(info) => info.doc_freq,
            None => 0,
        };
        let scorer = BM25Scorer::new(
            doc_freq,
            reader.doc_count(),
            reader.avg_doc_length(),
            self.boost,
        );
        Ok(Box::new(scorer))
    }

    fn boost(&self) -> f32 {
        self.boost
    }

    fn set_boost(&mut self, boost: f32) {
        self.boost = boost;
    }

    fn description(&self) -> String {
        if self.boost == 1.0 {
            self.term.clone()
        } else {
            format!("{}^{}", self.term, self.boost)
        }
    }

    fn clone_box(&self) -> Box<dyn Query> {
        Box::new(self.clone())
    }

    fn is_empty(&self, reader: &dyn IndexReader) -> Result<bool> {
        match reader.term_info(&self.term)? {
            Some(info) => Ok(info.doc_freq == 0),
            None => Ok(true),
        }
    }

    fn cost(&self, reader: &dyn IndexReader) -> Result<u64> {
        match reader.term_info(&self.term)? {
            Some(info) => Ok(info.doc_freq),
            None => Ok(0),
        }
    }

    fn query_terms(&self, out: &mut Vec<String>) {
        out.push(self.term.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::index::MemoryIndex;

    fn sample_index() -> MemoryIndex {
        let mut index = MemoryIndex::new();
        let mut doc = Document::new();
        doc.add_posting("hello", 0);
        doc.add_posting("world", 1);
        index.add_document(doc).unwrap();
        index
    }

    #[test]
    fn test_term_query_creation() {
        let query = TermQuery::new("hello");

        assert_eq!(query.term(), "hello");
        assert_eq!(query.boost(), 1.0);
        assert_eq!(query.description(), "hello");
    }

    #[test]
    fn test_term_query_with_boost() {
        let query = TermQuery::new("hello").with_boost(2.0);

        assert_eq!(query.boost(), 2.0);
        assert_eq!(query.description(), "hello^2");
    }

    #[test]
    fn test_term_query_matcher() {
        let index = sample_index();

        let matcher = TermQuery::new("hello").matcher(&index).unwrap();
        assert_eq!(matcher.doc_id(), 0);

        let missing = TermQuery::new("absent").matcher(&index).unwrap();
        assert!(missing.is_exhausted());
    }

    #[test]
    fn test_term_query_scorer() {
        let index = sample_index();

        let scorer = TermQuery::new("hello").scorer(&index).unwrap();
        assert!(scorer.score(0, 1.0) > 0.0);

        let missing = TermQuery::new("absent").scorer(&index).unwrap();
        assert_eq!(missing.score(0, 1.0), 0.0);
    }

    #[test]
    fn test_term_query_is_empty_and_cost() {
        let index = sample_index();

        let query = TermQuery::new("hello");
        assert!(!query.is_empty(&index).unwrap());
        assert_eq!(query.cost(&index).unwrap(), 1);

        let missing = TermQuery::new("absent");
        assert!(missing.is_empty(&index).unwrap());
        assert_eq!(missing.cost(&index).unwrap(), 0);
    }

    #[test]
    fn test_term_query_clone() {
        let query = TermQuery::new("hello").with_boost(2.0);
        let cloned = query.clone_box();

        assert_eq!(cloned.description(), "hello^2");
        assert_eq!(cloned.boost(), 2.0);
    }
}
