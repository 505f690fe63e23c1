//! Phrase query implementation for positional phrase matching.

use crate::error::Result;
use crate::index::reader::IndexReader;
use crate::query::matcher::{Matcher, PhraseMatcher};
use crate::query::query::Query;
use crate::query::scorer::{BM25Scorer, Scorer};

/// A query that matches documents containing the terms as a phrase.
///
/// A document matches when every term occurs and some assignment of
/// positions is strictly increasing within the window. The window defaults
/// to the number of terms, which requires a consecutive run.
///
/// # Examples
///
/// ```
/// use xiphos::query::{PhraseQuery, Query};
///
/// let query = PhraseQuery::from_phrase("smoke test tuple");
/// assert_eq!(
///     query.description(),
///     "(smoke PHRASE 3 test PHRASE 3 tuple)"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct PhraseQuery {
    /// The terms that make up the phrase, in order.
    terms: Vec<String>,
    /// Maximum span (in positions, inclusive) an occurrence may cover.
    window: u32,
    /// The boost factor for this query.
    boost: f32,
}

impl PhraseQuery {
    /// Create a new phrase query; the window defaults to the term count.
    pub fn new(terms: Vec<String>) -> Self {
        let window = terms.len() as u32;
        PhraseQuery {
            terms,
            window,
            boost: 1.0,
        }
    }

    /// Create a phrase query from a whitespace-separated phrase string.
    pub fn from_phrase(phrase: &str) -> Self {
        Self::new(phrase.split_whitespace().map(|s| s.to_string()).collect())
    }

    /// Widen (or narrow) the matching window.
    pub fn with_window(mut self, window: u32) -> Self {
        self.window = window;
        self
    }

    /// Set the boost factor for this query.
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    /// Get the phrase terms.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Get the window.
    pub fn window(&self) -> u32 {
        self.window
    }
}

impl Query for PhraseQuery {
    fn matcher(&self, reader: &dyn IndexReader) -> Result<Box<dyn Matcher>> {
        let mut lists = Vec::with_capacity(self.terms.len());
        for term in &self.terms {
            // A missing term empties the whole phrase.
            lists.push(reader.postings(term)?.unwrap_or_default());
        }
        Ok(Box::new(PhraseMatcher::new(lists, self.window)?))
    }

    fn scorer(&self, reader: &dyn IndexReader) -> Result<Box<dyn Scorer>> {
        // Score with the rarest term's statistics; the phrase cannot match
        // more documents than that term does.
        let mut doc_freq = u64::MAX;
        for term in &self.terms {
            match reader.term_info(term)? {
                Some(info) => doc_freq = doc_freq.min(info.doc_freq),
                None => doc_freq = 0,
            }
        }
        if self.terms.is_empty() {
            doc_freq = 0;
        }
        Ok(Box::new(BM25Scorer::new(
            doc_freq,
            reader.doc_count(),
            reader.avg_doc_length(),
            self.boost,
        )))
    }

    fn boost(&self) -> f32 {
        self.boost
    }

    fn set_boost(&mut self, boost: f32) {
        self.boost = boost;
    }

    fn description(&self) -> String {
        match self.terms.len() {
            0 => "()".to_string(),
            1 => format!("({})", self.terms[0]),
            _ => {
                let joined = self.terms.join(&format!(" PHRASE {} ", self.window));
                format!("({joined})")
            }
        }
    }

    fn clone_box(&self) -> Box<dyn Query> {
        Box::new(self.clone())
    }

    fn is_empty(&self, reader: &dyn IndexReader) -> Result<bool> {
        if self.terms.is_empty() {
            return Ok(true);
        }
        for term in &self.terms {
            match reader.term_info(term)? {
                Some(info) if info.doc_freq > 0 => {}
                _ => return Ok(true),
            }
        }
        Ok(false)
    }

    fn cost(&self, reader: &dyn IndexReader) -> Result<u64> {
        let mut cost = 0;
        for term in &self.terms {
            if let Some(info) = reader.term_info(term)? {
                cost = cost.max(info.doc_freq);
            }
        }
        Ok(cost)
    }

    fn query_terms(&self, out: &mut Vec<String>) {
        out.extend(self.terms.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::index::MemoryIndex;
    use crate::query::matcher::NO_MORE_DOCS;

    fn index_with(texts: &[&str]) -> MemoryIndex {
        let mut index = MemoryIndex::new();
        for text in texts {
            let mut doc = Document::new();
            for (i, word) in text.split_whitespace().enumerate() {
                doc.add_posting(word, i as u32);
            }
            index.add_document(doc).unwrap();
        }
        index
    }

    fn matched_docs(query: &dyn Query, index: &MemoryIndex) -> Vec<u64> {
        let mut matcher = query.matcher(index).unwrap();
        let mut docs = Vec::new();
        while matcher.doc_id() != NO_MORE_DOCS {
            docs.push(matcher.doc_id());
            matcher.next().unwrap();
        }
        docs
    }

    #[test]
    fn test_phrase_description() {
        let query = PhraseQuery::from_phrase("smoke test tuple");
        assert_eq!(query.description(), "(smoke PHRASE 3 test PHRASE 3 tuple)");

        let query = PhraseQuery::from_phrase("smoke test");
        assert_eq!(query.description(), "(smoke PHRASE 2 test)");

        let query = PhraseQuery::from_phrase("smoke");
        assert_eq!(query.description(), "(smoke)");
    }

    #[test]
    fn test_phrase_window_in_description() {
        let query = PhraseQuery::from_phrase("smoke test").with_window(5);
        assert_eq!(query.description(), "(smoke PHRASE 5 test)");
    }

    #[test]
    fn test_phrase_matches_in_order_only() {
        let index = index_with(&["quick brown fox", "brown quick fox", "quick fox"]);
        let query = PhraseQuery::from_phrase("quick brown");

        assert_eq!(matched_docs(&query, &index), [0]);
    }

    #[test]
    fn test_phrase_with_wider_window_allows_gap() {
        let index = index_with(&["quick red fox"]);

        let exact = PhraseQuery::from_phrase("quick fox");
        assert!(matched_docs(&exact, &index).is_empty());

        let sloppy = PhraseQuery::from_phrase("quick fox").with_window(3);
        assert_eq!(matched_docs(&sloppy, &index), [0]);
    }

    #[test]
    fn test_phrase_with_missing_term_is_empty() {
        let index = index_with(&["quick brown fox"]);
        let query = PhraseQuery::from_phrase("quick wolf");

        assert!(matched_docs(&query, &index).is_empty());
        assert!(query.is_empty(&index).unwrap());
    }

    #[test]
    fn test_single_term_phrase() {
        let index = index_with(&["quick brown fox", "slow snail"]);
        let query = PhraseQuery::from_phrase("brown");

        assert_eq!(matched_docs(&query, &index), [0]);
    }
}
