//! XOR query: matches documents matched by an odd number of subqueries.

use crate::error::Result;
use crate::index::reader::IndexReader;
use crate::query::matcher::{EmptyMatcher, Matcher, XorMatcher};
use crate::query::query::{bm25_for_terms, Query};
use crate::query::scorer::Scorer;
use crate::query::term::TermQuery;

/// A query over the symmetric difference of its subqueries.
///
/// A document matches when an odd number of subqueries match it; with two
/// subqueries this is exactly "one but not both".
///
/// # Examples
///
/// ```
/// use xiphos::query::{Query, TermQuery, XorQuery};
///
/// let query = XorQuery::new(vec![
///     Box::new(TermQuery::new("smoke")),
///     Box::new(TermQuery::new("string")),
/// ]);
/// assert_eq!(query.description(), "(smoke XOR string)");
/// ```
#[derive(Debug)]
pub struct XorQuery {
    subqueries: Vec<Box<dyn Query>>,
    boost: f32,
}

impl Clone for XorQuery {
    fn clone(&self) -> Self {
        XorQuery {
            subqueries: self.subqueries.iter().map(|q| q.clone_box()).collect(),
            boost: self.boost,
        }
    }
}

impl XorQuery {
    /// Create a new XOR query over the given subqueries.
    pub fn new(subqueries: Vec<Box<dyn Query>>) -> Self {
        XorQuery {
            subqueries,
            boost: 1.0,
        }
    }

    /// Create an XOR query over plain terms.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        XorQuery::new(
            terms
                .into_iter()
                .map(|t| Box::new(TermQuery::new(t)) as Box<dyn Query>)
                .collect(),
        )
    }

    /// Add a subquery.
    pub fn add(&mut self, query: Box<dyn Query>) {
        self.subqueries.push(query);
    }

    /// Get the subqueries.
    pub fn subqueries(&self) -> &[Box<dyn Query>] {
        &self.subqueries
    }

    /// Set the boost factor.
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }
}

impl Query for XorQuery {
    fn matcher(&self, reader: &dyn IndexReader) -> Result<Box<dyn Matcher>> {
        if self.subqueries.is_empty() {
            return Ok(Box::new(EmptyMatcher::new()));
        }
        let children = self
            .subqueries
            .iter()
            .map(|q| q.matcher(reader))
            .collect::<Result<Vec<_>>>()?;
        Ok(Box::new(XorMatcher::new(children)?))
    }

    fn scorer(&self, reader: &dyn IndexReader) -> Result<Box<dyn Scorer>> {
        let mut terms = Vec::new();
        self.query_terms(&mut terms);
        Ok(Box::new(bm25_for_terms(reader, &terms, self.boost)?))
    }

    fn boost(&self) -> f32 {
        self.boost
    }

    fn set_boost(&mut self, boost: f32) {
        self.boost = boost;
    }

    fn description(&self) -> String {
        let inner = self
            .subqueries
            .iter()
            .map(|q| q.description())
            .collect::<Vec<_>>()
            .join(" XOR ");
        format!("({inner})")
    }

    fn clone_box(&self) -> Box<dyn Query> {
        Box::new(self.clone())
    }

    fn is_empty(&self, reader: &dyn IndexReader) -> Result<bool> {
        for query in &self.subqueries {
            if !query.is_empty(reader)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn cost(&self, reader: &dyn IndexReader) -> Result<u64> {
        let mut total = 0;
        for query in &self.subqueries {
            total += query.cost(reader)?;
        }
        Ok(total)
    }

    fn query_terms(&self, out: &mut Vec<String>) {
        for query in &self.subqueries {
            query.query_terms(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::index::MemoryIndex;
    use crate::query::matcher::NO_MORE_DOCS;
    use crate::query::phrase::PhraseQuery;

    fn sample_index() -> MemoryIndex {
        let mut index = MemoryIndex::new();
        for text in ["apple banana", "apple", "banana", "cherry"] {
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
    fn test_xor_description() {
        let query = XorQuery::from_terms(["a", "b", "c"]);
        assert_eq!(query.description(), "(a XOR b XOR c)");
    }

    #[test]
    fn test_xor_description_with_nested_phrase() {
        let query = XorQuery::new(vec![
            Box::new(TermQuery::new("smoke")),
            Box::new(PhraseQuery::new(vec![
                "smoke".to_string(),
                "test".to_string(),
                "tuple".to_string(),
            ])),
            Box::new(TermQuery::new("string")),
        ]);
        assert_eq!(
            query.description(),
            "(smoke XOR (smoke PHRASE 3 test PHRASE 3 tuple) XOR string)"
        );
    }

    #[test]
    fn test_xor_matching_excludes_both() {
        let index = sample_index();
        let query = XorQuery::from_terms(["apple", "banana"]);
        // doc 0 has both terms, so it is excluded
        assert_eq!(matched_docs(&query, &index), [1, 2]);
    }

    #[test]
    fn test_empty_xor_matches_nothing() {
        let index = sample_index();
        let query = XorQuery::new(vec![]);
        assert!(matched_docs(&query, &index).is_empty());
        assert!(query.is_empty(&index).unwrap());
    }

    #[test]
    fn test_single_subquery_degrades_to_it() {
        let index = sample_index();
        let query = XorQuery::from_terms(["cherry"]);
        assert_eq!(matched_docs(&query, &index), [3]);
    }
}
