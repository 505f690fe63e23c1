//! Query evaluation against an index reader.

use tracing::debug;

use crate::error::Result;
use crate::index::reader::IndexReader;
use crate::query::query::Query;
use crate::search::mset::{MatchSet, SearchHit};

/// Evaluates queries against an index and produces ranked match sets.
///
/// # Examples
///
/// ```
/// use xiphos::document::Document;
/// use xiphos::index::MemoryIndex;
/// use xiphos::query::TermQuery;
/// use xiphos::search::Searcher;
///
/// let mut index = MemoryIndex::new();
/// let mut doc = Document::new();
/// doc.add_posting("hello", 0);
/// index.add_document(doc).unwrap();
///
/// let searcher = Searcher::new(&index);
/// let mset = searcher.search(&TermQuery::new("hello"), 0, 10).unwrap();
/// assert_eq!(mset.size(), 1);
/// ```
pub struct Searcher<'a> {
    reader: &'a dyn IndexReader,
}

impl<'a> Searcher<'a> {
    /// Create a searcher over the given reader.
    pub fn new(reader: &'a dyn IndexReader) -> Self {
        Searcher { reader }
    }

    /// Evaluate `query` and return the page of matches starting at rank
    /// `first`, at most `max_items` long.
    ///
    /// Matches are ordered by descending score, ties broken by ascending
    /// document id.
    pub fn search(&self, query: &dyn Query, first: usize, max_items: usize) -> Result<MatchSet> {
        let mut matcher = query.matcher(self.reader)?;
        let scorer = query.scorer(self.reader)?;

        let mut scored: Vec<(u64, f32)> = Vec::new();
        while !matcher.is_exhausted() {
            let doc_id = matcher.doc_id();
            scored.push((doc_id, scorer.score(doc_id, matcher.term_freq())));
            matcher.next()?;
        }

        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

        let total_hits = scored.len() as u64;
        let max_score = scored.iter().map(|&(_, s)| s).fold(0.0f32, f32::max);
        let hits: Vec<SearchHit> = scored
            .into_iter()
            .enumerate()
            .skip(first)
            .take(max_items)
            .map(|(rank, (doc_id, score))| SearchHit {
                doc_id,
                rank,
                score,
            })
            .collect();

        debug!(
            query = %query.description(),
            total_hits,
            page = hits.len(),
            "search complete"
        );
        Ok(MatchSet::new(hits, total_hits, max_score))
    }

    /// Count the documents matching `query` without ranking them.
    pub fn count(&self, query: &dyn Query) -> Result<u64> {
        let mut matcher = query.matcher(self.reader)?;
        let mut count = 0;
        while !matcher.is_exhausted() {
            count += 1;
            matcher.next()?;
        }
        Ok(count)
    }

    /// The query's leaf terms that are indexed in the given document,
    /// sorted and deduplicated.
    pub fn matching_terms(&self, query: &dyn Query, doc_id: u64) -> Result<Vec<String>> {
        let mut terms = Vec::new();
        query.query_terms(&mut terms);
        terms.sort();
        terms.dedup();

        let mut matching = Vec::new();
        for term in terms {
            if let Some(postings) = self.reader.postings(&term)? {
                if postings.binary_search_by_key(&doc_id, |p| p.doc_id).is_ok() {
                    matching.push(term);
                }
            }
        }
        Ok(matching)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::index::MemoryIndex;
    use crate::query::{BooleanQuery, TermQuery};

    fn index_with(texts: &[&str]) -> MemoryIndex {
        let mut index = MemoryIndex::new();
        for text in texts {
            let mut doc = Document::new();
            doc.set_data(*text);
            for (i, word) in text.split_whitespace().enumerate() {
                doc.add_posting(word, i as u32);
            }
            index.add_document(doc).unwrap();
        }
        index
    }

    #[test]
    fn test_search_ranks_by_score() {
        // doc 1 mentions "rust" twice and should rank first
        let index = index_with(&["rust once here", "rust and rust again", "nothing relevant"]);
        let searcher = Searcher::new(&index);

        let mset = searcher.search(&TermQuery::new("rust"), 0, 10).unwrap();
        assert_eq!(mset.size(), 2);
        assert_eq!(mset.total_hits(), 2);
        assert_eq!(mset.hit(0).unwrap().doc_id, 1);
        assert_eq!(mset.hit(1).unwrap().doc_id, 0);
        assert!(mset.hit(0).unwrap().score >= mset.hit(1).unwrap().score);
        assert_eq!(mset.max_score(), mset.hit(0).unwrap().score);
    }

    #[test]
    fn test_search_paging() {
        let index = index_with(&["common a", "common b", "common c"]);
        let searcher = Searcher::new(&index);
        let query = TermQuery::new("common");

        let page = searcher.search(&query, 1, 1).unwrap();
        assert_eq!(page.size(), 1);
        assert_eq!(page.total_hits(), 3);
        assert_eq!(page.hit(0).unwrap().rank, 1);

        let beyond = searcher.search(&query, 10, 5).unwrap();
        assert!(beyond.is_empty());
        assert_eq!(beyond.total_hits(), 3);

        let none = searcher.search(&query, 0, 0).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_count() {
        let index = index_with(&["x y", "x z", "w"]);
        let searcher = Searcher::new(&index);
        assert_eq!(searcher.count(&TermQuery::new("x")).unwrap(), 2);
        assert_eq!(searcher.count(&TermQuery::new("missing")).unwrap(), 0);
    }

    #[test]
    fn test_matching_terms_sorted_and_deduplicated() {
        let index = index_with(&["is there anybody out there"]);
        let searcher = Searcher::new(&index);

        let query = BooleanQuery::or_terms(["there", "is", "there", "missing"]);
        let terms = searcher.matching_terms(&query, 0).unwrap();
        assert_eq!(terms, ["is", "there"]);
    }
}
