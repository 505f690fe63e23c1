//! Ranked match sets returned by query evaluation.

use serde::{Deserialize, Serialize};

/// A single ranked match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// The document id.
    pub doc_id: u64,
    /// 0-based rank over the whole result, including skipped pages.
    pub rank: usize,
    /// The relevance score.
    pub score: f32,
}

/// The ranked result of evaluating a query.
///
/// Holds one page of matches (see [`Searcher::search`]'s `first` and
/// `max_items`) together with statistics over the full match count.
///
/// [`Searcher::search`]: crate::search::Searcher::search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchSet {
    hits: Vec<SearchHit>,
    total_hits: u64,
    max_score: f32,
}

impl MatchSet {
    /// Create a match set from a page of hits and whole-result statistics.
    pub fn new(hits: Vec<SearchHit>, total_hits: u64, max_score: f32) -> Self {
        MatchSet {
            hits,
            total_hits,
            max_score,
        }
    }

    /// Create an empty match set.
    pub fn empty() -> Self {
        MatchSet::default()
    }

    /// Number of hits in this page.
    pub fn size(&self) -> usize {
        self.hits.len()
    }

    /// Check whether this page has no hits.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Total number of matching documents in the index.
    pub fn total_hits(&self) -> u64 {
        self.total_hits
    }

    /// Highest score over all matches.
    pub fn max_score(&self) -> f32 {
        self.max_score
    }

    /// Get a hit by index within this page.
    pub fn hit(&self, i: usize) -> Option<&SearchHit> {
        self.hits.get(i)
    }

    /// Iterate over the hits in rank order.
    pub fn iter(&self) -> std::slice::Iter<'_, SearchHit> {
        self.hits.iter()
    }
}

impl<'a> IntoIterator for &'a MatchSet {
    type Item = &'a SearchHit;
    type IntoIter = std::slice::Iter<'a, SearchHit>;

    fn into_iter(self) -> Self::IntoIter {
        self.hits.iter()
    }
}

impl IntoIterator for MatchSet {
    type Item = SearchHit;
    type IntoIter = std::vec::IntoIter<SearchHit>;

    fn into_iter(self) -> Self::IntoIter {
        self.hits.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_match_set() {
        let mset = MatchSet::empty();
        assert_eq!(mset.size(), 0);
        assert!(mset.is_empty());
        assert_eq!(mset.total_hits(), 0);
    }

    #[test]
    fn test_iteration_matches_size() {
        let hits = vec![
            SearchHit {
                doc_id: 2,
                rank: 0,
                score: 1.5,
            },
            SearchHit {
                doc_id: 0,
                rank: 1,
                score: 0.5,
            },
        ];
        let mset = MatchSet::new(hits, 2, 1.5);

        assert_eq!(mset.iter().count(), mset.size());
        assert_eq!(mset.hit(0).unwrap().doc_id, 2);
        assert!(mset.hit(2).is_none());

        let ranks: Vec<usize> = (&mset).into_iter().map(|h| h.rank).collect();
        assert_eq!(ranks, [0, 1]);
    }
}
