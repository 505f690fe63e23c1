//! Posting list entries and per-term statistics.

use serde::{Deserialize, Serialize};

/// One entry of a term's posting list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    /// The document id.
    pub doc_id: u64,
    /// Term frequency within the document (wdf).
    pub tf: u32,
    /// Sorted positions of the term within the document. Empty for terms
    /// added without positional information.
    pub positions: Vec<u32>,
}

impl Posting {
    /// Create a new posting.
    pub fn new(doc_id: u64, tf: u32, positions: Vec<u32>) -> Self {
        Posting {
            doc_id,
            tf,
            positions,
        }
    }
}

/// Index-wide statistics for one term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermInfo {
    /// Number of documents containing the term.
    pub doc_freq: u64,
    /// Total occurrences of the term across the index.
    pub collection_freq: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posting_creation() {
        let posting = Posting::new(3, 2, vec![1, 5]);
        assert_eq!(posting.doc_id, 3);
        assert_eq!(posting.tf, 2);
        assert_eq!(posting.positions, [1, 5]);
    }
}
