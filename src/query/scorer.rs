//! Scoring implementations for ranking search results.

use std::fmt::Debug;

/// Trait for document scorers.
pub trait Scorer: Send + Debug {
    /// Calculate the score for a document.
    fn score(&self, doc_id: u64, term_freq: f32) -> f32;

    /// Get the boost factor for this scorer.
    fn boost(&self) -> f32;

    /// Set the boost factor for this scorer.
    fn set_boost(&mut self, boost: f32);

    /// Get the maximum possible score.
    fn max_score(&self) -> f32;

    /// Get the name of this scorer.
    fn name(&self) -> &'static str;
}

/// BM25 scorer.
///
/// Uses the non-negative IDF form `ln(1 + (N - df + 0.5) / (df + 0.5))`, so
/// very common terms still score above zero. The length norm uses the
/// average document length.
#[derive(Debug, Clone)]
pub struct BM25Scorer {
    /// Document frequency of the term.
    doc_freq: u64,
    /// Total number of documents in the index.
    total_docs: u64,
    /// Average document length.
    avg_doc_length: f64,
    /// Boost factor.
    boost: f32,
    /// BM25 k1 parameter.
    k1: f32,
    /// BM25 b parameter.
    b: f32,
}

impl BM25Scorer {
    /// Create a new BM25 scorer with default parameters (k1 = 1.2, b = 0.75).
    pub fn new(doc_freq: u64, total_docs: u64, avg_doc_length: f64, boost: f32) -> Self {
        BM25Scorer {
            doc_freq,
            total_docs,
            avg_doc_length,
            boost,
            k1: 1.2,
            b: 0.75,
        }
    }

    /// Create a new BM25 scorer with custom k1 and b parameters.
    pub fn with_params(
        doc_freq: u64,
        total_docs: u64,
        avg_doc_length: f64,
        boost: f32,
        k1: f32,
        b: f32,
    ) -> Self {
        BM25Scorer {
            doc_freq,
            total_docs,
            avg_doc_length,
            boost,
            k1,
            b,
        }
    }

    fn idf(&self) -> f32 {
        if self.doc_freq == 0 || self.total_docs == 0 {
            return 0.0;
        }
        let n = self.total_docs as f32;
        let df = self.doc_freq as f32;
        (1.0 + (n - df + 0.5) / (df + 0.5)).ln()
    }

    fn tf(&self, term_freq: f32, doc_length: f32) -> f32 {
        if term_freq == 0.0 {
            return 0.0;
        }
        let avg = self.avg_doc_length as f32;
        let norm = if avg > 0.0 {
            1.0 - self.b + self.b * (doc_length / avg)
        } else {
            1.0
        };
        (term_freq * (self.k1 + 1.0)) / (term_freq + self.k1 * norm)
    }

    /// Get the k1 parameter.
    pub fn k1(&self) -> f32 {
        self.k1
    }

    /// Get the b parameter.
    pub fn b(&self) -> f32 {
        self.b
    }
}

impl Scorer for BM25Scorer {
    fn score(&self, _doc_id: u64, term_freq: f32) -> f32 {
        if self.doc_freq == 0 || self.total_docs == 0 {
            return 0.0;
        }
        // Score against the average document length; per-document lengths
        // would need reader access at score time.
        self.boost * self.idf() * self.tf(term_freq, self.avg_doc_length as f32)
    }

    fn boost(&self) -> f32 {
        self.boost
    }

    fn set_boost(&mut self, boost: f32) {
        self.boost = boost;
    }

    fn max_score(&self) -> f32 {
        if self.doc_freq == 0 || self.total_docs == 0 {
            return 0.0;
        }
        self.boost * self.idf() * (self.k1 + 1.0)
    }

    fn name(&self) -> &'static str {
        "BM25"
    }
}

/// A constant scorer that always returns the same score.
#[derive(Debug, Clone)]
pub struct ConstantScorer {
    score: f32,
    boost: f32,
}

impl ConstantScorer {
    /// Create a new constant scorer.
    pub fn new(score: f32) -> Self {
        ConstantScorer { score, boost: 1.0 }
    }
}

impl Scorer for ConstantScorer {
    fn score(&self, _doc_id: u64, _term_freq: f32) -> f32 {
        self.score * self.boost
    }

    fn boost(&self) -> f32 {
        self.boost
    }

    fn set_boost(&mut self, boost: f32) {
        self.boost = boost;
    }

    fn max_score(&self) -> f32 {
        self.score * self.boost
    }

    fn name(&self) -> &'static str {
        "Constant"
    }
}
