//! Document structure: an opaque data payload plus weighted positional postings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analysis::Analyzer;
use crate::error::Result;

/// Per-term indexing information inside one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermEntry {
    /// Within-document frequency: accumulated weight of this term's postings.
    pub wdf: u32,
    /// Sorted, deduplicated positions at which the term occurs.
    pub positions: Vec<u32>,
}

/// A document to be indexed.
///
/// Documents carry an opaque `data` payload returned with search results,
/// and a map from term to its postings. Postings record a position and a
/// weight; terms can also be added without positional information.
///
/// # Examples
///
/// ```
/// use xiphos::document::Document;
///
/// let mut doc = Document::new();
/// doc.set_data("is there anybody out there?");
/// doc.add_term("XYzzy");
/// doc.add_posting("is", 1);
/// doc.add_posting("there", 2);
/// assert_eq!(doc.term_count(), 3);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// The opaque data payload.
    data: String,
    /// Term to posting information, kept in term order.
    terms: BTreeMap<String, TermEntry>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Document::default()
    }

    /// Set the document's data payload.
    pub fn set_data<S: Into<String>>(&mut self, data: S) {
        self.data = data.into();
    }

    /// Get the document's data payload.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Add a term without positional information, with weight 1.
    pub fn add_term<S: Into<String>>(&mut self, term: S) {
        self.add_term_with_weight(term, 1);
    }

    /// Add a term without positional information, with the given weight.
    pub fn add_term_with_weight<S: Into<String>>(&mut self, term: S, weight: u32) {
        let entry = self.terms.entry(term.into()).or_default();
        entry.wdf += weight;
    }

    /// Add a posting for a term at the given position, with weight 1.
    pub fn add_posting<S: Into<String>>(&mut self, term: S, position: u32) {
        self.add_posting_with_weight(term, position, 1);
    }

    /// Add a posting for a term at the given position, with the given weight.
    ///
    /// Positions are kept sorted and deduplicated; re-adding a posting at an
    /// existing position only accumulates the weight.
    pub fn add_posting_with_weight<S: Into<String>>(&mut self, term: S, position: u32, weight: u32) {
        let entry = self.terms.entry(term.into()).or_default();
        entry.wdf += weight;
        if let Err(at) = entry.positions.binary_search(&position) {
            entry.positions.insert(at, position);
        }
    }

    /// Get the posting information for a term.
    pub fn term_entry(&self, term: &str) -> Option<&TermEntry> {
        self.terms.get(term)
    }

    /// Check whether the document contains a term.
    pub fn has_term(&self, term: &str) -> bool {
        self.terms.contains_key(term)
    }

    /// Iterate over (term, entry) pairs in term order.
    pub fn terms(&self) -> impl Iterator<Item = (&str, &TermEntry)> {
        self.terms.iter().map(|(t, e)| (t.as_str(), e))
    }

    /// Number of distinct terms.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Document length: the sum of all term wdfs.
    pub fn length(&self) -> u64 {
        self.terms.values().map(|e| u64::from(e.wdf)).sum()
    }

    /// Check if the document has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Analyze `text` and add a posting for each produced token.
    ///
    /// Positions continue after the highest position already present, so
    /// repeated calls append rather than overlap.
    pub fn index_text(&mut self, analyzer: &Analyzer, text: &str) -> Result<()> {
        let base = self
            .terms
            .values()
            .flat_map(|e| e.positions.iter().copied())
            .max()
            .map(|p| p + 1)
            .unwrap_or(0);

        for token in analyzer.analyze(text)? {
            self.add_posting(token.text, base + token.position);
        }
        Ok(())
    }

    /// Create a builder for constructing documents.
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::new()
    }
}

/// A builder for constructing documents in a fluent manner.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    document: Document,
}

impl DocumentBuilder {
    /// Create a new document builder.
    pub fn new() -> Self {
        DocumentBuilder::default()
    }

    /// Set the data payload.
    pub fn data<S: Into<String>>(mut self, data: S) -> Self {
        self.document.set_data(data);
        self
    }

    /// Add a term without positional information.
    pub fn term<S: Into<String>>(mut self, term: S) -> Self {
        self.document.add_term(term);
        self
    }

    /// Add a posting for a term at the given position.
    pub fn posting<S: Into<String>>(mut self, term: S, position: u32) -> Self {
        self.document.add_posting(term, position);
        self
    }

    /// Finish building the document.
    pub fn build(self) -> Document {
        self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Stem;

    #[test]
    fn test_document_postings() {
        let mut doc = Document::new();
        doc.set_data("is there anybody out there?");
        doc.add_term("XYzzy");
        doc.add_posting("is", 1);
        doc.add_posting("there", 2);
        doc.add_posting("anybody", 3);
        doc.add_posting("out", 4);
        doc.add_posting("there", 5);

        assert_eq!(doc.data(), "is there anybody out there?");
        assert_eq!(doc.term_count(), 5);

        let there = doc.term_entry("there").unwrap();
        assert_eq!(there.wdf, 2);
        assert_eq!(there.positions, [2, 5]);

        // add_term carries no positions
        let xyzzy = doc.term_entry("XYzzy").unwrap();
        assert_eq!(xyzzy.wdf, 1);
        assert!(xyzzy.positions.is_empty());

        assert_eq!(doc.length(), 6);
    }

    #[test]
    fn test_duplicate_posting_accumulates_wdf_only() {
        let mut doc = Document::new();
        doc.add_posting("term", 4);
        doc.add_posting("term", 4);

        let entry = doc.term_entry("term").unwrap();
        assert_eq!(entry.wdf, 2);
        assert_eq!(entry.positions, [4]);
    }

    #[test]
    fn test_weighted_posting() {
        let mut doc = Document::new();
        doc.add_posting_with_weight("heavy", 1, 10);

        assert_eq!(doc.term_entry("heavy").unwrap().wdf, 10);
        assert_eq!(doc.length(), 10);
    }

    #[test]
    fn test_terms_iterate_in_term_order() {
        let doc = Document::builder()
            .posting("zebra", 1)
            .posting("apple", 2)
            .build();

        let terms: Vec<&str> = doc.terms().map(|(t, _)| t).collect();
        assert_eq!(terms, ["apple", "zebra"]);
    }

    #[test]
    fn test_index_text_appends_positions() {
        let analyzer = Analyzer::default().with_stem(Stem::new("english").unwrap());
        let mut doc = Document::new();
        doc.index_text(&analyzer, "running water").unwrap();
        doc.index_text(&analyzer, "still water").unwrap();

        assert!(doc.has_term("run"));
        let water = doc.term_entry("water").unwrap();
        assert_eq!(water.wdf, 2);
        assert_eq!(water.positions, [1, 3]);
    }

    #[test]
    fn test_document_serde_round_trip() {
        let doc = Document::builder()
            .data("payload")
            .posting("hello", 0)
            .posting("world", 1)
            .build();

        let json = serde_json::to_string(&doc).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back.data(), "payload");
        assert_eq!(back.term_count(), 2);
        assert_eq!(back.term_entry("world").unwrap().positions, [1]);
    }
}
