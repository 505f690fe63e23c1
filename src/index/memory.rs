//! Writable in-memory inverted index.

use ahash::AHashMap;

use crate::document::Document;
use crate::error::{Result, XiphosError};
use crate::index::posting::{Posting, TermInfo};
use crate::index::reader::IndexReader;

#[derive(Debug, Default)]
struct PostingList {
    postings: Vec<Posting>,
    collection_freq: u64,
}

/// An in-memory inverted index.
///
/// Documents are assigned ascending ids starting at 0. Deletion removes the
/// document's postings and updates index statistics; ids are never reused.
///
/// # Examples
///
/// ```
/// use xiphos::document::Document;
/// use xiphos::index::{IndexReader, MemoryIndex};
///
/// let mut index = MemoryIndex::new();
/// let mut doc = Document::new();
/// doc.add_posting("hello", 0);
/// index.add_document(doc).unwrap();
/// assert_eq!(index.doc_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryIndex {
    docs: Vec<Option<Document>>,
    postings: AHashMap<String, PostingList>,
    live_docs: u64,
    total_len: u64,
}

impl MemoryIndex {
    /// Create a new empty in-memory index.
    pub fn new() -> Self {
        MemoryIndex::default()
    }

    /// Add a document, returning its assigned id.
    pub fn add_document(&mut self, doc: Document) -> Result<u64> {
        let doc_id = self.docs.len() as u64;

        for (term, entry) in doc.terms() {
            let list = self.postings.entry(term.to_string()).or_default();
            list.postings
                .push(Posting::new(doc_id, entry.wdf, entry.positions.clone()));
            list.collection_freq += u64::from(entry.wdf);
        }

        self.live_docs += 1;
        self.total_len += doc.length();
        self.docs.push(Some(doc));
        Ok(doc_id)
    }

    /// Delete a document by id.
    ///
    /// Returns `Ok(false)` when the id is unknown or already deleted.
    pub fn delete_document(&mut self, doc_id: u64) -> Result<bool> {
        let slot = match self.docs.get_mut(doc_id as usize) {
            Some(slot) => slot,
            None => return Ok(false),
        };
        let doc = match slot.take() {
            Some(doc) => doc,
            None => return Ok(false),
        };

        for (term, entry) in doc.terms() {
            let remove_list = if let Some(list) = self.postings.get_mut(term) {
                list.postings.retain(|p| p.doc_id != doc_id);
                list.collection_freq -= u64::from(entry.wdf);
                list.postings.is_empty()
            } else {
                false
            };
            if remove_list {
                self.postings.remove(term);
            }
        }

        self.live_docs -= 1;
        self.total_len -= doc.length();
        Ok(true)
    }

    /// Get a live document by id.
    pub fn document(&self, doc_id: u64) -> Option<&Document> {
        self.docs.get(doc_id as usize).and_then(|d| d.as_ref())
    }

    /// Total number of term occurrences in the index.
    pub fn total_length(&self) -> u64 {
        self.total_len
    }

    /// Number of distinct indexed terms.
    pub fn unique_terms(&self) -> usize {
        self.postings.len()
    }
}

impl IndexReader for MemoryIndex {
    fn doc_count(&self) -> u64 {
        self.live_docs
    }

    fn max_doc(&self) -> u64 {
        self.docs.len() as u64
    }

    fn doc_ids(&self) -> Vec<u64> {
        self.docs
            .iter()
            .enumerate()
            .filter_map(|(i, d)| d.as_ref().map(|_| i as u64))
            .collect()
    }

    fn term_info(&self, term: &str) -> Result<Option<TermInfo>> {
        Ok(self.postings.get(term).map(|list| TermInfo {
            doc_freq: list.postings.len() as u64,
            collection_freq: list.collection_freq,
        }))
    }

    fn postings(&self, term: &str) -> Result<Option<Vec<Posting>>> {
        Ok(self.postings.get(term).map(|list| list.postings.clone()))
    }

    fn doc_length(&self, doc_id: u64) -> Result<Option<u64>> {
        match self.docs.get(doc_id as usize) {
            Some(Some(doc)) => Ok(Some(doc.length())),
            Some(None) => Ok(None),
            None => Err(XiphosError::index(format!(
                "Document id out of range: {doc_id}"
            ))),
        }
    }

    fn avg_doc_length(&self) -> f64 {
        if self.live_docs == 0 {
            0.0
        } else {
            self.total_len as f64 / self.live_docs as f64
        }
    }
}
