//! Matchers: document-at-a-time iteration over query matches.
//!
//! A matcher is positioned on its first matching document at construction
//! and reports [`NO_MORE_DOCS`] once exhausted. Compound matchers own their
//! child matchers and keep them aligned as they advance.

use crate::error::Result;
use crate::index::posting::Posting;

/// Sentinel document id reported by an exhausted matcher.
pub const NO_MORE_DOCS: u64 = u64::MAX;

/// Trait for iterating over the documents matching a query.
pub trait Matcher: Send {
    /// Current document id, or [`NO_MORE_DOCS`] when exhausted.
    fn doc_id(&self) -> u64;

    /// Advance to the next matching document.
    ///
    /// Returns `false` when the matcher is exhausted.
    fn next(&mut self) -> Result<bool>;

    /// Advance to the first matching document with id >= `target`.
    fn skip_to(&mut self, target: u64) -> Result<bool>;

    /// Term frequency contribution at the current document.
    fn term_freq(&self) -> f32;

    /// Check whether this matcher is exhausted.
    fn is_exhausted(&self) -> bool {
        self.doc_id() == NO_MORE_DOCS
    }
}

/// A matcher that never matches anything.
#[derive(Debug, Default)]
pub struct EmptyMatcher;

impl EmptyMatcher {
    pub fn new() -> Self {
        EmptyMatcher
    }
}

impl Matcher for EmptyMatcher {
    fn doc_id(&self) -> u64 {
        NO_MORE_DOCS
    }

    fn next(&mut self) -> Result<bool> {
        Ok(false)
    }

    fn skip_to(&mut self, _target: u64) -> Result<bool> {
        Ok(false)
    }

    fn term_freq(&self) -> f32 {
        0.0
    }
}

/// A matcher over every given document id, with constant term frequency.
///
/// Used for pure-exclusion queries, which match all live documents except
/// the excluded ones.
#[derive(Debug)]
pub struct AllMatcher {
    doc_ids: Vec<u64>,
    current: usize,
}

impl AllMatcher {
    /// Create a matcher over ascending document ids.
    pub fn new(doc_ids: Vec<u64>) -> Self {
        AllMatcher {
            doc_ids,
            current: 0,
        }
    }
}

impl Matcher for AllMatcher {
    fn doc_id(&self) -> u64 {
        self.doc_ids
            .get(self.current)
            .copied()
            .unwrap_or(NO_MORE_DOCS)
    }

    fn next(&mut self) -> Result<bool> {
        if self.current < self.doc_ids.len() {
            self.current += 1;
        }
        Ok(self.current < self.doc_ids.len())
    }

    fn skip_to(&mut self, target: u64) -> Result<bool> {
        while self.current < self.doc_ids.len() && self.doc_ids[self.current] < target {
            self.current += 1;
        }
        Ok(self.current < self.doc_ids.len())
    }

    fn term_freq(&self) -> f32 {
        1.0
    }
}

/// A matcher over one term's posting list.
#[derive(Debug)]
pub struct PostingMatcher {
    postings: Vec<Posting>,
    current: usize,
}

impl PostingMatcher {
    /// Create a matcher over a posting list in ascending doc id order.
    pub fn new(postings: Vec<Posting>) -> Self {
        PostingMatcher {
            postings,
            current: 0,
        }
    }

    /// Positions of the term within the current document.
    pub fn positions(&self) -> &[u32] {
        self.postings
            .get(self.current)
            .map(|p| p.positions.as_slice())
            .unwrap_or(&[])
    }
}

impl Matcher for PostingMatcher {
    fn doc_id(&self) -> u64 {
        self.postings
            .get(self.current)
            .map(|p| p.doc_id)
            .unwrap_or(NO_MORE_DOCS)
    }

    fn next(&mut self) -> Result<bool> {
        if self.current < self.postings.len() {
            self.current += 1;
        }
        Ok(self.current < self.postings.len())
    }

    fn skip_to(&mut self, target: u64) -> Result<bool> {
        while self.current < self.postings.len() && self.postings[self.current].doc_id < target {
            self.current += 1;
        }
        Ok(self.current < self.postings.len())
    }

    fn term_freq(&self) -> f32 {
        self.postings
            .get(self.current)
            .map(|p| p.tf as f32)
            .unwrap_or(0.0)
    }
}

/// Matches documents matched by at least one child (OR).
pub struct DisjunctionMatcher {
    children: Vec<Box<dyn Matcher>>,
    current: u64,
}

impl DisjunctionMatcher {
    pub fn new(children: Vec<Box<dyn Matcher>>) -> Self {
        let current = children
            .iter()
            .map(|c| c.doc_id())
            .min()
            .unwrap_or(NO_MORE_DOCS);
        DisjunctionMatcher { children, current }
    }

    fn refresh(&mut self) {
        self.current = self
            .children
            .iter()
            .map(|c| c.doc_id())
            .min()
            .unwrap_or(NO_MORE_DOCS);
    }
}

impl Matcher for DisjunctionMatcher {
    fn doc_id(&self) -> u64 {
        self.current
    }

    fn next(&mut self) -> Result<bool> {
        if self.current == NO_MORE_DOCS {
            return Ok(false);
        }
        let current = self.current;
        for child in &mut self.children {
            if child.doc_id() == current {
                child.next()?;
            }
        }
        self.refresh();
        Ok(self.current != NO_MORE_DOCS)
    }

    fn skip_to(&mut self, target: u64) -> Result<bool> {
        for child in &mut self.children {
            if child.doc_id() < target {
                child.skip_to(target)?;
            }
        }
        self.refresh();
        Ok(self.current != NO_MORE_DOCS)
    }

    fn term_freq(&self) -> f32 {
        self.children
            .iter()
            .filter(|c| c.doc_id() == self.current)
            .map(|c| c.term_freq())
            .sum()
    }
}

/// Matches documents matched by every child (AND).
pub struct ConjunctionMatcher {
    children: Vec<Box<dyn Matcher>>,
    current: u64,
}

impl ConjunctionMatcher {
    pub fn new(children: Vec<Box<dyn Matcher>>) -> Result<Self> {
        let mut matcher = ConjunctionMatcher {
            children,
            current: NO_MORE_DOCS,
        };
        matcher.align()?;
        Ok(matcher)
    }

    /// Advance children until they agree on a document id.
    fn align(&mut self) -> Result<()> {
        if self.children.is_empty() {
            self.current = NO_MORE_DOCS;
            return Ok(());
        }
        loop {
            let mut target = 0u64;
            for child in &self.children {
                let doc = child.doc_id();
                if doc == NO_MORE_DOCS {
                    self.current = NO_MORE_DOCS;
                    return Ok(());
                }
                target = target.max(doc);
            }
            for child in &mut self.children {
                if child.doc_id() < target {
                    child.skip_to(target)?;
                }
            }
            if self.children.iter().all(|c| c.doc_id() == target) {
                self.current = target;
                return Ok(());
            }
        }
    }
}

impl Matcher for ConjunctionMatcher {
    fn doc_id(&self) -> u64 {
        self.current
    }

    fn next(&mut self) -> Result<bool> {
        if self.current == NO_MORE_DOCS {
            return Ok(false);
        }
        self.children[0].next()?;
        self.align()?;
        Ok(self.current != NO_MORE_DOCS)
    }

    fn skip_to(&mut self, target: u64) -> Result<bool> {
        if self.current == NO_MORE_DOCS {
            return Ok(false);
        }
        for child in &mut self.children {
            if child.doc_id() < target {
                child.skip_to(target)?;
            }
        }
        self.align()?;
        Ok(self.current != NO_MORE_DOCS)
    }

    fn term_freq(&self) -> f32 {
        self.children.iter().map(|c| c.term_freq()).sum()
    }
}

/// Matches documents from `include` that `exclude` does not match (AND_NOT).
pub struct ExclusionMatcher {
    include: Box<dyn Matcher>,
    exclude: Box<dyn Matcher>,
}

impl ExclusionMatcher {
    pub fn new(include: Box<dyn Matcher>, exclude: Box<dyn Matcher>) -> Result<Self> {
        let mut matcher = ExclusionMatcher { include, exclude };
        matcher.advance_past_excluded()?;
        Ok(matcher)
    }

    fn advance_past_excluded(&mut self) -> Result<()> {
        loop {
            let doc = self.include.doc_id();
            if doc == NO_MORE_DOCS {
                return Ok(());
            }
            if self.exclude.doc_id() < doc {
                self.exclude.skip_to(doc)?;
            }
            if self.exclude.doc_id() != doc {
                return Ok(());
            }
            self.include.next()?;
        }
    }
}

impl Matcher for ExclusionMatcher {
    fn doc_id(&self) -> u64 {
        self.include.doc_id()
    }

    fn next(&mut self) -> Result<bool> {
        self.include.next()?;
        self.advance_past_excluded()?;
        Ok(self.include.doc_id() != NO_MORE_DOCS)
    }

    fn skip_to(&mut self, target: u64) -> Result<bool> {
        self.include.skip_to(target)?;
        self.advance_past_excluded()?;
        Ok(self.include.doc_id() != NO_MORE_DOCS)
    }

    fn term_freq(&self) -> f32 {
        self.include.term_freq()
    }
}

/// Matches documents matched by an odd number of children (XOR).
pub struct XorMatcher {
    children: Vec<Box<dyn Matcher>>,
    current: u64,
}

impl XorMatcher {
    pub fn new(children: Vec<Box<dyn Matcher>>) -> Result<Self> {
        let mut matcher = XorMatcher {
            children,
            current: NO_MORE_DOCS,
        };
        matcher.advance_to_odd()?;
        Ok(matcher)
    }

    /// Advance to the next candidate where an odd number of children match.
    fn advance_to_odd(&mut self) -> Result<()> {
        loop {
            let candidate = self
                .children
                .iter()
                .map(|c| c.doc_id())
                .min()
                .unwrap_or(NO_MORE_DOCS);
            if candidate == NO_MORE_DOCS {
                self.current = NO_MORE_DOCS;
                return Ok(());
            }
            let matching = self
                .children
                .iter()
                .filter(|c| c.doc_id() == candidate)
                .count();
            if matching % 2 == 1 {
                self.current = candidate;
                return Ok(());
            }
            for child in &mut self.children {
                if child.doc_id() == candidate {
                    child.next()?;
                }
            }
        }
    }
}

impl Matcher for XorMatcher {
    fn doc_id(&self) -> u64 {
        self.current
    }

    fn next(&mut self) -> Result<bool> {
        if self.current == NO_MORE_DOCS {
            return Ok(false);
        }
        let current = self.current;
        for child in &mut self.children {
            if child.doc_id() == current {
                child.next()?;
            }
        }
        self.advance_to_odd()?;
        Ok(self.current != NO_MORE_DOCS)
    }

    fn skip_to(&mut self, target: u64) -> Result<bool> {
        for child in &mut self.children {
            if child.doc_id() < target {
                child.skip_to(target)?;
            }
        }
        self.advance_to_odd()?;
        Ok(self.current != NO_MORE_DOCS)
    }

    fn term_freq(&self) -> f32 {
        self.children
            .iter()
            .filter(|c| c.doc_id() == self.current)
            .map(|c| c.term_freq())
            .sum()
    }
}

/// Matches documents where the phrase terms occur at increasing positions
/// within a window.
pub struct PhraseMatcher {
    lists: Vec<Vec<Posting>>,
    cursors: Vec<usize>,
    window: u32,
    current: u64,
    phrase_freq: u32,
}

impl PhraseMatcher {
    /// Create a phrase matcher over one posting list per phrase term.
    ///
    /// `window` is the maximum span (in positions, inclusive) an occurrence
    /// may cover.
    pub fn new(lists: Vec<Vec<Posting>>, window: u32) -> Result<Self> {
        let cursors = vec![0; lists.len()];
        let mut matcher = PhraseMatcher {
            lists,
            cursors,
            window,
            current: NO_MORE_DOCS,
            phrase_freq: 0,
        };
        if matcher.lists.is_empty() || matcher.lists.iter().any(|l| l.is_empty()) {
            return Ok(matcher);
        }
        matcher.align(0)?;
        Ok(matcher)
    }

    fn doc_at(&self, term: usize) -> u64 {
        self.lists[term]
            .get(self.cursors[term])
            .map(|p| p.doc_id)
            .unwrap_or(NO_MORE_DOCS)
    }

    fn skip_term_to(&mut self, term: usize, target: u64) {
        while self.cursors[term] < self.lists[term].len()
            && self.lists[term][self.cursors[term]].doc_id < target
        {
            self.cursors[term] += 1;
        }
    }

    /// Align all cursors on a common document at or after `target` where the
    /// phrase actually occurs.
    fn align(&mut self, mut target: u64) -> Result<()> {
        'outer: loop {
            for term in 0..self.lists.len() {
                self.skip_term_to(term, target);
                let doc = self.doc_at(term);
                if doc == NO_MORE_DOCS {
                    self.current = NO_MORE_DOCS;
                    self.phrase_freq = 0;
                    return Ok(());
                }
                if doc > target {
                    target = doc;
                    continue 'outer;
                }
            }
            // All terms present in `target`; check positions.
            let freq = self.count_occurrences();
            if freq > 0 {
                self.current = target;
                self.phrase_freq = freq;
                return Ok(());
            }
            target += 1;
        }
    }

    /// Count phrase occurrences at the currently aligned document.
    ///
    /// For each starting position of the first term, greedily picks the
    /// smallest strictly-increasing position of each later term; the pick
    /// minimizes the span, so the window test is exact.
    fn count_occurrences(&self) -> u32 {
        let mut count = 0;
        let first = &self.lists[0][self.cursors[0]].positions;
        for &start in first {
            let mut prev = start;
            let mut complete = true;
            for term in 1..self.lists.len() {
                let positions = &self.lists[term][self.cursors[term]].positions;
                match positions.iter().find(|&&p| p > prev) {
                    Some(&p) => prev = p,
                    None => {
                        complete = false;
                        break;
                    }
                }
            }
            if complete && prev - start < self.window {
                count += 1;
            }
        }
        count
    }
}

impl Matcher for PhraseMatcher {
    fn doc_id(&self) -> u64 {
        self.current
    }

    fn next(&mut self) -> Result<bool> {
        if self.current == NO_MORE_DOCS {
            return Ok(false);
        }
        let target = self.current + 1;
        self.align(target)?;
        Ok(self.current != NO_MORE_DOCS)
    }

    fn skip_to(&mut self, target: u64) -> Result<bool> {
        if self.current == NO_MORE_DOCS {
            return Ok(false);
        }
        if target > self.current {
            self.align(target)?;
        }
        Ok(self.current != NO_MORE_DOCS)
    }

    fn term_freq(&self) -> f32 {
        self.phrase_freq as f32
    }
}
