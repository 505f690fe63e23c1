//! Boolean query implementation for combining multiple queries.

use crate::error::Result;
use crate::index::reader::IndexReader;
use crate::query::matcher::{
    AllMatcher, ConjunctionMatcher, DisjunctionMatcher, EmptyMatcher, ExclusionMatcher, Matcher,
};
use crate::query::query::{bm25_for_terms, Query};
use crate::query::scorer::Scorer;
use crate::query::term::TermQuery;

/// Occurrence requirements for boolean clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occur {
    /// The clause must match (AND).
    Must,
    /// The clause should match (OR).
    Should,
    /// The clause must not match (AND_NOT).
    MustNot,
}

/// A clause in a boolean query.
#[derive(Debug)]
pub struct BooleanClause {
    /// The query for this clause.
    pub query: Box<dyn Query>,
    /// The occurrence requirement.
    pub occur: Occur,
}

impl Clone for BooleanClause {
    fn clone(&self) -> Self {
        BooleanClause {
            query: self.query.clone_box(),
            occur: self.occur,
        }
    }
}

impl BooleanClause {
    /// Create a new boolean clause.
    pub fn new(query: Box<dyn Query>, occur: Occur) -> Self {
        BooleanClause { query, occur }
    }

    /// Create a MUST clause.
    pub fn must(query: Box<dyn Query>) -> Self {
        BooleanClause::new(query, Occur::Must)
    }

    /// Create a SHOULD clause.
    pub fn should(query: Box<dyn Query>) -> Self {
        BooleanClause::new(query, Occur::Should)
    }

    /// Create a MUST_NOT clause.
    pub fn must_not(query: Box<dyn Query>) -> Self {
        BooleanClause::new(query, Occur::MustNot)
    }
}

/// A boolean query that combines multiple queries with boolean logic.
///
/// When must clauses are present, should clauses do not constrain matching.
/// A query with only must-not clauses matches every live document except the
/// excluded ones.
///
/// # Examples
///
/// ```
/// use xiphos::query::{BooleanQuery, Query};
///
/// let query = BooleanQuery::or_terms(["smoke", "test", "terms"]);
/// assert_eq!(query.description(), "(smoke OR test OR terms)");
/// ```
#[derive(Debug, Clone)]
pub struct BooleanQuery {
    clauses: Vec<BooleanClause>,
    boost: f32,
}

impl Default for BooleanQuery {
    fn default() -> Self {
        BooleanQuery::new()
    }
}

impl BooleanQuery {
    /// Create a new empty boolean query.
    pub fn new() -> Self {
        BooleanQuery {
            clauses: Vec::new(),
            boost: 1.0,
        }
    }

    /// Create an OR query over the given terms.
    pub fn or_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut query = BooleanQuery::new();
        for term in terms {
            query.add_should(Box::new(TermQuery::new(term)));
        }
        query
    }

    /// Create an AND query over the given terms.
    pub fn and_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut query = BooleanQuery::new();
        for term in terms {
            query.add_must(Box::new(TermQuery::new(term)));
        }
        query
    }

    /// Add a clause to this boolean query.
    pub fn add_clause(&mut self, clause: BooleanClause) {
        self.clauses.push(clause);
    }

    /// Add a MUST clause.
    pub fn add_must(&mut self, query: Box<dyn Query>) {
        self.add_clause(BooleanClause::must(query));
    }

    /// Add a SHOULD clause.
    pub fn add_should(&mut self, query: Box<dyn Query>) {
        self.add_clause(BooleanClause::should(query));
    }

    /// Add a MUST_NOT clause.
    pub fn add_must_not(&mut self, query: Box<dyn Query>) {
        self.add_clause(BooleanClause::must_not(query));
    }

    /// Set the boost factor.
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    /// Get the clauses.
    pub fn clauses(&self) -> &[BooleanClause] {
        &self.clauses
    }

    fn partition(&self) -> (Vec<&dyn Query>, Vec<&dyn Query>, Vec<&dyn Query>) {
        let mut musts = Vec::new();
        let mut shoulds = Vec::new();
        let mut must_nots = Vec::new();
        for clause in &self.clauses {
            match clause.occur {
                Occur::Must => musts.push(clause.query.as_ref()),
                Occur::Should => shoulds.push(clause.query.as_ref()),
                Occur::MustNot => must_nots.push(clause.query.as_ref()),
            }
        }
        (musts, shoulds, must_nots)
    }

    fn matchers_of(
        queries: &[&dyn Query],
        reader: &dyn IndexReader,
    ) -> Result<Vec<Box<dyn Matcher>>> {
        queries.iter().map(|q| q.matcher(reader)).collect()
    }
}

impl Query for BooleanQuery {
    fn matcher(&self, reader: &dyn IndexReader) -> Result<Box<dyn Matcher>> {
        let (musts, shoulds, must_nots) = self.partition();

        let positive: Box<dyn Matcher> = if !musts.is_empty() {
            Box::new(ConjunctionMatcher::new(Self::matchers_of(&musts, reader)?)?)
        } else if !shoulds.is_empty() {
            Box::new(DisjunctionMatcher::new(Self::matchers_of(
                &shoulds, reader,
            )?))
        } else if !must_nots.is_empty() {
            Box::new(AllMatcher::new(reader.doc_ids()))
        } else {
            return Ok(Box::new(EmptyMatcher::new()));
        };

        if must_nots.is_empty() {
            Ok(positive)
        } else {
            let excluded = DisjunctionMatcher::new(Self::matchers_of(&must_nots, reader)?);
            Ok(Box::new(ExclusionMatcher::new(
                positive,
                Box::new(excluded),
            )?))
        }
    }

    fn scorer(&self, reader: &dyn IndexReader) -> Result<Box<dyn Scorer>> {
        let mut terms = Vec::new();
        let (musts, shoulds, _) = self.partition();
        for query in musts.iter().chain(shoulds.iter()) {
            query.query_terms(&mut terms);
        }
        Ok(Box::new(bm25_for_terms(reader, &terms, self.boost)?))
    }

    fn boost(&self) -> f32 {
        self.boost
    }

    fn set_boost(&mut self, boost: f32) {
        self.boost = boost;
    }

    fn description(&self) -> String {
        let (musts, shoulds, must_nots) = self.partition();

        let (positive, op) = if musts.is_empty() {
            (&shoulds, " OR ")
        } else {
            (&musts, " AND ")
        };
        let mut rendered = positive
            .iter()
            .map(|q| q.description())
            .collect::<Vec<_>>()
            .join(op);
        if rendered.is_empty() {
            rendered = "<alldocuments>".to_string();
        }
        for excluded in &must_nots {
            rendered = format!("{rendered} AND_NOT {}", excluded.description());
        }
        format!("({rendered})")
    }

    fn clone_box(&self) -> Box<dyn Query> {
        Box::new(self.clone())
    }

    fn is_empty(&self, reader: &dyn IndexReader) -> Result<bool> {
        let (musts, shoulds, must_nots) = self.partition();
        if !musts.is_empty() {
            for query in &musts {
                if query.is_empty(reader)? {
                    return Ok(true);
                }
            }
            return Ok(false);
        }
        if !shoulds.is_empty() {
            for query in &shoulds {
                if !query.is_empty(reader)? {
                    return Ok(false);
                }
            }
            return Ok(true);
        }
        Ok(must_nots.is_empty())
    }

    fn cost(&self, reader: &dyn IndexReader) -> Result<u64> {
        let mut total = 0;
        for clause in &self.clauses {
            total += clause.query.cost(reader)?;
        }
        Ok(total)
    }

    fn query_terms(&self, out: &mut Vec<String>) {
        let (musts, shoulds, _) = self.partition();
        for query in musts.iter().chain(shoulds.iter()) {
            query.query_terms(out);
        }
    }
}
