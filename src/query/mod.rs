//! Query system for searching documents.

pub mod boolean;
pub mod matcher;
pub mod phrase;
#[allow(clippy::module_inception)]
pub mod query;
pub mod scorer;
pub mod term;
pub mod xor;

pub use self::boolean::{BooleanClause, BooleanQuery, Occur};
pub use self::matcher::{Matcher, NO_MORE_DOCS};
pub use self::phrase::PhraseQuery;
pub use self::query::Query;
pub use self::scorer::{BM25Scorer, ConstantScorer, Scorer};
pub use self::term::TermQuery;
pub use self::xor::XorQuery;
