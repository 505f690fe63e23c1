//! Search execution: ranked match sets over an index.

pub mod mset;
pub mod searcher;

pub use self::mset::{MatchSet, SearchHit};
pub use self::searcher::Searcher;
