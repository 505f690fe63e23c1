//! Text analysis pipeline: tokenization and stemming.

pub mod analyzer;
pub mod stemmer;
pub mod token;
pub mod tokenizer;

pub use self::analyzer::Analyzer;
pub use self::stemmer::{IdentityStemmer, PorterStemmer, Stem, Stemmer};
pub use self::token::{Token, TokenStream};
pub use self::tokenizer::{Tokenizer, UnicodeWordTokenizer, WhitespaceTokenizer};
