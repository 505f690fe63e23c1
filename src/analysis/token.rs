//! Token types for text analysis.
//!
//! A [`Token`] is the unit that flows through the analysis pipeline: the
//! tokenizer produces them, filters such as stemming rewrite them, and the
//! document indexing path turns them into positional postings.
//!
//! # Examples
//!
//! ```
//! use xiphos::analysis::token::Token;
//!
//! let token = Token::new("hello", 0);
//! assert_eq!(token.text, "hello");
//! assert_eq!(token.position, 0);
//! ```

use serde::{Deserialize, Serialize};

/// A single unit of text after tokenization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The token's text content.
    pub text: String,
    /// Position in the token stream (0-based).
    pub position: u32,
}

impl Token {
    /// Create a new token.
    pub fn new<S: Into<String>>(text: S, position: u32) -> Self {
        Token {
            text: text.into(),
            position,
        }
    }

    /// Return a copy of this token with different text, keeping the position.
    pub fn with_text<S: Into<String>>(&self, text: S) -> Self {
        Token {
            text: text.into(),
            position: self.position,
        }
    }
}

/// A stream of tokens produced by a tokenizer.
pub type TokenStream = Box<dyn Iterator<Item = Token> + Send>;
