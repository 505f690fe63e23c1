//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first step of the analysis pipeline, splitting input
//! text into [`Token`]s with 0-based positions.
//!
//! # Available Tokenizers
//!
//! - [`WhitespaceTokenizer`] - splits on whitespace, keeps token text as-is
//! - [`UnicodeWordTokenizer`] - Unicode word boundaries, lowercased

use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer.
    fn name(&self) -> &'static str;
}

/// Tokenizer that splits text on whitespace.
///
/// Token text is kept verbatim; no case folding or punctuation stripping.
#[derive(Debug, Clone, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer.
    pub fn new() -> Self {
        WhitespaceTokenizer
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = text
            .split_whitespace()
            .enumerate()
            .map(|(i, word)| Token::new(word, i as u32))
            .collect();
        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

/// Tokenizer that splits text on Unicode word boundaries.
///
/// Punctuation is dropped and token text is lowercased, which is the form
/// the indexing path expects.
#[derive(Debug, Clone, Default)]
pub struct UnicodeWordTokenizer;

impl UnicodeWordTokenizer {
    /// Create a new Unicode word tokenizer.
    pub fn new() -> Self {
        UnicodeWordTokenizer
    }
}

impl Tokenizer for UnicodeWordTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = text
            .unicode_words()
            .enumerate()
            .map(|(i, word)| Token::new(word.to_lowercase(), i as u32))
            .collect();
        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "unicode_word"
    }
}
