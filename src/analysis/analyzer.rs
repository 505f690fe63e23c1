//! Analyzer pipeline combining a tokenizer with an optional stemming step.

use crate::analysis::stemmer::Stem;
use crate::analysis::token::Token;
use crate::analysis::tokenizer::{Tokenizer, UnicodeWordTokenizer};
use crate::error::Result;

/// A text analysis pipeline.
///
/// Runs the tokenizer over input text and, when a stemmer is configured,
/// rewrites each token to its stemmed form. The output tokens carry the
/// positions the document indexing path records as postings.
///
/// # Examples
///
/// ```
/// use xiphos::analysis::{Analyzer, Stem};
///
/// let analyzer = Analyzer::default().with_stem(Stem::new("english").unwrap());
/// let tokens = analyzer.analyze("is there anybody out there?").unwrap();
/// let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
/// assert_eq!(texts, ["is", "there", "anybody", "out", "there"]);
/// ```
pub struct Analyzer {
    tokenizer: Box<dyn Tokenizer>,
    stem: Option<Stem>,
}

impl Analyzer {
    /// Create an analyzer with the given tokenizer and no stemming.
    pub fn new(tokenizer: Box<dyn Tokenizer>) -> Self {
        Analyzer {
            tokenizer,
            stem: None,
        }
    }

    /// Attach a stemmer to this pipeline.
    pub fn with_stem(mut self, stem: Stem) -> Self {
        self.stem = Some(stem);
        self
    }

    /// Analyze the given text into tokens.
    pub fn analyze(&self, text: &str) -> Result<Vec<Token>> {
        let tokens = self.tokenizer.tokenize(text)?;
        let tokens = match &self.stem {
            Some(stem) => tokens
                .map(|token| {
                    let stemmed = stem.stem_word(&token.text);
                    token.with_text(stemmed)
                })
                .collect(),
            None => tokens.collect(),
        };
        Ok(tokens)
    }

    /// Name of the underlying tokenizer.
    pub fn tokenizer_name(&self) -> &'static str {
        self.tokenizer.name()
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Analyzer::new(Box::new(UnicodeWordTokenizer::new()))
    }
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("tokenizer", &self.tokenizer.name())
            .field("stem", &self.stem)
            .finish()
    }
}
