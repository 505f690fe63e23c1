//! Stemming algorithms for reducing words to their root forms.

use std::fmt;
use std::sync::Arc;

use crate::error::{Result, XiphosError};

/// Trait for stemming algorithms.
pub trait Stemmer: Send + Sync {
    /// Stem a word to its root form.
    fn stem(&self, word: &str) -> String;

    /// Get the name of this stemmer.
    fn name(&self) -> &'static str;
}

/// Check if the character at `pos` acts as a vowel.
///
/// `y` counts as a vowel when it follows a consonant.
fn is_vowel(word: &[char], pos: usize) -> bool {
    match word[pos] {
        'a' | 'e' | 'i' | 'o' | 'u' => true,
        'y' => pos > 0 && !is_vowel(word, pos - 1),
        _ => false,
    }
}

/// The measure of a word: the number of vowel-consonant sequences.
fn measure(word: &[char]) -> usize {
    let n = word.len();
    let mut m = 0;
    let mut i = 0;

    while i < n && !is_vowel(word, i) {
        i += 1;
    }
    while i < n {
        while i < n && is_vowel(word, i) {
            i += 1;
        }
        if i >= n {
            break;
        }
        m += 1;
        while i < n && !is_vowel(word, i) {
            i += 1;
        }
    }

    m
}

fn contains_vowel(word: &[char]) -> bool {
    (0..word.len()).any(|i| is_vowel(word, i))
}

fn ends_double_consonant(word: &[char]) -> bool {
    let n = word.len();
    n >= 2 && word[n - 1] == word[n - 2] && !is_vowel(word, n - 1)
}

/// Consonant-vowel-consonant ending, where the final consonant is not
/// `w`, `x` or `y`.
fn ends_cvc(word: &[char]) -> bool {
    let n = word.len();
    n >= 3
        && !is_vowel(word, n - 3)
        && is_vowel(word, n - 2)
        && !is_vowel(word, n - 1)
        && !matches!(word[n - 1], 'w' | 'x' | 'y')
}

fn chars_of(word: &str) -> Vec<char> {
    word.chars().collect()
}

/// Porter stemming algorithm (Porter, 1980) for English.
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    /// Create a new Porter stemmer.
    pub fn new() -> Self {
        PorterStemmer
    }

    fn replace_suffix(&self, word: &str, old: &str, new: &str, min_measure: usize) -> String {
        if word.ends_with(old) {
            let stem = &word[..word.len() - old.len()];
            if measure(&chars_of(stem)) >= min_measure {
                return format!("{stem}{new}");
            }
        }
        word.to_string()
    }

    // Plurals: sses -> ss, ies -> i, trailing s dropped.
    fn step1a(&self, word: &str) -> String {
        if word.ends_with("sses") {
            format!("{}ss", &word[..word.len() - 4])
        } else if word.ends_with("ies") {
            format!("{}i", &word[..word.len() - 3])
        } else if word.ends_with("ss") {
            word.to_string()
        } else if word.ends_with('s') && word.len() > 1 {
            word[..word.len() - 1].to_string()
        } else {
            word.to_string()
        }
    }

    // Past tense and gerunds: eed/ed/ing, with cleanup of the exposed stem.
    fn step1b(&self, word: &str) -> String {
        let original = word;
        let word = if word.ends_with("eed") {
            self.replace_suffix(word, "eed", "ee", 1)
        } else if word.ends_with("ed") {
            let stem = &word[..word.len() - 2];
            if contains_vowel(&chars_of(stem)) {
                stem.to_string()
            } else {
                word.to_string()
            }
        } else if word.ends_with("ing") {
            let stem = &word[..word.len() - 3];
            if contains_vowel(&chars_of(stem)) {
                stem.to_string()
            } else {
                word.to_string()
            }
        } else {
            word.to_string()
        };

        if word == original {
            return word;
        }

        let chars = chars_of(&word);
        if word.ends_with("at") || word.ends_with("bl") || word.ends_with("iz") {
            format!("{word}e")
        } else if ends_double_consonant(&chars)
            && !word.ends_with('l')
            && !word.ends_with('s')
            && !word.ends_with('z')
        {
            word[..word.len() - 1].to_string()
        } else if measure(&chars) == 1 && ends_cvc(&chars) {
            format!("{word}e")
        } else {
            word
        }
    }

    fn step2(&self, word: &str) -> String {
        const SUFFIXES: &[(&str, &str)] = &[
            ("ational", "ate"),
            ("tional", "tion"),
            ("enci", "ence"),
            ("anci", "ance"),
            ("izer", "ize"),
            ("abli", "able"),
            ("alli", "al"),
            ("entli", "ent"),
            ("eli", "e"),
            ("ousli", "ous"),
            ("ization", "ize"),
            ("ation", "ate"),
            ("ator", "ate"),
            ("alism", "al"),
            ("iveness", "ive"),
            ("fulness", "ful"),
            ("ousness", "ous"),
            ("aliti", "al"),
            ("iviti", "ive"),
            ("biliti", "ble"),
        ];

        for (old, new) in SUFFIXES {
            if word.ends_with(old) {
                return self.replace_suffix(word, old, new, 1);
            }
        }
        word.to_string()
    }

    fn step3(&self, word: &str) -> String {
        const SUFFIXES: &[(&str, &str)] = &[
            ("icate", "ic"),
            ("ative", ""),
            ("alize", "al"),
            ("iciti", "ic"),
            ("ical", "ic"),
            ("ful", ""),
            ("ness", ""),
        ];

        for (old, new) in SUFFIXES {
            if word.ends_with(old) {
                return self.replace_suffix(word, old, new, 1);
            }
        }
        word.to_string()
    }

    fn step4(&self, word: &str) -> String {
        const SUFFIXES: &[&str] = &[
            "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent",
            "ion", "ou", "ism", "ate", "iti", "ous", "ive", "ize",
        ];

        for suffix in SUFFIXES {
            if word.ends_with(suffix) {
                let stem = &word[..word.len() - suffix.len()];
                if measure(&chars_of(stem)) > 1 {
                    // "ion" only drops after s or t
                    if *suffix != "ion" || stem.ends_with('s') || stem.ends_with('t') {
                        return stem.to_string();
                    }
                }
            }
        }
        word.to_string()
    }

    fn step5(&self, word: &str) -> String {
        let word = if word.ends_with('e') {
            let stem = &word[..word.len() - 1];
            let chars = chars_of(stem);
            let m = measure(&chars);
            if m > 1 || (m == 1 && !ends_cvc(&chars)) {
                stem.to_string()
            } else {
                word.to_string()
            }
        } else {
            word.to_string()
        };

        if word.ends_with("ll") && measure(&chars_of(&word)) > 1 {
            word[..word.len() - 1].to_string()
        } else {
            word
        }
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        // The suffix rules are ASCII-oriented; non-ASCII words only get
        // lowercased, like short words.
        if word.chars().count() <= 2 || !word.is_ascii() {
            return word.to_lowercase();
        }

        let word = word.to_lowercase();
        let word = self.step1a(&word);
        let word = self.step1b(&word);
        let word = self.step2(&word);
        let word = self.step3(&word);
        let word = self.step4(&word);
        self.step5(&word)
    }

    fn name(&self) -> &'static str {
        "porter"
    }
}

/// Identity stemmer that returns words unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityStemmer;

impl IdentityStemmer {
    pub fn new() -> Self {
        IdentityStemmer
    }
}

impl Stemmer for IdentityStemmer {
    fn stem(&self, word: &str) -> String {
        word.to_string()
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}

/// A stemmer handle selected by language name.
///
/// `"english"` (aliases `"en"`, `"porter"`) selects the Porter stemmer,
/// `"none"` the identity stemmer. Any other language is an analysis error.
///
/// # Examples
///
/// ```
/// use xiphos::analysis::Stem;
///
/// let stem = Stem::new("english").unwrap();
/// assert_eq!(stem.stem_word("searching"), "search");
/// assert_eq!(stem.description(), "Stem(english)");
/// ```
#[derive(Clone)]
pub struct Stem {
    language: String,
    stemmer: Arc<dyn Stemmer>,
}

impl Stem {
    /// Create a stemmer for the given language.
    pub fn new(language: &str) -> Result<Self> {
        let stemmer: Arc<dyn Stemmer> = match language {
            "english" | "en" | "porter" => Arc::new(PorterStemmer::new()),
            "none" => Arc::new(IdentityStemmer::new()),
            _ => {
                return Err(XiphosError::analysis(format!(
                    "Unknown stemming language: {language}"
                )));
            }
        };
        Ok(Stem {
            language: language.to_string(),
            stemmer,
        })
    }

    /// Stem a single word.
    pub fn stem_word(&self, word: &str) -> String {
        self.stemmer.stem(word)
    }

    /// The language this stemmer was constructed for.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Printable description of this stemmer.
    pub fn description(&self) -> String {
        format!("Stem({})", self.language)
    }
}

impl fmt::Debug for Stem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stem")
            .field("language", &self.language)
            .finish()
    }
}
