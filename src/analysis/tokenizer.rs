//! Token normalization pipeline.
//!
//! Turns raw text into normalized terms: word split, lowercase,
//! alphabetic-only filter, optional double-pass Snowball stemming.
//! Stopwords must be run through the same pipeline before they are
//! compared against document terms.

use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A language the analyzer can stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    English,
    Danish,
    Dutch,
    French,
    German,
    Italian,
    Portuguese,
    Romanian,
    Russian,
    Spanish,
    Swedish,
}

/// Error for a language name the stemmer does not support.
#[derive(Debug, Error)]
#[error("unsupported language: {0}")]
pub struct UnsupportedLanguage(pub String);

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "english" => Ok(Language::English),
            "danish" => Ok(Language::Danish),
            "dutch" => Ok(Language::Dutch),
            "french" => Ok(Language::French),
            "german" => Ok(Language::German),
            "italian" => Ok(Language::Italian),
            "portuguese" => Ok(Language::Portuguese),
            "romanian" => Ok(Language::Romanian),
            "russian" => Ok(Language::Russian),
            "spanish" => Ok(Language::Spanish),
            "swedish" => Ok(Language::Swedish),
            other => Err(UnsupportedLanguage(other.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Language::English => "english",
            Language::Danish => "danish",
            Language::Dutch => "dutch",
            Language::French => "french",
            Language::German => "german",
            Language::Italian => "italian",
            Language::Portuguese => "portuguese",
            Language::Romanian => "romanian",
            Language::Russian => "russian",
            Language::Spanish => "spanish",
            Language::Swedish => "swedish",
        };
        write!(f, "{}", name)
    }
}

impl TryFrom<String> for Language {
    type Error = UnsupportedLanguage;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Language> for String {
    fn from(l: Language) -> String {
        l.to_string()
    }
}

impl Language {
    fn algorithm(self) -> Algorithm {
        match self {
            Language::English => Algorithm::English,
            Language::Danish => Algorithm::Danish,
            Language::Dutch => Algorithm::Dutch,
            Language::French => Algorithm::French,
            Language::German => Algorithm::German,
            Language::Italian => Algorithm::Italian,
            Language::Portuguese => Algorithm::Portuguese,
            Language::Romanian => Algorithm::Romanian,
            Language::Russian => Algorithm::Russian,
            Language::Spanish => Algorithm::Spanish,
            Language::Swedish => Algorithm::Swedish,
        }
    }
}

/// Tokenizer that lowercases, drops non-alphabetic tokens, and
/// optionally stems.
pub struct Tokenizer {
    stemmer: Stemmer,
    stem: bool,
}

impl Tokenizer {
    pub fn new(language: Language, stem: bool) -> Self {
        Self {
            stemmer: Stemmer::create(language.algorithm()),
            stem,
        }
    }

    /// Tokenize a piece of text into normalized terms.
    ///
    /// With stemming enabled, each word yields its first-pass stem, and
    /// additionally the second-pass stem when a second application of the
    /// stemmer changes it again (words like `somewhere` stem to
    /// `somewher` and then `somewh`).
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let words = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty() && w.chars().all(|c| c.is_alphabetic()))
            .map(|w| w.to_lowercase());

        if !self.stem {
            return words.collect();
        }

        let mut terms = Vec::new();
        for word in words {
            let first = self.stemmer.stem(&word).to_string();
            let second = self.stemmer.stem(&first).to_string();
            let differs = second != first;
            terms.push(first);
            if differs {
                terms.push(second);
            }
        }
        terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_parsing() {
        assert_eq!("english".parse::<Language>().unwrap(), Language::English);
        assert_eq!("English".parse::<Language>().unwrap(), Language::English);
        assert_eq!("GERMAN".parse::<Language>().unwrap(), Language::German);
        assert!("klingon".parse::<Language>().is_err());
    }

    #[test]
    fn test_tokenize_lowercases_and_filters() {
        let tokenizer = Tokenizer::new(Language::English, false);
        let terms = tokenizer.tokenize("The Cat sat, 42 times; on the mat!");
        assert_eq!(terms, vec!["the", "cat", "sat", "times", "on", "the", "mat"]);
    }

    #[test]
    fn test_tokenize_drops_mixed_alphanumerics() {
        let tokenizer = Tokenizer::new(Language::English, false);
        let terms = tokenizer.tokenize("abc123 hello");
        assert_eq!(terms, vec!["hello"]);
    }

    #[test]
    fn test_stemming_single_pass_words() {
        let tokenizer = Tokenizer::new(Language::English, true);
        let terms = tokenizer.tokenize("running");
        assert_eq!(terms, vec!["run"]);
    }

    #[test]
    fn test_stemming_double_pass_emits_both_stems() {
        // `somewhere` stems to `somewher`, which stems again to
        // `somewh`; both forms are emitted.
        let tokenizer = Tokenizer::new(Language::English, true);
        let terms = tokenizer.tokenize("somewhere");
        assert_eq!(terms, vec!["somewher", "somewh"]);
    }

    #[test]
    fn test_stemming_stable_stem_emitted_once() {
        // `run` is its own stem; a second pass changes nothing and the
        // term appears exactly once.
        let tokenizer = Tokenizer::new(Language::English, true);
        let terms = tokenizer.tokenize("run");
        assert_eq!(terms, vec!["run"]);
    }

    #[test]
    fn test_empty_text_yields_no_terms() {
        let tokenizer = Tokenizer::new(Language::English, false);
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize("123 456 !!").is_empty());
    }
}
