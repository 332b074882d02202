//! Term frequency analysis of a single document.
//!
//! Splits the document into sentences, normalizes each sentence into
//! terms, filters stopwords, and accumulates per-term occurrence counts
//! together with the sentences each term appears in.

use crate::analysis::tokenizer::{Language, Tokenizer};
use crate::models::{TermMap, TermStats};
use std::collections::BTreeSet;
use thiserror::Error;

/// Failure of a single document's analysis.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// The document had no text content.
    #[error("document is empty")]
    EmptyDocument,

    /// The worker executing the analysis failed before producing a result.
    #[error("analysis worker failed: {0}")]
    Worker(String),
}

/// Analyzer that finds occurrences of terms (words or stems) within one
/// document.
pub struct TermFrequencyAnalyzer {
    tokenizer: Tokenizer,
    stopwords: BTreeSet<String>,
}

impl TermFrequencyAnalyzer {
    /// Create an analyzer for the given language and stemming mode.
    ///
    /// `stopwords` must already be normalized through the same pipeline
    /// (see [`crate::analysis::stopwords::precompute`]).
    pub fn new(language: Language, stem: bool, stopwords: BTreeSet<String>) -> Self {
        Self {
            tokenizer: Tokenizer::new(language, stem),
            stopwords,
        }
    }

    /// Analyze a document's text into its term map.
    pub fn analyze(&self, text: &str) -> Result<TermMap, AnalysisError> {
        if text.trim().is_empty() {
            return Err(AnalysisError::EmptyDocument);
        }

        let mut terms = TermMap::new();
        for sentence in split_sentences(text) {
            let mut seen_in_sentence = BTreeSet::new();
            for term in self.tokenizer.tokenize(&sentence) {
                if self.stopwords.contains(&term) {
                    continue;
                }
                let entry = terms.entry(term.clone()).or_insert_with(|| TermStats {
                    count: 0,
                    sentences: Vec::new(),
                });
                entry.count += 1;
                // Each sentence is listed once per term.
                if seen_in_sentence.insert(term) {
                    entry.sentences.push(sentence.clone());
                }
            }
        }
        Ok(terms)
    }
}

/// Split text into sentences on `.`, `!` and `?` boundaries.
///
/// The terminator stays attached to its sentence; surrounding whitespace
/// (including newlines) is trimmed and empty fragments are dropped.
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();

    for c in text.chars() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') {
            push_sentence(&mut sentences, &mut current);
        }
    }
    push_sentence(&mut sentences, &mut current);

    sentences
}

fn push_sentence(sentences: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if trimmed.chars().any(|c| c.is_alphanumeric()) {
        sentences.push(trimmed.replace(['\n', '\r'], " "));
    }
    current.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer(stem: bool, stopwords: &[&str]) -> TermFrequencyAnalyzer {
        TermFrequencyAnalyzer::new(
            Language::English,
            stem,
            stopwords.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn test_empty_document_fails() {
        let a = analyzer(false, &[]);
        assert_eq!(a.analyze(""), Err(AnalysisError::EmptyDocument));
        assert_eq!(a.analyze("   \n "), Err(AnalysisError::EmptyDocument));
    }

    #[test]
    fn test_counts_occurrences() {
        let a = analyzer(false, &[]);
        let terms = a.analyze("Cat cat dog. Cat!").unwrap();
        assert_eq!(terms["cat"].count, 3);
        assert_eq!(terms["dog"].count, 1);
    }

    #[test]
    fn test_sentences_listed_once_per_term() {
        let a = analyzer(false, &[]);
        let terms = a.analyze("The cat sat. A cat ran.").unwrap();
        assert_eq!(
            terms["cat"].sentences,
            vec!["The cat sat.".to_string(), "A cat ran.".to_string()]
        );
        // Repeated within one sentence still lists the sentence once.
        let terms = a.analyze("Cat cat cat.").unwrap();
        assert_eq!(terms["cat"].count, 3);
        assert_eq!(terms["cat"].sentences.len(), 1);
    }

    #[test]
    fn test_stopwords_filtered_after_normalization() {
        let a = analyzer(false, &["the", "a"]);
        let terms = a.analyze("The cat sat on a mat.").unwrap();
        assert!(!terms.contains_key("the"));
        assert!(!terms.contains_key("a"));
        assert!(terms.contains_key("cat"));
        assert!(terms.contains_key("mat"));
    }

    #[test]
    fn test_stemmed_analysis_groups_word_forms() {
        let a = analyzer(true, &[]);
        let terms = a.analyze("Running runs. He ran a run.").unwrap();
        assert!(terms.contains_key("run"));
        assert!(terms["run"].count >= 3);
    }

    #[test]
    fn test_split_sentences_boundaries() {
        let sentences = split_sentences("One. Two! Three? Four");
        assert_eq!(sentences, vec!["One.", "Two!", "Three?", "Four"]);
    }

    #[test]
    fn test_split_sentences_drops_empty_fragments() {
        let sentences = split_sentences("One... Two.");
        assert_eq!(sentences, vec!["One.", "Two."]);
    }

    #[test]
    fn test_terms_are_lexicographically_ordered() {
        let a = analyzer(false, &[]);
        let terms = a.analyze("zebra apple mango.").unwrap();
        let keys: Vec<_> = terms.keys().cloned().collect();
        assert_eq!(keys, vec!["apple", "mango", "zebra"]);
    }
}
