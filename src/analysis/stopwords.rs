//! Stopword handling.
//!
//! Carries a built-in English stopword list and the per-batch
//! precomputation that runs every raw stopword through the same
//! normalization pipeline as document terms. Precomputation happens once
//! per batch; a stopword stemmed differently per document would leak
//! through the filter inconsistently.

use crate::analysis::tokenizer::Tokenizer;
use std::collections::BTreeSet;

/// Built-in stopwords for English.
pub const ENGLISH_STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "aren", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "cannot", "could", "couldn", "did", "didn", "do", "does", "doesn",
    "doing", "don", "down", "during", "each", "few", "for", "from", "further", "had", "hadn",
    "has", "hasn", "have", "haven", "having", "he", "her", "here", "hers", "herself", "him",
    "himself", "his", "how", "i", "if", "in", "into", "is", "isn", "it", "its", "itself", "just",
    "me", "more", "most", "mustn", "my", "myself", "no", "nor", "not", "now", "of", "off", "on",
    "once", "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same",
    "shan", "she", "should", "shouldn", "so", "some", "such", "than", "that", "the", "their",
    "theirs", "them", "themselves", "then", "there", "these", "they", "this", "those", "through",
    "to", "too", "under", "until", "up", "very", "was", "wasn", "we", "were", "weren", "what",
    "when", "where", "which", "while", "who", "whom", "why", "will", "with", "won", "would",
    "wouldn", "you", "your", "yours", "yourself", "yourselves",
];

/// Normalize a set of raw stopwords through the batch's tokenizer.
///
/// Each raw stopword can expand to multiple normalized terms (double-pass
/// stemming); all of them are filtered. The result is a sorted set so the
/// ordered form handed to job payloads is reproducible.
pub fn precompute(raw: impl IntoIterator<Item = String>, tokenizer: &Tokenizer) -> BTreeSet<String> {
    raw.into_iter()
        .flat_map(|sw| tokenizer.tokenize(&sw))
        .collect()
}

/// The built-in English list as owned strings.
pub fn builtin_english() -> Vec<String> {
    ENGLISH_STOPWORDS.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::tokenizer::Language;

    #[test]
    fn test_precompute_without_stemming() {
        let tokenizer = Tokenizer::new(Language::English, false);
        let set = precompute(vec!["The".to_string(), "And".to_string()], &tokenizer);
        assert!(set.contains("the"));
        assert!(set.contains("and"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_precompute_with_stemming_covers_stemmed_forms() {
        let tokenizer = Tokenizer::new(Language::English, true);
        let set = precompute(vec!["having".to_string()], &tokenizer);
        // `having` stems to `have`; the raw form must not survive.
        assert!(set.contains("have"));
        assert!(!set.contains("having"));
    }

    #[test]
    fn test_precompute_is_sorted() {
        let tokenizer = Tokenizer::new(Language::English, false);
        let set = precompute(
            vec!["zebra".to_string(), "apple".to_string(), "mango".to_string()],
            &tokenizer,
        );
        let ordered: Vec<_> = set.into_iter().collect();
        assert_eq!(ordered, vec!["apple", "mango", "zebra"]);
    }

    #[test]
    fn test_builtin_english_contains_core_words() {
        let words = builtin_english();
        assert!(words.contains(&"the".to_string()));
        assert!(words.contains(&"and".to_string()));
    }
}
