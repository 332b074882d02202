//! Document analysis.
//!
//! This module reduces one document to its per-document term statistics:
//! tokenization and normalization, stopword handling, and the term
//! frequency analyzer itself.

pub mod analyzer;
pub mod stopwords;
pub mod tokenizer;

pub use analyzer::{AnalysisError, TermFrequencyAnalyzer};
pub use tokenizer::{Language, Tokenizer};
