//! Data models for the term analyzer.
//!
//! This module contains all the core data structures used throughout
//! the application for representing documents, per-document term
//! statistics, and the combined cross-document report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier of a document within a batch (its path or name).
pub type DocumentId = String;

/// A document to analyze: identifier plus raw text.
///
/// Immutable once loaded. The scheduler only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Identifier, unique within the batch.
    pub id: DocumentId,
    /// Full text content.
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<DocumentId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Statistics for a single term within a single document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermStats {
    /// Number of occurrences of the term in the document.
    pub count: usize,
    /// Sentences containing the term, in document order, each listed once.
    pub sentences: Vec<String>,
}

/// Per-document analysis result: normalized term to its statistics.
///
/// `BTreeMap` keeps the per-document term order lexicographic, which is
/// what makes combined-report tie-breaking reproducible.
pub type TermMap = BTreeMap<String, TermStats>;

/// Execution mode of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// One document per step, analyzed in-process.
    Sync,
    /// Dispatch-all to a work queue, then poll.
    Async,
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisMode::Sync => write!(f, "sync"),
            AnalysisMode::Async => write!(f, "async"),
        }
    }
}

/// One entry of the combined report: a term aggregated across documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedTerm {
    /// The normalized term.
    pub term: String,
    /// Total occurrences across all documents.
    pub count: usize,
    /// Documents the term appeared in, in batch order.
    pub documents: Vec<DocumentId>,
    /// Sentences containing the term, concatenated in batch order.
    pub sentences: Vec<String>,
}

/// Metadata about a finished batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Input path the documents were loaded from.
    pub input_path: String,
    /// Date and time of the analysis.
    pub analysis_date: DateTime<Utc>,
    /// Language the batch was analyzed in.
    pub language: String,
    /// Whether stems were analyzed instead of words.
    pub stemmed: bool,
    /// Execution mode.
    pub mode: AnalysisMode,
    /// Number of documents analyzed successfully.
    pub documents_analyzed: usize,
    /// Number of documents whose analysis failed.
    pub documents_failed: usize,
    /// Number of distinct terms in the combined report.
    pub distinct_terms: usize,
    /// Duration of the batch in seconds.
    pub duration_seconds: f64,
}

/// The batch-wide, rank-ordered merge of all documents' term maps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedReport {
    /// Terms sorted by total count, descending. Ties keep first-sighting
    /// order (batch order, then lexicographic within a document).
    pub terms: Vec<CombinedTerm>,
}

impl CombinedReport {
    /// Total occurrences across all terms.
    pub fn total_occurrences(&self) -> usize {
        self.terms.iter().map(|t| t.count).sum()
    }

    /// The top `n` terms by count.
    pub fn top(&self, n: usize) -> &[CombinedTerm] {
        &self.terms[..self.terms.len().min(n)]
    }
}

/// A complete report: combined terms plus run metadata and failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Metadata about the run.
    pub metadata: ReportMetadata,
    /// The ranked combined terms.
    pub combined: CombinedReport,
    /// Documents that failed analysis, by identifier.
    pub failed_documents: Vec<DocumentId>,
}
