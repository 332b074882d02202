//! Batch scheduling and aggregation.
//!
//! A [`BatchScheduler`] coordinates the analysis of a fixed set of
//! documents, either synchronously (one document per step, in-process)
//! or asynchronously (dispatch-all, then poll a work queue), and merges
//! the per-document results into one ranked cross-document report.
//!
//! The driver repeatedly calls [`BatchScheduler::step`] and
//! [`BatchScheduler::check_progress`] until the batch is complete, then
//! [`BatchScheduler::analysis_success`] and [`BatchScheduler::combine`].
//! A scheduler is single-use: a finished or failed batch is not
//! restarted in place.

pub mod progress;
mod strategy;

use crate::analysis::{stopwords, Language, TermFrequencyAnalyzer, Tokenizer};
use crate::models::{
    AnalysisMode, CombinedReport, CombinedTerm, Document, DocumentId, TermMap,
};
use crate::queue::WorkQueue;
use progress::ProgressTracker;
use std::collections::{BTreeSet, HashMap, HashSet};
use strategy::{AsyncStrategy, Strategy, SyncStrategy};
use thiserror::Error;

/// Errors of the scheduling and aggregation core.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The batch was constructed with no documents.
    #[error("batch contains no documents")]
    EmptyBatch,

    /// Two documents in the batch share an identifier.
    #[error("duplicate document in batch: {0}")]
    DuplicateDocument(DocumentId),

    /// `combine` (or another completion-only operation) was called while
    /// the batch is still in progress.
    #[error("batch is still processing")]
    StillProcessing,

    /// A strategy referenced a document outside the batch.
    #[error("unknown document: {0}")]
    UnknownDocument(DocumentId),

    /// A document was marked processed twice.
    #[error("document already processed: {0}")]
    AlreadyProcessed(DocumentId),
}

/// Batch-wide analysis parameters.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Language of all documents in the batch.
    pub language: Language,
    /// Analyze stems instead of words.
    pub stem: bool,
    /// Extra raw stopwords to normalize and filter, on top of the
    /// built-in list for the language.
    pub extra_stopwords: Vec<String>,
}

/// Coordinates the analysis of one batch of documents.
pub struct BatchScheduler {
    docs: Vec<Document>,
    progress: ProgressTracker,
    strategy: Strategy,
    mode: AnalysisMode,
}

impl BatchScheduler {
    /// Build a scheduler that analyzes one document per step, in-process.
    pub fn new_sync(docs: Vec<Document>, options: BatchOptions) -> Result<Self, SchedulerError> {
        let (progress, stopword_set) = Self::prepare(&docs, &options)?;
        let analyzer = TermFrequencyAnalyzer::new(options.language, options.stem, stopword_set);
        let strategy = Strategy::Sync(SyncStrategy::new(analyzer, docs.len()));
        Ok(Self {
            docs,
            progress,
            strategy,
            mode: AnalysisMode::Sync,
        })
    }

    /// Build a scheduler that dispatches every document to `queue` on its
    /// first step and polls for results on every step after that.
    pub fn new_async(
        docs: Vec<Document>,
        options: BatchOptions,
        queue: Box<dyn WorkQueue>,
    ) -> Result<Self, SchedulerError> {
        let (progress, stopword_set) = Self::prepare(&docs, &options)?;
        let strategy = Strategy::Async(AsyncStrategy::new(
            queue,
            options.language,
            options.stem,
            stopword_set.into_iter().collect(),
        ));
        Ok(Self {
            docs,
            progress,
            strategy,
            mode: AnalysisMode::Async,
        })
    }

    /// Validate the batch and precompute the shared stopword set, once.
    fn prepare(
        docs: &[Document],
        options: &BatchOptions,
    ) -> Result<(ProgressTracker, BTreeSet<String>), SchedulerError> {
        if docs.is_empty() {
            return Err(SchedulerError::EmptyBatch);
        }
        let mut seen = HashSet::new();
        for doc in docs {
            if !seen.insert(doc.id.as_str()) {
                return Err(SchedulerError::DuplicateDocument(doc.id.clone()));
            }
        }

        let tokenizer = Tokenizer::new(options.language, options.stem);
        let mut raw = match options.language {
            Language::English => stopwords::builtin_english(),
            _ => Vec::new(),
        };
        raw.extend(options.extra_stopwords.iter().cloned());
        let stopword_set = stopwords::precompute(raw, &tokenizer);

        let progress = ProgressTracker::new(docs.iter().map(|d| d.id.clone()));
        Ok((progress, stopword_set))
    }

    /// Advance the batch by one scheduling step.
    ///
    /// A no-op once the batch is complete. Never blocks in async mode;
    /// the caller paces repeated polls itself.
    pub async fn step(&mut self) -> Result<(), SchedulerError> {
        let (in_progress, _) = self.progress.check_progress();
        if !in_progress {
            return Ok(());
        }
        self.strategy.step(&self.docs, &mut self.progress).await
    }

    /// Whether the batch is still in progress, and how many documents
    /// have completed.
    pub fn check_progress(&self) -> (bool, usize) {
        self.progress.check_progress()
    }

    /// Whether the finished batch succeeded, and which documents failed.
    pub fn analysis_success(&self) -> (bool, Vec<DocumentId>) {
        self.progress.analysis_success()
    }

    /// Total number of documents in the batch.
    #[allow(dead_code)] // Utility for callers tracking batch size
    pub fn total(&self) -> usize {
        self.progress.total()
    }

    /// The batch's execution mode.
    pub fn mode(&self) -> AnalysisMode {
        self.mode
    }

    /// Merge all completed per-document results into one ranked report.
    ///
    /// Fails with [`SchedulerError::StillProcessing`] while the batch is
    /// in progress. Documents whose analysis failed are skipped; the
    /// report over the successful ones is still produced.
    pub fn combine(&self) -> Result<CombinedReport, SchedulerError> {
        let (in_progress, _) = self.progress.check_progress();
        if in_progress {
            return Err(SchedulerError::StillProcessing);
        }

        let mut terms: Vec<CombinedTerm> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for doc in &self.docs {
            let Some(results) = self.progress.results(&doc.id) else {
                continue;
            };
            fold_document(&mut terms, &mut index, &doc.id, results);
        }

        // Stable sort: terms tied on count keep first-sighting order.
        terms.sort_by(|a, b| b.count.cmp(&a.count));

        Ok(CombinedReport { terms })
    }
}

/// Fold one document's term map into the accumulator.
fn fold_document(
    terms: &mut Vec<CombinedTerm>,
    index: &mut HashMap<String, usize>,
    doc: &str,
    results: &TermMap,
) {
    for (term, stats) in results {
        match index.get(term) {
            Some(&i) => {
                let entry = &mut terms[i];
                entry.count += stats.count;
                entry.documents.push(doc.to_string());
                entry.sentences.extend(stats.sentences.iter().cloned());
            }
            None => {
                index.insert(term.clone(), terms.len());
                terms.push(CombinedTerm {
                    term: term.clone(),
                    count: stats.count,
                    documents: vec![doc.to_string()],
                    sentences: stats.sentences.clone(),
                });
            }
        }
    }
}
