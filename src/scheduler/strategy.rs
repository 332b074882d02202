//! Scheduling strategies: how one step advances batch progress.
//!
//! The sync strategy analyzes exactly one document per step, in-process
//! and blocking. The async strategy dispatches every document to a work
//! queue on its first step and polls handles on every step after that,
//! never blocking on a handle that is not ready.

use crate::analysis::TermFrequencyAnalyzer;
use crate::models::{Document, DocumentId};
use crate::queue::{AnalysisJob, JobHandle, WorkQueue};
use crate::scheduler::progress::ProgressTracker;
use crate::scheduler::SchedulerError;
use std::collections::{HashMap, VecDeque};
use tracing::{debug, warn};

/// Dispatch between the two execution modes. Chosen at construction,
/// never switched mid-batch.
pub(crate) enum Strategy {
    Sync(SyncStrategy),
    Async(AsyncStrategy),
}

impl Strategy {
    pub(crate) async fn step(
        &mut self,
        docs: &[Document],
        progress: &mut ProgressTracker,
    ) -> Result<(), SchedulerError> {
        match self {
            Strategy::Sync(s) => s.step(docs, progress),
            Strategy::Async(s) => s.step(docs, progress).await,
        }
    }
}

/// Analyzes documents one per step, in input order.
pub(crate) struct SyncStrategy {
    analyzer: TermFrequencyAnalyzer,
    /// Indices into the batch's document slice, in input order. An
    /// explicit queue keeps the step order reproducible.
    remaining: VecDeque<usize>,
}

impl SyncStrategy {
    pub(crate) fn new(analyzer: TermFrequencyAnalyzer, total: usize) -> Self {
        Self {
            analyzer,
            remaining: (0..total).collect(),
        }
    }

    fn step(
        &mut self,
        docs: &[Document],
        progress: &mut ProgressTracker,
    ) -> Result<(), SchedulerError> {
        let Some(index) = self.remaining.pop_front() else {
            return Ok(());
        };
        let doc = &docs[index];

        match self.analyzer.analyze(&doc.text) {
            Ok(results) => {
                debug!("analyzed {} ({} terms)", doc.id, results.len());
                progress.mark_processed(&doc.id, Some(results))
            }
            Err(e) => {
                // One bad document must not sink the batch; record the
                // failure so the run still terminates.
                warn!("analysis of {} failed: {}", doc.id, e);
                progress.mark_processed(&doc.id, None)
            }
        }
    }
}

/// Dispatch-all then poll against an external work queue.
pub(crate) struct AsyncStrategy {
    queue: Box<dyn WorkQueue>,
    language: crate::analysis::Language,
    stem: bool,
    /// Pre-normalized stopwords, sorted for a reproducible payload.
    stopwords: Vec<String>,
    started: bool,
    /// `None` means the job completed and was already consumed.
    jobs: HashMap<DocumentId, Option<Box<dyn JobHandle>>>,
}

impl AsyncStrategy {
    pub(crate) fn new(
        queue: Box<dyn WorkQueue>,
        language: crate::analysis::Language,
        stem: bool,
        stopwords: Vec<String>,
    ) -> Self {
        Self {
            queue,
            language,
            stem,
            stopwords,
            started: false,
            jobs: HashMap::new(),
        }
    }

    /// Number of handles not yet consumed.
    #[cfg(test)]
    pub(crate) fn live_handles(&self) -> usize {
        self.jobs.values().filter(|j| j.is_some()).count()
    }

    #[cfg(test)]
    pub(crate) fn job_count(&self) -> usize {
        self.jobs.len()
    }

    async fn step(
        &mut self,
        docs: &[Document],
        progress: &mut ProgressTracker,
    ) -> Result<(), SchedulerError> {
        if !self.started {
            self.dispatch_all(docs);
            return Ok(());
        }

        for doc in docs {
            let Some(slot) = self.jobs.get_mut(&doc.id) else {
                continue;
            };
            let ready = slot.as_ref().is_some_and(|handle| handle.ready());
            if !ready {
                continue;
            }
            let mut handle = slot.take().expect("slot checked non-empty");
            match handle.fetch().await {
                Ok(results) => {
                    debug!("job for {} completed ({} terms)", doc.id, results.len());
                    progress.mark_processed(&doc.id, Some(results))?;
                }
                Err(e) => {
                    // A failed remote job is recorded, not propagated, so
                    // the batch cannot stall forever on one document.
                    warn!("job for {} failed: {}", doc.id, e);
                    progress.mark_processed(&doc.id, None)?;
                }
            }
        }
        Ok(())
    }

    fn dispatch_all(&mut self, docs: &[Document]) {
        debug!("dispatching {} analysis jobs", docs.len());
        for doc in docs {
            let job = AnalysisJob {
                text: doc.text.clone(),
                language: self.language,
                stem: self.stem,
                stopwords: self.stopwords.clone(),
            };
            let handle = self.queue.submit(job);
            self.jobs.insert(doc.id.clone(), Some(handle));
        }
        self.started = true;
    }
}
