//! Per-document completion state for a batch.
//!
//! All strategies advance the batch through one mutation point,
//! [`ProgressTracker::mark_processed`], so the completed count can never
//! double-count a document.

use crate::models::{DocumentId, TermMap};
use crate::scheduler::SchedulerError;
use std::collections::HashMap;

/// State of one document within the batch.
#[derive(Debug, Clone, Default)]
pub struct ProgressEntry {
    /// Whether the document has been processed (successfully or not).
    pub processed: bool,
    /// Analysis results; `None` after processing means the analysis failed.
    pub results: Option<TermMap>,
}

/// Completion state of the whole batch.
///
/// The key set is fixed at construction to exactly the input documents
/// and never shrinks.
#[derive(Debug)]
pub struct ProgressTracker {
    order: Vec<DocumentId>,
    details: HashMap<DocumentId, ProgressEntry>,
    completed: usize,
}

impl ProgressTracker {
    /// Create a tracker for the given documents, all unprocessed.
    pub fn new(documents: impl IntoIterator<Item = DocumentId>) -> Self {
        let order: Vec<DocumentId> = documents.into_iter().collect();
        let details = order
            .iter()
            .map(|id| (id.clone(), ProgressEntry::default()))
            .collect();
        Self {
            order,
            details,
            completed: 0,
        }
    }

    /// Total number of documents in the batch.
    pub fn total(&self) -> usize {
        self.order.len()
    }

    /// Mark a document processed, storing its results.
    ///
    /// `results = None` records a failed analysis: the document still
    /// counts as processed so the batch terminates, but it shows up in
    /// [`ProgressTracker::analysis_success`]'s failed list.
    pub fn mark_processed(
        &mut self,
        doc: &str,
        results: Option<TermMap>,
    ) -> Result<(), SchedulerError> {
        let entry = self
            .details
            .get_mut(doc)
            .ok_or_else(|| SchedulerError::UnknownDocument(doc.to_string()))?;
        if entry.processed {
            return Err(SchedulerError::AlreadyProcessed(doc.to_string()));
        }
        entry.processed = true;
        entry.results = results;
        self.completed += 1;
        Ok(())
    }

    /// Whether analysis is still in progress, and how many documents are
    /// completed.
    pub fn check_progress(&self) -> (bool, usize) {
        (self.completed < self.total(), self.completed)
    }

    /// Whether the finished batch succeeded, and which documents failed.
    ///
    /// While in progress this returns `(false, [])`: success cannot be
    /// judged mid-run. Success means no document has an absent result;
    /// a completed batch is always fully processed, so checking results
    /// (not the processed flags) is what distinguishes recorded failures.
    pub fn analysis_success(&self) -> (bool, Vec<DocumentId>) {
        let (in_progress, _) = self.check_progress();
        if in_progress {
            return (false, Vec::new());
        }

        let failed: Vec<DocumentId> = self
            .order
            .iter()
            .filter(|id| self.details[*id].results.is_none())
            .cloned()
            .collect();
        (failed.is_empty(), failed)
    }

    /// Results of a processed document, if any.
    pub fn results(&self, doc: &str) -> Option<&TermMap> {
        self.details.get(doc).and_then(|e| e.results.as_ref())
    }

    /// Whether a document has been processed.
    #[allow(dead_code)] // Utility for assertions and future inspection
    pub fn is_processed(&self, doc: &str) -> bool {
        self.details.get(doc).is_some_and(|e| e.processed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TermStats;

    fn ids(names: &[&str]) -> Vec<DocumentId> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn some_results() -> TermMap {
        let mut map = TermMap::new();
        map.insert(
            "cat".to_string(),
            TermStats {
                count: 1,
                sentences: vec!["A cat.".to_string()],
            },
        );
        map
    }

    #[test]
    fn test_fresh_tracker() {
        let tracker = ProgressTracker::new(ids(&["a.txt", "b.txt"]));
        assert_eq!(tracker.total(), 2);
        assert_eq!(tracker.check_progress(), (true, 0));
        assert!(!tracker.is_processed("a.txt"));
    }

    #[test]
    fn test_mark_processed_advances_completed() {
        let mut tracker = ProgressTracker::new(ids(&["a.txt", "b.txt"]));
        tracker.mark_processed("a.txt", Some(some_results())).unwrap();
        assert_eq!(tracker.check_progress(), (true, 1));
        tracker.mark_processed("b.txt", Some(some_results())).unwrap();
        assert_eq!(tracker.check_progress(), (false, 2));
    }

    #[test]
    fn test_double_mark_is_rejected() {
        let mut tracker = ProgressTracker::new(ids(&["a.txt"]));
        tracker.mark_processed("a.txt", None).unwrap();
        let err = tracker.mark_processed("a.txt", None).unwrap_err();
        assert!(matches!(err, SchedulerError::AlreadyProcessed(_)));
        assert_eq!(tracker.check_progress(), (false, 1));
    }

    #[test]
    fn test_unknown_document_is_rejected() {
        let mut tracker = ProgressTracker::new(ids(&["a.txt"]));
        let err = tracker.mark_processed("zz.txt", None).unwrap_err();
        assert!(matches!(err, SchedulerError::UnknownDocument(_)));
    }

    #[test]
    fn test_success_not_judged_mid_run() {
        let mut tracker = ProgressTracker::new(ids(&["a.txt", "b.txt"]));
        assert_eq!(tracker.analysis_success(), (false, Vec::new()));
        tracker.mark_processed("a.txt", None).unwrap();
        assert_eq!(tracker.analysis_success(), (false, Vec::new()));
    }

    #[test]
    fn test_failed_documents_reported_in_order() {
        let mut tracker = ProgressTracker::new(ids(&["a.txt", "b.txt", "c.txt"]));
        tracker.mark_processed("b.txt", Some(some_results())).unwrap();
        tracker.mark_processed("c.txt", None).unwrap();
        tracker.mark_processed("a.txt", None).unwrap();
        let (success, failed) = tracker.analysis_success();
        assert!(!success);
        assert_eq!(failed, ids(&["a.txt", "c.txt"]));
    }

    #[test]
    fn test_all_processed_successfully() {
        let mut tracker = ProgressTracker::new(ids(&["a.txt"]));
        tracker.mark_processed("a.txt", Some(some_results())).unwrap();
        assert_eq!(tracker.analysis_success(), (true, Vec::new()));
    }
}
