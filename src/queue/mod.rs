//! Work queue for asynchronous document analysis.
//!
//! The scheduler talks to the queue through two small traits so tests
//! can inject a fake queue with controlled readiness. The production
//! implementation runs jobs on a bounded tokio worker pool.

use crate::analysis::{AnalysisError, Language, TermFrequencyAnalyzer};
use crate::models::TermMap;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::debug;

/// Immutable payload of one analysis job.
///
/// Stopwords travel as a sorted sequence; the set crosses a serialization
/// boundary, so its order must be reproducible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisJob {
    /// Document text.
    pub text: String,
    /// Language of the document.
    pub language: Language,
    /// Analyze stems instead of words.
    pub stem: bool,
    /// Pre-normalized stopwords, sorted.
    pub stopwords: Vec<String>,
}

/// Opaque reference to dispatched work, pollable for readiness.
#[async_trait]
pub trait JobHandle: Send {
    /// Whether the job has finished (successfully or not). Non-blocking.
    fn ready(&self) -> bool;

    /// Retrieve the job's result, waiting if it is not ready yet.
    /// Surfaces the job's failure if the analysis errored.
    async fn fetch(&mut self) -> Result<TermMap, AnalysisError>;
}

/// Accepts analysis jobs and returns pollable handles.
pub trait WorkQueue: Send + Sync {
    fn submit(&self, job: AnalysisJob) -> Box<dyn JobHandle>;
}

/// Work queue backed by a bounded tokio worker pool.
///
/// The CPU-bound analysis runs on the blocking pool; a semaphore caps
/// how many jobs run at once.
pub struct TokioWorkQueue {
    permits: Arc<Semaphore>,
}

impl TokioWorkQueue {
    pub fn new(workers: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(workers.max(1))),
        }
    }
}

impl WorkQueue for TokioWorkQueue {
    fn submit(&self, job: AnalysisJob) -> Box<dyn JobHandle> {
        let permits = Arc::clone(&self.permits);
        let handle = tokio::spawn(async move {
            let _permit = permits
                .acquire_owned()
                .await
                .map_err(|e| AnalysisError::Worker(e.to_string()))?;
            debug!("worker picked up analysis job ({} bytes)", job.text.len());
            tokio::task::spawn_blocking(move || run_job(job))
                .await
                .map_err(|e| AnalysisError::Worker(e.to_string()))?
        });
        Box::new(TokioJobHandle { handle })
    }
}

/// Execute one job to completion. Runs on the blocking pool.
fn run_job(job: AnalysisJob) -> Result<TermMap, AnalysisError> {
    let analyzer = TermFrequencyAnalyzer::new(
        job.language,
        job.stem,
        job.stopwords.into_iter().collect(),
    );
    analyzer.analyze(&job.text)
}

struct TokioJobHandle {
    handle: JoinHandle<Result<TermMap, AnalysisError>>,
}

#[async_trait]
impl JobHandle for TokioJobHandle {
    fn ready(&self) -> bool {
        self.handle.is_finished()
    }

    async fn fetch(&mut self) -> Result<TermMap, AnalysisError> {
        match (&mut self.handle).await {
            Ok(result) => result,
            Err(e) => Err(AnalysisError::Worker(e.to_string())),
        }
    }
}
