//! Document discovery and loading.
//!
//! Walks the input path (a single file or a directory), filters by
//! extension and size, and reads the matching files into [`Document`]s.
//! Paths are sorted so the batch order is reproducible.

use crate::models::Document;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Configuration for document scanning.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// File extensions to include (e.g., ["txt", "md"]). Empty means
    /// every regular file matches.
    pub extensions: Vec<String>,
    /// Maximum file size in bytes.
    pub max_file_size: u64,
    /// Maximum number of documents to load.
    pub max_documents: Option<usize>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["txt", "md", "text", "rst"]
                .into_iter()
                .map(String::from)
                .collect(),
            max_file_size: 10 * 1024 * 1024, // 10MB
            max_documents: None,
        }
    }
}

impl From<&crate::config::ScannerConfig> for ScanConfig {
    fn from(config: &crate::config::ScannerConfig) -> Self {
        Self {
            extensions: config.extensions.clone(),
            max_file_size: config.max_file_size,
            max_documents: config.max_documents,
        }
    }
}

/// Scanner that turns an input path into a batch of documents.
pub struct DocumentScanner {
    root: PathBuf,
    config: ScanConfig,
}

impl DocumentScanner {
    pub fn new(root: PathBuf, config: ScanConfig) -> Self {
        Self { root, config }
    }

    /// Discover matching files under the input path.
    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        if !self.root.exists() {
            anyhow::bail!("input path does not exist: {}", self.root.display());
        }

        // A single file bypasses the extension filter; the user named it
        // explicitly.
        if self.root.is_file() {
            return Ok(vec![self.root.clone()]);
        }

        let mut paths = Vec::new();
        for entry in WalkDir::new(&self.root).follow_links(false) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    debug!("skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if self.is_hidden(path) || !self.matches(path) {
                continue;
            }
            paths.push(path.to_path_buf());
        }

        paths.sort();
        if let Some(max) = self.config.max_documents {
            paths.truncate(max);
        }
        Ok(paths)
    }

    /// Load all matching files into documents, in sorted path order.
    ///
    /// Files that cannot be read as text are skipped with a warning.
    pub fn load(&self) -> Result<Vec<Document>> {
        let paths = self.scan()?;
        let mut documents = Vec::with_capacity(paths.len());

        for path in paths {
            match fs::read_to_string(&path) {
                Ok(text) => {
                    documents.push(Document::new(path.display().to_string(), text));
                }
                Err(e) => {
                    warn!("failed to read {}: {}", path.display(), e);
                }
            }
        }

        Ok(documents)
    }

    fn is_hidden(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('.'))
    }

    fn matches(&self, path: &Path) -> bool {
        if !self.config.extensions.is_empty() {
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if !self.config.extensions.iter().any(|e| e == ext) {
                return false;
            }
        }

        match fs::metadata(path) {
            Ok(metadata) => metadata.len() <= self.config.max_file_size,
            Err(_) => false,
        }
    }
}

/// Load the documents for a batch from an input path.
pub fn load_documents(input: &Path, config: ScanConfig) -> Result<Vec<Document>> {
    let scanner = DocumentScanner::new(input.to_path_buf(), config);
    let documents = scanner
        .load()
        .with_context(|| format!("failed to load documents from {}", input.display()))?;
    Ok(documents)
}
