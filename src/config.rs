//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.termscout.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Analysis settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Work queue settings.
    #[serde(default)]
    pub queue: QueueConfig,

    /// Scanner settings.
    #[serde(default)]
    pub scanner: ScannerConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path for markdown/json reports.
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            verbose: false,
        }
    }
}

fn default_output() -> String {
    "termscout_report.md".to_string()
}

/// Analysis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Language of the documents.
    #[serde(default = "default_language")]
    pub language: String,

    /// Analyze stems instead of words.
    #[serde(default)]
    pub stem: bool,

    /// Extra stopwords on top of the built-in list.
    #[serde(default)]
    pub extra_stopwords: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            stem: false,
            extra_stopwords: Vec::new(),
        }
    }
}

fn default_language() -> String {
    "english".to_string()
}

/// Work queue settings (async mode).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Number of concurrent analysis workers.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Delay between polls of the work queue, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

fn default_workers() -> usize {
    4
}

fn default_poll_interval_ms() -> u64 {
    1000
}

/// Document scanner settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// File extensions to include.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Maximum file size in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// Maximum number of documents to load.
    #[serde(default)]
    pub max_documents: Option<usize>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            max_file_size: default_max_file_size(),
            max_documents: None,
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["txt", "md", "text", "rst"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_max_file_size() -> u64 {
    10 * 1024 * 1024 // 10MB
}

/// Report rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// How many terms to show in console output.
    #[serde(default = "default_top_terms")]
    pub top_terms: usize,

    /// Include the matched sentences in console output.
    #[serde(default)]
    pub show_sentences: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_terms: default_top_terms(),
            show_sentences: false,
        }
    }
}

fn default_top_terms() -> usize {
    15
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".termscout.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        // Language always comes from the CLI (it has a default there).
        self.analysis.language = args.language.clone();

        // Flags only switch settings on.
        if args.stem {
            self.analysis.stem = true;
        }
        if args.verbose {
            self.general.verbose = true;
        }

        // Optional settings - only override if provided
        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        }
        if let Some(workers) = args.workers {
            self.queue.workers = workers;
        }
        if let Some(poll) = args.poll_interval_ms {
            self.queue.poll_interval_ms = poll;
        }
        if let Some(top) = args.top {
            self.report.top_terms = top;
        }
        if args.show_sentences {
            self.report.show_sentences = true;
        }
        if let Some(ref extensions) = args.extensions {
            self.scanner.extensions = extensions.clone();
        }
        if let Some(max) = args.max_documents {
            self.scanner.max_documents = Some(max);
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.analysis.language, "english");
        assert_eq!(config.queue.workers, 4);
        assert_eq!(config.report.top_terms, 15);
        assert!(config.scanner.extensions.contains(&"txt".to_string()));
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
output = "custom_report.md"
verbose = true

[analysis]
language = "german"
stem = true
extra_stopwords = ["und", "oder"]

[queue]
workers = 8
poll_interval_ms = 250

[scanner]
extensions = ["txt"]
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.output, "custom_report.md");
        assert!(config.general.verbose);
        assert_eq!(config.analysis.language, "german");
        assert!(config.analysis.stem);
        assert_eq!(config.analysis.extra_stopwords, vec!["und", "oder"]);
        assert_eq!(config.queue.workers, 8);
        assert_eq!(config.queue.poll_interval_ms, 250);
        assert_eq!(config.scanner.extensions, vec!["txt"]);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[analysis]"));
        assert!(toml_str.contains("[queue]"));
        assert!(toml_str.contains("[scanner]"));
        assert!(toml_str.contains("[report]"));
    }
}
