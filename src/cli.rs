//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::analysis::Language;
use clap::Parser;
use std::path::PathBuf;

/// TermScout - batch term-frequency analyzer
///
/// Analyze a batch of text documents, rank the most frequent terms
/// across all of them, and render the result as console text, Markdown,
/// or JSON.
///
/// Examples:
///   termscout --input ./docs
///   termscout --input ./docs --stem --language english
///   termscout --input ./docs --analyze-async --workers 8
///   termscout --input notes.txt --format json --output report.json
///   termscout --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to the document(s) to analyze
    ///
    /// Either a single file or a directory. Directories are scanned for
    /// text files. Not required when using --init-config.
    #[arg(short, long, value_name = "PATH", required_unless_present = "init_config")]
    pub input: Option<PathBuf>,

    /// Language of the documents
    ///
    /// Drives stemming and the built-in stopword list. Can also be set
    /// via TERMSCOUT_LANGUAGE or .termscout.toml.
    #[arg(short, long, default_value = "english", env = "TERMSCOUT_LANGUAGE")]
    pub language: String,

    /// Analyze stems instead of words
    #[arg(short, long)]
    pub stem: bool,

    /// Analyze documents asynchronously on a worker pool
    ///
    /// Dispatches every document at once and polls for completion
    /// instead of analyzing one document at a time.
    #[arg(short = 'a', long)]
    pub analyze_async: bool,

    /// Output file path for markdown/json reports
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (console, markdown, json)
    ///
    /// Console shows the top terms only; markdown and json write the
    /// full report to --output.
    #[arg(long, default_value = "console", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// How many terms to show in console output
    #[arg(long, value_name = "COUNT")]
    pub top: Option<usize>,

    /// Include the matched sentences in console output
    #[arg(long)]
    pub show_sentences: bool,

    /// Number of concurrent analysis workers (async mode)
    #[arg(long, value_name = "NUM")]
    pub workers: Option<usize>,

    /// Delay between polls of the work queue, in milliseconds
    #[arg(long, value_name = "MS")]
    pub poll_interval_ms: Option<u64>,

    /// Maximum number of documents to load
    #[arg(long, value_name = "COUNT")]
    pub max_documents: Option<usize>,

    /// File extensions to include (comma-separated)
    ///
    /// Example: --extensions txt,md
    #[arg(long, value_name = "EXTS", value_delimiter = ',')]
    pub extensions: Option<Vec<String>>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .termscout.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .termscout.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Print the top terms to the console (default)
    #[default]
    Console,
    /// Markdown report file
    Markdown,
    /// JSON report file
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        let input = self
            .input
            .as_ref()
            .ok_or_else(|| "An input path is required".to_string())?;
        if !input.exists() {
            return Err(format!("Input path does not exist: {}", input.display()));
        }

        if self.language.parse::<Language>().is_err() {
            return Err(format!("Unsupported language: {}", self.language));
        }

        if let Some(workers) = self.workers {
            if workers == 0 {
                return Err("Workers must be at least 1".to_string());
            }
        }

        if let Some(top) = self.top {
            if top == 0 {
                return Err("Top must be at least 1".to_string());
            }
        }

        if self.max_documents == Some(0) {
            return Err("Max documents must be at least 1".to_string());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            input: Some(PathBuf::from(".")),
            language: "english".to_string(),
            stem: false,
            analyze_async: false,
            output: None,
            format: OutputFormat::Console,
            top: None,
            show_sentences: false,
            workers: None,
            poll_interval_ms: None,
            max_documents: None,
            extensions: None,
            config: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_valid_args() {
        assert!(make_args().validate().is_ok());
    }

    #[test]
    fn test_validation_missing_input() {
        let mut args = make_args();
        args.input = Some(PathBuf::from("/nonexistent/xyz"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_unsupported_language() {
        let mut args = make_args();
        args.language = "klingon".to_string();
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_zero_workers() {
        let mut args = make_args();
        args.workers = Some(0);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_init_config_skips_validation() {
        let mut args = make_args();
        args.input = None;
        args.init_config = true;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
