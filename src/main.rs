//! TermScout - batch term-frequency analyzer
//!
//! A CLI tool that analyzes a batch of text documents, ranks the most
//! frequent terms across all of them, and renders the result as console
//! text, Markdown, or JSON.
//!
//! Exit codes:
//!   0 - Success (every document analyzed)
//!   1 - Runtime error (bad input path, config error, etc.)
//!   2 - Some documents failed analysis (partial report produced)

mod analysis;
mod cli;
mod config;
mod models;
mod queue;
mod report;
mod scanner;
mod scheduler;

use analysis::Language;
use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::Config;
use indicatif::{ProgressBar, ProgressStyle};
use models::{Report, ReportMetadata};
use queue::TokioWorkQueue;
use scanner::ScanConfig;
use scheduler::{BatchOptions, BatchScheduler};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("TermScout v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Run the batch
    match run_batch(args).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Batch failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .termscout.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".termscout.toml");

    if path.exists() {
        eprintln!("⚠️  .termscout.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .termscout.toml")?;

    println!("✅ Created .termscout.toml with default settings.");
    println!("   Edit it to customize language, stopwords, workers, and more.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete batch workflow. Returns exit code (0 or 2).
async fn run_batch(args: Args) -> Result<i32> {
    let start_time = Instant::now();

    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let input = args.input.clone().expect("input validated");

    // Step 1: Load the documents
    println!("📚 Loading documents from: {}", input.display());
    let documents = scanner::load_documents(&input, ScanConfig::from(&config.scanner))?;
    if documents.is_empty() {
        anyhow::bail!("no documents to analyze in {}", input.display());
    }
    for doc in &documents {
        println!("    * {}", doc.id);
    }
    info!("Loaded {} documents", documents.len());

    // Step 2: Build the scheduler
    let language: Language = config
        .analysis
        .language
        .parse()
        .with_context(|| format!("unsupported language: {}", config.analysis.language))?;

    let options = BatchOptions {
        language,
        stem: config.analysis.stem,
        extra_stopwords: config.analysis.extra_stopwords.clone(),
    };

    let total = documents.len();
    let mut scheduler = if args.analyze_async {
        println!(
            "⚙️  Analyzing asynchronously ({} workers, polling every {}ms)",
            config.queue.workers, config.queue.poll_interval_ms
        );
        let queue = TokioWorkQueue::new(config.queue.workers);
        BatchScheduler::new_async(documents, options, Box::new(queue))?
    } else {
        BatchScheduler::new_sync(documents, options)?
    };

    // Step 3: Drive the batch to completion
    println!("\n🔬 Analyzing {} documents...", total);
    let bar = make_progress_bar(total as u64, args.quiet);

    loop {
        scheduler.step().await?;
        let (in_progress, completed) = scheduler.check_progress();
        bar.set_position(completed as u64);
        if !in_progress {
            break;
        }
        if args.analyze_async {
            // The queue strategy never blocks; pace the polling here
            // instead of busy-waiting.
            tokio::time::sleep(Duration::from_millis(config.queue.poll_interval_ms)).await;
        }
    }
    bar.finish_and_clear();

    let duration = start_time.elapsed().as_secs_f64();

    // Step 4: Check for failed documents
    let (success, failed) = scheduler.analysis_success();
    if !success {
        warn!("{} documents failed analysis", failed.len());
        eprintln!("\n⚠️  Could not analyze {} document(s):", failed.len());
        for doc in &failed {
            eprintln!("    * {}", doc);
        }
    }

    // Step 5: Combine the per-document results
    let combined = scheduler.combine()?;

    let metadata = ReportMetadata {
        input_path: input.display().to_string(),
        analysis_date: Utc::now(),
        language: config.analysis.language.clone(),
        stemmed: config.analysis.stem,
        mode: scheduler.mode(),
        documents_analyzed: total - failed.len(),
        documents_failed: failed.len(),
        distinct_terms: combined.terms.len(),
        duration_seconds: duration,
    };

    let report = Report {
        metadata,
        combined,
        failed_documents: failed,
    };

    // Step 6: Render the report
    match args.format {
        OutputFormat::Console => {
            println!("\n📊 Top {} terms:\n", config.report.top_terms);
            print!(
                "{}",
                report::generate_console_report(
                    &report,
                    config.report.top_terms,
                    config.report.show_sentences
                )
            );
        }
        OutputFormat::Markdown => {
            let output = report::generate_markdown_report(&report);
            write_report(&config.general.output, &output)?;
        }
        OutputFormat::Json => {
            let output = report::generate_json_report(&report)?;
            write_report(&config.general.output, &output)?;
        }
    }

    // Print summary
    println!("\n📊 Analysis Summary:");
    println!(
        "   Documents analyzed: {} / {}",
        report.metadata.documents_analyzed, total
    );
    println!("   Distinct terms: {}", report.metadata.distinct_terms);
    println!(
        "   Total term occurrences: {}",
        report.combined.total_occurrences()
    );
    println!("   Duration: {:.1}s", duration);

    Ok(if success { 0 } else { 2 })
}

/// Write a rendered report to disk.
fn write_report(path: &str, content: &str) -> Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write report to {}", path))?;
    println!("\n✅ Analysis complete! Report saved to: {}", path);
    Ok(())
}

/// Build the batch progress bar (hidden in quiet mode).
fn make_progress_bar(total: u64, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} documents")
            .expect("static template is valid"),
    );
    bar
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .termscout.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
