//! Report rendering.
//!
//! This module renders the combined batch report as console text,
//! Markdown, or JSON.

use crate::models::{CombinedTerm, Report, ReportMetadata};
use anyhow::Result;

/// Generate the console rendering of the top `top` terms.
pub fn generate_console_report(report: &Report, top: usize, show_sentences: bool) -> String {
    let mut output = String::new();

    for term in report.combined.top(top) {
        output.push_str("==============================\n");
        output.push_str(&format!(
            " Term: {} (Occurrences: {})\n",
            term.term, term.count
        ));
        output.push_str("==============================\n");
        output.push_str(" Documents:\n");
        for doc in &term.documents {
            output.push_str(&format!(" * {}\n", doc));
        }
        if show_sentences && !term.sentences.is_empty() {
            output.push_str(" Sentences:\n");
            for sentence in &term.sentences {
                output.push_str(&format!(" * {}\n", sentence));
            }
        }
        output.push('\n');
    }

    output
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report) -> String {
    let mut output = String::new();

    output.push_str("# TermScout Report\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_failures_section(&report.failed_documents));
    output.push_str(&generate_ranking_section(&report.combined.terms));
    output.push_str(&generate_sentences_section(&report.combined.terms));
    output.push_str(&generate_footer());

    output
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Input:** `{}`\n", metadata.input_path));
    section.push_str(&format!(
        "- **Analysis Date:** {}\n",
        metadata.analysis_date.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Language:** {}\n", metadata.language));
    section.push_str(&format!(
        "- **Unit:** {}\n",
        if metadata.stemmed { "stems" } else { "words" }
    ));
    section.push_str(&format!("- **Mode:** {}\n", metadata.mode));
    section.push_str(&format!(
        "- **Documents Analyzed:** {}\n",
        metadata.documents_analyzed
    ));
    if metadata.documents_failed > 0 {
        section.push_str(&format!(
            "- **Documents Failed:** {}\n",
            metadata.documents_failed
        ));
    }
    section.push_str(&format!(
        "- **Distinct Terms:** {}\n",
        metadata.distinct_terms
    ));
    section.push_str(&format!(
        "- **Analysis Duration:** {:.1}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    section
}

/// Generate the failed-documents section.
fn generate_failures_section(failed: &[String]) -> String {
    if failed.is_empty() {
        return String::new();
    }

    let mut section = String::new();
    section.push_str("## Failed Documents\n\n");
    for doc in failed {
        section.push_str(&format!("- `{}`\n", doc));
    }
    section.push('\n');

    section
}

/// Generate the ranked-terms table.
fn generate_ranking_section(terms: &[CombinedTerm]) -> String {
    let mut section = String::new();

    section.push_str("## Term Ranking\n\n");

    if terms.is_empty() {
        section.push_str("No terms were found in the analyzed documents.\n\n");
        return section;
    }

    section.push_str("| Rank | Term | Occurrences | Documents |\n");
    section.push_str("|:---:|:---|:---:|:---|\n");
    for (rank, term) in terms.iter().enumerate() {
        section.push_str(&format!(
            "| {} | `{}` | {} | {} |\n",
            rank + 1,
            term.term,
            term.count,
            term.documents.join(", ")
        ));
    }
    section.push('\n');

    section
}

/// Generate the per-term sentences section.
fn generate_sentences_section(terms: &[CombinedTerm]) -> String {
    let with_sentences: Vec<_> = terms.iter().filter(|t| !t.sentences.is_empty()).collect();
    if with_sentences.is_empty() {
        return String::new();
    }

    let mut section = String::new();
    section.push_str("## Sentences by Term\n\n");

    for term in with_sentences {
        section.push_str(&format!("### `{}`\n\n", term.term));
        for sentence in &term.sentences {
            section.push_str(&format!("> {}\n", sentence));
        }
        section.push('\n');
    }

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    format!(
        "---\n\n*Generated by TermScout v{}*\n",
        env!("CARGO_PKG_VERSION")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnalysisMode, CombinedReport};
    use chrono::Utc;

    fn sample_report() -> Report {
        Report {
            metadata: ReportMetadata {
                input_path: "docs/".to_string(),
                analysis_date: Utc::now(),
                language: "english".to_string(),
                stemmed: false,
                mode: AnalysisMode::Sync,
                documents_analyzed: 2,
                documents_failed: 1,
                distinct_terms: 2,
                duration_seconds: 0.3,
            },
            combined: CombinedReport {
                terms: vec![
                    CombinedTerm {
                        term: "cat".to_string(),
                        count: 3,
                        documents: vec!["d1.txt".to_string(), "d2.txt".to_string()],
                        sentences: vec!["The cat sat.".to_string()],
                    },
                    CombinedTerm {
                        term: "dog".to_string(),
                        count: 1,
                        documents: vec!["d2.txt".to_string()],
                        sentences: vec![],
                    },
                ],
            },
            failed_documents: vec!["broken.txt".to_string()],
        }
    }

    #[test]
    fn test_console_report_limits_to_top() {
        let report = sample_report();
        let output = generate_console_report(&report, 1, false);
        assert!(output.contains("Term: cat (Occurrences: 3)"));
        assert!(!output.contains("Term: dog"));
        assert!(!output.contains("Sentences:"));
    }

    #[test]
    fn test_console_report_shows_sentences() {
        let report = sample_report();
        let output = generate_console_report(&report, 5, true);
        assert!(output.contains("The cat sat."));
    }

    #[test]
    fn test_markdown_report_sections() {
        let report = sample_report();
        let output = generate_markdown_report(&report);
        assert!(output.contains("# TermScout Report"));
        assert!(output.contains("## Metadata"));
        assert!(output.contains("## Failed Documents"));
        assert!(output.contains("`broken.txt`"));
        assert!(output.contains("## Term Ranking"));
        assert!(output.contains("| 1 | `cat` | 3 |"));
        assert!(output.contains("## Sentences by Term"));
    }

    #[test]
    fn test_markdown_report_without_failures_omits_section() {
        let mut report = sample_report();
        report.failed_documents.clear();
        report.metadata.documents_failed = 0;
        let output = generate_markdown_report(&report);
        assert!(!output.contains("## Failed Documents"));
        assert!(!output.contains("Documents Failed"));
    }

    #[test]
    fn test_json_report_round_trips() {
        let report = sample_report();
        let json = generate_json_report(&report).unwrap();
        let parsed: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.combined.terms.len(), 2);
        assert_eq!(parsed.combined.terms[0].term, "cat");
    }
}
