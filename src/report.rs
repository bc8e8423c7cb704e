//! Output formatting for decomment results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::Serialize;

use crate::language::LanguageId;
use crate::runner::{BatchReport, FileOutcome, FileStatus};
use crate::stats::Summary;

// =============================================================================
// JSON Format
// =============================================================================

/// Top-level JSON document.
#[derive(Serialize)]
pub struct JsonReport<'a> {
    pub version: &'static str,
    #[serde(flatten)]
    pub report: &'a BatchReport,
}

/// Render results as pretty-printed JSON.
pub fn render_json(report: &BatchReport) -> anyhow::Result<String> {
    let doc = JsonReport {
        version: env!("CARGO_PKG_VERSION"),
        report,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Write results in JSON format.
pub fn write_json(report: &BatchReport) -> anyhow::Result<()> {
    println!("{}", render_json(report)?);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results in pretty (human-readable) format.
pub fn write_pretty(report: &BatchReport, config_path: Option<&str>) {
    // Header
    println!();
    print!("  ");
    print!("{}", "decomment".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    if let Some(path) = config_path {
        print!("  {}", "Config:   ".dimmed());
        println!("{}", path);
    }
    if report.dry_run {
        println!("  {}", "Dry run: no files were written".yellow());
    }
    if config_path.is_some() || report.dry_run {
        println!();
    }

    for outcome in &report.files {
        write_outcome(outcome);
    }
    if !report.files.is_empty() {
        println!();
    }

    write_summary(&report.summary);
    println!();
}

fn write_outcome(outcome: &FileOutcome) {
    let path = outcome.path.display().to_string();
    match &outcome.status {
        FileStatus::Processed { stats, backup } => {
            print!("  {} ", "✓".green());
            print!("{}", path.blue());
            print!("  {}", outcome.language.as_str().dimmed());
            print!(
                "  ~{} comment{}",
                stats.comment_count,
                if stats.comment_count == 1 { "" } else { "s" }
            );
            println!(
                "  {}",
                format!(
                    "-{} bytes ({:.1}%)",
                    stats.size_reduction, stats.reduction_percent
                )
                .dimmed()
            );
            if let Some(backup) = backup {
                println!("      {}", format!("backup: {}", backup.display()).dimmed());
            }
        }
        FileStatus::Skipped { reason } => {
            print!("  {} ", "-".yellow());
            print!("{}", path);
            println!("  {}", format!("skipped: {}", reason).dimmed());
        }
        FileStatus::Failed { error, .. } => {
            print!("  {} ", "✗".red());
            print!("{}", path.red());
            println!();
            println!("      {}", error);
        }
    }
}

fn write_summary(summary: &Summary) {
    println!("  {}", "Summary:".bold());
    println!("    {:<22} {}", "Files found", summary.files_found);
    println!(
        "    {:<22} {}",
        "Processed",
        summary.files_processed.to_string().green()
    );
    if summary.files_skipped > 0 {
        println!(
            "    {:<22} {}",
            "Skipped",
            summary.files_skipped.to_string().yellow()
        );
    }
    if summary.files_failed > 0 {
        println!(
            "    {:<22} {}",
            "Failed",
            summary.files_failed.to_string().red()
        );
    }
    println!("    {:<22} ~{}", "Comments removed", summary.total_comments);
    println!("    {:<22} {}", "Lines removed", summary.total_lines_removed);
    println!(
        "    {:<22} {} ({:.1}% avg)",
        "Bytes saved", summary.total_size_reduction, summary.average_reduction_percent
    );
}

// =============================================================================
// Language table
// =============================================================================

/// Print every supported language with its file extensions.
pub fn write_languages() {
    println!("  {}", "Supported languages:".bold());
    println!();
    for language in LanguageId::ALL {
        let extensions: Vec<String> = language
            .extensions()
            .iter()
            .map(|ext| format!(".{}", ext))
            .collect();
        println!(
            "    {:<12} {}",
            language.as_str().cyan(),
            extensions.join(" ").dimmed()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::FileStats;
    use std::path::PathBuf;

    fn sample() -> BatchReport {
        let stats = FileStats::compute(LanguageId::Python, "x = 1  # c\n", "x = 1\n");
        let mut summary = Summary {
            files_found: 2,
            ..Default::default()
        };
        summary.record_processed(&stats);
        summary.record_skipped();
        BatchReport {
            dry_run: false,
            files: vec![
                FileOutcome {
                    path: PathBuf::from("a.py"),
                    language: LanguageId::Python,
                    status: FileStatus::Processed {
                        stats,
                        backup: Some(PathBuf::from("a.py.bak")),
                    },
                },
                FileOutcome {
                    path: PathBuf::from("notes.txt"),
                    language: LanguageId::Unknown,
                    status: FileStatus::Skipped {
                        reason: "unknown file type".to_string(),
                    },
                },
            ],
            summary,
        }
    }

    #[test]
    fn test_json_structure() {
        let json = render_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(value["dry_run"], false);
        assert_eq!(value["summary"]["files_found"], 2);
        assert_eq!(value["summary"]["files_processed"], 1);
        assert_eq!(value["summary"]["files_skipped"], 1);

        let files = value["files"].as_array().unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0]["path"], "a.py");
        assert_eq!(files[0]["language"], "python");
        assert_eq!(files[0]["status"], "processed");
        assert_eq!(files[0]["backup"], "a.py.bak");
        assert_eq!(files[0]["stats"]["comment_count"], 1);
        assert_eq!(files[0]["stats"]["size_reduction"], 5);
        assert_eq!(files[1]["status"], "skipped");
        assert_eq!(files[1]["language"], "unknown");
        assert_eq!(files[1]["reason"], "unknown file type");
    }

    #[test]
    fn test_json_failed_entry() {
        let mut report = sample();
        report.files.push(FileOutcome {
            path: PathBuf::from("bad.rs"),
            language: LanguageId::Rust,
            status: FileStatus::Failed {
                kind: "decode".to_string(),
                error: "bad.rs is not valid UTF-8".to_string(),
            },
        });
        let json = render_json(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let failed = &value["files"][2];
        assert_eq!(failed["status"], "failed");
        assert_eq!(failed["kind"], "decode");
        assert!(failed.get("stats").is_none());
    }
}
