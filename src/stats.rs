//! Per-file and batch statistics.
//!
//! The comment count is an estimate: a handful of independent regex sweeps
//! over the raw text, summed. Overlapping matches (a Python docstring line
//! that also starts with `#`, a `--` inside a `/* */` block) count once per
//! sweep. The number is reported to the user and never fed back into the
//! engine.

use serde::Serialize;

use crate::language::LanguageId;

lazy_static::lazy_static! {
    /// One sweep per marker family.
    static ref COMMENT_SWEEPS: Vec<regex::Regex> = vec![
        regex::Regex::new(r"(?m)//.*$").unwrap(),
        regex::Regex::new(r"(?s)/\*.*?\*/").unwrap(),
        regex::Regex::new(r"(?m)#.*$").unwrap(),
        regex::Regex::new(r"(?m)--.*$").unwrap(),
        regex::Regex::new(r"(?s)<!--.*?-->").unwrap(),
        regex::Regex::new(r#"(?s)""".*?""""#).unwrap(),
        regex::Regex::new(r"(?s)'''.*?'''").unwrap(),
    ];
}

/// Approximate number of comments in `text`.
pub fn estimate_comment_count(text: &str) -> usize {
    COMMENT_SWEEPS
        .iter()
        .map(|re| re.find_iter(text).count())
        .sum()
}

/// What cleaning did to one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileStats {
    pub language: LanguageId,
    pub comment_count: usize,
    pub original_bytes: usize,
    pub cleaned_bytes: usize,
    pub size_reduction: usize,
    pub reduction_percent: f64,
    pub lines_removed: usize,
}

impl FileStats {
    /// Compare a file's text before and after cleaning.
    pub fn compute(language: LanguageId, original: &str, cleaned: &str) -> Self {
        let original_bytes = original.len();
        let cleaned_bytes = cleaned.len();
        let size_reduction = original_bytes.saturating_sub(cleaned_bytes);
        let reduction_percent = if original_bytes > 0 {
            size_reduction as f64 / original_bytes as f64 * 100.0
        } else {
            0.0
        };
        Self {
            language,
            comment_count: estimate_comment_count(original),
            original_bytes,
            cleaned_bytes,
            size_reduction,
            reduction_percent,
            lines_removed: original.lines().count().saturating_sub(cleaned.lines().count()),
        }
    }
}

/// Totals across a batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub files_found: usize,
    pub files_processed: usize,
    pub files_skipped: usize,
    pub files_failed: usize,
    pub total_comments: usize,
    pub total_lines_removed: usize,
    pub total_size_reduction: usize,
    /// Mean over processed files.
    pub average_reduction_percent: f64,
}

impl Summary {
    pub fn record_processed(&mut self, stats: &FileStats) {
        self.files_processed += 1;
        self.total_comments += stats.comment_count;
        self.total_lines_removed += stats.lines_removed;
        self.total_size_reduction += stats.size_reduction;
        // running mean
        let n = self.files_processed as f64;
        self.average_reduction_percent +=
            (stats.reduction_percent - self.average_reduction_percent) / n;
    }

    pub fn record_skipped(&mut self) {
        self.files_skipped += 1;
    }

    pub fn record_failed(&mut self) {
        self.files_failed += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_counts_each_family() {
        assert_eq!(estimate_comment_count("int x; // a\n/* b */\n"), 2);
        assert_eq!(estimate_comment_count("<!-- a -->\n"), 2); // `--` sweep also hits
        assert_eq!(estimate_comment_count("x = 1\n"), 0);
    }

    #[test]
    fn test_estimate_double_counts_overlaps() {
        // the docstring is one `"""` match; `# in doc` is a separate `#` match
        let src = "\"\"\"\n# in doc\n\"\"\"\n";
        assert_eq!(estimate_comment_count(src), 2);
    }

    #[test]
    fn test_file_stats() {
        let stats = FileStats::compute(LanguageId::C, "int x; // c\n// d\n", "int x;\n");
        assert_eq!(stats.comment_count, 2);
        assert_eq!(stats.original_bytes, 17);
        assert_eq!(stats.cleaned_bytes, 7);
        assert_eq!(stats.size_reduction, 10);
        assert_eq!(stats.lines_removed, 1);
        assert!((stats.reduction_percent - 10.0 / 17.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_file_stats_empty_and_growth() {
        let empty = FileStats::compute(LanguageId::Python, "", "");
        assert_eq!(empty.reduction_percent, 0.0);
        let grew = FileStats::compute(LanguageId::Python, "a", "a\n");
        assert_eq!(grew.size_reduction, 0);
    }

    #[test]
    fn test_summary_average() {
        let mut summary = Summary::default();
        summary.record_processed(&FileStats::compute(LanguageId::C, "ab", "a"));
        summary.record_processed(&FileStats::compute(LanguageId::C, "abcd", "abcd"));
        summary.record_skipped();
        summary.record_failed();
        assert_eq!(summary.files_processed, 2);
        assert_eq!(summary.files_skipped, 1);
        assert_eq!(summary.files_failed, 1);
        assert_eq!(summary.total_size_reduction, 1);
        assert!((summary.average_reduction_percent - 25.0).abs() < 1e-9);
    }
}
