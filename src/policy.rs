//! Rules deciding which comments survive stripping.
//!
//! A comment is kept verbatim when any of these holds:
//! - TODO/FIXME preservation is on and the comment mentions either word
//! - the comment matches one of the user's regex patterns
//!
//! Documentation comments are governed separately by `keep_doc_comments`,
//! which the scanners consult before falling back to the rules above.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

lazy_static! {
    /// Work markers that keep a comment alive when `preserve_todo` is on.
    static ref TODO_PATTERN: Regex = Regex::new(r"(?i)\b(TODO|FIXME)\b").unwrap();
}

/// Per-invocation preservation settings.
#[derive(Debug, Clone, Default)]
pub struct PreservationPolicy {
    preserve_todo: bool,
    keep_doc_comments: bool,
    strip_script_header: bool,
    patterns: Vec<Regex>,
    rejected: Vec<String>,
}

impl PreservationPolicy {
    /// A policy that drops every comment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep comments mentioning TODO or FIXME.
    pub fn preserve_todo(mut self, on: bool) -> Self {
        self.preserve_todo = on;
        self
    }

    /// Keep documentation comments (`/** */`, `///`, Python docstrings).
    pub fn keep_doc_comments(mut self, on: bool) -> Self {
        self.keep_doc_comments = on;
        self
    }

    /// Remove the Python shebang and encoding declaration too.
    pub fn strip_script_header(mut self, on: bool) -> Self {
        self.strip_script_header = on;
        self
    }

    /// Add user patterns. Invalid regexes are skipped with a warning.
    pub fn patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pattern in patterns {
            let pattern = pattern.as_ref();
            match Regex::new(pattern) {
                Ok(regex) => self.patterns.push(regex),
                Err(e) => {
                    warn!(pattern, error = %e, "skipping invalid preserve pattern");
                    self.rejected.push(pattern.to_string());
                }
            }
        }
        self
    }

    pub fn preserves_todo(&self) -> bool {
        self.preserve_todo
    }

    pub fn keeps_doc_comments(&self) -> bool {
        self.keep_doc_comments
    }

    pub fn strips_script_header(&self) -> bool {
        self.strip_script_header
    }

    /// Patterns that compiled, in the order given.
    pub fn pattern_strs(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|r| r.as_str())
    }

    /// Patterns that failed to compile and were ignored.
    pub fn rejected_patterns(&self) -> &[String] {
        &self.rejected
    }

    /// Decide whether a comment (delimiters included) is kept verbatim.
    pub fn should_preserve(&self, comment: &str) -> bool {
        if self.preserve_todo && TODO_PATTERN.is_match(comment) {
            return true;
        }
        self.patterns.iter().any(|p| p.is_match(comment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_preserves_nothing() {
        let policy = PreservationPolicy::new();
        assert!(!policy.preserves_todo());
        assert_eq!(policy.pattern_strs().count(), 0);
        assert!(!policy.should_preserve("// TODO: later"));
        assert!(!policy.should_preserve("# anything"));
    }

    #[test]
    fn test_todo_matching_is_case_insensitive_and_word_bounded() {
        let policy = PreservationPolicy::new().preserve_todo(true);
        assert!(policy.should_preserve("// TODO: handle EINTR"));
        assert!(policy.should_preserve("# fixme later"));
        assert!(policy.should_preserve("/* Todo */"));
        assert!(!policy.should_preserve("// todos are tracked elsewhere"));
        assert!(!policy.should_preserve("// mastodon client"));
    }

    #[test]
    fn test_user_patterns() {
        let policy = PreservationPolicy::new().patterns(["^// SAFETY:", r"(?i)license"]);
        assert!(policy.should_preserve("// SAFETY: pointer is valid"));
        assert!(policy.should_preserve("/* MIT License */"));
        assert!(!policy.should_preserve("// plain"));
        assert_eq!(policy.pattern_strs().count(), 2);
    }

    #[test]
    fn test_invalid_pattern_is_skipped() {
        let policy = PreservationPolicy::new().patterns(["(unclosed", "keep"]);
        assert_eq!(policy.rejected_patterns(), &["(unclosed".to_string()]);
        assert_eq!(policy.pattern_strs().collect::<Vec<_>>(), vec!["keep"]);
        assert!(policy.should_preserve("# keep me"));
    }

    #[test]
    fn test_doc_flag_does_not_activate_content_rules() {
        let policy = PreservationPolicy::new().keep_doc_comments(true);
        assert!(policy.keeps_doc_comments());
        assert!(!policy.should_preserve("/** Adds two numbers. */"));
        assert!(!policy.should_preserve("/// TODO: document"));
    }
}
