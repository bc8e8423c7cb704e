//! Line-marker scanning for the delimited family (Lua, Haskell, Ruby, Perl,
//! PowerShell, MATLAB, SQL) and the hash family (Bash, YAML, R).
//!
//! Block comments are removed first. The text between them is then
//! scanned line by line and truncated at the first live line marker.

use regex::Regex;

use crate::policy::PreservationPolicy;
use crate::profile::{ScanFamily, SyntaxProfile};

use super::sink::LineSink;
use super::strip_blocks;

pub(super) fn strip(
    source: &str,
    profile: &SyntaxProfile,
    blocks: Option<&Regex>,
    policy: &PreservationPolicy,
) -> String {
    let mut sink = LineSink::with_capacity(source.len());
    strip_blocks(source, blocks, policy, &mut sink, |text, sink| {
        scan_lines(text, profile, policy, sink)
    });
    sink.finish()
}

/// Truncate each line of `text` at its first live line marker.
///
/// `text` may start or end mid-line (when a block comment was cut out of
/// the line); the sink carries the line state across pieces.
pub(super) fn scan_lines(
    text: &str,
    profile: &SyntaxProfile,
    policy: &PreservationPolicy,
    sink: &mut LineSink,
) {
    for segment in text.split_inclusive('\n') {
        let (line, newline) = match segment.strip_suffix('\n') {
            Some(line) => (line, true),
            None => (segment, false),
        };

        // Python headers are split off before the scan
        let shebang = profile.shebang_preserved
            && profile.family != ScanFamily::Python
            && sink.line_is_blank()
            && line.trim_start().starts_with("#!");
        if shebang {
            sink.push_str(line);
        } else {
            match find_marker(line, profile) {
                Some(at) => {
                    sink.push_str(&line[..at]);
                    let comment = &line[at..];
                    if policy.should_preserve(comment) {
                        sink.push_str(comment);
                    } else {
                        sink.truncate();
                    }
                }
                None => sink.push_str(line),
            }
        }

        if newline {
            sink.push_str("\n");
        }
    }
}

/// Byte offset of the first line marker outside quotes and escapes.
///
/// `$#` is a sigil (Perl `$#arr`, Bash `$#`), never a comment.
fn find_marker(line: &str, profile: &SyntaxProfile) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'\\' {
            i += 2;
            continue;
        }
        if b.is_ascii() && profile.quotes.contains(&(b as char)) {
            if let Some(close) = closing_quote(bytes, i) {
                i = close + 1;
                continue;
            }
        }
        if b == b'#' && i > 0 && bytes[i - 1] == b'$' {
            i += 1;
            continue;
        }
        let at_word_start = i == 0 || bytes[i - 1].is_ascii_whitespace();
        if (!profile.word_start_markers || at_word_start)
            && profile
                .line_markers
                .iter()
                .any(|m| bytes[i..].starts_with(m.as_bytes()))
        {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// A quote only opens a span when it is closed on the same line.
fn closing_quote(bytes: &[u8], open: usize) -> Option<usize> {
    let quote = bytes[open];
    let mut j = open + 1;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            b if b == quote => return Some(j),
            _ => j += 1,
        }
    }
    None
}
