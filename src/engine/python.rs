//! Python comment removal.
//!
//! Docstrings go first (unless kept), then comment tokens found by the
//! tree-sitter Python grammar are cut out. Source the grammar cannot parse
//! cleanly falls back to the line scanner shared with the hash family.

use std::ops::Range;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::policy::PreservationPolicy;
use crate::profile::SyntaxProfile;

use super::sink::LineSink;
use super::{block_pattern, marker, strip_blocks};

#[cfg(feature = "tree-sitter")]
use streaming_iterator::StreamingIterator;
#[cfg(feature = "tree-sitter")]
use tree_sitter::{Parser as TsParser, Query, QueryCursor};

lazy_static! {
    /// PEP 263 source encoding declaration.
    static ref ENCODING_DECL: Regex = Regex::new(r"^[ \t\f]*#.*?coding[:=][ \t]*[-\w.]+").unwrap();
}

#[cfg(feature = "tree-sitter")]
const COMMENT_QUERY: &str = "(comment) @comment";

pub(super) fn strip(source: &str, profile: &SyntaxProfile, policy: &PreservationPolicy) -> String {
    let header = if policy.strips_script_header() {
        0..0
    } else {
        header_range(source, profile)
    };
    let (lead, rest) = source.split_at(header.start);
    let (head, body) = rest.split_at(header.len());

    let body = if policy.keeps_doc_comments() {
        body.to_string()
    } else {
        let mut sink = LineSink::with_capacity(body.len());
        strip_blocks(body, block_pattern(profile), policy, &mut sink, |text, sink| {
            sink.push_str(text)
        });
        sink.finish()
    };

    let mut sink = LineSink::with_capacity(source.len());
    marker::scan_lines(lead, profile, policy, &mut sink);
    sink.push_str(head);
    match comment_spans(&body) {
        Some(spans) => {
            let mut last = 0;
            for span in spans {
                sink.push_str(&body[last..span.start]);
                let comment = &body[span.clone()];
                if policy.should_preserve(comment) {
                    sink.push_str(comment);
                } else {
                    sink.truncate();
                }
                last = span.end;
            }
            sink.push_str(&body[last..]);
        }
        None => {
            debug!("python tokenizer unavailable or rejected source, using line scanner");
            marker::scan_lines(&body, profile, policy, &mut sink);
        }
    }
    sink.finish()
}

/// Byte range of the shebang and encoding lines at the top of the file.
///
/// An encoding declaration on line 2 also counts after a comment-only or
/// blank line 1; that line is left before the range and scanned normally.
fn header_range(source: &str, profile: &SyntaxProfile) -> Range<usize> {
    let mut lines = source.split_inclusive('\n');
    let first = lines.next().unwrap_or("");
    let second = lines.next().unwrap_or("");
    let encoding = |line: &str| profile.encoding_decl_preserved && ENCODING_DECL.is_match(line);

    let shebang = profile.shebang_preserved && first.starts_with("#!");
    if shebang || encoding(first) {
        let end = if encoding(second) {
            first.len() + second.len()
        } else {
            first.len()
        };
        return 0..end;
    }

    let trimmed = first.trim_start();
    let comment_or_blank = trimmed.is_empty() || trimmed.starts_with('#');
    if comment_or_blank && encoding(second) {
        return first.len()..first.len() + second.len();
    }
    0..0
}

/// Sorted byte ranges of every comment token, or `None` if the source does
/// not tokenize cleanly.
#[cfg(feature = "tree-sitter")]
fn comment_spans(source: &str) -> Option<Vec<Range<usize>>> {
    let language: tree_sitter::Language = tree_sitter_python::LANGUAGE.into();
    let mut parser = TsParser::new();
    parser.set_language(&language).ok()?;
    let tree = parser.parse(source, None)?;
    let root = tree.root_node();
    if root.has_error() {
        return None;
    }

    let query = Query::new(&language, COMMENT_QUERY).ok()?;
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, root, source.as_bytes());
    let mut spans = Vec::new();
    while let Some(m) = matches.next() {
        for capture in m.captures {
            spans.push(capture.node.start_byte()..capture.node.end_byte());
        }
    }
    spans.sort_by_key(|r| r.start);
    spans.dedup();
    Some(spans)
}

#[cfg(not(feature = "tree-sitter"))]
fn comment_spans(_source: &str) -> Option<Vec<Range<usize>>> {
    None
}
