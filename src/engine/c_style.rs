//! String-aware scanner for the C family (C, C++, Java, JS, TS, CSS, Go,
//! Swift, Rust, Kotlin, Dart, C#, PHP).
//!
//! Literal contents are copied byte-for-byte and never searched for comment
//! markers. All delimiters are ASCII, so every slice boundary below falls on
//! a char boundary even when the source contains multi-byte text.

use crate::policy::PreservationPolicy;
use crate::profile::{BlockDelimiter, SyntaxProfile};

use super::sink::LineSink;

pub(super) fn strip(source: &str, profile: &SyntaxProfile, policy: &PreservationPolicy) -> String {
    Scanner {
        src: source,
        bytes: source.as_bytes(),
        profile,
        policy,
        sink: LineSink::with_capacity(source.len()),
    }
    .run()
}

struct Scanner<'a> {
    src: &'a str,
    bytes: &'a [u8],
    profile: &'a SyntaxProfile,
    policy: &'a PreservationPolicy,
    sink: LineSink,
}

impl<'a> Scanner<'a> {
    fn run(mut self) -> String {
        let len = self.bytes.len();
        let mut pos = 0;
        let mut plain = 0;

        while pos < len {
            if let Some(end) = self.literal_at(pos) {
                self.sink.push_str(&self.src[plain..end]);
                pos = end;
                plain = pos;
                continue;
            }
            if let Some(delim) = self.block_at(pos) {
                self.sink.push_str(&self.src[plain..pos]);
                pos = self.block_comment(pos, delim);
                plain = pos;
                continue;
            }
            if self.line_marker_at(pos) {
                self.sink.push_str(&self.src[plain..pos]);
                pos = self.line_comment(pos);
                plain = pos;
                continue;
            }
            pos += 1;
        }

        self.sink.push_str(&self.src[plain..]);
        self.sink.finish()
    }

    /// If a literal opens at `pos`, return the offset just past it.
    fn literal_at(&self, pos: usize) -> Option<usize> {
        let quote = self.bytes[pos];
        if !quote.is_ascii() || !self.profile.quotes.contains(&(quote as char)) {
            return None;
        }
        if self.profile.triple_quoted && self.bytes[pos..].starts_with(&[quote; 3]) {
            return Some(self.triple_end(pos + 3, quote));
        }
        if quote == b'\'' && self.profile.char_literals {
            return self.char_literal_end(pos);
        }
        Some(self.string_end(pos + 1, quote))
    }

    /// Scan a string literal body starting at `from`.
    ///
    /// Backslash escapes the next byte, so an odd run of backslashes before
    /// the quote escapes it and an even run does not. Go backtick literals
    /// are raw and have no escapes. Only backtick literals may span lines;
    /// the others stop before an unescaped newline.
    fn string_end(&self, from: usize, quote: u8) -> usize {
        let raw = quote == b'`' && self.profile.raw_backticks;
        let mut i = from;
        while i < self.bytes.len() {
            match self.bytes[i] {
                b'\\' if !raw => i += 2,
                b if b == quote => return i + 1,
                b'\n' if quote != b'`' => return i,
                _ => i += 1,
            }
        }
        self.bytes.len()
    }

    fn triple_end(&self, from: usize, quote: u8) -> usize {
        let mut i = from;
        while i < self.bytes.len() {
            if self.bytes[i] == b'\\' {
                i += 2;
                continue;
            }
            if self.bytes[i..].starts_with(&[quote; 3]) {
                return i + 3;
            }
            i += 1;
        }
        self.bytes.len()
    }

    /// `'x'` or `'\n'`-shaped literals only; anything else (a Rust lifetime,
    /// a stray apostrophe) is plain text.
    fn char_literal_end(&self, pos: usize) -> Option<usize> {
        let rest = &self.src[pos + 1..];
        if rest.starts_with('\\') {
            // '\n', '\'', '\x7f', '\u{1F600}'
            let body = rest.get(2..)?;
            let close = body.find(|c| c == '\'' || c == '\n')?;
            if body.as_bytes()[close] == b'\'' && close <= 10 {
                return Some(pos + 1 + 2 + close + 1);
            }
            return None;
        }
        let ch = rest.chars().next()?;
        if ch == '\'' || ch == '\n' {
            return None;
        }
        let after = pos + 1 + ch.len_utf8();
        (self.bytes.get(after) == Some(&b'\'')).then_some(after + 1)
    }

    fn block_at(&self, pos: usize) -> Option<&'a BlockDelimiter> {
        self.profile
            .block_delimiters
            .iter()
            .find(|d| self.bytes[pos..].starts_with(d.open.as_bytes()))
    }

    /// Handle a block comment opening at `pos`; return the offset after it.
    fn block_comment(&mut self, pos: usize, delim: &BlockDelimiter) -> usize {
        // A doc opener shares its last byte with the close, so `/**/` is
        // already complete.
        let body = if delim.is_doc {
            pos + delim.open.len() - 1
        } else {
            pos + delim.open.len()
        };
        let end = match self.src[body..].find(delim.close) {
            Some(idx) => body + idx + delim.close.len(),
            None => self.src.len(),
        };
        let text = &self.src[pos..end];
        let keep_doc = delim.is_doc
            && self.policy.keeps_doc_comments()
            && self.is_doc_opener(pos, delim);
        if keep_doc || self.policy.should_preserve(text) {
            self.sink.push_str(text);
        } else {
            self.sink.mark_removed();
        }
        end
    }

    /// `/**` counts as documentation, `/***` and the empty `/**/` do not.
    fn is_doc_opener(&self, pos: usize, delim: &BlockDelimiter) -> bool {
        let last = delim.open.len() - 1;
        let tail = &self.bytes[pos + last..];
        let repeats_last = self.bytes.get(pos + delim.open.len()) == delim.open.as_bytes().last();
        !repeats_last && !tail.starts_with(delim.close.as_bytes())
    }

    fn line_marker_at(&self, pos: usize) -> bool {
        self.profile
            .line_markers
            .iter()
            .any(|m| self.bytes[pos..].starts_with(m.as_bytes()))
    }

    /// Handle a line comment at `pos`; return the offset of the line break.
    fn line_comment(&mut self, pos: usize) -> usize {
        let end = self.src[pos..]
            .find('\n')
            .map(|idx| pos + idx)
            .unwrap_or(self.src.len());
        let text = &self.src[pos..end];
        let keep_doc = self.policy.keeps_doc_comments()
            && self.sink.line_is_blank()
            && self.is_doc_line(text);
        if keep_doc || self.policy.should_preserve(text) {
            self.sink.push_str(text);
        } else {
            self.sink.truncate();
        }
        end
    }

    /// `///` and `//!` are doc lines; `////` dividers are not.
    fn is_doc_line(&self, text: &str) -> bool {
        self.profile.doc_line_markers.iter().any(|marker| {
            text.strip_prefix(marker)
                .map(|rest| !rest.starts_with('/'))
                .unwrap_or(false)
        })
    }
}
