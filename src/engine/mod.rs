//! Comment scanning engine.
//!
//! `strip_comments` dispatches on the language's `ScanFamily`:
//! - `c_style`: single pass that tracks string, char and template literals
//! - `python`: tree-sitter tokenization with a line-based fallback
//! - `marker`: paired block delimiters, then line markers
//! - `html`: `<!-- -->` spans only
//!
//! Every call owns its scan state, so calls are safe to run in parallel.

mod c_style;
mod html;
mod marker;
mod python;
pub(crate) mod sink;

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::language::LanguageId;
use crate::normalize::normalize;
use crate::policy::PreservationPolicy;
use crate::profile::{profile_for, profiles, BlockDelimiter, ScanFamily, SyntaxProfile};

use sink::LineSink;

/// Compiled block-comment matchers, one per language with block syntax.
static BLOCK_PATTERNS: Lazy<HashMap<LanguageId, Regex>> = Lazy::new(|| {
    profiles()
        .iter()
        .filter_map(|p| {
            // Python's delimiters are docstrings; an unclosed one is left alone.
            let to_end_of_input = p.family != ScanFamily::Python;
            compile_blocks(p.block_delimiters, to_end_of_input).map(|re| (p.language, re))
        })
        .collect()
});

/// Build one alternation matching any of the delimiter pairs, non-greedy.
fn compile_blocks(delimiters: &[BlockDelimiter], to_end_of_input: bool) -> Option<Regex> {
    if delimiters.is_empty() {
        return None;
    }
    let alternatives: Vec<String> = delimiters
        .iter()
        .map(|d| {
            let (open, close) = if d.line_anchored {
                (
                    format!("^{}", regex::escape(d.open)),
                    format!(r"^{}[^\n]*", regex::escape(d.close)),
                )
            } else {
                (regex::escape(d.open), regex::escape(d.close))
            };
            if to_end_of_input {
                format!(r"{}.*?(?:{}|\z)", open, close)
            } else {
                format!("{}.*?{}", open, close)
            }
        })
        .collect();
    Regex::new(&format!("(?ms){}", alternatives.join("|"))).ok()
}

fn block_pattern(profile: &SyntaxProfile) -> Option<&'static Regex> {
    BLOCK_PATTERNS.get(&profile.language)
}

/// Walk block-comment matches, keeping preserved ones verbatim.
///
/// Text between matches goes through `gap`, which may scan it further.
fn strip_blocks<F>(
    text: &str,
    pattern: Option<&Regex>,
    policy: &PreservationPolicy,
    sink: &mut LineSink,
    mut gap: F,
) where
    F: FnMut(&str, &mut LineSink),
{
    let Some(pattern) = pattern else {
        gap(text, sink);
        return;
    };
    let mut last = 0;
    for m in pattern.find_iter(text) {
        gap(&text[last..m.start()], sink);
        if policy.should_preserve(m.as_str()) {
            sink.push_str(m.as_str());
        } else {
            sink.mark_removed();
        }
        last = m.end();
    }
    gap(&text[last..], sink);
}

/// Remove comments from `source` according to the language's profile.
///
/// Unknown languages are returned unchanged.
pub fn strip_comments(source: &str, language: LanguageId, policy: &PreservationPolicy) -> String {
    let Some(profile) = profile_for(language) else {
        return source.to_string();
    };
    match profile.family {
        ScanFamily::CStyle => c_style::strip(source, profile, policy),
        ScanFamily::Python => python::strip(source, profile, policy),
        ScanFamily::Delimited | ScanFamily::Hash => {
            marker::strip(source, profile, block_pattern(profile), policy)
        }
        ScanFamily::Markup => html::strip(source, block_pattern(profile), policy),
    }
}

/// Strip comments, then normalize whitespace.
///
/// Normalization only runs when a profile exists; unknown languages come
/// back byte-for-byte.
pub fn clean(source: &str, language: LanguageId, policy: &PreservationPolicy) -> String {
    if profile_for(language).is_none() {
        return source.to_string();
    }
    normalize(&strip_comments(source, language, policy))
}
