//! Per-language comment syntax profiles.
//!
//! The registry is a constant table: one `SyntaxProfile` per supported
//! language, never mutated after compilation. Everything the scanners need
//! to know about a language that is data rather than behavior lives here:
//!
//! - line-comment markers and block-comment delimiter pairs
//! - documentation-comment markers
//! - string quote characters and how literals behave
//! - shebang / encoding-declaration exceptions

use crate::language::LanguageId;

/// Which scanning strategy handles a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanFamily {
    /// Single pass tracking string, char and template literals (C, Java, JS, ...).
    CStyle,
    /// Tokenizer-driven scan with a line-based fallback.
    Python,
    /// Paired block delimiters removed first, then line markers (Lua, Ruby, SQL, ...).
    Delimited,
    /// Line markers only (Bash, YAML, R).
    Hash,
    /// Block delimiters only (HTML).
    Markup,
}

/// A block comment delimiter pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockDelimiter {
    pub open: &'static str,
    pub close: &'static str,
    /// Documentation comment (`/** */`, Python docstrings).
    pub is_doc: bool,
    /// Both delimiters must start a line (Ruby `=begin`, Perl POD).
    pub line_anchored: bool,
}

impl BlockDelimiter {
    pub(crate) const fn new(open: &'static str, close: &'static str) -> Self {
        Self {
            open,
            close,
            is_doc: false,
            line_anchored: false,
        }
    }

    pub(crate) const fn doc(open: &'static str, close: &'static str) -> Self {
        Self {
            open,
            close,
            is_doc: true,
            line_anchored: false,
        }
    }

    pub(crate) const fn anchored(open: &'static str, close: &'static str) -> Self {
        Self {
            open,
            close,
            is_doc: false,
            line_anchored: true,
        }
    }
}

/// Comment and literal syntax for one language.
#[derive(Debug, Clone, Copy)]
pub struct SyntaxProfile {
    pub language: LanguageId,
    pub family: ScanFamily,
    /// Line comment markers, tried in order.
    pub line_markers: &'static [&'static str],
    /// Block comment delimiters, tried in order (longer openers first).
    pub block_delimiters: &'static [BlockDelimiter],
    /// Line markers that denote documentation when they start a line.
    pub doc_line_markers: &'static [&'static str],
    /// `#!` lines are kept.
    pub shebang_preserved: bool,
    /// `# -*- coding: ... -*-` lines are kept.
    pub encoding_decl_preserved: bool,
    /// Characters that delimit string literals.
    pub quotes: &'static [char],
    /// `'` only delimits single-character literals (`'a'`, `'\n'`).
    pub char_literals: bool,
    /// A tripled quote opens a literal closed by the same triple.
    pub triple_quoted: bool,
    /// Backtick literals are raw: backslash does not escape (Go).
    pub raw_backticks: bool,
    /// Line markers only count at line start or after whitespace.
    pub word_start_markers: bool,
}

const C_BLOCKS: &[BlockDelimiter] = &[
    BlockDelimiter::doc("/**", "*/"),
    BlockDelimiter::new("/*", "*/"),
];

const C_FAMILY: SyntaxProfile = SyntaxProfile {
    language: LanguageId::C,
    family: ScanFamily::CStyle,
    line_markers: &["//"],
    block_delimiters: C_BLOCKS,
    doc_line_markers: &[],
    shebang_preserved: false,
    encoding_decl_preserved: false,
    quotes: &['"', '\''],
    char_literals: true,
    triple_quoted: false,
    raw_backticks: false,
    word_start_markers: false,
};

const LINE_FAMILY: SyntaxProfile = SyntaxProfile {
    language: LanguageId::Bash,
    family: ScanFamily::Hash,
    line_markers: &["#"],
    block_delimiters: &[],
    doc_line_markers: &[],
    shebang_preserved: false,
    encoding_decl_preserved: false,
    quotes: &['"', '\''],
    char_literals: false,
    triple_quoted: false,
    raw_backticks: false,
    word_start_markers: false,
};

static PROFILES: &[SyntaxProfile] = &[
    SyntaxProfile {
        language: LanguageId::C,
        ..C_FAMILY
    },
    SyntaxProfile {
        language: LanguageId::Cpp,
        ..C_FAMILY
    },
    SyntaxProfile {
        language: LanguageId::Java,
        ..C_FAMILY
    },
    SyntaxProfile {
        language: LanguageId::JavaScript,
        quotes: &['"', '\'', '`'],
        char_literals: false,
        ..C_FAMILY
    },
    SyntaxProfile {
        language: LanguageId::TypeScript,
        quotes: &['"', '\'', '`'],
        char_literals: false,
        ..C_FAMILY
    },
    SyntaxProfile {
        language: LanguageId::Css,
        line_markers: &[],
        char_literals: false,
        ..C_FAMILY
    },
    SyntaxProfile {
        language: LanguageId::Go,
        quotes: &['"', '\'', '`'],
        raw_backticks: true,
        ..C_FAMILY
    },
    SyntaxProfile {
        language: LanguageId::Swift,
        doc_line_markers: &["///"],
        quotes: &['"'],
        char_literals: false,
        triple_quoted: true,
        ..C_FAMILY
    },
    SyntaxProfile {
        language: LanguageId::Rust,
        doc_line_markers: &["///", "//!"],
        ..C_FAMILY
    },
    SyntaxProfile {
        language: LanguageId::Kotlin,
        triple_quoted: true,
        ..C_FAMILY
    },
    SyntaxProfile {
        language: LanguageId::Dart,
        doc_line_markers: &["///"],
        char_literals: false,
        triple_quoted: true,
        ..C_FAMILY
    },
    SyntaxProfile {
        language: LanguageId::CSharp,
        doc_line_markers: &["///"],
        ..C_FAMILY
    },
    SyntaxProfile {
        language: LanguageId::Php,
        line_markers: &["//", "#"],
        char_literals: false,
        ..C_FAMILY
    },
    SyntaxProfile {
        language: LanguageId::Python,
        family: ScanFamily::Python,
        block_delimiters: &[
            BlockDelimiter::doc("\"\"\"", "\"\"\""),
            BlockDelimiter::doc("'''", "'''"),
        ],
        shebang_preserved: true,
        encoding_decl_preserved: true,
        ..LINE_FAMILY
    },
    SyntaxProfile {
        language: LanguageId::Ruby,
        family: ScanFamily::Delimited,
        block_delimiters: &[BlockDelimiter::anchored("=begin", "=end")],
        shebang_preserved: true,
        ..LINE_FAMILY
    },
    SyntaxProfile {
        language: LanguageId::Perl,
        family: ScanFamily::Delimited,
        block_delimiters: &[
            BlockDelimiter::anchored("=begin", "=cut"),
            BlockDelimiter::anchored("=pod", "=cut"),
            BlockDelimiter::anchored("=head1", "=cut"),
            BlockDelimiter::anchored("=head2", "=cut"),
            BlockDelimiter::anchored("=head3", "=cut"),
            BlockDelimiter::anchored("=head4", "=cut"),
            BlockDelimiter::anchored("=over", "=cut"),
            BlockDelimiter::anchored("=item", "=cut"),
            BlockDelimiter::anchored("=for", "=cut"),
            BlockDelimiter::anchored("=encoding", "=cut"),
        ],
        shebang_preserved: true,
        ..LINE_FAMILY
    },
    SyntaxProfile {
        language: LanguageId::Lua,
        family: ScanFamily::Delimited,
        line_markers: &["--"],
        block_delimiters: &[BlockDelimiter::new("--[[", "]]")],
        ..LINE_FAMILY
    },
    SyntaxProfile {
        language: LanguageId::Haskell,
        family: ScanFamily::Delimited,
        line_markers: &["--"],
        block_delimiters: &[BlockDelimiter::new("{-", "-}")],
        ..LINE_FAMILY
    },
    SyntaxProfile {
        language: LanguageId::PowerShell,
        family: ScanFamily::Delimited,
        block_delimiters: &[BlockDelimiter::new("<#", "#>")],
        ..LINE_FAMILY
    },
    SyntaxProfile {
        language: LanguageId::Matlab,
        family: ScanFamily::Delimited,
        line_markers: &["%"],
        block_delimiters: &[BlockDelimiter::new("%{", "%}")],
        ..LINE_FAMILY
    },
    SyntaxProfile {
        language: LanguageId::Sql,
        family: ScanFamily::Delimited,
        line_markers: &["--"],
        block_delimiters: &[BlockDelimiter::new("/*", "*/")],
        ..LINE_FAMILY
    },
    SyntaxProfile {
        language: LanguageId::Bash,
        shebang_preserved: true,
        word_start_markers: true,
        ..LINE_FAMILY
    },
    SyntaxProfile {
        language: LanguageId::Yaml,
        word_start_markers: true,
        ..LINE_FAMILY
    },
    SyntaxProfile {
        language: LanguageId::R,
        ..LINE_FAMILY
    },
    SyntaxProfile {
        language: LanguageId::Html,
        family: ScanFamily::Markup,
        line_markers: &[],
        block_delimiters: &[BlockDelimiter::new("<!--", "-->")],
        quotes: &[],
        ..LINE_FAMILY
    },
];

/// Look up the profile for a language.
///
/// Returns `None` for `Unknown`, in which case stripping is the identity.
pub fn profile_for(language: LanguageId) -> Option<&'static SyntaxProfile> {
    PROFILES.iter().find(|p| p.language == language)
}

/// All registered profiles.
pub fn profiles() -> &'static [SyntaxProfile] {
    PROFILES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_known_language_has_one_profile() {
        for lang in LanguageId::ALL {
            let count = PROFILES.iter().filter(|p| p.language == *lang).count();
            assert_eq!(count, 1, "{} should have exactly one profile", lang);
        }
    }

    #[test]
    fn test_unknown_has_no_profile() {
        assert!(profile_for(LanguageId::Unknown).is_none());
    }

    #[test]
    fn test_c_family_shares_block_delimiters() {
        for p in PROFILES.iter().filter(|p| p.family == ScanFamily::CStyle) {
            assert_eq!(p.block_delimiters, C_BLOCKS, "{}", p.language);
        }
    }

    #[test]
    fn test_only_go_backticks_are_raw() {
        for p in PROFILES {
            assert_eq!(p.raw_backticks, p.language == LanguageId::Go, "{}", p.language);
        }
    }

    #[test]
    fn test_php_has_two_line_markers() {
        let php = profile_for(LanguageId::Php).unwrap();
        assert_eq!(php.line_markers, &["//", "#"]);
    }

    #[test]
    fn test_only_js_ts_go_treat_backtick_as_quote() {
        let backtick: Vec<_> = PROFILES
            .iter()
            .filter(|p| p.quotes.contains(&'`'))
            .map(|p| p.language)
            .collect();
        assert_eq!(
            backtick,
            vec![LanguageId::JavaScript, LanguageId::TypeScript, LanguageId::Go]
        );
    }

    #[test]
    fn test_shebang_rules() {
        let keeps: Vec<_> = PROFILES
            .iter()
            .filter(|p| p.shebang_preserved)
            .map(|p| p.language)
            .collect();
        assert_eq!(
            keeps,
            vec![
                LanguageId::Python,
                LanguageId::Ruby,
                LanguageId::Perl,
                LanguageId::Bash
            ]
        );
        assert!(profile_for(LanguageId::Python).unwrap().encoding_decl_preserved);
    }
}
