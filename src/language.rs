//! Language classification by file extension.

use phf::phf_map;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A language the comment stripper knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageId {
    Python,
    Html,
    Css,
    JavaScript,
    TypeScript,
    C,
    Cpp,
    Java,
    Ruby,
    Go,
    Php,
    Sql,
    Swift,
    Rust,
    Kotlin,
    Bash,
    PowerShell,
    Lua,
    Perl,
    Yaml,
    Haskell,
    Dart,
    Matlab,
    R,
    CSharp,
    Unknown,
}

/// Extension (lowercase, without the dot) to language.
static EXTENSIONS: phf::Map<&'static str, LanguageId> = phf_map! {
    "py" => LanguageId::Python,
    "html" => LanguageId::Html,
    "htm" => LanguageId::Html,
    "css" => LanguageId::Css,
    "js" => LanguageId::JavaScript,
    "jsx" => LanguageId::JavaScript,
    "mjs" => LanguageId::JavaScript,
    "cjs" => LanguageId::JavaScript,
    "ts" => LanguageId::TypeScript,
    "tsx" => LanguageId::TypeScript,
    "c" => LanguageId::C,
    "h" => LanguageId::C,
    "cpp" => LanguageId::Cpp,
    "hpp" => LanguageId::Cpp,
    "cc" => LanguageId::Cpp,
    "cxx" => LanguageId::Cpp,
    "java" => LanguageId::Java,
    "rb" => LanguageId::Ruby,
    "go" => LanguageId::Go,
    "php" => LanguageId::Php,
    "sql" => LanguageId::Sql,
    "swift" => LanguageId::Swift,
    "rs" => LanguageId::Rust,
    "kt" => LanguageId::Kotlin,
    "kts" => LanguageId::Kotlin,
    "sh" => LanguageId::Bash,
    "bash" => LanguageId::Bash,
    "ps1" => LanguageId::PowerShell,
    "psm1" => LanguageId::PowerShell,
    "lua" => LanguageId::Lua,
    "pl" => LanguageId::Perl,
    "pm" => LanguageId::Perl,
    "yaml" => LanguageId::Yaml,
    "yml" => LanguageId::Yaml,
    "hs" => LanguageId::Haskell,
    "dart" => LanguageId::Dart,
    "m" => LanguageId::Matlab,
    "r" => LanguageId::R,
    "cs" => LanguageId::CSharp,
};

impl LanguageId {
    /// Every known language, excluding `Unknown`.
    pub const ALL: &'static [LanguageId] = &[
        LanguageId::Python,
        LanguageId::Html,
        LanguageId::Css,
        LanguageId::JavaScript,
        LanguageId::TypeScript,
        LanguageId::C,
        LanguageId::Cpp,
        LanguageId::Java,
        LanguageId::Ruby,
        LanguageId::Go,
        LanguageId::Php,
        LanguageId::Sql,
        LanguageId::Swift,
        LanguageId::Rust,
        LanguageId::Kotlin,
        LanguageId::Bash,
        LanguageId::PowerShell,
        LanguageId::Lua,
        LanguageId::Perl,
        LanguageId::Yaml,
        LanguageId::Haskell,
        LanguageId::Dart,
        LanguageId::Matlab,
        LanguageId::R,
        LanguageId::CSharp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageId::Python => "python",
            LanguageId::Html => "html",
            LanguageId::Css => "css",
            LanguageId::JavaScript => "javascript",
            LanguageId::TypeScript => "typescript",
            LanguageId::C => "c",
            LanguageId::Cpp => "cpp",
            LanguageId::Java => "java",
            LanguageId::Ruby => "ruby",
            LanguageId::Go => "go",
            LanguageId::Php => "php",
            LanguageId::Sql => "sql",
            LanguageId::Swift => "swift",
            LanguageId::Rust => "rust",
            LanguageId::Kotlin => "kotlin",
            LanguageId::Bash => "bash",
            LanguageId::PowerShell => "powershell",
            LanguageId::Lua => "lua",
            LanguageId::Perl => "perl",
            LanguageId::Yaml => "yaml",
            LanguageId::Haskell => "haskell",
            LanguageId::Dart => "dart",
            LanguageId::Matlab => "matlab",
            LanguageId::R => "r",
            LanguageId::CSharp => "csharp",
            LanguageId::Unknown => "unknown",
        }
    }

    /// File extensions mapped to this language, sorted.
    pub fn extensions(&self) -> Vec<&'static str> {
        let mut exts: Vec<&'static str> = EXTENSIONS
            .entries()
            .filter(|(_, lang)| *lang == self)
            .map(|(ext, _)| *ext)
            .collect();
        exts.sort_unstable();
        exts
    }

    pub fn is_known(&self) -> bool {
        *self != LanguageId::Unknown
    }
}

impl std::fmt::Display for LanguageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LanguageId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        if lower == "unknown" {
            return Ok(LanguageId::Unknown);
        }
        LanguageId::ALL
            .iter()
            .copied()
            .find(|lang| lang.as_str() == lower)
            .ok_or_else(|| format!("unknown language: {}", s))
    }
}

/// Classify a path by its extension (case-insensitive).
///
/// Paths without an extension, or with one not in the table, are `Unknown`.
pub fn classify<P: AsRef<Path>>(path: P) -> LanguageId {
    let ext = match path.as_ref().extension().and_then(|e| e.to_str()) {
        Some(ext) => ext.to_ascii_lowercase(),
        None => return LanguageId::Unknown,
    };
    EXTENSIONS
        .get(ext.as_str())
        .copied()
        .unwrap_or(LanguageId::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_common_extensions() {
        assert_eq!(classify("main.py"), LanguageId::Python);
        assert_eq!(classify("src/lib.rs"), LanguageId::Rust);
        assert_eq!(classify("index.htm"), LanguageId::Html);
        assert_eq!(classify("a/b/c.hpp"), LanguageId::Cpp);
        assert_eq!(classify("deploy.yml"), LanguageId::Yaml);
        assert_eq!(classify("Program.cs"), LanguageId::CSharp);
        assert_eq!(classify("analysis.m"), LanguageId::Matlab);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(classify("script.R"), LanguageId::R);
        assert_eq!(classify("MAIN.PY"), LanguageId::Python);
        assert_eq!(classify("Widget.Dart"), LanguageId::Dart);
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(classify("README"), LanguageId::Unknown);
        assert_eq!(classify("notes.txt"), LanguageId::Unknown);
        assert_eq!(classify("main.py.bak"), LanguageId::Unknown);
        assert_eq!(classify(""), LanguageId::Unknown);
    }

    #[test]
    fn test_every_language_has_an_extension() {
        for lang in LanguageId::ALL {
            assert!(!lang.extensions().is_empty(), "{} has no extension", lang);
        }
        assert!(LanguageId::Unknown.extensions().is_empty());
    }

    #[test]
    fn test_parse_round_trips_names() {
        for lang in LanguageId::ALL {
            assert_eq!(lang.as_str().parse::<LanguageId>().unwrap(), *lang);
        }
        assert!("cobol".parse::<LanguageId>().is_err());
    }
}
