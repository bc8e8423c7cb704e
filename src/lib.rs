//! Decomment - strip comments from source code.
//!
//! Decomment removes comments from source files in two dozen languages
//! while leaving string literals intact. Comments can be kept selectively:
//! TODO/FIXME notes, documentation comments, or anything matching a user
//! regex.
//!
//! # Architecture
//!
//! - `language`: file extension to `LanguageId`
//! - `profile`: per-language comment and literal syntax, as data
//! - `policy`: which comments survive
//! - `engine`: the scanners (`strip_comments`, `clean`)
//! - `normalize`: whitespace cleanup after stripping
//! - `stats`: comment estimates and size statistics
//! - `files`, `runner`: selecting files and rewriting them in place
//! - `config`, `report`, `cli`: the command-line tool
//!
//! # Example
//!
//! ```
//! use decomment::{clean, LanguageId, PreservationPolicy};
//!
//! let policy = PreservationPolicy::new().preserve_todo(true);
//! let out = clean("x = 1 # TODO: tune\ny = 2 # drop\n", LanguageId::Python, &policy);
//! assert_eq!(out, "x = 1 # TODO: tune\ny = 2\n");
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod files;
pub mod language;
pub mod normalize;
pub mod policy;
pub mod profile;
pub mod report;
pub mod runner;
pub mod stats;

pub use config::Config;
pub use engine::{clean, strip_comments};
pub use error::ProcessError;
pub use files::FileSelector;
pub use language::{classify, LanguageId};
pub use normalize::normalize;
pub use policy::PreservationPolicy;
pub use profile::{profile_for, ScanFamily, SyntaxProfile};
pub use runner::{BatchReport, FileOutcome, FileStatus, Runner};
pub use stats::{estimate_comment_count, FileStats, Summary};
