//! YAML configuration for decomment.
//!
//! Looked up in this order, first hit wins:
//! 1. an explicit `--config <path>`
//! 2. `decomment.yaml` or `.decomment.yaml` in the working directory
//! 3. `config.yaml` in the user's config directory for decomment
//!
//! With no file, every setting takes its default.

use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::policy::PreservationPolicy;
use crate::runner::DEFAULT_THREADS;

/// File names searched for in the working directory.
pub const CONFIG_NAMES: &[&str] = &["decomment.yaml", ".decomment.yaml"];

/// Commented starter config written by `decomment init`.
pub const TEMPLATE: &str = include_str!("templates/default.yaml");

/// Settings for a cleaning run.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub preserve_todo: bool,
    #[serde(default)]
    pub preserve_patterns: Vec<String>,
    #[serde(default)]
    pub keep_doc_comments: bool,
    /// Remove the Python shebang and encoding line too (default: keep them)
    #[serde(default)]
    pub strip_script_header: bool,
    /// Write `<file>.bak` before changing a file (default: true)
    #[serde(default = "default_true")]
    pub backup: bool,
    #[serde(default)]
    pub force: bool,
    #[serde(default)]
    pub recursive: bool,
    #[serde(default = "default_threads")]
    pub threads: usize,
    /// Glob patterns for paths to skip (e.g., "**/generated/**")
    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_threads() -> usize {
    DEFAULT_THREADS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preserve_todo: false,
            preserve_patterns: Vec::new(),
            keep_doc_comments: false,
            strip_script_header: false,
            backup: true,
            force: false,
            recursive: false,
            threads: DEFAULT_THREADS,
            exclude: Vec::new(),
        }
    }
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse_str(&content)
    }

    /// Parse YAML text. A document holding only comments yields defaults.
    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        let only_comments = content.lines().all(|line| {
            let line = line.trim();
            line.is_empty() || line.starts_with('#')
        });
        if only_comments {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load the explicit config, or the first one discovered.
    ///
    /// Returns the path the settings came from, if any.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<(Self, Option<PathBuf>)> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => discover(Path::new("."), user_config_path()),
        };
        match path {
            Some(path) => {
                let config = Self::parse_file(&path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                Ok((config, Some(path)))
            }
            None => Ok((Self::default(), None)),
        }
    }

    /// Build the preservation policy these settings describe.
    pub fn policy(&self) -> PreservationPolicy {
        PreservationPolicy::new()
            .preserve_todo(self.preserve_todo)
            .keep_doc_comments(self.keep_doc_comments)
            .strip_script_header(self.strip_script_header)
            .patterns(&self.preserve_patterns)
    }
}

/// `config.yaml` under the platform config directory for decomment.
pub fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "decomment").map(|dirs| dirs.config_dir().join("config.yaml"))
}

/// Find a config file in `dir`, falling back to `user_config`.
pub fn discover(dir: &Path, user_config: Option<PathBuf>) -> Option<PathBuf> {
    CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
        .or_else(|| user_config.filter(|path| path.is_file()))
}

/// Validate settings that would otherwise fail mid-run.
///
/// Preserve patterns are not checked here: a bad pattern is reported and
/// skipped when the policy is built.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    if config.threads == 0 {
        anyhow::bail!("threads must be at least 1");
    }

    for pattern in &config.exclude {
        globset::Glob::new(pattern)
            .map_err(|e| anyhow::anyhow!("invalid exclude pattern {:?}: {}", pattern, e))?;
    }

    Ok(())
}
