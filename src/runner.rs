//! Batch driver: cleans a list of files in place.
//!
//! Each file is independent. A backup copy is taken before anything is
//! read, the cleaned text is written through a temporary file that is
//! renamed over the original, and any failure after the backup exists puts
//! the original back. One file failing never stops the others.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::engine::clean;
use crate::error::ProcessError;
use crate::language::{classify, LanguageId};
use crate::policy::PreservationPolicy;
use crate::stats::{FileStats, Summary};

/// Default worker count.
pub const DEFAULT_THREADS: usize = 4;

/// Result of handling one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub language: LanguageId,
    #[serde(flatten)]
    pub status: FileStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FileStatus {
    Processed {
        stats: FileStats,
        #[serde(skip_serializing_if = "Option::is_none")]
        backup: Option<PathBuf>,
    },
    Skipped {
        reason: String,
    },
    Failed {
        kind: String,
        error: String,
    },
}

/// Everything a batch run produced.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub dry_run: bool,
    pub files: Vec<FileOutcome>,
    pub summary: Summary,
}

impl BatchReport {
    pub fn has_failures(&self) -> bool {
        self.summary.files_failed > 0
    }
}

/// Cleans files according to a preservation policy.
pub struct Runner {
    policy: PreservationPolicy,
    backup: bool,
    force: bool,
    dry_run: bool,
    threads: usize,
    show_progress: bool,
}

impl Runner {
    /// Create a runner with backups on and everything else off.
    pub fn new(policy: PreservationPolicy) -> Self {
        Self {
            policy,
            backup: true,
            force: false,
            dry_run: false,
            threads: DEFAULT_THREADS,
            show_progress: false,
        }
    }

    /// Write `<file>.bak` before touching a file.
    pub fn backup(mut self, on: bool) -> Self {
        self.backup = on;
        self
    }

    /// Process files whose language is not recognized.
    pub fn force(mut self, on: bool) -> Self {
        self.force = on;
        self
    }

    /// Compute results without writing anything.
    pub fn dry_run(mut self, on: bool) -> Self {
        self.dry_run = on;
        self
    }

    /// Worker count; zero is treated as one.
    pub fn threads(mut self, n: usize) -> Self {
        self.threads = n.max(1);
        self
    }

    pub fn show_progress(mut self, on: bool) -> Self {
        self.show_progress = on;
        self
    }

    /// Clean every file, in parallel, and collect the outcomes.
    ///
    /// Outcomes come back in the order of `files`. Only failing to start
    /// the worker pool is an error; per-file problems are recorded in the
    /// report.
    pub fn run(&self, files: &[PathBuf]) -> anyhow::Result<BatchReport> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build()?;

        let progress = self.progress_bar(files.len());
        let outcomes: Vec<FileOutcome> = pool.install(|| {
            files
                .par_iter()
                .map(|path| {
                    let outcome = self.process(path);
                    progress.inc(1);
                    outcome
                })
                .collect()
        });
        progress.finish_and_clear();

        let mut summary = Summary {
            files_found: files.len(),
            ..Default::default()
        };
        for outcome in &outcomes {
            match &outcome.status {
                FileStatus::Processed { stats, .. } => summary.record_processed(stats),
                FileStatus::Skipped { .. } => summary.record_skipped(),
                FileStatus::Failed { .. } => summary.record_failed(),
            }
        }

        Ok(BatchReport {
            dry_run: self.dry_run,
            files: outcomes,
            summary,
        })
    }

    /// Handle one file end to end.
    pub fn process(&self, path: &Path) -> FileOutcome {
        let language = classify(path);
        if !language.is_known() && !self.force {
            debug!(path = %path.display(), "skipping unknown file type");
            return FileOutcome {
                path: path.to_path_buf(),
                language,
                status: FileStatus::Skipped {
                    reason: "unknown file type (use --force to process anyway)".to_string(),
                },
            };
        }

        let status = match self.clean_file(path, language) {
            Ok((stats, backup)) => {
                info!(
                    path = %path.display(),
                    %language,
                    comments = stats.comment_count,
                    saved = stats.size_reduction,
                    "cleaned"
                );
                FileStatus::Processed { stats, backup }
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to clean file");
                FileStatus::Failed {
                    kind: e.kind().to_string(),
                    error: e.to_string(),
                }
            }
        };

        FileOutcome {
            path: path.to_path_buf(),
            language,
            status,
        }
    }

    fn clean_file(
        &self,
        path: &Path,
        language: LanguageId,
    ) -> Result<(FileStats, Option<PathBuf>), ProcessError> {
        let backup = if self.backup && !self.dry_run {
            Some(create_backup(path)?)
        } else {
            None
        };

        match self.transform(path, language) {
            Ok(stats) => Ok((stats, backup)),
            Err(err) => {
                if let Some(backup) = &backup {
                    restore_from_backup(path, backup)?;
                    debug!(path = %path.display(), "restored from backup");
                }
                Err(err)
            }
        }
    }

    fn transform(&self, path: &Path, language: LanguageId) -> Result<FileStats, ProcessError> {
        let bytes = fs::read(path).map_err(|source| ProcessError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let original = String::from_utf8(bytes).map_err(|_| ProcessError::Decode {
            path: path.to_path_buf(),
        })?;

        let cleaned = clean(&original, language, &self.policy);
        let stats = FileStats::compute(language, &original, &cleaned);

        if !self.dry_run && cleaned != original {
            write_atomic(path, cleaned.as_bytes()).map_err(|source| ProcessError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        Ok(stats)
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }
}

/// `<path>.bak`, next to the original.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".bak");
    PathBuf::from(name)
}

fn create_backup(path: &Path) -> Result<PathBuf, ProcessError> {
    let backup = backup_path(path);
    fs::copy(path, &backup).map_err(|source| ProcessError::Backup {
        backup: backup.clone(),
        source,
    })?;
    Ok(backup)
}

fn restore_from_backup(path: &Path, backup: &Path) -> Result<(), ProcessError> {
    fs::copy(backup, path)
        .map(|_| ())
        .map_err(|source| ProcessError::Restore {
            path: path.to_path_buf(),
            backup: backup.to_path_buf(),
            source,
        })
}

/// Write through a temp file in the same directory, then rename it over
/// `path`. The original's permissions carry over.
fn write_atomic(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let permissions = fs::metadata(path)?.permissions();

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;
    fs::set_permissions(tmp.path(), permissions)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
