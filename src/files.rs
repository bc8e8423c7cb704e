//! Selection of the files a run will touch.
//!
//! Inputs may be files, directories or glob patterns. Directories are
//! walked (one level unless recursive) and only yield files in a known
//! language unless forced; globs and explicit files are taken as given and
//! left for the runner to skip.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::language::classify;

/// Directory names never descended into.
const IGNORED_DIRS: &[&str] = &["node_modules", "vendor", "target", ".git", "__pycache__"];

/// Suffix of the runner's backup copies.
const BACKUP_SUFFIX: &str = ".bak";

/// Resolves command-line inputs into a sorted, de-duplicated file list.
#[derive(Debug, Clone, Default)]
pub struct FileSelector {
    recursive: bool,
    force: bool,
    exclude: Vec<String>,
}

impl FileSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk directories fully and treat `*.ext` globs as `**/*.ext`.
    pub fn recursive(mut self, on: bool) -> Self {
        self.recursive = on;
        self
    }

    /// Take files of unknown language from directory walks too.
    pub fn force(mut self, on: bool) -> Self {
        self.force = on;
        self
    }

    /// Glob patterns whose matches are dropped.
    pub fn exclude<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Resolve `inputs`. Fails only on a malformed glob.
    pub fn select<S: AsRef<str>>(&self, inputs: &[S]) -> anyhow::Result<Vec<PathBuf>> {
        let excluded = build_set(&self.exclude)?;
        let mut files = BTreeSet::new();

        for input in inputs {
            let input = input.as_ref();
            let path = Path::new(input);
            if path.is_file() {
                files.insert(path.to_path_buf());
            } else if path.is_dir() {
                self.walk_dir(path, &mut files)?;
            } else if is_glob(input) {
                self.walk_glob(input, &mut files)?;
            } else {
                warn!(input, "no such file, directory or pattern");
            }
        }

        Ok(files
            .into_iter()
            .filter(|p| !is_backup(p))
            .filter(|p| !excluded.is_match(p))
            .collect())
    }

    fn walk_dir(&self, root: &Path, files: &mut BTreeSet<PathBuf>) -> anyhow::Result<()> {
        let walker = WalkDir::new(root)
            .follow_links(true)
            .max_depth(if self.recursive { usize::MAX } else { 1 });
        for entry in walker.into_iter().filter_entry(|e| !is_ignored_dir(e)) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if self.force || classify(entry.path()).is_known() {
                files.insert(entry.into_path());
            } else {
                debug!(path = %entry.path().display(), "not a known language");
            }
        }
        Ok(())
    }

    fn walk_glob(&self, pattern: &str, files: &mut BTreeSet<PathBuf>) -> anyhow::Result<()> {
        let pattern = if self.recursive && !pattern.contains("**") {
            recursive_pattern(pattern)
        } else {
            pattern.to_string()
        };
        let matcher = GlobBuilder::new(&pattern)
            .literal_separator(true)
            .build()?
            .compile_matcher();

        let root = literal_prefix(&pattern);
        let strip_dot = root == Path::new(".");
        debug!(pattern = %pattern, root = %root.display(), "expanding glob");

        for entry in WalkDir::new(&root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| !is_ignored_dir(e))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = if strip_dot {
                entry.path().strip_prefix(".").unwrap_or(entry.path())
            } else {
                entry.path()
            };
            if matcher.is_match(path) {
                files.insert(path.to_path_buf());
            }
        }
        Ok(())
    }
}

fn build_set(patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(
            Glob::new(pattern)
                .map_err(|e| anyhow::anyhow!("invalid exclude pattern {:?}: {}", pattern, e))?,
        );
    }
    Ok(builder.build()?)
}

fn is_glob(s: &str) -> bool {
    s.contains(['*', '?', '[', '{'])
}

fn is_backup(path: &Path) -> bool {
    path.to_string_lossy().ends_with(BACKUP_SUFFIX)
}

/// Hidden and dependency directories below the walk root.
fn is_ignored_dir(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || IGNORED_DIRS.contains(&name.as_ref())
}

/// Leading components of `pattern` that contain no glob syntax.
fn literal_prefix(pattern: &str) -> PathBuf {
    let mut prefix = PathBuf::new();
    for component in Path::new(pattern).components() {
        if let Component::Normal(part) = component {
            if is_glob(&part.to_string_lossy()) {
                break;
            }
        }
        prefix.push(component);
    }
    if prefix.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        prefix
    }
}

/// `*.py` becomes `**/*.py`; absolute patterns get `**` after their root.
fn recursive_pattern(pattern: &str) -> String {
    let path = Path::new(pattern);
    if path.is_absolute() {
        let root = literal_prefix(pattern);
        let rest = path.strip_prefix(&root).unwrap_or(path);
        format!("{}/**/{}", root.display(), rest.display())
    } else {
        format!("**/{}", pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, rel: &str) -> PathBuf {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, "x\n").unwrap();
        path
    }

    fn tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        for rel in [
            "a.py",
            "a.py.bak",
            "notes.txt",
            "src/b.js",
            "src/deep/c.rs",
            "node_modules/dep/index.js",
            ".hidden/d.py",
        ] {
            touch(temp.path(), rel);
        }
        temp
    }

    fn input(path: &Path) -> String {
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_directory_non_recursive_takes_known_languages() {
        let temp = tree();
        let files = FileSelector::new().select(&[input(temp.path())]).unwrap();
        assert_eq!(files, vec![temp.path().join("a.py")]);
    }

    #[test]
    fn test_directory_recursive_skips_ignored_dirs() {
        let temp = tree();
        let files = FileSelector::new()
            .recursive(true)
            .select(&[input(temp.path())])
            .unwrap();
        assert_eq!(
            files,
            vec![
                temp.path().join("a.py"),
                temp.path().join("src/b.js"),
                temp.path().join("src/deep/c.rs"),
            ]
        );
    }

    #[test]
    fn test_force_takes_unknown_files_from_directories() {
        let temp = tree();
        let files = FileSelector::new()
            .force(true)
            .select(&[input(temp.path())])
            .unwrap();
        assert_eq!(
            files,
            vec![temp.path().join("a.py"), temp.path().join("notes.txt")]
        );
    }

    #[test]
    fn test_glob_pattern() {
        let temp = tree();
        let pattern = input(&temp.path().join("src/*.js"));
        let files = FileSelector::new().select(&[pattern]).unwrap();
        assert_eq!(files, vec![temp.path().join("src/b.js")]);
    }

    #[test]
    fn test_glob_recursive_without_double_star() {
        let temp = tree();
        let pattern = input(&temp.path().join("*.rs"));
        assert!(FileSelector::new().select(&[pattern.clone()]).unwrap().is_empty());

        let files = FileSelector::new().recursive(true).select(&[pattern]).unwrap();
        assert_eq!(files, vec![temp.path().join("src/deep/c.rs")]);
    }

    #[test]
    fn test_explicit_file_and_dedup() {
        let temp = tree();
        let file = input(&temp.path().join("notes.txt"));
        let files = FileSelector::new().select(&[file.clone(), file]).unwrap();
        assert_eq!(files, vec![temp.path().join("notes.txt")]);
    }

    #[test]
    fn test_backups_never_selected() {
        let temp = tree();
        let files = FileSelector::new()
            .force(true)
            .select(&[input(&temp.path().join("a.py.bak"))])
            .unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_exclude_patterns() {
        let temp = tree();
        let files = FileSelector::new()
            .recursive(true)
            .exclude(["**/deep/**", "*.js"])
            .select(&[input(temp.path())])
            .unwrap();
        assert_eq!(files, vec![temp.path().join("a.py")]);
    }

    #[test]
    fn test_invalid_exclude_is_an_error() {
        let temp = tree();
        let err = FileSelector::new()
            .exclude(["a[".to_string()])
            .select(&[input(temp.path())])
            .unwrap_err();
        assert!(err.to_string().contains("invalid exclude pattern"));
    }

    #[test]
    fn test_missing_input_yields_nothing() {
        let files = FileSelector::new().select(&["does/not/exist.py"]).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_literal_prefix() {
        assert_eq!(literal_prefix("*.py"), PathBuf::from("."));
        assert_eq!(literal_prefix("src/**/*.py"), PathBuf::from("src"));
        assert_eq!(literal_prefix("/tmp/x/*.py"), PathBuf::from("/tmp/x"));
        assert_eq!(recursive_pattern("*.py"), "**/*.py");
        assert_eq!(recursive_pattern("/tmp/x/*.py"), "/tmp/x/**/*.py");
    }
}
