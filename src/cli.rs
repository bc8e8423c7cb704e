//! Command-line interface for decomment.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::config::{self, Config, TEMPLATE};
use crate::files::FileSelector;
use crate::report;
use crate::runner::Runner;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Strip comments from source files.
///
/// Decomment removes comments from source code in two dozen languages
/// without touching string literals, optionally keeping TODO/FIXME notes,
/// documentation comments, or anything matching your own patterns. Files
/// are rewritten in place, with a `.bak` copy by default.
#[derive(Parser)]
#[command(name = "decomment")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Remove comments from files, directories or glob patterns
    #[command(visible_alias = "clean")]
    Strip(StripArgs),
    /// Create a decomment.yaml config file
    Init(InitArgs),
    /// List supported languages and their extensions
    Languages,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Pretty,
    Json,
}

/// Arguments for the strip command.
#[derive(Parser)]
pub struct StripArgs {
    /// Files, directories or glob patterns (e.g. 'src/*.js')
    #[arg(required = true)]
    pub paths: Vec<String>,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Skip creating backup files
    #[arg(long)]
    pub no_backup: bool,

    /// Process unknown file types
    #[arg(long)]
    pub force: bool,

    /// Process directories and patterns recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// Preserve TODO and FIXME comments
    #[arg(long)]
    pub preserve_todo: bool,

    /// Preserve comments matching this regex (repeatable)
    #[arg(long = "preserve-pattern", value_name = "REGEX")]
    pub preserve_pattern: Vec<String>,

    /// JSON array of regex patterns to preserve
    #[arg(long, value_name = "JSON")]
    pub preserve_patterns: Option<String>,

    /// Preserve documentation comments
    #[arg(long)]
    pub keep_doc_comments: bool,

    /// Also remove the Python shebang and encoding declaration
    #[arg(long)]
    pub strip_script_header: bool,

    /// Number of threads for parallel processing
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Glob pattern for paths to skip (repeatable)
    #[arg(short, long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Report what would change without writing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub format: Format,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "decomment.yaml")]
    pub output: PathBuf,

    /// Print the template instead of writing it
    #[arg(short, long)]
    pub print: bool,
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level follows `-v`.
pub fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("decomment={}", default_level)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Merge command-line flags over file settings.
///
/// Boolean flags only turn settings on, except `--no-backup`. Patterns and
/// excludes are appended to the file's lists.
pub fn apply_overrides(mut config: Config, args: &StripArgs) -> Config {
    config.preserve_todo |= args.preserve_todo;
    config.keep_doc_comments |= args.keep_doc_comments;
    config.strip_script_header |= args.strip_script_header;
    config.force |= args.force;
    config.recursive |= args.recursive;
    if args.no_backup {
        config.backup = false;
    }
    if let Some(threads) = args.threads {
        config.threads = threads;
    }
    config
        .preserve_patterns
        .extend(args.preserve_pattern.iter().cloned());
    if let Some(json) = &args.preserve_patterns {
        match serde_json::from_str::<Vec<String>>(json) {
            Ok(patterns) => config.preserve_patterns.extend(patterns),
            Err(e) => {
                warn!(error = %e, "ignoring --preserve-patterns: not a JSON array of strings")
            }
        }
    }
    config.exclude.extend(args.exclude.iter().cloned());
    config
}

/// Run the strip command.
pub fn run_strip(args: &StripArgs, quiet: bool) -> anyhow::Result<i32> {
    let (file_config, config_path) = match Config::load(args.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return Ok(EXIT_ERROR);
        }
    };
    let config = apply_overrides(file_config, args);

    if let Err(e) = config::validate(&config) {
        eprintln!("Error: invalid configuration: {}", e);
        return Ok(EXIT_ERROR);
    }

    let files = FileSelector::new()
        .recursive(config.recursive)
        .force(config.force)
        .exclude(config.exclude.iter().cloned())
        .select(&args.paths)?;

    if files.is_empty() {
        if !quiet {
            eprintln!("No files found matching: {}", args.paths.join(" "));
        }
        return Ok(EXIT_SUCCESS);
    }

    let runner = Runner::new(config.policy())
        .backup(config.backup)
        .force(config.force)
        .dry_run(args.dry_run)
        .threads(config.threads)
        .show_progress(!quiet && args.format == Format::Pretty);
    let result = runner.run(&files)?;

    match args.format {
        Format::Json => report::write_json(&result)?,
        Format::Pretty => {
            let config_str = config_path.map(|p| p.display().to_string());
            report::write_pretty(&result, config_str.as_deref());
        }
    }

    if result.has_failures() {
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    if args.print {
        print!("{}", TEMPLATE);
        return Ok(EXIT_SUCCESS);
    }

    // Check if output already exists
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    // Create output directory if needed
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, TEMPLATE) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to choose what to keep", args.output.display());
    println!(
        "  2. Run: decomment strip . --config {}",
        args.output.display()
    );

    Ok(EXIT_SUCCESS)
}

/// Run the languages command.
pub fn run_languages() -> anyhow::Result<i32> {
    report::write_languages();
    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_args(argv: &[&str]) -> StripArgs {
        let mut full = vec!["decomment", "strip"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Commands::Strip(args) => args,
            _ => panic!("expected strip"),
        }
    }

    #[test]
    fn test_flags_override_file() {
        let file = Config {
            preserve_patterns: vec!["from-file".to_string()],
            exclude: vec!["*.min.js".to_string()],
            threads: 2,
            ..Default::default()
        };
        let args = strip_args(&[
            "src",
            "--preserve-todo",
            "--no-backup",
            "-j",
            "8",
            "--preserve-pattern",
            "one",
            "--preserve-patterns",
            r#"["two", "three"]"#,
            "-e",
            "**/gen/**",
        ]);

        let config = apply_overrides(file, &args);

        assert!(config.preserve_todo);
        assert!(!config.backup);
        assert_eq!(config.threads, 8);
        assert_eq!(
            config.preserve_patterns,
            vec!["from-file", "one", "two", "three"]
        );
        assert_eq!(config.exclude, vec!["*.min.js", "**/gen/**"]);
    }

    #[test]
    fn test_flags_cannot_turn_file_settings_off() {
        let file = Config {
            keep_doc_comments: true,
            recursive: true,
            ..Default::default()
        };
        let config = apply_overrides(file, &strip_args(&["."]));
        assert!(config.keep_doc_comments);
        assert!(config.recursive);
        assert!(config.backup);
        assert_eq!(config.threads, 4);
    }

    #[test]
    fn test_bad_json_patterns_are_ignored() {
        let args = strip_args(&[".", "--preserve-patterns", "not json"]);
        let config = apply_overrides(Config::default(), &args);
        assert!(config.preserve_patterns.is_empty());
    }

    #[test]
    fn test_clean_alias_and_format() {
        let cli = Cli::parse_from(["decomment", "-vv", "clean", "a.py", "--format", "json"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Strip(args) => {
                assert_eq!(args.paths, vec!["a.py"]);
                assert_eq!(args.format, Format::Json);
            }
            _ => panic!("expected strip"),
        }
    }
}
