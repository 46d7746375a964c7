//! jarclash CLI - duplicate class checker for dependency archives
//!
//! Provides `jarclash scan` and `jarclash entries`.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use jarclash_scanner::output::{append_log, to_json, to_log, to_markdown};
use jarclash_scanner::resolve::{self, Manifest};
use jarclash_scanner::{is_trackable_entry, scan_entries, CheckerConfig, ScanReport, Scanner};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Exit status when collisions are found and treated as a failure
const COLLISION_EXIT_CODE: i32 = 2;

#[derive(Parser)]
#[command(name = "jarclash")]
#[command(about = "jarclash - find classes shipped by more than one dependency archive")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan dependency archives for duplicate classes
    Scan(ScanArgs),
    /// List the trackable class entries of one archive
    Entries {
        /// Archive to list
        archive: PathBuf,
    },
}

#[derive(clap::Args)]
struct ScanArgs {
    /// Archives or directories of archives, in classpath order
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Resolved dependency manifest (JSON), scanned after PATHs
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip archives whose path contains this substring
    #[arg(short, long = "exclude", value_name = "SUBSTRING")]
    excludes: Vec<String>,

    /// Do not seed the logging-bridge exclusions
    #[arg(long)]
    no_default_exclusions: bool,

    /// Archive file extension
    #[arg(long, value_name = "EXT")]
    extension: Option<String>,

    /// Leave out test scope dependencies
    #[arg(long)]
    exclude_test_scope: bool,

    /// Scope label for archives given as PATHs
    #[arg(short, long, value_name = "LABEL")]
    scope: Option<String>,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Append the collision log to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Exit with a non-zero status when collisions are found
    #[arg(long)]
    fail_on_collision: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Text,
    Json,
    Markdown,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Scan(args) => run_scan(args),
        Commands::Entries { archive } => run_entries(&archive).map(|()| 0),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("jarclash_scanner=debug,info")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Merge the config file with command-line overrides
fn load_config(args: &ScanArgs) -> anyhow::Result<CheckerConfig> {
    let mut config = match &args.config {
        Some(path) => CheckerConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => CheckerConfig::default(),
    };

    if args.no_default_exclusions {
        config = config.without_default_exclusions();
    }
    config.exclusions.extend(args.excludes.iter().cloned());
    if let Some(extension) = &args.extension {
        config.archive_extension.clone_from(extension);
    }
    if args.exclude_test_scope {
        config.include_test_scope = false;
    }
    if let Some(scope) = &args.scope {
        config.default_scope.clone_from(scope);
    }
    if args.fail_on_collision {
        config.fail_on_collision = true;
    }

    config.validate()?;
    Ok(config)
}

fn run_scan(args: ScanArgs) -> anyhow::Result<i32> {
    let config = load_config(&args)?;

    if args.paths.is_empty() && args.manifest.is_none() {
        bail!("nothing to scan: pass archive paths or --manifest");
    }

    let mut dependencies = resolve::from_paths(&args.paths, &config.default_scope)?;
    if let Some(path) = &args.manifest {
        dependencies.extend(Manifest::load(path)?.dependencies);
    }
    let dependencies = resolve::apply_scope_policy(dependencies, config.include_test_scope);

    let mut scanner = Scanner::from_config(&config);
    let report = scanner.run(&dependencies);

    let rendered = match args.format {
        OutputFormat::Text => to_text(&report),
        OutputFormat::Json => to_json(&report)?,
        OutputFormat::Markdown => to_markdown(&report),
    };
    match &args.output {
        Some(path) => write_report(&rendered, path)?,
        None => print!("{rendered}"),
    }

    if let Some(path) = &args.log_file {
        append_log(&report, path, true)
            .with_context(|| format!("failed to append to {}", path.display()))?;
    }

    if config.fail_on_collision && report.has_collisions() {
        return Ok(COLLISION_EXIT_CODE);
    }
    Ok(0)
}

/// Terminal report: the collision log plus a one-line summary
fn to_text(report: &ScanReport) -> String {
    let mut output = if report.has_collisions() || report.unreadable().next().is_some() {
        to_log(report)
    } else {
        String::new()
    };

    if report.has_collisions() {
        output.push_str(&format!(
            "\n{} duplicate classes across {} archive pairs ({} archives scanned)\n",
            report.entry_count(),
            report.total_count(),
            report.archives_scanned
        ));
    } else {
        output.push_str(&format!(
            "No duplicate classes ({} archives scanned)\n",
            report.archives_scanned
        ));
    }
    output
}

fn write_report(rendered: &str, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, rendered)
        .with_context(|| format!("failed to write {}", path.display()))?;
    eprintln!("Wrote report to: {}", path.display());
    Ok(())
}

fn run_entries(archive: &Path) -> anyhow::Result<()> {
    let mut total = 0;
    for entry in scan_entries(archive)? {
        let entry = entry?;
        if is_trackable_entry(&entry) {
            println!("{entry}");
            total += 1;
        }
    }
    eprintln!("{total} class entries");
    Ok(())
}
