//! malloy-bridge CLI - Compile warehouse mappings to Malloy
//!
//! Usage:
//!   malloy-bridge generate --mapping <file> [--out <dir>]
//!   malloy-bridge report --mapping <file> [--inventory-tables <csv>] --out <file>
//!   malloy-bridge validate --mapping <file> [--inventory-tables <csv>]
//!
//! Examples:
//!   malloy-bridge generate --mapping mapping.yaml --out build/malloy
//!   malloy-bridge report --mapping mapping.json --inventory-tables hive_tables.csv --out readiness.md

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use malloy_bridge::config::Settings;
use malloy_bridge::emitter::{colliding_paths, generate_artifacts, ArtifactKind};
use malloy_bridge::logging::{init_logging, LogConfig, LogFormat};
use malloy_bridge::mapping::{load_inventory_tables, load_mapping, InventoryTables, MappingDocument};
use malloy_bridge::readiness::ReadinessReport;
use serde_json::Value;
use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, warn};

#[derive(Parser)]
#[command(name = "malloy-bridge")]
#[command(about = "Compile warehouse mapping documents into Malloy scaffolds and readiness reports")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a malloy-bridge.toml settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log output format (overrides the settings file)
    #[arg(long, global = true)]
    log_format: Option<LogFormatArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Malloy source and query files from a mapping
    Generate {
        /// YAML/JSON mapping file
        #[arg(long)]
        mapping: PathBuf,

        /// Output directory (defaults to [generate] out_dir in settings)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Write a Markdown migration readiness report
    Report {
        /// YAML/JSON mapping file
        #[arg(long)]
        mapping: PathBuf,

        /// Optional inventory CSV with a table name column
        #[arg(long)]
        inventory_tables: Option<PathBuf>,

        /// Output Markdown file
        #[arg(long)]
        out: PathBuf,
    },

    /// Render everything in memory and print the readiness score
    Validate {
        /// YAML/JSON mapping file
        #[arg(long)]
        mapping: PathBuf,

        /// Optional inventory CSV with a table name column
        #[arg(long)]
        inventory_tables: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading settings: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let log_config = match LogConfig::from_settings(&settings.logging) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error in logging settings: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let log_config = match cli.log_format {
        Some(format) => log_config.with_format(format.into()),
        None => log_config,
    };
    init_logging(
        &log_config
            .with_verbosity(cli.verbose)
            .with_ansi(io::stderr().is_terminal()),
    );

    let result = match cli.command {
        Commands::Generate { mapping, out } => cmd_generate(&settings, &mapping, out),
        Commands::Report {
            mapping,
            inventory_tables,
            out,
        } => cmd_report(&settings, &mapping, inventory_tables.as_deref(), &out),
        Commands::Validate {
            mapping,
            inventory_tables,
        } => cmd_validate(&settings, &mapping, inventory_tables.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{}", message);
            ExitCode::FAILURE
        }
    }
}

type CmdResult = Result<(), String>;

fn read_mapping(path: &Path) -> Result<Value, String> {
    load_mapping(path).map_err(|e| format!("Error loading mapping '{}': {}", path.display(), e))
}

fn read_inventory(settings: &Settings, path: Option<&Path>) -> Result<InventoryTables, String> {
    load_inventory_tables(path, &settings.report.inventory_column)
        .map_err(|e| format!("Error loading inventory: {}", e))
}

fn cmd_generate(settings: &Settings, mapping: &Path, out: Option<PathBuf>) -> CmdResult {
    let out_dir = match out {
        Some(dir) => dir,
        None => settings
            .generate
            .resolved_out_dir()
            .map_err(|e| format!("Error in generate settings: {}", e))?
            .ok_or("No output directory: pass --out or set [generate] out_dir")?,
    };

    let root = read_mapping(mapping)?;
    let document = MappingDocument::new(&root).map_err(|e| e.to_string())?;
    let artifacts = generate_artifacts(&document).map_err(|e| e.to_string())?;

    for path in colliding_paths(&artifacts) {
        warn!(
            path = %path.display(),
            "several definitions normalize to the same file; the last one wins"
        );
    }

    for artifact in &artifacts {
        artifact
            .write_to(&out_dir)
            .map_err(|e| format!("Error writing '{}': {}", artifact.path.display(), e))?;
    }

    let source_count = artifacts
        .iter()
        .filter(|a| a.kind == ArtifactKind::Source)
        .count();
    let query_count = artifacts.len() - source_count;
    println!(
        "Generated {} source file(s) and {} query file(s) in {}",
        source_count,
        query_count,
        out_dir.display()
    );
    Ok(())
}

fn cmd_report(
    settings: &Settings,
    mapping: &Path,
    inventory: Option<&Path>,
    out: &Path,
) -> CmdResult {
    let root = read_mapping(mapping)?;
    let inventory = read_inventory(settings, inventory)?;
    let document = MappingDocument::new(&root).map_err(|e| e.to_string())?;
    let report = ReadinessReport::assess(&document, &inventory);

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Error creating '{}': {}", parent.display(), e))?;
    }
    fs::write(out, report.render_markdown())
        .map_err(|e| format!("Error writing '{}': {}", out.display(), e))?;

    println!("Readiness report written: {}", out.display());
    Ok(())
}

fn cmd_validate(settings: &Settings, mapping: &Path, inventory: Option<&Path>) -> CmdResult {
    let root = read_mapping(mapping)?;
    let inventory = read_inventory(settings, inventory)?;
    let document = MappingDocument::new(&root).map_err(|e| e.to_string())?;
    let report = ReadinessReport::assess(&document, &inventory);

    println!("Readiness score: {}/100", report.score);
    for blocker in &report.blockers {
        println!("  - {}", blocker);
    }

    let artifacts = generate_artifacts(&document).map_err(|e| e.to_string())?;
    println!("OK: {} renders {} artifact(s)", mapping.display(), artifacts.len());
    Ok(())
}
