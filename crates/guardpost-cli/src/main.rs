//! # guardpost CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Uses clap derive macros; verbosity maps to tracing filter levels.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use guardpost_cli::catalog::{run_catalog, CatalogArgs};
use guardpost_cli::lock::{run_lock, LockArgs};
use guardpost_cli::synth::{run_synth, SynthArgs};
use guardpost_cli::validate::{run_validate, ValidateArgs};

/// guardpost — compliance stack synthesis and verification
///
/// Synthesizes the auto-remediation compliance stack (managed rules,
/// remediation identity, audit sink) into a deterministic template, and
/// verifies templates against manifest rules and JSON Schema contracts.
#[derive(Parser, Debug)]
#[command(name = "guardpost", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Override the schema directory (defaults to <repo root>/schemas).
    #[arg(long, global = true)]
    schemas: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Synthesize the built-in compliance stack to a template.
    Synth(SynthArgs),

    /// Validate the manifest and template against schema contracts.
    Validate(ValidateArgs),

    /// Generate or verify the deterministic lockfile.
    Lock(LockArgs),

    /// List the managed-rule and automation-document catalogs.
    Catalog(CatalogArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Resolve the repository root: walk up from CWD looking for the
    // schema directory.
    let repo_root = resolve_repo_root().unwrap_or_else(|| {
        tracing::warn!("could not locate repository root; using current directory");
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    });

    let schema_dir = cli
        .schemas
        .clone()
        .unwrap_or_else(|| repo_root.join("schemas"));

    tracing::debug!(
        repo_root = %repo_root.display(),
        schema_dir = %schema_dir.display(),
        "resolved paths"
    );

    let result = match cli.command {
        Commands::Synth(args) => run_synth(&args, &repo_root),
        Commands::Validate(args) => run_validate(&args, &repo_root, &schema_dir),
        Commands::Lock(args) => run_lock(&args, &repo_root),
        Commands::Catalog(args) => run_catalog(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

/// Walk up from the current directory to find the repository root.
///
/// The root is identified by a `schemas/` directory containing the
/// template envelope schema.
fn resolve_repo_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut dir = cwd.as_path();
    loop {
        if dir.join("schemas").join("template.schema.json").is_file() {
            return Some(dir.to_path_buf());
        }
        dir = dir.parent()?;
    }
}
