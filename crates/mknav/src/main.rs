//! mknav CLI - navigation builder for mkdocs sites.
//!
//! Provides commands for:
//! - `build`: Merge one repository's fragments into its site configuration
//! - `build-all`: Build every repository listed in `mknav.toml`
//! - `check`: Expand fragments and print the navigation without writing
//! - `scan`: Print a navigation mirroring a directory layout

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildAllArgs, BuildArgs, CheckArgs, ScanArgs};
use output::Output;

/// mknav - navigation builder for mkdocs sites.
#[derive(Parser)]
#[command(name = "mknav", version, about)]
struct Cli {
    /// Path to configuration file (default: auto-discover mknav.toml).
    #[arg(short, long, global = true, env = "MKNAV_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the site configuration of one repository.
    Build(BuildArgs),
    /// Build every configured repository.
    BuildAll(BuildAllArgs),
    /// Expand fragments and print the navigation.
    Check(CheckArgs),
    /// Print a navigation mirroring a directory layout.
    Scan(ScanArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise RUST_LOG decides
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Build(args) => args.execute(config),
        Commands::BuildAll(args) => args.execute(config),
        Commands::Check(args) => args.execute(config),
        Commands::Scan(args) => args.execute(config),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
