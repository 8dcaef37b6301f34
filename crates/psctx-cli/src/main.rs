//! # psctx CLI entry point
//!
//! Parses command-line arguments, loads options, and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use psctx_cli::compress::{run_compress, CompressArgs};
use psctx_cli::expand::{run_expand, ExpandArgs};

/// Schema-URL context compression.
///
/// Replaces schema namespaces in resource documents with short tokens and
/// expands them back.
#[derive(Parser, Debug)]
#[command(name = "psctx", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML options file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replace namespaces with tokens and emit the context.
    Compress(CompressArgs),

    /// Expand tokens and root references back to full documents.
    Expand(ExpandArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = psctx_cli::load_options(cli.config.as_deref()).and_then(|options| {
        match cli.command {
            Commands::Compress(args) => run_compress(&args, &options),
            Commands::Expand(args) => run_expand(&args, &options),
        }
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
