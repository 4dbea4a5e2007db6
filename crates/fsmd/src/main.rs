//! fsmd CLI - filesystem markdown content engine.
//!
//! Provides commands for:
//! - `serve`: Start the content server
//! - `resolve`: Resolve one path and print the page as JSON

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ResolveArgs, ServeArgs};
use error::CliError;
use output::Output;

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit status of `resolve` when the path has no page.
const EXIT_NOT_FOUND: u8 = 2;

/// fsmd - Filesystem markdown content engine.
#[derive(Parser)]
#[command(name = "fsmd", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the content server.
    Serve(ServeArgs),
    /// Resolve one path and print the page with its navigation as JSON.
    Resolve(ResolveArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Serve(args) => args.verbose,
        Commands::Resolve(args) => args.verbose,
    };

    // --verbose enables INFO level, otherwise defer to RUST_LOG
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Serve(args) => tokio::runtime::Runtime::new()
            .map_err(CliError::from)
            .and_then(|rt| rt.block_on(args.execute(VERSION)))
            .map(|()| ExitCode::SUCCESS),
        Commands::Resolve(args) => args.execute().map(|found| {
            if found {
                ExitCode::SUCCESS
            } else {
                output.warning("Page not found");
                ExitCode::from(EXIT_NOT_FOUND)
            }
        }),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            output.error(&format!("Error: {err}"));
            ExitCode::FAILURE
        }
    }
}
