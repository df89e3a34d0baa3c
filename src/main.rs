mod ast;
mod classify;
mod commands;
mod config;
mod diagnostics;
mod error;
mod frontend;
mod grammar;
mod members;
mod modules;
mod package;
mod render;
mod scanner;
mod toolchain;
mod types;
mod walker;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gosym", version, about = "Exported symbols, type details, and docs of Go code as JSON")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Log extraction decisions to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Report the Go toolchain: binary, GOROOT, version
    Env,
    /// List modules used by a project (`go mod download -json`)
    Modules {
        /// Project directory
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// Exported symbols and docs of one package
    Package {
        /// Attach source positions to top-level symbols
        #[arg(long)]
        positions: bool,
        /// Report package docs only
        #[arg(long)]
        skip_symbols: bool,
        /// Package directory, or import path within the current module
        target: String,
    },
    /// Every package under a project root, docs only
    Project {
        /// Project root
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// Standard library packages of the installed Go toolchain
    Std {
        /// Include exported symbols, not just package docs
        #[arg(long)]
        symbols: bool,
    },
    /// Exported symbols and docs of one Go file
    Symbols {
        /// Go source file
        file: PathBuf,
        /// Attach source positions to top-level symbols
        #[arg(long)]
        positions: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Env => commands::env(),
        Commands::Modules { dir } => commands::modules(&dir),
        Commands::Package { positions, skip_symbols, target } => commands::package(&target, positions, skip_symbols),
        Commands::Project { dir } => commands::project(&dir),
        Commands::Std { symbols } => commands::stdlib(symbols),
        Commands::Symbols { file, positions } => commands::symbols(&file, positions),
    };

    return match result {
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::FAILURE
        },
        Ok(()) => ExitCode::SUCCESS,
    };
}

/// Install the stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        return if verbose { EnvFilter::new("gosym=debug") } else { EnvFilter::new("gosym=warn") };
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .init();
}
