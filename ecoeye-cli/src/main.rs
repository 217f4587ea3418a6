//! EcoEye CLI.
//!
//! Terminal front end to the `ecoeye` library: backend health checks,
//! model listings, report acquisition with fallback degradation, and
//! trip telemetry replay.

mod commands;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use ecoeye::config::ConfigFile;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "ecoeye", version, about = "Vehicle eco reports and trip telemetry")]
struct Cli {
    /// Configuration file (default: ~/.config/ecoeye/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, overriding the configuration file
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Write logs to daily-rotated files in this directory instead of stderr
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check backend availability
    Status,
    /// List known vehicle models and years
    Models(commands::models::ModelsArgs),
    /// Acquire an eco report for a vehicle
    Report(commands::report::ReportArgs),
    /// Replay trip telemetry and compute driving statistics
    Track(commands::track::TrackArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // The file-logging guard must outlive all command execution
    let _guard = match &cli.log_dir {
        Some(dir) => Some(ecoeye::logging::init_with_file(dir)),
        None => {
            ecoeye::logging::init();
            None
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", console::style(format!("Error: {}", e)).red());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = match &cli.config {
        Some(path) => ConfigFile::load(path).map_err(|e| CliError::Config(e.to_string()))?,
        None => ConfigFile::load_default().map_err(|e| CliError::Config(e.to_string()))?,
    };
    if let Some(url) = cli.api_url {
        config.api.url = url.trim_end_matches('/').to_string();
    }

    match cli.command {
        Command::Status => commands::status::run(&config).await,
        Command::Models(args) => commands::models::run(&config, args).await,
        Command::Report(args) => commands::report::run(&config, args).await,
        Command::Track(args) => commands::track::run(&config, args).await,
    }
}
