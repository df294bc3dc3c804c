mod config;
mod logging;
mod server;
mod signals;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::{AppConfig, CliArgs};

/// Contacts Server - REST API for managing contacts
#[derive(Parser)]
#[command(name = "contacts-server")]
#[command(about = "Contacts Server - REST API for managing contacts")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (JSON) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use mock database (sqlite::memory:)
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(ref path) = cli.config
        && !Path::new(path).is_file()
    {
        anyhow::bail!("config file does not exist: {}", path.display());
    }

    let args = CliArgs {
        port: cli.port,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // 1) defaults -> 2) YAML (if provided) -> 3) env (APP__*) -> 4) CLI overrides
    let mut config = AppConfig::load_layered(cli.config.as_deref())?;
    config.apply_cli_overrides(&args)?;
    config.validate()?;

    logging::init_logging(&config.logging)?;

    if cli.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            tracing::info!(version = env!("CARGO_PKG_VERSION"), "Contacts Server starting");
            server::run_server(config).await
        }
        Commands::Check => check_config(&config),
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    println!("Configuration is valid");
    println!("{}", config.to_json()?);
    Ok(())
}
